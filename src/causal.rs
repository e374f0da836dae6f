//! Fixed-topology causal model builders
//!
//! Two three-variable topologies that differ only in where the covariate
//! sits relative to the treatment:
//!
//! - **mediator**: treatment → covariate → outcome, plus the direct
//!   treatment → outcome edge
//! - **confounder**: covariate → treatment, covariate → outcome, plus
//!   treatment → outcome
//!
//! Both are pure structural assembly over [`NetworkBuilder`]; deriving the
//! CPT tables from data (counting rows in a CSV, say) is the caller's
//! job. [`average_causal_effect`] then compares the outcome posterior
//! under the two treatment values: a composition of two variable
//! elimination calls, not a new inference primitive.

use crate::elimination::posterior;
use crate::errors::{InferenceError, NetworkError};
use crate::model::{Network, NetworkBuilder, VarId};

/// A variable declaration: name plus ordered domain labels.
pub type VariableSpec<'a> = (&'a str, &'a [&'a str]);

/// A built causal model with handles to its three variables.
#[derive(Debug, Clone)]
pub struct CausalModel {
    /// The assembled network
    pub network: Network,
    /// The intervention variable
    pub treatment: VarId,
    /// The mediating or confounding variable, depending on topology
    pub covariate: VarId,
    /// The effect variable
    pub outcome: VarId,
}

/// Build a mediator-topology model.
///
/// Tables are dense and child-major: `treatment_prior` over the treatment
/// domain, `covariate_cpt` over scope `[covariate, treatment]`, and
/// `outcome_cpt` over scope `[outcome, covariate, treatment]`.
pub fn mediator_model(
    treatment: VariableSpec<'_>,
    covariate: VariableSpec<'_>,
    outcome: VariableSpec<'_>,
    treatment_prior: Vec<f64>,
    covariate_cpt: Vec<f64>,
    outcome_cpt: Vec<f64>,
) -> Result<CausalModel, NetworkError> {
    let mut b = NetworkBuilder::new();
    let t = b.add_variable(treatment.0, treatment.1.iter().copied())?;
    let m = b.add_variable(covariate.0, covariate.1.iter().copied())?;
    let o = b.add_variable(outcome.0, outcome.1.iter().copied())?;
    b.add_cpt(t, &[], treatment_prior)?;
    b.add_cpt(m, &[t], covariate_cpt)?;
    b.add_cpt(o, &[m, t], outcome_cpt)?;
    Ok(CausalModel {
        network: b.build()?,
        treatment: t,
        covariate: m,
        outcome: o,
    })
}

/// Build a confounder-topology model.
///
/// Tables are dense and child-major: `covariate_prior` over the covariate
/// domain, `treatment_cpt` over scope `[treatment, covariate]`, and
/// `outcome_cpt` over scope `[outcome, covariate, treatment]`.
pub fn confounder_model(
    treatment: VariableSpec<'_>,
    covariate: VariableSpec<'_>,
    outcome: VariableSpec<'_>,
    covariate_prior: Vec<f64>,
    treatment_cpt: Vec<f64>,
    outcome_cpt: Vec<f64>,
) -> Result<CausalModel, NetworkError> {
    let mut b = NetworkBuilder::new();
    let t = b.add_variable(treatment.0, treatment.1.iter().copied())?;
    let z = b.add_variable(covariate.0, covariate.1.iter().copied())?;
    let o = b.add_variable(outcome.0, outcome.1.iter().copied())?;
    b.add_cpt(z, &[], covariate_prior)?;
    b.add_cpt(t, &[z], treatment_cpt)?;
    b.add_cpt(o, &[z, t], outcome_cpt)?;
    Ok(CausalModel {
        network: b.build()?,
        treatment: t,
        covariate: z,
        outcome: o,
    })
}

/// Absolute difference in the outcome posterior between two treatment
/// values, optionally conditioned on extra evidence (e.g. stratifying on
/// the confounder).
pub fn average_causal_effect(
    net: &Network,
    treatment: VarId,
    treatment_values: (&str, &str),
    outcome: VarId,
    outcome_value: &str,
    extra_evidence: &[(VarId, &str)],
) -> Result<f64, InferenceError> {
    let outcome_idx = net
        .variable(outcome)
        .value_index(outcome_value)
        .ok_or_else(|| InferenceError::InvalidValue {
            variable: net.variable(outcome).name().to_string(),
            value: outcome_value.to_string(),
        })?;

    let run = |value: &str| -> Result<f64, InferenceError> {
        let mut evidence = vec![(treatment, value)];
        evidence.extend_from_slice(extra_evidence);
        let p = posterior(net, outcome, &evidence)?;
        Ok(p.value(&[outcome_idx]))
    };
    let first = run(treatment_values.0)?;
    let second = run(treatment_values.1)?;
    Ok((first - second).abs())
}
