//! Approximate inference by likelihood weighting
//!
//! Each sample forward-simulates the network in topological order:
//! evidence variables are clamped to their observed values and the sample
//! weight picks up the CPT probability of that observation given the
//! already-assigned parents; every other variable is drawn from its CPT
//! row with a single uniform draw against the cumulative distribution.
//! Summing weights per query value and normalizing by the total weight
//! gives an unbiased estimate of the posterior.
//!
//! The sampler is deterministic under a fixed seed: pass
//! [`SimpleRng::new(seed)`](crate::common::SimpleRng) (or any
//! `rand::RngCore` generator) and the same seed reproduces the same
//! estimate.

use log::debug;
use smallvec::SmallVec;

use crate::common::Rng;
use crate::distribution::Distribution;
use crate::errors::InferenceError;
use crate::model::{Network, VarId};

/// Estimate the posterior of `query` given `evidence` from `samples`
/// likelihood-weighted forward simulations.
///
/// Errors mirror [`posterior`](crate::elimination::posterior):
/// [`InvalidQuery`](InferenceError::InvalidQuery) for an observed query,
/// [`InvalidValue`](InferenceError::InvalidValue) for an evidence label
/// outside its domain, and [`ZeroMass`](InferenceError::ZeroMass) when
/// every sample had zero likelihood: the evidence is (near-)impossible
/// under the model, or `samples` is far too small.
pub fn likelihood_weighting(
    net: &Network,
    query: VarId,
    evidence: &[(VarId, &str)],
    samples: usize,
    rng: &mut impl Rng,
) -> Result<Distribution, InferenceError> {
    if evidence.iter().any(|&(v, _)| v == query) {
        return Err(InferenceError::InvalidQuery {
            variable: net.variable(query).name().to_string(),
        });
    }

    // Resolve evidence labels to domain indices up front
    let mut clamped: Vec<Option<usize>> = vec![None; net.num_variables()];
    for &(var, value) in evidence {
        let variable = net.variable(var);
        let idx = variable
            .value_index(value)
            .ok_or_else(|| InferenceError::InvalidValue {
                variable: variable.name().to_string(),
                value: value.to_string(),
            })?;
        clamped[var.index()] = Some(idx);
    }

    let query_card = net.variable(query).domain_size();
    let mut weights = vec![0.0f64; query_card];
    let mut total = 0.0f64;

    // Call-scoped assignment, reused across samples
    let mut assignment = vec![0usize; net.num_variables()];
    let mut local: SmallVec<[usize; 4]> = SmallVec::new();

    for _ in 0..samples {
        let mut weight = 1.0f64;
        for &var in net.topological_order() {
            let cpt = net.cpt(var);
            // Parents precede the child in the topological walk, so their
            // assignment slots are already filled
            local.clear();
            local.push(0); // placeholder for the child's own index
            local.extend(cpt.scope()[1..].iter().map(|p| assignment[p.index()]));

            match clamped[var.index()] {
                Some(observed) => {
                    local[0] = observed;
                    weight *= cpt.value(&local);
                    assignment[var.index()] = observed;
                    if weight == 0.0 {
                        break;
                    }
                }
                None => {
                    let card = net.variable(var).domain_size();
                    let row_sum: f64 = (0..card)
                        .map(|i| {
                            local[0] = i;
                            cpt.value(&local)
                        })
                        .sum();
                    if row_sum == 0.0 {
                        // The sampled parent configuration admits no child
                        // value; the whole sample has zero likelihood
                        weight = 0.0;
                        break;
                    }
                    // One uniform draw against the cumulative row; scaling
                    // by the row sum spares an explicit normalization pass
                    let draw = rng.rand() * row_sum;
                    let mut cumulative = 0.0;
                    let mut chosen = card - 1;
                    for i in 0..card {
                        local[0] = i;
                        cumulative += cpt.value(&local);
                        if draw < cumulative {
                            chosen = i;
                            break;
                        }
                    }
                    assignment[var.index()] = chosen;
                }
            }
        }
        if weight > 0.0 {
            weights[assignment[query.index()]] += weight;
            total += weight;
        }
    }

    debug!(
        "likelihood weighting: {} samples, total weight {:.6}",
        samples, total
    );
    if total == 0.0 {
        return Err(InferenceError::ZeroMass {
            context: format!("total weight over {} samples", samples),
        });
    }

    let variable = net.variable(query);
    let values = variable
        .domain()
        .iter()
        .zip(&weights)
        .map(|(label, &w)| (label.clone(), w / total))
        .collect();
    Ok(Distribution::new(variable.name().to_string(), values))
}
