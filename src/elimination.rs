//! Exact inference by variable elimination
//!
//! The engine restricts every CPT against the evidence, asks the
//! [`ordering`](crate::ordering) module for a min-fill elimination order
//! over the remaining variables, then walks that order: multiply every
//! pooled factor that mentions the variable, sum the variable out of the
//! product, and put the result back in the pool. What survives mentions
//! only the query variable; multiplying and normalizing it yields the
//! posterior.

use log::debug;

use crate::errors::InferenceError;
use crate::model::{Factor, Network, VarId};
use crate::ordering::min_fill_order;

/// Compute the posterior distribution of `query` given `evidence`, as a
/// normalized factor over `query`.
///
/// Evidence is a list of (variable, value-label) observations. Errors:
/// [`InvalidQuery`](InferenceError::InvalidQuery) when the query variable
/// is itself observed, [`InvalidValue`](InferenceError::InvalidValue) when
/// an evidence label is outside its variable's domain, and
/// [`ZeroMass`](InferenceError::ZeroMass) when the evidence has zero
/// probability under the model.
pub fn posterior(
    net: &Network,
    query: VarId,
    evidence: &[(VarId, &str)],
) -> Result<Factor, InferenceError> {
    if evidence.iter().any(|&(v, _)| v == query) {
        return Err(InferenceError::InvalidQuery {
            variable: net.variable(query).name().to_string(),
        });
    }

    // Restrict every CPT against every evidence entry; factors that do not
    // mention an evidence variable pass through untouched. Bad evidence
    // labels surface here, before any elimination work.
    let vars = net.variables();
    let mut pool: Vec<Factor> = net.factors().cloned().collect();
    for &(var, value) in evidence {
        for factor in &mut pool {
            *factor = factor.restrict(vars, var, value)?;
        }
    }

    let eliminate: Vec<VarId> = (0..net.num_variables())
        .map(VarId)
        .filter(|&v| v != query && !evidence.iter().any(|&(e, _)| e == v))
        .collect();
    let order = min_fill_order(net, &pool, &eliminate);
    debug!(
        "eliminating {} variables for query {}",
        order.len(),
        net.variable(query).name()
    );

    for var in order {
        let (mentioning, rest): (Vec<Factor>, Vec<Factor>) =
            pool.into_iter().partition(|f| f.mentions(var));
        pool = rest;
        if mentioning.is_empty() {
            continue;
        }
        let refs: Vec<&Factor> = mentioning.iter().collect();
        let product = Factor::multiply(&refs);
        debug!(
            "eliminated {}: {} factors -> table of {} entries",
            net.variable(var).name(),
            refs.len(),
            product.table().len() / net.variable(var).domain_size()
        );
        pool.push(product.sum_out(vars, var)?);
    }

    // Whatever remains mentions only the query variable (or nothing, for
    // constant factors left behind by restriction)
    let refs: Vec<&Factor> = pool.iter().collect();
    Factor::multiply(&refs).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NetworkBuilder;

    /// A -> B -> C chain, each binary, with the closed-form posterior
    /// P(C=1) = 0.417.
    fn chain() -> (Network, VarId, VarId, VarId) {
        let mut b = NetworkBuilder::new();
        let a = b.add_variable("A", ["0", "1"]).unwrap();
        let bb = b.add_variable("B", ["0", "1"]).unwrap();
        let c = b.add_variable("C", ["0", "1"]).unwrap();
        b.add_cpt(a, &[], vec![0.7, 0.3]).unwrap();
        // P(B=1|A=1)=0.8, P(B=1|A=0)=0.1; child-major layout [b0a0, b0a1, b1a0, b1a1]
        b.add_cpt(bb, &[a], vec![0.9, 0.2, 0.1, 0.8]).unwrap();
        // P(C=1|B=1)=0.9, P(C=1|B=0)=0.2
        b.add_cpt(c, &[bb], vec![0.8, 0.1, 0.2, 0.9]).unwrap();
        let net = b.build().unwrap();
        (net, a, bb, c)
    }

    #[test]
    fn test_chain_marginal_closed_form() {
        let (net, _, _, c) = chain();
        let p = posterior(&net, c, &[]).unwrap();
        assert!((p.value(&[1]) - 0.417).abs() < 1e-9);
        assert!((p.value(&[0]) - 0.583).abs() < 1e-9);
    }

    #[test]
    fn test_chain_with_evidence() {
        let (net, a, _, c) = chain();
        // P(C=1|A=1) = 0.8*0.9 + 0.2*0.2 = 0.76
        let p = posterior(&net, c, &[(a, "1")]).unwrap();
        assert!((p.value(&[1]) - 0.76).abs() < 1e-9);
    }

    #[test]
    fn test_diagnostic_query_against_bayes_rule() {
        let (net, a, _, c) = chain();
        // P(A=1|C=1) = P(C=1|A=1) P(A=1) / P(C=1)
        let p = posterior(&net, a, &[(c, "1")]).unwrap();
        let expected = 0.76 * 0.3 / 0.417;
        assert!((p.value(&[1]) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_posterior_sums_to_one() {
        let (net, _, bb, c) = chain();
        let p = posterior(&net, bb, &[(c, "0")]).unwrap();
        let total: f64 = p.table().iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_query_in_evidence_rejected() {
        let (net, _, _, c) = chain();
        let err = posterior(&net, c, &[(c, "1")]).unwrap_err();
        assert!(matches!(err, InferenceError::InvalidQuery { .. }));
    }

    #[test]
    fn test_evidence_outside_domain_rejected() {
        let (net, a, _, c) = chain();
        let err = posterior(&net, c, &[(a, "2")]).unwrap_err();
        assert!(matches!(err, InferenceError::InvalidValue { .. }));
    }

    #[test]
    fn test_empty_elimination_order() {
        // Querying the root with every other variable observed: nothing to
        // eliminate, the engine just restricts and normalizes.
        let (net, a, bb, c) = chain();
        let p = posterior(&net, a, &[(bb, "1"), (c, "1")]).unwrap();
        let total: f64 = p.table().iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        // P(A=1|B=1) (C is independent of A given B)
        let expected = 0.8 * 0.3 / (0.8 * 0.3 + 0.1 * 0.7);
        assert!((p.value(&[1]) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_zero_mass_evidence() {
        let mut b = NetworkBuilder::new();
        let a = b.add_variable("A", ["0", "1"]).unwrap();
        let c = b.add_variable("B", ["0", "1"]).unwrap();
        b.add_cpt(a, &[], vec![1.0, 0.0]).unwrap();
        // B deterministically equals A, so B=1 is impossible
        b.add_cpt(c, &[a], vec![1.0, 0.0, 0.0, 1.0]).unwrap();
        let net = b.build().unwrap();

        let err = posterior(&net, a, &[(c, "1")]).unwrap_err();
        assert!(matches!(err, InferenceError::ZeroMass { .. }));
    }
}
