//! Query result type
//!
//! Both inference engines ultimately answer with a probability
//! distribution over one variable's domain. [`Distribution`] pairs each
//! domain label with its probability, in domain order, and serializes
//! cleanly for downstream drivers.

use serde::Serialize;

use crate::errors::InferenceError;
use crate::model::{Factor, Network, VarId};

/// A normalized distribution over one variable's domain, in domain order.
#[derive(Debug, Clone, Serialize)]
pub struct Distribution {
    variable: String,
    values: Vec<(String, f64)>,
}

impl Distribution {
    pub(crate) fn new(variable: String, values: Vec<(String, f64)>) -> Self {
        Self { variable, values }
    }

    /// Build from a normalized single-variable factor, e.g. the output of
    /// [`posterior`](crate::elimination::posterior).
    ///
    /// # Panics
    ///
    /// Panics if the factor's scope is not a single variable.
    pub fn from_factor(net: &Network, factor: &Factor) -> Self {
        assert_eq!(
            factor.scope().len(),
            1,
            "a distribution covers exactly one variable"
        );
        let var: VarId = factor.scope()[0];
        let variable = net.variable(var);
        let values = variable
            .domain()
            .iter()
            .zip(factor.table())
            .map(|(label, &p)| (label.clone(), p))
            .collect();
        Self::new(variable.name().to_string(), values)
    }

    /// Name of the variable the distribution is over
    #[inline]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// (label, probability) pairs in domain order
    #[inline]
    pub fn values(&self) -> &[(String, f64)] {
        &self.values
    }

    /// Probability of a specific domain label
    pub fn probability(&self, label: &str) -> Result<f64, InferenceError> {
        self.values
            .iter()
            .find(|(l, _)| l == label)
            .map(|&(_, p)| p)
            .ok_or_else(|| InferenceError::InvalidValue {
                variable: self.variable.clone(),
                value: label.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NetworkBuilder;

    #[test]
    fn test_from_factor_and_lookup() {
        let mut b = NetworkBuilder::new();
        let a = b.add_variable("Coin", ["heads", "tails"]).unwrap();
        b.add_cpt(a, &[], vec![0.4, 0.6]).unwrap();
        let net = b.build().unwrap();

        let d = Distribution::from_factor(&net, net.cpt(a));
        assert_eq!(d.variable(), "Coin");
        assert_eq!(d.values().len(), 2);
        assert!((d.probability("heads").unwrap() - 0.4).abs() < 1e-12);
        assert!((d.probability("tails").unwrap() - 0.6).abs() < 1e-12);
        assert!(d.probability("edge").is_err());
    }
}
