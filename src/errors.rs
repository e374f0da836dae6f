//! Error types
//!
//! Two enums split by phase: [`NetworkError`] covers structural problems
//! caught while assembling a network (all of them fail fast in the
//! builder, before any inference can run), and [`InferenceError`] covers
//! problems with a particular query against a well-formed network.

use std::fmt;

/// Structural errors raised during network construction.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// A variable name was registered twice
    DuplicateVariable { name: String },
    /// A variable was declared with an empty domain
    EmptyDomain { name: String },
    /// A domain repeats a value label
    DuplicateDomainValue { name: String, value: String },
    /// A CPT's scope is malformed (self-parent, repeated parent, missing CPT)
    ScopeMismatch { variable: String, detail: String },
    /// A CPT table's length does not match its scope's domain sizes
    TableSizeMismatch {
        variable: String,
        expected: usize,
        actual: usize,
    },
    /// A CPT table contains a negative entry
    NegativeEntry { variable: String, index: usize },
    /// The parent graph contains a cycle
    CyclicGraph,
    /// A variable id does not belong to this builder
    UnknownVariable { id: usize },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateVariable { name } => {
                write!(f, "variable '{}' is already defined", name)
            }
            Self::EmptyDomain { name } => {
                write!(f, "variable '{}' has an empty domain", name)
            }
            Self::DuplicateDomainValue { name, value } => {
                write!(f, "variable '{}' repeats domain value '{}'", name, value)
            }
            Self::ScopeMismatch { variable, detail } => {
                write!(f, "bad CPT scope for '{}': {}", variable, detail)
            }
            Self::TableSizeMismatch {
                variable,
                expected,
                actual,
            } => write!(
                f,
                "CPT for '{}' has {} entries, scope implies {}",
                variable, actual, expected
            ),
            Self::NegativeEntry { variable, index } => {
                write!(f, "CPT for '{}' has a negative entry at index {}", variable, index)
            }
            Self::CyclicGraph => write!(f, "the parent graph contains a cycle"),
            Self::UnknownVariable { id } => {
                write!(f, "variable id {} is not registered in this network", id)
            }
        }
    }
}

impl std::error::Error for NetworkError {}

/// Query-time errors raised by the inference engines.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// A value label is not in its variable's domain
    InvalidValue { variable: String, value: String },
    /// The query variable also appears in the evidence
    InvalidQuery { variable: String },
    /// An operation named a variable outside the factor's scope
    VariableNotInScope { variable: String },
    /// A distribution could not be normalized: total mass is zero, meaning
    /// the evidence is impossible under the model
    ZeroMass { context: String },
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { variable, value } => {
                write!(f, "'{}' is not in the domain of variable '{}'", value, variable)
            }
            Self::InvalidQuery { variable } => {
                write!(f, "query variable '{}' is already observed as evidence", variable)
            }
            Self::VariableNotInScope { variable } => {
                write!(f, "variable '{}' is not in the factor's scope", variable)
            }
            Self::ZeroMass { context } => {
                write!(f, "zero probability mass in {}", context)
            }
        }
    }
}

impl std::error::Error for InferenceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_display() {
        let err = NetworkError::TableSizeMismatch {
            variable: "Rain".to_string(),
            expected: 8,
            actual: 6,
        };
        assert_eq!(err.to_string(), "CPT for 'Rain' has 6 entries, scope implies 8");
        assert_eq!(NetworkError::CyclicGraph.to_string(), "the parent graph contains a cycle");
    }

    #[test]
    fn test_inference_error_display() {
        let err = InferenceError::InvalidValue {
            variable: "Rain".to_string(),
            value: "maybe".to_string(),
        };
        assert_eq!(err.to_string(), "'maybe' is not in the domain of variable 'Rain'");
        let err = InferenceError::ZeroMass {
            context: "posterior normalization".to_string(),
        };
        assert_eq!(err.to_string(), "zero probability mass in posterior normalization");
    }
}
