//! Discrete random variables
//!
//! A variable is a name plus an ordered domain of value labels. Domain
//! order is significant: factor tables are indexed by position in the
//! domain, so two variables with the same labels in different orders are
//! different variables. Variables carry no assignment state; assignments
//! during restriction and sampling are call-scoped and live with the
//! operation that needs them, so independent queries cannot observe each
//! other's transients.

/// Index of a variable in its network's arena.
///
/// Implements `Ord` for stable, deterministic iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub usize);

impl VarId {
    /// The arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A named discrete random variable with an ordered domain.
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    domain: Vec<String>,
}

impl Variable {
    /// Create a variable. Domain validity (non-empty, distinct labels) is
    /// checked by the network builder, which is the only way a `Variable`
    /// enters a [`Network`](crate::model::Network).
    pub fn new(name: impl Into<String>, domain: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into_iter().map(Into::into).collect(),
        }
    }

    /// The variable's name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered domain of value labels
    #[inline]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Number of values in the domain
    #[inline]
    pub fn domain_size(&self) -> usize {
        self.domain.len()
    }

    /// Position of a value label in the domain, if present.
    ///
    /// Domains are small (rarely more than a handful of labels), so a
    /// linear scan beats a lookup table here.
    pub fn value_index(&self, value: &str) -> Option<usize> {
        self.domain.iter().position(|v| v == value)
    }
}
