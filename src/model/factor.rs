//! Dense factors and the factor algebra
//!
//! A [`Factor`] maps every assignment of values to an ordered scope of
//! variables to a non-negative real. CPTs are factors; so are the
//! intermediate products and marginals created during variable
//! elimination. The table is a flat `Vec<f64>` addressed through a
//! precomputed stride per scope position, with the first scope variable
//! most significant. Value labels never appear here: the algebra works on
//! domain indices, and label resolution (with its `InvalidValue` errors)
//! happens against the [`Variable`] arena.
//!
//! All operations are pure: they borrow their inputs and return new
//! factors, so a query never mutates the network's CPTs.

use smallvec::SmallVec;

use crate::errors::InferenceError;
use crate::model::variable::{VarId, Variable};

type ScopeVec = SmallVec<[VarId; 4]>;
type IdxVec = SmallVec<[usize; 4]>;

/// A function from assignments over an ordered variable scope to
/// non-negative reals, stored as a dense strided table.
#[derive(Debug, Clone)]
pub struct Factor {
    scope: ScopeVec,
    cards: IdxVec,
    strides: IdxVec,
    table: Vec<f64>,
}

impl Factor {
    /// Create a factor from a scope (each variable paired with its domain
    /// size) and a dense table in scope order, first variable most
    /// significant.
    ///
    /// # Panics
    ///
    /// Panics if the table length does not equal the product of the domain
    /// sizes, or the scope repeats a variable. The network builder
    /// validates CPT input and reports these as `NetworkError` before any
    /// factor is built; hitting the panic means a bug in algebra code.
    pub fn new(scope: &[(VarId, usize)], table: Vec<f64>) -> Self {
        let vars: ScopeVec = scope.iter().map(|&(v, _)| v).collect();
        let cards: IdxVec = scope.iter().map(|&(_, c)| c).collect();
        for (i, v) in vars.iter().enumerate() {
            assert!(
                !vars[i + 1..].contains(v),
                "factor scope repeats variable {:?}",
                v
            );
        }
        let expected: usize = cards.iter().product();
        assert_eq!(
            table.len(),
            expected,
            "factor table has {} entries, scope implies {}",
            table.len(),
            expected
        );
        let strides = compute_strides(&cards);
        Self {
            scope: vars,
            cards,
            strides,
            table,
        }
    }

    /// The multiplicative identity: empty scope, single entry 1.0.
    pub fn identity() -> Self {
        Self {
            scope: ScopeVec::new(),
            cards: IdxVec::new(),
            strides: IdxVec::new(),
            table: vec![1.0],
        }
    }

    /// The ordered scope
    #[inline]
    pub fn scope(&self) -> &[VarId] {
        &self.scope
    }

    /// Domain size of the variable at a scope position
    #[inline]
    pub fn cardinality(&self, position: usize) -> usize {
        self.cards[position]
    }

    /// The raw table, in scope order with the first variable most
    /// significant
    #[inline]
    pub fn table(&self) -> &[f64] {
        &self.table
    }

    /// Position of a variable in the scope, if present
    #[inline]
    pub fn position(&self, var: VarId) -> Option<usize> {
        self.scope.iter().position(|&v| v == var)
    }

    /// Whether the scope mentions `var`
    #[inline]
    pub fn mentions(&self, var: VarId) -> bool {
        self.position(var).is_some()
    }

    /// Value at a full assignment, one domain index per scope position.
    #[inline]
    pub fn value(&self, assignment: &[usize]) -> f64 {
        debug_assert_eq!(assignment.len(), self.scope.len());
        let mut idx = 0;
        for (pos, &i) in assignment.iter().enumerate() {
            debug_assert!(i < self.cards[pos]);
            idx += i * self.strides[pos];
        }
        self.table[idx]
    }

    /// Fix one scope variable to a value, dropping it from the scope.
    ///
    /// Acts as the identity (returns a clone) when `var` is not in scope,
    /// so evidence can be applied uniformly across a factor pool. Fails
    /// with [`InferenceError::InvalidValue`] when the label is not in the
    /// variable's domain.
    pub fn restrict(
        &self,
        vars: &[Variable],
        var: VarId,
        value: &str,
    ) -> Result<Factor, InferenceError> {
        let variable = &vars[var.index()];
        let value_idx =
            variable
                .value_index(value)
                .ok_or_else(|| InferenceError::InvalidValue {
                    variable: variable.name().to_string(),
                    value: value.to_string(),
                })?;
        let Some(pos) = self.position(var) else {
            return Ok(self.clone());
        };

        let out_scope: Vec<(VarId, usize)> = self
            .scope
            .iter()
            .zip(&self.cards)
            .enumerate()
            .filter(|&(p, _)| p != pos)
            .map(|(_, (&v, &c))| (v, c))
            .collect();
        let out_len: usize = out_scope.iter().map(|&(_, c)| c).product();

        let mut table = Vec::with_capacity(out_len);
        let out_cards: IdxVec = out_scope.iter().map(|&(_, c)| c).collect();
        let mut assignment: IdxVec = smallvec::smallvec![0; out_cards.len()];
        for _ in 0..out_len {
            let mut idx = value_idx * self.strides[pos];
            let mut k = 0;
            for (p, stride) in self.strides.iter().enumerate() {
                if p != pos {
                    idx += assignment[k] * stride;
                    k += 1;
                }
            }
            table.push(self.table[idx]);
            advance(&mut assignment, &out_cards);
        }
        Ok(Factor::new(&out_scope, table))
    }

    /// Multiply a sequence of factors into one.
    ///
    /// The result's scope is the first-seen union of the input scopes;
    /// each entry is the product of every input's entry at the projected
    /// assignment. Zero inputs give [`Factor::identity`]; disjoint scopes
    /// give the outer product.
    pub fn multiply(factors: &[&Factor]) -> Factor {
        if factors.is_empty() {
            return Factor::identity();
        }

        // Union scope in first-seen order
        let mut scope: Vec<(VarId, usize)> = Vec::new();
        for f in factors {
            for (pos, &v) in f.scope.iter().enumerate() {
                if !scope.iter().any(|&(u, _)| u == v) {
                    scope.push((v, f.cards[pos]));
                }
            }
        }

        // For each factor, where each of its scope variables sits in the union
        let projections: Vec<IdxVec> = factors
            .iter()
            .map(|f| {
                f.scope
                    .iter()
                    .map(|&v| scope.iter().position(|&(u, _)| u == v).unwrap())
                    .collect()
            })
            .collect();

        let cards: IdxVec = scope.iter().map(|&(_, c)| c).collect();
        let len: usize = cards.iter().product();
        let mut table = Vec::with_capacity(len);
        let mut assignment: IdxVec = smallvec::smallvec![0; cards.len()];
        let mut local: IdxVec = IdxVec::new();
        for _ in 0..len {
            let mut product = 1.0;
            for (f, proj) in factors.iter().zip(&projections) {
                local.clear();
                local.extend(proj.iter().map(|&p| assignment[p]));
                product *= f.value(&local);
            }
            table.push(product);
            advance(&mut assignment, &cards);
        }
        Factor::new(&scope, table)
    }

    /// Sum a variable out of the factor, removing it from the scope.
    ///
    /// Fails with [`InferenceError::VariableNotInScope`] when `var` is
    /// absent. The elimination engine only calls this on variables it has
    /// proven to be in scope, so the error indicates misuse rather than a
    /// modeling problem.
    pub fn sum_out(&self, vars: &[Variable], var: VarId) -> Result<Factor, InferenceError> {
        let pos = self
            .position(var)
            .ok_or_else(|| InferenceError::VariableNotInScope {
                variable: vars[var.index()].name().to_string(),
            })?;

        let out_scope: Vec<(VarId, usize)> = self
            .scope
            .iter()
            .zip(&self.cards)
            .enumerate()
            .filter(|&(p, _)| p != pos)
            .map(|(_, (&v, &c))| (v, c))
            .collect();
        let out_cards: IdxVec = out_scope.iter().map(|&(_, c)| c).collect();
        let out_len: usize = out_cards.iter().product();

        let mut table = Vec::with_capacity(out_len);
        let mut assignment: IdxVec = smallvec::smallvec![0; out_cards.len()];
        for _ in 0..out_len {
            let mut base = 0;
            let mut k = 0;
            for (p, stride) in self.strides.iter().enumerate() {
                if p != pos {
                    base += assignment[k] * stride;
                    k += 1;
                }
            }
            let stride = self.strides[pos];
            let total: f64 = (0..self.cards[pos])
                .map(|i| self.table[base + i * stride])
                .sum();
            table.push(total);
            advance(&mut assignment, &out_cards);
        }
        Ok(Factor::new(&out_scope, table))
    }

    /// Normalize a single-variable factor into a probability distribution.
    ///
    /// Fails with [`InferenceError::ZeroMass`] when the entries sum to
    /// zero: the evidence that produced this factor has zero probability
    /// under the model, which is a modeling inconsistency the caller must
    /// see rather than a NaN to paper over.
    ///
    /// # Panics
    ///
    /// Panics if the scope does not have exactly one variable; the engine
    /// only normalizes the final posterior.
    pub fn normalize(&self) -> Result<Factor, InferenceError> {
        assert_eq!(
            self.scope.len(),
            1,
            "normalize requires a single-variable factor, scope has {} variables",
            self.scope.len()
        );
        let total: f64 = self.table.iter().sum();
        if total == 0.0 {
            return Err(InferenceError::ZeroMass {
                context: "posterior normalization".to_string(),
            });
        }
        let table = self.table.iter().map(|v| v / total).collect();
        Ok(Factor::new(&[(self.scope[0], self.cards[0])], table))
    }
}

/// Row-major strides: first scope variable most significant.
fn compute_strides(cards: &[usize]) -> IdxVec {
    let mut strides: IdxVec = smallvec::smallvec![1; cards.len()];
    for p in (0..cards.len().saturating_sub(1)).rev() {
        strides[p] = strides[p + 1] * cards[p + 1];
    }
    strides
}

/// Advance a mixed-radix assignment by one, last position fastest.
fn advance(assignment: &mut [usize], cards: &[usize]) {
    for p in (0..assignment.len()).rev() {
        assignment[p] += 1;
        if assignment[p] < cards[p] {
            return;
        }
        assignment[p] = 0;
    }
}
