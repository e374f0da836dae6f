//! Bayesian network construction and lookup
//!
//! A [`Network`] owns a variable arena and, for every variable, its parent
//! list and conditional probability table. The CPT's scope is exactly
//! `[child, parents...]`, matching the original table layout where the
//! child is the most significant index. All structural validation happens
//! in [`NetworkBuilder::build`]: malformed CPTs and cyclic parent graphs
//! are construction-time errors, never query-time surprises.

use log::debug;

use crate::errors::NetworkError;
use crate::model::factor::Factor;
use crate::model::variable::{VarId, Variable};

/// Incrementally assembles a [`Network`], validating on `build`.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    variables: Vec<Variable>,
    cpts: Vec<Option<(Vec<VarId>, Vec<f64>)>>,
}

impl NetworkBuilder {
    /// Start an empty network
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variable with an ordered domain of value labels.
    ///
    /// Fails on duplicate names, empty domains, or repeated labels.
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        domain: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<VarId, NetworkError> {
        let variable = Variable::new(name, domain);
        if self.variables.iter().any(|v| v.name() == variable.name()) {
            return Err(NetworkError::DuplicateVariable {
                name: variable.name().to_string(),
            });
        }
        if variable.domain_size() == 0 {
            return Err(NetworkError::EmptyDomain {
                name: variable.name().to_string(),
            });
        }
        for (i, value) in variable.domain().iter().enumerate() {
            if variable.domain()[..i].contains(value) {
                return Err(NetworkError::DuplicateDomainValue {
                    name: variable.name().to_string(),
                    value: value.clone(),
                });
            }
        }
        let id = VarId(self.variables.len());
        self.variables.push(variable);
        self.cpts.push(None);
        Ok(id)
    }

    /// Attach a CPT for `child` given `parents`.
    ///
    /// The table is dense over the scope `[child, parents...]` with the
    /// child most significant: for parents P1, P2 the entry for
    /// (child=i, P1=j, P2=k) sits at `(i * |P1| + j) * |P2| + k`. Entries
    /// must be non-negative; rows are not required to sum to 1 here (that
    /// is a property of how CPTs are populated, not of the factor type).
    pub fn add_cpt(
        &mut self,
        child: VarId,
        parents: &[VarId],
        table: Vec<f64>,
    ) -> Result<(), NetworkError> {
        self.check_id(child)?;
        for &p in parents {
            self.check_id(p)?;
        }
        let child_name = self.variables[child.index()].name().to_string();
        if parents.contains(&child) {
            return Err(NetworkError::ScopeMismatch {
                variable: child_name,
                detail: "variable listed as its own parent".to_string(),
            });
        }
        for (i, p) in parents.iter().enumerate() {
            if parents[i + 1..].contains(p) {
                return Err(NetworkError::ScopeMismatch {
                    variable: child_name,
                    detail: format!(
                        "parent {} listed twice",
                        self.variables[p.index()].name()
                    ),
                });
            }
        }
        let expected: usize = std::iter::once(child)
            .chain(parents.iter().copied())
            .map(|v| self.variables[v.index()].domain_size())
            .product();
        if table.len() != expected {
            return Err(NetworkError::TableSizeMismatch {
                variable: child_name,
                expected,
                actual: table.len(),
            });
        }
        if let Some(index) = table.iter().position(|&v| v < 0.0) {
            return Err(NetworkError::NegativeEntry {
                variable: child_name,
                index,
            });
        }
        self.cpts[child.index()] = Some((parents.to_vec(), table));
        Ok(())
    }

    /// Validate the assembled structure and produce a [`Network`].
    ///
    /// Fails if any variable lacks a CPT or the parent graph has a cycle.
    pub fn build(self) -> Result<Network, NetworkError> {
        let mut parents = Vec::with_capacity(self.variables.len());
        let mut cpts = Vec::with_capacity(self.variables.len());
        for (i, slot) in self.cpts.into_iter().enumerate() {
            let (pars, table) = slot.ok_or_else(|| NetworkError::ScopeMismatch {
                variable: self.variables[i].name().to_string(),
                detail: "no CPT registered".to_string(),
            })?;
            let scope: Vec<(VarId, usize)> = std::iter::once(VarId(i))
                .chain(pars.iter().copied())
                .map(|v| (v, self.variables[v.index()].domain_size()))
                .collect();
            cpts.push(Factor::new(&scope, table));
            parents.push(pars);
        }

        let topo = topological_order(&parents)?;
        debug!(
            "built network with {} variables, topological order {:?}",
            self.variables.len(),
            topo.iter()
                .map(|v| self.variables[v.index()].name())
                .collect::<Vec<_>>()
        );
        Ok(Network {
            variables: self.variables,
            parents,
            cpts,
            topo,
        })
    }

    fn check_id(&self, id: VarId) -> Result<(), NetworkError> {
        if id.index() < self.variables.len() {
            Ok(())
        } else {
            Err(NetworkError::UnknownVariable { id: id.index() })
        }
    }
}

/// Kahn's algorithm over the parent lists; parents come before children.
fn topological_order(parents: &[Vec<VarId>]) -> Result<Vec<VarId>, NetworkError> {
    let n = parents.len();
    let mut in_degree = vec![0usize; n];
    let mut children = vec![Vec::new(); n];
    for (child, pars) in parents.iter().enumerate() {
        in_degree[child] = pars.len();
        for p in pars {
            children[p.index()].push(child);
        }
    }
    // Seed with roots in id order so the result is deterministic
    let mut ready: Vec<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(n);
    while let Some(next) = ready.pop() {
        order.push(VarId(next));
        for &c in &children[next] {
            in_degree[c] -= 1;
            if in_degree[c] == 0 {
                ready.push(c);
            }
        }
    }
    if order.len() != n {
        return Err(NetworkError::CyclicGraph);
    }
    Ok(order)
}

/// A discrete Bayesian network: a DAG of variables, one CPT each.
///
/// The network owns its variables and factors for its lifetime; inference
/// borrows them and never mutates them.
#[derive(Debug, Clone)]
pub struct Network {
    variables: Vec<Variable>,
    parents: Vec<Vec<VarId>>,
    cpts: Vec<Factor>,
    topo: Vec<VarId>,
}

impl Network {
    /// The variable arena, indexable by [`VarId`]
    #[inline]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// A single variable
    #[inline]
    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id.index()]
    }

    /// Look a variable up by name
    pub fn var_by_name(&self, name: &str) -> Option<VarId> {
        self.variables
            .iter()
            .position(|v| v.name() == name)
            .map(VarId)
    }

    /// Number of variables
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Parents of a variable
    #[inline]
    pub fn parents(&self, id: VarId) -> &[VarId] {
        &self.parents[id.index()]
    }

    /// The CPT for a variable, scope `[child, parents...]`
    #[inline]
    pub fn cpt(&self, id: VarId) -> &Factor {
        &self.cpts[id.index()]
    }

    /// All CPTs, in variable-id order
    pub fn factors(&self) -> impl Iterator<Item = &Factor> {
        self.cpts.iter()
    }

    /// A topological order over the variables, parents before children
    #[inline]
    pub fn topological_order(&self) -> &[VarId] {
        &self.topo
    }
}
