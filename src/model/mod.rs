//! Data model: variables, factors, and the network itself
//!
//! - [`Variable`] - named discrete random variable with an ordered domain
//! - [`Factor`] - dense table over an ordered scope of variables, plus the
//!   factor algebra (restrict, multiply, sum-out, normalize)
//! - [`Network`] - a DAG of variables with one CPT each, built through
//!   [`NetworkBuilder`] with fail-fast validation

pub mod factor;
pub mod network;
pub mod variable;

pub use factor::Factor;
pub use network::{Network, NetworkBuilder};
pub use variable::{VarId, Variable};
