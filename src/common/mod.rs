//! Low-level utilities shared across the crate

pub mod rng;

pub use rng::{Rng, SimpleRng};
