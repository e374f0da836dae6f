/*!
# Veil - discrete Bayesian network inference

Exact and approximate probabilistic inference over discrete Bayesian
networks:

- **Variable elimination** with a min-fill elimination ordering (exact)
- **Likelihood-weighted sampling** with deterministic, seedable RNG
  (approximate)
- The **factor algebra** both depend on: multiply, restrict, sum-out,
  normalize over dense strided tables

## Modules

- [`model`] - variables, factors, and validated network construction
- [`ordering`] - the min-fill elimination orderer
- [`elimination`] - the variable elimination engine
- [`sampling`] - the likelihood-weighted sampler
- [`causal`] - mediator/confounder model builders and causal-effect
  comparison
- [`common`] - deterministic RNG

## Example

```rust
use veil::model::NetworkBuilder;
use veil::{elimination, sampling, Distribution, SimpleRng};

// A -> B -> C chain, all binary
let mut b = NetworkBuilder::new();
let a = b.add_variable("A", ["0", "1"]).unwrap();
let bb = b.add_variable("B", ["0", "1"]).unwrap();
let c = b.add_variable("C", ["0", "1"]).unwrap();
b.add_cpt(a, &[], vec![0.7, 0.3]).unwrap();
b.add_cpt(bb, &[a], vec![0.9, 0.2, 0.1, 0.8]).unwrap();
b.add_cpt(c, &[bb], vec![0.8, 0.1, 0.2, 0.9]).unwrap();
let net = b.build().unwrap();

// Exact posterior P(C | A = 1)
let exact = elimination::posterior(&net, c, &[(a, "1")]).unwrap();
let exact = Distribution::from_factor(&net, &exact);

// Approximate, 10k weighted samples with a fixed seed
let mut rng = SimpleRng::new(42);
let estimate = sampling::likelihood_weighting(&net, c, &[(a, "1")], 10_000, &mut rng).unwrap();

let diff = (exact.probability("1").unwrap() - estimate.probability("1").unwrap()).abs();
assert!(diff < 0.02);
```
*/

pub mod causal;
pub mod common;
pub mod distribution;
pub mod elimination;
pub mod errors;
pub mod model;
pub mod ordering;
pub mod sampling;

pub use common::{Rng, SimpleRng};
pub use distribution::Distribution;
pub use errors::{InferenceError, NetworkError};
pub use model::{Factor, Network, NetworkBuilder, VarId, Variable};
