//! Shared fixtures for integration tests
//!
//! Networks are small enough to verify against exhaustive enumeration of
//! the joint distribution, which `brute_force_posterior` implements
//! directly from the CPT product.

use veil::model::{Network, NetworkBuilder, VarId};

/// A -> B -> C chain, all binary, with P(C=1) = 0.417 in closed form.
pub fn chain_network() -> (Network, VarId, VarId, VarId) {
    let mut b = NetworkBuilder::new();
    let a = b.add_variable("A", ["0", "1"]).unwrap();
    let bb = b.add_variable("B", ["0", "1"]).unwrap();
    let c = b.add_variable("C", ["0", "1"]).unwrap();
    b.add_cpt(a, &[], vec![0.7, 0.3]).unwrap();
    // P(B=1|A=1)=0.8, P(B=1|A=0)=0.1
    b.add_cpt(bb, &[a], vec![0.9, 0.2, 0.1, 0.8]).unwrap();
    // P(C=1|B=1)=0.9, P(C=1|B=0)=0.2
    b.add_cpt(c, &[bb], vec![0.8, 0.1, 0.2, 0.9]).unwrap();
    (b.build().unwrap(), a, bb, c)
}

/// The five-variable sprinkler network: Cloudy -> {Sprinkler, Rain},
/// {Sprinkler, Rain} -> WetGrass -> Slippery. All binary with domain
/// ["no", "yes"].
pub struct Sprinkler {
    pub network: Network,
    pub cloudy: VarId,
    pub sprinkler: VarId,
    pub rain: VarId,
    pub wet_grass: VarId,
    pub slippery: VarId,
}

pub fn sprinkler_network() -> Sprinkler {
    let dom = ["no", "yes"];
    let mut b = NetworkBuilder::new();
    let cloudy = b.add_variable("Cloudy", dom).unwrap();
    let sprinkler = b.add_variable("Sprinkler", dom).unwrap();
    let rain = b.add_variable("Rain", dom).unwrap();
    let wet_grass = b.add_variable("WetGrass", dom).unwrap();
    let slippery = b.add_variable("Slippery", dom).unwrap();

    b.add_cpt(cloudy, &[], vec![0.5, 0.5]).unwrap();
    // P(Sprinkler=yes | Cloudy) = 0.5 / 0.1
    b.add_cpt(sprinkler, &[cloudy], vec![0.5, 0.9, 0.5, 0.1])
        .unwrap();
    // P(Rain=yes | Cloudy) = 0.2 / 0.8
    b.add_cpt(rain, &[cloudy], vec![0.8, 0.2, 0.2, 0.8]).unwrap();
    // P(WetGrass=yes | Sprinkler, Rain): no/no 0.0, no/yes 0.9,
    // yes/no 0.9, yes/yes 0.99; scope [WetGrass, Sprinkler, Rain]
    b.add_cpt(
        wet_grass,
        &[sprinkler, rain],
        vec![1.0, 0.1, 0.1, 0.01, 0.0, 0.9, 0.9, 0.99],
    )
    .unwrap();
    // P(Slippery=yes | WetGrass) = 0.05 / 0.7
    b.add_cpt(slippery, &[wet_grass], vec![0.95, 0.3, 0.05, 0.7])
        .unwrap();

    Sprinkler {
        network: b.build().unwrap(),
        cloudy,
        sprinkler,
        rain,
        wet_grass,
        slippery,
    }
}

/// Posterior over `query` by exhaustively enumerating the joint
/// distribution and conditioning on the evidence. Exponential in the
/// number of variables; only for fixtures small enough to enumerate.
pub fn brute_force_posterior(net: &Network, query: VarId, evidence: &[(VarId, &str)]) -> Vec<f64> {
    let n = net.num_variables();
    let cards: Vec<usize> = (0..n).map(|i| net.variable(VarId(i)).domain_size()).collect();
    let evidence_idx: Vec<(usize, usize)> = evidence
        .iter()
        .map(|&(v, label)| {
            (
                v.index(),
                net.variable(v).value_index(label).expect("fixture label"),
            )
        })
        .collect();

    let mut posterior = vec![0.0; net.variable(query).domain_size()];
    let mut assignment = vec![0usize; n];
    let total: usize = cards.iter().product();
    for _ in 0..total {
        if evidence_idx
            .iter()
            .all(|&(v, idx)| assignment[v] == idx)
        {
            let mut joint = 1.0;
            for i in 0..n {
                let cpt = net.cpt(VarId(i));
                let local: Vec<usize> = cpt
                    .scope()
                    .iter()
                    .map(|s| assignment[s.index()])
                    .collect();
                joint *= cpt.value(&local);
            }
            posterior[assignment[query.index()]] += joint;
        }
        // advance mixed-radix counter, last variable fastest
        for p in (0..n).rev() {
            assignment[p] += 1;
            if assignment[p] < cards[p] {
                break;
            }
            assignment[p] = 0;
        }
    }

    let mass: f64 = posterior.iter().sum();
    assert!(mass > 0.0, "evidence has zero mass under the fixture");
    posterior.iter().map(|p| p / mass).collect()
}

/// Tolerance comparison used across the integration tests.
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}
