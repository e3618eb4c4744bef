//! Built-in training set: a three-input boolean function.
//!
//! The output is `1` exactly when two of the three inputs are set.

use neuroevo_network::{Network, NetworkShape};

pub const INPUTS: usize = 3;
pub const OUTPUTS: usize = 1;

pub const TRUTH_TABLE: [([f64; INPUTS], f64); 8] = [
    ([1.0, 1.0, 1.0], 0.0),
    ([1.0, 1.0, 0.0], 1.0),
    ([1.0, 0.0, 1.0], 1.0),
    ([1.0, 0.0, 0.0], 0.0),
    ([0.0, 1.0, 1.0], 1.0),
    ([0.0, 1.0, 0.0], 0.0),
    ([0.0, 0.0, 1.0], 0.0),
    ([0.0, 0.0, 0.0], 0.0),
];

#[must_use]
pub fn default_shape() -> NetworkShape {
    NetworkShape::new(INPUTS, vec![2], OUTPUTS)
}

/// Percentage of truth table rows the network answers correctly once its
/// output is rounded.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn accuracy(network: &Network) -> f64 {
    let correct = TRUTH_TABLE
        .iter()
        .filter(|(input, expected)| {
            network
                .compute(input)
                .first()
                .is_some_and(|output| output.round() == *expected)
        })
        .count();
    correct as f64 / TRUTH_TABLE.len() as f64 * 100.0
}

/// Each truth table row with its expected value and the network's first
/// output, `None` when the network produces no output.
pub fn evaluate(network: &Network) -> impl Iterator<Item = ([f64; INPUTS], f64, Option<f64>)> {
    TRUTH_TABLE.into_iter().map(move |(input, expected)| {
        let output = network.compute(&input).first().copied();
        (input, expected, output)
    })
}
