use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::weights;

/// Layer structure of a feed-forward network: `[inputs, [hidden...], outputs]`.
///
/// Serialized as a heterogeneous array so that `[3, [2], 1]` describes a network
/// with three inputs, one hidden layer of two neurons and a single output.
///
/// # Example
///
/// ```
/// use neuroevo_network::NetworkShape;
///
/// let shape = NetworkShape::new(3, vec![2], 1);
/// assert_eq!(shape.layer_sizes(), vec![3, 2, 1]);
/// assert_eq!(shape.weight_count(), 3 * 2 + 2 * 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "(usize, Vec<usize>, usize)",
    into = "(usize, Vec<usize>, usize)"
)]
pub struct NetworkShape {
    pub inputs: usize,
    pub hidden: Vec<usize>,
    pub outputs: usize,
}

impl NetworkShape {
    #[must_use]
    pub fn new(inputs: usize, hidden: Vec<usize>, outputs: usize) -> Self {
        Self {
            inputs,
            hidden,
            outputs,
        }
    }

    /// Returns the flattened topology, input layer first.
    #[must_use]
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden.len() + 2);
        sizes.push(self.inputs);
        sizes.extend_from_slice(&self.hidden);
        sizes.push(self.outputs);
        sizes
    }

    /// Number of connection weights in a fully connected network of this shape.
    #[must_use]
    pub fn weight_count(&self) -> usize {
        weight_count(&self.layer_sizes())
    }
}

impl Default for NetworkShape {
    fn default() -> Self {
        Self::new(1, vec![2], 1)
    }
}

impl From<(usize, Vec<usize>, usize)> for NetworkShape {
    fn from((inputs, hidden, outputs): (usize, Vec<usize>, usize)) -> Self {
        Self::new(inputs, hidden, outputs)
    }
}

impl From<NetworkShape> for (usize, Vec<usize>, usize) {
    fn from(shape: NetworkShape) -> Self {
        (shape.inputs, shape.hidden, shape.outputs)
    }
}

fn weight_count(topology: &[usize]) -> usize {
    topology.windows(2).map(|pair| pair[0] * pair[1]).sum()
}

/// Plain snapshot of a network: its flattened topology and its weights.
///
/// Weights are ordered layer by layer, and within a layer neuron by neuron, each
/// neuron contributing one weight per neuron of the previous layer. Missing
/// fields deserialize as empty sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkData {
    #[serde(default, alias = "neurons")]
    pub topology: Vec<usize>,
    #[serde(default)]
    pub weights: Vec<f64>,
}

impl NetworkData {
    #[must_use]
    pub fn new(topology: Vec<usize>, weights: Vec<f64>) -> Self {
        Self { topology, weights }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Layer {
    size: usize,
    // `size * previous_size` weights, grouped by neuron
    weights: Vec<f64>,
}

/// Fully connected feed-forward perceptron with sigmoid activation.
///
/// The first layer is the input layer and carries no weights.
///
/// # Example
///
/// ```
/// use neuroevo_network::{Network, NetworkShape};
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
///
/// let mut rng = Pcg32::seed_from_u64(42);
/// let network = Network::random(&NetworkShape::new(3, vec![2], 1), &mut rng);
/// let output = network.compute(&[1.0, 0.0, 1.0]);
/// assert_eq!(output.len(), 1);
/// assert!((0.0..=1.0).contains(&output[0]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layers: Vec<Layer>,
}

impl Network {
    /// Creates a network of the given shape with weights drawn from `[-1.0, 1.0]`.
    pub fn random<R>(shape: &NetworkShape, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let sizes = shape.layer_sizes();
        let mut layers = Vec::with_capacity(sizes.len());
        let mut previous = 0;
        for size in sizes {
            layers.push(Layer {
                size,
                weights: weights::random(rng, size * previous),
            });
            previous = size;
        }
        Self { layers }
    }

    /// Builds a network from a snapshot.
    ///
    /// Missing weights are read as `0.0` and surplus weights are ignored, so any
    /// snapshot produces a runnable network.
    #[must_use]
    pub fn from_data(data: &NetworkData) -> Self {
        let mut source = data.weights.iter().copied();
        let mut layers = Vec::with_capacity(data.topology.len());
        let mut previous = 0;
        for &size in &data.topology {
            let weights = weights::from_fn(|_| source.next().unwrap_or(0.0), size * previous);
            layers.push(Layer { size, weights });
            previous = size;
        }
        Self { layers }
    }

    /// Returns a deep copy of the topology and weights.
    #[must_use]
    pub fn to_data(&self) -> NetworkData {
        NetworkData {
            topology: self.layers.iter().map(|layer| layer.size).collect(),
            weights: self
                .layers
                .iter()
                .flat_map(|layer| layer.weights.iter().copied())
                .collect(),
        }
    }

    #[must_use]
    pub fn weight_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.weights.len()).sum()
    }

    /// Runs a forward pass.
    ///
    /// Missing inputs are read as `0.0` and surplus inputs are ignored. A network
    /// without layers produces an empty output.
    #[must_use]
    pub fn compute(&self, inputs: &[f64]) -> Vec<f64> {
        let Some((input_layer, rest)) = self.layers.split_first() else {
            return vec![];
        };
        let mut values = weights::from_fn(
            |i| inputs.get(i).copied().unwrap_or(0.0),
            input_layer.size,
        );
        for layer in rest {
            let previous = values.len();
            values = (0..layer.size)
                .map(|neuron| {
                    let incoming = &layer.weights[neuron * previous..(neuron + 1) * previous];
                    let sum = incoming
                        .iter()
                        .zip(&values)
                        .map(|(w, v)| w * v)
                        .sum::<f64>();
                    activation(sum)
                })
                .collect();
        }
        values
    }
}

fn activation(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Operations the evolution engine needs from a network implementation.
pub trait NeuralNetwork: Sized {
    /// Creates a randomly initialized network of the given shape.
    fn random<R>(shape: &NetworkShape, rng: &mut R) -> Self
    where
        R: Rng + ?Sized;

    /// Snapshots the current topology and weights.
    fn to_data(&self) -> NetworkData;

    /// Instantiates a runnable network from a snapshot.
    fn from_data(data: &NetworkData) -> Self;
}

impl NeuralNetwork for Network {
    fn random<R>(shape: &NetworkShape, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Network::random(shape, rng)
    }

    fn to_data(&self) -> NetworkData {
        Network::to_data(self)
    }

    fn from_data(data: &NetworkData) -> Self {
        Network::from_data(data)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_random_network_snapshot_matches_shape() {
        let mut rng = Pcg32::seed_from_u64(1);
        let shape = NetworkShape::new(3, vec![2], 1);
        let data = Network::random(&shape, &mut rng).to_data();
        assert_eq!(data.topology, vec![3, 2, 1]);
        assert_eq!(data.weights.len(), 8);
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_weights() {
        let mut rng = Pcg32::seed_from_u64(2);
        let shape = NetworkShape::new(2, vec![4, 3], 2);
        let network = Network::random(&shape, &mut rng);
        let restored = Network::from_data(&network.to_data());
        assert_eq!(network, restored);
        assert_eq!(restored.weight_count(), shape.weight_count());
    }

    #[test]
    fn test_zero_weights_output_half() {
        let data = NetworkData::new(vec![2, 1], vec![0.0, 0.0]);
        let output = Network::from_data(&data).compute(&[1.0, 1.0]);
        assert_eq!(output, vec![0.5]);
    }

    #[test]
    fn test_compute_weighted_sum() {
        // 1 * 2.0 + 1 * -2.0 == 0 → sigmoid(0) == 0.5
        let data = NetworkData::new(vec![2, 1], vec![2.0, -2.0]);
        assert_eq!(Network::from_data(&data).compute(&[1.0, 1.0]), vec![0.5]);
        let high = Network::from_data(&NetworkData::new(vec![1, 1], vec![10.0])).compute(&[1.0]);
        assert!(high[0] > 0.99);
    }

    #[test]
    fn test_partial_data_is_tolerated() {
        let data = NetworkData::new(vec![3, 2, 1], vec![1.0]);
        let network = Network::from_data(&data);
        assert_eq!(network.weight_count(), 8);
        let snapshot = network.to_data();
        assert_eq!(snapshot.weights[0], 1.0);
        assert!(snapshot.weights[1..].iter().all(|w| *w == 0.0));

        let empty = Network::from_data(&NetworkData::default());
        assert!(empty.compute(&[1.0]).is_empty());
    }

    #[test]
    fn test_shape_serializes_as_nested_array() {
        let shape = NetworkShape::new(3, vec![2], 1);
        let json = serde_json::to_string(&shape).unwrap();
        assert_eq!(json, "[3,[2],1]");
        let parsed: NetworkShape = serde_json::from_str("[4,[5,6],2]").unwrap();
        assert_eq!(parsed, NetworkShape::new(4, vec![5, 6], 2));
    }

    #[test]
    fn test_network_data_defaults_missing_fields() {
        let data: NetworkData = serde_json::from_str("{}").unwrap();
        assert_eq!(data, NetworkData::default());
        let data: NetworkData = serde_json::from_str(r#"{"neurons":[1,1],"weights":[0.5]}"#).unwrap();
        assert_eq!(data.topology, vec![1, 1]);
        assert_eq!(data.weights, vec![0.5]);
    }
}
