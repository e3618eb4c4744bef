//! Feed-forward neural networks evolved by `neuroevo-engine`.
//!
//! The evolution engine never interprets weights. It only needs three things
//! from a network implementation, captured by the [`NeuralNetwork`] trait:
//!
//! - create a randomly initialized network from a [`NetworkShape`]
//! - snapshot a network into a plain [`NetworkData`] record
//! - instantiate a runnable network from such a record
//!
//! [`Network`] is the reference implementation: a fully connected perceptron
//! without bias terms, using the logistic sigmoid as activation.

pub use self::network::{Network, NetworkData, NetworkShape, NeuralNetwork};

mod network;
pub mod weights;
