//! Network shape and hyperparameters.

use crate::activator::Activator;
use serde::{Deserialize, Serialize};

/// Describes the network to build.
///
/// Usually read from a [RON](https://github.com/ron-rs/ron) file:
///
/// ```
/// # use neurons::topology::Topology;
/// let topology: Topology = ron::from_str("(layers: [2, 3, 1], learning_rate: 0.3)").unwrap();
/// assert_eq!(topology.layers, [2, 3, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    /// The number of neurons in each layer, input layer first.
    pub layers: Vec<usize>,
    /// The gradient descent step size shared by every neuron.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// The activation function shared by every neuron.
    #[serde(default)]
    pub activator: Activator,
}

fn default_learning_rate() -> f64 {
    0.1
}

impl Topology {
    /// Creates a topology with the given layer sizes and default
    /// hyperparameters: a sigmoid activation and a learning rate of 0.1.
    pub fn new(layers: &[usize]) -> Self {
        Topology {
            layers: layers.into(),
            learning_rate: default_learning_rate(),
            activator: Activator::default(),
        }
    }

    /// Sets the activation function.
    pub fn activator(mut self, activator: Activator) -> Self {
        self.activator = activator;
        self
    }

    /// Sets the learning rate.
    pub fn learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }
}
