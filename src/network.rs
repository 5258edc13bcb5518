//! A [Feedforward neural network]
//! (https://en.wikipedia.org/wiki/Feedforward_neural_network).
//!
//! # Example
//!
//! Let's train a simple neural network to compute the XOR function:
//!
//! ```
//! # use neurons::network::Network;
//! # use neurons::topology::Topology;
//! # use rand::{rngs::StdRng, SeedableRng};
//! let inputs = [vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
//! let expecteds = [vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
//!
//! let topology = Topology::new(&[2, 4, 1]).learning_rate(0.5);
//! let mut network = Network::with_rng(&topology, &mut StdRng::seed_from_u64(7)).unwrap();
//! for _ in 0..100 {
//!     network.train(&inputs, &expecteds).unwrap();
//! }
//!
//! let output = network.outputs(&[1.0, 0.0]).unwrap();
//! assert_eq!(output.len(), 1);
//! ```

use crate::activator::Activation;
use crate::error::{check_len, Error, Result};
use crate::layer::Layer;
use crate::topology::Topology;
use crate::utils::{mean_square_error, Back, Front};

use rand::Rng;
use tracing::{debug, instrument};

/// A Feedforward neural network
#[derive(Clone, Debug)]
pub struct Network {
    layers: Vec<Layer>,
}

/// The outcome of [`Network::validate`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Validation {
    pub correct: usize,
    pub total: usize,
    pub percentage: f64,
}

impl Network {
    /// Creates a new, untrained neural network.
    ///
    /// The topology must contain at least 3 layers - one input layer, one
    /// hidden layer, and one output layer - none of them empty.
    pub fn new(topology: &Topology) -> Result<Self> {
        Self::with_rng(topology, &mut rand::thread_rng())
    }

    /// Like [`Network::new`], drawing initial weights from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(topology: &Topology, rng: &mut R) -> Result<Self> {
        let sizes = &topology.layers;
        if sizes.len() < 3 {
            return Err(Error::TooFewLayers(sizes.len()));
        }
        if let Some(i) = sizes.iter().position(|&n| n == 0) {
            return Err(Error::EmptyLayer(i));
        }

        let activation = Activation::from(topology.activator);
        let mut layers: Vec<Layer> = Vec::with_capacity(sizes.len());
        for &size in sizes {
            let layer = Layer::with_rng(
                layers.last(),
                size,
                topology.learning_rate,
                activation.clone(),
                rng,
            );
            layers.push(layer);
        }

        debug!(?sizes, "constructed network");
        Ok(Network { layers })
    }

    /// Assembles a network from prebuilt layers.
    ///
    /// The first layer must be an input layer and every following layer must
    /// be sized for its predecessor.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Self> {
        if layers.len() < 3 {
            return Err(Error::TooFewLayers(layers.len()));
        }
        if let Some(i) = layers.iter().position(Layer::is_empty) {
            return Err(Error::EmptyLayer(i));
        }
        if let Some(len) = layers.front().previous_len() {
            return Err(Error::LengthMismatch {
                what: "input layer predecessor",
                expected: 0,
                actual: len,
            });
        }
        for pair in layers.windows(2) {
            check_len(
                "previous layer",
                pair[0].len(),
                pair[1].previous_len().unwrap_or(0),
            )?;
        }
        Ok(Network { layers })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the size of the input layer to the network.
    pub fn input_len(&self) -> usize {
        self.layers.front().len()
    }

    /// Returns the size of the output layer from the network.
    pub fn output_len(&self) -> usize {
        self.layers.back().len()
    }

    /// Feeds the provided `input` through the network, returning the output
    /// layer.
    pub fn outputs(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        check_len("network input", self.input_len(), input.len())?;
        self.layers[0].outputs(input)?;
        for i in 0..self.layers.len() - 1 {
            let (previous, layer) = adjacent_layers(&mut self.layers, i);
            layer.outputs(previous.output_cache())?;
        }
        Ok(self.layers.back().output_cache().to_vec())
    }

    /// Computes every neuron's delta, from the output layer back towards the
    /// input layer. Must follow a forward pass.
    pub fn backpropagate(&mut self, expected: &[f64]) -> Result<()> {
        self.layers
            .mut_back()
            .calculate_deltas_for_output_layer(expected)?;
        for i in (1..self.layers.len() - 1).rev() {
            let (layer, next) = adjacent_layers(&mut self.layers, i);
            layer.calculate_deltas_for_hidden_layer(next)?;
        }
        Ok(())
    }

    /// Applies the deltas computed by `backpropagate` to every weight.
    pub fn update_weights(&mut self) -> Result<()> {
        for i in 0..self.layers.len() - 1 {
            let (previous, layer) = adjacent_layers(&mut self.layers, i);
            layer.update_weights(previous)?;
        }
        Ok(())
    }

    /// Runs one epoch of stochastic gradient descent over the provided
    /// examples, returning the training error.
    ///
    /// `inputs[i]` is fed forward and `expecteds[i]` backpropagated, with the
    /// weights updated after every example.
    #[instrument(level = "trace", skip_all, err)]
    pub fn train<I, O>(&mut self, inputs: &[I], expecteds: &[O]) -> Result<f64>
    where
        I: AsRef<[f64]>,
        O: AsRef<[f64]>,
    {
        if inputs.is_empty() {
            return Err(Error::NoExamples);
        }
        check_len("expected outputs", inputs.len(), expecteds.len())?;

        let mut training_error = 0.0;
        for (input, expected) in inputs.iter().zip(expecteds) {
            let outputs = self.outputs(input.as_ref())?;
            self.backpropagate(expected.as_ref())?;
            self.update_weights()?;
            training_error += mean_square_error(&outputs, expected.as_ref())?;
        }
        Ok(training_error / (2.0 * inputs.len() as f64))
    }

    /// Counts how many `inputs` produce the matching entry of `expecteds`,
    /// after mapping the network's outputs through `interpret`.
    #[instrument(level = "trace", skip_all, err)]
    pub fn validate<I, T, F>(
        &mut self,
        inputs: &[I],
        expecteds: &[T],
        mut interpret: F,
    ) -> Result<Validation>
    where
        I: AsRef<[f64]>,
        T: PartialEq,
        F: FnMut(&[f64]) -> T,
    {
        check_len("expected labels", inputs.len(), expecteds.len())?;

        let mut correct = 0;
        for (input, expected) in inputs.iter().zip(expecteds) {
            let outputs = self.outputs(input.as_ref())?;
            if interpret(&outputs) == *expected {
                correct += 1;
            }
        }

        let total = inputs.len();
        let percentage = if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64
        };
        Ok(Validation {
            correct,
            total,
            percentage,
        })
    }
}

/// Splits out the layer at `i` and its successor.
fn adjacent_layers(layers: &mut [Layer], i: usize) -> (&mut Layer, &mut Layer) {
    let (before, after) = layers[i..].split_at_mut(1);
    (&mut before[0], &mut after[0])
}
