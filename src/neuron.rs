use crate::activator::Activation;
use crate::error::{check_len, Result};
use crate::utils::dot_product;

/// A single unit of a layer.
///
/// Computes the weighted sum of its inputs and passes it through an
/// activation function, remembering the sum for the backward pass.
#[derive(Clone, Debug)]
pub struct Neuron {
    weights: Vec<f64>,
    learning_rate: f64,
    activation: Activation,
    /// The weighted sum computed by the last call to `output`.
    output_cache: f64,
    /// The error term assigned during backpropagation.
    pub delta: f64,
}

impl Neuron {
    pub fn new(weights: Vec<f64>, learning_rate: f64, activation: Activation) -> Self {
        Neuron {
            weights,
            learning_rate,
            activation,
            output_cache: 0.0,
            delta: 0.0,
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Returns the weighted sum from the most recent forward pass.
    pub fn output_cache(&self) -> f64 {
        self.output_cache
    }

    /// Feeds `inputs` through the neuron, returning the activated output.
    pub fn output(&mut self, inputs: &[f64]) -> Result<f64> {
        self.output_cache = dot_product(inputs, &self.weights)?;
        Ok(self.activation.function(self.output_cache))
    }

    /// Evaluates the activation derivative at the cached weighted sum.
    pub fn derivative_at_cache(&self) -> f64 {
        self.activation.derivative(self.output_cache)
    }

    /// Nudges every weight by `learning_rate * input * delta`.
    pub fn update_weights(&mut self, inputs: &[f64]) -> Result<()> {
        check_len("neuron input", self.weights.len(), inputs.len())?;
        let step = self.learning_rate * self.delta;
        for (w, x) in self.weights.iter_mut().zip(inputs) {
            *w += step * x;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activator::Activator;

    fn identity() -> Activation {
        Activation::new(|x| x, |_| 1.0)
    }

    #[test]
    fn output_caches_the_weighted_sum() {
        let mut n = Neuron::new(vec![0.5, -1.0], 0.1, Activator::Sigmoid.into());
        let y = n.output(&[2.0, 1.0]).unwrap();
        assert_eq!(n.output_cache(), 0.0);
        assert_eq!(y, 0.5);
        assert_eq!(n.derivative_at_cache(), 0.25);
    }

    #[test]
    fn output_rejects_wrong_input_length() {
        let mut n = Neuron::new(vec![1.0, 1.0], 0.1, identity());
        assert!(n.output(&[1.0]).is_err());
    }

    #[test]
    fn update_weights_moves_along_delta() {
        let mut n = Neuron::new(vec![1.0, 2.0], 0.5, identity());
        n.delta = 2.0;
        n.update_weights(&[1.0, -1.0]).unwrap();
        assert_eq!(n.weights(), &[2.0, 1.0]);
    }
}
