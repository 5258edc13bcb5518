use crate::activator::Activation;
use crate::error::{check_len, Result};
use crate::neuron::Neuron;
use crate::utils::dot_product;

use itertools::multizip;
use rand::Rng;
use tracing::debug;

/// A single layer of the neural network.
///
/// Rather than holding a reference to the layer that feeds it, a layer only
/// remembers that layer's size; operations that need a neighbour take it as
/// an argument. The input layer has no predecessor and its neurons carry no
/// weights.
#[derive(Clone, Debug)]
pub struct Layer {
    /// The number of neurons in the preceding layer, if any.
    previous_len: Option<usize>,
    neurons: Vec<Neuron>,
    /// The outputs from the most recent forward pass.
    output_cache: Vec<f64>,
}

impl Layer {
    /// Initializes a new, untrained layer with weights drawn uniformly from
    /// `[0, 1)`.
    ///
    /// Arguments:
    ///
    ///  * `previous` - the layer feeding this one, or `None` for the input
    ///                 layer.
    ///  * `neuron_count` - the number of neurons in this layer.
    ///  * `learning_rate` - the step size each neuron uses to update itself.
    ///  * `activation` - the activation function and its derivative.
    pub fn new(
        previous: Option<&Layer>,
        neuron_count: usize,
        learning_rate: f64,
        activation: Activation,
    ) -> Self {
        Self::with_rng(
            previous,
            neuron_count,
            learning_rate,
            activation,
            &mut rand::thread_rng(),
        )
    }

    /// Like [`Layer::new`], drawing initial weights from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        previous: Option<&Layer>,
        neuron_count: usize,
        learning_rate: f64,
        activation: Activation,
        rng: &mut R,
    ) -> Self {
        let previous_len = previous.map(Layer::len);
        let neurons = (0..neuron_count)
            .map(|_| {
                let weights = (0..previous_len.unwrap_or(0))
                    .map(|_| rng.gen::<f64>())
                    .collect();
                Neuron::new(weights, learning_rate, activation.clone())
            })
            .collect();

        debug!(neuron_count, ?previous_len, "constructed layer");
        Layer {
            previous_len,
            neurons,
            output_cache: vec![0.0; neuron_count],
        }
    }

    /// Builds a layer from existing neurons.
    ///
    /// Every neuron must carry exactly `previous_len` weights, or none at all
    /// if this is the input layer.
    pub fn from_neurons(previous_len: Option<usize>, neurons: Vec<Neuron>) -> Result<Self> {
        for neuron in &neurons {
            check_len(
                "neuron weights",
                previous_len.unwrap_or(0),
                neuron.weights().len(),
            )?;
        }
        Ok(Layer {
            previous_len,
            output_cache: vec![0.0; neurons.len()],
            neurons,
        })
    }

    /// Returns the number of neurons in this layer.
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    /// Returns true if this layer has no predecessor.
    pub fn is_input(&self) -> bool {
        self.previous_len.is_none()
    }

    /// Returns the number of neurons in the preceding layer, if any.
    pub fn previous_len(&self) -> Option<usize> {
        self.previous_len
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn output_cache(&self) -> &[f64] {
        &self.output_cache
    }

    /// Feeds `inputs` forward through the layer.
    ///
    /// The input layer passes `inputs` through unchanged. Every other layer
    /// replaces its cache with the output of each neuron, in order.
    pub fn outputs(&mut self, inputs: &[f64]) -> Result<&[f64]> {
        match self.previous_len {
            None => {
                self.output_cache.clear();
                self.output_cache.extend_from_slice(inputs);
            }
            Some(len) => {
                check_len("layer input", len, inputs.len())?;
                self.output_cache = self
                    .neurons
                    .iter_mut()
                    .map(|n| n.output(inputs))
                    .collect::<Result<_>>()?;
            }
        }
        Ok(&self.output_cache)
    }

    /// Assigns each neuron the error term `f'(sum) * (expected - output)`.
    ///
    /// Only meaningful on the final layer, after a forward pass.
    pub fn calculate_deltas_for_output_layer(&mut self, expected: &[f64]) -> Result<()> {
        check_len("expected output", self.neurons.len(), expected.len())?;
        check_len("output cache", self.neurons.len(), self.output_cache.len())?;
        for (neuron, target, output) in
            multizip((self.neurons.iter_mut(), expected, &self.output_cache))
        {
            neuron.delta = neuron.derivative_at_cache() * (target - output);
        }
        Ok(())
    }

    /// Propagates the deltas of `next` back onto this layer's neurons.
    ///
    /// `next` must be the layer immediately downstream, with its deltas
    /// already computed for the current backward pass. Only this layer's
    /// neurons are written.
    pub fn calculate_deltas_for_hidden_layer(&mut self, next: &Layer) -> Result<()> {
        for neuron in &next.neurons {
            check_len("next layer weights", self.neurons.len(), neuron.weights().len())?;
        }

        let next_deltas: Vec<f64> = next.neurons.iter().map(|n| n.delta).collect();
        for (index, neuron) in self.neurons.iter_mut().enumerate() {
            let next_weights: Vec<f64> = next.neurons.iter().map(|n| n.weights()[index]).collect();
            let sum_weighted_deltas = dot_product(&next_weights, &next_deltas)?;
            neuron.delta = neuron.derivative_at_cache() * sum_weighted_deltas;
        }
        Ok(())
    }

    /// Applies each neuron's delta, using the outputs of `previous` as the
    /// inputs that produced them. Does nothing for the input layer.
    pub fn update_weights(&mut self, previous: &Layer) -> Result<()> {
        let len = match self.previous_len {
            Some(len) => len,
            None => return Ok(()),
        };
        check_len("previous layer outputs", len, previous.output_cache.len())?;
        for neuron in &mut self.neurons {
            neuron.update_weights(&previous.output_cache)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activator::Activator;
    use crate::Error;
    use proptest::collection::vec;
    use rand::{rngs::StdRng, SeedableRng};
    use test_strategy::proptest;

    fn identity() -> Activation {
        Activation::new(|x| x, |_| 1.0)
    }

    fn neuron(weights: Vec<f64>, activation: Activation) -> Neuron {
        Neuron::new(weights, 0.1, activation)
    }

    #[proptest]
    fn construction_sizes_weights_by_previous_layer(
        #[strategy(1usize..16)] k: usize,
        #[strategy(1usize..16)] n: usize,
        seed: u64,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let input = Layer::with_rng(None, k, 0.1, Activation::default(), &mut rng);
        let layer = Layer::with_rng(Some(&input), n, 0.1, Activation::default(), &mut rng);

        assert!(input.neurons().iter().all(|n| n.weights().is_empty()));
        assert_eq!(input.output_cache(), vec![0.0; k].as_slice());

        assert_eq!(layer.len(), n);
        assert_eq!(layer.previous_len(), Some(k));
        assert_eq!(layer.output_cache(), vec![0.0; n].as_slice());
        for neuron in layer.neurons() {
            assert_eq!(neuron.weights().len(), k);
            assert!(neuron.weights().iter().all(|w| (0.0..1.0).contains(w)));
        }
    }

    #[proptest]
    fn input_layer_passes_inputs_through(
        #[strategy(1usize..8)] n: usize,
        #[strategy(vec(-1e6..1e6, 0..32))] v: Vec<f64>,
    ) {
        let mut layer = Layer::new(None, n, 0.1, Activation::default());
        assert_eq!(layer.outputs(&v)?, v.as_slice());
        assert_eq!(layer.output_cache(), v.as_slice());
    }

    #[proptest]
    fn forward_pass_yields_one_output_per_neuron(
        #[strategy(1usize..8)] k: usize,
        #[strategy(1usize..8)] n: usize,
        #[strategy(vec(-1.0..1.0, #k))] inputs: Vec<f64>,
    ) {
        let input = Layer::new(None, k, 0.1, Activation::default());
        let mut layer = Layer::new(Some(&input), n, 0.1, Activation::default());
        assert_eq!(layer.outputs(&inputs)?.len(), n);
    }

    #[proptest]
    fn forward_pass_does_not_accumulate(
        #[strategy(1usize..8)] k: usize,
        #[strategy(vec(-1.0..1.0, #k))] inputs: Vec<f64>,
        #[strategy(vec(-1.0..1.0, #k))] other: Vec<f64>,
    ) {
        let input = Layer::new(None, k, 0.1, Activation::default());
        let mut layer = Layer::new(Some(&input), 3, 0.1, Activation::default());
        let first = layer.outputs(&inputs)?.to_vec();
        layer.outputs(&other)?;
        assert_eq!(layer.outputs(&inputs)?, first.as_slice());
    }

    #[test]
    fn forward_pass_applies_each_neuron_in_order() {
        let layer = Layer::from_neurons(
            Some(2),
            vec![
                neuron(vec![1.0, 2.0], identity()),
                neuron(vec![-1.0, 0.5], identity()),
            ],
        );
        let mut layer = layer.unwrap();
        assert_eq!(layer.outputs(&[3.0, 4.0]), Ok(&[11.0, -1.0][..]));
    }

    #[test]
    fn forward_pass_rejects_wrong_input_length() {
        let input = Layer::new(None, 2, 0.1, Activation::default());
        let mut layer = Layer::new(Some(&input), 2, 0.1, Activation::default());
        assert_eq!(
            layer.outputs(&[1.0]),
            Err(Error::LengthMismatch {
                what: "layer input",
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn from_neurons_rejects_misshapen_weights() {
        let neurons = vec![neuron(vec![1.0], identity())];
        assert!(Layer::from_neurons(Some(2), neurons.clone()).is_err());
        assert!(Layer::from_neurons(None, neurons).is_err());
    }

    #[test]
    fn output_delta_is_derivative_times_error() {
        let d = Activation::new(|x| x, |x| 3.0 * x + 1.0);
        let mut layer = Layer::from_neurons(Some(1), vec![neuron(vec![2.0], d)]).unwrap();

        let o = layer.outputs(&[0.25]).unwrap()[0];
        assert_eq!(o, 0.5);
        layer.calculate_deltas_for_output_layer(&[2.0]).unwrap();

        // d(0.5) * (2.0 - 0.5)
        assert_eq!(layer.neurons()[0].delta, 2.5 * 1.5);
    }

    #[test]
    fn output_delta_rejects_wrong_target_length() {
        let mut layer = Layer::from_neurons(Some(1), vec![neuron(vec![1.0], identity())]).unwrap();
        assert!(layer.calculate_deltas_for_output_layer(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn hidden_delta_sums_downstream_weighted_deltas() {
        let dh = Activation::new(|x| x, |x| 2.0 * x);
        let mut hidden = Layer::from_neurons(Some(1), vec![neuron(vec![1.5], dh)]).unwrap();
        hidden.outputs(&[2.0]).unwrap();

        let mut next = Layer::from_neurons(
            Some(1),
            vec![
                neuron(vec![0.5], identity()),
                neuron(vec![-2.0], identity()),
            ],
        )
        .unwrap();
        next.neurons[0].delta = 4.0;
        next.neurons[1].delta = 0.25;

        hidden.calculate_deltas_for_hidden_layer(&next).unwrap();

        // dh(3.0) * (0.5 * 4.0 + -2.0 * 0.25)
        assert_eq!(hidden.neurons()[0].delta, 6.0 * 1.5);
        assert_eq!(next.neurons()[0].delta, 4.0);
        assert_eq!(next.neurons()[1].delta, 0.25);
    }

    #[test]
    fn hidden_delta_rejects_unconnected_next_layer() {
        let mut hidden = Layer::from_neurons(Some(1), vec![neuron(vec![1.0], identity())]).unwrap();
        let next = Layer::from_neurons(Some(2), vec![neuron(vec![1.0, 1.0], identity())]).unwrap();
        assert!(hidden.calculate_deltas_for_hidden_layer(&next).is_err());
    }

    #[test]
    fn update_weights_uses_previous_outputs() {
        let mut input = Layer::new(None, 2, 0.5, Activator::Sigmoid.into());
        input.outputs(&[1.0, 0.0]).unwrap();

        let mut layer = Layer::from_neurons(
            Some(2),
            vec![Neuron::new(vec![0.0, 0.0], 0.5, identity())],
        )
        .unwrap();
        layer.neurons[0].delta = 2.0;
        layer.update_weights(&input).unwrap();

        assert_eq!(layer.neurons()[0].weights(), &[1.0, 0.0]);
    }

    #[test]
    fn update_weights_is_a_no_op_for_the_input_layer() {
        let mut input = Layer::new(None, 2, 0.5, Activation::default());
        let other = input.clone();
        assert_eq!(input.update_weights(&other), Ok(()));
    }
}
