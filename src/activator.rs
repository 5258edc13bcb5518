//! Activation function types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

type Function = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// An activation function paired with its derivative.
///
/// Both functions take the neuron's weighted sum, i.e. the value *before*
/// activation. The pairing is trusted: nothing checks that `derivative` is
/// actually the derivative of `function`.
#[derive(Clone)]
pub struct Activation {
    function: Function,
    derivative: Function,
}

impl Activation {
    pub fn new<F, D>(function: F, derivative: D) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
        D: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Activation {
            function: Arc::new(function),
            derivative: Arc::new(derivative),
        }
    }

    /// Evaluates `f(x)`.
    pub fn function(&self, x: f64) -> f64 {
        (self.function)(x)
    }

    /// Evaluates `f'(x)`.
    pub fn derivative(&self, x: f64) -> f64 {
        (self.derivative)(x)
    }
}

impl fmt::Debug for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activation").finish_non_exhaustive()
    }
}

impl From<Activator> for Activation {
    fn from(activator: Activator) -> Self {
        Activation::new(move |x| activator.f(x), move |x| activator.derivative(x))
    }
}

impl Default for Activation {
    fn default() -> Self {
        Activator::default().into()
    }
}

/// [Activation function](https://en.wikipedia.org/wiki/Activation_function)
/// types.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Activator {
    /// Rectified Linear Unit
    ReLU,
    /// Leaky Rectified Linear Unit
    ///
    /// Takes an `alpha` value to use for negative inputs.
    LeakyReLU(f64),
    /// Sigmoid function
    #[default]
    Sigmoid,
    /// Hyperbolic tan function
    TanH,
}

impl Activator {
    /// Evaluates `f(x)` for the selected the activation function.
    pub fn f(&self, x: f64) -> f64 {
        match *self {
            Activator::ReLU => x.max(0.0),
            Activator::LeakyReLU(alpha) => {
                if x > 0.0 {
                    x
                } else {
                    alpha * x
                }
            }
            Activator::Sigmoid => sigmoid(x),
            Activator::TanH => x.tanh(),
        }
    }

    /// Evaluates the derivative `f'(x)` at the weighted sum `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match *self {
            Activator::ReLU => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activator::LeakyReLU(alpha) => {
                if x > 0.0 {
                    1.0
                } else {
                    alpha
                }
            }
            Activator::Sigmoid => {
                let y = sigmoid(x);
                y * (1.0 - y)
            }
            Activator::TanH => {
                let y = x.tanh();
                1.0 - y * y
            }
        }
    }
}

/// The logistic function `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
