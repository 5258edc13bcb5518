//! A small feed-forward neural network trained by backpropagation.
//!
//! Layers are built from individual [`Neuron`](neuron::Neuron)s, each owning
//! its weights and the error term (`delta`) assigned to it during the backward
//! pass.

pub mod activator;
pub mod error;
pub mod layer;
pub mod network;
pub mod neuron;
pub mod topology;
pub mod trainer;
pub mod utils;

pub use error::{Error, Result};
