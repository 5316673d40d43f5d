//! The model as an opaque capability: fixed-shape numeric input in,
//! fixed-length numeric output out.

mod descriptor;
mod layers;
mod loader;
mod state;
mod weights;

use ndarray::{Array2, Array3};

use crate::error::InferenceError;

pub use descriptor::ModelDescriptor;
pub use layers::{Activation, Layer, LayersModel};
pub use loader::{load_model, parse_model};
pub use state::{ModelState, ModelStatus};

/// Anything that can score a batch of single-channel images.
pub trait InferenceModel: Send + Sync {
    /// Per-sample input shape, excluding the batch axis (e.g. `[28, 28]`).
    fn input_shape(&self) -> &[usize];

    /// Number of scores produced per sample.
    fn num_outputs(&self) -> usize;

    /// Evaluate a `[batch, height, width]` input into `[batch, num_outputs]`.
    fn predict(&self, input: &Array3<f32>) -> Result<Array2<f32>, InferenceError>;
}
