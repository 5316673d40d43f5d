use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::consts::INPUT_SIZE;
use crate::error::PredictionError;
use crate::labels::NUM_CLASSES;
use crate::model::InferenceModel;

/// Score one preprocessed buffer.
///
/// The buffer is reshaped to a batch of one (`[1, 28, 28]`) and the model's
/// first output row is returned as-is: no softmax or other normalization is
/// applied here.
pub fn run_inference(
    model: &dyn InferenceModel,
    buffer: &PixelBuffer,
) -> Result<Vec<f32>, PredictionError> {
    if model.input_shape() != [INPUT_SIZE, INPUT_SIZE] {
        return Err(PredictionError::ShapeMismatch {
            expected: model.input_shape().to_vec(),
            actual: vec![INPUT_SIZE, INPUT_SIZE],
        });
    }

    let input = buffer
        .as_array()
        .to_owned()
        .into_shape_with_order((1, INPUT_SIZE, INPUT_SIZE))
        .map_err(|_| PredictionError::ShapeMismatch {
            expected: vec![1, INPUT_SIZE, INPUT_SIZE],
            actual: buffer.as_array().shape().to_vec(),
        })?;

    let output = model.predict(&input)?;
    if output.nrows() == 0 {
        return Err(PredictionError::ClassCountMismatch {
            expected: NUM_CLASSES,
            actual: 0,
        });
    }
    let scores: Vec<f32> = output.row(0).to_vec();
    if scores.len() != NUM_CLASSES {
        return Err(PredictionError::ClassCountMismatch {
            expected: NUM_CLASSES,
            actual: scores.len(),
        });
    }

    debug!(?scores, "Inference complete");
    Ok(scores)
}
