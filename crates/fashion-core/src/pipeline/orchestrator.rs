use std::path::Path;

use tracing::info;

use crate::config::PreprocessConfig;
use crate::error::PredictionError;
use crate::inference::run_inference;
use crate::ingest::{decode_bytes, display_name, SourceImage};
use crate::io::image_io::encode_png;
use crate::model::{InferenceModel, ModelStatus};
use crate::prediction::{map_predictions, top_prediction};
use crate::preprocess::preprocess;

use super::types::{Classification, PipelineStage, ProcessedImage, ProgressReporter};

/// Decode file bytes and classify them.
///
/// `model` is `Err(status)` when no model is ready; that becomes a
/// `PredictionError` only after the upload has been decoded, so a broken file
/// is reported as such even without a model.
pub fn classify_bytes(
    model: Result<&dyn InferenceModel, ModelStatus>,
    name: &str,
    bytes: &[u8],
    config: &PreprocessConfig,
    reporter: &dyn ProgressReporter,
) -> Result<Classification, PredictionError> {
    reporter.begin_stage(PipelineStage::Decoding);
    let source = decode_bytes(name, bytes)?;
    reporter.finish_stage();

    classify_image(model, source, config, reporter)
}

/// Read an image file and classify it.
pub fn classify_path(
    model: Result<&dyn InferenceModel, ModelStatus>,
    path: &Path,
    config: &PreprocessConfig,
    reporter: &dyn ProgressReporter,
) -> Result<Classification, PredictionError> {
    let bytes = std::fs::read(path)?;
    classify_bytes(model, &display_name(path), &bytes, config, reporter)
}

/// Preprocess, infer and render an already decoded upload.
pub fn classify_image(
    model: Result<&dyn InferenceModel, ModelStatus>,
    source: SourceImage,
    config: &PreprocessConfig,
    reporter: &dyn ProgressReporter,
) -> Result<Classification, PredictionError> {
    reporter.begin_stage(PipelineStage::Preprocessing);
    let preprocessed = preprocess(&source.image, config)?;
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Inference);
    let model = model.map_err(PredictionError::ModelUnavailable)?;
    let scores = run_inference(model, &preprocessed.buffer)?;
    let predictions = map_predictions(&scores)?;
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Rendering);
    let png = encode_png(&preprocessed.buffer)?;
    reporter.finish_stage();

    info!(
        name = %source.name,
        inverted = preprocessed.inverted,
        top = top_prediction(&predictions).map(|p| p.label).unwrap_or_default(),
        "Classified upload"
    );

    Ok(Classification {
        original: source,
        processed: ProcessedImage { preprocessed, png },
        predictions,
    })
}
