use thiserror::Error;

use crate::model::ModelStatus;

/// Failure to fetch or deserialize the layers-model descriptor.
#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model descriptor: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported layer class '{0}'")]
    UnsupportedLayer(String),

    #[error("Unsupported activation '{0}'")]
    UnsupportedActivation(String),

    #[error("Unsupported weight dtype '{dtype}' for {name}")]
    UnsupportedDtype { name: String, dtype: String },

    #[error("Missing weight '{0}' in weights manifest")]
    MissingWeight(String),

    #[error("Weight '{name}' has shape {actual:?}, expected {expected:?}")]
    WeightShape {
        name: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Weight shard group holds {actual} bytes, manifest declares {expected}")]
    ShardSize { expected: usize, actual: usize },

    #[error("Model topology error: {0}")]
    Topology(String),

    #[error("Model has no layers")]
    EmptyModel,
}

/// Failure inside the runtime while evaluating the model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("Input has shape {actual:?}, model expects {expected:?}")]
    InputShape {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Layer '{layer}' received {actual} features, expected {expected}")]
    FeatureCount {
        layer: String,
        expected: usize,
        actual: usize,
    },

    #[error("Layer '{layer}' expects a rank-2 input, got rank {rank}")]
    Rank { layer: String, rank: usize },
}

/// Any failure while turning one upload into predictions.
#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Model is not available (state: {0})")]
    ModelUnavailable(ModelStatus),

    #[error("Pixel buffer has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Model produced {actual} scores, expected {expected}")]
    ClassCountMismatch { expected: usize, actual: usize },

    #[error("Inference failed: {0}")]
    Inference(#[from] InferenceError),
}

/// Failure reading or parsing a TOML configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
