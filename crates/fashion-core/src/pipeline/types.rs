use crate::ingest::SourceImage;
use crate::prediction::{top_prediction, Prediction};
use crate::preprocess::Preprocessed;

/// Step of a single upload, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Decoding,
    Preprocessing,
    Inference,
    Rendering,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decoding => write!(f, "Decoding image"),
            Self::Preprocessing => write!(f, "Preprocessing"),
            Self::Inference => write!(f, "Running model"),
            Self::Rendering => write!(f, "Rendering preview"),
        }
    }
}

/// The post-processed buffer plus its displayable PNG encoding.
#[derive(Clone, Debug)]
pub struct ProcessedImage {
    pub preprocessed: Preprocessed,
    pub png: Vec<u8>,
}

/// Everything one successful upload produces.
#[derive(Clone, Debug)]
pub struct Classification {
    pub original: SourceImage,
    pub processed: ProcessedImage,
    /// Index-aligned with `CLASS_LABELS`.
    pub predictions: Vec<Prediction>,
}

impl Classification {
    pub fn top(&self) -> Option<&Prediction> {
        top_prediction(&self.predictions)
    }
}

/// Thread-safe progress reporting for one upload.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started.
    fn begin_stage(&self, _stage: PipelineStage) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// Reporter that ignores everything.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
