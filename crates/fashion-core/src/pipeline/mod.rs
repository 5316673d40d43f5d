mod orchestrator;
mod types;

pub use orchestrator::{classify_bytes, classify_image, classify_path};
pub use types::{Classification, NoOpReporter, PipelineStage, ProcessedImage, ProgressReporter};
