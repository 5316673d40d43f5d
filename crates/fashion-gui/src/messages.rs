use std::path::PathBuf;
use std::sync::Arc;

use fashion_core::error::{ModelLoadError, PredictionError};
use fashion_core::model::InferenceModel;
use fashion_core::pipeline::{Classification, PipelineStage};
use fashion_core::view::{UploadTicket, UploadToken};

/// Where the bytes of an upload come from.
pub enum UploadSource {
    Path(PathBuf),
    /// Dropped file contents with no backing path.
    Bytes(Arc<[u8]>),
}

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Load a layers-model descriptor and its weight shards.
    LoadModel { path: PathBuf },

    /// Run one upload through the classification pipeline.
    Classify {
        ticket: UploadTicket,
        source: UploadSource,
    },
}

/// Results sent from worker (and dialog) threads back to UI thread.
pub enum WorkerResult {
    ModelLoaded {
        model: Arc<dyn InferenceModel>,
    },
    ModelLoadFailed {
        error: ModelLoadError,
    },

    /// Pipeline progress for one upload.
    Progress {
        token: UploadToken,
        stage: PipelineStage,
    },

    ClassifyComplete {
        token: UploadToken,
        result: Result<Classification, PredictionError>,
    },

    /// The image picker returned a file.
    ImagePicked { path: PathBuf },
    /// The model picker returned a file.
    ModelPicked { path: PathBuf },

    Log { message: String },
}
