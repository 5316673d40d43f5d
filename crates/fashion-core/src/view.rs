//! UI-agnostic state behind the classifier window.
//!
//! The view owns the model lifecycle and everything that is displayed. Each
//! upload gets a token; only the result carrying the latest token may write
//! display state, so results from superseded uploads are dropped.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::{ClassifierConfig, PreprocessConfig};
use crate::consts::{MODEL_LOAD_FAILED_MESSAGE, PREDICTION_FAILED_MESSAGE};
use crate::error::{ModelLoadError, PredictionError};
use crate::ingest::SourceImage;
use crate::model::{load_model, InferenceModel, ModelState, ModelStatus};
use crate::pipeline::{
    classify_bytes, classify_path, Classification, NoOpReporter, ProcessedImage,
    ProgressReporter,
};
use crate::prediction::Prediction;

/// Monotonically increasing upload identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UploadToken(u64);

impl UploadToken {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Whether a completed upload was allowed to update the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadStatus {
    Applied,
    /// A newer upload was started; the result was discarded.
    Stale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    ModelLoad,
    Prediction,
}

/// A user-visible error plus the underlying cause for the log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewError {
    pub kind: ErrorKind,
    pub detail: String,
}

impl ViewError {
    /// The single-line message shown to the user.
    pub fn message(&self) -> &'static str {
        match self.kind {
            ErrorKind::ModelLoad => MODEL_LOAD_FAILED_MESSAGE,
            ErrorKind::Prediction => PREDICTION_FAILED_MESSAGE,
        }
    }
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// What the window shows.
///
/// The original and processed images live in one `Classification`, so they
/// are always present or absent together.
#[derive(Clone, Debug, Default)]
pub struct DisplayState {
    /// Name of the upload currently being processed.
    pub pending: Option<String>,
    classification: Option<Classification>,
    pub error: Option<ViewError>,
}

impl DisplayState {
    pub fn original(&self) -> Option<&SourceImage> {
        self.classification.as_ref().map(|c| &c.original)
    }

    pub fn processed(&self) -> Option<&ProcessedImage> {
        self.classification.as_ref().map(|c| &c.processed)
    }

    /// Empty until an upload succeeds.
    pub fn predictions(&self) -> &[Prediction] {
        self.classification
            .as_ref()
            .map(|c| c.predictions.as_slice())
            .unwrap_or_default()
    }

    pub fn classification(&self) -> Option<&Classification> {
        self.classification.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }
}

/// Everything needed to run one upload away from the view.
#[derive(Clone)]
pub struct UploadTicket {
    pub token: UploadToken,
    pub name: String,
    pub model: Result<Arc<dyn InferenceModel>, ModelStatus>,
    pub config: PreprocessConfig,
}

impl UploadTicket {
    pub fn run_bytes(
        &self,
        bytes: &[u8],
        reporter: &dyn ProgressReporter,
    ) -> Result<Classification, PredictionError> {
        classify_bytes(self.model_ref(), &self.name, bytes, &self.config, reporter)
    }

    pub fn run_path(
        &self,
        path: &Path,
        reporter: &dyn ProgressReporter,
    ) -> Result<Classification, PredictionError> {
        classify_path(self.model_ref(), path, &self.config, reporter)
    }

    fn model_ref(&self) -> Result<&dyn InferenceModel, ModelStatus> {
        self.model.as_deref().map_err(|status| *status)
    }
}

pub struct ClassifierView {
    config: ClassifierConfig,
    model: ModelState,
    latest: UploadToken,
    display: DisplayState,
}

impl ClassifierView {
    /// A view whose model has not been loaded yet.
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            model: ModelState::Unloaded,
            latest: UploadToken::default(),
            display: DisplayState::default(),
        }
    }

    /// A view with an already loaded model.
    pub fn with_model(config: ClassifierConfig, model: Arc<dyn InferenceModel>) -> Self {
        Self {
            model: ModelState::Ready(model),
            ..Self::new(config)
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn set_model_path(&mut self, path: &Path) {
        self.config.model = path.to_path_buf();
    }

    pub fn model_state(&self) -> &ModelState {
        &self.model
    }

    pub fn model_status(&self) -> ModelStatus {
        self.model.status()
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn latest_token(&self) -> UploadToken {
        self.latest
    }

    /// Enter `Loading`. Returns `false` if a load is already in flight.
    pub fn begin_model_load(&mut self) -> bool {
        let started = self.model.begin_loading();
        if started {
            info!(path = %self.config.model.display(), "Loading model");
        }
        started
    }

    /// Switch to the model at `path` and enter `Loading`. While another load
    /// is in flight nothing changes and this returns `false`.
    pub fn begin_model_load_from(&mut self, path: &Path) -> bool {
        if self.model.status() == ModelStatus::Loading {
            debug!(path = %path.display(), "Model load in flight, new path ignored");
            return false;
        }
        self.config.model = path.to_path_buf();
        self.begin_model_load()
    }

    /// Record the outcome of a load started with `begin_model_load`.
    pub fn finish_model_load(
        &mut self,
        result: Result<Arc<dyn InferenceModel>, ModelLoadError>,
    ) -> bool {
        let outcome = match result {
            Ok(model) => Ok(model),
            Err(e) => {
                error!(error = %e, path = %self.config.model.display(), "Model load failed");
                Err(e.to_string())
            }
        };
        let failed = outcome.is_err();
        let detail = outcome.as_ref().err().cloned();

        if !self.model.finish(outcome) {
            debug!("Ignoring model load result with no load in flight");
            return false;
        }

        if failed {
            self.display.error = Some(ViewError {
                kind: ErrorKind::ModelLoad,
                detail: detail.unwrap_or_default(),
            });
        } else {
            info!("Model ready");
            if matches!(
                self.display.error,
                Some(ViewError {
                    kind: ErrorKind::ModelLoad,
                    ..
                })
            ) {
                self.display.error = None;
            }
        }
        true
    }

    /// Load the configured model synchronously.
    pub fn load_model(&mut self) -> ModelStatus {
        if self.begin_model_load() {
            let result = load_model(&self.config.model)
                .map(|m| Arc::new(m) as Arc<dyn InferenceModel>);
            self.finish_model_load(result);
        }
        self.model.status()
    }

    /// Start a new upload: issue a fresh token and clear all derived state.
    pub fn begin_upload(&mut self, name: impl Into<String>) -> UploadTicket {
        let name = name.into();
        self.latest = self.latest.next();
        self.display = DisplayState {
            pending: Some(name.clone()),
            ..DisplayState::default()
        };
        debug!(token = self.latest.value(), name = %name, "Upload started");

        UploadTicket {
            token: self.latest,
            name,
            model: self.model.handle().ok_or(self.model.status()),
            config: self.config.preprocess.clone(),
        }
    }

    /// Apply an upload result if it belongs to the latest upload.
    pub fn complete_upload(
        &mut self,
        token: UploadToken,
        result: Result<Classification, PredictionError>,
    ) -> UploadStatus {
        if token != self.latest || self.display.pending.is_none() {
            debug!(
                token = token.value(),
                latest = self.latest.value(),
                "Discarding stale upload result"
            );
            return UploadStatus::Stale;
        }

        let name = self.display.pending.take().unwrap_or_default();
        match result {
            Ok(classification) => {
                self.display.classification = Some(classification);
                self.display.error = None;
            }
            Err(e) => {
                error!(error = %e, name = %name, "Prediction failed");
                self.display.classification = None;
                self.display.error = Some(ViewError {
                    kind: ErrorKind::Prediction,
                    detail: e.to_string(),
                });
            }
        }
        UploadStatus::Applied
    }

    /// Run a whole upload synchronously.
    pub fn upload(&mut self, name: &str, bytes: &[u8]) -> UploadStatus {
        let ticket = self.begin_upload(name);
        let result = ticket.run_bytes(bytes, &NoOpReporter);
        self.complete_upload(ticket.token, result)
    }
}
