use std::sync::Arc;

use super::InferenceModel;

/// Copyable summary of where the model is in its load lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelStatus {
    Unloaded,
    Loading,
    Ready,
    Failed,
}

impl std::fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unloaded => write!(f, "unloaded"),
            Self::Loading => write!(f, "loading"),
            Self::Ready => write!(f, "ready"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Model load lifecycle: `Unloaded -> Loading -> Ready | Failed`.
///
/// A new load may begin from any state except `Loading`; the previous handle
/// is released when it starts.
#[derive(Clone, Default)]
pub enum ModelState {
    #[default]
    Unloaded,
    Loading,
    Ready(Arc<dyn InferenceModel>),
    Failed(String),
}

impl ModelState {
    pub fn status(&self) -> ModelStatus {
        match self {
            Self::Unloaded => ModelStatus::Unloaded,
            Self::Loading => ModelStatus::Loading,
            Self::Ready(_) => ModelStatus::Ready,
            Self::Failed(_) => ModelStatus::Failed,
        }
    }

    /// Enter `Loading`. Returns `false` if a load is already in flight.
    pub fn begin_loading(&mut self) -> bool {
        if matches!(self, Self::Loading) {
            return false;
        }
        *self = Self::Loading;
        true
    }

    /// Leave `Loading`. Returns `false` (and changes nothing) if no load was
    /// in flight.
    pub fn finish(&mut self, result: Result<Arc<dyn InferenceModel>, String>) -> bool {
        if !matches!(self, Self::Loading) {
            return false;
        }
        *self = match result {
            Ok(model) => Self::Ready(model),
            Err(message) => Self::Failed(message),
        };
        true
    }

    /// The loaded model, only in `Ready`.
    pub fn handle(&self) -> Option<Arc<dyn InferenceModel>> {
        match self {
            Self::Ready(model) => Some(Arc::clone(model)),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Debug for ModelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed(message) => f.debug_tuple("Failed").field(message).finish(),
            other => write!(f, "{:?}", other.status()),
        }
    }
}
