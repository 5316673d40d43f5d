pub mod classify;
pub mod config;
pub mod model;
pub mod preprocess;

use std::path::Path;

use anyhow::{Context, Result};
use fashion_core::config::{load_config, ClassifierConfig};

/// Load `--config` if given, otherwise the defaults.
pub(crate) fn resolve_config(path: Option<&Path>) -> Result<ClassifierConfig> {
    match path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to read config {}", path.display())),
        None => Ok(ClassifierConfig::default()),
    }
}
