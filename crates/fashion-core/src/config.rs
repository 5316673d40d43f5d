use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MODEL_PATH, DEFAULT_POLARITY_THRESHOLD};
use crate::error::ConfigError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Path to the layers-model descriptor (`model.json`).
    #[serde(default = "default_model_path")]
    pub model: PathBuf,
    #[serde(default)]
    pub preprocess: PreprocessConfig,
}

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_PATH)
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model: default_model_path(),
            preprocess: PreprocessConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// How colour input is reduced to one channel.
    pub grayscale: GrayscaleMode,
    /// Images with a mean intensity strictly above this are inverted.
    pub polarity_threshold: f32,
    /// Use half-pixel centre sampling in the bilinear resize.
    pub half_pixel_centers: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            grayscale: GrayscaleMode::default(),
            polarity_threshold: DEFAULT_POLARITY_THRESHOLD,
            half_pixel_centers: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrayscaleMode {
    /// Weighted sum of R, G and B (ITU-R BT.601).
    #[default]
    Luminance,
    /// Keep only the first (red) channel.
    FirstChannel,
}

impl std::fmt::Display for GrayscaleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Luminance => write!(f, "Luminance"),
            Self::FirstChannel => write!(f, "First channel"),
        }
    }
}

/// Read a TOML config file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<ClassifierConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}
