/// Side length of the square input the classifier was trained on.
pub const INPUT_SIZE: usize = 28;

/// Largest 8-bit sample value, used to map raw intensities into [0, 1].
pub const MAX_SAMPLE_VALUE: f32 = 255.0;

/// Mean intensity above which an image is treated as dark-on-light and inverted.
pub const DEFAULT_POLARITY_THRESHOLD: f32 = 0.5;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Default location of the layers-model descriptor.
pub const DEFAULT_MODEL_PATH: &str = "model.json";

/// User-visible message when the model cannot be loaded.
pub const MODEL_LOAD_FAILED_MESSAGE: &str = "Failed to load model";

/// User-visible message when an upload cannot be classified.
pub const PREDICTION_FAILED_MESSAGE: &str = "Failed to make prediction";
