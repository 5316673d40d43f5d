use std::path::Path;
use std::sync::Arc;

use image::DynamicImage;
use tracing::debug;

use crate::error::PredictionError;

/// File extensions offered by the image picker.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "ico", "pnm", "tga",
];

/// The untouched upload: original file bytes plus the decoded bitmap.
#[derive(Clone, Debug)]
pub struct SourceImage {
    /// Display name (usually the file name).
    pub name: String,
    pub bytes: Arc<[u8]>,
    pub image: DynamicImage,
}

impl SourceImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Decode in-memory file bytes. The format is sniffed from the content.
pub fn decode_bytes(name: &str, bytes: &[u8]) -> Result<SourceImage, PredictionError> {
    let image = image::load_from_memory(bytes)?;
    debug!(
        name,
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "Decoded upload"
    );
    Ok(SourceImage {
        name: name.to_string(),
        bytes: Arc::from(bytes),
        image,
    })
}

/// Read and decode an image file.
pub fn open_path(path: &Path) -> Result<SourceImage, PredictionError> {
    let bytes = std::fs::read(path)?;
    decode_bytes(&display_name(path), &bytes)
}

/// File name component of a path, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Whether the picker filter would accept this path.
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}
