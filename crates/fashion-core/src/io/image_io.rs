use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;

use crate::buffer::PixelBuffer;
use crate::error::PredictionError;

/// Encode a buffer as an 8-bit grayscale PNG.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, PredictionError> {
    let mut bytes = Vec::new();
    buffer
        .to_gray_image()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Save a buffer as an 8-bit grayscale PNG.
pub fn save_png(buffer: &PixelBuffer, path: &Path) -> Result<(), PredictionError> {
    buffer
        .to_gray_image()
        .save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
