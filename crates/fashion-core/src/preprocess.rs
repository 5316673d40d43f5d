//! Bitmap to model input: channel reduction, bilinear resize to 28x28,
//! normalization and polarity correction. Every step is a pure function.

use image::DynamicImage;
use ndarray::Array2;
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::config::{GrayscaleMode, PreprocessConfig};
use crate::consts::{INPUT_SIZE, LUMINANCE_B, LUMINANCE_G, LUMINANCE_R, MAX_SAMPLE_VALUE};
use crate::error::PredictionError;

/// Output of the preprocessing pipeline.
#[derive(Clone, Debug)]
pub struct Preprocessed {
    /// Polarity-corrected 28x28 buffer, ready for reshape.
    pub buffer: PixelBuffer,
    /// Mean intensity measured before polarity correction.
    pub mean: f32,
    /// Whether the buffer was inverted.
    pub inverted: bool,
}

/// Run all preprocessing steps on a decoded bitmap.
pub fn preprocess(
    image: &DynamicImage,
    config: &PreprocessConfig,
) -> Result<Preprocessed, PredictionError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(PredictionError::EmptyImage {
            width: image.width(),
            height: image.height(),
        });
    }

    let gray = reduce_channels(image, config.grayscale);
    let resized = resize_bilinear(&gray, INPUT_SIZE, INPUT_SIZE, config.half_pixel_centers);
    let normalized = PixelBuffer::from_array(normalize(&resized))?;
    let (buffer, mean, inverted) = correct_polarity(normalized, config.polarity_threshold);

    debug!(
        src_width = image.width(),
        src_height = image.height(),
        mean,
        inverted,
        "Preprocessed upload"
    );

    Ok(Preprocessed {
        buffer,
        mean,
        inverted,
    })
}

/// Reduce a bitmap to one channel of raw 0-255 samples.
///
/// Translucent pixels are composited over black, so a fully transparent
/// pixel reads as 0 whatever its stored colour.
pub fn reduce_channels(image: &DynamicImage, mode: GrayscaleMode) -> Array2<f32> {
    let rgba = image.to_rgba8();
    let (w, h) = rgba.dimensions();
    Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
        let [r, g, b, a] = rgba.get_pixel(col as u32, row as u32).0;
        let sample = match mode {
            GrayscaleMode::Luminance => {
                LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32
            }
            GrayscaleMode::FirstChannel => r as f32,
        };
        sample * (a as f32 / MAX_SAMPLE_VALUE)
    })
}

/// Bilinear resize: each output sample is a weighted average of the four
/// nearest input samples.
///
/// Without `half_pixel_centers` the source coordinate is `dst * in / out`
/// (no corner alignment). With it, `(dst + 0.5) * in / out - 0.5`, clamped
/// at zero.
pub fn resize_bilinear(
    src: &Array2<f32>,
    out_h: usize,
    out_w: usize,
    half_pixel_centers: bool,
) -> Array2<f32> {
    let (in_h, in_w) = src.dim();
    if in_h == 0 || in_w == 0 {
        return Array2::zeros((out_h, out_w));
    }

    let scale_y = in_h as f32 / out_h as f32;
    let scale_x = in_w as f32 / out_w as f32;

    let source_coord = |dst: usize, scale: f32| -> f32 {
        if half_pixel_centers {
            ((dst as f32 + 0.5) * scale - 0.5).max(0.0)
        } else {
            dst as f32 * scale
        }
    };

    let x_taps: Vec<(usize, usize, f32)> = (0..out_w)
        .map(|x| interpolation_taps(source_coord(x, scale_x), in_w))
        .collect();

    Array2::from_shape_fn((out_h, out_w), |(row, col)| {
        let (y0, y1, dy) = interpolation_taps(source_coord(row, scale_y), in_h);
        let (x0, x1, dx) = x_taps[col];

        let top_left = src[[y0, x0]];
        let top_right = src[[y0, x1]];
        let bottom_left = src[[y1, x0]];
        let bottom_right = src[[y1, x1]];

        let top = top_left + (top_right - top_left) * dx;
        let bottom = bottom_left + (bottom_right - bottom_left) * dx;
        top + (bottom - top) * dy
    })
}

/// Lower index, upper index and fractional weight for one source coordinate.
fn interpolation_taps(coord: f32, len: usize) -> (usize, usize, f32) {
    let lower = (coord.floor() as usize).min(len - 1);
    let upper = (lower + 1).min(len - 1);
    (lower, upper, coord - coord.floor())
}

/// Map raw 0-255 samples into [0, 1].
pub fn normalize(samples: &Array2<f32>) -> Array2<f32> {
    samples.mapv(|v| (v / MAX_SAMPLE_VALUE).clamp(0.0, 1.0))
}

/// Invert the buffer if its mean exceeds `threshold`.
///
/// Returns the (possibly inverted) buffer, the mean before correction and
/// whether inversion happened.
pub fn correct_polarity(buffer: PixelBuffer, threshold: f32) -> (PixelBuffer, f32, bool) {
    let mean = buffer.mean();
    if mean > threshold {
        (buffer.inverted(), mean, true)
    } else {
        (buffer, mean, false)
    }
}
