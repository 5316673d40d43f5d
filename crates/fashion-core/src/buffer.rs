use image::{GrayImage, Luma};
use ndarray::Array2;

use crate::consts::{INPUT_SIZE, MAX_SAMPLE_VALUE};
use crate::error::PredictionError;

/// A 28x28 single-channel intensity grid, row-major, shape = (height, width).
///
/// The shape is fixed at construction; after normalization the values lie in
/// [0.0, 1.0].
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    data: Array2<f32>,
}

impl PixelBuffer {
    /// Wrap an array, rejecting anything that is not 28x28.
    pub fn from_array(data: Array2<f32>) -> Result<Self, PredictionError> {
        if data.dim() != (INPUT_SIZE, INPUT_SIZE) {
            return Err(PredictionError::ShapeMismatch {
                expected: vec![INPUT_SIZE, INPUT_SIZE],
                actual: data.shape().to_vec(),
            });
        }
        Ok(Self { data })
    }

    pub fn zeros() -> Self {
        Self {
            data: Array2::zeros((INPUT_SIZE, INPUT_SIZE)),
        }
    }

    pub fn from_elem(value: f32) -> Self {
        Self {
            data: Array2::from_elem((INPUT_SIZE, INPUT_SIZE), value),
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Arithmetic mean over all samples.
    pub fn mean(&self) -> f32 {
        self.data.mean().unwrap_or(0.0)
    }

    /// Every sample `x` replaced by `1.0 - x`.
    pub fn inverted(&self) -> Self {
        Self {
            data: self.data.mapv(|v| 1.0 - v),
        }
    }

    pub fn as_array(&self) -> &Array2<f32> {
        &self.data
    }

    /// Render as an 8-bit grayscale image (value * 255, rounded and clamped).
    pub fn to_gray_image(&self) -> GrayImage {
        let (h, w) = self.data.dim();
        let mut img = GrayImage::new(w as u32, h as u32);
        for ((row, col), &v) in self.data.indexed_iter() {
            let val = (v.clamp(0.0, 1.0) * MAX_SAMPLE_VALUE).round() as u8;
            img.put_pixel(col as u32, row as u32, Luma([val]));
        }
        img
    }
}
