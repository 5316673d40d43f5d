#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageBuffer, ImageFormat, Luma, Rgb};
use ndarray::{Array2, Array3};

use fashion_core::error::InferenceError;
use fashion_core::model::InferenceModel;

/// Model that returns the same scores for every input.
pub struct FixedScores {
    pub scores: Vec<f32>,
}

impl FixedScores {
    pub fn new(scores: &[f32]) -> Self {
        Self {
            scores: scores.to_vec(),
        }
    }

    /// Ten scores with `winner` at 0.91 and the rest sharing the remainder.
    pub fn favouring(winner: usize) -> Self {
        let mut scores = vec![0.01; 10];
        scores[winner] = 0.91;
        Self { scores }
    }
}

impl InferenceModel for FixedScores {
    fn input_shape(&self) -> &[usize] {
        &[28, 28]
    }

    fn num_outputs(&self) -> usize {
        self.scores.len()
    }

    fn predict(&self, input: &Array3<f32>) -> Result<Array2<f32>, InferenceError> {
        let batch = input.shape()[0];
        Ok(Array2::from_shape_fn((batch, self.scores.len()), |(_, i)| {
            self.scores[i]
        }))
    }
}

pub fn solid_gray(w: u32, h: u32, value: u8) -> DynamicImage {
    DynamicImage::ImageLuma8(ImageBuffer::from_pixel(w, h, Luma([value])))
}

pub fn solid_rgb(w: u32, h: u32, value: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(ImageBuffer::from_pixel(w, h, Rgb(value)))
}

/// Light background with a dark centred square covering a quarter of the area.
pub fn dark_square_on_white(size: u32) -> DynamicImage {
    let lo = size / 4;
    let hi = size - size / 4;
    DynamicImage::ImageLuma8(ImageBuffer::from_fn(size, size, |x, y| {
        if (lo..hi).contains(&x) && (lo..hi).contains(&y) {
            Luma([0])
        } else {
            Luma([255])
        }
    }))
}

pub fn png_bytes(image: &DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode PNG");
    bytes
}

fn le_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Write a `Flatten -> Dense(784 -> 10)` layers-model into `dir`.
///
/// The kernel is all zeros, so the output is `activation(bias)` regardless
/// of the input.
pub fn write_bias_model(dir: &Path, bias: &[f32], activation: &str) -> PathBuf {
    let kernel = vec![0.0f32; 784 * 10];
    write_dense_model(dir, &kernel, bias, activation)
}

/// Write a `Flatten -> Dense(784 -> 10)` layers-model with the given weights.
pub fn write_dense_model(dir: &Path, kernel: &[f32], bias: &[f32], activation: &str) -> PathBuf {
    assert_eq!(kernel.len(), 784 * bias.len());
    let json = serde_json::json!({
        "format": "layers-model",
        "generatedBy": "keras v2.12.0",
        "convertedBy": "TensorFlow.js Converter v4.4.0",
        "modelTopology": {
            "class_name": "Sequential",
            "config": {
                "name": "sequential",
                "layers": [
                    {
                        "class_name": "Flatten",
                        "config": {
                            "name": "flatten",
                            "trainable": true,
                            "batch_input_shape": [null, 28, 28],
                            "dtype": "float32",
                            "data_format": "channels_last"
                        }
                    },
                    {
                        "class_name": "Dense",
                        "config": {
                            "name": "dense",
                            "trainable": true,
                            "dtype": "float32",
                            "units": bias.len(),
                            "activation": activation,
                            "use_bias": true
                        }
                    }
                ]
            },
            "keras_version": "2.12.0",
            "backend": "tensorflow"
        },
        "weightsManifest": [
            {
                "paths": ["group1-shard1of1.bin"],
                "weights": [
                    { "name": "dense/kernel", "shape": [784, bias.len()], "dtype": "float32" },
                    { "name": "dense/bias", "shape": [bias.len()], "dtype": "float32" }
                ]
            }
        ]
    });

    let mut shard = le_bytes(kernel);
    shard.extend(le_bytes(bias));
    std::fs::write(dir.join("group1-shard1of1.bin"), shard).expect("write shard");

    let path = dir.join("model.json");
    std::fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).expect("write model");
    path
}

/// Bias that favours one class after softmax.
pub fn one_hot_bias(winner: usize) -> Vec<f32> {
    let mut bias = vec![0.0f32; 10];
    bias[winner] = 10.0;
    bias
}
