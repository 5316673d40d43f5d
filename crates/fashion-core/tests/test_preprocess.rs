mod common;

use approx::assert_abs_diff_eq;
use image::{DynamicImage, ImageBuffer, Rgba};

use fashion_core::config::{GrayscaleMode, PreprocessConfig};
use fashion_core::preprocess::preprocess;

use common::{dark_square_on_white, solid_gray, solid_rgb};

fn assert_valid_buffer(img: &DynamicImage) {
    let out = preprocess(img, &PreprocessConfig::default()).unwrap();
    assert_eq!(out.buffer.width(), 28);
    assert_eq!(out.buffer.height(), 28);
    for &v in out.buffer.as_array().iter() {
        assert!((0.0..=1.0).contains(&v), "sample {v} out of range");
    }
}

// ---------------------------------------------------------------------------
// Shape and range
// ---------------------------------------------------------------------------

#[test]
fn test_output_shape_and_range_for_various_sources() {
    assert_valid_buffer(&solid_gray(1, 1, 128));
    assert_valid_buffer(&solid_gray(28, 28, 0));
    assert_valid_buffer(&solid_rgb(640, 480, [255, 255, 255]));
    assert_valid_buffer(&solid_rgb(17, 301, [12, 200, 99]));
    assert_valid_buffer(&dark_square_on_white(100));

    let gradient = DynamicImage::ImageRgba8(ImageBuffer::from_fn(57, 33, |x, y| {
        Rgba([(x * 4) as u8, (y * 7) as u8, 255 - (x * 4) as u8, 128])
    }));
    assert_valid_buffer(&gradient);

    let wide16 = DynamicImage::ImageLuma16(ImageBuffer::from_pixel(90, 10, image::Luma([40_000u16])));
    assert_valid_buffer(&wide16);
}

// ---------------------------------------------------------------------------
// Polarity correction
// ---------------------------------------------------------------------------

#[test]
fn test_black_image_is_not_inverted() {
    let out = preprocess(&solid_gray(64, 64, 0), &PreprocessConfig::default()).unwrap();
    assert!(!out.inverted);
    assert_abs_diff_eq!(out.mean, 0.0, epsilon = 1e-6);
    assert!(out.buffer.as_array().iter().all(|&v| v.abs() < 1e-6));
}

#[test]
fn test_white_image_is_inverted_to_black() {
    let out = preprocess(
        &solid_rgb(50, 70, [255, 255, 255]),
        &PreprocessConfig::default(),
    )
    .unwrap();
    assert!(out.inverted);
    assert_abs_diff_eq!(out.mean, 1.0, epsilon = 1e-5);
    assert!(out.buffer.as_array().iter().all(|&v| v.abs() < 1e-5));
}

#[test]
fn test_dark_subject_on_light_background_becomes_light_on_dark() {
    let out = preprocess(&dark_square_on_white(56), &PreprocessConfig::default()).unwrap();
    assert!(out.inverted);
    // The square (dark in the source) is now the bright subject.
    assert!(out.buffer.as_array()[[14, 14]] > 0.99);
    assert!(out.buffer.as_array()[[0, 0]] < 0.01);
    assert!(out.buffer.mean() < 0.5);
}

#[test]
fn test_inverted_mean_is_below_threshold() {
    for value in [130u8, 180, 220, 255] {
        let out = preprocess(&solid_gray(30, 30, value), &PreprocessConfig::default()).unwrap();
        assert!(out.mean > 0.5);
        assert!(out.inverted);
        assert!(out.buffer.mean() < 0.5);
    }
}

#[test]
fn test_mid_gray_at_threshold_is_not_inverted() {
    // 127.5 is not representable in u8; 127 lands just below 0.5.
    let out = preprocess(&solid_gray(10, 10, 127), &PreprocessConfig::default()).unwrap();
    assert!(!out.inverted);
    assert_abs_diff_eq!(out.buffer.mean(), 127.0 / 255.0, epsilon = 1e-5);
}

#[test]
fn test_custom_threshold() {
    let config = PreprocessConfig {
        polarity_threshold: 0.9,
        ..PreprocessConfig::default()
    };
    let out = preprocess(&solid_gray(10, 10, 200), &config).unwrap();
    assert!(!out.inverted);
}

// ---------------------------------------------------------------------------
// Channel reduction
// ---------------------------------------------------------------------------

#[test]
fn test_grayscale_modes_differ_on_pure_red() {
    let red = solid_rgb(28, 28, [255, 0, 0]);

    let lum = preprocess(&red, &PreprocessConfig::default()).unwrap();
    assert!(!lum.inverted);
    assert_abs_diff_eq!(lum.mean, 0.299, epsilon = 1e-4);

    let first = preprocess(
        &red,
        &PreprocessConfig {
            grayscale: GrayscaleMode::FirstChannel,
            ..PreprocessConfig::default()
        },
    )
    .unwrap();
    assert!(first.inverted);
    assert_abs_diff_eq!(first.mean, 1.0, epsilon = 1e-6);
}

#[test]
fn test_transparent_background_reads_as_black() {
    // Dark opaque square on a fully transparent white canvas.
    let img = DynamicImage::ImageRgba8(ImageBuffer::from_fn(56, 56, |x, y| {
        if (14..42).contains(&x) && (14..42).contains(&y) {
            Rgba([40, 40, 40, 255])
        } else {
            Rgba([255, 255, 255, 0])
        }
    }));

    for grayscale in [GrayscaleMode::FirstChannel, GrayscaleMode::Luminance] {
        let config = PreprocessConfig {
            grayscale,
            ..PreprocessConfig::default()
        };
        let out = preprocess(&img, &config).unwrap();
        assert!(!out.inverted);
        assert_abs_diff_eq!(out.mean, 0.25 * 40.0 / 255.0, epsilon = 1e-3);
        assert_eq!(out.buffer.as_array()[[0, 0]], 0.0);
    }
}

// ---------------------------------------------------------------------------
// Resize
// ---------------------------------------------------------------------------

#[test]
fn test_downscale_samples_top_left_aligned_grid() {
    // 56x56 with a bright pixel at every even coordinate: the legacy mapping
    // samples exactly those pixels.
    let img = DynamicImage::ImageLuma8(ImageBuffer::from_fn(56, 56, |x, y| {
        if x % 2 == 0 && y % 2 == 0 {
            image::Luma([100])
        } else {
            image::Luma([0])
        }
    }));
    let out = preprocess(&img, &PreprocessConfig::default()).unwrap();
    for &v in out.buffer.as_array().iter() {
        assert_abs_diff_eq!(v, 100.0 / 255.0, epsilon = 1e-5);
    }

    let half = preprocess(
        &img,
        &PreprocessConfig {
            half_pixel_centers: true,
            ..PreprocessConfig::default()
        },
    )
    .unwrap();
    // Half-pixel centres land between pixels and blend in the dark ones.
    assert!(half.buffer.as_array()[[10, 10]] < 100.0 / 255.0);
}
