use fashion_core::buffer::PixelBuffer;
use image::DynamicImage;

/// Longest side of the original image as uploaded to the GPU.
const MAX_PREVIEW_SIDE: u32 = 1024;

/// Convert a normalized PixelBuffer (values in [0.0, 1.0]) to an egui ColorImage.
pub fn buffer_to_color_image(buffer: &PixelBuffer) -> egui::ColorImage {
    let data = buffer.as_array();
    let h = buffer.height();
    let w = buffer.width();
    let mut pixels = Vec::with_capacity(h * w);

    for row in 0..h {
        for col in 0..w {
            let v = (data[[row, col]].clamp(0.0, 1.0) * 255.0).round() as u8;
            pixels.push(egui::Color32::from_gray(v));
        }
    }

    egui::ColorImage {
        size: [w, h],
        pixels,
        source_size: Default::default(),
    }
}

/// Convert a decoded upload to an egui ColorImage, shrinking very large images.
pub fn dynamic_to_color_image(image: &DynamicImage) -> egui::ColorImage {
    let rgba = if image.width() > MAX_PREVIEW_SIDE || image.height() > MAX_PREVIEW_SIDE {
        image.thumbnail(MAX_PREVIEW_SIDE, MAX_PREVIEW_SIDE).to_rgba8()
    } else {
        image.to_rgba8()
    };
    let size = [rgba.width() as usize, rgba.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
}
