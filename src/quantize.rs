//! Palette quantization
//!
//! - Normalize the source image to RGB
//! - Downscale to the canvas thumbnail bounds with nearest-neighbor
//!   resampling (blocky on purpose: output pixels must align to discrete
//!   canvas pixels)
//! - Map every pixel to the nearest entry of the fixed canvas palette
//! - Encode an indexed PNG preview

use crate::error::EngineError;
use crate::palette::{self, Rgb, PNG_PALETTE};
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use png::{BitDepth, ColorType, Encoder};
use std::io::Cursor;

/// Maximum quantized width in logical pixels
pub const MAX_WIDTH: u32 = 133;

/// Maximum quantized height in logical pixels
pub const MAX_HEIGHT: u32 = 100;

/// An image reduced to canvas palette indices.
///
/// Immutable once built; one instance belongs to exactly one drawing job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedImage {
    width: u32,
    height: u32,
    indices: Vec<u8>,
}

impl QuantizedImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Palette index at (x, y). Row-major storage.
    #[inline]
    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        self.indices[(y * self.width + x) as usize]
    }

    /// Palette color at (x, y) - the reverse-RGB view used for grouping.
    #[inline]
    pub fn rgb_at(&self, x: u32, y: u32) -> Rgb {
        palette::color(self.index_at(x, y))
    }

    /// Reconstruct the full RGB image, for UI preview.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let c = self.rgb_at(x, y);
            image::Rgb([c.r, c.g, c.b])
        })
    }

    /// Encode as an indexed PNG carrying the 22-color canvas palette.
    pub fn preview_png(&self) -> Result<Vec<u8>, EngineError> {
        let mut output = Vec::new();

        {
            let mut encoder = Encoder::new(Cursor::new(&mut output), self.width, self.height);
            encoder.set_color(ColorType::Indexed);
            encoder.set_depth(BitDepth::Eight);
            encoder.set_palette(PNG_PALETTE.to_vec());

            let mut writer = encoder
                .write_header()
                .map_err(|e| EngineError::Encode(format!("PNG header error: {}", e)))?;

            writer
                .write_image_data(&self.indices)
                .map_err(|e| EngineError::Encode(format!("PNG write error: {}", e)))?;
        }

        Ok(output)
    }
}

/// Quantize a source image onto the canvas palette.
///
/// Deterministic: the same source always yields the same result.
pub fn quantize(source: &DynamicImage) -> QuantizedImage {
    // Alpha and exotic color modes are flattened to plain RGB first
    let rgb = source.to_rgb8();
    let rgb = shrink_to_fit(&rgb, MAX_WIDTH, MAX_HEIGHT);

    let indices = rgb
        .pixels()
        .map(|p| palette::nearest(Rgb::new(p[0], p[1], p[2])))
        .collect();

    QuantizedImage {
        width: rgb.width(),
        height: rgb.height(),
        indices,
    }
}

/// Downscale so the image fits within `max_width` x `max_height`, keeping
/// aspect ratio. Images already inside the bounds are returned unchanged;
/// nothing is ever enlarged.
pub(crate) fn shrink_to_fit(img: &RgbImage, max_width: u32, max_height: u32) -> RgbImage {
    let (width, height) = img.dimensions();
    if width <= max_width && height <= max_height {
        return img.clone();
    }

    let scale = (max_width as f32 / width as f32).min(max_height as f32 / height as f32);
    let new_width = ((width as f32 * scale).round() as u32).clamp(1, max_width);
    let new_height = ((height as f32 * scale).round() as u32).clamp(1, max_height);

    image::imageops::resize(img, new_width, new_height, FilterType::Nearest)
}
