//! Client-side image preparation before upload.
//!
//! Decodes JPEG, PNG, GIF, BMP and WebP via the `image` crate, bounds the
//! longer side, then re-encodes as JPEG until the result fits the byte
//! budget: first by lowering quality, then by shrinking dimensions.

use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage};
use std::io::Cursor;
use thiserror::Error;

use crate::config::UploadConfig;

/// Below this the image is useless; give up instead of shrinking further
const MIN_SIDE: u32 = 16;

pub const OUTPUT_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("{0} is not an image")]
    NotAnImage(String),

    #[error("could not decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("could not encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("image cannot be reduced below {budget} bytes")]
    OverBudget { budget: usize },
}

/// Re-encoded image ready for transfer
#[derive(Debug)]
pub struct PreparedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
}

/// Scale `(width, height)` so the longer side is at most `max_side`
pub fn fit_within(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    let longer = width.max(height);
    if longer <= max_side || longer == 0 {
        return (width, height);
    }
    let scale = max_side as f64 / longer as f64;
    let w = ((width as f64 * scale).round() as u32).max(1);
    let h = ((height as f64 * scale).round() as u32).max(1);
    (w, h)
}

/// `photo.final.PNG` -> `photo.final.jpg`
pub fn jpeg_file_name(original: &str) -> String {
    let base = original.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(original);
    let stem = match base.rfind('.') {
        Some(0) | None => base,
        Some(dot) => &base[..dot],
    };
    let stem = if stem.trim().is_empty() { "image" } else { stem };
    format!("{stem}.jpg")
}

/// Encode as JPEG at `quality`. Alpha is dropped; JPEG has none.
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut output = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut output, quality);
    rgb.write_with_encoder(encoder)?;
    Ok(output.into_inner())
}

fn decode(data: &[u8], file_name: &str) -> Result<DynamicImage, TransformError> {
    image::load_from_memory(data).map_err(|e| {
        let guessed = mime_guess::from_path(file_name).first();
        match guessed {
            Some(mime) if mime.type_() == mime_guess::mime::IMAGE => TransformError::Decode(e),
            _ => TransformError::NotAnImage(file_name.to_string()),
        }
    })
}

/// Bring an image under `config.max_bytes`
pub fn prepare_image(
    data: &[u8],
    file_name: &str,
    config: &UploadConfig,
) -> Result<PreparedImage, TransformError> {
    let mut img = decode(data, file_name)?;

    let (w, h) = fit_within(img.width(), img.height(), config.max_dimension.max(MIN_SIDE));
    if (w, h) != (img.width(), img.height()) {
        img = img.resize_exact(w, h, FilterType::Triangle);
    }

    let floor = config.min_quality.clamp(1, 100);
    let start = config.initial_quality.clamp(floor, 100);
    let step = config.quality_step.max(1);

    loop {
        let mut quality = start;
        loop {
            let bytes = encode_jpeg(&img, quality).map_err(TransformError::Encode)?;
            if bytes.len() <= config.max_bytes {
                return Ok(PreparedImage {
                    bytes,
                    width: img.width(),
                    height: img.height(),
                    quality,
                });
            }
            if quality <= floor {
                break;
            }
            quality = quality.saturating_sub(step).max(floor);
        }

        let (w, h) = (img.width() * 3 / 4, img.height() * 3 / 4);
        if w < MIN_SIDE || h < MIN_SIDE {
            return Err(TransformError::OverBudget {
                budget: config.max_bytes,
            });
        }
        img = img.resize_exact(w, h, FilterType::Triangle);
    }
}
