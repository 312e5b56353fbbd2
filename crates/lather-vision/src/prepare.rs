//! Decode, downscale and compress a photo for upload.

use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use lather_config::ImageConfig;

use crate::error::ClassifierError;

pub const JPEG_MEDIA_TYPE: &str = "image/jpeg";

/// Size limits applied before upload. Qualities are JPEG percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLimits {
    pub max_dimension: u32,
    pub max_bytes: usize,
    pub initial_quality: u8,
    pub quality_step: u8,
    pub min_quality: u8,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self::from(&ImageConfig::default())
    }
}

impl From<&ImageConfig> for ImageLimits {
    fn from(config: &ImageConfig) -> Self {
        Self {
            max_dimension: config.max_dimension,
            max_bytes: config.max_bytes,
            initial_quality: config.initial_quality,
            quality_step: config.quality_step,
            min_quality: config.min_quality,
        }
    }
}

/// A photo ready to send.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    /// Encoded JPEG bytes.
    pub bytes: Vec<u8>,
    pub media_type: &'static str,
    pub width: u32,
    pub height: u32,
    /// JPEG quality the bytes were encoded at.
    pub quality: u8,
}

impl PreparedImage {
    #[must_use]
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }

    /// True if the payload fits `limits.max_bytes`.
    #[must_use]
    pub fn fits(&self, limits: &ImageLimits) -> bool {
        self.bytes.len() <= limits.max_bytes
    }
}

/// Decode `raw`, downscale it to `limits.max_dimension`, and encode it as a
/// JPEG no larger than `limits.max_bytes`.
///
/// Quality starts at `initial_quality` and drops by `quality_step` while the
/// payload is over budget. At `min_quality` the search stops and the last
/// encoding is returned even if it is still over budget.
///
/// # Errors
///
/// Returns [`ClassifierError::InvalidImage`] if `raw` is not a decodable
/// image, or [`ClassifierError::Encode`] if JPEG encoding fails.
pub fn prepare(raw: &[u8], limits: &ImageLimits) -> Result<PreparedImage, ClassifierError> {
    let decoded = image::load_from_memory(raw).map_err(|error| {
        tracing::debug!(%error, len = raw.len(), "photo decode failed");
        ClassifierError::InvalidImage
    })?;

    let resized = downscale(decoded, limits.max_dimension);
    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
    let (width, height) = rgb.dimensions();

    let mut quality = limits.initial_quality.clamp(1, 100);
    let floor = limits.min_quality.clamp(1, quality);
    loop {
        let bytes = encode_jpeg(&rgb, quality)?;
        if bytes.len() <= limits.max_bytes || quality <= floor {
            tracing::debug!(
                width,
                height,
                quality,
                size = bytes.len(),
                budget = limits.max_bytes,
                "photo compressed"
            );
            return Ok(PreparedImage {
                bytes,
                media_type: JPEG_MEDIA_TYPE,
                width,
                height,
                quality,
            });
        }
        quality = quality.saturating_sub(limits.quality_step.max(1)).max(floor);
    }
}

/// Shrink so the longest side is at most `max_dimension`, keeping the aspect
/// ratio. Images already within bounds pass through untouched.
fn downscale(image: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    if width <= max_dimension && height <= max_dimension {
        return image;
    }
    image.resize(max_dimension, max_dimension, FilterType::Triangle)
}

fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, ClassifierError> {
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    image
        .write_with_encoder(encoder)
        .map_err(|e| ClassifierError::Encode(e.to_string()))?;
    Ok(out)
}
