use std::path::Path;

use image::{ColorType, DynamicImage, ImageFormat};

use crate::core::error::{AppError, Result};
use crate::shared::constants::{MIN_IMAGE_DIMENSION, SUPPORTED_CHANNELS};

/// Image handed to the node: a `(height, width, channels)` array of 8-bit
/// samples stored row-major with interleaved channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    shape: Vec<usize>,
    samples: Vec<u8>,
}

impl ImageInput {
    pub fn new(shape: Vec<usize>, samples: Vec<u8>) -> Self {
        Self { shape, samples }
    }

    /// Decode an encoded image (PNG, JPEG, WebP) into 8-bit samples.
    ///
    /// The channel count of the source is kept, so grayscale uploads decode
    /// to 1 or 2 channels and are rejected by `validate`. 16-bit sources are
    /// reduced to 8 bits per sample.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| AppError::Validation(format!("Unreadable image: {}", e)))?;

        Ok(Self::from_dynamic(decoded))
    }

    fn from_dynamic(image: DynamicImage) -> Self {
        let height = image.height() as usize;
        let width = image.width() as usize;

        let color = image.color();
        match (color.has_color(), color.has_alpha()) {
            (true, true) => Self::new(vec![height, width, 4], image.to_rgba8().into_raw()),
            (true, false) => Self::new(vec![height, width, 3], image.to_rgb8().into_raw()),
            (false, true) => Self::new(vec![height, width, 2], image.to_luma_alpha8().into_raw()),
            (false, false) => Self::new(vec![height, width, 1], image.to_luma8().into_raw()),
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Check the image is an RGB/RGBA array of at least 32x32 pixels
    pub fn validate(&self) -> Result<()> {
        let [height, width, channels] = self.shape[..] else {
            return Err(AppError::Validation(format!(
                "Image must be a (height, width, channels) array, got {} dimensions",
                self.shape.len()
            )));
        };

        if !SUPPORTED_CHANNELS.contains(&channels) {
            return Err(AppError::Validation(format!(
                "Image must be RGB or RGBA, got {} channels",
                channels
            )));
        }

        if height < MIN_IMAGE_DIMENSION || width < MIN_IMAGE_DIMENSION {
            return Err(AppError::Validation(format!(
                "Image dimensions too small ({}x{}, minimum {}x{})",
                width, height, MIN_IMAGE_DIMENSION, MIN_IMAGE_DIMENSION
            )));
        }

        let expected = height
            .checked_mul(width)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| AppError::Validation("Image shape is too large".to_string()))?;
        if self.samples.len() != expected {
            return Err(AppError::Validation(format!(
                "Image has {} samples, expected {} for shape {}x{}x{}",
                self.samples.len(),
                expected,
                height,
                width,
                channels
            )));
        }

        Ok(())
    }

    /// Encode as PNG (lossless) at `path`
    pub fn write_png(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let (height, width, channels) = (self.shape[0], self.shape[1], self.shape[2]);

        let width = u32::try_from(width)
            .map_err(|_| AppError::Validation(format!("Image width {} is too large", width)))?;
        let height = u32::try_from(height)
            .map_err(|_| AppError::Validation(format!("Image height {} is too large", height)))?;
        let color = if channels == 4 {
            ColorType::Rgba8
        } else {
            ColorType::Rgb8
        };

        image::save_buffer_with_format(path, &self.samples, width, height, color, ImageFormat::Png)
            .map_err(|e| {
                AppError::Internal(format!(
                    "Failed to save temporary image '{}': {}",
                    path.display(),
                    e
                ))
            })
    }
}
