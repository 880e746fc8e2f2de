//! Optional image assets embedded in rendered contracts.
//!
//! Assets are decoded once at startup, flattened onto a white background
//! (PDF image XObjects carry no alpha here), and scaled at draw time
//! preserving the source aspect ratio. A missing or undecodable file is
//! logged and skipped -- the contract still renders without it.

use image::{DynamicImage, Rgb, RgbImage};
use image::codecs::jpeg::JpegEncoder;
use prestito_types::config::AssetPaths;
use prestito_types::error::RenderError;

use std::path::Path;

/// JPEG quality for embedded images.
const JPEG_QUALITY: u8 = 90;

/// A decoded, flattened image asset.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    rgb: RgbImage,
}

impl ImageAsset {
    /// Decode an image file and flatten any alpha channel onto white.
    pub fn open(path: &Path) -> Result<Self, image::ImageError> {
        let decoded = image::open(path)?;
        Ok(Self::from_dynamic(decoded))
    }

    /// Build an asset directly from pixels (test fixtures).
    #[cfg(test)]
    pub(crate) fn from_rgb(rgb: RgbImage) -> Self {
        Self { rgb }
    }

    fn from_dynamic(decoded: DynamicImage) -> Self {
        let rgba = decoded.to_rgba8();
        let mut rgb = RgbImage::new(rgba.width(), rgba.height());
        for (x, y, pixel) in rgba.enumerate_pixels() {
            let alpha = pixel[3] as u16;
            let blend = |channel: u8| -> u8 {
                ((channel as u16 * alpha + 255 * (255 - alpha)) / 255) as u8
            };
            rgb.put_pixel(x, y, Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
        }
        Self { rgb }
    }

    /// Load an optional asset; a missing path or a decode failure yields
    /// `None` with a warning, never an error.
    pub fn load_optional(path: Option<&Path>) -> Option<Self> {
        let path = path?;
        match Self::open(path) {
            Ok(asset) => Some(asset),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable image asset");
                None
            }
        }
    }

    pub fn width_px(&self) -> u32 {
        self.rgb.width()
    }

    pub fn height_px(&self) -> u32 {
        self.rgb.height()
    }

    /// Target size in points for a given height, width following the
    /// source aspect ratio.
    pub fn scaled_to_height(&self, height: f32) -> (f32, f32) {
        let aspect = self.rgb.width() as f32 / self.rgb.height() as f32;
        (height * aspect, height)
    }

    /// Target size in points for a given width, height following the
    /// source aspect ratio.
    pub fn scaled_to_width(&self, width: f32) -> (f32, f32) {
        let aspect = self.rgb.height() as f32 / self.rgb.width() as f32;
        (width, width * aspect)
    }

    /// Encode as baseline JPEG for embedding as a DCTDecode stream.
    pub fn to_jpeg(&self) -> Result<Vec<u8>, RenderError> {
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY)
            .encode(
                self.rgb.as_raw(),
                self.rgb.width(),
                self.rgb.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| RenderError::ImageEncoding(e.to_string()))?;
        Ok(bytes)
    }
}

/// The three optional assets a contract can embed.
#[derive(Debug, Clone, Default)]
pub struct ContractAssets {
    /// Drawn in the top band of every page.
    pub logo: Option<ImageAsset>,
    /// Placed on the lender signature line.
    pub signature: Option<ImageAsset>,
    /// Placed near the right edge of the lender signature line.
    pub stamp: Option<ImageAsset>,
}

impl ContractAssets {
    /// Load whatever subset of the configured assets is actually present.
    pub fn load(paths: &AssetPaths) -> Self {
        Self {
            logo: ImageAsset::load_optional(paths.logo.as_deref()),
            signature: ImageAsset::load_optional(paths.signature.as_deref()),
            stamp: ImageAsset::load_optional(paths.stamp.as_deref()),
        }
    }

    /// No assets at all; every image is skipped at draw time.
    pub fn none() -> Self {
        Self::default()
    }
}
