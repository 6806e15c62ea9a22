//! Surface encoding and export.

use crate::rendering::Surface;
use crate::{Error, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed JPEG quality so the same surface always encodes to the same bytes.
const JPEG_QUALITY: u8 = 90;

/// Supported export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    /// File extension for the suggested filename.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            other => Err(Error::Config(format!("Unknown export format {:?}", other))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// An encoded card ready to hand to whatever persists it.
#[derive(Debug, Clone)]
pub struct CardExport {
    /// Suggested filename, `{title}-social-image.{ext}`
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Encode a surface as PNG or JPEG bytes.
///
/// Deterministic for a given surface and format. An empty surface is an
/// [`Error::Export`]; the caller must render before exporting.
pub fn export(surface: &Surface, format: ExportFormat) -> Result<Vec<u8>> {
    let (w, h) = (surface.width(), surface.height());
    if w == 0 || h == 0 {
        return Err(Error::Export("nothing rendered yet".to_string()));
    }

    let mut out = Vec::new();
    match format {
        ExportFormat::Png => PngEncoder::new(&mut out)
            .write_image(surface.pixels().as_raw(), w, h, ColorType::Rgba8)
            .map_err(|e| Error::Export(format!("PNG encoding failed: {}", e)))?,
        ExportFormat::Jpeg => {
            // JPEG has no alpha channel; surfaces are opaque by
            // construction so dropping it is lossless
            let rgb = image::DynamicImage::ImageRgba8(surface.pixels().clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
                .encode(rgb.as_raw(), w, h, ColorType::Rgb8)
                .map_err(|e| Error::Export(format!("JPEG encoding failed: {}", e)))?;
        }
    }
    Ok(out)
}

/// Suggested download filename for a card.
pub fn suggested_filename(title: &str, format: ExportFormat) -> String {
    format!("{}-social-image.{}", title, format.extension())
}
