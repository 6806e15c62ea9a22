//! Cardforge Rendering Engine
//!
//! A deterministic social-card rendering engine: given a parameter set
//! (text, colors, icon geometry, image sources) it resolves the image
//! sources asynchronously, composites the card onto a fixed-size RGBA
//! surface, and exports the result as PNG or JPEG. Identical parameters and
//! resolved assets always produce byte-identical output.
//!
//! # Architecture
//!
//! - **Resolver**: maps a source descriptor (predefined catalog entry,
//!   remote URL, or uploaded data URI) to a decoded raster, with failure
//!   isolation per layer
//! - **Compositor**: paints background, icon, title, subtitle and the
//!   install bar in a fixed order onto a private surface
//! - **Pipeline**: runs resolve-then-compose passes and atomically
//!   publishes only the newest completed surface
//!
//! # Example
//!
//! ```no_run
//! use cardforge::{RenderParams, RenderPipeline, ExportFormat};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = RenderPipeline::new(Default::default())?;
//! let params = RenderParams {
//!     title: "awesome-package".to_string(),
//!     ..Default::default()
//! };
//!
//! pipeline.render(&params).await?;
//! let export = pipeline.export_current(ExportFormat::Png, &params.title)?;
//! std::fs::write(&export.filename, &export.bytes)?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod catalog;
pub mod color;
pub mod export;
pub mod install;
pub mod pipeline;
pub mod rendering;
pub mod resolver;

pub use color::Color;
pub use export::{export, suggested_filename, CardExport, ExportFormat};
pub use install::{install_command, PackageManager};
pub use pipeline::RenderPipeline;
pub use rendering::{compose, ResolvedAssets, Surface};
pub use resolver::{ImageResolver, ImageSource, ResolverConfig, SourceKind};

/// Canvas dimensions in pixels.
///
/// Both axes are bounded to [200, 2000]; [`RenderParams::validate`] enforces
/// the bounds at the parameter boundary so the compositor never sees a
/// degenerate surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        // Standard Open Graph card size
        Self {
            width: 1200,
            height: 630,
        }
    }
}

/// Where the icon sits on the canvas.
///
/// The horizontal and vertical rules are independent: `left`/`right` pin the
/// icon 50px from the edge, anything else centers it on that axis, and the
/// same applies vertically with `top`/`bottom`. Plain `Center` simply takes
/// the centering branch on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconPosition {
    TopCenter,
    TopLeft,
    TopRight,
    BottomCenter,
    BottomLeft,
    BottomRight,
    Center,
}

impl IconPosition {
    /// Icon top-left x for this position.
    pub fn x(self, size_px: u32, canvas_width: u32) -> i64 {
        match self {
            Self::TopLeft | Self::BottomLeft => 50,
            Self::TopRight | Self::BottomRight => canvas_width as i64 - size_px as i64 - 50,
            _ => (canvas_width as i64 - size_px as i64) / 2,
        }
    }

    /// Icon top-left y for this position.
    pub fn y(self, size_px: u32, canvas_height: u32) -> i64 {
        match self {
            Self::TopCenter | Self::TopLeft | Self::TopRight => 50,
            Self::BottomCenter | Self::BottomLeft | Self::BottomRight => {
                canvas_height as i64 - size_px as i64 - 50
            }
            _ => (canvas_height as i64 - size_px as i64) / 2,
        }
    }
}

/// Icon layer parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconParams {
    /// Whether the icon layer is drawn at all
    pub enabled: bool,
    /// Where the icon bytes come from
    pub source: ImageSource,
    /// Edge length in pixels; the icon is drawn as a size × size square
    pub size_px: u32,
    /// Placement on the canvas
    pub position: IconPosition,
}

impl Default for IconParams {
    fn default() -> Self {
        Self {
            enabled: true,
            source: ImageSource {
                kind: SourceKind::Predefined,
                value: catalog::ICONS[0].url.to_string(),
            },
            size_px: 100,
            position: IconPosition::TopCenter,
        }
    }
}

/// The three colors a card is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Title, subtitle and install-command text
    pub text: Color,
    /// Base canvas fill
    pub background: Color,
    /// Install-bar rectangle fill (may carry alpha)
    pub install_bar: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: Color::opaque(0xff, 0xff, 0xff),
            background: Color::opaque(0x1a, 0x20, 0x2c),
            install_bar: Color::new(45, 55, 72, 0.8),
        }
    }
}

/// The full parameter set for one card.
///
/// This is the single source of truth, owned by the editing front-end; the
/// pipeline never mutates it. Any change to it warrants a fresh
/// resolve-then-compose pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    pub canvas: CanvasSize,
    /// Background image source; an empty value means "no background image"
    pub background: ImageSource,
    /// Opacity applied to the background image layer only, in [0, 1]
    pub background_opacity: f32,
    pub icon: IconParams,
    /// Package name, drawn as the card title
    pub title: String,
    /// Short package description, drawn under the title
    pub subtitle: String,
    /// Package manager used for the install command
    pub manager: PackageManager,
    pub colors: Palette,
    /// Title font size in pixels, bounded to [40, 200]
    pub font_size_px: u32,
    /// Export encoding requested by the front-end
    pub format: ExportFormat,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            background: ImageSource {
                kind: SourceKind::Predefined,
                value: catalog::BACKGROUNDS[0].url.to_string(),
            },
            background_opacity: 1.0,
            icon: IconParams::default(),
            title: "awesome-package".to_string(),
            subtitle: "Manage awesome features with customizable options".to_string(),
            manager: PackageManager::Npm,
            colors: Palette::default(),
            font_size_px: 100,
            format: ExportFormat::Png,
        }
    }
}

impl RenderParams {
    /// Check the bounds the editing UI is supposed to enforce.
    ///
    /// A violation here is a programming error in the caller, not a runtime
    /// condition the pipeline recovers from.
    pub fn validate(&self) -> Result<()> {
        let CanvasSize { width, height } = self.canvas;
        if !(200..=2000).contains(&width) || !(200..=2000).contains(&height) {
            return Err(Error::Config(format!(
                "canvas size {}x{} outside [200, 2000]",
                width, height
            )));
        }
        if !(50..=200).contains(&self.icon.size_px) {
            return Err(Error::Config(format!(
                "icon size {} outside [50, 200]",
                self.icon.size_px
            )));
        }
        if !(40..=200).contains(&self.font_size_px) {
            return Err(Error::Config(format!(
                "font size {} outside [40, 200]",
                self.font_size_px
            )));
        }
        if !(0.0..=1.0).contains(&self.background_opacity) {
            return Err(Error::Config(format!(
                "background opacity {} outside [0, 1]",
                self.background_opacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_match_the_stock_card() {
        let params = RenderParams::default();
        assert_eq!(params.canvas.width, 1200);
        assert_eq!(params.canvas.height, 630);
        assert_eq!(params.title, "awesome-package");
        assert_eq!(params.manager, PackageManager::Npm);
        assert_eq!(params.font_size_px, 100);
        assert!(params.icon.enabled);
        assert_eq!(params.icon.position, IconPosition::TopCenter);
        params.validate().expect("defaults are valid");
    }

    #[test]
    fn validate_rejects_out_of_bounds_canvas() {
        let mut params = RenderParams::default();
        params.canvas.width = 100;
        assert!(matches!(params.validate(), Err(Error::Config(_))));

        params.canvas.width = 2001;
        assert!(matches!(params.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn validate_rejects_bad_opacity() {
        let mut params = RenderParams::default();
        params.background_opacity = 1.5;
        assert!(params.validate().is_err());
    }

    #[test]
    fn params_round_trip_through_json() {
        let params = RenderParams::default();
        let json = serde_json::to_string_pretty(&params).unwrap();
        let back: RenderParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let back: RenderParams = serde_json::from_str(r#"{"title": "my-lib"}"#).unwrap();
        assert_eq!(back.title, "my-lib");
        assert_eq!(back.canvas, CanvasSize::default());
    }
}
