//! The layer painter.
//!
//! `compose` is synchronous and pure: identical parameters and resolved
//! assets produce a byte-identical surface. All asset I/O happens upstream
//! in the resolver; absent layers are skipped, never an error.

use super::text;
use super::Surface;
use crate::install::install_command;
use crate::RenderParams;
use image::imageops::{self, FilterType};
use image::DynamicImage;

/// Decoded rasters for the two image layers of one render pass.
///
/// Derived from the parameter set's source descriptors, owned by a single
/// pass, and superseded (not mutated) by the next pass. `None` means "no
/// image for this layer" — either the descriptor was empty or resolution
/// failed and was isolated.
#[derive(Debug, Default)]
pub struct ResolvedAssets {
    pub background: Option<DynamicImage>,
    pub icon: Option<DynamicImage>,
}

/// Vertical distance of the title baseline above canvas center.
const TITLE_RISE: f32 = 50.0;
/// Vertical distance of the subtitle baseline below canvas center.
const SUBTITLE_DROP: f32 = 50.0;
const SUBTITLE_SIZE: u32 = 24;
const BAR_MAX_WIDTH: u32 = 500;
const BAR_HEIGHT: u32 = 50;
const BAR_BOTTOM_MARGIN: u32 = 25;
const BAR_TEXT_SIZE: u32 = 20;
/// Install-command baseline offset from the bar's top edge.
const BAR_TEXT_BASELINE: f32 = 32.0;

/// Paint one card onto a fresh surface.
///
/// Layer order, later layers occluding earlier ones:
/// 1. background color fill
/// 2. background image, stretched to the full canvas, at the configured
///    opacity (scoped to this draw only)
/// 3. icon, stretched to its square, placed by the position rule
/// 4. title (bold, `font_size_px`)
/// 5. subtitle (fixed 24px)
/// 6. install bar and its command text
pub fn compose(params: &RenderParams, assets: &ResolvedAssets) -> Surface {
    let (w, h) = (params.canvas.width, params.canvas.height);
    let mut surface = Surface::new(w, h, params.colors.background);

    if let Some(bg) = &assets.background {
        draw_image_stretched(&mut surface, bg, 0, 0, w, h, params.background_opacity);
    }

    if params.icon.enabled {
        if let Some(icon) = &assets.icon {
            let size = params.icon.size_px;
            let x = params.icon.position.x(size, w);
            let y = params.icon.position.y(size, h);
            draw_image_stretched(&mut surface, icon, x, y, size, size, 1.0);
        }
    }

    let center_x = w as f32 / 2.0;
    let center_y = h as f32 / 2.0;
    text::draw_text(
        &mut surface,
        &params.title,
        center_x,
        center_y - TITLE_RISE,
        params.font_size_px,
        params.colors.text,
        true,
    );
    text::draw_text(
        &mut surface,
        &params.subtitle,
        center_x,
        center_y + SUBTITLE_DROP,
        SUBTITLE_SIZE,
        params.colors.text,
        false,
    );

    let bar_w = BAR_MAX_WIDTH.min(w.saturating_sub(40));
    let bar_x = (w as i64 - bar_w as i64) / 2;
    let bar_y = h as i64 - BAR_HEIGHT as i64 - BAR_BOTTOM_MARGIN as i64;
    surface.fill_rect(bar_x, bar_y, bar_w, BAR_HEIGHT, params.colors.install_bar);

    let command = install_command(&params.manager, &params.title);
    text::draw_text(
        &mut surface,
        &command,
        center_x,
        bar_y as f32 + BAR_TEXT_BASELINE,
        BAR_TEXT_SIZE,
        params.colors.text,
        false,
    );

    surface
}

/// Draw `img` scaled to exactly `width` × `height` at (x, y).
///
/// Scaling stretches: the source aspect ratio is NOT preserved, matching
/// the reference renderer. `opacity` multiplies the source alpha and is
/// scoped to this call; it never leaks into later layers.
fn draw_image_stretched(
    surface: &mut Surface,
    img: &DynamicImage,
    x: i64,
    y: i64,
    width: u32,
    height: u32,
    opacity: f32,
) {
    if width == 0 || height == 0 || opacity <= 0.0 {
        return;
    }
    let scaled = imageops::resize(&img.to_rgba8(), width, height, FilterType::Triangle);
    for (px, py, p) in scaled.enumerate_pixels() {
        let src = crate::Color::new(p.0[0], p.0[1], p.0[2], p.0[3] as f32 / 255.0);
        surface.blend_pixel(x + px as i64, y + py as i64, src, opacity);
    }
}
