//! Embedded bitmap text rasterization.
//!
//! Cards must render byte-identically on every machine, so text comes from
//! a bundled 5×7 monospace face instead of a system font lookup. Each glyph
//! is five column bytes (bit 0 = top row); drawing scales the glyph cell to
//! the requested pixel size with nearest-neighbour sampling. Bold is a
//! one-glyph-pixel double strike, the classic bitmap-font emboldening.
//!
//! Metrics: the em box is 8 rows tall (7 glyph rows + 1 of leading) and 6
//! columns wide (5 glyph columns + 1 of tracking). A "font size" of N pixels
//! scales the em box to N; the baseline sits at row 7, so the ascent is
//! 7/8 of the size.

use super::Surface;
use crate::color::Color;

/// Glyph cell height in rows, including leading.
const CELL_ROWS: f32 = 8.0;
/// Glyph cell width in columns, including tracking.
const CELL_COLS: f32 = 6.0;
/// Baseline row within the cell.
const BASELINE_ROW: f32 = 7.0;

/// Classic 5×7 column-bitmap face for printable ASCII (32..=126).
/// Bytes are columns, least-significant bit at the top.
#[rustfmt::skip]
const GLYPHS: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5f, 0x00, 0x00], // '!'
    [0x00, 0x07, 0x00, 0x07, 0x00], // '"'
    [0x14, 0x7f, 0x14, 0x7f, 0x14], // '#'
    [0x24, 0x2a, 0x7f, 0x2a, 0x12], // '$'
    [0x23, 0x13, 0x08, 0x64, 0x62], // '%'
    [0x36, 0x49, 0x55, 0x22, 0x50], // '&'
    [0x00, 0x05, 0x03, 0x00, 0x00], // '\''
    [0x00, 0x1c, 0x22, 0x41, 0x00], // '('
    [0x00, 0x41, 0x22, 0x1c, 0x00], // ')'
    [0x14, 0x08, 0x3e, 0x08, 0x14], // '*'
    [0x08, 0x08, 0x3e, 0x08, 0x08], // '+'
    [0x00, 0x50, 0x30, 0x00, 0x00], // ','
    [0x08, 0x08, 0x08, 0x08, 0x08], // '-'
    [0x00, 0x60, 0x60, 0x00, 0x00], // '.'
    [0x20, 0x10, 0x08, 0x04, 0x02], // '/'
    [0x3e, 0x51, 0x49, 0x45, 0x3e], // '0'
    [0x00, 0x42, 0x7f, 0x40, 0x00], // '1'
    [0x42, 0x61, 0x51, 0x49, 0x46], // '2'
    [0x21, 0x41, 0x45, 0x4b, 0x31], // '3'
    [0x18, 0x14, 0x12, 0x7f, 0x10], // '4'
    [0x27, 0x45, 0x45, 0x45, 0x39], // '5'
    [0x3c, 0x4a, 0x49, 0x49, 0x30], // '6'
    [0x01, 0x71, 0x09, 0x05, 0x03], // '7'
    [0x36, 0x49, 0x49, 0x49, 0x36], // '8'
    [0x06, 0x49, 0x49, 0x29, 0x1e], // '9'
    [0x00, 0x36, 0x36, 0x00, 0x00], // ':'
    [0x00, 0x56, 0x36, 0x00, 0x00], // ';'
    [0x08, 0x14, 0x22, 0x41, 0x00], // '<'
    [0x14, 0x14, 0x14, 0x14, 0x14], // '='
    [0x00, 0x41, 0x22, 0x14, 0x08], // '>'
    [0x02, 0x01, 0x51, 0x09, 0x06], // '?'
    [0x32, 0x49, 0x79, 0x41, 0x3e], // '@'
    [0x7e, 0x11, 0x11, 0x11, 0x7e], // 'A'
    [0x7f, 0x49, 0x49, 0x49, 0x36], // 'B'
    [0x3e, 0x41, 0x41, 0x41, 0x22], // 'C'
    [0x7f, 0x41, 0x41, 0x22, 0x1c], // 'D'
    [0x7f, 0x49, 0x49, 0x49, 0x41], // 'E'
    [0x7f, 0x09, 0x09, 0x09, 0x01], // 'F'
    [0x3e, 0x41, 0x49, 0x49, 0x7a], // 'G'
    [0x7f, 0x08, 0x08, 0x08, 0x7f], // 'H'
    [0x00, 0x41, 0x7f, 0x41, 0x00], // 'I'
    [0x20, 0x40, 0x41, 0x3f, 0x01], // 'J'
    [0x7f, 0x08, 0x14, 0x22, 0x41], // 'K'
    [0x7f, 0x40, 0x40, 0x40, 0x40], // 'L'
    [0x7f, 0x02, 0x0c, 0x02, 0x7f], // 'M'
    [0x7f, 0x04, 0x08, 0x10, 0x7f], // 'N'
    [0x3e, 0x41, 0x41, 0x41, 0x3e], // 'O'
    [0x7f, 0x09, 0x09, 0x09, 0x06], // 'P'
    [0x3e, 0x41, 0x51, 0x21, 0x5e], // 'Q'
    [0x7f, 0x09, 0x19, 0x29, 0x46], // 'R'
    [0x46, 0x49, 0x49, 0x49, 0x31], // 'S'
    [0x01, 0x01, 0x7f, 0x01, 0x01], // 'T'
    [0x3f, 0x40, 0x40, 0x40, 0x3f], // 'U'
    [0x1f, 0x20, 0x40, 0x20, 0x1f], // 'V'
    [0x3f, 0x40, 0x38, 0x40, 0x3f], // 'W'
    [0x63, 0x14, 0x08, 0x14, 0x63], // 'X'
    [0x07, 0x08, 0x70, 0x08, 0x07], // 'Y'
    [0x61, 0x51, 0x49, 0x45, 0x43], // 'Z'
    [0x00, 0x7f, 0x41, 0x41, 0x00], // '['
    [0x02, 0x04, 0x08, 0x10, 0x20], // '\\'
    [0x00, 0x41, 0x41, 0x7f, 0x00], // ']'
    [0x04, 0x02, 0x01, 0x02, 0x04], // '^'
    [0x40, 0x40, 0x40, 0x40, 0x40], // '_'
    [0x00, 0x01, 0x02, 0x04, 0x00], // '`'
    [0x20, 0x54, 0x54, 0x54, 0x78], // 'a'
    [0x7f, 0x48, 0x44, 0x44, 0x38], // 'b'
    [0x38, 0x44, 0x44, 0x44, 0x20], // 'c'
    [0x38, 0x44, 0x44, 0x48, 0x7f], // 'd'
    [0x38, 0x54, 0x54, 0x54, 0x18], // 'e'
    [0x08, 0x7e, 0x09, 0x01, 0x02], // 'f'
    [0x0c, 0x52, 0x52, 0x52, 0x3e], // 'g'
    [0x7f, 0x08, 0x04, 0x04, 0x78], // 'h'
    [0x00, 0x44, 0x7d, 0x40, 0x00], // 'i'
    [0x20, 0x40, 0x44, 0x3d, 0x00], // 'j'
    [0x7f, 0x10, 0x28, 0x44, 0x00], // 'k'
    [0x00, 0x41, 0x7f, 0x40, 0x00], // 'l'
    [0x7c, 0x04, 0x18, 0x04, 0x78], // 'm'
    [0x7c, 0x08, 0x04, 0x04, 0x78], // 'n'
    [0x38, 0x44, 0x44, 0x44, 0x38], // 'o'
    [0x7c, 0x14, 0x14, 0x14, 0x08], // 'p'
    [0x08, 0x14, 0x14, 0x18, 0x7c], // 'q'
    [0x7c, 0x08, 0x04, 0x04, 0x08], // 'r'
    [0x48, 0x54, 0x54, 0x54, 0x20], // 's'
    [0x04, 0x3f, 0x44, 0x40, 0x20], // 't'
    [0x3c, 0x40, 0x40, 0x20, 0x7c], // 'u'
    [0x1c, 0x20, 0x40, 0x20, 0x1c], // 'v'
    [0x3c, 0x40, 0x30, 0x40, 0x3c], // 'w'
    [0x44, 0x28, 0x10, 0x28, 0x44], // 'x'
    [0x0c, 0x50, 0x50, 0x50, 0x3c], // 'y'
    [0x44, 0x64, 0x54, 0x4c, 0x44], // 'z'
    [0x00, 0x08, 0x36, 0x41, 0x00], // '{'
    [0x00, 0x00, 0x7f, 0x00, 0x00], // '|'
    [0x00, 0x41, 0x36, 0x08, 0x00], // '}'
    [0x08, 0x08, 0x2a, 0x1c, 0x08], // '~'
];

fn glyph(c: char) -> &'static [u8; 5] {
    let idx = (c as usize).wrapping_sub(32);
    if idx < GLYPHS.len() {
        &GLYPHS[idx]
    } else {
        // Non-ASCII falls back to '?'
        &GLYPHS['?' as usize - 32]
    }
}

/// Whether the glyph grid has a lit sample at (col, row) for `c`.
/// `bold` ORs each column with its left neighbour, thickening strokes by
/// one glyph pixel.
fn sample(c: char, col: i32, row: i32, bold: bool) -> bool {
    if !(0..7).contains(&row) || !(0..5).contains(&col) {
        return false;
    }
    let g = glyph(c);
    let mut bits = g[col as usize];
    if bold && col > 0 {
        bits |= g[col as usize - 1];
    }
    bits >> row & 1 == 1
}

/// Advance width in pixels of one character at `size_px`.
pub fn char_advance(size_px: u32) -> f32 {
    size_px as f32 * CELL_COLS / CELL_ROWS
}

/// Total width in pixels of `text` at `size_px`.
pub fn measure(text: &str, size_px: u32) -> f32 {
    text.chars().count() as f32 * char_advance(size_px)
}

/// Draw `text` centered horizontally on `center_x`, with its baseline at
/// `baseline_y`, at `size_px` tall. Whitespace-only text draws nothing.
/// No wrapping or truncation: long text extends past the surface bounds
/// and is clipped per pixel.
pub fn draw_text(
    surface: &mut Surface,
    text: &str,
    center_x: f32,
    baseline_y: f32,
    size_px: u32,
    color: Color,
    bold: bool,
) {
    if text.trim().is_empty() {
        return;
    }

    let scale = size_px as f32 / CELL_ROWS;
    let advance = char_advance(size_px);
    let origin_x = center_x - measure(text, size_px) / 2.0;
    let top = baseline_y - BASELINE_ROW * scale;

    let cell_w = advance.ceil() as i32;
    let cell_h = (CELL_ROWS * scale).ceil() as i32;

    for (i, c) in text.chars().enumerate() {
        let cell_x = origin_x + i as f32 * advance;
        for py in 0..cell_h {
            for px in 0..cell_w {
                // Nearest-neighbour back-mapping into the glyph grid
                let col = ((px as f32 + 0.5) / scale).floor() as i32;
                let row = ((py as f32 + 0.5) / scale).floor() as i32;
                if sample(c, col, row, bold) {
                    let x = (cell_x + px as f32).floor() as i64;
                    let y = (top + py as f32).floor() as i64;
                    surface.blend_pixel(x, y, color, 1.0);
                }
            }
        }
    }
}
