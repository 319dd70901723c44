// SPDX-License-Identifier: GPL-3.0-or-later
// src/engine/compose.rs
//
// Compositor: lay out all panels on one canvas, draw per-cell borders and
// render captions on top.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{imageops, DynamicImage, GenericImageView, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use log::{debug, warn};

use crate::constant::{
    CAPTION_BOTTOM_MARGIN_FACTOR, CAPTION_FONT_HEIGHT_FACTOR, CAPTION_MAX_HEIGHT_FACTOR,
    CAPTION_MIN_FONT_SIZE, CAPTION_PADDING_FACTOR, CAPTION_STROKE_FACTOR, CELL_BORDER_WIDTH,
};
use crate::error::{EngineError, EngineResult};
use crate::model::Panel;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Width of one font8x8 glyph cell in pixels before scaling.
const GLYPH_CELL: u32 = 8;

/// Compose all panels into one image.
///
/// Column widths are the maximum image width in each column, row heights the
/// maximum image height in each row; cells tile the canvas without overlap.
/// Images are anchored at their cell's top-left corner and never stretched,
/// so a smaller image leaves white margin inside its cell. Each occupied
/// cell gets a black border, and non-blank captions are rendered last so
/// they always sit on top.
///
/// Returns `None` when there is nothing to draw; any internal failure is
/// logged and also degrades to `None` rather than reaching the caller.
pub fn combine(panels: &[Panel], rows: usize, columns: usize) -> Option<DynamicImage> {
    match try_combine(panels, rows, columns) {
        Ok(image) => Some(image),
        Err(err) => {
            warn!("combine produced no output: {err}");
            None
        }
    }
}

/// Fallible variant of [`combine`] for callers that want to display why
/// nothing was drawn.
pub fn try_combine(panels: &[Panel], rows: usize, columns: usize) -> EngineResult<DynamicImage> {
    if panels.is_empty() || panels.iter().all(|p| p.image.is_none()) {
        return Err(EngineError::EmptyResult("no panel has an image".into()));
    }
    if rows == 0 || columns == 0 {
        return Err(EngineError::Configuration(format!(
            "cannot compose a {rows}x{columns} grid"
        )));
    }
    if panels.iter().any(|p| p.row >= rows || p.column >= columns) {
        return Err(EngineError::Configuration(
            "panel coordinates exceed the grid".into(),
        ));
    }

    let layout = GridLayout::measure(panels, rows, columns)?;
    debug!(
        "composing {}x{} grid onto a {}x{} canvas",
        rows, columns, layout.total_width, layout.total_height
    );

    let mut canvas = RgbaImage::from_pixel(layout.total_width, layout.total_height, WHITE);

    for panel in panels {
        let Some(ref image) = panel.image else {
            continue;
        };
        let cell = layout.cell(panel.row, panel.column);

        // Native size, anchored top-left; the cell border marks the full box.
        imageops::overlay(&mut canvas, &image.to_rgba8(), i64::from(cell.x), i64::from(cell.y));
        draw_cell_border(&mut canvas, &cell);

        if !panel.caption.trim().is_empty() {
            render_caption(&mut canvas, &panel.caption, &cell);
        }
    }

    Ok(DynamicImage::ImageRgba8(canvas))
}

/// Pixel-space box of one grid cell.
#[derive(Debug, Clone, Copy)]
struct CellBox {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

/// Measured pixel layout of the whole grid.
struct GridLayout {
    column_widths: Vec<u32>,
    row_heights: Vec<u32>,
    x_offsets: Vec<u32>,
    y_offsets: Vec<u32>,
    total_width: u32,
    total_height: u32,
}

impl GridLayout {
    fn measure(panels: &[Panel], rows: usize, columns: usize) -> EngineResult<Self> {
        let mut column_widths = vec![0u32; columns];
        let mut row_heights = vec![0u32; rows];

        for panel in panels {
            if let Some(ref image) = panel.image {
                let (w, h) = image.dimensions();
                column_widths[panel.column] = column_widths[panel.column].max(w);
                row_heights[panel.row] = row_heights[panel.row].max(h);
            }
        }

        let total_width: u32 = column_widths.iter().sum();
        let total_height: u32 = row_heights.iter().sum();
        if total_width == 0 || total_height == 0 {
            return Err(EngineError::EmptyResult(format!(
                "canvas would be {total_width}x{total_height}"
            )));
        }

        let mut x_offsets = vec![0u32; columns];
        for c in 1..columns {
            x_offsets[c] = x_offsets[c - 1] + column_widths[c - 1];
        }
        let mut y_offsets = vec![0u32; rows];
        for r in 1..rows {
            y_offsets[r] = y_offsets[r - 1] + row_heights[r - 1];
        }

        Ok(Self {
            column_widths,
            row_heights,
            x_offsets,
            y_offsets,
            total_width,
            total_height,
        })
    }

    fn cell(&self, row: usize, column: usize) -> CellBox {
        CellBox {
            x: self.x_offsets[column],
            y: self.y_offsets[row],
            width: self.column_widths[column],
            height: self.row_heights[row],
        }
    }
}

/// Draw a `CELL_BORDER_WIDTH` black outline around the full cell box.
fn draw_cell_border(canvas: &mut RgbaImage, cell: &CellBox) {
    for inset in 0..CELL_BORDER_WIDTH {
        if cell.width <= inset * 2 || cell.height <= inset * 2 {
            break;
        }
        let rect = Rect::at((cell.x + inset) as i32, (cell.y + inset) as i32)
            .of_size(cell.width - inset * 2, cell.height - inset * 2);
        draw_hollow_rect_mut(canvas, rect, BLACK);
    }
}

/// Render a caption near the bottom of a cell: white glyphs over a black
/// outline, horizontally centered, truncated with an ellipsis when it would
/// overflow the cell.
fn render_caption(canvas: &mut RgbaImage, caption: &str, cell: &CellBox) {
    let cell_w = f64::from(cell.width);
    let cell_h = f64::from(cell.height);

    let font_size = CAPTION_MIN_FONT_SIZE.max(cell_h * CAPTION_FONT_HEIGHT_FACTOR);
    let padding = cell_w * CAPTION_PADDING_FACTOR;
    let bottom_margin = font_size * CAPTION_BOTTOM_MARGIN_FACTOR;
    let max_text_width = cell_w - padding;
    let max_text_height = cell_h * CAPTION_MAX_HEIGHT_FACTOR;

    // Bitmap glyphs come in 8x8 cells; pick the integer scale closest to the
    // requested font size that still fits the height budget.
    let mut glyph_scale = (font_size / f64::from(GLYPH_CELL)).round().max(1.0) as u32;
    let max_scale = (max_text_height / f64::from(GLYPH_CELL)).floor() as u32;
    if max_scale >= 1 {
        glyph_scale = glyph_scale.min(max_scale);
    }

    let char_width = GLYPH_CELL * glyph_scale;
    let text = truncate_with_ellipsis(caption.trim(), max_text_width, char_width);
    if text.is_empty() {
        return;
    }

    let text_width = char_width * text.chars().count() as u32;
    let text_height = GLYPH_CELL * glyph_scale;
    let text_x = f64::from(cell.x) + (cell_w - f64::from(text_width)) / 2.0;
    let text_y = f64::from(cell.y) + cell_h - f64::from(text_height) - bottom_margin;

    let x = text_x.round() as i64;
    let y = text_y.round() as i64;

    // Outline pass: draw the glyphs in black offset over a small disk, then
    // fill white on top. Reads as a stroked glyph at raster resolution.
    let stroke = (font_size * CAPTION_STROKE_FACTOR).round().max(1.0) as i64;
    for dx in -stroke..=stroke {
        for dy in -stroke..=stroke {
            if dx == 0 && dy == 0 {
                continue;
            }
            if dx * dx + dy * dy > stroke * stroke {
                continue;
            }
            draw_bitmap_text(canvas, x + dx, y + dy, &text, BLACK, glyph_scale);
        }
    }
    draw_bitmap_text(canvas, x, y, &text, WHITE, glyph_scale);
}

/// Shorten `text` so it fits in `max_width` pixels at `char_width` pixels
/// per glyph, appending `...` when anything was cut.
fn truncate_with_ellipsis(text: &str, max_width: f64, char_width: u32) -> String {
    let max_chars = (max_width / f64::from(char_width)).floor().max(0.0) as usize;
    let len = text.chars().count();
    if len <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        // Too narrow for any text plus an ellipsis; keep the cut visible.
        return ".".repeat(max_chars);
    }
    let mut out: String = text.chars().take(max_chars - 3).collect();
    out.push_str("...");
    out
}

/// Blit scaled 8x8 bitmap glyphs onto the canvas, clipping at the edges.
fn draw_bitmap_text(canvas: &mut RgbaImage, x: i64, y: i64, text: &str, color: Rgba<u8>, scale: u32) {
    let scale = i64::from(scale.max(1));
    let (canvas_w, canvas_h) = (i64::from(canvas.width()), i64::from(canvas.height()));
    let mut cursor_x = x;

    for ch in text.chars() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            cursor_x += GLYPH_CELL as i64 * scale;
            continue;
        };
        for (row_idx, row_bits) in glyph.iter().enumerate() {
            for col_idx in 0..8i64 {
                if (*row_bits >> col_idx) & 1 == 0 {
                    continue;
                }
                let px = cursor_x + col_idx * scale;
                let py = y + row_idx as i64 * scale;
                for sy in 0..scale {
                    for sx in 0..scale {
                        let (tx, ty) = (px + sx, py + sy);
                        if tx >= 0 && ty >= 0 && tx < canvas_w && ty < canvas_h {
                            canvas.put_pixel(tx as u32, ty as u32, color);
                        }
                    }
                }
            }
        }
        cursor_x += GLYPH_CELL as i64 * scale;
    }
}
