// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Engine constants that should not be changed by the user.

/// Default number of grid rows.
pub const DEFAULT_ROWS: usize = 2;

/// Default number of grid columns.
pub const DEFAULT_COLUMNS: usize = 2;

/// Default advisory output width in pixels.
pub const DEFAULT_OUTPUT_WIDTH: u32 = 1920;

/// Default advisory output height in pixels.
pub const DEFAULT_OUTPUT_HEIGHT: u32 = 1080;

/// Largest pixel dimension before an image counts as "too large".
pub const MAX_IMAGE_DIMENSION: u32 = 4000;

/// Width of the black border drawn around each composed cell.
pub const CELL_BORDER_WIDTH: u32 = 2;

/// Default JPEG quality when the caller does not specify one.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Oversampling factor for the high-quality resize path.
pub const OVERSAMPLE_FACTOR: u32 = 2;

/// Minimum caption font size in pixels.
pub const CAPTION_MIN_FONT_SIZE: f64 = 20.0;

/// Caption font size as a fraction of the cell height.
pub const CAPTION_FONT_HEIGHT_FACTOR: f64 = 0.09;

/// Horizontal caption padding as a fraction of the cell width.
pub const CAPTION_PADDING_FACTOR: f64 = 0.05;

/// Caption bottom margin as a fraction of the font size.
pub const CAPTION_BOTTOM_MARGIN_FACTOR: f64 = 0.4;

/// Maximum caption height as a fraction of the cell height.
pub const CAPTION_MAX_HEIGHT_FACTOR: f64 = 0.4;

/// Caption outline stroke width as a fraction of the font size.
pub const CAPTION_STROKE_FACTOR: f64 = 0.08;
