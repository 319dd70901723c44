// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// Grid configuration: row/column counts, ratio weights, output size.

use crate::constant::{
    DEFAULT_COLUMNS, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_ROWS,
};
use crate::error::{EngineError, EngineResult};

/// Grid layout configuration.
///
/// Invariant: `column_ratios.len() == columns` and `row_ratios.len() == rows`
/// at all times. The fields are private and every setter replaces a count and
/// its ratio sequence together, so a caller can never observe the two out of
/// step (not even transiently, e.g. mid ratio-string edit).
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfiguration {
    rows: usize,
    columns: usize,
    column_ratios: Vec<f64>,
    row_ratios: Vec<f64>,
    output_width: u32,
    output_height: u32,
    maintain_aspect_ratio: bool,
}

impl Default for GridConfiguration {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            column_ratios: vec![1.0; DEFAULT_COLUMNS],
            row_ratios: vec![1.0; DEFAULT_ROWS],
            output_width: DEFAULT_OUTPUT_WIDTH,
            output_height: DEFAULT_OUTPUT_HEIGHT,
            maintain_aspect_ratio: true,
        }
    }
}

impl GridConfiguration {
    /// Create a configuration with the given counts and uniform 1.0 ratios.
    ///
    /// Counts of zero are rejected.
    pub fn new(rows: usize, columns: usize) -> EngineResult<Self> {
        if rows == 0 || columns == 0 {
            return Err(EngineError::Configuration(format!(
                "rows and columns must be at least 1, got {rows}x{columns}"
            )));
        }
        Ok(Self {
            rows,
            columns,
            column_ratios: vec![1.0; columns],
            row_ratios: vec![1.0; rows],
            ..Self::default()
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn row_ratios(&self) -> &[f64] {
        &self.row_ratios
    }

    pub fn column_ratios(&self) -> &[f64] {
        &self.column_ratios
    }

    pub fn output_width(&self) -> u32 {
        self.output_width
    }

    pub fn output_height(&self) -> u32 {
        self.output_height
    }

    pub fn maintain_aspect_ratio(&self) -> bool {
        self.maintain_aspect_ratio
    }

    /// Set the row count, regenerating the row ratios as `rows` entries of 1.0.
    pub fn set_rows(&mut self, rows: usize) -> EngineResult<()> {
        if rows == 0 {
            return Err(EngineError::Configuration(
                "row count must be at least 1".into(),
            ));
        }
        self.rows = rows;
        self.row_ratios = vec![1.0; rows];
        Ok(())
    }

    /// Set the column count, regenerating the column ratios as uniform 1.0.
    pub fn set_columns(&mut self, columns: usize) -> EngineResult<()> {
        if columns == 0 {
            return Err(EngineError::Configuration(
                "column count must be at least 1".into(),
            ));
        }
        self.columns = columns;
        self.column_ratios = vec![1.0; columns];
        Ok(())
    }

    /// Reset both axes to uniform 1.0 weights, keeping the current counts.
    pub fn set_equal_ratios(&mut self) {
        self.column_ratios = vec![1.0; self.columns];
        self.row_ratios = vec![1.0; self.rows];
    }

    /// Parse a colon-delimited ratio string (e.g. `"1:2:1"`) into column
    /// weights. The column count follows the parsed length. On parse failure
    /// the previous ratios and count are left untouched.
    pub fn set_width_ratio_text(&mut self, text: &str) -> EngineResult<()> {
        let ratios = parse_ratio_text(text)?;
        self.columns = ratios.len();
        self.column_ratios = ratios;
        Ok(())
    }

    /// Parse a colon-delimited ratio string into row weights. The row count
    /// follows the parsed length; no partial apply on failure.
    pub fn set_height_ratio_text(&mut self, text: &str) -> EngineResult<()> {
        let ratios = parse_ratio_text(text)?;
        self.rows = ratios.len();
        self.row_ratios = ratios;
        Ok(())
    }

    /// Column weights rendered as a colon-joined string with one decimal.
    pub fn width_ratio_text(&self) -> String {
        join_ratio_text(&self.column_ratios)
    }

    /// Row weights rendered as a colon-joined string with one decimal.
    pub fn height_ratio_text(&self) -> String {
        join_ratio_text(&self.row_ratios)
    }

    /// Set the advisory output dimensions. Zero dimensions are rejected.
    pub fn set_output_size(&mut self, width: u32, height: u32) -> EngineResult<()> {
        if width == 0 || height == 0 {
            return Err(EngineError::Configuration(format!(
                "output size must be positive, got {width}x{height}"
            )));
        }
        self.output_width = width;
        self.output_height = height;
        Ok(())
    }

    pub fn set_maintain_aspect_ratio(&mut self, maintain: bool) {
        self.maintain_aspect_ratio = maintain;
    }

    /// Output aspect ratio, width over height.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.output_width) / f64::from(self.output_height)
    }

    /// Human-readable aspect ratio, e.g. `"1920:1080 (1.78)"`.
    ///
    /// Recomputed on read; there is no cached text to keep in sync.
    pub fn aspect_ratio_text(&self) -> String {
        format!(
            "{}:{} ({:.2})",
            self.output_width,
            self.output_height,
            self.aspect_ratio()
        )
    }
}

fn parse_ratio_text(text: &str) -> EngineResult<Vec<f64>> {
    if text.trim().is_empty() {
        return Err(EngineError::Configuration("empty ratio string".into()));
    }

    let mut ratios = Vec::new();
    for part in text.split(':') {
        let value: f64 = part.trim().parse().map_err(|_| {
            EngineError::Configuration(format!("invalid ratio component: {:?}", part.trim()))
        })?;
        if !value.is_finite() || value <= 0.0 {
            return Err(EngineError::Configuration(format!(
                "ratio components must be positive, got {value}"
            )));
        }
        ratios.push(value);
    }
    Ok(ratios)
}

fn join_ratio_text(ratios: &[f64]) -> String {
    ratios
        .iter()
        .map(|r| format!("{r:.1}"))
        .collect::<Vec<_>>()
        .join(":")
}
