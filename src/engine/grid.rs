// SPDX-License-Identifier: GPL-3.0-or-later
// src/engine/grid.rs
//
// Grid geometry: panel construction and normalized ratio spans.

use crate::config::GridConfiguration;
use crate::error::{EngineError, EngineResult};
use crate::model::Panel;

/// One normalized segment of an axis, both values in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    /// Fractional start position along the axis.
    pub start: f64,
    /// Fractional extent of the segment.
    pub span: f64,
}

/// Build one panel per grid cell, in row-major order.
///
/// Each panel copies the ratio weights of its column and row at build time.
/// The order is deterministic so display order is reproducible.
pub fn build_panels(config: &GridConfiguration) -> EngineResult<Vec<Panel>> {
    let rows = config.rows();
    let columns = config.columns();

    // Unreachable through the atomic configuration API, still checked.
    if config.row_ratios().len() != rows || config.column_ratios().len() != columns {
        return Err(EngineError::Configuration(format!(
            "ratio lengths ({}, {}) disagree with counts ({rows}, {columns})",
            config.row_ratios().len(),
            config.column_ratios().len(),
        )));
    }

    let mut panels = Vec::with_capacity(rows * columns);
    for r in 0..rows {
        for c in 0..columns {
            panels.push(Panel::new(
                r,
                c,
                config.column_ratios()[c],
                config.row_ratios()[r],
            ));
        }
    }
    Ok(panels)
}

/// Normalize a ratio sequence into contiguous `(start, span)` segments.
///
/// `start[i]` is the fraction of the total weight preceding index `i`,
/// `span[i]` the fraction at index `i`. A zero total degrades to the
/// identity span (`start = 0, span = 1`) instead of dividing by zero.
pub fn normalize_spans(ratios: &[f64]) -> Vec<Span> {
    let total: f64 = ratios.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return ratios
            .iter()
            .map(|_| Span {
                start: 0.0,
                span: 1.0,
            })
            .collect();
    }

    let mut spans = Vec::with_capacity(ratios.len());
    let mut acc = 0.0;
    for &ratio in ratios {
        spans.push(Span {
            start: acc / total,
            span: ratio / total,
        });
        acc += ratio;
    }
    spans
}
