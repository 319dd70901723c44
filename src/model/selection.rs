// SPDX-License-Identifier: GPL-3.0-or-later
// src/model/selection.rs
//
// User-drawn selection rectangle in display coordinates.

/// A selection rectangle described by two corner points in an external
/// display coordinate space (not image pixels).
///
/// The points may be in any order; `rect()` normalizes them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionArea {
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub is_active: bool,
}

impl SelectionArea {
    pub fn new(start: (f64, f64), end: (f64, f64)) -> Self {
        Self {
            start,
            end,
            is_active: true,
        }
    }

    /// Begin a new selection at a point.
    pub fn begin(&mut self, x: f64, y: f64) {
        self.start = (x, y);
        self.end = (x, y);
        self.is_active = true;
    }

    /// Move the free corner while dragging.
    pub fn update(&mut self, x: f64, y: f64) {
        self.end = (x, y);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Normalized rectangle as `(x, y, width, height)` with non-negative size.
    pub fn rect(&self) -> (f64, f64, f64, f64) {
        let x = self.start.0.min(self.end.0);
        let y = self.start.1.min(self.end.1);
        let width = (self.start.0 - self.end.0).abs();
        let height = (self.start.1 - self.end.1).abs();
        (x, y, width, height)
    }

    pub fn width(&self) -> f64 {
        self.rect().2
    }

    pub fn height(&self) -> f64 {
        self.rect().3
    }
}
