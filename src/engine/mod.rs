// SPDX-License-Identifier: GPL-3.0-or-later
// src/engine/mod.rs
//
// Engine module root: geometry, cropping, compositing and raster transforms.

pub mod compose;
pub mod crop;
pub mod grid;
pub mod transform;

pub use compose::{combine, try_combine};
pub use crop::{crop_by_ratio, crop_by_selection};
pub use grid::{build_panels, normalize_spans, Span};
