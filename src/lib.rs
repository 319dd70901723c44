// SPDX-License-Identifier: GPL-3.0-or-later
// src/lib.rs
//
// Crate root for the splitgrid compositing engine.

//! Assemble a rectangular grid of independently-sourced images into one
//! composed picture, with per-cell cropping, borders and captions.
//!
//! The engine is synchronous and pure: callers (a window shell, clipboard
//! plumbing, file dialogs) own all interaction state and invoke operations
//! one at a time. Image buffers are `image::DynamicImage` values, treated as
//! immutable once produced; every transform returns a new buffer.
//!
//! The error philosophy is best-effort: geometry and compositing failures
//! degrade to `None` (with a `log` warning), raster transforms fall back to
//! returning their input unchanged, and configuration parse errors leave the
//! previous valid state untouched.
//!
//! ```
//! use image::GenericImageView;
//! use splitgrid::config::GridConfiguration;
//! use splitgrid::engine::{build_panels, combine, crop_by_ratio};
//! use splitgrid::model::PanelStore;
//!
//! let config = GridConfiguration::default();
//! let mut store = PanelStore::new(build_panels(&config).unwrap());
//!
//! let source = image::DynamicImage::new_rgba8(200, 200);
//! for index in 0..store.len() {
//!     let cropped = {
//!         let panel = store.get(index).unwrap();
//!         crop_by_ratio(&source, panel, &config)
//!     };
//!     store.get_mut(index).unwrap().image = Some(cropped);
//! }
//!
//! let composed = combine(store.panels(), config.rows(), config.columns()).unwrap();
//! assert_eq!(composed.width(), 200);
//! ```

pub mod config;
pub mod constant;
pub mod engine;
pub mod error;
pub mod file;
pub mod model;

pub use config::GridConfiguration;
pub use engine::{
    build_panels, combine, crop_by_ratio, crop_by_selection, normalize_spans, try_combine, Span,
};
pub use error::{EngineError, EngineResult};
pub use file::{encode_image, save_image, OutputFormat};
pub use model::{Panel, PanelStore, SelectionArea};
