// SPDX-License-Identifier: GPL-3.0-or-later
// src/model/mod.rs
//
// Engine data model: panels and selection state.

pub mod panel;
pub mod selection;

pub use panel::{Panel, PanelStore};
pub use selection::SelectionArea;
