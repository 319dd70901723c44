// SPDX-License-Identifier: GPL-3.0-or-later
// src/model/panel.rs
//
// Panel: one grid cell with its image, caption and selection flag.

use image::{DynamicImage, GenericImageView};

/// One cell of the grid.
///
/// The ratio weights are copied from the configuration when the grid is
/// built; a later ratio edit does not move existing panels until the store
/// is rebuilt.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    pub row: usize,
    pub column: usize,
    pub width_ratio: f64,
    pub height_ratio: f64,
    /// Owned pixel buffer; replacing it drops the previous one.
    pub image: Option<DynamicImage>,
    /// Empty means "no caption rendered".
    pub caption: String,
    pub is_selected: bool,
}

impl Panel {
    pub fn new(row: usize, column: usize, width_ratio: f64, height_ratio: f64) -> Self {
        Self {
            row,
            column,
            width_ratio,
            height_ratio,
            image: None,
            caption: String::new(),
            is_selected: false,
        }
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// One-based label for display, e.g. `"Panel 1-2"`.
    pub fn display_text(&self) -> String {
        format!("Panel {}-{}", self.row + 1, self.column + 1)
    }

    /// Pixel dimensions for display, e.g. `"640 x 480"`, or `"Empty"`.
    pub fn dimensions_text(&self) -> String {
        match &self.image {
            Some(img) => {
                let (w, h) = img.dimensions();
                format!("{w} x {h}")
            }
            None => "Empty".to_string(),
        }
    }
}

/// Owning container for all panels of the current grid.
///
/// Rebuilt wholesale whenever the configuration changes; a reader never
/// observes a partially-rebuilt grid. At most one panel is selected at a
/// time, which the selection methods enforce.
#[derive(Debug, Clone, Default)]
pub struct PanelStore {
    panels: Vec<Panel>,
}

impl PanelStore {
    pub fn new(panels: Vec<Panel>) -> Self {
        Self { panels }
    }

    /// Replace the whole store in one step.
    pub fn replace(&mut self, panels: Vec<Panel>) {
        self.panels = panels;
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Panel> {
        self.panels.get_mut(index)
    }

    /// Look up a panel by grid coordinates.
    pub fn at(&self, row: usize, column: usize) -> Option<&Panel> {
        self.panels
            .iter()
            .find(|p| p.row == row && p.column == column)
    }

    /// Mutable lookup by grid coordinates.
    pub fn at_mut(&mut self, row: usize, column: usize) -> Option<&mut Panel> {
        self.panels
            .iter_mut()
            .find(|p| p.row == row && p.column == column)
    }

    /// Select the panel at `index`, deselecting every other panel.
    ///
    /// Returns false if the index is out of range (selection unchanged).
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.panels.len() {
            return false;
        }
        for (i, panel) in self.panels.iter_mut().enumerate() {
            panel.is_selected = i == index;
        }
        true
    }

    pub fn clear_selection(&mut self) {
        for panel in &mut self.panels {
            panel.is_selected = false;
        }
    }

    /// The currently selected panel, if any.
    pub fn selected(&self) -> Option<&Panel> {
        self.panels.iter().find(|p| p.is_selected)
    }

    /// Mutable access to the currently selected panel, if any.
    pub fn selected_mut(&mut self) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.is_selected)
    }

    /// Index of the currently selected panel, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.panels.iter().position(|p| p.is_selected)
    }
}
