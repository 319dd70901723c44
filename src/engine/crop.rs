// SPDX-License-Identifier: GPL-3.0-or-later
// src/engine/crop.rs
//
// Cropping engine: extract a cell's ratio span, or a user-drawn selection,
// from a full source image.

use image::{DynamicImage, GenericImageView};
use log::warn;

use crate::config::GridConfiguration;
use crate::engine::grid::normalize_spans;
use crate::error::{EngineError, EngineResult};
use crate::model::{Panel, SelectionArea};

/// Crop region in source pixel coordinates.
///
/// Always clamped against a concrete image: the region is never empty and
/// never exceeds the source bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    /// Clamp raw floating-point coordinates into a valid region for an image
    /// of `source_w` x `source_h` pixels.
    ///
    /// The offset stays inside the image, the size is at least one pixel and
    /// at most the remaining extent past the offset. Fails with
    /// `EngineError::Bounds` only for a degenerate source (zero-sized
    /// image), where no clamp can produce a valid region; callers degrade
    /// rather than surface it.
    pub fn clamped(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        source_w: u32,
        source_h: u32,
    ) -> EngineResult<Self> {
        if source_w == 0 || source_h == 0 {
            let as_pixel = |v: f64| v.floor().max(0.0) as u32;
            return Err(EngineError::Bounds {
                x: as_pixel(x),
                y: as_pixel(y),
                width: as_pixel(width),
                height: as_pixel(height),
            });
        }

        let clamp_axis = |offset: f64, size: f64, extent: u32| -> (u32, u32) {
            let max_offset = extent - 1;
            let offset = (offset.floor().max(0.0) as u32).min(max_offset);
            let size = (size.floor().max(1.0) as u32).clamp(1, extent - offset);
            (offset, size)
        };

        let (x, width) = clamp_axis(x, width, source_w);
        let (y, height) = clamp_axis(y, height, source_h);
        Ok(Self { x, y, width, height })
    }

    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.x, self.y, self.width, self.height)
    }
}

/// Crop the sub-region of `source` corresponding to one panel's normalized
/// ratio span in the configuration.
///
/// Best-effort: on any bounds failure the original image is returned
/// unchanged rather than failing the caller.
pub fn crop_by_ratio(
    source: &DynamicImage,
    panel: &Panel,
    config: &GridConfiguration,
) -> DynamicImage {
    let col_spans = normalize_spans(config.column_ratios());
    let row_spans = normalize_spans(config.row_ratios());

    let (Some(col), Some(row)) = (col_spans.get(panel.column), row_spans.get(panel.row)) else {
        warn!(
            "panel ({}, {}) outside configured grid, returning source unchanged",
            panel.row, panel.column
        );
        return source.clone();
    };

    let (src_w, src_h) = source.dimensions();
    let region = CropRegion::clamped(
        col.start * f64::from(src_w),
        row.start * f64::from(src_h),
        col.span * f64::from(src_w),
        row.span * f64::from(src_h),
        src_w,
        src_h,
    );

    match region {
        Ok(r) => source.crop_imm(r.x, r.y, r.width, r.height),
        Err(err) => {
            warn!("crop degraded, returning source unchanged: {err}");
            source.clone()
        }
    }
}

/// Crop the selection rectangle, drawn in display coordinates, out of
/// `source` by rescaling it into source pixel coordinates.
///
/// Returns `None` when the selection is inactive or the display size is
/// degenerate (nothing meaningful to map through).
pub fn crop_by_selection(
    source: &DynamicImage,
    selection: &SelectionArea,
    display_width: f64,
    display_height: f64,
) -> Option<DynamicImage> {
    if !selection.is_active {
        return None;
    }
    if display_width <= 0.0 || display_height <= 0.0 {
        warn!("degenerate display size {display_width}x{display_height}, ignoring selection");
        return None;
    }

    let (src_w, src_h) = source.dimensions();
    let scale_x = f64::from(src_w) / display_width;
    let scale_y = f64::from(src_h) / display_height;

    let (sel_x, sel_y, sel_w, sel_h) = selection.rect();
    let region = CropRegion::clamped(
        sel_x * scale_x,
        sel_y * scale_y,
        sel_w * scale_x,
        sel_h * scale_y,
        src_w,
        src_h,
    )
    .inspect_err(|err| warn!("selection crop degraded: {err}"))
    .ok()?;

    Some(source.crop_imm(region.x, region.y, region.width, region.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    fn source(w: u32, h: u32) -> DynamicImage {
        DynamicImage::new_rgba8(w, h)
    }

    fn uniform_config(rows: usize, columns: usize) -> GridConfiguration {
        GridConfiguration::new(rows, columns).unwrap()
    }

    #[test]
    fn uniform_grid_splits_source_evenly() {
        let config = uniform_config(2, 2);
        let img = source(100, 100);

        for panel in crate::engine::grid::build_panels(&config).unwrap() {
            let cropped = crop_by_ratio(&img, &panel, &config);
            assert_eq!(cropped.dimensions(), (50, 50));
        }
    }

    #[test]
    fn reassembled_crops_reproduce_source_dimensions() {
        // Uniform 2x2 over an evenly divisible source: the compositor's
        // max-of-column/row layout rule restores the original size.
        let config = uniform_config(2, 2);
        let img = source(200, 100);

        let panels = crate::engine::grid::build_panels(&config).unwrap();
        let mut col_widths = [0u32; 2];
        let mut row_heights = [0u32; 2];
        for panel in &panels {
            let (w, h) = crop_by_ratio(&img, panel, &config).dimensions();
            col_widths[panel.column] = col_widths[panel.column].max(w);
            row_heights[panel.row] = row_heights[panel.row].max(h);
        }

        assert_eq!(col_widths.iter().sum::<u32>(), 200);
        assert_eq!(row_heights.iter().sum::<u32>(), 100);
    }

    #[test]
    fn weighted_ratios_get_proportional_pixels() {
        let mut config = uniform_config(1, 2);
        config.set_width_ratio_text("1:3").unwrap();
        let img = source(400, 100);

        let panels = crate::engine::grid::build_panels(&config).unwrap();
        assert_eq!(crop_by_ratio(&img, &panels[0], &config).dimensions(), (100, 100));
        assert_eq!(crop_by_ratio(&img, &panels[1], &config).dimensions(), (300, 100));
    }

    #[test]
    fn crop_never_empty_or_out_of_bounds() {
        // A one-pixel source forces every computed size to clamp to 1.
        let config = uniform_config(3, 3);
        let img = source(1, 1);

        for panel in crate::engine::grid::build_panels(&config).unwrap() {
            let cropped = crop_by_ratio(&img, &panel, &config);
            assert_eq!(cropped.dimensions(), (1, 1));
        }
    }

    #[test]
    fn panel_outside_grid_returns_source_unchanged() {
        let config = uniform_config(2, 2);
        let img = source(64, 64);
        let stray = Panel::new(7, 7, 1.0, 1.0);

        let result = crop_by_ratio(&img, &stray, &config);
        assert_eq!(result.dimensions(), (64, 64));
    }

    #[test]
    fn inactive_selection_yields_none() {
        let img = source(100, 100);
        let mut selection = SelectionArea::new((10.0, 10.0), (50.0, 50.0));
        selection.is_active = false;

        assert!(crop_by_selection(&img, &selection, 100.0, 100.0).is_none());
    }

    #[test]
    fn selection_scales_from_display_to_source_pixels() {
        // 200x100 source shown at 100x50: display coordinates double.
        let img = source(200, 100);
        let selection = SelectionArea::new((10.0, 10.0), (60.0, 40.0));

        let cropped = crop_by_selection(&img, &selection, 100.0, 50.0).unwrap();
        assert_eq!(cropped.dimensions(), (100, 60));
    }

    #[test]
    fn selection_clamps_to_source_bounds() {
        let img = source(50, 50);
        // Way outside the display area on all sides.
        let selection = SelectionArea::new((-20.0, -20.0), (500.0, 500.0));

        let cropped = crop_by_selection(&img, &selection, 100.0, 100.0).unwrap();
        assert_eq!(cropped.dimensions(), (50, 50));
    }

    #[test]
    fn zero_sized_selection_still_yields_one_pixel() {
        let img = source(80, 80);
        let selection = SelectionArea::new((40.0, 40.0), (40.0, 40.0));

        let cropped = crop_by_selection(&img, &selection, 80.0, 80.0).unwrap();
        assert_eq!(cropped.dimensions(), (1, 1));
    }

    #[test]
    fn degenerate_display_size_yields_none() {
        let img = source(80, 80);
        let selection = SelectionArea::new((0.0, 0.0), (10.0, 10.0));
        assert!(crop_by_selection(&img, &selection, 0.0, 50.0).is_none());
    }

    #[test]
    fn zero_sized_source_is_a_bounds_error_and_degrades() {
        crate::testutil::init_logging();

        let err = CropRegion::clamped(10.0, 10.0, 20.0, 20.0, 0, 50).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Bounds {
                x: 10,
                y: 10,
                width: 20,
                height: 20
            }
        ));

        // The crop operations swallow the error and degrade.
        let empty = source(0, 0);
        let config = uniform_config(2, 2);
        let panel = Panel::new(0, 0, 1.0, 1.0);
        assert_eq!(crop_by_ratio(&empty, &panel, &config).dimensions(), (0, 0));

        let selection = SelectionArea::new((0.0, 0.0), (10.0, 10.0));
        assert!(crop_by_selection(&empty, &selection, 50.0, 50.0).is_none());
    }

    #[test]
    fn clamped_region_respects_offsets_at_the_edge() {
        // Offset past the right edge clamps back inside with size 1.
        let region = CropRegion::clamped(99.9, 0.0, 50.0, 10.0, 100, 100).unwrap();
        assert_eq!(region.as_tuple(), (99, 0, 1, 10));

        // Negative offsets clamp to zero.
        let region = CropRegion::clamped(-5.0, -5.0, 10.0, 10.0, 100, 100).unwrap();
        assert_eq!(region.as_tuple(), (0, 0, 10, 10));
    }
}
