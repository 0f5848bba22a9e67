//! Word detection
//!
//! Joins nearby ink into word-shaped blobs with an anisotropic dilation
//! (wider than tall, so neighboring characters merge without bridging
//! lines), then extracts and filters connected components.

use inkline_core::{InkMask, Rect};

use crate::binary::{dilate_brick, remove_horizontal_rules};
use crate::conncomp::{Connectivity, find_connected_components};
use crate::error::MorphResult;

/// Options for word detection
#[derive(Debug, Clone)]
pub struct WordDetectOptions {
    /// Remove long horizontal runs before dilation (default: true)
    pub remove_rules: bool,
    /// Minimum rule run length as a fraction of page width (default: 1/3,
    /// never below 64px)
    pub rule_min_len_fraction: f32,
    /// Horizontal dilation as a fraction of page width (default: 1/100,
    /// clamped to [6, 24] px)
    pub dilate_width_fraction: f32,
    /// Vertical dilation in pixels (default: 3)
    pub dilate_height: u32,
    /// Minimum component bounding area as a fraction of page area
    /// (default: 0.00002, never below 4 px)
    pub min_area_fraction: f32,
    /// Discard components wider than this times their height (default: 40)
    pub max_width_over_height: f32,
    /// Discard components taller than this times their width (default: 15)
    pub max_height_over_width: f32,
}

impl Default for WordDetectOptions {
    fn default() -> Self {
        Self {
            remove_rules: true,
            rule_min_len_fraction: 1.0 / 3.0,
            dilate_width_fraction: 0.01,
            dilate_height: 3,
            min_area_fraction: 0.00002,
            max_width_over_height: 40.0,
            max_height_over_width: 15.0,
        }
    }
}

impl WordDetectOptions {
    /// Enable or disable ruled-line removal
    pub fn with_remove_rules(mut self, remove: bool) -> Self {
        self.remove_rules = remove;
        self
    }

    /// Set the dilation brick parameters
    pub fn with_dilation(mut self, width_fraction: f32, height: u32) -> Self {
        self.dilate_width_fraction = width_fraction;
        self.dilate_height = height;
        self
    }

    /// Set the minimum component area fraction
    pub fn with_min_area_fraction(mut self, fraction: f32) -> Self {
        self.min_area_fraction = fraction;
        self
    }
}

/// Detect word boxes in an ink mask
///
/// Returns bounding rectangles of word-sized blobs, sorted by
/// `(center_y, x)`. Undersized and extreme-aspect components are
/// discarded; the result may be empty.
///
/// # Errors
///
/// Returns an error only for degenerate option values (zero bricks).
pub fn detect_words(mask: &InkMask, options: &WordDetectOptions) -> MorphResult<Vec<Rect>> {
    let w = mask.width();

    let cleaned;
    let work = if options.remove_rules {
        let min_len = ((w as f32 * options.rule_min_len_fraction) as u32).max(64);
        if min_len < w {
            cleaned = remove_horizontal_rules(mask, min_len)?;
            &cleaned
        } else {
            mask
        }
    } else {
        mask
    };

    let hsize = ((w as f32 * options.dilate_width_fraction) as u32).clamp(6, 24);
    let dilated = dilate_brick(work, hsize, options.dilate_height.max(1))?;

    let min_area = ((mask.page_area() as f32 * options.min_area_fraction) as i64).max(4);
    let mut boxes: Vec<Rect> = find_connected_components(&dilated, Connectivity::EightWay)
        .into_iter()
        .map(|c| c.bounds)
        .filter(|b| {
            if b.area() < min_area {
                return false;
            }
            let (bw, bh) = (b.w as f32, b.h as f32);
            bw <= bh * options.max_width_over_height && bh <= bw * options.max_height_over_width
        })
        .collect();

    boxes.sort_by_key(|b| (b.center_y(), b.x));
    Ok(boxes)
}
