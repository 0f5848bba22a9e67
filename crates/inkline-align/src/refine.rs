//! Band refinement
//!
//! Tightens a line band to its true ink extent with row and column
//! projections, then clamps the height so one noisy band cannot engulf
//! its neighbors.

use inkline_core::{InkMask, Rect, profile};

/// Options for projection refinement
#[derive(Debug, Clone)]
pub struct RefineOptions {
    /// Keep rows whose ink sum exceeds this fraction of the peak row
    /// (default: 0.15)
    pub row_peak_fraction: f32,
    /// Keep columns whose ink sum exceeds this fraction of the peak
    /// column (default: 0.12)
    pub col_peak_fraction: f32,
    /// Minimum final height as a multiple of median word height
    /// (default: 0.6)
    pub min_height_factor: f32,
    /// Maximum final height as a multiple of median word height
    /// (default: 2.5)
    pub max_height_factor: f32,
}

impl Default for RefineOptions {
    fn default() -> Self {
        Self {
            row_peak_fraction: 0.15,
            col_peak_fraction: 0.12,
            min_height_factor: 0.6,
            max_height_factor: 2.5,
        }
    }
}

/// Refine a band rectangle against the ink mask
///
/// Row-wise: keep the contiguous row run around the peak whose sums
/// exceed `row_peak_fraction` of the peak, padded by a margin tied to
/// the median word height. Column-wise: within that row range, keep the
/// contiguous column run around the peak exceeding `col_peak_fraction`
/// of the peak, padded horizontally. The final height is clamped to
/// `[min_height_factor, max_height_factor] * median_word_height`,
/// trimmed or grown symmetrically about the center.
///
/// Degenerate projections (no ink in the band) return the band itself,
/// clipped to the mask with a minimum 1-pixel extent.
pub fn refine_band(
    mask: &InkMask,
    band: Rect,
    median_word_height: f32,
    options: &RefineOptions,
) -> Rect {
    let band = band.clip_to(mask.width(), mask.height());
    let median_h = median_word_height.max(1.0);

    // Row-wise refinement.
    let row_sums: Vec<f32> = mask
        .row_sums(Some(&band))
        .iter()
        .map(|&v| v as f32)
        .collect();
    let row_pad = ((median_h / 6.0) as i32).max(1);
    let (mut y0, mut y1) = match refined_range(&row_sums, options.row_peak_fraction) {
        Some((start, end)) => (
            band.y + start as i32 - row_pad,
            band.y + end as i32 + row_pad,
        ),
        None => return band,
    };

    // Column-wise refinement within the refined rows. Column sums are
    // smoothed over roughly a word height so inter-word gaps do not cut
    // the contiguous run short.
    let row_range = Rect::from_corners(band.x, y0.max(band.y), band.right(), y1.min(band.bottom()))
        .clip_to(mask.width(), mask.height());
    let raw_col_sums: Vec<f32> = mask
        .col_sums(Some(&row_range))
        .iter()
        .map(|&v| v as f32)
        .collect();
    let col_halfwin = ((median_h / 2.0) as usize).max(1);
    let col_sums = profile::windowed_mean(&raw_col_sums, col_halfwin);
    let col_pad = ((median_h / 3.0) as i32).max(2);
    let (x0, x1) = match refined_range(&col_sums, options.col_peak_fraction) {
        Some((start, end)) => (
            row_range.x + start as i32 - col_pad,
            row_range.x + end as i32 + col_pad,
        ),
        None => (band.x, band.right()),
    };

    // Height clamp, symmetric about the center.
    let min_h = (options.min_height_factor * median_h) as i32;
    let max_h = (options.max_height_factor * median_h) as i32;
    let h = y1 - y0;
    let target = h.clamp(min_h.max(1), max_h.max(1));
    if target != h {
        let cy = (y0 + y1) / 2;
        y0 = cy - target / 2;
        y1 = y0 + target;
    }

    Rect::from_corners(x0, y0, x1, y1).clip_to(mask.width(), mask.height())
}

/// The contiguous index run around the peak whose values exceed
/// `fraction` of the peak value. `None` when the projection is all zero.
fn refined_range(sums: &[f32], fraction: f32) -> Option<(usize, usize)> {
    let peak_idx = profile::peak_index(sums)?;
    let peak = sums[peak_idx];
    if peak <= 0.0 {
        return None;
    }
    profile::run_around_peak(sums, peak_idx, peak * fraction)
}
