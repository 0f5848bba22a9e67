//! 1-D profile utilities
//!
//! Small deterministic numeric routines over projection profiles and
//! value distributions: windowed smoothing, valley search, rank values.
//! Kept free of any image types so they can be tested standalone.

use crate::error::{Error, Result};

/// Windowed mean smoothing with window `2 * halfwin + 1`
///
/// Edges use a truncated window, so the output has the same length as
/// the input. `halfwin == 0` returns the input unchanged.
pub fn windowed_mean(values: &[f32], halfwin: usize) -> Vec<f32> {
    if halfwin == 0 || values.is_empty() {
        return values.to_vec();
    }
    let n = values.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let lo = i.saturating_sub(halfwin);
        let hi = (i + halfwin + 1).min(n);
        let sum: f32 = values[lo..hi].iter().sum();
        out.push(sum / (hi - lo) as f32);
    }
    out
}

/// Arithmetic mean
///
/// # Errors
///
/// Returns an error on an empty slice.
pub fn mean(values: &[f32]) -> Result<f32> {
    if values.is_empty() {
        return Err(Error::EmptyInput("mean"));
    }
    Ok(values.iter().sum::<f32>() / values.len() as f32)
}

/// Value at rank `fract` in [0, 1] of the sorted distribution
///
/// Linear interpolation between neighboring order statistics.
///
/// # Errors
///
/// Returns an error on an empty slice or a rank outside [0, 1].
pub fn rank_value(values: &[f32], fract: f32) -> Result<f32> {
    if values.is_empty() {
        return Err(Error::EmptyInput("rank_value"));
    }
    if !(0.0..=1.0).contains(&fract) {
        return Err(Error::InvalidParameter(format!(
            "rank must be in [0, 1]: {}",
            fract
        )));
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let pos = fract * (sorted.len() - 1) as f32;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let t = pos - lo as f32;
    Ok(sorted[lo] * (1.0 - t) + sorted[hi] * t)
}

/// Median of the distribution
///
/// # Errors
///
/// Returns an error on an empty slice.
pub fn median(values: &[f32]) -> Result<f32> {
    rank_value(values, 0.5)
}

/// Search `profile[start..end)` for a low-density valley, preferring
/// positions near the midpoint of the search range.
///
/// Each position is scored as `value * (1 + distance_from_mid)`, where
/// the distance is a fraction of the half span; the position with the
/// lowest score wins, ties going to the position nearer the midpoint,
/// and its raw (unweighted) value is returned with it.
/// Returns `None` when the range is empty or out of bounds.
pub fn find_valley(profile: &[f32], start: usize, end: usize) -> Option<(usize, f32)> {
    if start >= end || end > profile.len() {
        return None;
    }
    let mid = (start + end) as f32 / 2.0;
    let half_span = (end - start) as f32 / 2.0;
    let mut best: Option<(usize, f32, f32, f32)> = None;
    for (i, &v) in profile.iter().enumerate().take(end).skip(start) {
        let dist = (i as f32 - mid).abs() / half_span.max(1.0);
        let score = v * (1.0 + dist);
        let better = match best {
            Some((_, _, best_score, best_dist)) => {
                score < best_score || (score == best_score && dist < best_dist)
            }
            None => true,
        };
        if better {
            best = Some((i, v, score, dist));
        }
    }
    best.map(|(i, v, _, _)| (i, v))
}

/// Longest step: the contiguous run of indices around `peak_idx` whose
/// values exceed `threshold`, as a half-open `(start, end)` range.
///
/// Used for projection refinement: keep the rows/columns around the peak
/// that still carry meaningful ink. Returns `None` when `peak_idx` is out
/// of bounds or its value does not itself exceed the threshold.
pub fn run_around_peak(values: &[f32], peak_idx: usize, threshold: f32) -> Option<(usize, usize)> {
    if peak_idx >= values.len() || values[peak_idx] <= threshold {
        return None;
    }
    let mut start = peak_idx;
    while start > 0 && values[start - 1] > threshold {
        start -= 1;
    }
    let mut end = peak_idx + 1;
    while end < values.len() && values[end] > threshold {
        end += 1;
    }
    Some((start, end))
}

/// Index of the maximum value (first occurrence on ties)
pub fn peak_index(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, bv)) if bv >= v => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
