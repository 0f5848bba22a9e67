//! Column splitting
//!
//! Guesses 1 or 2 reading columns. Only pages wide enough relative to
//! their height are candidate two-column; a qualifying low-density
//! valley in the smoothed vertical ink profile then fixes the gutter.
//! Words are assigned to the segment containing their horizontal center.

use inkline_core::{InkMask, Rect, profile};

/// A vertical strip of the page holding one reading column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSegment {
    /// Left x coordinate (inclusive)
    pub x_start: i32,
    /// Right x coordinate (exclusive)
    pub x_end: i32,
}

impl ColumnSegment {
    /// Segment width in pixels
    #[inline]
    pub fn width(&self) -> i32 {
        self.x_end - self.x_start
    }

    /// The segment as a full-height rectangle
    pub fn as_rect(&self, page_height: u32) -> Rect {
        Rect::new_unchecked(self.x_start, 0, self.width(), page_height as i32)
    }

    /// Whether a word's horizontal center falls in this segment
    #[inline]
    pub fn owns(&self, word: &Rect) -> bool {
        let cx = word.center_x();
        cx >= self.x_start && cx < self.x_end
    }
}

/// Options for column splitting
#[derive(Debug, Clone)]
pub struct ColumnSplitOptions {
    /// Minimum width/height ratio for a two-column candidate (default: 1.3)
    pub two_column_min_aspect: f32,
    /// Gutter search range as fractions of page width (default: 0.08-0.92)
    pub search_range: (f32, f32),
    /// A valley qualifies when its density is at most this fraction of
    /// the mean profile density (default: 0.2)
    pub max_valley_density_ratio: f32,
}

impl Default for ColumnSplitOptions {
    fn default() -> Self {
        Self {
            two_column_min_aspect: 1.3,
            search_range: (0.08, 0.92),
            max_valley_density_ratio: 0.2,
        }
    }
}

/// Split a page into 1 or 2 column segments
///
/// Returns segments ordered left to right. A page that is not wide
/// enough, or whose profile has no qualifying whitespace valley, is a
/// single segment spanning the full width.
pub fn split_columns(mask: &InkMask, options: &ColumnSplitOptions) -> Vec<ColumnSegment> {
    let w = mask.width() as i32;
    let h = mask.height() as i32;
    let full = vec![ColumnSegment {
        x_start: 0,
        x_end: w,
    }];

    let aspect = w as f32 / h as f32;
    if aspect < options.two_column_min_aspect {
        return full;
    }

    let sums: Vec<f32> = mask.col_sums(None).iter().map(|&v| v as f32).collect();
    let halfwin = (w as usize / 64).max(1);
    let smoothed = profile::windowed_mean(&sums, halfwin);

    let start = (w as f32 * options.search_range.0) as usize;
    let end = ((w as f32 * options.search_range.1) as usize).min(smoothed.len());
    let Some((valley_x, valley_density)) = profile::find_valley(&smoothed, start, end) else {
        return full;
    };
    let Ok(mean_density) = profile::mean(&smoothed) else {
        return full;
    };
    if mean_density <= 0.0 || valley_density > mean_density * options.max_valley_density_ratio {
        tracing::debug!(
            valley_x,
            valley_density,
            mean_density,
            "no qualifying gutter, treating as single column"
        );
        return full;
    }

    tracing::debug!(valley_x, "two-column split");
    vec![
        ColumnSegment {
            x_start: 0,
            x_end: valley_x as i32,
        },
        ColumnSegment {
            x_start: valley_x as i32,
            x_end: w,
        },
    ]
}

/// Assign words to segments by the midpoint rule
///
/// Every word lands in exactly one bucket; words whose center falls
/// outside all segments (possible only with caller-built segments) go to
/// the nearest one.
pub fn assign_words(words: &[Rect], segments: &[ColumnSegment]) -> Vec<Vec<Rect>> {
    let mut buckets: Vec<Vec<Rect>> = vec![Vec::new(); segments.len()];
    for word in words {
        let idx = segments
            .iter()
            .position(|s| s.owns(word))
            .unwrap_or_else(|| {
                let cx = word.center_x();
                segments
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, s)| {
                        (cx - s.x_start).abs().min((cx - s.x_end).abs())
                    })
                    .map(|(i, _)| i)
                    .unwrap_or(0)
            });
        if let Some(bucket) = buckets.get_mut(idx) {
            bucket.push(*word);
        }
    }
    buckets
}
