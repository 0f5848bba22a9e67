//! The alignment extractor
//!
//! Orchestrates binarize → word detection → column split → banding →
//! refinement → guard, with fallback synthesis keeping the always-N
//! contract. The public functions never fail on page input: corrupt
//! bytes and N = 0 produce an empty vector, everything else produces
//! exactly N boxes in reading order.

use inkline_binarize::{BinarizeOptions, binarize_auto, to_grayscale};
use inkline_core::{InkMask, NormRect, Rect, profile};
use inkline_morph::{WordDetectOptions, detect_words};

use crate::banding::{BandingStrategy, allocate_lines, band_words};
use crate::columns::{ColumnSegment, ColumnSplitOptions, assign_words, split_columns};
use crate::error::AlignResult;
use crate::fallback::synthesize_boxes;
use crate::guard::enforce_monotonic;
use crate::refine::{RefineOptions, refine_band};

/// Options for the alignment extractor
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Binarization options
    pub binarize: BinarizeOptions,
    /// Word detection options
    pub words: WordDetectOptions,
    /// Column splitting options
    pub columns: ColumnSplitOptions,
    /// Band refinement options
    pub refine: RefineOptions,
    /// Banding strategy (default: quantile)
    pub strategy: BandingStrategy,
    /// Fewer detected words than this triggers fallback synthesis
    /// (default: 3, the legacy sparse-detection path)
    pub min_components: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            binarize: BinarizeOptions::default(),
            words: WordDetectOptions::default(),
            columns: ColumnSplitOptions::default(),
            refine: RefineOptions::default(),
            strategy: BandingStrategy::default(),
            min_components: 3,
        }
    }
}

impl ExtractOptions {
    /// Select the banding strategy
    pub fn with_strategy(mut self, strategy: BandingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the sparse-detection threshold
    pub fn with_min_components(mut self, min: usize) -> Self {
        self.min_components = min;
        self
    }
}

/// Extract exactly `line_count` aligned boxes from encoded page bytes
///
/// Returns normalized rectangles in reading order, one per transcription
/// line. Corrupt or unreadable bytes and `line_count == 0` return an
/// empty vector; every decodable page returns exactly `line_count`
/// boxes, synthesized when the page carries no usable ink.
pub fn extract_aligned_boxes(bytes: &[u8], line_count: usize) -> Vec<NormRect> {
    extract_aligned_boxes_with(bytes, line_count, &ExtractOptions::default())
}

/// [`extract_aligned_boxes`] with explicit options
pub fn extract_aligned_boxes_with(
    bytes: &[u8],
    line_count: usize,
    options: &ExtractOptions,
) -> Vec<NormRect> {
    if line_count == 0 {
        return Vec::new();
    }

    let mask = match page_mask(bytes, &options.binarize) {
        Ok(mask) => mask,
        Err(err) => {
            tracing::warn!(%err, "page did not produce an ink mask, returning empty result");
            return Vec::new();
        }
    };

    let words = match detect_words(&mask, &options.words) {
        Ok(words) => words,
        Err(err) => {
            tracing::warn!(%err, "word detection failed, synthesizing boxes");
            return synthesize_boxes(line_count);
        }
    };
    if words.len() < options.min_components {
        tracing::debug!(
            words = words.len(),
            line_count,
            "sparse detection, synthesizing boxes"
        );
        return synthesize_boxes(line_count);
    }

    extract_from_words(&mask, &words, line_count, options)
}

/// Decode page bytes and binarize them into an ink mask
fn page_mask(bytes: &[u8], options: &BinarizeOptions) -> AlignResult<InkMask> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(binarize_auto(&to_grayscale(&decoded), options)?)
}

fn extract_from_words(
    mask: &InkMask,
    words: &[Rect],
    line_count: usize,
    options: &ExtractOptions,
) -> Vec<NormRect> {
    let (w, h) = (mask.width(), mask.height());

    let segments = split_columns(mask, &options.columns);
    let buckets = assign_words(words, &segments);
    let energies: Vec<f32> = buckets
        .iter()
        .map(|bucket| bucket.iter().map(|r| r.h as f32).sum())
        .collect();
    let alloc = allocate_lines(&energies, line_count);
    tracing::debug!(segments = segments.len(), ?alloc, "line allocation");

    let heights: Vec<f32> = words.iter().map(|r| r.h as f32).collect();
    let median_h =
        profile::median(&heights).unwrap_or(h as f32 / (2.0 * line_count as f32).max(2.0));

    let mut out = Vec::with_capacity(line_count);
    for ((segment, bucket), &count) in segments.iter().zip(&buckets).zip(&alloc) {
        if count == 0 {
            continue;
        }
        let mut boxes = band_segment(mask, segment, bucket, count, median_h, options);
        enforce_monotonic(&mut boxes);
        out.extend(boxes.iter().map(|r| r.clip_to(w, h).normalize(w, h)));
    }
    debug_assert_eq!(out.len(), line_count);
    out
}

/// Band one segment's words into `count` refined line boxes, in order
fn band_segment(
    mask: &InkMask,
    segment: &ColumnSegment,
    words: &[Rect],
    count: usize,
    median_word_height: f32,
    options: &ExtractOptions,
) -> Vec<Rect> {
    let page_h = mask.height() as i32;
    let slot_h = page_h as f32 / count as f32;

    if count <= 1 || words.is_empty() {
        // Evenly spaced bands across the segment height; refinement
        // tightens them to any ink they contain.
        return (0..count)
            .map(|i| {
                let band = Rect::new_unchecked(
                    segment.x_start,
                    (i as f32 * slot_h) as i32,
                    segment.width(),
                    slot_h.ceil() as i32,
                );
                refine_band(mask, band, median_word_height, &options.refine)
            })
            .collect();
    }

    let groups = band_words(words, count, options.strategy);
    groups
        .iter()
        .enumerate()
        .map(|(ordinal, group)| {
            let Some(union) = group
                .iter()
                .map(|&i| words[i])
                .reduce(|a, b| a.union(&b))
            else {
                // Bandless ordinal: a thin strip at its expected slot.
                let strip_h = ((median_word_height / 2.0) as i32).max(2);
                let cy = ((ordinal as f32 + 0.5) * slot_h) as i32;
                return Rect::new_unchecked(
                    segment.x_start,
                    cy - strip_h / 2,
                    segment.width(),
                    strip_h,
                )
                .clip_to(mask.width(), mask.height());
            };
            let band = Rect::new_unchecked(segment.x_start, union.y, segment.width(), union.h);
            refine_band(mask, band, median_word_height, &options.refine)
        })
        .collect()
}
