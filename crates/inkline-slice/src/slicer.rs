//! The line slicer
//!
//! Segments a page into full-width line crops for a recognizer. Line
//! regions are found on an edge map: Canny edges are inverted so the
//! background becomes one sea of foreground, then an opening followed
//! by extra dilation with a wide flat brick floods the space between
//! edge fragments of the same line while the sea swallows everything
//! else. Inverting back leaves one blob per text line.
//!
//! Unlike the alignment extractor there is no external line count: the
//! output is whatever detection yields, top to bottom.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, RgbImage};
use imageproc::edges::canny;
use imageproc::filter::median_filter;

use inkline_binarize::{binarize_at, otsu_level};
use inkline_core::InkMask;
use inkline_morph::{Connectivity, dilate_brick, erode_brick, find_connected_components};

use crate::error::SliceResult;

/// Options for the line slicer
#[derive(Debug, Clone)]
pub struct SliceOptions {
    /// Canny hysteresis thresholds (default: 30, 100)
    pub canny_low: f32,
    pub canny_high: f32,
    /// Bridging brick width and height (default: 60 x 3)
    pub brick_width: u32,
    pub brick_height: u32,
    /// Erode/dilate passes per morphology stage (default: 2)
    pub brick_iterations: u32,
    /// Reject components with this many ink pixels or fewer (default: 50)
    pub min_area: u32,
    /// Reject components covering more than this fraction of the page
    /// (default: 0.9)
    pub max_area_fraction: f32,
    /// Reject components shorter than this (default: 10)
    pub min_line_height: u32,
    /// Vertical padding added to each crop, clipped to the page
    /// (default: 10)
    pub vertical_padding: u32,
    /// Output crop height; width scales to preserve aspect ratio
    /// (default: 64)
    pub target_height: u32,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            canny_low: 30.0,
            canny_high: 100.0,
            brick_width: 60,
            brick_height: 3,
            brick_iterations: 2,
            min_area: 50,
            max_area_fraction: 0.9,
            min_line_height: 10,
            vertical_padding: 10,
            target_height: 64,
        }
    }
}

impl SliceOptions {
    /// Set the output crop height
    pub fn with_target_height(mut self, height: u32) -> Self {
        self.target_height = height.max(1);
        self
    }

    /// Set the minimum accepted line height
    pub fn with_min_line_height(mut self, height: u32) -> Self {
        self.min_line_height = height;
        self
    }
}

/// One sliced line: the resized crop plus its source rows on the page
#[derive(Debug, Clone)]
pub struct LineCrop {
    /// Full-width crop resized to the target height
    pub image: RgbImage,
    /// First source row on the original page (after padding)
    pub source_top: u32,
    /// One past the last source row on the original page
    pub source_bottom: u32,
}

/// Slice encoded page bytes into line crops, top to bottom
///
/// Corrupt or unreadable bytes return an empty vector; so does a page
/// with no detectable line regions. There is no fixed output count.
pub fn slice_lines(bytes: &[u8]) -> Vec<LineCrop> {
    slice_lines_with(bytes, &SliceOptions::default())
}

/// [`slice_lines`] with explicit options
pub fn slice_lines_with(bytes: &[u8], options: &SliceOptions) -> Vec<LineCrop> {
    let decoded = match image::load_from_memory(bytes) {
        Ok(img) => img,
        Err(err) => {
            tracing::warn!(%err, "page bytes did not decode, returning empty result");
            return Vec::new();
        }
    };

    let blobs = match line_blobs(&decoded, options) {
        Ok(mask) => mask,
        Err(err) => {
            tracing::warn!(%err, "line detection failed, returning empty result");
            return Vec::new();
        }
    };

    let spans = line_spans(&blobs, options);
    tracing::debug!(lines = spans.len(), "sliced line spans");

    let rgb = decoded.to_rgb8();
    spans
        .into_iter()
        .map(|(top, bottom)| crop_and_resize(&rgb, top, bottom, options.target_height))
        .collect()
}

/// Build the line-blob mask: one connected ink region per text line
fn line_blobs(page: &DynamicImage, options: &SliceOptions) -> SliceResult<InkMask> {
    let gray = median_filter(&page.to_luma8(), 1, 1);
    let level = otsu_level(&gray)?;
    let binary = binarize_at(&gray, level)?;
    let edges = canny(&mask_to_gray(&binary), options.canny_low, options.canny_high);

    let edge_mask = InkMask::from_raw(edges.width(), edges.height(), edges.into_raw())?;

    // Work on the complement so the page background is one foreground
    // sea. Opening erases edge fragments and enclosed stroke interiors;
    // the extra dilation pushes the sea back over everything but the
    // line cores.
    let mut sea = edge_mask.inverted();
    for _ in 0..options.brick_iterations {
        sea = erode_brick(&sea, options.brick_width, options.brick_height)?;
    }
    for _ in 0..2 * options.brick_iterations {
        sea = dilate_brick(&sea, options.brick_width, options.brick_height)?;
    }
    Ok(sea.inverted())
}

/// Accepted line regions as padded `(top, bottom)` row spans, sorted
fn line_spans(blobs: &InkMask, options: &SliceOptions) -> Vec<(u32, u32)> {
    let page_h = blobs.height();
    let max_area = (options.max_area_fraction as f64 * blobs.page_area() as f64) as u64;
    let pad = options.vertical_padding as i32;

    let mut spans: Vec<(u32, u32)> = find_connected_components(blobs, Connectivity::EightWay)
        .into_iter()
        .filter(|c| {
            c.pixel_count > options.min_area
                && (c.pixel_count as u64) < max_area
                && c.bounds.h > options.min_line_height as i32
        })
        .map(|c| {
            let top = (c.bounds.y - pad).max(0) as u32;
            let bottom = ((c.bounds.bottom() + pad) as u32).min(page_h);
            (top, bottom)
        })
        .collect();
    spans.sort_by_key(|&(top, _)| top);
    spans
}

/// Crop rows `[top, bottom)` at full page width and resize to the
/// target height, preserving aspect ratio
fn crop_and_resize(page: &RgbImage, top: u32, bottom: u32, target_height: u32) -> LineCrop {
    let width = page.width();
    let crop_h = (bottom - top).max(1);
    let crop = imageops::crop_imm(page, 0, top, width, crop_h).to_image();

    let scaled_w = ((width as f32 * target_height as f32 / crop_h as f32).round() as u32).max(1);
    let image = imageops::resize(&crop, scaled_w, target_height, FilterType::Lanczos3);
    LineCrop {
        image,
        source_top: top,
        source_bottom: bottom,
    }
}

/// Render an ink mask back to an 8-bit image for the edge detector
/// (ink black, background white)
fn mask_to_gray(mask: &InkMask) -> GrayImage {
    GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
        if mask.get(x as i32, y as i32) != 0 {
            image::Luma([0u8])
        } else {
            image::Luma([255u8])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkline_core::Rect;

    #[test]
    fn test_line_spans_filters_and_sorts() {
        let mut m = InkMask::new(400, 300).unwrap();
        // Two real lines out of order plus one sliver too short to keep.
        for r in [
            Rect::new_unchecked(20, 180, 300, 20),
            Rect::new_unchecked(20, 60, 300, 20),
            Rect::new_unchecked(20, 120, 300, 5),
        ] {
            for y in r.y..r.bottom() {
                for x in r.x..r.right() {
                    m.set(x, y, true);
                }
            }
        }
        let spans = line_spans(&m, &SliceOptions::default());
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0], (50, 90));
        assert_eq!(spans[1], (170, 210));
    }

    #[test]
    fn test_line_spans_clip_padding_at_borders() {
        let mut m = InkMask::new(400, 100).unwrap();
        for y in 2..20 {
            for x in 20..320 {
                m.set(x, y, true);
            }
        }
        let spans = line_spans(&m, &SliceOptions::default());
        assert_eq!(spans, vec![(0, 30)]);
    }

    #[test]
    fn test_crop_preserves_aspect() {
        let page = RgbImage::from_pixel(640, 480, image::Rgb([200, 200, 200]));
        let crop = crop_and_resize(&page, 100, 180, 64);
        assert_eq!(crop.image.height(), 64);
        // 640 * 64 / 80 = 512.
        assert_eq!(crop.image.width(), 512);
        assert_eq!((crop.source_top, crop.source_bottom), (100, 180));
    }

    #[test]
    fn test_mask_to_gray_round_trip() {
        let mut m = InkMask::new(10, 10).unwrap();
        m.set(3, 4, true);
        let g = mask_to_gray(&m);
        assert_eq!(g.get_pixel(3, 4).0[0], 0);
        assert_eq!(g.get_pixel(0, 0).0[0], 255);
    }
}
