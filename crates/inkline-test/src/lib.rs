//! inkline-test - Synthetic page builders
//!
//! Integration tests need pages with known line structure but must not
//! depend on binary fixtures. This crate renders word blobs into a
//! grayscale page and encodes it to PNG bytes in memory, the same form
//! the engine receives from callers.
//!
//! # Usage
//!
//! ```
//! use inkline_test::PageBuilder;
//!
//! let bytes = PageBuilder::new(600, 800)
//!     .text_line(100, 24)
//!     .text_line(200, 24)
//!     .png_bytes();
//! assert!(!bytes.is_empty());
//! ```

use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};

/// Paper gray level
pub const PAPER: u8 = 245;
/// Ink gray level
pub const INK: u8 = 25;

/// Builder for synthetic grayscale pages
#[derive(Debug, Clone)]
pub struct PageBuilder {
    image: GrayImage,
}

impl PageBuilder {
    /// A blank paper-colored page
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::from_pixel(width, height, Luma([PAPER])),
        }
    }

    /// Paint a solid ink rectangle
    pub fn word(mut self, x: u32, y: u32, w: u32, h: u32) -> Self {
        let (pw, ph) = self.image.dimensions();
        for yy in y..(y + h).min(ph) {
            for xx in x..(x + w).min(pw) {
                self.image.put_pixel(xx, yy, Luma([INK]));
            }
        }
        self
    }

    /// A text-like line: several words with gaps, spanning most of the
    /// page width, top edge at `y` and the given height
    pub fn text_line(self, y: u32, height: u32) -> Self {
        let width = self.image.width();
        self.text_line_in(y, height, width / 12, width - width / 12)
    }

    /// A text-like line confined to `[x_start, x_end)`
    pub fn text_line_in(mut self, y: u32, height: u32, x_start: u32, x_end: u32) -> Self {
        let span = x_end.saturating_sub(x_start);
        if span < 20 {
            return self;
        }
        // Four words with one-third-word gaps fill the span exactly.
        let word_w = span / 5;
        let gap = span / 15;
        let mut x = x_start;
        for _ in 0..4 {
            self = self.word(x, y, word_w, height);
            x += word_w + gap;
        }
        self
    }

    /// A full-width horizontal rule
    pub fn rule(self, y: u32, thickness: u32) -> Self {
        let width = self.image.width();
        self.word(0, y, width, thickness)
    }

    /// The rendered page
    pub fn build(self) -> GrayImage {
        self.image
    }

    /// The rendered page as in-memory PNG bytes
    pub fn png_bytes(&self) -> Vec<u8> {
        encode_png(&self.image)
    }
}

/// Encode a grayscale image to PNG bytes
pub fn encode_png(image: &GrayImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("in-memory PNG encoding cannot fail");
    bytes
}

/// A single-column page with `lines` evenly spaced text lines
pub fn text_page(width: u32, height: u32, lines: u32) -> Vec<u8> {
    let mut builder = PageBuilder::new(width, height);
    if lines > 0 {
        let slot = height / (lines + 1);
        let line_h = (slot / 3).max(4);
        for i in 0..lines {
            builder = builder.text_line(slot * (i + 1), line_h);
        }
    }
    builder.png_bytes()
}

/// A wide two-column page with a central gutter; `left_lines` and
/// `right_lines` text lines respectively
pub fn two_column_page(width: u32, height: u32, left_lines: u32, right_lines: u32) -> Vec<u8> {
    let gutter_w = width / 10;
    let gutter_start = (width - gutter_w) / 2;
    let mut builder = PageBuilder::new(width, height);
    for (lines, x0, x1) in [
        (left_lines, width / 20, gutter_start),
        (right_lines, gutter_start + gutter_w, width - width / 20),
    ] {
        if lines == 0 {
            continue;
        }
        let slot = height / (lines + 1);
        let line_h = (slot / 3).clamp(4, 30);
        for i in 0..lines {
            builder = builder.text_line_in(slot * (i + 1), line_h, x0, x1);
        }
    }
    builder.png_bytes()
}

/// A blank paper-colored page
pub fn blank_page(width: u32, height: u32) -> Vec<u8> {
    PageBuilder::new(width, height).png_bytes()
}
