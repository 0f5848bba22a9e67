//! Line slicer regression tests
//!
//! Runs the full slicing pipeline on synthetic pages: line counts,
//! top-to-bottom ordering, the fixed output height, aspect-ratio
//! preservation, and the empty results for blank and corrupt input.

use inkline_slice::{SliceOptions, slice_lines, slice_lines_with};
use inkline_test::{blank_page, text_page};

#[test]
fn well_separated_lines_slice_one_crop_each() {
    let page = text_page(600, 800, 4);
    let crops = slice_lines(&page);
    assert_eq!(crops.len(), 4, "expected one crop per text line");
}

#[test]
fn crops_are_resized_to_target_height() {
    let page = text_page(600, 800, 3);
    for crop in slice_lines(&page) {
        assert_eq!(crop.image.height(), 64);
        assert!(crop.image.width() > 0);
    }
}

#[test]
fn crops_preserve_aspect_ratio() {
    let page = text_page(600, 800, 3);
    for crop in slice_lines(&page) {
        let source_h = (crop.source_bottom - crop.source_top) as f32;
        let expected_w = (600.0 * 64.0 / source_h).round() as u32;
        assert_eq!(crop.image.width(), expected_w);
    }
}

#[test]
fn crops_come_out_top_to_bottom() {
    let page = text_page(600, 800, 5);
    let crops = slice_lines(&page);
    assert!(crops.len() >= 2);
    for pair in crops.windows(2) {
        assert!(
            pair[1].source_top >= pair[0].source_top,
            "{} < {}",
            pair[1].source_top,
            pair[0].source_top
        );
    }
}

#[test]
fn blank_page_yields_no_crops() {
    assert!(slice_lines(&blank_page(600, 800)).is_empty());
}

#[test]
fn corrupt_bytes_yield_no_crops() {
    assert!(slice_lines(b"not an image at all").is_empty());
    assert!(slice_lines(&[]).is_empty());
}

#[test]
fn custom_target_height_is_honored() {
    let page = text_page(600, 800, 3);
    let options = SliceOptions::default().with_target_height(48);
    for crop in slice_lines_with(&page, &options) {
        assert_eq!(crop.image.height(), 48);
    }
}
