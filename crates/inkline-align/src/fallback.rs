//! Fallback synthesis
//!
//! When a page decodes but carries no usable ink, or detection is too
//! sparse to band, the extractor still owes the caller exactly N boxes.
//! The synthesizer emits evenly spaced placeholder strips so the UI can
//! show one highlight per transcription line.

use inkline_core::NormRect;

/// Vertical span covered by the synthesized strips (central 92%)
const VERTICAL_SPAN: f32 = 0.92;
/// Each strip's height as a fraction of its slot
const STRIP_HEIGHT_FRACTION: f32 = 0.85;
/// Horizontal margin on each side
const HORIZONTAL_MARGIN: f32 = 0.05;

/// Synthesize `n` evenly spaced placeholder boxes
///
/// Strips span the central 92% of page height, each 85% of its slot
/// height and centered in the slot, horizontally inset by 5% margins.
/// `n == 0` returns an empty vector.
pub fn synthesize_boxes(n: usize) -> Vec<NormRect> {
    if n == 0 {
        return Vec::new();
    }
    let top = (1.0 - VERTICAL_SPAN) / 2.0;
    let slot = VERTICAL_SPAN / n as f32;
    let height = slot * STRIP_HEIGHT_FRACTION;
    let inset = slot * (1.0 - STRIP_HEIGHT_FRACTION) / 2.0;

    (0..n)
        .map(|i| {
            NormRect::new(
                HORIZONTAL_MARGIN,
                top + i as f32 * slot + inset,
                1.0 - 2.0 * HORIZONTAL_MARGIN,
                height,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_bounds() {
        for n in [1, 5, 12] {
            let boxes = synthesize_boxes(n);
            assert_eq!(boxes.len(), n);
            for b in &boxes {
                assert!(b.x >= 0.0 && b.y >= 0.0);
                assert!(b.right() <= 1.0 + f32::EPSILON);
                assert!(b.bottom() <= 1.0 + f32::EPSILON);
            }
        }
    }

    #[test]
    fn test_zero_is_empty() {
        assert!(synthesize_boxes(0).is_empty());
    }

    #[test]
    fn test_five_strips_evenly_spaced() {
        let boxes = synthesize_boxes(5);
        let slot = 0.92 / 5.0;
        for (i, b) in boxes.iter().enumerate() {
            let expected_y = 0.04 + i as f32 * slot + slot * 0.075;
            assert!((b.y - expected_y).abs() < 1e-5, "strip {}", i);
            assert!((b.h - slot * 0.85).abs() < 1e-5);
            assert!((b.x - 0.05).abs() < 1e-6);
            assert!((b.w - 0.90).abs() < 1e-6);
        }
    }

    #[test]
    fn test_strips_do_not_overlap() {
        let boxes = synthesize_boxes(8);
        for pair in boxes.windows(2) {
            assert!(pair[1].y > pair[0].bottom());
        }
    }
}
