//! Monotonic guard
//!
//! After refinement, adjacent bands in a column can still overlap
//! vertically (padding, height clamps, synthetic slots). The guard walks
//! each column top to bottom and pushes any box whose top edge precedes
//! the previous bottom down past it, preserving order and count.

use inkline_core::Rect;

/// Enforce vertical monotonicity over one column's boxes, in order
///
/// Whenever a box's top edge is at or above the previous box's bottom
/// edge, the top is pushed to `previous bottom + 1` and the bottom kept
/// at least 1 pixel below the new top. Box count and order never change.
pub fn enforce_monotonic(boxes: &mut [Rect]) {
    let mut prev_bottom: Option<i32> = None;
    for b in boxes.iter_mut() {
        if let Some(pb) = prev_bottom {
            if b.y <= pb {
                let bottom = b.bottom();
                b.y = pb + 1;
                b.h = (bottom - b.y).max(1);
            }
        }
        prev_bottom = Some(b.bottom());
    }
}
