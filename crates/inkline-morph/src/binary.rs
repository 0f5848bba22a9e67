//! Binary brick morphology
//!
//! Dilation, erosion, opening, and closing with rectangular (brick)
//! structuring elements, decomposed into separable horizontal and
//! vertical passes over running window sums. Erosion uses asymmetric
//! boundary conditions: pixels outside the mask count as background,
//! so foreground touching the border erodes away there.

use inkline_core::InkMask;

use crate::error::{MorphError, MorphResult};

fn check_brick(hsize: u32, vsize: u32) -> MorphResult<()> {
    if hsize == 0 || vsize == 0 {
        return Err(MorphError::InvalidBrick(format!(
            "brick sides must be >= 1: {}x{}",
            hsize, vsize
        )));
    }
    Ok(())
}

/// One separable pass. `require_full` selects erosion semantics (the
/// whole window must be ink) versus dilation (any ink in the window).
fn brick_pass(mask: &InkMask, size: u32, horizontal: bool, require_full: bool) -> InkMask {
    if size <= 1 {
        return mask.clone();
    }
    let w = mask.width() as i32;
    let h = mask.height() as i32;
    // Center-anchored window, the extra pixel of an even brick trailing.
    let before = ((size - 1) / 2) as i32;
    let after = (size / 2) as i32;

    let mut out = mask.clone();
    let (outer, inner) = if horizontal { (h, w) } else { (w, h) };

    let mut line = vec![0u32; inner as usize + 1];
    for o in 0..outer {
        // Prefix sums along the scan line.
        for i in 0..inner {
            let v = if horizontal {
                mask.get(i, o)
            } else {
                mask.get(o, i)
            };
            line[i as usize + 1] = line[i as usize] + v as u32;
        }
        for i in 0..inner {
            let lo = (i - before).max(0) as usize;
            let hi = ((i + after + 1).min(inner)) as usize;
            let sum = line[hi] - line[lo];
            let on = if require_full {
                // Clipped window means the brick sticks out of the mask,
                // where everything reads as background.
                (hi - lo) as u32 == size && sum == size
            } else {
                sum > 0
            };
            if horizontal {
                out.set(i, o, on);
            } else {
                out.set(o, i, on);
            }
        }
    }
    out
}

/// Dilate with a `hsize` x `vsize` brick
///
/// # Errors
///
/// Returns an error if either brick side is zero.
pub fn dilate_brick(mask: &InkMask, hsize: u32, vsize: u32) -> MorphResult<InkMask> {
    check_brick(hsize, vsize)?;
    let pass1 = brick_pass(mask, hsize, true, false);
    Ok(brick_pass(&pass1, vsize, false, false))
}

/// Erode with a `hsize` x `vsize` brick
///
/// # Errors
///
/// Returns an error if either brick side is zero.
pub fn erode_brick(mask: &InkMask, hsize: u32, vsize: u32) -> MorphResult<InkMask> {
    check_brick(hsize, vsize)?;
    let pass1 = brick_pass(mask, hsize, true, true);
    Ok(brick_pass(&pass1, vsize, false, true))
}

/// Open with a `hsize` x `vsize` brick (erosion then dilation)
///
/// Removes foreground features thinner than the brick.
pub fn open_brick(mask: &InkMask, hsize: u32, vsize: u32) -> MorphResult<InkMask> {
    let eroded = erode_brick(mask, hsize, vsize)?;
    dilate_brick(&eroded, hsize, vsize)
}

/// Close with a `hsize` x `vsize` brick (dilation then erosion)
///
/// Bridges background gaps narrower than the brick.
pub fn close_brick(mask: &InkMask, hsize: u32, vsize: u32) -> MorphResult<InkMask> {
    let dilated = dilate_brick(mask, hsize, vsize)?;
    erode_brick(&dilated, hsize, vsize)
}

/// Remove long thin horizontal runs (printed rules)
///
/// Opens with a `min_len` x 1 brick to isolate runs at least `min_len`
/// long, then subtracts them from the mask. Handwriting rarely produces
/// unbroken runs that long, so words survive intact.
///
/// # Errors
///
/// Returns an error if `min_len` is zero.
pub fn remove_horizontal_rules(mask: &InkMask, min_len: u32) -> MorphResult<InkMask> {
    let rules = open_brick(mask, min_len, 1)?;
    Ok(mask.subtract(&rules)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot_mask() -> InkMask {
        let mut m = InkMask::new(9, 9).unwrap();
        m.set(4, 4, true);
        m
    }

    #[test]
    fn test_dilate_grows_brick() {
        let d = dilate_brick(&dot_mask(), 3, 3).unwrap();
        assert_eq!(d.ink_count(), 9);
        assert_eq!(d.get(3, 3), 1);
        assert_eq!(d.get(5, 5), 1);
        assert_eq!(d.get(2, 4), 0);
    }

    #[test]
    fn test_dilate_wide_brick_is_anisotropic() {
        let d = dilate_brick(&dot_mask(), 5, 1).unwrap();
        assert_eq!(d.ink_count(), 5);
        assert_eq!(d.get(2, 4), 1);
        assert_eq!(d.get(4, 3), 0);
    }

    #[test]
    fn test_erode_inverts_dilate_on_solid_block() {
        let d = dilate_brick(&dot_mask(), 3, 3).unwrap();
        let e = erode_brick(&d, 3, 3).unwrap();
        assert_eq!(e, dot_mask());
    }

    #[test]
    fn test_erode_clears_border_foreground() {
        let mut m = InkMask::new(5, 5).unwrap();
        for x in 0..5 {
            for y in 0..5 {
                m.set(x, y, true);
            }
        }
        let e = erode_brick(&m, 3, 3).unwrap();
        // Only the 3x3 interior survives a 3x3 erosion of a full mask.
        assert_eq!(e.ink_count(), 9);
        assert_eq!(e.get(0, 0), 0);
        assert_eq!(e.get(2, 2), 1);
    }

    #[test]
    fn test_open_removes_thin_features() {
        let mut m = dot_mask();
        m.set(0, 0, true);
        let o = open_brick(&m, 2, 2).unwrap();
        assert_eq!(o.ink_count(), 0);
    }

    #[test]
    fn test_close_bridges_gap() {
        let mut m = InkMask::new(9, 3).unwrap();
        m.set(2, 1, true);
        m.set(4, 1, true);
        let c = close_brick(&m, 3, 1).unwrap();
        assert_eq!(c.get(3, 1), 1);
    }

    #[test]
    fn test_zero_brick_rejected() {
        assert!(dilate_brick(&dot_mask(), 0, 3).is_err());
        assert!(erode_brick(&dot_mask(), 3, 0).is_err());
    }

    #[test]
    fn test_rule_removal_keeps_words() {
        let mut m = InkMask::new(100, 10).unwrap();
        // A full-width 2px rule and a small word above it.
        for x in 0..100 {
            m.set(x, 6, true);
            m.set(x, 7, true);
        }
        for x in 10..18 {
            for y in 2..5 {
                m.set(x, y, true);
            }
        }
        let cleaned = remove_horizontal_rules(&m, 50).unwrap();
        assert_eq!(cleaned.get(50, 6), 0);
        assert_eq!(cleaned.get(50, 7), 0);
        assert_eq!(cleaned.get(12, 3), 1);
    }
}
