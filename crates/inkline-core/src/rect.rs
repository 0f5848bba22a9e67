//! Rect, NormRect - Rectangle regions
//!
//! [`Rect`] is a pixel rectangle used throughout the analysis pipeline.
//! [`NormRect`] is the page-relative output type of the extractor: every
//! field lies in [0, 1] so the caller can overlay it at any rendered size.

use crate::error::{Error, Result};

/// A pixel rectangle
///
/// Plain Copy type; small and frequently copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Rect {
    /// Create a new rectangle
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "rect dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a rectangle without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle from two corner points (order-independent)
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let (x, w) = if x1 <= x2 {
            (x1, x2 - x1)
        } else {
            (x2, x1 - x2)
        };
        let (y, h) = if y1 <= y2 {
            (y1, y2 - y1)
        } else {
            (y2, y1 - y2)
        };
        Self { x, y, w, h }
    }

    /// Right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Center x coordinate
    #[inline]
    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Center y coordinate
    #[inline]
    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Area in pixels
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the rectangle is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Check if this rectangle overlaps another
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Smallest rectangle covering both `self` and `other`
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let r = self.right().max(other.right());
        let b = self.bottom().max(other.bottom());
        Rect {
            x,
            y,
            w: r - x,
            h: b - y,
        }
    }

    /// Clip this rectangle to a `width` x `height` page, keeping at least
    /// a 1-pixel extent when any part of the rectangle is on the page.
    pub fn clip_to(&self, width: u32, height: u32) -> Rect {
        let w = width as i32;
        let h = height as i32;
        let x0 = self.x.clamp(0, (w - 1).max(0));
        let y0 = self.y.clamp(0, (h - 1).max(0));
        let x1 = self.right().clamp(x0 + 1, w.max(x0 + 1));
        let y1 = self.bottom().clamp(y0 + 1, h.max(y0 + 1));
        Rect {
            x: x0,
            y: y0,
            w: x1 - x0,
            h: y1 - y0,
        }
    }

    /// Normalize to page size, clamping every field into [0, 1]
    pub fn normalize(&self, width: u32, height: u32) -> NormRect {
        if width == 0 || height == 0 {
            return NormRect::default();
        }
        let fw = width as f32;
        let fh = height as f32;
        let x = (self.x as f32 / fw).clamp(0.0, 1.0);
        let y = (self.y as f32 / fh).clamp(0.0, 1.0);
        let w = (self.w as f32 / fw).clamp(0.0, 1.0 - x);
        let h = (self.h as f32 / fh).clamp(0.0, 1.0 - y);
        NormRect { x, y, w, h }
    }
}

/// A rectangle normalized to page dimensions
///
/// Output type of the alignment extractor; all fields lie in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormRect {
    /// Left edge as a fraction of page width
    pub x: f32,
    /// Top edge as a fraction of page height
    pub y: f32,
    /// Width as a fraction of page width
    pub w: f32,
    /// Height as a fraction of page height
    pub h: f32,
}

impl NormRect {
    /// Create a normalized rectangle, clamping every field into [0, 1]
    /// and keeping `x + w` and `y + h` within the page.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        let x = x.clamp(0.0, 1.0);
        let y = y.clamp(0.0, 1.0);
        let w = w.clamp(0.0, 1.0 - x);
        let h = h.clamp(0.0, 1.0 - y);
        Self { x, y, w, h }
    }

    /// Bottom edge (y + h)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Right edge (x + w)
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_accessors() {
        let r = Rect::new(10, 20, 30, 40).unwrap();
        assert_eq!(r.right(), 40);
        assert_eq!(r.bottom(), 60);
        assert_eq!(r.center_x(), 25);
        assert_eq!(r.center_y(), 40);
        assert_eq!(r.area(), 1200);
    }

    #[test]
    fn test_rect_negative_dims_rejected() {
        assert!(Rect::new(0, 0, -1, 5).is_err());
        assert!(Rect::new(0, 0, 5, -1).is_err());
    }

    #[test]
    fn test_rect_from_corners_any_order() {
        let a = Rect::from_corners(5, 5, 1, 2);
        assert_eq!(a, Rect::new_unchecked(1, 2, 4, 3));
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new_unchecked(0, 0, 10, 10);
        let b = Rect::new_unchecked(5, 20, 10, 10);
        assert_eq!(a.union(&b), Rect::new_unchecked(0, 0, 15, 30));
    }

    #[test]
    fn test_rect_overlaps() {
        let a = Rect::new_unchecked(0, 0, 10, 10);
        assert!(a.overlaps(&Rect::new_unchecked(9, 9, 5, 5)));
        assert!(!a.overlaps(&Rect::new_unchecked(10, 0, 5, 5)));
    }

    #[test]
    fn test_clip_keeps_min_extent() {
        let r = Rect::new_unchecked(95, 95, 20, 0);
        let c = r.clip_to(100, 100);
        assert!(c.w >= 1 && c.h >= 1);
        assert!(c.right() <= 100 && c.bottom() <= 100);
    }

    #[test]
    fn test_normalize_in_unit_square() {
        let r = Rect::new_unchecked(-5, 50, 300, 80);
        let n = r.normalize(200, 100);
        assert!(n.x >= 0.0 && n.y >= 0.0);
        assert!(n.right() <= 1.0 + f32::EPSILON);
        assert!(n.bottom() <= 1.0 + f32::EPSILON);
    }

    #[test]
    fn test_norm_rect_clamps() {
        let n = NormRect::new(0.8, 0.9, 0.5, 0.5);
        assert!((n.right() - 1.0).abs() < 1e-6);
        assert!((n.bottom() - 1.0).abs() < 1e-6);
    }
}
