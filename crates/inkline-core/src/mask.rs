//! InkMask - Bi-level ink image
//!
//! One byte per pixel, 1 = ink, 0 = background. Derived per call from a
//! decoded page and discarded afterwards. Row/column projections are the
//! workhorse of band refinement and column splitting.

use crate::error::{Error, Result};
use crate::rect::Rect;

/// A bi-level ink image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InkMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl InkMask {
    /// Create an all-background mask
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        })
    }

    /// Create a mask from raw bytes (any nonzero byte counts as ink)
    ///
    /// # Errors
    ///
    /// Returns an error if `data.len() != width * height` or a dimension
    /// is zero.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if data.len() != width as usize * height as usize {
            return Err(Error::InvalidParameter(format!(
                "data length {} does not match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        let data = data.into_iter().map(|v| (v != 0) as u8).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Mask width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total page area in pixels
    #[inline]
    pub fn page_area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Full-mask rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new_unchecked(0, 0, self.width as i32, self.height as i32)
    }

    /// Raw pixel data, row-major, one byte per pixel
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw pixel data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Get one pixel; out-of-bounds reads as background
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Set one pixel to ink (1) or background (0); out-of-bounds is ignored
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.data[y as usize * self.width as usize + x as usize] = on as u8;
    }

    /// Count ink pixels over the whole mask
    pub fn ink_count(&self) -> u64 {
        self.data.iter().map(|&v| v as u64).sum()
    }

    /// Ink pixels as a fraction of page area
    pub fn ink_ratio(&self) -> f32 {
        self.ink_count() as f32 / self.page_area() as f32
    }

    /// Logical complement: ink becomes background and vice versa
    pub fn inverted(&self) -> InkMask {
        let data = self.data.iter().map(|&v| 1 - v).collect();
        InkMask {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Subtract another mask: pixels on in `other` are cleared here
    ///
    /// # Errors
    ///
    /// Returns an error on dimension mismatch.
    pub fn subtract(&self, other: &InkMask) -> Result<InkMask> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::InvalidParameter(format!(
                "mask size mismatch: {}x{} vs {}x{}",
                self.width, self.height, other.width, other.height
            )));
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| a & (1 - b))
            .collect();
        Ok(InkMask {
            width: self.width,
            height: self.height,
            data,
        })
    }

    /// Per-row ink counts within `region` (whole mask when `None`)
    ///
    /// Returns one value per row of the region, top to bottom.
    pub fn row_sums(&self, region: Option<&Rect>) -> Vec<u32> {
        let r = self.region_or_bounds(region);
        let mut sums = vec![0u32; r.h as usize];
        let w = self.width as usize;
        for (i, sum) in sums.iter_mut().enumerate() {
            let y = (r.y + i as i32) as usize;
            let row = &self.data[y * w + r.x as usize..y * w + r.right() as usize];
            *sum = row.iter().map(|&v| v as u32).sum();
        }
        sums
    }

    /// Per-column ink counts within `region` (whole mask when `None`)
    ///
    /// Returns one value per column of the region, left to right.
    pub fn col_sums(&self, region: Option<&Rect>) -> Vec<u32> {
        let r = self.region_or_bounds(region);
        let mut sums = vec![0u32; r.w as usize];
        let w = self.width as usize;
        for dy in 0..r.h as usize {
            let y = (r.y + dy as i32) as usize;
            let row = &self.data[y * w + r.x as usize..y * w + r.right() as usize];
            for (sum, &v) in sums.iter_mut().zip(row) {
                *sum += v as u32;
            }
        }
        sums
    }

    fn region_or_bounds(&self, region: Option<&Rect>) -> Rect {
        match region {
            Some(r) => r.clip_to(self.width, self.height),
            None => self.bounds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross_mask() -> InkMask {
        // 5x5 with an ink cross through (2, 2)
        let mut m = InkMask::new(5, 5).unwrap();
        for i in 0..5 {
            m.set(i, 2, true);
            m.set(2, i, true);
        }
        m
    }

    #[test]
    fn test_new_rejects_zero_dims() {
        assert!(InkMask::new(0, 5).is_err());
        assert!(InkMask::new(5, 0).is_err());
    }

    #[test]
    fn test_from_raw_normalizes_values() {
        let m = InkMask::from_raw(2, 1, vec![255, 0]).unwrap();
        assert_eq!(m.get(0, 0), 1);
        assert_eq!(m.get(1, 0), 0);
    }

    #[test]
    fn test_out_of_bounds_reads_background() {
        let m = cross_mask();
        assert_eq!(m.get(-1, 2), 0);
        assert_eq!(m.get(5, 2), 0);
    }

    #[test]
    fn test_ink_count_and_ratio() {
        let m = cross_mask();
        assert_eq!(m.ink_count(), 9);
        assert!((m.ink_ratio() - 9.0 / 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_row_and_col_sums() {
        let m = cross_mask();
        assert_eq!(m.row_sums(None), vec![1, 1, 5, 1, 1]);
        assert_eq!(m.col_sums(None), vec![1, 1, 5, 1, 1]);
    }

    #[test]
    fn test_region_sums() {
        let m = cross_mask();
        let r = Rect::new_unchecked(0, 0, 2, 2);
        assert_eq!(m.row_sums(Some(&r)), vec![0, 0]);
        let r = Rect::new_unchecked(1, 1, 3, 3);
        assert_eq!(m.row_sums(Some(&r)), vec![1, 3, 1]);
    }

    #[test]
    fn test_invert_and_subtract() {
        let m = cross_mask();
        let inv = m.inverted();
        assert_eq!(inv.ink_count(), 25 - 9);
        let diff = m.subtract(&m).unwrap();
        assert_eq!(diff.ink_count(), 0);
    }
}
