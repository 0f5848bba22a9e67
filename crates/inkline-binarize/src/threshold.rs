//! Ink thresholding
//!
//! Global (Otsu) and mean-adaptive binarization, plus the automatic
//! candidate selection used by the extractor. All masks are inverted:
//! dark page pixels become ink (1), paper becomes background (0).

use image::{DynamicImage, GrayImage};
use imageproc::filter::gaussian_blur_f32;
use inkline_core::InkMask;

use crate::error::{BinarizeError, BinarizeResult};

/// Options for automatic binarization
#[derive(Debug, Clone)]
pub struct BinarizeOptions {
    /// Gaussian smoothing sigma applied before thresholding (default: 1.1,
    /// equivalent to a 5x5 kernel)
    pub sigma: f32,
    /// Whether to also produce a mean-adaptive candidate (default: true)
    pub adaptive: bool,
    /// Side of the square adaptive window (default: 31)
    pub adaptive_window: u32,
    /// Offset subtracted from the local mean (default: 10)
    pub adaptive_offset: i32,
    /// Lowest plausible ink/page-area ratio (default: 0.01)
    pub min_ink_ratio: f32,
    /// Highest plausible ink/page-area ratio (default: 0.70)
    pub max_ink_ratio: f32,
    /// Preferred ink/page-area ratio (default: 0.20)
    pub target_ink_ratio: f32,
}

impl Default for BinarizeOptions {
    fn default() -> Self {
        Self {
            sigma: 1.1,
            adaptive: true,
            adaptive_window: 31,
            adaptive_offset: 10,
            min_ink_ratio: 0.01,
            max_ink_ratio: 0.70,
            target_ink_ratio: 0.20,
        }
    }
}

impl BinarizeOptions {
    /// Set the smoothing sigma
    pub fn with_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }

    /// Enable or disable the adaptive candidate
    pub fn with_adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = adaptive;
        self
    }

    /// Set the adaptive window side and mean offset
    pub fn with_adaptive_params(mut self, window: u32, offset: i32) -> Self {
        self.adaptive_window = window;
        self.adaptive_offset = offset;
        self
    }
}

/// Convert a decoded page to 8-bit grayscale
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    image.to_luma8()
}

/// Gaussian smoothing; `sigma <= 0` returns the input unchanged
pub fn smooth(gray: &GrayImage, sigma: f32) -> GrayImage {
    if sigma <= 0.0 {
        return gray.clone();
    }
    gaussian_blur_f32(gray, sigma)
}

/// Compute Otsu's threshold for a grayscale image
///
/// Maximizes the between-class variance. The returned level splits the
/// histogram so that values `<= level` form the dark class.
///
/// # Errors
///
/// Returns an error on an empty image.
pub fn otsu_level(gray: &GrayImage) -> BinarizeResult<u8> {
    let total = gray.width() as u64 * gray.height() as u64;
    if total == 0 {
        return Err(BinarizeError::EmptyImage);
    }

    let mut hist = [0u64; 256];
    for p in gray.pixels() {
        hist[p.0[0] as usize] += 1;
    }

    let sum_all: u64 = hist
        .iter()
        .enumerate()
        .map(|(v, &c)| v as u64 * c)
        .sum();

    let mut weight_bg = 0u64;
    let mut sum_bg = 0u64;
    let mut best_level = 0u8;
    let mut best_variance = 0.0f64;

    for level in 0..256usize {
        weight_bg += hist[level];
        if weight_bg == 0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0 {
            break;
        }
        sum_bg += level as u64 * hist[level];

        let mean_bg = sum_bg as f64 / weight_bg as f64;
        let mean_fg = (sum_all - sum_bg) as f64 / weight_fg as f64;
        let diff = mean_bg - mean_fg;
        let variance = weight_bg as f64 * weight_fg as f64 * diff * diff;

        if variance > best_variance {
            best_variance = variance;
            best_level = level as u8;
        }
    }

    Ok(best_level)
}

/// Binarize at a fixed level: pixels `<= level` become ink
///
/// # Errors
///
/// Returns an error on an empty image.
pub fn binarize_at(gray: &GrayImage, level: u8) -> BinarizeResult<InkMask> {
    let mut mask = InkMask::new(gray.width(), gray.height())?;
    for (pixel, out) in gray.pixels().zip(mask.data_mut()) {
        *out = (pixel.0[0] <= level) as u8;
    }
    Ok(mask)
}

/// Mean-adaptive binarization
///
/// A pixel becomes ink when it is darker than the mean of its square
/// `window`-sided neighborhood by more than `offset`. The window is
/// clipped at the image border.
///
/// # Errors
///
/// Returns an error on an empty image or a window smaller than 3.
pub fn binarize_adaptive(gray: &GrayImage, window: u32, offset: i32) -> BinarizeResult<InkMask> {
    if window < 3 {
        return Err(BinarizeError::InvalidParameters(format!(
            "adaptive window must be >= 3: {}",
            window
        )));
    }
    let w = gray.width() as usize;
    let h = gray.height() as usize;
    let mut mask = InkMask::new(gray.width(), gray.height())?;

    // Summed-area table with a zero top row and left column.
    let mut integral = vec![0u64; (w + 1) * (h + 1)];
    for y in 0..h {
        let mut row_sum = 0u64;
        for x in 0..w {
            row_sum += gray.get_pixel(x as u32, y as u32).0[0] as u64;
            integral[(y + 1) * (w + 1) + (x + 1)] = integral[y * (w + 1) + (x + 1)] + row_sum;
        }
    }

    let half = (window / 2) as usize;
    let out = mask.data_mut();
    for y in 0..h {
        let y0 = y.saturating_sub(half);
        let y1 = (y + half + 1).min(h);
        for x in 0..w {
            let x0 = x.saturating_sub(half);
            let x1 = (x + half + 1).min(w);
            let area = ((y1 - y0) * (x1 - x0)) as u64;
            let sum = integral[y1 * (w + 1) + x1] + integral[y0 * (w + 1) + x0]
                - integral[y0 * (w + 1) + x1]
                - integral[y1 * (w + 1) + x0];
            let mean = (sum / area) as i32;
            let p = gray.get_pixel(x as u32, y as u32).0[0] as i32;
            out[y * w + x] = (p < mean - offset) as u8;
        }
    }
    Ok(mask)
}

/// Binarize with automatic candidate selection
///
/// Runs the global Otsu threshold and, when enabled, the mean-adaptive
/// variant, then keeps the candidate whose ink ratio falls inside
/// `[min_ink_ratio, max_ink_ratio]` and is closest to `target_ink_ratio`.
/// When no candidate qualifies, the one with the least ink wins: an
/// empty mask degrades to fallback synthesis downstream, while an
/// all-ink mask would poison line banding.
///
/// # Errors
///
/// Returns an error on an empty image.
pub fn binarize_auto(gray: &GrayImage, options: &BinarizeOptions) -> BinarizeResult<InkMask> {
    let smoothed = smooth(gray, options.sigma);

    let level = otsu_level(&smoothed)?;
    let mut candidates = vec![binarize_at(&smoothed, level)?];
    if options.adaptive {
        candidates.push(binarize_adaptive(
            &smoothed,
            options.adaptive_window,
            options.adaptive_offset,
        )?);
    }

    let ratios: Vec<f32> = candidates.iter().map(|m| m.ink_ratio()).collect();
    let mut best: Option<(usize, f32)> = None;
    for (i, &ratio) in ratios.iter().enumerate() {
        if ratio < options.min_ink_ratio || ratio > options.max_ink_ratio {
            continue;
        }
        let dist = (ratio - options.target_ink_ratio).abs();
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((i, dist));
        }
    }
    let chosen = best.map(|(i, _)| i).unwrap_or_else(|| {
        ratios
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap_or(0)
    });

    tracing::debug!(
        candidate = chosen,
        ratio = ratios[chosen],
        otsu = level,
        "selected ink mask"
    );
    Ok(candidates.swap_remove(chosen))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bimodal_page() -> GrayImage {
        // 100x100 white page with a 20-row dark band.
        GrayImage::from_fn(100, 100, |_, y| {
            if (40..60).contains(&y) {
                image::Luma([20u8])
            } else {
                image::Luma([230u8])
            }
        })
    }

    #[test]
    fn test_otsu_separates_bimodal() {
        let level = otsu_level(&bimodal_page()).unwrap();
        assert!(level >= 20 && level < 230, "level = {}", level);
    }

    #[test]
    fn test_binarize_at_inverts() {
        let mask = binarize_at(&bimodal_page(), 128).unwrap();
        // Ink is the dark band only: 20 rows of 100 pixels.
        assert_eq!(mask.ink_count(), 2000);
        assert_eq!(mask.get(50, 50), 1);
        assert_eq!(mask.get(50, 10), 0);
    }

    #[test]
    fn test_adaptive_finds_local_ink() {
        // Gradient background with a dark dot; a global threshold on the
        // gradient alone would split the page in half.
        let gray = GrayImage::from_fn(64, 64, |x, _| image::Luma([(100 + x * 2) as u8]));
        let mut gray = gray;
        gray.put_pixel(32, 32, image::Luma([10u8]));
        let mask = binarize_adaptive(&gray, 15, 10).unwrap();
        assert_eq!(mask.get(32, 32), 1);
        assert!(mask.ink_ratio() < 0.05);
    }

    #[test]
    fn test_adaptive_rejects_tiny_window() {
        let gray = GrayImage::new(8, 8);
        assert!(binarize_adaptive(&gray, 1, 0).is_err());
    }

    #[test]
    fn test_auto_picks_plausible_candidate() {
        let mask = binarize_auto(&bimodal_page(), &BinarizeOptions::default()).unwrap();
        let ratio = mask.ink_ratio();
        assert!(ratio > 0.01 && ratio < 0.70, "ratio = {}", ratio);
    }

    #[test]
    fn test_auto_never_all_ink_on_uniform_dark_page() {
        let gray = GrayImage::from_pixel(50, 50, image::Luma([5u8]));
        let mask = binarize_auto(&gray, &BinarizeOptions::default()).unwrap();
        assert!(mask.ink_ratio() < 0.70);
    }

    #[test]
    fn test_otsu_rejects_empty() {
        let gray = GrayImage::new(0, 0);
        assert!(otsu_level(&gray).is_err());
    }
}
