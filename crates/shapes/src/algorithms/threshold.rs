use image::{GrayImage, Luma};

use crate::traits::ThresholdSelector;

/// Value stored for foreground cells in a [`BinaryMask`]
pub const FOREGROUND: u8 = 255;
/// Value stored for background cells in a [`BinaryMask`]
pub const BACKGROUND: u8 = 0;

/// 256-bin intensity histogram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [u32; 256],
}

impl Histogram {
    pub fn from_image(image: &GrayImage) -> Self {
        let mut bins = [0u32; 256];
        for &value in image.as_raw() {
            bins[value as usize] += 1;
        }
        Self { bins }
    }

    pub fn bins(&self) -> &[u32; 256] {
        &self.bins
    }

    /// Number of pixels counted, always width * height of the source image
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| c as u64).sum()
    }
}

/// Otsu's method: maximise the between-class variance over all splits.
///
/// The returned cut point is the first intensity of the bright class, so
/// `intensity < cut` selects exactly the dark class of the best split. Ties
/// keep the darkest split. When no split leaves both classes non-empty the
/// configured fallback is returned.
#[derive(Debug, Clone)]
pub struct OtsuThreshold {
    pub fallback: u8,
}

impl Default for OtsuThreshold {
    fn default() -> Self {
        Self { fallback: 127 }
    }
}

impl ThresholdSelector for OtsuThreshold {
    fn select_threshold(&self, histogram: &Histogram) -> u8 {
        let bins = histogram.bins();
        let total = histogram.total() as f64;
        let sum: f64 = bins
            .iter()
            .enumerate()
            .map(|(i, &count)| i as f64 * count as f64)
            .sum();

        let mut weight_bg = 0.0f64;
        let mut sum_bg = 0.0f64;
        let mut best_between = 0.0f64;
        let mut best_split: Option<usize> = None;

        for (i, &count) in bins.iter().enumerate() {
            weight_bg += count as f64;
            if weight_bg == 0.0 {
                continue;
            }

            let weight_fg = total - weight_bg;
            if weight_fg == 0.0 {
                break;
            }

            sum_bg += i as f64 * count as f64;
            let mean_bg = sum_bg / weight_bg;
            let mean_fg = (sum - sum_bg) / weight_fg;
            let between = weight_bg * weight_fg * (mean_bg - mean_fg) * (mean_bg - mean_fg);

            if best_split.is_none() || between > best_between {
                best_between = between;
                best_split = Some(i);
            }
        }

        match best_split {
            // i < 255 here: the last bin always leaves the bright class empty
            Some(i) => (i + 1) as u8,
            None => self.fallback,
        }
    }
}

/// Fixed global cut point, ignoring the histogram
#[derive(Debug, Clone)]
pub struct FixedThreshold {
    pub threshold: u8,
}

impl ThresholdSelector for FixedThreshold {
    fn select_threshold(&self, _histogram: &Histogram) -> u8 {
        self.threshold
    }
}

/// Single-channel mask with cells in {0, 255}; 255 marks foreground
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryMask {
    image: GrayImage,
}

impl BinaryMask {
    pub fn from_fn<F>(width: u32, height: u32, mut is_foreground: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        let image = GrayImage::from_fn(width, height, |x, y| {
            Luma([if is_foreground(x, y) { FOREGROUND } else { BACKGROUND }])
        });
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Out-of-bounds coordinates read as background
    pub fn is_foreground(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return false;
        }
        self.image.get_pixel(x as u32, y as u32).0[0] == FOREGROUND
    }

    pub fn foreground_count(&self) -> usize {
        self.image.as_raw().iter().filter(|&&v| v == FOREGROUND).count()
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_image(self) -> GrayImage {
        self.image
    }
}

/// Pixels darker than `threshold` become foreground
pub fn binarize(image: &GrayImage, threshold: u8) -> BinaryMask {
    BinaryMask::from_fn(image.width(), image.height(), |x, y| {
        image.get_pixel(x, y).0[0] < threshold
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_level_image(dark: u8, bright: u8, dark_pixels: u32) -> GrayImage {
        let mut count = 0;
        GrayImage::from_fn(20, 10, |_, _| {
            count += 1;
            Luma([if count <= dark_pixels { dark } else { bright }])
        })
    }

    #[test]
    fn test_histogram_counts_every_pixel() {
        let image = two_level_image(3, 250, 60);
        let histogram = Histogram::from_image(&image);
        assert_eq!(histogram.total(), 200);
        assert_eq!(histogram.bins()[3], 60);
        assert_eq!(histogram.bins()[250], 140);
    }

    #[test]
    fn test_otsu_separates_two_levels() {
        let image = two_level_image(0, 255, 50);
        let t = OtsuThreshold::default().select_threshold(&Histogram::from_image(&image));
        assert_eq!(t, 1);

        let mask = binarize(&image, t);
        assert_eq!(mask.foreground_count(), 50);
    }

    #[test]
    fn test_otsu_ties_keep_darkest_split() {
        // every split between 10 and 199 yields the same variance
        let image = two_level_image(10, 200, 100);
        let t = OtsuThreshold::default().select_threshold(&Histogram::from_image(&image));
        assert_eq!(t, 11);
    }

    #[test]
    fn test_otsu_bimodal_clusters() {
        let image = GrayImage::from_fn(100, 1, |x, _| {
            Luma([if x < 50 { (x % 50) as u8 } else { 200 + (x % 50) as u8 }])
        });
        let t = OtsuThreshold::default().select_threshold(&Histogram::from_image(&image));
        assert!((50..=200).contains(&t), "otsu threshold was {t}");
    }

    #[test]
    fn test_otsu_degenerate_uses_fallback() {
        let image = GrayImage::from_pixel(10, 10, Luma([0]));
        let histogram = Histogram::from_image(&image);
        assert_eq!(OtsuThreshold::default().select_threshold(&histogram), 127);
        assert_eq!(OtsuThreshold { fallback: 30 }.select_threshold(&histogram), 30);
    }

    #[test]
    fn test_fixed_threshold() {
        let histogram = Histogram::from_image(&GrayImage::new(4, 4));
        assert_eq!(FixedThreshold { threshold: 64 }.select_threshold(&histogram), 64);
    }

    #[test]
    fn test_binarize_is_strictly_less_than() {
        let image = GrayImage::from_fn(3, 1, |x, _| Luma([[99u8, 100, 101][x as usize]]));
        let mask = binarize(&image, 100);
        assert!(mask.is_foreground(0, 0));
        assert!(!mask.is_foreground(1, 0));
        assert!(!mask.is_foreground(2, 0));
    }

    #[test]
    fn test_mask_out_of_bounds_is_background() {
        let mask = BinaryMask::from_fn(2, 2, |_, _| true);
        assert!(mask.is_foreground(1, 1));
        assert!(!mask.is_foreground(-1, 0));
        assert!(!mask.is_foreground(0, 2));
    }
}
