use image::GrayImage;

use crate::error::{Result, ShapeError};

/// BT.601 luma, rounded half away from zero. Alpha is not an input.
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let gray = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    gray.round().clamp(0.0, 255.0) as u8
}

/// Check that `rgba` holds exactly `width * height` RGBA pixels
pub fn validate_rgba(rgba: &[u8], width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ShapeError::ZeroDimensions { width, height });
    }

    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(ShapeError::InvalidInput {
            width,
            height,
            expected,
            actual: rgba.len(),
        });
    }

    Ok(())
}

/// Convert an interleaved RGBA buffer to a single-channel intensity image
pub fn to_grayscale(rgba: &[u8], width: u32, height: u32) -> Result<GrayImage> {
    validate_rgba(rgba, width, height)?;

    let intensities: Vec<u8> = rgba
        .chunks_exact(4)
        .map(|px| luminance(px[0], px[1], px[2]))
        .collect();

    GrayImage::from_raw(width, height, intensities).ok_or(ShapeError::InvalidInput {
        width,
        height,
        expected: width as usize * height as usize,
        actual: rgba.len() / 4,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_weights() {
        assert_eq!(luminance(0, 0, 0), 0);
        assert_eq!(luminance(255, 255, 255), 255);
        // 0.299 * 255 = 76.245
        assert_eq!(luminance(255, 0, 0), 76);
        // 0.587 * 255 = 149.685
        assert_eq!(luminance(0, 255, 0), 150);
        // 0.114 * 255 = 29.07
        assert_eq!(luminance(0, 0, 255), 29);
    }

    #[test]
    fn test_alpha_is_ignored() {
        let rgba = [10, 20, 30, 0, 10, 20, 30, 255];
        let gray = to_grayscale(&rgba, 2, 1).unwrap();
        assert_eq!(gray.get_pixel(0, 0), gray.get_pixel(1, 0));
    }

    #[test]
    fn test_row_major_layout() {
        let mut rgba = vec![255u8; 3 * 2 * 4];
        // pixel (2, 1) -> index 1 * 3 + 2
        let base = (1 * 3 + 2) * 4;
        rgba[base..base + 3].copy_from_slice(&[0, 0, 0]);

        let gray = to_grayscale(&rgba, 3, 2).unwrap();
        assert_eq!(gray.get_pixel(2, 1).0[0], 0);
        assert_eq!(gray.get_pixel(0, 0).0[0], 255);
    }

    #[test]
    fn test_length_mismatch_is_invalid_input() {
        let err = to_grayscale(&[0u8; 15], 2, 2).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(matches!(err, ShapeError::InvalidInput { expected: 16, actual: 15, .. }));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = to_grayscale(&[], 0, 5).unwrap_err();
        assert!(matches!(err, ShapeError::ZeroDimensions { width: 0, height: 5 }));
    }
}
