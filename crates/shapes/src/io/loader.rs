use std::path::Path;

use image::RgbaImage;

use crate::error::Result;

/// Decode an image file into the RGBA layout the pipeline consumes
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

/// Decode an in-memory encoded image (PNG, JPEG, ...)
pub fn load_rgba_from_bytes(bytes: &[u8]) -> Result<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}
