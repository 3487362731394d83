use std::path::Path;

use image::{Rgba, RgbaImage};
use imageproc::{
    drawing::{draw_cross_mut, draw_hollow_rect_mut},
    rect::Rect,
};

use crate::{
    error::{Result, ShapeError},
    types::{DetectionResult, ShapeKind},
};

/// Overlay colour per shape kind
pub fn shape_color(kind: ShapeKind) -> Rgba<u8> {
    match kind {
        ShapeKind::Circle => Rgba([230, 25, 75, 255]),
        ShapeKind::Triangle => Rgba([60, 180, 75, 255]),
        ShapeKind::Rectangle => Rgba([0, 130, 200, 255]),
        ShapeKind::Pentagon => Rgba([245, 130, 48, 255]),
        ShapeKind::Star => Rgba([145, 30, 180, 255]),
    }
}

/// Copy of `image` with each shape's bounding box and centre drawn on top
pub fn annotate(image: &RgbaImage, result: &DetectionResult) -> RgbaImage {
    let mut canvas = image.clone();

    for shape in &result.shapes {
        let color = shape_color(shape.kind);
        let bbox = shape.bounding_box;
        let rect = Rect::at(bbox.x as i32, bbox.y as i32).of_size(bbox.width, bbox.height);

        draw_hollow_rect_mut(&mut canvas, rect, color);
        draw_cross_mut(
            &mut canvas,
            color,
            shape.center.x.round() as i32,
            shape.center.y.round() as i32,
        );
    }

    canvas
}

pub fn save_annotated<P: AsRef<Path>>(
    image: &RgbaImage,
    result: &DetectionResult,
    path: P,
) -> Result<()> {
    annotate(image, result)
        .save(path)
        .map_err(ShapeError::ImageSave)
}
