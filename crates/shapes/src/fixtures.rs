//! Synthetic test images: dark filled shapes on a white canvas.
//!
//! Rasterisation uses integer arithmetic only so the pixel sets are exact.

use image::{Rgba, RgbaImage};

pub const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

pub fn canvas(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, PAPER)
}

/// Pixels with `(x - cx)^2 + (y - cy)^2 <= r^2`
pub fn fill_circle(image: &mut RgbaImage, cx: i64, cy: i64, r: i64) {
    fill_where(image, |x, y| (x - cx).pow(2) + (y - cy).pow(2) <= r * r);
}

/// Half-open pixel rectangle `[x0, x1) x [y0, y1)`
pub fn fill_rect(image: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32) {
    for y in y0..y1 {
        for x in x0..x1 {
            image.put_pixel(x, y, INK);
        }
    }
}

fn cross(a: (i64, i64), b: (i64, i64), x: i64, y: i64) -> i64 {
    (b.0 - a.0) * (y - a.1) - (b.1 - a.1) * (x - a.0)
}

/// Pixels on or inside the triangle
pub fn fill_triangle(image: &mut RgbaImage, a: (i64, i64), b: (i64, i64), c: (i64, i64)) {
    fill_where(image, |x, y| {
        let d = [cross(a, b, x, y), cross(b, c, x, y), cross(c, a, x, y)];
        let neg = d.iter().any(|&v| v < 0);
        let pos = d.iter().any(|&v| v > 0);
        !(neg && pos)
    });
}

/// Even-odd polygon fill
pub fn fill_polygon(image: &mut RgbaImage, vertices: &[(i64, i64)]) {
    fill_where(image, |px, py| {
        let mut inside = false;
        for (k, &(x1, y1)) in vertices.iter().enumerate() {
            let (x2, y2) = vertices[(k + 1) % vertices.len()];
            if (y1 > py) != (y2 > py) {
                let lhs = (px - x1) * (y2 - y1);
                let rhs = (py - y1) * (x2 - x1);
                if (y2 > y1 && lhs < rhs) || (y2 < y1 && lhs > rhs) {
                    inside = !inside;
                }
            }
        }
        inside
    });
}

/// Equilateral-ish triangle of the given height, apex up, centred on (cx, cy)
pub fn fill_upright_triangle(image: &mut RgbaImage, cx: i64, cy: i64, height: i64, base: i64) {
    let top = cy - height / 2;
    let bottom = top + height;
    fill_triangle(
        image,
        (cx, top),
        (cx - base / 2, bottom),
        (cx + base / 2, bottom),
    );
}

/// Five-pointed star, outer radius 60 / inner radius 24, centred on (100, 100)
pub const STAR_VERTICES: [(i64, i64); 10] = [
    (100, 40), (114, 81), (157, 81), (123, 107), (135, 149),
    (100, 124), (65, 149), (77, 107), (43, 81), (86, 81),
];

fn fill_where<F>(image: &mut RgbaImage, inside: F)
where
    F: Fn(i64, i64) -> bool,
{
    for y in 0..image.height() {
        for x in 0..image.width() {
            if inside(x as i64, y as i64) {
                image.put_pixel(x, y, INK);
            }
        }
    }
}
