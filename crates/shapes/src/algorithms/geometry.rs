use std::f64::consts::PI;

use imageproc::point::Point;

use crate::{
    algorithms::{BinaryMask, Region},
    config::CornerConfig,
};

/// Region pixels with at least one 4-neighbour outside the mask's foreground,
/// kept in the region's discovery order.
pub fn border_pixels(region: &Region, mask: &BinaryMask) -> Vec<Point<u32>> {
    region
        .pixels
        .iter()
        .filter(|p| {
            let (x, y) = (p.x as i64, p.y as i64);
            !(mask.is_foreground(x + 1, y)
                && mask.is_foreground(x - 1, y)
                && mask.is_foreground(x, y + 1)
                && mask.is_foreground(x, y - 1))
        })
        .copied()
        .collect()
}

/// Count sharp turns along the border list.
///
/// Samples triples `i, i + s, i + 2s` (wrapping) with
/// `s = max(min_step, n / samples_per_contour)` and counts the turn angles
/// strictly inside the configured band.
pub fn count_corners(edges: &[Point<u32>], config: &CornerConfig) -> usize {
    let n = edges.len();
    if n == 0 {
        return 0;
    }
    let step = config.min_step.max(n / config.samples_per_contour.max(1)).max(1);

    (0..n)
        .step_by(step)
        .filter(|&i| {
            let p1 = edges[i];
            let p2 = edges[(i + step) % n];
            let p3 = edges[(i + 2 * step) % n];
            turn_angle(p1, p2, p3)
                .is_some_and(|angle| angle > config.min_angle && angle < config.max_angle)
        })
        .count()
}

/// Angle between `p2 - p1` and `p3 - p2`; `None` if either is zero length
fn turn_angle(p1: Point<u32>, p2: Point<u32>, p3: Point<u32>) -> Option<f64> {
    let v1 = (p2.x as f64 - p1.x as f64, p2.y as f64 - p1.y as f64);
    let v2 = (p3.x as f64 - p2.x as f64, p3.y as f64 - p2.y as f64);

    let mag1 = v1.0.hypot(v1.1);
    let mag2 = v2.0.hypot(v2.1);
    if mag1 == 0.0 || mag2 == 0.0 {
        return None;
    }

    let cos = (v1.0 * v2.0 + v1.1 * v2.1) / (mag1 * mag2);
    Some(cos.clamp(-1.0, 1.0).acos())
}

/// `4 * pi * area / perimeter^2`; zero when the perimeter is zero
pub fn circularity(area: u32, perimeter: usize) -> f64 {
    if perimeter == 0 {
        return 0.0;
    }
    let perimeter = perimeter as f64;
    4.0 * PI * area as f64 / (perimeter * perimeter)
}

/// Share of the bounding box covered by the region
pub fn fill_ratio(region: &Region) -> f64 {
    region.area() as f64 / region.bounding_box().area() as f64
}

/// Geometric measurements feeding the classifier
#[derive(Debug, Clone, PartialEq)]
pub struct RegionMetrics {
    pub area: u32,
    /// Border pixel count
    pub perimeter: usize,
    pub corners: usize,
    pub circularity: f64,
    pub fill_ratio: f64,
}

impl RegionMetrics {
    pub fn measure(region: &Region, mask: &BinaryMask, config: &CornerConfig) -> Self {
        let edges = border_pixels(region, mask);
        let area = region.area();

        Self {
            area,
            perimeter: edges.len(),
            corners: count_corners(&edges, config),
            circularity: circularity(area, edges.len()),
            fill_ratio: fill_ratio(region),
        }
    }
}
