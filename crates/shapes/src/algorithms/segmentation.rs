use imageproc::point::Point;

use crate::{algorithms::BinaryMask, traits::RegionExtractor, types::BoundingBox};

/// A maximal 4-connected set of foreground cells
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Member pixels in flood-fill discovery order
    pub pixels: Vec<Point<u32>>,
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Region {
    fn seeded(x: u32, y: u32) -> Self {
        Self {
            pixels: Vec::new(),
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn claim(&mut self, x: u32, y: u32) {
        self.pixels.push(Point::new(x, y));
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    /// Pixel count
    pub fn area(&self) -> u32 {
        self.pixels.len() as u32
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_extents(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Smallest region area kept: `max(floor, width * height / divisor)`
pub fn min_region_area(width: u32, height: u32, floor: u32, divisor: u32) -> f64 {
    let scaled = width as f64 * height as f64 / divisor.max(1) as f64;
    (floor as f64).max(scaled)
}

/// Stack-based 4-connected flood fill.
///
/// Seeds are taken in row-major order and one visited bitmap is shared by
/// the whole scan, so every foreground cell lands in exactly one region.
/// Neighbours are pushed as +x, -x, +y, -y; pops therefore explore -y first,
/// which fixes the discovery order of each region for identical input.
#[derive(Debug, Clone, Default)]
pub struct FloodFillExtractor;

impl FloodFillExtractor {
    fn fill(
        &self,
        mask: &BinaryMask,
        visited: &mut [bool],
        seed_x: u32,
        seed_y: u32,
    ) -> Region {
        let width = mask.width() as i64;
        let mut region = Region::seeded(seed_x, seed_y);
        let mut stack: Vec<(i64, i64)> = vec![(seed_x as i64, seed_y as i64)];

        while let Some((x, y)) = stack.pop() {
            if !mask.is_foreground(x, y) {
                continue;
            }
            let idx = (y * width + x) as usize;
            if visited[idx] {
                continue;
            }

            visited[idx] = true;
            region.claim(x as u32, y as u32);

            stack.push((x + 1, y));
            stack.push((x - 1, y));
            stack.push((x, y + 1));
            stack.push((x, y - 1));
        }

        region
    }
}

impl RegionExtractor for FloodFillExtractor {
    fn extract_regions(&self, mask: &BinaryMask) -> Vec<Region> {
        let (width, height) = (mask.width(), mask.height());
        let mut visited = vec![false; width as usize * height as usize];
        let mut regions = Vec::new();

        for y in 0..height {
            for x in 0..width {
                let idx = y as usize * width as usize + x as usize;
                if visited[idx] || !mask.is_foreground(x as i64, y as i64) {
                    continue;
                }
                regions.push(self.fill(mask, &mut visited, x, y));
            }
        }

        regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_region_bounds_and_area() {
        let mask = BinaryMask::from_fn(10, 8, |x, y| (2..6).contains(&x) && (3..5).contains(&y));
        let regions = FloodFillExtractor.extract_regions(&mask);

        assert_eq!(regions.len(), 1);
        let region = &regions[0];
        assert_eq!(region.area(), 8);
        assert_eq!((region.min_x, region.min_y, region.max_x, region.max_y), (2, 3, 5, 4));
        assert_eq!(
            region.bounding_box(),
            BoundingBox { x: 2, y: 3, width: 4, height: 2 }
        );
    }

    #[test]
    fn test_diagonal_cells_are_separate_regions() {
        let mask = BinaryMask::from_fn(4, 4, |x, y| x == y);
        let regions = FloodFillExtractor.extract_regions(&mask);

        assert_eq!(regions.len(), 4);
        assert!(regions.iter().all(|r| r.area() == 1));
    }

    #[test]
    fn test_regions_in_row_major_seed_order() {
        // right block starts higher, so it is discovered first
        let mask = BinaryMask::from_fn(12, 12, |x, y| {
            ((1..4).contains(&x) && (5..9).contains(&y)) || ((7..10).contains(&x) && (2..6).contains(&y))
        });
        let regions = FloodFillExtractor.extract_regions(&mask);

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].pixels[0], Point::new(7, 2));
        assert_eq!(regions[1].pixels[0], Point::new(1, 5));
    }

    #[test]
    fn test_every_foreground_cell_claimed_once() {
        let mask = BinaryMask::from_fn(30, 20, |x, y| (x * 7 + y * 3) % 5 < 2);
        let regions = FloodFillExtractor.extract_regions(&mask);

        let claimed: usize = regions.iter().map(|r| r.pixels.len()).sum();
        assert_eq!(claimed, mask.foreground_count());
    }

    #[test]
    fn test_discovery_order_walks_columns() {
        // 3x3 block: down the first column, up the second, down the third
        let mask = BinaryMask::from_fn(3, 3, |_, _| true);
        let regions = FloodFillExtractor.extract_regions(&mask);
        let order: Vec<(u32, u32)> = regions[0].pixels.iter().map(|p| (p.x, p.y)).collect();

        assert_eq!(
            order,
            vec![(0, 0), (0, 1), (0, 2), (1, 2), (1, 1), (1, 0), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn test_min_region_area() {
        assert_eq!(min_region_area(100, 100, 50, 15_000), 50.0);
        assert_eq!(min_region_area(1500, 1000, 50, 15_000), 100.0);
    }
}
