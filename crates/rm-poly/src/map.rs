use rm_core::Point2d;
use rm_trace::PixelPoint;

/// Map a pixel index to geometric coordinates.
///
/// Raster rows grow downward from the top-left corner; the geometric frame
/// is y-up with its origin at the image's bottom-left corner and pixel
/// centers at half-integer offsets:
/// `(x, y) = (col + 0.5, image_height - row - 0.5)`.
pub fn pixel_to_geom(p: PixelPoint, image_height: usize) -> Point2d {
    Point2d::new(p.x as f64 + 0.5, image_height as f64 - p.y as f64 - 0.5)
}

/// Inverse of [`pixel_to_geom`], returning fractional `(col, row)`.
pub fn geom_to_pixel(p: Point2d, image_height: usize) -> (f64, f64) {
    (p.x - 0.5, image_height as f64 - p.y - 0.5)
}

/// Map a whole pixel loop into the geometric frame.
pub fn map_loop(pixels: &[PixelPoint], image_height: usize) -> Vec<Point2d> {
    pixels
        .iter()
        .map(|&p| pixel_to_geom(p, image_height))
        .collect()
}

#[cfg(test)]
mod tests {
    use rm_core::Point2d;
    use rm_trace::PixelPoint;

    use super::{geom_to_pixel, map_loop, pixel_to_geom};

    #[test]
    fn top_left_pixel_center() {
        let p = pixel_to_geom(PixelPoint { x: 0, y: 0 }, 4);
        assert_eq!(p, Point2d::new(0.5, 3.5));
    }

    #[test]
    fn bottom_right_pixel_center() {
        let p = pixel_to_geom(PixelPoint { x: 5, y: 3 }, 4);
        assert_eq!(p, Point2d::new(5.5, 0.5));
    }

    #[test]
    fn round_trip() {
        for (x, y) in [(0, 0), (3, 7), (12, 1)] {
            let g = pixel_to_geom(PixelPoint { x, y }, 9);
            let (col, row) = geom_to_pixel(g, 9);
            assert!((col - x as f64).abs() < 1e-12);
            assert!((row - y as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn maps_loops_pointwise() {
        let pixels = vec![PixelPoint { x: 1, y: 1 }, PixelPoint { x: 2, y: 1 }];
        let mapped = map_loop(&pixels, 3);
        assert_eq!(
            mapped,
            vec![Point2d::new(1.5, 1.5), Point2d::new(2.5, 1.5)]
        );
    }
}
