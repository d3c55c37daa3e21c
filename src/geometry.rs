//! Planar angle computation between three landmarks.
//!
//! Angles are signed and left unnormalized: the difference of two `atan2`
//! terms lies in the open interval `(-360°, 360°)`. Wrapping into
//! `(-180°, 180°]` would change which value ends up as the tracked
//! maximum or minimum, so callers receive the raw difference.

use crate::{utils::safe_cast::f64_to_i32_clamp, Result};
use opencv::core::Point;

/// A point in normalized image coordinates
///
/// `x` grows to the right and `y` grows downwards, both relative to the
/// frame width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point2D {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Reflect the point across the vertical axis
    #[must_use]
    pub fn mirrored(self) -> Self {
        Self::new(-self.x, self.y)
    }

    /// Position of the point in a horizontally flipped frame
    #[must_use]
    pub fn flipped(self) -> Self {
        Self::new(1.0 - self.x, self.y)
    }

    /// Scale the point to pixel coordinates of a `width` × `height` frame
    ///
    /// # Errors
    ///
    /// Returns an error if the frame dimensions are not positive
    pub fn to_pixel(self, width: i32, height: i32) -> Result<Point> {
        if width <= 0 || height <= 0 {
            return Err(crate::Error::InvalidInput(format!(
                "Invalid frame size {width}x{height}"
            )));
        }
        Ok(Point::new(
            f64_to_i32_clamp(self.x * f64::from(width), i32::MIN, i32::MAX),
            f64_to_i32_clamp(self.y * f64::from(height), i32::MIN, i32::MAX),
        ))
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Signed angle in degrees at vertex `b` from ray `b→a` to ray `b→c`
///
/// With `mirror` set, every point is reflected across the vertical axis
/// first, which flips the sign of the result.
///
/// If `a` or `c` coincides with `b`, the corresponding term is
/// `atan2(0, 0) = 0`. NaN coordinates yield a NaN angle.
#[must_use]
pub fn calculate_angle(a: Point2D, b: Point2D, c: Point2D, mirror: bool) -> f64 {
    let (a, b, c) = if mirror {
        (a.mirrored(), b.mirrored(), c.mirrored())
    } else {
        (a, b, c)
    };

    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    radians.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_right_angle() {
        let angle = calculate_angle(
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
            false,
        );
        // atan2(1, 0) - atan2(0, -1) = 90 - 180
        assert!((angle - (-90.0)).abs() < EPS);
    }

    #[test]
    fn test_mirror_negates_angle() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(1.0, 0.0);
        let c = Point2D::new(1.0, 1.0);

        let plain = calculate_angle(a, b, c, false);
        let mirrored = calculate_angle(a, b, c, true);
        assert!((plain + mirrored).abs() < EPS);
    }

    #[test]
    fn test_degenerate_vertex() {
        let b = Point2D::new(0.5, 0.5);
        let c = Point2D::new(0.5, 1.0);

        // a == b contributes atan2(0, 0) = 0, leaving only the c term
        let angle = calculate_angle(b, b, c, false);
        assert!((angle - 90.0).abs() < EPS);

        assert_eq!(calculate_angle(b, b, b, false), 0.0);
    }

    #[test]
    fn test_unbounded_range() {
        // Rays just below and just above the negative x axis
        let b = Point2D::new(0.0, 0.0);
        let a = Point2D::new(-1.0, -1e-6);
        let c = Point2D::new(-1.0, 1e-6);

        let angle = calculate_angle(a, b, c, false);
        assert!(angle > 359.0 && angle < 360.0, "got {angle}");
    }

    #[test]
    fn test_nan_propagates() {
        let angle = calculate_angle(
            Point2D::new(f64::NAN, 0.0),
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            false,
        );
        assert!(angle.is_nan());
    }

    #[test]
    fn test_flipped_stays_in_frame() {
        let point = Point2D::new(0.25, 0.75).flipped();
        assert!((point.x - 0.75).abs() < EPS);
        assert_eq!(point.y, 0.75);
        assert_eq!(Point2D::new(0.5, 0.1).flipped(), Point2D::new(0.5, 0.1));
    }

    #[test]
    fn test_to_pixel() {
        let point = Point2D::new(0.25, 0.5).to_pixel(640, 480).unwrap();
        assert_eq!(point, Point::new(160, 240));

        assert!(Point2D::new(0.5, 0.5).to_pixel(0, 480).is_err());
    }
}
