//! Geometry helpers shared by the surface, the shape renderers and the replay driver.
//!
//! This module provides:
//! - [`Point`] and [`Size`] value types in either element (CSS) or buffer pixel space
//! - Element-to-buffer coordinate mapping
//! - Rectangle normalization for negative extents
//! - Arrow barb geometry

use serde::{Deserialize, Serialize};

// ============================================================================
// Value Types
// ============================================================================

/// A 2D position. The coordinate space depends on where it came from: pointer
/// events carry element-relative positions, the gesture machine stores buffer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Width/height pair, used both for layout boxes and rendered element sizes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns true when either dimension is zero (or negative), i.e. the
    /// element has not been laid out yet.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Converts a layout box into whole buffer pixel dimensions.
    ///
    /// Fractional layout sizes are truncated, matching how a raster element's
    /// intrinsic size is assigned from a CSS size.
    pub fn to_pixels(&self) -> (u32, u32) {
        let clamp = |v: f64| {
            if v.is_finite() && v > 0.0 {
                v.floor().min(u32::MAX as f64) as u32
            } else {
                0
            }
        };
        (clamp(self.width), clamp(self.height))
    }
}

// ============================================================================
// Coordinate Mapping
// ============================================================================

/// Maps an element-relative pointer position into buffer pixel space.
///
/// The x and y offsets are scaled independently by `buffer / rendered`. The
/// rendered size must be supplied per event since layout can change without a
/// buffer resize.
///
/// # Returns
/// `None` when the rendered size has a zero dimension (element not laid out).
pub fn element_to_buffer(position: Point, rendered: Size, buffer: (u32, u32)) -> Option<Point> {
    if rendered.is_empty() {
        return None;
    }
    let scale_x = buffer.0 as f64 / rendered.width;
    let scale_y = buffer.1 as f64 / rendered.height;
    Some(Point::new(position.x * scale_x, position.y * scale_y))
}

/// Inverse of [`element_to_buffer`]: buffer pixels back to element coordinates.
///
/// Returns `None` when the buffer has a zero dimension.
pub fn buffer_to_element(position: Point, rendered: Size, buffer: (u32, u32)) -> Option<Point> {
    if buffer.0 == 0 || buffer.1 == 0 {
        return None;
    }
    let scale_x = rendered.width / buffer.0 as f64;
    let scale_y = rendered.height / buffer.1 as f64;
    Some(Point::new(position.x * scale_x, position.y * scale_y))
}

// ============================================================================
// Rectangles
// ============================================================================

/// Axis-aligned rectangle with non-negative extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Builds a rectangle from two opposite corners in any order.
    ///
    /// A drag up and/or left of the anchor produces negative raw extents; the
    /// result is normalized so swapping the corners yields the same rectangle.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// Expands the rectangle evenly in all directions by `amount`.
    pub fn inflate(self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    /// Smallest rectangle covering every point.
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in rest {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }
}

// ============================================================================
// Arrow Geometry
// ============================================================================

/// Calculates the two barb endpoints of an arrowhead at `tip`.
///
/// The shaft runs from `tail` to `tip`. Each barb is rotated by
/// `angle_degrees` from the reversed shaft direction and has a fixed `length`,
/// independent of the shaft length.
///
/// A zero-length shaft is not an error: `atan2(0, 0)` is 0, so the barbs are
/// drawn as if the shaft pointed along +x.
///
/// # Returns
/// `[(left), (right)]` barb endpoints.
pub fn arrow_barbs(tail: Point, tip: Point, length: f64, angle_degrees: f64) -> [Point; 2] {
    let angle = (tip.y - tail.y).atan2(tip.x - tail.x);
    let spread = angle_degrees.to_radians();

    let barb = |theta: f64| Point::new(tip.x - length * theta.cos(), tip.y - length * theta.sin());

    [barb(angle - spread), barb(angle + spread)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_scales_axes_independently() {
        let mapped = element_to_buffer(
            Point::new(50.0, 30.0),
            Size::new(200.0, 100.0),
            (400, 300),
        )
        .expect("rendered size is non-zero");
        assert_eq!(mapped, Point::new(100.0, 90.0));
    }

    #[test]
    fn mapping_is_undefined_without_layout() {
        assert!(element_to_buffer(Point::new(1.0, 1.0), Size::new(0.0, 100.0), (400, 300)).is_none());
        assert!(element_to_buffer(Point::new(1.0, 1.0), Size::new(100.0, 0.0), (400, 300)).is_none());
    }

    #[test]
    fn mapping_round_trips_within_a_pixel() {
        let ratios = [
            (Size::new(400.0, 300.0), (400, 300)),
            (Size::new(123.5, 77.25), (640, 480)),
            (Size::new(1920.0, 1080.0), (37, 19)),
            (Size::new(3.0, 7.0), (4096, 2048)),
        ];
        for (rendered, buffer) in ratios {
            for &(x, y) in &[(0.0, 0.0), (1.0, 2.0), (33.3, 12.9), (rendered.width, rendered.height)] {
                let original = Point::new(x, y);
                let there = element_to_buffer(original, rendered, buffer).unwrap();
                let back = buffer_to_element(there, rendered, buffer).unwrap();
                assert!((back.x - original.x).abs() <= 1.0, "{rendered:?} {buffer:?} x");
                assert!((back.y - original.y).abs() <= 1.0, "{rendered:?} {buffer:?} y");
            }
        }
    }

    #[test]
    fn layout_sizes_truncate_to_pixels() {
        assert_eq!(Size::new(400.7, 300.2).to_pixels(), (400, 300));
        assert_eq!(Size::new(-5.0, f64::NAN).to_pixels(), (0, 0));
        assert!(Size::new(0.0, 10.0).is_empty());
        assert!(!Size::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn rect_from_reversed_corners_is_identical() {
        let forward = Rect::from_corners(Point::new(10.0, 20.0), Point::new(60.0, 90.0));
        let reversed = Rect::from_corners(Point::new(60.0, 90.0), Point::new(10.0, 20.0));
        let mixed = Rect::from_corners(Point::new(60.0, 20.0), Point::new(10.0, 90.0));
        assert_eq!(forward, reversed);
        assert_eq!(forward, mixed);
        assert_eq!(
            forward,
            Rect {
                x: 10.0,
                y: 20.0,
                width: 50.0,
                height: 70.0
            }
        );
    }

    #[test]
    fn barbs_have_fixed_length_and_thirty_degree_spread() {
        let tip = Point::new(200.0, 100.0);
        let [left, right] = arrow_barbs(Point::new(100.0, 100.0), tip, 20.0, 30.0);
        assert!((tip.distance_to(left) - 20.0).abs() < 1e-9);
        assert!((tip.distance_to(right) - 20.0).abs() < 1e-9);
        // Shaft points along +x, so barbs trail back to the left, mirrored vertically.
        assert!(left.x < tip.x && right.x < tip.x);
        assert!((left.y - tip.y + (right.y - tip.y)).abs() < 1e-9);
        let expected_dy = 20.0 * (30.0f64).to_radians().sin();
        assert!(((left.y - tip.y).abs() - expected_dy).abs() < 1e-9);
    }

    #[test]
    fn barbs_for_zero_length_shaft_trail_along_positive_x() {
        let tip = Point::new(50.0, 50.0);
        let [left, right] = arrow_barbs(tip, tip, 20.0, 30.0);
        let dx = 20.0 * (30.0f64).to_radians().cos();
        assert!((left.x - (50.0 - dx)).abs() < 1e-9);
        assert!((right.x - (50.0 - dx)).abs() < 1e-9);
        assert!(left.y.is_finite() && right.y.is_finite());
    }
}
