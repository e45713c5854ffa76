//! Parametric shapes drawn from a fixed anchor to the live cursor.

use super::raster::{RasterSurface, StrokeStyle, SurfaceError};
use crate::input::ShapeKind;
use crate::util::{self, Point, Rect};

/// Arrowhead parameters. Barb length does not scale with the shaft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowSpec {
    /// Barb length in buffer pixels
    pub length: f64,
    /// Barb angle from the reversed shaft, in degrees
    pub angle_degrees: f64,
}

impl Default for ArrowSpec {
    fn default() -> Self {
        Self {
            length: 20.0,
            angle_degrees: 30.0,
        }
    }
}

/// A stroke-only shape resolved from an (anchor, cursor) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Straight segment from anchor to cursor
    Line { from: Point, to: Point },
    /// Axis-aligned rectangle spanned by anchor and cursor (normalized)
    Rect(Rect),
    /// Circle centered on the anchor, radius = distance to the cursor
    Circle { center: Point, radius: f64 },
    /// Shaft from anchor to cursor plus two barbs at the cursor end
    Arrow {
        tail: Point,
        tip: Point,
        barbs: [Point; 2],
    },
}

impl Shape {
    /// Resolves the shape a gesture of `kind` describes.
    pub fn from_drag(kind: ShapeKind, anchor: Point, cursor: Point, arrow: &ArrowSpec) -> Self {
        match kind {
            ShapeKind::Line => Shape::Line {
                from: anchor,
                to: cursor,
            },
            ShapeKind::Rectangle => Shape::Rect(Rect::from_corners(anchor, cursor)),
            ShapeKind::Ellipse => Shape::Circle {
                center: anchor,
                radius: anchor.distance_to(cursor),
            },
            ShapeKind::Arrow => Shape::Arrow {
                tail: anchor,
                tip: cursor,
                barbs: util::arrow_barbs(anchor, cursor, arrow.length, arrow.angle_degrees),
            },
        }
    }

    /// Strokes the shape onto `surface`.
    pub fn render<S: RasterSurface>(
        &self,
        surface: &mut S,
        style: &StrokeStyle,
    ) -> Result<(), SurfaceError> {
        match *self {
            Shape::Line { from, to } => surface.stroke_polyline(&[from, to], style),
            Shape::Rect(rect) => surface.stroke_rect(rect, style),
            Shape::Circle { center, radius } => surface.stroke_circle(center, radius, style),
            Shape::Arrow { tail, tip, barbs } => {
                surface.stroke_polyline(&[tail, tip, barbs[0]], style)?;
                surface.stroke_polyline(&[tip, barbs[1]], style)
            }
        }
    }

    /// Axis-aligned bounds, expanded by half the stroke width.
    pub fn bounds(&self, stroke_width: f64) -> Rect {
        let padding = (stroke_width / 2.0).max(0.5);
        let raw = match *self {
            Shape::Line { from, to } => Rect::from_corners(from, to),
            Shape::Rect(rect) => rect,
            Shape::Circle { center, radius } => Rect {
                x: center.x - radius,
                y: center.y - radius,
                width: radius * 2.0,
                height: radius * 2.0,
            },
            Shape::Arrow { tail, tip, barbs } => {
                // enclosing() only fails on an empty slice
                Rect::enclosing(&[tail, tip, barbs[0], barbs[1]]).unwrap_or(Rect {
                    x: tip.x,
                    y: tip.y,
                    width: 0.0,
                    height: 0.0,
                })
            }
        };
        raw.inflate(padding)
    }
}
