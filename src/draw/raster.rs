//! Raster surface abstraction used by the sketch surface.
//!
//! The gesture machine and shape renderers only talk to [`RasterSurface`], so
//! they can run against the Cairo image backend or an in-memory recorder in tests.

use super::color::Color;
use crate::util::{Point, Rect};
use thiserror::Error;

/// Stroke parameters applied to one drawing operation.
///
/// All strokes use round caps and round joins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Line width in buffer pixels
    pub width: f64,
}

/// Errors raised by a raster backend.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("failed to encode surface: {0}")]
    Encode(String),

    #[error("failed to decode image: {0}")]
    Decode(String),
}

/// Minimal raster interface: fills, stroked paths, compositing and encoding.
///
/// A zero-sized surface is valid; drawing into it is a no-op.
pub trait RasterSurface: Sized {
    /// Creates a new, fully transparent surface.
    fn create(width: u32, height: u32) -> Result<Self, SurfaceError>;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Returns true when either dimension is zero.
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Opaque fill of the entire surface.
    fn fill(&mut self, color: Color) -> Result<(), SurfaceError>;

    /// Resets every pixel to transparent.
    fn clear(&mut self) -> Result<(), SurfaceError>;

    /// Strokes an open polyline through `points`.
    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle) -> Result<(), SurfaceError>;

    /// Strokes the outline of an axis-aligned rectangle.
    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) -> Result<(), SurfaceError>;

    /// Strokes a full circle.
    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f64,
        style: &StrokeStyle,
    ) -> Result<(), SurfaceError>;

    /// Draws `source` over this surface at the origin (source-over blend).
    fn composite(&mut self, source: &Self) -> Result<(), SurfaceError>;

    /// Lossless encoding of the current pixels (PNG for the Cairo backend).
    fn encode_png(&self) -> Result<Vec<u8>, SurfaceError>;
}
