//! Cairo image-surface backend for [`RasterSurface`].

use super::color::Color;
use super::raster::{RasterSurface, StrokeStyle, SurfaceError};
use crate::util::{Point, Rect};
use std::io::Cursor;

/// Largest dimension Cairo accepts for image surfaces.
const MAX_DIMENSION: u32 = 32_767;

/// An ARGB32 Cairo image surface. Works headless, no display connection needed.
pub struct CairoSurface {
    surface: cairo::ImageSurface,
    width: u32,
    height: u32,
}

impl CairoSurface {
    /// Decodes a PNG into a new surface.
    pub fn from_png(bytes: &[u8]) -> Result<Self, SurfaceError> {
        let surface = cairo::ImageSurface::create_from_png(&mut Cursor::new(bytes))
            .map_err(|e| SurfaceError::Decode(e.to_string()))?;
        let width = surface.width().max(0) as u32;
        let height = surface.height().max(0) as u32;
        Ok(Self {
            surface,
            width,
            height,
        })
    }

    /// Reads one pixel as premultiplied `[r, g, b, a]`.
    ///
    /// Returns `None` when out of bounds or when the pixel store is borrowed.
    pub fn pixel(&mut self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.surface.flush();
        let stride = self.surface.stride() as usize;
        let data = self.surface.data().ok()?;
        let offset = y as usize * stride + x as usize * 4;
        let bytes: [u8; 4] = data.get(offset..offset + 4)?.try_into().ok()?;
        // ARGB32 stores one native-endian u32 per pixel.
        let argb = u32::from_ne_bytes(bytes);
        Some([
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
            (argb >> 24) as u8,
        ])
    }

    /// Returns true if any pixel differs from `color` (premultiplied ARGB).
    #[cfg(test)]
    pub(crate) fn has_pixels_other_than(&mut self, color: Color) -> bool {
        let to_byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        let expected = (to_byte(color.a) << 24)
            | (to_byte(color.r) << 16)
            | (to_byte(color.g) << 8)
            | to_byte(color.b);

        let (width, height) = (self.width as usize, self.height as usize);
        self.surface.flush();
        let stride = self.surface.stride() as usize;
        let Ok(data) = self.surface.data() else {
            return false;
        };
        (0..height).any(|y| {
            data[y * stride..y * stride + width * 4]
                .chunks_exact(4)
                .any(|px| u32::from_ne_bytes([px[0], px[1], px[2], px[3]]) != expected)
        })
    }

    fn context(&self) -> Result<cairo::Context, SurfaceError> {
        Ok(cairo::Context::new(&self.surface)?)
    }

    fn stroke_context(&self, style: &StrokeStyle) -> Result<cairo::Context, SurfaceError> {
        let ctx = self.context()?;
        let color = style.color;
        ctx.set_source_rgba(color.r, color.g, color.b, color.a);
        ctx.set_line_width(style.width);
        ctx.set_line_cap(cairo::LineCap::Round);
        ctx.set_line_join(cairo::LineJoin::Round);
        Ok(ctx)
    }
}

impl RasterSurface for CairoSurface {
    fn create(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(SurfaceError::InvalidSize { width, height });
        }
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width as i32, height as i32)?;
        Ok(Self {
            surface,
            width,
            height,
        })
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill(&mut self, color: Color) -> Result<(), SurfaceError> {
        if self.is_empty() {
            return Ok(());
        }
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Source);
        ctx.set_source_rgba(color.r, color.g, color.b, color.a);
        ctx.paint()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        if self.is_empty() {
            return Ok(());
        }
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Clear);
        ctx.paint()?;
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle) -> Result<(), SurfaceError> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        if self.is_empty() {
            return Ok(());
        }
        let ctx = self.stroke_context(style)?;
        ctx.move_to(first.x, first.y);
        if rest.is_empty() {
            // Degenerate segment so the round cap leaves a dot.
            ctx.line_to(first.x, first.y);
        }
        for p in rest {
            ctx.line_to(p.x, p.y);
        }
        ctx.stroke()?;
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) -> Result<(), SurfaceError> {
        if self.is_empty() {
            return Ok(());
        }
        let ctx = self.stroke_context(style)?;
        ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
        ctx.stroke()?;
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f64,
        style: &StrokeStyle,
    ) -> Result<(), SurfaceError> {
        if self.is_empty() {
            return Ok(());
        }
        let ctx = self.stroke_context(style)?;
        ctx.new_path();
        ctx.arc(center.x, center.y, radius.max(0.0), 0.0, 2.0 * std::f64::consts::PI);
        ctx.stroke()?;
        Ok(())
    }

    fn composite(&mut self, source: &Self) -> Result<(), SurfaceError> {
        if self.is_empty() || source.is_empty() {
            return Ok(());
        }
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Over);
        ctx.set_source_surface(&source.surface, 0.0, 0.0)?;
        ctx.paint()?;
        Ok(())
    }

    fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        if self.is_empty() {
            return Err(SurfaceError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        self.surface.flush();
        let mut bytes = Vec::new();
        self.surface
            .write_to_png(&mut bytes)
            .map_err(|e| SurfaceError::Encode(e.to_string()))?;
        Ok(bytes)
    }
}
