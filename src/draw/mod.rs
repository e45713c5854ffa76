//! Rendering primitives for the sketch canvas (Cairo-based).
//!
//! This module defines the drawing layer under the gesture machine:
//! - [`Color`]: RGBA color representation with the toolbar palette
//! - [`RasterSurface`]: the minimal raster interface the surface draws through
//! - [`CairoSurface`]: headless Cairo image-surface implementation
//! - [`Shape`]: parametric preview shapes (line, rectangle, circle, arrow)

pub mod cairo_surface;
pub mod color;
pub mod raster;
pub mod shape;

// Re-export commonly used types at module level
pub use cairo_surface::CairoSurface;
pub use color::Color;
pub use raster::{RasterSurface, StrokeStyle, SurfaceError};
pub use shape::{ArrowSpec, Shape};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PURPLE, RED, TRANSPARENT, WHITE};
