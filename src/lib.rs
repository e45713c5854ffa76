//! Sketch canvas with freehand and shape tools, live shape preview and PNG export.
//!
//! [`SketchSurface`] owns a committed buffer and a preview overlay and turns
//! pointer events into strokes. Hosts feed it pointer samples, container
//! layout and toolbar selections, and listen for [`events::SketchEvent`]s.
//! The [`replay`] module drives a surface headlessly from a TOML script.

pub mod config;
pub mod draw;
pub mod events;
pub mod input;
pub mod replay;
pub mod surface;
pub mod util;

pub use config::Config;
pub use surface::{SketchError, SketchSurface};
