//! The sketch surface: two raster buffers driven by a pointer gesture machine.
//!
//! The committed buffer holds finished strokes and is what gets exported. The
//! overlay only ever holds the live preview of a shape gesture and is cleared
//! when the gesture ends.

mod canvas;
mod options;
mod pointer;
pub mod resize;


pub use canvas::ClearOutcome;
pub use options::SurfaceOptions;
pub use resize::{ContainerLayout, ResizeOutcome, RetryPolicy};

use crate::config::Config;
use crate::draw::{CairoSurface, Color, RasterSurface, SurfaceError};
use crate::events::{EventSink, SketchEvent};
use crate::input::{DrawingState, GesturePhase, Tool};
use crate::util::Size;
use std::fmt;
use thiserror::Error;

/// Which of the two buffers an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferRole {
    Committed,
    Overlay,
}

impl fmt::Display for BufferRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BufferRole::Committed => "committed",
            BufferRole::Overlay => "overlay",
        })
    }
}

/// Errors surfaced by [`SketchSurface`].
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("{role} buffer unavailable")]
    BufferUnavailable {
        role: BufferRole,
        #[source]
        source: SurfaceError,
    },

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

fn create_buffer<S: RasterSurface>(
    role: BufferRole,
    width: u32,
    height: u32,
) -> Result<S, SketchError> {
    S::create(width, height).map_err(|source| SketchError::BufferUnavailable { role, source })
}

/// A drawing canvas with a committed buffer and a shape preview overlay.
///
/// Both buffers always share the same pixel dimensions. All mutation goes
/// through the pointer handlers, [`clear`](Self::clear) and
/// [`request_resize`](Self::request_resize).
pub struct SketchSurface<S: RasterSurface = CairoSurface> {
    committed: S,
    overlay: S,
    state: DrawingState,
    options: SurfaceOptions,
    /// Encoding of the committed buffer right after the last clear/resize
    blank_snapshot: Option<Vec<u8>>,
    /// Bumped every time `blank_snapshot` is recaptured
    snapshot_generation: u64,
    /// Consecutive zero-size resize attempts
    resize_attempts: u32,
    expanded: bool,
    events: EventSink,
    /// Whether the host should repaint the element
    pub needs_redraw: bool,
}

impl SketchSurface<CairoSurface> {
    /// Creates a Cairo-backed surface configured from `config`.
    pub fn from_config(initial: Size, config: &Config) -> Result<Self, SketchError> {
        Self::new(initial, SurfaceOptions::from_config(config))
    }
}

impl<S: RasterSurface> SketchSurface<S> {
    /// Creates both buffers at `initial` (floored to whole pixels).
    ///
    /// A zero initial size is allowed: the buffers stay empty until the host
    /// calls [`request_resize`](Self::request_resize).
    pub fn new(initial: Size, options: SurfaceOptions) -> Result<Self, SketchError> {
        let (width, height) = initial.to_pixels();
        let committed = create_buffer(BufferRole::Committed, width, height)?;
        let overlay = create_buffer(BufferRole::Overlay, width, height)?;
        let state = DrawingState::new(
            options.default_tool,
            options.default_color,
            options.default_size,
        );

        let mut surface = Self {
            committed,
            overlay,
            state,
            options,
            blank_snapshot: None,
            snapshot_generation: 0,
            resize_attempts: 0,
            expanded: false,
            events: EventSink::new(),
            needs_redraw: true,
        };

        if surface.committed.is_empty() {
            log::debug!(
                "Sketch surface created without layout ({}x{}), waiting for resize",
                width,
                height
            );
        } else {
            surface.seed_committed()?;
            log::info!("Sketch surface created at {}x{}", width, height);
        }

        Ok(surface)
    }

    /// Registers a listener for surface events.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&SketchEvent) + 'static,
    {
        self.events.subscribe(listener);
    }

    pub fn committed(&self) -> &S {
        &self.committed
    }

    pub fn overlay(&self) -> &S {
        &self.overlay
    }

    /// Pixel dimensions shared by both buffers.
    pub fn buffer_size(&self) -> (u32, u32) {
        (self.committed.width(), self.committed.height())
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn phase(&self) -> GesturePhase {
        self.state.phase
    }

    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Number of times the blank snapshot has been captured.
    pub fn snapshot_generation(&self) -> u64 {
        self.snapshot_generation
    }

    /// Consecutive deferred resize attempts so far.
    pub fn resize_attempts(&self) -> u32 {
        self.resize_attempts
    }

    /// Selects the tool for the next gesture.
    ///
    /// A gesture already in progress keeps the tool it started with.
    pub fn set_tool(&mut self, tool: Tool) {
        if !self.state.phase.is_idle() && tool != self.state.tool {
            log::debug!("Tool changed to {} mid-gesture, applies to next gesture", tool);
        }
        self.state.tool = tool;
    }

    /// Changes the stroke color. Live shape previews pick it up on the next move.
    pub fn set_color(&mut self, color: Color) {
        self.state.color = color;
    }

    /// Changes the brush size, clamped to at least one pixel.
    pub fn set_brush_size(&mut self, size: u32) {
        self.state.brush_size = size.max(1);
    }

    /// Selects the palette swatch at `index`.
    pub fn select_palette_color(&mut self, index: usize) -> Option<Color> {
        let color = *self.options.palette.get(index)?;
        self.set_color(color);
        Some(color)
    }

    /// Selects the brush size preset at `index`.
    pub fn select_size_preset(&mut self, index: usize) -> Option<u32> {
        let size = *self.options.sizes.get(index)?;
        self.set_brush_size(size);
        Some(self.state.brush_size)
    }

    /// Fills the committed buffer with the background and recaptures the blank snapshot.
    fn seed_committed(&mut self) -> Result<(), SketchError> {
        let snapshot = Self::seed_buffer(&mut self.committed, self.options.background)?;
        self.store_snapshot(snapshot);
        Ok(())
    }

    /// Fills `buffer` with `background` and returns its blank encoding.
    fn seed_buffer(buffer: &mut S, background: Color) -> Result<Vec<u8>, SketchError> {
        buffer.fill(background)?;
        Ok(buffer.encode_png()?)
    }

    fn store_snapshot(&mut self, snapshot: Vec<u8>) {
        self.blank_snapshot = Some(snapshot);
        self.snapshot_generation += 1;
    }
}
