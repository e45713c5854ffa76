//! Pointer handlers: the Idle / FreehandActive / ShapeActive transitions.

use super::{SketchError, SketchSurface};
use crate::draw::{RasterSurface, Shape};
use crate::input::{GesturePhase, PointerEvent};
use crate::util::{self, Point};

impl<S: RasterSurface> SketchSurface<S> {
    /// Maps an element-relative pointer position into buffer pixels.
    ///
    /// Returns `None` while either the element or the buffers have no size.
    fn map_pointer(&self, event: &PointerEvent) -> Option<Point> {
        if self.committed.is_empty() {
            return None;
        }
        util::element_to_buffer(event.position, event.rendered, self.buffer_size())
    }

    /// Starts a gesture with the current tool.
    ///
    /// Freehand strokes capture their style here; shape gestures only capture
    /// the shape kind and read color and size live on every preview frame.
    pub fn pointer_down(&mut self, event: &PointerEvent) -> Result<(), SketchError> {
        if !self.state.phase.is_idle() {
            log::debug!("Ignoring pointer down during active gesture");
            return Ok(());
        }
        let Some(position) = self.map_pointer(event) else {
            log::debug!(
                "Ignoring pointer down at ({:.1}, {:.1}): element has no layout",
                event.position.x,
                event.position.y
            );
            return Ok(());
        };

        match self.state.tool.shape_kind() {
            None => {
                let style = self
                    .state
                    .freehand_style(self.options.background, self.options.eraser_multiplier);
                self.state.phase = GesturePhase::FreehandActive {
                    last_point: position,
                    style,
                };
            }
            Some(kind) => {
                self.overlay.clear()?;
                self.state.phase = GesturePhase::ShapeActive {
                    kind,
                    anchor: position,
                    cursor: None,
                };
            }
        }

        log::trace!(
            "Gesture started with {} at ({:.1}, {:.1})",
            self.state.tool,
            position.x,
            position.y
        );
        Ok(())
    }

    /// Extends the active stroke or redraws the shape preview.
    ///
    /// Samples that cannot be mapped are dropped without ending the gesture.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> Result<(), SketchError> {
        match self.state.phase {
            GesturePhase::Idle => Ok(()),
            GesturePhase::FreehandActive { last_point, style } => {
                let Some(position) = self.map_pointer(event) else {
                    return Ok(());
                };
                self.state.phase = GesturePhase::FreehandActive {
                    last_point: position,
                    style,
                };
                self.committed.stroke_polyline(&[last_point, position], &style)?;
                self.needs_redraw = true;
                Ok(())
            }
            GesturePhase::ShapeActive { kind, anchor, .. } => {
                let Some(position) = self.map_pointer(event) else {
                    return Ok(());
                };
                if self.overlay.is_empty() {
                    return Ok(());
                }
                self.state.phase = GesturePhase::ShapeActive {
                    kind,
                    anchor,
                    cursor: Some(position),
                };
                let shape = Shape::from_drag(kind, anchor, position, &self.options.arrow);
                self.overlay.clear()?;
                shape.render(&mut self.overlay, &self.state.shape_style())?;
                self.needs_redraw = true;
                Ok(())
            }
        }
    }

    /// Ends the active gesture.
    ///
    /// A shape gesture composites its last preview frame onto the committed
    /// buffer and clears the overlay. The gesture is over even if that fails.
    pub fn pointer_up(&mut self) -> Result<(), SketchError> {
        let phase = std::mem::replace(&mut self.state.phase, GesturePhase::Idle);
        match phase {
            GesturePhase::Idle => Ok(()),
            GesturePhase::FreehandActive { .. } => {
                log::trace!("Freehand stroke finished");
                Ok(())
            }
            GesturePhase::ShapeActive { kind, cursor, .. } => {
                if !self.overlay.is_empty() {
                    if cursor.is_some() {
                        self.committed.composite(&self.overlay)?;
                    }
                    self.overlay.clear()?;
                }
                self.needs_redraw = true;
                log::trace!("{:?} shape committed", kind);
                Ok(())
            }
        }
    }

    /// Pointer left the element: ends the gesture exactly like release.
    pub fn pointer_leave(&mut self) -> Result<(), SketchError> {
        self.pointer_up()
    }
}
