//! Drawing state: tool/color/size selection and the active gesture phase.

use super::tool::{ShapeKind, Tool};
use crate::draw::{Color, StrokeStyle};
use crate::util::Point;

/// Current gesture phase.
///
/// Exactly one variant holds at any time; the data each active phase needs
/// lives inside it, so an anchor cannot outlive its shape gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GesturePhase {
    /// No pointer held down
    Idle,
    /// Freehand or erase stroke in progress on the committed buffer
    FreehandActive {
        /// Last mapped position, in buffer pixels (updated every move)
        last_point: Point,
        /// Stroke style captured at pointer-down
        style: StrokeStyle,
    },
    /// Shape preview in progress on the overlay
    ShapeActive {
        /// Shape chosen at pointer-down
        kind: ShapeKind,
        /// Fixed anchor, in buffer pixels (immutable until release)
        anchor: Point,
        /// Cursor of the last preview frame, if any move happened
        cursor: Option<Point>,
    },
}

impl GesturePhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, GesturePhase::Idle)
    }
}

/// Selection state plus gesture phase, owned by one sketch surface.
#[derive(Debug, Clone)]
pub struct DrawingState {
    /// Selected tool
    pub tool: Tool,
    /// Stroke color (ignored by erase, which paints the background)
    pub color: Color,
    /// Stroke width in buffer pixels (always >= 1)
    pub brush_size: u32,
    /// Active gesture
    pub phase: GesturePhase,
}

impl DrawingState {
    pub fn new(tool: Tool, color: Color, brush_size: u32) -> Self {
        Self {
            tool,
            color,
            brush_size: brush_size.max(1),
            phase: GesturePhase::Idle,
        }
    }

    /// Style for a new freehand stroke with the current tool.
    ///
    /// Erase uses the background color at `eraser_multiplier` times the brush size.
    pub fn freehand_style(&self, background: Color, eraser_multiplier: f64) -> StrokeStyle {
        match self.tool {
            Tool::Erase => StrokeStyle {
                color: background,
                width: self.brush_size as f64 * eraser_multiplier,
            },
            _ => self.shape_style(),
        }
    }

    /// Style for shape previews, read from the live selection.
    pub fn shape_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.color,
            width: self.brush_size as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{RED, WHITE};

    #[test]
    fn brush_size_is_at_least_one() {
        let state = DrawingState::new(Tool::Freehand, RED, 0);
        assert_eq!(state.brush_size, 1);
        assert!(state.phase.is_idle());
    }

    #[test]
    fn eraser_paints_background_at_double_width() {
        let state = DrawingState::new(Tool::Erase, RED, 5);
        let style = state.freehand_style(WHITE, 2.0);
        assert_eq!(style.color, WHITE);
        assert_eq!(style.width, 10.0);

        let pen = DrawingState::new(Tool::Freehand, RED, 5);
        assert_eq!(pen.freehand_style(WHITE, 2.0), pen.shape_style());
    }
}
