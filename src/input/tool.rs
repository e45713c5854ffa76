//! Drawing tool selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// The active tool decides which rendering path a pointer-down starts:
/// freehand and erase paint the committed buffer directly, the shape tools
/// preview on the overlay and commit on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand drawing - follows the pointer path (default)
    #[default]
    #[serde(alias = "pen")]
    Freehand,
    /// Freehand in the background color at twice the brush size
    #[serde(alias = "eraser")]
    Erase,
    /// Straight line from anchor to cursor
    Line,
    /// Rectangle outline from corner to corner
    #[serde(alias = "rect")]
    Rectangle,
    /// Circle centered on the anchor (the toolbar calls it "circle")
    #[serde(alias = "circle")]
    Ellipse,
    /// Line with a two-barb head at the cursor end
    Arrow,
}

/// The shape a shape tool draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Ellipse,
    Arrow,
}

impl Tool {
    /// All tools in toolbar order.
    pub const ALL: [Tool; 6] = [
        Tool::Freehand,
        Tool::Erase,
        Tool::Line,
        Tool::Rectangle,
        Tool::Ellipse,
        Tool::Arrow,
    ];

    /// Returns the shape for shape tools, `None` for freehand and erase.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Tool::Freehand | Tool::Erase => None,
            Tool::Line => Some(ShapeKind::Line),
            Tool::Rectangle => Some(ShapeKind::Rectangle),
            Tool::Ellipse => Some(ShapeKind::Ellipse),
            Tool::Arrow => Some(ShapeKind::Arrow),
        }
    }

    /// CSS cursor hint for the drawing element.
    pub fn cursor(self) -> &'static str {
        match self {
            Tool::Erase => "grab",
            _ => "crosshair",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Freehand => "freehand",
            Tool::Erase => "erase",
            Tool::Line => "line",
            Tool::Rectangle => "rectangle",
            Tool::Ellipse => "ellipse",
            Tool::Arrow => "arrow",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a tool name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool '{0}'")]
pub struct UnknownTool(pub String);

impl FromStr for Tool {
    type Err = UnknownTool;

    /// Accepts both the toolbar names (`pen`, `eraser`, `circle`) and the
    /// canonical ones, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "freehand" | "pen" => Ok(Tool::Freehand),
            "erase" | "eraser" => Ok(Tool::Erase),
            "line" => Ok(Tool::Line),
            "rectangle" | "rect" => Ok(Tool::Rectangle),
            "ellipse" | "circle" => Ok(Tool::Ellipse),
            "arrow" => Ok(Tool::Arrow),
            _ => Err(UnknownTool(s.to_string())),
        }
    }
}
