//! Tool selection and the gesture state machine's data.
//!
//! The transitions themselves live on [`crate::surface::SketchSurface`], which
//! owns the buffers they mutate.

pub mod events;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::PointerEvent;
pub use state::{DrawingState, GesturePhase};
pub use tool::{ShapeKind, Tool, UnknownTool};
