//! Pointer event type delivered by the host.

use crate::util::{Point, Size};

/// A single-pointer sample.
///
/// `position` is relative to the drawing element's top-left corner, in CSS
/// units. `rendered` is the element's rendered size when the event fired; it
/// is read per event because layout can change without a buffer resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub rendered: Size,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, rendered: Size) -> Self {
        Self {
            position: Point::new(x, y),
            rendered,
        }
    }
}
