//! Outbound notifications from the sketch surface.
//!
//! The surface never talks to the chat client directly; it emits
//! [`SketchEvent`]s to whatever listeners the host subscribed.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// Media kind attached to submitted sketches in outgoing chat messages.
pub const MEDIA_KIND: &str = "sketch";

/// Severity of a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusLevel::Info => "info",
            StatusLevel::Success => "success",
            StatusLevel::Error => "error",
        })
    }
}

/// A PNG snapshot of the committed buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// PNG bytes
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    pub fn media_type(&self) -> &'static str {
        "image/png"
    }

    /// Image of a zero-sized canvas.
    pub fn empty() -> Self {
        Self {
            bytes: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `data:image/png;base64,...`, the form the chat backend accepts.
    ///
    /// An empty image yields `data:,`.
    pub fn to_data_url(&self) -> String {
        if self.is_empty() {
            return "data:,".to_string();
        }
        format!("data:{};base64,{}", self.media_type(), STANDARD.encode(&self.bytes))
    }
}

impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("bytes", &self.bytes.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Events emitted by the sketch surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SketchEvent {
    /// The user asked to send the current sketch (not gated by the blank check)
    SketchSubmitted(EncodedImage),
    /// Transient user feedback
    StatusNotify { message: String, level: StatusLevel },
    /// The container never reached a usable size within the retry budget
    ResizeFailed { attempts: u32 },
}

type Listener = Box<dyn FnMut(&SketchEvent)>;

/// Registry of event listeners, called in subscription order.
#[derive(Default)]
pub struct EventSink {
    listeners: Vec<Listener>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for every subsequent event.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&SketchEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, event: SketchEvent) {
        log::trace!("Emitting {:?} to {} listener(s)", event, self.listeners.len());
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.emit(SketchEvent::StatusNotify {
            message: message.into(),
            level,
        });
    }
}
