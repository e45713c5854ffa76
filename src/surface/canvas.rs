//! Whole-canvas operations: clear, resize, blank detection, export and expansion.

use super::resize::{ContainerLayout, ResizeOutcome};
use super::{BufferRole, SketchError, SketchSurface, create_buffer};
use crate::draw::RasterSurface;
use crate::events::{EncodedImage, SketchEvent, StatusLevel};
use crate::input::GesturePhase;
use std::time::Duration;

/// Result of [`SketchSurface::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared,
    /// Buffers have no size yet; nothing to clear
    Skipped,
}

impl<S: RasterSurface> SketchSurface<S> {
    /// Resets the committed buffer to the background and clears the overlay.
    pub fn clear(&mut self) -> Result<ClearOutcome, SketchError> {
        if self.committed.is_empty() {
            log::debug!("Clear skipped: canvas has no size yet");
            return Ok(ClearOutcome::Skipped);
        }

        self.overlay.clear()?;
        self.seed_committed()?;
        self.needs_redraw = true;

        log::info!("Canvas cleared");
        self.events.notify("Canvas cleared!", StatusLevel::Success);
        Ok(ClearOutcome::Cleared)
    }

    /// Resizes both buffers to the container's current layout size.
    ///
    /// A zero-size container defers the resize; the host retries after the
    /// returned delay. Once the retry budget is spent a
    /// [`SketchEvent::ResizeFailed`] is emitted and the counter starts over.
    /// Applying a resize wipes the committed buffer and abandons any gesture.
    pub fn request_resize(
        &mut self,
        layout: &dyn ContainerLayout,
    ) -> Result<ResizeOutcome, SketchError> {
        let Some(size) = layout.container_size() else {
            log::debug!("Resize skipped: no container");
            return Ok(ResizeOutcome::NoContainer);
        };

        let (width, height) = size.to_pixels();
        if width == 0 || height == 0 {
            return Ok(self.defer_resize());
        }
        self.resize_attempts = 0;

        // Seed the replacements first so a failure leaves the current buffers intact.
        let mut committed = create_buffer(BufferRole::Committed, width, height)?;
        let overlay = create_buffer(BufferRole::Overlay, width, height)?;
        let snapshot = Self::seed_buffer(&mut committed, self.options.background)?;
        self.committed = committed;
        self.overlay = overlay;
        self.store_snapshot(snapshot);

        if !self.state.phase.is_idle() {
            log::debug!("Resize abandoned the active gesture");
            self.state.phase = GesturePhase::Idle;
        }

        self.needs_redraw = true;
        log::info!("Sketch buffers resized to {}x{}", width, height);
        Ok(ResizeOutcome::Applied { width, height })
    }

    fn defer_resize(&mut self) -> ResizeOutcome {
        self.resize_attempts += 1;
        let attempt = self.resize_attempts;
        let policy = self.options.retry;

        if attempt > policy.max_attempts {
            let attempts = attempt - 1;
            self.resize_attempts = 0;
            log::warn!(
                "Container still has no size after {} attempts, giving up",
                attempts
            );
            self.events.emit(SketchEvent::ResizeFailed { attempts });
            return ResizeOutcome::Exhausted { attempts };
        }

        let retry_in = policy.delay_for(attempt);
        log::debug!(
            "Container has no size yet, retry {}/{} in {:?}",
            attempt,
            policy.max_attempts,
            retry_in
        );
        ResizeOutcome::Deferred { attempt, retry_in }
    }

    /// Returns true when the committed buffer encodes identically to the
    /// snapshot taken at the last clear or resize.
    ///
    /// A surface without size, or without a snapshot, counts as blank.
    pub fn is_blank(&self) -> Result<bool, SketchError> {
        if self.committed.is_empty() {
            return Ok(true);
        }
        match &self.blank_snapshot {
            Some(snapshot) => Ok(self.committed.encode_png()? == *snapshot),
            None => Ok(true),
        }
    }

    fn encode_committed(&self) -> Result<EncodedImage, SketchError> {
        let (width, height) = self.buffer_size();
        Ok(EncodedImage {
            bytes: self.committed.encode_png()?,
            width,
            height,
        })
    }

    /// Exports the committed buffer, or `None` if nothing was drawn.
    ///
    /// The overlay is never included.
    pub fn canvas_data(&self) -> Result<Option<EncodedImage>, SketchError> {
        if self.is_blank()? {
            return Ok(None);
        }
        self.encode_committed().map(Some)
    }

    /// Encodes the committed buffer and emits it as a submitted sketch.
    ///
    /// Unlike [`canvas_data`](Self::canvas_data) this does not check for a
    /// blank canvas. A surface without size submits an empty image, whose
    /// data URL is `data:,`.
    ///
    /// # Errors
    /// Returns [`SketchError::Surface`] if encoding the committed buffer fails.
    pub fn send_sketch(&mut self) -> Result<EncodedImage, SketchError> {
        let image = if self.committed.is_empty() {
            log::debug!("Submitting sketch from a canvas with no size");
            EncodedImage::empty()
        } else {
            self.encode_committed()?
        };
        log::info!(
            "Submitting sketch ({}x{}, {} bytes)",
            image.width,
            image.height,
            image.bytes.len()
        );
        self.events.emit(SketchEvent::SketchSubmitted(image.clone()));
        Ok(image)
    }

    /// Toggles the expanded presentation and returns how long the host should
    /// wait for its layout transition before calling
    /// [`request_resize`](Self::request_resize).
    pub fn toggle_expansion(&mut self) -> Duration {
        self.expanded = !self.expanded;
        if self.expanded {
            self.events.notify("Sketch canvas expanded", StatusLevel::Success);
        } else {
            self.events.notify("Sketch canvas restored", StatusLevel::Info);
        }
        log::debug!("Sketch canvas expanded: {}", self.expanded);
        self.options.expand_delay
    }
}
