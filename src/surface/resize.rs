//! Resize deferral: container layout source, retry schedule and outcomes.

use crate::config::{Backoff, ResizeConfig};
use crate::util::Size;
use std::time::Duration;

/// Source of the canvas container's current layout box.
///
/// Queried on every resize attempt, so a container that is mid-transition can
/// report zero and later report its settled size.
pub trait ContainerLayout {
    /// Returns the container's size, or `None` if there is no container.
    fn container_size(&self) -> Option<Size>;
}

impl ContainerLayout for Size {
    fn container_size(&self) -> Option<Size> {
        Some(*self)
    }
}

/// Bounded retry schedule for resizes requested before layout is ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay before the first retry
    pub delay: Duration,
    /// Cap on any single delay
    pub max_delay: Duration,
    /// Consecutive deferrals allowed before giving up
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ResizeConfig::default())
    }
}

impl RetryPolicy {
    pub fn from_config(config: &ResizeConfig) -> Self {
        Self {
            delay: Duration::from_millis(config.retry_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            max_attempts: config.max_attempts.max(1),
            backoff: config.backoff,
        }
    }

    /// Delay to wait after the `attempt`-th deferral (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let delay = match self.backoff {
            Backoff::Fixed => self.delay,
            Backoff::Exponential => {
                let factor = 1u32
                    .checked_shl(attempt.saturating_sub(1))
                    .unwrap_or(u32::MAX);
                self.delay.saturating_mul(factor)
            }
        };
        delay.min(self.max_delay)
    }
}

/// Result of a resize request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Both buffers were recreated at this size and re-seeded
    Applied { width: u32, height: u32 },
    /// Container had no layout yet; the host should retry after `retry_in`
    Deferred { attempt: u32, retry_in: Duration },
    /// The retry budget ran out; a `ResizeFailed` event was emitted
    Exhausted { attempts: u32 },
    /// No container to measure
    NoContainer,
}

impl ResizeOutcome {
    /// Delay before the next attempt, if the host should retry.
    pub fn retry_in(&self) -> Option<Duration> {
        match self {
            ResizeOutcome::Deferred { retry_in, .. } => Some(*retry_in),
            _ => None,
        }
    }
}
