//! Headless replay of a gesture script against a Cairo-backed sketch surface.
//!
//! A script describes the container's layout box, optionally the element's
//! rendered size, and a list of steps:
//!
//! ```toml
//! [container]
//! width = 400
//! height = 300
//!
//! [[steps]]
//! action = "tool"
//! tool = "line"
//!
//! [[steps]]
//! action = "down"
//! x = 10
//! y = 10
//!
//! [[steps]]
//! action = "move"
//! x = 200
//! y = 150
//!
//! [[steps]]
//! action = "up"
//! ```
//!
//! The driver plays the host: it polls resizes with the surface's retry
//! delays and waits out the expansion transition before resizing.

use crate::config::{ColorSpec, Config};
use crate::events::{EncodedImage, SketchEvent, StatusLevel};
use crate::input::{PointerEvent, Tool};
use crate::surface::{ContainerLayout, ResizeOutcome, SketchSurface};
use crate::util::Size;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::thread;

/// A parsed gesture script.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Initial container layout box
    pub container: Size,
    /// Rendered element size for pointer mapping; follows the container if unset
    #[serde(default)]
    pub display: Option<Size>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One scripted host action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    Tool { tool: Tool },
    Color { color: ColorSpec },
    Size { size: u32 },
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Leave,
    Clear,
    /// Changes the container size; it reports 0x0 for the first
    /// `settle_after` polls, like a container mid-transition
    Resize {
        width: f64,
        height: f64,
        #[serde(default)]
        settle_after: u32,
    },
    Send,
    /// Toggles expansion, waits out the transition and resizes
    Expand,
}

impl Script {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Failed to parse script {}", path.display()))
    }
}

/// Container whose layout box settles after a number of polls.
#[derive(Debug)]
pub struct ScriptedLayout {
    size: Size,
    pending_polls: Cell<u32>,
}

impl ScriptedLayout {
    pub fn new(size: Size) -> Self {
        Self::settling(size, 0)
    }

    /// Reports 0x0 for the first `polls` queries, then `size`.
    pub fn settling(size: Size, polls: u32) -> Self {
        Self {
            size,
            pending_polls: Cell::new(polls),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

impl ContainerLayout for ScriptedLayout {
    fn container_size(&self) -> Option<Size> {
        let pending = self.pending_polls.get();
        if pending > 0 {
            self.pending_polls.set(pending - 1);
            return Some(Size::default());
        }
        Some(self.size)
    }
}

/// What a replay produced.
#[derive(Debug, Default)]
pub struct ReplayResult {
    /// Gated export of the committed buffer at the end of the script
    pub export: Option<EncodedImage>,
    /// Last sketch submitted by a `send` step
    pub submitted: Option<EncodedImage>,
    /// Status notifications in emission order
    pub statuses: Vec<(String, StatusLevel)>,
    /// Number of resize sequences that ran out of retries
    pub resize_failures: u32,
    /// Final buffer dimensions
    pub buffer_size: (u32, u32),
}

/// Runs a script on a fresh surface built from `config`.
pub fn run(script: &Script, config: &Config) -> Result<(SketchSurface, ReplayResult)> {
    let mut surface = SketchSurface::from_config(script.container, config)
        .context("Failed to create sketch surface")?;

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    surface.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let mut layout = ScriptedLayout::new(script.container);
    if surface.buffer_size() == (0, 0) {
        settle(&mut surface, &layout)?;
    }

    for (index, step) in script.steps.iter().enumerate() {
        log::debug!("Step {}: {:?}", index + 1, step);
        let display = script.display.unwrap_or(layout.size());
        match step {
            Step::Tool { tool } => surface.set_tool(*tool),
            Step::Color { color } => surface.set_color(color.to_color()),
            Step::Size { size } => surface.set_brush_size(*size),
            Step::Down { x, y } => surface.pointer_down(&PointerEvent::new(*x, *y, display))?,
            Step::Move { x, y } => surface.pointer_move(&PointerEvent::new(*x, *y, display))?,
            Step::Up => surface.pointer_up()?,
            Step::Leave => surface.pointer_leave()?,
            Step::Clear => {
                surface.clear()?;
            }
            Step::Resize {
                width,
                height,
                settle_after,
            } => {
                layout = ScriptedLayout::settling(Size::new(*width, *height), *settle_after);
                settle(&mut surface, &layout)?;
            }
            Step::Send => {
                surface.send_sketch()?;
            }
            Step::Expand => {
                let delay = surface.toggle_expansion();
                thread::sleep(delay);
                settle(&mut surface, &layout)?;
            }
        }
    }

    let mut result = ReplayResult {
        export: surface.canvas_data()?,
        buffer_size: surface.buffer_size(),
        ..ReplayResult::default()
    };
    for event in events.borrow().iter() {
        match event {
            SketchEvent::SketchSubmitted(image) => result.submitted = Some(image.clone()),
            SketchEvent::StatusNotify { message, level } => {
                result.statuses.push((message.clone(), *level))
            }
            SketchEvent::ResizeFailed { .. } => result.resize_failures += 1,
        }
    }

    log::info!(
        "Replayed {} step(s), canvas {}x{}",
        script.steps.len(),
        result.buffer_size.0,
        result.buffer_size.1
    );
    Ok((surface, result))
}

/// Polls `request_resize` until it no longer asks for a retry.
fn settle(surface: &mut SketchSurface, layout: &ScriptedLayout) -> Result<ResizeOutcome> {
    loop {
        let outcome = surface.request_resize(layout)?;
        match outcome.retry_in() {
            Some(delay) => thread::sleep(delay),
            None => return Ok(outcome),
        }
    }
}
