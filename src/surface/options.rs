use super::resize::RetryPolicy;
use crate::config::Config;
use crate::draw::{ArrowSpec, Color};
use crate::input::Tool;
use std::time::Duration;

/// Runtime options derived from configuration for one sketch surface.
#[derive(Debug, Clone)]
pub struct SurfaceOptions {
    pub default_tool: Tool,
    pub default_color: Color,
    pub default_size: u32,
    pub palette: Vec<Color>,
    pub sizes: Vec<u32>,
    pub background: Color,
    pub eraser_multiplier: f64,
    pub arrow: ArrowSpec,
    pub retry: RetryPolicy,
    pub expand_delay: Duration,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl SurfaceOptions {
    pub fn from_config(config: &Config) -> Self {
        let drawing = &config.drawing;
        Self {
            default_tool: drawing.default_tool,
            default_color: drawing.default_color.to_color(),
            default_size: drawing.default_size.max(1),
            palette: drawing.palette.iter().map(|spec| spec.to_color()).collect(),
            sizes: drawing.sizes.clone(),
            background: config.canvas.background.to_color(),
            eraser_multiplier: config.canvas.eraser_multiplier,
            arrow: ArrowSpec {
                length: config.arrow.length,
                angle_degrees: config.arrow.angle_degrees,
            },
            retry: RetryPolicy::from_config(&config.resize),
            expand_delay: Duration::from_millis(config.resize.expand_delay_ms),
        }
    }
}
