//! Configuration type definitions.

use super::enums::{Backoff, ColorSpec};
use crate::input::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the toolbar defaults when the sketch canvas first opens.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Tool selected at startup (pen, eraser, line, rectangle, circle, arrow)
    #[serde(default)]
    pub default_tool: Tool,

    /// Default pen color - a named color, `#RRGGBB`, or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default brush size in buffer pixels (valid range: 1 - 100)
    #[serde(default = "default_size")]
    pub default_size: u32,

    /// Colors offered by the toolbar palette, in display order
    #[serde(default = "default_palette")]
    pub palette: Vec<ColorSpec>,

    /// Brush size presets offered by the toolbar, in display order
    #[serde(default = "default_sizes")]
    pub sizes: Vec<u32>,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_tool: Tool::default(),
            default_color: default_color(),
            default_size: default_size(),
            palette: default_palette(),
            sizes: default_sizes(),
        }
    }
}

/// Canvas appearance settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Opaque background color; also the color the eraser paints
    #[serde(default = "default_background")]
    pub background: ColorSpec,

    /// Eraser width as a multiple of the brush size (valid range: 1.0 - 10.0)
    #[serde(default = "default_eraser_multiplier")]
    pub eraser_multiplier: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            eraser_multiplier: default_eraser_multiplier(),
        }
    }
}

/// Arrow drawing settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArrowConfig {
    /// Barb length in pixels (valid range: 5.0 - 50.0)
    #[serde(default = "default_arrow_length")]
    pub length: f64,

    /// Barb angle from the shaft in degrees (valid range: 15.0 - 60.0)
    #[serde(default = "default_arrow_angle")]
    pub angle_degrees: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            length: default_arrow_length(),
            angle_degrees: default_arrow_angle(),
        }
    }
}

/// Resize deferral settings.
///
/// A resize requested while the container has no layout box is retried on
/// this schedule until the container reports a usable size.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResizeConfig {
    /// Delay before the first retry, in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Upper bound on any single retry delay, in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Consecutive deferrals allowed before giving up (valid range: 1 - 10000)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// How the delay grows between attempts
    #[serde(default)]
    pub backoff: Backoff,

    /// Wait after expanding/collapsing the canvas before resizing, in milliseconds
    #[serde(default = "default_expand_delay_ms")]
    pub expand_delay_ms: u64,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            retry_delay_ms: default_retry_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            max_attempts: default_max_attempts(),
            backoff: Backoff::default(),
            expand_delay_ms: default_expand_delay_ms(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("#000000".to_string())
}

fn default_size() -> u32 {
    5
}

fn default_palette() -> Vec<ColorSpec> {
    ["#000000", "#FF3B30", "#FF9500", "#4CD964", "#007AFF", "#5856D6"]
        .into_iter()
        .map(ColorSpec::from)
        .collect()
}

fn default_sizes() -> Vec<u32> {
    vec![1, 2, 5, 10, 15, 20]
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("#ffffff".to_string())
}

fn default_eraser_multiplier() -> f64 {
    2.0
}

fn default_arrow_length() -> f64 {
    20.0
}

fn default_arrow_angle() -> f64 {
    30.0
}

fn default_retry_delay_ms() -> u64 {
    100
}

fn default_max_delay_ms() -> u64 {
    2_000
}

fn default_max_attempts() -> u32 {
    50
}

fn default_expand_delay_ms() -> u64 {
    300
}
