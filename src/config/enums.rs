//! Configuration enum types.

use crate::draw::{BLACK, Color, color};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a named color, a `#RRGGBB` string, or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "red"
///
/// # Hex, as used by the toolbar palette
/// default_color = "#FF3B30"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (black, red, orange, green, blue, purple, white) or `#RRGGBB`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown names fall back to black with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => color::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using black", name);
                BLACK
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }

    /// Returns true if the spec resolves without falling back.
    pub fn is_valid(&self) -> bool {
        match self {
            ColorSpec::Name(name) => color::name_to_color(name).is_some(),
            ColorSpec::Rgb(_) => true,
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(value: &str) -> Self {
        ColorSpec::Name(value.to_string())
    }
}

/// Delay growth between resize retries.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Backoff {
    /// Every retry waits the base delay
    #[default]
    Fixed,
    /// The delay doubles per attempt, capped at the maximum delay
    Exponential,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{RED, WHITE};

    #[test]
    fn color_specs_resolve() {
        assert_eq!(ColorSpec::from("white").to_color(), WHITE);
        assert_eq!(ColorSpec::from("#FF3B30").to_color(), RED);
        assert_eq!(ColorSpec::Rgb([255, 255, 255]).to_color(), WHITE);
        let unknown = ColorSpec::from("mauve-ish");
        assert!(!unknown.is_valid());
        assert_eq!(unknown.to_color(), BLACK);
    }
}
