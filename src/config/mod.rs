//! Configuration file support for sketchpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sketchpad/config.toml`. Settings include toolbar defaults,
//! canvas appearance, arrow geometry, and the resize retry schedule.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{Backoff, ColorSpec};
pub use types::{ArrowConfig, CanvasConfig, DrawingConfig, ResizeConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_tool = "pen"
/// default_color = "#000000"
/// default_size = 5
///
/// [canvas]
/// background = "white"
///
/// [arrow]
/// length = 20.0
/// angle_degrees = 30.0
///
/// [resize]
/// retry_delay_ms = 100
/// max_attempts = 50
/// backoff = "exponential"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, schemars::JsonSchema)]
pub struct Config {
    /// Toolbar defaults (tool, color, brush size, palette)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Canvas background and eraser settings
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Arrow appearance settings
    #[serde(default)]
    pub arrow: ArrowConfig,

    /// Resize deferral schedule
    #[serde(default)]
    pub resize: ResizeConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by the
    /// default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_size`: 1 - 100
    /// - `sizes`: each 1 - 100, empty list restores the defaults
    /// - `eraser_multiplier`: 1.0 - 10.0
    /// - `arrow.length`: 5.0 - 50.0
    /// - `arrow.angle_degrees`: 15.0 - 60.0
    /// - `resize.max_attempts`: 1 - 10000
    /// - `resize.retry_delay_ms`: 1 - `max_delay_ms`
    pub fn validate_and_clamp(&mut self) {
        // Brush size: 1 - 100
        if !(1..=100).contains(&self.drawing.default_size) {
            log::warn!(
                "Invalid default_size {}, clamping to 1-100 range",
                self.drawing.default_size
            );
            self.drawing.default_size = self.drawing.default_size.clamp(1, 100);
        }

        if self.drawing.sizes.is_empty() {
            log::warn!("Empty sizes list, restoring defaults");
            self.drawing.sizes = DrawingConfig::default().sizes;
        }
        for size in &mut self.drawing.sizes {
            if !(1..=100).contains(size) {
                log::warn!("Invalid size preset {}, clamping to 1-100 range", size);
                *size = (*size).clamp(1, 100);
            }
        }

        let before = self.drawing.palette.len();
        self.drawing.palette.retain(|spec| {
            let valid = spec.is_valid();
            if !valid {
                log::warn!("Dropping unknown palette color {:?}", spec);
            }
            valid
        });
        if self.drawing.palette.is_empty() {
            if before > 0 {
                log::warn!("No usable palette colors, restoring defaults");
            }
            self.drawing.palette = DrawingConfig::default().palette;
        }

        if !self.drawing.default_color.is_valid() {
            log::warn!(
                "Invalid default_color {:?}, falling back to black",
                self.drawing.default_color
            );
            self.drawing.default_color = DrawingConfig::default().default_color;
        }

        if !self.canvas.background.is_valid() {
            log::warn!(
                "Invalid canvas background {:?}, falling back to white",
                self.canvas.background
            );
            self.canvas.background = CanvasConfig::default().background;
        }

        // Eraser multiplier: 1.0 - 10.0
        if !(1.0..=10.0).contains(&self.canvas.eraser_multiplier) {
            log::warn!(
                "Invalid eraser_multiplier {:.1}, clamping to 1.0-10.0 range",
                self.canvas.eraser_multiplier
            );
            self.canvas.eraser_multiplier = if self.canvas.eraser_multiplier.is_nan() {
                CanvasConfig::default().eraser_multiplier
            } else {
                self.canvas.eraser_multiplier.clamp(1.0, 10.0)
            };
        }

        // Arrow length: 5.0 - 50.0
        if !(5.0..=50.0).contains(&self.arrow.length) {
            log::warn!(
                "Invalid arrow length {:.1}, clamping to 5.0-50.0 range",
                self.arrow.length
            );
            self.arrow.length = if self.arrow.length.is_nan() {
                ArrowConfig::default().length
            } else {
                self.arrow.length.clamp(5.0, 50.0)
            };
        }

        // Arrow angle: 15.0 - 60.0 degrees
        if !(15.0..=60.0).contains(&self.arrow.angle_degrees) {
            log::warn!(
                "Invalid arrow angle {:.1}°, clamping to 15.0-60.0° range",
                self.arrow.angle_degrees
            );
            self.arrow.angle_degrees = if self.arrow.angle_degrees.is_nan() {
                ArrowConfig::default().angle_degrees
            } else {
                self.arrow.angle_degrees.clamp(15.0, 60.0)
            };
        }

        // Retry budget: 1 - 10000
        if !(1..=10_000).contains(&self.resize.max_attempts) {
            log::warn!(
                "Invalid resize max_attempts {}, clamping to 1-10000 range",
                self.resize.max_attempts
            );
            self.resize.max_attempts = self.resize.max_attempts.clamp(1, 10_000);
        }

        if self.resize.max_delay_ms == 0 {
            log::warn!("Invalid resize max_delay_ms 0, using 1");
            self.resize.max_delay_ms = 1;
        }
        if !(1..=self.resize.max_delay_ms).contains(&self.resize.retry_delay_ms) {
            log::warn!(
                "Invalid resize retry_delay_ms {}, clamping to 1-{} range",
                self.resize.retry_delay_ms,
                self.resize.max_delay_ms
            );
            self.resize.retry_delay_ms = self.resize.retry_delay_ms.clamp(1, self.resize.max_delay_ms);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses a TOML document without validation.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, PURPLE, WHITE};
    use crate::input::Tool;
    use tempfile::TempDir;

    #[test]
    fn defaults_mirror_the_toolbar() {
        let config = Config::default();
        assert_eq!(config.drawing.default_tool, Tool::Freehand);
        assert_eq!(config.drawing.default_color.to_color(), BLACK);
        assert_eq!(config.drawing.default_size, 5);
        assert_eq!(config.drawing.sizes, vec![1, 2, 5, 10, 15, 20]);
        assert_eq!(config.drawing.palette.len(), 6);
        assert_eq!(config.drawing.palette[5].to_color(), PURPLE);
        assert_eq!(config.canvas.background.to_color(), WHITE);
        assert_eq!(config.resize.retry_delay_ms, 100);
        assert_eq!(config.resize.expand_delay_ms, 300);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [drawing]
            default_tool = "circle"

            [resize]
            backoff = "exponential"
            "#,
        )
        .unwrap();
        assert_eq!(config.drawing.default_tool, Tool::Ellipse);
        assert_eq!(config.resize.backoff, Backoff::Exponential);
        assert_eq!(config.arrow.length, 20.0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::from_toml_str(
            r##"
            [drawing]
            default_size = 0
            sizes = [0, 5, 500]
            palette = ["nope", "#FF9500"]
            default_color = "nope"

            [canvas]
            eraser_multiplier = 40.0

            [arrow]
            length = 1.0
            angle_degrees = 90.0

            [resize]
            max_attempts = 0
            retry_delay_ms = 9000
            max_delay_ms = 500
            "##,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.drawing.default_size, 1);
        assert_eq!(config.drawing.sizes, vec![1, 5, 100]);
        assert_eq!(config.drawing.palette, vec![ColorSpec::from("#FF9500")]);
        assert_eq!(config.drawing.default_color.to_color(), BLACK);
        assert_eq!(config.canvas.eraser_multiplier, 10.0);
        assert_eq!(config.arrow.length, 5.0);
        assert_eq!(config.arrow.angle_degrees, 60.0);
        assert_eq!(config.resize.max_attempts, 1);
        assert_eq!(config.resize.retry_delay_ms, 500);
    }

    #[test]
    fn nan_arrow_values_fall_back_to_defaults() {
        let mut config = Config::from_toml_str(
            r#"
            [arrow]
            length = nan
            angle_degrees = nan
            "#,
        )
        .unwrap();
        assert!(config.arrow.length.is_nan());
        config.validate_and_clamp();

        assert_eq!(config.arrow.length, 20.0);
        assert_eq!(config.arrow.angle_degrees, 30.0);
    }

    #[test]
    fn rect_alias_selects_rectangle_tool() {
        let config = Config::from_toml_str("[drawing]\ndefault_tool = \"rect\"\n").unwrap();
        assert_eq!(config.drawing.default_tool, Tool::Rectangle);
        assert_eq!("rect".parse::<Tool>(), Ok(Tool::Rectangle));
    }

    #[test]
    fn load_from_reads_and_validates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[arrow]\nlength = 100.0\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.arrow.length, 50.0);

        fs::write(&path, "[arrow\nlength = ").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));

        assert!(Config::load_from(&temp.path().join("missing.toml")).is_err());
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for section in ["drawing", "canvas", "arrow", "resize"] {
            assert!(properties.contains_key(section), "missing {section}");
        }
    }
}
