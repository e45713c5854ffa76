//! RGBA color type and the sketch palette.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use sketchpad::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let parsed = Color::from_hex("#FF0000").unwrap();
/// assert_eq!(red, parsed);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 0-255 RGB components.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Parses `#RRGGBB` (the leading `#` is optional).
    ///
    /// Returns `None` for anything that is not exactly six hex digits.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Formats the color as `#RRGGBB`, ignoring alpha.
    pub fn to_hex(&self) -> String {
        let to_byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b)
        )
    }
}

// ============================================================================
// Predefined Color Constants (sketch toolbar palette)
// ============================================================================

/// Black (#000000), the default pen color
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Red (#FF3B30)
pub const RED: Color = Color {
    r: 1.0,
    g: 59.0 / 255.0,
    b: 48.0 / 255.0,
    a: 1.0,
};

/// Orange (#FF9500)
pub const ORANGE: Color = Color {
    r: 1.0,
    g: 149.0 / 255.0,
    b: 0.0,
    a: 1.0,
};

/// Green (#4CD964)
pub const GREEN: Color = Color {
    r: 76.0 / 255.0,
    g: 217.0 / 255.0,
    b: 100.0 / 255.0,
    a: 1.0,
};

/// Blue (#007AFF)
pub const BLUE: Color = Color {
    r: 0.0,
    g: 122.0 / 255.0,
    b: 1.0,
    a: 1.0,
};

/// Purple (#5856D6)
pub const PURPLE: Color = Color {
    r: 88.0 / 255.0,
    g: 86.0 / 255.0,
    b: 214.0 / 255.0,
    a: 1.0,
};

/// White (#FFFFFF), the canvas background and eraser color
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Fully transparent, used for the cleared overlay
pub const TRANSPARENT: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
};

/// Maps color name strings (or `#RRGGBB` hex) to Color values.
///
/// Used by the configuration system and the replay script.
///
/// # Supported Names (case-insensitive)
/// - "black", "red", "orange", "green", "blue", "purple", "white"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "black" => Some(BLACK),
        "red" => Some(RED),
        "orange" => Some(ORANGE),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "purple" => Some(PURPLE),
        "white" => Some(WHITE),
        other => Color::from_hex(other),
    }
}
