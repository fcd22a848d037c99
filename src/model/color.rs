use std::fmt;

use serde::{Deserialize, Serialize};

/// RGB color with 8-bit channels. Textures are always fully opaque, so alpha
/// is only added when a pixel is written out.
///
/// On the wire a color is a `#RRGGBB` string, matching what color pickers and
/// preset files produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` string. Each two-digit slice is parsed independently;
    /// a slice that is missing or not valid hex becomes 0. Never fails.
    pub fn from_hex(hex: &str) -> Self {
        let channel = |start: usize| {
            hex.get(start..start + 2)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .unwrap_or(0)
        };
        Self {
            r: channel(1),
            g: channel(3),
            b: channel(5),
        }
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Per-channel linear interpolation, rounded to the nearest integer and
    /// clamped to 0-255. `t` is not clamped: values outside [0, 1] extrapolate
    /// and then saturate. A NaN `t` yields black.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |a: u8, b: u8| {
            let a = f64::from(a);
            let v = a + (f64::from(b) - a) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// Opaque RGBA bytes for a pixel buffer.
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// True if every channel of `self` lies within the per-channel range
    /// spanned by `a` and `b`.
    pub fn within(self, a: Self, b: Self) -> bool {
        let between = |v: u8, x: u8, y: u8| v >= x.min(y) && v <= x.max(y);
        between(self.r, a.r, b.r) && between(self.g, a.g, b.g) && between(self.b, a.b, b.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Self::from_hex(&s)
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Self::from_hex(s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.to_hex()
    }
}
