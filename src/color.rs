//! RGBA color values parsed from CSS-style strings.
//!
//! Card colors arrive as the strings a color input or stylesheet would
//! produce: `#1a202c`, `#fff`, or `rgba(45, 55, 72, 0.8)`. Parsing is
//! delegated to `csscolorparser`; the stored form is 8-bit channels plus a
//! float alpha so blending math stays in one place.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An RGBA color with 8-bit channels and a [0, 1] alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color from RGB channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Alpha quantized to a byte, clamped to [0, 255].
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl FromStr for Color {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let parsed = csscolorparser::parse(s)
            .map_err(|e| crate::Error::Config(format!("Invalid color {:?}: {}", s, e)))?;
        let [r, g, b, _] = parsed.to_rgba8();
        Ok(Self {
            r,
            g,
            b,
            a: parsed.a as f32,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (self.a - 1.0).abs() < f32::EPSILON {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

// Colors serialize as the CSS string they were written as, so a params JSON
// file looks like the original form values.
impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex() {
        let c: Color = "#1a202c".parse().unwrap();
        assert_eq!((c.r, c.g, c.b), (0x1a, 0x20, 0x2c));
        assert_eq!(c.alpha_u8(), 255);
    }

    #[test]
    fn parses_rgba_function() {
        let c: Color = "rgba(45, 55, 72, 0.8)".parse().unwrap();
        assert_eq!((c.r, c.g, c.b), (45, 55, 72));
        assert!((c.a - 0.8).abs() < 0.01);
    }

    #[test]
    fn rejects_garbage() {
        assert!("not-a-color".parse::<Color>().is_err());
    }

    #[test]
    fn serde_round_trip() {
        let c = Color::new(45, 55, 72, 0.8);
        let json = serde_json::to_string(&c).unwrap();
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!((back.r, back.g, back.b), (45, 55, 72));
        assert!((back.a - 0.8).abs() < 0.01);
    }

    #[test]
    fn displays_opaque_as_hex() {
        assert_eq!(Color::opaque(255, 255, 255).to_string(), "#ffffff");
    }
}
