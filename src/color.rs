//! Foreground color handling
//!
//! A [`QrColor`] can only be built by parsing a hex color, so any value held
//! by the studio state is always renderable.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Default foreground color of a fresh studio
pub const DEFAULT_COLOR: QrColor = QrColor::rgb(0xDC, 0x26, 0x26);

/// An opaque sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QrColor {
    r: u8,
    g: u8,
    b: u8,
}

impl QrColor {
    /// Pure white, used for every background
    pub const WHITE: QrColor = QrColor::rgb(0xFF, 0xFF, 0xFF);

    /// Build a color from its channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB` (case-insensitive, leading `#` optional)
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(value.to_string()));
        }

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| Error::InvalidColor(value.to_string()))
        };

        match hex.len() {
            3 => {
                let expand = |c: &str| channel(&c.repeat(2));
                Ok(Self::rgb(
                    expand(&hex[0..1])?,
                    expand(&hex[1..2])?,
                    expand(&hex[2..3])?,
                ))
            }
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(Error::InvalidColor(value.to_string())),
        }
    }

    /// Channels as an array
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Opaque RGBA pixel
    pub fn to_rgba(&self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }

    /// Canonical `#RRGGBB` form
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for QrColor {
    fn default() -> Self {
        DEFAULT_COLOR
    }
}

impl fmt::Display for QrColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for QrColor {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl Serialize for QrColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for QrColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(QrColor::parse("#DC2626").unwrap(), DEFAULT_COLOR);
        assert_eq!(QrColor::parse("dc2626").unwrap(), DEFAULT_COLOR);
        assert_eq!(QrColor::parse("#0f0").unwrap(), QrColor::rgb(0, 0xFF, 0));
    }

    #[test]
    fn displays_uppercase_hex() {
        let color = QrColor::parse("#1a2b3c").unwrap();
        assert_eq!(color.to_string(), "#1A2B3C");
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "#", "#12", "#12345", "#ggg", "red", "#+12345"] {
            assert!(
                matches!(QrColor::parse(bad), Err(Error::InvalidColor(_))),
                "{bad} should be rejected"
            );
        }
    }
}
