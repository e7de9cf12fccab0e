//! Strict hex color values.
//!
//! Only the hex notation is accepted:
//!
//! - `#rgb` and `#rgba` (short forms, each digit repeated when expanded)
//! - `#rrggbb` and `#rrggbbaa`
//!
//! Named colors (`amber`), functional notation (`rgb(...)`, `hsl(...)`) and
//! bare digits without the `#` prefix are all rejected.
//!
//! # Example
//!
//! ```rust
//! use swatch::ColorValue;
//!
//! let amber = ColorValue::parse("#f59e0b").unwrap();
//! assert_eq!(amber.rgba(), (245, 158, 11, 255));
//!
//! let short = ColorValue::parse("#FFF").unwrap();
//! assert_eq!(short.to_canonical(), "#ffffff");
//!
//! assert!(ColorValue::parse("amber").is_none());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A validated hex color, kept in the spelling it was written with.
///
/// Equality is textual: `#FFF` and `#ffffff` are different values. Use
/// [`to_canonical`](ColorValue::to_canonical) to compare colors by meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorValue(String);

impl ColorValue {
    /// Parses a hex color, returning `None` if `s` is not one.
    ///
    /// No trimming is performed: `" #fff"` is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        let valid_len = matches!(hex.len(), 3 | 4 | 6 | 8);
        if valid_len && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            Some(ColorValue(s.to_string()))
        } else {
            None
        }
    }

    /// Returns the color as written, including the leading `#`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn digits(&self) -> &str {
        &self.0[1..]
    }

    /// Returns true if the color carries an explicit alpha channel.
    pub fn has_alpha(&self) -> bool {
        matches!(self.digits().len(), 4 | 8)
    }

    /// Returns the red, green, blue and alpha channels.
    ///
    /// Short forms are expanded by repeating each digit (`#f80` is
    /// `(255, 136, 0)`); colors without alpha report 255.
    pub fn rgba(&self) -> (u8, u8, u8, u8) {
        let hex = self.digits();
        let channel = |range: std::ops::Range<usize>| {
            // Digits were checked in `parse`.
            u8::from_str_radix(&hex[range], 16).unwrap_or(0)
        };
        match hex.len() {
            3 | 4 => {
                let short = |i: usize| channel(i..i + 1) * 17;
                let alpha = if hex.len() == 4 { short(3) } else { 255 };
                (short(0), short(1), short(2), alpha)
            }
            _ => {
                let alpha = if hex.len() == 8 { channel(6..8) } else { 255 };
                (channel(0..2), channel(2..4), channel(4..6), alpha)
            }
        }
    }

    /// Returns the lowercase long form: `#rrggbb`, or `#rrggbbaa` when the
    /// color has an alpha channel.
    pub fn to_canonical(&self) -> String {
        let (r, g, b, a) = self.rgba();
        if self.has_alpha() {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        } else {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        }
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ColorValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Error returned by [`ColorValue::from_str`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color '{0}' (expected #rgb, #rgba, #rrggbb or #rrggbbaa)")]
pub struct InvalidHexColor(pub String);

impl FromStr for ColorValue {
    type Err = InvalidHexColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorValue::parse(s).ok_or_else(|| InvalidHexColor(s.to_string()))
    }
}

impl Serialize for ColorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ColorValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
