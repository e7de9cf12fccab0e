//! Color tokens: a family is either one solid color or a graduated scale.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::color::ColorValue;

/// The conventional shade keys of a graduated palette, lightest first.
///
/// Scales are not required to use these keys or to cover all of them.
pub const CANONICAL_SHADES: [&str; 11] = [
    "50", "100", "200", "300", "400", "500", "600", "700", "800", "900", "950",
];

/// Returns true if `shade` is one of [`CANONICAL_SHADES`].
pub fn is_canonical_shade(shade: &str) -> bool {
    CANONICAL_SHADES.contains(&shade)
}

/// A mapping from shade key to color.
///
/// Keys are stored sorted; use [`iter_ordered`](ColorScale::iter_ordered) for
/// lightness order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColorScale {
    shades: BTreeMap<String, ColorValue>,
}

impl ColorScale {
    /// Creates an empty scale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shade, returning the scale for chaining.
    ///
    /// A shade with the same key is replaced.
    pub fn with(mut self, shade: impl Into<String>, color: ColorValue) -> Self {
        self.shades.insert(shade.into(), color);
        self
    }

    pub(crate) fn insert(&mut self, shade: String, color: ColorValue) {
        self.shades.insert(shade, color);
    }

    /// Looks up a shade.
    pub fn get(&self, shade: &str) -> Option<&ColorValue> {
        self.shades.get(shade)
    }

    pub fn len(&self) -> usize {
        self.shades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shades.is_empty()
    }

    /// Iterates shades in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColorValue)> {
        self.shades.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates shades with canonical keys first, lightest to darkest,
    /// followed by any other keys in lexical order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = (&str, &ColorValue)> {
        let canonical = CANONICAL_SHADES
            .iter()
            .filter_map(|shade| self.shades.get_key_value(*shade));
        let others = self
            .shades
            .iter()
            .filter(|(k, _)| !is_canonical_shade(k));
        canonical.chain(others).map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the canonical shades this scale does not define.
    pub fn missing_canonical(&self) -> Vec<&'static str> {
        CANONICAL_SHADES
            .iter()
            .copied()
            .filter(|shade| !self.shades.contains_key(*shade))
            .collect()
    }
}

impl FromIterator<(String, ColorValue)> for ColorScale {
    fn from_iter<I: IntoIterator<Item = (String, ColorValue)>>(iter: I) -> Self {
        Self {
            shades: iter.into_iter().collect(),
        }
    }
}

/// The value of a color family.
///
/// # Example
///
/// ```rust
/// use swatch::{ColorScale, ColorToken, ColorValue};
///
/// let accent: ColorToken = ColorValue::parse("#f59e0b").unwrap().into();
/// assert!(accent.as_solid().is_some());
///
/// let gray: ColorToken = ColorScale::new()
///     .with("50", ColorValue::parse("#f8fafc").unwrap())
///     .with("900", ColorValue::parse("#0f172a").unwrap())
///     .into();
/// assert_eq!(gray.as_scale().map(|s| s.len()), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ColorToken {
    /// A single color, e.g. a brand color.
    Solid(ColorValue),
    /// A graduated family keyed by shade.
    Scale(ColorScale),
}

impl ColorToken {
    pub fn as_solid(&self) -> Option<&ColorValue> {
        match self {
            ColorToken::Solid(c) => Some(c),
            ColorToken::Scale(_) => None,
        }
    }

    pub fn as_scale(&self) -> Option<&ColorScale> {
        match self {
            ColorToken::Scale(s) => Some(s),
            ColorToken::Solid(_) => None,
        }
    }

    /// Number of colors this token contributes to the palette.
    pub fn color_count(&self) -> usize {
        match self {
            ColorToken::Solid(_) => 1,
            ColorToken::Scale(s) => s.len(),
        }
    }
}

impl From<ColorValue> for ColorToken {
    fn from(color: ColorValue) -> Self {
        ColorToken::Solid(color)
    }
}

impl From<ColorScale> for ColorToken {
    fn from(scale: ColorScale) -> Self {
        ColorToken::Scale(scale)
    }
}
