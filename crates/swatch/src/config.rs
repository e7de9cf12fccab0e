//! The validated theme configuration handed to the class generator.

use std::collections::{BTreeMap, HashSet};

use serde::{Serialize, Serializer};

use crate::color::ColorValue;
use crate::error::{Result, ThemeError};
use crate::token::ColorToken;

/// Shade key that the generator exposes under the bare family name.
pub const DEFAULT_SHADE: &str = "DEFAULT";

/// A fully validated color-theme configuration.
///
/// Instances are only produced through [`ThemeConfig::new`] or the
/// [`ThemeConfigLoader`](crate::ThemeConfigLoader), both of which enforce:
///
/// - at least one content pattern, none of them blank
/// - family names that are non-empty, whitespace-free and unique ignoring case
/// - non-empty shade keys
///
/// There is no mutating API; [`merge`](crate::ThemeConfigLoader::merge)
/// produces a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    content_patterns: Vec<String>,
    colors: BTreeMap<String, ColorToken>,
    plugins: Vec<String>,
}

impl ThemeConfig {
    /// Builds a configuration from already-typed parts, validating every
    /// invariant.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::EmptyContent`] if `content_patterns` is empty
    /// - [`ThemeError::InvalidGlob`] for a blank pattern
    /// - [`ThemeError::InvalidFamily`] for an empty or whitespace-bearing name
    /// - [`ThemeError::DuplicateFamily`] for names equal ignoring case
    /// - [`ThemeError::InvalidShade`] for an empty shade key
    pub fn new(
        content_patterns: Vec<String>,
        colors: BTreeMap<String, ColorToken>,
        plugins: Vec<String>,
    ) -> Result<Self> {
        validate_patterns(&content_patterns)?;
        validate_families(&colors)?;
        Ok(Self {
            content_patterns,
            colors,
            plugins,
        })
    }

    /// Glob patterns of the files the generator should scan.
    pub fn content_patterns(&self) -> &[String] {
        &self.content_patterns
    }

    /// Color families keyed by name.
    pub fn colors(&self) -> &BTreeMap<String, ColorToken> {
        &self.colors
    }

    /// Plugin identifiers, passed through untouched.
    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    pub fn family(&self, name: &str) -> Option<&ColorToken> {
        self.colors.get(name)
    }

    /// Total number of colors across all families.
    pub fn color_count(&self) -> usize {
        self.colors.values().map(ColorToken::color_count).sum()
    }

    /// Flattens the palette into the names the generator exposes.
    ///
    /// A solid family `accent` yields `accent`; a scale family `brand` with
    /// shade `primary-hover` yields `brand-primary-hover`. A shade named
    /// `DEFAULT` yields the bare family name.
    ///
    /// ```rust
    /// let theme = swatch::ThemeConfigLoader::load_yaml(r##"
    /// content: ["./app/templates/**/*.html"]
    /// theme:
    ///   extend:
    ///     colors:
    ///       accent: "#f59e0b"
    ///       brand:
    ///         DEFAULT: "#1e293b"
    ///         primary-hover: "#fde047"
    /// "##).unwrap();
    ///
    /// let names: Vec<String> = theme.utilities().into_iter().map(|(n, _)| n).collect();
    /// assert_eq!(names, ["accent", "brand", "brand-primary-hover"]);
    /// ```
    pub fn utilities(&self) -> Vec<(String, &ColorValue)> {
        let mut out = Vec::with_capacity(self.color_count());
        for (family, token) in &self.colors {
            match token {
                ColorToken::Solid(color) => out.push((family.clone(), color)),
                ColorToken::Scale(scale) => {
                    for (shade, color) in scale.iter_ordered() {
                        out.push((utility_name(family, shade), color));
                    }
                }
            }
        }
        out
    }

    /// Resolves a flattened utility name (see [`utilities`](Self::utilities)).
    pub fn color(&self, name: &str) -> Option<&ColorValue> {
        if let Some(token) = self.colors.get(name) {
            return match token {
                ColorToken::Solid(color) => Some(color),
                ColorToken::Scale(scale) => scale.get(DEFAULT_SHADE),
            };
        }
        // Family names may contain '-', so try every split point.
        name.match_indices('-').find_map(|(i, _)| {
            let (family, shade) = (&name[..i], &name[i + 1..]);
            self.colors
                .get(family)
                .and_then(ColorToken::as_scale)
                .and_then(|scale| scale.get(shade))
        })
    }

    /// Serializes to YAML in the input document shape.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ThemeError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    /// Serializes to pretty-printed JSON in the input document shape.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ThemeError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, BTreeMap<String, ColorToken>, Vec<String>) {
        (self.content_patterns, self.colors, self.plugins)
    }
}

fn utility_name(family: &str, shade: &str) -> String {
    if shade == DEFAULT_SHADE {
        family.to_string()
    } else {
        format!("{}-{}", family, shade)
    }
}

fn validate_patterns(patterns: &[String]) -> Result<()> {
    if patterns.is_empty() {
        return Err(ThemeError::EmptyContent);
    }
    if let Some(blank) = patterns.iter().find(|p| p.is_empty()) {
        return Err(ThemeError::InvalidGlob(blank.clone()));
    }
    Ok(())
}

fn validate_families(colors: &BTreeMap<String, ColorToken>) -> Result<()> {
    let mut seen = HashSet::with_capacity(colors.len());
    for (name, token) in colors {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(ThemeError::InvalidFamily(name.clone()));
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(ThemeError::DuplicateFamily(name.clone()));
        }
        if let ColorToken::Scale(scale) = token {
            if let Some((shade, _)) = scale.iter().find(|(shade, _)| shade.is_empty()) {
                return Err(ThemeError::InvalidShade {
                    family: name.clone(),
                    shade: shade.to_string(),
                });
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct Document<'a> {
    content: &'a [String],
    theme: ThemeSection<'a>,
    plugins: &'a [String],
}

#[derive(Serialize)]
struct ThemeSection<'a> {
    extend: ExtendSection<'a>,
}

#[derive(Serialize)]
struct ExtendSection<'a> {
    colors: &'a BTreeMap<String, ColorToken>,
}

impl Serialize for ThemeConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Document {
            content: &self.content_patterns,
            theme: ThemeSection {
                extend: ExtendSection {
                    colors: &self.colors,
                },
            },
            plugins: &self.plugins,
        }
        .serialize(serializer)
    }
}
