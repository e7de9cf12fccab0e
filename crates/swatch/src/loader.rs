//! Loading theme configurations from untyped documents.
//!
//! The loader accepts the document shape used by utility-class generators:
//!
//! ```yaml
//! content: ["./app/templates/**/*.html"]
//! theme:
//!   extend:
//!     colors:
//!       brand:
//!         background: "#1e293b"
//!         primary: "#f59e0b"
//!       accent: "#fde047"
//! plugins: []
//! ```
//!
//! # Lookup Rules
//!
//! | Field | Paths tried, in order |
//! |-------|-----------------------|
//! | content | `content`, `theme.content`, `theme.extend.content` |
//! | colors | `theme.extend.colors`, `theme.colors`, `colors` |
//! | plugins | `plugins` (optional) |
//!
//! The first path present wins. `content` may also be written in object form,
//! `content: { files: [...] }`.
//!
//! # Validation
//!
//! Validation is eager and all-or-nothing: the first problem found is
//! returned as a [`ThemeError`] naming the family and shade involved, and no
//! partial configuration is produced.

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use crate::color::ColorValue;
use crate::config::ThemeConfig;
use crate::error::{Result, ThemeError};
use crate::token::{ColorScale, ColorToken};

const CONTENT_PATHS: [&[&str]; 3] = [
    &["content"],
    &["theme", "content"],
    &["theme", "extend", "content"],
];

const COLOR_PATHS: [&[&str]; 3] = [
    &["theme", "extend", "colors"],
    &["theme", "colors"],
    &["colors"],
];

/// Turns raw configuration documents into validated [`ThemeConfig`] values.
///
/// All operations are pure apart from [`from_file`](Self::from_file), which
/// reads the file it is given.
///
/// # Example
///
/// ```rust
/// use swatch::{ColorToken, ThemeConfigLoader};
///
/// let theme = ThemeConfigLoader::load_json(r##"{
///     "content": ["./app/templates/**/*.html"],
///     "theme": { "extend": { "colors": {
///         "brand": { "primary": "#f59e0b", "primary-hover": "#fde047" }
///     } } },
///     "plugins": []
/// }"##).unwrap();
///
/// assert!(matches!(theme.family("brand"), Some(ColorToken::Scale(_))));
/// assert_eq!(theme.color("brand-primary").unwrap().as_str(), "#f59e0b");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeConfigLoader;

impl ThemeConfigLoader {
    /// Validates an untyped document tree.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::MissingField`] when no `content` or `colors` is found
    /// - [`ThemeError::InvalidGlob`] / [`ThemeError::EmptyContent`] for bad patterns
    /// - [`ThemeError::InvalidColorValue`] for any non-hex leaf
    /// - [`ThemeError::DuplicateFamily`] for family names equal ignoring case
    /// - [`ThemeError::InvalidFamily`] / [`ThemeError::InvalidShade`] for bad keys
    /// - [`ThemeError::InvalidType`] when a container has the wrong shape
    pub fn load(raw: &Value) -> Result<ThemeConfig> {
        let root = raw.as_mapping().ok_or_else(|| ThemeError::InvalidType {
            path: "(root)".to_string(),
            expected: "a mapping",
        })?;

        // Both required containers are located before either is parsed.
        let (content_path, content) =
            find_first(root, &CONTENT_PATHS)?.ok_or(ThemeError::MissingField("content"))?;
        let colors_found = find_all(root, &COLOR_PATHS)?;
        let (colors_path, colors) = colors_found
            .first()
            .cloned()
            .ok_or(ThemeError::MissingField("colors"))?;

        let patterns = parse_content(&content_path, content)?;
        if colors_found.len() > 1 {
            let ignored: Vec<&str> = colors_found[1..].iter().map(|(p, _)| p.as_str()).collect();
            warn!(
                used = %colors_path,
                ignored = ?ignored,
                "multiple color containers present; using the most specific"
            );
        }
        let colors = parse_colors(&colors_path, colors)?;

        let plugins = match root.get("plugins") {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => parse_plugins(value)?,
        };

        let theme = ThemeConfig::new(patterns, colors, plugins)?;
        debug!(
            content = %content_path,
            colors = %colors_path,
            families = theme.colors().len(),
            patterns = theme.content_patterns().len(),
            "loaded theme configuration"
        );
        Ok(theme)
    }

    /// Parses YAML text and validates it with [`load`](Self::load).
    pub fn load_yaml(yaml: &str) -> Result<ThemeConfig> {
        let raw: Value = serde_yaml::from_str(yaml).map_err(|e| ThemeError::Parse {
            path: None,
            message: e.to_string(),
        })?;
        Self::load(&raw)
    }

    /// Parses JSON text and validates it with [`load`](Self::load).
    pub fn load_json(json: &str) -> Result<ThemeConfig> {
        let raw: serde_json::Value = serde_json::from_str(json).map_err(|e| ThemeError::Parse {
            path: None,
            message: e.to_string(),
        })?;
        Self::load_json_value(&raw)
    }

    /// Validates an already-parsed JSON tree.
    pub fn load_json_value(raw: &serde_json::Value) -> Result<ThemeConfig> {
        let raw = serde_yaml::to_value(raw).map_err(|e| ThemeError::Parse {
            path: None,
            message: e.to_string(),
        })?;
        Self::load(&raw)
    }

    /// Reads and validates a configuration file.
    ///
    /// `.json` files are parsed as JSON; everything else (`.yaml`, `.yml`,
    /// or no extension) as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Load`] if the file cannot be read, and
    /// [`ThemeError::Parse`] carrying the path if it cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ThemeConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ThemeError::Load {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parse_error = |message: String| ThemeError::Parse {
            path: Some(path.to_path_buf()),
            message,
        };
        let raw: Value = if is_json {
            let json: serde_json::Value =
                serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?;
            serde_yaml::to_value(json).map_err(|e| parse_error(e.to_string()))?
        } else {
            serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?
        };

        debug!(path = %path.display(), json = is_json, "read theme configuration");
        Self::load(&raw)
    }

    /// Layers `overrides` on top of `base`.
    ///
    /// - Content patterns: the override's replace the base's when non-empty.
    /// - Plugins: same rule as content patterns.
    /// - Colors: each override family replaces the base family of the same
    ///   name wholesale; shades are never merged individually.
    ///
    /// # Errors
    ///
    /// The merged result is validated again, so a base family `brand` and an
    /// override family `Brand` fail with [`ThemeError::DuplicateFamily`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use swatch::ThemeConfigLoader;
    ///
    /// let base = ThemeConfigLoader::load_yaml(r##"
    /// content: ["./app/templates/**/*.html"]
    /// colors: { brand: { primary: "#f59e0b" }, text: "#f1f5f9" }
    /// "##).unwrap();
    /// let next = ThemeConfigLoader::load_yaml(r##"
    /// content: ["./app/templates/**/*.html"]
    /// colors: { brand: "#0ea5e9" }
    /// "##).unwrap();
    ///
    /// let merged = ThemeConfigLoader::merge(base, next).unwrap();
    /// assert_eq!(merged.color("brand").unwrap().as_str(), "#0ea5e9");
    /// assert_eq!(merged.color("text").unwrap().as_str(), "#f1f5f9");
    /// ```
    pub fn merge(base: ThemeConfig, overrides: ThemeConfig) -> Result<ThemeConfig> {
        let (base_content, mut colors, base_plugins) = base.into_parts();
        let (over_content, over_colors, over_plugins) = overrides.into_parts();

        let content = if over_content.is_empty() {
            base_content
        } else {
            over_content
        };
        let plugins = if over_plugins.is_empty() {
            base_plugins
        } else {
            over_plugins
        };
        let replaced = over_colors
            .keys()
            .filter(|name| colors.contains_key(*name))
            .count();
        colors.extend(over_colors);

        let theme = ThemeConfig::new(content, colors, plugins)?;
        debug!(
            families = theme.colors().len(),
            replaced, "merged theme configuration"
        );
        Ok(theme)
    }

    /// Applies a sequence of revisions to `base`, in order.
    ///
    /// Equivalent to folding [`merge`](Self::merge); stops at the first error.
    pub fn compose<I>(base: ThemeConfig, revisions: I) -> Result<ThemeConfig>
    where
        I: IntoIterator<Item = ThemeConfig>,
    {
        revisions.into_iter().try_fold(base, Self::merge)
    }
}

/// Walks `path` from `root`, requiring every intermediate node to be a mapping.
fn lookup<'a>(root: &'a Mapping, path: &[&str]) -> Result<Option<&'a Value>> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(None);
    };
    let mut current = root;
    for (depth, key) in parents.iter().enumerate() {
        match current.get(*key) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Mapping(m)) => current = m,
            Some(_) => {
                return Err(ThemeError::InvalidType {
                    path: path[..=depth].join("."),
                    expected: "a mapping",
                })
            }
        }
    }
    match current.get(*last) {
        None | Some(Value::Null) => Ok(None),
        found => Ok(found),
    }
}

fn find_all<'a>(root: &'a Mapping, paths: &[&[&str]]) -> Result<Vec<(String, &'a Value)>> {
    let mut found = Vec::new();
    for path in paths {
        if let Some(value) = lookup(root, path)? {
            found.push((path.join("."), value));
        }
    }
    Ok(found)
}

fn find_first<'a>(root: &'a Mapping, paths: &[&[&str]]) -> Result<Option<(String, &'a Value)>> {
    for path in paths {
        if let Some(value) = lookup(root, path)? {
            return Ok(Some((path.join("."), value)));
        }
    }
    Ok(None)
}

fn parse_content(path: &str, value: &Value) -> Result<Vec<String>> {
    let entries = match value {
        Value::Sequence(seq) => seq,
        Value::Mapping(m) => match m.get("files") {
            Some(Value::Sequence(seq)) => seq,
            Some(_) => {
                return Err(ThemeError::InvalidType {
                    path: format!("{}.files", path),
                    expected: "a list of glob patterns",
                })
            }
            None => return Err(ThemeError::MissingField("content.files")),
        },
        _ => {
            return Err(ThemeError::InvalidType {
                path: path.to_string(),
                expected: "a list of glob patterns",
            })
        }
    };

    if entries.is_empty() {
        return Err(ThemeError::EmptyContent);
    }
    entries
        .iter()
        .map(|entry| match entry {
            Value::String(s) if !s.is_empty() => Ok(s.clone()),
            other => Err(ThemeError::InvalidGlob(render(other))),
        })
        .collect()
}

fn parse_colors(path: &str, value: &Value) -> Result<BTreeMap<String, ColorToken>> {
    let families = value.as_mapping().ok_or_else(|| ThemeError::InvalidType {
        path: path.to_string(),
        expected: "a mapping of color families",
    })?;

    let mut colors = BTreeMap::new();
    for (key, value) in families {
        let family = scalar_key(key).ok_or_else(|| ThemeError::InvalidFamily(render(key)))?;
        let token = parse_token(&family, value)?;
        if colors.insert(family.clone(), token).is_some() {
            // `1` and `"1"` collapse to the same name.
            return Err(ThemeError::DuplicateFamily(family));
        }
    }
    Ok(colors)
}

fn parse_token(family: &str, value: &Value) -> Result<ColorToken> {
    match value {
        Value::String(s) => ColorValue::parse(s).map(ColorToken::Solid).ok_or_else(|| {
            ThemeError::InvalidColorValue {
                family: family.to_string(),
                shade: None,
                value: s.clone(),
            }
        }),
        Value::Mapping(shades) => {
            let mut scale = ColorScale::new();
            for (key, value) in shades {
                let shade = scalar_key(key).ok_or_else(|| ThemeError::InvalidShade {
                    family: family.to_string(),
                    shade: render(key),
                })?;
                let color = value
                    .as_str()
                    .and_then(ColorValue::parse)
                    .ok_or_else(|| ThemeError::InvalidColorValue {
                        family: family.to_string(),
                        shade: Some(shade.clone()),
                        value: render(value),
                    })?;
                if scale.get(&shade).is_some() {
                    return Err(ThemeError::InvalidShade {
                        family: family.to_string(),
                        shade,
                    });
                }
                scale.insert(shade, color);
            }
            Ok(ColorToken::Scale(scale))
        }
        other => Err(ThemeError::InvalidColorValue {
            family: family.to_string(),
            shade: None,
            value: render(other),
        }),
    }
}

fn parse_plugins(value: &Value) -> Result<Vec<String>> {
    let entries = value.as_sequence().ok_or_else(|| ThemeError::InvalidType {
        path: "plugins".to_string(),
        expected: "a list of plugin names",
    })?;
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| ThemeError::InvalidType {
                    path: format!("plugins[{}]", i),
                    expected: "a plugin name",
                })
        })
        .collect()
}

/// Mapping keys are accepted as strings or numbers (`50: "#f8fafc"`).
fn scalar_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Renders an offending node as text for error messages.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_json::to_string(other).unwrap_or_else(|_| format!("{:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    // =========================================================================
    // Path lookup
    // =========================================================================

    #[test]
    fn test_lookup_nested() {
        let doc = yaml("theme: { extend: { colors: { a: '#000' } } }");
        let root = doc.as_mapping().unwrap();
        assert!(lookup(root, &["theme", "extend", "colors"]).unwrap().is_some());
        assert!(lookup(root, &["theme", "colors"]).unwrap().is_none());
        assert!(lookup(root, &["colors"]).unwrap().is_none());
    }

    #[test]
    fn test_lookup_through_null_is_absent() {
        let doc = yaml("theme: ~");
        let root = doc.as_mapping().unwrap();
        assert!(lookup(root, &["theme", "extend", "colors"]).unwrap().is_none());
    }

    #[test]
    fn test_lookup_through_scalar_is_error() {
        let doc = yaml("theme: { extend: dark }");
        let root = doc.as_mapping().unwrap();
        let err = lookup(root, &["theme", "extend", "colors"]).unwrap_err();
        assert_eq!(
            err,
            ThemeError::InvalidType {
                path: "theme.extend".to_string(),
                expected: "a mapping",
            }
        );
    }

    #[test]
    fn test_lookup_null_leaf_is_absent() {
        let doc = yaml("theme: { extend: { colors: ~ } }");
        let root = doc.as_mapping().unwrap();
        assert!(lookup(root, &["theme", "extend", "colors"]).unwrap().is_none());
    }

    #[test]
    fn test_find_all_orders_by_specificity() {
        let doc = yaml(
            r##"
            colors: { a: "#000" }
            theme:
              colors: { b: "#111" }
              extend:
                colors: { c: "#222" }
            "##,
        );
        let found = find_all(doc.as_mapping().unwrap(), &COLOR_PATHS).unwrap();
        let paths: Vec<&str> = found.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["theme.extend.colors", "theme.colors", "colors"]);
    }

    // =========================================================================
    // Content
    // =========================================================================

    #[test]
    fn test_parse_content_sequence() {
        let patterns = parse_content("content", &yaml("['a/**/*.html', 'b/*.js']")).unwrap();
        assert_eq!(patterns, vec!["a/**/*.html", "b/*.js"]);
    }

    #[test]
    fn test_parse_content_object_form() {
        let patterns = parse_content("content", &yaml("files: ['a/**/*.html']")).unwrap();
        assert_eq!(patterns, vec!["a/**/*.html"]);
    }

    #[test]
    fn test_parse_content_object_without_files() {
        let err = parse_content("content", &yaml("relative: true")).unwrap_err();
        assert_eq!(err, ThemeError::MissingField("content.files"));
    }

    #[test]
    fn test_parse_content_rejects_scalar() {
        let err = parse_content("content", &yaml("'a/**/*.html'")).unwrap_err();
        assert!(matches!(err, ThemeError::InvalidType { .. }));
    }

    #[test]
    fn test_parse_content_rejects_non_string_entry() {
        let err = parse_content("content", &yaml("['a', 42]")).unwrap_err();
        assert_eq!(err, ThemeError::InvalidGlob("42".to_string()));
    }

    #[test]
    fn test_parse_content_rejects_empty_entry() {
        let err = parse_content("content", &yaml("['a', '']")).unwrap_err();
        assert_eq!(err, ThemeError::InvalidGlob(String::new()));
    }

    #[test]
    fn test_parse_content_accepts_whitespace_pattern() {
        let patterns = parse_content("content", &yaml("[' ']")).unwrap();
        assert_eq!(patterns, vec![" "]);
    }

    #[test]
    fn test_parse_content_rejects_empty_list() {
        let err = parse_content("content", &yaml("[]")).unwrap_err();
        assert_eq!(err, ThemeError::EmptyContent);
    }

    // =========================================================================
    // Colors
    // =========================================================================

    #[test]
    fn test_parse_token_solid_and_scale() {
        let solid = parse_token("accent", &yaml("'#f59e0b'")).unwrap();
        assert!(solid.as_solid().is_some());

        let scale = parse_token("gray", &yaml("{ 50: '#f8fafc', 900: '#0f172a' }")).unwrap();
        let scale = scale.as_scale().unwrap();
        assert_eq!(scale.get("50").unwrap().as_str(), "#f8fafc");
        assert_eq!(scale.get("900").unwrap().as_str(), "#0f172a");
    }

    #[test]
    fn test_parse_token_rejects_number_leaf() {
        let err = parse_token("gray", &yaml("{ 50: 123 }")).unwrap_err();
        assert_eq!(
            err,
            ThemeError::InvalidColorValue {
                family: "gray".to_string(),
                shade: Some("50".to_string()),
                value: "123".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_token_rejects_nested_scale() {
        let err = parse_token("brand", &yaml("{ primary: { hover: '#fff' } }")).unwrap_err();
        match err {
            ThemeError::InvalidColorValue { family, shade, .. } => {
                assert_eq!(family, "brand");
                assert_eq!(shade.as_deref(), Some("primary"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_token_rejects_list() {
        let err = parse_token("brand", &yaml("['#fff']")).unwrap_err();
        assert!(matches!(
            err,
            ThemeError::InvalidColorValue { shade: None, .. }
        ));
    }

    #[test]
    fn test_parse_token_rejects_colliding_shades() {
        let err = parse_token("gray", &yaml("{ 50: '#fff', '50': '#000' }")).unwrap_err();
        assert_eq!(
            err,
            ThemeError::InvalidShade {
                family: "gray".to_string(),
                shade: "50".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_colors_rejects_non_scalar_family() {
        let err = parse_colors("colors", &yaml("? [a]\n: '#fff'\n")).unwrap_err();
        assert!(matches!(err, ThemeError::InvalidFamily(_)));
    }

    #[test]
    fn test_parse_colors_rejects_sequence() {
        let err = parse_colors("theme.extend.colors", &yaml("['#fff']")).unwrap_err();
        assert_eq!(
            err,
            ThemeError::InvalidType {
                path: "theme.extend.colors".to_string(),
                expected: "a mapping of color families",
            }
        );
    }

    // =========================================================================
    // Plugins
    // =========================================================================

    #[test]
    fn test_parse_plugins() {
        let plugins = parse_plugins(&yaml("['forms', 'typography']")).unwrap();
        assert_eq!(plugins, vec!["forms", "typography"]);
    }

    #[test]
    fn test_parse_plugins_rejects_non_string() {
        let err = parse_plugins(&yaml("['forms', { name: x }]")).unwrap_err();
        assert_eq!(
            err,
            ThemeError::InvalidType {
                path: "plugins[1]".to_string(),
                expected: "a plugin name",
            }
        );
    }

    #[test]
    fn test_render() {
        assert_eq!(render(&yaml("amber")), "amber");
        assert_eq!(render(&yaml("12")), "12");
        assert_eq!(render(&yaml("true")), "true");
        assert_eq!(render(&yaml("~")), "null");
        assert_eq!(render(&yaml("[1, 2]")), "[1,2]");
    }
}
