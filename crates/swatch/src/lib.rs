//! # Swatch - Color-Theme Configuration Loader
//!
//! `swatch` loads the configuration a utility-class CSS generator consumes:
//! the glob patterns of the templates to scan, a palette of named color
//! families, and a list of plugins. It validates the whole document eagerly
//! and hands back an immutable [`ThemeConfig`].
//!
//! Generating CSS, scanning templates and expanding globs are left to the
//! generator; this crate only guarantees that what it receives is well formed.
//!
//! ## Core Concepts
//!
//! - [`ColorValue`]: a strict hex color (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`)
//! - [`ColorToken`]: a family value, either [`Solid`](ColorToken::Solid) or a
//!   [`Scale`](ColorToken::Scale) of shades
//! - [`ThemeConfig`]: the validated root object
//! - [`ThemeConfigLoader`]: loads documents and layers revisions with
//!   [`merge`](ThemeConfigLoader::merge)
//! - [`ThemeError`]: every way a document can be rejected
//!
//! ## Quick Start
//!
//! ```rust
//! use swatch::{ThemeConfigLoader, ThemeError};
//!
//! let theme = ThemeConfigLoader::load_yaml(r##"
//! content: ["./app/templates/**/*.html"]
//! theme:
//!   extend:
//!     colors:
//!       brand:
//!         background: "#1e293b"
//!         surface: "#334155"
//!         primary: "#f59e0b"
//!         primary-hover: "#fde047"
//! plugins: []
//! "##).unwrap();
//!
//! assert_eq!(theme.content_patterns(), ["./app/templates/**/*.html"]);
//! assert_eq!(theme.color("brand-surface").unwrap().as_str(), "#334155");
//!
//! let err = ThemeConfigLoader::load_yaml(r##"
//! content: ["./app/templates/**/*.html"]
//! theme: { extend: { colors: { brand: { primary-hover: amber } } } }
//! "##).unwrap_err();
//!
//! assert_eq!(err, ThemeError::InvalidColorValue {
//!     family: "brand".into(),
//!     shade: Some("primary-hover".into()),
//!     value: "amber".into(),
//! });
//! ```
//!
//! ## Revisions
//!
//! A palette that grows over time is best expressed as a base document plus
//! revisions. Each revision replaces whole families; shades are never merged
//! individually, so a family can change shape between revisions:
//!
//! ```rust
//! use swatch::ThemeConfigLoader;
//!
//! let base = ThemeConfigLoader::load_yaml(r##"
//! content: ["./app/templates/**/*.html"]
//! colors:
//!   brand: { primary: "#f59e0b", surface: "#334155" }
//! "##).unwrap();
//!
//! let rebrand = ThemeConfigLoader::load_yaml(r##"
//! content: ["./app/templates/**/*.html"]
//! colors:
//!   brand: "#0ea5e9"
//!   gray: { 50: "#f8fafc", 900: "#0f172a" }
//! "##).unwrap();
//!
//! let theme = ThemeConfigLoader::compose(base, [rebrand]).unwrap();
//! assert!(theme.family("brand").unwrap().as_solid().is_some());
//! assert_eq!(theme.color("gray-900").unwrap().as_str(), "#0f172a");
//! ```

mod color;
mod config;
mod error;
mod loader;
mod token;

pub use color::{ColorValue, InvalidHexColor};
pub use config::{ThemeConfig, DEFAULT_SHADE};
pub use error::{Result, ThemeError};
pub use loader::ThemeConfigLoader;
pub use token::{is_canonical_shade, ColorScale, ColorToken, CANONICAL_SHADES};
