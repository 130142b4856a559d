//! Configuration for fragment resolution
//!
//! Settings can be built in code or loaded from a TOML file:
//!
//! ```toml
//! [inliner]
//! components = "src/components"
//! svg_banner = true
//! max_depth = 16
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration options for the inliner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlinerConfig {
    /// Root of the fragment tree
    pub components_dir: PathBuf,

    /// Wrap inlined SVG fragments in START/END comments
    pub svg_banner: bool,

    /// Maximum fragment nesting depth; unlimited when `None`
    pub max_depth: Option<usize>,
}

impl Default for InlinerConfig {
    fn default() -> Self {
        Self {
            components_dir: PathBuf::from("components"),
            svg_banner: true,
            max_depth: None,
        }
    }
}

#[derive(Deserialize)]
struct TomlConfig {
    inliner: Option<TomlInliner>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlInliner {
    components: Option<PathBuf>,
    svg_banner: Option<bool>,
    max_depth: Option<usize>,
}

impl InlinerConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root of the fragment tree
    pub fn with_components_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.components_dir = dir.into();
        self
    }

    /// Enable or disable the comment banner around SVG fragments
    pub fn with_svg_banner(mut self, enabled: bool) -> Self {
        self.svg_banner = enabled;
        self
    }

    /// Set the maximum fragment nesting depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Load configuration from a TOML file.
    ///
    /// A relative `components` path is taken relative to the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_str(&content)?;
        if config.components_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.components_dir = parent.join(&config.components_dir);
            }
        }
        Ok(config)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(inliner) = parsed.inliner {
            if let Some(dir) = inliner.components {
                config.components_dir = dir;
            }
            if let Some(banner) = inliner.svg_banner {
                config.svg_banner = banner;
            }
            if let Some(depth) = inliner.max_depth {
                config.max_depth = Some(depth);
            }
        }

        Ok(config)
    }
}
