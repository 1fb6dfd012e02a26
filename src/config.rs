//! Persistent defaults for the split and merge pipelines.
//!
//! An optional `claude-docs.toml` in the working directory supplies defaults
//! for values the CLI would otherwise hard-code. Every field has a serde
//! default so partial files work; a missing file means built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::section::{
    DEFAULT_HEADER_LEVEL, DEFAULT_LINES_PER_FILE, DEFAULT_MAX_SECTIONS, DEFAULT_MAX_SIZE_KB,
};

/// Name of the defaults file looked up in the working directory.
pub const CONFIG_FILE: &str = "claude-docs.toml";

/// Tool-wide defaults, loaded from [`CONFIG_FILE`] when present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for the split pipeline.
    pub split: SplitDefaults,
    /// Defaults for the merge pipeline.
    pub merge: MergeDefaults,
}

/// Split-pipeline values applied when flags are not given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitDefaults {
    /// Header depth for header-based splitting.
    pub header_level: usize,
    /// Maximum number of sections for header-based splitting.
    pub max_sections: usize,
    /// Lines per file for line-based splitting.
    pub lines_per_file: usize,
    /// Size ceiling in KB for size-based splitting.
    pub max_size_kb: usize,
    /// Prefix prepended to generated filenames.
    pub prefix: String,
}

impl Default for SplitDefaults {
    fn default() -> Self {
        Self {
            header_level: DEFAULT_HEADER_LEVEL,
            max_sections: DEFAULT_MAX_SECTIONS,
            lines_per_file: DEFAULT_LINES_PER_FILE,
            max_size_kb: DEFAULT_MAX_SIZE_KB,
            prefix: String::new(),
        }
    }
}

/// Merge-pipeline values applied when flags are not given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeDefaults {
    /// Glob pattern matched against file names.
    pub pattern: String,
    /// Search subdirectories recursively.
    pub recursive: bool,
    /// File names always excluded from merging.
    pub exclude: Vec<String>,
}

impl Default for MergeDefaults {
    fn default() -> Self {
        Self {
            pattern: "*.md".to_string(),
            recursive: false,
            exclude: Vec::new(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).expect("config serializes to TOML");
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Loads [`CONFIG_FILE`] from `dir`, falling back to defaults when the
    /// file is absent. An unreadable or invalid file is logged and ignored
    /// rather than aborting the operation it was meant to parameterize.
    #[must_use]
    pub fn discover(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("ignoring {}: {e}", path.display());
            Self::default()
        })
    }
}

/// Errors loading or saving the defaults file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    /// The TOML content is invalid.
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}
