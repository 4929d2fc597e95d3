//! Configuration types for sift.
//!
//! [`Config::load`] reads `~/.config/sift/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::load_from`] reads an
//! explicit path instead. [`Config::defaults`] returns the same defaults
//! without touching the filesystem (useful in tests).

use crate::matcher::TermSplit;
use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[search]
debounce_ms         = 30
timings             = false
param               = "search"
collapse_whitespace = false

[ui]
theme       = "default"
show_counts = true
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/sift/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Quiet period before a typed query is applied.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Log how long each filter pass takes.
    #[serde(default)]
    pub timings: bool,
    /// Name of the location query parameter holding the search.
    #[serde(default = "default_param")]
    pub param: String,
    /// Split terms on whitespace runs instead of single spaces.
    #[serde(default)]
    pub collapse_whitespace: bool,
}

fn default_debounce_ms() -> u64 { 30 }
fn default_param() -> String { crate::navigation::DEFAULT_PARAM.to_string() }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            timings: false,
            param: default_param(),
            collapse_whitespace: false,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn term_split(&self) -> TermSplit {
        if self.collapse_whitespace {
            TermSplit::Collapse
        } else {
            TermSplit::Literal
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Show `visible/total` counts next to each group.
    #[serde(default = "default_show_counts")]
    pub show_counts: bool,
}

fn default_theme() -> String { "default".to_string() }
fn default_show_counts() -> bool { true }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            show_counts: default_show_counts(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/sift/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::layered(&path)
    }

    /// Load an explicit config file layered on top of the defaults. The file
    /// must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        Self::layered(path)
    }

    fn layered(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("sift")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
