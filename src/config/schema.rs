//! Configuration schema for Wheelhouse
//!
//! Global configuration is stored at `~/.config/wheelhouse/config.toml`.
//! A project pinfile may override the `[index]` section.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Package index settings
    pub index: IndexConfig,

    /// Build tool settings
    pub build: BuildConfig,
}

/// Package index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Primary package index URL
    pub url: String,

    /// Additional index URLs consulted after the primary
    pub extra_urls: Vec<String>,

    /// Consider prerelease versions during resolution
    pub prereleases: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: "https://pypi.org/simple".to_string(),
            extra_urls: vec![],
            prereleases: false,
        }
    }
}

impl IndexConfig {
    /// All configured index URLs, primary first
    pub fn urls(&self) -> Vec<String> {
        let mut urls = vec![self.url.clone()];
        urls.extend(self.extra_urls.iter().cloned());
        urls
    }
}

/// Build tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Executable invoked to build wheels
    pub tool: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            tool: "pip".to_string(),
        }
    }
}
