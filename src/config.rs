// src/config.rs

//! Configuration file handling
//!
//! The configuration is optional. When the default file is absent every
//! setting falls back to the standard system catalog locations.
//!
//! # Example config.toml
//!
//! ```toml
//! [pool]
//! # Catalog directories, read in order (later catalogs override earlier
//! # definitions of the same component id)
//! sources = [
//!     "/usr/share/swcatalog/xml",
//!     "/var/lib/swcatalog/yaml",
//! ]
//! locale = "de_DE.UTF-8"
//! skip_invalid = true
//!
//! [index]
//! # Package names reported per search hit: "first" or "all"
//! search_names = "first"
//! ```

use crate::error::{Error, Result};
use crate::index::SearchNamePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default path for the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/gpk-appstream/config.toml";

/// Catalog directories searched when none are configured
///
/// Covers the current `swcatalog` layout and the legacy `app-info` one.
pub const DEFAULT_CATALOG_DIRS: &[&str] = &[
    "/usr/share/swcatalog/xml",
    "/usr/share/swcatalog/yaml",
    "/var/lib/swcatalog/xml",
    "/var/lib/swcatalog/yaml",
    "/var/cache/swcatalog/xml",
    "/usr/share/app-info/xmls",
    "/usr/share/app-info/yaml",
    "/var/lib/app-info/yaml",
    "/var/cache/app-info/xmls",
];

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pool: PoolConfig,

    #[serde(default)]
    pub index: IndexConfig,
}

/// Where and how the catalog pool loads metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Catalog directories, in load order
    #[serde(default = "default_sources")]
    pub sources: Vec<PathBuf>,

    /// Locale used to pick translated names and summaries
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Skip unreadable or malformed catalogs instead of failing the load
    #[serde(default = "default_skip_invalid")]
    pub skip_invalid: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            locale: default_locale(),
            skip_invalid: default_skip_invalid(),
        }
    }
}

impl PoolConfig {
    /// Configuration reading only the given directories
    pub fn with_sources<I, P>(sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

/// Index behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexConfig {
    #[serde(default)]
    pub search_names: SearchNamePolicy,
}

fn default_sources() -> Vec<PathBuf> {
    DEFAULT_CATALOG_DIRS.iter().map(PathBuf::from).collect()
}

fn default_locale() -> String {
    "C".to_string()
}

fn default_skip_invalid() -> bool {
    true
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;

    if config.pool.locale.trim().is_empty() {
        return Err(Error::Config("pool.locale must not be empty".to_string()));
    }
    if let Some(relative) = config.pool.sources.iter().find(|p| p.is_relative()) {
        return Err(Error::Config(format!(
            "catalog source must be an absolute path: {}",
            relative.display()
        )));
    }

    Ok(config)
}

/// Load configuration from `path`, or from the default location
///
/// An explicitly given file must exist; a missing default file yields the
/// built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let (path, explicit) = match path {
        Some(p) => (p, true),
        None => (Path::new(DEFAULT_CONFIG_PATH), false),
    };

    match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!("Loading configuration from {}", path.display());
            parse_config(&content)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => {
            debug!("No configuration at {}, using defaults", path.display());
            Ok(Config::default())
        }
        Err(e) => Err(Error::io(path, e)),
    }
}
