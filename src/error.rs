// src/error.rs

//! Error types shared across the crate

use crate::compression::CompressionError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog, pool and index operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported while loading AppStream metadata
#[derive(Error, Debug)]
pub enum Error {
    /// The caller set the cancellation token
    #[error("loading cancelled")]
    Cancelled,

    /// None of the configured sources contained a catalog file
    #[error("no AppStream metadata found (searched: {})", display_paths(.searched))]
    NoMetadata { searched: Vec<PathBuf> },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A catalog file could not be parsed
    #[error("invalid catalog {}: {message}", .path.display())]
    Catalog { path: PathBuf, message: String },

    #[error(transparent)]
    Compression(#[from] CompressionError),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn catalog(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Catalog {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from a cancelled load
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no sources configured".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_metadata_message_lists_sources() {
        let err = Error::NoMetadata {
            searched: vec![
                PathBuf::from("/usr/share/swcatalog/xml"),
                PathBuf::from("/var/lib/swcatalog/yaml"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "no AppStream metadata found (searched: /usr/share/swcatalog/xml, /var/lib/swcatalog/yaml)"
        );
    }

    #[test]
    fn test_no_metadata_without_sources() {
        let err = Error::NoMetadata { searched: vec![] };
        assert!(err.to_string().contains("no sources configured"));
    }

    #[test]
    fn test_is_cancelled() {
        assert!(Error::Cancelled.is_cancelled());
        assert!(!Error::catalog("/tmp/x.xml", "bad").is_cancelled());
    }
}
