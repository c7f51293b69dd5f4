// src/lib.rs

//! AppStream package metadata index
//!
//! Maps installable package names to AppStream components so a package
//! manager front end can show application names, summaries and icons for
//! the packages it deals with, and can turn free-text searches into
//! package names.
//!
//! # Architecture
//!
//! - Pool: loads collection XML and DEP-11 YAML catalogs from disk and owns
//!   every component ([`appstream::CatalogPool`])
//! - Index: derived package name -> component map over any
//!   [`appstream::ComponentPool`] ([`ComponentIndex`])
//! - Config: optional TOML file naming catalog sources and index policy
//!
//! # Usage
//!
//! ```no_run
//! use gpk_appstream::{ComponentIndex, Config};
//!
//! let mut index = ComponentIndex::from_config(&Config::default());
//! index.load(None)?;
//!
//! if let Some(component) = index.lookup("firefox") {
//!     println!("{}: {}", component.display_name(), component.id);
//! }
//! for package in index.search_package_names("web browser") {
//!     println!("{}", package);
//! }
//! # Ok::<(), gpk_appstream::Error>(())
//! ```

pub mod appstream;
pub mod compression;
pub mod config;
mod error;
pub mod index;

pub use appstream::{CatalogPool, Component, ComponentKind, ComponentPool};
pub use config::{load_config, parse_config, Config, IndexConfig, PoolConfig};
pub use error::{Error, Result};
pub use index::{ComponentIndex, SearchNamePolicy};
