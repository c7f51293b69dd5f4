// src/appstream/mod.rs

//! AppStream metadata pool
//!
//! This module provides:
//! - The [`Component`] record for one piece of installable software
//! - Catalog discovery and parsing (collection XML and DEP-11 YAML)
//! - [`CatalogPool`], which owns every loaded component and answers
//!   free-text searches
//! - The [`ComponentPool`] trait the package-name index is written against

mod component;
mod pool;

pub mod catalog;
pub mod search;

pub use catalog::{discover_catalogs, read_catalog, CatalogFormat};
pub use component::{Component, ComponentKind};
pub use pool::{CatalogPool, ComponentPool};

use std::sync::atomic::{AtomicBool, Ordering};

/// Check an optional cancellation token
pub fn is_cancelled(cancel_token: Option<&AtomicBool>) -> bool {
    cancel_token
        .map(|t| t.load(Ordering::Relaxed))
        .unwrap_or(false)
}
