// src/index.rs

//! Package name to AppStream component index
//!
//! A front end mostly knows packages, not AppStream ids: the installer
//! shows `firefox-esr` and wants an icon, a display name and a summary.
//! [`ComponentIndex`] owns a [`ComponentPool`] and keeps a map from every
//! declared package name to the component declaring it.
//!
//! # Multiplicity
//!
//! A component may declare several package names (split packaging,
//! per-architecture names) or none at all. [`ComponentIndex::load`]
//! indexes every declared name. When two components declare the same
//! package name, the one later in pool order wins.
//!
//! # Reloading
//!
//! Each successful load rebuilds the map from scratch, so packages whose
//! components disappeared from the catalogs stop resolving. A failed or
//! cancelled load leaves the previous state untouched.
//!
//! # Concurrency
//!
//! `load` takes `&mut self`, so lookups cannot overlap a load on the same
//! instance. To share an index across threads wrap it in a `RwLock`.

use crate::appstream::{is_cancelled, CatalogPool, Component, ComponentPool};
use crate::config::Config;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use tracing::debug;

/// Which package names a search reports for each matching component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchNamePolicy {
    /// Only the first declared package name
    #[default]
    First,
    /// Every declared package name, in declaration order
    All,
}

/// Package-name lookup over an AppStream component pool
pub struct ComponentIndex<P: ComponentPool = CatalogPool> {
    pool: P,
    /// Package name -> position in `pool.components()`
    by_package_name: HashMap<String, usize>,
    search_names: SearchNamePolicy,
    loaded: bool,
}

impl ComponentIndex<CatalogPool> {
    /// Build an unloaded index over a catalog pool described by `config`
    pub fn from_config(config: &Config) -> Self {
        Self::with_policy(
            CatalogPool::new(config.pool.clone()),
            config.index.search_names,
        )
    }
}

impl<P: ComponentPool> ComponentIndex<P> {
    /// Create an empty index owning `pool`
    pub fn new(pool: P) -> Self {
        Self::with_policy(pool, SearchNamePolicy::default())
    }

    /// Create an empty index with an explicit search naming policy
    pub fn with_policy(pool: P, search_names: SearchNamePolicy) -> Self {
        Self {
            pool,
            by_package_name: HashMap::new(),
            search_names,
            loaded: false,
        }
    }

    /// Load the pool and rebuild the package-name map
    ///
    /// Pool errors are returned unchanged. If `cancel_token` is already
    /// set the pool is not touched at all.
    pub fn load(&mut self, cancel_token: Option<&AtomicBool>) -> Result<()> {
        if is_cancelled(cancel_token) {
            return Err(Error::Cancelled);
        }

        self.pool.load(cancel_token)?;

        let components = self.pool.components();
        let mut by_package_name = HashMap::with_capacity(components.len());
        for (pos, component) in components.iter().enumerate() {
            for package in component.package_names() {
                by_package_name.insert(package.clone(), pos);
            }
        }

        debug!("AppStream components: {}", components.len());
        debug!("AppStream packages: {}", by_package_name.len());

        self.by_package_name = by_package_name;
        self.loaded = true;
        Ok(())
    }

    /// Component declaring `package_name`, if any
    ///
    /// Returns `None` before the first successful load.
    pub fn lookup(&self, package_name: &str) -> Option<&Component> {
        self.by_package_name
            .get(package_name)
            .and_then(|&pos| self.pool.components().get(pos))
    }

    /// Package names of components matching a free-text query
    ///
    /// Order follows the pool's ranking. Components without a package are
    /// skipped and names are not deduplicated across components.
    pub fn search_package_names(&self, query: &str) -> Vec<String> {
        let mut names = Vec::new();
        for component in self.pool.search(query) {
            match self.search_names {
                SearchNamePolicy::First => {
                    if let Some(name) = component.package_name() {
                        names.push(name.to_string());
                    }
                }
                SearchNamePolicy::All => names.extend(component.package_names().iter().cloned()),
            }
        }
        names
    }

    /// Whether a load has succeeded at least once
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn component_count(&self) -> usize {
        self.pool.components().len()
    }

    /// Number of distinct package names in the index
    pub fn package_count(&self) -> usize {
        self.by_package_name.len()
    }

    /// All indexed package names, in no particular order
    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.by_package_name.keys().map(String::as_str)
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }
}
