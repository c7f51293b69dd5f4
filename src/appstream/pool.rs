// src/appstream/pool.rs

//! Component pools
//!
//! [`ComponentPool`] is the seam between the package-name index and
//! whatever owns the AppStream components. [`CatalogPool`] is the
//! implementation backed by catalog files on disk.

use super::catalog;
use super::search::{self, TokenTable};
use super::{is_cancelled, Component};
use crate::config::PoolConfig;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use tracing::{debug, info, warn};

/// A loadable, searchable collection of AppStream components
///
/// Implementations must leave the previously loaded component set intact
/// when `load` fails, so that positions handed out by `components` stay
/// meaningful.
pub trait ComponentPool {
    /// Load all components from the configured sources
    ///
    /// Implementations check `cancel_token` between units of work and
    /// return [`Error::Cancelled`] once it is set.
    fn load(&mut self, cancel_token: Option<&AtomicBool>) -> Result<()>;

    /// All loaded components, in load order
    fn components(&self) -> &[Component];

    /// Components matching a free-text query, best match first
    fn search(&self, query: &str) -> Vec<&Component>;
}

/// Pool reading collection XML and DEP-11 YAML catalogs from directories
pub struct CatalogPool {
    config: PoolConfig,
    components: Vec<Component>,
    search_tables: Vec<TokenTable>,
    catalogs_read: usize,
}

impl CatalogPool {
    /// Create an empty pool; nothing is read until [`ComponentPool::load`]
    pub fn new(config: PoolConfig) -> Self {
        Self {
            config,
            components: Vec::new(),
            search_tables: Vec::new(),
            catalogs_read: 0,
        }
    }

    /// Create a pool that reads only the given directories
    pub fn with_sources<I, P>(sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::new(PoolConfig::with_sources(sources))
    }

    /// Number of catalog files parsed by the last successful load
    pub fn catalogs_read(&self) -> usize {
        self.catalogs_read
    }

    /// Read every configured source into a fresh component list
    ///
    /// `on_catalog` runs after each parsed catalog with its path and
    /// component count. Returns the merged components and the number of
    /// catalogs parsed.
    fn read_sources<F>(
        &self,
        cancel_token: Option<&AtomicBool>,
        mut on_catalog: F,
    ) -> Result<(Vec<Component>, usize)>
    where
        F: FnMut(&Path, usize),
    {
        let mut merged: Vec<Component> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut found = 0usize;
        let mut parsed = 0usize;

        for dir in &self.config.sources {
            if is_cancelled(cancel_token) {
                return Err(Error::Cancelled);
            }

            let files = match catalog::discover_catalogs(dir) {
                Ok(files) => files,
                Err(e) if self.config.skip_invalid => {
                    warn!("Skipping catalog source {}: {}", dir.display(), e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            for file in files {
                if is_cancelled(cancel_token) {
                    debug!("Load cancelled before {}", file.display());
                    return Err(Error::Cancelled);
                }
                found += 1;

                let components = match catalog::read_catalog(&file, &self.config.locale) {
                    Ok(components) => components,
                    Err(e) if self.config.skip_invalid => {
                        warn!("Skipping catalog: {}", e);
                        continue;
                    }
                    Err(e) => return Err(e),
                };
                parsed += 1;
                on_catalog(&file, components.len());

                for component in components {
                    if component.id.is_empty() {
                        warn!("Ignoring component without id in {}", file.display());
                        continue;
                    }
                    // Later catalogs replace earlier definitions of the same id
                    match positions.get(&component.id) {
                        Some(&pos) => merged[pos] = component,
                        None => {
                            positions.insert(component.id.clone(), merged.len());
                            merged.push(component);
                        }
                    }
                }
            }
        }

        if found == 0 {
            return Err(Error::NoMetadata {
                searched: self.config.sources.clone(),
            });
        }

        Ok((merged, parsed))
    }
}

impl ComponentPool for CatalogPool {
    fn load(&mut self, cancel_token: Option<&AtomicBool>) -> Result<()> {
        let (components, parsed) = self.read_sources(cancel_token, |file, count| {
            debug!("{}: {} components", file.display(), count);
        })?;

        self.search_tables = components.iter().map(TokenTable::build).collect();
        self.components = components;
        self.catalogs_read = parsed;

        info!(
            "Loaded {} AppStream components from {} catalogs",
            self.components.len(),
            parsed
        );
        Ok(())
    }

    fn components(&self) -> &[Component] {
        &self.components
    }

    fn search(&self, query: &str) -> Vec<&Component> {
        search::rank(&self.search_tables, query)
            .into_iter()
            .filter_map(|i| self.components.get(i))
            .collect()
    }
}
