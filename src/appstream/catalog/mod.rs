// src/appstream/catalog/mod.rs

//! AppStream catalog files
//!
//! Distributions ship catalog metadata in two formats:
//!
//! - collection XML (`<components>` documents), used by Fedora, openSUSE
//!   and Flatpak remotes, usually installed to `/usr/share/swcatalog/xml`
//! - DEP-11 YAML (multi-document streams), used by Debian and Ubuntu,
//!   usually installed to `/var/lib/swcatalog/yaml`
//!
//! Either may be compressed. This module finds catalog files in a source
//! directory and turns each one into a list of [`Component`]s.

mod xml;
mod yaml;

use super::Component;
use crate::compression::{self, CompressionFormat};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

pub use xml::parse_collection_xml;
pub use yaml::parse_dep11_yaml;

/// On-disk catalog format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Xml,
    Yaml,
}

impl CatalogFormat {
    /// Identify a catalog by file name, ignoring any compression suffix
    ///
    /// Returns `None` for files that are not catalogs (icon caches,
    /// signatures, stamps).
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let inner = compression::strip_compression_suffix(name);
        if inner.ends_with(".xml") {
            Some(Self::Xml)
        } else if inner.ends_with(".yml") || inner.ends_with(".yaml") {
            Some(Self::Yaml)
        } else {
            None
        }
    }
}

/// List catalog files directly inside `dir`, sorted by file name
///
/// A missing directory is not an error; it yields no files. Entries that
/// cannot be inspected, such as links whose target is gone, are logged and
/// left out without affecting the rest of the directory.
pub fn discover_catalogs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        debug!("Catalog source {} does not exist, skipping", dir.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.path().is_some_and(|p| p != dir) => {
                warn!("Ignoring catalog entry: {}", e);
                continue;
            }
            Err(e) => {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                return Err(Error::io(dir, source));
            }
        };

        if CatalogFormat::from_path(entry.path()).is_none() {
            continue;
        }

        let is_file = if entry.path_is_symlink() {
            match std::fs::metadata(entry.path()) {
                Ok(target) => target.is_file(),
                Err(e) => {
                    warn!("Ignoring dangling catalog link {}: {}", entry.path().display(), e);
                    false
                }
            }
        } else {
            entry.file_type().is_file()
        };

        if is_file {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Read, decompress and parse one catalog file
pub fn read_catalog(path: &Path, locale: &str) -> Result<Vec<Component>> {
    let format = CatalogFormat::from_path(path)
        .ok_or_else(|| Error::catalog(path, "unrecognized catalog file name"))?;

    let raw = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let compression = CompressionFormat::detect(path, &raw);
    let data = compression::decompress(&raw, compression)?;

    debug!(
        "Parsing {} ({:?}, {}, {} bytes)",
        path.display(),
        format,
        compression,
        data.len()
    );

    match format {
        CatalogFormat::Xml => parse_collection_xml(&data, path, locale),
        CatalogFormat::Yaml => parse_dep11_yaml(&data, path, locale),
    }
}

/// How well a translation tag fits the configured locale
///
/// `locale` may be a full POSIX locale (`de_DE.UTF-8@euro`). The full
/// `de_DE` tag ranks above the bare `de` language; other tags give `None`.
pub(crate) fn locale_rank(tag: &str, locale: &str) -> Option<u8> {
    let locale = locale
        .split(['.', '@'])
        .next()
        .unwrap_or(locale);
    if locale.is_empty() || locale == "C" || locale == "POSIX" {
        return None;
    }
    if tag == locale {
        return Some(2);
    }
    let language = locale.split('_').next().unwrap_or(locale);
    (tag == language).then_some(1)
}

/// A translatable value, keeping the untranslated and locale variants apart
///
/// Among several matching translations the best ranked one is kept, so
/// the result does not depend on the order values are recorded in.
#[derive(Debug)]
pub(crate) struct Localized<T = String> {
    untranslated: Option<T>,
    translated: Option<(u8, T)>,
}

impl<T> Default for Localized<T> {
    fn default() -> Self {
        Self {
            untranslated: None,
            translated: None,
        }
    }
}

impl<T> Localized<T> {
    /// Record a value tagged with `lang` (`None` or `"C"` for untranslated)
    pub(crate) fn set(&mut self, lang: Option<&str>, value: T, locale: &str) {
        match lang {
            None | Some("C") | Some("") => self.untranslated = Some(value),
            Some(tag) => {
                let Some(rank) = locale_rank(tag, locale) else {
                    return;
                };
                if self.translated.as_ref().is_none_or(|(best, _)| rank >= *best) {
                    self.translated = Some((rank, value));
                }
            }
        }
    }

    /// The best translation, or the untranslated value
    pub(crate) fn into_value(self) -> Option<T> {
        self.translated.map(|(_, v)| v).or(self.untranslated)
    }
}

impl<T> Localized<Vec<T>> {
    /// Append one item of a translatable list, such as a keyword or a
    /// description paragraph
    pub(crate) fn push(&mut self, lang: Option<&str>, item: T, locale: &str) {
        match lang {
            None | Some("C") | Some("") => self.untranslated.get_or_insert_with(Vec::new).push(item),
            Some(tag) => {
                let Some(rank) = locale_rank(tag, locale) else {
                    return;
                };
                match &mut self.translated {
                    Some((best, items)) if *best == rank => items.push(item),
                    Some((best, _)) if *best > rank => {}
                    _ => self.translated = Some((rank, vec![item])),
                }
            }
        }
    }
}

impl Localized<String> {
    pub(crate) fn resolve(self) -> Option<String> {
        self.into_value().filter(|v| !v.is_empty())
    }
}
