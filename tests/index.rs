// tests/index.rs

//! Package-name index over real catalog files: load, lookup, search, reload.

mod common;

use common::{desktop_catalog, xml_catalog, xml_component, CatalogDirs, DEP11_CATALOG};
use gpk_appstream::{CatalogPool, ComponentIndex, ComponentPool, Error, PoolConfig, SearchNamePolicy};
use std::sync::atomic::{AtomicBool, Ordering};

fn index_for(dirs: &CatalogDirs) -> ComponentIndex {
    ComponentIndex::new(CatalogPool::new(PoolConfig::with_sources(dirs.sources())))
}

#[test]
fn test_lookup_firefox_and_vlc() {
    let dirs = CatalogDirs::new();
    dirs.write_xml("desktop.xml", &desktop_catalog());

    let mut index = index_for(&dirs);
    index.load(None).unwrap();

    let firefox = index.lookup("firefox").expect("firefox should be indexed");
    assert_eq!(firefox.id, "org.mozilla.firefox");
    assert_eq!(firefox.origin.as_deref(), Some("desktop"));
    assert_eq!(index.lookup("firefox-esr").unwrap().id, "org.mozilla.firefox");
    assert_eq!(index.lookup("vlc").unwrap().id, "org.videolan.vlc");
    assert!(index.lookup("chromium").is_none());

    assert_eq!(index.component_count(), 3);
    assert_eq!(index.package_count(), 3);
}

#[test]
fn test_every_declared_package_is_indexed() {
    let dirs = CatalogDirs::new();
    dirs.write_xml("desktop.xml", &desktop_catalog());
    dirs.write_yaml("Components-amd64.yml", DEP11_CATALOG);

    let mut index = index_for(&dirs);
    index.load(None).unwrap();

    for component in index.pool().components().to_vec() {
        for package in component.package_names() {
            assert_eq!(index.lookup(package).unwrap().id, component.id);
        }
    }
    assert_eq!(index.lookup("gnome-maps").unwrap().id, "org.gnome.Maps");
    assert_eq!(index.lookup("marble").unwrap().id, "org.kde.marble");
}

#[test]
fn test_shared_package_name_last_catalog_wins() {
    let dirs = CatalogDirs::new();
    dirs.write_xml(
        "a-base.xml",
        &xml_catalog(
            "base",
            &[xml_component("org.example.Editor", &["editor"], "Editor", "Edit text")],
        ),
    );
    dirs.write_xml(
        "b-extra.xml",
        &xml_catalog(
            "extra",
            &[xml_component("org.example.EditorPro", &["editor"], "Editor Pro", "Edit more")],
        ),
    );

    let mut index = index_for(&dirs);
    index.load(None).unwrap();
    assert_eq!(index.lookup("editor").unwrap().id, "org.example.EditorPro");
}

#[test]
fn test_search_skips_components_without_package() {
    let dirs = CatalogDirs::new();
    dirs.write_xml("desktop.xml", &desktop_catalog());

    let mut index = index_for(&dirs);
    index.load(None).unwrap();

    // "web browser" matches Firefox and the package-less GNOME OS entry
    let hits = index.pool().search("web browser");
    assert_eq!(hits.len(), 2);
    assert_eq!(index.search_package_names("web browser"), ["firefox"]);
}

#[test]
fn test_search_one_name_per_component() {
    let dirs = CatalogDirs::new();
    dirs.write_xml("desktop.xml", &desktop_catalog());

    let mut index = index_for(&dirs);
    index.load(None).unwrap();
    assert_eq!(index.search_package_names("firefox"), ["firefox"]);
    assert!(index.search_package_names("spreadsheet").is_empty());
    assert!(index.search_package_names("").is_empty());
}

#[test]
fn test_search_all_names_policy() {
    let dirs = CatalogDirs::new();
    dirs.write_xml("desktop.xml", &desktop_catalog());

    let mut index = ComponentIndex::with_policy(
        CatalogPool::new(PoolConfig::with_sources(dirs.sources())),
        SearchNamePolicy::All,
    );
    index.load(None).unwrap();
    assert_eq!(index.search_package_names("firefox"), ["firefox", "firefox-esr"]);
}

#[test]
fn test_search_ranks_name_over_summary() {
    let dirs = CatalogDirs::new();
    dirs.write_yaml("Components-amd64.yml", DEP11_CATALOG);
    dirs.write_xml(
        "atlas.xml",
        &xml_catalog(
            "atlas",
            &[xml_component("org.example.Atlas", &["atlas-viewer"], "World Atlas", "Maps of the world")],
        ),
    );

    let mut index = index_for(&dirs);
    index.load(None).unwrap();

    let results = index.search_package_names("maps");
    assert_eq!(results, ["gnome-maps", "atlas-viewer"]);
}

#[test]
fn test_compressed_catalog() {
    let dirs = CatalogDirs::new();
    dirs.write_xml_gz("desktop.xml.gz", &desktop_catalog());

    let mut index = index_for(&dirs);
    index.load(None).unwrap();
    assert_eq!(index.lookup("vlc").unwrap().id, "org.videolan.vlc");
}

#[test]
fn test_precancelled_load() {
    let dirs = CatalogDirs::new();
    dirs.write_xml("desktop.xml", &desktop_catalog());

    let mut index = index_for(&dirs);
    let token = AtomicBool::new(true);
    let err = index.load(Some(&token)).unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert!(!index.is_loaded());
    assert_eq!(index.package_count(), 0);
    assert!(index.lookup("firefox").is_none());
}

#[test]
fn test_cancelled_reload_keeps_index() {
    let dirs = CatalogDirs::new();
    dirs.write_xml("desktop.xml", &desktop_catalog());

    let mut index = index_for(&dirs);
    index.load(None).unwrap();

    let token = AtomicBool::new(false);
    token.store(true, Ordering::Relaxed);
    assert!(index.load(Some(&token)).is_err());
    assert_eq!(index.lookup("firefox").unwrap().id, "org.mozilla.firefox");
}

#[test]
fn test_no_metadata_error() {
    let dirs = CatalogDirs::new();
    let mut index = index_for(&dirs);

    let err = index.load(None).unwrap_err();
    assert!(matches!(err, Error::NoMetadata { .. }));
    assert!(!index.is_loaded());
}

#[test]
fn test_reload_unchanged_catalogs_is_idempotent() {
    let dirs = CatalogDirs::new();
    dirs.write_xml("desktop.xml", &desktop_catalog());
    dirs.write_yaml("Components-amd64.yml", DEP11_CATALOG);

    let mut index = index_for(&dirs);
    index.load(None).unwrap();
    let mut before: Vec<(String, String)> = index
        .package_names()
        .map(|p| (p.to_string(), index.lookup(p).unwrap().id.clone()))
        .collect();
    before.sort();

    index.load(None).unwrap();
    let mut after: Vec<(String, String)> = index
        .package_names()
        .map(|p| (p.to_string(), index.lookup(p).unwrap().id.clone()))
        .collect();
    after.sort();

    assert_eq!(before, after);
}

#[test]
fn test_reload_drops_removed_catalog() {
    let dirs = CatalogDirs::new();
    dirs.write_xml("desktop.xml", &desktop_catalog());
    dirs.write_yaml("Components-amd64.yml", DEP11_CATALOG);

    let mut index = index_for(&dirs);
    index.load(None).unwrap();
    assert!(index.lookup("firefox").is_some());

    dirs.remove_xml("desktop.xml");
    index.load(None).unwrap();
    assert!(index.lookup("firefox").is_none());
    assert_eq!(index.lookup("marble").unwrap().id, "org.kde.marble");
}
