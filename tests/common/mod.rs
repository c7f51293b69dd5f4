// tests/common/mod.rs

//! Shared catalog fixtures for integration tests.

#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// A component entry for a collection XML fixture
pub fn xml_component(id: &str, packages: &[&str], name: &str, summary: &str) -> String {
    let pkgnames: String = packages
        .iter()
        .map(|p| format!("<pkgname>{}</pkgname>", p))
        .collect();
    format!(
        r#"<component type="desktop-application">
    <id>{id}</id>
    {pkgnames}
    <name>{name}</name>
    <summary>{summary}</summary>
  </component>"#
    )
}

/// Wrap component entries in a `<components>` document
pub fn xml_catalog(origin: &str, components: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<components version=\"0.14\" origin=\"{}\">\n{}\n</components>\n",
        origin,
        components.join("\n")
    )
}

/// Catalog directory layout inside a temporary root
///
/// Keep the struct alive for as long as the files are needed.
pub struct CatalogDirs {
    pub root: TempDir,
    pub xml: PathBuf,
    pub yaml: PathBuf,
}

impl CatalogDirs {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let xml = root.path().join("swcatalog").join("xml");
        let yaml = root.path().join("swcatalog").join("yaml");
        fs::create_dir_all(&xml).unwrap();
        fs::create_dir_all(&yaml).unwrap();
        Self { root, xml, yaml }
    }

    pub fn sources(&self) -> Vec<PathBuf> {
        vec![self.xml.clone(), self.yaml.clone()]
    }

    pub fn write_xml(&self, file: &str, content: &str) {
        fs::write(self.xml.join(file), content).unwrap();
    }

    pub fn write_xml_gz(&self, file: &str, content: &str) {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content.as_bytes()).unwrap();
        fs::write(self.xml.join(file), encoder.finish().unwrap()).unwrap();
    }

    pub fn write_yaml(&self, file: &str, content: &str) {
        fs::write(self.yaml.join(file), content).unwrap();
    }

    pub fn remove_xml(&self, file: &str) {
        fs::remove_file(self.xml.join(file)).unwrap();
    }
}

/// The firefox/vlc catalog most tests start from
///
/// Firefox ships as `firefox` and `firefox-esr`, VLC as `vlc`, and the
/// GNOME OS component has no package at all.
pub fn desktop_catalog() -> String {
    xml_catalog(
        "desktop",
        &[
            xml_component(
                "org.mozilla.firefox",
                &["firefox", "firefox-esr"],
                "Firefox",
                "Fast, private web browser",
            ),
            xml_component(
                "org.videolan.vlc",
                &["vlc"],
                "VLC media player",
                "Play movies and music",
            ),
            xml_component(
                "org.gnome.os",
                &[],
                "GNOME OS",
                "A web browser friendly operating system",
            ),
        ],
    )
}

pub const DEP11_CATALOG: &str = r#"---
File: DEP-11
Version: '0.16'
Origin: debian-main
---
Type: desktop-application
ID: org.gnome.Maps
Package: gnome-maps
Name:
  C: Maps
Summary:
  C: Find places around the world
Keywords:
  C:
  - map
  - location
Categories:
- Utility
---
Type: desktop-application
ID: org.kde.marble
Package: marble
Name:
  C: Marble
Summary:
  C: Virtual globe and world atlas
"#;
