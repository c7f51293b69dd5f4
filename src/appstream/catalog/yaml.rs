// src/appstream/catalog/yaml.rs

//! DEP-11 YAML parser
//!
//! A DEP-11 file is a YAML stream whose first document is a header
//! (`File: DEP-11`, `Origin: ...`) and whose remaining documents each
//! describe one component. Translatable fields are maps keyed by locale,
//! with `C` holding the untranslated value.

use super::Localized;
use crate::appstream::{Component, ComponentKind};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Header {
    file: Option<String>,
    origin: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Dep11Component {
    #[serde(rename = "ID")]
    id: Option<String>,
    #[serde(rename = "Type")]
    kind: Option<String>,
    package: Option<String>,
    #[serde(default)]
    name: HashMap<String, String>,
    #[serde(default)]
    summary: HashMap<String, String>,
    #[serde(default)]
    description: HashMap<String, String>,
    #[serde(default)]
    keywords: HashMap<String, Vec<String>>,
    #[serde(default)]
    categories: Vec<String>,
    project_license: Option<String>,
    #[serde(default)]
    developer_name: HashMap<String, String>,
    developer: Option<Developer>,
    #[serde(default)]
    url: HashMap<String, String>,
    icon: Option<Icon>,
}

#[derive(Debug, Deserialize)]
struct Developer {
    #[serde(default)]
    name: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct Icon {
    stock: Option<String>,
}

fn localized(map: HashMap<String, String>, locale: &str) -> Option<String> {
    let mut value = Localized::default();
    for (lang, text) in map {
        value.set(Some(lang.as_str()), text.trim().to_string(), locale);
    }
    value.resolve()
}

/// Turn DEP-11 description markup into plain paragraphs
fn flatten_markup(markup: &str) -> String {
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut rest = markup;

    while let Some(start) = rest.find('<') {
        current.push_str(&rest[..start]);
        let Some(end) = rest[start..].find('>') else {
            rest = &rest[start..];
            break;
        };
        let tag = rest[start + 1..start + end].trim();
        if matches!(tag, "/p" | "/li") {
            paragraphs.push(std::mem::take(&mut current));
        }
        rest = &rest[start + end + 1..];
    }
    current.push_str(rest);
    paragraphs.push(current);

    paragraphs
        .into_iter()
        .map(|p| {
            let collapsed = p.split_whitespace().collect::<Vec<_>>().join(" ");
            match quick_xml::escape::unescape(&collapsed) {
                Ok(text) => text.into_owned(),
                Err(_) => collapsed,
            }
        })
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn into_component(raw: Dep11Component, origin: Option<&str>, locale: &str) -> Component {
    let mut component = Component::new(raw.id.unwrap_or_default().trim());
    component.kind = raw
        .kind
        .as_deref()
        .map(ComponentKind::from_name)
        .unwrap_or_default();
    if let Some(package) = raw.package {
        component.push_package(&package);
    }
    component.name = localized(raw.name, locale);
    component.summary = localized(raw.summary, locale);
    component.description = localized(raw.description, locale)
        .map(|d| flatten_markup(&d))
        .filter(|d| !d.is_empty());

    let mut keywords = Localized::default();
    for (lang, words) in raw.keywords {
        keywords.set(Some(lang.as_str()), words, locale);
    }
    component.keywords = keywords.into_value().unwrap_or_default();

    component.categories = raw.categories;
    component.origin = origin.map(str::to_string);
    component.project_license = raw.project_license;
    component.developer_name = localized(raw.developer_name, locale)
        .or_else(|| raw.developer.and_then(|d| localized(d.name, locale)));
    component.url_homepage = raw.url.get("homepage").cloned();
    component.icon_stock = raw.icon.and_then(|i| i.stock);
    component
}

/// Parse a DEP-11 YAML stream into components
pub fn parse_dep11_yaml(data: &[u8], path: &Path, locale: &str) -> Result<Vec<Component>> {
    let mut origin: Option<String> = None;
    let mut seen_header = false;
    let mut components = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_slice(data).enumerate() {
        let value = serde_yaml::Value::deserialize(document)
            .map_err(|e| Error::catalog(path, format!("document {}: {}", index, e)))?;
        if value.is_null() {
            continue;
        }

        if !seen_header {
            let header: Header = serde_yaml::from_value(value)
                .map_err(|e| Error::catalog(path, format!("bad DEP-11 header: {}", e)))?;
            if header.file.as_deref() != Some("DEP-11") {
                return Err(Error::catalog(path, "missing DEP-11 header"));
            }
            origin = header.origin;
            seen_header = true;
            continue;
        }

        let raw: Dep11Component = serde_yaml::from_value(value)
            .map_err(|e| Error::catalog(path, format!("document {}: {}", index, e)))?;
        components.push(into_component(raw, origin.as_deref(), locale));
    }

    Ok(components)
}
