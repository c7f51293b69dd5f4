// src/appstream/catalog/xml.rs

//! Collection XML parser
//!
//! Handles both catalog documents (`<components origin="...">` wrapping
//! many `<component>` elements) and standalone metainfo files with a
//! single root `<component>`.

use super::Localized;
use crate::appstream::{Component, ComponentKind};
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

/// An open element and the text collected inside it
struct Frame {
    name: String,
    lang: Option<String>,
    type_attr: Option<String>,
    text: String,
}

/// Fields of the component currently being read
#[derive(Default)]
struct PendingComponent {
    component: Component,
    name: Localized,
    summary: Localized,
    keywords: Localized<Vec<String>>,
    paragraphs: Localized<Vec<String>>,
}

impl PendingComponent {
    fn new(kind: ComponentKind, origin: Option<&str>) -> Self {
        let mut pending = Self::default();
        pending.component.kind = kind;
        pending.component.origin = origin.map(str::to_string);
        pending
    }

    fn finish(self) -> Component {
        let mut component = self.component;
        component.name = self.name.resolve();
        component.summary = self.summary.resolve();
        component.keywords = self.keywords.into_value().unwrap_or_default();
        let paragraphs = self.paragraphs.into_value().unwrap_or_default();
        if !paragraphs.is_empty() {
            component.description = Some(paragraphs.join("\n\n"));
        }
        component
    }
}

fn attribute(e: &BytesStart<'_>, key: &str, path: &Path) -> Result<Option<String>> {
    let attr = e
        .try_get_attribute(key)
        .map_err(|err| Error::catalog(path, format!("bad attribute {}: {}", key, err)))?;
    match attr {
        Some(attr) => {
            let value = attr
                .unescape_value()
                .map_err(|err| Error::catalog(path, err.to_string()))?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Nearest `xml:lang` among the open elements
fn effective_lang<'a>(frame: &'a Frame, stack: &'a [Frame]) -> Option<&'a str> {
    frame
        .lang
        .as_deref()
        .or_else(|| stack.iter().rev().find_map(|f| f.lang.as_deref()))
}

/// Parse a collection XML document into components
pub fn parse_collection_xml(data: &[u8], path: &Path, locale: &str) -> Result<Vec<Component>> {
    let mut reader = Reader::from_reader(data);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut origin: Option<String> = None;
    let mut current: Option<PendingComponent> = None;
    let mut components = Vec::new();

    loop {
        buf.clear();
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            Error::catalog(
                path,
                format!("{} at byte {}", e, reader.buffer_position()),
            )
        })?;

        match event {
            Event::Start(ref e) => {
                let name = element_name(e);
                match name.as_str() {
                    "components" => origin = attribute(e, "origin", path)?,
                    "component" if current.is_none() => {
                        let kind = attribute(e, "type", path)?
                            .map(|t| ComponentKind::from_name(&t))
                            .unwrap_or_default();
                        current = Some(PendingComponent::new(kind, origin.as_deref()));
                    }
                    _ => {}
                }
                stack.push(Frame {
                    lang: attribute(e, "xml:lang", path)?,
                    type_attr: attribute(e, "type", path)?,
                    name,
                    text: String::new(),
                });
            }
            Event::Empty(ref e) => {
                if element_name(e) == "components" {
                    origin = attribute(e, "origin", path)?;
                }
            }
            Event::Text(ref t) => {
                if let Some(frame) = stack.last_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| Error::catalog(path, e.to_string()))?;
                    append_text(&mut frame.text, &text);
                }
            }
            Event::CData(ref t) => {
                if let Some(frame) = stack.last_mut() {
                    append_text(&mut frame.text, &String::from_utf8_lossy(t));
                }
            }
            Event::End(_) => {
                let Some(frame) = stack.pop() else {
                    return Err(Error::catalog(path, "unbalanced closing tag"));
                };
                let parent = stack.last().map(|f| f.name.as_str()).unwrap_or("");

                if frame.name == "component" && parent != "component" {
                    if let Some(pending) = current.take() {
                        components.push(pending.finish());
                    }
                    continue;
                }

                // Inline markup inside paragraphs folds into the parent text
                if matches!(frame.name.as_str(), "em" | "code") {
                    if let Some(parent) = stack.last_mut() {
                        append_text(&mut parent.text, &frame.text);
                    }
                    continue;
                }

                if let Some(pending) = current.as_mut() {
                    let lang = effective_lang(&frame, &stack).map(str::to_string);
                    apply_element(pending, &frame, parent, &stack, lang.as_deref(), locale);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(frame) = stack.last() {
        return Err(Error::catalog(
            path,
            format!("unexpected end of document inside <{}>", frame.name),
        ));
    }

    Ok(components)
}

fn append_text(target: &mut String, text: &str) {
    if !target.is_empty() && !text.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}

/// Whether the open elements sit inside the component's own description
///
/// Release notes also use `<description>`; those are not collected.
fn in_component_description(stack: &[Frame]) -> bool {
    stack
        .windows(2)
        .any(|w| w[0].name == "component" && w[1].name == "description")
}

fn apply_element(
    pending: &mut PendingComponent,
    frame: &Frame,
    parent: &str,
    stack: &[Frame],
    lang: Option<&str>,
    locale: &str,
) {
    let text = frame.text.trim();
    let in_component = parent == "component";
    let untranslated = matches!(lang, None | Some("C") | Some(""));

    match frame.name.as_str() {
        "id" if in_component => pending.component.id = text.to_string(),
        "pkgname" if in_component => pending.component.push_package(text),
        "name" if in_component => pending.name.set(lang, text.to_string(), locale),
        "name" if parent == "developer" => {
            if untranslated && pending.component.developer_name.is_none() {
                pending.component.developer_name = Some(text.to_string());
            }
        }
        "summary" if in_component => pending.summary.set(lang, text.to_string(), locale),
        "developer_name" if in_component => {
            if untranslated && pending.component.developer_name.is_none() {
                pending.component.developer_name = Some(text.to_string());
            }
        }
        "project_license" if in_component => {
            pending.component.project_license = Some(text.to_string());
        }
        "keyword" if parent == "keywords" && !text.is_empty() => {
            pending.keywords.push(lang, text.to_string(), locale);
        }
        "category" if parent == "categories" && !text.is_empty() => {
            pending.component.categories.push(text.to_string());
        }
        "url" if in_component && frame.type_attr.as_deref() == Some("homepage") => {
            pending.component.url_homepage = Some(text.to_string());
        }
        "icon" if in_component && frame.type_attr.as_deref() == Some("stock") => {
            pending.component.icon_stock = Some(text.to_string());
        }
        "p" | "li" if in_component_description(stack) && !text.is_empty() => {
            pending.paragraphs.push(lang, text.to_string(), locale);
        }
        _ => {}
    }
}
