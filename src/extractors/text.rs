// src/extractors/text.rs
//! Small helpers shared by every extractor: whitespace normalization,
//! class checks, markup serialization and URL resolution.

use scraper::{node::Node, ElementRef};
use url::Url;

/// Collapses every run of whitespace (newlines included) to one space and trims the ends.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text content of an element and all its descendants.
pub fn element_text(element: ElementRef) -> String {
    normalize_text(&element.text().collect::<String>())
}

/// True if the element carries `class` as one of its class tokens.
pub fn has_class(element: ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Attribute value with surrounding whitespace removed, or `None` when missing or blank.
pub fn non_blank_attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Escapes text for embedding in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Serializes the children of `element`, skipping child elements for which `skip` returns true.
/// Comments and processing instructions are dropped.
pub fn inner_html_without<F>(element: ElementRef, skip: F) -> String
where
    F: Fn(ElementRef) -> bool,
{
    let mut content = String::new();
    for node in element.children() {
        if let Some(child) = ElementRef::wrap(node) {
            if !skip(child) {
                content.push_str(&child.html());
            }
        } else if let Node::Text(text_node) = node.value() {
            content.push_str(&escape_html(&text_node.text));
        }
    }
    content
}

/// Resolves an image or link reference against `base`.
///
/// Absolute `http(s)` and `data:` references pass through unchanged, relative ones are
/// joined onto the base. Blank input yields `None`; an unjoinable reference is returned as-is.
pub fn resolve_url(src: &str, base: &Url) -> Option<String> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }

    if src.starts_with("data:") {
        return Some(src.to_string());
    }

    if let Ok(absolute) = Url::parse(src) {
        if absolute.has_host() {
            return Some(src.to_string());
        }
    }

    match base.join(src) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(e) => {
            tracing::debug!("Could not resolve '{}' against {}: {}", src, base, e);
            Some(src.to_string())
        }
    }
}
