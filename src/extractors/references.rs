// src/extractors/references.rs
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static BIBLIOGRAPHY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".ltx_bibliography, #references, .references")
        .expect("Failed to compile BIBLIOGRAPHY_SELECTOR")
});

/// The bibliography block as serialized markup, passed through untouched.
pub fn extract_references(document: &Html) -> Option<String> {
    let bibliography = document.select(&BIBLIOGRAPHY_SELECTOR).next()?;
    let html = bibliography.html();
    tracing::debug!("Found bibliography <{}> ({} bytes)", bibliography.value().name(), html.len());
    Some(html)
}
