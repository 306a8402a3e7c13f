// src/extractors/images.rs
use crate::extractors::text::resolve_url;
use crate::models::Section;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use url::Url;

static IMAGE_SOURCE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img[src]").expect("Failed to compile IMAGE_SOURCE_SELECTOR"));

/// Every image referenced from section content, raw `src` -> absolute URL.
///
/// Works on the final content strings, so inline images outside `<figure>`
/// are covered and renderers never have to scan the markup again.
pub fn collect_images(sections: &[Section], base_url: &Url) -> BTreeMap<String, String> {
    let mut images = BTreeMap::new();

    for section in sections {
        let fragment = Html::parse_fragment(&section.content);
        for img in fragment.select(&IMAGE_SOURCE_SELECTOR) {
            // Keyed by the attribute exactly as written so renderers can match it in the markup
            let Some(raw_src) = img.value().attr("src") else { continue };
            if raw_src.trim().is_empty() || images.contains_key(raw_src) {
                continue;
            }
            if let Some(resolved) = resolve_url(raw_src, base_url) {
                tracing::trace!("Image {:?} -> {}", raw_src, resolved);
                images.insert(raw_src.to_string(), resolved);
            }
        }
    }

    tracing::debug!("Collected {} distinct image references", images.len());
    images
}
