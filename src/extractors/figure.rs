// src/extractors/figure.rs
use crate::extractors::text::{element_text, non_blank_attr, resolve_url};
use crate::models::Figure;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

// Covers both LaTeXML's class marker and plain <figure> tags
static FIGURE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".ltx_figure, figure").expect("Failed to compile FIGURE_SELECTOR"));
static CAPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".ltx_caption, figcaption").expect("Failed to compile CAPTION_SELECTOR")
});
static IMAGE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("Failed to compile IMAGE_SELECTOR"));

/// Figures in document order, image URLs resolved against `base_url`.
/// A figure without an image keeps `image_url = None`.
pub fn extract_figures(document: &Html, base_url: &Url) -> Vec<Figure> {
    let figures: Vec<Figure> = document
        .select(&FIGURE_SELECTOR)
        .enumerate()
        .map(|(index, element)| {
            let id = element
                .value()
                .id()
                .map(str::to_string)
                .unwrap_or_else(|| format!("figure-{}", index));
            let caption = element
                .select(&CAPTION_SELECTOR)
                .next()
                .map(element_text)
                .unwrap_or_default();
            let image_url = element
                .select(&IMAGE_SELECTOR)
                .next()
                .and_then(|img| non_blank_attr(img, "src"))
                .and_then(|src| resolve_url(src, base_url));

            if image_url.is_none() {
                tracing::debug!("Figure {} has no image", id);
            }
            Figure { id, caption, image_url }
        })
        .collect();

    tracing::debug!("Extracted {} figures", figures.len());
    figures
}
