// src/extractors/footnote.rs
use crate::extractors::text::{element_text, has_class, inner_html_without};
use crate::models::Footnote;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

const NOTE_MARK_CLASS: &str = "ltx_note_mark";

static FOOTNOTE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".ltx_note.ltx_role_footnote").expect("Failed to compile FOOTNOTE_SELECTOR")
});
static NOTE_MARK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".ltx_note_mark").expect("Failed to compile NOTE_MARK_SELECTOR"));
static NOTE_CONTENT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".ltx_note_content").expect("Failed to compile NOTE_CONTENT_SELECTOR")
});

/// LaTeXML footnotes in document order.
///
/// The note mark (the superscript number) is stripped from the content and
/// used as `index` when it parses as a number.
pub fn extract_footnotes(document: &Html) -> Vec<Footnote> {
    let mut footnotes = Vec::new();

    for (position, note) in document.select(&FOOTNOTE_SELECTOR).enumerate() {
        let fallback_index = u32::try_from(position + 1).unwrap_or(u32::MAX);
        let index = note
            .select(&NOTE_MARK_SELECTOR)
            .next()
            .and_then(|mark| element_text(mark).parse::<u32>().ok())
            .unwrap_or(fallback_index);
        let id = note
            .value()
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| format!("footnote-{}", position + 1));

        let body = note.select(&NOTE_CONTENT_SELECTOR).next().unwrap_or(note);
        let content = inner_html_without(body, |child| has_class(child, NOTE_MARK_CLASS))
            .trim()
            .to_string();

        if content.is_empty() {
            tracing::debug!("Skipping empty footnote {}", id);
            continue;
        }
        footnotes.push(Footnote { id, index, content });
    }

    tracing::debug!("Extracted {} footnotes", footnotes.len());
    footnotes
}
