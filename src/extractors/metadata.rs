// src/extractors/metadata.rs
//! Title, author, abstract and date extraction.
//!
//! Each field is an ordered list of strategies; the first one that yields a
//! value wins. Strategies are plain functions so each can be tested alone and
//! new sources slot in without touching the others.

use crate::extractors::text::{element_text, normalize_text};
use once_cell::sync::Lazy;
use scraper::{node::Node, ElementRef, Html, Selector};

pub const UNTITLED_PAPER: &str = "Untitled Paper";

/// A single way of finding a metadata value in a document.
pub type Strategy<T> = fn(&Html) -> Option<T>;

// --- CSS Selectors (Lazy Static) ---
static DOCUMENT_TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".ltx_title.ltx_title_document").expect("Failed to compile DOCUMENT_TITLE_SELECTOR")
});
static H1_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("Failed to compile H1_SELECTOR"));
static PAGE_TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("Failed to compile PAGE_TITLE_SELECTOR"));
static PERSON_NAME_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".ltx_personname").expect("Failed to compile PERSON_NAME_SELECTOR")
});
static META_AUTHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[name="citation_author"]"#).expect("Failed to compile META_AUTHOR_SELECTOR")
});
static ABSTRACT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".ltx_abstract").expect("Failed to compile ABSTRACT_SELECTOR"));
static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("Failed to compile PARAGRAPH_SELECTOR"));
static META_DESCRIPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[name="description"]"#).expect("Failed to compile META_DESCRIPTION_SELECTOR")
});
static META_DATE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[name="citation_date"]"#).expect("Failed to compile META_DATE_SELECTOR")
});
static DATE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".ltx_date").expect("Failed to compile DATE_SELECTOR"));

/// Runs strategies in order and returns the first value produced.
pub fn first_match<T>(document: &Html, strategies: &[Strategy<T>]) -> Option<T> {
    strategies.iter().find_map(|strategy| strategy(document))
}

fn first_non_empty_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

// --- Title ---

pub fn title_from_document_class(document: &Html) -> Option<String> {
    first_non_empty_text(document, &DOCUMENT_TITLE_SELECTOR)
}

pub fn title_from_h1(document: &Html) -> Option<String> {
    first_non_empty_text(document, &H1_SELECTOR)
}

pub fn title_from_page_title(document: &Html) -> Option<String> {
    first_non_empty_text(document, &PAGE_TITLE_SELECTOR)
}

pub const TITLE_STRATEGIES: &[Strategy<String>] =
    &[title_from_document_class, title_from_h1, title_from_page_title];

/// Paper title; never empty.
pub fn extract_title(document: &Html) -> String {
    first_match(document, TITLE_STRATEGIES).unwrap_or_else(|| {
        tracing::debug!("No title element found, using fallback title");
        UNTITLED_PAPER.to_string()
    })
}

// --- Authors ---

/// Display name of a LaTeXML person-name node.
///
/// Only the text ahead of the first nested element is kept, so trailing
/// e-mail addresses and affiliations are left out. When the name itself is
/// wrapped in a nested element, that first element's text is used instead.
fn person_display_name(element: ElementRef) -> String {
    let mut leading = String::new();
    let mut first_child_element = None;

    for node in element.children() {
        match node.value() {
            Node::Text(text_node) => leading.push_str(&text_node.text),
            Node::Element(_) => {
                first_child_element = ElementRef::wrap(node);
                break;
            }
            _ => {}
        }
    }

    let leading = normalize_text(&leading);
    if !leading.is_empty() {
        return leading;
    }

    first_child_element
        .map(element_text)
        .filter(|text| !text.contains('@'))
        .unwrap_or_default()
}

pub fn authors_from_person_names(document: &Html) -> Option<Vec<String>> {
    let mut authors: Vec<String> = Vec::new();
    for element in document.select(&PERSON_NAME_SELECTOR) {
        let name = person_display_name(element);
        if !name.is_empty() && !authors.contains(&name) {
            authors.push(name);
        }
    }
    (!authors.is_empty()).then_some(authors)
}

pub fn authors_from_citation_meta(document: &Html) -> Option<Vec<String>> {
    let authors: Vec<String> = document
        .select(&META_AUTHOR_SELECTOR)
        .filter_map(|meta| meta.value().attr("content"))
        .filter(|content| !content.is_empty())
        .map(str::to_string)
        .collect();
    (!authors.is_empty()).then_some(authors)
}

pub const AUTHOR_STRATEGIES: &[Strategy<Vec<String>>] =
    &[authors_from_person_names, authors_from_citation_meta];

/// Ordered author names; empty when the document names nobody.
pub fn extract_authors(document: &Html) -> Vec<String> {
    first_match(document, AUTHOR_STRATEGIES).unwrap_or_default()
}

// --- Abstract ---

pub fn abstract_from_container(document: &Html) -> Option<String> {
    let container = document.select(&ABSTRACT_SELECTOR).next()?;
    let paragraphs: Vec<String> = container.select(&PARAGRAPH_SELECTOR).map(element_text).collect();
    if paragraphs.is_empty() {
        Some(element_text(container))
    } else {
        Some(paragraphs.join(" "))
    }
}

pub fn abstract_from_meta_description(document: &Html) -> Option<String> {
    document
        .select(&META_DESCRIPTION_SELECTOR)
        .next()
        .map(|meta| meta.value().attr("content").unwrap_or_default().to_string())
}

pub const ABSTRACT_STRATEGIES: &[Strategy<String>] =
    &[abstract_from_container, abstract_from_meta_description];

pub fn extract_abstract(document: &Html) -> String {
    first_match(document, ABSTRACT_STRATEGIES).unwrap_or_default()
}

// --- Date ---

pub fn date_from_citation_meta(document: &Html) -> Option<String> {
    let content = document.select(&META_DATE_SELECTOR).next()?.value().attr("content")?;
    (!content.trim().is_empty()).then(|| content.to_string())
}

pub fn date_from_date_class(document: &Html) -> Option<String> {
    first_non_empty_text(document, &DATE_SELECTOR)
}

pub const DATE_STRATEGIES: &[Strategy<String>] = &[date_from_citation_meta, date_from_date_class];

/// Publication date as written in the source; `None` rather than a guess.
pub fn extract_date(document: &Html) -> Option<String> {
    first_match(document, DATE_STRATEGIES)
}
