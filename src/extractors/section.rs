// src/extractors/section.rs

// --- Imports ---
use crate::extractors::text::{element_text, has_class};
use crate::models::{Section, SectionLevel};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

// --- Constants ---
// Class markers in priority order; the index + 1 is the section level.
const SECTION_CLASSES: [&str; 3] = ["ltx_section", "ltx_subsection", "ltx_subsubsection"];
const TITLE_CLASS: &str = "ltx_title";
const MAIN_CONTENT_ID: &str = "main-content";
const MAIN_CONTENT_TITLE: &str = "Content";

// --- CSS Selectors (Lazy Static) ---
// One group selector so every nesting depth comes back in a single document-order pass
static SECTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".ltx_section, .ltx_subsection, .ltx_subsubsection")
        .expect("Failed to compile SECTION_SELECTOR")
});

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".ltx_title").expect("Failed to compile TITLE_SELECTOR"));

// Containers used when the document has no LaTeXML sectioning at all
static MAIN_CONTENT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".ltx_page_main, article, main, .content")
        .expect("Failed to compile MAIN_CONTENT_SELECTOR")
});

/// True if the element is a section, subsection or subsubsection.
pub fn is_section_element(element: ElementRef) -> bool {
    SECTION_CLASSES.iter().any(|class| has_class(element, class))
}

fn section_level(element: ElementRef) -> SectionLevel {
    let depth = SECTION_CLASSES
        .iter()
        .position(|class| has_class(element, class))
        .map_or(SECTION_CLASSES.len(), |i| i + 1);
    SectionLevel::from_depth(depth)
}

// --- Main Extractor Structure ---
pub struct SectionExtractor;

impl SectionExtractor {
    pub fn new() -> Self { Self {} }

    /// Flat, document-ordered list of all sections, subsections and subsubsections.
    ///
    /// Hierarchy is carried only by `level`. A parent's content leaves out its
    /// nested section children, which appear as their own entries right after it.
    pub fn extract_sections(&self, document: &Html) -> Vec<Section> {
        let sections: Vec<Section> = document
            .select(&SECTION_SELECTOR)
            .enumerate()
            .map(|(index, element)| self.build_section(index, element))
            .collect();

        if !sections.is_empty() {
            tracing::debug!("Extracted {} LaTeXML sections", sections.len());
            return sections;
        }

        match document.select(&MAIN_CONTENT_SELECTOR).next() {
            Some(container) => {
                tracing::debug!(
                    "No LaTeXML sections, using <{}> as the main content",
                    container.value().name()
                );
                vec![Section {
                    id: MAIN_CONTENT_ID.to_string(),
                    title: MAIN_CONTENT_TITLE.to_string(),
                    level: SectionLevel::Section,
                    content: container.html(),
                }]
            }
            None => {
                tracing::debug!("No sections and no main content container found");
                Vec::new()
            }
        }
    }

    fn build_section(&self, index: usize, element: ElementRef) -> Section {
        let level = section_level(element);
        let id = element
            .value()
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| format!("section-{}", index));
        let title = self
            .own_title(element)
            .map(element_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("Section {}", index + 1));
        let content = self.own_content(element);

        tracing::trace!("Section {} '{}' (level {}, {} bytes)", id, title, level.as_u8(), content.len());
        Section { id, title, level, content }
    }

    /// The title element belonging to this section rather than to a nested one.
    fn own_title<'a>(&self, element: ElementRef<'a>) -> Option<ElementRef<'a>> {
        let direct = element
            .children()
            .filter_map(ElementRef::wrap)
            .find(|child| has_class(*child, TITLE_CLASS));
        if direct.is_some() {
            return direct;
        }

        element
            .select(&TITLE_SELECTOR)
            .find(|title| self.owning_section(*title).map(|s| s.id()) == Some(element.id()))
    }

    /// Nearest ancestor that is itself a section element.
    fn owning_section<'a>(&self, element: ElementRef<'a>) -> Option<ElementRef<'a>> {
        element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|ancestor| is_section_element(*ancestor))
    }

    /// Serialized direct children, minus the title and any nested section.
    fn own_content(&self, element: ElementRef) -> String {
        element
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| !has_class(*child, TITLE_CLASS) && !is_section_element(*child))
            .map(|child| child.html())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}
