// src/models.rs
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Depth of a section in the paper outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionLevel {
    Section = 1,
    Subsection = 2,
    Subsubsection = 3,
}

impl SectionLevel {
    /// Maps any depth onto the three supported levels. Anything deeper than 3 collapses to 3.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 | 1 => SectionLevel::Section,
            2 => SectionLevel::Subsection,
            _ => SectionLevel::Subsubsection,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl Serialize for SectionLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

/// One entry of the flat, document-ordered section list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub level: SectionLevel,
    /// Serialized markup of the section body, without its title or nested sections.
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub id: String,
    pub caption: String,
    /// Absolute URL of the first image in the figure, if it has one.
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Footnote {
    pub id: String,
    pub index: u32,
    pub content: String,
}

/// A parsed arXiv paper. Built once by [`crate::extractors::PaperParser`] and read by renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paper {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub date: Option<String>,
    pub sections: Vec<Section>,
    pub figures: Vec<Figure>,
    pub footnotes: Vec<Footnote>,
    pub references_html: Option<String>,
    pub base_url: String,
    /// Raw `src` value as it appears in section content -> resolved absolute URL.
    pub all_images: BTreeMap<String, String>,
}

impl Paper {
    /// Looks up the absolute URL for an image source found in section content.
    pub fn resolved_image(&self, src: &str) -> Option<&str> {
        self.all_images.get(src).map(String::as_str)
    }
}
