// src/extractors/mod.rs
pub mod figure;
pub mod footnote;
pub mod images;
pub mod metadata;
pub mod paper;
pub mod references;
pub mod section;
pub mod text;

// Re-export key extraction types for convenience
pub use paper::{parse_paper, PaperParser};
pub use section::SectionExtractor;
pub use text::normalize_text;
