// src/lib.rs
//! Fetch arXiv HTML papers and turn them into reflowable e-reader documents.
//!
//! The heart of the crate is [`extractors::PaperParser`], which normalizes
//! LaTeXML-generated HTML into a [`models::Paper`]. Fetching, rendering and
//! storage are thin collaborators around it.

pub mod arxiv;
pub mod extractors;
pub mod models;
pub mod render;
pub mod storage;
pub mod utils;

pub use extractors::{parse_paper, PaperParser};
pub use models::{Figure, Footnote, Paper, Section, SectionLevel};
pub use utils::AppError;
