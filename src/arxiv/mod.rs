// src/arxiv/mod.rs
pub mod client;
pub mod models;

pub use models::{abs_url, default_base_url, html_url, html_url_with, normalize_arxiv_id};
