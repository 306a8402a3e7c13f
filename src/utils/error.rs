// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum ArxivError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("arXiv rate limit likely exceeded")]
    RateLimited,

    #[error("HTML version not available for arXiv paper {0}")]
    HtmlNotAvailable(String),

    #[error("Could not extract arXiv ID from: {0}")]
    InvalidId(String),

    #[error("Fetch task failed: {0}")]
    Task(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Paper identifier must not be empty")]
    MissingPaperId,

    #[error("Base URL is not an absolute URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Extraction worker failed: {0}")]
    Worker(String),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unknown screen preset '{name}'. Available: {available}")]
    UnknownPreset { name: String, available: String },

    #[error("Invalid page size {width_mm}x{height_mm}mm")]
    InvalidPageSize { width_mm: f32, height_mm: f32 },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("arXiv interaction failed: {0}")]
    Arxiv(#[from] ArxivError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
