// src/storage/mod.rs
use crate::models::Paper;
use crate::utils::error::StorageError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_FILENAME_LEN: usize = 80;
const FALLBACK_FILENAME: &str = "paper";

static FORBIDDEN_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>"|?*\x00-\x1f]"#).expect("Failed to compile FORBIDDEN_CHARS_RE"));
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RE"));
static DASH_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("Failed to compile DASH_RUN_RE"));
static UNDERSCORE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_+").expect("Failed to compile UNDERSCORE_RUN_RE"));
static MIXED_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-_]{2,}").expect("Failed to compile MIXED_RUN_RE"));

/// Turns a paper title (or id) into a filename that is safe on Linux, macOS and Windows.
pub fn sanitize_filename(title: &str, max_len: usize) -> String {
    let name = title.replace(':', "-").replace(['/', '\\'], "-");
    let name = FORBIDDEN_CHARS_RE.replace_all(&name, "");
    let name = WHITESPACE_RE.replace_all(&name, "_");
    let name = DASH_RUN_RE.replace_all(&name, "-");
    let name = UNDERSCORE_RUN_RE.replace_all(&name, "_");
    let name = MIXED_RUN_RE.replace_all(&name, "_");
    let mut name = name.trim_matches(|c| c == '_' || c == '-').to_string();

    if name.chars().count() > max_len {
        let truncated: String = name.chars().take(max_len).collect();
        // Cut back to the last word boundary if there is one
        let cut = match truncated.rfind('_') {
            Some(pos) if pos > 0 => &truncated[..pos],
            _ => truncated.as_str(),
        };
        name = cut.trim_matches(|c| c == '_' || c == '-').to_string();
    }

    if name.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        name
    }
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Writes a rendered document to `<base_dir>/<name>.html`.
    pub fn save_document(&self, name: &str, html: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}.html", name));

        let mut file = fs::File::create(&file_path).map_err(StorageError::IoError)?;
        file.write_all(html.as_bytes()).map_err(StorageError::IoError)?;

        tracing::info!("Saved document to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves a summary of the paper in JSON format to `<base_dir>/<name>_meta.json`.
    pub fn save_metadata(&self, name: &str, paper: &Paper) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_meta.json", name));

        let metadata = serde_json::json!({
            "id": paper.id,
            "title": paper.title,
            "authors": paper.authors,
            "date": paper.date,
            "base_url": paper.base_url,
            "section_count": paper.sections.len(),
            "figure_count": paper.figures.len(),
            "footnote_count": paper.footnotes.len(),
            "image_count": paper.all_images.len(),
            "has_references": paper.references_html.is_some(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }

    /// Writes the whole extracted paper to `<base_dir>/<name>.json`.
    pub fn save_paper_json(&self, name: &str, paper: &Paper) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}.json", name));

        let json = serde_json::to_string_pretty(paper)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved paper JSON to {}", file_path.display());
        Ok(file_path)
    }
}
