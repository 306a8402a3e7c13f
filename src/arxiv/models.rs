// src/arxiv/models.rs
use crate::utils::error::ArxivError;
use once_cell::sync::Lazy;
use regex::Regex;

const ARXIV_HTML_ROOT: &str = "https://arxiv.org/html";
const ARXIV_ABS_ROOT: &str = "https://arxiv.org/abs";

// --- Regex Patterns (Lazy Static) ---
// New-style identifiers (2007+): YYMM.NNNN or YYMM.NNNNN, optional version
static NEW_STYLE_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}\.\d{4,5}(?:v\d+)?$").expect("Failed to compile NEW_STYLE_ID_RE")
});

// Old-style identifiers: archive(.SUBJECT)/YYMMNNN, optional version
static OLD_STYLE_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z\-]*(?:\.[A-Z]{2})?/\d{7}(?:v\d+)?$").expect("Failed to compile OLD_STYLE_ID_RE")
});

static ARXIV_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://(?:www\.|export\.)?arxiv\.org/(?:abs|html|pdf)/(.+?)(?:\.pdf)?/?$")
        .expect("Failed to compile ARXIV_URL_RE")
});

static ARXIV_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^arxiv:\s*").expect("Failed to compile ARXIV_PREFIX_RE"));

fn is_arxiv_id(candidate: &str) -> bool {
    NEW_STYLE_ID_RE.is_match(candidate) || OLD_STYLE_ID_RE.is_match(candidate)
}

/// Extracts a bare arXiv identifier from an id, an `arxiv:` reference or an arxiv.org URL.
pub fn normalize_arxiv_id(input: &str) -> Result<String, ArxivError> {
    let trimmed = input.trim();
    let without_prefix = ARXIV_PREFIX_RE.replace(trimmed, "");

    let candidate = match ARXIV_URL_RE.captures(&without_prefix) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()).to_string(),
        None => without_prefix.to_string(),
    };

    if is_arxiv_id(&candidate) {
        tracing::trace!("Normalized '{}' to arXiv id {}", input, candidate);
        Ok(candidate)
    } else {
        Err(ArxivError::InvalidId(input.to_string()))
    }
}

/// HTML rendering of the paper on arxiv.org.
pub fn html_url(paper_id: &str) -> String {
    html_url_with(ARXIV_HTML_ROOT, paper_id)
}

/// HTML rendering of the paper under another root, e.g. a mirror. Trailing slashes on `base` are ignored.
pub fn html_url_with(base: &str, paper_id: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), paper_id)
}

/// Abstract page of the paper.
pub fn abs_url(paper_id: &str) -> String {
    format!("{}/{}", ARXIV_ABS_ROOT, paper_id)
}

/// Directory URL that relative links inside the HTML rendering resolve against.
pub fn default_base_url(paper_id: &str) -> String {
    format!("{}/{}/", ARXIV_HTML_ROOT, paper_id)
}
