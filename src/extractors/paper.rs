// src/extractors/paper.rs
use crate::arxiv::models::default_base_url;
use crate::extractors::figure::extract_figures;
use crate::extractors::footnote::extract_footnotes;
use crate::extractors::images::collect_images;
use crate::extractors::metadata::{extract_abstract, extract_authors, extract_date, extract_title};
use crate::extractors::references::extract_references;
use crate::extractors::section::SectionExtractor;
use crate::models::Paper;
use crate::utils::error::ExtractError;
use scraper::Html;
use url::Url;

/// Turns LaTeXML HTML into a [`Paper`].
///
/// Missing or malformed markup never fails extraction; each field falls back
/// to its default. The only errors are caller mistakes: a blank paper id or a
/// base URL that is not absolute.
pub struct PaperParser {
    sections: SectionExtractor,
}

impl PaperParser {
    pub fn new() -> Self {
        Self { sections: SectionExtractor::new() }
    }

    pub fn parse(&self, html: &str, paper_id: &str, base_url: Option<&str>) -> Result<Paper, ExtractError> {
        let paper_id = paper_id.trim();
        if paper_id.is_empty() {
            return Err(ExtractError::MissingPaperId);
        }

        let base_url = match base_url.map(str::trim).filter(|b| !b.is_empty()) {
            Some(explicit) => explicit.to_string(),
            None => default_base_url(paper_id),
        };
        let base = Url::parse(&base_url)
            .ok()
            .filter(|u| u.has_host())
            .ok_or_else(|| ExtractError::InvalidBaseUrl(base_url.clone()))?;

        tracing::debug!("Parsing paper {} ({} bytes of HTML, base {})", paper_id, html.len(), base_url);

        // 1. Parse the HTML document; the parser tolerates any input, including ""
        let document = Html::parse_document(html);

        // 2. Independent field extractors
        let title = extract_title(&document);
        let authors = extract_authors(&document);
        let abstract_text = extract_abstract(&document);
        let date = extract_date(&document);
        let sections = self.sections.extract_sections(&document);
        let figures = extract_figures(&document, &base);
        let footnotes = extract_footnotes(&document);
        let references_html = extract_references(&document);

        // 3. Image map over the final section content
        let all_images = collect_images(&sections, &base);

        tracing::info!(
            "Parsed {}: '{}' ({} authors, {} sections, {} figures, {} footnotes, {} images)",
            paper_id,
            title,
            authors.len(),
            sections.len(),
            figures.len(),
            footnotes.len(),
            all_images.len()
        );

        Ok(Paper {
            id: paper_id.to_string(),
            title,
            authors,
            abstract_text,
            date,
            sections,
            figures,
            footnotes,
            references_html,
            base_url,
            all_images,
        })
    }
}

impl Default for PaperParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses with the default `https://arxiv.org/html/{id}/` base URL.
pub fn parse_paper(html: &str, paper_id: &str) -> Result<Paper, ExtractError> {
    PaperParser::new().parse(html, paper_id, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::metadata::UNTITLED_PAPER;
    use crate::models::SectionLevel;

    const SAMPLE_PAPER_ID: &str = "2402.08954";

    const SAMPLE_ARXIV_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8"/>
    <meta name="citation_author" content="John Doe"/>
    <meta name="citation_author" content="Jane Smith"/>
    <meta name="citation_date" content="2024-02-15"/>
    <title>A Sample Paper on Machine Learning</title>
</head>
<body>
<article class="ltx_document">
    <h1 class="ltx_title ltx_title_document">A Sample Paper on Machine Learning</h1>
    <div class="ltx_authors">
        <span class="ltx_personname">John Doe</span>
        <span class="ltx_personname">Jane Smith</span>
    </div>
    <div class="ltx_abstract">
        <h6 class="ltx_title ltx_title_abstract">Abstract</h6>
        <p>This is the abstract of the paper. It describes the main contributions.</p>
    </div>
    <section class="ltx_section" id="S1">
        <h2 class="ltx_title ltx_title_section">1 Introduction</h2>
        <div class="ltx_para">
            <p>This is the introduction section with some text.<span class="ltx_note ltx_role_footnote" id="footnote1"><sup class="ltx_note_mark">1</sup><span class="ltx_note_outer"><span class="ltx_note_content"><sup class="ltx_note_mark">1</sup>A footnote.</span></span></span></p>
        </div>
    </section>
    <section class="ltx_section" id="S2">
        <h2 class="ltx_title ltx_title_section">2 Methods</h2>
        <div class="ltx_para">
            <p>This section describes the methods used. <img src="x2.png" class="ltx_graphics"/></p>
        </div>
        <section class="ltx_subsection" id="S2.SS1">
            <h3 class="ltx_title ltx_title_subsection">2.1 Data Collection</h3>
            <div class="ltx_para">
                <p>Details about data collection.</p>
            </div>
        </section>
    </section>
    <section class="ltx_section" id="S3">
        <h2 class="ltx_title ltx_title_section">3 Results</h2>
        <div class="ltx_para">
            <p>Our results show significant improvements.</p>
        </div>
        <figure class="ltx_figure" id="fig1">
            <img src="/html/2402.08954/figure1.png" alt="Results graph"/>
            <figcaption class="ltx_caption">Figure 1: Results comparison</figcaption>
        </figure>
    </section>
    <section class="ltx_bibliography" id="bib">
        <h2 class="ltx_title ltx_title_bibliography">References</h2>
        <ul class="ltx_biblist">
            <li class="ltx_bibitem">[1] Author A. Title of Paper. Journal, 2023.</li>
            <li class="ltx_bibitem">[2] Author B. Another Paper. Conference, 2024.</li>
        </ul>
    </section>
</article>
</body>
</html>
"#;

    fn sample() -> Paper {
        parse_paper(SAMPLE_ARXIV_HTML, SAMPLE_PAPER_ID).unwrap()
    }

    #[test]
    fn test_sample_metadata() {
        let paper = sample();
        assert_eq!(paper.id, SAMPLE_PAPER_ID);
        assert_eq!(paper.title, "A Sample Paper on Machine Learning");
        assert_eq!(paper.authors, vec!["John Doe", "Jane Smith"]);
        assert_eq!(
            paper.abstract_text,
            "This is the abstract of the paper. It describes the main contributions."
        );
        assert_eq!(paper.date.as_deref(), Some("2024-02-15"));
        assert_eq!(paper.base_url, "https://arxiv.org/html/2402.08954/");
    }

    #[test]
    fn test_sample_sections() {
        let paper = sample();
        let outline: Vec<(&str, u8)> = paper
            .sections
            .iter()
            .map(|s| (s.title.as_str(), s.level.as_u8()))
            .collect();
        assert_eq!(
            outline,
            vec![
                ("1 Introduction", 1),
                ("2 Methods", 1),
                ("2.1 Data Collection", 2),
                ("3 Results", 1),
            ]
        );
        assert!(!paper.sections[1].content.contains("Details about data collection."));
        assert!(paper.sections.iter().all(|s| s.level != SectionLevel::Subsubsection));
    }

    #[test]
    fn test_sample_figures_footnotes_references() {
        let paper = sample();
        assert_eq!(paper.figures.len(), 1);
        assert_eq!(paper.figures[0].id, "fig1");
        assert!(paper.figures[0].caption.contains("Results comparison"));
        assert_eq!(
            paper.figures[0].image_url.as_deref(),
            Some("https://arxiv.org/html/2402.08954/figure1.png")
        );

        assert_eq!(paper.footnotes.len(), 1);
        assert_eq!(paper.footnotes[0].index, 1);
        assert_eq!(paper.footnotes[0].content, "A footnote.");

        assert!(paper.references_html.as_deref().unwrap_or_default().contains("Author A"));
    }

    #[test]
    fn test_all_images_covers_inline_and_figure_images() {
        let paper = sample();
        assert_eq!(
            paper.resolved_image("x2.png"),
            Some("https://arxiv.org/html/2402.08954/x2.png")
        );
        let figure_src = "/html/2402.08954/figure1.png";
        assert_eq!(paper.resolved_image(figure_src), paper.figures[0].image_url.as_deref());
    }

    #[test]
    fn test_empty_input_yields_fallback_paper() {
        let paper = parse_paper("", "0000.00000").unwrap();
        assert_eq!(paper.title, UNTITLED_PAPER);
        assert_eq!(paper.id, "0000.00000");
        assert!(paper.authors.is_empty());
        assert_eq!(paper.abstract_text, "");
        assert_eq!(paper.date, None);
        assert!(paper.sections.is_empty());
        assert!(paper.all_images.is_empty());
    }

    #[test]
    fn test_malformed_markup_does_not_fail() {
        let html = r#"<html><body><div class="ltx_section" id="S1"><h2 class="ltx_title">Broken
            <p>unclosed <b>bold <script>var x = "<section class='ltx_section'>";</script>
            <div class="ltx_subsection"><div class="ltx_subsubsection"><p>deep"#;
        let paper = parse_paper(html, "1234.5678").unwrap();
        assert!(!paper.sections.is_empty());
        assert!(paper.sections.iter().all(|s| (1..=3).contains(&s.level.as_u8())));
    }

    #[test]
    fn test_minimal_html_falls_back() {
        let html = r#"<!DOCTYPE html><html><head><title>Minimal Paper</title></head>
            <body><article><h1>Minimal Paper Title</h1><p>Some content.</p></article></body></html>"#;
        let paper = parse_paper(html, "0000.00000").unwrap();
        assert!(paper.title.contains("Minimal Paper"));
        assert_eq!(paper.sections.len(), 1);
        assert_eq!(paper.sections[0].id, "main-content");
    }

    #[test]
    fn test_explicit_base_url() {
        let html = r#"<figure><img src="img/a.png"/></figure>"#;
        let paper = PaperParser::new()
            .parse(html, "2402.08954", Some("https://mirror.example.org/papers/2402.08954/"))
            .unwrap();
        assert_eq!(paper.base_url, "https://mirror.example.org/papers/2402.08954/");
        assert_eq!(
            paper.figures[0].image_url.as_deref(),
            Some("https://mirror.example.org/papers/2402.08954/img/a.png")
        );
    }

    #[test]
    fn test_contract_violations() {
        assert!(matches!(parse_paper("<p/>", "  "), Err(ExtractError::MissingPaperId)));
        assert!(matches!(
            PaperParser::new().parse("<p/>", "2402.08954", Some("not a url")),
            Err(ExtractError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_old_style_id_base_url() {
        let paper = parse_paper("<figure><img src='f.png'></figure>", "hep-th/9901001").unwrap();
        assert_eq!(paper.base_url, "https://arxiv.org/html/hep-th/9901001/");
        assert_eq!(
            paper.figures[0].image_url.as_deref(),
            Some("https://arxiv.org/html/hep-th/9901001/f.png")
        );
    }
}
