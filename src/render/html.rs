// src/render/html.rs
use crate::arxiv::models::abs_url;
use crate::extractors::text::escape_html;
use crate::models::{Paper, Section};
use crate::render::presets::ScreenPreset;

const PAGE_MARGIN_MM: f32 = 4.0;

/// Attribute value as the DOM serializer writes it, so replacements match section markup.
fn serialized_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('\u{a0}', "&nbsp;")
        .replace('"', "&quot;")
}

/// Points every `<img src>` in `content` at its resolved URL from `paper.all_images`.
pub fn rewrite_image_sources(content: &str, paper: &Paper) -> String {
    let mut rewritten = content.to_string();
    for (original, resolved) in &paper.all_images {
        if original == resolved {
            continue;
        }
        let from = format!("src=\"{}\"", serialized_attr(original));
        let to = format!("src=\"{}\"", serialized_attr(resolved));
        rewritten = rewritten.replace(&from, &to);
    }
    rewritten
}

fn stylesheet(preset: &ScreenPreset) -> String {
    format!(
        "@page {{ size: {w}mm {h}mm; margin: {m}mm; }}\n\
         body {{ font-family: serif; font-size: {pt}pt; line-height: 1.4; margin: 0; }}\n\
         h1 {{ font-size: 1.5em; }} h2 {{ font-size: 1.25em; }} h3 {{ font-size: 1.1em; }} h4 {{ font-size: 1em; }}\n\
         img, svg, table {{ max-width: 100%; height: auto; }}\n\
         .authors, .date, .paper-id {{ text-align: center; }}\n\
         .abstract {{ font-size: 0.95em; margin: 1em 0; }}\n\
         .footnotes {{ font-size: 0.85em; }}\n",
        w = preset.width_mm,
        h = preset.height_mm,
        m = PAGE_MARGIN_MM,
        pt = preset.base_font_pt,
    )
}

fn render_title_block(paper: &Paper, out: &mut String) {
    let authors = if paper.authors.is_empty() {
        "Unknown Authors".to_string()
    } else {
        paper.authors.iter().map(|a| escape_html(a)).collect::<Vec<_>>().join(", ")
    };

    out.push_str("<header class=\"title-block\">\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(&paper.title)));
    out.push_str(&format!("<p class=\"authors\">{}</p>\n", authors));
    if let Some(date) = &paper.date {
        out.push_str(&format!("<p class=\"date\">{}</p>\n", escape_html(date)));
    }
    out.push_str(&format!(
        "<p class=\"paper-id\"><a href=\"{}\">arXiv:{}</a></p>\n",
        serialized_attr(&abs_url(&paper.id)),
        escape_html(&paper.id)
    ));
    out.push_str("</header>\n");
}

fn render_section(section: &Section, paper: &Paper, out: &mut String) {
    let heading = section.level.as_u8() + 1;
    out.push_str(&format!("<section id=\"{}\">\n", serialized_attr(&section.id)));
    out.push_str(&format!("<h{h}>{}</h{h}>\n", escape_html(&section.title), h = heading));
    out.push_str(&rewrite_image_sources(&section.content, paper));
    out.push_str("\n</section>\n");
}

/// Appends the notes list. A back-link is only written when the note's own
/// anchor (the LaTeXML note span carrying its id) made it into the rendered body.
fn render_notes(paper: &Paper, out: &mut String) {
    if paper.footnotes.is_empty() {
        return;
    }

    out.push_str("<section class=\"footnotes\">\n<h2>Notes</h2>\n<ol>\n");
    for note in &paper.footnotes {
        let anchor = serialized_attr(&note.id);
        let back_link = if out.contains(&format!("id=\"{}\"", anchor)) {
            format!(" <a href=\"#{}\" class=\"footnote-back\">\u{21a9}</a>", anchor)
        } else {
            tracing::trace!("Note {} has no anchor in the body, omitting back-link", note.id);
            String::new()
        };
        out.push_str(&format!(
            "<li id=\"note-{}\" value=\"{}\">{}{}</li>\n",
            anchor, note.index, note.content, back_link
        ));
    }
    out.push_str("</ol>\n</section>\n");
}

/// Renders a standalone HTML document sized for `preset`, ready to read or print to PDF.
///
/// Text fields are escaped; section content, references and footnotes are
/// embedded as-is apart from image sources, which point at absolute URLs.
pub fn render_document(paper: &Paper, preset: &ScreenPreset) -> String {
    let mut out = String::with_capacity(
        paper.sections.iter().map(|s| s.content.len()).sum::<usize>() + 4096,
    );

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\"/>\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(&paper.title)));
    out.push_str(&format!("<style>\n{}</style>\n", stylesheet(preset)));
    out.push_str("</head>\n<body>\n");

    render_title_block(paper, &mut out);

    if !paper.abstract_text.is_empty() {
        out.push_str("<div class=\"abstract\">\n<h2>Abstract</h2>\n");
        out.push_str(&format!("<p>{}</p>\n</div>\n", escape_html(&paper.abstract_text)));
    }

    for section in &paper.sections {
        render_section(section, paper, &mut out);
    }

    if let Some(references) = &paper.references_html {
        out.push_str("<section class=\"references\">\n<h2>References</h2>\n");
        out.push_str(references);
        out.push_str("\n</section>\n");
    }

    render_notes(paper, &mut out);

    out.push_str("</body>\n</html>\n");
    tracing::debug!("Rendered {} into {} bytes for {}", paper.id, out.len(), preset.name);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::parse_paper;
    use crate::render::presets::get_preset;

    const PAPER_HTML: &str = r#"<html><head><title>Page</title></head><body>
        <h1 class="ltx_title ltx_title_document">Cats &amp; Dogs</h1>
        <span class="ltx_personname">Ada &lt;Admin&gt;</span>
        <section class="ltx_section" id="S1"><h2 class="ltx_title">Intro</h2>
            <p>See <img src="x1.png" class="ltx_graphics"/> and <img src="https://cdn.example.org/y.png"/>.</p>
            <p>Note<span class="ltx_note ltx_role_footnote" id="footnote1"><sup class="ltx_note_mark">1</sup><span class="ltx_note_content"><sup class="ltx_note_mark">1</sup>Footnote body.</span></span></p>
            <section class="ltx_subsection" id="S1.SS1"><h3 class="ltx_title">Detail</h3><p>more</p></section>
        </section>
        <section class="ltx_bibliography"><ul><li>[1] Ref.</li></ul></section>
        </body></html>"#;

    #[test]
    fn test_document_structure() {
        let paper = parse_paper(PAPER_HTML, "2402.08954").unwrap();
        let preset = get_preset("kindle-scribe").unwrap();
        let html = render_document(&paper, preset);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("@page { size: 158mm 210mm;"));
        assert!(html.contains("<h1>Cats &amp; Dogs</h1>"));
        assert!(html.contains("<p class=\"authors\">Ada &lt;Admin&gt;</p>"));
        assert!(html.contains("arXiv:2402.08954"));
        assert!(html.contains("<h2>Intro</h2>"));
        assert!(html.contains("<h3>Detail</h3>"));
        assert!(html.contains("[1] Ref."));
        assert!(html.contains("<li id=\"note-footnote1\" value=\"1\">"));
        assert!(html.contains("Footnote body."));
        assert!(!html.contains("<h2>Abstract</h2>"), "empty abstract is not rendered");
    }

    #[test]
    fn test_note_back_links_target_existing_anchors() {
        let paper = parse_paper(PAPER_HTML, "2402.08954").unwrap();
        let html = render_document(&paper, get_preset("a5").unwrap());

        let (body, notes) = html.split_at(html.find("<section class=\"footnotes\">").unwrap());
        assert!(notes.contains("href=\"#footnote1\""));
        assert!(body.contains("id=\"footnote1\""), "back-link target must exist in the body");
        assert!(!html.contains("fnref-"));
    }

    #[test]
    fn test_note_without_anchor_has_no_back_link() {
        let html_in = r#"<section class="ltx_section" id="S1"><h2 class="ltx_title">A</h2>
            <p>x<span class="ltx_note ltx_role_footnote"><sup class="ltx_note_mark">1</sup>Unanchored.</span></p></section>"#;
        let paper = parse_paper(html_in, "2402.08954").unwrap();
        assert_eq!(paper.footnotes[0].id, "footnote-1");

        let html = render_document(&paper, get_preset("a5").unwrap());
        assert!(html.contains("<li id=\"note-footnote-1\" value=\"1\">Unanchored.</li>"));
        assert!(!html.contains("footnote-back"));
    }

    #[test]
    fn test_padded_image_source_is_rewritten() {
        let paper = parse_paper(
            r#"<div class="ltx_section" id="S1"><p><img src=" x1.png "/></p></div>"#,
            "2402.08954",
        )
        .unwrap();
        assert_eq!(
            paper.resolved_image(" x1.png "),
            Some("https://arxiv.org/html/2402.08954/x1.png")
        );

        let html = render_document(&paper, get_preset("a5").unwrap());
        assert!(html.contains("src=\"https://arxiv.org/html/2402.08954/x1.png\""));
        assert!(!html.contains("src=\" x1.png \""));
    }

    #[test]
    fn test_image_sources_use_resolved_urls() {
        let paper = parse_paper(PAPER_HTML, "2402.08954").unwrap();
        let html = render_document(&paper, get_preset("a5").unwrap());

        let resolved = paper.resolved_image("x1.png").unwrap();
        assert_eq!(resolved, "https://arxiv.org/html/2402.08954/x1.png");
        assert!(html.contains(&format!("src=\"{}\"", resolved)));
        assert!(!html.contains("src=\"x1.png\""));
        assert!(html.contains("src=\"https://cdn.example.org/y.png\""));
    }

    #[test]
    fn test_unknown_authors_placeholder() {
        let paper = parse_paper("<p>nothing</p>", "0000.00000").unwrap();
        let html = render_document(&paper, get_preset("a5").unwrap());
        assert!(html.contains("Unknown Authors"));
        assert!(html.contains("<h1>Untitled Paper</h1>"));
    }
}
