//! Plain text out of PDF, text and Markdown documents

use crate::error::{InterviewCoachError, Result};
use log::{debug, warn};
use pdf_extract::{Document, PlainTextOutput};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::OnceLock;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        extract_pdf_text(&bytes).map_err(|e| match e {
            InterviewCoachError::PdfExtraction(msg) => InterviewCoachError::PdfExtraction(
                format!("Failed to extract text from PDF '{}': {}", path.display(), msg),
            ),
            other => other,
        })
    }
}

/// Extract text page by page and join the pages with newlines.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    Ok(extract_pdf_pages(bytes)?.join("\n"))
}

/// Text of every page, in page order.
///
/// A page the parser cannot read contributes an empty string and the rest
/// of the document is still extracted. Only a document that cannot be
/// opened at all is an error.
pub fn extract_pdf_pages(bytes: &[u8]) -> Result<Vec<String>> {
    let mut doc = match panic::catch_unwind(|| Document::load_mem(bytes)) {
        Ok(Ok(doc)) => doc,
        Ok(Err(e)) => return Err(InterviewCoachError::PdfExtraction(e.to_string())),
        Err(_) => {
            return Err(InterviewCoachError::PdfExtraction(
                "PDF parser aborted on malformed document".to_string(),
            ))
        }
    };

    if doc.is_encrypted() {
        doc.decrypt("")
            .map_err(|e| InterviewCoachError::PdfExtraction(format!("Encrypted PDF: {}", e)))?;
    }

    let pages: Vec<String> = doc
        .get_pages()
        .keys()
        .map(|&page_num| extract_pdf_page(&doc, page_num))
        .collect();

    debug!("Extracted {} PDF pages", pages.len());
    Ok(pages)
}

fn extract_pdf_page(doc: &Document, page_num: u32) -> String {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut text = String::new();
        {
            let mut output = PlainTextOutput::new(&mut text);
            pdf_extract::output_doc_page(doc, &mut output, page_num)?;
        }
        Ok::<_, pdf_extract::OutputError>(text)
    }));

    match outcome {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("Skipping unreadable PDF page {}: {}", page_num, e);
            String::new()
        }
        Err(_) => {
            warn!("Skipping PDF page {}: parser aborted", page_num);
            String::new()
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Render markdown to HTML, then strip the markup back down to plain lines.
pub fn markdown_to_text(markdown: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();

    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    let text = html_output
        .replace("<br>", "\n")
        .replace("</p>", "\n\n")
        .replace("</li>", "\n")
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");

    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("static regex"));
    let clean_text = tag.replace_all(&text, "");

    clean_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_markup_is_removed() {
        let text = markdown_to_text("# Ada Lovelace\n\n**Engineer** at *Analytical Engines*\n\n- Rust\n- Tokio");
        assert!(text.contains("Ada Lovelace"));
        assert!(text.contains("Engineer at Analytical Engines"));
        assert!(text.lines().any(|l| l == "Rust"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn test_markdown_entities_decoded() {
        let text = markdown_to_text("R&D <lead> \"quoted\"");
        assert!(text.contains("R&D"));
        assert!(text.contains("\"quoted\""));
    }

    fn three_page_pdf() -> Vec<u8> {
        use printpdf::{BuiltinFont, Mm, PdfDocument};

        let (pdf, page, layer) = PdfDocument::new("Resume", Mm(210.0), Mm(297.0), "Layer 1");
        let font = pdf.add_builtin_font(BuiltinFont::Helvetica).unwrap();
        pdf.get_page(page)
            .get_layer(layer)
            .use_text("PageOneText", 12.0, Mm(20.0), Mm(270.0), &font);
        for text in ["PageTwoText", "PageThreeText"] {
            let (page, layer) = pdf.add_page(Mm(210.0), Mm(297.0), "Layer 1");
            pdf.get_page(page)
                .get_layer(layer)
                .use_text(text, 12.0, Mm(20.0), Mm(270.0), &font);
        }
        pdf.save_to_bytes().unwrap()
    }

    fn without_media_box(bytes: &[u8], page_num: u32) -> Vec<u8> {
        let mut doc = Document::load_mem(bytes).unwrap();
        let page_id = doc.get_pages()[&page_num];
        doc.get_object_mut(page_id)
            .unwrap()
            .as_dict_mut()
            .unwrap()
            .remove(b"MediaBox");
        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_pdf_pages_joined_with_newlines() {
        let bytes = three_page_pdf();
        let pages = extract_pdf_pages(&bytes).unwrap();

        assert_eq!(pages.len(), 3);
        assert!(pages[0].contains("PageOneText"));
        assert!(pages[1].contains("PageTwoText"));
        assert!(pages[2].contains("PageThreeText"));
        assert_eq!(extract_pdf_text(&bytes).unwrap(), pages.join("\n"));
    }

    #[test]
    fn test_unreadable_page_is_empty_and_others_survive() {
        let bytes = without_media_box(&three_page_pdf(), 2);
        let pages = extract_pdf_pages(&bytes).unwrap();

        assert_eq!(pages.len(), 3);
        assert!(pages[0].contains("PageOneText"));
        assert_eq!(pages[1], "");
        assert!(pages[2].contains("PageThreeText"));

        let text = extract_pdf_text(&bytes).unwrap();
        assert!(!text.contains("PageTwoText"));
        assert!(text.find("PageOneText") < text.find("PageThreeText"));
    }

    #[test]
    fn test_garbage_pdf_is_an_error_not_a_panic() {
        let result = extract_pdf_text(b"this is not a pdf at all");
        assert!(matches!(result, Err(InterviewCoachError::PdfExtraction(_))));
    }
}
