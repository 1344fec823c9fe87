//! PDF rendering for report documents

use crate::error::{InterviewCoachError, Result};
use crate::output::document::{Block, ReportDocument};
use log::info;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::io::Write;
use std::path::Path;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;
const LINE_HEIGHT_MM: f32 = 6.0;
const TITLE_GAP_MM: f32 = 10.0;
const SPACER_MM: f32 = 5.0;
const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width as a fraction of the font size
const AVG_GLYPH_EM: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
    pub size: f32,
    pub bold: bool,
}

/// Greedy word wrap to `width` characters. Words longer than a line are
/// split; blank lines in the input are preserved.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in raw_line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current.extend(word);
        }

        lines.push(current);
    }

    lines
}

fn chars_per_line(size: f32) -> usize {
    let usable = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
    (usable / (size * PT_TO_MM * AVG_GLYPH_EM)).floor() as usize
}

/// Position every line of the document, starting a new page whenever the
/// bottom margin is reached.
pub fn layout(doc: &ReportDocument) -> Vec<Vec<PlacedLine>> {
    let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    let title_width = doc.title.chars().count() as f32 * TITLE_SIZE * PT_TO_MM * AVG_GLYPH_EM;
    y -= TITLE_SIZE * PT_TO_MM;
    pages[0].push(PlacedLine {
        text: doc.title.clone(),
        x_mm: ((PAGE_WIDTH_MM - title_width) / 2.0).max(MARGIN_MM),
        y_mm: y,
        size: TITLE_SIZE,
        bold: true,
    });
    y -= TITLE_GAP_MM;

    let width = chars_per_line(BODY_SIZE);
    for block in &doc.blocks {
        let (lines, bold) = match block {
            Block::Spacer => {
                y -= SPACER_MM;
                continue;
            }
            Block::Heading(text) => (wrap(text, width), true),
            Block::Line(text) | Block::Paragraph(text) => (wrap(text, width), false),
        };

        for text in lines {
            if y - LINE_HEIGHT_MM < MARGIN_MM {
                pages.push(Vec::new());
                y = PAGE_HEIGHT_MM - MARGIN_MM;
            }
            y -= LINE_HEIGHT_MM;
            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine {
                    text,
                    x_mm: MARGIN_MM,
                    y_mm: y,
                    size: BODY_SIZE,
                    bold,
                });
            }
        }
    }

    pages
}

fn pdf_error(e: impl std::fmt::Debug) -> InterviewCoachError {
    InterviewCoachError::ReportGeneration(format!("{:?}", e))
}

/// Render the document to PDF bytes.
pub fn render_pdf(doc: &ReportDocument) -> Result<Vec<u8>> {
    let pages = layout(doc);
    let (pdf, first_page, first_layer) =
        PdfDocument::new(doc.title.as_str(), Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let regular = pdf.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let bold = pdf.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;

    for (index, lines) in pages.iter().enumerate() {
        let layer = if index == 0 {
            pdf.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            pdf.get_page(page).get_layer(layer)
        };

        for line in lines.iter().filter(|l| !l.text.is_empty()) {
            let font = if line.bold { &bold } else { &regular };
            layer.use_text(line.text.as_str(), line.size, Mm(line.x_mm), Mm(line.y_mm), font);
        }
    }

    pdf.save_to_bytes().map_err(pdf_error)
}

/// Write the PDF next to `path` in a transient file, then move it into place.
pub fn write_pdf(doc: &ReportDocument, path: &Path) -> Result<()> {
    let bytes = render_pdf(doc)?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent)?;

    let mut transient = tempfile::NamedTempFile::new_in(&parent)?;
    transient.write_all(&bytes)?;
    transient.flush()?;
    transient.persist(path)?;

    info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 10);
        assert_eq!(lines, ["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn test_wrap_splits_long_words_and_keeps_blank_lines() {
        let lines = wrap("abcdefghij\n\nxy", 4);
        assert_eq!(lines, ["abcd", "efgh", "ij", "", "xy"]);
    }

    #[test]
    fn test_layout_paginates_long_documents() {
        let mut doc = ReportDocument::new("Interview Summary");
        for i in 0..120 {
            doc.line(&format!("Line {}", i));
        }
        let pages = layout(&doc);

        assert!(pages.len() >= 3);
        let body_lines: usize = pages.iter().map(|p| p.iter().filter(|l| !l.bold).count()).sum();
        assert_eq!(body_lines, 120);
        for page in &pages {
            assert!(page.iter().all(|l| l.y_mm >= MARGIN_MM));
        }
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let mut doc = ReportDocument::new("ATS Analysis");
        doc.heading("Candidate: Ada").paragraph("Matching skills: Rust");
        let bytes = render_pdf(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_pdf_persists_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("summary.pdf");

        write_pdf(&ReportDocument::new("Interview Summary"), &path).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"%PDF"));
        // only the final file remains
        assert_eq!(std::fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }
}
