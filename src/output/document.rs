//! Format-neutral report documents
//!
//! Builders fill a `ReportDocument` with headings and text; the PDF writer
//! and the console both render from it. Text enters through `sanitize`, so
//! everything stored here is representable in Latin-1.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    /// Bold section line
    Heading(String),
    /// Single line of body text
    Line(String),
    /// Wrapped body text, may contain newlines
    Paragraph(String),
    /// Vertical gap
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl ReportDocument {
    pub fn new(title: &str) -> Self {
        Self {
            title: sanitize(title),
            blocks: Vec::new(),
        }
    }

    pub fn heading(&mut self, text: &str) -> &mut Self {
        self.blocks.push(Block::Heading(sanitize(text)));
        self
    }

    pub fn line(&mut self, text: &str) -> &mut Self {
        self.blocks.push(Block::Line(sanitize(text)));
        self
    }

    pub fn paragraph(&mut self, text: &str) -> &mut Self {
        self.blocks.push(Block::Paragraph(sanitize(text)));
        self
    }

    pub fn spacer(&mut self) -> &mut Self {
        self.blocks.push(Block::Spacer);
        self
    }

    /// Plain-text rendering, for the terminal and for tests.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&"=".repeat(self.title.chars().count().max(20)));
        out.push_str("\n\n");

        for block in &self.blocks {
            match block {
                Block::Heading(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
                Block::Line(text) | Block::Paragraph(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
                Block::Spacer => out.push('\n'),
            }
        }
        out
    }
}

/// Map text onto Latin-1, replacing anything outside it with `?`.
///
/// One replacement per unrepresentable character; nothing is ever rejected.
/// Control characters other than newline and tab are dropped since no PDF
/// text operator can show them.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\r' => None,
            '\n' | '\t' => Some(c),
            c if c.is_control() => None,
            c if (c as u32) <= 0xFF => Some(c),
            _ => Some('?'),
        })
        .collect()
}
