use crate::error::{InterviewCoachError, Result};
use std::fmt;
use std::path::Path;

/// On-disk format, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
    Markdown,
}

impl DocumentKind {
    pub fn detect(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| {
                InterviewCoachError::UnsupportedFormat(format!("{} has no file extension", path.display()))
            })?;

        match extension.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "txt" | "text" => Ok(DocumentKind::PlainText),
            "md" | "markdown" => Ok(DocumentKind::Markdown),
            other => Err(InterviewCoachError::UnsupportedFormat(format!(
                ".{} files are not supported: {}",
                other,
                path.display()
            ))),
        }
    }
}

/// What a loaded document is used for in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Resume,
    JobDescription,
}

impl DocumentRole {
    /// Resumes may be PDF; job descriptions are pasted text or text files.
    pub fn accepts(self, kind: DocumentKind) -> bool {
        match self {
            DocumentRole::Resume => true,
            DocumentRole::JobDescription => kind != DocumentKind::Pdf,
        }
    }

    pub fn accepted_formats(self) -> &'static str {
        match self {
            DocumentRole::Resume => "PDF, TXT, MD",
            DocumentRole::JobDescription => "TXT, MD",
        }
    }
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRole::Resume => f.write_str("resume"),
            DocumentRole::JobDescription => f.write_str("job description"),
        }
    }
}
