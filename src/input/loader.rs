use crate::error::{InterviewCoachError, Result};
use crate::input::kind::{DocumentKind, DocumentRole};
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Loads session documents, remembering each file's text until cleared.
///
/// A restarted session clears the loader so edited files are read again.
#[derive(Default)]
pub struct DocumentLoader {
    loaded: HashMap<PathBuf, String>,
}

impl DocumentLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, path: &Path, role: DocumentRole) -> Result<String> {
        let kind = DocumentKind::detect(path)?;
        if !role.accepts(kind) {
            return Err(InterviewCoachError::UnsupportedFormat(format!(
                "A {} must be one of {}: {}",
                role,
                role.accepted_formats(),
                path.display()
            )));
        }

        if let Some(text) = self.loaded.get(path) {
            debug!("Reusing loaded {} from {}", role, path.display());
            return Ok(text.clone());
        }

        if !path.is_file() {
            return Err(InterviewCoachError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match kind {
            DocumentKind::Pdf => PdfExtractor.extract(path).await?,
            DocumentKind::PlainText => PlainTextExtractor.extract(path).await?,
            DocumentKind::Markdown => MarkdownExtractor.extract(path).await?,
        };
        info!(
            "Loaded {} from {} ({} characters)",
            role,
            path.display(),
            text.chars().count()
        );

        self.loaded.insert(path.to_path_buf(), text.clone());
        Ok(text)
    }

    pub fn clear(&mut self) {
        self.loaded.clear();
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}
