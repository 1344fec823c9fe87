//! Error handling for the interview coach

use crate::session::Page;
use thiserror::Error;

/// Variants wrapping a foreign error carry its text in their own message
/// and do not report it again as a source.
#[derive(Error, Debug)]
pub enum InterviewCoachError {
    #[error("IO error: {0}")]
    Io(std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Gateway error (status {status}): {message}")]
    Gateway { status: u16, message: String },

    #[error("Gateway returned no text")]
    EmptyResponse,

    #[error("Gateway call timed out after {0}s")]
    Timeout(u64),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Please fill all fields and upload a resume (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Cannot {action} from the {page} page")]
    InvalidTransition { page: Page, action: &'static str },

    #[error("Report generation error: {0}")]
    ReportGeneration(String),

    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InterviewCoachError>;

impl From<std::io::Error> for InterviewCoachError {
    fn from(err: std::io::Error) -> Self {
        InterviewCoachError::Io(err)
    }
}

impl From<reqwest::Error> for InterviewCoachError {
    fn from(err: reqwest::Error) -> Self {
        InterviewCoachError::Http(err)
    }
}

impl From<serde_json::Error> for InterviewCoachError {
    fn from(err: serde_json::Error) -> Self {
        InterviewCoachError::Serialization(err)
    }
}

impl From<tempfile::PersistError> for InterviewCoachError {
    fn from(err: tempfile::PersistError) -> Self {
        InterviewCoachError::Io(err.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_cause_printed_once_in_context_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "Not a directory");
        let err = anyhow::Error::from(InterviewCoachError::from(io)).context("Failed to write ats.pdf");

        let shown = format!("{:#}", err);
        assert_eq!(shown, "Failed to write ats.pdf: IO error: Not a directory");
        assert_eq!(shown.matches("Not a directory").count(), 1);
    }

    #[test]
    fn test_missing_fields_message() {
        let err = InterviewCoachError::MissingFields(vec!["name", "resume"]);
        assert_eq!(
            err.to_string(),
            "Please fill all fields and upload a resume (missing: name, resume)"
        );
    }
}
