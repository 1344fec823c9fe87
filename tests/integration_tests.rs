//! Integration tests for document loading

use interview_coach::input::{DocumentLoader, DocumentRole};
use interview_coach::InterviewCoachError;
use std::path::Path;

#[tokio::test]
async fn test_resume_from_txt() {
    let mut loader = DocumentLoader::new();
    let text = loader
        .load(Path::new("tests/fixtures/sample_resume.txt"), DocumentRole::Resume)
        .await
        .unwrap();

    assert!(text.contains("Ada Lovelace"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("Tokio"));
}

#[tokio::test]
async fn test_resume_from_markdown_drops_formatting() {
    let mut loader = DocumentLoader::new();
    let text = loader
        .load(Path::new("tests/fixtures/sample_resume.md"), DocumentRole::Resume)
        .await
        .unwrap();

    assert!(text.contains("Ada Lovelace"));
    assert!(text.contains("PostgreSQL"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_job_description_from_txt() {
    let mut loader = DocumentLoader::new();
    let text = loader
        .load(Path::new("tests/fixtures/job_description.txt"), DocumentRole::JobDescription)
        .await
        .unwrap();
    assert!(text.contains("Kubernetes"));
}

#[tokio::test]
async fn test_loaded_documents_are_reused_until_cleared() {
    let mut loader = DocumentLoader::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let first = loader.load(path, DocumentRole::Resume).await.unwrap();
    let second = loader.load(path, DocumentRole::Resume).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(loader.loaded_count(), 1);

    loader.clear();
    assert_eq!(loader.loaded_count(), 0);
}

#[tokio::test]
async fn test_unsupported_extension() {
    let mut loader = DocumentLoader::new();
    let result = loader
        .load(Path::new("tests/fixtures/unsupported.xyz"), DocumentRole::Resume)
        .await;
    assert!(matches!(result, Err(InterviewCoachError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_pdf_job_description_rejected_before_reading() {
    let mut loader = DocumentLoader::new();
    // the file does not exist; the role check comes first
    let result = loader
        .load(Path::new("tests/fixtures/job.pdf"), DocumentRole::JobDescription)
        .await;
    assert!(matches!(result, Err(InterviewCoachError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_missing_file() {
    let mut loader = DocumentLoader::new();
    let result = loader
        .load(Path::new("tests/fixtures/nonexistent.txt"), DocumentRole::Resume)
        .await;
    assert!(matches!(result, Err(InterviewCoachError::InvalidInput(_))));
}

#[tokio::test]
async fn test_resume_from_multi_page_pdf() {
    use printpdf::{BuiltinFont, Mm, PdfDocument};

    let (pdf, page, layer) = PdfDocument::new("Resume", Mm(210.0), Mm(297.0), "Layer 1");
    let font = pdf.add_builtin_font(BuiltinFont::Helvetica).unwrap();
    pdf.get_page(page)
        .get_layer(layer)
        .use_text("AdaLovelace", 12.0, Mm(20.0), Mm(270.0), &font);
    let (page, layer) = pdf.add_page(Mm(210.0), Mm(297.0), "Layer 1");
    pdf.get_page(page)
        .get_layer(layer)
        .use_text("RustEngineer", 12.0, Mm(20.0), Mm(270.0), &font);
    let bytes = pdf.save_to_bytes().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.pdf");
    std::fs::write(&path, bytes).unwrap();

    let mut loader = DocumentLoader::new();
    let text = loader.load(&path, DocumentRole::Resume).await.unwrap();

    let first = text.find("AdaLovelace").unwrap();
    let second = text.find("RustEngineer").unwrap();
    assert!(first < second);
    assert!(text[first..second].contains('\n'));
}
