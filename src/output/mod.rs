//! Reports, charts and terminal presentation

pub mod charts;
pub mod console;
pub mod document;
pub mod pdf;
pub mod report;

pub use document::ReportDocument;
