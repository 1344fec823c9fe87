//! Language model integration: the gateway, its HTTP backend, and everything
//! built on top of it.

pub mod analyzer;
pub mod content;
pub mod gateway;
pub mod gemini;
pub mod prompts;
pub mod scoring;

pub use analyzer::{AtsAnalysis, AtsAnalyzer};
pub use gateway::{Gateway, TextGenerator};
pub use gemini::GeminiClient;
