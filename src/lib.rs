//! Interview coach library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod output;
pub mod session;

pub use config::Config;
pub use error::{InterviewCoachError, Result};
pub use session::InterviewSession;
