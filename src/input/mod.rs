//! Resume and job description loading

mod kind;
mod loader;
pub mod text_extractor;

pub use kind::{DocumentKind, DocumentRole};
pub use loader::DocumentLoader;
