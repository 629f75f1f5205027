//! Document parsing and data structures module
//!
//! This module reads Microsoft Word (.docx) packages and converts the main
//! document body into an ordered sequence of structural blocks.

pub(crate) mod io;
pub(crate) mod loader;
pub mod models;
pub(crate) mod parsing;
pub(crate) mod xml;

// Re-export the models and the entry point
pub use loader::parse_document;
pub use models::*;
