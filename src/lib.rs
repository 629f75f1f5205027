//! docx-blocks: structural extraction for .docx files
//!
//! This library reads a Microsoft Word package and returns its main body as an
//! ordered list of blocks (titles, headings, paragraphs, lists, tables and
//! breaks), resolving heading levels through style inheritance and list kinds
//! through the numbering catalog. Problems with the package are reported as
//! warnings on the result rather than as errors.
//!
//! ```no_run
//! let result = docx_blocks::parse("report.docx", false);
//! println!("{}", result.to_json_pretty().unwrap());
//! ```

pub mod config;
pub mod document;
pub mod error;

use std::path::Path;

// Re-export commonly used types
pub use document::{Block, ListItem, ParseOptions, ParseResult, Stats};
pub use error::PackageError;

/// Parse a .docx package, optionally keeping page/section breaks as blocks.
pub fn parse(path: impl AsRef<Path>, preserve_breaks: bool) -> ParseResult {
    parse_with_options(
        path,
        &ParseOptions {
            preserve_breaks,
            ..ParseOptions::default()
        },
    )
}

/// Parse a .docx package with explicit options.
pub fn parse_with_options(path: impl AsRef<Path>, options: &ParseOptions) -> ParseResult {
    document::parse_document(path.as_ref(), options)
}
