//! Error types for docx-blocks
//!
//! None of these escape [`crate::parse`]: every variant is turned into a
//! warning string on the returned stats, so the `Display` text of each
//! variant is also the exact warning a caller sees.

use std::io;
use thiserror::Error;

pub use crate::document::xml::XmlError;

/// Failures while opening or reading a .docx package.
#[derive(Error, Debug)]
pub enum PackageError {
    /// The input path does not exist.
    #[error("File not found")]
    NotFound,

    /// The input exists but could not be opened.
    #[error("Error opening file: {0}")]
    Open(#[source] io::Error),

    /// The input is not a zip archive.
    #[error("Invalid ZIP file structure")]
    InvalidArchive(#[source] zip::result::ZipError),

    /// The archive has no main document part.
    #[error("No word/document.xml found - invalid DOCX")]
    MissingDocument,

    /// A part listed in the archive could not be read.
    #[error("Error reading {part}: {message}")]
    ReadPart { part: &'static str, message: String },

    /// A part could not be parsed as XML.
    #[error("Malformed {part}: {source}")]
    Malformed {
        part: &'static str,
        #[source]
        source: XmlError,
    },

    /// The document part parsed but has no body element.
    #[error("No body element found in document")]
    MissingBody,
}

pub type Result<T> = std::result::Result<T, PackageError>;
