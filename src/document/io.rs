//! Package reading
//!
//! Opens the .docx zip container and pulls out the three parts the extractor
//! needs. The archive handle lives only inside [`read_package`], so it is
//! released on every return path.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use zip::ZipArchive;

use crate::error::{PackageError, Result};

pub(crate) const DOCUMENT_PART: &str = "word/document.xml";
pub(crate) const STYLES_PART: &str = "word/styles.xml";
pub(crate) const NUMBERING_PART: &str = "word/numbering.xml";

/// Raw bytes of the parts read from a package
#[derive(Debug, Default)]
pub(crate) struct PackageParts {
    pub(crate) document: Vec<u8>,
    pub(crate) styles: Option<Vec<u8>>,
    pub(crate) numbering: Option<Vec<u8>>,
    /// Non-fatal problems with the optional parts
    pub(crate) warnings: Vec<PackageError>,
}

/// Read the main document and the optional style/numbering catalogs.
///
/// Failing to open the archive or to read the main document is an error;
/// problems with the optional parts are collected in
/// [`PackageParts::warnings`] and the part is treated as absent.
pub(crate) fn read_package(path: &Path) -> Result<PackageParts> {
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => PackageError::NotFound,
        _ => PackageError::Open(err),
    })?;
    let mut archive = ZipArchive::new(file).map_err(PackageError::InvalidArchive)?;

    let names: HashSet<String> = archive.file_names().map(str::to_string).collect();
    log::debug!("{} entries in {}", names.len(), path.display());

    if !names.contains(DOCUMENT_PART) {
        return Err(PackageError::MissingDocument);
    }
    let document = read_part(&mut archive, DOCUMENT_PART)?;

    let mut warnings = Vec::new();
    let mut optional = |part: &str| -> Option<Vec<u8>> {
        if !names.contains(part) {
            log::debug!("{part} not present");
            return None;
        }
        match read_part(&mut archive, part) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                warnings.push(err);
                None
            }
        }
    };
    let styles = optional(STYLES_PART);
    let numbering = optional(NUMBERING_PART);

    Ok(PackageParts {
        document,
        styles,
        numbering,
        warnings,
    })
}

fn read_part(archive: &mut ZipArchive<File>, name: &str) -> Result<Vec<u8>> {
    let read_error = |message: String| PackageError::ReadPart {
        part: short_name(name),
        message,
    };

    let mut entry = archive
        .by_name(name)
        .map_err(|err| read_error(err.to_string()))?;
    // The declared size comes from the archive headers and may be forged.
    let mut bytes = Vec::new();
    entry
        .read_to_end(&mut bytes)
        .map_err(|err| read_error(err.to_string()))?;
    Ok(bytes)
}

/// Part name without the `word/` prefix, as used in warning texts
pub(crate) fn short_name(part: &str) -> &'static str {
    match part {
        DOCUMENT_PART => "document.xml",
        STYLES_PART => "styles.xml",
        NUMBERING_PART => "numbering.xml",
        _ => "package part",
    }
}
