//! Table extraction
//!
//! A table becomes a grid of cell strings. Rows keep whatever cell count they
//! have in the source; ragged tables are passed through as-is.

use super::super::models::TableRows;
use super::super::xml::{Element, Tag};
use super::text::paragraph_text;

/// Extract the cell grid of a `w:tbl` element
pub(crate) fn extract_table(table: &Element) -> TableRows {
    table
        .children_tagged(Tag::TableRow)
        .map(|row| row.children_tagged(Tag::TableCell).map(cell_text).collect())
        .collect()
}

/// Text of the paragraphs directly inside a cell, one line each. Empty
/// paragraphs are skipped, so an empty cell is `""`.
fn cell_text(cell: &Element) -> String {
    cell.children_tagged(Tag::Paragraph)
        .map(paragraph_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
