//! Document loading and orchestration
//!
//! This module contains [`parse_document`], which reads a package, resolves
//! its style and numbering catalogs and walks the document body once,
//! turning each body child into blocks in document order.

use std::path::Path;

use super::io::{DOCUMENT_PART, NUMBERING_PART, STYLES_PART, read_package, short_name};
use super::models::*;
use super::parsing::list::{OpenList, list_membership};
use super::parsing::numbering::NumberingTable;
use super::parsing::styles::{HeadingKind, StyleMap, paragraph_style_id, resolve_styles};
use super::parsing::table::extract_table;
use super::parsing::text::{count_breaks, paragraph_text};
use super::xml::{Element, Tag, parse_element_tree};
use crate::error::PackageError;

/// Parse a .docx package into blocks and statistics.
///
/// Never fails: an unreadable package or an unparseable main document yields
/// an empty block list with a warning, and problems with the optional
/// catalogs degrade them to empty with a warning.
pub fn parse_document(path: &Path, options: &ParseOptions) -> ParseResult {
    let mut stats = Stats::default();

    let parts = match read_package(path) {
        Ok(parts) => parts,
        Err(err) => {
            stats.warn(err.to_string());
            return ParseResult::failed(stats);
        }
    };
    for warning in &parts.warnings {
        stats.warn(warning.to_string());
    }

    let styles = parts
        .styles
        .as_deref()
        .and_then(|bytes| parse_catalog(bytes, STYLES_PART, &mut stats))
        .map(|root| resolve_styles(&root))
        .unwrap_or_default();

    let numbering = parts
        .numbering
        .as_deref()
        .and_then(|bytes| parse_catalog(bytes, NUMBERING_PART, &mut stats))
        .map(|root| NumberingTable::from_catalog(&root))
        .unwrap_or_default();

    let document = match parse_element_tree(&parts.document) {
        Ok(root) => root,
        Err(source) => {
            stats.warn(
                PackageError::Malformed {
                    part: short_name(DOCUMENT_PART),
                    source,
                }
                .to_string(),
            );
            return ParseResult::failed(stats);
        }
    };

    let body = if document.tag == Tag::Body {
        Some(&document)
    } else {
        document.find(Tag::Body)
    };
    let Some(body) = body else {
        stats.warn(PackageError::MissingBody.to_string());
        return ParseResult::failed(stats);
    };

    let blocks = extract_blocks(body, &styles, &numbering, options, &mut stats);

    let summary = format!(
        "{}: {} blocks, {} paragraphs, {} tables, {} warnings",
        path.display(),
        blocks.len(),
        stats.paragraphs,
        stats.tables.count,
        stats.warnings.len()
    );
    if options.verbose {
        log::info!("{summary}");
    } else {
        log::debug!("{summary}");
    }

    ParseResult { blocks, stats }
}

/// Parse an optional catalog, recording a warning if it is malformed.
fn parse_catalog(bytes: &[u8], part: &'static str, stats: &mut Stats) -> Option<Element> {
    match parse_element_tree(bytes) {
        Ok(root) => Some(root),
        Err(source) => {
            stats.warn(
                PackageError::Malformed {
                    part: short_name(part),
                    source,
                }
                .to_string(),
            );
            None
        }
    }
}

/// Walk the body children once, in order, producing blocks.
///
/// At most one list is open at a time. It is closed when an item with a
/// different identity arrives, when any non-list block is emitted, and at the
/// end of the body.
pub(crate) fn extract_blocks(
    body: &Element,
    styles: &StyleMap,
    numbering: &NumberingTable,
    options: &ParseOptions,
    stats: &mut Stats,
) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut open_list: Option<OpenList> = None;

    for child in body.elements() {
        match child.tag {
            Tag::Paragraph => {
                let breaks = count_breaks(child);
                if breaks > 0 {
                    if options.preserve_breaks {
                        close_list(open_list.take(), &mut blocks, stats);
                        blocks.extend(std::iter::repeat_n(Block::Break, breaks));
                    } else {
                        stats.dropped_breaks += breaks;
                    }
                }

                let text = paragraph_text(child);

                if let Some(membership) = list_membership(child, numbering) {
                    let mut list = match open_list.take() {
                        Some(list) if list.identity == membership.identity => list,
                        previous => {
                            close_list(previous, &mut blocks, stats);
                            OpenList::new(membership.identity)
                        }
                    };
                    list.push(text, membership.level);
                    open_list = Some(list);
                    continue;
                }

                close_list(open_list.take(), &mut blocks, stats);
                if let Some(block) = classify_paragraph(child, text, styles, stats) {
                    blocks.push(block);
                }
            }
            Tag::Table => {
                close_list(open_list.take(), &mut blocks, stats);
                let rows = extract_table(child);
                stats.count_table(&rows);
                blocks.push(Block::Table { rows });
            }
            // Body-level sectPr is the final section: exactly one trailing break
            Tag::SectionProperties => {
                if options.preserve_breaks {
                    close_list(open_list.take(), &mut blocks, stats);
                    blocks.push(Block::Break);
                } else {
                    stats.dropped_breaks += 1;
                }
            }
            _ => {}
        }
    }

    close_list(open_list.take(), &mut blocks, stats);

    if stats.dropped_breaks > 0 && !options.preserve_breaks {
        stats.warn(format!(
            "Dropped {} page/section break(s). Use --preserve-breaks to convert to blank paragraphs.",
            stats.dropped_breaks
        ));
    }

    blocks
}

fn close_list(list: Option<OpenList>, blocks: &mut Vec<Block>, stats: &mut Stats) {
    if let Some(list) = list {
        stats.count_list(list.identity.ordered);
        blocks.push(list.finish());
    }
}

/// Turn a non-list paragraph into a block, counting it. Blank body
/// paragraphs are counted but not emitted; headings always are.
fn classify_paragraph(
    para: &Element,
    text: String,
    styles: &StyleMap,
    stats: &mut Stats,
) -> Option<Block> {
    let heading = paragraph_style_id(para)
        .and_then(|id| styles.get(id))
        .and_then(|record| record.heading());

    match heading {
        Some(HeadingKind::Title) => {
            stats.count_title();
            Some(Block::Title { text })
        }
        Some(HeadingKind::Subtitle) => {
            stats.count_subtitle();
            Some(Block::Subtitle { text })
        }
        Some(HeadingKind::Level(level)) => {
            stats.count_heading(level);
            Some(Block::Heading { level, text })
        }
        None => {
            stats.paragraphs += 1;
            if text.trim().is_empty() {
                None
            } else {
                Some(Block::Paragraph { text })
            }
        }
    }
}
