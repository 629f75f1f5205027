//! List numbering formats
//!
//! `numbering.xml` defines abstract formats (one number format per nesting
//! level) and concrete lists that point at an abstract format. A paragraph
//! references a concrete list by `numId`, so deciding whether it is an ordered
//! list item takes two hops: numId → abstractNumId → level format.

use std::collections::HashMap;

use super::super::xml::{Attr, Element, Tag};

/// `numId` value meaning "numbering removed"
pub(crate) const NO_NUMBERING: &str = "0";

const DEFAULT_FORMAT: &str = "bullet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LevelFormat {
    pub(crate) format: String,
    pub(crate) ordered: bool,
}

impl LevelFormat {
    fn new(format: &str) -> Self {
        Self {
            format: format.to_string(),
            ordered: !matches!(format, "bullet" | "none"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct NumberingTable {
    /// abstractNumId → level → format
    abstract_formats: HashMap<String, HashMap<u32, LevelFormat>>,
    /// numId → abstractNumId
    lists: HashMap<String, String>,
}

impl NumberingTable {
    /// Build the table from a parsed `numbering.xml` root.
    pub(crate) fn from_catalog(root: &Element) -> Self {
        let mut table = Self::default();

        for element in root.descendants() {
            match element.tag {
                Tag::AbstractNum => {
                    if let Some(id) = element.attr(Attr::AbstractNumId) {
                        table
                            .abstract_formats
                            .insert(id.to_string(), level_formats(element));
                    }
                }
                Tag::Num => {
                    let num_id = element.attr(Attr::NumId);
                    let abstract_id = element
                        .child(Tag::AbstractNumId)
                        .and_then(|reference| reference.attr(Attr::Val));
                    if let (Some(num_id), Some(abstract_id)) = (num_id, abstract_id) {
                        table
                            .lists
                            .insert(num_id.to_string(), abstract_id.to_string());
                    }
                }
                _ => {}
            }
        }

        log::debug!(
            "numbering: {} abstract formats, {} lists",
            table.abstract_formats.len(),
            table.lists.len()
        );
        table
    }

    /// Format entry for a list level, if every hop resolves.
    pub(crate) fn level_format(&self, num_id: &str, level: u32) -> Option<&LevelFormat> {
        let abstract_id = self.lists.get(num_id)?;
        self.abstract_formats.get(abstract_id)?.get(&level)
    }

    /// Whether items of `num_id` at `level` are numbered. Any unresolved hop
    /// counts as a bullet list.
    pub(crate) fn is_ordered(&self, num_id: &str, level: u32) -> bool {
        self.level_format(num_id, level)
            .map(|format| format.ordered)
            .unwrap_or(false)
    }
}

fn level_formats(abstract_num: &Element) -> HashMap<u32, LevelFormat> {
    abstract_num
        .children_tagged(Tag::LevelDefinition)
        .filter_map(|lvl| {
            let level = lvl.attr(Attr::Ilvl)?.trim().parse().ok()?;
            // A numFmt with no value is not "bullet", so it counts as ordered.
            let format = match lvl.child(Tag::NumberFormat) {
                Some(num_fmt) => num_fmt.attr(Attr::Val).unwrap_or(""),
                None => DEFAULT_FORMAT,
            };
            Some((level, LevelFormat::new(format)))
        })
        .collect()
}
