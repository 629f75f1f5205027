//! Core data structures for the extracted document structure
//!
//! This module defines the public types returned by [`crate::parse`]: the
//! ordered block sequence and the statistics record that accompanies it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Type aliases for convenience
pub type TableRows = Vec<Vec<String>>;
pub type HeadingCounts = BTreeMap<String, usize>;

/// Options accepted by [`crate::parse_with_options`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Log the extraction summary at `info` instead of `debug`
    pub verbose: bool,
    /// Emit page/section breaks as [`Block::Break`] instead of dropping them
    pub preserve_breaks: bool,
}

/// One semantic unit of document structure.
///
/// Serialized internally tagged, e.g. `{"type": "heading", "level": 2, "text": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Title { text: String },
    Subtitle { text: String },
    Heading { level: u32, text: String },
    Paragraph { text: String },
    List { ordered: bool, items: Vec<ListItem> },
    Table { rows: TableRows },
    Break,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub text: String,
    pub level: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStats {
    pub bulleted: usize,
    pub numbered: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStats {
    pub count: usize,
    pub max_rows: usize,
    pub max_cols: usize,
}

/// Counts and warnings gathered alongside the block sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Keys are `title`, `subtitle` and `level_N`; only levels seen are present
    pub headings: HeadingCounts,
    pub paragraphs: usize,
    pub lists: ListStats,
    pub tables: TableStats,
    pub warnings: Vec<String>,
    pub dropped_breaks: usize,
}

impl Stats {
    /// Record a warning. It is part of the result, so it is only logged at
    /// `info`.
    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{message}");
        self.warnings.push(message);
    }

    pub(crate) fn count_title(&mut self) {
        *self.headings.entry("title".to_string()).or_insert(0) += 1;
    }

    pub(crate) fn count_subtitle(&mut self) {
        *self.headings.entry("subtitle".to_string()).or_insert(0) += 1;
    }

    pub(crate) fn count_heading(&mut self, level: u32) {
        *self.headings.entry(format!("level_{level}")).or_insert(0) += 1;
    }

    pub(crate) fn count_list(&mut self, ordered: bool) {
        if ordered {
            self.lists.numbered += 1;
        } else {
            self.lists.bulleted += 1;
        }
    }

    pub(crate) fn count_table(&mut self, rows: &TableRows) {
        self.tables.count += 1;
        let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
        self.tables.max_rows = self.tables.max_rows.max(rows.len());
        self.tables.max_cols = self.tables.max_cols.max(widest);
    }
}

/// Result of parsing one package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub blocks: Vec<Block>,
    pub stats: Stats,
}

impl ParseResult {
    /// Empty block list with the warnings gathered so far
    pub(crate) fn failed(stats: Stats) -> Self {
        Self {
            blocks: Vec::new(),
            stats,
        }
    }

    /// Copy with warnings sorted, the form golden comparisons use
    pub fn normalized(&self) -> Self {
        let mut normalized = self.clone();
        normalized.stats.warnings.sort();
        normalized
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
