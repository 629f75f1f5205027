//! List item detection and grouping
//!
//! A paragraph is a list item when it carries numbering properties with a
//! `numId` other than `0`. Consecutive items sharing a [`ListIdentity`] are grouped into one
//! list block; the open group is owned by the extractor and finished
//! explicitly.

use super::super::models::{Block, ListItem};
use super::super::xml::{Attr, Element, Tag};
use super::numbering::{NO_NUMBERING, NumberingTable};

/// What decides whether two list items belong to the same list
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListIdentity {
    /// `None` when the `numId` element has no value
    pub(crate) num_id: Option<String>,
    pub(crate) ordered: bool,
}

/// List membership of a single paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListMembership {
    pub(crate) identity: ListIdentity,
    pub(crate) level: u32,
}

/// Read `w:numPr` from a paragraph and classify it via the numbering table.
///
/// Returns `None` for ordinary paragraphs, for `numPr` without a `numId`, and
/// for `numId="0"` (numbering explicitly removed). A `numId` without a value
/// still marks a bulleted item. A missing or unparseable `ilvl` is level 0.
pub(crate) fn list_membership(
    para: &Element,
    numbering: &NumberingTable,
) -> Option<ListMembership> {
    let num_pr = para.find(Tag::NumberingProperties)?;
    let num_id = num_pr.child(Tag::NumberingId)?.attr(Attr::Val);
    if num_id == Some(NO_NUMBERING) {
        return None;
    }

    let level = num_pr
        .child(Tag::IndentLevel)
        .and_then(|ilvl| ilvl.attr(Attr::Val))
        .and_then(|val| val.trim().parse().ok())
        .unwrap_or(0);

    Some(ListMembership {
        identity: ListIdentity {
            num_id: num_id.map(str::to_string),
            ordered: num_id.is_some_and(|id| numbering.is_ordered(id, level)),
        },
        level,
    })
}

/// The list currently being accumulated
#[derive(Debug)]
pub(crate) struct OpenList {
    pub(crate) identity: ListIdentity,
    items: Vec<ListItem>,
}

impl OpenList {
    pub(crate) fn new(identity: ListIdentity) -> Self {
        Self {
            identity,
            items: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, text: String, level: u32) {
        self.items.push(ListItem { text, level });
    }

    /// Close the list, producing its block
    pub(crate) fn finish(self) -> Block {
        Block::List {
            ordered: self.identity.ordered,
            items: self.items,
        }
    }
}
