//! Heading detection from the style catalog
//!
//! Paragraph styles are classified by display name ("Title", "Subtitle",
//! "Heading N"), then styles without a direct classification inherit the
//! level of the nearest `basedOn` ancestor that has one.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use super::super::xml::{Attr, Element, Tag};

/// Style id → resolved record
pub(crate) type StyleMap = HashMap<String, StyleRecord>;

// Display names are compared lowercased with spaces removed, so both
// "Heading 2" and "heading2" land here.
static HEADING_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^heading([0-9]+)$").expect("static heading pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StyleRecord {
    pub(crate) id: String,
    pub(crate) display_name: String,
    pub(crate) based_on: Option<String>,
    pub(crate) heading_level: Option<u32>,
    pub(crate) is_title: bool,
    pub(crate) is_subtitle: bool,
}

/// How a paragraph with a given style should be emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeadingKind {
    Title,
    Subtitle,
    Level(u32),
}

impl StyleRecord {
    fn from_definition(style: &Element) -> Option<Self> {
        if style.attr(Attr::Type) != Some("paragraph") {
            return None;
        }
        let id = style.attr(Attr::StyleId)?.to_string();
        let display_name = style
            .child(Tag::Name)
            .and_then(|name| name.attr(Attr::Val))
            .unwrap_or(&id)
            .to_string();
        let based_on = style
            .child(Tag::BasedOn)
            .and_then(|based_on| based_on.attr(Attr::Val))
            .map(str::to_string);

        let mut record = Self {
            id,
            display_name,
            based_on,
            heading_level: None,
            is_title: false,
            is_subtitle: false,
        };
        record.classify_by_name();
        Some(record)
    }

    fn classify_by_name(&mut self) {
        let name = self.display_name.to_lowercase().replace(' ', "");
        match name.as_str() {
            "title" => {
                self.heading_level = Some(0);
                self.is_title = true;
            }
            "subtitle" => {
                self.heading_level = Some(0);
                self.is_subtitle = true;
            }
            _ => {
                self.heading_level = HEADING_NAME_PATTERN
                    .captures(&name)
                    .and_then(|captures| captures[1].parse().ok());
            }
        }
    }

    /// Classification of this style, if it is any kind of heading.
    ///
    /// Title/subtitle flags are not inherited: a style based on "Title"
    /// resolves to level 0 and is reported as a level-0 heading.
    pub(crate) fn heading(&self) -> Option<HeadingKind> {
        let level = self.heading_level?;
        Some(if self.is_title {
            HeadingKind::Title
        } else if self.is_subtitle {
            HeadingKind::Subtitle
        } else {
            HeadingKind::Level(level)
        })
    }
}

/// Build the style map from a parsed `styles.xml` root.
pub(crate) fn resolve_styles(root: &Element) -> StyleMap {
    let mut styles: StyleMap = root
        .descendants()
        .filter(|element| element.tag == Tag::Style)
        .filter_map(StyleRecord::from_definition)
        .map(|record| (record.id.clone(), record))
        .collect();

    let inherited: Vec<(String, u32)> = styles
        .values()
        .filter(|record| record.heading_level.is_none())
        .filter_map(|record| {
            inherited_level(&styles, &record.id).map(|level| (record.id.clone(), level))
        })
        .collect();

    for (id, level) in inherited {
        if let Some(record) = styles.get_mut(&id) {
            record.heading_level = Some(level);
        }
    }

    log::debug!("resolved {} paragraph styles", styles.len());
    styles
}

/// Walk the `basedOn` chain from `start` to the first style with a direct
/// level. Missing ancestors and cycles end the walk with `None`.
fn inherited_level(styles: &StyleMap, start: &str) -> Option<u32> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = start;

    loop {
        if !visited.insert(current) {
            return None;
        }
        let record = styles.get(current)?;
        if let Some(level) = record.heading_level {
            return Some(level);
        }
        current = record.based_on.as_deref()?;
    }
}

/// Style id referenced by a paragraph (`w:pPr/w:pStyle/@w:val`)
pub(crate) fn paragraph_style_id(para: &Element) -> Option<&str> {
    para.child(Tag::ParagraphProperties)?
        .child(Tag::ParagraphStyle)?
        .attr(Attr::Val)
}
