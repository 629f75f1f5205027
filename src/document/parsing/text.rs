//! Paragraph text extraction
//!
//! Text is collected from every descendant of a paragraph in document order,
//! so runs nested in hyperlinks or tracked insertions are included. Layout
//! markers become literal whitespace; nothing is trimmed or collapsed here.

use super::super::xml::{Attr, Element, Tag};

const PAGE_BREAK_TYPE: &str = "page";

/// Extract the literal text of a paragraph.
///
/// - `w:t` contributes its content verbatim
/// - `w:tab` becomes `\t`
/// - `w:br` without a type and `w:cr` become `\n`
/// - typed breaks (`page`, `column`, ...) contribute nothing
pub(crate) fn paragraph_text(para: &Element) -> String {
    let mut text = String::new();

    for element in para.descendants() {
        match element.tag {
            Tag::Text => text.push_str(&element.text()),
            Tag::Tab => text.push('\t'),
            Tag::Break if element.attr(Attr::Type).is_none() => text.push('\n'),
            Tag::CarriageReturn => text.push('\n'),
            _ => {}
        }
    }

    text
}

/// Count the page and section breaks a paragraph carries: one per
/// `w:br w:type="page"` anywhere inside it, plus one if its properties hold a
/// `w:sectPr`.
pub(crate) fn count_breaks(para: &Element) -> usize {
    let page_breaks = para
        .descendants()
        .filter(|element| {
            element.tag == Tag::Break && element.attr(Attr::Type) == Some(PAGE_BREAK_TYPE)
        })
        .count();

    let section_break = para
        .child(Tag::ParagraphProperties)
        .and_then(|properties| properties.child(Tag::SectionProperties))
        .is_some();

    page_breaks + usize::from(section_break)
}
