//! Typed WordprocessingML element tree
//!
//! Package parts are read with quick-xml's namespace-aware reader into a small
//! owned tree. Elements in the WordprocessingML main namespace become a closed
//! [`Tag`] set so callers dispatch with `match` rather than comparing qualified
//! names; everything else is kept as [`Tag::Other`] so descendant walks still
//! reach runs nested inside hyperlinks, insertions and the like.

use quick_xml::NsReader;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use thiserror::Error;

/// WordprocessingML main namespace (transitional).
pub(crate) const WORDML_NS: &[u8] = b"http://schemas.openxmlformats.org/wordprocessingml/2006/main";

#[derive(Error, Debug)]
pub enum XmlError {
    #[error("{0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("invalid attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("no root element")]
    NoRoot,

    #[error("junk after document element")]
    TrailingContent,

    #[error("unclosed element at end of input ({0} open)")]
    Unclosed(usize),
}

/// Element kinds the extractor and resolvers consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tag {
    Document,
    Body,
    Paragraph,
    ParagraphProperties,
    ParagraphStyle,
    NumberingProperties,
    IndentLevel,
    NumberingId,
    SectionProperties,
    Run,
    Text,
    Tab,
    Break,
    CarriageReturn,
    Table,
    TableRow,
    TableCell,
    Styles,
    Style,
    Name,
    BasedOn,
    Numbering,
    AbstractNum,
    LevelDefinition,
    NumberFormat,
    Num,
    AbstractNumId,
    Other,
}

impl Tag {
    fn from_local_name(local: &[u8]) -> Self {
        match local {
            b"document" => Tag::Document,
            b"body" => Tag::Body,
            b"p" => Tag::Paragraph,
            b"pPr" => Tag::ParagraphProperties,
            b"pStyle" => Tag::ParagraphStyle,
            b"numPr" => Tag::NumberingProperties,
            b"ilvl" => Tag::IndentLevel,
            b"numId" => Tag::NumberingId,
            b"sectPr" => Tag::SectionProperties,
            b"r" => Tag::Run,
            b"t" => Tag::Text,
            b"tab" => Tag::Tab,
            b"br" => Tag::Break,
            b"cr" => Tag::CarriageReturn,
            b"tbl" => Tag::Table,
            b"tr" => Tag::TableRow,
            b"tc" => Tag::TableCell,
            b"styles" => Tag::Styles,
            b"style" => Tag::Style,
            b"name" => Tag::Name,
            b"basedOn" => Tag::BasedOn,
            b"numbering" => Tag::Numbering,
            b"abstractNum" => Tag::AbstractNum,
            b"lvl" => Tag::LevelDefinition,
            b"numFmt" => Tag::NumberFormat,
            b"num" => Tag::Num,
            b"abstractNumId" => Tag::AbstractNumId,
            _ => Tag::Other,
        }
    }
}

/// Namespaced attributes the extractor reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Attr {
    Val,
    Type,
    StyleId,
    AbstractNumId,
    Ilvl,
    NumId,
}

impl Attr {
    fn from_local_name(local: &[u8]) -> Option<Self> {
        match local {
            b"val" => Some(Attr::Val),
            b"type" => Some(Attr::Type),
            b"styleId" => Some(Attr::StyleId),
            b"abstractNumId" => Some(Attr::AbstractNumId),
            b"ilvl" => Some(Attr::Ilvl),
            b"numId" => Some(Attr::NumId),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub(crate) enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug)]
pub(crate) struct Element {
    pub(crate) tag: Tag,
    attrs: Vec<(Attr, String)>,
    pub(crate) children: Vec<Node>,
}

/// Tear the tree down with an explicit stack so nesting depth never reaches
/// the call stack.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Element(mut element) = node {
                pending.append(&mut element.children);
            }
        }
    }
}

impl Element {
    fn new(tag: Tag, attrs: Vec<(Attr, String)>) -> Self {
        Self {
            tag,
            attrs,
            children: Vec::new(),
        }
    }

    pub(crate) fn attr(&self, attr: Attr) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == attr)
            .map(|(_, value)| value.as_str())
    }

    /// Direct element children, in document order.
    pub(crate) fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    pub(crate) fn children_tagged(&self, tag: Tag) -> impl Iterator<Item = &Element> {
        self.elements().filter(move |element| element.tag == tag)
    }

    pub(crate) fn child(&self, tag: Tag) -> Option<&Element> {
        self.children_tagged(tag).next()
    }

    /// All descendant elements in document (pre-)order, excluding `self`.
    pub(crate) fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<&Element> = self.elements().collect();
        stack.reverse();
        Descendants { stack }
    }

    /// First descendant with the given tag.
    pub(crate) fn find(&self, tag: Tag) -> Option<&Element> {
        self.descendants().find(|element| element.tag == tag)
    }

    /// Concatenated direct text content.
    pub(crate) fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}

pub(crate) struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(element.elements());
        self.stack[start..].reverse();
        Some(element)
    }
}

/// Parse a package part into its root element.
pub(crate) fn parse_element_tree(bytes: &[u8]) -> Result<Element, XmlError> {
    let mut reader = NsReader::from_reader(bytes);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let element = open_element(&reader, e)?;
                if stack.is_empty() && root.is_some() {
                    return Err(XmlError::TrailingContent);
                }
                stack.push(element);
            }
            Event::Empty(ref e) => {
                let element = open_element(&reader, e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Element(element)),
                    None if root.is_none() => root = Some(element),
                    None => return Err(XmlError::TrailingContent),
                }
            }
            Event::End(_) => {
                let Some(element) = stack.pop() else {
                    return Err(XmlError::TrailingContent);
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Element(element)),
                    None => root = Some(element),
                }
            }
            Event::Text(ref e) => {
                let text = e.unescape()?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Text(text.into_owned())),
                    None if is_blank(&text) => {}
                    None => return Err(XmlError::TrailingContent),
                }
            }
            Event::CData(e) => {
                if let Some(parent) = stack.last_mut() {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    parent.children.push(Node::Text(text));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctypes
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(XmlError::Unclosed(stack.len()));
    }
    root.ok_or(XmlError::NoRoot)
}

fn open_element(
    reader: &NsReader<&[u8]>,
    start: &quick_xml::events::BytesStart<'_>,
) -> Result<Element, XmlError> {
    let (ns, local) = reader.resolve_element(start.name());
    let tag = if is_wordml(&ns) {
        Tag::from_local_name(local.as_ref())
    } else {
        Tag::Other
    };

    let mut attrs = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute?;
        let (ns, local) = reader.resolve_attribute(attribute.key);
        if !is_wordml(&ns) {
            continue;
        }
        if let Some(attr) = Attr::from_local_name(local.as_ref()) {
            attrs.push((attr, attribute.unescape_value()?.into_owned()));
        }
    }

    Ok(Element::new(tag, attrs))
}

/// Whitespace or a byte-order mark outside the root element
fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == '\u{feff}')
}

fn is_wordml(ns: &ResolveResult<'_>) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == WORDML_NS)
}
