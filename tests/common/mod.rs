//! Builds .docx packages for the integration tests
#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

pub const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
</Types>"#;

pub const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

pub const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
</Relationships>"#;

pub const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:styleId="Normal" w:default="1">
    <w:name w:val="Normal"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Title">
    <w:name w:val="Title"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Subtitle">
    <w:name w:val="Subtitle"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading1">
    <w:name w:val="Heading 1"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading2">
    <w:name w:val="Heading 2"/>
    <w:basedOn w:val="Heading1"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading3">
    <w:name w:val="Heading 3"/>
    <w:basedOn w:val="Heading2"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading4">
    <w:name w:val="Heading 4"/>
    <w:basedOn w:val="Heading3"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading5">
    <w:name w:val="Heading 5"/>
    <w:basedOn w:val="Heading4"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading6">
    <w:name w:val="Heading 6"/>
    <w:basedOn w:val="Heading5"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading7">
    <w:name w:val="Heading 7"/>
    <w:basedOn w:val="Heading6"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading8">
    <w:name w:val="Heading 8"/>
    <w:basedOn w:val="Heading7"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading9">
    <w:name w:val="Heading 9"/>
    <w:basedOn w:val="Heading8"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="ListParagraph">
    <w:name w:val="List Paragraph"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="CustomHeading">
    <w:name w:val="Custom Heading"/>
    <w:basedOn w:val="Heading2"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="LoopA">
    <w:name w:val="Loop A"/>
    <w:basedOn w:val="LoopB"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="LoopB">
    <w:name w:val="Loop B"/>
    <w:basedOn w:val="LoopA"/>
  </w:style>
</w:styles>"#;

pub const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0">
    <w:lvl w:ilvl="0">
      <w:numFmt w:val="bullet"/>
    </w:lvl>
    <w:lvl w:ilvl="1">
      <w:numFmt w:val="bullet"/>
    </w:lvl>
    <w:lvl w:ilvl="2">
      <w:numFmt w:val="bullet"/>
    </w:lvl>
  </w:abstractNum>
  <w:abstractNum w:abstractNumId="1">
    <w:lvl w:ilvl="0">
      <w:numFmt w:val="decimal"/>
    </w:lvl>
    <w:lvl w:ilvl="1">
      <w:numFmt w:val="lowerLetter"/>
    </w:lvl>
    <w:lvl w:ilvl="2">
      <w:numFmt w:val="lowerRoman"/>
    </w:lvl>
  </w:abstractNum>
  <w:abstractNum w:abstractNumId="2">
    <w:lvl w:ilvl="0">
      <w:numFmt w:val="bullet"/>
    </w:lvl>
    <w:lvl w:ilvl="1">
      <w:numFmt w:val="decimal"/>
    </w:lvl>
  </w:abstractNum>
  <w:num w:numId="1">
    <w:abstractNumId w:val="0"/>
  </w:num>
  <w:num w:numId="2">
    <w:abstractNumId w:val="1"/>
  </w:num>
  <w:num w:numId="3">
    <w:abstractNumId w:val="2"/>
  </w:num>
</w:numbering>"#;

/// Inline content of a paragraph built with [`runs_paragraph`]
pub enum Run<'a> {
    Text(&'a str),
    Tab,
    Br,
    Cr,
    PageBreak,
}

pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn paragraph(text: &str, style: Option<&str>) -> String {
    let style_xml = style
        .map(|style| format!(r#"<w:pPr><w:pStyle w:val="{style}"/></w:pPr>"#))
        .unwrap_or_default();
    format!(
        r#"<w:p>{style_xml}<w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        escape_xml(text)
    )
}

pub fn runs_paragraph(runs: &[Run]) -> String {
    let runs: String = runs
        .iter()
        .map(|run| match run {
            Run::Text(text) => format!("<w:r><w:t>{}</w:t></w:r>", escape_xml(text)),
            Run::Tab => "<w:r><w:tab/></w:r>".to_string(),
            Run::Br => "<w:r><w:br/></w:r>".to_string(),
            Run::Cr => "<w:r><w:cr/></w:r>".to_string(),
            Run::PageBreak => r#"<w:r><w:br w:type="page"/></w:r>"#.to_string(),
        })
        .collect();
    format!("<w:p>{runs}</w:p>")
}

pub fn list_item(text: &str, num_id: u32, ilvl: u32) -> String {
    format!(
        r#"<w:p>
      <w:pPr>
        <w:pStyle w:val="ListParagraph"/>
        <w:numPr>
          <w:ilvl w:val="{ilvl}"/>
          <w:numId w:val="{num_id}"/>
        </w:numPr>
      </w:pPr>
      <w:r><w:t>{}</w:t></w:r>
    </w:p>"#,
        escape_xml(text)
    )
}

pub fn table(rows: &[&[&str]]) -> String {
    let rows: Vec<String> = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| {
                    format!(
                        "<w:tc><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:tc>",
                        escape_xml(cell)
                    )
                })
                .collect();
            format!("<w:tr>{cells}</w:tr>")
        })
        .collect();
    format!("<w:tbl><w:tblPr/><w:tblGrid/>{}</w:tbl>", rows.join(" "))
}

pub fn section_break_paragraph() -> String {
    r#"<w:p><w:pPr><w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr></w:pPr></w:p>"#
        .to_string()
}

pub fn body_section_properties() -> String {
    r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440"/></w:sectPr>"#.to_string()
}

pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    {body}
  </w:body>
</w:document>"#
    )
}

/// A package written into its own temporary directory
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Write a zip with exactly the given entries
pub fn write_package(entries: &[(&str, &str)]) -> Fixture {
    write_package_with(entries, CompressionMethod::Deflated)
}

pub fn write_package_with(entries: &[(&str, &str)], method: CompressionMethod) -> Fixture {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("fixture.docx");
    let mut zip = zip::ZipWriter::new(File::create(&path).expect("create fixture"));
    let options = SimpleFileOptions::default().compression_method(method);
    for (name, contents) in entries {
        zip.start_file(*name, options.clone()).expect("start zip entry");
        zip.write_all(contents.as_bytes()).expect("write zip entry");
    }
    zip.finish().expect("finish zip");
    Fixture { _dir: dir, path }
}

/// Full package with the standard styles and numbering catalogs
pub fn docx(body: &[String]) -> Fixture {
    let document = document_xml(&body.join("\n"));
    write_package(&[
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", RELS_XML),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML),
        ("word/styles.xml", STYLES_XML),
        ("word/numbering.xml", NUMBERING_XML),
        ("word/document.xml", document.as_str()),
    ])
}

/// Package with only the main document part
pub fn bare_docx(body: &[String]) -> Fixture {
    let document = document_xml(&body.join("\n"));
    write_package(&[
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("word/document.xml", document.as_str()),
    ])
}

/// Single stored `word/document.xml` entry whose zip64 extra field declares
/// `declared_size` uncompressed bytes. The CRC is left at zero.
pub fn forged_size_docx(document: &str, declared_size: u64) -> Fixture {
    const ZIP64_MARKER: u32 = 0xFFFF_FFFF;
    let name = b"word/document.xml";
    let data = document.as_bytes();

    let mut zip64_extra = Vec::new();
    zip64_extra.extend_from_slice(&1u16.to_le_bytes());
    zip64_extra.extend_from_slice(&16u16.to_le_bytes());
    zip64_extra.extend_from_slice(&declared_size.to_le_bytes());
    zip64_extra.extend_from_slice(&(data.len() as u64).to_le_bytes());

    // version needed, flags, method, time, date, crc, sizes
    let mut common = Vec::new();
    common.extend_from_slice(&45u16.to_le_bytes());
    common.extend_from_slice(&0u16.to_le_bytes());
    common.extend_from_slice(&0u16.to_le_bytes());
    common.extend_from_slice(&0u16.to_le_bytes());
    common.extend_from_slice(&0x21u16.to_le_bytes());
    common.extend_from_slice(&0u32.to_le_bytes());
    common.extend_from_slice(&ZIP64_MARKER.to_le_bytes());
    common.extend_from_slice(&ZIP64_MARKER.to_le_bytes());
    common.extend_from_slice(&(name.len() as u16).to_le_bytes());
    common.extend_from_slice(&(zip64_extra.len() as u16).to_le_bytes());

    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
    bytes.extend_from_slice(&common);
    bytes.extend_from_slice(name);
    bytes.extend_from_slice(&zip64_extra);
    bytes.extend_from_slice(data);

    let central_offset = bytes.len() as u32;
    bytes.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
    bytes.extend_from_slice(&45u16.to_le_bytes());
    bytes.extend_from_slice(&common);
    bytes.extend_from_slice(&0u16.to_le_bytes()); // comment length
    bytes.extend_from_slice(&0u16.to_le_bytes()); // disk
    bytes.extend_from_slice(&0u16.to_le_bytes()); // internal attributes
    bytes.extend_from_slice(&0u32.to_le_bytes()); // external attributes
    bytes.extend_from_slice(&0u32.to_le_bytes()); // local header offset
    bytes.extend_from_slice(name);
    bytes.extend_from_slice(&zip64_extra);
    let central_size = bytes.len() as u32 - central_offset;

    bytes.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&central_size.to_le_bytes());
    bytes.extend_from_slice(&central_offset.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());

    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("forged.docx");
    std::fs::write(&path, bytes).expect("write forged package");
    Fixture { _dir: dir, path }
}
