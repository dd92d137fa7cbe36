//! Document writer for WordprocessingML packages.

use crate::common::error::Result;
use crate::markup::Block;
use crate::ooxml::metadata::add_doc_props;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::rel::escape_xml;
use crate::ooxml::opc::{OpcPackage, PackURI, PackageWriter};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Serialize classified flow blocks into a complete .docx package.
///
/// Headings map to the `Heading1`-`Heading3` paragraph styles, bullets to
/// `ListBullet` with the single bullet numbering definition, and everything
/// else to plain paragraphs.
pub fn write_document(blocks: &[Block]) -> Result<Vec<u8>> {
    let mut package = OpcPackage::new();

    package.relate_to(rt::OFFICE_DOCUMENT, "/word/document.xml")?;

    let document = package.add_part(
        "/word/document.xml",
        ct::WML_DOCUMENT_MAIN,
        document_xml(blocks).into_bytes(),
    )?;
    let styles_uri = PackURI::new("/word/styles.xml")?;
    let numbering_uri = PackURI::new("/word/numbering.xml")?;
    document.rels_mut().add(rt::STYLES, &styles_uri);
    document.rels_mut().add(rt::NUMBERING, &numbering_uri);

    package.add_part("/word/styles.xml", ct::WML_STYLES, styles_xml().into_bytes())?;
    package.add_part(
        "/word/numbering.xml",
        ct::WML_NUMBERING,
        numbering_xml().into_bytes(),
    )?;

    let title = blocks
        .iter()
        .find_map(|b| match b {
            Block::Heading { level: 1, text } => Some(text.as_str()),
            _ => None,
        })
        .unwrap_or("");
    add_doc_props(&mut package, title)?;

    PackageWriter::to_bytes(&package)
}

/// Generate the main document part.
fn document_xml(blocks: &[Block]) -> String {
    let mut xml = String::with_capacity(1024 + blocks.len() * 96);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:document xmlns:w="{W_NS}"><w:body>"#));

    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                xml.push_str(&format!(
                    r#"<w:p><w:pPr><w:pStyle w:val="Heading{level}"/></w:pPr>{}</w:p>"#,
                    run_xml(text)
                ));
            },
            Block::Bullet(text) => {
                xml.push_str(&format!(
                    concat!(
                        r#"<w:p><w:pPr><w:pStyle w:val="ListBullet"/>"#,
                        r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr>"#,
                        r#"</w:pPr>{}</w:p>"#
                    ),
                    run_xml(text)
                ));
            },
            Block::Paragraph(text) => {
                xml.push_str(&format!("<w:p>{}</w:p>", run_xml(text)));
            },
        }
    }

    // Letter-size section with one-inch margins (dimensions in twips)
    xml.push_str(concat!(
        r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/>"#,
        r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440""#,
        r#" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#,
    ));
    xml.push_str("</w:body></w:document>");

    xml
}

fn run_xml(text: &str) -> String {
    format!(
        r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#,
        escape_xml(text)
    )
}

/// Generate the styles part: Normal, Heading1-3, ListBullet.
fn styles_xml() -> String {
    let mut xml = String::with_capacity(2048);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:styles xmlns:w="{W_NS}">"#));
    xml.push_str(concat!(
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal">"#,
        r#"<w:name w:val="Normal"/><w:qFormat/></w:style>"#,
    ));

    // Heading sizes in half-points: 24pt, 18pt, 14pt
    for (level, size) in [(1u8, 48u32), (2, 36), (3, 28)] {
        xml.push_str(&format!(
            concat!(
                r#"<w:style w:type="paragraph" w:styleId="Heading{level}">"#,
                r#"<w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:qFormat/>"#,
                r#"<w:pPr><w:keepNext/><w:spacing w:before="240" w:after="60"/>"#,
                r#"<w:outlineLvl w:val="{outline}"/></w:pPr>"#,
                r#"<w:rPr><w:b/><w:sz w:val="{size}"/></w:rPr></w:style>"#
            ),
            level = level,
            outline = level - 1,
            size = size,
        ));
    }

    xml.push_str(concat!(
        r#"<w:style w:type="paragraph" w:styleId="ListBullet">"#,
        r#"<w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/>"#,
        r#"<w:pPr><w:numPr><w:numId w:val="1"/></w:numPr></w:pPr></w:style>"#,
    ));
    xml.push_str("</w:styles>");

    xml
}

/// Generate the numbering part: one bullet list definition.
fn numbering_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<w:numbering xmlns:w="{ns}">"#,
            r#"<w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0">"#,
            r#"<w:start w:val="1"/><w:numFmt w:val="bullet"/>"#,
            r#"<w:lvlText w:val="•"/><w:lvlJc w:val="left"/>"#,
            r#"<w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr>"#,
            r#"</w:lvl></w:abstractNum>"#,
            r#"<w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>"#,
            r#"</w:numbering>"#
        ),
        ns = W_NS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn member(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        let mut out = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_blocks_render_in_order() {
        let blocks = vec![
            Block::Heading {
                level: 1,
                text: "Title".to_string(),
            },
            Block::Bullet("item1".to_string()),
            Block::Bullet("item2".to_string()),
            Block::Paragraph("plain".to_string()),
        ];
        let xml = document_xml(&blocks);

        let heading = xml.find(r#"<w:pStyle w:val="Heading1"/>"#).unwrap();
        let first_bullet = xml.find("item1").unwrap();
        let second_bullet = xml.find("item2").unwrap();
        let paragraph = xml.find("<w:p><w:r>").unwrap();
        assert!(heading < first_bullet);
        assert!(first_bullet < second_bullet);
        assert!(second_bullet < paragraph);
        assert_eq!(xml.matches(r#"w:val="ListBullet""#).count(), 2);
    }

    #[test]
    fn test_package_members() {
        let bytes = write_document(&[Block::Paragraph("hello".to_string())]).unwrap();
        let doc = member(&bytes, "word/document.xml");
        assert!(doc.contains("hello"));
        assert!(member(&bytes, "word/styles.xml").contains("Heading1"));
        assert!(member(&bytes, "word/numbering.xml").contains("bullet"));
        assert!(member(&bytes, "word/_rels/document.xml.rels").contains("styles.xml"));
        assert!(member(&bytes, "docProps/app.xml").contains("Pitaya"));
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = document_xml(&[Block::Paragraph("a < b & c".to_string())]);
        assert!(xml.contains("a &lt; b &amp; c"));
    }
}
