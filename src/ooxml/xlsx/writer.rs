//! Workbook writer for SpreadsheetML packages.

use crate::common::error::Result;
use crate::ooxml::metadata::add_doc_props;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::rel::escape_xml;
use crate::ooxml::opc::{OpcPackage, PackURI, PackageWriter};

const SML_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// One worksheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Inline string cell
    Text(String),
    /// Native numeric cell
    Number(f64),
    /// No cell emitted at this position
    Empty,
}

/// Serialize a header row and data rows into a complete .xlsx package.
///
/// The header occupies row 1; data rows follow in order. Row widths need
/// not match the header; each cell lands at its own coordinate.
pub fn write_workbook(header: &[String], rows: &[Vec<Cell>]) -> Result<Vec<u8>> {
    let mut package = OpcPackage::new();

    package.relate_to(rt::OFFICE_DOCUMENT, "/xl/workbook.xml")?;

    let workbook = package.add_part(
        "/xl/workbook.xml",
        ct::SML_SHEET_MAIN,
        workbook_xml().into_bytes(),
    )?;
    let sheet_uri = PackURI::new("/xl/worksheets/sheet1.xml")?;
    let styles_uri = PackURI::new("/xl/styles.xml")?;
    workbook.rels_mut().add(rt::WORKSHEET, &sheet_uri);
    workbook.rels_mut().add(rt::STYLES, &styles_uri);

    package.add_part(
        "/xl/worksheets/sheet1.xml",
        ct::SML_WORKSHEET,
        worksheet_xml(header, rows).into_bytes(),
    )?;
    package.add_part("/xl/styles.xml", ct::SML_STYLES, styles_xml().into_bytes())?;

    add_doc_props(&mut package, "")?;

    PackageWriter::to_bytes(&package)
}

fn workbook_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<workbook xmlns="{ns}" xmlns:r="{r}">"#,
            r#"<sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>"#,
            r#"</workbook>"#
        ),
        ns = SML_NS,
        r = R_NS,
    )
}

fn worksheet_xml(header: &[String], rows: &[Vec<Cell>]) -> String {
    let mut xml = String::with_capacity(1024 + rows.len() * 128);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<worksheet xmlns="{SML_NS}"><sheetData>"#));

    let header_cells: Vec<Cell> = header.iter().map(|h| Cell::Text(h.clone())).collect();
    for (row_idx, cells) in std::iter::once(&header_cells).chain(rows.iter()).enumerate() {
        write_row(&mut xml, row_idx + 1, cells);
    }

    xml.push_str("</sheetData></worksheet>");

    xml
}

fn write_row(xml: &mut String, row_num: usize, cells: &[Cell]) {
    let mut row_buf = itoa::Buffer::new();
    xml.push_str(&format!(r#"<row r="{}">"#, row_buf.format(row_num)));

    for (col_idx, cell) in cells.iter().enumerate() {
        let cell_ref = format!("{}{}", col_ref(col_idx), row_num);
        match cell {
            Cell::Text(text) => {
                xml.push_str(&format!(
                    r#"<c r="{cell_ref}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                    escape_xml(text)
                ));
            },
            Cell::Number(value) => {
                let mut num_buf = ryu::Buffer::new();
                xml.push_str(&format!(
                    r#"<c r="{cell_ref}"><v>{}</v></c>"#,
                    num_buf.format(*value)
                ));
            },
            Cell::Empty => {},
        }
    }

    xml.push_str("</row>");
}

/// Spreadsheet column reference for a zero-based index (0 -> "A", 26 -> "AA").
fn col_ref(mut idx: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (idx % 26) as u8);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

fn styles_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<styleSheet xmlns="{ns}">"#,
            r#"<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>"#,
            r#"<fills count="2"><fill><patternFill patternType="none"/></fill>"#,
            r#"<fill><patternFill patternType="gray125"/></fill></fills>"#,
            r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#,
            r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
            r#"<cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>"#,
            r#"</styleSheet>"#
        ),
        ns = SML_NS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn test_col_ref() {
        assert_eq!(col_ref(0), "A");
        assert_eq!(col_ref(25), "Z");
        assert_eq!(col_ref(26), "AA");
        assert_eq!(col_ref(27), "AB");
        assert_eq!(col_ref(701), "ZZ");
        assert_eq!(col_ref(702), "AAA");
    }

    #[test]
    fn test_worksheet_cells() {
        let xml = worksheet_xml(
            &["name".to_string(), "score".to_string()],
            &[vec![Cell::Text("ada".to_string()), Cell::Number(9.5)]],
        );
        assert!(xml.contains(r#"<c r="A1" t="inlineStr"><is><t xml:space="preserve">name</t></is></c>"#));
        assert!(xml.contains(r#"<c r="B2"><v>9.5</v></c>"#));
    }

    #[test]
    fn test_empty_cells_skipped() {
        let xml = worksheet_xml(
            &["a".to_string(), "b".to_string()],
            &[vec![Cell::Empty, Cell::Text("x".to_string())]],
        );
        assert!(!xml.contains(r#"<c r="A2""#));
        assert!(xml.contains(r#"<c r="B2""#));
    }

    #[test]
    fn test_package_members() {
        let bytes = write_workbook(
            &["k".to_string()],
            &[vec![Cell::Number(1.0)], vec![Cell::Number(2.0)]],
        )
        .unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut workbook = String::new();
        archive
            .by_name("xl/workbook.xml")
            .unwrap()
            .read_to_string(&mut workbook)
            .unwrap();
        assert!(workbook.contains(r#"name="Sheet1""#));

        let mut sheet = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut sheet)
            .unwrap();
        assert_eq!(sheet.matches("<row ").count(), 3);
    }
}
