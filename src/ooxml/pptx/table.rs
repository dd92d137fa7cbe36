//! Table graphic frames.
//!
//! Tables live directly in the slide part as a DrawingML table inside a
//! graphic frame. The grid is always exactly the declared `rows x cols`;
//! the projection from ragged input happens in [`crate::model::TableSpec`].

use crate::common::error::{Error, Result};
use crate::common::unit::inches_to_emu;
use crate::model::TableSpec;
use crate::ooxml::opc::rel::escape_xml;

const TABLE_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/table";

/// Fixed table region: left 0.5in, top 2in, 4in wide, 0.8in per row.
const TABLE_X_IN: f64 = 0.5;
const TABLE_Y_IN: f64 = 2.0;
const TABLE_W_IN: f64 = 4.0;
const ROW_H_IN: f64 = 0.8;

/// Generate the graphic frame holding one table.
///
/// # Errors
///
/// [`Error::RenderError`] when the declared grid is degenerate (zero rows
/// or zero columns), which cannot be laid out.
pub fn table_frame_xml(shape_id: u32, spec: &TableSpec) -> Result<String> {
    if spec.rows == 0 || spec.cols == 0 {
        return Err(Error::RenderError(format!(
            "table grid {}x{} is degenerate",
            spec.rows, spec.cols
        )));
    }

    let grid = spec.grid();
    let col_width = inches_to_emu(TABLE_W_IN) / spec.cols as i64;
    let row_height = inches_to_emu(ROW_H_IN);

    let mut xml = String::with_capacity(512 + spec.rows * spec.cols * 96);
    xml.push_str(&format!(
        concat!(
            r#"<p:graphicFrame><p:nvGraphicFramePr>"#,
            r#"<p:cNvPr id="{id}" name="Table {id}"/>"#,
            r#"<p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr>"#,
            r#"<p:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></p:xfrm>"#,
            r#"<a:graphic><a:graphicData uri="{uri}">"#,
            r#"<a:tbl><a:tblPr firstRow="1" bandRow="1"/><a:tblGrid>"#
        ),
        id = shape_id,
        x = inches_to_emu(TABLE_X_IN),
        y = inches_to_emu(TABLE_Y_IN),
        cx = inches_to_emu(TABLE_W_IN),
        cy = row_height * spec.rows as i64,
        uri = TABLE_URI,
    ));

    for _ in 0..spec.cols {
        xml.push_str(&format!(r#"<a:gridCol w="{col_width}"/>"#));
    }
    xml.push_str("</a:tblGrid>");

    for row in &grid {
        xml.push_str(&format!(r#"<a:tr h="{row_height}">"#));
        for cell in row {
            xml.push_str("<a:tc><a:txBody><a:bodyPr/><a:lstStyle/>");
            if cell.is_empty() {
                xml.push_str(r#"<a:p><a:endParaRPr lang="en-US"/></a:p>"#);
            } else {
                xml.push_str(&format!(
                    r#"<a:p><a:r><a:rPr lang="en-US"/><a:t>{}</a:t></a:r></a:p>"#,
                    escape_xml(cell)
                ));
            }
            xml.push_str("</a:txBody><a:tcPr/></a:tc>");
        }
        xml.push_str("</a:tr>");
    }

    xml.push_str("</a:tbl></a:graphicData></a:graphic></p:graphicFrame>");

    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_is_exactly_declared_size() {
        let spec = TableSpec {
            rows: 2,
            cols: 3,
            data: vec![vec!["a".to_string(), "b".to_string()]],
        };
        let xml = table_frame_xml(5, &spec).unwrap();
        assert_eq!(xml.matches("<a:tr ").count(), 2);
        assert_eq!(xml.matches("<a:tc>").count(), 6);
        assert_eq!(xml.matches("<a:gridCol ").count(), 3);
        assert!(xml.contains("<a:t>a</a:t>"));
        // Four declared cells have no data
        assert_eq!(xml.matches("<a:endParaRPr").count(), 4);
    }

    #[test]
    fn test_degenerate_grid_fails() {
        let spec = TableSpec {
            rows: 0,
            cols: 2,
            data: vec![],
        };
        assert!(matches!(
            table_frame_xml(5, &spec),
            Err(Error::RenderError(_))
        ));
    }
}
