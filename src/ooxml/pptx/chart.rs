//! Chart part generation.
//!
//! A chart on a slide is a graphic frame referencing a separate chart part.
//! The chart part carries the plot type, the category axis, and every series
//! as literal cached values, which is all a produced (non-editable) chart
//! needs to render.

use crate::model::{ChartKind, NormalizedChart, Series};
use crate::ooxml::opc::rel::escape_xml;

use super::{A_NS, R_NS};

const C_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";

/// Axis ids shared by the category/value axis pair of 2-D plots.
const CAT_AX_ID: &str = "111111111";
const VAL_AX_ID: &str = "222222222";

/// Generate a complete chart part for a normalized chart.
pub fn chart_part_xml(kind: ChartKind, title: Option<&str>, chart: &NormalizedChart) -> String {
    let mut xml = String::with_capacity(2048);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!(
        r#"<c:chartSpace xmlns:c="{C_NS}" xmlns:a="{A_NS}" xmlns:r="{R_NS}"><c:chart>"#
    ));

    if let Some(title) = title {
        xml.push_str(&format!(
            concat!(
                r#"<c:title><c:tx><c:rich><a:bodyPr/><a:lstStyle/>"#,
                r#"<a:p><a:r><a:t>{}</a:t></a:r></a:p>"#,
                r#"</c:rich></c:tx><c:overlay val="0"/></c:title>"#,
                r#"<c:autoTitleDeleted val="0"/>"#
            ),
            escape_xml(title)
        ));
    }

    xml.push_str(r#"<c:plotArea><c:layout/>"#);
    match kind {
        ChartKind::Bar => {
            xml.push_str(concat!(
                r#"<c:barChart><c:barDir val="col"/><c:grouping val="clustered"/>"#,
                r#"<c:varyColors val="0"/>"#,
            ));
            write_series_list(&mut xml, chart);
            xml.push_str(&format!(
                r#"<c:axId val="{CAT_AX_ID}"/><c:axId val="{VAL_AX_ID}"/></c:barChart>"#
            ));
            write_axes(&mut xml);
        },
        ChartKind::Line => {
            xml.push_str(concat!(
                r#"<c:lineChart><c:grouping val="standard"/>"#,
                r#"<c:varyColors val="0"/>"#,
            ));
            write_series_list(&mut xml, chart);
            xml.push_str(&format!(
                r#"<c:marker val="1"/><c:axId val="{CAT_AX_ID}"/><c:axId val="{VAL_AX_ID}"/></c:lineChart>"#
            ));
            write_axes(&mut xml);
        },
        ChartKind::Pie => {
            xml.push_str(r#"<c:pieChart><c:varyColors val="1"/>"#);
            write_series_list(&mut xml, chart);
            xml.push_str(r#"<c:firstSliceAng val="0"/></c:pieChart>"#);
        },
    }
    xml.push_str("</c:plotArea>");

    if chart.series.len() > 1 || kind == ChartKind::Pie {
        xml.push_str(r#"<c:legend><c:legendPos val="r"/><c:overlay val="0"/></c:legend>"#);
    }
    xml.push_str(r#"<c:plotVisOnly val="1"/></c:chart></c:chartSpace>"#);

    xml
}

fn write_series_list(xml: &mut String, chart: &NormalizedChart) {
    for (idx, series) in chart.series.iter().enumerate() {
        write_series(xml, idx, series, &chart.categories);
    }
}

fn write_series(xml: &mut String, idx: usize, series: &Series, categories: &[String]) {
    let mut idx_buf = itoa::Buffer::new();
    let idx_str = idx_buf.format(idx);

    xml.push_str(&format!(
        concat!(
            r#"<c:ser><c:idx val="{idx}"/><c:order val="{idx}"/>"#,
            r#"<c:tx><c:v>{name}</c:v></c:tx>"#
        ),
        idx = idx_str,
        name = escape_xml(&series.name),
    ));

    // Category labels as a literal string cache
    xml.push_str(&format!(
        r#"<c:cat><c:strLit><c:ptCount val="{}"/>"#,
        categories.len()
    ));
    for (i, category) in categories.iter().enumerate() {
        xml.push_str(&format!(
            r#"<c:pt idx="{i}"><c:v>{}</c:v></c:pt>"#,
            escape_xml(category)
        ));
    }
    xml.push_str("</c:strLit></c:cat>");

    // Values as a literal number cache
    xml.push_str(&format!(
        r#"<c:val><c:numLit><c:ptCount val="{}"/>"#,
        series.values.len()
    ));
    let mut num_buf = ryu::Buffer::new();
    for (i, value) in series.values.iter().enumerate() {
        xml.push_str(&format!(
            r#"<c:pt idx="{i}"><c:v>{}</c:v></c:pt>"#,
            num_buf.format(*value)
        ));
    }
    xml.push_str("</c:numLit></c:val></c:ser>");
}

fn write_axes(xml: &mut String) {
    xml.push_str(&format!(
        concat!(
            r#"<c:catAx><c:axId val="{cat}"/>"#,
            r#"<c:scaling><c:orientation val="minMax"/></c:scaling>"#,
            r#"<c:delete val="0"/><c:axPos val="b"/><c:crossAx val="{val}"/></c:catAx>"#,
            r#"<c:valAx><c:axId val="{val}"/>"#,
            r#"<c:scaling><c:orientation val="minMax"/></c:scaling>"#,
            r#"<c:delete val="0"/><c:axPos val="l"/><c:crossAx val="{cat}"/></c:valAx>"#
        ),
        cat = CAT_AX_ID,
        val = VAL_AX_ID,
    ));
}

/// Generate the graphic frame that embeds a chart part into a slide.
///
/// `r_id` is the slide-level relationship to the chart part; geometry is in
/// EMU.
pub fn chart_frame_xml(shape_id: u32, r_id: &str, x: i64, y: i64, cx: i64, cy: i64) -> String {
    format!(
        concat!(
            r#"<p:graphicFrame><p:nvGraphicFramePr>"#,
            r#"<p:cNvPr id="{id}" name="Chart {id}"/>"#,
            r#"<p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr>"#,
            r#"<p:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></p:xfrm>"#,
            r#"<a:graphic><a:graphicData uri="{c}">"#,
            r#"<c:chart xmlns:c="{c}" xmlns:r="{r}" r:id="{rid}"/>"#,
            r#"</a:graphicData></a:graphic></p:graphicFrame>"#
        ),
        id = shape_id,
        x = x,
        y = y,
        cx = cx,
        cy = cy,
        c = C_NS,
        r = R_NS,
        rid = r_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Series;

    fn sample() -> NormalizedChart {
        NormalizedChart {
            categories: vec!["Q1".to_string(), "Q2".to_string()],
            series: vec![
                Series {
                    name: "East".to_string(),
                    values: vec![10.0, 15.0],
                },
                Series {
                    name: "West".to_string(),
                    values: vec![20.0, 25.0],
                },
            ],
        }
    }

    #[test]
    fn test_bar_chart_structure() {
        let xml = chart_part_xml(ChartKind::Bar, Some("Sales"), &sample());
        assert!(xml.contains("<c:barChart>"));
        assert_eq!(xml.matches("<c:ser>").count(), 2);
        assert!(xml.contains("<c:tx><c:v>East</c:v></c:tx>"));
        assert!(xml.contains(r#"<c:pt idx="1"><c:v>25.0</c:v></c:pt>"#));
        assert!(xml.contains("<c:catAx>"));
        assert!(xml.contains("<a:t>Sales</a:t>"));
    }

    #[test]
    fn test_pie_chart_has_no_axes() {
        let chart = NormalizedChart {
            categories: vec!["A".to_string()],
            series: vec![Series {
                name: "Series".to_string(),
                values: vec![1.0],
            }],
        };
        let xml = chart_part_xml(ChartKind::Pie, None, &chart);
        assert!(xml.contains("<c:pieChart>"));
        assert!(!xml.contains("<c:catAx>"));
        assert!(xml.contains("<c:legend>"));
    }

    #[test]
    fn test_frame_references_relationship() {
        let xml = chart_frame_xml(4, "rId2", 1, 2, 3, 4);
        assert!(xml.contains(r#"r:id="rId2""#));
        assert!(xml.contains(r#"<a:off x="1" y="2"/>"#));
    }
}
