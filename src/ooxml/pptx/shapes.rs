//! Decorative shape rendering.
//!
//! Shapes are plain `p:sp` elements with a preset geometry, an optional
//! solid fill, and optional centered text. Placement is fixed: every shape
//! on a slide lands in the same decorative region, matching the deck
//! builder's other fixed regions.

use crate::common::style::RGBColor;
use crate::common::unit::inches_to_emu;
use crate::model::ShapeSpec;
use crate::ooxml::opc::rel::escape_xml;

/// Fixed shape region: left 7in, top 5in, 2in x 1in.
const SHAPE_X_IN: f64 = 7.0;
const SHAPE_Y_IN: f64 = 5.0;
const SHAPE_W_IN: f64 = 2.0;
const SHAPE_H_IN: f64 = 1.0;

/// Generate one decorative shape.
///
/// An invalid fill color is ignored, not an error; the shape simply takes
/// the theme default fill.
pub fn shape_sp_xml(shape_id: u32, spec: &ShapeSpec) -> String {
    let fill = spec
        .color
        .as_deref()
        .and_then(RGBColor::from_hex)
        .map(|color| {
            format!(
                r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                color.to_hex()
            )
        })
        .unwrap_or_default();

    let text = match spec.text.as_deref() {
        Some(text) if !text.is_empty() => format!(
            r#"<a:p><a:r><a:rPr lang="en-US"/><a:t>{}</a:t></a:r></a:p>"#,
            escape_xml(text)
        ),
        _ => r#"<a:p><a:endParaRPr lang="en-US"/></a:p>"#.to_string(),
    };

    format!(
        concat!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name} {id}"/>"#,
            r#"<p:cNvSpPr/><p:nvPr/></p:nvSpPr>"#,
            r#"<p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="{preset}"><a:avLst/></a:prstGeom>{fill}</p:spPr>"#,
            r#"<p:txBody><a:bodyPr anchor="ctr"/><a:lstStyle/>{text}</p:txBody>"#,
            r#"</p:sp>"#
        ),
        id = shape_id,
        name = spec.kind.preset(),
        x = inches_to_emu(SHAPE_X_IN),
        y = inches_to_emu(SHAPE_Y_IN),
        cx = inches_to_emu(SHAPE_W_IN),
        cy = inches_to_emu(SHAPE_H_IN),
        preset = spec.kind.preset(),
        fill = fill,
        text = text,
    )
}
