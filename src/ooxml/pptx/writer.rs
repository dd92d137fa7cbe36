//! Deck writer for PresentationML packages.

use crate::common::error::Result;
use crate::common::style::{RGBColor, parse_inline};
use crate::common::unit::{inches_to_emu, pt_to_centipoints};
use crate::model::SlideSpec;
use crate::ooxml::metadata::add_doc_props;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::rel::escape_xml;
use crate::ooxml::opc::{OpcPackage, PackURI, PackageWriter};

use super::chart::{chart_frame_xml, chart_part_xml};
use super::layouts::{LAYOUT_CATALOG, layout_xml, master_xml, sp_tree_header, theme_xml};
use super::shapes::shape_sp_xml;
use super::table::table_frame_xml;
use super::{A_NS, P_NS, R_NS};

/// Fallback catalog index when a layout lands beyond the template count.
const FALLBACK_LAYOUT_INDEX: usize = 1;

/// Fixed chart region: left 5in, top 2in, 4.5in x 3in.
const CHART_X_IN: f64 = 5.0;
const CHART_Y_IN: f64 = 2.0;
const CHART_W_IN: f64 = 4.5;
const CHART_H_IN: f64 = 3.0;

/// Default body typography applied when a slide does not specify its own.
const DEFAULT_FONT_NAME: &str = "Arial";
const DEFAULT_FONT_SIZE: u32 = 18;

/// Serialize a slide deck into a complete .pptx package.
///
/// Slides are added in input order, each against its layout template, with
/// charts, tables, and shapes appended after body text in that order.
pub fn write_presentation(slides: &[SlideSpec]) -> Result<Vec<u8>> {
    let mut package = OpcPackage::new();

    package.relate_to(rt::OFFICE_DOCUMENT, "/ppt/presentation.xml")?;
    let deck_title = slides.first().map(|s| s.title.as_str()).unwrap_or("");
    add_doc_props(&mut package, deck_title)?;

    // Presentation part relationships: rId1 is the master, slides follow
    let presentation = package.add_part(
        "/ppt/presentation.xml",
        ct::PML_PRESENTATION_MAIN,
        presentation_xml(slides.len()).into_bytes(),
    )?;
    let master_uri = PackURI::new("/ppt/slideMasters/slideMaster1.xml")?;
    presentation.rels_mut().add(rt::SLIDE_MASTER, &master_uri);
    for i in 0..slides.len() {
        let slide_uri = PackURI::new(&format!("/ppt/slides/slide{}.xml", i + 1))?;
        presentation.rels_mut().add(rt::SLIDE, &slide_uri);
    }

    // Master, layouts, theme
    let master = package.add_part(
        "/ppt/slideMasters/slideMaster1.xml",
        ct::PML_SLIDE_MASTER,
        master_xml(LAYOUT_CATALOG.len()).into_bytes(),
    )?;
    for i in 0..LAYOUT_CATALOG.len() {
        let layout_uri = PackURI::new(&format!("/ppt/slideLayouts/slideLayout{}.xml", i + 1))?;
        master.rels_mut().add(rt::SLIDE_LAYOUT, &layout_uri);
    }
    let theme_uri = PackURI::new("/ppt/theme/theme1.xml")?;
    master.rels_mut().add(rt::THEME, &theme_uri);

    for (i, template) in LAYOUT_CATALOG.iter().enumerate() {
        let layout = package.add_part(
            &format!("/ppt/slideLayouts/slideLayout{}.xml", i + 1),
            ct::PML_SLIDE_LAYOUT,
            layout_xml(template).into_bytes(),
        )?;
        layout.rels_mut().add(rt::SLIDE_MASTER, &master_uri);
    }

    package.add_part("/ppt/theme/theme1.xml", ct::OFC_THEME, theme_xml().into_bytes())?;

    // Slides and their chart parts
    let mut chart_count = 0usize;
    for (i, spec) in slides.iter().enumerate() {
        let slide_partname = format!("/ppt/slides/slide{}.xml", i + 1);

        // Chart parts come first so the slide can reference them
        let mut chart_rels = Vec::with_capacity(spec.charts.len());
        for chart_spec in &spec.charts {
            let normalized = chart_spec.normalize()?;
            chart_count += 1;
            let chart_partname = format!("/ppt/charts/chart{chart_count}.xml");
            package.add_part(
                &chart_partname,
                ct::DML_CHART,
                chart_part_xml(chart_spec.kind, chart_spec.title.as_deref(), &normalized)
                    .into_bytes(),
            )?;
            chart_rels.push(chart_partname);
        }

        let blob = slide_xml(spec)?;
        let slide = package.add_part(&slide_partname, ct::PML_SLIDE, blob.into_bytes())?;

        let layout_index = resolve_layout_index(spec);
        let layout_uri =
            PackURI::new(&format!("/ppt/slideLayouts/slideLayout{}.xml", layout_index + 1))?;
        slide.rels_mut().add(rt::SLIDE_LAYOUT, &layout_uri);
        for chart_partname in &chart_rels {
            let chart_uri = PackURI::new(chart_partname)?;
            slide.rels_mut().add(rt::CHART, &chart_uri);
        }
    }

    PackageWriter::to_bytes(&package)
}

/// Resolve a slide's catalog index, falling back to Title and Content when
/// the index would exceed the available templates.
fn resolve_layout_index(spec: &SlideSpec) -> usize {
    let index = spec.layout.template_index();
    if index >= LAYOUT_CATALOG.len() {
        FALLBACK_LAYOUT_INDEX
    } else {
        index
    }
}

fn presentation_xml(slide_count: usize) -> String {
    let mut slide_ids = String::new();
    for i in 0..slide_count {
        // rId1 is the master relationship, so slide rIds start at 2
        slide_ids.push_str(&format!(
            r#"<p:sldId id="{}" r:id="rId{}"/>"#,
            256 + i,
            i + 2,
        ));
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<p:presentation xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}">"#,
            r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#,
            r#"<p:sldIdLst>{slides}</p:sldIdLst>"#,
            r#"<p:sldSz cx="9144000" cy="6858000"/>"#,
            r#"<p:notesSz cx="6858000" cy="9144000"/>"#,
            r#"</p:presentation>"#
        ),
        a = A_NS,
        r = R_NS,
        p = P_NS,
        slides = slide_ids,
    )
}

/// Generate one slide part.
fn slide_xml(spec: &SlideSpec) -> Result<String> {
    let template = &LAYOUT_CATALOG[resolve_layout_index(spec)];

    let background = spec
        .background_color
        .as_deref()
        .and_then(RGBColor::from_hex)
        .map(|color| {
            format!(
                concat!(
                    r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                    r#"<a:effectLst/></p:bgPr></p:bg>"#
                ),
                color.to_hex()
            )
        })
        .unwrap_or_default();

    let mut shapes = String::new();
    let mut next_id: u32 = 2;

    if template.has_title {
        shapes.push_str(&title_sp_xml(next_id, &spec.title));
        next_id += 1;
    }

    if template.has_body {
        if let Some(content) = spec.content.as_deref() {
            shapes.push_str(&body_sp_xml(next_id, spec, content));
            next_id += 1;
        }
    }

    // Slide relationships put the layout at rId1; charts follow
    for chart_index in 0..spec.charts.len() {
        let r_id = format!("rId{}", chart_index + 2);
        shapes.push_str(&chart_frame_xml(
            next_id,
            &r_id,
            inches_to_emu(CHART_X_IN),
            inches_to_emu(CHART_Y_IN),
            inches_to_emu(CHART_W_IN),
            inches_to_emu(CHART_H_IN),
        ));
        next_id += 1;
    }

    for table_spec in &spec.tables {
        shapes.push_str(&table_frame_xml(next_id, table_spec)?);
        next_id += 1;
    }

    for shape_spec in &spec.shapes {
        shapes.push_str(&shape_sp_xml(next_id, shape_spec));
        next_id += 1;
    }

    Ok(format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<p:sld xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}">"#,
            r#"<p:cSld>{bg}<p:spTree>{tree_header}{shapes}</p:spTree></p:cSld>"#,
            r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#,
            r#"</p:sld>"#
        ),
        a = A_NS,
        r = R_NS,
        p = P_NS,
        bg = background,
        tree_header = sp_tree_header(),
        shapes = shapes,
    ))
}

fn title_sp_xml(shape_id: u32, title: &str) -> String {
    format!(
        concat!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="Title {id}"/>"#,
            r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#,
            r#"<p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/>"#,
            r#"<p:txBody><a:bodyPr/><a:lstStyle/>"#,
            r#"<a:p><a:r><a:rPr lang="en-US" dirty="0"/><a:t>{title}</a:t></a:r></a:p>"#,
            r#"</p:txBody></p:sp>"#
        ),
        id = shape_id,
        title = escape_xml(title),
    )
}

/// Generate the body placeholder with rich-text content.
///
/// One paragraph per content line; two-space-indented lines are demoted one
/// level. Each line runs through the inline rich-text parser.
fn body_sp_xml(shape_id: u32, spec: &SlideSpec, content: &str) -> String {
    let font_name = spec.font_name.as_deref().unwrap_or(DEFAULT_FONT_NAME);
    let font_size = spec.font_size.unwrap_or(DEFAULT_FONT_SIZE);
    let font_color = spec.font_color.as_deref().and_then(RGBColor::from_hex);

    let mut paragraphs = String::new();
    for line in content.split('\n') {
        let level = if line.starts_with("  ") { 1 } else { 0 };
        let clean = line.trim();

        if clean.is_empty() {
            paragraphs.push_str(r#"<a:p><a:endParaRPr lang="en-US"/></a:p>"#);
            continue;
        }

        let ppr = if level > 0 {
            format!(r#"<a:pPr lvl="{level}"/>"#)
        } else {
            String::new()
        };

        paragraphs.push_str(&format!("<a:p>{ppr}"));
        for run in parse_inline(clean) {
            if run.text.is_empty() {
                continue;
            }

            let mut attrs = format!(r#" sz="{}""#, pt_to_centipoints(font_size));
            if run.bold {
                attrs.push_str(r#" b="1""#);
            }
            if run.italic {
                attrs.push_str(r#" i="1""#);
            }
            if run.underline {
                attrs.push_str(r#" u="sng""#);
            }

            let fill = font_color
                .map(|color| {
                    format!(
                        r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                        color.to_hex()
                    )
                })
                .unwrap_or_default();

            paragraphs.push_str(&format!(
                concat!(
                    r#"<a:r><a:rPr lang="en-US"{attrs} dirty="0">{fill}"#,
                    r#"<a:latin typeface="{font}"/></a:rPr>"#,
                    r#"<a:t>{text}</a:t></a:r>"#
                ),
                attrs = attrs,
                fill = fill,
                font = escape_xml(font_name),
                text = escape_xml(&run.text),
            ));
        }
        paragraphs.push_str("</a:p>");
    }

    format!(
        concat!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="Content Placeholder {id}"/>"#,
            r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#,
            r#"<p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr><p:spPr/>"#,
            r#"<p:txBody><a:bodyPr/><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"#
        ),
        id = shape_id,
        paragraphs = paragraphs,
    )
}
