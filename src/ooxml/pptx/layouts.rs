//! Slide master, layout catalog, and theme parts.
//!
//! Produced decks ship their own minimal template: one slide master with
//! title/body placeholder geometry, a catalog of nine layouts following the
//! conventional default-template ordering, and one theme. Slides reference
//! a layout by catalog index; placeholder geometry is inherited from the
//! master.

use super::{A_NS, P_NS, R_NS};

/// One entry in the layout catalog.
pub struct LayoutTemplate {
    /// Human-readable layout name (p:cSld/@name)
    pub name: &'static str,
    /// Layout type attribute (p:sldLayout/@type)
    pub kind: &'static str,
    /// Whether the layout carries a title placeholder
    pub has_title: bool,
    /// Whether the layout carries a body placeholder at idx 1
    pub has_body: bool,
}

/// The layout catalog, in conventional default-template order.
///
/// [`crate::model::LayoutKind::template_index`] indexes into this table;
/// indices beyond its length fall back to Title and Content.
pub const LAYOUT_CATALOG: &[LayoutTemplate] = &[
    LayoutTemplate {
        name: "Title Slide",
        kind: "title",
        has_title: true,
        has_body: false,
    },
    LayoutTemplate {
        name: "Title and Content",
        kind: "obj",
        has_title: true,
        has_body: true,
    },
    LayoutTemplate {
        name: "Section Header",
        kind: "secHead",
        has_title: true,
        has_body: false,
    },
    LayoutTemplate {
        name: "Two Content",
        kind: "twoObj",
        has_title: true,
        has_body: true,
    },
    LayoutTemplate {
        name: "Comparison",
        kind: "twoTxTwoObj",
        has_title: true,
        has_body: true,
    },
    LayoutTemplate {
        name: "Title Only",
        kind: "titleOnly",
        has_title: true,
        has_body: false,
    },
    LayoutTemplate {
        name: "Blank",
        kind: "blank",
        has_title: false,
        has_body: false,
    },
    LayoutTemplate {
        name: "Content with Caption",
        kind: "objTx",
        has_title: true,
        has_body: true,
    },
    LayoutTemplate {
        name: "Picture with Caption",
        kind: "picTx",
        has_title: true,
        has_body: true,
    },
];

/// Boilerplate opening of a shape tree: the required group-shape properties.
pub fn sp_tree_header() -> &'static str {
    concat!(
        r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
        r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
        r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
    )
}

/// Placeholder shape for a master or layout part.
///
/// `ph_attrs` is the raw attribute list of the `p:ph` element (e.g.
/// `type="title"` or `type="body" idx="1"`); `xfrm` is an optional
/// `<a:xfrm>` fragment giving explicit geometry.
fn placeholder_sp(id: u32, name: &str, ph_attrs: &str, xfrm: &str) -> String {
    format!(
        concat!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/>"#,
            r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#,
            r#"<p:nvPr><p:ph {ph}/></p:nvPr></p:nvSpPr>"#,
            r#"<p:spPr>{xfrm}</p:spPr>"#,
            r#"<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:endParaRPr lang="en-US"/></a:p></p:txBody>"#,
            r#"</p:sp>"#
        ),
        id = id,
        name = name,
        ph = ph_attrs,
        xfrm = xfrm,
    )
}

/// Generate the slide master part.
///
/// The master owns the placeholder geometry every slide inherits: title
/// across the top, body filling the content area below it.
pub fn master_xml(layout_count: usize) -> String {
    let title_xfrm = concat!(
        r#"<a:xfrm><a:off x="457200" y="274638"/>"#,
        r#"<a:ext cx="8229600" cy="1143000"/></a:xfrm>"#,
    );
    let body_xfrm = concat!(
        r#"<a:xfrm><a:off x="457200" y="1600200"/>"#,
        r#"<a:ext cx="8229600" cy="4525963"/></a:xfrm>"#,
    );

    let mut layout_ids = String::new();
    for i in 0..layout_count {
        layout_ids.push_str(&format!(
            r#"<p:sldLayoutId id="{}" r:id="rId{}"/>"#,
            2_147_483_649u64 + i as u64,
            i + 1,
        ));
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<p:sldMaster xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}">"#,
            r#"<p:cSld>"#,
            r#"<p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#,
            r#"<p:spTree>{tree_header}{title}{body}</p:spTree>"#,
            r#"</p:cSld>"#,
            r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1""#,
            r#" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5""#,
            r#" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
            r#"<p:sldLayoutIdLst>{layouts}</p:sldLayoutIdLst>"#,
            r#"</p:sldMaster>"#
        ),
        a = A_NS,
        r = R_NS,
        p = P_NS,
        tree_header = sp_tree_header(),
        title = placeholder_sp(2, "Title Placeholder 1", r#"type="title""#, title_xfrm),
        body = placeholder_sp(3, "Text Placeholder 2", r#"type="body" idx="1""#, body_xfrm),
        layouts = layout_ids,
    )
}

/// Generate one slide layout part from the catalog.
pub fn layout_xml(template: &LayoutTemplate) -> String {
    let mut shapes = String::new();
    let mut next_id = 2;
    if template.has_title {
        shapes.push_str(&placeholder_sp(next_id, "Title 1", r#"type="title""#, ""));
        next_id += 1;
    }
    if template.has_body {
        shapes.push_str(&placeholder_sp(
            next_id,
            "Content Placeholder 2",
            r#"type="body" idx="1""#,
            "",
        ));
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<p:sldLayout xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}" type="{kind}">"#,
            r#"<p:cSld name="{name}"><p:spTree>{tree_header}{shapes}</p:spTree></p:cSld>"#,
            r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#,
            r#"</p:sldLayout>"#
        ),
        a = A_NS,
        r = R_NS,
        p = P_NS,
        kind = template.kind,
        name = template.name,
        tree_header = sp_tree_header(),
        shapes = shapes,
    )
}

/// Generate the theme part.
///
/// A compact Office-compatible theme: the standard color scheme, Calibri
/// font scheme, and the minimum three-entry format scheme lists the schema
/// requires.
pub fn theme_xml() -> String {
    let fill_styles = concat!(
        r#"<a:fillStyleLst>"#,
        r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
        r#"<a:solidFill><a:schemeClr val="phClr"><a:tint val="60000"/></a:schemeClr></a:solidFill>"#,
        r#"<a:solidFill><a:schemeClr val="phClr"><a:shade val="80000"/></a:schemeClr></a:solidFill>"#,
        r#"</a:fillStyleLst>"#,
    );
    let line_styles = concat!(
        r#"<a:lnStyleLst>"#,
        r#"<a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
        r#"<a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
        r#"<a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
        r#"</a:lnStyleLst>"#,
    );
    let effect_styles = concat!(
        r#"<a:effectStyleLst>"#,
        r#"<a:effectStyle><a:effectLst/></a:effectStyle>"#,
        r#"<a:effectStyle><a:effectLst/></a:effectStyle>"#,
        r#"<a:effectStyle><a:effectLst/></a:effectStyle>"#,
        r#"</a:effectStyleLst>"#,
    );
    let bg_fill_styles = concat!(
        r#"<a:bgFillStyleLst>"#,
        r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
        r#"<a:solidFill><a:schemeClr val="phClr"><a:tint val="90000"/></a:schemeClr></a:solidFill>"#,
        r#"<a:solidFill><a:schemeClr val="phClr"><a:shade val="90000"/></a:schemeClr></a:solidFill>"#,
        r#"</a:bgFillStyleLst>"#,
    );

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<a:theme xmlns:a="{a}" name="Pitaya Theme"><a:themeElements>"#,
            r#"<a:clrScheme name="Office">"#,
            r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#,
            r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#,
            r#"<a:dk2><a:srgbClr val="44546A"/></a:dk2>"#,
            r#"<a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>"#,
            r#"<a:accent1><a:srgbClr val="4472C4"/></a:accent1>"#,
            r#"<a:accent2><a:srgbClr val="ED7D31"/></a:accent2>"#,
            r#"<a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>"#,
            r#"<a:accent4><a:srgbClr val="FFC000"/></a:accent4>"#,
            r#"<a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>"#,
            r#"<a:accent6><a:srgbClr val="70AD47"/></a:accent6>"#,
            r#"<a:hlink><a:srgbClr val="0563C1"/></a:hlink>"#,
            r#"<a:folHlink><a:srgbClr val="954F72"/></a:folHlink>"#,
            r#"</a:clrScheme>"#,
            r#"<a:fontScheme name="Office">"#,
            r#"<a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
            r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
            r#"</a:fontScheme>"#,
            r#"<a:fmtScheme name="Office">{fills}{lines}{effects}{bg_fills}</a:fmtScheme>"#,
            r#"</a:themeElements></a:theme>"#
        ),
        a = A_NS,
        fills = fill_styles,
        lines = line_styles,
        effects = effect_styles,
        bg_fills = bg_fill_styles,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matches_conventional_indices() {
        assert_eq!(LAYOUT_CATALOG.len(), 9);
        assert_eq!(LAYOUT_CATALOG[0].kind, "title");
        assert_eq!(LAYOUT_CATALOG[1].name, "Title and Content");
        assert_eq!(LAYOUT_CATALOG[6].name, "Blank");
        assert!(!LAYOUT_CATALOG[6].has_title);
        assert_eq!(LAYOUT_CATALOG[8].name, "Picture with Caption");
    }

    #[test]
    fn test_master_lists_all_layouts() {
        let xml = master_xml(LAYOUT_CATALOG.len());
        assert_eq!(xml.matches("<p:sldLayoutId ").count(), 9);
        assert!(xml.contains(r#"type="title""#));
        assert!(xml.contains(r#"type="body" idx="1""#));
    }

    #[test]
    fn test_blank_layout_has_no_placeholders() {
        let xml = layout_xml(&LAYOUT_CATALOG[6]);
        assert!(!xml.contains("<p:ph "));
    }
}
