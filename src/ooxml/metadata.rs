//! Core and extended document properties.
//!
//! Every produced package carries the two standard metadata parts:
//! `/docProps/core.xml` (Dublin Core properties) and `/docProps/app.xml`
//! (application properties).

use chrono::{SecondsFormat, Utc};

use crate::common::error::Result;

use super::opc::OpcPackage;
use super::opc::constants::{content_type as ct, relationship_type as rt};

/// Name written into the application properties of produced packages.
const APPLICATION_NAME: &str = "Pitaya";

/// Add `/docProps/core.xml` and `/docProps/app.xml` to a package and relate
/// the package to both.
pub fn add_doc_props(package: &mut OpcPackage, title: &str) -> Result<()> {
    let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    let core = format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties""#,
            r#" xmlns:dc="http://purl.org/dc/elements/1.1/""#,
            r#" xmlns:dcterms="http://purl.org/dc/terms/""#,
            r#" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            "<dc:title>{title}</dc:title>",
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{stamp}</dcterms:created>"#,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{stamp}</dcterms:modified>"#,
            "</cp:coreProperties>"
        ),
        title = super::opc::rel::escape_xml(title),
        stamp = stamp,
    );

    let app = format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#,
            "<Application>{app}</Application>",
            "</Properties>"
        ),
        app = APPLICATION_NAME,
    );

    package.add_part("/docProps/core.xml", ct::OPC_CORE_PROPERTIES, core.into_bytes())?;
    package.add_part("/docProps/app.xml", ct::OFC_EXTENDED_PROPERTIES, app.into_bytes())?;
    package.relate_to(rt::CORE_PROPERTIES, "/docProps/core.xml")?;
    package.relate_to(rt::EXTENDED_PROPERTIES, "/docProps/app.xml")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_both_parts() {
        let mut pkg = OpcPackage::new();
        add_doc_props(&mut pkg, "A <Title>").unwrap();

        let names: Vec<_> = pkg.iter_parts().map(|p| p.partname().to_string()).collect();
        assert_eq!(names, vec!["/docProps/core.xml", "/docProps/app.xml"]);

        let core = String::from_utf8(pkg.iter_parts().next().unwrap().blob().to_vec()).unwrap();
        assert!(core.contains("<dc:title>A &lt;Title&gt;</dc:title>"));
        assert_eq!(pkg.rels().len(), 2);
    }
}
