//! Package writer for OPC packages.
//!
//! This module serializes an assembled [`OpcPackage`] to ZIP bytes,
//! including the [Content_Types].xml stream, package relationships, and all
//! parts with their relationships.

use std::collections::BTreeMap;

use crate::common::error::Result;

use super::constants::content_type as ct;
use super::package::OpcPackage;
use super::packuri::{CONTENT_TYPES_URI, PackURI};
use super::phys_pkg::PhysPkgWriter;
use super::rel::escape_xml;

/// Package writer that serializes an OPC package to a ZIP archive.
///
/// This is the single exit point for every produced Office package. It
/// handles writing:
/// - [Content_Types].xml
/// - _rels/.rels (package relationships)
/// - All parts and their relationships
pub struct PackageWriter;

impl PackageWriter {
    /// Serialize an OPC package to bytes.
    ///
    /// # Arguments
    /// * `package` - The OPC package to serialize
    pub fn to_bytes(package: &OpcPackage) -> Result<Vec<u8>> {
        let mut phys_writer = PhysPkgWriter::new();

        // Write [Content_Types].xml
        Self::write_content_types(&mut phys_writer, package)?;

        // Write package-level relationships (_rels/.rels)
        Self::write_pkg_rels(&mut phys_writer, package)?;

        // Write all parts and their relationships
        Self::write_parts(&mut phys_writer, package)?;

        phys_writer.finish()
    }

    /// Write the [Content_Types].xml part.
    ///
    /// This stream maps file extensions and part names to content types.
    fn write_content_types(phys_writer: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        let cti = ContentTypesItem::from_package(package);
        let blob = cti.to_xml();

        let content_types_uri = PackURI::new(CONTENT_TYPES_URI)?;
        phys_writer.write(&content_types_uri, blob.as_bytes())
    }

    /// Write package-level relationships.
    fn write_pkg_rels(phys_writer: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        let rels_uri = PackURI::new("/_rels/.rels")?;
        let rels_xml = package.rels().to_xml();
        phys_writer.write(&rels_uri, rels_xml.as_bytes())
    }

    /// Write all parts and their relationships.
    fn write_parts(phys_writer: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        for part in package.iter_parts() {
            phys_writer.write(part.partname(), part.blob())?;

            if !part.rels().is_empty() {
                let rels_uri = part.partname().rels_uri()?;
                let rels_xml = part.rels().to_xml();
                phys_writer.write(&rels_uri, rels_xml.as_bytes())?;
            }
        }

        Ok(())
    }
}

/// Helper for building [Content_Types].xml content.
///
/// Manages Default and Override elements for content type mapping.
struct ContentTypesItem {
    /// Default content types by extension
    defaults: BTreeMap<String, String>,

    /// Override content types by partname
    overrides: BTreeMap<String, String>,
}

impl ContentTypesItem {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();

        // Standard defaults present in every package
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());

        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    /// Build ContentTypesItem from an OPC package.
    fn from_package(package: &OpcPackage) -> Self {
        let mut cti = Self::new();

        for part in package.iter_parts() {
            // Every produced part is XML, so anything beyond the standard
            // defaults is an override keyed by partname
            if part.partname().ext() != "xml" || part.content_type() != ct::XML {
                cti.overrides.insert(
                    part.partname().to_string(),
                    part.content_type().to_string(),
                );
            }
        }

        cti
    }

    /// Generate the XML for [Content_Types].xml.
    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );
        xml.push('\n');

        for (ext, content_type) in &self.defaults {
            xml.push_str(&format!(
                r#"  <Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            ));
            xml.push('\n');
        }

        for (partname, content_type) in &self.overrides {
            xml.push_str(&format!(
                r#"  <Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(content_type)
            ));
            xml.push('\n');
        }

        xml.push_str("</Types>");

        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;
    use std::io::{Cursor, Read};

    #[test]
    fn test_content_types_xml() {
        let mut pkg = OpcPackage::new();
        pkg.add_part("/word/document.xml", ct::WML_DOCUMENT_MAIN, b"<w/>".to_vec())
            .unwrap();

        let cti = ContentTypesItem::from_package(&pkg);
        let xml = cti.to_xml();

        assert!(xml.contains(r#"<Default Extension="rels""#));
        assert!(xml.contains(r#"<Override PartName="/word/document.xml""#));
    }

    #[test]
    fn test_round_trip_package() {
        let mut pkg = OpcPackage::new();
        pkg.relate_to(rt::OFFICE_DOCUMENT, "/word/document.xml")
            .unwrap();
        let part = pkg
            .add_part("/word/document.xml", ct::WML_DOCUMENT_MAIN, b"<w/>".to_vec())
            .unwrap();
        let styles = PackURI::new("/word/styles.xml").unwrap();
        part.rels_mut().add(rt::STYLES, &styles);
        pkg.add_part("/word/styles.xml", ct::WML_STYLES, b"<s/>".to_vec())
            .unwrap();

        let bytes = PackageWriter::to_bytes(&pkg).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "word/_rels/document.xml.rels",
                "word/document.xml",
                "word/styles.xml",
            ]
        );

        let mut rels = String::new();
        archive
            .by_name("word/_rels/document.xml.rels")
            .unwrap()
            .read_to_string(&mut rels)
            .unwrap();
        assert!(rels.contains(r#"Target="styles.xml""#));
    }
}
