//! Relationship-related objects for OPC packages.
//!
//! This module provides types for managing relationships between parts in a
//! produced OPC package. Relationships are created in order and keep stable
//! sequential IDs, so the serialized .rels files are deterministic.

use super::packuri::PackURI;

/// A single relationship from a source (part or package) to a target part.
///
/// Identified by an rId (relationship ID) unique within its source.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference, relative to the source's base directory
    target_ref: String,
}

impl Relationship {
    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }
}

/// Collection of relationships from a single source.
///
/// Keeps insertion order so rIds are assigned sequentially and the
/// serialized XML is stable across runs.
#[derive(Debug, Default)]
pub struct Relationships {
    /// Base URI of the source, used to relativize targets
    base_uri: String,

    /// Relationships in creation order
    rels: Vec<Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    ///
    /// # Arguments
    /// * `base_uri` - Base URI of the source part (or "/" for the package)
    pub fn new<S: Into<String>>(base_uri: S) -> Self {
        Self {
            base_uri: base_uri.into(),
            rels: Vec::new(),
        }
    }

    /// Add a relationship to a target part and return its rId.
    ///
    /// The target partname is relativized against the source's base URI,
    /// the form .rels files require.
    pub fn add(&mut self, reltype: &str, target: &PackURI) -> String {
        let r_id = format!("rId{}", self.rels.len() + 1);
        self.rels.push(Relationship {
            r_id: r_id.clone(),
            reltype: reltype.to_string(),
            target_ref: target.relative_ref(&self.base_uri),
        });
        r_id
    }

    /// Get an iterator over all relationships.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Get the number of relationships in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check if the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize relationships to XML format.
    ///
    /// Generates the XML for a .rels file in creation order.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(1024);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        xml.push('\n');

        for rel in &self.rels {
            xml.push_str(&format!(
                r#"  <Relationship Id="{}" Type="{}" Target="{}"/>"#,
                escape_xml(&rel.r_id),
                escape_xml(&rel.reltype),
                escape_xml(&rel.target_ref),
            ));
            xml.push('\n');
        }

        xml.push_str("</Relationships>");

        xml
    }
}

/// Escape XML special characters.
#[inline]
pub(crate) fn escape_xml(s: &str) -> String {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return s.to_string();
    }
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;

    #[test]
    fn test_sequential_r_ids() {
        let mut rels = Relationships::new("/ppt");
        let slide = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        let master = PackURI::new("/ppt/slideMasters/slideMaster1.xml").unwrap();
        assert_eq!(rels.add(rt::SLIDE_MASTER, &master), "rId1");
        assert_eq!(rels.add(rt::SLIDE, &slide), "rId2");
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_to_xml_relativizes_targets() {
        let mut rels = Relationships::new("/ppt/slides");
        let layout = PackURI::new("/ppt/slideLayouts/slideLayout1.xml").unwrap();
        rels.add(rt::SLIDE_LAYOUT, &layout);

        let xml = rels.to_xml();
        assert!(xml.contains(r#"Target="../slideLayouts/slideLayout1.xml""#));
        assert!(xml.contains(r#"Id="rId1""#));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml(r#"<foo & "bar">"#),
            "&lt;foo &amp; &quot;bar&quot;&gt;"
        );
        assert_eq!(escape_xml("plain"), "plain");
    }
}
