//! The in-memory OPC package being assembled.
//!
//! An [`OpcPackage`] collects parts and package-level relationships; the
//! [`super::pkgwriter::PackageWriter`] serializes the whole thing to a ZIP
//! archive. Parts keep their insertion order, so produced archives are
//! deterministic.

use crate::common::error::Result;

use super::packuri::{PACKAGE_URI, PackURI};
use super::part::Part;
use super::rel::Relationships;

/// An OPC package under construction.
#[derive(Debug)]
pub struct OpcPackage {
    /// All parts, in insertion order
    parts: Vec<Part>,

    /// Package-level relationships (serialized as /_rels/.rels)
    rels: Relationships,
}

impl OpcPackage {
    /// Create a new empty package.
    pub fn new() -> Self {
        Self {
            parts: Vec::new(),
            rels: Relationships::new(PACKAGE_URI),
        }
    }

    /// Add a part and return a handle for attaching relationships to it.
    ///
    /// # Arguments
    /// * `partname` - Absolute partname (e.g. "/word/document.xml")
    /// * `content_type` - Content type URI
    /// * `blob` - Serialized part content
    pub fn add_part(
        &mut self,
        partname: &str,
        content_type: &str,
        blob: Vec<u8>,
    ) -> Result<&mut Part> {
        let uri = PackURI::new(partname)?;
        self.parts.push(Part::new(uri, content_type, blob));
        // Just pushed, so the vector is non-empty
        Ok(self.parts.last_mut().unwrap())
    }

    /// Relate the package itself to a part (e.g. the main document part).
    ///
    /// Returns the assigned rId.
    pub fn relate_to(&mut self, reltype: &str, partname: &str) -> Result<String> {
        let uri = PackURI::new(partname)?;
        Ok(self.rels.add(reltype, &uri))
    }

    /// Get the package-level relationships.
    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Get an iterator over all parts.
    #[inline]
    pub fn iter_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};

    #[test]
    fn test_assembles_parts_in_order() {
        let mut pkg = OpcPackage::new();
        pkg.add_part("/word/document.xml", ct::WML_DOCUMENT_MAIN, b"<doc/>".to_vec())
            .unwrap();
        pkg.add_part("/word/styles.xml", ct::WML_STYLES, b"<styles/>".to_vec())
            .unwrap();
        pkg.relate_to(rt::OFFICE_DOCUMENT, "/word/document.xml")
            .unwrap();

        let names: Vec<_> = pkg.iter_parts().map(|p| p.partname().to_string()).collect();
        assert_eq!(names, vec!["/word/document.xml", "/word/styles.xml"]);
        assert_eq!(pkg.rels().len(), 1);
    }
}
