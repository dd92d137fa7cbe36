//! Part objects for produced OPC packages.
//!
//! A part is one member of the package: a partname, a content type, a binary
//! blob, and the part's own relationships.

use super::packuri::PackURI;
use super::rel::Relationships;

/// A single part in an OPC package.
#[derive(Debug)]
pub struct Part {
    /// The partname (e.g., "/ppt/slides/slide1.xml")
    partname: PackURI,

    /// Content type URI for this part
    content_type: String,

    /// The part's serialized content
    blob: Vec<u8>,

    /// Relationships from this part to others
    rels: Relationships,
}

impl Part {
    /// Create a new part.
    ///
    /// # Arguments
    /// * `partname` - The partname URI
    /// * `content_type` - Content type URI for the part
    /// * `blob` - Serialized content
    pub fn new(partname: PackURI, content_type: &str, blob: Vec<u8>) -> Self {
        let rels = Relationships::new(partname.base_uri());
        Self {
            partname,
            content_type: content_type.to_string(),
            blob,
            rels,
        }
    }

    /// Get the partname.
    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    /// Get the content type.
    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Get the part's content.
    #[inline]
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    /// Get the part's relationships.
    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Get the part's relationships mutably.
    #[inline]
    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }
}
