//! Provides the PackURI value type and utilities for working with package URIs.
//!
//! A PackURI represents a part name within an OPC package, following the URI
//! format defined by the Open Packaging Conventions specification.

use crate::common::error::{Error, Result};

/// The pseudo-partname of the package itself.
pub const PACKAGE_URI: &str = "/";

/// Partname of the content types stream.
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";

/// Represents a package URI, which is a partname within an OPC package.
///
/// PackURIs always begin with a forward slash and use forward slashes as
/// path separators, following the OPC specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackURI {
    /// The full pack URI string (e.g., "/word/document.xml")
    uri: String,
}

impl PackURI {
    /// Create a new PackURI from a string.
    ///
    /// # Arguments
    /// * `uri` - The URI string, which must begin with a forward slash
    pub fn new<S: Into<String>>(uri: S) -> Result<Self> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(Error::XmlError(format!(
                "PackURI must begin with slash, got '{uri}'"
            )));
        }
        Ok(PackURI { uri })
    }

    /// Get the base URI (directory portion) of this PackURI.
    ///
    /// For example, "/ppt/slides" for "/ppt/slides/slide1.xml".
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// Get the filename portion of this PackURI.
    ///
    /// For example, "slide1.xml" for "/ppt/slides/slide1.xml".
    pub fn filename(&self) -> &str {
        match self.uri.rfind('/') {
            Some(pos) => &self.uri[pos + 1..],
            None => "",
        }
    }

    /// Get the extension portion of this PackURI, without the leading period.
    pub fn ext(&self) -> &str {
        match self.filename().rfind('.') {
            Some(pos) => &self.filename()[pos + 1..],
            None => "",
        }
    }

    /// Get the ZIP member name for this partname (no leading slash).
    #[inline]
    pub fn membername(&self) -> &str {
        self.uri.trim_start_matches('/')
    }

    /// Get the partname of the .rels file that holds this part's
    /// relationships.
    ///
    /// For "/ppt/presentation.xml" this is
    /// "/ppt/_rels/presentation.xml.rels"; for the package itself it is
    /// "/_rels/.rels".
    pub fn rels_uri(&self) -> Result<PackURI> {
        if self.uri == PACKAGE_URI {
            return PackURI::new("/_rels/.rels");
        }
        PackURI::new(format!("{}/_rels/{}.rels", self.base_uri(), self.filename()))
    }

    /// Express this partname relative to another part's base directory,
    /// the form relationship targets take inside .rels files.
    ///
    /// For "/ppt/slideLayouts/slideLayout1.xml" relative to "/ppt/slides"
    /// this is "../slideLayouts/slideLayout1.xml".
    pub fn relative_ref(&self, base_uri: &str) -> String {
        if base_uri == "/" {
            return self.membername().to_string();
        }

        let base: Vec<&str> = base_uri.trim_matches('/').split('/').collect();
        let target: Vec<&str> = self.uri.trim_start_matches('/').split('/').collect();

        // Count shared leading directories (everything but the filename)
        let mut common = 0;
        while common < base.len()
            && common + 1 < target.len()
            && base[common] == target[common]
        {
            common += 1;
        }

        let mut parts: Vec<String> = Vec::new();
        for _ in common..base.len() {
            parts.push("..".to_string());
        }
        for segment in &target[common..] {
            parts.push((*segment).to_string());
        }
        parts.join("/")
    }
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}
