//! Open Packaging Conventions (OPC) layer.
//!
//! Every modern Office format (.docx, .xlsx, .pptx) is a ZIP archive of XML
//! parts tied together by content types and relationships. This module
//! provides the write-direction OPC machinery the format builders share:
//!
//! 1. **Partnames** ([`PackURI`]): validated package URIs with rels/relative
//!    reference derivation
//! 2. **Parts and relationships** ([`Part`], [`Relationships`]): in-memory
//!    package assembly
//! 3. **Serialization** ([`PackageWriter`], `PhysPkgWriter`): content types,
//!    .rels streams, ZIP output

pub mod constants;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::Part;
pub use pkgwriter::PackageWriter;
pub use rel::Relationships;
