//! WordprocessingML (.docx) production.
//!
//! Renders classified flow blocks into a word-processing package: the main
//! document part plus the styles and numbering parts that give headings and
//! bulleted lists their conventional appearance.

mod writer;

pub use writer::write_document;
