//! Portable-document (.pdf) production.
//!
//! The PDF target runs the full Markdown expansion: the content string is
//! parsed into a styled document tree (headings, emphasis, code spans,
//! block quotes, lists, tables), a fixed stylesheet is applied, and the
//! result is laid out onto pages with the standard built-in fonts.

mod renderer;
mod stylesheet;

pub use renderer::render_document;
pub use stylesheet::Stylesheet;
