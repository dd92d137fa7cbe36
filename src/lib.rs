//! Pitaya - A Rust library for generating documents in Office, PDF, and
//! data-interchange formats
//!
//! This library renders a declarative description of content (text blocks,
//! tables, charts, shapes, or tabular records) into one of several
//! structured output formats: PowerPoint presentations (.pptx), Word
//! documents (.docx), portable documents (.pdf), Excel workbooks (.xlsx),
//! and data files (.json, .yaml, .xml, .csv).
//!
//! # Features
//!
//! - **Flow documents**: Markdown-like content to .pdf (full markup
//!   expansion with a fixed stylesheet) or .docx (headings, bullets,
//!   paragraphs)
//! - **Slide decks**: typed slide specs with rich text, charts, tables,
//!   and shapes to .pptx
//! - **Data files**: JSON-parseable payloads to .json, .yaml, .xml, .csv,
//!   or .xlsx
//! - **Self-contained output**: produced Office packages carry their own
//!   template parts; no external template files are read
//!
//! # Example - Generating a data file
//!
//! ```no_run
//! use pitaya::Engine;
//!
//! # fn main() -> Result<(), pitaya::Error> {
//! let engine = Engine::default();
//! let result = engine.generate_file(
//!     r#"[{"name": "ada", "score": 9.5}]"#,
//!     "scores.csv",
//!     None,
//! )?;
//! println!("{}", result.message);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Creating a presentation
//!
//! ```no_run
//! use pitaya::{Engine, model::SlideSpec};
//!
//! # fn main() -> Result<(), pitaya::Error> {
//! let slides: Vec<SlideSpec> = serde_json::from_str(
//!     r#"[{"title": "Q3 Review", "content": "**Revenue** up"}]"#,
//! ).map_err(pitaya::Error::from)?;
//!
//! let engine = Engine::default();
//! let result = engine.create_presentation("review.pptx", &slides)?;
//! println!("{}", result.message);
//! # Ok(())
//! # }
//! ```
//!
//! # Workspace
//!
//! All output lands under a single workspace directory (by default
//! `./workspace`, created on demand). Filenames are workspace-relative;
//! paths that would escape the workspace are rejected.

/// Common types, traits, and utilities shared across output formats.
pub mod common;

/// Data-interchange encoders (.json, .yaml, .xml, .csv, .xlsx).
pub mod data;

/// Format dispatch, workspace handling, and the public entry points.
pub mod engine;

/// Line-oriented flow-markup classification.
pub mod markup;

/// Typed content model for generation requests.
pub mod model;

/// Office Open XML package production (.docx, .xlsx, .pptx).
pub mod ooxml;

/// Portable-document production (.pdf).
pub mod pdf;

// Re-export commonly used types for convenience
pub use common::error::{Error, Result};
pub use engine::{Engine, Generated};
pub use model::{FormatTag, SlideSpec};

/// Generate a flow document or data file under the default workspace.
///
/// Convenience wrapper over [`Engine::generate_file`] with
/// [`Engine::default`].
pub fn generate_file(
    content: &str,
    filename: &str,
    format: Option<&str>,
) -> Result<Generated> {
    Engine::default().generate_file(content, filename, format)
}

/// Create a presentation under the default workspace.
///
/// Convenience wrapper over [`Engine::create_presentation`] with
/// [`Engine::default`].
pub fn create_presentation(filename: &str, slides: &[SlideSpec]) -> Result<Generated> {
    Engine::default().create_presentation(filename, slides)
}
