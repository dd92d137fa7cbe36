//! Shared styling types used across output formats.
//!
//! This module provides the color and rich-text types consumed by the
//! presentation, word-processing, and portable-document builders, ensuring
//! one styling vocabulary across all of them.

// Submodule declarations
pub mod color;
pub mod text;

// Re-exports
pub use color::RGBColor;
pub use text::{RichTextRun, parse_inline};
