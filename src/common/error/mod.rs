//! Unified error types for the Pitaya library.
//!
//! This module provides a unified error type that encompasses failures from
//! every builder (flow documents, data encoders, slide decks), presenting a
//! consistent API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
