//! Unified error type for Pitaya operations.
//!
//! One enum covers format resolution, content validation, and encoder
//! failures, so callers only ever match on a single error surface.
use thiserror::Error;

/// Main error type for Pitaya operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unrecognized format token or filename extension
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Output filename is unusable (empty, escapes the workspace, or lacks
    /// a mandatory extension)
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    /// Payload does not parse as structured data, or has the wrong shape
    /// for the target format
    #[error("Invalid content shape: {0}")]
    InvalidContentShape(String),

    /// Chart data mixes scalar and sequence values, or sequences disagree
    /// in length
    #[error("Invalid chart shape: {0}")]
    InvalidChartShape(String),

    /// An underlying encoder failed irrecoverably
    #[error("Render error: {0}")]
    RenderError(String),

    /// XML serialization error
    #[error("XML error: {0}")]
    XmlError(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),
}

/// Result type for Pitaya operations.
pub type Result<T> = std::result::Result<T, Error>;
