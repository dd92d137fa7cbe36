//! Format dispatch and workspace handling.
//!
//! The [`Engine`] owns the workspace directory and the mapping from a
//! requested format to the builder that produces it. Builders are leaves;
//! this module is the only place that composes them.
//!
//! Calls are stateless aside from filesystem writes, so concurrent calls
//! targeting distinct filenames need no coordination. Two concurrent calls
//! targeting the *same* filename race last-write-wins; the atomic
//! temp-file-then-rename discipline below guarantees readers never observe
//! a partially-written file, but does not serialize the writers.

use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::common::error::{Error, Result};
use crate::data::encode_data;
use crate::markup::classify_lines;
use crate::model::{FormatTag, SlideSpec};
use crate::ooxml::docx::write_document;
use crate::ooxml::pptx::write_presentation;
use crate::pdf::render_document;

/// Default workspace directory, relative to the process working directory.
const DEFAULT_WORKSPACE: &str = "workspace";

/// A successfully generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Where the file was written
    pub path: PathBuf,
    /// Human-readable success message naming the output
    pub message: String,
}

/// The document-generation engine.
///
/// Cheap to construct; the workspace directory is created on first use.
#[derive(Debug, Clone)]
pub struct Engine {
    workspace: PathBuf,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(DEFAULT_WORKSPACE)
    }
}

impl Engine {
    /// Create an engine writing under the given workspace root.
    pub fn new<P: Into<PathBuf>>(workspace: P) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }

    /// The workspace root all output paths resolve under.
    #[inline]
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Generate a flow document or data file.
    ///
    /// `format`, when given, must be one of `pdf`, `docx`, `json`, `yaml`,
    /// `xml`, `csv`, `xlsx`; otherwise the format is inferred from the
    /// filename extension. Exactly one file is written on success; nothing
    /// is written on failure.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use pitaya::Engine;
    ///
    /// let engine = Engine::default();
    /// let result = engine.generate_file(r#"[{"a": 1}]"#, "data.json", None)?;
    /// println!("{}", result.message);
    /// # Ok::<(), pitaya::Error>(())
    /// ```
    pub fn generate_file(
        &self,
        content: &str,
        filename: &str,
        format: Option<&str>,
    ) -> Result<Generated> {
        let tag = resolve_format(filename, format)?;
        debug!(filename, format = tag.as_str(), "generating file");

        let bytes = match tag {
            FormatTag::Pdf => render_document(content, filename)?,
            FormatTag::Docx => write_document(&classify_lines(content))?,
            FormatTag::Json
            | FormatTag::Yaml
            | FormatTag::Xml
            | FormatTag::Csv
            | FormatTag::Xlsx => encode_data(content, tag)?,
            FormatTag::Pptx => {
                return Err(Error::UnsupportedFormat(
                    "presentations are created via create_presentation".to_string(),
                ));
            },
        };

        let path = self.write_output(filename, &bytes)?;
        let message = match tag {
            FormatTag::Pdf => format!("PDF document generated successfully: {}", path.display()),
            FormatTag::Docx => {
                format!("DOCX document generated successfully: {}", path.display())
            },
            other => format!(
                "{} file generated successfully: {}",
                other.as_str().to_uppercase(),
                path.display()
            ),
        };
        Ok(Generated { path, message })
    }

    /// Create a presentation from an ordered list of slide specs.
    ///
    /// The filename must end in `.pptx`. Exactly one file is written on
    /// success; nothing is written on failure.
    pub fn create_presentation(
        &self,
        filename: &str,
        slides: &[SlideSpec],
    ) -> Result<Generated> {
        if !filename.ends_with(".pptx") {
            return Err(Error::InvalidFilename(
                "filename must end with .pptx".to_string(),
            ));
        }
        debug!(filename, slides = slides.len(), "creating presentation");

        let bytes = write_presentation(slides)?;
        let path = self.write_output(filename, &bytes)?;
        let message = format!("Presentation successfully created at {}", path.display());
        Ok(Generated { path, message })
    }

    /// Resolve and validate the output path, then write atomically.
    ///
    /// The bytes land in a temporary file inside the workspace and are
    /// renamed into place, so a failed render never leaves a partial file
    /// visible.
    fn write_output(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let relative = validated_relative_path(filename)?;
        let path = self.workspace.join(relative);

        let parent = path.parent().unwrap_or(&self.workspace);
        std::fs::create_dir_all(parent)?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        tmp.persist(&path)
            .map_err(|e| Error::Io(e.error))?;

        Ok(path)
    }
}

/// Resolve the format tag from an explicit token or the filename extension.
fn resolve_format(filename: &str, format: Option<&str>) -> Result<FormatTag> {
    match format {
        Some(token) => FormatTag::from_name(token)
            .ok_or_else(|| Error::UnsupportedFormat(token.to_string())),
        None => FormatTag::from_filename(filename).ok_or_else(|| {
            Error::UnsupportedFormat(format!(
                "could not infer supported format from filename '{filename}'"
            ))
        }),
    }
}

/// Validate a user-supplied filename as a workspace-relative path.
///
/// Absolute paths and `..` components are rejected so output can never
/// escape the workspace.
fn validated_relative_path(filename: &str) -> Result<&Path> {
    if filename.is_empty() {
        return Err(Error::InvalidFilename("filename is empty".to_string()));
    }

    let path = Path::new(filename);
    if path.is_absolute() {
        return Err(Error::InvalidFilename(format!(
            "'{filename}' is an absolute path"
        )));
    }
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {},
            _ => {
                return Err(Error::InvalidFilename(format!(
                    "'{filename}' would escape the workspace"
                )));
            },
        }
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LayoutKind;

    fn engine() -> (tempfile::TempDir, Engine) {
        let dir = tempfile::tempdir().unwrap();
        let engine = Engine::new(dir.path().join("workspace"));
        (dir, engine)
    }

    #[test]
    fn test_generate_json_by_extension() {
        let (_dir, engine) = engine();
        let result = engine
            .generate_file(r#"[{"a": 1}]"#, "out.json", None)
            .unwrap();
        assert!(result.message.contains("JSON file generated successfully"));
        let written = std::fs::read_to_string(&result.path).unwrap();
        assert!(written.contains("\"a\": 1"));
    }

    #[test]
    fn test_yml_infers_yaml() {
        let (_dir, engine) = engine();
        let result = engine
            .generate_file(r#"{"a": 1}"#, "report.yml", None)
            .unwrap();
        assert!(result.message.contains("YAML file generated successfully"));
        assert!(std::fs::read_to_string(&result.path)
            .unwrap()
            .contains("a: 1"));
    }

    #[test]
    fn test_explicit_format_overrides_extension() {
        let (_dir, engine) = engine();
        let result = engine
            .generate_file(r#"{"a": 1}"#, "data.bin", Some("json"))
            .unwrap();
        assert!(result.path.ends_with("data.bin"));
    }

    #[test]
    fn test_unknown_extension_fails() {
        let (_dir, engine) = engine();
        let err = engine
            .generate_file("x", "notes.txt", None)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_unknown_token_fails() {
        let (_dir, engine) = engine();
        let err = engine
            .generate_file("x", "notes.txt", Some("epub"))
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_pptx_not_reachable_via_generate() {
        let (_dir, engine) = engine();
        let err = engine
            .generate_file("x", "deck.pptx", None)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_traversal_rejected_and_nothing_written() {
        let (_dir, engine) = engine();
        let err = engine
            .generate_file(r#"{"a": 1}"#, "../escape.json", None)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFilename(_)));
        assert!(!engine.workspace().exists() || std::fs::read_dir(engine.workspace()).unwrap().next().is_none());
    }

    #[test]
    fn test_failure_writes_nothing() {
        let (_dir, engine) = engine();
        let err = engine
            .generate_file("not json at all", "data.csv", None)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidContentShape(_)));
        let entries: Vec<_> = match std::fs::read_dir(engine.workspace()) {
            Ok(iter) => iter.collect(),
            Err(_) => Vec::new(),
        };
        assert!(entries.is_empty());
    }

    #[test]
    fn test_docx_flow_document() {
        let (_dir, engine) = engine();
        let result = engine
            .generate_file("# Title\n- item1\n- item2\nplain", "doc.docx", None)
            .unwrap();
        assert!(result.message.contains("DOCX document generated successfully"));
        let bytes = std::fs::read(&result.path).unwrap();
        // ZIP local file header
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_pdf_flow_document() {
        let (_dir, engine) = engine();
        let result = engine
            .generate_file("# Title\n\nBody text.", "doc.pdf", None)
            .unwrap();
        let bytes = std::fs::read(&result.path).unwrap();
        assert_eq!(&bytes[0..4], b"%PDF");
    }

    #[test]
    fn test_create_presentation_requires_pptx_suffix() {
        let (_dir, engine) = engine();
        let err = engine
            .create_presentation("deck.ppt", &[])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFilename(_)));
    }

    #[test]
    fn test_create_presentation_with_fallback_layout() {
        let (_dir, engine) = engine();
        // An out-of-catalog layout name falls back to TitleAndContent
        let slide: SlideSpec =
            serde_json::from_str(r#"{"title": "T", "layout": "holographic"}"#).unwrap();
        assert_eq!(slide.layout, LayoutKind::TitleAndContent);

        let result = engine.create_presentation("deck.pptx", &[slide]).unwrap();
        assert!(result.message.contains("Presentation successfully created at"));
        assert!(result.path.exists());
    }

    #[test]
    fn test_nested_output_path() {
        let (_dir, engine) = engine();
        let result = engine
            .generate_file(r#"{"a": 1}"#, "reports/q3/data.json", None)
            .unwrap();
        assert!(result.path.ends_with("reports/q3/data.json"));
        assert!(result.path.exists());
    }
}
