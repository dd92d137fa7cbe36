//! Typed content model for generation requests.
//!
//! Loosely-typed JSON payloads are validated into these closed types once at
//! the engine boundary; builders downstream never re-inspect raw JSON. This
//! module defines the output-format tag, the slide description consumed by
//! the deck builder, and the chart/table/shape specs a slide may carry.

use serde::{Deserialize, Deserializer};

// Submodule declarations
pub mod chart;

// Re-exports
pub use chart::{ChartKind, ChartSpec, ChartValue, NormalizedChart, Series};

/// Output format of a generation request.
///
/// Exactly one tag is active per request, inferred from the filename
/// extension when not supplied explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    /// Portable document (.pdf)
    Pdf,
    /// Word-processing document (.docx)
    Docx,
    /// JSON data file (.json)
    Json,
    /// YAML data file (.yaml, .yml)
    Yaml,
    /// XML data file (.xml)
    Xml,
    /// Comma-separated table (.csv)
    Csv,
    /// Spreadsheet workbook (.xlsx)
    Xlsx,
    /// Presentation package (.pptx)
    Pptx,
}

impl FormatTag {
    /// Resolve an explicit format token (e.g. `"pdf"`, `"yml"`).
    ///
    /// `yml` is treated identically to `yaml`. Matching is case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "xml" => Some(Self::Xml),
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            "pptx" => Some(Self::Pptx),
            _ => None,
        }
    }

    /// Infer the format from a filename's extension.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pitaya::model::FormatTag;
    ///
    /// assert_eq!(FormatTag::from_filename("report.yml"), Some(FormatTag::Yaml));
    /// assert_eq!(FormatTag::from_filename("report.txt"), None);
    /// ```
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = filename.rsplit_once('.')?.1;
        Self::from_name(ext)
    }

    /// Canonical lower-case token for this format.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Xml => "xml",
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Pptx => "pptx",
        }
    }
}

/// Slide layout selection.
///
/// Mirrors the conventional layout catalog of a default presentation
/// template. Unknown layout names fall back to [`LayoutKind::TitleAndContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutKind {
    /// Centered title with subtitle
    TitleSlide,
    /// Title with a single body placeholder
    #[default]
    TitleAndContent,
    /// Title with two side-by-side body placeholders
    TwoContent,
    /// Two content areas with per-area headings
    Comparison,
    /// Title only, no body
    TitleOnly,
    /// Empty slide
    Blank,
    /// Picture area with caption text
    PictureWithCaption,
}

impl LayoutKind {
    /// Resolve a layout name, falling back to `TitleAndContent` for
    /// anything unrecognized.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "title_slide" => Self::TitleSlide,
            "title_and_content" => Self::TitleAndContent,
            "two_content" => Self::TwoContent,
            "comparison" => Self::Comparison,
            "title_only" => Self::TitleOnly,
            "blank" => Self::Blank,
            "picture_with_caption" => Self::PictureWithCaption,
            _ => Self::TitleAndContent,
        }
    }

    /// Index of this layout in the template catalog.
    ///
    /// The catalog follows the conventional default-template ordering, so
    /// the indices are sparse.
    #[inline]
    pub fn template_index(&self) -> usize {
        match self {
            Self::TitleSlide => 0,
            Self::TitleAndContent => 1,
            Self::TwoContent => 3,
            Self::Comparison => 4,
            Self::TitleOnly => 5,
            Self::Blank => 6,
            Self::PictureWithCaption => 8,
        }
    }
}

impl<'de> Deserialize<'de> for LayoutKind {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// Description of one slide in a presentation request.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SlideSpec {
    /// Slide title text
    #[serde(default)]
    pub title: String,

    /// Layout template for this slide
    #[serde(default)]
    pub layout: LayoutKind,

    /// Body text; supports `**bold**`, `*italic*`, `__underline__` inline
    /// markup, one paragraph per line, two-space indent for one demotion
    /// level
    #[serde(default)]
    pub content: Option<String>,

    /// Font family for body runs
    #[serde(default)]
    pub font_name: Option<String>,

    /// Font size for body runs, in points
    #[serde(default)]
    pub font_size: Option<u32>,

    /// Font color for body runs, strict 6-hex-digit string
    #[serde(default)]
    pub font_color: Option<String>,

    /// Slide background fill, strict 6-hex-digit string
    #[serde(default)]
    pub background_color: Option<String>,

    /// Charts placed on the slide, in order
    #[serde(default)]
    pub charts: Vec<ChartSpec>,

    /// Tables placed on the slide, in order
    #[serde(default)]
    pub tables: Vec<TableSpec>,

    /// Decorative shapes placed on the slide, in order
    #[serde(default)]
    pub shapes: Vec<ShapeSpec>,
}

/// Description of a table on a slide.
///
/// The rendered grid is always exactly `rows x cols`: supplied data beyond
/// the declared dimensions is discarded, declared cells beyond the supplied
/// data are blank.
#[derive(Debug, Clone, Deserialize)]
pub struct TableSpec {
    /// Declared row count
    #[serde(default = "default_table_dim")]
    pub rows: usize,

    /// Declared column count
    #[serde(default = "default_table_dim")]
    pub cols: usize,

    /// Cell text by row; may be ragged
    #[serde(default)]
    pub data: Vec<Vec<String>>,
}

fn default_table_dim() -> usize {
    2
}

impl TableSpec {
    /// Project the (possibly ragged) data onto the declared grid.
    ///
    /// Never fails: missing cells render as empty strings, excess cells are
    /// clipped.
    pub fn grid(&self) -> Vec<Vec<String>> {
        (0..self.rows)
            .map(|r| {
                (0..self.cols)
                    .map(|c| {
                        self.data
                            .get(r)
                            .and_then(|row| row.get(c))
                            .cloned()
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect()
    }
}

/// Kind of decorative vector shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Rectangle
    #[default]
    Rectangle,
    /// Circle (preset ellipse geometry)
    Circle,
    /// Right-pointing block arrow
    Arrow,
    /// Isosceles triangle
    Triangle,
}

impl ShapeKind {
    /// DrawingML preset geometry name for this shape.
    #[inline]
    pub fn preset(&self) -> &'static str {
        match self {
            Self::Rectangle => "rect",
            Self::Circle => "ellipse",
            Self::Arrow => "rightArrow",
            Self::Triangle => "triangle",
        }
    }
}

/// Description of a decorative shape on a slide.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ShapeSpec {
    /// Shape geometry
    #[serde(rename = "type", default)]
    pub kind: ShapeKind,

    /// Optional text inside the shape
    #[serde(default)]
    pub text: Option<String>,

    /// Fill color, strict 6-hex-digit string; invalid strings are ignored
    #[serde(default)]
    pub color: Option<String>,
}
