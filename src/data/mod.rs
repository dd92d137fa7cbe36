//! Data-interchange encoders.
//!
//! Raw content destined for a data format must parse as well-formed
//! structured data (a JSON object or array); each target format then gets
//! its own [`Encoder`] implementation, selected by the dispatcher. Adding a
//! format means adding an encoder, not growing a conditional.

use serde_json::Value;

use crate::common::error::{Error, Result};
use crate::model::FormatTag;

mod csv;
mod json;
mod xlsx;
mod xml;
mod yaml;

pub use csv::CsvEncoder;
pub use json::JsonEncoder;
pub use xlsx::XlsxEncoder;
pub use xml::XmlEncoder;
pub use yaml::YamlEncoder;

/// Capability of serializing parsed structured data into one target format.
pub trait Encoder {
    /// Encode the data into the target format's bytes.
    fn encode(&self, data: &Value) -> Result<Vec<u8>>;
}

/// Select the encoder for a data format tag.
///
/// Returns `None` for non-data formats (flow documents, presentations).
pub fn encoder_for(tag: FormatTag) -> Option<Box<dyn Encoder>> {
    match tag {
        FormatTag::Json => Some(Box::new(JsonEncoder)),
        FormatTag::Yaml => Some(Box::new(YamlEncoder)),
        FormatTag::Xml => Some(Box::new(XmlEncoder)),
        FormatTag::Csv => Some(Box::new(CsvEncoder)),
        FormatTag::Xlsx => Some(Box::new(XlsxEncoder)),
        FormatTag::Pdf | FormatTag::Docx | FormatTag::Pptx => None,
    }
}

/// Parse raw content into structured data.
///
/// # Errors
///
/// [`Error::InvalidContentShape`] when the content is not valid JSON or is
/// a bare scalar rather than an object or array.
pub fn parse_content(content: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(content).map_err(|_| {
        Error::InvalidContentShape(
            "content must be a valid JSON string for data file generation".to_string(),
        )
    })?;

    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        _ => Err(Error::InvalidContentShape(
            "content must be a JSON object or array".to_string(),
        )),
    }
}

/// Parse content and encode it for the given data format.
pub fn encode_data(content: &str, tag: FormatTag) -> Result<Vec<u8>> {
    let encoder = encoder_for(tag).ok_or_else(|| {
        Error::UnsupportedFormat(format!("{} is not a data format", tag.as_str()))
    })?;
    let data = parse_content(content)?;
    encoder.encode(&data)
}

/// Union of object keys across rows, in first-seen order.
///
/// Shared by the encoders that project a row set onto columns.
pub(crate) fn key_union(rows: &[Value]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for row in rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if !keys.iter().any(|k| k == key) {
                    keys.push(key.clone());
                }
            }
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(matches!(
            parse_content("just some text"),
            Err(Error::InvalidContentShape(_))
        ));
    }

    #[test]
    fn test_parse_rejects_scalars() {
        assert!(matches!(
            parse_content("42"),
            Err(Error::InvalidContentShape(_))
        ));
        assert!(matches!(
            parse_content(r#""string""#),
            Err(Error::InvalidContentShape(_))
        ));
    }

    #[test]
    fn test_parse_accepts_object_and_array() {
        assert!(parse_content(r#"{"a": 1}"#).is_ok());
        assert!(parse_content(r#"[1, 2]"#).is_ok());
    }

    #[test]
    fn test_key_union_first_seen_order() {
        let rows: Vec<Value> = serde_json::from_str(
            r#"[{"b": 1, "a": 2}, {"c": 3, "a": 4}]"#,
        )
        .unwrap();
        assert_eq!(key_union(&rows), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_encoder_for_covers_data_formats() {
        assert!(encoder_for(FormatTag::Json).is_some());
        assert!(encoder_for(FormatTag::Yaml).is_some());
        assert!(encoder_for(FormatTag::Xml).is_some());
        assert!(encoder_for(FormatTag::Csv).is_some());
        assert!(encoder_for(FormatTag::Xlsx).is_some());
        assert!(encoder_for(FormatTag::Pdf).is_none());
        assert!(encoder_for(FormatTag::Pptx).is_none());
    }
}
