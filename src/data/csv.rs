//! CSV encoder.
//!
//! Requires a list of objects. The column set is the union of keys across
//! rows in first-seen order; missing fields render as empty cells. Fields
//! containing separators, quotes, or line breaks are quoted with doubled
//! inner quotes.

use serde_json::Value;

use crate::common::error::{Error, Result};

use super::{Encoder, key_union};

/// Encoder for `.csv` output.
pub struct CsvEncoder;

impl Encoder for CsvEncoder {
    fn encode(&self, data: &Value) -> Result<Vec<u8>> {
        let Value::Array(rows) = data else {
            return Err(Error::InvalidContentShape(
                "data must be a list of objects for CSV generation".to_string(),
            ));
        };
        for row in rows {
            if !row.is_object() {
                return Err(Error::InvalidContentShape(
                    "data must be a list of objects for CSV generation".to_string(),
                ));
            }
        }

        let columns = key_union(rows);
        let mut out = String::new();

        let header: Vec<String> = columns.iter().map(|c| quote_field(c)).collect();
        out.push_str(&header.join(","));
        out.push('\n');

        for row in rows {
            let Value::Object(fields) = row else {
                unreachable!("validated above");
            };
            let cells: Vec<String> = columns
                .iter()
                .map(|column| quote_field(&field_text(fields.get(column))))
                .collect();
            out.push_str(&cells.join(","));
            out.push('\n');
        }

        Ok(out.into_bytes())
    }
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_columns_in_first_seen_order() {
        let data: Value = serde_json::from_str(
            r#"[{"name": "ada", "score": 9}, {"name": "bob", "rank": 1}]"#,
        )
        .unwrap();
        let text = String::from_utf8(CsvEncoder.encode(&data).unwrap()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("name,score,rank"));
        assert_eq!(lines.next(), Some("ada,9,"));
        assert_eq!(lines.next(), Some("bob,,1"));
    }

    #[test]
    fn test_quoting() {
        let data: Value =
            serde_json::from_str(r#"[{"a": "x,y", "b": "say \"hi\""}]"#).unwrap();
        let text = String::from_utf8(CsvEncoder.encode(&data).unwrap()).unwrap();
        assert!(text.contains(r#""x,y""#));
        assert!(text.contains(r#""say ""hi""""#));
    }

    #[test]
    fn test_non_list_rejected() {
        let data: Value = serde_json::from_str(r#"{"a": 1}"#).unwrap();
        assert!(matches!(
            CsvEncoder.encode(&data),
            Err(Error::InvalidContentShape(_))
        ));
    }

    #[test]
    fn test_list_of_scalars_rejected() {
        let data: Value = serde_json::from_str("[1, 2]").unwrap();
        assert!(matches!(
            CsvEncoder.encode(&data),
            Err(Error::InvalidContentShape(_))
        ));
    }
}
