//! Spreadsheet encoder.
//!
//! Accepts either a list of objects (one worksheet row per object, columns
//! from the key union) or an object of lists (one column per key, aligned
//! by position, ragged columns padded with empty cells). The projection is
//! handed to the SpreadsheetML writer for the actual package.

use serde_json::Value;

use crate::common::error::{Error, Result};
use crate::ooxml::xlsx::{Cell, write_workbook};

use super::{Encoder, key_union};

/// Encoder for `.xlsx` output.
pub struct XlsxEncoder;

impl Encoder for XlsxEncoder {
    fn encode(&self, data: &Value) -> Result<Vec<u8>> {
        let (header, rows) = match data {
            Value::Array(items) => rows_from_objects(items)?,
            Value::Object(columns) => rows_from_columns(columns)?,
            _ => {
                return Err(Error::InvalidContentShape(
                    "data must be a list of objects or object of lists for spreadsheet generation"
                        .to_string(),
                ));
            },
        };
        write_workbook(&header, &rows)
    }
}

/// List-of-objects orientation: one row per object.
fn rows_from_objects(items: &[Value]) -> Result<(Vec<String>, Vec<Vec<Cell>>)> {
    for item in items {
        if !item.is_object() {
            return Err(Error::InvalidContentShape(
                "spreadsheet row sets require every entry to be an object".to_string(),
            ));
        }
    }

    let header = key_union(items);
    let rows = items
        .iter()
        .map(|item| {
            let Value::Object(fields) = item else {
                unreachable!("validated above");
            };
            header
                .iter()
                .map(|column| cell_for(fields.get(column)))
                .collect()
        })
        .collect();

    Ok((header, rows))
}

/// Object-of-lists orientation: one column per key, aligned by position.
fn rows_from_columns(
    columns: &serde_json::Map<String, Value>,
) -> Result<(Vec<String>, Vec<Vec<Cell>>)> {
    let mut header = Vec::with_capacity(columns.len());
    let mut column_data: Vec<&Vec<Value>> = Vec::with_capacity(columns.len());
    for (key, value) in columns {
        let Value::Array(entries) = value else {
            return Err(Error::InvalidContentShape(format!(
                "column '{key}' must be a list for spreadsheet generation"
            )));
        };
        header.push(key.clone());
        column_data.push(entries);
    }

    let row_count = column_data.iter().map(|c| c.len()).max().unwrap_or(0);
    let rows = (0..row_count)
        .map(|row_index| {
            column_data
                .iter()
                .map(|column| cell_for(column.get(row_index)))
                .collect()
        })
        .collect();

    Ok((header, rows))
}

fn cell_for(value: Option<&Value>) -> Cell {
    match value {
        None | Some(Value::Null) => Cell::Empty,
        Some(Value::Number(number)) => match number.as_f64() {
            Some(float) => Cell::Number(float),
            None => Cell::Text(number.to_string()),
        },
        Some(Value::String(text)) => Cell::Text(text.clone()),
        Some(other) => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn sheet_of(bytes: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        let mut out = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_list_of_objects_orientation() {
        let data: Value = serde_json::from_str(
            r#"[{"name": "ada", "score": 9.5}, {"name": "bob", "score": 7}]"#,
        )
        .unwrap();
        let sheet = sheet_of(&XlsxEncoder.encode(&data).unwrap());
        assert!(sheet.contains(">name</t>"));
        assert!(sheet.contains(">ada</t>"));
        assert!(sheet.contains("<v>9.5</v>"));
        assert_eq!(sheet.matches("<row ").count(), 3);
    }

    #[test]
    fn test_object_of_lists_orientation() {
        let data: Value =
            serde_json::from_str(r#"{"x": [1, 2, 3], "label": ["a", "b"]}"#).unwrap();
        let sheet = sheet_of(&XlsxEncoder.encode(&data).unwrap());
        // Three data rows plus the header; the short column is padded
        assert_eq!(sheet.matches("<row ").count(), 4);
        assert!(sheet.contains(">label</t>"));
        assert!(sheet.contains("<v>3.0</v>"));
    }

    #[test]
    fn test_mixed_object_rejected() {
        let data: Value = serde_json::from_str(r#"{"x": [1], "y": 2}"#).unwrap();
        assert!(matches!(
            XlsxEncoder.encode(&data),
            Err(Error::InvalidContentShape(_))
        ));
    }

    #[test]
    fn test_scalar_list_rejected() {
        let data: Value = serde_json::from_str("[1, 2]").unwrap();
        assert!(matches!(
            XlsxEncoder.encode(&data),
            Err(Error::InvalidContentShape(_))
        ));
    }
}
