//! JSON encoder: pretty-printed structural dump, 2-space indentation.

use serde_json::Value;

use crate::common::error::Result;

use super::Encoder;

/// Encoder for `.json` output.
pub struct JsonEncoder;

impl Encoder for JsonEncoder {
    fn encode(&self, data: &Value) -> Result<Vec<u8>> {
        // serde_json's pretty printer indents with two spaces
        Ok(serde_json::to_vec_pretty(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_key_order() {
        let original = r#"[{"z": 1, "a": "x"}, {"z": 2, "a": "y"}]"#;
        let data: Value = serde_json::from_str(original).unwrap();

        let encoded = JsonEncoder.encode(&data).unwrap();
        let parsed: Value = serde_json::from_slice(&encoded).unwrap();
        assert_eq!(parsed, data);

        let text = String::from_utf8(encoded).unwrap();
        assert!(text.contains("  \"z\""));
        assert!(text.find("\"z\"").unwrap() < text.find("\"a\"").unwrap());
    }
}
