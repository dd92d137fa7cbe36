//! YAML encoder: block-style dump, no flow collections.

use serde_json::Value;

use crate::common::error::Result;

use super::Encoder;

/// Encoder for `.yaml` / `.yml` output.
pub struct YamlEncoder;

impl Encoder for YamlEncoder {
    fn encode(&self, data: &Value) -> Result<Vec<u8>> {
        // serde_yaml always emits block-style mappings and sequences
        Ok(serde_yaml::to_string(data)?.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_style_output() {
        let data: Value =
            serde_json::from_str(r#"{"name": "ada", "tags": ["a", "b"]}"#).unwrap();
        let text = String::from_utf8(YamlEncoder.encode(&data).unwrap()).unwrap();
        assert!(text.contains("name: ada"));
        assert!(text.contains("- a"));
        assert!(!text.contains('['));
        assert!(!text.contains('{'));
    }
}
