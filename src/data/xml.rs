//! XML encoder.
//!
//! Arrays are treated as a homogeneous row set: one `<row>` element per
//! entry under a `<data>` root, one child element per key. Objects become a
//! flat `<root>` with one child per key. Encoding is non-recursive: nested
//! values are stringified, not expanded.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde_json::Value;

use crate::common::error::{Error, Result};

use super::Encoder;

/// Encoder for `.xml` output.
pub struct XmlEncoder;

impl Encoder for XmlEncoder {
    fn encode(&self, data: &Value) -> Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        match data {
            Value::Array(rows) => {
                writer.write_event(Event::Start(BytesStart::new("data")))?;
                for row in rows {
                    let Value::Object(fields) = row else {
                        return Err(Error::InvalidContentShape(
                            "XML row sets require every entry to be an object".to_string(),
                        ));
                    };
                    writer.write_event(Event::Start(BytesStart::new("row")))?;
                    for (key, value) in fields {
                        write_field(&mut writer, key, value)?;
                    }
                    writer.write_event(Event::End(BytesEnd::new("row")))?;
                }
                writer.write_event(Event::End(BytesEnd::new("data")))?;
            },
            Value::Object(fields) => {
                writer.write_event(Event::Start(BytesStart::new("root")))?;
                for (key, value) in fields {
                    write_field(&mut writer, key, value)?;
                }
                writer.write_event(Event::End(BytesEnd::new("root")))?;
            },
            _ => {
                return Err(Error::InvalidContentShape(
                    "data must be a list or object for XML generation".to_string(),
                ));
            },
        }

        Ok(writer.into_inner())
    }
}

fn write_field(writer: &mut Writer<Vec<u8>>, key: &str, value: &Value) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(key)))?;
    writer.write_event(Event::Text(BytesText::new(&scalar_text(value))))?;
    writer.write_event(Event::End(BytesEnd::new(key)))?;
    Ok(())
}

/// Flatten one value to element text. Nested structures keep their JSON
/// spelling.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
