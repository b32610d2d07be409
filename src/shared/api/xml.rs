//! dict-to-XML transcoding of serializer output.
//!
//! The layout follows the usual dict-to-XML conventions: everything sits in a
//! `<root>` element, object keys become element names, array members become
//! `<item>` elements, and every element carries a `type` attribute naming the
//! JSON kind of its value.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value;

use crate::core::error::{AppError, Result};
use crate::shared::validation::{DIGITS_REGEX, XML_NAME_REGEX};

const ROOT: &str = "root";
const ITEM: &str = "item";

/// Transcode a JSON value into an XML document.
///
/// The declaration is written as `<?xml version="1.0" encoding="UTF-8"?>`,
/// with no space before `?>`; parsers treat both spellings the same.
pub fn to_xml(value: &Value) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    write(&mut writer, Event::Start(BytesStart::new(ROOT)))?;
    write_children(&mut writer, value)?;
    write(&mut writer, Event::End(BytesEnd::new(ROOT)))?;

    Ok(writer.into_inner())
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| AppError::Internal(format!("XML encoding failed: {}", e)))
}

/// Contents of an element holding `value`: child elements for containers,
/// text for scalars.
fn write_children(writer: &mut Writer<Vec<u8>>, value: &Value) -> Result<()> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                write_element(writer, key, child)?;
            }
            Ok(())
        }
        Value::Array(items) => {
            for child in items {
                write_element(writer, ITEM, child)?;
            }
            Ok(())
        }
        Value::Null => Ok(()),
        scalar => write(writer, Event::Text(BytesText::new(&scalar_text(scalar)))),
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, key: &str, value: &Value) -> Result<()> {
    let (name, original) = element_name(key);

    let mut start = BytesStart::new(name.as_str());
    if let Some(original) = original {
        start.push_attribute(("name", original));
    }
    start.push_attribute(("type", type_name(value)));

    write(writer, Event::Start(start))?;
    write_children(writer, value)?;
    write(writer, Event::End(BytesEnd::new(name.as_str())))
}

/// Element name for a key, plus the original key when it had to move into a
/// `name` attribute.
fn element_name(key: &str) -> (String, Option<&str>) {
    if XML_NAME_REGEX.is_match(key) {
        return (key.to_string(), None);
    }
    if DIGITS_REGEX.is_match(key) {
        return (format!("n{}", key), None);
    }
    let underscored = key.replace(' ', "_");
    if XML_NAME_REGEX.is_match(&underscored) {
        return (underscored, None);
    }
    ("key".to_string(), Some(key))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn xml(value: Value) -> String {
        String::from_utf8(to_xml(&value).unwrap()).unwrap()
    }

    fn body(value: Value) -> String {
        let doc = xml(value);
        let start = doc.find("<root>").unwrap();
        doc[start..].to_string()
    }

    #[test]
    fn test_document_starts_with_declaration() {
        assert!(xml(json!({})).starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    }

    #[test]
    fn test_object_keys_become_typed_elements_in_order() {
        let out = body(json!({
            "name": "Clinic",
            "beds": 12,
            "lat": 1.5,
            "open": true,
            "osm_id": null
        }));
        assert_eq!(
            out,
            "<root>\
             <name type=\"str\">Clinic</name>\
             <beds type=\"int\">12</beds>\
             <lat type=\"float\">1.5</lat>\
             <open type=\"bool\">true</open>\
             <osm_id type=\"null\"></osm_id>\
             </root>"
        );
    }

    #[test]
    fn test_arrays_become_items() {
        let out = body(json!([{"name": "A"}, {"name": "B"}]));
        assert_eq!(
            out,
            "<root>\
             <item type=\"dict\"><name type=\"str\">A</name></item>\
             <item type=\"dict\"><name type=\"str\">B</name></item>\
             </root>"
        );
    }

    #[test]
    fn test_nested_objects_and_lists() {
        let out = body(json!({"staff": {"nurses": 2}, "tags": ["a"]}));
        assert_eq!(
            out,
            "<root>\
             <staff type=\"dict\"><nurses type=\"int\">2</nurses></staff>\
             <tags type=\"list\"><item type=\"str\">a</item></tags>\
             </root>"
        );
    }

    #[test]
    fn test_invalid_keys_are_repaired() {
        let out = body(json!({"123": 1, "opening hours": "24/7", "a:b": "x"}));
        assert_eq!(
            out,
            "<root>\
             <n123 type=\"int\">1</n123>\
             <opening_hours type=\"str\">24/7</opening_hours>\
             <key name=\"a:b\" type=\"str\">x</key>\
             </root>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let out = body(json!({"name": "A & B <clinic>"}));
        assert!(out.contains("A &amp; B &lt;clinic&gt;"));
    }
}
