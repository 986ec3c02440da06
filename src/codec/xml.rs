//! Markup codec backed by quick-xml, using the "compact" mapping
//!
//! Element tag names become object keys. Attributes live under the reserved
//! key `_attributes` and text content under `_text`, so they can never
//! collide with child elements. Repeated sibling tags collapse into an
//! array. XML declarations are dropped on parse and never emitted; this is
//! a deliberate fidelity limit of the compact convention. Text outside any
//! element has no slot in the mapping and fails the parse.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde_json::{Map, Value};

use super::{type_name, Codec, Format};
use crate::error::{FormatParseError, FormatSerializeError};

/// Reserved key for element attributes
pub const ATTRIBUTES_KEY: &str = "_attributes";
/// Reserved key for element text content
pub const TEXT_KEY: &str = "_text";

/// XML codec
pub struct XmlCodec;

impl Codec for XmlCodec {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn parse(&self, raw: &str) -> Result<Value, FormatParseError> {
        let mut reader = Reader::from_str(raw);
        reader.trim_text(true);

        // Bottom of the stack is the document map; each open element pushes
        // a (tag, map) frame that is folded into its parent on close.
        let mut root = Map::new();
        let mut stack: Vec<(String, Map<String, Value>)> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    let (tag, element) = open_element(&start)
                        .map_err(|e| FormatParseError::new(Format::Xml, e))?;
                    stack.push((tag, element));
                }
                Ok(Event::Empty(start)) => {
                    let (tag, element) = open_element(&start)
                        .map_err(|e| FormatParseError::new(Format::Xml, e))?;
                    let parent = stack.last_mut().map(|(_, m)| m).unwrap_or(&mut root);
                    insert_child(parent, tag, Value::Object(element));
                }
                Ok(Event::Text(text)) => {
                    let content = text
                        .unescape()
                        .map_err(|e| FormatParseError::new(Format::Xml, e.to_string()))?;
                    match stack.last_mut() {
                        Some((_, element)) => append_text(element, &content),
                        None => return Err(top_level_text(&content)),
                    }
                }
                Ok(Event::CData(data)) => {
                    let content = String::from_utf8_lossy(&data).into_owned();
                    match stack.last_mut() {
                        Some((_, element)) => append_text(element, &content),
                        None => return Err(top_level_text(&content)),
                    }
                }
                Ok(Event::End(_)) => {
                    if let Some((tag, element)) = stack.pop() {
                        let parent = stack.last_mut().map(|(_, m)| m).unwrap_or(&mut root);
                        insert_child(parent, tag, Value::Object(element));
                    }
                }
                Ok(Event::Eof) => break,
                // Declarations, comments, processing instructions
                Ok(_) => {}
                Err(e) => {
                    return Err(FormatParseError::new(
                        Format::Xml,
                        format!("{} at position {}", e, reader.buffer_position()),
                    ));
                }
            }
        }

        if !stack.is_empty() {
            return Err(FormatParseError::new(
                Format::Xml,
                format!("unclosed element <{}>", stack.last().map(|(t, _)| t.as_str()).unwrap_or("")),
            ));
        }

        Ok(Value::Object(root))
    }

    fn serialize(&self, value: &Value) -> Result<String, FormatSerializeError> {
        let root = value.as_object().ok_or_else(|| {
            FormatSerializeError::non_object_root(Format::Xml, type_name(value))
        })?;

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        for (key, child) in root {
            if key == ATTRIBUTES_KEY || key == TEXT_KEY {
                continue;
            }
            write_element(&mut writer, key, child)?;
        }

        String::from_utf8(writer.into_inner())
            .map_err(|e| FormatSerializeError::new(Format::Xml, e.to_string()))
    }
}

/// Build the compact map for an opening tag, capturing its attributes.
fn open_element(start: &BytesStart<'_>) -> Result<(String, Map<String, Value>), String> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Map::new();

    let mut attributes = Map::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| e.to_string())?.into_owned();
        attributes.insert(name, Value::String(value));
    }
    if !attributes.is_empty() {
        element.insert(ATTRIBUTES_KEY.to_string(), Value::Object(attributes));
    }

    Ok((tag, element))
}

/// Text has no home outside an element; accepting it would drop it.
fn top_level_text(content: &str) -> FormatParseError {
    FormatParseError::new(
        Format::Xml,
        format!("text outside of any element: {content:?}"),
    )
}

/// Store text content under the reserved key, concatenating split runs.
fn append_text(element: &mut Map<String, Value>, content: &str) {
    match element.get_mut(TEXT_KEY) {
        Some(Value::String(existing)) => existing.push_str(content),
        _ => {
            element.insert(TEXT_KEY.to_string(), Value::String(content.to_string()));
        }
    }
}

/// Insert a closed child under its tag; repeated tags become an array.
fn insert_child(parent: &mut Map<String, Value>, tag: String, child: Value) {
    match parent.get_mut(&tag) {
        Some(Value::Array(items)) => items.push(child),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, child]);
        }
        None => {
            parent.insert(tag, child);
        }
    }
}

fn ser_err<E: std::fmt::Display>(e: E) -> FormatSerializeError {
    FormatSerializeError::new(Format::Xml, e.to_string())
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    value: &Value,
) -> Result<(), FormatSerializeError> {
    match value {
        // Repeated sibling elements
        Value::Array(items) => {
            for item in items {
                write_element(writer, tag, item)?;
            }
            Ok(())
        }
        Value::Object(map) => {
            let mut start = BytesStart::new(tag);
            if let Some(Value::Object(attributes)) = map.get(ATTRIBUTES_KEY) {
                for (name, attr_value) in attributes {
                    start.push_attribute((name.as_str(), scalar_text(attr_value).as_str()));
                }
            }
            writer.write_event(Event::Start(start)).map_err(ser_err)?;

            if let Some(text) = map.get(TEXT_KEY) {
                writer
                    .write_event(Event::Text(BytesText::new(&scalar_text(text))))
                    .map_err(ser_err)?;
            }
            for (key, child) in map {
                if key == ATTRIBUTES_KEY || key == TEXT_KEY {
                    continue;
                }
                write_element(writer, key, child)?;
            }

            writer
                .write_event(Event::End(BytesEnd::new(tag)))
                .map_err(ser_err)
        }
        // Scalars become an element wrapping their printed form
        scalar => {
            writer
                .write_event(Event::Start(BytesStart::new(tag)))
                .map_err(ser_err)?;
            if !scalar.is_null() {
                writer
                    .write_event(Event::Text(BytesText::new(&scalar_text(scalar))))
                    .map_err(ser_err)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(tag)))
                .map_err(ser_err)
        }
    }
}

/// Printed form of a scalar in attribute or text position
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
