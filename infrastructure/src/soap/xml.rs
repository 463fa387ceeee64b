//! quick-xml based document parser
//!
//! Produces the attributed document shape the domain mapper expects:
//! namespace prefixes stripped, `xmlns` declarations dropped, attributes kept
//! as `@_<name>` text fields, element text type-coerced, and repeated sibling
//! elements collected into a list.

use civic_application::ports::document_parser::DocumentParser;
use civic_domain::core::error::{AdapterError, AdapterResult};
use civic_domain::document::{ATTRIBUTE_PREFIX, AttributedNode, NodeValue, Scalar, TEXT_KEY};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// [`DocumentParser`] backed by quick-xml's pull parser
#[derive(Debug, Clone, Default)]
pub struct QuickXmlParser;

impl QuickXmlParser {
    pub fn new() -> Self {
        Self
    }
}

/// An element whose end tag has not been seen yet
struct OpenElement {
    name: String,
    node: AttributedNode,
    text: String,
}

impl OpenElement {
    fn start(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> AdapterResult<Self> {
        let name = reader
            .decoder()
            .decode(start.local_name().as_ref())
            .map_err(malformed)?
            .into_owned();

        let mut node = AttributedNode::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(malformed)?;
            let key = attribute.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let local_name = attribute.key.local_name();
            let local = reader
                .decoder()
                .decode(local_name.as_ref())
                .map_err(malformed)?;
            let value = attribute.unescape_value().map_err(malformed)?;
            node.push(
                format!("{}{}", ATTRIBUTE_PREFIX, local),
                Scalar::Text(value.into_owned()),
            );
        }

        Ok(Self {
            name,
            node,
            text: String::new(),
        })
    }

    /// Close the element into the value stored under its name
    fn finish(self) -> (String, NodeValue) {
        let OpenElement {
            name,
            mut node,
            text,
        } = self;

        if node.is_empty() {
            return (name, NodeValue::Scalar(Scalar::coerce(&text)));
        }
        if !text.is_empty() {
            node.push(TEXT_KEY, Scalar::coerce(&text));
        }
        (name, NodeValue::Node(node))
    }
}

fn malformed(error: impl std::fmt::Display) -> AdapterError {
    AdapterError::MalformedEnvelope(error.to_string())
}

impl DocumentParser for QuickXmlParser {
    fn parse(&self, raw: &str) -> AdapterResult<AttributedNode> {
        let mut reader = Reader::from_str(raw);
        reader.config_mut().trim_text(true);

        let mut root = AttributedNode::new();
        let mut open: Vec<OpenElement> = Vec::new();

        loop {
            let event = reader.read_event().map_err(|e| {
                AdapterError::MalformedEnvelope(format!(
                    "XML error at position {}: {}",
                    reader.error_position(),
                    e
                ))
            })?;

            match event {
                Event::Start(start) => open.push(OpenElement::start(&reader, &start)?),
                Event::Empty(start) => {
                    let (name, value) = OpenElement::start(&reader, &start)?.finish();
                    attach(&mut root, &mut open, name, value);
                }
                Event::End(_) => {
                    let element = open
                        .pop()
                        .ok_or_else(|| malformed("closing tag without opening tag"))?;
                    let (name, value) = element.finish();
                    attach(&mut root, &mut open, name, value);
                }
                Event::Text(text) => {
                    if let Some(element) = open.last_mut() {
                        element.text.push_str(&text.unescape().map_err(malformed)?);
                    }
                }
                Event::CData(data) => {
                    if let Some(element) = open.last_mut() {
                        element.text.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(element) = open.last() {
            return Err(malformed(format!(
                "unexpected end of document inside <{}>",
                element.name
            )));
        }

        Ok(root)
    }
}

fn attach(root: &mut AttributedNode, open: &mut [OpenElement], name: String, value: NodeValue) {
    match open.last_mut() {
        Some(parent) => parent.node.push(name, value),
        None => root.push(name, value),
    }
}
