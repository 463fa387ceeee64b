//! Generic attributed document tree.
//!
//! The shape mirrors what an attribute-preserving XML-to-object parser
//! produces: every element becomes a field, attributes become fields named
//! `@_<name>`, and an element repeated under the same parent becomes a
//! [`NodeValue::List`].

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

use super::plural::{OneOrMany, to_sequence};

/// Prefix marking a field as an XML attribute rather than a child element
pub const ATTRIBUTE_PREFIX: &str = "@_";

/// Field holding the text content of an element that also carries attributes
pub const TEXT_KEY: &str = "#text";

/// A leaf value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// Coerce raw element text into the narrowest scalar that represents it
    /// without loss.
    ///
    /// Integers with a leading zero (`"0123"`) and integers that overflow
    /// `i64` stay text, as does anything in exponent notation.
    pub fn coerce(raw: &str) -> Scalar {
        let trimmed = raw.trim();
        match trimmed {
            "true" => return Scalar::Bool(true),
            "false" => return Scalar::Bool(false),
            _ => {}
        }

        let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
        if digits.is_empty() {
            return Scalar::Text(trimmed.to_string());
        }

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits, None),
        };

        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || (int_part.len() > 1 && int_part.starts_with('0')) {
            return Scalar::Text(trimmed.to_string());
        }

        match frac_part {
            None => trimmed
                .parse::<i64>()
                .map(Scalar::Integer)
                .unwrap_or_else(|_| Scalar::Text(trimmed.to_string())),
            Some(frac) if all_digits(frac) => match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => Scalar::Float(value),
                _ => Scalar::Text(trimmed.to_string()),
            },
            Some(_) => Scalar::Text(trimmed.to_string()),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// True only for the empty text scalar (not for `0` or `false`)
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Scalar::Text(s) if s.is_empty())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Integer(n) => write!(f, "{}", n),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(i64::from(value))
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// Value of a document field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeValue {
    Scalar(Scalar),
    Node(AttributedNode),
    List(Vec<NodeValue>),
}

impl NodeValue {
    pub fn as_node(&self) -> Option<&AttributedNode> {
        match self {
            NodeValue::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            NodeValue::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// View this value with its cardinality made explicit
    pub fn as_one_or_many(&self) -> OneOrMany<&NodeValue> {
        match self {
            NodeValue::List(values) => OneOrMany::Many(values.iter().collect()),
            other => OneOrMany::One(other),
        }
    }
}

impl<T: Into<Scalar>> From<T> for NodeValue {
    fn from(value: T) -> Self {
        NodeValue::Scalar(value.into())
    }
}

impl From<AttributedNode> for NodeValue {
    fn from(node: AttributedNode) -> Self {
        NodeValue::Node(node)
    }
}

/// An element: ordered fields mapping names to values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributedNode {
    fields: Vec<(String, NodeValue)>,
}

impl AttributedNode {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field (builder pattern). Repeating a name builds a list.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<NodeValue>) -> Self {
        self.push(name, value);
        self
    }

    /// Add an attribute field (builder pattern)
    pub fn with_attribute(self, name: &str, value: impl Into<Scalar>) -> Self {
        let key = format!("{}{}", ATTRIBUTE_PREFIX, name);
        self.with(key, NodeValue::Scalar(value.into()))
    }

    /// Append a field.
    ///
    /// A second value under an existing name turns the field into a
    /// [`NodeValue::List`], which is exactly how repeated XML elements are
    /// represented.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<NodeValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, NodeValue::List(values))) => values.push(value),
            Some((_, existing)) => {
                let first = std::mem::replace(existing, NodeValue::List(Vec::new()));
                *existing = NodeValue::List(vec![first, value]);
            }
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&NodeValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// A nested element, if the field holds exactly one
    pub fn node(&self, name: &str) -> Option<&AttributedNode> {
        self.get(name).and_then(NodeValue::as_node)
    }

    /// A leaf value, if the field holds exactly one
    pub fn scalar(&self, name: &str) -> Option<&Scalar> {
        self.get(name).and_then(NodeValue::as_scalar)
    }

    /// An attribute value (`@_<name>`)
    pub fn attribute(&self, name: &str) -> Option<&Scalar> {
        self.fields
            .iter()
            .find(|(key, _)| {
                key.strip_prefix(ATTRIBUTE_PREFIX)
                    .is_some_and(|attr| attr == name)
            })
            .and_then(|(_, value)| value.as_scalar())
    }

    /// A `0..N` field, normalized to a sequence.
    ///
    /// This is the only accessor that yields more than one value; anything
    /// that iterates, filters or counts a field goes through here.
    pub fn plural(&self, name: &str) -> Vec<&NodeValue> {
        to_sequence(self.get(name).map(NodeValue::as_one_or_many))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for AttributedNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
