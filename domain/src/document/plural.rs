//! Array normalizer for single-or-sequence fields.
//!
//! XML carries no cardinality: an element that appears once parses to a
//! single value, the same element repeated parses to a sequence. Every field
//! documented as `0..N` goes through [`to_sequence`] before anything iterates,
//! filters or counts it.

/// A value that arrived either once or as an ordered sequence
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// Canonicalize a possibly-absent, possibly-plural value into a sequence.
///
/// Absent yields an empty sequence, a single value a one-element sequence,
/// and an existing sequence is returned unchanged.
pub fn to_sequence<T>(value: Option<OneOrMany<T>>) -> Vec<T> {
    value.map(Vec::from).unwrap_or_default()
}
