//! Closed vocabularies mapping caller-facing names to upstream identifiers

use crate::core::error::{AdapterError, AdapterResult};

/// A fixed name → upstream value table for one tool parameter.
///
/// Lookups never fall back silently: an unknown name is an
/// [`AdapterError::InvalidParameter`] listing the accepted names.
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary<V: 'static> {
    parameter: &'static str,
    entries: &'static [(&'static str, V)],
}

impl<V: Copy> Vocabulary<V> {
    pub const fn new(parameter: &'static str, entries: &'static [(&'static str, V)]) -> Self {
        Self { parameter, entries }
    }

    /// Name of the tool parameter this vocabulary belongs to
    pub fn parameter(&self) -> &'static str {
        self.parameter
    }

    /// Accepted names, in declaration order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }

    pub fn lookup(&self, name: &str) -> AdapterResult<V> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                AdapterError::invalid(format!(
                    "unknown {} '{}'. Possible values: {}",
                    self.parameter,
                    name,
                    self.names().join(", ")
                ))
            })
    }

    /// Look up an optional name; absent stays absent
    pub fn lookup_optional(&self, name: Option<&str>) -> AdapterResult<Option<V>> {
        name.map(|name| self.lookup(name)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLOURS: Vocabulary<u32> = Vocabulary::new("colour", &[("red", 1), ("green", 2)]);

    #[test]
    fn test_lookup_known_name() {
        assert_eq!(COLOURS.lookup("green").unwrap(), 2);
        assert_eq!(COLOURS.lookup_optional(Some("red")).unwrap(), Some(1));
        assert_eq!(COLOURS.lookup_optional(None).unwrap(), None);
    }

    #[test]
    fn test_lookup_unknown_name_lists_possible_values() {
        let err = COLOURS.lookup("blue").unwrap_err();
        assert!(err.is_caller_error());
        assert_eq!(
            err.to_string(),
            "Invalid parameter: unknown colour 'blue'. Possible values: red, green"
        );
    }

    #[test]
    fn test_names_keep_declaration_order() {
        assert_eq!(COLOURS.names(), vec!["red", "green"]);
        assert_eq!(COLOURS.parameter(), "colour");
    }
}
