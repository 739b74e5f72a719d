//! Option list wire types

use serde::Deserialize;
use serde::Serialize;

/// A single selectable choice as returned by the source.
///
/// # Example
///
/// ```
/// use option_source::OptionEntry;
///
/// let entry = OptionEntry::new("Red", "r");
/// assert_eq!(entry.label, "Red");
/// assert_eq!(entry.value, "r");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionEntry {
    /// The display label.
    pub label: String,
    /// The submitted value.
    pub value: String,
}

impl OptionEntry {
    /// Creates a new option entry.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl<L, V> From<(L, V)> for OptionEntry
where
    L: Into<String>,
    V: Into<String>,
{
    fn from((label, value): (L, V)) -> Self {
        Self::new(label, value)
    }
}

/// The document served by an option source.
///
/// Entries keep the order the source returned them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsResponse {
    /// Options in display order.
    pub options: Vec<OptionEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_preserves_order() {
        let body = r#"{"options":[{"label":"Green","value":"g"},{"label":"Blue","value":"b"}]}"#;
        let response: OptionsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.options,
            vec![OptionEntry::new("Green", "g"), OptionEntry::new("Blue", "b")]
        );
    }

    #[test]
    fn test_missing_options_is_an_error() {
        let result = serde_json::from_str::<OptionsResponse>(r#"{"items":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_tuple() {
        let entry: OptionEntry = ("Red", "r").into();
        assert_eq!(entry, OptionEntry::new("Red", "r"));
    }
}
