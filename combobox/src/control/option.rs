//! A single choice in a select control.

use option_source::OptionEntry;

/// A selectable option.
///
/// `label` is the display text and may contain inline markup or entity
/// references; `value` is what the control submits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SelectOption {
    /// Display label
    pub label: String,
    /// Submitted value
    pub value: String,
}

impl SelectOption {
    /// Create a new option.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// The "no selection" option every populated control starts with.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if this is a "no selection" option.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl From<OptionEntry> for SelectOption {
    fn from(entry: OptionEntry) -> Self {
        Self::new(entry.label, entry.value)
    }
}

// Implement for (label, value) tuples
impl<L, V> From<(L, V)> for SelectOption
where
    L: Into<String>,
    V: Into<String>,
{
    fn from((label, value): (L, V)) -> Self {
        Self::new(label, value)
    }
}
