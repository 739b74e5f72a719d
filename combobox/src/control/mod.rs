//! The single-select control a combobox is mounted on.
//!
//! The control's selected option is the authoritative value of the field;
//! the combobox keeps it in sync with what the user typed or picked.

mod option;

pub use option::SelectOption;

/// A native-style single-select control.
///
/// Holds an ordered list of options and at most one selected index.
///
/// # Example
///
/// ```
/// use combobox::SelectControl;
///
/// let control = SelectControl::new("milestone")
///     .with_options([("", ""), ("1.0", "1.0"), ("2.0", "2.0")])
///     .with_value("2.0");
///
/// assert_eq!(control.value(), "2.0");
/// assert_eq!(control.selected_index(), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectControl {
    name: String,
    options: Vec<SelectOption>,
    selected: Option<usize>,
    hidden: bool,
}

impl SelectControl {
    /// Create an empty, visible control.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append options.
    pub fn with_options<I, O>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<SelectOption>,
    {
        self.options.extend(options.into_iter().map(Into::into));
        self
    }

    /// Select the first option with the given value.
    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    /// The form field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All options in order.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Append a single option.
    pub fn push(&mut self, option: impl Into<SelectOption>) {
        self.options.push(option.into());
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Index of the selected option.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The selected option, if any.
    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.selected.and_then(|i| self.options.get(i))
    }

    /// The submitted value: the selected option's value, or `""`.
    pub fn value(&self) -> &str {
        self.selected_option()
            .map(|o| o.value.as_str())
            .unwrap_or("")
    }

    /// Select the option at `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.options.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Index of the first option whose value equals `value` exactly.
    pub fn position_of_value(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|o| o.value == value)
    }

    /// Select the first option with `value`; clears the selection when none
    /// matches.
    pub fn set_value(&mut self, value: &str) -> bool {
        self.selected = self.position_of_value(value);
        self.selected.is_some()
    }

    /// Select the "no selection" option (or nothing, if there is none).
    pub fn clear_value(&mut self) {
        self.set_value("");
    }

    /// Replace every option with the empty option followed by `options`.
    ///
    /// The first option whose value equals `keep_value` becomes selected.
    pub fn replace_options<I>(&mut self, options: I, keep_value: &str)
    where
        I: IntoIterator<Item = SelectOption>,
    {
        self.options.clear();
        self.options.push(SelectOption::empty());
        self.options.extend(options);
        self.selected = if keep_value.is_empty() {
            None
        } else {
            self.position_of_value(keep_value)
        };
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    /// Check if the control is hidden.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Hide the control.
    pub fn hide(&mut self) {
        self.hidden = true;
    }

    /// Show the control.
    pub fn show(&mut self) {
        self.hidden = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> SelectControl {
        SelectControl::new("color").with_options([("Red", "r"), ("Green", "g"), ("Blue", "b")])
    }

    #[test]
    fn test_value_defaults_to_empty() {
        let control = colors();
        assert_eq!(control.selected_index(), None);
        assert_eq!(control.value(), "");
    }

    #[test]
    fn test_set_value_first_match_wins() {
        let mut control = colors().with_options([("Rouge", "r")]);
        assert!(control.set_value("r"));
        assert_eq!(control.selected_index(), Some(0));
        assert_eq!(control.selected_option().unwrap().label, "Red");
    }

    #[test]
    fn test_set_value_unknown_clears() {
        let mut control = colors().with_value("g");
        assert!(!control.set_value("purple"));
        assert_eq!(control.selected_index(), None);
    }

    #[test]
    fn test_replace_options_prepends_empty_and_keeps_value() {
        let mut control = SelectControl::new("color")
            .with_options([("Green", "g")])
            .with_value("g");

        control.replace_options(
            [SelectOption::new("Red", "r"), SelectOption::new("Green", "g")],
            "g",
        );

        assert_eq!(control.options()[0], SelectOption::empty());
        assert_eq!(control.options().len(), 3);
        assert_eq!(control.selected_index(), Some(2));
        assert_eq!(control.value(), "g");
    }

    #[test]
    fn test_clear_value_selects_empty_option() {
        let mut control = SelectControl::new("color");
        control.replace_options([SelectOption::new("Red", "r")], "r");
        control.clear_value();
        assert_eq!(control.selected_index(), Some(0));
        assert_eq!(control.value(), "");
    }

    #[test]
    fn test_select_out_of_range() {
        let mut control = colors();
        assert!(!control.select(3));
        assert!(control.select(2));
        assert_eq!(control.value(), "b");
    }
}
