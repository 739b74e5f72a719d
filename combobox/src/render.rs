//! Markup for a mounted combobox.
//!
//! The model in [`Combobox`] is authoritative; these functions derive the
//! markup a page shows for it. Option and suggestion labels are markup
//! already and are emitted as-is; attribute values and input text are
//! escaped.

use crate::combobox::{Combobox, Suggestion};
use crate::control::SelectControl;

/// Escapes text for use inside an HTML attribute or text node.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the backing `<select>`.
pub fn render_control(control: &SelectControl) -> String {
    let mut out = format!(r#"<select name="{}""#, escape_html(control.name()));
    if control.is_hidden() {
        out.push_str(r#" style="display: none""#);
    }
    out.push('>');
    for (i, option) in control.options().iter().enumerate() {
        let selected = if control.selected_index() == Some(i) {
            r#" selected="selected""#
        } else {
            ""
        };
        out.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            escape_html(&option.value),
            selected,
            option.label
        ));
    }
    out.push_str("</select>");
    out
}

/// Render the wrapper: the text input followed by the toggle.
pub fn render_wrapper(combobox: &Combobox) -> String {
    format!(
        concat!(
            r#"<span class="ui-combobox" id="{id}">"#,
            r#"<input class="ui-combobox-input" title="" value="{value}"/>"#,
            r#"<span class="ui-combobox-toggle" tabindex="-1" title="Show all options">{indicator}</span>"#,
            "</span>"
        ),
        id = escape_html(combobox.id()),
        value = escape_html(&combobox.text()),
        indicator = "▼",
    )
}

/// Render the suggestion menu.
///
/// Each suggestion becomes a list entry wrapping its (already highlighted)
/// label.
pub fn render_menu(suggestions: &[Suggestion]) -> String {
    let mut out = String::from(r#"<ul class="ui-autocomplete">"#);
    for suggestion in suggestions {
        out.push_str("<li><a>");
        out.push_str(&suggestion.label);
        out.push_str("</a></li>");
    }
    out.push_str("</ul>");
    out
}

/// Render the whole field: the hidden control, immediately followed by the
/// wrapper, and the menu when it is open.
///
/// A destroyed combobox renders nothing; its control belongs to the host
/// again.
pub fn render(combobox: &Combobox) -> String {
    let Some(control) = combobox.control() else {
        return String::new();
    };
    let mut out = render_control(&control);
    out.push_str(&render_wrapper(combobox));
    if combobox.is_open() {
        out.push_str(&render_menu(&combobox.suggestions()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"O'Brien & "Co" <x>"#), "O&#39;Brien &amp; &quot;Co&quot; &lt;x&gt;");
    }

    #[test]
    fn test_render_control_marks_selection_and_visibility() {
        let mut control = SelectControl::new("milestone")
            .with_options([("", ""), ("1.0 &amp; up", "1.0")])
            .with_value("1.0");
        control.hide();

        assert_eq!(
            render_control(&control),
            concat!(
                r#"<select name="milestone" style="display: none">"#,
                r#"<option value=""></option>"#,
                r#"<option value="1.0" selected="selected">1.0 &amp; up</option>"#,
                "</select>"
            )
        );
    }

    #[test]
    fn test_render_menu_keeps_label_markup() {
        let suggestions = vec![
            Suggestion {
                label: "<strong>Re</strong>d".into(),
                value: "Red".into(),
                option: Some(1),
            },
            Suggestion::placeholder("Loading..."),
        ];
        assert_eq!(
            render_menu(&suggestions),
            r#"<ul class="ui-autocomplete"><li><a><strong>Re</strong>d</a></li><li><a>Loading...</a></li></ul>"#
        );
    }
}
