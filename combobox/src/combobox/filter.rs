//! Substring filtering and match highlighting.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::control::SelectOption;

/// Markup that highlighting must leave intact: tags and entity references.
static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^<>]*>|&#?[A-Za-z0-9]+;").expect("markup pattern is valid")
});

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]*>").expect("tag pattern is valid"));

/// The text a label shows: tags removed, entity references decoded.
///
/// ```
/// use combobox::display_text;
///
/// assert_eq!(display_text("<b>Fish</b> &amp; Chips"), "Fish & Chips");
/// ```
pub fn display_text(label: &str) -> String {
    let stripped = TAG.replace_all(label, "");
    html_escape::decode_html_entities(&stripped).into_owned()
}

/// A candidate shown in the dropdown for a query term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Markup to render, with matches emphasized.
    pub label: String,
    /// Text placed in the input when picked (the option's display text).
    pub value: String,
    /// Index of the originating option in the backing control.
    /// `None` for placeholders.
    pub option: Option<usize>,
}

impl Suggestion {
    /// A non-selectable placeholder entry.
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            option: None,
        }
    }

    /// Check if this suggestion refers to no option.
    pub fn is_placeholder(&self) -> bool {
        self.option.is_none()
    }
}

/// Build a case-insensitive matcher for the literal `term`.
fn matcher(term: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
}

/// Filter `options` by `term`.
///
/// Keeps options with a non-empty value whose display text contains `term`
/// (case-insensitive), in control order. An empty term keeps every
/// non-empty option. Matches are emphasized in the label markup.
///
/// # Example
///
/// ```
/// use combobox::{SelectOption, suggest};
///
/// let options = [SelectOption::new("Red", "r"), SelectOption::new("Green", "g")];
/// let found = suggest(&options, "RE", "strong");
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].label, "<strong>Re</strong>d");
/// ```
pub fn suggest(options: &[SelectOption], term: &str, tag: &str) -> Vec<Suggestion> {
    let candidates = options
        .iter()
        .enumerate()
        .filter(|(_, option)| !option.value.is_empty());

    if term.is_empty() {
        return candidates
            .map(|(index, option)| Suggestion {
                label: option.label.clone(),
                value: display_text(&option.label),
                option: Some(index),
            })
            .collect();
    }

    let matcher = match matcher(term) {
        Ok(matcher) => matcher,
        Err(e) => {
            log::warn!("Cannot build matcher for {:?}: {}", term, e);
            return Vec::new();
        }
    };

    candidates
        .filter_map(|(index, option)| {
            let text = display_text(&option.label);
            matcher.is_match(&text).then(|| Suggestion {
                label: emphasize_markup(&option.label, &matcher, tag),
                value: text,
                option: Some(index),
            })
        })
        .collect()
}

/// Wrap every case-insensitive occurrence of `term` in `<tag>…</tag>`.
///
/// Occurrences inside markup tags or entity references are left alone.
/// An empty term returns the text unchanged.
///
/// # Example
///
/// ```
/// use combobox::highlight;
///
/// assert_eq!(highlight("Fish &amp; Chips", "amp", "strong"), "Fish &amp; Chips");
/// assert_eq!(highlight("<b>Bold</b>", "b", "em"), "<b><em>B</em>old</b>");
/// ```
pub fn highlight(text: &str, term: &str, tag: &str) -> String {
    if term.is_empty() {
        return text.to_string();
    }
    match matcher(term) {
        Ok(matcher) => emphasize_markup(text, &matcher, tag),
        Err(_) => text.to_string(),
    }
}

fn emphasize_markup(text: &str, matcher: &Regex, tag: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for protected in MARKUP.find_iter(text) {
        emphasize(&text[last..protected.start()], matcher, tag, &mut out);
        out.push_str(protected.as_str());
        last = protected.end();
    }
    emphasize(&text[last..], matcher, tag, &mut out);
    out
}

fn emphasize(segment: &str, matcher: &Regex, tag: &str, out: &mut String) {
    let mut last = 0;
    for m in matcher.find_iter(segment) {
        if m.is_empty() {
            continue;
        }
        out.push_str(&segment[last..m.start()]);
        out.push('<');
        out.push_str(tag);
        out.push('>');
        out.push_str(m.as_str());
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
        last = m.end();
    }
    out.push_str(&segment[last..]);
}
