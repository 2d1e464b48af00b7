//! Option lists for select-style widgets.
//!
//! The option grammar is a stable contract with content authors:
//!
//! ```text
//! value|label;value*|label;value
//! ```
//!
//! - `;` separates options, `|` separates a value from its label
//! - `*` directly before or after the value marks the default option
//! - `\` escapes the next character, so `\;`, `\|`, `\*` and `\\` are literal
//!
//! Parsing never fails. A fragment that cannot be read as `value|label`
//! becomes one option whose value and label are the fragment itself.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Separator between options
pub const OPTION_SEPARATOR: char = ';';
/// Separator between value and label
pub const LABEL_SEPARATOR: char = '|';
/// Marks the default option
pub const DEFAULT_MARKER: char = '*';
/// Escapes the next character
pub const ESCAPE: char = '\\';

/// A single option in a select-style widget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub is_default: bool,
}

impl SelectOption {
    /// An option whose label is its value
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            is_default: false,
        }
    }

    /// Set the display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Mark as the default option
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// Ordered options with unique values and at most one default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct OptionList(Vec<SelectOption>);

impl OptionList {
    /// Parse a configuration string
    pub fn parse(config: &str) -> Self {
        parse_options(config)
    }

    /// Build a list from options, enforcing unique values and a single default.
    pub fn from_options(options: impl IntoIterator<Item = SelectOption>) -> Self {
        let mut list: Vec<SelectOption> = Vec::new();
        for option in options {
            if list.iter().any(|o| o.value == option.value) {
                warn!(value = %option.value, "discarding duplicate option value");
                continue;
            }
            list.push(option);
        }

        // The last marked option wins.
        if let Some(last) = list.iter().rposition(|o| o.is_default) {
            for (i, option) in list.iter_mut().enumerate() {
                option.is_default = i == last;
            }
        }
        Self(list)
    }

    /// The options in display order
    pub fn options(&self) -> &[SelectOption] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Find an option by value
    pub fn get(&self, value: &str) -> Option<&SelectOption> {
        self.0.iter().find(|o| o.value == value)
    }

    /// The marked default, else the first option, else `""`.
    pub fn effective_default(&self) -> &str {
        self.0
            .iter()
            .find(|o| o.is_default)
            .or_else(|| self.0.first())
            .map(|o| o.value.as_str())
            .unwrap_or("")
    }

    /// The value a widget shows for a stored value.
    ///
    /// A stored value that matches an option is kept, anything else falls
    /// back to the effective default.
    pub fn selected<'a>(&'a self, stored: &'a str) -> &'a str {
        if self.get(stored).is_some() {
            stored
        } else {
            self.effective_default()
        }
    }

    /// Serialize back to the option grammar
    pub fn serialize(&self) -> String {
        serialize_options(&self.0)
    }
}

impl<'a> IntoIterator for &'a OptionList {
    type Item = &'a SelectOption;
    type IntoIter = std::slice::Iter<'a, SelectOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parse an option configuration string.
///
/// ```rust
/// use fieldkit_widgets::parse_options;
///
/// let list = parse_options("a|b;c*|d");
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.effective_default(), "c");
/// assert_eq!(list.selected("a"), "a");
/// assert_eq!(list.selected("z"), "c");
/// ```
pub fn parse_options(config: &str) -> OptionList {
    let options = split_unescaped(config, OPTION_SEPARATOR)
        .into_iter()
        .filter(|fragment| !fragment.trim().is_empty())
        .map(|fragment| parse_fragment(&fragment));
    OptionList::from_options(options)
}

/// Serialize options to the grammar read by [`parse_options`].
pub fn serialize_options(options: &[SelectOption]) -> String {
    options
        .iter()
        .map(|option| {
            let mut out = escape(&option.value);
            if option.is_default {
                out.push(DEFAULT_MARKER);
            }
            if option.label != option.value {
                out.push(LABEL_SEPARATOR);
                out.push_str(&escape(&option.label));
            }
            out
        })
        .collect::<Vec<_>>()
        .join(&OPTION_SEPARATOR.to_string())
}

fn parse_fragment(fragment: &str) -> SelectOption {
    let parts = split_unescaped(fragment, LABEL_SEPARATOR);
    if parts.len() <= 2 {
        let (value, is_default) = strip_default_marker(parts[0].trim());
        let value = unescape(value);
        let value = value.trim();
        if !value.is_empty() {
            let label = parts
                .get(1)
                .map(|label| unescape(label.trim()).trim().to_string())
                .filter(|label| !label.is_empty())
                .unwrap_or_else(|| value.to_string());
            return SelectOption {
                value: value.to_string(),
                label,
                is_default,
            };
        }
    }

    let literal = unescape(fragment.trim()).trim().to_string();
    SelectOption::new(literal)
}

/// Strip an unescaped default marker from either end of a value.
fn strip_default_marker(raw: &str) -> (&str, bool) {
    let mut value = raw;
    let mut is_default = false;
    if let Some(rest) = value.strip_prefix(DEFAULT_MARKER) {
        value = rest;
        is_default = true;
    }
    if value.ends_with(DEFAULT_MARKER) {
        let before = &value[..value.len() - DEFAULT_MARKER.len_utf8()];
        let escapes = before.chars().rev().take_while(|&c| c == ESCAPE).count();
        if escapes % 2 == 0 {
            value = before;
            is_default = true;
        }
    }
    (value, is_default)
}

/// Split on `separator`, skipping escaped separators. Escapes are kept.
fn split_unescaped(s: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE {
            current.push(c);
            if let Some(next) = chars.next() {
                current.push(next);
            }
        } else if c == separator {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    parts
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE {
            // a trailing escape stays literal
            out.push(chars.next().unwrap_or(ESCAPE));
        } else {
            out.push(c);
        }
    }
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, OPTION_SEPARATOR | LABEL_SEPARATOR | DEFAULT_MARKER | ESCAPE) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn opt(value: &str, label: &str, is_default: bool) -> SelectOption {
        SelectOption {
            value: value.into(),
            label: label.into(),
            is_default,
        }
    }

    #[test]
    fn parse_value_label_and_default() {
        let list = parse_options("a|b;c*|d");
        assert_eq!(
            list.options(),
            &[opt("a", "b", false), opt("c", "d", true)]
        );
    }

    #[test]
    fn parse_empty_string() {
        let list = parse_options("");
        assert!(list.is_empty());
        assert_eq!(list.effective_default(), "");
        assert_eq!(list.selected("anything"), "");
    }

    #[test]
    fn label_defaults_to_value() {
        let list = parse_options("red; green |  ;blue|Blue");
        assert_eq!(
            list.options(),
            &[
                opt("red", "red", false),
                opt("green", "green", false),
                opt("blue", "Blue", false)
            ]
        );
    }

    #[test]
    fn leading_marker_marks_default() {
        let list = parse_options("a;*b|Bee");
        assert_eq!(list.options()[1], opt("b", "Bee", true));
    }

    #[test]
    fn last_default_marker_wins() {
        let list = parse_options("a*;b*;c");
        let defaults: Vec<_> = list.options().iter().filter(|o| o.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].value, "b");
        assert_eq!(list.effective_default(), "b");
    }

    #[test]
    fn first_option_is_default_when_unmarked() {
        let list = parse_options("x|Ex;y|Why");
        assert_eq!(list.effective_default(), "x");
        assert_eq!(list.selected("y"), "y");
        assert_eq!(list.selected("nope"), "x");
    }

    #[test]
    fn duplicate_values_keep_first() {
        let list = parse_options("a|First;a*|Second;b");
        assert_eq!(
            list.options(),
            &[opt("a", "First", false), opt("b", "b", false)]
        );
    }

    #[rstest]
    #[case("a|b|c", "a|b|c")]
    #[case("|label", "|label")]
    #[case("*", "*")]
    #[case("  x|y|z*  ", "x|y|z*")]
    fn malformed_fragment_degrades_to_literal(#[case] input: &str, #[case] literal: &str) {
        let list = parse_options(input);
        assert_eq!(list.options(), &[opt(literal, literal, false)]);
    }

    #[rstest]
    #[case(r"a\;b|c", "a;b", "c")]
    #[case(r"a\|b", "a|b", "a|b")]
    #[case(r"a\*", "a*", "a*")]
    #[case(r"a\\", r"a\", r"a\")]
    fn escapes_are_literal(#[case] input: &str, #[case] value: &str, #[case] label: &str) {
        let list = parse_options(input);
        assert_eq!(list.options(), &[opt(value, label, false)]);
    }

    #[test]
    fn escaped_backslash_before_marker_keeps_marker() {
        let list = parse_options(r"c\\*|d");
        assert_eq!(list.options(), &[opt(r"c\", "d", true)]);
    }

    #[test]
    fn empty_fragments_are_skipped() {
        let list = parse_options(";;a;  ;b;");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn serialize_compact_form() {
        let list = parse_options("a|b;c*|d;e");
        assert_eq!(list.serialize(), "a|b;c*|d;e");
    }

    #[test]
    fn serialize_escapes_specials() {
        let list = parse_options("a|b|c");
        let text = list.serialize();
        assert_eq!(text, r"a\|b\|c");
        assert_eq!(parse_options(&text), list);
    }

    #[test]
    fn from_options_enforces_invariants() {
        let list = OptionList::from_options(vec![
            SelectOption::new("a").as_default(),
            SelectOption::new("b").with_label("Bee").as_default(),
            SelectOption::new("a"),
        ]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.effective_default(), "b");
    }
}
