//! Join strategies for combining rendered children.
//!
//! A [`RenderMode`] selects how the children of a list are glued together
//! before the enclosing tag wraps them:
//!
//! - [`RenderMode::Compact`]: concatenated with no separator
//! - [`RenderMode::Nested`]: one child per line, indented
//! - [`RenderMode::Pre`]: as nested, but inside a single HTML comment with
//!   each child bracketed by `-->` and `<!--` so the payload stays visible
//!
//! Each child is escaped first unless it is pre-escaped or the enclosing
//! tag is `style`/`script`.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::escape::escape_for;

/// One indentation level in nested and pre output.
pub const INDENT: &str = "  ";

/// Selects the join strategy used by a [`Renderer`](crate::Renderer).
///
/// ## Examples
///
/// ```
/// use biscuit_dom::RenderMode;
///
/// let mode: RenderMode = "nested".parse().unwrap();
/// assert_eq!(mode, RenderMode::Nested);
/// assert_eq!(RenderMode::default(), RenderMode::Compact);
/// assert_eq!(RenderMode::Pre.to_string(), "pre");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RenderMode {
    #[default]
    Compact,
    Nested,
    Pre,
}

/// A child ready to be joined: rendered markup or raw leaf text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child<'a> {
    pub text: Cow<'a, str>,
    pub pre_escaped: bool,
}

impl<'a> Child<'a> {
    /// Raw text that still needs escaping.
    pub fn raw(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            text: text.into(),
            pre_escaped: false,
        }
    }

    /// Markup that is already safe.
    pub fn markup(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            text: text.into(),
            pre_escaped: true,
        }
    }

    fn escaped(&self, tag: Option<&str>) -> Cow<'_, str> {
        escape_for(&self.text, self.pre_escaped, tag)
    }
}

impl RenderMode {
    /// Joins `children` for placement inside `tag` (or at the top level).
    pub fn join(self, children: &[Child<'_>], tag: Option<&str>) -> String {
        match self {
            RenderMode::Compact => join_compact(children, tag),
            RenderMode::Nested => join_nested(children, tag),
            RenderMode::Pre => join_pre(children, tag),
        }
    }
}

fn join_compact(children: &[Child<'_>], tag: Option<&str>) -> String {
    children.iter().map(|child| child.escaped(tag)).collect()
}

fn join_nested(children: &[Child<'_>], tag: Option<&str>) -> String {
    let mut block = String::new();
    for child in children {
        block.push_str(&child.escaped(tag));
        block.push('\n');
    }

    let mut out = String::from("\n");
    out.push_str(&indent_lines(&block));
    out
}

fn join_pre(children: &[Child<'_>], tag: Option<&str>) -> String {
    let mut block = String::new();
    for child in children {
        block.push_str("-->");
        block.push_str(&child.escaped(tag));
        block.push_str("<!--\n");
    }

    let mut out = String::from("<!--\n");
    out.push_str(&indent_lines(&block));
    out.push_str("-->");
    out
}

/// Prefixes every line of `block` with [`INDENT`].
///
/// A trailing newline does not start a new line. An empty block is a single
/// empty line and so becomes one indent.
pub fn indent_lines(block: &str) -> String {
    if block.is_empty() {
        return INDENT.to_string();
    }

    let mut out = String::with_capacity(block.len() + INDENT.len() * 4);
    for line in block.split_inclusive('\n') {
        out.push_str(INDENT);
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn children<'a>(texts: &[&'a str]) -> Vec<Child<'a>> {
        texts.iter().map(|t| Child::raw(*t)).collect()
    }

    #[test]
    fn test_compact_concatenates() {
        assert_eq!(RenderMode::Compact.join(&children(&["a", "b"]), Some("p")), "ab");
    }

    #[test]
    fn test_compact_escapes_raw_children() {
        let kids = [Child::raw("a<b"), Child::markup("<i>c</i>")];
        assert_eq!(RenderMode::Compact.join(&kids, Some("p")), "a&lt;b<i>c</i>");
    }

    #[test]
    fn test_script_children_are_not_escaped() {
        let kids = children(&["if (a < b) {}"]);
        assert_eq!(RenderMode::Compact.join(&kids, Some("script")), "if (a < b) {}");
    }

    #[test]
    fn test_nested_indents_each_child() {
        assert_eq!(
            RenderMode::Nested.join(&children(&["a", "b"]), Some("p")),
            "\n  a\n  b\n"
        );
    }

    #[test]
    fn test_nested_indents_multiline_children() {
        let kids = [Child::markup("<ul>\n  <li>x</li>\n</ul>")];
        assert_eq!(
            RenderMode::Nested.join(&kids, None),
            "\n  <ul>\n    <li>x</li>\n  </ul>\n"
        );
    }

    #[test]
    fn test_pre_wraps_children_in_comment() {
        assert_eq!(
            RenderMode::Pre.join(&children(&["a", "b"]), Some("p")),
            "<!--\n  -->a<!--\n  -->b<!--\n-->"
        );
    }

    #[test]
    fn test_empty_children() {
        assert_eq!(RenderMode::Compact.join(&[], Some("div")), "");
        assert_eq!(RenderMode::Nested.join(&[], Some("div")), "\n  ");
        assert_eq!(RenderMode::Pre.join(&[], Some("div")), "<!--\n  -->");
    }

    #[test]
    fn test_indent_lines() {
        assert_eq!(indent_lines("a\nb"), "  a\n  b");
        assert_eq!(indent_lines("a\n\n"), "  a\n  \n");
        assert_eq!(indent_lines(""), "  ");
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Compact".parse::<RenderMode>().unwrap(), RenderMode::Compact);
        assert_eq!("PRE".parse::<RenderMode>().unwrap(), RenderMode::Pre);
        assert!("pretty".parse::<RenderMode>().is_err());
    }

    #[test]
    fn test_all_modes_round_trip_through_display() {
        let modes: Vec<RenderMode> = RenderMode::iter().collect();
        assert_eq!(modes.len(), 3);
        for mode in modes {
            assert_eq!(mode.to_string().parse::<RenderMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::to_string(&RenderMode::Nested).unwrap(), "\"nested\"");
        let mode: RenderMode = serde_json::from_str("\"pre\"").unwrap();
        assert_eq!(mode, RenderMode::Pre);
    }
}
