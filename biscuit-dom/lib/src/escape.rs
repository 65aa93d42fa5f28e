//! HTML entity encoding for leaf text and attribute values.
//!
//! Encoding is delegated to the `html-escape` crate. The quoted-attribute
//! flavour is used everywhere so that the same encoded text is safe both
//! between tags and inside a `"`-delimited attribute value.

use std::borrow::Cow;

/// Tags whose content is raw code and must never be entity-encoded.
pub const RAW_TEXT_TAGS: [&str; 2] = ["style", "script"];

/// Encodes `&`, `<`, `>`, `"` and `'` as HTML entities.
///
/// ## Examples
///
/// ```
/// use biscuit_dom::escape::encode;
///
/// assert_eq!(encode("a < b && c"), "a &lt; b &amp;&amp; c");
/// assert_eq!(encode("plain"), "plain");
/// ```
pub fn encode(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

/// Returns `true` when content placed inside `tag` bypasses escaping.
pub fn is_raw_text_tag(tag: Option<&str>) -> bool {
    tag.is_some_and(|tag| RAW_TEXT_TAGS.contains(&tag))
}

/// Escapes `text` for placement inside `tag`.
///
/// Pre-escaped text and the content of `style`/`script` tags are returned
/// unchanged (borrowed).
pub fn escape_for<'a>(text: &'a str, pre_escaped: bool, tag: Option<&str>) -> Cow<'a, str> {
    if pre_escaped || is_raw_text_tag(tag) {
        Cow::Borrowed(text)
    } else {
        encode(text)
    }
}
