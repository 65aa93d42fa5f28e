//! Tag and attribute formatting.
//!
//! Programmatic names use underscores (`data_id`, `my_tag`) while HTML uses
//! hyphens, so every tag and attribute name passes through [`hyphenize`].
//!
//! Attribute values follow a small tri-state domain:
//!
//! | Value | Output |
//! |-------|--------|
//! | [`AttrValue::Nil`] | attribute omitted |
//! | `true` | `name=""` |
//! | `false` | `name="none"` |
//! | text | `name="<encoded text>"` |
//!
//! ## Examples
//!
//! ```
//! use biscuit_dom::attributes::{Attributes, format};
//!
//! let attrs = Attributes::new()
//!     .with("data_id", "42")
//!     .with("hidden", true)
//!     .with("title", None::<&str>);
//!
//! let tag = format("my_tag", &attrs);
//! assert_eq!(tag.name, "my-tag");
//! assert_eq!(tag.open, r#"my-tag data-id="42" hidden="""#);
//! ```

use std::fmt;

use serde_json::Value;

use crate::escape::encode;

/// Replaces every underscore in `identifier` with a hyphen.
pub fn hyphenize(identifier: &str) -> String {
    identifier.replace('_', "-")
}

/// The value side of an attribute pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// The attribute is left out of the tag entirely.
    Nil,
    /// `true` renders an empty value, `false` renders `"none"`.
    Flag(bool),
    /// Any other value, entity-encoded when formatted.
    Text(String),
}

impl AttrValue {
    /// The unencoded value text, or `None` when the attribute is omitted.
    pub fn as_value_text(&self) -> Option<&str> {
        match self {
            AttrValue::Nil => None,
            AttrValue::Flag(true) => Some(""),
            AttrValue::Flag(false) => Some("none"),
            AttrValue::Text(text) => Some(text),
        }
    }

    /// The value as JSON, keeping nil and booleans distinct.
    pub fn to_json(&self) -> Value {
        match self {
            AttrValue::Nil => Value::Null,
            AttrValue::Flag(flag) => Value::Bool(*flag),
            AttrValue::Text(text) => Value::String(text.clone()),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(flag: bool) -> Self {
        AttrValue::Flag(flag)
    }
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        AttrValue::Text(text.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        AttrValue::Text(text)
    }
}

impl From<&String> for AttrValue {
    fn from(text: &String) -> Self {
        AttrValue::Text(text.clone())
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttrValue::Nil, Into::into)
    }
}

macro_rules! attr_value_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    AttrValue::Text(value.to_string())
                }
            }
        )*
    };
}

attr_value_from_display!(char, i32, i64, u8, u16, u32, u64, usize, f32, f64);

/// An insertion-ordered attribute mapping.
///
/// Order is observable in the rendered tag, so the pairs are kept in a
/// `Vec`. Inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pairs: Vec<(String, AttrValue)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with<K: Into<String>, V: Into<AttrValue>>(mut self, name: K, value: V) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets `name` to `value`, keeping the original position of `name`.
    pub fn insert<K: Into<String>, V: Into<AttrValue>>(&mut self, name: K, value: V) {
        let name = name.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.pairs.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.pairs.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

impl<K: Into<String>, V: Into<AttrValue>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// A formatted opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedTag {
    /// Tag name followed by the formatted attributes, without angle brackets.
    pub open: String,
    /// The hyphenized tag name, used for the closing tag.
    pub name: String,
}

impl FormattedTag {
    /// Wraps `content` as `<open>content</name>`.
    pub fn wrap(&self, content: &str) -> String {
        format!("<{}>{}</{}>", self.open, content, self.name)
    }

    /// A self-closing `<open />` element.
    pub fn void(&self) -> String {
        format!("<{} />", self.open)
    }
}

impl fmt::Display for FormattedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.open)
    }
}

/// Formats `tag` and its attributes into an opening fragment.
///
/// Nil attributes are skipped, names are hyphenized and values are
/// entity-encoded. Attributes appear in insertion order.
pub fn format(tag: &str, attributes: &Attributes) -> FormattedTag {
    let name = hyphenize(tag);
    let mut open = name.clone();

    for (key, value) in attributes.iter() {
        let Some(text) = value.as_value_text() else {
            continue;
        };
        open.push(' ');
        open.push_str(&hyphenize(key));
        open.push_str("=\"");
        open.push_str(&encode(text));
        open.push('"');
    }

    FormattedTag { open, name }
}
