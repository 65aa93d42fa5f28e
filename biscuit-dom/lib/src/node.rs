//! The input tree.
//!
//! A [`Node`] is a nil, a text leaf, a list of nodes, or a foreign scalar.
//! Scalars only arise from dynamic input (see the `From<serde_json::Value>`
//! conversion) and are rejected by the renderer's structural validation.

use std::fmt;

use serde_json::{Map, Value};

use crate::ansi;
use crate::render::Rendered;

/// A text leaf.
///
/// Pre-escaped text is emitted verbatim and never re-encoded. A leaf may
/// carry a mounted payload, which is how rendered fragments keep their
/// side-channel content when reused as children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    pub content: String,
    pub pre_escaped: bool,
    pub mounted: Option<String>,
}

impl Text {
    /// Raw text that will be entity-encoded on output.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Text already known to be safe HTML.
    pub fn pre_escaped(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            pre_escaped: true,
            mounted: None,
        }
    }

    /// Attaches a mounted payload to this leaf.
    pub fn with_mounted(mut self, mounted: impl Into<String>) -> Self {
        self.mounted = Some(mounted.into());
        self
    }
}

impl From<&str> for Text {
    fn from(content: &str) -> Self {
        Text::new(content)
    }
}

impl From<String> for Text {
    fn from(content: String) -> Self {
        Text::new(content)
    }
}

/// A value outside the string / list / nil domain.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Object(Map<String, Value>),
}

impl Scalar {
    /// The type name used in structural error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "Boolean",
            Scalar::Integer(_) => "Integer",
            Scalar::Float(_) => "Float",
            Scalar::Object(_) => "Object",
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Bool(flag) => Value::Bool(*flag),
            Scalar::Integer(n) => Value::from(*n),
            Scalar::Float(n) => serde_json::Number::from_f64(*n).map_or(Value::Null, Value::Number),
            Scalar::Object(map) => Value::Object(map.clone()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(flag) => write!(f, "{flag}"),
            Scalar::Integer(n) => write!(f, "{n}"),
            Scalar::Float(n) => write!(f, "{n}"),
            Scalar::Object(map) => write!(f, "{}", Value::Object(map.clone())),
        }
    }
}

/// A node of the input tree.
///
/// ## Examples
///
/// ```
/// use biscuit_dom::Node;
///
/// let row = Node::from(vec!["a", "b"]);
/// let table = Node::list([row, Node::from(vec!["c", "d"])]);
/// assert_eq!(table.to_string(), r#"[["a", "b"], ["c", "d"]]"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Node {
    #[default]
    Nil,
    Text(Text),
    List(Vec<Node>),
    Scalar(Scalar),
}

impl Node {
    /// A raw text leaf.
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(Text::new(content))
    }

    /// A pre-escaped text leaf.
    pub fn raw(content: impl Into<String>) -> Self {
        Node::Text(Text::pre_escaped(content))
    }

    pub fn list<I, N>(items: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        Node::List(items.into_iter().map(Into::into).collect())
    }

    /// The type name used in structural error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Nil => "Nil",
            Node::Text(_) => "String",
            Node::List(_) => "List",
            Node::Scalar(scalar) => scalar.kind(),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Node::List(_))
    }

    /// Owned mounted payload of a text leaf, if any.
    pub fn mounted(&self) -> Option<&str> {
        match self {
            Node::Text(text) => text.mounted.as_deref(),
            _ => None,
        }
    }

    /// Collects the non-list descendants of `items`, depth first.
    pub(crate) fn flatten_into<'a>(items: &'a [Node], out: &mut Vec<&'a Node>) {
        for item in items {
            match item {
                Node::List(children) => Node::flatten_into(children, out),
                other => out.push(other),
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Nil => write!(f, "nil"),
            Node::Text(text) => write!(f, "{:?}", text.content),
            Node::List(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Node::Scalar(scalar) => write!(f, "{scalar}"),
        }
    }
}

impl From<&str> for Node {
    fn from(content: &str) -> Self {
        Node::text(content)
    }
}

impl From<String> for Node {
    fn from(content: String) -> Self {
        Node::text(content)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl<N: Into<Node>> From<Vec<N>> for Node {
    fn from(items: Vec<N>) -> Self {
        Node::list(items)
    }
}

impl<N: Into<Node>> From<Option<N>> for Node {
    fn from(value: Option<N>) -> Self {
        value.map_or(Node::Nil, Into::into)
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}

/// A rendered fragment becomes a pre-escaped leaf that keeps its mounted
/// payload, so it can be placed inside a larger tree.
impl From<Rendered> for Node {
    fn from(rendered: Rendered) -> Self {
        Node::Text(Text {
            content: rendered.markup,
            pre_escaped: true,
            mounted: rendered.mounted,
        })
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Nil,
            Value::String(content) => Node::text(content),
            Value::Array(items) => Node::list(items),
            Value::Bool(flag) => Node::Scalar(Scalar::Bool(flag)),
            Value::Number(n) => match n.as_i64() {
                Some(int) => Node::Scalar(Scalar::Integer(int)),
                None => Node::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Value::Object(map) => Node::Scalar(Scalar::Object(map)),
        }
    }
}

/// Converts the ANSI colour codes in `text` into `<span>` markup.
///
/// The result is marked pre-escaped, so joining it into a list never
/// encodes the generated tags. The text itself is not entity-encoded.
///
/// ## Examples
///
/// ```
/// use biscuit_dom::ansi_to_html;
///
/// let text = ansi_to_html("\x1b[32mok\x1b[0m");
/// assert!(text.pre_escaped);
/// assert_eq!(text.content, r#"<span class="green">ok</span>"#);
/// ```
pub fn ansi_to_html(text: &str) -> Text {
    Text::pre_escaped(ansi::convert(text))
}
