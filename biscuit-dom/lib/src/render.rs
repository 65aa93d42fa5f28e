//! The recursive tree renderer.
//!
//! A tag path such as `["td", "tr", "table"]` is applied one level at a
//! time from its last entry: the outermost list is wrapped in `table`,
//! each of its elements is rendered against `["td", "tr"]`, and so on until
//! a single tag remains for the leaves.
//!
//! ```
//! use biscuit_dom::{Attributes, Node, render_tree};
//!
//! let rows = Node::from(vec![vec!["a", "b"], vec!["c", "d"]]);
//! let html = render_tree(&rows, &["td", "tr", "table"], &Attributes::new(), None).unwrap();
//!
//! assert_eq!(
//!     html.markup,
//!     "<table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>"
//! );
//! ```
//!
//! ## Structure rules
//!
//! While zero or one tag levels remain below the current one, every element
//! must be a string, list, or nil. With two or more remaining, every
//! element must be a list. The whole list is checked before any element is
//! rendered and the first violation aborts the render.
//!
//! ## Mounted content
//!
//! Every render returns a [`Rendered`] pair. The mounted half collects the
//! payloads of all children depth first, then the payload given to the
//! current call, and is never escaped.

use std::borrow::Cow;
use std::fmt;

use tracing::{instrument, trace};

use crate::ansi;
use crate::attributes::{self, Attributes};
use crate::error::{DomError, DomResult};
use crate::escape::escape_for;
use crate::join::{Child, RenderMode};
use crate::node::{Node, Text};

/// Markup plus the side-channel mounted payload gathered from the subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub markup: String,
    pub mounted: Option<String>,
}

impl Rendered {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            mounted: None,
        }
    }

    /// The markup with the mounted payload appended once at the end.
    pub fn into_document(self) -> String {
        let mut document = self.markup;
        if let Some(mounted) = self.mounted {
            document.push_str(&mounted);
        }
        document
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markup)
    }
}

/// Maps raw leaf text before it is escaped.
pub type Transform<'t> = &'t dyn Fn(&str) -> String;

fn push_mounted(acc: &mut Option<String>, part: Option<&str>) {
    if let Some(part) = part {
        acc.get_or_insert_with(String::new).push_str(part);
    }
}

/// Renders trees with a fixed [`RenderMode`].
///
/// The mode belongs to the renderer, so renderers with different modes can
/// be used side by side (and across threads) without interfering.
///
/// ## Examples
///
/// ```
/// use biscuit_dom::{Attributes, Node, RenderMode, Renderer};
///
/// let mut renderer = Renderer::new(RenderMode::Nested);
/// let items = Node::from(vec!["a", "b"]);
///
/// let html = renderer.render_tree(&items, &["p"], &Attributes::new(), None).unwrap();
/// assert_eq!(html.markup, "<p>\n  a\n  b\n</p>");
///
/// renderer.set_mode(RenderMode::Compact);
/// let html = renderer.render_tree(&items, &["p"], &Attributes::new(), None).unwrap();
/// assert_eq!(html.markup, "<p>ab</p>");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Renderer {
    mode: RenderMode,
}

impl Renderer {
    pub fn new(mode: RenderMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Switches the join strategy for all later renders by this renderer.
    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }

    /// Renders a single text leaf, optionally wrapped in `tag`.
    ///
    /// With a tag, the escaped content also goes through ANSI conversion.
    /// Leaves do not depend on the render mode.
    pub fn render_leaf(
        &self,
        text: &Text,
        tag: Option<&str>,
        attributes: &Attributes,
        mounted: Option<&str>,
    ) -> Rendered {
        leaf(text, tag, attributes, mounted, None)
    }

    /// [`render_leaf`](Self::render_leaf) with a transform applied to the raw text.
    pub fn render_leaf_with(
        &self,
        text: &Text,
        tag: Option<&str>,
        attributes: &Attributes,
        mounted: Option<&str>,
        transform: Transform<'_>,
    ) -> Rendered {
        leaf(text, tag, attributes, mounted, Some(transform))
    }

    /// Renders `node` against the tag path `tags` (innermost first).
    ///
    /// `attributes` apply to the outermost tag only. A text node accepts
    /// at most one tag, a nil node with a tag renders as a void element.
    ///
    /// ## Errors
    ///
    /// Returns a [`DomError`] when an element does not fit the tag path.
    #[instrument(level = "debug", skip_all, fields(mode = %self.mode, tags = ?tags))]
    pub fn render_tree(
        &self,
        node: &Node,
        tags: &[&str],
        attributes: &Attributes,
        mounted: Option<&str>,
    ) -> DomResult<Rendered> {
        self.node(node, tags, attributes, mounted, None)
    }

    /// [`render_tree`](Self::render_tree) with a transform applied to every
    /// raw text leaf before escaping.
    #[instrument(level = "debug", skip_all, fields(mode = %self.mode, tags = ?tags))]
    pub fn render_tree_with(
        &self,
        node: &Node,
        tags: &[&str],
        attributes: &Attributes,
        mounted: Option<&str>,
        transform: Transform<'_>,
    ) -> DomResult<Rendered> {
        self.node(node, tags, attributes, mounted, Some(transform))
    }

    fn node(
        &self,
        node: &Node,
        tags: &[&str],
        attributes: &Attributes,
        mounted: Option<&str>,
        transform: Option<Transform<'_>>,
    ) -> DomResult<Rendered> {
        match (node, tags) {
            (Node::List(items), _) => self.list(items, tags, attributes, mounted, transform),
            (Node::Scalar(_), _) => Err(DomError::structural_type(node)),
            (_, [.., inner, _]) => Err(DomError::structural_nesting(inner, node)),
            (Node::Text(text), _) => Ok(leaf(text, tags.first().copied(), attributes, mounted, transform)),
            (Node::Nil, [tag]) => Ok(render_void(tag, attributes, mounted)),
            (Node::Nil, _) => {
                let mut gathered = None;
                push_mounted(&mut gathered, mounted);
                Ok(Rendered {
                    markup: String::new(),
                    mounted: gathered,
                })
            }
        }
    }

    fn list(
        &self,
        items: &[Node],
        tags: &[&str],
        attributes: &Attributes,
        mounted: Option<&str>,
        transform: Option<Transform<'_>>,
    ) -> DomResult<Rendered> {
        let (tag, recurse) = match tags.split_last() {
            Some((tag, recurse)) => (Some(*tag), recurse),
            None => (None, &[][..]),
        };
        trace!(
            tag,
            elements = items.len(),
            levels_below = recurse.len(),
            mode = %self.mode,
            "rendering list"
        );

        let elements: Vec<&Node> = if recurse.is_empty() {
            let mut flat = Vec::with_capacity(items.len());
            Node::flatten_into(items, &mut flat);
            flat
        } else {
            items.iter().collect()
        };

        if recurse.len() <= 1 {
            if let Some(bad) = elements.iter().find(|node| matches!(node, Node::Scalar(_))) {
                return Err(DomError::structural_type(bad));
            }
        } else if let Some(bad) = elements.iter().find(|node| !node.is_list()) {
            return Err(DomError::structural_nesting(recurse[recurse.len() - 2], bad));
        }

        let mut gathered = None;
        let mut children = Vec::with_capacity(elements.len());

        if recurse.is_empty() {
            for element in &elements {
                match element {
                    Node::Text(text) => {
                        push_mounted(&mut gathered, text.mounted.as_deref());
                        children.push(leaf_child(text, transform));
                    }
                    Node::Nil => children.push(Child::markup("")),
                    // flattened away or rejected above
                    Node::List(_) | Node::Scalar(_) => {}
                }
            }
        } else {
            let bare = Attributes::new();
            for element in &elements {
                let rendered = self.node(element, recurse, &bare, None, transform)?;
                push_mounted(&mut gathered, rendered.mounted.as_deref());
                children.push(Child::markup(rendered.markup));
            }
        }

        let joined = self.mode.join(&children, tag);
        let markup = match tag {
            Some(tag) => attributes::format(tag, attributes).wrap(&joined),
            None => joined,
        };
        push_mounted(&mut gathered, mounted);

        Ok(Rendered {
            markup,
            mounted: gathered,
        })
    }
}

fn leaf_child<'a>(text: &'a Text, transform: Option<Transform<'_>>) -> Child<'a> {
    match transform {
        Some(transform) if !text.pre_escaped => Child::raw(transform(&text.content)),
        _ => Child {
            text: Cow::Borrowed(&text.content),
            pre_escaped: text.pre_escaped,
        },
    }
}

fn leaf(
    text: &Text,
    tag: Option<&str>,
    attributes: &Attributes,
    mounted: Option<&str>,
    transform: Option<Transform<'_>>,
) -> Rendered {
    let content: Cow<'_, str> = match transform {
        Some(transform) if !text.pre_escaped => Cow::Owned(transform(&text.content)),
        _ => Cow::Borrowed(&text.content),
    };

    let markup = match tag {
        Some(tag) => {
            let escaped = escape_for(&content, text.pre_escaped, Some(tag));
            attributes::format(tag, attributes).wrap(&ansi::convert(&escaped))
        }
        None => escape_for(&content, text.pre_escaped, None).into_owned(),
    };

    let mut gathered = None;
    push_mounted(&mut gathered, text.mounted.as_deref());
    push_mounted(&mut gathered, mounted);

    Rendered {
        markup,
        mounted: gathered,
    }
}

/// Renders a single text leaf with the default renderer.
///
/// ## Examples
///
/// ```
/// use biscuit_dom::{Attributes, render_leaf};
///
/// let html = render_leaf("Tom & Jerry", Some("em"), &Attributes::new(), None);
/// assert_eq!(html.markup, "<em>Tom &amp; Jerry</em>");
/// ```
pub fn render_leaf(
    text: impl Into<Text>,
    tag: Option<&str>,
    attributes: &Attributes,
    mounted: Option<&str>,
) -> Rendered {
    let text: Text = text.into();
    leaf(&text, tag, attributes, mounted, None)
}

/// Renders `node` with a default (compact) [`Renderer`].
pub fn render_tree(
    node: &Node,
    tags: &[&str],
    attributes: &Attributes,
    mounted: Option<&str>,
) -> DomResult<Rendered> {
    Renderer::default().render_tree(node, tags, attributes, mounted)
}

/// Renders the self-closing element `<tag attrs />`.
///
/// ## Examples
///
/// ```
/// use biscuit_dom::{Attributes, render_void};
///
/// let html = render_void("input", &Attributes::new().with("disabled", true), None);
/// assert_eq!(html.markup, r#"<input disabled="" />"#);
/// ```
pub fn render_void(tag: &str, attributes: &Attributes, mounted: Option<&str>) -> Rendered {
    let mut gathered = None;
    push_mounted(&mut gathered, mounted);

    Rendered {
        markup: attributes::format(tag, attributes).void(),
        mounted: gathered,
    }
}
