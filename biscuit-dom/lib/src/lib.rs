//! # biscuit-dom
//!
//! Render nested, tree-shaped data into HTML markup.
//!
//! The input is a [`Node`]: text leaves and lists of nodes. A tag path is
//! applied one level at a time, children are joined with the renderer's
//! [`RenderMode`], and text is entity-encoded on the way out. Any node may
//! carry "mounted" content (typically a `<script>` or `<style>` block) which
//! bubbles up out of band and is appended once after the document.
//!
//! ## Quick Start
//!
//! ```
//! use biscuit_dom::{Attributes, Node, RenderMode, Renderer, render_leaf};
//!
//! let chart = render_leaf("", Some("canvas"), &Attributes::new().with("id", "chart"), Some("<script>draw()</script>"));
//! let items = Node::list([Node::text("Tom & Jerry"), Node::from(chart)]);
//!
//! let renderer = Renderer::new(RenderMode::Compact);
//! let html = renderer
//!     .render_tree(&items, &["li", "ul"], &Attributes::new().with("class", "cast"), None)
//!     .unwrap();
//!
//! assert_eq!(
//!     html.markup,
//!     r#"<ul class="cast"><li>Tom &amp; Jerry</li><li><canvas id="chart"></canvas></li></ul>"#
//! );
//! assert_eq!(html.mounted.as_deref(), Some("<script>draw()</script>"));
//! ```
//!
//! ## Modules
//!
//! - [`render`] - The recursive renderer and the [`Rendered`] result
//! - [`node`] - The input tree
//! - [`join`] - Compact, nested and pre join strategies
//! - [`attributes`] - Tag and attribute formatting
//! - [`ansi`] - ANSI SGR codes to `<span>` markup
//! - [`escape`] - HTML entity encoding
//! - [`jsonml`] - JsonML export

pub mod ansi;
pub mod attributes;
pub mod error;
pub mod escape;
pub mod join;
pub mod jsonml;
pub mod node;
pub mod render;

pub use attributes::{AttrValue, Attributes, hyphenize};
pub use error::{DomError, DomResult};
pub use join::RenderMode;
pub use jsonml::to_jsonml;
pub use node::{Node, Scalar, Text, ansi_to_html};
pub use render::{Rendered, Renderer, Transform, render_leaf, render_tree, render_void};
