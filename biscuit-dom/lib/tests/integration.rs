//! Integration tests for the biscuit-dom library.
//!
//! These exercise the public API end to end: building trees, rendering
//! them in each mode, and collecting mounted content.

use biscuit_dom::{
    AttrValue, Attributes, DomError, Node, RenderMode, Renderer, Text, ansi_to_html, render_leaf,
    render_tree, render_void, to_jsonml,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

fn table() -> Node {
    Node::from(vec![vec!["a", "b"], vec!["c", "d"]])
}

// ============================================================================
// Join strategies
// ============================================================================

#[test]
fn test_nested_table_indents_every_level() {
    let html = Renderer::new(RenderMode::Nested)
        .render_tree(&table(), &["td", "tr", "table"], &Attributes::new(), None)
        .unwrap();

    let expected = "\
<table>
  <tr>
    <td>a</td>
    <td>b</td>
  </tr>
  <tr>
    <td>c</td>
    <td>d</td>
  </tr>
</table>";
    assert_eq!(html.markup, expected);
}

#[test]
fn test_pre_list_is_a_single_comment() {
    let html = Renderer::new(RenderMode::Pre)
        .render_tree(&Node::from(vec!["a", "b"]), &["li", "ul"], &Attributes::new(), None)
        .unwrap();

    let expected = "\
<ul><!--
  --><li>a</li><!--
  --><li>b</li><!--
--></ul>";
    assert_eq!(html.markup, expected);
}

#[test]
fn test_switching_mode_between_subtrees() {
    let mut renderer = Renderer::new(RenderMode::Nested);
    let code = renderer
        .render_tree(&Node::from(vec!["x"]), &["code"], &Attributes::new(), None)
        .unwrap();

    renderer.set_mode(RenderMode::Compact);
    let page = renderer
        .render_tree(
            &Node::list([Node::text("see "), Node::from(code)]),
            &["p"],
            &Attributes::new(),
            None,
        )
        .unwrap();

    assert_eq!(page.markup, "<p>see <code>\n  x\n</code></p>");
}

// ============================================================================
// Escaping
// ============================================================================

#[test]
fn test_children_are_escaped_once() {
    let bold = render_leaf("<b>", Some("b"), &Attributes::new(), None);
    let html = render_tree(
        &Node::list([Node::from(bold), Node::text("&")]),
        &["p"],
        &Attributes::new(),
        None,
    )
    .unwrap();

    assert_eq!(html.markup, "<p><b>&lt;b&gt;</b>&amp;</p>");
}

#[test]
fn test_script_block_as_mounted_content() {
    let script = render_leaf("if (a < b) { go(); }", Some("script"), &Attributes::new(), None);
    let widget = render_void(
        "div",
        &Attributes::new().with("id", "widget"),
        Some(&script.markup),
    );

    let page = render_tree(
        &Node::list([Node::text("intro"), Node::from(widget)]),
        &["section"],
        &Attributes::new(),
        None,
    )
    .unwrap();

    assert_eq!(
        page.into_document(),
        r#"<section>intro<div id="widget" /></section><script>if (a < b) { go(); }</script>"#
    );
}

// ============================================================================
// ANSI
// ============================================================================

#[test]
fn test_ansi_output_joined_into_list() {
    let coloured = ansi_to_html("\x1b[32mpass\x1b[0m");
    let html = render_tree(
        &Node::list([Node::from(coloured), Node::text(" <ok>")]),
        &["pre"],
        &Attributes::new(),
        None,
    )
    .unwrap();

    assert_eq!(
        html.markup,
        r#"<pre><span class="green">pass</span> &lt;ok&gt;</pre>"#
    );
}

#[test]
fn test_ansi_spans_are_not_balanced() {
    let html = render_leaf("\x1b[31m\x1b[1mboldred\x1b[0m", Some("div"), &Attributes::new(), None);
    assert_eq!(
        html.markup,
        r#"<div><span class="red"><span class="bold">boldred</span></div>"#
    );
}

// ============================================================================
// Mounted content
// ============================================================================

#[test]
fn test_deep_mounted_content_reaches_the_top() {
    let deep = render_leaf(
        "chart",
        Some("canvas"),
        &Attributes::new(),
        Some("<script>draw()</script>"),
    );
    let sibling = render_leaf("note", Some("em"), &Attributes::new(), Some("<style>em{}</style>"));

    let rows = Node::list([
        Node::list([Node::from(sibling), Node::text("b")]),
        Node::list([Node::text("c"), Node::list([Node::from(deep)])]),
    ]);

    let html = render_tree(&rows, &["td", "tr", "table"], &Attributes::new(), None).unwrap();

    assert_eq!(
        html.mounted.as_deref(),
        Some("<style>em{}</style><script>draw()</script>")
    );
    assert!(!html.markup.contains("<script>"));
}

#[test]
fn test_no_mounted_content() {
    let html = render_tree(&table(), &["td", "tr", "table"], &Attributes::new(), None).unwrap();
    assert_eq!(html.mounted, None);
    assert_eq!(html.clone().into_document(), html.markup);
}

// ============================================================================
// Structural errors
// ============================================================================

#[test]
fn test_mixed_list_and_string_rejected_under_two_levels() {
    let items = Node::list([Node::from(vec!["x", "y"]), Node::text("z")]);
    let err = render_tree(&items, &["li", "ul", "div"], &Attributes::new(), None).unwrap_err();

    assert!(matches!(err, DomError::StructuralNesting { ref tag, .. } if tag == "li"));
    assert_eq!(err.to_string(), r#"Cannot apply tag `li` to `String:"z"`"#);
}

#[test]
fn test_json_scalars_are_rejected() {
    let node = Node::from(json!(["a", 42]));
    let err = render_tree(&node, &["p"], &Attributes::new(), None).unwrap_err();

    assert_eq!(
        err,
        DomError::StructuralType {
            kind: "Integer",
            value: "42".to_string(),
        }
    );
}

#[test]
fn test_json_tree_renders() {
    let node = Node::from(json!([["Name", "Role"], ["Ada", null]]));
    let html = render_tree(&node, &["td", "tr", "table"], &Attributes::new(), None).unwrap();
    assert_eq!(
        html.markup,
        "<table><tr><td>Name</td><td>Role</td></tr><tr><td>Ada</td><td /></tr></table>"
    );
}

// ============================================================================
// Attributes and JsonML
// ============================================================================

#[test]
fn test_attribute_semantics_in_rendered_tag() {
    let attrs = Attributes::new()
        .with("a", AttrValue::Nil)
        .with("b", true)
        .with("c", false)
        .with("d", "x");
    let html = render_leaf(Text::new("t"), Some("my_tag"), &attrs, None);
    assert_eq!(html.markup, r#"<my-tag b="" c="none" d="x">t</my-tag>"#);
}

#[test]
fn test_jsonml_export_of_table() {
    assert_eq!(
        to_jsonml(&table(), "table", Some(&Attributes::new().with("class", "grid"))),
        json!(["table", {"class": "grid"}, ["a", "b"], ["c", "d"]])
    );
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: plain text renders to itself
    #[test]
    fn plain_text_renders_unchanged(s in "[a-zA-Z0-9 .,:;!?-]{0,100}") {
        prop_assert_eq!(render_leaf(s.as_str(), None, &Attributes::new(), None).markup, s);
    }

    /// Property: leaf content never leaks markup characters
    #[test]
    fn leaf_content_is_always_escaped(s in "[^\x1b]{0,100}") {
        let html = render_leaf(s.as_str(), Some("p"), &Attributes::new(), None).markup;
        let inner = &html["<p>".len()..html.len() - "</p>".len()];
        prop_assert!(!inner.contains('<'));
        prop_assert!(!inner.contains('>'));
        prop_assert!(!inner.contains('"'));
    }

    /// Property: pre-escaped text is never re-encoded
    #[test]
    fn pre_escaped_is_idempotent(s in ".{0,100}") {
        let once = render_leaf(s.as_str(), None, &Attributes::new(), None).markup;
        let twice = render_leaf(Text::pre_escaped(once.clone()), None, &Attributes::new(), None).markup;
        prop_assert_eq!(once, twice);
    }

    /// Property: every rendered child in nested mode sits on its own indented line
    #[test]
    fn nested_children_are_indented(items in proptest::collection::vec("[a-z]{1,8}", 1..6)) {
        let node = Node::list(items.iter().map(String::as_str));
        let html = Renderer::new(RenderMode::Nested)
            .render_tree(&node, &["div"], &Attributes::new(), None)
            .unwrap()
            .markup;

        let lines: Vec<&str> = html.lines().collect();
        prop_assert_eq!(lines.len(), items.len() + 2);
        for (line, item) in lines[1..lines.len() - 1].iter().zip(&items) {
            prop_assert_eq!(*line, format!("  {item}"));
        }
    }
}
