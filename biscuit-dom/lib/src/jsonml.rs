//! JsonML export.
//!
//! A direct structural mapping of a node into `[tag, {attributes}?, ...children]`.
//! Nothing is escaped and no join strategy is involved.

use serde_json::{Map, Value};

use crate::attributes::{Attributes, hyphenize};
use crate::node::Node;

/// Exports `node` as a JsonML element named `tag`.
///
/// The attribute object is present whenever `attributes` is given (even if
/// empty). Names are hyphenized, values kept as they are. A list node
/// contributes its elements as children, any other node contributes itself.
///
/// ## Examples
///
/// ```
/// use biscuit_dom::{Attributes, Node, to_jsonml};
/// use serde_json::json;
///
/// let attrs = Attributes::new().with("data_id", "7").with("open", true);
/// let node = Node::from(vec!["a", "b"]);
///
/// assert_eq!(
///     to_jsonml(&node, "my_list", Some(&attrs)),
///     json!(["my-list", {"data-id": "7", "open": true}, "a", "b"])
/// );
/// ```
pub fn to_jsonml(node: &Node, tag: &str, attributes: Option<&Attributes>) -> Value {
    let mut element = vec![Value::String(hyphenize(tag))];

    if let Some(attributes) = attributes {
        let object: Map<String, Value> = attributes
            .iter()
            .map(|(name, value)| (hyphenize(name), value.to_json()))
            .collect();
        element.push(Value::Object(object));
    }

    match node {
        Node::Nil => {}
        Node::List(items) => element.extend(items.iter().map(node_to_json)),
        other => element.push(node_to_json(other)),
    }

    Value::Array(element)
}

fn node_to_json(node: &Node) -> Value {
    match node {
        Node::Nil => Value::Null,
        Node::Text(text) => Value::String(text.content.clone()),
        Node::List(items) => Value::Array(items.iter().map(node_to_json).collect()),
        Node::Scalar(scalar) => scalar.to_json(),
    }
}
