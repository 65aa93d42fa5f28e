use thiserror::Error;

use crate::node::Node;

pub type DomResult<T> = Result<T, DomError>;

/// Errors raised while validating the shape of a tree.
///
/// Both are raised at the first malformed element; no partial output is
/// produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// An element that should be a string, list, or nil is something else.
    #[error("Expecting every element to be a string, list, or nil: `{kind}:{value}`")]
    StructuralType { kind: &'static str, value: String },

    /// An element that must be a list, because further tag levels remain
    /// to be applied inside it, is not.
    #[error("Cannot apply tag `{tag}` to `{kind}:{value}`")]
    StructuralNesting {
        tag: String,
        kind: &'static str,
        value: String,
    },
}

impl DomError {
    pub(crate) fn structural_type(node: &Node) -> Self {
        DomError::StructuralType {
            kind: node.kind(),
            value: node.to_string(),
        }
    }

    pub(crate) fn structural_nesting(tag: &str, node: &Node) -> Self {
        DomError::StructuralNesting {
            tag: tag.to_string(),
            kind: node.kind(),
            value: node.to_string(),
        }
    }
}
