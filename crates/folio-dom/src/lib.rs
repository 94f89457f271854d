//! Folio DOM - Document Object Model
//!
//! Arena-backed document tree used by the page enhancement layer.
//! The host page owns a [`Document`], mirrors browser state into it
//! (image completion, layout boxes) and lets enhancers mutate it.

mod classlist;
mod document;
mod fragment;
mod geometry;
mod node;
mod selector;
mod serialize;
mod style;
mod tree;

pub use classlist::DOMTokenList;
pub use document::Document;
pub use fragment::{Fragment, FragmentNode};
pub use geometry::{DOMRect, RootMargin};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use selector::{Selector, SelectorError, SelectorList};
pub use style::InlineStyle;
pub use tree::DomTree;

/// Node identifier (index into arena)
///
/// Identifiers are never reused, so a `NodeId` doubles as the identity of a
/// node for as long as the document lives, attached or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node {0} not found")]
    NotFound(NodeId),

    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("cannot insert {child} under {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
}
