//! Detached markup fragments
//!
//! A [`Fragment`] is an owned copy of a run of sibling nodes. It is used to
//! snapshot element content (and restore it exactly) and to describe small
//! pieces of markup to insert, without going through an HTML parser.

/// Owned node, detached from any tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentNode {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<FragmentNode>,
    },
    Text(String),
    Comment(String),
}

impl FragmentNode {
    pub fn element(tag: &str) -> Self {
        Self::Element {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Builder: add an attribute (no-op on non-elements)
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        if let Self::Element { attrs, .. } = &mut self {
            attrs.push((name.to_ascii_lowercase(), value.to_string()));
        }
        self
    }

    /// Builder: set `class`
    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    /// Builder: append a child (no-op on non-elements)
    pub fn child(mut self, node: FragmentNode) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    /// Builder: append a text child
    pub fn with_text(self, content: &str) -> Self {
        self.child(Self::text(content))
    }
}

/// Ordered list of sibling nodes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    nodes: Vec<FragmentNode>,
}

impl Fragment {
    pub fn new(nodes: Vec<FragmentNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[FragmentNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialized markup, the same text `inner_html` would produce
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            crate::serialize::write_fragment_node(&mut out, node);
        }
        out
    }
}

impl From<FragmentNode> for Fragment {
    fn from(node: FragmentNode) -> Self {
        Self { nodes: vec![node] }
    }
}

impl FromIterator<FragmentNode> for Fragment {
    fn from_iter<I: IntoIterator<Item = FragmentNode>>(iter: I) -> Self {
        Self { nodes: iter.into_iter().collect() }
    }
}
