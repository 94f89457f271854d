//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed: removal only detaches, so ids stay stable and a
//! detached subtree can be re-inserted.

use crate::{DomError, DomResult, ElementData, Fragment, FragmentNode, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes ever allocated
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Node::text(content))
    }

    /// Element data of a node
    pub fn element(&self, id: NodeId) -> DomResult<&ElementData> {
        self.get(id)
            .ok_or(DomError::NotFound(id))?
            .as_element()
            .ok_or(DomError::NotAnElement(id))
    }

    /// Mutable element data of a node
    pub fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        self.get_mut(id)
            .ok_or(DomError::NotFound(id))?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))
    }

    /// Parent of a node, if attached to one
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Iterate direct children
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Pre-order descendants of `id`, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).collect();
        stack.reverse();
        while let Some(node) = stack.pop() {
            out.push(node);
            let mut kids: Vec<NodeId> = self.children(node).collect();
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    /// Ancestors from the parent upward
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&n| self.parent(n))
    }

    /// Check whether `ancestor` is `node` or contains it
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Attached to the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(NodeId::ROOT, id)
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        for id in [parent, child] {
            if self.get(id).is_none() {
                return Err(DomError::NotFound(id));
            }
        }
        if child == NodeId::ROOT || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        if matches!(self.nodes[parent.index()].data, NodeData::Text(_) | NodeData::Comment(_)) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`, moving it if attached
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference` (or at the end when `None`)
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        self.check_insert(parent, child)?;
        if let Some(r) = reference {
            if self.parent(r) != Some(parent) {
                return Err(DomError::NotAChild { parent, child: r });
            }
            if r == child {
                return Ok(child);
            }
        }
        self.detach(child);

        let (prev, next) = match reference {
            Some(r) => (self.nodes[r.index()].prev_sibling, r),
            None => (self.nodes[parent.index()].last_child, NodeId::NONE),
        };

        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = child;
        } else {
            self.nodes[parent.index()].last_child = child;
        }
        Ok(child)
    }

    /// Detach a node from its parent. Returns false if it had none.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return false;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
        true
    }

    /// Detach every child of `id`
    pub fn clear_children(&mut self, id: NodeId) {
        let kids: Vec<NodeId> = self.children(id).collect();
        for kid in kids {
            self.detach(kid);
        }
    }

    /// Owned copy of the children of `id`
    pub fn snapshot_children(&self, id: NodeId) -> Fragment {
        Fragment::new(self.children(id).filter_map(|c| self.snapshot(c)).collect())
    }

    fn snapshot(&self, id: NodeId) -> Option<FragmentNode> {
        match &self.get(id)?.data {
            NodeData::Element(el) => Some(FragmentNode::Element {
                tag: el.tag.clone(),
                attrs: el.attrs.iter().map(|a| (a.name.clone(), a.value.clone())).collect(),
                children: self.children(id).filter_map(|c| self.snapshot(c)).collect(),
            }),
            NodeData::Text(t) => Some(FragmentNode::Text(t.clone())),
            NodeData::Comment(c) => Some(FragmentNode::Comment(c.clone())),
            NodeData::Document => None,
        }
    }

    /// Instantiate a fragment as the last children of `parent`
    pub fn append_fragment(&mut self, parent: NodeId, fragment: &Fragment) -> DomResult<Vec<NodeId>> {
        fragment
            .nodes()
            .iter()
            .map(|node| {
                let id = self.instantiate(node);
                self.append_child(parent, id)
            })
            .collect()
    }

    /// Replace all children of `parent` with a fresh copy of `fragment`
    pub fn replace_children(&mut self, parent: NodeId, fragment: &Fragment) -> DomResult<Vec<NodeId>> {
        if self.get(parent).is_none() {
            return Err(DomError::NotFound(parent));
        }
        self.clear_children(parent);
        self.append_fragment(parent, fragment)
    }

    fn instantiate(&mut self, node: &FragmentNode) -> NodeId {
        match node {
            FragmentNode::Element { tag, attrs, children } => {
                let id = self.create_element(tag);
                if let Some(el) = self.nodes[id.index()].as_element_mut() {
                    for (name, value) in attrs {
                        el.set_attr(name, value.as_str());
                    }
                }
                for child in children {
                    let child_id = self.instantiate(child);
                    // Freshly allocated element under a fresh parent: cannot fail
                    let _ = self.append_child(id, child_id);
                }
                id
            }
            FragmentNode::Text(t) => self.create_text(t),
            FragmentNode::Comment(c) => self.alloc(Node::comment(c.as_str())),
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.get(current).map_or(NodeId::NONE, |n| n.next_sibling);
        Some(current)
    }
}
