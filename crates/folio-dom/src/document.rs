//! Document - High-level document API

use std::collections::HashMap;

use crate::serialize;
use crate::{DOMRect, DomResult, DomTree, ElementData, Fragment, NodeId, SelectorList};

/// HTML Document
///
/// Besides the tree, the document carries the browser-side facts enhancers
/// read but cannot compute themselves: layout boxes (for offset sizes and
/// intersection math) and per-image completion.
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Layout boxes reported by the host
    layout: HashMap<NodeId, DOMRect>,
}

impl Document {
    /// Create a new document with `<html><head></head><body></body></html>`
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh nodes under the document root
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
            layout: HashMap::new(),
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    // ------------------------------------------------------------------
    // Element helpers
    // ------------------------------------------------------------------

    pub fn element(&self, id: NodeId) -> DomResult<&ElementData> {
        self.tree.element(id)
    }

    pub fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        self.tree.element_mut(id)
    }

    /// Create a detached element with the given classes
    pub fn create_element_with_class(&mut self, tag: &str, class: &str) -> NodeId {
        let id = self.tree.create_element(tag);
        if !class.is_empty() {
            if let Ok(el) = self.tree.element_mut(id) {
                el.set_attr("class", class);
            }
        }
        id
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.tree.element(id).ok()?.get_attr(name)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.tree.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        Ok(self.tree.element_mut(id)?.remove_attr(name))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.tree.element(id).is_ok_and(|el| el.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, classes: &[&str]) -> DomResult<()> {
        self.tree.element_mut(id)?.update_classes(|list| list.add(classes));
        Ok(())
    }

    pub fn remove_class(&mut self, id: NodeId, classes: &[&str]) -> DomResult<()> {
        self.tree.element_mut(id)?.update_classes(|list| list.remove(classes));
        Ok(())
    }

    /// Inline style property (`element.style[name]`)
    pub fn style_property(&self, id: NodeId, name: &str) -> Option<String> {
        let el = self.tree.element(id).ok()?;
        el.style().get_property(name).map(str::to_string)
    }

    /// Set an inline style property; an empty value clears it
    pub fn set_style_property(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.tree
            .element_mut(id)?
            .update_style(|style| style.set_property(name, value));
        Ok(())
    }

    /// Computed `position`. Only inline declarations participate in the
    /// cascade here, so anything unset resolves to the initial `static`.
    pub fn computed_position(&self, id: NodeId) -> String {
        self.style_property(id, "position")
            .unwrap_or_else(|| "static".to_string())
    }

    /// `HTMLImageElement.complete`
    pub fn is_complete(&self, id: NodeId) -> bool {
        self.tree.element(id).is_ok_and(|el| el.complete)
    }

    /// Record whether an image's resource finished loading
    pub fn set_complete(&mut self, id: NodeId, complete: bool) -> DomResult<()> {
        self.tree.element_mut(id)?.complete = complete;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Record the layout box of a node
    pub fn set_layout_box(&mut self, id: NodeId, rect: DOMRect) {
        self.layout.insert(id, rect);
    }

    /// Layout box of a node, if the host reported one
    pub fn layout_box(&self, id: NodeId) -> Option<DOMRect> {
        self.layout.get(&id).copied()
    }

    /// `offsetHeight`; zero when no box is known
    pub fn offset_height(&self, id: NodeId) -> f64 {
        self.layout_box(id).map_or(0.0, |r| r.height)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// All matching elements under `scope`, in document order
    pub fn query_selector_all_in(&self, scope: NodeId, selectors: &SelectorList) -> Vec<NodeId> {
        self.tree
            .descendants(scope)
            .into_iter()
            .filter(|&id| self.tree.element(id).is_ok_and(|el| selectors.matches(el)))
            .collect()
    }

    /// All matching elements in the document, in document order
    pub fn query_selector_all(&self, selectors: &SelectorList) -> Vec<NodeId> {
        self.query_selector_all_in(self.tree.root(), selectors)
    }

    /// First matching element under `scope`
    pub fn query_selector_in(&self, scope: NodeId, selectors: &SelectorList) -> Option<NodeId> {
        self.tree
            .descendants(scope)
            .into_iter()
            .find(|&id| self.tree.element(id).is_ok_and(|el| selectors.matches(el)))
    }

    /// Nearest inclusive ancestor matching the selectors
    pub fn closest(&self, id: NodeId, selectors: &SelectorList) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.tree.ancestors(id))
            .find(|&n| self.tree.element(n).is_ok_and(|el| selectors.matches(el)))
    }

    // ------------------------------------------------------------------
    // Markup
    // ------------------------------------------------------------------

    /// `innerHTML` getter
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        serialize::write_children(&mut out, &self.tree, id);
        out
    }

    /// `outerHTML` getter
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        serialize::write_node(&mut out, &self.tree, id);
        out
    }

    /// Append fragment nodes to `parent`
    pub fn append_fragment(&mut self, parent: NodeId, fragment: &Fragment) -> DomResult<Vec<NodeId>> {
        self.tree.append_fragment(parent, fragment)
    }

    /// Replace the content of `id` (the `innerHTML` setter, fed a fragment)
    pub fn set_content(&mut self, id: NodeId, fragment: &Fragment) -> DomResult<Vec<NodeId>> {
        self.tree.replace_children(id, fragment)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
