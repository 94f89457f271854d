//! DOM Node
//!
//! Nodes link to their neighbours by `NodeId` rather than by pointer, so the
//! whole tree lives in one arena and detached nodes keep their identity.

use crate::{DOMTokenList, InlineStyle, NodeId};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(content.into()))
    }

    /// Create a comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Comment(content.into()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
///
/// `class` and `style` are kept as ordinary attributes so serialization
/// reproduces the markup exactly; [`ElementData::class_list`] and
/// [`ElementData::style`] parse them on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,
    /// Attributes in insertion order
    pub attrs: Vec<Attribute>,
    /// Image resource finished loading (`HTMLImageElement.complete`)
    pub complete: bool,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            complete: false,
        }
    }

    /// Check the tag name (case-insensitive)
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Check attribute presence
    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(attr) = self
            .attrs
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
        {
            attr.value = value;
            return;
        }
        self.attrs.push(Attribute {
            name: name.to_ascii_lowercase(),
            value,
        });
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self
            .attrs
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))?;
        Some(self.attrs.remove(pos).value)
    }

    /// Parsed `class` attribute
    pub fn class_list(&self) -> DOMTokenList {
        DOMTokenList::from_string(self.get_attr("class").unwrap_or(""))
    }

    /// Check for a class token
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|t| t == class))
    }

    /// Apply an edit to the class list and write it back
    pub fn update_classes(&mut self, edit: impl FnOnce(&mut DOMTokenList)) {
        let mut list = self.class_list();
        edit(&mut list);
        self.set_attr("class", list.value());
    }

    /// Parsed `style` attribute
    pub fn style(&self) -> InlineStyle {
        InlineStyle::parse(self.get_attr("style").unwrap_or(""))
    }

    /// Apply an edit to the inline style and write it back.
    /// An empty declaration block removes the attribute.
    pub fn update_style(&mut self, edit: impl FnOnce(&mut InlineStyle)) {
        let mut style = self.style();
        edit(&mut style);
        if style.is_empty() {
            self.remove_attr("style");
        } else {
            self.set_attr("style", style.css_text());
        }
    }
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_roundtrip() {
        let mut el = ElementData::new("IMG");
        assert_eq!(el.tag, "img");

        el.set_attr("Loading", "lazy");
        assert_eq!(el.get_attr("loading"), Some("lazy"));

        el.set_attr("loading", "eager");
        assert_eq!(el.attrs.len(), 1);
        assert_eq!(el.remove_attr("loading").as_deref(), Some("eager"));
        assert!(!el.has_attr("loading"));
    }

    #[test]
    fn test_class_updates_preserve_order() {
        let mut el = ElementData::new("button");
        el.set_attr("class", "primary-button wide");
        el.update_classes(|c| c.add(&["btn-loading"]));
        assert_eq!(el.get_attr("class"), Some("primary-button wide btn-loading"));
        assert!(el.has_class("wide"));

        el.update_classes(|c| c.remove(&["btn-loading"]));
        assert_eq!(el.get_attr("class"), Some("primary-button wide"));
    }

    #[test]
    fn test_empty_style_drops_attribute() {
        let mut el = ElementData::new("div");
        el.update_style(|s| s.set_property("display", "none"));
        assert_eq!(el.get_attr("style"), Some("display: none;"));

        el.update_style(|s| {
            s.remove_property("display");
        });
        assert!(!el.has_attr("style"));
    }
}
