//! HTML serialization (`innerHTML` / `outerHTML` getters)

use crate::{DomTree, FragmentNode, NodeData, NodeId};

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

fn escape_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn open_tag<'a>(out: &mut String, tag: &str, attrs: impl Iterator<Item = (&'a str, &'a str)>) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_attr(out, value);
        out.push('"');
    }
    out.push('>');
}

fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Serialize a tree node and its subtree
pub(crate) fn write_node(out: &mut String, tree: &DomTree, id: NodeId) {
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.data {
        NodeData::Element(el) => {
            open_tag(out, &el.tag, el.attrs.iter().map(|a| (a.name.as_str(), a.value.as_str())));
            if !is_void(&el.tag) {
                write_children(out, tree, id);
                close_tag(out, &el.tag);
            }
        }
        NodeData::Text(t) => escape_text(out, t),
        NodeData::Comment(c) => {
            out.push_str("<!--");
            out.push_str(c);
            out.push_str("-->");
        }
        NodeData::Document => write_children(out, tree, id),
    }
}

/// Serialize the children of a tree node
pub(crate) fn write_children(out: &mut String, tree: &DomTree, id: NodeId) {
    for child in tree.children(id) {
        write_node(out, tree, child);
    }
}

/// Serialize a detached fragment node
pub(crate) fn write_fragment_node(out: &mut String, node: &FragmentNode) {
    match node {
        FragmentNode::Element { tag, attrs, children } => {
            open_tag(out, tag, attrs.iter().map(|(n, v)| (n.as_str(), v.as_str())));
            if !is_void(tag) {
                for child in children {
                    write_fragment_node(out, child);
                }
                close_tag(out, tag);
            }
        }
        FragmentNode::Text(t) => escape_text(out, t),
        FragmentNode::Comment(c) => {
            out.push_str("<!--");
            out.push_str(c);
            out.push_str("-->");
        }
    }
}
