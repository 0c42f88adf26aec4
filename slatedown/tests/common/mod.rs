//! Shared builders for document-tree test fixtures.

use slatedown::tree::{kind, ElementNode, Node, TextLeaf};

pub fn el(kind: impl Into<String>, children: Vec<Node>) -> Node {
    Node::element(kind, children)
}

pub fn text(value: &str) -> Node {
    Node::text(value)
}

pub fn bold(value: &str) -> Node {
    Node::Text(TextLeaf {
        text: value.to_string(),
        bold: true,
        ..TextLeaf::default()
    })
}

pub fn italic(value: &str) -> Node {
    Node::Text(TextLeaf {
        text: value.to_string(),
        italic: true,
        ..TextLeaf::default()
    })
}

pub fn code(value: &str) -> Node {
    Node::Text(TextLeaf {
        text: value.to_string(),
        code: true,
        ..TextLeaf::default()
    })
}

pub fn link(url: &str, label: &str) -> Node {
    Node::Element(ElementNode {
        kind: kind::A.to_string(),
        children: vec![text(label)],
        url: Some(url.to_string()),
        ..ElementNode::default()
    })
}

pub fn item(content: &str) -> Node {
    el(kind::LI, vec![el(kind::LIC, vec![text(content)])])
}

pub fn task(content: &str, checked: bool) -> Node {
    Node::Element(ElementNode {
        kind: kind::LI.to_string(),
        children: vec![el(kind::LIC, vec![text(content)])],
        checked: Some(checked),
        ..ElementNode::default()
    })
}

pub fn row(cells: &[&str]) -> Node {
    el(
        kind::TR,
        cells
            .iter()
            .map(|cell| el(kind::TD, vec![text(cell)]))
            .collect(),
    )
}
