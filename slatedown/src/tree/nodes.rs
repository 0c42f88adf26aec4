//! Core data structures for the generic document tree.
//!
//! The tree mirrors the JSON shape produced by block-based rich-text
//! editors: elements carry a `type` string and a `children` sequence,
//! text leaves carry a `text` string plus independent boolean mark
//! flags. Unknown `type` values are legal; consumers degrade to
//! rendering the children.

use serde::{Deserialize, Serialize};

/// Element type vocabulary.
///
/// Heading types are `h1`..`h6` and are recognized through
/// [`ElementNode::heading_level`] rather than listed here.
pub mod kind {
    pub const P: &str = "p";
    pub const BLOCKQUOTE: &str = "blockquote";
    pub const UL: &str = "ul";
    pub const OL: &str = "ol";
    pub const LI: &str = "li";
    /// Content wrapper inside a list item.
    pub const LIC: &str = "lic";
    pub const CODE_BLOCK: &str = "code_block";
    pub const CODE_LINE: &str = "code_line";
    pub const HR: &str = "hr";
    pub const A: &str = "a";
    pub const IMG: &str = "img";
    pub const TABLE: &str = "table";
    pub const TR: &str = "tr";
    pub const TD: &str = "td";
}

/// A node of the document tree: either an element or a text leaf.
///
/// Serialized untagged: elements are objects with a `type` field,
/// leaves are objects with a `text` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Element(ElementNode),
    Text(TextLeaf),
}

impl Node {
    /// Build an element node with the given type and children.
    pub fn element(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element(ElementNode::new(kind, children))
    }

    /// Build a plain (unmarked) text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextLeaf {
            text: text.into(),
            ..TextLeaf::default()
        })
    }

    /// The element with the given type, if this node is one.
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }
}

/// A text leaf. Marks are independent flags; any combination is legal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextLeaf {
    pub text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
}

fn is_false(flag: &bool) -> bool {
    !flag
}

/// A typed element with children and type-specific fields.
///
/// `checked` is present only on task-list items; its absence means
/// "not a task item", which is distinct from `Some(false)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Vec<ColumnAlign>>,
}

impl ElementNode {
    pub fn new(kind: impl Into<String>, children: Vec<Node>) -> Self {
        ElementNode {
            kind: kind.into(),
            children,
            ..ElementNode::default()
        }
    }

    /// Heading level for `h1`..`h6` types, `None` for everything else.
    pub fn heading_level(&self) -> Option<u8> {
        let level = self.kind.strip_prefix('h')?.parse::<u8>().ok()?;
        (1..=6).contains(&level).then_some(level)
    }

    pub fn is_list(&self) -> bool {
        self.kind == kind::UL || self.kind == kind::OL
    }
}

/// Per-column table alignment; mirrors mdast's `align` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlign {
    Left,
    Center,
    Right,
    None,
}
