//! Cross-representation tree alignment (the enrichment core).
//!
//! Walks a document tree and the reference mdast of the same source in
//! lock-step, copying metadata the import pass dropped (checkbox state,
//! table column alignment) and reinserting reference-style links the
//! import discarded entirely.
//!
//! This is a two-pointer walk over sibling sequences, not a generic
//! diff: both sequences describe the same document in the same order,
//! but the tree may be missing nodes and metadata. Recovery policy on
//! drift is skip-on-mismatch and insert-on-recoverable-drop; the tree's
//! pre-existing nodes are never removed or reordered.

use crate::formats::markdown::reference::Definitions;
use crate::tree::{kind, ColumnAlign, ElementNode, Node, TextLeaf};
use markdown::mdast;

/// Align one sibling sequence of the tree against the reference AST,
/// recursing into matched children. Returns the enriched sequence.
pub fn align(tree: Vec<Node>, ast: &[mdast::Node], definitions: &Definitions) -> Vec<Node> {
    // Normalize the AST's nested inline styles (strong/emphasis/delete)
    // to the tree's flat leaf-with-marks shape before comparing.
    let ast = splice_inline_wrappers(ast);

    let mut tree = tree;
    let mut p = 0; // tree cursor
    let mut m = 0; // AST cursor

    while m < ast.len() {
        let ast_node = &ast[m];

        if p >= tree.len() {
            // Tree exhausted: reconstruct dropped link references,
            // silently pass over everything else.
            if let mdast::Node::LinkReference(reference) = ast_node {
                tree.push(reconstruct_link(reference, definitions));
                p += 1;
            }
            m += 1;
            continue;
        }

        if is_metadata_only(ast_node) {
            m += 1;
            continue;
        }

        if nodes_match(&tree[p], ast_node, definitions) {
            copy_metadata(&mut tree[p], ast_node);
            recurse_children(&mut tree[p], ast_node, definitions);
            p += 1;
            m += 1;
        } else if let mdast::Node::LinkReference(reference) = ast_node {
            // The import dropped this node; reinsert it without
            // touching the tree node currently at the cursor.
            tree.insert(p, reconstruct_link(reference, definitions));
            p += 1;
            m += 1;
        } else {
            // Drift: leave the tree node for the next AST node to try.
            m += 1;
        }
    }

    tree
}

/// Replace each strong/emphasis/delete wrapper by its children, at the
/// same sequence position, recursively.
fn splice_inline_wrappers(ast: &[mdast::Node]) -> Vec<mdast::Node> {
    let mut out = Vec::with_capacity(ast.len());
    for node in ast {
        match node {
            mdast::Node::Strong(wrapper) => {
                out.extend(splice_inline_wrappers(&wrapper.children))
            }
            mdast::Node::Emphasis(wrapper) => {
                out.extend(splice_inline_wrappers(&wrapper.children))
            }
            mdast::Node::Delete(wrapper) => {
                out.extend(splice_inline_wrappers(&wrapper.children))
            }
            other => out.push(other.clone()),
        }
    }
    out
}

/// AST nodes that never have a tree counterpart.
fn is_metadata_only(node: &mdast::Node) -> bool {
    matches!(
        node,
        mdast::Node::Definition(_)
            | mdast::Node::Html(_)
            | mdast::Node::Yaml(_)
            | mdast::Node::Toml(_)
    )
}

/// The type-compatibility relation between tree and AST nodes.
///
/// Links additionally require URL equality: the tree link's URL against
/// the AST link's `url`, or against the resolved definition for a
/// `linkReference`. Text leaves match any leaf-shaped AST node: `text`
/// without content equality (tolerating partial or merged runs), but
/// also `inlineCode` and `break`, which the import flattens onto plain
/// leaves. Leaving those two out would desynchronize the cursors on any
/// paragraph mixing them with recoverable nodes.
fn nodes_match(tree_node: &Node, ast_node: &mdast::Node, definitions: &Definitions) -> bool {
    let el = match tree_node {
        Node::Text(_) => {
            return matches!(
                ast_node,
                mdast::Node::Text(_) | mdast::Node::InlineCode(_) | mdast::Node::Break(_)
            )
        }
        Node::Element(el) => el,
    };

    if let mdast::Node::Heading(heading) = ast_node {
        return el.heading_level() == Some(heading.depth);
    }

    match (el.kind.as_str(), ast_node) {
        (kind::LI, mdast::Node::ListItem(_)) => true,
        (kind::UL, mdast::Node::List(list)) => !list.ordered,
        (kind::OL, mdast::Node::List(list)) => list.ordered,
        (kind::TABLE, mdast::Node::Table(_)) => true,
        (kind::TR, mdast::Node::TableRow(_)) => true,
        (kind::TD, mdast::Node::TableCell(_)) => true,
        (kind::LIC | kind::P, mdast::Node::Paragraph(_)) => true,
        (kind::BLOCKQUOTE, mdast::Node::Blockquote(_)) => true,
        (kind::CODE_BLOCK, mdast::Node::Code(_)) => true,
        (kind::HR, mdast::Node::ThematicBreak(_)) => true,
        (kind::IMG, mdast::Node::Image(_) | mdast::Node::ImageReference(_)) => true,
        (kind::A, mdast::Node::Link(link)) => {
            el.url.as_deref().unwrap_or_default() == link.url
        }
        (kind::A, mdast::Node::LinkReference(reference)) => {
            let resolved = definitions
                .get(&reference.identifier)
                .map(String::as_str)
                .unwrap_or_default();
            el.url.as_deref().unwrap_or_default() == resolved
        }
        _ => false,
    }
}

/// Copy metadata the import pass dropped from a matched AST node.
fn copy_metadata(tree_node: &mut Node, ast_node: &mdast::Node) {
    let Node::Element(el) = tree_node else { return };
    match ast_node {
        mdast::Node::ListItem(item) => {
            // Absence of `checked` means "not a task item"; never force
            // it to false.
            if let Some(checked) = item.checked {
                el.checked = Some(checked);
            }
        }
        mdast::Node::Table(table) => {
            el.align = Some(table.align.iter().map(column_align).collect());
        }
        _ => {}
    }
}

fn column_align(kind: &mdast::AlignKind) -> ColumnAlign {
    match kind {
        mdast::AlignKind::Left => ColumnAlign::Left,
        mdast::AlignKind::Center => ColumnAlign::Center,
        mdast::AlignKind::Right => ColumnAlign::Right,
        mdast::AlignKind::None => ColumnAlign::None,
    }
}

fn recurse_children(tree_node: &mut Node, ast_node: &mdast::Node, definitions: &Definitions) {
    let Node::Element(el) = tree_node else { return };
    let Some(ast_children) = ast_node.children() else {
        return;
    };
    if el.children.is_empty() || ast_children.is_empty() {
        return;
    }
    let children = std::mem::take(&mut el.children);
    el.children = align(children, ast_children, definitions);
}

/// Rebuild an `a` node for a link reference the import dropped.
///
/// Text children carry over as plain leaves; anything else falls back
/// to an empty leaf. This is a known-lossy fallback, not a general
/// inline converter.
fn reconstruct_link(reference: &mdast::LinkReference, definitions: &Definitions) -> Node {
    let url = definitions
        .get(&reference.identifier)
        .cloned()
        .unwrap_or_default();
    let children: Vec<Node> = reference
        .children
        .iter()
        .map(|child| match child {
            mdast::Node::Text(text) => Node::Text(TextLeaf {
                text: text.value.clone(),
                ..TextLeaf::default()
            }),
            _ => Node::Text(TextLeaf::default()),
        })
        .collect();
    Node::Element(ElementNode {
        kind: kind::A.to_string(),
        children,
        url: Some(url),
        ..ElementNode::default()
    })
}
