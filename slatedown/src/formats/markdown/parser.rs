//! Markdown parsing (Markdown → tree import)
//!
//! Converts Markdown text to the generic document tree.
//! Pipeline: Markdown string → Comrak AST → tree → enrichment.
//!
//! The Comrak import keeps structure only: checkbox state, table column
//! alignment and reference-style link targets are recovered afterwards
//! by aligning the tree against the full-fidelity reference AST (see
//! [`crate::common::align`]). Raw HTML and front matter are dropped.

use crate::common::align::align;
use crate::error::ConvertError;
use crate::formats::markdown::reference;
use crate::tree::{kind, ElementNode, Node, TextLeaf};
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

/// Parse Markdown into an enriched document tree.
///
/// Enrichment is best-effort: if the reference parse fails, a warning is
/// logged and the unenriched tree is returned. Import itself never
/// depends on the reference pass succeeding.
pub fn parse_from_markdown(source: &str) -> Result<Vec<Node>, ConvertError> {
    let tree = deserialize_markdown(source)?;
    Ok(enrich_from_reference(tree, source))
}

/// Parse Markdown into a tree without the enrichment pass.
pub fn deserialize_markdown(source: &str) -> Result<Vec<Node>, ConvertError> {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);
    build_tree(root)
}

fn enrich_from_reference(tree: Vec<Node>, source: &str) -> Vec<Node> {
    match reference::parse_reference_ast(source) {
        Ok(ast) => {
            let definitions = reference::collect_definitions(&ast);
            align(tree, &ast, &definitions)
        }
        Err(err) => {
            tracing::warn!("reference parse failed, returning unenriched tree: {err}");
            tree
        }
    }
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.front_matter_delimiter = Some("---".to_string());
    options
}

fn build_tree<'a>(root: &'a AstNode<'a>) -> Result<Vec<Node>, ConvertError> {
    let mut blocks = Vec::new();
    for child in root.children() {
        convert_block(child, &mut blocks);
    }
    Ok(blocks)
}

/// Convert a Comrak block node, appending the result to `out`.
fn convert_block<'a>(node: &'a AstNode<'a>, out: &mut Vec<Node>) {
    match &node.data.borrow().value {
        NodeValue::Heading(heading) => {
            let level = heading.level.clamp(1, 6);
            out.push(Node::element(
                format!("h{level}"),
                non_empty(inline_children(node)),
            ));
        }

        NodeValue::Paragraph => {
            out.push(Node::element(kind::P, non_empty(inline_children(node))));
        }

        NodeValue::List(list) => {
            let list_kind = if matches!(list.list_type, ListType::Ordered) {
                kind::OL
            } else {
                kind::UL
            };
            let mut items = Vec::new();
            for child in node.children() {
                convert_block(child, &mut items);
            }
            out.push(Node::element(list_kind, non_empty(items)));
        }

        // Checkbox state on task items is not captured here; the
        // enrichment pass copies it back from the reference AST.
        NodeValue::Item(_) | NodeValue::TaskItem(_) => {
            let mut children = Vec::new();
            for child in node.children() {
                let is_paragraph =
                    matches!(child.data.borrow().value, NodeValue::Paragraph);
                if is_paragraph {
                    children.push(Node::element(
                        kind::LIC,
                        non_empty(inline_children(child)),
                    ));
                } else {
                    convert_block(child, &mut children);
                }
            }
            out.push(Node::element(kind::LI, non_empty(children)));
        }

        NodeValue::BlockQuote => {
            let mut children = Vec::new();
            for child in node.children() {
                convert_block(child, &mut children);
            }
            out.push(Node::element(kind::BLOCKQUOTE, non_empty(children)));
        }

        NodeValue::CodeBlock(code_block) => {
            let lang = if code_block.info.is_empty() {
                None
            } else {
                Some(code_block.info.clone())
            };
            let lines: Vec<Node> = code_block
                .literal
                .trim_end_matches('\n')
                .split('\n')
                .map(|line| Node::element(kind::CODE_LINE, vec![Node::text(line)]))
                .collect();
            out.push(Node::Element(ElementNode {
                kind: kind::CODE_BLOCK.to_string(),
                children: non_empty(lines),
                lang,
                ..ElementNode::default()
            }));
        }

        NodeValue::ThematicBreak => {
            out.push(Node::element(kind::HR, vec![Node::text("")]));
        }

        // Column alignment is left for the enrichment pass.
        NodeValue::Table(_) => {
            let mut rows = Vec::new();
            for row in node.children() {
                let is_row = matches!(row.data.borrow().value, NodeValue::TableRow(_));
                if !is_row {
                    continue;
                }
                let cells: Vec<Node> = row
                    .children()
                    .map(|cell| Node::element(kind::TD, non_empty(inline_children(cell))))
                    .collect();
                rows.push(Node::element(kind::TR, non_empty(cells)));
            }
            out.push(Node::element(kind::TABLE, non_empty(rows)));
        }

        // Raw HTML and front matter have no tree counterpart.
        NodeValue::HtmlBlock(_) | NodeValue::FrontMatter(_) => {}

        _ => {
            for child in node.children() {
                convert_block(child, out);
            }
        }
    }
}

/// Marks inherited while flattening nested inline styles onto leaves.
#[derive(Debug, Clone, Copy, Default)]
struct Marks {
    bold: bool,
    italic: bool,
    strikethrough: bool,
}

fn inline_children<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
    let mut out = Vec::new();
    for child in node.children() {
        convert_inline(child, Marks::default(), &mut out);
    }
    out
}

fn convert_inline<'a>(node: &'a AstNode<'a>, marks: Marks, out: &mut Vec<Node>) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => out.push(leaf(text.clone(), marks, false)),

        NodeValue::SoftBreak | NodeValue::LineBreak => {
            out.push(leaf(" ".to_string(), marks, false));
        }

        NodeValue::Code(code) => out.push(leaf(code.literal.clone(), marks, true)),

        NodeValue::Strong => {
            for child in node.children() {
                convert_inline(child, Marks { bold: true, ..marks }, out);
            }
        }

        NodeValue::Emph => {
            for child in node.children() {
                convert_inline(child, Marks { italic: true, ..marks }, out);
            }
        }

        NodeValue::Strikethrough => {
            for child in node.children() {
                convert_inline(
                    child,
                    Marks {
                        strikethrough: true,
                        ..marks
                    },
                    out,
                );
            }
        }

        NodeValue::Link(link) => {
            let mut children = Vec::new();
            for child in node.children() {
                convert_inline(child, marks, &mut children);
            }
            out.push(Node::Element(ElementNode {
                kind: kind::A.to_string(),
                children: non_empty(children),
                url: Some(link.url.clone()),
                ..ElementNode::default()
            }));
        }

        NodeValue::Image(link) => {
            let mut children = Vec::new();
            for child in node.children() {
                convert_inline(child, Marks::default(), &mut children);
            }
            out.push(Node::Element(ElementNode {
                kind: kind::IMG.to_string(),
                children: non_empty(children),
                url: Some(link.url.clone()),
                ..ElementNode::default()
            }));
        }

        _ => {
            for child in node.children() {
                convert_inline(child, marks, out);
            }
        }
    }
}

fn leaf(text: String, marks: Marks, code: bool) -> Node {
    Node::Text(TextLeaf {
        text,
        bold: marks.bold,
        italic: marks.italic,
        code,
        strikethrough: marks.strikethrough,
        underline: false,
    })
}

/// Elements always carry at least one child; void-ish content gets an
/// empty leaf.
fn non_empty(children: Vec<Node>) -> Vec<Node> {
    if children.is_empty() {
        vec![Node::text("")]
    } else {
        children
    }
}
