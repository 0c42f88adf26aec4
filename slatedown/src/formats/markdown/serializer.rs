//! Markdown serialization (tree → Markdown export)
//!
//! Walks the generic document tree and emits Markdown text directly.
//! The serializer is a pure function over the tree plus a list-nesting
//! depth counter: no arena, no I/O, no state shared between calls. It
//! never fails on a structurally valid tree; unknown element types
//! degrade to rendering their children with no wrapper.
//!
//! Context-sensitive rules live here:
//! - top-level blocks are joined with a blank line
//! - block quotes prefix every line of their rendered content,
//!   including blank ones, so quoting composes with nested blocks
//! - list items indent two spaces per nesting depth, put nested lists
//!   strictly after their own inline content, and push block children
//!   (code, quotes) onto their own lines under the marker
//! - table separators encode the column alignment tags
//! - plain text leaves escape `* _ [ ]`; marked leaves rely on their
//!   delimiters instead, wrapped in a fixed order

use crate::tree::{kind, ElementNode, Node, TextLeaf};

/// Serialize a document tree to Markdown.
///
/// Sibling top-level blocks are joined with a blank line.
pub fn serialize_to_markdown(document: &[Node]) -> String {
    document
        .iter()
        .map(|node| serialize_node(node, 0))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn serialize_node(node: &Node, depth: usize) -> String {
    match node {
        Node::Text(leaf) => serialize_leaf(leaf),
        Node::Element(el) => serialize_element(el, depth),
    }
}

fn serialize_element(el: &ElementNode, depth: usize) -> String {
    if let Some(level) = el.heading_level() {
        return format!(
            "{} {}",
            "#".repeat(level as usize),
            serialize_inline(&el.children)
        );
    }

    match el.kind.as_str() {
        kind::P => serialize_inline(&el.children),
        kind::BLOCKQUOTE => quote_lines(&render_block_children(&el.children, depth)),
        kind::HR => "---".to_string(),
        kind::A => format!(
            "[{}]({})",
            serialize_inline(&el.children),
            el.url.as_deref().unwrap_or_default()
        ),
        kind::IMG => serialize_image(el),
        kind::CODE_BLOCK => serialize_code_block(el),
        kind::CODE_LINE => plain_text(&el.children),
        kind::TABLE => serialize_table(el),
        kind::UL => serialize_list(el, depth, false),
        kind::OL => serialize_list(el, depth, true),
        kind::LI => serialize_list_item(el, depth, None),
        // lic and any unrecognized type: render children with no wrapper
        _ => serialize_inline(&el.children),
    }
}

/// Inline rendering: children serialized and concatenated with no separator.
fn serialize_inline(children: &[Node]) -> String {
    children
        .iter()
        .map(|child| serialize_node(child, 0))
        .collect()
}

fn serialize_image(el: &ElementNode) -> String {
    // Alt text resolution order: explicit caption, then rendered
    // children, then empty.
    let alt = match el.caption.as_deref() {
        Some(caption) if !caption.is_empty() => caption.to_string(),
        _ => serialize_inline(&el.children),
    };
    format!("![{}]({})", alt, el.url.as_deref().unwrap_or_default())
}

fn serialize_code_block(el: &ElementNode) -> String {
    // Code content passes through untouched: no escaping, no marks.
    let body = el
        .children
        .iter()
        .map(|line| match line {
            Node::Element(line_el) if line_el.kind == kind::CODE_LINE => {
                plain_text(&line_el.children)
            }
            other => plain_text(std::slice::from_ref(other)),
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("```{}\n{}\n```", el.lang.as_deref().unwrap_or_default(), body)
}

/// Concatenated raw leaf text of a node sequence, marks and escaping ignored.
fn plain_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(leaf) => out.push_str(&leaf.text),
            Node::Element(el) => out.push_str(&plain_text(&el.children)),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Lists

fn serialize_list(list: &ElementNode, depth: usize, ordered: bool) -> String {
    list.children
        .iter()
        .enumerate()
        .map(|(i, child)| match child {
            Node::Element(item) if item.kind == kind::LI => {
                serialize_list_item(item, depth, ordered.then_some(i + 1))
            }
            other => serialize_node(other, depth),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a single list item.
///
/// The item's children are partitioned: nested lists are rendered one
/// depth deeper and appended after the item's own line; block content
/// (code, quotes) is re-indented under the marker on its own lines;
/// everything else is inlined directly after the marker.
fn serialize_list_item(item: &ElementNode, depth: usize, index: Option<usize>) -> String {
    let indent = "  ".repeat(depth);
    let marker = match index {
        Some(i) => format!("{i}."),
        None => "-".to_string(),
    };
    let checkbox = match item.checked {
        Some(true) => "[x] ",
        Some(false) => "[ ] ",
        None => "",
    };

    let mut content = String::new();
    let mut nested = String::new();
    for child in &item.children {
        match child {
            Node::Element(el) if el.is_list() => {
                nested.push('\n');
                nested.push_str(&serialize_element(el, depth + 1));
            }
            Node::Element(el)
                if el.kind == kind::CODE_BLOCK || el.kind == kind::BLOCKQUOTE =>
            {
                // Block content starts on its own line under the marker,
                // shifted right by roughly the marker width.
                let block = serialize_element(el, depth);
                content.push('\n');
                content.push_str(&indent_lines(&block, &format!("{indent}  ")));
            }
            other => content.push_str(&serialize_node(other, depth)),
        }
    }

    format!("{indent}{marker} {checkbox}{content}{nested}")
}

// ---------------------------------------------------------------------------
// Tables

fn serialize_table(table: &ElementNode) -> String {
    let mut lines = Vec::new();
    for (i, row) in table.children.iter().enumerate() {
        let cells = row_cells(row);
        lines.push(render_row(&cells));
        if i == 0 {
            // Separator row directly under the header.
            lines.push(render_separator(cells.len(), table));
        }
    }
    lines.join("\n")
}

fn row_cells(row: &Node) -> Vec<String> {
    match row {
        Node::Element(row_el) => row_el
            .children
            .iter()
            .map(|cell| match cell {
                Node::Element(cell_el) => serialize_inline(&cell_el.children),
                Node::Text(leaf) => serialize_leaf(leaf),
            })
            .collect(),
        Node::Text(leaf) => vec![serialize_leaf(leaf)],
    }
}

fn render_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

fn render_separator(columns: usize, table: &ElementNode) -> String {
    use crate::tree::ColumnAlign;

    let markers: Vec<&str> = (0..columns)
        .map(|i| {
            let align = table.align.as_ref().and_then(|align| align.get(i));
            match align {
                Some(ColumnAlign::Center) => ":---:",
                Some(ColumnAlign::Right) => "---:",
                // Left, None, or missing all render the plain marker.
                _ => "---",
            }
        })
        .collect();
    format!("| {} |", markers.join(" | "))
}

// ---------------------------------------------------------------------------
// Block quoting helpers

/// Render a mixed child sequence as block content: consecutive inline
/// nodes merge into one run, block elements are separated by blank lines.
fn render_block_children(children: &[Node], depth: usize) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut inline_run = String::new();

    for child in children {
        if is_block(child) {
            if !inline_run.is_empty() {
                parts.push(std::mem::take(&mut inline_run));
            }
            parts.push(serialize_node(child, depth));
        } else {
            inline_run.push_str(&serialize_node(child, depth));
        }
    }
    if !inline_run.is_empty() {
        parts.push(inline_run);
    }
    parts.join("\n\n")
}

fn is_block(node: &Node) -> bool {
    let Node::Element(el) = node else { return false };
    el.heading_level().is_some()
        || matches!(
            el.kind.as_str(),
            kind::P
                | kind::BLOCKQUOTE
                | kind::UL
                | kind::OL
                | kind::CODE_BLOCK
                | kind::HR
                | kind::TABLE
        )
}

/// Prefix every line, including blank ones, with `"> "`.
fn quote_lines(content: &str) -> String {
    content
        .split('\n')
        .map(|line| format!("> {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn indent_lines(content: &str, pad: &str) -> String {
    content
        .split('\n')
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Text leaves

/// Characters escaped in plain prose so they are not reinterpreted as
/// Markdown structure.
const ESCAPED_CHARS: [char; 4] = ['*', '_', '[', ']'];

/// Mark wrapping rules, applied in order. The first rule applied ends up
/// innermost, so `code` hugs the text and `underline` sits outermost.
/// Underline has no native Markdown form and is approximated with
/// emphasis syntax, a documented lossy mapping.
const MARK_RULES: [(fn(&TextLeaf) -> bool, &str); 5] = [
    (has_code, "`"),
    (has_bold, "**"),
    (has_italic, "*"),
    (has_strikethrough, "~~"),
    (has_underline, "_"),
];

fn has_code(leaf: &TextLeaf) -> bool {
    leaf.code
}
fn has_bold(leaf: &TextLeaf) -> bool {
    leaf.bold
}
fn has_italic(leaf: &TextLeaf) -> bool {
    leaf.italic
}
fn has_strikethrough(leaf: &TextLeaf) -> bool {
    leaf.strikethrough
}
fn has_underline(leaf: &TextLeaf) -> bool {
    leaf.underline
}

fn serialize_leaf(leaf: &TextLeaf) -> String {
    // Code spans, bold and italic are exempt from escaping: their
    // delimiters already disambiguate the content.
    let mut out = if leaf.code || leaf.bold || leaf.italic {
        leaf.text.clone()
    } else {
        escape_markdown(&leaf.text)
    };

    for (applies, delimiter) in MARK_RULES {
        if applies(leaf) {
            out = format!("{delimiter}{out}{delimiter}");
        }
    }
    out
}

fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ESCAPED_CHARS.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
