//! Tree-to-Markdown serialization tests.

use insta::assert_snapshot;
use proptest::prelude::*;

use crate::common::{bold, code, el, italic, item, link, row, task, text};
use slatedown::tree::{kind, ColumnAlign, ElementNode, Node, TextLeaf};
use slatedown::tree_to_markdown;

#[test]
fn exports_headings_at_every_level() {
    for level in 1..=6u8 {
        let doc = vec![el(format!("h{level}"), vec![text("Title")])];
        let expected = format!("{} Title", "#".repeat(level as usize));
        assert_eq!(tree_to_markdown(&doc), expected);
    }
}

#[test]
fn joins_top_level_blocks_with_blank_lines() {
    let doc = vec![
        el(kind::P, vec![text("one")]),
        el(kind::P, vec![text("two")]),
        el(kind::P, vec![text("three")]),
    ];
    assert_eq!(tree_to_markdown(&doc), "one\n\ntwo\n\nthree");
}

#[test]
fn escapes_special_characters_in_plain_text() {
    let doc = vec![el(kind::P, vec![text("a*b_c[d]e")])];
    assert_eq!(tree_to_markdown(&doc), "a\\*b\\_c\\[d\\]e");
}

#[test]
fn marked_text_is_not_escaped() {
    let doc = vec![el(kind::P, vec![bold("a*b_c[d]e")])];
    assert_eq!(tree_to_markdown(&doc), "**a*b_c[d]e**");
}

#[test]
fn stacks_mark_delimiters_in_fixed_order() {
    let leaf = Node::Text(TextLeaf {
        text: "x".to_string(),
        bold: true,
        italic: true,
        strikethrough: true,
        ..TextLeaf::default()
    });
    let doc = vec![el(kind::P, vec![leaf])];
    assert_eq!(tree_to_markdown(&doc), "~~***x***~~");
}

#[test]
fn code_mark_wraps_innermost() {
    let leaf = Node::Text(TextLeaf {
        text: "let x".to_string(),
        code: true,
        bold: true,
        ..TextLeaf::default()
    });
    let doc = vec![el(kind::P, vec![leaf])];
    assert_eq!(tree_to_markdown(&doc), "**`let x`**");
}

#[test]
fn underline_downgrades_to_emphasis() {
    let leaf = Node::Text(TextLeaf {
        text: "under".to_string(),
        underline: true,
        ..TextLeaf::default()
    });
    let doc = vec![el(kind::P, vec![leaf])];
    assert_eq!(tree_to_markdown(&doc), "_under_");
}

#[test]
fn exports_links_and_images() {
    let image = Node::Element(ElementNode {
        kind: kind::IMG.to_string(),
        children: vec![text("")],
        url: Some("https://example.com/pic.png".to_string()),
        caption: Some("A caption".to_string()),
        ..ElementNode::default()
    });
    let doc = vec![el(
        kind::P,
        vec![text("see "), link("https://example.com", "the site"), image],
    )];
    assert_eq!(
        tree_to_markdown(&doc),
        "see [the site](https://example.com)![A caption](https://example.com/pic.png)"
    );
}

#[test]
fn exports_fenced_code_blocks_with_language() {
    let block = Node::Element(ElementNode {
        kind: kind::CODE_BLOCK.to_string(),
        children: vec![
            el(kind::CODE_LINE, vec![text("fn main() {")]),
            el(kind::CODE_LINE, vec![text("}")]),
        ],
        lang: Some("rust".to_string()),
        ..ElementNode::default()
    });
    assert_eq!(
        tree_to_markdown(&[block]),
        "```rust\nfn main() {\n}\n```"
    );
}

#[test]
fn code_block_content_is_never_escaped() {
    let block = el(
        kind::CODE_BLOCK,
        vec![el(kind::CODE_LINE, vec![text("a[i] * b[j]_k")])],
    );
    assert_eq!(tree_to_markdown(&[block]), "```\na[i] * b[j]_k\n```");
}

#[test]
fn prefixes_every_blockquote_line() {
    let quote = el(
        kind::BLOCKQUOTE,
        vec![el(kind::P, vec![text("one")]), el(kind::P, vec![text("two")])],
    );
    assert_eq!(tree_to_markdown(&[quote]), "> one\n> \n> two");
}

#[test]
fn exports_unordered_and_ordered_lists() {
    let ul = el(kind::UL, vec![item("alpha"), item("beta")]);
    assert_eq!(tree_to_markdown(&[ul]), "- alpha\n- beta");

    let ol = el(kind::OL, vec![item("first"), item("second"), item("third")]);
    assert_eq!(tree_to_markdown(&[ol]), "1. first\n2. second\n3. third");
}

#[test]
fn nested_lists_indent_two_spaces_per_depth() {
    let leaf_item = el(
        kind::LI,
        vec![
            el(kind::LIC, vec![text("leaf")]),
            el(kind::UL, vec![item("deepest")]),
        ],
    );
    let inner = el(
        kind::LI,
        vec![
            el(kind::LIC, vec![text("inner")]),
            el(kind::UL, vec![leaf_item]),
        ],
    );
    let doc = vec![el(kind::UL, vec![item("outer"), inner])];
    assert_eq!(
        tree_to_markdown(&doc),
        "- outer\n- inner\n  - leaf\n    - deepest"
    );
}

#[test]
fn nested_ordered_list_restarts_numbering() {
    let inner = el(
        kind::LI,
        vec![
            el(kind::LIC, vec![text("parent")]),
            el(kind::OL, vec![item("child a"), item("child b")]),
        ],
    );
    let doc = vec![el(kind::OL, vec![item("top"), inner])];
    assert_eq!(
        tree_to_markdown(&doc),
        "1. top\n2. parent\n  1. child a\n  2. child b"
    );
}

#[test]
fn task_items_render_checkbox_state() {
    let ul = el(kind::UL, vec![task("done", true), task("todo", false), item("plain")]);
    assert_eq!(
        tree_to_markdown(&[ul]),
        "- [x] done\n- [ ] todo\n- plain"
    );
}

#[test]
fn table_separator_reflects_column_alignment() {
    let table = Node::Element(ElementNode {
        kind: kind::TABLE.to_string(),
        children: vec![row(&["a", "b", "c"]), row(&["1", "2", "3"])],
        align: Some(vec![ColumnAlign::None, ColumnAlign::Center, ColumnAlign::Right]),
        ..ElementNode::default()
    });
    assert_eq!(
        tree_to_markdown(&[table]),
        "| a | b | c |\n| --- | :---: | ---: |\n| 1 | 2 | 3 |"
    );
}

#[test]
fn table_without_alignment_defaults_every_column() {
    let table = el(kind::TABLE, vec![row(&["x", "y"]), row(&["1", "2"])]);
    assert_eq!(
        tree_to_markdown(&[table]),
        "| x | y |\n| --- | --- |\n| 1 | 2 |"
    );
}

#[test]
fn unknown_element_types_render_their_children() {
    let doc = vec![el("mystery", vec![text("kept "), italic("content")])];
    assert_eq!(tree_to_markdown(&doc), "kept *content*");
}

#[test]
fn serialization_is_pure() {
    let doc = vec![
        el("h1", vec![text("t")]),
        el(kind::UL, vec![task("x", true)]),
    ];
    let first = tree_to_markdown(&doc);
    let second = tree_to_markdown(&doc);
    assert_eq!(first, second);
}

#[test]
fn exports_a_full_document() {
    let table = Node::Element(ElementNode {
        kind: kind::TABLE.to_string(),
        children: vec![row(&["col", "val"]), row(&["a", "1"])],
        align: Some(vec![ColumnAlign::Left, ColumnAlign::Center]),
        ..ElementNode::default()
    });
    let code_block = Node::Element(ElementNode {
        kind: kind::CODE_BLOCK.to_string(),
        children: vec![el(kind::CODE_LINE, vec![text("fn main() {}")])],
        lang: Some("rust".to_string()),
        ..ElementNode::default()
    });
    let nested = el(
        kind::LI,
        vec![el(kind::LIC, vec![text("two")]), el(kind::UL, vec![item("deep")])],
    );
    let doc = vec![
        el("h1", vec![text("Guide")]),
        el(kind::P, vec![text("plain "), bold("bold"), text(" and "), code("raw")]),
        el(kind::UL, vec![item("one"), nested]),
        el(kind::BLOCKQUOTE, vec![el(kind::P, vec![text("quoted")])]),
        code_block,
        el(kind::HR, vec![text("")]),
        table,
    ];
    assert_snapshot!(tree_to_markdown(&doc), @r###"
    # Guide

    plain **bold** and `raw`

    - one
    - two
      - deep

    > quoted

    ```rust
    fn main() {}
    ```

    ---

    | col | val |
    | --- | :---: |
    | a | 1 |
    "###);
}

proptest! {
    #[test]
    fn never_panics_on_arbitrary_leaf_marks(
        content in ".{0,40}",
        bold in any::<bool>(),
        italic in any::<bool>(),
        code in any::<bool>(),
        strikethrough in any::<bool>(),
        underline in any::<bool>(),
    ) {
        let leaf = Node::Text(TextLeaf {
            text: content,
            bold,
            italic,
            code,
            strikethrough,
            underline,
        });
        let doc = vec![el(kind::P, vec![leaf])];
        let _ = tree_to_markdown(&doc);
    }

    #[test]
    fn plain_paragraph_output_never_contains_unescaped_brackets(
        content in "[a-z*_\\[\\]]{1,20}",
    ) {
        let doc = vec![el(kind::P, vec![text(&content)])];
        let out = tree_to_markdown(&doc);
        for window in ["*", "_", "[", "]"] {
            for (pos, _) in out.match_indices(window) {
                prop_assert!(pos > 0 && &out[pos - 1..pos] == "\\");
            }
        }
    }
}
