//! Enrichment tests exercising the aligner against real reference
//! parses, including reconstruction of dropped link references.

use crate::common::{el, link, text};
use slatedown::common::align::align;
use slatedown::formats::markdown::reference::{collect_definitions, parse_reference_ast};
use slatedown::tree::{kind, ElementNode, Node};

fn parse(source: &str) -> (Vec<markdown::mdast::Node>, slatedown::formats::markdown::reference::Definitions) {
    let ast = parse_reference_ast(source).unwrap();
    let definitions = collect_definitions(&ast);
    (ast, definitions)
}

#[test]
fn reinserts_a_link_reference_dropped_mid_paragraph() {
    let source = "See [docs][ref1] here.\n\n[ref1]: https://example.com/docs";
    let (ast, definitions) = parse(source);

    // Tree as a lossier importer would produce it: the reference link
    // is gone, its neighbors survive.
    let tree = vec![el(kind::P, vec![text("See "), text(" here.")])];
    let enriched = align(tree, &ast, &definitions);

    assert_eq!(
        enriched,
        vec![el(
            kind::P,
            vec![
                text("See "),
                link("https://example.com/docs", "docs"),
                text(" here."),
            ],
        )]
    );
}

#[test]
fn appends_a_link_reference_dropped_at_the_end() {
    let source = "Read [more][m]\n\n[m]: https://example.com/more";
    let (ast, definitions) = parse(source);

    let tree = vec![el(kind::P, vec![text("Read ")])];
    let enriched = align(tree, &ast, &definitions);

    assert_eq!(
        enriched,
        vec![el(
            kind::P,
            vec![text("Read "), link("https://example.com/more", "more")],
        )]
    );
}

#[test]
fn reconstructs_inside_a_list_item() {
    let source = "- pre [tail][t]\n\n[t]: https://example.com/t";
    let (ast, definitions) = parse(source);

    let tree = vec![el(
        kind::UL,
        vec![el(kind::LI, vec![el(kind::LIC, vec![text("pre ")])])],
    )];
    let enriched = align(tree, &ast, &definitions);

    let list = enriched[0].as_element().unwrap();
    let item = list.children[0].as_element().unwrap();
    let lic = item.children[0].as_element().unwrap();
    assert_eq!(
        lic.children,
        vec![text("pre "), link("https://example.com/t", "tail")]
    );
}

#[test]
fn matched_inline_link_is_left_untouched() {
    let source = "go [there][t]\n\n[t]: https://example.com/t";
    let (ast, definitions) = parse(source);

    // The importer already resolved the reference into an `a` node
    // whose URL equals the definition, so alignment changes nothing.
    let tree = vec![el(
        kind::P,
        vec![text("go "), link("https://example.com/t", "there")],
    )];
    let enriched = align(tree.clone(), &ast, &definitions);
    assert_eq!(enriched, tree);
}

#[test]
fn url_mismatch_does_not_enrich_the_link() {
    let source = "go [there][t]\n\n[t]: https://example.com/t";
    let (ast, definitions) = parse(source);

    let tree = vec![el(
        kind::P,
        vec![text("go "), link("https://elsewhere.example", "there")],
    )];
    let enriched = align(tree, &ast, &definitions);

    // URL mismatch means the tree node is a different link: the
    // reference is reinserted before it, the existing node stays.
    let paragraph = enriched[0].as_element().unwrap();
    assert_eq!(
        paragraph.children,
        vec![
            text("go "),
            link("https://example.com/t", "there"),
            link("https://elsewhere.example", "there"),
        ]
    );
}

#[test]
fn checkbox_state_copies_only_onto_task_items() {
    let source = "- [x] done\n- plain";
    let (ast, definitions) = parse(source);

    let tree = vec![el(
        kind::UL,
        vec![
            el(kind::LI, vec![el(kind::LIC, vec![text("done")])]),
            el(kind::LI, vec![el(kind::LIC, vec![text("plain")])]),
        ],
    )];
    let enriched = align(tree, &ast, &definitions);

    let list = enriched[0].as_element().unwrap();
    assert_eq!(list.children[0].as_element().unwrap().checked, Some(true));
    assert_eq!(list.children[1].as_element().unwrap().checked, None);
}

#[test]
fn alignment_survives_structural_drift() {
    // The AST has a heading the tree lacks; the walk skips it and
    // still enriches the list that follows.
    let source = "# Title\n\n- [ ] item";
    let (ast, definitions) = parse(source);

    let tree = vec![el(
        kind::UL,
        vec![el(kind::LI, vec![el(kind::LIC, vec![text("item")])])],
    )];
    let enriched = align(tree, &ast, &definitions);

    let list = enriched[0].as_element().unwrap();
    assert_eq!(list.children[0].as_element().unwrap().checked, Some(false));
}

#[test]
fn table_cells_are_enriched_too() {
    let source = "| [a][r] |\n| --- |\n\n[r]: https://example.com/r";
    let (ast, definitions) = parse(source);

    let tree = vec![el(
        kind::TABLE,
        vec![el(kind::TR, vec![el(kind::TD, vec![text("placeholder")])])],
    )];
    let enriched = align(tree, &ast, &definitions);

    let table = enriched[0].as_element().unwrap();
    assert!(table.align.is_some());
    let tr = table.children[0].as_element().unwrap();
    let td = tr.children[0].as_element().unwrap();
    assert_eq!(
        td.children,
        vec![link("https://example.com/r", "a"), text("placeholder")]
    );
}

#[test]
fn enrichment_never_reorders_existing_nodes() {
    let source = "first\n\nsecond\n\nthird";
    let (ast, definitions) = parse(source);

    let tree = vec![
        el(kind::P, vec![text("first")]),
        el(kind::P, vec![text("second")]),
        el(kind::P, vec![text("third")]),
    ];
    let enriched = align(tree.clone(), &ast, &definitions);
    assert_eq!(enriched, tree);
}

#[test]
fn reconstructed_link_shape_matches_inline_links() {
    let source = "[go][g]\n\n[g]: https://x";
    let (ast, definitions) = parse(source);

    // A non-empty paragraph so the walk recurses into its children.
    let tree = vec![el(kind::P, vec![text("")])];
    let enriched = align(tree, &ast, &definitions);
    let paragraph = enriched[0].as_element().unwrap();
    let reconstructed = paragraph
        .children
        .iter()
        .find_map(Node::as_element)
        .expect("reconstructed link present");
    assert_eq!(
        Node::Element(reconstructed.clone()),
        Node::Element(ElementNode {
            kind: kind::A.to_string(),
            children: vec![text("go")],
            url: Some("https://x".to_string()),
            ..ElementNode::default()
        })
    );
}
