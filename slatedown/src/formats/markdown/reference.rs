//! Reference parse pass (Markdown → mdast)
//!
//! The enrichment pass needs a second, full-fidelity view of the source:
//! an AST that still carries checkbox state, table column alignment,
//! reference-style links and their definitions. The `markdown` crate's
//! mdast gives us exactly that, so this module is a thin adapter around
//! [`markdown::to_mdast`] plus the definitions-map scan.

use crate::error::ConvertError;
use markdown::mdast;
use std::collections::HashMap;

/// Identifier → url map resolved from `definition` nodes.
pub type Definitions = HashMap<String, String>;

/// Parse Markdown into the reference AST, returning the root's children.
pub fn parse_reference_ast(source: &str) -> Result<Vec<mdast::Node>, ConvertError> {
    let options = reference_parse_options();
    let root = markdown::to_mdast(source, &options)
        .map_err(|e| ConvertError::ReferenceParseError(e.to_string()))?;
    match root {
        mdast::Node::Root(root) => Ok(root.children),
        other => Ok(vec![other]),
    }
}

fn reference_parse_options() -> markdown::ParseOptions {
    let mut options = markdown::ParseOptions::gfm();
    options.constructs.frontmatter = true;
    options
}

/// Collect all link/image definitions with a full pre-order scan.
///
/// Built fresh per conversion and discarded after; later definitions
/// with the same identifier win, matching a last-write map.
pub fn collect_definitions(nodes: &[mdast::Node]) -> Definitions {
    let mut definitions = Definitions::new();
    for node in nodes {
        collect_into(node, &mut definitions);
    }
    definitions
}

fn collect_into(node: &mdast::Node, definitions: &mut Definitions) {
    if let mdast::Node::Definition(definition) = node {
        definitions.insert(definition.identifier.clone(), definition.url.clone());
    }
    if let Some(children) = node.children() {
        for child in children {
            collect_into(child, definitions);
        }
    }
}
