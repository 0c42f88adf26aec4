//! Conversion between editor document trees and Markdown.
//!
//!     This crate converts both ways between a generic rich-text document tree
//!     (the nested JSON shape used by block-based editors: typed elements with
//!     children, text leaves with mark flags) and Markdown source text.
//!
//! Architecture
//!
//!     Two components do the real work, and they only share the tree data model:
//!
//!     - The serializer (formats/markdown/serializer.rs) walks the tree and emits
//!       Markdown directly. It owns every context-sensitive formatting rule:
//!       list nesting and indentation, quote prefixing, fenced code, table
//!       separator rows, inline escaping and mark ordering. Pure, deterministic,
//!       and it never fails on a well-formed tree.
//!
//!     - The aligner/enricher (common/align.rs) repairs the import path. The
//!       structural import is lossy: it drops checkbox state, table column
//!       alignment and reference-style links. We therefore parse the source a
//!       second time into a full-fidelity mdast and walk both sequences with two
//!       cursors, copying metadata across and reinserting dropped nodes. The
//!       walk is best-effort by design: on drift it skips rather than fails, and
//!       it never deletes or reorders nodes the tree already has.
//!
//!     Enrichment failures are warnings, not errors: a failed reference parse
//!     still yields the structurally imported tree.
//!
//!     The file structure:
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── tree                    # the generic document tree data model
//!     ├── common                  # format-agnostic core (the aligner)
//!     └── formats
//!         ├── markdown
//!         │   ├── parser.rs       # comrak structural import
//!         │   ├── reference.rs    # markdown-rs reference mdast + definitions
//!         │   └── serializer.rs   # direct Markdown emission
//!         └── json                # the tree's own serde form
//!
//! Testing
//!
//!     tests/
//!     ├── lib.rs                  # test subdirectories are not auto-discovered,
//!     ├── common/                 # so lib.rs declares them as modules
//!     ├── json/
//!     └── markdown/
//!         ├── export.rs
//!         ├── import.rs
//!         └── enrich.rs
//!
//! Library Choices
//!
//!     Parsing is offloaded to specialized crates: comrak for the structural
//!     import and markdown-rs for the reference mdast (the only crate of the two
//!     that preserves linkReference/definition nodes and task/align metadata).
//!     Serialization is written out by hand instead, because the output rules
//!     are themselves the contract of this crate.
//!
//!     This is a pure lib powering slatedown-cli but shell agnostic: no std
//!     printing, no env vars. The one observable side effect is a `tracing`
//!     warning when enrichment has to be skipped.

pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod tree;

pub use error::ConvertError;
pub use format::Format;
pub use registry::FormatRegistry;
pub use tree::{ColumnAlign, ElementNode, Node, TextLeaf};

/// Convert Markdown source to an enriched document tree.
///
/// Shorthand for the markdown format's parse with enrichment enabled.
pub fn markdown_to_tree(source: &str) -> Result<Vec<Node>, ConvertError> {
    formats::markdown::parser::parse_from_markdown(source)
}

/// Serialize a document tree to Markdown text.
pub fn tree_to_markdown(document: &[Node]) -> String {
    formats::markdown::serializer::serialize_to_markdown(document)
}
