//! The generic document tree.
//!
//! This is the shared data model of the whole crate: the Markdown
//! serializer consumes it, the Markdown importer produces it, and the
//! enrichment pass repairs it in place. It is deliberately
//! syntax-agnostic; nothing in here knows about Markdown.

pub mod nodes;

pub use nodes::{kind, ColumnAlign, ElementNode, Node, TextLeaf};
