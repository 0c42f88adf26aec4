//! Markdown format implementation
//!
//! Bidirectional conversion between the generic document tree and
//! Markdown (GFM subset).
//!
//! # Library Choice
//!
//! Import parses the source twice with two different crates, on purpose:
//!
//! - `comrak` drives the structural import (tree shape, flattened inline
//!   marks). It is fast and battle-tested, but its AST resolves
//!   reference links and normalizes away metadata we care about.
//! - `markdown` (markdown-rs) provides the reference mdast: it keeps
//!   `linkReference`/`definition` nodes, task-list `checked` state and
//!   table `align` intact. The enrichment pass aligns the comrak-derived
//!   tree against it and copies that metadata back.
//!
//! Export does not go through either crate: Markdown's context-sensitive
//! formatting (list indentation, quote prefixing, separator rows,
//! inline escaping) is emitted directly by [`serializer`].
//!
//! # Element Mapping Table
//!
//! | Tree element   | Markdown                  | Notes                                   |
//! |----------------|---------------------------|-----------------------------------------|
//! | h1..h6         | `#`..`######` heading     | direct                                  |
//! | p              | paragraph                 | direct                                  |
//! | blockquote     | `> ` prefixed lines       | composes with any nested block          |
//! | ul / ol / li   | `- ` / `1. ` items        | two-space indent per nesting depth      |
//! | li + checked   | `- [x] ` / `- [ ] `       | absent checked means "not a task item"  |
//! | lic            | item inline content       | wrapper, no syntax of its own           |
//! | code_block     | fenced ``` block          | `lang` as info string, `code_line` rows |
//! | hr             | `---`                     | direct                                  |
//! | a              | `[text](url)`             | reference links resolved via enrichment |
//! | img            | `![alt](url)`             | alt from caption, else children         |
//! | table/tr/td    | pipe table                | align tags drive the separator row      |
//! | underline mark | `_text_`                  | lossy: reads back as italic             |
//!
//! # Lossy Conversions
//!
//! - underline → emphasis syntax (indistinguishable from italic on re-parse)
//! - raw HTML and front matter are dropped on import
//! - reference-style links re-serialize as inline links

pub mod parser;
pub mod reference;
pub mod serializer;

use crate::error::ConvertError;
use crate::format::Format;
use crate::tree::Node;

/// Markdown format: parsing (with best-effort enrichment) and serialization.
pub struct MarkdownFormat {
    /// Run the enrichment pass after import. On by default; turning it
    /// off yields the raw structural import.
    pub enrich: bool,
}

impl Default for MarkdownFormat {
    fn default() -> Self {
        MarkdownFormat { enrich: true }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown (GFM subset)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Vec<Node>, ConvertError> {
        if self.enrich {
            parser::parse_from_markdown(source)
        } else {
            parser::deserialize_markdown(source)
        }
    }

    fn serialize(&self, document: &[Node]) -> Result<String, ConvertError> {
        Ok(serializer::serialize_to_markdown(document))
    }
}
