//! CLI-specific transforms
//!
//! Each transform takes Markdown source and renders one view of the
//! conversion pipeline:
//!
//! 1. **Import** - Markdown → lossy document tree (`tree-raw-json`)
//! 2. **Enrichment** - tree + reference AST → enriched tree (`tree-json`)
//! 3. **Export** - tree → normalized Markdown (`markdown`)
//!
//! The raw variant exists to make the enrichment pass observable: diff
//! `tree-raw-json` against `tree-json` to see exactly what the
//! reference AST recovered.

use slatedown::formats::markdown::parser::{deserialize_markdown, parse_from_markdown};
use slatedown::tree_to_markdown;

/// All available CLI transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["tree-json", "tree-raw-json", "markdown"];

/// Execute a named transform on Markdown source
///
/// # Arguments
///
/// * `source` - The Markdown text to transform
/// * `transform_name` - The transform to apply (e.g., "tree-json")
///
/// # Returns
///
/// The transformed output as a string, or an error message
pub fn execute_transform(source: &str, transform_name: &str) -> Result<String, String> {
    match transform_name {
        "tree-json" => {
            let doc =
                parse_from_markdown(source).map_err(|e| format!("Transform failed: {e}"))?;
            serde_json::to_string_pretty(&doc)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        "tree-raw-json" => {
            let doc =
                deserialize_markdown(source).map_err(|e| format!("Transform failed: {e}"))?;
            serde_json::to_string_pretty(&doc)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        "markdown" => {
            let doc =
                parse_from_markdown(source).map_err(|e| format!("Transform failed: {e}"))?;
            Ok(tree_to_markdown(&doc))
        }
        unknown => Err(format!("Unknown transform: {unknown}")),
    }
}
