//! JSON format implementation
//!
//! The document tree's own serde form: an array of nodes with the field
//! names fixed by the data model (`type`, `children`, `text`, mark
//! flags, `url`, `lang`, `caption`, `checked`, `align`). This is the
//! interchange format for editors and for piping trees between tools.

use crate::error::ConvertError;
use crate::format::Format;
use crate::tree::Node;
use std::collections::HashMap;

/// JSON format for the document tree itself.
pub struct JsonFormat {
    /// Pretty-print output. On by default.
    pub pretty: bool,
}

impl Default for JsonFormat {
    fn default() -> Self {
        JsonFormat { pretty: true }
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Document tree as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Vec<Node>, ConvertError> {
        serde_json::from_str(source)
            .map_err(|e| ConvertError::ParseError(format!("invalid document JSON: {e}")))
    }

    fn serialize(&self, document: &[Node]) -> Result<String, ConvertError> {
        let result = if self.pretty {
            serde_json::to_string_pretty(document)
        } else {
            serde_json::to_string(document)
        };
        result.map_err(|e| ConvertError::SerializationError(format!("JSON encoding failed: {e}")))
    }

    fn serialize_with_options(
        &self,
        document: &[Node],
        options: &HashMap<String, String>,
    ) -> Result<String, ConvertError> {
        let pretty = match options.get("pretty").map(String::as_str) {
            Some("false" | "0" | "no") => false,
            Some(_) => true,
            None => self.pretty,
        };
        JsonFormat { pretty }.serialize(document)
    }
}
