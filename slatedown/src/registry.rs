//! Format registry for format discovery and selection
//!
//! The registry is the one place that knows which formats exist. The
//! conversion entry points (CLI convert, inspect) look formats up by
//! name here, or by file extension when a `--from` flag is absent.
//! `with_defaults` registers the two built-in formats, `markdown` and
//! `json`; callers wanting non-default knobs (an unenriched import, a
//! compact JSON form) register their own instances instead.

use crate::error::ConvertError;
use crate::format::Format;
use crate::tree::Node;
use std::collections::HashMap;

/// Registry of document formats, keyed by format name.
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::with_defaults();
/// let doc = registry.parse("# Title", "markdown")?;
/// let json = registry.serialize(&doc, "json")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format under its own name, replacing any previous
    /// registration. This is how configured instances (e.g. a markdown
    /// format with enrichment off) displace the defaults.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, ConvertError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| ConvertError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect a format from a filename's extension.
    ///
    /// `notes.md` and `notes.markdown` resolve to `markdown`,
    /// `tree.json` to `json`; anything unclaimed returns `None` and the
    /// caller must name the format explicitly.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        for format in self.formats.values() {
            if format.file_extensions().contains(&extension) {
                return Some(format.name().to_string());
            }
        }

        None
    }

    /// Parse source text using the specified format
    pub fn parse(&self, source: &str, format: &str) -> Result<Vec<Node>, ConvertError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(ConvertError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        fmt.parse(source)
    }

    /// Serialize a document tree using the specified format
    pub fn serialize(&self, document: &[Node], format: &str) -> Result<String, ConvertError> {
        let empty = HashMap::new();
        self.serialize_with_options(document, format, &empty)
    }

    /// Serialize a document tree using the specified format and options
    pub fn serialize_with_options(
        &self,
        document: &[Node],
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, ConvertError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(ConvertError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        fmt.serialize_with_options(document, options)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        // Register built-in formats
        registry.register(crate::formats::markdown::MarkdownFormat::default());
        registry.register(crate::formats::json::JsonFormat::default());

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
