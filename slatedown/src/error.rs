//! Conversion errors.
//!
//! One enum covers the whole pipeline. The split between `ParseError`
//! and `ReferenceParseError` matters to callers: the former fails the
//! conversion, the latter only fails the enrichment pass, which the
//! importer downgrades to a warning and an unenriched tree.

use std::fmt;

/// Errors produced by format operations and the import pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// No registered format under that name
    FormatNotFound(String),
    /// The structural import (or a format's parse) failed
    ParseError(String),
    /// The second, full-fidelity parse behind enrichment failed
    ReferenceParseError(String),
    /// Serializing the tree to output text failed
    SerializationError(String),
    /// The format exists but cannot do what was asked of it
    NotSupported(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            ConvertError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConvertError::ReferenceParseError(msg) => {
                write!(f, "Reference parse error: {msg}")
            }
            ConvertError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            ConvertError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}
