//! Format implementations.
//!
//! Each format lives in its own module with a `parser` and/or
//! `serializer`, and exposes a type implementing [`crate::Format`].

pub mod json;
pub mod markdown;
