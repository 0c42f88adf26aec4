//! Format-agnostic core algorithms.
//!
//! The heavy lifting of the crate lives here: aligning two
//! independently produced representations of the same document so that
//! metadata lost by the cheaper parse can be repaired from the richer
//! one. Format modules stay focused on data-shape transformations and
//! delegate to this layer.

pub mod align;
