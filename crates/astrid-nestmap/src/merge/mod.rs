//! Deep, right-biased merge of trees.
//!
//! Nodes merge key by key. Everything else from the overlay **replaces** the
//! base value, so an overlay leaf wins over a base node and vice versa.

mod deep;
mod types;

pub use deep::{merge, merge_tracking};
pub use types::FieldSources;
