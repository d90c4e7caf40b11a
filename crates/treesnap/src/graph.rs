//! The node graph a layout run mutates.
//!
//! The store is built once from extracted focus records, then the layout
//! stages resolve positions, attach children, hide suppressed branches and
//! record connector masks on it, in that order. It is discarded after the
//! tree is rendered.

mod store;

pub use store::{Child, FocusGraph, Node, NodeIndex};
