//! Tree module
//!
//! Reconstructs item hierarchies (tag -> child tags) from flat
//! parent/children endpoint calls.

mod builder;
mod types;

pub use builder::{ChildSource, TreeBuilder};
pub use types::{PreOrder, TreeNode};
