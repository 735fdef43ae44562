//! Data model for array-encoded trees.
//!
//! # Tree representation
//! Trees are represented by [TreeArray]: parallel arrays of parent index,
//! name and edge length (plus derived heights) in a pre-order layout where
//! each node's descendants form one contiguous index block. Nodes are
//! referred to by [NodeIndex]; there are no node references or pointers.
//!
//! # Building trees
//! 1. The [NewickParser](crate::newick::NewickParser) produces a [NewickTree],
//!    an arena of [NewickNode]s mirroring the nested notation.
//! 2. A [Flattener] converts it once into a [TreeArray].
//!
//! Any other producer may build a [TreeArray] directly from parallel arrays
//! via [TreeArray::from_parts], which validates the encoding.
//!
//! # Derived structure
//! [Topology] derives leafness, children lists and subtree blocks from the
//! parent array alone.

pub mod flatten;
pub mod node;
pub mod topology;
pub mod tree_array;

/// Index of a node in a tree (arena).
pub type NodeIndex = usize;

pub use flatten::{Flattener, flatten};
pub use node::{NewickNode, NewickTree};
pub use topology::Topology;
pub use tree_array::{NO_PARENT, TreeArray};
