//! Dendrick turns Newick strings describing a hierarchical clustering into
//! array-encoded trees and lays them out as dendrograms.
//!
//! Core functionality provided:
//! - Newick: Parse Newick strings (arbitrary branching, optional names and
//!   lengths, quoted names, comments) into a nested [NewickTree](model::NewickTree).
//! - Tree array: Flatten into a [TreeArray], parallel arrays of parent index,
//!   name, edge length and derived cumulative height, in a pre-order layout
//!   where each subtree occupies one contiguous index block.
//! - Topology: Derive leafness, children and subtree blocks from the parent
//!   array alone ([Topology](model::Topology)).
//! - Layout: Node positions and drop/merge line segments in four
//!   orientations ([DendrogramLayout]).
//! - Reorder: Sort siblings by any per-node key while keeping the encoding,
//!   with a permutation back to original indices ([reorder()]).
//! - Select: Point, range and rectangle queries on a layout, optionally
//!   expanded to whole subtrees ([Selector](select::Selector)).
//!
//! Everything operates on immutable inputs and returns new values;
//! nothing renders, and no state is shared between calls.
//!
//! # Example
//! ```
//! use dendrick::layout::Orientation;
//! use dendrick::select::Query;
//! use kurbo::Point;
//!
//! let tree = dendrick::parse_newick_str("(A:0.1,B:0.2,(C:0.3,D:0.4):0.5);")?;
//! assert_eq!(tree.heights(), &[0.0, 0.1, 0.2, 0.5, 0.8, 0.9]);
//!
//! let layout = dendrick::compute_layout(&tree, Orientation::LeftRight)?;
//! // Heights now run along x
//! let root_drop = layout.segments().drops()[0];
//! assert_eq!(root_drop.p1.x, 0.0);
//!
//! let topology = tree.topology();
//! let selector = dendrick::select::Selector::new(&tree, &topology, &layout);
//! assert_eq!(selector.select(&Query::Point(Point::new(0.85, 4.0))), vec![5]);
//!
//! # Ok::<(), dendrick::DendroError>(())
//! ```

pub mod error;
pub mod layout;
pub mod model;
pub mod newick;
pub mod parser;
pub mod reorder;
pub mod select;

pub use crate::error::DendroError;
pub use crate::layout::{DendrogramLayout, Orientation};
pub use crate::model::{NodeIndex, TreeArray};
pub use crate::reorder::{Reordered, reorder};

use std::path::Path;

// ============================================================================
// Quick API
// ============================================================================
/// Parses a Newick string into a [TreeArray] using default settings.
///
/// See [`newick::parse_str`] for full documentation.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<TreeArray, DendroError> {
    newick::parse_str(newick)
}

/// Parses the first tree of a Newick file into a [TreeArray] using default settings.
///
/// See [`newick::parse_file`] for full documentation.
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<TreeArray, DendroError> {
    newick::parse_file(path)
}

/// Computes the dendrogram layout of `tree` in `orientation`.
///
/// See [`DendrogramLayout::compute`] for full documentation.
pub fn compute_layout(tree: &TreeArray, orientation: Orientation) -> Result<DendrogramLayout, DendroError> {
    DendrogramLayout::compute(tree, orientation)
}
