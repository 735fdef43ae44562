//! Canonical flat encoding of a rooted tree.
//!
//! Provides [TreeArray], parallel arrays of parent indices, names, edge
//! lengths and derived cumulative heights, which every downstream component
//! (topology, layout, reordering, selection) consumes.

use crate::error::DendroError;
use crate::model::NodeIndex;
use crate::model::topology::Topology;

/// Sentinel used for the root's parent in the signed parent encoding.
pub const NO_PARENT: i64 = -1;

// =#========================================================================#=
// TREE ARRAY
// =#========================================================================#=
/// A rooted tree as parallel arrays indexed `0..n`.
///
/// # Encoding invariant
/// The arrays are a pre-order flattening: index 0 is the (only) root, every
/// node appears before its descendants, and the descendants of any node
/// occupy one contiguous block directly after it, children in declaration
/// order, each followed by its own full subtree. Construction through
/// [TreeArray::from_parts] checks this; the parser, flattener and reorder
/// engine produce it by construction.
///
/// Heights are derived (`height[i] = length[i] + height[parent[i]]`, root
/// base 0) and cannot be set independently.
///
/// A tree array is never mutated in place; reordering produces a new one
/// (see [reorder](crate::reorder)).
#[derive(Debug, Clone, PartialEq)]
pub struct TreeArray {
    parents: Vec<Option<NodeIndex>>,
    names: Vec<Option<String>>,
    lengths: Vec<f64>,
    heights: Vec<f64>,
}

// ============================================================================
// Construction (pub)
// ============================================================================
impl TreeArray {
    /// Creates a tree array from parallel arrays, validating the encoding.
    ///
    /// # Arguments
    /// * `parents` - Parent index per node, `None` for the root
    /// * `names` - Optional name per node
    /// * `lengths` - Edge length from parent per node (finite, non-negative)
    ///
    /// # Errors
    /// [DendroError::InvalidTreeArray] if the arrays differ in length, are
    /// empty, have a root other than exactly index 0, break the contiguous
    /// pre-order layout, or contain a negative or non-finite length.
    pub fn from_parts(
        parents: Vec<Option<NodeIndex>>,
        names: Vec<Option<String>>,
        lengths: Vec<f64>,
    ) -> Result<Self, DendroError> {
        if names.len() != parents.len() || lengths.len() != parents.len() {
            return Err(DendroError::invalid_tree_array(
                0,
                format!(
                    "sequence lengths differ: {} parents, {} names, {} lengths",
                    parents.len(),
                    names.len(),
                    lengths.len()
                ),
            ));
        }
        validate_parents(&parents)?;
        if let Some(index) = lengths.iter().position(|l| !l.is_finite() || *l < 0.0) {
            return Err(DendroError::invalid_tree_array(
                index,
                format!("edge length {} is not a non-negative number", lengths[index]),
            ));
        }

        Ok(Self::from_parts_unchecked(parents, names, lengths))
    }

    /// Creates a tree array from a parent array using `-1` for the root,
    /// as exchanged with loaders and renderers.
    ///
    /// # Errors
    /// As [TreeArray::from_parts]; additionally any negative parent other
    /// than [NO_PARENT] is rejected.
    pub fn from_signed_parents(
        parents: &[i64],
        names: Vec<Option<String>>,
        lengths: Vec<f64>,
    ) -> Result<Self, DendroError> {
        let parents = parents
            .iter()
            .enumerate()
            .map(|(index, &p)| match p {
                NO_PARENT => Ok(None),
                p if p >= 0 => Ok(Some(p as NodeIndex)),
                p => Err(DendroError::invalid_tree_array(
                    index,
                    format!("parent id {p} is neither a node nor the root sentinel"),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_parts(parents, names, lengths)
    }

    /// Assembles a tree array from parts already known to satisfy the encoding.
    pub(crate) fn from_parts_unchecked(
        parents: Vec<Option<NodeIndex>>,
        names: Vec<Option<String>>,
        lengths: Vec<f64>,
    ) -> Self {
        debug_assert!(validate_parents(&parents).is_ok());
        let heights = derive_heights(&parents, &lengths);
        Self {
            parents,
            names,
            lengths,
            heights,
        }
    }
}

// ============================================================================
// Getters / Accessors (pub)
// ============================================================================
impl TreeArray {
    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Always `false`: a tree array holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns the index of the root, which is always 0.
    pub fn root(&self) -> NodeIndex {
        0
    }

    /// Returns the parent of `index`, `None` for the root.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.parents[index]
    }

    /// Returns all parent indices.
    pub fn parents(&self) -> &[Option<NodeIndex>] {
        &self.parents
    }

    /// Returns the parent array with [NO_PARENT] for the root.
    pub fn signed_parents(&self) -> Vec<i64> {
        self.parents
            .iter()
            .map(|p| p.map_or(NO_PARENT, |p| p as i64))
            .collect()
    }

    /// Returns the name of `index`, if any.
    pub fn name(&self, index: NodeIndex) -> Option<&str> {
        self.names[index].as_deref()
    }

    /// Returns all names.
    pub fn names(&self) -> &[Option<String>] {
        &self.names
    }

    /// Returns the length of the edge into `index`.
    pub fn length(&self, index: NodeIndex) -> f64 {
        self.lengths[index]
    }

    /// Returns all edge lengths.
    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Returns the cumulative height of `index`.
    pub fn height(&self, index: NodeIndex) -> f64 {
        self.heights[index]
    }

    /// Returns all cumulative heights.
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Returns the height the edge into `index` starts at:
    /// the parent's height, or 0 for the root.
    pub fn parent_height(&self, index: NodeIndex) -> f64 {
        self.parents[index].map_or(0.0, |p| self.heights[p])
    }

    /// Returns the number of leaves.
    pub fn num_leaves(&self) -> usize {
        let mut has_child = vec![false; self.len()];
        for p in self.parents.iter().flatten() {
            has_child[*p] = true;
        }
        has_child.iter().filter(|&&b| !b).count()
    }

    /// Derives leafness, children and subtree blocks of this tree.
    pub fn topology(&self) -> Topology {
        Topology::from_parents(&self.parents)
    }
}

// ============================================================================
// Encoding helpers
// ============================================================================
/// Checks that a parent array satisfies the encoding invariant.
///
/// Walks the array keeping the current root-to-node path: the parent of each
/// node must lie on the path of its predecessor, otherwise its subtree would
/// not be contiguous.
pub(crate) fn validate_parents(parents: &[Option<NodeIndex>]) -> Result<(), DendroError> {
    match parents.first() {
        None => return Err(DendroError::invalid_tree_array(0, "tree has no nodes")),
        Some(Some(_)) => {
            return Err(DendroError::invalid_tree_array(0, "first entry must be the root"));
        }
        Some(None) => {}
    }

    let mut path: Vec<NodeIndex> = vec![0];
    for (index, parent) in parents.iter().enumerate().skip(1) {
        let Some(parent) = *parent else {
            return Err(DendroError::invalid_tree_array(index, "second root"));
        };
        if parent >= index {
            return Err(DendroError::invalid_tree_array(
                index,
                format!("parent {parent} does not precede its child"),
            ));
        }
        while path.last() != Some(&parent) {
            path.pop();
            if path.is_empty() {
                return Err(DendroError::invalid_tree_array(
                    index,
                    format!("subtree of parent {parent} is not contiguous"),
                ));
            }
        }
        path.push(index);
    }

    Ok(())
}

/// Computes cumulative heights in one forward pass.
///
/// Parents precede their children, so each parent height is final when read.
pub(crate) fn derive_heights(parents: &[Option<NodeIndex>], lengths: &[f64]) -> Vec<f64> {
    let mut heights = Vec::with_capacity(parents.len());
    for (parent, length) in parents.iter().zip(lengths) {
        let base = parent.map_or(0.0, |p| heights[p]);
        heights.push(length + base);
    }
    heights
}
