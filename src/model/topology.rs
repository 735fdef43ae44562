//! Structural facts derived from a parent array alone.
//!
//! [Topology] holds per-node leafness, direct children and the index block
//! occupied by each node's descendants. It is computed from any parent array
//! satisfying the [TreeArray](crate::model::TreeArray) encoding, independent of
//! how that array was produced, and must be recomputed whenever the parents
//! change (e.g. after a [reorder](crate::reorder)).

use crate::model::NodeIndex;
use std::ops::Range;

// =#========================================================================#=
// TOPOLOGY
// =#========================================================================#=
/// Leafness, children lists and subtree blocks of an array-encoded tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    children: Vec<Vec<NodeIndex>>,
    /// Exclusive end of the descendant block of each node
    subtree_ends: Vec<NodeIndex>,
}

impl Topology {
    /// Derives the topology of a parent array in two linear passes.
    ///
    /// Leafness is decided structurally (no entry names the node as parent)
    /// rather than by comparing neighbouring parent ids, so it does not rely
    /// on the producer having kept the encoding intact.
    ///
    /// Subtree blocks are found by propagating block ends from the back of the
    /// array: every descendant of `i` has a larger index than `i`, so by the
    /// time `i` is reached all of them have pushed their ends into it. For a
    /// well-formed array this yields the same boundary as scanning forward for
    /// the first entry whose parent id is at most `parent[i]`.
    ///
    /// # Panics
    /// Panics if a parent index is out of bounds.
    pub fn from_parents(parents: &[Option<NodeIndex>]) -> Self {
        let n = parents.len();
        let mut children = vec![Vec::new(); n];
        for (index, parent) in parents.iter().enumerate() {
            if let Some(p) = parent {
                children[*p].push(index);
            }
        }

        let mut subtree_ends: Vec<NodeIndex> = (1..=n).collect();
        for index in (0..n).rev() {
            if let Some(p) = parents[index] {
                subtree_ends[p] = subtree_ends[p].max(subtree_ends[index]);
            }
        }

        Self {
            children,
            subtree_ends,
        }
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns whether there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns whether `index` has no children.
    pub fn is_leaf(&self, index: NodeIndex) -> bool {
        self.children[index].is_empty()
    }

    /// Returns leafness of every node.
    pub fn leafness(&self) -> Vec<bool> {
        self.children.iter().map(Vec::is_empty).collect()
    }

    /// Returns the leaves in array order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        (0..self.len()).filter(|&i| self.is_leaf(i))
    }

    /// Returns the number of leaves.
    pub fn num_leaves(&self) -> usize {
        self.leaves().count()
    }

    /// Returns the direct children of `index` in array order.
    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.children[index]
    }

    /// Returns the contiguous index range of all descendants of `index`
    /// (empty for leaves).
    pub fn subtree(&self, index: NodeIndex) -> Range<NodeIndex> {
        index + 1..self.subtree_ends[index]
    }

    /// Returns whether `node` lies in the subtree of `ancestor` (excluding `ancestor` itself).
    pub fn is_descendant(&self, node: NodeIndex, ancestor: NodeIndex) -> bool {
        self.subtree(ancestor).contains(&node)
    }

    /// Returns the number of distinct parent ids, root sentinel included:
    /// the number of branch nodes plus one, an upper bound on the tree depth.
    pub fn num_levels(&self) -> usize {
        self.children.iter().filter(|c| !c.is_empty()).count() + 1
    }
}
