//! Structure-preserving reordering of siblings.
//!
//! [reorder] sorts the direct children of every node by a per-node key and
//! returns a new [TreeArray] in the resulting pre-order, together with the
//! permutation back to the original indices. The original tree is left
//! untouched, so layouts and selections on it stay valid; indices must not be
//! mixed across the two arrays without translating through the permutation.
//!
//! # Example
//! ```
//! use dendrick::newick::parse_str;
//! use dendrick::reorder::reorder;
//!
//! let tree = parse_str("(A:0.1,B:0.2,(C:0.3,D:0.4):0.5);")?;
//! // Tallest clade first
//! let keys: Vec<f64> = tree.heights().iter().map(|h| -h).collect();
//! let reordered = reorder(&tree, &keys)?;
//!
//! assert_eq!(reordered.permutation(), &[0, 3, 5, 4, 2, 1]);
//! assert_eq!(reordered.tree().signed_parents(), vec![-1, 0, 1, 1, 0, 0]);
//!
//! # Ok::<(), dendrick::DendroError>(())
//! ```

use crate::error::DendroError;
use crate::model::{NodeIndex, TreeArray};
use tracing::debug;

// =#========================================================================#=
// REORDERED
// =#========================================================================$=
/// A reordered tree and its permutation (`permutation[new] = old`).
#[derive(Debug, Clone, PartialEq)]
pub struct Reordered {
    tree: TreeArray,
    permutation: Vec<NodeIndex>,
}

impl Reordered {
    /// Returns the reordered tree.
    pub fn tree(&self) -> &TreeArray {
        &self.tree
    }

    /// Returns the permutation mapping new indices to original indices.
    pub fn permutation(&self) -> &[NodeIndex] {
        &self.permutation
    }

    /// Consumes this and returns tree and permutation.
    pub fn into_parts(self) -> (TreeArray, Vec<NodeIndex>) {
        (self.tree, self.permutation)
    }

    /// Returns the original index of the node now at `new_index`.
    pub fn original_index(&self, new_index: NodeIndex) -> NodeIndex {
        self.permutation[new_index]
    }

    /// Translates indices of the reordered tree (e.g. a selection) to original indices.
    pub fn to_original(&self, new_indices: &[NodeIndex]) -> Vec<NodeIndex> {
        new_indices.iter().map(|&i| self.permutation[i]).collect()
    }

    /// Translates original indices to indices of the reordered tree.
    pub fn to_new(&self, original_indices: &[NodeIndex]) -> Vec<NodeIndex> {
        let inverse = self.inverse();
        original_indices.iter().map(|&i| inverse[i]).collect()
    }

    /// Returns the inverse permutation (`inverse[old] = new`).
    pub fn inverse(&self) -> Vec<NodeIndex> {
        let mut inverse = vec![0; self.permutation.len()];
        for (new, &old) in self.permutation.iter().enumerate() {
            inverse[old] = new;
        }
        inverse
    }
}

// ============================================================================
// Reordering (pub)
// ============================================================================
/// Reorders `tree` so that the direct children of every node appear in
/// ascending order of `keys`.
///
/// Ties keep their original relative order, and keys compare by IEEE total
/// order (`NaN` sorts last). Each child is followed by its own complete
/// subtree as one contiguous block, so the result again satisfies the tree
/// array encoding; parent indices are renumbered to the new positions.
/// Names, lengths and hence heights travel with their nodes.
///
/// # Arguments
/// * `tree` - Tree to reorder
/// * `keys` - Sort key per node of `tree`
///
/// # Errors
/// [DendroError::ReorderInconsistent] if `keys` and `tree` differ in length.
pub fn reorder(tree: &TreeArray, keys: &[f64]) -> Result<Reordered, DendroError> {
    if keys.len() != tree.len() {
        return Err(DendroError::ReorderInconsistent {
            keys: keys.len(),
            nodes: tree.len(),
        });
    }

    let n = tree.len();
    let topology = tree.topology();
    let mut permutation = Vec::with_capacity(n);
    let mut new_index = vec![0; n];
    let mut parents = Vec::with_capacity(n);

    let mut stack = vec![tree.root()];
    while let Some(old) = stack.pop() {
        new_index[old] = permutation.len();
        permutation.push(old);
        // parents are emitted before their children, so already renumbered
        parents.push(tree.parent(old).map(|p| new_index[p]));

        let mut children = topology.children(old).to_vec();
        children.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));
        stack.extend(children.into_iter().rev());
    }

    let names = permutation
        .iter()
        .map(|&old| tree.names()[old].clone())
        .collect();
    let lengths = permutation.iter().map(|&old| tree.length(old)).collect();

    debug!(nodes = n, "reordered tree");
    Ok(Reordered {
        tree: TreeArray::from_parts_unchecked(parents, names, lengths),
        permutation,
    })
}

/// Reorders `tree` by a key computed per node index.
///
/// See [reorder].
pub fn reorder_by<F>(tree: &TreeArray, key: F) -> Result<Reordered, DendroError>
where
    F: Fn(NodeIndex) -> f64,
{
    let keys: Vec<f64> = (0..tree.len()).map(key).collect();
    reorder(tree, &keys)
}
