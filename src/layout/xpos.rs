//! Horizontal position assignment.

use crate::error::DendroError;
use crate::model::{NodeIndex, Topology};
use tracing::trace;

/// Assigns every node its horizontal layout position.
///
/// Leaves get consecutive positions `1, 2, 3, ...` in array order. A branch
/// node gets the mean position of its direct children once all of them are
/// positioned. Since children may be unresolved branches themselves, branch
/// nodes are relaxed in full sweeps, at most [Topology::num_levels] of them:
/// each sweep resolves at least the deepest unresolved layer, and no tree is
/// deeper than it has branch nodes. Sweeps visit branch nodes in descending
/// index order, so for a pre-order encoding the first sweep already resolves
/// all of them.
///
/// # Errors
/// [DendroError::LayoutNonconvergent] if a branch node is still unresolved
/// after the last sweep; this does not happen for parent arrays satisfying
/// the tree array encoding.
pub fn compute_xpos(topology: &Topology) -> Result<Vec<f64>, DendroError> {
    let n = topology.len();
    let mut xpos: Vec<Option<f64>> = vec![None; n];

    let mut next_position = 1.0;
    for leaf in topology.leaves() {
        xpos[leaf] = Some(next_position);
        next_position += 1.0;
    }

    let mut unresolved: Vec<NodeIndex> = (0..n).rev().filter(|&i| !topology.is_leaf(i)).collect();
    let max_sweeps = topology.num_levels();
    let mut sweeps = 0;
    while !unresolved.is_empty() && sweeps < max_sweeps {
        sweeps += 1;
        unresolved.retain(|&index| {
            let children = topology.children(index);
            let sum: Option<f64> = children.iter().map(|&c| xpos[c]).sum();
            match sum {
                Some(sum) => {
                    xpos[index] = Some(sum / children.len() as f64);
                    false
                }
                None => true,
            }
        });
    }
    trace!(sweeps, max_sweeps, "relaxed branch positions");

    if !unresolved.is_empty() {
        return Err(DendroError::LayoutNonconvergent {
            unresolved: unresolved.len(),
        });
    }

    xpos.into_iter()
        .collect::<Option<Vec<f64>>>()
        .ok_or(DendroError::LayoutNonconvergent { unresolved: 0 })
}
