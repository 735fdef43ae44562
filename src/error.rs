//! Crate-level error type.

use crate::model::NodeIndex;
use crate::parser::ParsingError;
use thiserror::Error;

/// Errors surfaced by the dendrogram engine.
///
/// All operations are deterministic, so none of these are worth retrying.
#[derive(Error, Debug)]
pub enum DendroError {
    /// The Newick input is not well formed (unbalanced brackets, bad branch length, ...).
    #[error("Malformed notation: {0}")]
    MalformedNotation(#[from] ParsingError),

    /// Parallel arrays handed in by a producer violate the tree array encoding.
    #[error("Invalid tree array at node {index}: {reason}")]
    InvalidTreeArray { index: NodeIndex, reason: String },

    /// The sort keys given to a reorder do not match the tree.
    #[error("Inconsistent reorder: {keys} sort keys for {nodes} nodes")]
    ReorderInconsistent { keys: usize, nodes: usize },

    /// Position assignment left branch nodes unresolved; unreachable for valid trees.
    #[error("Layout did not converge: {unresolved} branch nodes without position")]
    LayoutNonconvergent { unresolved: usize },

    /// Reading a Newick file failed.
    #[error("IO error - {0}")]
    Io(#[from] std::io::Error),
}

impl DendroError {
    pub(crate) fn invalid_tree_array(index: NodeIndex, reason: impl Into<String>) -> Self {
        DendroError::InvalidTreeArray {
            index,
            reason: reason.into(),
        }
    }
}
