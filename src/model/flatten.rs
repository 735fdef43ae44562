//! Conversion of a parsed [NewickTree] into a [TreeArray].
//!
//! The flattener walks the nested structure in pre-order (node, then the full
//! subtree of each child in declaration order) and appends one entry per
//! visit. This construction is what establishes the contiguous-subtree
//! encoding of [TreeArray].

use crate::error::DendroError;
use crate::model::node::NewickTree;
use crate::model::{NodeIndex, TreeArray};
use tracing::trace;

/// Length used for edges without `:length` in the notation, unless configured otherwise.
pub const DEFAULT_MISSING_LENGTH: f64 = 0.0;

// =#========================================================================#=
// FLATTENER
// =#========================================================================$=
/// Configurable conversion from [NewickTree] to [TreeArray].
///
/// The root's own length defaults to 0 when absent (it has no incoming edge);
/// other nodes without a length get the configured missing length
/// ([DEFAULT_MISSING_LENGTH] unless set via
/// [with_missing_length](Self::with_missing_length)).
///
/// # Example
/// ```
/// use dendrick::model::Flattener;
/// use dendrick::newick::NewickParser;
///
/// let nested = NewickParser::new().parse_str("(A,(B,C));").unwrap();
/// let tree = Flattener::new().with_missing_length(1.0).flatten(&nested).unwrap();
/// assert_eq!(tree.heights(), &[0.0, 1.0, 1.0, 2.0, 2.0]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Flattener {
    missing_length: f64,
}

impl Default for Flattener {
    fn default() -> Self {
        Self::new()
    }
}

impl Flattener {
    /// Creates a flattener using [DEFAULT_MISSING_LENGTH].
    pub fn new() -> Self {
        Self {
            missing_length: DEFAULT_MISSING_LENGTH,
        }
    }

    /// Sets the length given to non-root edges without a length,
    /// e.g. 1.0 to draw topology-only trees as cladograms.
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn with_missing_length(mut self, length: f64) -> Self {
        assert!(length.is_finite() && length >= 0.0);
        self.missing_length = length;
        self
    }

    /// Flattens `tree` into a [TreeArray].
    ///
    /// # Errors
    /// [DendroError::InvalidTreeArray] if `tree` has no nodes.
    pub fn flatten(&self, tree: &NewickTree) -> Result<TreeArray, DendroError> {
        if tree.is_empty() {
            return Err(DendroError::invalid_tree_array(0, "tree has no nodes"));
        }

        let n = tree.num_nodes();
        let mut parents = Vec::with_capacity(n);
        let mut names = Vec::with_capacity(n);
        let mut lengths = Vec::with_capacity(n);

        // (arena index, flat index of parent)
        let mut stack: Vec<(NodeIndex, Option<NodeIndex>)> = vec![(0, None)];
        while let Some((arena_index, parent)) = stack.pop() {
            let node = &tree[arena_index];
            let flat_index = parents.len();

            let length = match (node.length(), parent) {
                (Some(length), _) => length,
                (None, None) => 0.0,
                (None, Some(_)) => self.missing_length,
            };
            parents.push(parent);
            names.push(node.name().map(str::to_string));
            lengths.push(length);

            // Reversed, so that children are visited in declaration order
            for &child in node.children().iter().rev() {
                stack.push((child, Some(flat_index)));
            }
        }

        trace!(nodes = n, "flattened newick tree");
        TreeArray::from_parts(parents, names, lengths)
    }
}

/// Flattens `tree` with default settings.
///
/// See [Flattener::flatten].
pub fn flatten(tree: &NewickTree) -> Result<TreeArray, DendroError> {
    Flattener::new().flatten(tree)
}
