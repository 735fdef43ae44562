//! Nested node structure produced by the Newick parser.
//!
//! A [NewickTree] is only an intermediate: the [NewickParser](crate::newick::NewickParser)
//! fills it, and [flatten](crate::model::flatten) converts it once into a
//! [TreeArray](crate::model::TreeArray). Nodes reference their children by
//! index into the tree's arena rather than by pointer.

use crate::model::NodeIndex;

// =#========================================================================#=
// NEWICK NODE
// =#========================================================================#=
/// A node as written in Newick notation.
///
/// - **Leaf**: `name:length`, either part optional
/// - **Internal**: `(child,child,...)name:length`, name commonly absent
#[derive(Debug, Clone, PartialEq)]
pub enum NewickNode {
    /// Node without children
    Leaf {
        /// Name, `None` if absent (an empty unquoted name counts as absent)
        name: Option<String>,
        /// Length of incoming edge, `None` if not given
        length: Option<f64>,
    },
    /// Node with at least one child
    Internal {
        /// Name, `None` if absent (an empty unquoted name counts as absent)
        name: Option<String>,
        /// Length of incoming edge, `None` if not given
        length: Option<f64>,
        /// Arena indices of children in declaration order
        children: Vec<NodeIndex>,
    },
}

impl NewickNode {
    /// Creates a leaf without name and length.
    pub fn new_leaf() -> Self {
        NewickNode::Leaf {
            name: None,
            length: None,
        }
    }

    /// Creates an internal node without name, length and children.
    pub fn new_internal() -> Self {
        NewickNode::Internal {
            name: None,
            length: None,
            children: Vec::new(),
        }
    }

    /// Returns the name of this node, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            NewickNode::Leaf { name, .. } | NewickNode::Internal { name, .. } => name.as_deref(),
        }
    }

    /// Returns the length of the incoming edge, if given.
    pub fn length(&self) -> Option<f64> {
        match self {
            NewickNode::Leaf { length, .. } | NewickNode::Internal { length, .. } => *length,
        }
    }

    /// Returns the children of this node (empty for leaves).
    pub fn children(&self) -> &[NodeIndex] {
        match self {
            NewickNode::Leaf { .. } => &[],
            NewickNode::Internal { children, .. } => children,
        }
    }

    /// Returns whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, NewickNode::Leaf { .. })
    }

    /// Sets name and length.
    pub(crate) fn set_label(&mut self, label: Option<String>, branch_length: Option<f64>) {
        match self {
            NewickNode::Leaf { name, length } | NewickNode::Internal { name, length, .. } => {
                *name = label;
                *length = branch_length;
            }
        }
    }
}

// =#========================================================================#=
// NEWICK TREE
// =#========================================================================$=
/// Arena of [NewickNode]s with the root at index 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewickTree {
    nodes: Vec<NewickNode>,
}

impl NewickTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Adds a node to the arena and attaches it as last child of `parent`.
    ///
    /// # Arguments
    /// * `node` - The node to add
    /// * `parent` - Index of an internal node, or `None` when adding the root
    ///
    /// # Returns
    /// The arena index of the new node.
    ///
    /// # Panics
    /// Panics if `parent` is out of bounds or refers to a leaf.
    pub fn add_node(&mut self, node: NewickNode, parent: Option<NodeIndex>) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(node);
        if let Some(parent) = parent {
            match &mut self.nodes[parent] {
                NewickNode::Internal { children, .. } => children.push(index),
                NewickNode::Leaf { .. } => panic!("cannot attach child to leaf {parent}"),
            }
        }
        index
    }

    /// Returns the root, or `None` for an empty tree.
    pub fn root(&self) -> Option<&NewickNode> {
        self.nodes.first()
    }

    /// Returns a mutable reference to the node at `index`.
    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut NewickNode {
        &mut self.nodes[index]
    }

    /// Returns the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of leaves.
    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Returns whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl std::ops::Index<NodeIndex> for NewickTree {
    type Output = NewickNode;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}
