//! Dendrogram layout: node positions and line segments.
//!
//! The native coordinate space is bottom-up: `x` is the horizontal node
//! position ([compute_xpos]) and `y` the cumulative height, root at the
//! bottom. For [Orientation::LeftRight] and [Orientation::RightLeft] every
//! point has its coordinates swapped. Flipping the height axis (top-down,
//! right-left) is left to the renderer, since the geometry is symmetric
//! under such a flip.
//!
//! # Example
//! ```
//! use dendrick::layout::{DendrogramLayout, Orientation};
//! use dendrick::newick::parse_str;
//!
//! let tree = parse_str("(A:0.1,B:0.2,(C:0.3,D:0.4):0.5);")?;
//! let layout = DendrogramLayout::compute(&tree, Orientation::BottomUp)?;
//! assert_eq!(layout.xpos_of(3), 3.5);
//! assert_eq!(layout.segments().drops().len(), 6);
//! assert_eq!(layout.segments().merges().len(), 2);
//!
//! # Ok::<(), dendrick::DendroError>(())
//! ```

pub mod segments;
pub mod xpos;

pub use segments::Segments;
pub use xpos::compute_xpos;

use crate::error::DendroError;
use crate::model::tree_array::validate_parents;
use crate::model::{NodeIndex, Topology, TreeArray};
use kurbo::Point;
use tracing::debug;

// =#========================================================================#=
// ORIENTATION
// =#========================================================================#=
/// Direction in which a dendrogram grows from its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Root at the bottom, leaves on top
    #[default]
    BottomUp,
    /// Root at the top, leaves at the bottom (renderer flips the y axis)
    TopDown,
    /// Root on the left, leaves on the right
    LeftRight,
    /// Root on the right, leaves on the left (renderer flips the x axis)
    RightLeft,
}

impl Orientation {
    /// Returns whether heights run along the x axis in this orientation.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Orientation::LeftRight | Orientation::RightLeft)
    }

    /// Maps a native `(position, height)` point into this orientation.
    pub fn to_output(self, point: Point) -> Point {
        if self.is_horizontal() {
            Point::new(point.y, point.x)
        } else {
            point
        }
    }

    /// Maps a point of this orientation back to native `(position, height)`.
    pub fn to_native(self, point: Point) -> Point {
        // swapping is its own inverse
        self.to_output(point)
    }
}

// =#========================================================================#=
// DENDROGRAM LAYOUT
// =#========================================================================$=
/// Positions and segments of a [TreeArray] drawn as dendrogram.
#[derive(Debug, Clone, PartialEq)]
pub struct DendrogramLayout {
    orientation: Orientation,
    xpos: Vec<f64>,
    segments: Segments,
}

impl DendrogramLayout {
    /// Computes the layout of `tree` in the given orientation.
    ///
    /// # Errors
    /// [DendroError::LayoutNonconvergent] if positions cannot be assigned
    /// (not expected for a valid [TreeArray]).
    pub fn compute(tree: &TreeArray, orientation: Orientation) -> Result<Self, DendroError> {
        Self::with_topology(tree, &tree.topology(), orientation)
    }

    /// Computes the layout reusing an already derived [Topology] of `tree`.
    pub fn with_topology(
        tree: &TreeArray,
        topology: &Topology,
        orientation: Orientation,
    ) -> Result<Self, DendroError> {
        let xpos = compute_xpos(topology)?;
        let segments = Segments::build(tree.parents(), tree.heights(), topology, &xpos, orientation);
        debug!(
            nodes = tree.len(),
            segments = segments.len(),
            ?orientation,
            "computed dendrogram layout"
        );
        Ok(Self {
            orientation,
            xpos,
            segments,
        })
    }

    /// Returns the same layout in another orientation.
    pub fn reoriented(&self, orientation: Orientation) -> Self {
        Self {
            orientation,
            xpos: self.xpos.clone(),
            segments: self.segments.reoriented(self.orientation, orientation),
        }
    }

    /// Returns the orientation of the segments.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the horizontal position of every node.
    pub fn xpos(&self) -> &[f64] {
        &self.xpos
    }

    /// Returns the horizontal position of `index`.
    pub fn xpos_of(&self, index: NodeIndex) -> f64 {
        self.xpos[index]
    }

    /// Returns the segments in output coordinates.
    pub fn segments(&self) -> &Segments {
        &self.segments
    }
}

/// Computes dendrogram segments straight from a parent and a height array.
///
/// # Errors
/// [DendroError::InvalidTreeArray] if the arrays differ in length or the
/// parents violate the tree array encoding.
pub fn dendro_layout(
    parents: &[Option<NodeIndex>],
    heights: &[f64],
    orientation: Orientation,
) -> Result<Segments, DendroError> {
    if heights.len() != parents.len() {
        return Err(DendroError::InvalidTreeArray {
            index: 0,
            reason: format!("{} parents but {} heights", parents.len(), heights.len()),
        });
    }
    validate_parents(parents)?;

    let topology = Topology::from_parents(parents);
    let xpos = compute_xpos(&topology)?;
    Ok(Segments::build(parents, heights, &topology, &xpos, orientation))
}
