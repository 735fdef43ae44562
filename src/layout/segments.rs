//! Line segments composing a dendrogram.

use crate::layout::Orientation;
use crate::model::{NodeIndex, Topology};
use kurbo::{Line, Point, Rect};

// =#========================================================================#=
// SEGMENTS
// =#========================================================================#=
/// Drop and merge segments of a dendrogram in output coordinates.
///
/// - A **drop** segment per node runs along the height axis from the
///   parent's height (0 for the root) up to the node's own height.
/// - A **merge** segment per branch node runs along the position axis at the
///   node's height, from its first to its last child.
#[derive(Debug, Clone, PartialEq)]
pub struct Segments {
    drops: Vec<Line>,
    merges: Vec<Line>,
}

impl Segments {
    /// Builds segments in native (bottom-up) coordinates and maps them into
    /// `orientation`.
    ///
    /// # Arguments
    /// * `parents` - Parent index per node
    /// * `heights` - Cumulative height per node
    /// * `topology` - Topology derived from `parents`
    /// * `xpos` - Horizontal position per node
    /// * `orientation` - Output orientation
    pub(crate) fn build(
        parents: &[Option<NodeIndex>],
        heights: &[f64],
        topology: &Topology,
        xpos: &[f64],
        orientation: Orientation,
    ) -> Self {
        let line = |x0: f64, y0: f64, x1: f64, y1: f64| {
            Line::new(
                orientation.to_output(Point::new(x0, y0)),
                orientation.to_output(Point::new(x1, y1)),
            )
        };

        let drops = parents
            .iter()
            .enumerate()
            .map(|(i, parent)| {
                let base = parent.map_or(0.0, |p| heights[p]);
                line(xpos[i], base, xpos[i], heights[i])
            })
            .collect();

        let merges = (0..parents.len())
            .filter_map(|i| {
                let children = topology.children(i);
                let (first, last) = (children.first()?, children.last()?);
                Some(line(xpos[*first], heights[i], xpos[*last], heights[i]))
            })
            .collect();

        Self { drops, merges }
    }

    /// Returns the drop segments, one per node in array order.
    pub fn drops(&self) -> &[Line] {
        &self.drops
    }

    /// Returns the merge segments, one per branch node in array order.
    pub fn merges(&self) -> &[Line] {
        &self.merges
    }

    /// Returns all segments: drops first, then merges.
    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.drops.iter().chain(self.merges.iter())
    }

    /// Returns the total number of segments.
    pub fn len(&self) -> usize {
        self.drops.len() + self.merges.len()
    }

    /// Returns whether there are no segments.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the bounding box of all segments, e.g. to set axis limits.
    pub fn bounds(&self) -> Option<Rect> {
        self.iter()
            .map(|line| Rect::from_points(line.p0, line.p1))
            .reduce(|a, b| a.union(b))
    }

    /// Returns the same segments mapped from `from` into `to` orientation.
    pub(crate) fn reoriented(&self, from: Orientation, to: Orientation) -> Self {
        let map = |line: &Line| {
            Line::new(
                to.to_output(from.to_native(line.p0)),
                to.to_output(from.to_native(line.p1)),
            )
        };
        Self {
            drops: self.drops.iter().map(map).collect(),
            merges: self.merges.iter().map(map).collect(),
        }
    }
}
