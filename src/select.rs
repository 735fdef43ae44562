//! Geometric selection of nodes in a dendrogram layout.
//!
//! Queries are given in the output coordinates of the layout's
//! [Orientation] and mapped back to native `(position, height)` space
//! before testing nodes. Each node occupies its drop segment: position
//! `xpos[i]` and the height interval `[height[parent[i]], height[i]]`.
//!
//! - [Query::Point] picks one node: among the nodes whose clade spans the
//!   point's height (from where the node attaches to its parent up to its
//!   highest descendant), the one with position closest to the point. Ties
//!   go to the smallest index.
//! - [Query::Range] selects every node whose position (or height interval)
//!   meets a 1-D range along one output axis.
//! - [Query::Rect] selects every node whose drop segment meets the rectangle.
//!
//! With subtree expansion each selected node brings its whole subtree block.
//! Results are ascending, de-duplicated indices into the queried tree; after a
//! [reorder](crate::reorder) they must be translated through its permutation.
//!
//! # Example
//! ```
//! use dendrick::layout::{DendrogramLayout, Orientation};
//! use dendrick::newick::parse_str;
//! use dendrick::select::{Query, Selector};
//! use kurbo::Point;
//!
//! let tree = parse_str("(A:0.1,B:0.2,(C:0.3,D:0.4):0.5);")?;
//! let topology = tree.topology();
//! let layout = DendrogramLayout::with_topology(&tree, &topology, Orientation::BottomUp)?;
//!
//! let selector = Selector::new(&tree, &topology, &layout).with_subtree_expansion();
//! let selected = selector.select(&Query::Point(Point::new(3.5, 0.85)));
//! assert_eq!(selected, vec![3, 4, 5]);
//!
//! # Ok::<(), dendrick::DendroError>(())
//! ```

use crate::layout::{DendrogramLayout, Orientation};
use crate::model::{NodeIndex, Topology, TreeArray};
use kurbo::{Point, Rect};
use std::collections::BTreeSet;
use tracing::debug;

/// Axis of the output coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal axis
    X,
    /// Vertical axis
    Y,
}

/// A geometric selection query in output coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Query {
    /// Pick the single nearest node
    Point(Point),
    /// Select all nodes meeting `[min, max]` along `axis` (bounds in any order)
    Range { axis: Axis, min: f64, max: f64 },
    /// Select all nodes meeting the rectangle; zero-area rectangles select nothing
    Rect(Rect),
}

/// Native axes: node positions and heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NativeAxis {
    Position,
    Height,
}

// =#========================================================================#=
// SELECTOR
// =#========================================================================$=
/// Runs [Query]s against one tree and its layout.
#[derive(Debug, Clone)]
pub struct Selector<'a> {
    tree: &'a TreeArray,
    topology: &'a Topology,
    xpos: &'a [f64],
    orientation: Orientation,
    expand_subtree: bool,
    /// Highest height within each node's subtree (itself included)
    reach: Vec<f64>,
}

impl<'a> Selector<'a> {
    /// Creates a selector for `tree` as laid out by `layout`,
    /// taking the query orientation from the layout.
    ///
    /// # Arguments
    /// * `tree` - The tree the layout was computed for
    /// * `topology` - Topology of `tree`
    /// * `layout` - Layout of `tree`
    pub fn new(tree: &'a TreeArray, topology: &'a Topology, layout: &'a DendrogramLayout) -> Self {
        let mut reach = tree.heights().to_vec();
        for index in (1..tree.len()).rev() {
            if let Some(p) = tree.parent(index) {
                reach[p] = reach[p].max(reach[index]);
            }
        }

        Self {
            tree,
            topology,
            xpos: layout.xpos(),
            orientation: layout.orientation(),
            expand_subtree: false,
            reach,
        }
    }

    /// Interprets queries in `orientation` instead of the layout's.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Expands every selected node to its whole subtree.
    pub fn with_subtree_expansion(mut self) -> Self {
        self.expand_subtree = true;
        self
    }

    /// Runs `query` and returns the selected node indices in ascending order.
    pub fn select(&self, query: &Query) -> Vec<NodeIndex> {
        let hits: Vec<NodeIndex> = match *query {
            Query::Point(point) => self.pick(point).into_iter().collect(),
            Query::Range { axis, min, max } => {
                let (min, max) = if min <= max { (min, max) } else { (max, min) };
                let axis = self.native_axis(axis);
                (0..self.tree.len())
                    .filter(|&i| self.meets(i, axis, min, max))
                    .collect()
            }
            Query::Rect(rect) => {
                let rect = Rect::from_points(
                    self.orientation.to_native(rect.origin()),
                    self.orientation.to_native(Point::new(rect.x1, rect.y1)),
                );
                if rect.area() == 0.0 {
                    Vec::new()
                } else {
                    (0..self.tree.len())
                        .filter(|&i| {
                            self.meets(i, NativeAxis::Position, rect.x0, rect.x1)
                                && self.meets(i, NativeAxis::Height, rect.y0, rect.y1)
                        })
                        .collect()
                }
            }
        };

        let selection = if self.expand_subtree {
            self.expand(&hits)
        } else {
            hits
        };
        debug!(?query, selected = selection.len(), "ran selection query");
        selection
    }

    /// Returns the node nearest to `point` (output coordinates) along the
    /// position axis among nodes whose clade spans the point's height.
    /// A point with a `NaN` coordinate picks nothing.
    pub fn pick(&self, point: Point) -> Option<NodeIndex> {
        if point.is_nan() {
            return None;
        }
        let native = self.orientation.to_native(point);
        let mut best: Option<(NodeIndex, f64)> = None;
        for index in 0..self.tree.len() {
            let base = self.tree.parent_height(index);
            if native.y < base || native.y > self.reach[index] {
                continue;
            }
            let distance = (self.xpos[index] - native.x).abs();
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Returns whether node `index` meets `[min, max]` along a native axis.
    fn meets(&self, index: NodeIndex, axis: NativeAxis, min: f64, max: f64) -> bool {
        match axis {
            NativeAxis::Position => (min..=max).contains(&self.xpos[index]),
            NativeAxis::Height => {
                self.tree.parent_height(index) <= max && self.tree.height(index) >= min
            }
        }
    }

    fn native_axis(&self, axis: Axis) -> NativeAxis {
        match (axis, self.orientation.is_horizontal()) {
            (Axis::X, false) | (Axis::Y, true) => NativeAxis::Position,
            (Axis::Y, false) | (Axis::X, true) => NativeAxis::Height,
        }
    }

    /// Unites each node with its subtree block.
    fn expand(&self, hits: &[NodeIndex]) -> Vec<NodeIndex> {
        let mut expanded = BTreeSet::new();
        for &index in hits {
            expanded.insert(index);
            expanded.extend(self.topology.subtree(index));
        }
        expanded.into_iter().collect()
    }
}
