use dendrick::layout::{DendrogramLayout, Orientation, dendro_layout};
use dendrick::model::TreeArray;
use dendrick::newick::parse_str;
use dendrick::DendroError;
use kurbo::{Line, Point, Rect};
use rstest::{fixture, rstest};

const ROOT_X: f64 = 6.5 / 3.0;

#[fixture]
fn clusters() -> TreeArray {
    parse_str("(A:0.1,B:0.2,(C:0.3,D:0.4):0.5);").unwrap()
}

fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Line {
    Line::new(Point::new(x0, y0), Point::new(x1, y1))
}

fn swapped(l: &Line) -> Line {
    line(l.p0.y, l.p0.x, l.p1.y, l.p1.x)
}

// --- TESTS POSITIONS ---
#[rstest]
fn test_xpos_of_clusters(clusters: TreeArray) {
    let layout = DendrogramLayout::compute(&clusters, Orientation::BottomUp).unwrap();

    assert_eq!(layout.xpos(), &[ROOT_X, 1.0, 2.0, 3.5, 3.0, 4.0]);
    assert_eq!(layout.xpos_of(0), 2.1666666666666665);
}

#[test]
fn test_leaves_take_consecutive_positions() {
    let tree = parse_str("(((A,B),(C,D)),((E,F,G),H),I);").unwrap();
    let layout = DendrogramLayout::compute(&tree, Orientation::BottomUp).unwrap();
    let topology = tree.topology();

    let leaf_positions: Vec<f64> = topology.leaves().map(|i| layout.xpos_of(i)).collect();
    assert_eq!(leaf_positions, (1..=9).map(f64::from).collect::<Vec<_>>());

    // every branch node sits at the mean of its children
    for index in 0..tree.len() {
        let children = topology.children(index);
        if children.is_empty() {
            continue;
        }
        let mean = children.iter().map(|&c| layout.xpos_of(c)).sum::<f64>() / children.len() as f64;
        assert_eq!(layout.xpos_of(index), mean);
    }
}

#[test]
fn test_caterpillar_converges() {
    let depth = 200;
    let mut newick = "(".repeat(depth);
    newick.push_str("A:1");
    for _ in 0..depth {
        newick.push_str(",B:1):1");
    }
    newick.push(';');
    let tree = parse_str(&newick).unwrap();

    let layout = DendrogramLayout::compute(&tree, Orientation::BottomUp).unwrap();
    assert_eq!(layout.xpos().len(), tree.len());
    assert!(layout.xpos().iter().all(|x| x.is_finite()));
}

// --- TESTS SEGMENTS ---
#[rstest]
fn test_segments_bottom_up(clusters: TreeArray) {
    let layout = DendrogramLayout::compute(&clusters, Orientation::BottomUp).unwrap();
    let segments = layout.segments();

    assert_eq!(
        segments.drops(),
        &[
            line(ROOT_X, 0.0, ROOT_X, 0.0),
            line(1.0, 0.0, 1.0, 0.1),
            line(2.0, 0.0, 2.0, 0.2),
            line(3.5, 0.0, 3.5, 0.5),
            line(3.0, 0.5, 3.0, 0.8),
            line(4.0, 0.5, 4.0, 0.9),
        ]
    );
    assert_eq!(
        segments.merges(),
        &[line(1.0, 0.0, 3.5, 0.0), line(3.0, 0.5, 4.0, 0.5)]
    );
    assert_eq!(segments.len(), 8);
    assert_eq!(segments.iter().count(), 8);
}

#[rstest]
#[case(Orientation::BottomUp, false)]
#[case(Orientation::TopDown, false)]
#[case(Orientation::LeftRight, true)]
#[case(Orientation::RightLeft, true)]
fn test_orientation_swaps_coordinates(
    clusters: TreeArray,
    #[case] orientation: Orientation,
    #[case] horizontal: bool,
) {
    let native = DendrogramLayout::compute(&clusters, Orientation::BottomUp).unwrap();
    let layout = DendrogramLayout::compute(&clusters, orientation).unwrap();

    assert_eq!(orientation.is_horizontal(), horizontal);
    assert_eq!(layout.orientation(), orientation);
    assert_eq!(layout.xpos(), native.xpos());
    for (out, nat) in layout.segments().iter().zip(native.segments().iter()) {
        let expected = if horizontal { swapped(nat) } else { *nat };
        assert_eq!(*out, expected);
    }
}

#[rstest]
fn test_reoriented_matches_fresh_layout(clusters: TreeArray) {
    let vertical = DendrogramLayout::compute(&clusters, Orientation::TopDown).unwrap();
    let horizontal = DendrogramLayout::compute(&clusters, Orientation::RightLeft).unwrap();

    assert_eq!(vertical.reoriented(Orientation::RightLeft), horizontal);
    assert_eq!(horizontal.reoriented(Orientation::TopDown), vertical);
}

#[rstest]
fn test_bounds(clusters: TreeArray) {
    let layout = DendrogramLayout::compute(&clusters, Orientation::BottomUp).unwrap();
    assert_eq!(
        layout.segments().bounds(),
        Some(Rect::new(1.0, 0.0, 4.0, 0.9))
    );

    let layout = layout.reoriented(Orientation::LeftRight);
    assert_eq!(
        layout.segments().bounds(),
        Some(Rect::new(0.0, 1.0, 0.9, 4.0))
    );
}

#[test]
fn test_single_node_layout() {
    let tree = parse_str("A;").unwrap();
    let layout = DendrogramLayout::compute(&tree, Orientation::BottomUp).unwrap();

    assert_eq!(layout.xpos(), &[1.0]);
    assert_eq!(layout.segments().drops(), &[line(1.0, 0.0, 1.0, 0.0)]);
    assert!(layout.segments().merges().is_empty());
}

// --- TESTS RAW ARRAYS ---
#[rstest]
fn test_dendro_layout_matches_layout(clusters: TreeArray) {
    let layout = DendrogramLayout::compute(&clusters, Orientation::LeftRight).unwrap();
    let segments = dendro_layout(clusters.parents(), clusters.heights(), Orientation::LeftRight).unwrap();
    assert_eq!(&segments, layout.segments());
}

#[test]
fn test_dendro_layout_rejects_bad_arrays() {
    assert!(matches!(
        dendro_layout(&[None, Some(0)], &[0.0], Orientation::BottomUp),
        Err(DendroError::InvalidTreeArray { .. })
    ));
    assert!(matches!(
        dendro_layout(&[None, Some(0), Some(0), Some(1)], &[0.0; 4], Orientation::BottomUp),
        Err(DendroError::InvalidTreeArray { index: 3, .. })
    ));
}
