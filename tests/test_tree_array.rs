use dendrick::model::{NO_PARENT, NodeIndex, TreeArray};
use dendrick::newick::parse_str;
use dendrick::DendroError;
use rstest::{fixture, rstest};

#[fixture]
fn clusters() -> TreeArray {
    parse_str("(A:0.1,B:0.2,(C:0.3,D:0.4):0.5);").unwrap()
}

#[fixture]
fn larger() -> TreeArray {
    parse_str("(((A:1,B:1):1,(C:1,D:1)CD:2):1,((E:1,F:1,G:0.5):1,H:2):1,I:4);").unwrap()
}

// --- TESTS CONSTRUCTION ---
#[rstest]
fn test_from_parts_matches_parsed(clusters: TreeArray) {
    let names = vec![
        None,
        Some("A".to_string()),
        Some("B".to_string()),
        None,
        Some("C".to_string()),
        Some("D".to_string()),
    ];
    let built = TreeArray::from_parts(
        vec![None, Some(0), Some(0), Some(0), Some(3), Some(3)],
        names,
        vec![0.0, 0.1, 0.2, 0.5, 0.3, 0.4],
    )
    .unwrap();

    assert_eq!(built, clusters);
}

#[test]
fn test_from_signed_parents() {
    let tree = TreeArray::from_signed_parents(
        &[NO_PARENT, 0, 1, 1, 0],
        vec![None; 5],
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
    )
    .unwrap();

    assert_eq!(tree.parent(0), None);
    assert_eq!(tree.parent(3), Some(1));
    assert_eq!(tree.signed_parents(), vec![-1, 0, 1, 1, 0]);
    assert_eq!(tree.heights(), &[0.0, 1.0, 3.0, 4.0, 4.0]);
}

#[rstest]
#[case::root_not_first(vec![Some(1), None], 0)]
#[case::second_root(vec![None, Some(0), None], 2)]
#[case::parent_after_child(vec![None, Some(2), Some(0)], 1)]
#[case::interleaved(vec![None, Some(0), Some(0), Some(1)], 3)]
fn test_from_parts_rejects_encoding(
    #[case] parents: Vec<Option<NodeIndex>>,
    #[case] expected_index: NodeIndex,
) {
    let n = parents.len();
    match TreeArray::from_parts(parents, vec![None; n], vec![1.0; n]) {
        Err(DendroError::InvalidTreeArray { index, .. }) => assert_eq!(index, expected_index),
        other => panic!("expected invalid tree array, got {other:?}"),
    }
}

#[test]
fn test_from_parts_rejects_empty() {
    assert!(matches!(
        TreeArray::from_parts(Vec::new(), Vec::new(), Vec::new()),
        Err(DendroError::InvalidTreeArray { .. })
    ));
}

#[test]
fn test_from_parts_rejects_length_mismatch() {
    assert!(matches!(
        TreeArray::from_parts(vec![None, Some(0)], vec![None], vec![0.0, 1.0]),
        Err(DendroError::InvalidTreeArray { .. })
    ));
}

#[rstest]
#[case::negative(-0.5)]
#[case::nan(f64::NAN)]
#[case::infinite(f64::INFINITY)]
fn test_from_parts_rejects_bad_length(#[case] length: f64) {
    match TreeArray::from_parts(vec![None, Some(0)], vec![None; 2], vec![0.0, length]) {
        Err(DendroError::InvalidTreeArray { index, .. }) => assert_eq!(index, 1),
        other => panic!("expected invalid tree array, got {other:?}"),
    }
}

#[test]
fn test_from_signed_parents_rejects_other_negative() {
    assert!(matches!(
        TreeArray::from_signed_parents(&[-1, -2], vec![None; 2], vec![0.0; 2]),
        Err(DendroError::InvalidTreeArray { index: 1, .. })
    ));
}

// --- TESTS INVARIANTS ---
#[rstest]
fn test_heights_are_monotone_along_edges(larger: TreeArray) {
    for index in 1..larger.len() {
        let parent = larger.parent(index).unwrap();
        assert!(parent < index);
        assert!(larger.height(index) >= larger.height(parent));
        assert_eq!(larger.parent_height(index), larger.height(parent));
    }
    assert_eq!(larger.parent_height(larger.root()), 0.0);
}

#[rstest]
fn test_subtrees_are_contiguous(larger: TreeArray) {
    let topology = larger.topology();
    for index in 0..larger.len() {
        let block = topology.subtree(index);
        assert_eq!(block.start, index + 1);
        // exactly the nodes whose ancestor chain passes through `index`
        for other in 0..larger.len() {
            let mut ancestor = larger.parent(other);
            let mut below = false;
            while let Some(a) = ancestor {
                below |= a == index;
                ancestor = larger.parent(a);
            }
            assert_eq!(block.contains(&other), below, "node {other} vs subtree of {index}");
        }
    }
}

#[rstest]
fn test_sibling_subtrees_are_disjoint(larger: TreeArray) {
    let topology = larger.topology();
    for index in 0..larger.len() {
        let children = topology.children(index);
        for pair in children.windows(2) {
            let left = topology.subtree(pair[0]);
            assert_eq!(left.end, pair[1], "sibling {} must follow block of {}", pair[1], pair[0]);
        }
    }
}

// --- TESTS TOPOLOGY ---
#[rstest]
fn test_topology_of_clusters(clusters: TreeArray) {
    let topology = clusters.topology();

    assert_eq!(topology.len(), 6);
    assert_eq!(topology.children(0), &[1, 2, 3]);
    assert_eq!(topology.children(3), &[4, 5]);
    assert!(topology.children(4).is_empty());
    assert_eq!(topology.leaves().collect::<Vec<_>>(), vec![1, 2, 4, 5]);
    assert_eq!(topology.num_leaves(), 4);
    assert_eq!(clusters.num_leaves(), 4);

    assert!(topology.is_descendant(5, 3));
    assert!(topology.is_descendant(5, 0));
    assert!(!topology.is_descendant(3, 3));
    assert!(!topology.is_descendant(2, 3));
}

#[rstest]
fn test_leafness_matches_children(larger: TreeArray) {
    let topology = larger.topology();
    let leafness = topology.leafness();
    for index in 0..larger.len() {
        let has_child = larger.parents().contains(&Some(index));
        assert_eq!(leafness[index], !has_child);
    }
    assert_eq!(topology.num_leaves(), 9);
}

#[test]
fn test_single_node_tree() {
    let tree = TreeArray::from_parts(vec![None], vec![Some("A".to_string())], vec![0.0]).unwrap();
    let topology = tree.topology();

    assert_eq!(tree.len(), 1);
    assert!(!tree.is_empty());
    assert!(topology.is_leaf(0));
    assert!(topology.subtree(0).is_empty());
    assert_eq!(tree.num_leaves(), 1);
}
