use dendrick::model::{NodeIndex, TreeArray};
use dendrick::newick::{parse_str, to_newick};
use dendrick::reorder::{Reordered, reorder, reorder_by};
use dendrick::DendroError;
use rstest::{fixture, rstest};

#[fixture]
fn clusters() -> TreeArray {
    parse_str("(A:0.1,B:0.2,(C:0.3,D:0.4):0.5);").unwrap()
}

fn descending_heights(tree: &TreeArray) -> Vec<f64> {
    tree.heights().iter().map(|h| -h).collect()
}

/// Asserts that `reordered` holds the same tree as `original`, up to sibling order.
fn assert_isomorphic(original: &TreeArray, reordered: &Reordered) {
    let tree = reordered.tree();
    assert_eq!(tree.len(), original.len());
    // a valid encoding again
    TreeArray::from_parts(tree.parents().to_vec(), tree.names().to_vec(), tree.lengths().to_vec())
        .unwrap();

    for new in 0..tree.len() {
        let old = reordered.original_index(new);
        assert_eq!(tree.name(new), original.name(old));
        assert_eq!(tree.length(new), original.length(old));
        assert_eq!(tree.height(new), original.height(old));
        assert_eq!(
            tree.parent(new).map(|p| reordered.original_index(p)),
            original.parent(old)
        );
    }
}

// --- TESTS ORDER ---
#[rstest]
fn test_tallest_clade_moves_first(clusters: TreeArray) {
    let reordered = reorder(&clusters, &descending_heights(&clusters)).unwrap();
    let tree = reordered.tree();

    assert_eq!(reordered.permutation(), &[0, 3, 5, 4, 2, 1]);
    assert_eq!(tree.signed_parents(), vec![-1, 0, 1, 1, 0, 0]);
    assert_eq!(to_newick(tree), "((D:0.4,C:0.3):0.5,B:0.2,A:0.1);");
    assert_isomorphic(&clusters, &reordered);
}

#[rstest]
fn test_ties_keep_original_order(clusters: TreeArray) {
    // larger clades first; C and D tie and stay in place
    let topology = clusters.topology();
    let reordered = reorder_by(&clusters, |i| -(topology.subtree(i).len() as f64)).unwrap();
    let tree = reordered.tree();

    assert_eq!(reordered.permutation(), &[0, 3, 4, 5, 1, 2]);
    assert_eq!(tree.signed_parents(), vec![-1, 0, 1, 1, 0, 0]);
    assert_eq!(tree.name(2), Some("C"));
    assert_eq!(tree.name(3), Some("D"));
    assert_isomorphic(&clusters, &reordered);
}

#[rstest]
fn test_identity_keys(clusters: TreeArray) {
    let keys: Vec<f64> = (0..clusters.len()).map(|i| i as f64).collect();
    let reordered = reorder(&clusters, &keys).unwrap();

    assert_eq!(reordered.permutation(), &[0, 1, 2, 3, 4, 5]);
    assert_eq!(reordered.tree(), &clusters);
}

#[test]
fn test_nan_keys_sort_last() {
    let tree = parse_str("(A,B,C);").unwrap();
    let reordered = reorder(&tree, &[0.0, f64::NAN, 2.0, 1.0]).unwrap();
    assert_eq!(reordered.permutation(), &[0, 3, 2, 1]);
}

#[test]
fn test_deep_tree_keeps_subtree_blocks() {
    let newick = "(((A:1,B:3):1,(C:2,D:1)CD:2):1,((E:1,F:4,G:0.5):1,H:2):1,I:4);";
    let tree = parse_str(newick).unwrap();
    let reordered = reorder(&tree, &descending_heights(&tree)).unwrap();
    assert_isomorphic(&tree, &reordered);

    let new_tree = reordered.tree();
    let topology = new_tree.topology();
    for index in 0..new_tree.len() {
        let children = topology.children(index);
        for pair in children.windows(2) {
            assert!(new_tree.height(pair[0]) >= new_tree.height(pair[1]));
        }
    }
}

#[rstest]
fn test_original_is_untouched(clusters: TreeArray) {
    let before = clusters.clone();
    let _ = reorder(&clusters, &descending_heights(&clusters)).unwrap();
    assert_eq!(clusters, before);
}

// --- TESTS ERRORS ---
#[rstest]
#[case::too_few(3)]
#[case::too_many(7)]
fn test_key_count_mismatch(clusters: TreeArray, #[case] num_keys: usize) {
    match reorder(&clusters, &vec![0.0; num_keys]) {
        Err(DendroError::ReorderInconsistent { keys, nodes }) => {
            assert_eq!(keys, num_keys);
            assert_eq!(nodes, 6);
        }
        other => panic!("expected inconsistent reorder, got {other:?}"),
    }
}

// --- TESTS TRANSLATION ---
#[rstest]
fn test_index_translation(clusters: TreeArray) {
    let reordered = reorder(&clusters, &descending_heights(&clusters)).unwrap();

    assert_eq!(reordered.inverse(), vec![0, 5, 4, 1, 3, 2]);
    assert_eq!(reordered.to_original(&[1, 2, 3]), vec![3, 5, 4]);
    assert_eq!(reordered.to_new(&[3, 4, 5]), vec![1, 3, 2]);

    let selection: Vec<NodeIndex> = vec![2, 4];
    assert_eq!(reordered.to_new(&reordered.to_original(&selection)), selection);

    let (tree, permutation) = reordered.into_parts();
    assert_eq!(tree.len(), permutation.len());
}
