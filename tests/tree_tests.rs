// Integration tests for trees and their traversals

use algotty::engine::{run_in_order, run_level_order, TreeAlgorithm};
use algotty::model::tree::parse_level_order;
use algotty::model::{NodeColor, NodeStatus, Tree, TreeKind, TreeNode};

/// Check AVL balance below `node` and return its height
fn assert_avl(node: Option<&TreeNode>) -> u32 {
    let Some(node) = node else { return 0 };
    let left = assert_avl(node.left.as_deref());
    let right = assert_avl(node.right.as_deref());
    assert!(
        left.abs_diff(right) <= 1,
        "node {} is unbalanced: {} vs {}",
        node.value,
        left,
        right
    );
    let height = 1 + left.max(right);
    assert_eq!(node.avl_height(), Some(height), "stale height at {}", node.value);
    height
}

/// Check left-leaning red-black rules below `node` and return its black height
fn assert_red_black(node: Option<&TreeNode>) -> usize {
    let Some(node) = node else { return 1 };
    let red = |n: Option<&TreeNode>| n.and_then(TreeNode::color) == Some(NodeColor::Red);
    if red(Some(node)) {
        assert!(!red(node.left.as_deref()), "red-red at {}", node.value);
    }
    assert!(!red(node.right.as_deref()), "right-leaning red at {}", node.value);

    let left = assert_red_black(node.left.as_deref());
    let right = assert_red_black(node.right.as_deref());
    assert_eq!(left, right, "black height differs at {}", node.value);
    left + usize::from(node.color() == Some(NodeColor::Black))
}

fn assert_sorted(tree: &Tree) {
    let values = tree.values_in_order();
    assert!(values.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_bst_in_order_is_sorted() {
    let tree = Tree::sample(TreeKind::Bst);
    let trace = run_in_order(&tree);
    let last = trace.last().unwrap();
    assert_eq!(last.values, vec![20, 30, 40, 50, 60, 70, 80]);
    assert_eq!(
        last.description,
        "In-order traversal completed: [20, 30, 40, 50, 60, 70, 80]"
    );
    assert_eq!(last.nodes.len(), 7);
    assert!(last.nodes.values().all(|&s| s == NodeStatus::Visited));
}

#[test]
fn test_every_traversal_visits_each_node_once() {
    let tree = Tree::sample(TreeKind::Avl);
    for algorithm in TreeAlgorithm::ALL {
        let trace = algorithm.run(&tree);
        let mut visited = trace.last().unwrap().values.clone();
        assert_eq!(visited.len(), tree.len(), "{}", algorithm);
        visited.sort_unstable();
        assert_eq!(visited, tree.values_in_order(), "{}", algorithm);
    }
}

#[test]
fn test_level_order_of_sample() {
    let tree = Tree::sample(TreeKind::Bst);
    let trace = run_level_order(&tree);
    assert_eq!(
        trace.last().unwrap().values,
        vec![50, 30, 70, 20, 40, 60, 80]
    );
    assert_eq!(trace.last().unwrap().queue, Some(Vec::new()));
}

#[test]
fn test_literal_level_order_keeps_gaps() {
    let values = parse_level_order("50, 30, 70, null, 40").unwrap();
    let tree = Tree::from_level_order(TreeKind::Bst, &values);
    let root = tree.root().unwrap();
    assert!(root.left.as_ref().unwrap().left.is_none());
    assert_eq!(root.left.as_ref().unwrap().right.as_ref().unwrap().value, 40);
    assert_eq!(
        run_level_order(&tree).last().unwrap().values,
        vec![50, 30, 70, 40]
    );
}

#[test]
fn test_avl_ascending_inserts_stay_balanced() {
    let mut tree = Tree::new(TreeKind::Avl);
    for value in 1..=63 {
        assert!(tree.insert(value));
        assert_avl(tree.root());
    }
    // Ascending keys into an AVL tree produce a perfect tree
    assert_eq!(tree.height(), 6);
    assert_sorted(&tree);
}

#[test]
fn test_avl_deletes_keep_balance() {
    let mut tree = Tree::new(TreeKind::Avl);
    for value in 1..=40 {
        tree.insert(value);
    }
    for value in (1..=40).step_by(3) {
        assert!(tree.delete(value));
        assert_avl(tree.root());
        assert!(!tree.contains(value));
    }
    assert_sorted(&tree);
    assert!(!tree.delete(1));
}

#[test]
fn test_red_black_inserts_and_deletes() {
    let mut tree = Tree::new(TreeKind::RedBlack);
    for value in [41, 38, 31, 12, 19, 8, 50, 45, 60, 1, 99, 70] {
        assert!(tree.insert(value));
        assert_eq!(tree.root().and_then(TreeNode::color), Some(NodeColor::Black));
        assert_red_black(tree.root());
    }
    assert!(!tree.insert(41));

    for value in [8, 41, 99, 12, 38] {
        assert!(tree.delete(value));
        assert_red_black(tree.root());
        assert_sorted(&tree);
    }
    assert_eq!(tree.len(), 7);
    assert!(!tree.delete(8));
}

#[test]
fn test_red_black_delete_to_empty() {
    let mut tree = Tree::sample(TreeKind::RedBlack);
    for value in [50, 30, 70, 20, 40, 60, 80] {
        assert!(tree.delete(value));
        assert_red_black(tree.root());
    }
    assert!(tree.is_empty());
    assert_eq!(run_in_order(&tree).descriptions(), vec!["Tree is empty"]);
}

#[test]
fn test_duplicate_insert_is_rejected_for_every_kind() {
    for kind in [TreeKind::Bst, TreeKind::Avl, TreeKind::RedBlack] {
        let mut tree = Tree::sample(kind);
        let before = tree.len();
        assert!(!tree.insert(50), "{}", kind);
        assert_eq!(tree.len(), before);
    }
}

#[test]
fn test_tree_runs_are_repeatable_and_leave_tree_untouched() {
    for kind in [TreeKind::Bst, TreeKind::Avl, TreeKind::RedBlack] {
        let tree = Tree::sample(kind);
        let before = tree.root().cloned();
        for algorithm in TreeAlgorithm::ALL {
            let first = algorithm.run(&tree);
            let second = algorithm.run(&tree);
            assert_eq!(first, second, "{} on {} is not repeatable", algorithm, kind);
        }
        assert_eq!(tree.root().cloned(), before);
    }
}
