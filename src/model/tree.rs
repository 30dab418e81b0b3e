//! Binary tree structure
//!
//! This module provides the binary trees the tree engine traverses:
//! - [`Tree`]: an owned binary search tree of one [`TreeKind`]
//! - [`TreeNode`]: a node that exclusively owns its two children
//! - [`Balance`]: per-node balancing data, tagged by tree kind
//!
//! # Variants
//!
//! | Kind | Node data | Insert | Delete |
//! |------|-----------|--------|--------|
//! | `Bst` | none | plain descent | in-order successor |
//! | `Avl` | `height` | descent + rotations | successor + rotations |
//! | `RedBlack` | `color` | left-leaning red-black | left-leaning red-black |
//!
//! Duplicate values are rejected silently by every kind.
//!
//! # Red-black formulation
//!
//! The red-black tree uses the left-leaning formulation: red links only lean
//! left, no node has two red links, and every root-to-leaf path crosses the
//! same number of black links. This satisfies all red-black properties after
//! every insert and delete.
//!
//! Mutators are not instrumented with steps; callers re-run a traversal (and
//! [`Tree::calculate_positions`]) afterwards.

use crate::errors::StructureError;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

type Link = Option<Box<TreeNode>>;

/// Tree node identifier, displayed as `n<k>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Which balancing scheme a tree maintains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeKind {
    Bst,
    Avl,
    RedBlack,
}

impl TreeKind {
    pub fn name(self) -> &'static str {
        match self {
            TreeKind::Bst => "bst",
            TreeKind::Avl => "avl",
            TreeKind::RedBlack => "rb",
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TreeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bst" => Ok(TreeKind::Bst),
            "avl" => Ok(TreeKind::Avl),
            "rb" | "red-black" | "redblack" => Ok(TreeKind::RedBlack),
            other => Err(other.to_string()),
        }
    }
}

/// Red-black node color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeColor {
    Red,
    Black,
}

impl NodeColor {
    fn flipped(self) -> Self {
        match self {
            NodeColor::Red => NodeColor::Black,
            NodeColor::Black => NodeColor::Red,
        }
    }
}

impl fmt::Display for NodeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeColor::Red => write!(f, "red"),
            NodeColor::Black => write!(f, "black"),
        }
    }
}

/// Balancing data carried by a node, matching its tree's kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Balance {
    Plain,
    Avl { height: u32 },
    RedBlack { color: NodeColor },
}

/// A binary tree node
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: NodeId,
    pub value: i64,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
    pub x: f64,
    pub y: f64,
    pub balance: Balance,
}

impl TreeNode {
    fn new(id: NodeId, value: i64, kind: TreeKind) -> Self {
        let balance = match kind {
            TreeKind::Bst => Balance::Plain,
            TreeKind::Avl => Balance::Avl { height: 1 },
            TreeKind::RedBlack => Balance::RedBlack {
                color: NodeColor::Red,
            },
        };
        TreeNode {
            id,
            value,
            left: None,
            right: None,
            x: 0.0,
            y: 0.0,
            balance,
        }
    }

    /// Red-black color, if this is a red-black node
    pub fn color(&self) -> Option<NodeColor> {
        match self.balance {
            Balance::RedBlack { color } => Some(color),
            _ => None,
        }
    }

    /// Stored AVL height, if this is an AVL node
    pub fn avl_height(&self) -> Option<u32> {
        match self.balance {
            Balance::Avl { height } => Some(height),
            _ => None,
        }
    }

    /// Height of the subtree rooted here, counted in nodes
    pub fn height(&self) -> usize {
        1 + depth(&self.left).max(depth(&self.right))
    }

    fn set_color(&mut self, color: NodeColor) {
        if let Balance::RedBlack { color: c } = &mut self.balance {
            *c = color;
        }
    }

    fn flip_color(&mut self) {
        if let Balance::RedBlack { color } = &mut self.balance {
            *color = color.flipped();
        }
    }
}

/// An owned binary search tree
#[derive(Debug, Clone)]
pub struct Tree {
    kind: TreeKind,
    root: Option<Box<TreeNode>>,
    next_id: u32,
}

impl Tree {
    pub fn new(kind: TreeKind) -> Self {
        Tree {
            kind,
            root: None,
            next_id: 0,
        }
    }

    /// Demo tree with ids renumbered in pre-order
    pub fn sample(kind: TreeKind) -> Self {
        let values: &[i64] = match kind {
            TreeKind::Avl => &[50, 30, 70, 20, 40, 60, 80, 15, 25, 35, 45],
            TreeKind::Bst | TreeKind::RedBlack => &[50, 30, 70, 20, 40, 60, 80],
        };
        let mut tree = Tree::new(kind);
        for &value in values {
            tree.insert(value);
        }
        tree.reassign_ids();
        tree
    }

    /// Build a tree from a level-order listing where `None` marks a gap.
    ///
    /// A `Bst` keeps the literal shape of the listing. Balanced kinds insert
    /// the non-null values in listing order instead.
    pub fn from_level_order(kind: TreeKind, values: &[Option<i64>]) -> Self {
        let mut tree = Tree::new(kind);
        match kind {
            TreeKind::Bst => tree.root = build_literal(values),
            TreeKind::Avl | TreeKind::RedBlack => {
                for value in values.iter().flatten() {
                    tree.insert(*value);
                }
            }
        }
        tree.reassign_ids();
        tree
    }

    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        fn count(link: &Link) -> usize {
            link.as_ref()
                .map_or(0, |n| 1 + count(&n.left) + count(&n.right))
        }
        count(&self.root)
    }

    /// Height in nodes (0 for an empty tree)
    pub fn height(&self) -> usize {
        depth(&self.root)
    }

    pub fn contains(&self, value: i64) -> bool {
        self.find(value).is_some()
    }

    /// Locate the node holding `value` by search-tree descent
    pub fn find(&self, value: i64) -> Option<&TreeNode> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Values in sorted (in-order) order
    pub fn values_in_order(&self) -> Vec<i64> {
        fn walk(link: &Link, out: &mut Vec<i64>) {
            if let Some(node) = link {
                walk(&node.left, out);
                out.push(node.value);
                walk(&node.right, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.root, &mut out);
        out
    }

    /// Insert a value, rebalancing according to the tree kind.
    ///
    /// Returns `false` (and changes nothing) if the value is already present.
    pub fn insert(&mut self, value: i64) -> bool {
        let id = NodeId(self.next_id);
        let mut inserted = false;
        match self.kind {
            TreeKind::Bst => inserted = bst_insert(&mut self.root, value, id),
            TreeKind::Avl => {
                self.root = Some(avl_insert(self.root.take(), value, id, &mut inserted));
            }
            TreeKind::RedBlack => {
                let mut root = rb_insert(self.root.take(), value, id, &mut inserted);
                root.set_color(NodeColor::Black);
                self.root = Some(root);
            }
        }
        if inserted {
            self.next_id += 1;
            log::trace!("inserted {} into {} tree as {}", value, self.kind, id);
        }
        inserted
    }

    /// Remove a value. Returns `false` if it was not present.
    pub fn delete(&mut self, value: i64) -> bool {
        if !self.contains(value) {
            return false;
        }
        match self.kind {
            TreeKind::Bst => self.root = search_delete(self.root.take(), value, false),
            TreeKind::Avl => self.root = search_delete(self.root.take(), value, true),
            TreeKind::RedBlack => {
                let mut root = self.root.take();
                if let Some(node) = root.as_mut() {
                    if !is_red(&node.left) && !is_red(&node.right) {
                        node.set_color(NodeColor::Red);
                    }
                }
                root = rb_delete(root, value);
                if let Some(node) = root.as_mut() {
                    node.set_color(NodeColor::Black);
                }
                self.root = root;
            }
        }
        log::trace!("deleted {} from {} tree", value, self.kind);
        true
    }

    /// Renumber every node `n0, n1, ...` in pre-order
    pub fn reassign_ids(&mut self) {
        fn walk(link: &mut Link, counter: &mut u32) {
            if let Some(node) = link {
                node.id = NodeId(*counter);
                *counter += 1;
                walk(&mut node.left, counter);
                walk(&mut node.right, counter);
            }
        }
        let mut counter = 0;
        walk(&mut self.root, &mut counter);
        self.next_id = counter;
    }

    /// Lay the tree out for a canvas of the given size.
    ///
    /// The root sits at `(width / 2, 50)`; each child is placed halfway
    /// between its parent and the bound on its side, one level lower.
    pub fn calculate_positions(&mut self, width: f64, height: f64) {
        const TOP: f64 = 50.0;
        const LEVEL_HEIGHT: f64 = 80.0;

        let levels = self.height().saturating_sub(1).max(1) as f64;
        let available = (height - 2.0 * TOP).max(0.0);
        let level_height = if levels * LEVEL_HEIGHT > available && available > 0.0 {
            available / levels
        } else {
            LEVEL_HEIGHT
        };

        fn place(node: &mut TreeNode, x: f64, y: f64, lo: f64, hi: f64, step: f64) {
            node.x = x;
            node.y = y;
            if let Some(left) = node.left.as_mut() {
                place(left, (x + lo) / 2.0, y + step, lo, x, step);
            }
            if let Some(right) = node.right.as_mut() {
                place(right, (x + hi) / 2.0, y + step, x, hi, step);
            }
        }

        if let Some(root) = self.root.as_mut() {
            place(root, width / 2.0, TOP, 0.0, width, level_height);
        }
    }
}

/// Parse a textual level-order definition such as `50,30,null,20`.
///
/// Empty tokens are ignored; `null` (any case) marks a gap.
pub fn parse_level_order(input: &str) -> Result<Vec<Option<i64>>, StructureError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(position, token)| {
            if token.eq_ignore_ascii_case("null") {
                Ok(None)
            } else {
                token
                    .parse()
                    .map(Some)
                    .map_err(|_| StructureError::InvalidLevelOrder {
                        token: token.to_string(),
                        position,
                    })
            }
        })
        .collect()
}

fn depth(link: &Link) -> usize {
    link.as_ref().map_or(0, |n| n.height())
}

/// Shape a plain tree exactly as listed. A gap consumes the two slots its
/// children would have taken.
fn build_literal(values: &[Option<i64>]) -> Link {
    if values.first().copied().flatten().is_none() {
        return None;
    }

    let mut children: Vec<(Option<usize>, Option<usize>)> = vec![(None, None); values.len()];
    let mut queue: VecDeque<Option<usize>> = VecDeque::from([Some(0)]);
    let mut i = 1;
    while i < values.len() {
        let parent = match queue.pop_front() {
            Some(Some(parent)) => parent,
            Some(None) => {
                i += 2;
                continue;
            }
            None => break,
        };
        for side in 0..2 {
            if i < values.len() {
                if values[i].is_some() {
                    if side == 0 {
                        children[parent].0 = Some(i);
                    } else {
                        children[parent].1 = Some(i);
                    }
                    queue.push_back(Some(i));
                } else {
                    queue.push_back(None);
                }
            }
            i += 1;
        }
    }

    fn build(index: usize, values: &[Option<i64>], children: &[(Option<usize>, Option<usize>)]) -> Link {
        let value = values[index]?;
        let mut node = Box::new(TreeNode::new(NodeId(index as u32), value, TreeKind::Bst));
        let (left, right) = children[index];
        node.left = left.and_then(|l| build(l, values, children));
        node.right = right.and_then(|r| build(r, values, children));
        Some(node)
    }

    build(0, values, &children)
}

fn bst_insert(link: &mut Link, value: i64, id: NodeId) -> bool {
    match link {
        None => {
            *link = Some(Box::new(TreeNode::new(id, value, TreeKind::Bst)));
            true
        }
        Some(node) => match value.cmp(&node.value) {
            Ordering::Less => bst_insert(&mut node.left, value, id),
            Ordering::Greater => bst_insert(&mut node.right, value, id),
            Ordering::Equal => false,
        },
    }
}

fn min_value(node: &TreeNode) -> i64 {
    let mut current = node;
    while let Some(left) = current.left.as_deref() {
        current = left;
    }
    current.value
}

/// Delete by in-order successor, optionally restoring AVL balance on the
/// way back up.
fn search_delete(link: Link, value: i64, rebalance: bool) -> Link {
    let mut node = link?;
    match value.cmp(&node.value) {
        Ordering::Less => node.left = search_delete(node.left.take(), value, rebalance),
        Ordering::Greater => node.right = search_delete(node.right.take(), value, rebalance),
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, right) => return right,
            (left, None) => return left,
            (left, Some(right)) => {
                let successor = min_value(&right);
                node.value = successor;
                node.left = left;
                node.right = search_delete(Some(right), successor, rebalance);
            }
        },
    }
    if rebalance {
        Some(avl_rebalance(node))
    } else {
        Some(node)
    }
}

// Rotations shared by AVL and red-black trees. Colors are handled by the
// red-black wrappers; heights are refreshed here.

fn rotate_right(mut y: Box<TreeNode>) -> Box<TreeNode> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    update_height(&mut y);
    x.right = Some(y);
    update_height(&mut x);
    x
}

fn rotate_left(mut x: Box<TreeNode>) -> Box<TreeNode> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    update_height(&mut x);
    y.left = Some(x);
    update_height(&mut y);
    y
}

fn stored_height(link: &Link) -> i64 {
    match link.as_deref() {
        None => 0,
        Some(node) => node
            .avl_height()
            .map_or(node.height() as i64, i64::from),
    }
}

fn update_height(node: &mut TreeNode) {
    let fresh = 1 + stored_height(&node.left).max(stored_height(&node.right));
    if let Balance::Avl { height } = &mut node.balance {
        *height = fresh as u32;
    }
}

fn balance_factor(node: &TreeNode) -> i64 {
    stored_height(&node.left) - stored_height(&node.right)
}

fn avl_insert(link: Link, value: i64, id: NodeId, inserted: &mut bool) -> Box<TreeNode> {
    let mut node = match link {
        None => {
            *inserted = true;
            return Box::new(TreeNode::new(id, value, TreeKind::Avl));
        }
        Some(node) => node,
    };
    match value.cmp(&node.value) {
        Ordering::Less => node.left = Some(avl_insert(node.left.take(), value, id, inserted)),
        Ordering::Greater => node.right = Some(avl_insert(node.right.take(), value, id, inserted)),
        Ordering::Equal => return node,
    }
    avl_rebalance(node)
}

/// Restore |balance| <= 1 at `node`, covering the LL, LR, RR and RL cases
fn avl_rebalance(mut node: Box<TreeNode>) -> Box<TreeNode> {
    update_height(&mut node);
    let balance = balance_factor(&node);

    if balance > 1 {
        if node.left.as_deref().map_or(0, balance_factor) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if balance < -1 {
        if node.right.as_deref().map_or(0, balance_factor) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }
    node
}

fn is_red(link: &Link) -> bool {
    link.as_deref()
        .and_then(TreeNode::color)
        .is_some_and(|c| c == NodeColor::Red)
}

fn left_left_is_red(node: &TreeNode) -> bool {
    node.left.as_deref().is_some_and(|l| is_red(&l.left))
}

fn right_left_is_red(node: &TreeNode) -> bool {
    node.right.as_deref().is_some_and(|r| is_red(&r.left))
}

fn rb_rotate_left(h: Box<TreeNode>) -> Box<TreeNode> {
    let color = h.color().unwrap_or(NodeColor::Black);
    let mut x = rotate_left(h);
    if let Some(old) = x.left.as_mut() {
        old.set_color(NodeColor::Red);
    }
    x.set_color(color);
    x
}

fn rb_rotate_right(h: Box<TreeNode>) -> Box<TreeNode> {
    let color = h.color().unwrap_or(NodeColor::Black);
    let mut x = rotate_right(h);
    if let Some(old) = x.right.as_mut() {
        old.set_color(NodeColor::Red);
    }
    x.set_color(color);
    x
}

fn flip_colors(h: &mut TreeNode) {
    h.flip_color();
    if let Some(left) = h.left.as_mut() {
        left.flip_color();
    }
    if let Some(right) = h.right.as_mut() {
        right.flip_color();
    }
}

fn rb_fix_up(mut h: Box<TreeNode>) -> Box<TreeNode> {
    if is_red(&h.right) && !is_red(&h.left) {
        h = rb_rotate_left(h);
    }
    if is_red(&h.left) && left_left_is_red(&h) {
        h = rb_rotate_right(h);
    }
    if is_red(&h.left) && is_red(&h.right) {
        flip_colors(&mut h);
    }
    h
}

fn rb_insert(link: Link, value: i64, id: NodeId, inserted: &mut bool) -> Box<TreeNode> {
    let mut h = match link {
        None => {
            *inserted = true;
            return Box::new(TreeNode::new(id, value, TreeKind::RedBlack));
        }
        Some(h) => h,
    };
    match value.cmp(&h.value) {
        Ordering::Less => h.left = Some(rb_insert(h.left.take(), value, id, inserted)),
        Ordering::Greater => h.right = Some(rb_insert(h.right.take(), value, id, inserted)),
        Ordering::Equal => {}
    }
    rb_fix_up(h)
}

fn move_red_left(mut h: Box<TreeNode>) -> Box<TreeNode> {
    flip_colors(&mut h);
    if right_left_is_red(&h) {
        h.right = h.right.take().map(rb_rotate_right);
        h = rb_rotate_left(h);
        flip_colors(&mut h);
    }
    h
}

fn move_red_right(mut h: Box<TreeNode>) -> Box<TreeNode> {
    flip_colors(&mut h);
    if left_left_is_red(&h) {
        h = rb_rotate_right(h);
        flip_colors(&mut h);
    }
    h
}

fn rb_delete_min(link: Link) -> Link {
    let mut h = link?;
    if h.left.is_none() {
        return None;
    }
    if !is_red(&h.left) && !left_left_is_red(&h) {
        h = move_red_left(h);
    }
    h.left = rb_delete_min(h.left.take());
    Some(rb_fix_up(h))
}

/// Left-leaning red-black delete. `value` must be present in the subtree.
fn rb_delete(link: Link, value: i64) -> Link {
    let mut h = link?;
    if value < h.value {
        if !is_red(&h.left) && !left_left_is_red(&h) {
            h = move_red_left(h);
        }
        h.left = rb_delete(h.left.take(), value);
    } else {
        if is_red(&h.left) {
            h = rb_rotate_right(h);
        }
        if value == h.value && h.right.is_none() {
            return None;
        }
        if !is_red(&h.right) && !right_left_is_red(&h) {
            h = move_red_right(h);
        }
        if value == h.value {
            if let Some(successor) = h.right.as_deref().map(min_value) {
                h.value = successor;
                h.right = rb_delete_min(h.right.take());
            }
        } else {
            h.right = rb_delete(h.right.take(), value);
        }
    }
    Some(rb_fix_up(h))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(link: &Link) -> String {
        match link {
            None => "-".to_string(),
            Some(n) => format!("({} {} {})", n.value, shape(&n.left), shape(&n.right)),
        }
    }

    #[test]
    fn test_bst_rejects_duplicates() {
        let mut tree = Tree::new(TreeKind::Bst);
        assert!(tree.insert(5));
        assert!(!tree.insert(5));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_sample_ids_are_preorder() {
        let tree = Tree::sample(TreeKind::Bst);
        let root = tree.root().unwrap();
        assert_eq!(root.id, NodeId(0));
        assert_eq!(root.left.as_ref().unwrap().id, NodeId(1));
        assert_eq!(root.left.as_ref().unwrap().left.as_ref().unwrap().id, NodeId(2));
        assert_eq!(root.right.as_ref().unwrap().id, NodeId(4));
    }

    #[test]
    fn test_avl_left_left_rotation() {
        let mut tree = Tree::new(TreeKind::Avl);
        for v in [30, 20, 10] {
            tree.insert(v);
        }
        assert_eq!(shape(&tree.root), "(20 (10 - -) (30 - -))");
        assert_eq!(tree.root().unwrap().avl_height(), Some(2));
    }

    #[test]
    fn test_avl_left_right_rotation() {
        let mut tree = Tree::new(TreeKind::Avl);
        for v in [30, 10, 20] {
            tree.insert(v);
        }
        assert_eq!(shape(&tree.root), "(20 (10 - -) (30 - -))");
    }

    #[test]
    fn test_bst_delete_two_children_uses_successor() {
        let mut tree = Tree::sample(TreeKind::Bst);
        assert!(tree.delete(50));
        assert_eq!(tree.root().unwrap().value, 60);
        assert_eq!(tree.values_in_order(), vec![20, 30, 40, 60, 70, 80]);
        assert!(!tree.delete(50));
    }

    #[test]
    fn test_rb_root_is_black() {
        let mut tree = Tree::new(TreeKind::RedBlack);
        for v in 1..=10 {
            tree.insert(v);
        }
        assert_eq!(tree.root().unwrap().color(), Some(NodeColor::Black));
        assert_eq!(tree.values_in_order(), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_literal_level_order_shape() {
        let values = parse_level_order("1, 2, 3, null, 4").unwrap();
        let tree = Tree::from_level_order(TreeKind::Bst, &values);
        assert_eq!(shape(&tree.root), "(1 (2 - (4 - -)) (3 - -))");
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_level_order_empty_root() {
        let tree = Tree::from_level_order(TreeKind::Bst, &[None, Some(1)]);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_parse_level_order_rejects_garbage() {
        assert_eq!(
            parse_level_order("1,x"),
            Err(StructureError::InvalidLevelOrder {
                token: "x".to_string(),
                position: 1
            })
        );
    }

    #[test]
    fn test_positions() {
        let mut tree = Tree::sample(TreeKind::Bst);
        tree.calculate_positions(800.0, 600.0);
        let root = tree.root().unwrap();
        assert_eq!((root.x, root.y), (400.0, 50.0));
        let left = root.left.as_ref().unwrap();
        assert_eq!((left.x, left.y), (200.0, 130.0));
        let right = root.right.as_ref().unwrap();
        assert_eq!((right.x, right.y), (600.0, 130.0));
    }
}
