//! Disjoint-set forest used by Kruskal's algorithm

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Union-find with path compression and union by rank
#[derive(Debug, Clone)]
pub struct DisjointSet<T> {
    parent: FxHashMap<T, T>,
    rank: FxHashMap<T, u32>,
}

impl<T: Copy + Eq + Hash> DisjointSet<T> {
    /// One singleton set per item
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        let mut parent = FxHashMap::default();
        let mut rank = FxHashMap::default();
        for item in items {
            parent.insert(item, item);
            rank.insert(item, 0);
        }
        DisjointSet { parent, rank }
    }

    /// Representative of `item`'s set. Unknown items are their own set.
    pub fn find(&mut self, item: T) -> T {
        let mut root = item;
        while let Some(&up) = self.parent.get(&root) {
            if up == root {
                break;
            }
            root = up;
        }

        // Point everything on the walked path straight at the root
        let mut current = item;
        while current != root {
            let Some(up) = self.parent.insert(current, root) else {
                break;
            };
            current = up;
        }
        root
    }

    /// Merge the sets of `a` and `b`. Returns `false` if already joined.
    pub fn union(&mut self, a: T, b: T) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        let rank_a = self.rank.get(&root_a).copied().unwrap_or(0);
        let rank_b = self.rank.get(&root_b).copied().unwrap_or(0);
        if rank_a < rank_b {
            self.parent.insert(root_a, root_b);
        } else if rank_a > rank_b {
            self.parent.insert(root_b, root_a);
        } else {
            self.parent.insert(root_b, root_a);
            self.rank.insert(root_a, rank_a + 1);
        }
        true
    }

    pub fn connected(&mut self, a: T, b: T) -> bool {
        self.find(a) == self.find(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let mut set = DisjointSet::new(0..4);
        assert!(!set.connected(0, 1));
        assert_eq!(set.find(3), 3);
    }

    #[test]
    fn test_union_is_transitive() {
        let mut set = DisjointSet::new(0..5);
        assert!(set.union(0, 1));
        assert!(set.union(2, 3));
        assert!(set.union(1, 3));
        assert!(set.connected(0, 2));
        assert!(!set.connected(0, 4));
        assert!(!set.union(3, 0));
    }

    #[test]
    fn test_path_compression_flattens() {
        let mut set = DisjointSet::new(0..8);
        for i in 0..7 {
            set.union(i, i + 1);
        }
        let root = set.find(7);
        for i in 0..8 {
            assert_eq!(set.parent[&i], root);
        }
    }
}
