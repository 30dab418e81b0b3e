//! Linked list structure
//!
//! A [`LinkedList`] is a bag of [`ListNode`]s addressed by id plus a `head`
//! pointer. `next` links may form a cycle; the list does not reject one,
//! since cycle detection is one of the algorithms run over it.
//!
//! In a doubly linked list `prev` follows the most recent link into a node:
//! after `link(a, b)`, `b.prev == a`. While every node has at most one
//! predecessor this keeps `a.next == b` and `b.prev == a` in step. A
//! back-link that closes a cycle gives its target two predecessors, and
//! `prev` names the one that closed it. Singly linked lists never set `prev`.

use crate::errors::StructureError;
use rustc_hash::FxHashSet;
use std::fmt;
use std::str::FromStr;

const NODE_SPACING: f64 = 150.0;
const FIRST_X: f64 = 100.0;
const ROW_Y: f64 = 200.0;

/// List node identifier, displayed as `node<k>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListNodeId(pub u32);

impl fmt::Display for ListNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node{}", self.0)
    }
}

impl FromStr for ListNodeId {
    type Err = std::num::ParseIntError;

    /// Accepts both `node3` and `3`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("node").unwrap_or(s);
        digits.parse().map(ListNodeId)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Singly,
    Doubly,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Singly => write!(f, "singly"),
            ListKind::Doubly => write!(f, "doubly"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    pub id: ListNodeId,
    pub value: i64,
    pub next: Option<ListNodeId>,
    pub prev: Option<ListNodeId>,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone)]
pub struct LinkedList {
    kind: ListKind,
    head: Option<ListNodeId>,
    nodes: Vec<ListNode>,
    next_id: u32,
}

impl LinkedList {
    pub fn new(kind: ListKind) -> Self {
        LinkedList {
            kind,
            head: None,
            nodes: Vec::new(),
            next_id: 1,
        }
    }

    /// `10 → 20 → 30 → 40` as `node1..node4`
    pub fn sample(kind: ListKind) -> Self {
        let mut list = LinkedList::new(kind);
        for value in [10, 20, 30, 40] {
            list.append(value);
        }
        list
    }

    /// Build a list by appending `values` in order
    pub fn from_values(kind: ListKind, values: &[i64]) -> Self {
        let mut list = LinkedList::new(kind);
        for &value in values {
            list.append(value);
        }
        list
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn head(&self) -> Option<ListNodeId> {
        self.head
    }

    /// Nodes in creation order
    pub fn nodes(&self) -> &[ListNode] {
        &self.nodes
    }

    pub fn node(&self, id: ListNodeId) -> Option<&ListNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add an unlinked node. The first node of an empty list becomes head.
    pub fn push_node(&mut self, value: i64, x: f64, y: f64) -> ListNodeId {
        let id = ListNodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(ListNode {
            id,
            value,
            next: None,
            prev: None,
            x,
            y,
        });
        if self.head.is_none() {
            self.head = Some(id);
        }
        log::trace!("added list node {} = {}", id, value);
        id
    }

    /// Add a node after the current tail, laid out on the default row
    pub fn append(&mut self, value: i64) -> ListNodeId {
        let tail = self.tail();
        let x = FIRST_X + NODE_SPACING * self.nodes.len() as f64;
        let id = self.push_node(value, x, ROW_Y);
        if let Some(tail) = tail {
            // Both ids exist
            let _ = self.link(tail, id);
        }
        id
    }

    /// Last node reached from head, or `None` when empty or cyclic
    pub fn tail(&self) -> Option<ListNodeId> {
        let mut current = self.head?;
        for _ in 0..self.nodes.len() {
            match self.node(current)?.next {
                Some(next) => current = next,
                None => return Some(current),
            }
        }
        None
    }

    /// Point `from.next` at `to`.
    ///
    /// For doubly linked lists this also sets `to.prev` and clears the
    /// `prev` of `from`'s old successor. Other nodes already pointing at
    /// `to` keep their `next`, so a back-link forms a cycle.
    pub fn link(&mut self, from: ListNodeId, to: ListNodeId) -> Result<(), StructureError> {
        self.require(from)?;
        self.require(to)?;

        let old_next = self.node(from).and_then(|n| n.next);
        if self.kind == ListKind::Doubly {
            for node in &mut self.nodes {
                if Some(node.id) == old_next && node.prev == Some(from) {
                    node.prev = None;
                }
            }
        }

        for node in &mut self.nodes {
            if node.id == from {
                node.next = Some(to);
            }
        }
        if self.kind == ListKind::Doubly {
            for node in &mut self.nodes {
                if node.id == to {
                    node.prev = Some(from);
                }
            }
        }
        log::trace!("linked {} -> {}", from, to);
        Ok(())
    }

    /// Clear `from.next`, returning the node it pointed at
    pub fn unlink(&mut self, from: ListNodeId) -> Result<Option<ListNodeId>, StructureError> {
        self.require(from)?;
        let mut old = None;
        for node in &mut self.nodes {
            if node.id == from {
                old = node.next.take();
            }
        }
        if self.kind == ListKind::Doubly {
            for node in &mut self.nodes {
                if Some(node.id) == old && node.prev == Some(from) {
                    node.prev = None;
                }
            }
        }
        Ok(old)
    }

    /// Remove a node, clearing every pointer to it.
    ///
    /// If it was the head, the first remaining node without a `prev` becomes
    /// head, falling back to the first remaining node.
    pub fn remove_node(&mut self, id: ListNodeId) -> Result<ListNode, StructureError> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or(StructureError::UnknownListNode(id))?;
        let removed = self.nodes.remove(index);

        for node in &mut self.nodes {
            if node.next == Some(id) {
                node.next = None;
            }
            if node.prev == Some(id) {
                node.prev = None;
            }
        }

        if self.head == Some(id) {
            self.head = self
                .nodes
                .iter()
                .find(|n| n.prev.is_none())
                .or_else(|| self.nodes.first())
                .map(|n| n.id);
        }
        log::trace!("removed list node {}", id);
        Ok(removed)
    }

    pub fn set_value(&mut self, id: ListNodeId, value: i64) -> Result<(), StructureError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StructureError::UnknownListNode(id))?;
        node.value = value;
        Ok(())
    }

    pub fn set_head(&mut self, id: ListNodeId) -> Result<(), StructureError> {
        self.require(id)?;
        self.head = Some(id);
        Ok(())
    }

    /// Whether following `next` from head ever revisits a node
    pub fn has_cycle(&self) -> bool {
        let mut seen = FxHashSet::default();
        let mut current = self.head;
        while let Some(id) = current {
            if !seen.insert(id) {
                return true;
            }
            current = self.node(id).and_then(|n| n.next);
        }
        false
    }

    /// Values from head, stopping before any node is repeated
    pub fn values(&self) -> Vec<i64> {
        let mut seen = FxHashSet::default();
        let mut values = Vec::new();
        let mut current = self.head;
        while let Some(id) = current {
            if !seen.insert(id) {
                break;
            }
            let Some(node) = self.node(id) else { break };
            values.push(node.value);
            current = node.next;
        }
        values
    }

    fn require(&self, id: ListNodeId) -> Result<(), StructureError> {
        if self.node(id).is_some() {
            Ok(())
        } else {
            Err(StructureError::UnknownListNode(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_layout() {
        let list = LinkedList::sample(ListKind::Doubly);
        assert_eq!(list.head(), Some(ListNodeId(1)));
        assert_eq!(list.values(), vec![10, 20, 30, 40]);
        let third = list.node(ListNodeId(3)).unwrap();
        assert_eq!(third.prev, Some(ListNodeId(2)));
        assert_eq!(third.next, Some(ListNodeId(4)));
        assert_eq!(third.x, 400.0);
    }

    #[test]
    fn test_singly_never_sets_prev() {
        let list = LinkedList::sample(ListKind::Singly);
        assert!(list.nodes().iter().all(|n| n.prev.is_none()));
    }

    #[test]
    fn test_doubly_link_moves_prev_to_newest_linker() {
        let mut list = LinkedList::sample(ListKind::Doubly);
        // node1 -> node3 skips node2
        list.link(ListNodeId(1), ListNodeId(3)).unwrap();
        assert_eq!(list.values(), vec![10, 30, 40]);
        assert_eq!(list.node(ListNodeId(3)).unwrap().prev, Some(ListNodeId(1)));
        assert_eq!(list.node(ListNodeId(2)).unwrap().prev, None);
        assert_eq!(list.node(ListNodeId(2)).unwrap().next, Some(ListNodeId(3)));
    }

    #[test]
    fn test_doubly_back_link_forms_cycle() {
        let mut list = LinkedList::sample(ListKind::Doubly);
        list.link(ListNodeId(4), ListNodeId(2)).unwrap();
        assert!(list.has_cycle());
        assert_eq!(list.values(), vec![10, 20, 30, 40]);
        assert_eq!(list.node(ListNodeId(1)).unwrap().next, Some(ListNodeId(2)));
        assert_eq!(list.node(ListNodeId(2)).unwrap().prev, Some(ListNodeId(4)));
    }

    #[test]
    fn test_cycle_is_detected_and_walk_terminates() {
        let mut list = LinkedList::sample(ListKind::Singly);
        assert!(!list.has_cycle());
        list.link(ListNodeId(4), ListNodeId(2)).unwrap();
        assert!(list.has_cycle());
        assert_eq!(list.values(), vec![10, 20, 30, 40]);
        assert_eq!(list.tail(), None);
    }

    #[test]
    fn test_remove_head_picks_new_head() {
        let mut list = LinkedList::sample(ListKind::Doubly);
        list.remove_node(ListNodeId(1)).unwrap();
        assert_eq!(list.head(), Some(ListNodeId(2)));
        assert_eq!(list.values(), vec![20, 30, 40]);
        assert!(list.remove_node(ListNodeId(1)).is_err());
    }

    #[test]
    fn test_remove_middle_clears_pointers() {
        let mut list = LinkedList::sample(ListKind::Singly);
        list.remove_node(ListNodeId(2)).unwrap();
        assert_eq!(list.values(), vec![10]);
        assert_eq!(list.node(ListNodeId(1)).unwrap().next, None);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut list = LinkedList::sample(ListKind::Singly);
        list.remove_node(ListNodeId(4)).unwrap();
        assert_eq!(list.append(50), ListNodeId(5));
        assert_eq!(list.values(), vec![10, 20, 30, 50]);
    }

    #[test]
    fn test_unlink() {
        let mut list = LinkedList::sample(ListKind::Doubly);
        assert_eq!(list.unlink(ListNodeId(2)), Ok(Some(ListNodeId(3))));
        assert_eq!(list.node(ListNodeId(3)).unwrap().prev, None);
        assert_eq!(list.values(), vec![10, 20]);
    }
}
