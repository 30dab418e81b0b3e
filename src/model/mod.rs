//! Data model for the visualizer
//!
//! This module provides the three structures the engine runs over:
//! - [`graph`]: Vertices and weighted edges, directed or undirected
//! - [`tree`]: Binary search trees with optional AVL or red-black balancing
//! - [`list`]: Singly and doubly linked lists (cycles allowed)
//! - [`status`]: Visualization status tags shared by all step overlays
//!
//! # Ownership
//!
//! Structures are plain owned values mutated in place by the caller between
//! runs. They never carry visualization state: every algorithm borrows the
//! structure immutably and reports statuses only through its steps.
//!
//! # Identifiers
//!
//! Every entity is addressed by a small typed id allocated from a monotonic
//! counter. Ids are never reused within one structure:
//! ```text
//! VertexId(3)              →  v3
//! EdgeId { v0, v1 }        →  ev0-v1
//! NodeId(5)                →  n5
//! ListNodeId(2)            →  node2
//! ```

pub mod graph;
pub mod list;
pub mod status;
pub mod tree;

pub use graph::{Edge, EdgeId, Graph, Vertex, VertexId, Weight};
pub use list::{LinkedList, ListKind, ListNode, ListNodeId};
pub use status::{EdgeStatus, NodeStatus};
pub use tree::{Balance, NodeColor, NodeId, Tree, TreeKind, TreeNode};
