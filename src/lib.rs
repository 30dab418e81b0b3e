//! # Introduction
//!
//! algotty runs classic graph, tree and linked-list algorithms over a small
//! editable structure and records every intermediate state as a step.  The
//! step history is then navigated forward and backward through a terminal UI
//! built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Structure + Algorithm → Engine → StepTrace → Timeline → TUI
//! ```
//!
//! 1. [`model`]: the structures. A directed or undirected, weighted or
//!    unweighted [`model::Graph`]; a plain, AVL or red-black
//!    [`model::Tree`]; a singly or doubly [`model::LinkedList`].
//! 2. [`engine`]: pure step generators. Each algorithm borrows a structure
//!    and returns a complete [`engine::StepTrace`]; status overlays live in
//!    the steps, never on the structure.
//! 3. [`playback`]: a [`playback::Timeline`] cursor over a trace, and
//!    sessions that regenerate the trace whenever the structure or the
//!    selected algorithm changes.
//! 4. [`config`]: command-line parsing into a first session.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Algorithms
//!
//! Graph: BFS, DFS, Dijkstra, Prim, Kruskal, topological sort.
//! Tree: in-, pre-, post- and level-order traversal.
//! List: traversal, reversal, Floyd cycle detection, linear search.

pub mod config;
pub mod engine;
pub mod errors;
pub mod model;
pub mod playback;
pub mod ui;
