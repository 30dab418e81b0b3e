//! Algorithm step generators
//!
//! Each algorithm is a pure function from a borrowed structure to a
//! [`StepTrace`]: the complete, ordered list of steps it produces, computed
//! eagerly. Structures are never mutated and carry no visualization state;
//! all per-step status lives in the overlays of the step records.
//!
//! # Modules
//!
//! - [`step`]: step records, the [`Outcome`] of a run and [`StepTrace`]
//! - [`graph_algorithms`]: BFS, DFS, Dijkstra, Prim, Kruskal, topological sort
//! - [`tree_algorithms`]: in-, pre-, post- and level-order traversals
//! - [`list_algorithms`]: traversal, reversal, cycle detection, search
//! - [`union_find`]: the disjoint-set forest behind Kruskal
//!
//! Generating the same algorithm twice over the same structure yields the
//! same trace.

pub mod graph_algorithms;
pub mod list_algorithms;
pub mod step;
pub mod tree_algorithms;
pub mod union_find;

pub use graph_algorithms::{
    run_bfs, run_dfs, run_dijkstra, run_kruskal, run_prim, run_topological_sort, GraphAlgorithm,
};
pub use list_algorithms::{run_detect_cycle, run_reverse, run_search, run_traversal, ListAlgorithm};
pub use step::{GraphStep, ListStep, Outcome, Overlay, Step, StepTrace, TreeStep};
pub use tree_algorithms::{
    run_in_order, run_level_order, run_post_order, run_pre_order, TreeAlgorithm,
};
pub use union_find::DisjointSet;
