//! Step records produced by the engine
//!
//! A step is one independently renderable snapshot of an algorithm run:
//! sparse status overlays, a narration line, and whatever auxiliary state
//! the algorithm exposes (queue, stack, accumulated values, ...).
//!
//! Overlays are sparse. An entity that a step does not mention is shown in
//! its default state; it is up to the renderer whether to accumulate
//! statuses across steps or show each step on its own.
//!
//! A whole run is returned as a [`StepTrace`]: the ordered steps plus an
//! [`Outcome`] telling the caller how the run ended without having to parse
//! descriptions.

use crate::model::{EdgeId, EdgeStatus, ListNodeId, NodeId, NodeStatus, VertexId};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fmt;

/// Sparse map from entity id to its status in one step
pub type Overlay<K, S> = FxHashMap<K, S>;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The algorithm ran to completion
    Completed,
    /// The structure had nothing to run over
    EmptyInput,
    /// The start vertex is missing or was not given
    UnknownStart,
    /// The requested end vertex does not exist
    UnknownEnd,
    /// The algorithm needs a directed graph
    NotDirected,
    /// Not every vertex could be reached; a partial result was reported
    Disconnected,
    /// The requested end vertex cannot be reached from the start
    Unreachable,
    /// A cycle was found (topological sort aborted, list cycle detected)
    CycleDetected,
    /// The list has no cycle
    NoCycle,
    /// The searched value was found
    Found,
    /// The searched value is absent
    NotFound,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Completed => "completed",
            Outcome::EmptyInput => "empty input",
            Outcome::UnknownStart => "unknown start",
            Outcome::UnknownEnd => "unknown end",
            Outcome::NotDirected => "not directed",
            Outcome::Disconnected => "disconnected",
            Outcome::Unreachable => "unreachable",
            Outcome::CycleDetected => "cycle detected",
            Outcome::NoCycle => "no cycle",
            Outcome::Found => "found",
            Outcome::NotFound => "not found",
        }
    }

    /// Whether the run was refused before doing any work
    pub fn is_precondition_failure(self) -> bool {
        matches!(
            self,
            Outcome::EmptyInput | Outcome::UnknownStart | Outcome::UnknownEnd | Outcome::NotDirected
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Common view of every step kind, used by playback and the UI
pub trait Step {
    fn description(&self) -> &str;
}

/// The ordered steps of one run plus how it ended
#[derive(Debug, Clone, PartialEq)]
pub struct StepTrace<S> {
    steps: Vec<S>,
    outcome: Outcome,
}

impl<S: Step> StepTrace<S> {
    /// Wrap finished steps, logging a summary of the run
    pub fn finish(algorithm: &str, steps: Vec<S>, outcome: Outcome) -> Self {
        log::debug!(
            "{} produced {} step(s), outcome: {}",
            algorithm,
            steps.len(),
            outcome
        );
        StepTrace { steps, outcome }
    }

    /// A one-step trace explaining why the run could not start
    pub fn refused(algorithm: &str, step: S, outcome: Outcome) -> Self {
        log::debug!("{} refused: {}", algorithm, step.description());
        StepTrace {
            steps: vec![step],
            outcome,
        }
    }
}

impl<S> StepTrace<S> {
    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<S> {
        self.steps
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&S> {
        self.steps.get(index)
    }

    pub fn last(&self) -> Option<&S> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.steps.iter()
    }

    /// All narration lines in order
    pub fn descriptions(&self) -> Vec<&str>
    where
        S: Step,
    {
        self.steps.iter().map(Step::description).collect()
    }
}

/// One step of a graph algorithm
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphStep {
    pub vertices: Overlay<VertexId, NodeStatus>,
    pub edges: Overlay<EdgeId, EdgeStatus>,
    pub description: String,
    /// BFS queue, front first
    pub queue: Option<Vec<VertexId>>,
    /// DFS stack, bottom first
    pub stack: Option<Vec<VertexId>>,
    /// Dijkstra's finite tentative distances
    pub distances: Option<BTreeMap<VertexId, u64>>,
    /// Topological order so far, or the reconstructed shortest path
    pub order: Option<Vec<VertexId>>,
}

impl GraphStep {
    pub fn new(description: impl Into<String>) -> Self {
        GraphStep {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn vertex(mut self, id: VertexId, status: NodeStatus) -> Self {
        self.vertices.insert(id, status);
        self
    }

    pub fn edge(mut self, id: EdgeId, status: EdgeStatus) -> Self {
        self.edges.insert(id, status);
        self
    }

    pub fn with_vertices(mut self, vertices: Overlay<VertexId, NodeStatus>) -> Self {
        self.vertices = vertices;
        self
    }

    pub fn with_edges(mut self, edges: Overlay<EdgeId, EdgeStatus>) -> Self {
        self.edges = edges;
        self
    }

    pub fn with_queue(mut self, queue: impl IntoIterator<Item = VertexId>) -> Self {
        self.queue = Some(queue.into_iter().collect());
        self
    }

    pub fn with_stack(mut self, stack: impl IntoIterator<Item = VertexId>) -> Self {
        self.stack = Some(stack.into_iter().collect());
        self
    }

    pub fn with_distances(mut self, distances: BTreeMap<VertexId, u64>) -> Self {
        self.distances = Some(distances);
        self
    }

    pub fn with_order(mut self, order: Vec<VertexId>) -> Self {
        self.order = Some(order);
        self
    }
}

impl Step for GraphStep {
    fn description(&self) -> &str {
        &self.description
    }
}

/// One step of a tree traversal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeStep {
    pub nodes: Overlay<NodeId, NodeStatus>,
    pub description: String,
    /// Values output so far
    pub values: Vec<i64>,
    /// Level-order queue, front first
    pub queue: Option<Vec<NodeId>>,
}

impl TreeStep {
    pub fn new(description: impl Into<String>, values: &[i64]) -> Self {
        TreeStep {
            description: description.into(),
            values: values.to_vec(),
            ..Default::default()
        }
    }

    pub fn node(mut self, id: NodeId, status: NodeStatus) -> Self {
        self.nodes.insert(id, status);
        self
    }

    pub fn with_queue(mut self, queue: impl IntoIterator<Item = NodeId>) -> Self {
        self.queue = Some(queue.into_iter().collect());
        self
    }
}

impl Step for TreeStep {
    fn description(&self) -> &str {
        &self.description
    }
}

/// One step of a linked-list algorithm
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListStep {
    pub nodes: Overlay<ListNodeId, NodeStatus>,
    pub description: String,
    pub current_pointer: Option<ListNodeId>,
    pub values: Vec<i64>,
}

impl ListStep {
    pub fn new(description: impl Into<String>) -> Self {
        ListStep {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn node(mut self, id: ListNodeId, status: NodeStatus) -> Self {
        self.nodes.insert(id, status);
        self
    }

    pub fn pointer(mut self, id: Option<ListNodeId>) -> Self {
        self.current_pointer = id;
        self
    }

    pub fn with_values(mut self, values: &[i64]) -> Self {
        self.values = values.to_vec();
        self
    }
}

impl Step for ListStep {
    fn description(&self) -> &str {
        &self.description
    }
}

/// Build an overlay giving every id in `ids` the same status
pub fn uniform<K, S>(ids: impl IntoIterator<Item = K>, status: S) -> Overlay<K, S>
where
    K: std::hash::Hash + Eq,
    S: Copy,
{
    ids.into_iter().map(|id| (id, status)).collect()
}
