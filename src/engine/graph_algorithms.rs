//! Graph algorithm step generators
//!
//! Every generator borrows the graph immutably and returns a
//! [`StepTrace`] of [`GraphStep`]s. Neighbors are always visited in edge
//! insertion order and ties (Dijkstra's minimum, Prim's cheapest crossing
//! edge) are broken by that same order, so traces are deterministic.
//!
//! Depth-first search and topological sort run on an explicit frame stack
//! rather than recursion, so very deep graphs cannot overflow the call
//! stack. Each frame remembers how far it got through its vertex's
//! outgoing edges, which reproduces the recursive step order exactly.
//!
//! # Preconditions
//!
//! ```text
//! algorithm     empty graph   start vertex   end vertex   directed
//! bfs / dfs     refused       required       -            either
//! dijkstra      refused       required       optional     either
//! prim          refused       required       -            either
//! kruskal       refused       -              -            either
//! topological   refused       -              -            required
//! ```
//!
//! A refused run yields a single step explaining why, and an
//! [`Outcome`] naming the failed precondition.

use super::step::{uniform, GraphStep, Outcome, Overlay, StepTrace};
use super::union_find::DisjointSet;
use crate::model::{Edge, EdgeId, EdgeStatus, Graph, NodeStatus, VertexId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::str::FromStr;

/// The graph algorithms that can be replayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphAlgorithm {
    Bfs,
    Dfs,
    Dijkstra,
    Prim,
    Kruskal,
    TopologicalSort,
}

impl GraphAlgorithm {
    pub const ALL: [GraphAlgorithm; 6] = [
        GraphAlgorithm::Bfs,
        GraphAlgorithm::Dfs,
        GraphAlgorithm::Dijkstra,
        GraphAlgorithm::Prim,
        GraphAlgorithm::Kruskal,
        GraphAlgorithm::TopologicalSort,
    ];

    /// Short name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            GraphAlgorithm::Bfs => "bfs",
            GraphAlgorithm::Dfs => "dfs",
            GraphAlgorithm::Dijkstra => "dijkstra",
            GraphAlgorithm::Prim => "prim",
            GraphAlgorithm::Kruskal => "kruskal",
            GraphAlgorithm::TopologicalSort => "topological",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            GraphAlgorithm::Bfs => "Breadth-First Search",
            GraphAlgorithm::Dfs => "Depth-First Search",
            GraphAlgorithm::Dijkstra => "Dijkstra's Shortest Path",
            GraphAlgorithm::Prim => "Prim's Minimum Spanning Tree",
            GraphAlgorithm::Kruskal => "Kruskal's Minimum Spanning Tree",
            GraphAlgorithm::TopologicalSort => "Topological Sort",
        }
    }

    pub fn needs_start(self) -> bool {
        matches!(
            self,
            GraphAlgorithm::Bfs | GraphAlgorithm::Dfs | GraphAlgorithm::Dijkstra | GraphAlgorithm::Prim
        )
    }

    pub fn uses_end(self) -> bool {
        self == GraphAlgorithm::Dijkstra
    }

    /// Generate the full trace for this algorithm
    pub fn run(
        self,
        graph: &Graph,
        start: Option<VertexId>,
        end: Option<VertexId>,
    ) -> StepTrace<GraphStep> {
        let start = match (self.needs_start(), start) {
            (true, Some(start)) => start,
            (true, None) if !graph.is_empty() => {
                return StepTrace::refused(
                    self.name(),
                    GraphStep::new("No start vertex selected"),
                    Outcome::UnknownStart,
                );
            }
            // Unused, or refused by the empty-graph check
            (true, None) | (false, _) => VertexId(u32::MAX),
        };

        match self {
            GraphAlgorithm::Bfs => run_bfs(graph, start),
            GraphAlgorithm::Dfs => run_dfs(graph, start),
            GraphAlgorithm::Dijkstra => run_dijkstra(graph, start, end),
            GraphAlgorithm::Prim => run_prim(graph, start),
            GraphAlgorithm::Kruskal => run_kruskal(graph),
            GraphAlgorithm::TopologicalSort => run_topological_sort(graph),
        }
    }
}

impl fmt::Display for GraphAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GraphAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(GraphAlgorithm::Bfs),
            "dfs" => Ok(GraphAlgorithm::Dfs),
            "dijkstra" => Ok(GraphAlgorithm::Dijkstra),
            "prim" => Ok(GraphAlgorithm::Prim),
            "kruskal" => Ok(GraphAlgorithm::Kruskal),
            "topological" | "topo" | "topological-sort" => Ok(GraphAlgorithm::TopologicalSort),
            _ => Err(s.to_string()),
        }
    }
}

/// Breadth-first search from `start`, following outgoing edges
pub fn run_bfs(graph: &Graph, start: VertexId) -> StepTrace<GraphStep> {
    if let Some(refusal) = check_start("bfs", graph, start) {
        return refusal;
    }

    let mut steps = Vec::new();
    let mut visited = FxHashSet::default();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    steps.push(
        GraphStep::new(format!("Starting BFS from vertex {}", start))
            .vertex(start, NodeStatus::Start)
            .with_queue(queue.iter().copied()),
    );

    while let Some(current) = queue.pop_front() {
        let mut vertex_statuses = uniform(visited.iter().copied(), NodeStatus::Visited);
        vertex_statuses.insert(current, NodeStatus::Active);
        steps.push(
            GraphStep::new(format!("Processing vertex {}", current))
                .with_vertices(vertex_statuses.clone())
                .with_queue(queue.iter().copied()),
        );

        for edge in graph.out_edges(current) {
            let neighbor = edge.target;
            if visited.contains(&neighbor) {
                steps.push(
                    GraphStep::new(format!("Vertex {} already visited, skipping", neighbor))
                        .with_vertices(vertex_statuses.clone())
                        .edge(edge.id, EdgeStatus::Discarded)
                        .with_queue(queue.iter().copied()),
                );
                continue;
            }

            let mut edge_statuses = settled_edges(graph, &visited);
            edge_statuses.insert(edge.id, EdgeStatus::Active);
            steps.push(
                GraphStep::new(format!("Exploring edge from {} to {}", current, neighbor))
                    .with_vertices(vertex_statuses.clone())
                    .with_edges(edge_statuses.clone())
                    .with_queue(queue.iter().copied()),
            );

            visited.insert(neighbor);
            queue.push_back(neighbor);

            let mut discovered = vertex_statuses.clone();
            discovered.insert(neighbor, NodeStatus::Active);
            steps.push(
                GraphStep::new(format!("Added vertex {} to the queue", neighbor))
                    .with_vertices(discovered)
                    .with_edges(edge_statuses)
                    .with_queue(queue.iter().copied()),
            );
        }
    }

    steps.push(
        GraphStep::new("BFS completed")
            .with_vertices(uniform(visited.iter().copied(), NodeStatus::Visited))
            .with_edges(settled_edges(graph, &visited))
            .with_queue(Vec::new()),
    );
    StepTrace::finish("bfs", steps, Outcome::Completed)
}

/// A vertex whose outgoing edges are being scanned
struct Frame {
    vertex: VertexId,
    edges: Vec<(EdgeId, VertexId)>,
    cursor: usize,
    statuses: Overlay<VertexId, NodeStatus>,
}

impl Frame {
    fn new(graph: &Graph, vertex: VertexId, statuses: Overlay<VertexId, NodeStatus>) -> Self {
        Frame {
            vertex,
            edges: graph.out_edges(vertex).map(|e| (e.id, e.target)).collect(),
            cursor: 0,
            statuses,
        }
    }

    /// The next unscanned edge, advancing the cursor
    fn next_edge(&mut self) -> Option<(EdgeId, VertexId)> {
        let edge = self.edges.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(edge)
    }
}

fn frame_path(frames: &[Frame]) -> Vec<VertexId> {
    frames.iter().map(|f| f.vertex).collect()
}

/// Depth-first search from `start`.
///
/// The stack shown with each step is the current descent path, bottom
/// first: a vertex is pushed when discovered and popped once all of its
/// outgoing edges have been scanned.
pub fn run_dfs(graph: &Graph, start: VertexId) -> StepTrace<GraphStep> {
    if let Some(refusal) = check_start("dfs", graph, start) {
        return refusal;
    }

    let mut steps = Vec::new();
    let mut visited = FxHashSet::default();
    visited.insert(start);

    steps.push(
        GraphStep::new(format!("Starting DFS from vertex {}", start))
            .vertex(start, NodeStatus::Start)
            .with_stack([start]),
    );

    let mut frames = vec![Frame::new(graph, start, dfs_statuses(start, &visited))];
    steps.push(
        GraphStep::new(format!("Processing vertex {}", start))
            .with_vertices(frames[0].statuses.clone())
            .with_stack(frame_path(&frames)),
    );

    while let Some(frame) = frames.last_mut() {
        let Some((edge, neighbor)) = frame.next_edge() else {
            frames.pop();
            continue;
        };
        let current = frame.vertex;
        let statuses = frame.statuses.clone();

        if visited.contains(&neighbor) {
            steps.push(
                GraphStep::new(format!("Vertex {} already visited, skipping", neighbor))
                    .with_vertices(statuses)
                    .edge(edge, EdgeStatus::Discarded)
                    .with_stack(frame_path(&frames)),
            );
            continue;
        }

        let mut edge_statuses = settled_edges(graph, &visited);
        edge_statuses.insert(edge, EdgeStatus::Active);
        steps.push(
            GraphStep::new(format!("Exploring edge from {} to {}", current, neighbor))
                .with_vertices(statuses.clone())
                .with_edges(edge_statuses.clone())
                .with_stack(frame_path(&frames)),
        );

        visited.insert(neighbor);
        let child = Frame::new(graph, neighbor, dfs_statuses(neighbor, &visited));
        let child_statuses = child.statuses.clone();
        frames.push(child);

        let mut discovered = statuses;
        discovered.insert(neighbor, NodeStatus::Active);
        steps.push(
            GraphStep::new(format!("Added vertex {} to the stack", neighbor))
                .with_vertices(discovered)
                .with_edges(edge_statuses)
                .with_stack(frame_path(&frames)),
        );
        steps.push(
            GraphStep::new(format!("Processing vertex {}", neighbor))
                .with_vertices(child_statuses)
                .with_stack(frame_path(&frames)),
        );
    }

    steps.push(
        GraphStep::new("DFS completed")
            .with_vertices(uniform(visited.iter().copied(), NodeStatus::Visited))
            .with_edges(settled_edges(graph, &visited))
            .with_stack(Vec::new()),
    );
    StepTrace::finish("dfs", steps, Outcome::Completed)
}

fn dfs_statuses(current: VertexId, visited: &FxHashSet<VertexId>) -> Overlay<VertexId, NodeStatus> {
    let mut statuses = uniform(visited.iter().copied(), NodeStatus::Visited);
    statuses.insert(current, NodeStatus::Active);
    statuses
}

/// Dijkstra's shortest paths from `start`.
///
/// With an `end` vertex the search stops as soon as `end` would be
/// selected and the final step shows the reconstructed path. Weights are
/// unsigned, so every distance selected is final.
pub fn run_dijkstra(graph: &Graph, start: VertexId, end: Option<VertexId>) -> StepTrace<GraphStep> {
    if let Some(refusal) = check_start("dijkstra", graph, start) {
        return refusal;
    }
    if let Some(end) = end.filter(|&end| !graph.contains_vertex(end)) {
        return StepTrace::refused(
            "dijkstra",
            GraphStep::new(format!("End vertex {} does not exist", end)),
            Outcome::UnknownEnd,
        );
    }

    let mut steps = Vec::new();
    // Absent means infinite
    let mut distances: FxHashMap<VertexId, u64> = FxHashMap::default();
    let mut previous: FxHashMap<VertexId, VertexId> = FxHashMap::default();
    let mut settled: FxHashSet<VertexId> = FxHashSet::default();
    distances.insert(start, 0);

    steps.push(
        GraphStep::new(format!("Starting Dijkstra's algorithm from vertex {}", start))
            .vertex(start, NodeStatus::Start)
            .with_distances(snapshot(&distances)),
    );

    while let Some((current, distance)) = closest_unsettled(graph, &distances, &settled) {
        if Some(current) == end {
            break;
        }
        settled.insert(current);

        let mut statuses = uniform(settled.iter().copied(), NodeStatus::Visited);
        statuses.insert(current, NodeStatus::Active);
        if let Some(end) = end {
            statuses.insert(end, NodeStatus::End);
        }
        steps.push(
            GraphStep::new(format!(
                "Processing vertex {} with distance {}",
                current, distance
            ))
            .with_vertices(statuses.clone())
            .with_distances(snapshot(&distances)),
        );

        for edge in graph.out_edges(current) {
            let neighbor = edge.target;
            if settled.contains(&neighbor) {
                continue;
            }
            let candidate = distance + u64::from(edge.weight);
            steps.push(
                GraphStep::new(format!(
                    "Checking edge from {} to {} with weight {}",
                    current, neighbor, edge.weight
                ))
                .with_vertices(statuses.clone())
                .edge(edge.id, EdgeStatus::Active)
                .with_distances(snapshot(&distances)),
            );

            match distances.get(&neighbor) {
                Some(&known) if candidate >= known => {
                    steps.push(
                        GraphStep::new(format!(
                            "No improvement to {}, current: {}, new: {}",
                            neighbor, known, candidate
                        ))
                        .with_vertices(statuses.clone())
                        .edge(edge.id, EdgeStatus::Discarded)
                        .with_distances(snapshot(&distances)),
                    );
                }
                _ => {
                    distances.insert(neighbor, candidate);
                    previous.insert(neighbor, current);
                    let mut updated = statuses.clone();
                    updated.insert(neighbor, NodeStatus::Active);
                    steps.push(
                        GraphStep::new(format!("Updated distance to {}: {}", neighbor, candidate))
                            .with_vertices(updated)
                            .edge(edge.id, EdgeStatus::Active)
                            .with_distances(snapshot(&distances)),
                    );
                }
            }
        }
    }

    let Some(end) = end else {
        let mut statuses = uniform(settled.iter().copied(), NodeStatus::Visited);
        statuses.insert(start, NodeStatus::Start);
        steps.push(
            GraphStep::new("Dijkstra's algorithm completed")
                .with_vertices(statuses)
                .with_distances(snapshot(&distances)),
        );
        return StepTrace::finish("dijkstra", steps, Outcome::Completed);
    };

    let Some(&total) = distances.get(&end) else {
        let mut statuses = uniform(settled.iter().copied(), NodeStatus::Visited);
        statuses.insert(start, NodeStatus::Start);
        statuses.insert(end, NodeStatus::End);
        steps.push(
            GraphStep::new(format!("Vertex {} is unreachable from {}", end, start))
                .with_vertices(statuses)
                .with_distances(snapshot(&distances)),
        );
        return StepTrace::finish("dijkstra", steps, Outcome::Unreachable);
    };

    let mut path = vec![end];
    let mut cursor = end;
    while let Some(&prev) = previous.get(&cursor) {
        path.push(prev);
        cursor = prev;
    }
    path.reverse();

    let mut statuses = uniform(path.iter().copied(), NodeStatus::Path);
    statuses.insert(end, NodeStatus::End);
    statuses.insert(start, NodeStatus::Start);
    let edges = uniform(
        path.windows(2).map(|pair| EdgeId::new(pair[0], pair[1])),
        EdgeStatus::Path,
    );
    let rendered: Vec<String> = path.iter().map(VertexId::to_string).collect();
    steps.push(
        GraphStep::new(format!(
            "Shortest path found: {} with total distance {}",
            rendered.join(" → "),
            total
        ))
        .with_vertices(statuses)
        .with_edges(edges)
        .with_distances(snapshot(&distances))
        .with_order(path),
    );
    StepTrace::finish("dijkstra", steps, Outcome::Completed)
}

/// First unsettled vertex, in insertion order, with the smallest finite distance
fn closest_unsettled(
    graph: &Graph,
    distances: &FxHashMap<VertexId, u64>,
    settled: &FxHashSet<VertexId>,
) -> Option<(VertexId, u64)> {
    let mut best: Option<(VertexId, u64)> = None;
    for vertex in graph.vertices() {
        if settled.contains(&vertex.id) {
            continue;
        }
        if let Some(&distance) = distances.get(&vertex.id) {
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((vertex.id, distance));
            }
        }
    }
    best
}

fn snapshot(distances: &FxHashMap<VertexId, u64>) -> BTreeMap<VertexId, u64> {
    distances.iter().map(|(&v, &d)| (v, d)).collect()
}

/// Prim's minimum spanning tree grown from `start`.
///
/// Edge direction is ignored: any edge with exactly one endpoint in the
/// tree is a candidate.
pub fn run_prim(graph: &Graph, start: VertexId) -> StepTrace<GraphStep> {
    if let Some(refusal) = check_start("prim", graph, start) {
        return refusal;
    }

    let mut steps = Vec::new();
    let mut in_tree = FxHashSet::default();
    let mut mst: Vec<EdgeId> = Vec::new();
    let mut total: u64 = 0;
    in_tree.insert(start);

    steps.push(
        GraphStep::new(format!("Starting Prim's algorithm from vertex {}", start))
            .vertex(start, NodeStatus::Start),
    );

    while in_tree.len() < graph.vertex_count() {
        let mut cheapest: Option<&Edge> = None;
        for edge in graph.edges() {
            let crosses = in_tree.contains(&edge.source) != in_tree.contains(&edge.target);
            if crosses && cheapest.map_or(true, |best| edge.weight < best.weight) {
                cheapest = Some(edge);
            }
        }

        let Some(edge) = cheapest else {
            steps.push(
                GraphStep::new("Graph is not connected, MST cannot be completed")
                    .with_vertices(uniform(in_tree.iter().copied(), NodeStatus::Visited))
                    .with_edges(uniform(mst.iter().copied(), EdgeStatus::Path)),
            );
            return StepTrace::finish("prim", steps, Outcome::Disconnected);
        };

        let added = if in_tree.contains(&edge.source) {
            edge.target
        } else {
            edge.source
        };
        in_tree.insert(added);
        mst.push(edge.id);
        total += u64::from(edge.weight);

        let mut vertices = uniform(in_tree.iter().copied(), NodeStatus::Visited);
        vertices.insert(added, NodeStatus::Active);
        let mut edges = uniform(mst.iter().copied(), EdgeStatus::Path);
        edges.insert(edge.id, EdgeStatus::Active);
        steps.push(
            GraphStep::new(format!(
                "Added edge {} with weight {} to MST",
                edge.id, edge.weight
            ))
            .with_vertices(vertices)
            .with_edges(edges),
        );
    }

    steps.push(
        GraphStep::new(format!(
            "Minimum Spanning Tree completed, total weight {}",
            total
        ))
        .with_vertices(uniform(in_tree.iter().copied(), NodeStatus::Visited))
        .with_edges(uniform(mst.iter().copied(), EdgeStatus::Path)),
    );
    StepTrace::finish("prim", steps, Outcome::Completed)
}

/// Kruskal's minimum spanning tree (or forest).
///
/// Edges are considered by ascending weight, ties in insertion order. In an
/// undirected graph each edge is stored twice; only the first record of
/// each endpoint pair is considered.
pub fn run_kruskal(graph: &Graph) -> StepTrace<GraphStep> {
    if graph.is_empty() {
        return StepTrace::refused("kruskal", GraphStep::new("Graph is empty"), Outcome::EmptyInput);
    }

    let mut sorted: Vec<&Edge> = graph.edges().iter().collect();
    sorted.sort_by_key(|e| e.weight);

    let mut components = DisjointSet::new(graph.vertices().iter().map(|v| v.id));
    let mut seen_pairs = FxHashSet::default();
    let mut mst: Vec<EdgeId> = Vec::new();
    let mut total: u64 = 0;
    let mut steps = vec![GraphStep::new("Starting Kruskal's algorithm")];

    for edge in sorted {
        if !graph.is_directed() && !seen_pairs.insert(edge.id.canonical()) {
            continue;
        }

        let mut considering = uniform(mst.iter().copied(), EdgeStatus::Path);
        considering.insert(edge.id, EdgeStatus::Active);
        steps.push(
            GraphStep::new(format!(
                "Considering edge {} with weight {}",
                edge.id, edge.weight
            ))
            .with_edges(considering),
        );

        if components.union(edge.source, edge.target) {
            mst.push(edge.id);
            total += u64::from(edge.weight);

            let root = components.find(edge.source);
            let mut vertices = Overlay::default();
            for vertex in graph.vertices() {
                if components.find(vertex.id) == root {
                    vertices.insert(vertex.id, NodeStatus::Visited);
                }
            }
            let mut edges = uniform(mst.iter().copied(), EdgeStatus::Path);
            edges.insert(edge.id, EdgeStatus::Active);
            steps.push(
                GraphStep::new(format!("Added edge {} to MST", edge.id))
                    .with_vertices(vertices)
                    .with_edges(edges),
            );
        } else {
            let mut edges = uniform(mst.iter().copied(), EdgeStatus::Path);
            edges.insert(edge.id, EdgeStatus::Discarded);
            steps.push(
                GraphStep::new(format!("Edge {} would create a cycle, skipping", edge.id))
                    .with_edges(edges),
            );
        }
    }

    let spanning = mst.len() + 1 == graph.vertex_count();
    let (description, outcome) = if spanning {
        (
            format!("Minimum Spanning Tree completed, total weight {}", total),
            Outcome::Completed,
        )
    } else {
        (
            format!(
                "Graph is not connected, minimum spanning forest completed, total weight {}",
                total
            ),
            Outcome::Disconnected,
        )
    };
    steps.push(
        GraphStep::new(description)
            .with_vertices(uniform(graph.vertices().iter().map(|v| v.id), NodeStatus::Visited))
            .with_edges(uniform(mst.iter().copied(), EdgeStatus::Path)),
    );
    StepTrace::finish("kruskal", steps, outcome)
}

/// Depth-first topological sort of a directed graph.
///
/// Roots are tried in vertex insertion order. Reaching a vertex that is
/// still on the descent path means the graph has a cycle, and the run
/// stops there.
pub fn run_topological_sort(graph: &Graph) -> StepTrace<GraphStep> {
    if !graph.is_directed() {
        return StepTrace::refused(
            "topological",
            GraphStep::new("Topological sort requires a directed graph"),
            Outcome::NotDirected,
        );
    }
    if graph.is_empty() {
        return StepTrace::refused("topological", GraphStep::new("Graph is empty"), Outcome::EmptyInput);
    }

    let mut steps = vec![GraphStep::new("Starting topological sort").with_order(Vec::new())];
    let mut visited = FxHashSet::default();
    let mut on_path = FxHashSet::default();
    let mut order: Vec<VertexId> = Vec::new();

    for root in graph.vertices() {
        if visited.contains(&root.id) {
            continue;
        }

        on_path.insert(root.id);
        let frame = Frame::new(graph, root.id, topo_statuses(root.id, &visited, &on_path));
        steps.push(
            GraphStep::new(format!("Processing vertex {}", root.id))
                .with_vertices(frame.statuses.clone())
                .with_order(order.clone()),
        );
        let mut frames = vec![frame];

        while let Some(frame) = frames.last_mut() {
            let current = frame.vertex;
            let Some((edge, neighbor)) = frame.next_edge() else {
                frames.pop();
                on_path.remove(&current);
                visited.insert(current);
                order.insert(0, current);

                let mut statuses = uniform(visited.iter().copied(), NodeStatus::Visited);
                statuses.extend(on_path.iter().map(|&v| (v, NodeStatus::Path)));
                steps.push(
                    GraphStep::new(format!(
                        "Finished processing vertex {}, added to order",
                        current
                    ))
                    .with_vertices(statuses)
                    .with_order(order.clone()),
                );
                continue;
            };

            steps.push(
                GraphStep::new(format!("Checking edge from {} to {}", current, neighbor))
                    .with_vertices(frame.statuses.clone())
                    .edge(edge, EdgeStatus::Active)
                    .with_order(order.clone()),
            );

            if on_path.contains(&neighbor) {
                let mut statuses = uniform(visited.iter().copied(), NodeStatus::Visited);
                statuses.extend(on_path.iter().map(|&v| (v, NodeStatus::Path)));
                steps.push(
                    GraphStep::new("Cycle detected, topological sort not possible")
                        .with_vertices(statuses)
                        .edge(edge, EdgeStatus::Discarded)
                        .with_order(order),
                );
                return StepTrace::finish("topological", steps, Outcome::CycleDetected);
            }
            if visited.contains(&neighbor) {
                continue;
            }

            on_path.insert(neighbor);
            let child = Frame::new(graph, neighbor, topo_statuses(neighbor, &visited, &on_path));
            steps.push(
                GraphStep::new(format!("Processing vertex {}", neighbor))
                    .with_vertices(child.statuses.clone())
                    .with_order(order.clone()),
            );
            frames.push(child);
        }
    }

    let rendered: Vec<String> = order.iter().map(VertexId::to_string).collect();
    steps.push(
        GraphStep::new(format!(
            "Topological sort completed: {}",
            rendered.join(" → ")
        ))
        .with_vertices(uniform(order.iter().copied(), NodeStatus::Visited))
        .with_order(order),
    );
    StepTrace::finish("topological", steps, Outcome::Completed)
}

fn topo_statuses(
    current: VertexId,
    visited: &FxHashSet<VertexId>,
    on_path: &FxHashSet<VertexId>,
) -> Overlay<VertexId, NodeStatus> {
    let mut statuses = uniform(visited.iter().copied(), NodeStatus::Visited);
    statuses.extend(
        on_path
            .iter()
            .filter(|&&v| v != current)
            .map(|&v| (v, NodeStatus::Path)),
    );
    statuses.insert(current, NodeStatus::Active);
    statuses
}

/// Refusal trace when the graph is empty or `start` is not on it
fn check_start(algorithm: &str, graph: &Graph, start: VertexId) -> Option<StepTrace<GraphStep>> {
    if graph.is_empty() {
        return Some(StepTrace::refused(
            algorithm,
            GraphStep::new("Graph is empty"),
            Outcome::EmptyInput,
        ));
    }
    if !graph.contains_vertex(start) {
        return Some(StepTrace::refused(
            algorithm,
            GraphStep::new(format!("Start vertex {} does not exist", start)),
            Outcome::UnknownStart,
        ));
    }
    None
}

/// Edge records whose endpoints have both been reached
fn settled_edges(graph: &Graph, visited: &FxHashSet<VertexId>) -> Overlay<EdgeId, EdgeStatus> {
    uniform(
        graph
            .edges()
            .iter()
            .filter(|e| visited.contains(&e.source) && visited.contains(&e.target))
            .map(|e| e.id),
        EdgeStatus::Visited,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph() -> Graph {
        let mut graph = Graph::new(false, true);
        let a = graph.add_vertex(0.0, 0.0);
        let b = graph.add_vertex(10.0, 0.0);
        let c = graph.add_vertex(20.0, 0.0);
        graph.add_edge(a, b, 1).unwrap();
        graph.add_edge(b, c, 2).unwrap();
        graph
    }

    #[test]
    fn test_bfs_narration() {
        let trace = run_bfs(&path_graph(), VertexId(0));
        assert_eq!(trace.outcome(), Outcome::Completed);
        assert_eq!(
            trace.descriptions(),
            vec![
                "Starting BFS from vertex v0",
                "Processing vertex v0",
                "Exploring edge from v0 to v1",
                "Added vertex v1 to the queue",
                "Processing vertex v1",
                "Vertex v0 already visited, skipping",
                "Exploring edge from v1 to v2",
                "Added vertex v2 to the queue",
                "Processing vertex v2",
                "Vertex v1 already visited, skipping",
                "BFS completed",
            ]
        );
        assert_eq!(trace.steps()[0].vertices[&VertexId(0)], NodeStatus::Start);
        assert_eq!(trace.steps()[3].queue, Some(vec![VertexId(1)]));
    }

    #[test]
    fn test_dfs_stack_is_descent_path() {
        let trace = run_dfs(&path_graph(), VertexId(0));
        let deepest = trace
            .iter()
            .find(|s| s.description == "Processing vertex v2")
            .unwrap();
        assert_eq!(
            deepest.stack,
            Some(vec![VertexId(0), VertexId(1), VertexId(2)])
        );
        assert_eq!(trace.last().unwrap().stack, Some(Vec::new()));
    }

    #[test]
    fn test_refusals() {
        let empty = Graph::new(false, false);
        assert_eq!(run_bfs(&empty, VertexId(0)).outcome(), Outcome::EmptyInput);

        let graph = path_graph();
        let trace = run_dfs(&graph, VertexId(9));
        assert_eq!(trace.outcome(), Outcome::UnknownStart);
        assert_eq!(trace.len(), 1);

        let trace = run_dijkstra(&graph, VertexId(0), Some(VertexId(7)));
        assert_eq!(trace.outcome(), Outcome::UnknownEnd);

        let trace = run_topological_sort(&graph);
        assert_eq!(trace.outcome(), Outcome::NotDirected);
        assert_eq!(
            trace.descriptions(),
            vec!["Topological sort requires a directed graph"]
        );

        let trace = GraphAlgorithm::Bfs.run(&graph, None, None);
        assert_eq!(trace.outcome(), Outcome::UnknownStart);
    }

    #[test]
    fn test_dijkstra_path_step() {
        let graph = Graph::sample(false, true);
        let trace = run_dijkstra(&graph, VertexId(0), Some(VertexId(5)));
        let last = trace.last().unwrap();
        assert_eq!(
            last.description,
            "Shortest path found: v0 → v2 → v4 → v5 with total distance 13"
        );
        assert_eq!(last.vertices[&VertexId(0)], NodeStatus::Start);
        assert_eq!(last.vertices[&VertexId(2)], NodeStatus::Path);
        assert_eq!(last.vertices[&VertexId(5)], NodeStatus::End);
        assert_eq!(
            last.edges[&EdgeId::new(VertexId(4), VertexId(5))],
            EdgeStatus::Path
        );
    }

    #[test]
    fn test_dijkstra_no_improvement_text() {
        let graph = Graph::sample(false, true);
        let trace = run_dijkstra(&graph, VertexId(0), None);
        assert!(trace
            .descriptions()
            .contains(&"No improvement to v1, current: 4, new: 7"));
        assert_eq!(
            trace.last().unwrap().description,
            "Dijkstra's algorithm completed"
        );
    }

    #[test]
    fn test_dijkstra_unreachable_end() {
        let mut graph = path_graph();
        let lonely = graph.add_vertex(50.0, 50.0);
        let trace = run_dijkstra(&graph, VertexId(0), Some(lonely));
        assert_eq!(trace.outcome(), Outcome::Unreachable);
    }

    #[test]
    fn test_prim_disconnected() {
        let mut graph = path_graph();
        graph.add_vertex(50.0, 50.0);
        let trace = run_prim(&graph, VertexId(0));
        assert_eq!(trace.outcome(), Outcome::Disconnected);
        assert_eq!(
            trace.last().unwrap().description,
            "Graph is not connected, MST cannot be completed"
        );
    }

    #[test]
    fn test_kruskal_considers_each_pair_once() {
        let graph = path_graph();
        let trace = run_kruskal(&graph);
        let considered = trace
            .descriptions()
            .into_iter()
            .filter(|d| d.starts_with("Considering"))
            .count();
        assert_eq!(considered, 2);
        assert_eq!(trace.outcome(), Outcome::Completed);
    }

    #[test]
    fn test_topological_cycle() {
        let mut graph = Graph::new(true, false);
        let a = graph.add_vertex(0.0, 0.0);
        let b = graph.add_vertex(0.0, 0.0);
        graph.add_edge(a, b, 1).unwrap();
        graph.add_edge(b, a, 1).unwrap();
        let trace = run_topological_sort(&graph);
        assert_eq!(trace.outcome(), Outcome::CycleDetected);
        assert_eq!(
            trace.last().unwrap().description,
            "Cycle detected, topological sort not possible"
        );
    }

    #[test]
    fn test_algorithm_names_round_trip() {
        for algorithm in GraphAlgorithm::ALL {
            assert_eq!(algorithm.name().parse::<GraphAlgorithm>(), Ok(algorithm));
        }
        assert_eq!("topo".parse::<GraphAlgorithm>(), Ok(GraphAlgorithm::TopologicalSort));
        assert!("astar".parse::<GraphAlgorithm>().is_err());
    }
}
