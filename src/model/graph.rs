//! Graph structure
//!
//! This module provides the editable graph the graph engine runs over:
//! - [`Graph`]: insertion-ordered vertices and edges with direction/weight flags
//! - [`Vertex`]: a positioned, labelled vertex
//! - [`Edge`]: a weighted edge whose id is derived from its endpoints
//!
//! # Undirected graphs
//!
//! An undirected edge is stored as two records, `e<a>-<b>` and `e<b>-<a>`.
//! Every mutator keeps the pair in sync: adding, removing or re-weighting one
//! record does the same to its mirror.
//!
//! # Iteration order
//!
//! Vertices and edges are kept in insertion order. Algorithms scan them in
//! that order, so ties (equal weights, neighbour order) resolve the same way
//! on every run.

use crate::errors::StructureError;
use std::fmt;
use std::str::FromStr;

/// Edge weight. Unweighted graphs use 1 for every edge.
pub type Weight = u32;

/// Vertex identifier, displayed as `v<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl FromStr for VertexId {
    type Err = std::num::ParseIntError;

    /// Accepts both `v3` and `3`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('v').unwrap_or(s);
        digits.parse().map(VertexId)
    }
}

/// Edge identifier derived from its endpoints, displayed as `e<source>-<target>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    pub source: VertexId,
    pub target: VertexId,
}

impl EdgeId {
    pub fn new(source: VertexId, target: VertexId) -> Self {
        EdgeId { source, target }
    }

    /// The id of the mirror record of an undirected edge
    pub fn reversed(self) -> Self {
        EdgeId {
            source: self.target,
            target: self.source,
        }
    }

    /// Unordered endpoint pair, identical for an edge and its mirror
    pub fn canonical(self) -> (VertexId, VertexId) {
        if self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}-{}", self.source, self.target)
    }
}

/// A graph vertex with its canvas position
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub x: f64,
    pub y: f64,
    pub label: String,
}

/// A weighted edge record
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub source: VertexId,
    pub target: VertexId,
    pub weight: Weight,
}

impl Edge {
    fn new(source: VertexId, target: VertexId, weight: Weight) -> Self {
        Edge {
            id: EdgeId::new(source, target),
            source,
            target,
            weight,
        }
    }

    /// Whether `vertex` is one of the endpoints
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.source == vertex || self.target == vertex
    }
}

/// An editable graph
#[derive(Debug, Clone)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    directed: bool,
    weighted: bool,
    next_vertex: u32,
}

impl Graph {
    pub fn new(directed: bool, weighted: bool) -> Self {
        Graph {
            vertices: Vec::new(),
            edges: Vec::new(),
            directed,
            weighted,
            next_vertex: 0,
        }
    }

    /// Six-vertex demo graph. The directed variant is acyclic.
    ///
    /// ```text
    ///   v0 ─4─ v1 ─10─ v3 ─11─ v5
    ///    \     |      /       /
    ///     2    5     4       8
    ///      \   |    /       /
    ///       ─ v2 ─3─ v4 ────
    /// ```
    pub fn sample(directed: bool, weighted: bool) -> Self {
        let mut graph = Graph::new(directed, weighted);
        let positions = [
            (100.0, 150.0),
            (250.0, 80.0),
            (250.0, 240.0),
            (400.0, 80.0),
            (400.0, 240.0),
            (550.0, 160.0),
        ];
        let ids: Vec<VertexId> = positions
            .iter()
            .map(|&(x, y)| graph.add_vertex(x, y))
            .collect();

        let edges = [
            (0, 1, 4),
            (0, 2, 2),
            (1, 2, 5),
            (1, 3, 10),
            (2, 4, 3),
            (4, 3, 4),
            (3, 5, 11),
            (4, 5, 8),
        ];
        for (s, t, w) in edges {
            // Endpoints were just created, so this cannot fail
            let _ = graph.add_edge(ids[s], ids[t], w);
        }
        graph
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// All vertices in insertion order
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edge records in insertion order (both records of undirected edges)
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.id == id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertex(id).is_some()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Add a vertex at the given position and return its fresh id
    pub fn add_vertex(&mut self, x: f64, y: f64) -> VertexId {
        let id = VertexId(self.next_vertex);
        self.next_vertex += 1;
        self.vertices.push(Vertex {
            id,
            x,
            y,
            label: id.to_string(),
        });
        log::trace!("added vertex {} at ({}, {})", id, x, y);
        id
    }

    /// Add an edge between two existing vertices.
    ///
    /// If the edge already exists its id is returned unchanged. Undirected
    /// graphs also receive the mirror record.
    pub fn add_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        weight: Weight,
    ) -> Result<EdgeId, StructureError> {
        self.require_vertex(source)?;
        self.require_vertex(target)?;
        if source == target {
            return Err(StructureError::SelfLoop(source));
        }

        let id = EdgeId::new(source, target);
        if self.edge(id).is_some() {
            return Ok(id);
        }

        let weight = if self.weighted { weight } else { 1 };
        self.edges.push(Edge::new(source, target, weight));
        if !self.directed && self.edge(id.reversed()).is_none() {
            self.edges.push(Edge::new(target, source, weight));
        }
        log::trace!("added edge {} with weight {}", id, weight);
        Ok(id)
    }

    /// Remove a vertex and every edge touching it
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<Vertex, StructureError> {
        let index = self
            .vertices
            .iter()
            .position(|v| v.id == id)
            .ok_or(StructureError::UnknownVertex(id))?;

        self.edges.retain(|e| !e.touches(id));
        log::trace!("removed vertex {}", id);
        Ok(self.vertices.remove(index))
    }

    /// Remove an edge (and its mirror in an undirected graph)
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<Edge, StructureError> {
        let index = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or(StructureError::UnknownEdge(id))?;

        let removed = self.edges.remove(index);
        if !self.directed {
            let mirror = id.reversed();
            self.edges.retain(|e| e.id != mirror);
        }
        log::trace!("removed edge {}", id);
        Ok(removed)
    }

    /// Change an edge's weight, keeping an undirected mirror in sync
    pub fn set_edge_weight(&mut self, id: EdgeId, weight: Weight) -> Result<(), StructureError> {
        if self.edge(id).is_none() {
            return Err(StructureError::UnknownEdge(id));
        }
        let weight = if self.weighted { weight } else { 1 };
        let mirror = id.reversed();
        let directed = self.directed;
        for edge in &mut self.edges {
            if edge.id == id || (!directed && edge.id == mirror) {
                edge.weight = weight;
            }
        }
        Ok(())
    }

    /// Move a vertex to a new canvas position
    pub fn move_vertex(&mut self, id: VertexId, x: f64, y: f64) -> Result<(), StructureError> {
        let vertex = self
            .vertices
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(StructureError::UnknownVertex(id))?;
        vertex.x = x;
        vertex.y = y;
        Ok(())
    }

    /// Edge records leaving `id`, in insertion order
    pub fn out_edges(&self, id: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.source == id)
    }

    /// Edge records with `id` at either end
    pub fn incident_edges(&self, id: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.touches(id))
    }

    /// Targets of the edges leaving `id`
    pub fn neighbors(&self, id: VertexId) -> Vec<VertexId> {
        self.out_edges(id).map(|e| e.target).collect()
    }

    /// The edge record from `source` to `target`, if any
    pub fn edge_between(&self, source: VertexId, target: VertexId) -> Option<&Edge> {
        self.edge(EdgeId::new(source, target))
    }

    /// The vertex closest to `(x, y)` strictly within `threshold`
    pub fn nearest_vertex(&self, x: f64, y: f64, threshold: f64) -> Option<&Vertex> {
        let mut nearest = None;
        let mut best = threshold;
        for vertex in &self.vertices {
            let dist = ((vertex.x - x).powi(2) + (vertex.y - y).powi(2)).sqrt();
            if dist < best {
                best = dist;
                nearest = Some(vertex);
            }
        }
        nearest
    }

    fn require_vertex(&self, id: VertexId) -> Result<(), StructureError> {
        if self.contains_vertex(id) {
            Ok(())
        } else {
            Err(StructureError::UnknownVertex(id))
        }
    }
}
