//! Step history navigation
//!
//! A [`Timeline`] owns one finished [`StepTrace`] and a cursor into it, and
//! answers the only question a viewer asks: which step is showing now.
//! Moving the cursor never recomputes anything.
//!
//! The sessions pair a structure with the selected algorithm and its
//! parameters. Any change (a different algorithm, a new start vertex, an
//! edit to the structure) regenerates the whole timeline from scratch and
//! puts the cursor back on the first step.
//!
//! ```text
//! structure + algorithm + parameters
//!         │  run (eager)
//!         ▼
//!     StepTrace ──► Timeline { position } ──► current step ──► UI
//!         ▲
//!         └── regenerated on every change
//! ```

use crate::engine::{
    GraphAlgorithm, GraphStep, ListAlgorithm, ListStep, Outcome, Step, StepTrace, TreeAlgorithm,
    TreeStep,
};
use crate::errors::PlaybackError;
use crate::model::{Graph, LinkedList, Tree, VertexId};

/// Logical canvas that structure coordinates are laid out on
pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 600.0;

/// A finished trace plus the index of the step being shown
#[derive(Debug, Clone)]
pub struct Timeline<S> {
    trace: StepTrace<S>,
    position: usize,
}

impl<S> Timeline<S> {
    pub fn new(trace: StepTrace<S>) -> Self {
        Timeline { trace, position: 0 }
    }

    pub fn trace(&self) -> &StepTrace<S> {
        &self.trace
    }

    pub fn total_steps(&self) -> usize {
        self.trace.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn outcome(&self) -> Outcome {
        self.trace.outcome()
    }

    /// The step at `index`, clamped into range. `None` only when empty.
    pub fn step_at(&self, index: usize) -> Option<&S> {
        let last = self.trace.len().checked_sub(1)?;
        self.trace.get(index.min(last))
    }

    pub fn current(&self) -> Option<&S> {
        self.step_at(self.position)
    }

    /// Steps from the first up to and including the current one
    pub fn history(&self) -> &[S] {
        let steps = self.trace.steps();
        &steps[..steps.len().min(self.position + 1)]
    }

    /// Move the cursor, clamping into range
    pub fn seek(&mut self, index: usize) {
        self.position = index.min(self.trace.len().saturating_sub(1));
    }

    pub fn is_at_start(&self) -> bool {
        self.position == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.trace.len()
    }

    pub fn step_forward(&mut self) -> Result<usize, PlaybackError> {
        if self.trace.is_empty() {
            return Err(PlaybackError::EmptyHistory);
        }
        if self.is_at_end() {
            return Err(PlaybackError::AtEnd {
                total: self.trace.len(),
            });
        }
        self.position += 1;
        Ok(self.position)
    }

    pub fn step_backward(&mut self) -> Result<usize, PlaybackError> {
        if self.trace.is_empty() {
            return Err(PlaybackError::EmptyHistory);
        }
        if self.is_at_start() {
            return Err(PlaybackError::AtStart);
        }
        self.position -= 1;
        Ok(self.position)
    }

    /// Step forward up to `count` times, returning how many steps were taken
    pub fn step_forward_by(&mut self, count: usize) -> usize {
        let mut stepped = 0;
        while stepped < count && self.step_forward().is_ok() {
            stepped += 1;
        }
        stepped
    }

    pub fn rewind_to_start(&mut self) {
        self.position = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.trace.len().saturating_sub(1);
    }
}

/// Cursor operations shared by every timeline, independent of step type
pub trait Navigator {
    fn total_steps(&self) -> usize;
    fn position(&self) -> usize;
    fn outcome(&self) -> Outcome;
    fn step_forward(&mut self) -> Result<usize, PlaybackError>;
    fn step_backward(&mut self) -> Result<usize, PlaybackError>;
    fn step_forward_by(&mut self, count: usize) -> usize;
    fn rewind_to_start(&mut self);
    fn jump_to_end(&mut self);
    fn seek(&mut self, index: usize);
    /// Narration of every step up to the current one
    fn narration(&self) -> Vec<&str>;
}

impl<S: Step> Navigator for Timeline<S> {
    fn total_steps(&self) -> usize {
        Timeline::total_steps(self)
    }

    fn position(&self) -> usize {
        Timeline::position(self)
    }

    fn outcome(&self) -> Outcome {
        Timeline::outcome(self)
    }

    fn step_forward(&mut self) -> Result<usize, PlaybackError> {
        Timeline::step_forward(self)
    }

    fn step_backward(&mut self) -> Result<usize, PlaybackError> {
        Timeline::step_backward(self)
    }

    fn step_forward_by(&mut self, count: usize) -> usize {
        Timeline::step_forward_by(self, count)
    }

    fn rewind_to_start(&mut self) {
        Timeline::rewind_to_start(self)
    }

    fn jump_to_end(&mut self) {
        Timeline::jump_to_end(self)
    }

    fn seek(&mut self, index: usize) {
        Timeline::seek(self, index)
    }

    fn narration(&self) -> Vec<&str> {
        self.history().iter().map(Step::description).collect()
    }
}

/// A graph, the chosen algorithm and its endpoints
#[derive(Debug, Clone)]
pub struct GraphSession {
    graph: Graph,
    algorithm: GraphAlgorithm,
    start: Option<VertexId>,
    end: Option<VertexId>,
    timeline: Timeline<GraphStep>,
}

impl GraphSession {
    pub fn new(
        graph: Graph,
        algorithm: GraphAlgorithm,
        start: Option<VertexId>,
        end: Option<VertexId>,
    ) -> Self {
        let timeline = Timeline::new(algorithm.run(&graph, start, end));
        GraphSession {
            graph,
            algorithm,
            start,
            end,
            timeline,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn algorithm(&self) -> GraphAlgorithm {
        self.algorithm
    }

    pub fn start(&self) -> Option<VertexId> {
        self.start
    }

    pub fn end(&self) -> Option<VertexId> {
        self.end
    }

    pub fn timeline(&self) -> &Timeline<GraphStep> {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline<GraphStep> {
        &mut self.timeline
    }

    pub fn select_algorithm(&mut self, algorithm: GraphAlgorithm) {
        self.algorithm = algorithm;
        self.regenerate();
    }

    pub fn set_start(&mut self, start: Option<VertexId>) {
        self.start = start;
        self.regenerate();
    }

    pub fn set_end(&mut self, end: Option<VertexId>) {
        self.end = end;
        self.regenerate();
    }

    /// Edit the graph, then regenerate. Endpoints that no longer exist are
    /// cleared.
    pub fn mutate<T>(&mut self, edit: impl FnOnce(&mut Graph) -> T) -> T {
        let result = edit(&mut self.graph);
        if self.start.is_some_and(|v| !self.graph.contains_vertex(v)) {
            self.start = None;
        }
        if self.end.is_some_and(|v| !self.graph.contains_vertex(v)) {
            self.end = None;
        }
        self.regenerate();
        result
    }

    fn regenerate(&mut self) {
        log::debug!("regenerating {} over the graph", self.algorithm);
        self.timeline = Timeline::new(self.algorithm.run(&self.graph, self.start, self.end));
    }
}

/// A tree and the chosen traversal
#[derive(Debug, Clone)]
pub struct TreeSession {
    tree: Tree,
    algorithm: TreeAlgorithm,
    timeline: Timeline<TreeStep>,
}

impl TreeSession {
    pub fn new(mut tree: Tree, algorithm: TreeAlgorithm) -> Self {
        tree.calculate_positions(CANVAS_WIDTH, CANVAS_HEIGHT);
        let timeline = Timeline::new(algorithm.run(&tree));
        TreeSession {
            tree,
            algorithm,
            timeline,
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn algorithm(&self) -> TreeAlgorithm {
        self.algorithm
    }

    pub fn timeline(&self) -> &Timeline<TreeStep> {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline<TreeStep> {
        &mut self.timeline
    }

    pub fn select_algorithm(&mut self, algorithm: TreeAlgorithm) {
        self.algorithm = algorithm;
        self.regenerate();
    }

    /// Edit the tree, then re-lay it out and regenerate
    pub fn mutate<T>(&mut self, edit: impl FnOnce(&mut Tree) -> T) -> T {
        let result = edit(&mut self.tree);
        self.tree.calculate_positions(CANVAS_WIDTH, CANVAS_HEIGHT);
        self.regenerate();
        result
    }

    fn regenerate(&mut self) {
        log::debug!("regenerating {} over the {} tree", self.algorithm, self.tree.kind());
        self.timeline = Timeline::new(self.algorithm.run(&self.tree));
    }
}

/// A linked list and the chosen algorithm
#[derive(Debug, Clone)]
pub struct ListSession {
    list: LinkedList,
    algorithm: ListAlgorithm,
    /// Last value searched for, kept while other algorithms are selected
    search_target: i64,
    timeline: Timeline<ListStep>,
}

impl ListSession {
    pub fn new(list: LinkedList, algorithm: ListAlgorithm) -> Self {
        let timeline = Timeline::new(algorithm.run(&list));
        let search_target = match algorithm {
            ListAlgorithm::Search(target) => target,
            _ => 0,
        };
        ListSession {
            list,
            algorithm,
            search_target,
            timeline,
        }
    }

    pub fn search_target(&self) -> i64 {
        self.search_target
    }

    pub fn list(&self) -> &LinkedList {
        &self.list
    }

    pub fn algorithm(&self) -> ListAlgorithm {
        self.algorithm
    }

    pub fn timeline(&self) -> &Timeline<ListStep> {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline<ListStep> {
        &mut self.timeline
    }

    pub fn select_algorithm(&mut self, algorithm: ListAlgorithm) {
        if let ListAlgorithm::Search(target) = algorithm {
            self.search_target = target;
        }
        self.algorithm = algorithm;
        self.regenerate();
    }

    pub fn mutate<T>(&mut self, edit: impl FnOnce(&mut LinkedList) -> T) -> T {
        let result = edit(&mut self.list);
        self.regenerate();
        result
    }

    fn regenerate(&mut self) {
        log::debug!("regenerating {} over the {} list", self.algorithm, self.list.kind());
        self.timeline = Timeline::new(self.algorithm.run(&self.list));
    }
}

/// Whichever session the viewer is showing
#[derive(Debug, Clone)]
pub enum Session {
    Graph(GraphSession),
    Tree(TreeSession),
    List(ListSession),
}

impl Session {
    pub fn title(&self) -> &'static str {
        match self {
            Session::Graph(s) => s.algorithm().title(),
            Session::Tree(s) => s.algorithm().title(),
            Session::List(s) => s.algorithm().title(),
        }
    }

    pub fn navigator(&self) -> &dyn Navigator {
        match self {
            Session::Graph(s) => s.timeline(),
            Session::Tree(s) => s.timeline(),
            Session::List(s) => s.timeline(),
        }
    }

    pub fn navigator_mut(&mut self) -> &mut dyn Navigator {
        match self {
            Session::Graph(s) => s.timeline_mut(),
            Session::Tree(s) => s.timeline_mut(),
            Session::List(s) => s.timeline_mut(),
        }
    }

    /// Switch to the next algorithm for this structure, wrapping around
    pub fn cycle_algorithm(&mut self) {
        match self {
            Session::Graph(s) => s.select_algorithm(next_in(&GraphAlgorithm::ALL, s.algorithm())),
            Session::Tree(s) => s.select_algorithm(next_in(&TreeAlgorithm::ALL, s.algorithm())),
            Session::List(s) => {
                let next = match s.algorithm() {
                    ListAlgorithm::Traverse => ListAlgorithm::Reverse,
                    ListAlgorithm::Reverse => ListAlgorithm::DetectCycle,
                    ListAlgorithm::DetectCycle => ListAlgorithm::Search(s.search_target()),
                    ListAlgorithm::Search(_) => ListAlgorithm::Traverse,
                };
                s.select_algorithm(next);
            }
        }
    }
}

fn next_in<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let index = all.iter().position(|&a| a == current).unwrap_or(0);
    all[(index + 1) % all.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ListKind, TreeKind};

    fn timeline() -> Timeline<GraphStep> {
        Timeline::new(GraphAlgorithm::Bfs.run(&Graph::sample(false, true), Some(VertexId(0)), None))
    }

    #[test]
    fn test_navigation_bounds() {
        let mut timeline = timeline();
        assert_eq!(timeline.step_backward(), Err(PlaybackError::AtStart));
        assert_eq!(timeline.step_forward(), Ok(1));
        timeline.jump_to_end();
        let total = timeline.total_steps();
        assert_eq!(timeline.position(), total - 1);
        assert_eq!(timeline.step_forward(), Err(PlaybackError::AtEnd { total }));
        timeline.rewind_to_start();
        assert_eq!(timeline.position(), 0);
    }

    #[test]
    fn test_seek_and_lookup_clamp() {
        let mut timeline = timeline();
        let total = timeline.total_steps();
        timeline.seek(total + 50);
        assert_eq!(timeline.position(), total - 1);
        assert_eq!(timeline.step_at(usize::MAX), timeline.trace().last());
        assert_eq!(timeline.history().len(), total);
    }

    #[test]
    fn test_step_forward_by_stops_at_end() {
        let mut timeline = timeline();
        let total = timeline.total_steps();
        assert_eq!(timeline.step_forward_by(3), 3);
        assert_eq!(timeline.step_forward_by(usize::MAX), total - 4);
    }

    #[test]
    fn test_mutation_regenerates_and_resets() {
        let mut session = GraphSession::new(
            Graph::sample(false, true),
            GraphAlgorithm::Bfs,
            Some(VertexId(0)),
            None,
        );
        session.timeline_mut().jump_to_end();
        let before = session.timeline().total_steps();
        let removed = session.mutate(|g| g.remove_vertex(VertexId(5)));
        assert!(removed.is_ok());
        assert_eq!(session.timeline().position(), 0);
        assert!(session.timeline().total_steps() < before);
    }

    #[test]
    fn test_removing_start_clears_it() {
        let mut session = GraphSession::new(
            Graph::sample(false, true),
            GraphAlgorithm::Dfs,
            Some(VertexId(0)),
            None,
        );
        let _ = session.mutate(|g| g.remove_vertex(VertexId(0)));
        assert_eq!(session.start(), None);
        assert_eq!(session.timeline().outcome(), Outcome::UnknownStart);
    }

    #[test]
    fn test_session_cycles_algorithms() {
        let mut session = Session::Tree(TreeSession::new(
            Tree::sample(TreeKind::Bst),
            TreeAlgorithm::LevelOrder,
        ));
        session.cycle_algorithm();
        assert_eq!(session.title(), "In-order Traversal");

        let mut session = Session::List(ListSession::new(
            LinkedList::sample(ListKind::Singly),
            ListAlgorithm::Search(30),
        ));
        for _ in 0..4 {
            session.cycle_algorithm();
        }
        match session {
            Session::List(s) => assert_eq!(s.algorithm(), ListAlgorithm::Search(30)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_navigator_narration() {
        let mut session = Session::List(ListSession::new(
            LinkedList::sample(ListKind::Singly),
            ListAlgorithm::Traverse,
        ));
        session.navigator_mut().step_forward_by(2);
        assert_eq!(
            session.navigator().narration(),
            vec![
                "Starting list traversal",
                "Visiting node node1 with value 10",
                "Moving to next node",
            ]
        );
    }
}
