use algotty::engine::{
    run_bfs, run_detect_cycle, run_dijkstra, run_kruskal, run_prim, run_reverse,
    run_topological_sort, GraphStep, Outcome,
};
use algotty::model::{
    EdgeId, EdgeStatus, Graph, LinkedList, ListKind, ListNodeId, NodeColor, Tree, TreeKind, TreeNode,
    VertexId, Weight,
};
use proptest::prelude::*;
use std::collections::{HashMap, VecDeque};

/// A connected graph: a weighted path through every vertex plus extra edges
fn connected_graph(
    directed: bool,
    n: usize,
    path: &[Weight],
    extra: &[(u32, u32, Weight)],
) -> Graph {
    let mut graph = Graph::new(directed, true);
    let ids: Vec<VertexId> = (0..n).map(|i| graph.add_vertex(i as f64, 0.0)).collect();
    for i in 1..n {
        graph.add_edge(ids[i - 1], ids[i], path[i - 1]).unwrap();
    }
    add_extra(&mut graph, &ids, extra);
    graph
}

fn add_extra(graph: &mut Graph, ids: &[VertexId], extra: &[(u32, u32, Weight)]) {
    for &(s, t, w) in extra {
        let (s, t) = (s as usize % ids.len(), t as usize % ids.len());
        if s != t {
            graph.add_edge(ids[s], ids[t], w).unwrap();
        }
    }
}

fn bellman_ford(graph: &Graph, start: VertexId) -> HashMap<VertexId, u64> {
    let mut dist = HashMap::new();
    dist.insert(start, 0u64);
    for _ in 0..graph.vertex_count() {
        for edge in graph.edges() {
            if let Some(&d) = dist.get(&edge.source) {
                let candidate = d + u64::from(edge.weight);
                if dist.get(&edge.target).map_or(true, |&known| candidate < known) {
                    dist.insert(edge.target, candidate);
                }
            }
        }
    }
    dist
}

fn mst_weight(graph: &Graph, step: &GraphStep) -> (usize, u64) {
    let mut count = 0;
    let mut total = 0;
    for (&id, &status) in &step.edges {
        if status == EdgeStatus::Path {
            count += 1;
            total += u64::from(graph.edge(id).unwrap().weight);
        }
    }
    (count, total)
}

fn avl_height(node: Option<&TreeNode>) -> u32 {
    let Some(node) = node else { return 0 };
    let left = avl_height(node.left.as_deref());
    let right = avl_height(node.right.as_deref());
    assert!(left.abs_diff(right) <= 1);
    1 + left.max(right)
}

fn black_height(node: Option<&TreeNode>) -> usize {
    let Some(node) = node else { return 1 };
    let red = |n: Option<&TreeNode>| n.and_then(TreeNode::color) == Some(NodeColor::Red);
    assert!(!(red(Some(node)) && red(node.left.as_deref())));
    assert!(!red(node.right.as_deref()));
    let left = black_height(node.left.as_deref());
    assert_eq!(left, black_height(node.right.as_deref()));
    left + usize::from(!red(Some(node)))
}

proptest! {
    #[test]
    fn proptest_dijkstra_matches_bellman_ford(
        directed in any::<bool>(),
        n in 1..9usize,
        extra in prop::collection::vec((0..9u32, 0..9u32, 1..30u32), 0..25),
    ) {
        let mut graph = Graph::new(directed, true);
        let ids: Vec<VertexId> = (0..n).map(|i| graph.add_vertex(i as f64, 0.0)).collect();
        add_extra(&mut graph, &ids, &extra);

        let expected = bellman_ford(&graph, ids[0]);
        let trace = run_dijkstra(&graph, ids[0], None);
        prop_assert_eq!(trace.outcome(), Outcome::Completed);
        let distances = trace.last().unwrap().distances.clone().unwrap();
        prop_assert_eq!(distances.len(), expected.len());
        for (vertex, distance) in distances {
            prop_assert_eq!(Some(&distance), expected.get(&vertex));
        }
    }

    #[test]
    fn proptest_dijkstra_path_matches_bellman_ford(
        directed in any::<bool>(),
        n in 1..9usize,
        end in 0..9usize,
        extra in prop::collection::vec((0..9u32, 0..9u32, 1..30u32), 0..25),
    ) {
        let mut graph = Graph::new(directed, true);
        let ids: Vec<VertexId> = (0..n).map(|i| graph.add_vertex(i as f64, 0.0)).collect();
        add_extra(&mut graph, &ids, &extra);
        let end = ids[end % n];

        let expected = bellman_ford(&graph, ids[0]);
        let trace = run_dijkstra(&graph, ids[0], Some(end));
        let last = trace.last().unwrap();
        match expected.get(&end) {
            None => prop_assert_eq!(trace.outcome(), Outcome::Unreachable),
            Some(&distance) => {
                prop_assert_eq!(trace.outcome(), Outcome::Completed);
                let order = last.order.clone().unwrap();
                prop_assert_eq!(order.first(), Some(&ids[0]));
                prop_assert_eq!(order.last(), Some(&end));
                let walked: u64 = order
                    .windows(2)
                    .map(|pair| u64::from(graph.edge(EdgeId::new(pair[0], pair[1])).unwrap().weight))
                    .sum();
                prop_assert_eq!(walked, distance);
                let suffix = format!("with total distance {}", distance);
                prop_assert!(last.description.ends_with(&suffix));
            }
        }
    }

    #[test]
    fn proptest_prim_and_kruskal_agree(
        n in 2..9usize,
        path in prop::collection::vec(1..30u32, 8),
        extra in prop::collection::vec((0..9u32, 0..9u32, 1..30u32), 0..25),
    ) {
        let graph = connected_graph(false, n, &path, &extra);
        let prim = run_prim(&graph, VertexId(0));
        let kruskal = run_kruskal(&graph);
        prop_assert_eq!(prim.outcome(), Outcome::Completed);
        prop_assert_eq!(kruskal.outcome(), Outcome::Completed);

        let (prim_edges, prim_total) = mst_weight(&graph, prim.last().unwrap());
        let (kruskal_edges, kruskal_total) = mst_weight(&graph, kruskal.last().unwrap());
        prop_assert_eq!(prim_edges, n - 1);
        prop_assert_eq!(kruskal_edges, n - 1);
        prop_assert_eq!(prim_total, kruskal_total);
    }

    #[test]
    fn proptest_bfs_discovers_by_layer(
        n in 2..10usize,
        path in prop::collection::vec(1..2u32, 9),
        extra in prop::collection::vec((0..10u32, 0..10u32, 1..2u32), 0..20),
    ) {
        let graph = connected_graph(false, n, &path, &extra);
        let mut hops = HashMap::new();
        let mut queue = VecDeque::from([VertexId(0)]);
        hops.insert(VertexId(0), 0usize);
        while let Some(u) = queue.pop_front() {
            for v in graph.neighbors(u) {
                if !hops.contains_key(&v) {
                    hops.insert(v, hops[&u] + 1);
                    queue.push_back(v);
                }
            }
        }

        let trace = run_bfs(&graph, VertexId(0));
        let discovered: Vec<VertexId> = trace
            .iter()
            .filter(|s| s.description.starts_with("Added vertex"))
            .filter_map(|s| s.queue.as_ref().and_then(|q| q.last().copied()))
            .collect();
        prop_assert_eq!(discovered.len(), n - 1);
        for pair in discovered.windows(2) {
            prop_assert!(hops[&pair[0]] <= hops[&pair[1]]);
        }
    }

    #[test]
    fn proptest_topological_order_respects_edges(
        n in 1..10usize,
        extra in prop::collection::vec((0..10u32, 0..10u32), 0..30),
    ) {
        let mut graph = Graph::new(true, false);
        let ids: Vec<VertexId> = (0..n).map(|i| graph.add_vertex(i as f64, 0.0)).collect();
        for (a, b) in extra {
            let (a, b) = (a as usize % n, b as usize % n);
            // Lower index to higher keeps the graph acyclic
            if a < b {
                graph.add_edge(ids[a], ids[b], 1).unwrap();
            }
        }

        let trace = run_topological_sort(&graph);
        prop_assert_eq!(trace.outcome(), Outcome::Completed);
        let order = trace.last().unwrap().order.clone().unwrap();
        prop_assert_eq!(order.len(), n);
        let position: HashMap<VertexId, usize> =
            order.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        for edge in graph.edges() {
            prop_assert!(position[&edge.source] < position[&edge.target]);
        }
    }

    #[test]
    fn proptest_avl_stays_balanced(
        inserts in prop::collection::vec(-100..100i64, 1..80),
        deletes in prop::collection::vec(-100..100i64, 0..40),
    ) {
        let mut tree = Tree::new(TreeKind::Avl);
        for value in &inserts {
            tree.insert(*value);
        }
        avl_height(tree.root());
        for value in &deletes {
            tree.delete(*value);
            avl_height(tree.root());
        }

        let values = tree.values_in_order();
        prop_assert!(values.windows(2).all(|w| w[0] < w[1]));
        for value in &deletes {
            prop_assert!(!tree.contains(*value));
        }
    }

    #[test]
    fn proptest_red_black_invariants(
        inserts in prop::collection::vec(-100..100i64, 1..80),
        deletes in prop::collection::vec(-100..100i64, 0..40),
    ) {
        let mut tree = Tree::new(TreeKind::RedBlack);
        for value in &inserts {
            tree.insert(*value);
            prop_assert_eq!(tree.root().and_then(TreeNode::color), Some(NodeColor::Black));
        }
        black_height(tree.root());
        for value in &deletes {
            tree.delete(*value);
            black_height(tree.root());
        }

        let mut expected: Vec<i64> = inserts.clone();
        expected.sort_unstable();
        expected.dedup();
        expected.retain(|v| !deletes.contains(v));
        prop_assert_eq!(tree.values_in_order(), expected);
    }

    #[test]
    fn proptest_reverse_yields_reversed_values(
        values in prop::collection::vec(0..100i64, 1..20),
        doubly in any::<bool>(),
    ) {
        let kind = if doubly { ListKind::Doubly } else { ListKind::Singly };
        let list = LinkedList::from_values(kind, &values);
        let trace = run_reverse(&list);

        let mut reversed = values.clone();
        reversed.reverse();
        prop_assert_eq!(&trace.last().unwrap().values, &reversed);
        prop_assert_eq!(list.values(), values);
    }

    #[test]
    fn proptest_floyd_agrees_with_walk(
        values in prop::collection::vec(0..100i64, 1..20),
        cycle_to in prop::option::of(0..20u32),
    ) {
        let mut list = LinkedList::from_values(ListKind::Singly, &values);
        if let Some(target) = cycle_to {
            let target = ListNodeId(1 + target % values.len() as u32);
            let tail = list.tail().unwrap();
            list.link(tail, target).unwrap();
        }

        let expected = if list.has_cycle() { Outcome::CycleDetected } else { Outcome::NoCycle };
        prop_assert_eq!(run_detect_cycle(&list).outcome(), expected);
        prop_assert_eq!(list.has_cycle(), cycle_to.is_some());
    }
}
