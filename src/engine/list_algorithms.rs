//! Linked list step generators
//!
//! Lists may contain cycles, so every walk that follows `next` pointers
//! remembers the nodes it has already been to and stops on a repeat.
//! Only cycle detection itself relies on the two-pointer technique.
//!
//! Nothing here mutates the list: reversal narrates the pointer flips it
//! would make and reports the resulting head.

use super::step::{ListStep, Outcome, StepTrace};
use crate::model::{LinkedList, ListNodeId, NodeStatus};
use rustc_hash::FxHashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListAlgorithm {
    Traverse,
    Reverse,
    DetectCycle,
    Search(i64),
}

impl ListAlgorithm {
    /// Short name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            ListAlgorithm::Traverse => "traverse",
            ListAlgorithm::Reverse => "reverse",
            ListAlgorithm::DetectCycle => "detect-cycle",
            ListAlgorithm::Search(_) => "search",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ListAlgorithm::Traverse => "List Traversal",
            ListAlgorithm::Reverse => "List Reversal",
            ListAlgorithm::DetectCycle => "Cycle Detection",
            ListAlgorithm::Search(_) => "Linear Search",
        }
    }

    /// Parse a name, using `target` for a search
    pub fn from_name(name: &str, target: i64) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "traverse" | "traversal" => Some(ListAlgorithm::Traverse),
            "reverse" => Some(ListAlgorithm::Reverse),
            "detect-cycle" | "cycle" => Some(ListAlgorithm::DetectCycle),
            "search" => Some(ListAlgorithm::Search(target)),
            _ => None,
        }
    }

    pub fn run(self, list: &LinkedList) -> StepTrace<ListStep> {
        match self {
            ListAlgorithm::Traverse => run_traversal(list),
            ListAlgorithm::Reverse => run_reverse(list),
            ListAlgorithm::DetectCycle => run_detect_cycle(list),
            ListAlgorithm::Search(target) => run_search(list, target),
        }
    }
}

impl fmt::Display for ListAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListAlgorithm::Search(target) => write!(f, "search {}", target),
            other => f.write_str(other.name()),
        }
    }
}

/// Walk from head to tail, accumulating values
pub fn run_traversal(list: &LinkedList) -> StepTrace<ListStep> {
    let Some(head) = list.head() else {
        return empty_list("traverse");
    };

    let mut steps = vec![ListStep::new("Starting list traversal").pointer(Some(head))];
    let mut values = Vec::new();
    let mut seen = FxHashSet::default();
    let mut current = Some(head);

    while let Some(id) = current {
        let Some(node) = list.node(id) else { break };
        seen.insert(id);
        values.push(node.value);
        steps.push(
            ListStep::new(format!("Visiting node {} with value {}", id, node.value))
                .node(id, NodeStatus::Active)
                .pointer(Some(id))
                .with_values(&values),
        );

        match node.next {
            Some(next) if seen.contains(&next) => {
                steps.push(
                    ListStep::new(format!(
                        "Node {} was already visited, the list contains a cycle",
                        next
                    ))
                    .node(next, NodeStatus::End)
                    .pointer(Some(next))
                    .with_values(&values),
                );
                let last = visited_step("Traversal stopped", &seen, &values);
                steps.push(last);
                return StepTrace::finish("traverse", steps, Outcome::CycleDetected);
            }
            Some(next) => {
                steps.push(
                    ListStep::new("Moving to next node")
                        .node(id, NodeStatus::Visited)
                        .pointer(Some(next))
                        .with_values(&values),
                );
            }
            None => {}
        }
        current = node.next;
    }

    steps.push(visited_step("Traversal complete", &seen, &values));
    StepTrace::finish("traverse", steps, Outcome::Completed)
}

/// Narrate an in-place reversal without touching the list
pub fn run_reverse(list: &LinkedList) -> StepTrace<ListStep> {
    let Some(head) = list.head() else {
        return empty_list("reverse");
    };

    let mut steps = vec![ListStep::new("Starting list reversal").pointer(Some(head))];
    let mut reversed: Vec<i64> = Vec::new();
    let mut seen = FxHashSet::default();
    let mut prev: Option<ListNodeId> = None;
    let mut current = Some(head);
    let mut outcome = Outcome::Completed;

    while let Some(id) = current {
        let Some(node) = list.node(id) else { break };
        seen.insert(id);
        let next = node.next;

        let mut step = ListStep::new(format!(
            "Current: {}, Previous: {}, Next: {}",
            id,
            or_null(prev),
            or_null(next)
        ))
        .node(id, NodeStatus::Active)
        .pointer(Some(id))
        .with_values(&reversed);
        if let Some(prev) = prev {
            step = step.node(prev, NodeStatus::Visited);
        }
        steps.push(step);

        reversed.insert(0, node.value);
        let mut step = ListStep::new(format!(
            "Reversing pointer: {} now points to {}",
            id,
            or_null(prev)
        ))
        .node(id, NodeStatus::Path)
        .pointer(Some(id))
        .with_values(&reversed);
        if let Some(prev) = prev {
            step = step.node(prev, NodeStatus::Path);
        }
        steps.push(step);

        prev = Some(id);
        current = next;
        if let Some(next) = next.filter(|n| seen.contains(n)) {
            steps.push(
                ListStep::new(format!(
                    "Node {} was already reversed, the list contains a cycle",
                    next
                ))
                .node(next, NodeStatus::End)
                .pointer(Some(next))
                .with_values(&reversed),
            );
            outcome = Outcome::CycleDetected;
            break;
        }
    }

    let mut last = ListStep::new(format!("Reversal complete, new head is {}", or_null(prev)))
        .pointer(prev)
        .with_values(&reversed);
    for &id in &seen {
        last = last.node(id, NodeStatus::Path);
    }
    steps.push(last);
    StepTrace::finish("reverse", steps, outcome)
}

/// Floyd's tortoise and hare
pub fn run_detect_cycle(list: &LinkedList) -> StepTrace<ListStep> {
    let Some(head) = list.head() else {
        return empty_list("detect-cycle");
    };

    let mut steps = vec![ListStep::new(
        "Starting cycle detection using Floyd's Tortoise and Hare algorithm",
    )
    .pointer(Some(head))];

    let mut slow = head;
    let mut fast = head;
    loop {
        let hare_status = if slow == fast {
            NodeStatus::Active
        } else {
            NodeStatus::End
        };
        steps.push(
            ListStep::new(format!("Tortoise at {}, Hare at {}", slow, fast))
                .node(fast, hare_status)
                .node(slow, NodeStatus::Active)
                .pointer(Some(slow)),
        );

        let next_slow = list.node(slow).and_then(|n| n.next);
        let next_fast = list
            .node(fast)
            .and_then(|n| n.next)
            .and_then(|id| list.node(id))
            .and_then(|n| n.next);

        let (Some(next_slow), Some(next_fast)) = (next_slow, next_fast) else {
            steps.push(ListStep::new("Hare reached the end, no cycle found"));
            break;
        };
        slow = next_slow;
        fast = next_fast;

        if slow == fast {
            steps.push(
                ListStep::new(format!(
                    "Cycle detected! Tortoise and Hare meet at {}",
                    slow
                ))
                .node(slow, NodeStatus::End)
                .pointer(Some(slow)),
            );
            return StepTrace::finish("detect-cycle", steps, Outcome::CycleDetected);
        }
    }

    steps.push(ListStep::new("No cycle found in the list"));
    StepTrace::finish("detect-cycle", steps, Outcome::NoCycle)
}

/// Linear search for `target` from head
pub fn run_search(list: &LinkedList, target: i64) -> StepTrace<ListStep> {
    let Some(head) = list.head() else {
        return empty_list("search");
    };

    let mut steps =
        vec![ListStep::new(format!("Starting search for value {}", target)).pointer(Some(head))];
    let mut seen = FxHashSet::default();
    let mut current = Some(head);

    while let Some(id) = current {
        let Some(node) = list.node(id) else { break };
        seen.insert(id);
        steps.push(
            ListStep::new(format!("Checking node {} with value {}", id, node.value))
                .node(id, NodeStatus::Active)
                .pointer(Some(id)),
        );

        if node.value == target {
            steps.push(
                ListStep::new(format!("Found value {} at node {}!", target, id))
                    .node(id, NodeStatus::Path)
                    .pointer(Some(id))
                    .with_values(&[node.value]),
            );
            return StepTrace::finish("search", steps, Outcome::Found);
        }

        steps.push(
            ListStep::new(format!(
                "Value {} not found at this node, moving to next",
                target
            ))
            .node(id, NodeStatus::Visited)
            .pointer(node.next),
        );

        if let Some(next) = node.next.filter(|n| seen.contains(n)) {
            steps.push(
                ListStep::new(format!(
                    "Node {} was already visited, the list contains a cycle",
                    next
                ))
                .node(next, NodeStatus::End)
                .pointer(Some(next)),
            );
            let mut last = ListStep::new(format!("Value {} not found in the list", target));
            for &id in &seen {
                last = last.node(id, NodeStatus::Visited);
            }
            steps.push(last);
            return StepTrace::finish("search", steps, Outcome::NotFound);
        }
        current = node.next;
    }

    steps.push(ListStep::new(format!("Value {} not found in the list", target)));
    StepTrace::finish("search", steps, Outcome::NotFound)
}

fn empty_list(algorithm: &str) -> StepTrace<ListStep> {
    StepTrace::refused(algorithm, ListStep::new("List is empty"), Outcome::EmptyInput)
}

fn visited_step(description: &str, seen: &FxHashSet<ListNodeId>, values: &[i64]) -> ListStep {
    let mut step = ListStep::new(description).with_values(values);
    for &id in seen {
        step = step.node(id, NodeStatus::Visited);
    }
    step
}

fn or_null(id: Option<ListNodeId>) -> String {
    id.map_or_else(|| "null".to_string(), |id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ListKind;

    #[test]
    fn test_traversal_narration() {
        let list = LinkedList::from_values(ListKind::Singly, &[10, 20]);
        let trace = run_traversal(&list);
        assert_eq!(
            trace.descriptions(),
            vec![
                "Starting list traversal",
                "Visiting node node1 with value 10",
                "Moving to next node",
                "Visiting node node2 with value 20",
                "Traversal complete",
            ]
        );
        assert_eq!(trace.last().unwrap().values, vec![10, 20]);
    }

    #[test]
    fn test_traversal_stops_on_cycle() {
        let mut list = LinkedList::sample(ListKind::Singly);
        list.link(ListNodeId(4), ListNodeId(2)).unwrap();
        let trace = run_traversal(&list);
        assert_eq!(trace.outcome(), Outcome::CycleDetected);
        assert_eq!(trace.last().unwrap().values, vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_reverse_reports_new_head() {
        let list = LinkedList::sample(ListKind::Doubly);
        let trace = run_reverse(&list);
        let last = trace.last().unwrap();
        assert_eq!(last.description, "Reversal complete, new head is node4");
        assert_eq!(last.current_pointer, Some(ListNodeId(4)));
        assert_eq!(last.values, vec![40, 30, 20, 10]);
        assert_eq!(
            trace.steps()[1].description,
            "Current: node1, Previous: null, Next: node2"
        );
        assert_eq!(
            trace.steps()[2].description,
            "Reversing pointer: node1 now points to null"
        );
        // The list itself is untouched
        assert_eq!(list.head(), Some(ListNodeId(1)));
        assert_eq!(list.values(), vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_detect_cycle() {
        let mut list = LinkedList::sample(ListKind::Singly);
        let trace = run_detect_cycle(&list);
        assert_eq!(trace.outcome(), Outcome::NoCycle);
        assert_eq!(
            trace.last().unwrap().description,
            "No cycle found in the list"
        );

        list.link(ListNodeId(4), ListNodeId(2)).unwrap();
        let trace = run_detect_cycle(&list);
        assert_eq!(trace.outcome(), Outcome::CycleDetected);
        assert!(trace
            .last()
            .unwrap()
            .description
            .starts_with("Cycle detected! Tortoise and Hare meet at"));
    }

    #[test]
    fn test_search() {
        let list = LinkedList::sample(ListKind::Singly);
        let trace = run_search(&list, 30);
        assert_eq!(trace.outcome(), Outcome::Found);
        assert_eq!(
            trace.last().unwrap().description,
            "Found value 30 at node node3!"
        );

        let trace = run_search(&list, 99);
        assert_eq!(trace.outcome(), Outcome::NotFound);
        assert_eq!(
            trace.last().unwrap().description,
            "Value 99 not found in the list"
        );
    }

    #[test]
    fn test_search_reports_cycle_before_giving_up() {
        let mut list = LinkedList::sample(ListKind::Singly);
        list.link(ListNodeId(4), ListNodeId(2)).unwrap();
        let trace = run_search(&list, 99);
        let descriptions = trace.descriptions();
        assert_eq!(
            &descriptions[descriptions.len() - 3..],
            &[
                "Value 99 not found at this node, moving to next",
                "Node node2 was already visited, the list contains a cycle",
                "Value 99 not found in the list",
            ]
        );
        // Each node is checked once
        let checks = descriptions
            .iter()
            .filter(|d| d.starts_with("Checking node"))
            .count();
        assert_eq!(checks, 4);
    }

    #[test]
    fn test_empty_list_single_step() {
        let list = LinkedList::new(ListKind::Singly);
        for algorithm in [
            ListAlgorithm::Traverse,
            ListAlgorithm::Reverse,
            ListAlgorithm::DetectCycle,
            ListAlgorithm::Search(1),
        ] {
            let trace = algorithm.run(&list);
            assert_eq!(trace.outcome(), Outcome::EmptyInput);
            assert_eq!(trace.descriptions(), vec!["List is empty"]);
        }
    }
}
