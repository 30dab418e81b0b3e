//! Binary tree traversal step generators
//!
//! The three depth-first orders share one driver working off an explicit
//! task stack. A node is expanded into its three parts (left subtree,
//! the visit itself, right subtree) in the order the traversal wants;
//! the parts are pushed in reverse so they pop in order.
//!
//! ```text
//! order        parts                   parent status while descending
//! in-order     left, visit, right      active
//! pre-order    visit, left, right      visited
//! post-order   left, right, visit      active
//! ```
//!
//! Level order uses a FIFO queue and snapshots it with every step.

use super::step::{Outcome, StepTrace, TreeStep};
use crate::model::{NodeId, NodeStatus, Tree, TreeNode};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeAlgorithm {
    InOrder,
    PreOrder,
    PostOrder,
    LevelOrder,
}

impl TreeAlgorithm {
    pub const ALL: [TreeAlgorithm; 4] = [
        TreeAlgorithm::InOrder,
        TreeAlgorithm::PreOrder,
        TreeAlgorithm::PostOrder,
        TreeAlgorithm::LevelOrder,
    ];

    /// Short name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            TreeAlgorithm::InOrder => "inorder",
            TreeAlgorithm::PreOrder => "preorder",
            TreeAlgorithm::PostOrder => "postorder",
            TreeAlgorithm::LevelOrder => "levelorder",
        }
    }

    /// Name used in narration, e.g. `in-order`
    pub fn label(self) -> &'static str {
        match self {
            TreeAlgorithm::InOrder => "in-order",
            TreeAlgorithm::PreOrder => "pre-order",
            TreeAlgorithm::PostOrder => "post-order",
            TreeAlgorithm::LevelOrder => "level-order",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            TreeAlgorithm::InOrder => "In-order Traversal",
            TreeAlgorithm::PreOrder => "Pre-order Traversal",
            TreeAlgorithm::PostOrder => "Post-order Traversal",
            TreeAlgorithm::LevelOrder => "Level-order Traversal",
        }
    }

    pub fn run(self, tree: &Tree) -> StepTrace<TreeStep> {
        match self {
            TreeAlgorithm::InOrder => run_in_order(tree),
            TreeAlgorithm::PreOrder => run_pre_order(tree),
            TreeAlgorithm::PostOrder => run_post_order(tree),
            TreeAlgorithm::LevelOrder => run_level_order(tree),
        }
    }
}

impl fmt::Display for TreeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TreeAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inorder" | "in-order" => Ok(TreeAlgorithm::InOrder),
            "preorder" | "pre-order" => Ok(TreeAlgorithm::PreOrder),
            "postorder" | "post-order" => Ok(TreeAlgorithm::PostOrder),
            "levelorder" | "level-order" | "bfs" => Ok(TreeAlgorithm::LevelOrder),
            _ => Err(s.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Part {
    Left,
    Visit,
    Right,
}

enum Task<'a> {
    Expand(&'a TreeNode),
    Visit(&'a TreeNode),
    Descend {
        parent: &'a TreeNode,
        child: &'a TreeNode,
        side: &'static str,
    },
}

pub fn run_in_order(tree: &Tree) -> StepTrace<TreeStep> {
    depth_first(
        tree,
        TreeAlgorithm::InOrder,
        [Part::Left, Part::Visit, Part::Right],
        NodeStatus::Active,
    )
}

pub fn run_pre_order(tree: &Tree) -> StepTrace<TreeStep> {
    depth_first(
        tree,
        TreeAlgorithm::PreOrder,
        [Part::Visit, Part::Left, Part::Right],
        NodeStatus::Visited,
    )
}

pub fn run_post_order(tree: &Tree) -> StepTrace<TreeStep> {
    depth_first(
        tree,
        TreeAlgorithm::PostOrder,
        [Part::Left, Part::Right, Part::Visit],
        NodeStatus::Active,
    )
}

fn depth_first(
    tree: &Tree,
    algorithm: TreeAlgorithm,
    parts: [Part; 3],
    parent_status: NodeStatus,
) -> StepTrace<TreeStep> {
    let Some(root) = tree.root() else {
        return empty_tree(algorithm);
    };

    let mut values = Vec::new();
    let mut visited: Vec<NodeId> = Vec::new();
    let mut steps = vec![TreeStep::new(
        format!("Starting {} traversal", algorithm.label()),
        &values,
    )];

    let mut tasks = vec![Task::Expand(root)];
    while let Some(task) = tasks.pop() {
        match task {
            Task::Expand(node) => {
                for part in parts.iter().rev() {
                    match part {
                        Part::Left => {
                            if let Some(child) = node.left.as_deref() {
                                tasks.push(Task::Descend {
                                    parent: node,
                                    child,
                                    side: "left",
                                });
                            }
                        }
                        Part::Right => {
                            if let Some(child) = node.right.as_deref() {
                                tasks.push(Task::Descend {
                                    parent: node,
                                    child,
                                    side: "right",
                                });
                            }
                        }
                        Part::Visit => tasks.push(Task::Visit(node)),
                    }
                }
            }
            Task::Visit(node) => {
                values.push(node.value);
                visited.push(node.id);
                steps.push(
                    TreeStep::new(format!("Visiting node {}", node.value), &values)
                        .node(node.id, NodeStatus::Active),
                );
            }
            Task::Descend {
                parent,
                child,
                side,
            } => {
                steps.push(
                    TreeStep::new(
                        format!("Moving to {} child of {}", side, parent.value),
                        &values,
                    )
                    .node(parent.id, parent_status)
                    .node(child.id, NodeStatus::Active),
                );
                tasks.push(Task::Expand(child));
            }
        }
    }

    steps.push(completed(algorithm, &values, &visited));
    StepTrace::finish(algorithm.name(), steps, Outcome::Completed)
}

/// Breadth-first traversal, one level at a time
pub fn run_level_order(tree: &Tree) -> StepTrace<TreeStep> {
    let algorithm = TreeAlgorithm::LevelOrder;
    let Some(root) = tree.root() else {
        return empty_tree(algorithm);
    };

    let mut values = Vec::new();
    let mut visited: Vec<NodeId> = Vec::new();
    let mut queue: VecDeque<&TreeNode> = VecDeque::new();
    queue.push_back(root);

    let mut steps = vec![TreeStep::new("Starting level-order traversal", &values)
        .with_queue(queue.iter().map(|n| n.id))];

    while let Some(node) = queue.pop_front() {
        values.push(node.value);
        visited.push(node.id);
        steps.push(
            TreeStep::new(format!("Visiting node {}", node.value), &values)
                .node(node.id, NodeStatus::Active)
                .with_queue(queue.iter().map(|n| n.id)),
        );

        for (side, child) in [("left", &node.left), ("right", &node.right)] {
            let Some(child) = child.as_deref() else {
                continue;
            };
            queue.push_back(child);
            steps.push(
                TreeStep::new(
                    format!("Adding {} child {} to queue", side, child.value),
                    &values,
                )
                .node(node.id, NodeStatus::Visited)
                .node(child.id, NodeStatus::Active)
                .with_queue(queue.iter().map(|n| n.id)),
            );
        }
    }

    steps.push(completed(algorithm, &values, &visited).with_queue(Vec::new()));
    StepTrace::finish(algorithm.name(), steps, Outcome::Completed)
}

fn empty_tree(algorithm: TreeAlgorithm) -> StepTrace<TreeStep> {
    StepTrace::refused(
        algorithm.name(),
        TreeStep::new("Tree is empty", &[]),
        Outcome::EmptyInput,
    )
}

fn completed(algorithm: TreeAlgorithm, values: &[i64], visited: &[NodeId]) -> TreeStep {
    let label = algorithm.label();
    let mut capitalized = label[..1].to_ascii_uppercase();
    capitalized.push_str(&label[1..]);

    let mut step = TreeStep::new(
        format!("{} traversal completed: {:?}", capitalized, values),
        values,
    );
    for &id in visited {
        step = step.node(id, NodeStatus::Visited);
    }
    step
}
