//! Visualization status tags

use std::fmt;

/// Status of a vertex, tree node or list node within one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeStatus {
    #[default]
    Default,
    Active,
    Visited,
    Path,
    Start,
    End,
}

/// Status of an edge within one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeStatus {
    #[default]
    Default,
    Active,
    Visited,
    Path,
    Discarded,
}

impl NodeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeStatus::Default => "default",
            NodeStatus::Active => "active",
            NodeStatus::Visited => "visited",
            NodeStatus::Path => "path",
            NodeStatus::Start => "start",
            NodeStatus::End => "end",
        }
    }
}

impl EdgeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeStatus::Default => "default",
            EdgeStatus::Active => "active",
            EdgeStatus::Visited => "visited",
            EdgeStatus::Path => "path",
            EdgeStatus::Discarded => "discarded",
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EdgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
