//! Error types
//!
//! The step engine itself never fails: invalid preconditions become a
//! one-step trace with an explanatory description (see
//! [`Outcome`](crate::engine::step::Outcome)). Errors only arise at the
//! edges of the system:
//!
//! - [`StructureError`]: a mutator was handed an id or input it cannot use
//! - [`PlaybackError`]: the timeline cursor cannot move any further
//! - [`ConfigError`]: the command line could not be understood

use crate::model::{EdgeId, ListNodeId, VertexId};
use std::fmt;

/// Errors raised by structure builders and mutators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// No vertex with this id exists
    UnknownVertex(VertexId),

    /// No edge with this id exists
    UnknownEdge(EdgeId),

    /// Edges from a vertex to itself are not representable
    SelfLoop(VertexId),

    /// No list node with this id exists
    UnknownListNode(ListNodeId),

    /// A level-order tree definition contained something other than an
    /// integer or `null`
    InvalidLevelOrder { token: String, position: usize },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureError::UnknownVertex(id) => write!(f, "Unknown vertex '{}'", id),
            StructureError::UnknownEdge(id) => write!(f, "Unknown edge '{}'", id),
            StructureError::SelfLoop(id) => {
                write!(f, "Self-loop on vertex '{}' is not supported", id)
            }
            StructureError::UnknownListNode(id) => write!(f, "Unknown list node '{}'", id),
            StructureError::InvalidLevelOrder { token, position } => {
                write!(
                    f,
                    "Invalid tree value '{}' at position {} (expected an integer or null)",
                    token, position
                )
            }
        }
    }
}

impl std::error::Error for StructureError {}

/// Errors raised when moving through a recorded step history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The history holds no steps at all
    EmptyHistory,

    /// Already at the first step
    AtStart,

    /// Already at the last step
    AtEnd { total: usize },
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::EmptyHistory => write!(f, "No steps available"),
            PlaybackError::AtStart => write!(f, "Already at the first step"),
            PlaybackError::AtEnd { total } => {
                write!(f, "Already at the last step ({} total)", total)
            }
        }
    }
}

impl std::error::Error for PlaybackError {}

/// Errors raised while reading the launch configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No structure kind was given
    MissingStructure,

    /// The structure kind is not one of `graph`, `tree`, `list`
    UnknownStructure(String),

    /// The algorithm name does not belong to the chosen structure
    UnknownAlgorithm { structure: String, name: String },

    /// An option that needs a value was the last argument
    MissingValue(String),

    /// An option value could not be parsed
    InvalidValue { option: String, value: String },

    /// An option is not recognised
    UnknownOption(String),

    /// The structure could not be built from the given options
    Structure(StructureError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingStructure => write!(f, "No structure given"),
            ConfigError::UnknownStructure(name) => {
                write!(
                    f,
                    "Unknown structure '{}' (expected graph, tree or list)",
                    name
                )
            }
            ConfigError::UnknownAlgorithm { structure, name } => {
                write!(f, "Unknown {} algorithm '{}'", structure, name)
            }
            ConfigError::MissingValue(option) => write!(f, "Option '{}' needs a value", option),
            ConfigError::InvalidValue { option, value } => {
                write!(f, "Invalid value '{}' for option '{}'", value, option)
            }
            ConfigError::UnknownOption(option) => write!(f, "Unknown option '{}'", option),
            ConfigError::Structure(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Structure(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StructureError> for ConfigError {
    fn from(err: StructureError) -> Self {
        ConfigError::Structure(err)
    }
}
