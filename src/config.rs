//! Launch configuration
//!
//! The viewer is started as
//!
//! ```text
//! algotty <graph|tree|list> [algorithm] [options]
//! ```
//!
//! Options are checked against the chosen structure; passing a list option
//! to a graph is an error rather than being silently ignored. Without
//! `--values` each structure starts from its demo sample.

use crate::engine::{GraphAlgorithm, ListAlgorithm, TreeAlgorithm};
use crate::errors::ConfigError;
use crate::model::tree::parse_level_order;
use crate::model::{Graph, LinkedList, ListKind, ListNodeId, Tree, TreeKind, VertexId};
use crate::playback::{GraphSession, ListSession, Session, TreeSession};

/// Everything needed to build the first session
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchConfig {
    Graph {
        algorithm: GraphAlgorithm,
        directed: bool,
        weighted: bool,
        start: Option<VertexId>,
        end: Option<VertexId>,
    },
    Tree {
        algorithm: TreeAlgorithm,
        kind: TreeKind,
        values: Option<Vec<Option<i64>>>,
    },
    List {
        algorithm: ListAlgorithm,
        kind: ListKind,
        values: Option<Vec<i64>>,
        cycle_to: Option<ListNodeId>,
    },
}

impl LaunchConfig {
    /// Parse the arguments that follow the program name
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter().peekable();
        let structure = args.next().ok_or(ConfigError::MissingStructure)?;
        let algorithm = match args.peek() {
            Some(arg) if !arg.starts_with("--") => args.next(),
            _ => None,
        };
        let options: Vec<String> = args.collect();

        match structure.to_ascii_lowercase().as_str() {
            "graph" => parse_graph(algorithm.as_deref(), &options),
            "tree" => parse_tree(algorithm.as_deref(), &options),
            "list" => parse_list(algorithm.as_deref(), &options),
            _ => Err(ConfigError::UnknownStructure(structure)),
        }
    }

    /// Build the structure and run the selected algorithm
    pub fn into_session(self) -> Result<Session, ConfigError> {
        match self {
            LaunchConfig::Graph {
                algorithm,
                directed,
                weighted,
                start,
                end,
            } => {
                let graph = Graph::sample(directed, weighted);
                let start = start.or_else(|| graph.vertices().first().map(|v| v.id));
                Ok(Session::Graph(GraphSession::new(
                    graph, algorithm, start, end,
                )))
            }
            LaunchConfig::Tree {
                algorithm,
                kind,
                values,
            } => {
                let tree = match values {
                    Some(values) => Tree::from_level_order(kind, &values),
                    None => Tree::sample(kind),
                };
                Ok(Session::Tree(TreeSession::new(tree, algorithm)))
            }
            LaunchConfig::List {
                algorithm,
                kind,
                values,
                cycle_to,
            } => {
                let mut list = match values {
                    Some(values) => LinkedList::from_values(kind, &values),
                    None => LinkedList::sample(kind),
                };
                if let Some(target) = cycle_to {
                    let tail = list
                        .tail()
                        .ok_or(ConfigError::InvalidValue {
                            option: "--cycle-to".to_string(),
                            value: target.to_string(),
                        })?;
                    list.link(tail, target)?;
                }
                Ok(Session::List(ListSession::new(list, algorithm)))
            }
        }
    }
}

fn parse_graph(algorithm: Option<&str>, options: &[String]) -> Result<LaunchConfig, ConfigError> {
    let algorithm = match algorithm {
        Some(name) => name.parse::<GraphAlgorithm>().map_err(|name| ConfigError::UnknownAlgorithm {
            structure: "graph".to_string(),
            name,
        })?,
        None => GraphAlgorithm::Bfs,
    };

    let mut directed = false;
    let mut weighted = false;
    let mut start = None;
    let mut end = None;

    let mut options = options.iter();
    while let Some(option) = options.next() {
        match option.as_str() {
            "--directed" => directed = true,
            "--weighted" => weighted = true,
            "--start" => start = Some(parse_value(option, options.next())?),
            "--end" => end = Some(parse_value(option, options.next())?),
            _ => return Err(ConfigError::UnknownOption(option.clone())),
        }
    }

    Ok(LaunchConfig::Graph {
        algorithm,
        directed,
        weighted,
        start,
        end,
    })
}

fn parse_tree(algorithm: Option<&str>, options: &[String]) -> Result<LaunchConfig, ConfigError> {
    let algorithm = match algorithm {
        Some(name) => name.parse::<TreeAlgorithm>().map_err(|name| ConfigError::UnknownAlgorithm {
            structure: "tree".to_string(),
            name,
        })?,
        None => TreeAlgorithm::InOrder,
    };

    let mut kind = TreeKind::Bst;
    let mut values = None;

    let mut options = options.iter();
    while let Some(option) = options.next() {
        match option.as_str() {
            "--kind" => kind = parse_value(option, options.next())?,
            "--values" => {
                let raw = options
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue(option.clone()))?;
                values = Some(parse_level_order(raw)?);
            }
            _ => return Err(ConfigError::UnknownOption(option.clone())),
        }
    }

    Ok(LaunchConfig::Tree {
        algorithm,
        kind,
        values,
    })
}

fn parse_list(algorithm: Option<&str>, options: &[String]) -> Result<LaunchConfig, ConfigError> {
    let mut kind = ListKind::Singly;
    let mut values = None;
    let mut cycle_to = None;
    let mut search = None;

    let mut options = options.iter();
    while let Some(option) = options.next() {
        match option.as_str() {
            "--doubly" => kind = ListKind::Doubly,
            "--cycle-to" => cycle_to = Some(parse_value(option, options.next())?),
            "--search" => search = Some(parse_value::<i64>(option, options.next())?),
            "--values" => {
                let raw = options
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue(option.clone()))?;
                let parsed = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
                    .map(|token| {
                        token.parse().map_err(|_| ConfigError::InvalidValue {
                            option: option.clone(),
                            value: token.to_string(),
                        })
                    })
                    .collect::<Result<Vec<i64>, _>>()?;
                values = Some(parsed);
            }
            _ => return Err(ConfigError::UnknownOption(option.clone())),
        }
    }

    let algorithm = match algorithm {
        Some(name) => ListAlgorithm::from_name(name, search.unwrap_or_default()).ok_or_else(|| {
            ConfigError::UnknownAlgorithm {
                structure: "list".to_string(),
                name: name.to_string(),
            }
        })?,
        // A bare --search implies the search algorithm
        None => search.map_or(ListAlgorithm::Traverse, ListAlgorithm::Search),
    };
    if matches!(algorithm, ListAlgorithm::Search(_)) && search.is_none() {
        return Err(ConfigError::MissingValue("--search".to_string()));
    }

    Ok(LaunchConfig::List {
        algorithm,
        kind,
        values,
        cycle_to,
    })
}

/// Parse the value following `option`
fn parse_value<T: std::str::FromStr>(
    option: &str,
    value: Option<&String>,
) -> Result<T, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue(option.to_string()))?;
    value.parse().map_err(|_| ConfigError::InvalidValue {
        option: option.to_string(),
        value: value.clone(),
    })
}

/// Usage text printed on a configuration error
pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <graph|tree|list> [algorithm] [options]

Graph algorithms: bfs, dfs, dijkstra, prim, kruskal, topological
  --directed           use a directed graph
  --weighted           keep edge weights (otherwise every edge weighs 1)
  --start <vN>         start vertex (default v0)
  --end <vN>           end vertex for dijkstra

Tree algorithms: inorder, preorder, postorder, levelorder
  --kind <bst|avl|rb>  tree kind (default bst)
  --values <list>      level-order values, e.g. 50,30,70,null,40

List algorithms: traverse, reverse, detect-cycle, search
  --doubly             use a doubly linked list
  --values <list>      node values, e.g. 10,20,30
  --cycle-to <nodeK>   link the tail back to nodeK
  --search <n>         value to search for

Examples:
  {program} graph dijkstra --weighted --start v0 --end v5
  {program} tree levelorder --kind avl
  {program} list detect-cycle --cycle-to node2"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Outcome;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_graph_options() {
        let config =
            LaunchConfig::from_args(args("graph dijkstra --weighted --start v1 --end 5")).unwrap();
        assert_eq!(
            config,
            LaunchConfig::Graph {
                algorithm: GraphAlgorithm::Dijkstra,
                directed: false,
                weighted: true,
                start: Some(VertexId(1)),
                end: Some(VertexId(5)),
            }
        );
    }

    #[test]
    fn test_defaults() {
        let config = LaunchConfig::from_args(args("tree")).unwrap();
        assert_eq!(
            config,
            LaunchConfig::Tree {
                algorithm: TreeAlgorithm::InOrder,
                kind: TreeKind::Bst,
                values: None,
            }
        );
        let config = LaunchConfig::from_args(args("list --search 30")).unwrap();
        assert!(matches!(
            config,
            LaunchConfig::List {
                algorithm: ListAlgorithm::Search(30),
                ..
            }
        ));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            LaunchConfig::from_args(Vec::new()),
            Err(ConfigError::MissingStructure)
        );
        assert_eq!(
            LaunchConfig::from_args(args("heap")),
            Err(ConfigError::UnknownStructure("heap".to_string()))
        );
        assert_eq!(
            LaunchConfig::from_args(args("graph astar")),
            Err(ConfigError::UnknownAlgorithm {
                structure: "graph".to_string(),
                name: "astar".to_string(),
            })
        );
        assert_eq!(
            LaunchConfig::from_args(args("graph bfs --doubly")),
            Err(ConfigError::UnknownOption("--doubly".to_string()))
        );
        assert_eq!(
            LaunchConfig::from_args(args("graph bfs --start")),
            Err(ConfigError::MissingValue("--start".to_string()))
        );
        assert_eq!(
            LaunchConfig::from_args(args("list search")),
            Err(ConfigError::MissingValue("--search".to_string()))
        );
        assert!(matches!(
            LaunchConfig::from_args(args("tree --values 1,x")),
            Err(ConfigError::Structure(_))
        ));
    }

    #[test]
    fn test_cycle_to_builds_cyclic_list() {
        let session = LaunchConfig::from_args(args("list detect-cycle --cycle-to node2"))
            .unwrap()
            .into_session()
            .unwrap();
        match session {
            Session::List(session) => assert!(session.list().has_cycle()),
            _ => panic!("expected a list session"),
        }

        let session = LaunchConfig::from_args(args("list detect-cycle --doubly --cycle-to node2"))
            .unwrap()
            .into_session()
            .unwrap();
        match session {
            Session::List(session) => {
                assert!(session.list().has_cycle());
                assert_eq!(session.list().values(), vec![10, 20, 30, 40]);
                assert_eq!(session.timeline().outcome(), Outcome::CycleDetected);
            }
            _ => panic!("expected a list session"),
        }

        let result = LaunchConfig::from_args(args("list --cycle-to node9"))
            .unwrap()
            .into_session();
        assert!(matches!(result, Err(ConfigError::Structure(_))));
    }
}
