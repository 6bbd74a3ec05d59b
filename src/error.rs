use thiserror::Error;

use crate::graph_utils::graph::NodeId;

/// Failures surfaced by the graph store, the editor and the algorithm engine.
///
/// All of them are local and recoverable; the session turns them into notices.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabError {
    #[error("please select a start node")]
    MissingStart,
    #[error("please select an end node")]
    MissingEnd,
    #[error("the tour needs at least 2 nodes (graph has {count})")]
    TooFewNodes { count: usize },
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),
    #[error("node {0} cannot be connected to itself")]
    SelfLoop(NodeId),
    #[error("edge does not exist")]
    UnknownEdge,
    #[error("'{0}' is not a valid weight")]
    InvalidWeight(String),
    #[error("the graph cannot be changed while a visualization is playing")]
    Busy,
}
