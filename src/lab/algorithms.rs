//! Traversal and tour algorithms that turn a graph into a sequence of
//! animation frames.
//!
//! Every run is computed to completion before playback starts: the engine is
//! a pure function of the graph, the chosen endpoints and the algorithm.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use serde::Serialize;

use crate::error::LabError;
use crate::graph_utils::geometry::distance;
use crate::graph_utils::graph::{GraphStore, NodeId};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Algorithm {
    #[default]
    Bfs,
    Dfs,
    Tsp,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::Tsp];

    // BFS and DFS search for a target; the tour only needs a start
    pub fn needs_end(self) -> bool {
        !matches!(self, Algorithm::Tsp)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::Bfs => "Breadth-First Search",
            Algorithm::Dfs => "Depth-First Search",
            Algorithm::Tsp => "TSP (nearest neighbor)",
        })
    }
}

/// One snapshot of algorithm progress.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlgoStep {
    pub visited: Vec<NodeId>,
    pub path: Vec<NodeId>,
    /// Queue (BFS) or stack (DFS) contents; `None` for the tour.
    pub frontier: Option<Vec<NodeId>>,
    pub current: Option<NodeId>,
}

/// Complete output of one engine invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct AlgoRun {
    pub algorithm: Algorithm,
    pub steps: Vec<AlgoStep>,
    /// Empty when no path exists between start and end.
    pub final_path: Vec<NodeId>,
    pub total_cost: f64,
}

impl AlgoRun {
    pub fn found(&self) -> bool {
        !self.final_path.is_empty()
    }
}

/// Validate the inputs and run `algorithm` over `graph`.
///
/// Validation happens before any computation: a missing start, a missing end
/// for BFS/DFS, or a graph with fewer than 2 nodes for the tour are rejected.
pub fn run(
    graph: &GraphStore,
    algorithm: Algorithm,
    start: Option<NodeId>,
    end: Option<NodeId>,
) -> Result<AlgoRun, LabError> {
    let start = start.ok_or(LabError::MissingStart)?;
    if !graph.contains_node(start) {
        return Err(LabError::UnknownNode(start));
    }
    match algorithm {
        Algorithm::Bfs | Algorithm::Dfs => {
            let end = end.ok_or(LabError::MissingEnd)?;
            if !graph.contains_node(end) {
                return Err(LabError::UnknownNode(end));
            }
            let search = if algorithm == Algorithm::Bfs { bfs(graph, start, end) } else { dfs(graph, start, end) };
            let total_cost = path_cost(graph, &search.path);
            Ok(AlgoRun { algorithm, steps: search.steps, final_path: search.path, total_cost })
        }
        Algorithm::Tsp => {
            if graph.node_count() < 2 {
                return Err(LabError::TooFewNodes { count: graph.node_count() });
            }
            Ok(tsp_nearest_neighbor(graph, start))
        }
    }
}

/// Frames and resulting path of a BFS/DFS search.
pub struct Search {
    pub steps: Vec<AlgoStep>,
    /// Empty when the end was never reached.
    pub path: Vec<NodeId>,
}

// Walk parent pointers from `to` back to the root, then reverse
fn trace_back(parent: &HashMap<NodeId, NodeId>, to: NodeId) -> Vec<NodeId> {
    let mut path = vec![to];
    let mut cur = to;
    while let Some(&p) = parent.get(&cur) {
        path.push(p);
        cur = p;
    }
    path.reverse();
    path
}

/// Level-order search. A node is marked visited when it is enqueued, and the
/// first node to discover another becomes its parent. Neighbours expand in
/// adjacency order, so ties follow edge-creation order. Each dequeue records
/// one frame, taken after the node's neighbours were enqueued.
pub fn bfs(graph: &GraphStore, start: NodeId, end: NodeId) -> Search {
    let adj = graph.adjacency();
    let mut visited: Vec<NodeId> = vec![start];
    let mut seen: HashSet<NodeId> = HashSet::from([start]);
    let mut parent: HashMap<NodeId, NodeId> = HashMap::new();
    let mut queue: VecDeque<NodeId> = VecDeque::from([start]);
    let mut steps = vec![AlgoStep {
        visited: visited.clone(),
        path: Vec::new(),
        frontier: Some(queue.iter().copied().collect()),
        current: None,
    }];
    let mut found = false;

    while let Some(cur) = queue.pop_front() {
        if cur == end {
            found = true;
        } else {
            for &(next, _) in adj.get(&cur).map(Vec::as_slice).unwrap_or_default() {
                if seen.insert(next) {
                    visited.push(next);
                    parent.insert(next, cur);
                    queue.push_back(next);
                }
            }
        }
        steps.push(AlgoStep {
            visited: visited.clone(),
            path: trace_back(&parent, cur),
            frontier: Some(queue.iter().copied().collect()),
            current: Some(cur),
        });
        if found {
            break;
        }
    }

    let path = if found { trace_back(&parent, end) } else { Vec::new() };
    log::debug!("bfs {start}->{end}: {} step(s), found={found}", steps.len());
    Search { steps, path }
}

/// Iterative depth-first search with an explicit stack.
///
/// Nodes are marked visited when popped, not when pushed, so a node reachable
/// over several edges can sit in the stack more than once. Stale entries are
/// discarded without producing a frame. Neighbours are pushed in reverse
/// adjacency order so they pop in adjacency order.
pub fn dfs(graph: &GraphStore, start: NodeId, end: NodeId) -> Search {
    let adj = graph.adjacency();
    let mut visited: Vec<NodeId> = Vec::new();
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut parent: HashMap<NodeId, NodeId> = HashMap::new();
    // (node, the node that pushed it)
    let mut stack: Vec<(NodeId, Option<NodeId>)> = vec![(start, None)];
    let frontier = |stack: &[(NodeId, Option<NodeId>)]| -> Option<Vec<NodeId>> { Some(stack.iter().map(|(n, _)| *n).collect()) };
    let mut steps = vec![AlgoStep { visited: Vec::new(), path: Vec::new(), frontier: frontier(&stack), current: None }];
    let mut found = false;

    while let Some((cur, from)) = stack.pop() {
        if !seen.insert(cur) {
            continue;
        }
        visited.push(cur);
        if let Some(p) = from {
            parent.insert(cur, p);
        }
        if cur == end {
            found = true;
        } else {
            for &(next, _) in adj.get(&cur).map(Vec::as_slice).unwrap_or_default().iter().rev() {
                if !seen.contains(&next) {
                    stack.push((next, Some(cur)));
                }
            }
        }
        steps.push(AlgoStep {
            visited: visited.clone(),
            path: trace_back(&parent, cur),
            frontier: frontier(&stack),
            current: Some(cur),
        });
        if found {
            break;
        }
    }

    let path = if found { trace_back(&parent, end) } else { Vec::new() };
    log::debug!("dfs {start}->{end}: {} step(s), found={found}", steps.len());
    Search { steps, path }
}

/// Sum of edge weights between consecutive path nodes.
pub fn path_cost(graph: &GraphStore, path: &[NodeId]) -> f64 {
    path.windows(2)
        .filter_map(|w| graph.edge_between(w[0], w[1]))
        .map(|e| e.weight)
        .sum()
}

/// Greedy nearest-neighbour tour.
///
/// This is a heuristic, not an optimal solver: from the current node it always
/// hops to the closest unvisited node by straight-line distance between node
/// coordinates (edges and their weights are ignored), never backtracks, and
/// finally returns to the start. Ties go to the node created first.
pub fn tsp_nearest_neighbor(graph: &GraphStore, start: NodeId) -> AlgoRun {
    let mut tour = vec![start];
    let mut seen: HashSet<NodeId> = HashSet::from([start]);
    let mut total_cost = 0.0;
    let mut steps = vec![AlgoStep { visited: tour.clone(), path: tour.clone(), frontier: None, current: Some(start) }];
    let mut cur = start;

    while seen.len() < graph.node_count() {
        let Some(here) = graph.node(cur).map(|n| n.pos()) else { break };
        let mut best: Option<(NodeId, f64)> = None;
        for node in graph.nodes().filter(|n| !seen.contains(&n.id)) {
            let d = distance(here, node.pos());
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((node.id, d));
            }
        }
        let Some((next, d)) = best else { break };
        total_cost += d;
        seen.insert(next);
        tour.push(next);
        cur = next;
        steps.push(AlgoStep { visited: tour.clone(), path: tour.clone(), frontier: None, current: Some(next) });
    }

    if let (Some(from), Some(home)) = (graph.node(cur), graph.node(start)) {
        total_cost += distance(from.pos(), home.pos());
    }
    tour.push(start);
    steps.push(AlgoStep {
        visited: tour[..tour.len() - 1].to_vec(),
        path: tour.clone(),
        frontier: None,
        current: Some(start),
    });
    log::debug!("tsp from {start}: {} hop(s), cost {total_cost:.2}", tour.len() - 1);
    AlgoRun { algorithm: Algorithm::Tsp, steps, final_path: tour, total_cost }
}

/// Render a path as node ids joined by arrows, e.g. `1 → 2 → 3`.
pub fn format_path(path: &[NodeId]) -> String {
    path.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(" → ")
}
