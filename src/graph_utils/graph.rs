use indexmap::IndexMap;
use uuid::Uuid;

use crate::error::LabError;
use crate::graph_utils::geometry::{self, Point};

// Basic type aliases for clarity
pub type NodeId = u32;
pub type EdgeId = Uuid;

/// Undirected adjacency, neighbours listed in edge-creation order.
pub type Adjacency = IndexMap<NodeId, Vec<(NodeId, f64)>>;

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub label: Option<String>,
}

impl Node {
    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Caption drawn on the canvas: the label when set, the id otherwise.
    pub fn caption(&self) -> String {
        match &self.label {
            Some(label) if !label.is_empty() => label.clone(),
            _ => self.id.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
}

impl Edge {
    // True when the edge joins the unordered pair {a, b}
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    pub fn touches(&self, id: NodeId) -> bool {
        self.from == id || self.to == id
    }
}

/// Result of an edge insertion that passed validation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeInsert {
    Added(EdgeId),
    /// The pair was already connected; carries the id of the existing edge.
    Duplicate(EdgeId),
}

impl EdgeInsert {
    pub fn id(self) -> EdgeId {
        match self {
            EdgeInsert::Added(id) | EdgeInsert::Duplicate(id) => id,
        }
    }
}

/// In-memory owner of the node and edge collections plus the start/end markers.
///
/// Every edge references two existing, distinct nodes. Both collections keep
/// insertion order so traversal tie-breaking follows creation order.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
    start: Option<NodeId>,
    end: Option<NodeId>,
}

impl GraphStore {
    // Instantiate a new, empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Five nodes spread over a `width` x `height` canvas, wired with
    /// Euclidean weights. Used for the "Load sample" action.
    pub fn sample(width: f64, height: f64) -> Self {
        const LAYOUT: [(f64, f64); 5] = [(0.2, 0.3), (0.5, 0.2), (0.8, 0.4), (0.3, 0.7), (0.7, 0.8)];
        const LINKS: [(NodeId, NodeId); 6] = [(1, 2), (2, 3), (1, 4), (4, 5), (3, 5), (2, 4)];

        let mut graph = Self::new();
        for (fx, fy) in LAYOUT {
            graph.add_node(width * fx, height * fy);
        }
        for (a, b) in LINKS {
            // Ids are freshly assigned 1..=5 above, so these cannot fail
            let _ = graph.add_edge_euclidean(a, b);
        }
        graph
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.start = None;
        self.end = None;
    }

    fn next_node_id(&self) -> NodeId {
        self.nodes.keys().max().copied().unwrap_or(0) + 1
    }

    // Add a node and return its new ID (max existing id + 1)
    pub fn add_node(&mut self, x: f64, y: f64) -> NodeId {
        let id = self.next_node_id();
        self.nodes.insert(id, Node { id, x, y, label: None });
        log::debug!("added node {id} at ({x:.1}, {y:.1})");
        id
    }

    /// Connect `from` and `to`. Unknown endpoints, self-loops and non-finite
    /// weights are rejected; an already connected pair (in either direction)
    /// is a silent no-op.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> Result<EdgeInsert, LabError> {
        for id in [from, to] {
            if !self.nodes.contains_key(&id) {
                return Err(LabError::UnknownNode(id));
            }
        }
        if from == to {
            return Err(LabError::SelfLoop(from));
        }
        if !weight.is_finite() {
            return Err(LabError::InvalidWeight(weight.to_string()));
        }
        if let Some(existing) = self.edge_between(from, to) {
            log::debug!("ignored duplicate edge {from}-{to}");
            return Ok(EdgeInsert::Duplicate(existing.id));
        }
        let id = Uuid::now_v7();
        self.edges.insert(id, Edge { id, from, to, weight });
        log::debug!("added edge {from}-{to} weight {weight:.2}");
        Ok(EdgeInsert::Added(id))
    }

    // Same as add_edge, weight defaults to the distance between the endpoints
    pub fn add_edge_euclidean(&mut self, from: NodeId, to: NodeId) -> Result<EdgeInsert, LabError> {
        let (a, b) = match (self.nodes.get(&from), self.nodes.get(&to)) {
            (Some(a), Some(b)) => (a.pos(), b.pos()),
            (None, _) => return Err(LabError::UnknownNode(from)),
            (_, None) => return Err(LabError::UnknownNode(to)),
        };
        self.add_edge(from, to, geometry::distance(a, b))
    }

    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        self.edges.values().find(|e| e.connects(a, b))
    }

    /// Remove nodes and every edge incident to them. Start/end markers that
    /// pointed at a removed node are cleared. Returns the number of nodes removed.
    pub fn delete_nodes(&mut self, ids: &[NodeId]) -> usize {
        let mut removed = 0usize;
        for id in ids {
            if self.nodes.shift_remove(id).is_some() {
                removed += 1;
            }
        }
        if removed == 0 {
            return 0;
        }
        let before = self.edges.len();
        self.edges.retain(|_, e| !ids.iter().any(|id| e.touches(*id)));
        if self.start.is_some_and(|s| ids.contains(&s)) {
            self.start = None;
        }
        if self.end.is_some_and(|e| ids.contains(&e)) {
            self.end = None;
        }
        log::info!("deleted {} node(s) and {} incident edge(s)", removed, before - self.edges.len());
        removed
    }

    pub fn remove_node(&mut self, id: NodeId) -> bool {
        self.delete_nodes(&[id]) == 1
    }

    pub fn delete_edges(&mut self, ids: &[EdgeId]) -> usize {
        let removed = ids.iter().filter(|id| self.edges.shift_remove(*id).is_some()).count();
        if removed > 0 {
            log::info!("deleted {removed} edge(s)");
        }
        removed
    }

    pub fn update_node_label(&mut self, id: NodeId, label: String) -> bool {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.label = Some(label);
            true
        } else {
            false
        }
    }

    pub fn update_edge_weight(&mut self, id: EdgeId, weight: f64) -> bool {
        if !weight.is_finite() {
            return false;
        }
        if let Some(edge) = self.edges.get_mut(&id) {
            edge.weight = weight;
            true
        } else {
            false
        }
    }

    /// Copy the given nodes shifted by `offset`, assigning fresh sequential ids.
    /// Labels get a `_copy` suffix; edges are not copied. Returns the new ids
    /// in the order the originals were given.
    pub fn duplicate_nodes(&mut self, ids: &[NodeId], offset: (f64, f64)) -> Vec<NodeId> {
        let originals: Vec<Node> = ids.iter().filter_map(|id| self.nodes.get(id).cloned()).collect();
        let mut created = Vec::with_capacity(originals.len());
        for orig in originals {
            let id = self.next_node_id();
            let label = orig.label.map(|l| format!("{l}_copy"));
            self.nodes.insert(id, Node { id, x: orig.x + offset.0, y: orig.y + offset.1, label });
            created.push(id);
        }
        if !created.is_empty() {
            log::info!("duplicated {} node(s)", created.len());
        }
        created
    }

    pub fn set_start(&mut self, id: NodeId) -> Result<(), LabError> {
        if !self.nodes.contains_key(&id) {
            return Err(LabError::UnknownNode(id));
        }
        self.start = Some(id);
        Ok(())
    }

    pub fn set_end(&mut self, id: NodeId) -> Result<(), LabError> {
        if !self.nodes.contains_key(&id) {
            return Err(LabError::UnknownNode(id));
        }
        self.end = Some(id);
        Ok(())
    }

    pub fn clear_end(&mut self) {
        self.end = None;
    }

    pub fn clear_endpoints(&mut self) {
        self.start = None;
        self.end = None;
    }

    pub fn start(&self) -> Option<NodeId> { self.start }
    pub fn end(&self) -> Option<NodeId> { self.end }

    pub fn node(&self, id: NodeId) -> Option<&Node> { self.nodes.get(&id) }
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> { self.edges.get(&id) }
    pub fn contains_node(&self, id: NodeId) -> bool { self.nodes.contains_key(&id) }
    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Build the undirected adjacency map: both directions are inserted for
    /// every edge, and every node appears as a key even when isolated.
    pub fn adjacency(&self) -> Adjacency {
        let mut adj: Adjacency = self.nodes.keys().map(|id| (*id, Vec::new())).collect();
        for e in self.edges.values() {
            adj.entry(e.from).or_default().push((e.to, e.weight));
            adj.entry(e.to).or_default().push((e.from, e.weight));
        }
        adj
    }
}
