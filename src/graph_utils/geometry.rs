use crate::graph_utils::graph::{EdgeId, GraphStore, NodeId};

/// A position in canvas space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel tolerances used to resolve a click to a node or an edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitConfig {
    pub node_radius: f64,
    pub edge_tolerance: f64,
}

impl HitConfig {
    pub fn new(node_radius: f64, edge_tolerance: f64) -> Self {
        Self { node_radius, edge_tolerance }
    }

    // A node is hit anywhere within 1.5x its drawn radius
    pub fn click_threshold(&self) -> f64 {
        self.node_radius * 1.5
    }
}

impl Default for HitConfig {
    fn default() -> Self {
        Self { node_radius: 12.0, edge_tolerance: 10.0 }
    }
}

/// What a click landed on. Nodes always win over edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Hit {
    Node(NodeId),
    Edge(EdgeId),
}

pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

// Distance from point P to segment AB
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let ab_len2 = abx * abx + aby * aby;
    if ab_len2 <= f64::EPSILON {
        return distance(p, a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / ab_len2).clamp(0.0, 1.0);
    distance(p, Point::new(a.x + abx * t, a.y + aby * t))
}

/// Nearest node whose centre lies within the click threshold of `p`.
pub fn nearest_node(graph: &GraphStore, p: Point, cfg: &HitConfig) -> Option<NodeId> {
    let threshold = cfg.click_threshold();
    let mut best: Option<(NodeId, f64)> = None;
    for node in graph.nodes() {
        let d = distance(p, node.pos());
        if d <= threshold && best.is_none_or(|(_, bd)| d < bd) {
            best = Some((node.id, d));
        }
    }
    best.map(|(id, _)| id)
}

/// First edge (in creation order) whose segment passes within the edge tolerance.
pub fn edge_at(graph: &GraphStore, p: Point, cfg: &HitConfig) -> Option<EdgeId> {
    graph.edges().find_map(|e| {
        let a = graph.node(e.from)?.pos();
        let b = graph.node(e.to)?.pos();
        (point_segment_distance(p, a, b) <= cfg.edge_tolerance).then_some(e.id)
    })
}

pub fn hit_test(graph: &GraphStore, p: Point, cfg: &HitConfig) -> Option<Hit> {
    nearest_node(graph, p, cfg)
        .map(Hit::Node)
        .or_else(|| edge_at(graph, p, cfg).map(Hit::Edge))
}
