//! Pointer interpretation for the graph canvas.
//!
//! A click plus the active [`EditorMode`] (and the Ctrl/Cmd modifier in
//! select mode) becomes a graph or selection mutation.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::LabError;
use crate::graph_utils::geometry::{self, Hit, HitConfig, Point};
use crate::graph_utils::graph::{EdgeId, EdgeInsert, GraphStore, NodeId};
use crate::lab::edit_dialog::{EditChannel, EditRequest, EditResult, EditTarget};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EditorMode {
    #[default]
    AddNode,
    AddEdge,
    SetStart,
    SetEnd,
    Select,
    Edit,
}

impl EditorMode {
    pub const ALL: [EditorMode; 6] = [
        EditorMode::AddNode,
        EditorMode::AddEdge,
        EditorMode::SetStart,
        EditorMode::SetEnd,
        EditorMode::Select,
        EditorMode::Edit,
    ];
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EditorMode::AddNode => "Add Node",
            EditorMode::AddEdge => "Add Edge",
            EditorMode::SetStart => "Set Start",
            EditorMode::SetEnd => "Set End",
            EditorMode::Select => "Select",
            EditorMode::Edit => "Edit",
        })
    }
}

/// Current selection. Nodes and edges are never selected together.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Empty,
    Nodes(BTreeSet<NodeId>),
    Edges(BTreeSet<EdgeId>),
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    pub fn clear(&mut self) {
        *self = Selection::Empty;
    }

    pub fn replace(&mut self, hit: Hit) {
        *self = match hit {
            Hit::Node(id) => Selection::Nodes(BTreeSet::from([id])),
            Hit::Edge(id) => Selection::Edges(BTreeSet::from([id])),
        };
    }

    /// Flip membership of the hit item. An item of the other kind starts a
    /// fresh selection of its own kind.
    pub fn toggle(&mut self, hit: Hit) {
        fn flip<T: Ord>(set: &mut BTreeSet<T>, id: T) {
            if !set.remove(&id) {
                set.insert(id);
            }
        }
        match (&mut *self, hit) {
            (Selection::Nodes(set), Hit::Node(id)) => flip(set, id),
            (Selection::Edges(set), Hit::Edge(id)) => flip(set, id),
            _ => {
                self.replace(hit);
                return;
            }
        }
        self.normalize();
    }

    fn normalize(&mut self) {
        let empty = match self {
            Selection::Nodes(set) => set.is_empty(),
            Selection::Edges(set) => set.is_empty(),
            Selection::Empty => false,
        };
        if empty {
            *self = Selection::Empty;
        }
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        matches!(self, Selection::Nodes(set) if set.contains(&id))
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        matches!(self, Selection::Edges(set) if set.contains(&id))
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        match self {
            Selection::Nodes(set) => set.iter().copied().collect(),
            _ => Vec::new(),
        }
    }

    pub fn edge_ids(&self) -> Vec<EdgeId> {
        match self {
            Selection::Edges(set) => set.iter().copied().collect(),
            _ => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Selection::Nodes(set) => set.len(),
            Selection::Edges(set) => set.len(),
            Selection::Empty => 0,
        }
    }

    // Drop ids that no longer exist in the graph
    pub fn retain_existing(&mut self, graph: &GraphStore) {
        match self {
            Selection::Nodes(set) => set.retain(|id| graph.contains_node(*id)),
            Selection::Edges(set) => set.retain(|id| graph.edge(*id).is_some()),
            Selection::Empty => {}
        }
        self.normalize();
    }
}

/// What a click did.
#[derive(Debug)]
pub enum ClickOutcome {
    Ignored,
    NodeAdded(NodeId),
    AnchorSet(NodeId),
    AnchorCleared,
    EdgeAdded(EdgeId),
    DuplicateEdge(EdgeId),
    StartSet(NodeId),
    EndSet(NodeId),
    SelectionChanged,
    EditRequested(EditRequest),
    Rejected(LabError),
}

#[derive(Debug, Default)]
pub struct Editor {
    mode: EditorMode,
    // first endpoint of an edge being created
    pending_anchor: Option<NodeId>,
    selection: Selection,
    hit: HitConfig,
    edits: EditChannel,
}

impl Editor {
    pub fn new(hit: HitConfig) -> Self {
        Self { hit, ..Self::default() }
    }

    pub fn mode(&self) -> EditorMode { self.mode }
    pub fn pending_anchor(&self) -> Option<NodeId> { self.pending_anchor }
    pub fn selection(&self) -> &Selection { &self.selection }
    pub fn selection_mut(&mut self) -> &mut Selection { &mut self.selection }
    pub fn hit_config(&self) -> &HitConfig { &self.hit }

    pub fn set_hit_config(&mut self, hit: HitConfig) {
        self.hit = hit;
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        if self.mode == mode {
            return;
        }
        if self.mode == EditorMode::AddEdge {
            self.pending_anchor = None;
        }
        log::debug!("editor mode {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    pub fn cancel_anchor(&mut self) {
        self.pending_anchor = None;
    }

    /// Forget the anchor and selected ids that no longer exist in `graph`.
    pub fn forget_missing(&mut self, graph: &GraphStore) {
        if self.pending_anchor.is_some_and(|id| !graph.contains_node(id)) {
            log::debug!("dropped anchor on deleted node");
            self.pending_anchor = None;
        }
        self.selection.retain_existing(graph);
    }

    /// Interpret a click at `pos`. `toggle` is the Ctrl/Cmd modifier and only
    /// matters in select mode.
    pub fn handle_click(&mut self, graph: &mut GraphStore, pos: Point, toggle: bool) -> ClickOutcome {
        match self.mode {
            EditorMode::AddNode => {
                // Clicking on an existing node must not stack a second one on top
                if geometry::nearest_node(graph, pos, &self.hit).is_some() {
                    return ClickOutcome::Ignored;
                }
                ClickOutcome::NodeAdded(graph.add_node(pos.x, pos.y))
            }
            EditorMode::AddEdge => self.click_add_edge(graph, pos),
            EditorMode::SetStart => match geometry::nearest_node(graph, pos, &self.hit) {
                Some(id) => match graph.set_start(id) {
                    Ok(()) => ClickOutcome::StartSet(id),
                    Err(e) => ClickOutcome::Rejected(e),
                },
                None => ClickOutcome::Ignored,
            },
            EditorMode::SetEnd => match geometry::nearest_node(graph, pos, &self.hit) {
                Some(id) => match graph.set_end(id) {
                    Ok(()) => ClickOutcome::EndSet(id),
                    Err(e) => ClickOutcome::Rejected(e),
                },
                None => ClickOutcome::Ignored,
            },
            EditorMode::Select => {
                match (geometry::hit_test(graph, pos, &self.hit), toggle) {
                    (Some(hit), false) => self.selection.replace(hit),
                    (Some(hit), true) => self.selection.toggle(hit),
                    (None, false) => self.selection.clear(),
                    // a modified click on empty canvas keeps the selection
                    (None, true) => return ClickOutcome::Ignored,
                }
                ClickOutcome::SelectionChanged
            }
            EditorMode::Edit => {
                let target = match geometry::hit_test(graph, pos, &self.hit) {
                    Some(Hit::Node(id)) => EditTarget::NodeLabel(id),
                    Some(Hit::Edge(id)) => EditTarget::EdgeWeight(id),
                    None => return ClickOutcome::Ignored,
                };
                match self.edits.request(graph, target) {
                    Some(req) => ClickOutcome::EditRequested(req),
                    None => ClickOutcome::Ignored,
                }
            }
        }
    }

    fn click_add_edge(&mut self, graph: &mut GraphStore, pos: Point) -> ClickOutcome {
        let hit = geometry::nearest_node(graph, pos, &self.hit);
        match (self.pending_anchor, hit) {
            (_, None) => {
                let had_anchor = self.pending_anchor.take().is_some();
                if had_anchor { ClickOutcome::AnchorCleared } else { ClickOutcome::Ignored }
            }
            (None, Some(id)) => {
                self.pending_anchor = Some(id);
                ClickOutcome::AnchorSet(id)
            }
            // same node again: keep waiting for the second endpoint
            (Some(anchor), Some(id)) if anchor == id => ClickOutcome::Ignored,
            (Some(anchor), Some(id)) => {
                self.pending_anchor = None;
                match graph.add_edge_euclidean(anchor, id) {
                    Ok(EdgeInsert::Added(eid)) => ClickOutcome::EdgeAdded(eid),
                    Ok(EdgeInsert::Duplicate(eid)) => ClickOutcome::DuplicateEdge(eid),
                    Err(e) => ClickOutcome::Rejected(e),
                }
            }
        }
    }

    /// Apply answered edit dialogs.
    pub fn apply_edits(&self, graph: &mut GraphStore) -> Vec<EditResult> {
        self.edits.drain(graph)
    }
}
