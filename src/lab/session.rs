use std::collections::VecDeque;
use std::time::Instant;

use crate::error::LabError;
use crate::graph_utils::geometry::{Hit, Point};
use crate::graph_utils::graph::{GraphStore, NodeId};
use crate::lab::algorithms::{self, AlgoStep, Algorithm};
use crate::lab::edit_dialog::{EditRequest, EditResult};
use crate::lab::editor::{ClickOutcome, Editor, EditorMode};
use crate::lab::player::{PlayerEvent, RunSummary, StepPlayer};
use crate::persistence::settings::LabSettings;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A user-facing message, shown by the frontend as a toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// Everything the Virtual Lab canvas works on: the graph, the editor, the
/// chosen algorithm and the playback of its last run.
///
/// While a visualization is playing the graph is locked: clicks, mode
/// changes and structural commands are refused. Switching the algorithm,
/// resetting or starting a new visualization cancels playback instead.
#[derive(Debug)]
pub struct LabSession {
    graph: GraphStore,
    editor: Editor,
    algorithm: Algorithm,
    player: StepPlayer,
    copy_offset: (f64, f64),
    notices: VecDeque<Notice>,
}

impl LabSession {
    pub fn new(settings: &LabSettings) -> Self {
        Self::with_graph(GraphStore::new(), settings)
    }

    pub fn with_graph(graph: GraphStore, settings: &LabSettings) -> Self {
        Self {
            graph,
            editor: Editor::new(settings.hit_config()),
            algorithm: Algorithm::default(),
            player: StepPlayer::new(settings.tick_interval()),
            copy_offset: settings.copy_offset,
            notices: VecDeque::new(),
        }
    }

    pub fn apply_settings(&mut self, settings: &LabSettings) {
        self.editor.set_hit_config(settings.hit_config());
        self.player.set_interval(settings.tick_interval());
        self.copy_offset = settings.copy_offset;
    }

    pub fn graph(&self) -> &GraphStore { &self.graph }
    pub fn editor(&self) -> &Editor { &self.editor }
    pub fn player(&self) -> &StepPlayer { &self.player }
    pub fn algorithm(&self) -> Algorithm { self.algorithm }
    pub fn is_locked(&self) -> bool { self.player.is_playing() }
    pub fn current_step(&self) -> Option<&AlgoStep> { self.player.current_step() }
    pub fn summary(&self) -> Option<&RunSummary> { self.player.summary() }

    fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push_back(Notice { level, text: text.into() });
    }

    fn refuse_while_playing(&mut self) -> Result<(), LabError> {
        if self.is_locked() {
            self.notify(NoticeLevel::Error, LabError::Busy.to_string());
            return Err(LabError::Busy);
        }
        Ok(())
    }

    // A finished run no longer describes a graph that has since changed
    fn discard_result(&mut self) {
        if self.player.summary().is_some() {
            self.player.cancel();
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub fn set_mode(&mut self, mode: EditorMode) -> Result<(), LabError> {
        self.refuse_while_playing()?;
        self.editor.set_mode(mode);
        Ok(())
    }

    /// Switch algorithm. Playback, results and the pending edge anchor are
    /// discarded; the tour does not use an end node so it is cleared.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        if self.algorithm == algorithm {
            return;
        }
        self.player.cancel();
        self.editor.cancel_anchor();
        if !algorithm.needs_end() {
            self.graph.clear_end();
        }
        log::info!("algorithm set to {algorithm}");
        self.algorithm = algorithm;
    }

    /// Route a canvas click through the editor. Returns an edit request when
    /// the click opened an edit dialog.
    pub fn click(&mut self, pos: Point, toggle: bool) -> Option<EditRequest> {
        if self.refuse_while_playing().is_err() {
            return None;
        }
        if self.editor.mode() == EditorMode::SetEnd && !self.algorithm.needs_end() {
            self.notify(NoticeLevel::Info, "The tour only needs a start node");
            return None;
        }
        match self.editor.handle_click(&mut self.graph, pos, toggle) {
            ClickOutcome::NodeAdded(_)
            | ClickOutcome::EdgeAdded(_)
            | ClickOutcome::StartSet(_)
            | ClickOutcome::EndSet(_) => self.discard_result(),
            ClickOutcome::Rejected(e) => {
                log::warn!("click rejected: {e}");
                self.notify(NoticeLevel::Error, e.to_string());
            }
            ClickOutcome::EditRequested(req) => return Some(req),
            // duplicate edges are dropped silently
            ClickOutcome::DuplicateEdge(_)
            | ClickOutcome::AnchorSet(_)
            | ClickOutcome::AnchorCleared
            | ClickOutcome::SelectionChanged
            | ClickOutcome::Ignored => {}
        }
        None
    }

    /// Apply answered edit dialogs. Answers wait while a visualization plays.
    pub fn apply_edits(&mut self) -> Vec<EditResult> {
        if self.is_locked() {
            return Vec::new();
        }
        let results = self.editor.apply_edits(&mut self.graph);
        for r in &results {
            match r {
                EditResult::LabelChanged(_) | EditResult::WeightChanged(..) => self.discard_result(),
                EditResult::Rejected(e) => {
                    let text = e.to_string();
                    self.notify(NoticeLevel::Error, text);
                }
                EditResult::Cancelled => {}
            }
        }
        results
    }

    /// Compute the chosen algorithm over the current graph and start playing
    /// it. Validation failures leave the session untouched.
    pub fn visualize(&mut self, now: Instant) -> Result<(), LabError> {
        let run = match algorithms::run(&self.graph, self.algorithm, self.graph.start(), self.graph.end()) {
            Ok(run) => run,
            Err(e) => {
                log::warn!("visualization refused: {e}");
                self.notify(NoticeLevel::Error, e.to_string());
                return Err(e);
            }
        };
        self.editor.cancel_anchor();
        self.player.start(run, now);
        Ok(())
    }

    /// Drive playback; call on every frame.
    pub fn tick(&mut self, now: Instant) -> Option<PlayerEvent> {
        let event = self.player.poll(now)?;
        if let PlayerEvent::Completed(summary) = &event {
            let text = match (summary.found, self.algorithm.needs_end()) {
                (true, true) => format!("Path: {} (cost {:.2})", summary.path_string, summary.total_cost),
                (true, false) => format!("Tour: {} (cost {:.2})", summary.path_string, summary.total_cost),
                (false, _) => "No path exists between the start and end nodes".to_string(),
            };
            let level = if summary.found { NoticeLevel::Success } else { NoticeLevel::Info };
            self.notify(level, text);
        }
        Some(event)
    }

    /// Stop playback and clear the result, the pending anchor and the
    /// start/end markers. The graph itself stays.
    pub fn reset(&mut self) {
        self.player.cancel();
        self.editor.cancel_anchor();
        self.graph.clear_endpoints();
    }

    pub fn clear_graph(&mut self) {
        self.reset();
        self.graph.clear();
        self.editor.selection_mut().clear();
        log::info!("graph cleared");
    }

    pub fn load_sample(&mut self, width: f64, height: f64) -> Result<(), LabError> {
        self.refuse_while_playing()?;
        self.clear_graph();
        self.graph = GraphStore::sample(width, height);
        self.notify(NoticeLevel::Info, "Loaded sample graph");
        Ok(())
    }

    /// Delete the selected nodes (with their edges) or the selected edges.
    pub fn delete_selected(&mut self) -> Result<usize, LabError> {
        self.refuse_while_playing()?;
        let sel = self.editor.selection();
        let (nodes, edges) = (sel.node_ids(), sel.edge_ids());
        let removed = self.graph.delete_nodes(&nodes) + self.graph.delete_edges(&edges);
        self.editor.forget_missing(&self.graph);
        if removed > 0 {
            self.discard_result();
        }
        Ok(removed)
    }

    /// Copy the selected nodes; the copies become the new selection.
    pub fn copy_selected(&mut self) -> Result<Vec<NodeId>, LabError> {
        self.refuse_while_playing()?;
        let ids = self.editor.selection().node_ids();
        let created = self.graph.duplicate_nodes(&ids, self.copy_offset);
        if !created.is_empty() {
            self.discard_result();
            let sel = self.editor.selection_mut();
            sel.clear();
            for id in &created {
                sel.toggle(Hit::Node(*id));
            }
        }
        Ok(created)
    }
}
