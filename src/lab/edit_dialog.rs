use std::sync::mpsc::{Receiver, Sender};

use crate::error::LabError;
use crate::graph_utils::graph::{EdgeId, GraphStore, NodeId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditTarget {
    NodeLabel(NodeId),
    EdgeWeight(EdgeId),
}

/// An open edit. Whoever shows the dialog answers it with [`EditRequest::submit`]
/// or [`EditRequest::cancel`]; the answer reaches the editor through a channel
/// and is applied on the next [`EditChannel::drain`]. Dropping the request
/// without answering counts as a cancel.
#[derive(Debug)]
pub struct EditRequest {
    pub target: EditTarget,
    pub initial: String,
    reply_to: Sender<EditReply>,
}

impl EditRequest {
    pub fn title(&self) -> String {
        match self.target {
            EditTarget::NodeLabel(id) => format!("Label for node {id}"),
            EditTarget::EdgeWeight(_) => "Edge weight".to_string(),
        }
    }

    pub fn submit(self, value: String) {
        // The editor may already be gone; nothing to apply then
        let _ = self.reply_to.send(EditReply { target: self.target, value: Some(value) });
    }

    pub fn cancel(self) {
        let _ = self.reply_to.send(EditReply { target: self.target, value: None });
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EditReply {
    pub target: EditTarget,
    pub value: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EditResult {
    LabelChanged(NodeId),
    WeightChanged(EdgeId, f64),
    Cancelled,
    Rejected(LabError),
}

pub fn parse_weight(raw: &str) -> Result<f64, LabError> {
    match raw.trim().parse::<f64>() {
        Ok(w) if w.is_finite() => Ok(w),
        _ => Err(LabError::InvalidWeight(raw.to_string())),
    }
}

/// Apply one answered edit. Labels accept any string, empty included;
/// weights must parse as a finite number or the edge keeps its old weight.
pub fn apply_reply(graph: &mut GraphStore, reply: EditReply) -> EditResult {
    let Some(value) = reply.value else { return EditResult::Cancelled };
    match reply.target {
        EditTarget::NodeLabel(id) => {
            if graph.update_node_label(id, value) {
                EditResult::LabelChanged(id)
            } else {
                EditResult::Rejected(LabError::UnknownNode(id))
            }
        }
        EditTarget::EdgeWeight(id) => match parse_weight(&value) {
            Ok(w) if graph.update_edge_weight(id, w) => EditResult::WeightChanged(id, w),
            Ok(_) => EditResult::Rejected(LabError::UnknownEdge),
            Err(e) => EditResult::Rejected(e),
        },
    }
}

#[derive(Debug)]
pub struct EditChannel {
    tx: Sender<EditReply>,
    rx: Receiver<EditReply>,
}

impl Default for EditChannel {
    fn default() -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        Self { tx, rx }
    }
}

impl EditChannel {
    pub fn request(&self, graph: &GraphStore, target: EditTarget) -> Option<EditRequest> {
        let initial = match target {
            EditTarget::NodeLabel(id) => graph.node(id)?.label.clone().unwrap_or_default(),
            EditTarget::EdgeWeight(id) => format!("{:.2}", graph.edge(id)?.weight),
        };
        Some(EditRequest { target, initial, reply_to: self.tx.clone() })
    }

    /// Apply every reply received so far.
    pub fn drain(&self, graph: &mut GraphStore) -> Vec<EditResult> {
        let mut out = Vec::new();
        while let Ok(reply) = self.rx.try_recv() {
            let result = apply_reply(graph, reply);
            if let EditResult::Rejected(e) = &result {
                log::warn!("edit rejected: {e}");
            }
            out.push(result);
        }
        out
    }
}
