use std::collections::HashSet;

use eframe::egui::{self, Color32, Pos2, Rect, Sense, Stroke, Vec2};

use crate::graph_utils::geometry::Point;
use crate::graph_utils::graph::NodeId;
use crate::lab::session::LabSession;

const BACKGROUND: Color32 = Color32::from_rgb(24, 26, 32);
const EDGE: Color32 = Color32::from_rgba_premultiplied(59, 130, 246, 128);
const PATH: Color32 = Color32::from_rgb(239, 68, 68);
const SELECTED: Color32 = Color32::from_rgb(255, 200, 80);
const NODE: Color32 = Color32::from_rgb(59, 130, 246);
const START: Color32 = Color32::from_rgb(34, 197, 94);
const END: Color32 = Color32::from_rgb(239, 68, 68);
const VISITED: Color32 = Color32::from_rgb(139, 92, 246);
const FRONTIER: Color32 = Color32::from_rgb(120, 220, 255);
const CURRENT: Color32 = Color32::from_rgb(250, 204, 21);

/// A primary click on the canvas, in canvas coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CanvasClick {
    pub pos: Point,
    // Ctrl on Windows/Linux, Cmd on macOS
    pub toggle: bool,
}

/// Paint the graph and the current algorithm step, and report a click.
/// Node coordinates are relative to the canvas' top-left corner.
pub fn show(ui: &mut egui::Ui, session: &LabSession, node_radius: f32) -> (Rect, Option<CanvasClick>) {
    let (resp, painter) = ui.allocate_painter(ui.available_size(), Sense::click());
    let rect = resp.rect;
    painter.rect_filled(rect, 4.0, BACKGROUND);

    let origin = rect.min;
    let to_screen = |p: Point| Pos2::new(origin.x + p.x as f32, origin.y + p.y as f32);
    let graph = session.graph();
    let selection = session.editor().selection();

    let step = session.current_step();
    let visited: HashSet<NodeId> = step.map(|s| s.visited.iter().copied().collect()).unwrap_or_default();
    let frontier: HashSet<NodeId> = step
        .and_then(|s| s.frontier.as_ref())
        .map(|f| f.iter().copied().collect())
        .unwrap_or_default();
    let current = step.and_then(|s| s.current);
    let path: &[NodeId] = step.map(|s| s.path.as_slice()).unwrap_or_default();

    for e in graph.edges() {
        let (Some(a), Some(b)) = (graph.node(e.from), graph.node(e.to)) else { continue };
        let (a, b) = (to_screen(a.pos()), to_screen(b.pos()));
        let stroke = if selection.contains_edge(e.id) { Stroke::new(3.0, SELECTED) } else { Stroke::new(2.0, EDGE) };
        painter.line_segment([a, b], stroke);
        let mid = Pos2::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5);
        painter.text(
            mid + Vec2::new(0.0, -8.0),
            egui::Align2::CENTER_CENTER,
            format!("{:.1}", e.weight),
            egui::FontId::proportional(11.0),
            Color32::LIGHT_GRAY,
        );
    }

    // The tour may hop between nodes with no edge, so the path is drawn on its own
    for w in path.windows(2) {
        if let (Some(a), Some(b)) = (graph.node(w[0]), graph.node(w[1])) {
            painter.line_segment([to_screen(a.pos()), to_screen(b.pos())], Stroke::new(4.0, PATH));
        }
    }

    for node in graph.nodes() {
        let center = to_screen(node.pos());
        let fill = if Some(node.id) == graph.start() {
            START
        } else if Some(node.id) == graph.end() {
            END
        } else if Some(node.id) == current {
            CURRENT
        } else if frontier.contains(&node.id) {
            FRONTIER
        } else if visited.contains(&node.id) {
            VISITED
        } else {
            NODE
        };
        painter.circle_filled(center, node_radius, fill);
        painter.circle_stroke(center, node_radius, Stroke::new(2.5, Color32::WHITE));
        if Some(node.id) == current && (Some(node.id) == graph.start() || Some(node.id) == graph.end()) {
            painter.circle_stroke(center, node_radius + 4.0, Stroke::new(2.0, CURRENT));
        }
        if selection.contains_node(node.id) {
            painter.circle_stroke(center, node_radius + 4.0, Stroke::new(2.0, SELECTED));
        }
        if session.editor().pending_anchor() == Some(node.id) {
            painter.circle_stroke(center, node_radius + 7.0, Stroke::new(1.5, START));
        }
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            node.caption(),
            egui::FontId::proportional(12.0),
            Color32::WHITE,
        );
    }

    let mut click = None;
    if resp.clicked() {
        if let Some(p) = resp.interact_pointer_pos() {
            let toggle = ui.input(|i| i.modifiers.command);
            let local = p - origin;
            click = Some(CanvasClick { pos: Point::new(local.x as f64, local.y as f64), toggle });
        }
    }
    resp.on_hover_cursor(egui::CursorIcon::Crosshair);
    (rect, click)
}
