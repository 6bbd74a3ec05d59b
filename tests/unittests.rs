use std::collections::HashSet;
use std::time::{Duration, Instant};

use pathfinding_lab::error::LabError;
use pathfinding_lab::graph_utils::geometry::{distance, Point};
use pathfinding_lab::graph_utils::graph::{EdgeInsert, GraphStore, NodeId};
use pathfinding_lab::lab::algorithms::{self, Algorithm};
use pathfinding_lab::lab::edit_dialog::{EditResult, EditTarget};
use pathfinding_lab::lab::editor::{ClickOutcome, Editor, EditorMode, Selection};
use pathfinding_lab::lab::player::{PlayerEvent, PlayerState};
use pathfinding_lab::lab::session::{LabSession, NoticeLevel};
use pathfinding_lab::persistence::settings::LabSettings;
use rstest::rstest;

fn new_graph() -> GraphStore {
    GraphStore::new()
}

// 1@(0,0), 2@(10,0), 3@(10,10) with edges 1-2 and 2-3 of weight 10
fn triangle() -> GraphStore {
    let mut g = new_graph();
    g.add_node(0.0, 0.0);
    g.add_node(10.0, 0.0);
    g.add_node(10.0, 10.0);
    g.add_edge(1, 2, 10.0).expect("edge 1-2");
    g.add_edge(2, 3, 10.0).expect("edge 2-3");
    g
}

fn assert_valid_path(g: &GraphStore, path: &[NodeId]) {
    for w in path.windows(2) {
        assert!(g.edge_between(w[0], w[1]).is_some(), "no edge between {} and {}", w[0], w[1]);
    }
}

// Run the session's player to completion, one tick per interval
fn play_out(session: &mut LabSession, t0: Instant) -> Option<PlayerEvent> {
    let interval = session.player().interval();
    let mut now = t0;
    for _ in 0..1000 {
        if let Some(ev @ PlayerEvent::Completed(_)) = session.tick(now) {
            return Some(ev);
        }
        now += interval;
    }
    None
}

#[test]
fn graph_assigns_max_plus_one_ids() {
    let mut g = new_graph();
    assert_eq!(g.add_node(0.0, 0.0), 1);
    assert_eq!(g.add_node(50.0, 0.0), 2);
    assert_eq!(g.add_node(100.0, 0.0), 3);
    assert!(g.remove_node(3));
    assert_eq!(g.add_node(0.0, 50.0), 3);
    assert!(g.remove_node(1));
    assert_eq!(g.add_node(0.0, 100.0), 4);
}

#[rstest]
#[case(1, 2)]
#[case(2, 1)]
fn graph_duplicate_edge_is_a_noop_in_either_direction(#[case] a: NodeId, #[case] b: NodeId) {
    let mut g = triangle();
    let before = g.edge_count();
    let out = g.add_edge(a, b, 99.0).expect("valid endpoints");
    assert!(matches!(out, EdgeInsert::Duplicate(_)));
    assert_eq!(g.edge_count(), before);
    // the original weight is untouched
    assert_eq!(g.edge_between(1, 2).unwrap().weight, 10.0);
}

#[test]
fn graph_add_edge_missing_endpoints_fails() {
    let mut g = triangle();
    assert_eq!(g.add_edge(41, 42, 1.0), Err(LabError::UnknownNode(41)));
    assert_eq!(g.add_edge(1, 42, 1.0), Err(LabError::UnknownNode(42)));
    assert_eq!(g.edge_count(), 2);
}

#[test]
fn graph_rejects_self_loops() {
    let mut g = triangle();
    assert_eq!(g.add_edge(2, 2, 1.0), Err(LabError::SelfLoop(2)));
}

#[test]
fn graph_default_weight_is_euclidean() {
    let mut g = new_graph();
    let a = g.add_node(0.0, 0.0);
    let b = g.add_node(3.0, 4.0);
    let id = g.add_edge_euclidean(a, b).unwrap().id();
    assert!((g.edge(id).unwrap().weight - 5.0).abs() < 1e-9);
}

#[test]
fn graph_delete_node_cascades_and_clears_markers() {
    let mut g = triangle();
    g.set_start(2).unwrap();
    g.set_end(3).unwrap();
    assert_eq!(g.delete_nodes(&[2]), 1);
    assert_eq!(g.edge_count(), 0);
    assert!(g.edges().all(|e| !e.touches(2)));
    assert_eq!(g.start(), None);
    assert_eq!(g.end(), Some(3));

    assert!(g.remove_node(3));
    assert_eq!(g.end(), None);
}

#[test]
fn graph_duplicate_nodes_copies_positions_and_labels_only() {
    let mut g = triangle();
    assert!(g.update_node_label(1, "A".into()));
    let copies = g.duplicate_nodes(&[1, 2], (50.0, 50.0));
    assert_eq!(copies, vec![4, 5]);
    let c1 = g.node(4).unwrap();
    assert_eq!((c1.x, c1.y), (50.0, 50.0));
    assert_eq!(c1.label.as_deref(), Some("A_copy"));
    assert_eq!(g.node(5).unwrap().label, None);
    assert_eq!(g.edge_count(), 2);
}

#[test]
fn graph_weight_update_rejects_non_finite() {
    let mut g = triangle();
    let id = g.edge_between(1, 2).unwrap().id;
    assert!(!g.update_edge_weight(id, f64::NAN));
    assert!(g.update_edge_weight(id, 2.5));
    assert_eq!(g.edge(id).unwrap().weight, 2.5);
}

#[test]
fn bfs_scenario_path_and_cost() {
    let g = triangle();
    let run = algorithms::run(&g, Algorithm::Bfs, Some(1), Some(3)).unwrap();
    assert_eq!(run.final_path, vec![1, 2, 3]);
    assert!((run.total_cost - 20.0).abs() < 1e-9);
    assert_eq!(run.steps[0].current, None);
}

#[test]
fn bfs_finds_fewest_hops_regardless_of_weight() {
    // chain 1-2-3-4 is cheap, the direct 1-4 edge is expensive
    let mut g = new_graph();
    for i in 0..4 {
        g.add_node(i as f64 * 40.0, 0.0);
    }
    g.add_edge(1, 2, 1.0).unwrap();
    g.add_edge(2, 3, 1.0).unwrap();
    g.add_edge(3, 4, 1.0).unwrap();
    g.add_edge(1, 4, 100.0).unwrap();
    let run = algorithms::run(&g, Algorithm::Bfs, Some(1), Some(4)).unwrap();
    assert_eq!(run.final_path, vec![1, 4]);
    assert_eq!(run.total_cost, 100.0);
}

#[test]
fn bfs_tie_break_follows_edge_creation_order() {
    // two 2-hop routes 1-3-4 and 1-2-4; the 1-3 edge was created first
    let mut g = new_graph();
    for i in 0..4 {
        g.add_node(i as f64 * 40.0, 0.0);
    }
    g.add_edge(1, 3, 1.0).unwrap();
    g.add_edge(1, 2, 1.0).unwrap();
    g.add_edge(2, 4, 1.0).unwrap();
    g.add_edge(3, 4, 1.0).unwrap();
    let run = algorithms::run(&g, Algorithm::Bfs, Some(1), Some(4)).unwrap();
    assert_eq!(run.final_path, vec![1, 3, 4]);
}

#[test]
fn dfs_is_deterministic_and_returns_a_valid_path() {
    let g = GraphStore::sample(800.0, 600.0);
    let first = algorithms::run(&g, Algorithm::Dfs, Some(1), Some(5)).unwrap();
    let second = algorithms::run(&g, Algorithm::Dfs, Some(1), Some(5)).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.final_path.first(), Some(&1));
    assert_eq!(first.final_path.last(), Some(&5));
    assert_valid_path(&g, &first.final_path);
    let expected_cost: f64 = first
        .final_path
        .windows(2)
        .map(|w| g.edge_between(w[0], w[1]).unwrap().weight)
        .sum();
    assert!((first.total_cost - expected_cost).abs() < 1e-9);
}

#[rstest]
#[case(Algorithm::Bfs)]
#[case(Algorithm::Dfs)]
fn disconnected_target_reports_empty_path(#[case] algo: Algorithm) {
    let mut g = triangle();
    let island = g.add_node(500.0, 500.0);
    let run = algorithms::run(&g, algo, Some(1), Some(island)).unwrap();
    assert!(run.final_path.is_empty());
    assert_eq!(run.total_cost, 0.0);
}

#[test]
fn tsp_scenario_visits_nearest_first_and_returns_home() {
    let g = triangle();
    let run = algorithms::run(&g, Algorithm::Tsp, Some(1), None).unwrap();
    assert_eq!(run.final_path, vec![1, 2, 3, 1]);
    // 10 + 10 + 10*sqrt(2)
    assert!((run.total_cost - (20.0 + 10.0 * 2f64.sqrt())).abs() < 1e-6);
    // initial state, two hops, closing hop
    assert_eq!(run.steps.len(), 4);
    assert!(run.steps.iter().all(|s| s.frontier.is_none()));
}

#[test]
fn tsp_tour_covers_every_node_once_and_cost_matches_hops() {
    let mut g = GraphStore::sample(900.0, 700.0);
    // the tour ignores edges entirely
    g.add_node(30.0, 650.0);
    let run = algorithms::run(&g, Algorithm::Tsp, Some(3), Some(1)).unwrap();
    let tour = &run.final_path;
    assert_eq!(tour.first(), Some(&3));
    assert_eq!(tour.last(), Some(&3));
    let inner: HashSet<NodeId> = tour[..tour.len() - 1].iter().copied().collect();
    assert_eq!(inner.len(), g.node_count());
    assert_eq!(tour.len(), g.node_count() + 1);

    let recomputed: f64 = tour
        .windows(2)
        .map(|w| distance(g.node(w[0]).unwrap().pos(), g.node(w[1]).unwrap().pos()))
        .sum();
    assert!((run.total_cost - recomputed).abs() < 1e-6);
}

#[rstest]
#[case(Algorithm::Bfs, None, Some(3), LabError::MissingStart)]
#[case(Algorithm::Bfs, Some(1), None, LabError::MissingEnd)]
#[case(Algorithm::Dfs, Some(1), None, LabError::MissingEnd)]
#[case(Algorithm::Tsp, None, None, LabError::MissingStart)]
fn engine_validates_before_computing(
    #[case] algo: Algorithm,
    #[case] start: Option<NodeId>,
    #[case] end: Option<NodeId>,
    #[case] expected: LabError,
) {
    let g = triangle();
    assert_eq!(algorithms::run(&g, algo, start, end), Err(expected));
}

#[test]
fn tsp_needs_two_nodes() {
    let mut g = new_graph();
    let only = g.add_node(0.0, 0.0);
    assert_eq!(
        algorithms::run(&g, Algorithm::Tsp, Some(only), None),
        Err(LabError::TooFewNodes { count: 1 })
    );
}

#[test]
fn editor_add_node_refuses_to_stack_nodes() {
    let mut g = new_graph();
    let mut ed = Editor::default();
    assert!(matches!(ed.handle_click(&mut g, Point::new(100.0, 100.0), false), ClickOutcome::NodeAdded(1)));
    assert!(matches!(ed.handle_click(&mut g, Point::new(105.0, 100.0), false), ClickOutcome::Ignored));
    assert_eq!(g.node_count(), 1);
}

#[test]
fn editor_add_edge_anchor_flow() {
    let mut g = new_graph();
    g.add_node(0.0, 0.0);
    g.add_node(100.0, 0.0);
    g.add_node(100.0, 100.0);
    let mut ed = Editor::default();
    ed.set_mode(EditorMode::AddEdge);

    assert!(matches!(ed.handle_click(&mut g, Point::new(1.0, 1.0), false), ClickOutcome::AnchorSet(1)));
    assert_eq!(ed.pending_anchor(), Some(1));
    assert!(matches!(ed.handle_click(&mut g, Point::new(99.0, 0.0), false), ClickOutcome::EdgeAdded(_)));
    assert_eq!(ed.pending_anchor(), None);
    assert!((g.edge_between(1, 2).unwrap().weight - 100.0).abs() < 1e-9);

    // reversed pair is a silent duplicate
    ed.handle_click(&mut g, Point::new(100.0, 0.0), false);
    assert!(matches!(ed.handle_click(&mut g, Point::new(0.0, 0.0), false), ClickOutcome::DuplicateEdge(_)));
    assert_eq!(g.edge_count(), 1);

    // clicking empty space cancels the anchor
    ed.handle_click(&mut g, Point::new(100.0, 100.0), false);
    assert!(matches!(ed.handle_click(&mut g, Point::new(300.0, 300.0), false), ClickOutcome::AnchorCleared));
    assert_eq!(ed.pending_anchor(), None);

    // leaving the mode also drops the anchor
    ed.handle_click(&mut g, Point::new(100.0, 100.0), false);
    ed.set_mode(EditorMode::Select);
    assert_eq!(ed.pending_anchor(), None);
}

#[test]
fn editor_selection_is_nodes_xor_edges() {
    let mut g = new_graph();
    g.add_node(0.0, 0.0);
    g.add_node(200.0, 0.0);
    g.add_node(0.0, 200.0);
    let e = g.add_edge_euclidean(1, 2).unwrap().id();
    let mut ed = Editor::default();
    ed.set_mode(EditorMode::Select);

    ed.handle_click(&mut g, Point::new(0.0, 0.0), false);
    ed.handle_click(&mut g, Point::new(0.0, 200.0), true);
    assert_eq!(ed.selection().node_ids(), vec![1, 3]);

    // toggling an edge replaces the node selection
    ed.handle_click(&mut g, Point::new(100.0, 4.0), true);
    assert_eq!(ed.selection(), &Selection::Edges([e].into_iter().collect()));

    // toggling it again empties the selection
    ed.handle_click(&mut g, Point::new(100.0, 4.0), true);
    assert!(ed.selection().is_empty());

    // plain click replaces, plain click on nothing clears
    ed.handle_click(&mut g, Point::new(200.0, 0.0), false);
    assert!(ed.selection().contains_node(2));
    ed.handle_click(&mut g, Point::new(400.0, 400.0), false);
    assert_eq!(ed.selection(), &Selection::Empty);
}

#[test]
fn edit_dialog_validates_weight_and_accepts_any_label() {
    let mut g = new_graph();
    g.add_node(0.0, 0.0);
    g.add_node(100.0, 0.0);
    g.add_node(100.0, 100.0);
    let e12 = g.add_edge(1, 2, 10.0).unwrap().id();
    let mut ed = Editor::default();
    ed.set_mode(EditorMode::Edit);

    let ClickOutcome::EditRequested(req) = ed.handle_click(&mut g, Point::new(50.0, 3.0), false) else {
        panic!("expected an edit request for the edge");
    };
    assert_eq!(req.target, EditTarget::EdgeWeight(e12));
    assert_eq!(req.initial, "10.00");
    req.submit("not a number".into());
    assert!(matches!(ed.apply_edits(&mut g).as_slice(), [EditResult::Rejected(LabError::InvalidWeight(_))]));
    assert_eq!(g.edge(e12).unwrap().weight, 10.0);

    let ClickOutcome::EditRequested(req) = ed.handle_click(&mut g, Point::new(50.0, 3.0), false) else {
        panic!("expected an edit request for the edge");
    };
    req.submit(" 7.5 ".into());
    assert_eq!(ed.apply_edits(&mut g), vec![EditResult::WeightChanged(e12, 7.5)]);

    let ClickOutcome::EditRequested(req) = ed.handle_click(&mut g, Point::new(100.0, 100.0), false) else {
        panic!("expected an edit request for node 3");
    };
    assert_eq!(req.target, EditTarget::NodeLabel(3));
    req.submit(String::new());
    assert_eq!(ed.apply_edits(&mut g), vec![EditResult::LabelChanged(3)]);
    assert_eq!(g.node(3).unwrap().label.as_deref(), Some(""));

    // cancelling and dropping both leave the graph as it was
    let ClickOutcome::EditRequested(req) = ed.handle_click(&mut g, Point::new(0.0, 0.0), false) else {
        panic!("expected an edit request for node 1");
    };
    req.cancel();
    assert_eq!(ed.apply_edits(&mut g), vec![EditResult::Cancelled]);
    if let ClickOutcome::EditRequested(req) = ed.handle_click(&mut g, Point::new(0.0, 0.0), false) {
        drop(req);
    }
    assert!(ed.apply_edits(&mut g).is_empty());
    assert_eq!(g.node(1).unwrap().label, None);
}

#[test]
fn session_plays_to_completion_with_full_final_path() {
    let mut g = triangle();
    g.set_start(1).unwrap();
    g.set_end(3).unwrap();
    let mut s = LabSession::with_graph(g, &LabSettings::default());
    let t0 = Instant::now();
    s.visualize(t0).unwrap();
    assert!(s.is_locked());

    let Some(PlayerEvent::Completed(summary)) = play_out(&mut s, t0) else {
        panic!("playback never completed");
    };
    assert_eq!(summary.path_string, "1 → 2 → 3");
    assert!((summary.total_cost - 20.0).abs() < 1e-9);
    assert_eq!(s.player().state(), PlayerState::Completed);
    assert_eq!(s.current_step().unwrap().path, vec![1, 2, 3]);
    let notices = s.take_notices();
    assert!(notices.iter().any(|n| n.level == NoticeLevel::Success));
}

#[test]
fn session_switching_algorithm_cancels_playback() {
    let mut g = triangle();
    g.set_start(1).unwrap();
    g.set_end(3).unwrap();
    let mut s = LabSession::with_graph(g, &LabSettings::default());
    let t0 = Instant::now();
    s.visualize(t0).unwrap();
    assert!(matches!(s.tick(t0), Some(PlayerEvent::Revealed { index: 0, .. })));

    s.set_algorithm(Algorithm::Dfs);
    assert!(!s.is_locked());
    for i in 1..20 {
        assert_eq!(s.tick(t0 + Duration::from_millis(200 * i)), None);
    }
    assert_eq!(s.current_step(), None);
    assert_eq!(s.summary(), None);
}

#[test]
fn session_locks_graph_while_playing() {
    let mut g = triangle();
    g.set_start(1).unwrap();
    g.set_end(3).unwrap();
    let mut s = LabSession::with_graph(g, &LabSettings::default());
    s.visualize(Instant::now()).unwrap();

    assert_eq!(s.set_mode(EditorMode::AddEdge), Err(LabError::Busy));
    assert!(s.click(Point::new(300.0, 300.0), false).is_none());
    assert_eq!(s.graph().node_count(), 3);
    assert_eq!(s.delete_selected(), Err(LabError::Busy));
    assert!(s.take_notices().iter().all(|n| n.level == NoticeLevel::Error));

    s.reset();
    assert!(!s.is_locked());
    assert_eq!(s.graph().start(), None);
    assert!(s.set_mode(EditorMode::AddEdge).is_ok());
}

#[test]
fn session_tsp_clears_end_and_ignores_end_clicks() {
    let mut g = triangle();
    g.set_start(1).unwrap();
    g.set_end(3).unwrap();
    let mut s = LabSession::with_graph(g, &LabSettings::default());
    s.set_algorithm(Algorithm::Tsp);
    assert_eq!(s.graph().end(), None);

    s.set_mode(EditorMode::SetEnd).unwrap();
    s.click(Point::new(10.0, 10.0), false);
    assert_eq!(s.graph().end(), None);
    assert!(s.visualize(Instant::now()).is_ok());
}

#[test]
fn session_validation_failure_is_reported_and_changes_nothing() {
    let mut s = LabSession::with_graph(triangle(), &LabSettings::default());
    assert_eq!(s.visualize(Instant::now()), Err(LabError::MissingStart));
    assert!(!s.is_locked());
    let notices = s.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
}

#[test]
fn session_delete_and_copy_selected() {
    let mut s = LabSession::with_graph(triangle(), &LabSettings::default());
    s.set_mode(EditorMode::Select).unwrap();
    s.click(Point::new(0.0, 0.0), false);
    s.click(Point::new(10.0, 10.0), true);
    // nodes 2 and 3 are both within reach of (10, 10); the nearest one wins
    assert_eq!(s.editor().selection().node_ids(), vec![1, 3]);

    let copies = s.copy_selected().unwrap();
    assert_eq!(copies, vec![4, 5]);
    assert_eq!(s.editor().selection().node_ids(), vec![4, 5]);

    assert_eq!(s.delete_selected().unwrap(), 2);
    assert_eq!(s.graph().node_count(), 3);
    assert!(s.editor().selection().is_empty());
}

#[test]
fn settings_missing_file_yields_defaults_and_ron_migrates() {
    let dir = std::env::temp_dir().join(format!("pathfinding-lab-test-{}", uuid::Uuid::now_v7()));
    std::fs::create_dir_all(&dir).unwrap();
    assert_eq!(LabSettings::load_from_dir(&dir).unwrap(), LabSettings::default());

    std::fs::write(dir.join("settings.ron"), "(tick_interval_ms: 350)").unwrap();
    let migrated = LabSettings::load_from_dir(&dir).unwrap();
    assert_eq!(migrated.tick_interval_ms, 350);
    assert_eq!(migrated.node_radius, 12.0);
    assert!(dir.join("settings.json").exists());
    assert_eq!(LabSettings::load_from_dir(&dir).unwrap(), migrated);
    assert_eq!(migrated.tick_interval(), Duration::from_millis(350));

    let _ = std::fs::remove_dir_all(&dir);
}

#[rstest]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
#[case(f64::NEG_INFINITY)]
fn graph_add_edge_rejects_non_finite_weight(#[case] weight: f64) {
    let mut g = triangle();
    assert!(matches!(g.add_edge(1, 3, weight), Err(LabError::InvalidWeight(_))));
    assert!(g.edge_between(1, 3).is_none());
    assert_eq!(g.edge_count(), 2);
}

#[test]
fn session_delete_drops_anchor_on_deleted_node() {
    let mut g = new_graph();
    g.add_node(0.0, 0.0);
    g.add_node(200.0, 0.0);
    g.add_node(100.0, 100.0);
    let mut s = LabSession::with_graph(g, &LabSettings::default());

    s.set_mode(EditorMode::Select).unwrap();
    s.click(Point::new(100.0, 100.0), false);
    s.set_mode(EditorMode::AddEdge).unwrap();
    s.click(Point::new(100.0, 100.0), false);
    assert_eq!(s.editor().pending_anchor(), Some(3));

    assert_eq!(s.delete_selected().unwrap(), 1);
    assert_eq!(s.editor().pending_anchor(), None);
    assert!(s.editor().selection().is_empty());

    // the next click starts a fresh edge instead of failing on the gone node
    s.click(Point::new(0.0, 0.0), false);
    assert_eq!(s.editor().pending_anchor(), Some(1));
    s.click(Point::new(200.0, 0.0), false);
    assert!(s.graph().edge_between(1, 2).is_some());
    assert!(s.take_notices().iter().all(|n| n.level != NoticeLevel::Error));
}

#[test]
fn session_delete_edge_keeps_anchor_on_surviving_node() {
    let mut g = new_graph();
    g.add_node(0.0, 0.0);
    g.add_node(200.0, 0.0);
    g.add_node(100.0, 200.0);
    g.add_edge_euclidean(1, 2).unwrap();
    let mut s = LabSession::with_graph(g, &LabSettings::default());

    s.set_mode(EditorMode::Select).unwrap();
    s.click(Point::new(100.0, 3.0), false);
    s.set_mode(EditorMode::AddEdge).unwrap();
    s.click(Point::new(100.0, 200.0), false);

    assert_eq!(s.delete_selected().unwrap(), 1);
    assert_eq!(s.graph().edge_count(), 0);
    assert_eq!(s.editor().pending_anchor(), Some(3));
}

#[test]
fn session_edit_answers_wait_for_playback_to_end() {
    let mut g = new_graph();
    g.add_node(0.0, 0.0);
    g.add_node(100.0, 0.0);
    g.add_node(100.0, 100.0);
    let e12 = g.add_edge(1, 2, 10.0).unwrap().id();
    g.add_edge(2, 3, 10.0).unwrap();
    g.set_start(1).unwrap();
    g.set_end(3).unwrap();
    let mut s = LabSession::with_graph(g, &LabSettings::default());

    s.set_mode(EditorMode::Edit).unwrap();
    let req = s.click(Point::new(50.0, 3.0), false).expect("edge weight dialog");
    assert_eq!(req.target, EditTarget::EdgeWeight(e12));

    let t0 = Instant::now();
    s.visualize(t0).unwrap();
    req.submit("4".into());
    assert!(s.apply_edits().is_empty());
    assert_eq!(s.graph().edge(e12).unwrap().weight, 10.0);

    // the answer is still queued once playback finishes
    play_out(&mut s, t0).expect("playback completes");
    assert_eq!(s.apply_edits(), vec![EditResult::WeightChanged(e12, 4.0)]);
    assert_eq!(s.graph().edge(e12).unwrap().weight, 4.0);
    // the finished result described the old weight
    assert_eq!(s.summary(), None);
}

#[test]
fn editor_forgets_selected_nodes_removed_from_graph() {
    let mut g = new_graph();
    g.add_node(0.0, 0.0);
    g.add_node(200.0, 0.0);
    g.add_node(0.0, 200.0);
    let mut ed = Editor::default();
    ed.set_mode(EditorMode::Select);
    ed.handle_click(&mut g, Point::new(0.0, 0.0), false);
    ed.handle_click(&mut g, Point::new(0.0, 200.0), true);

    assert!(g.remove_node(3));
    ed.forget_missing(&g);
    assert_eq!(ed.selection().node_ids(), vec![1]);

    assert!(g.remove_node(1));
    ed.forget_missing(&g);
    assert_eq!(ed.selection(), &Selection::Empty);
}
