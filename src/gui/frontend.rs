use std::time::{Duration, Instant};

use eframe::egui::{self, Color32};

use crate::gui::canvas;
use crate::lab::algorithms::{format_path, Algorithm};
use crate::lab::edit_dialog::EditRequest;
use crate::lab::editor::EditorMode;
use crate::lab::player::PlayerState;
use crate::lab::session::{LabSession, Notice, NoticeLevel};
use crate::persistence::settings::LabSettings;

const NOTICE_TTL: Duration = Duration::from_secs(4);

// An open label/weight dialog and its text buffer
struct EditDialog {
    request: EditRequest,
    buffer: String,
}

pub struct LabApp {
    session: LabSession,
    settings: LabSettings,
    // Latest notice and when it was raised (transient toast)
    notice: Option<(Notice, Instant)>,
    edit: Option<EditDialog>,
    // Load the sample graph once the canvas size is known
    sample_pending: bool,
    last_canvas_rect: Option<egui::Rect>,
    // Preferences UI state
    show_prefs_window: bool,
    prefs_edit: LabSettings,
    prefs_status: Option<String>,
}

impl LabApp {
    pub fn new(settings: LabSettings, with_sample: bool) -> Self {
        Self {
            session: LabSession::new(&settings),
            prefs_edit: settings.clone(),
            settings,
            notice: None,
            edit: None,
            sample_pending: with_sample,
            last_canvas_rect: None,
            show_prefs_window: false,
            prefs_status: None,
        }
    }

    fn open_prefs(&mut self) {
        self.prefs_edit = self.settings.clone();
        self.prefs_status = None;
        self.show_prefs_window = true;
    }

    fn canvas_size(&self) -> (f64, f64) {
        self.last_canvas_rect
            .map(|r| (r.width() as f64, r.height() as f64))
            .unwrap_or((800.0, 600.0))
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        let locked = self.session.is_locked();
        ui.horizontal_wrapped(|ui| {
            ui.add_enabled_ui(!locked, |ui| {
                for mode in EditorMode::ALL {
                    let selected = self.session.editor().mode() == mode;
                    if ui.selectable_label(selected, mode.to_string()).clicked() {
                        let _ = self.session.set_mode(mode);
                    }
                }
            });
            ui.separator();

            let mut chosen = self.session.algorithm();
            egui::ComboBox::from_id_salt("algorithm")
                .selected_text(chosen.to_string())
                .show_ui(ui, |ui| {
                    for algo in Algorithm::ALL {
                        ui.selectable_value(&mut chosen, algo, algo.to_string());
                    }
                });
            if chosen != self.session.algorithm() {
                self.session.set_algorithm(chosen);
            }

            if ui.button("Visualize").clicked() {
                let _ = self.session.visualize(Instant::now());
            }
            if ui.button("Reset").clicked() {
                self.session.reset();
            }
            ui.separator();

            ui.add_enabled_ui(!locked, |ui| {
                let has_nodes = !self.session.editor().selection().node_ids().is_empty();
                let has_any = !self.session.editor().selection().is_empty();
                if ui.add_enabled(has_any, egui::Button::new("Delete Selected")).clicked() {
                    let _ = self.session.delete_selected();
                }
                if ui.add_enabled(has_nodes, egui::Button::new("Copy Selected")).clicked() {
                    let _ = self.session.copy_selected();
                }
                if ui.button("Load Sample").clicked() {
                    let (w, h) = self.canvas_size();
                    let _ = self.session.load_sample(w, h);
                }
                if ui.button("Clear Graph").clicked() {
                    self.session.clear_graph();
                }
            });
            ui.separator();
            if ui.button("Preferences…").clicked() {
                self.open_prefs();
            }
        });
    }

    fn status_bar(&mut self, ui: &mut egui::Ui) {
        let graph = self.session.graph();
        let player = self.session.player();
        ui.horizontal_wrapped(|ui| {
            ui.label(format!("Mode: {}", self.session.editor().mode()));
            ui.separator();
            ui.label(format!("{} node(s), {} edge(s)", graph.node_count(), graph.edge_count()));
            ui.separator();
            let fmt_id = |id: Option<u32>| id.map_or_else(|| "-".to_string(), |id| id.to_string());
            ui.label(format!("Start: {}", fmt_id(graph.start())));
            if self.session.algorithm().needs_end() {
                ui.label(format!("End: {}", fmt_id(graph.end())));
            }
            if let Some(anchor) = self.session.editor().pending_anchor() {
                ui.separator();
                ui.label(format!("Connecting from {anchor}…"));
            }
            ui.separator();
            let (shown, total) = player.progress();
            match player.state() {
                PlayerState::Idle => {}
                PlayerState::Playing => {
                    ui.label(format!("Step {shown}/{total}"));
                    if let Some(step) = player.current_step() {
                        if !step.path.is_empty() {
                            ui.weak(format_path(&step.path));
                        }
                    }
                }
                PlayerState::Completed => {
                    if let Some(summary) = player.summary() {
                        if summary.found {
                            ui.colored_label(
                                Color32::from_rgb(34, 197, 94),
                                format!("{}  (cost {:.2})", summary.path_string, summary.total_cost),
                            );
                        } else {
                            ui.label("No path found");
                        }
                        if ui.small_button("Copy result").clicked() {
                            match serde_json::to_string_pretty(summary) {
                                Ok(json) => ui.ctx().copy_text(json),
                                Err(e) => log::warn!("could not serialize result: {e}"),
                            }
                        }
                    }
                }
            }
        });
    }

    fn edit_window(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.edit.as_mut() else { return };
        let mut submit = false;
        let mut cancel = false;
        egui::Window::new(dialog.request.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                let resp = ui.text_edit_singleline(&mut dialog.buffer);
                resp.request_focus();
                if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    cancel = true;
                }
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() { submit = true; }
                    if ui.button("Cancel").clicked() { cancel = true; }
                });
            });
        if submit || cancel {
            if let Some(dialog) = self.edit.take() {
                if submit {
                    dialog.request.submit(dialog.buffer);
                } else {
                    dialog.request.cancel();
                }
            }
        }
    }

    fn prefs_window(&mut self, ctx: &egui::Context) {
        if !self.show_prefs_window {
            return;
        }
        let mut open = true;
        let mut save = false;
        egui::Window::new("Preferences")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("prefs_grid").num_columns(2).show(ui, |ui| {
                    ui.label("Step interval (ms)");
                    ui.add(egui::DragValue::new(&mut self.prefs_edit.tick_interval_ms).range(10..=5000));
                    ui.end_row();
                    ui.label("Node radius");
                    ui.add(egui::DragValue::new(&mut self.prefs_edit.node_radius).range(4.0..=40.0));
                    ui.end_row();
                    ui.label("Edge click tolerance");
                    ui.add(egui::DragValue::new(&mut self.prefs_edit.edge_tolerance).range(2.0..=40.0));
                    ui.end_row();
                    ui.label("Copy offset");
                    ui.horizontal(|ui| {
                        ui.add(egui::DragValue::new(&mut self.prefs_edit.copy_offset.0));
                        ui.add(egui::DragValue::new(&mut self.prefs_edit.copy_offset.1));
                    });
                    ui.end_row();
                });
                ui.small(format!("Stored in {}", LabSettings::settings_dir().display()));
                if let Some(status) = &self.prefs_status {
                    ui.label(status);
                }
                ui.separator();
                if ui.button("Save").clicked() {
                    save = true;
                }
            });
        if save {
            self.settings = self.prefs_edit.clone();
            self.session.apply_settings(&self.settings);
            self.prefs_status = Some(match self.settings.save() {
                Ok(path) => format!("Saved to {}", path.display()),
                Err(e) => format!("Save failed: {e}"),
            });
        }
        self.show_prefs_window = open;
    }

    fn toast(&mut self, ctx: &egui::Context, now: Instant) {
        let Some((notice, raised)) = &self.notice else { return };
        let age = now.duration_since(*raised);
        if age >= NOTICE_TTL {
            self.notice = None;
            return;
        }
        let color = match notice.level {
            NoticeLevel::Info => Color32::LIGHT_BLUE,
            NoticeLevel::Success => Color32::from_rgb(34, 197, 94),
            NoticeLevel::Error => Color32::from_rgb(239, 68, 68),
        };
        egui::Area::new(egui::Id::new("notice_toast"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -40.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.colored_label(color, &notice.text);
                });
            });
        ctx.request_repaint_after(NOTICE_TTL - age);
    }
}

// Delete in a focused text field (preferences, edit dialog) edits text only
fn delete_key_deletes_selection(typing: bool, locked: bool) -> bool {
    !typing && !locked
}

impl eframe::App for LabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.session.tick(now);
        self.session.apply_edits();
        if let Some(latest) = self.session.take_notices().pop() {
            self.notice = Some((latest, now));
        }
        if let Some(wait) = self.session.player().time_until_next(now) {
            ctx.request_repaint_after(wait);
        }

        let typing = self.edit.is_some() || ctx.wants_keyboard_input();
        if delete_key_deletes_selection(typing, self.session.is_locked())
            && ctx.input(|i| i.key_pressed(egui::Key::Delete))
        {
            let _ = self.session.delete_selected();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.status_bar(ui));

        let mut click = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            let (rect, c) = canvas::show(ui, &self.session, self.settings.node_radius as f32);
            self.last_canvas_rect = Some(rect);
            click = c;
        });

        if self.sample_pending {
            self.sample_pending = false;
            let (w, h) = self.canvas_size();
            let _ = self.session.load_sample(w, h);
        }
        // Clicks only reach the canvas while no dialog is open
        if let (Some(c), None) = (click, self.edit.as_ref()) {
            if let Some(request) = self.session.click(c.pos, c.toggle) {
                let buffer = request.initial.clone();
                self.edit = Some(EditDialog { request, buffer });
            }
        }

        self.edit_window(ctx);
        self.prefs_window(ctx);
        self.toast(ctx, now);
    }
}
