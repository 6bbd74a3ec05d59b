use std::path::PathBuf;

use clap::Parser;
use eframe::egui;

use pathfinding_lab::gui::frontend::LabApp;
use pathfinding_lab::persistence::settings::{self, LabSettings};

#[derive(Parser)]
#[command(name = "Pathfinding-Lab", version, about = "Build a graph and watch BFS, DFS or a TSP heuristic run over it")]
struct Args {
    /// Read settings from this file instead of the user config directory
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Milliseconds between two revealed algorithm steps
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,

    /// Start with the sample graph loaded
    #[arg(long)]
    sample: bool,
}

fn main() -> anyhow::Result<()> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::init();
    let args = Args::parse();

    if args.settings.is_some() || args.tick_ms.is_some() {
        let mut s = match &args.settings {
            Some(path) => LabSettings::load_from_path(path)?,
            None => LabSettings::load().unwrap_or_default(),
        };
        if let Some(ms) = args.tick_ms {
            s.tick_interval_ms = ms;
        }
        settings::set_settings_override(s);
    }
    let settings = LabSettings::effective().unwrap_or_else(|e| {
        log::warn!("falling back to default settings: {e}");
        LabSettings::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_size.0, settings.window_size.1])
            // Provide sensible bounds so the UI stays usable on small screens
            .with_min_inner_size([700.0, 420.0])
            .with_resizable(true),
        ..Default::default()
    };
    let with_sample = args.sample;
    eframe::run_native(
        "Pathfinding-Lab",
        options,
        Box::new(move |_cc| Ok(Box::new(LabApp::new(settings, with_sample)) as Box<dyn eframe::App>)),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))
}
