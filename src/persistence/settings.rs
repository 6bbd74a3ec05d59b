use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::graph_utils::geometry::HitConfig;

const APP_DIR: &str = "Pathfinding-Lab";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabSettings {
    // Delay between two revealed algorithm steps
    pub tick_interval_ms: u64,
    // Drawn node radius; clicks resolve to a node within 1.5x this
    pub node_radius: f64,
    // How far from an edge's segment a click still selects it
    pub edge_tolerance: f64,
    // Where "Copy Selected" places the copies relative to the originals
    pub copy_offset: (f64, f64),
    pub window_size: (f32, f32),
}

impl Default for LabSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 200,
            node_radius: 12.0,
            edge_tolerance: 10.0,
            copy_offset: (50.0, 50.0),
            window_size: (1200.0, 760.0),
        }
    }
}

static SETTINGS_OVERRIDE: OnceCell<LabSettings> = OnceCell::new();

/// Install settings that take precedence over the on-disk file (from the CLI).
pub fn set_settings_override(settings: LabSettings) {
    let _ = SETTINGS_OVERRIDE.set(settings);
}

impl LabSettings {
    fn config_dir() -> PathBuf {
        // Cross-platform user config dir
        #[cfg(target_os = "macos")]
        {
            // ~/Library/Application Support/Pathfinding-Lab
            let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("~"));
            return home.join("Library").join("Application Support").join(APP_DIR);
        }
        #[cfg(target_os = "windows")]
        {
            // %APPDATA%\Pathfinding-Lab
            if let Ok(appdata) = std::env::var("APPDATA") {
                return PathBuf::from(appdata).join(APP_DIR);
            }
            return PathBuf::from(APP_DIR);
        }
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            // $XDG_CONFIG_HOME/Pathfinding-Lab or ~/.config/Pathfinding-Lab
            if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
                return PathBuf::from(xdg).join(APP_DIR);
            }
            let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("~"));
            return home.join(".config").join(APP_DIR);
        }
    }

    /// Return the directory where the settings file (settings.json) is stored.
    pub fn settings_dir() -> PathBuf {
        Self::config_dir()
    }

    /// The CLI override when one was installed, otherwise the user's settings file.
    pub fn effective() -> anyhow::Result<Self> {
        if let Some(settings) = SETTINGS_OVERRIDE.get() {
            return Ok(settings.clone());
        }
        Self::load()
    }

    pub fn load() -> anyhow::Result<Self> {
        Self::load_from_dir(&Self::config_dir())
    }

    /// Read `settings.json` from `dir`, migrating a legacy `settings.ron`
    /// when only that exists. No file at all yields the defaults.
    pub fn load_from_dir(dir: &Path) -> anyhow::Result<Self> {
        let json_path = dir.join("settings.json");
        if json_path.exists() {
            return Self::load_from_path(&json_path);
        }
        let ron_path = dir.join("settings.ron");
        if ron_path.exists() {
            let v = Self::load_from_path(&ron_path)?;
            // Save immediately to JSON for future reads
            if let Err(e) = v.save_to_dir(dir) {
                log::warn!("could not migrate {} to JSON: {e}", ron_path.display());
            }
            return Ok(v);
        }
        Ok(Self::default())
    }

    /// Read a settings file; `.ron` files are parsed as RON, anything else as JSON.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let mut f = fs::File::open(path)?;
        let mut s = String::new();
        f.read_to_string(&mut s)?;
        let v: Self = if path.extension().is_some_and(|e| e == "ron") {
            ron::from_str(&s)?
        } else {
            serde_json::from_str(&s)?
        };
        log::debug!("loaded settings from {}", path.display());
        Ok(v)
    }

    pub fn save(&self) -> anyhow::Result<PathBuf> {
        self.save_to_dir(&Self::config_dir())
    }

    pub fn save_to_dir(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join("settings.json");
        let s = serde_json::to_string_pretty(self)?;
        let mut f = fs::File::create(&path)?;
        f.write_all(s.as_bytes())?;
        Ok(path)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn hit_config(&self) -> HitConfig {
        HitConfig::new(self.node_radius, self.edge_tolerance)
    }
}
