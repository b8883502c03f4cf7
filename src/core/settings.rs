use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::core::SessionSeed;

/* ================================ Settings ================================= */

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub version: u32,
    #[serde(default)]
    pub default_sheet_name: String,
    #[serde(default)]
    pub show_location_grid_line: bool,
    #[serde(default)]
    pub watch_files: bool,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

const fn default_poll_interval_ms() -> u64 {
    250
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: 1,
            default_sheet_name: String::new(),
            show_location_grid_line: false,
            watch_files: false,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Settings {
    /// Seed for a new diff tab using the configured default sheet.
    #[must_use]
    pub fn seed(&self, source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> SessionSeed {
        SessionSeed {
            source: source.into(),
            dest: dest.into(),
            default_sheet_name: self.default_sheet_name.clone(),
        }
    }
}

/* ================================== Paths ================================== */

#[must_use]
pub fn settings_dir(root: &Path) -> PathBuf {
    root.join(".sheetdiff")
}

#[must_use]
pub fn settings_file(root: &Path) -> PathBuf {
    settings_dir(root).join("settings.json")
}

pub fn ensure_settings_dir(root: &Path) -> io::Result<PathBuf> {
    let dir = settings_dir(root);
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/* ==================================== IO ==================================== */

/// Missing or unreadable settings yield `None`; callers fall back to defaults.
#[must_use]
pub fn load_settings(root: &Path) -> Option<Settings> {
    let path = settings_file(root);
    let data = fs::read(&path).ok()?;
    match serde_json::from_slice::<Settings>(&data) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt settings");
            None
        }
    }
}

pub fn save_settings(root: &Path, settings: &Settings) -> io::Result<()> {
    ensure_settings_dir(root)?;

    let path = settings_file(root);
    let tmp = path.with_extension("json.tmp");

    let data = serde_json::to_vec_pretty(settings).map_err(|e| io::Error::other(e.to_string()))?;

    fs::write(&tmp, data)?;
    fs::rename(&tmp, &path)?;
    Ok(())
}
