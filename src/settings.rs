// Durable UI settings. Only the theme selection is persisted — patterns are
// deliberately not saved. Loaded on startup, written on quit and whenever
// the theme changes.

use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

const BEATBOX_DIR: &str = ".beatbox";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self { theme: crate::tui::DEFAULT_THEME.to_string() }
    }
}

// <base_dir>/.beatbox/settings.json
fn settings_path(base_dir: &Path) -> PathBuf {
    base_dir.join(BEATBOX_DIR).join(SETTINGS_FILE)
}

/// Missing or unreadable settings fall back to defaults.
pub fn load_settings(base_dir: &Path) -> Settings {
    let path = settings_path(base_dir);
    let Ok(data) = std::fs::read_to_string(&path) else {
        return Settings::default();
    };
    match serde_json::from_str(&data) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("ignoring corrupt {}: {e}", path.display());
            Settings::default()
        }
    }
}

pub fn save_settings(base_dir: &Path, settings: &Settings) -> anyhow::Result<()> {
    let path = settings_path(base_dir);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings { theme: "forest".to_string() };
        save_settings(dir.path(), &settings).unwrap();
        assert_eq!(load_settings(dir.path()), settings);
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn corrupt_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(BEATBOX_DIR);
        std::fs::create_dir_all(&path).unwrap();
        std::fs::write(path.join(SETTINGS_FILE), "{not json").unwrap();
        assert_eq!(load_settings(dir.path()), Settings::default());
    }
}
