//! Application configuration.
//!
//! The configuration is loaded from a JSON file, either the one passed with
//! `--config <path>` or `$XDG_CONFIG_HOME/edgesnap/config.json`.  Every
//! section is optional so the file can grow without breaking older ones.
//!
//! # Example
//!
//! ```json
//! {
//!   "snap": { "center": true, "desktop_extremes": true, "min_distance": 12 },
//!   "snapshot": { "command": ["wm-state"] },
//!   "mover": { "command": ["wmctrl", "-i", "-r", "{id}", "-e", "1,{x},{y},-1,-1"] }
//! }
//! ```

use crate::backend::exec::MoverConfig;
use crate::backend::snapshot::SnapshotSource;
use crate::selector::SnapOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
///
/// A minimal `{}` file is valid; all sections fall back to their
/// compiled-in defaults.  Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Edge collection and candidate selection settings.
    #[serde(default)]
    pub snap: SnapOptions,

    /// Where the window-manager snapshot is read from.
    #[serde(default)]
    pub snapshot: SnapshotSource,

    /// How the final move is issued.
    #[serde(default)]
    pub mover: MoverConfig,
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e.0)))
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError(e.to_string()))
    }
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/edgesnap`, falling back
/// to `~/.config/edgesnap`).
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("edgesnap")
}

/// Path of the default config file.
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "snap": {
                "center": false,
                "desktop_extremes": false,
                "collector_midpoint": true,
                "min_distance": 12
            },
            "snapshot": { "file": "/tmp/wm.json" },
            "mover": { "command": ["xdotool", "windowmove", "{id}", "{x}", "{y}"], "dry_run": true }
        }"#;
        let cfg = Config::from_json(json).unwrap();
        assert!(!cfg.snap.center);
        assert!(!cfg.snap.desktop_extremes);
        assert!(cfg.snap.collector_midpoint);
        assert_eq!(cfg.snap.min_distance, 12);
        assert_eq!(cfg.snapshot, SnapshotSource::File("/tmp/wm.json".into()));
        assert_eq!(cfg.mover.command[0], "xdotool");
        assert!(cfg.mover.dry_run);
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg = Config::from_json("{}").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.snap, SnapOptions::default());
        assert!(cfg.snap.center);
        assert!(cfg.snap.desktop_extremes);
        assert!(!cfg.snap.collector_midpoint);
        assert_eq!(cfg.snap.min_distance, 0);
        assert_eq!(cfg.snapshot, SnapshotSource::Stdin);
        assert_eq!(cfg.mover, MoverConfig::default());
    }

    #[test]
    fn deserialize_partial_snap() {
        let cfg = Config::from_json(r#"{ "snap": { "min_distance": 8 } }"#).unwrap();
        assert_eq!(cfg.snap.min_distance, 8);
        assert_eq!(cfg.snap.center, SnapOptions::default().center);
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "snap": {}, "future_section": { "key": 42 } }"#;
        Config::from_json(json).unwrap();
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let err = Config::from_json(r#"{ "snap": { "center": "yes" } }"#).unwrap_err();
        assert!(err.to_string().starts_with("config error:"));
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = Config::load(Path::new("/nonexistent/edgesnap/config.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/edgesnap/config.json"));
    }

    #[test]
    fn default_path_ends_with_config_json() {
        let p = default_config_path();
        assert!(p.ends_with("edgesnap/config.json"));
    }
}
