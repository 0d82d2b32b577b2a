//! [`WindowInfo`] / [`DesktopInfo`] implementation backed by a JSON
//! snapshot of window-manager state.
//!
//! The snapshot is read once per invocation, from a file, stdin or the
//! stdout of a helper command, so every query within one request sees the
//! same state.  Moves are delegated to a [`Mover`].
//!
//! # Wire format
//!
//! ```json
//! {
//!   "active_window": "0x02c00177",
//!   "active_desktop": 0,
//!   "desktops": [
//!     { "id": 0, "active": true, "x": 0, "y": 32, "width": 1920, "height": 1048 }
//!   ],
//!   "windows": [
//!     { "id": 46137719, "desktop": 0, "x": 0, "y": 32, "width": 960, "height": 1048 },
//!     { "id": "0x02c00200", "desktop": -1, "x": null, "y": null, "width": null, "height": null }
//!   ]
//! }
//! ```
//!
//! Window ids may be JSON numbers, decimal strings or hex strings; they are
//! all normalised to `0x%08x` so ids from different tools compare equal.
//! A window on desktop `-1` is sticky and shows up on every desktop.

use super::exec::{self, Mover};
use crate::geometry::{Desktop, DesktopId, Rect, Window, WindowId};
use crate::traits::{DesktopInfo, WindowInfo};
use log::debug;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::PathBuf;

/// Desktop id used by EWMH for windows shown on all desktops.
const STICKY_DESKTOP: &str = "-1";

/// Where the snapshot JSON comes from.
///
/// On the wire: `"stdin"`, `{"file": "/path"}` or `{"command": [argv…]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotSource {
    #[default]
    Stdin,
    File(PathBuf),
    Command(Vec<String>),
}

/// Errors produced by the snapshot backend.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("command failed: {0}")]
    Command(String),
    #[error("snapshot names no active desktop")]
    NoActiveDesktop,
    #[error("desktop {0} has a workarea outside the coordinate range")]
    Geometry(DesktopId),
}

//  Serde structs for the snapshot

#[derive(Debug, Clone, Deserialize)]
struct SnapshotJson {
    #[serde(deserialize_with = "window_id")]
    active_window: WindowId,
    #[serde(default, deserialize_with = "optional_desktop_id")]
    active_desktop: Option<DesktopId>,
    desktops: Vec<DesktopJson>,
    #[serde(default)]
    windows: Vec<WindowJson>,
}

/// A desktop's workarea.
#[derive(Debug, Clone, Deserialize)]
struct DesktopJson {
    #[serde(deserialize_with = "desktop_id")]
    id: DesktopId,
    #[serde(default)]
    active: bool,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

/// A window; any missing coordinate, negative size or far border past
/// `i32::MAX` makes it unresolvable.
#[derive(Debug, Clone, Deserialize)]
struct WindowJson {
    #[serde(deserialize_with = "window_id")]
    id: WindowId,
    #[serde(deserialize_with = "desktop_id")]
    desktop: DesktopId,
    x: Option<i32>,
    y: Option<i32>,
    width: Option<i32>,
    height: Option<i32>,
}

impl WindowJson {
    fn resolve(&self) -> Option<Window> {
        let (x, y, w, h) = (self.x?, self.y?, self.width?, self.height?);
        if w < 0 || h < 0 {
            return None;
        }
        Some(Window {
            id: self.id.clone(),
            desktop: self.desktop.clone(),
            rect: Rect::checked_from_origin_size(x, y, w, h)?,
        })
    }
}

//  Id normalisation

/// Canonical form of a window id.
///
/// Hex (`0x2c00177`) and decimal (`46137719`) spellings of the same X11
/// window map to `0x02c00177`.  Anything else is kept, trimmed and
/// lower-cased.
pub fn normalize_window_id(raw: &str) -> WindowId {
    let s = raw.trim().to_lowercase();
    let parsed = match s.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => s.parse::<u64>().ok(),
    };
    match parsed {
        Some(n) => WindowId(format!("0x{:08x}", n)),
        None => WindowId(s),
    }
}

/// Accepts a JSON number or string and yields its string form.
struct IdVisitor;

impl<'de> Visitor<'de> for IdVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "integer or string id")
    }

    fn visit_u64<E>(self, n: u64) -> Result<String, E> {
        Ok(n.to_string())
    }

    fn visit_i64<E>(self, n: i64) -> Result<String, E> {
        Ok(n.to_string())
    }

    fn visit_str<E>(self, s: &str) -> Result<String, E>
    where
        E: de::Error,
    {
        Ok(s.trim().to_string())
    }
}

fn window_id<'de, D>(deserializer: D) -> Result<WindowId, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = deserializer.deserialize_any(IdVisitor)?;
    Ok(normalize_window_id(&raw))
}

fn desktop_id<'de, D>(deserializer: D) -> Result<DesktopId, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IdVisitor).map(DesktopId)
}

/// Like [`IdVisitor`] for a desktop id that may be `null`.
struct OptionalDesktopVisitor;

impl<'de> Visitor<'de> for OptionalDesktopVisitor {
    type Value = Option<DesktopId>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "null, integer or string id")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        desktop_id(deserializer).map(Some)
    }
}

fn optional_desktop_id<'de, D>(deserializer: D) -> Result<Option<DesktopId>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OptionalDesktopVisitor)
}

//  Backend

/// Snapshot-backed window manager.
#[derive(Debug)]
pub struct SnapshotBackend {
    snapshot: SnapshotJson,
    mover: Mover,
}

impl SnapshotBackend {
    /// Parse a snapshot from a JSON string.
    pub fn from_json(json: &str, mover: Mover) -> Result<Self, SnapshotError> {
        let snapshot: SnapshotJson = serde_json::from_str(json)?;
        debug!(
            "snapshot: {} desktop(s), {} window(s), active window {}",
            snapshot.desktops.len(),
            snapshot.windows.len(),
            snapshot.active_window
        );
        Ok(Self { snapshot, mover })
    }

    /// Read the whole of `reader` and parse it as a snapshot.
    pub fn from_reader(mut reader: impl Read, mover: Mover) -> Result<Self, SnapshotError> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json(&json, mover)
    }

    /// Load a snapshot from `source`.
    pub fn load(source: &SnapshotSource, mover: Mover) -> Result<Self, SnapshotError> {
        match source {
            SnapshotSource::Stdin => Self::from_reader(std::io::stdin().lock(), mover),
            SnapshotSource::File(path) => {
                let json = std::fs::read_to_string(path)?;
                Self::from_json(&json, mover)
            }
            SnapshotSource::Command(argv) => {
                let json = exec::run(argv)?;
                Self::from_json(&json, mover)
            }
        }
    }

    pub fn mover(&self) -> &Mover {
        &self.mover
    }
}

impl WindowInfo for SnapshotBackend {
    type Error = SnapshotError;

    fn list_window_ids(&self, desktop: &DesktopId) -> Result<Vec<WindowId>, Self::Error> {
        Ok(self
            .snapshot
            .windows
            .iter()
            .filter(|w| &w.desktop == desktop || w.desktop.0 == STICKY_DESKTOP)
            .map(|w| w.id.clone())
            .collect())
    }

    fn window_geometry(&self, id: &WindowId) -> Result<Option<Window>, Self::Error> {
        Ok(self
            .snapshot
            .windows
            .iter()
            .find(|w| &w.id == id)
            .and_then(WindowJson::resolve))
    }

    fn active_window_id(&self) -> Result<WindowId, Self::Error> {
        Ok(self.snapshot.active_window.clone())
    }
}

impl DesktopInfo for SnapshotBackend {
    type Error = SnapshotError;

    fn active_desktop_id(&self) -> Result<DesktopId, Self::Error> {
        if let Some(id) = &self.snapshot.active_desktop {
            return Ok(id.clone());
        }
        self.snapshot
            .desktops
            .iter()
            .find(|d| d.active)
            .map(|d| d.id.clone())
            .ok_or(SnapshotError::NoActiveDesktop)
    }

    fn desktop_borders(&self, desktop: &DesktopId) -> Result<Option<Desktop>, Self::Error> {
        let Some(d) = self.snapshot.desktops.iter().find(|d| &d.id == desktop) else {
            return Ok(None);
        };
        let rect = Rect::checked_from_origin_size(d.x, d.y, d.width, d.height)
            .ok_or_else(|| SnapshotError::Geometry(d.id.clone()))?;
        let active = self.active_desktop_id().ok();
        Ok(Some(Desktop {
            id: d.id.clone(),
            active: d.active || active.as_ref() == Some(&d.id),
            rect,
        }))
    }

    fn move_window(&self, window: &WindowId, x: Option<i32>, y: Option<i32>) -> Result<(), Self::Error> {
        self.mover.move_window(window, x, y)
    }
}
