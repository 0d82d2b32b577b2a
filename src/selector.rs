//! Candidate selection.
//!
//! Given the focused window, a [`Direction`] and the collected edges, pick
//! the coordinate the window's leading edge should move to.  The selector
//! is pure: it never talks to the window manager.

use crate::command::{Axis, Direction};
use crate::edges::EdgeSet;
use crate::geometry::{Desktop, Rect, Window};
use log::debug;
use serde::{Deserialize, Serialize};

/// Tuning knobs for edge collection and candidate selection.
///
/// # Example
///
/// ```json
/// {
///   "center": true,
///   "desktop_extremes": true,
///   "collector_midpoint": false,
///   "min_distance": 0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapOptions {
    /// Offer the position that centers the window on the desktop.
    pub center: bool,
    /// Treat the workarea borders as edges.
    pub desktop_extremes: bool,
    /// Also collect the workarea's half-span as an edge.  Only takes
    /// effect together with `desktop_extremes`.
    pub collector_midpoint: bool,
    /// Ignore candidates closer than this many pixels to the current
    /// position.  Useful for window managers whose reported geometry
    /// excludes the frame, which otherwise produces tiny nudges.
    pub min_distance: i32,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            center: true,
            desktop_extremes: true,
            collector_midpoint: false,
            min_distance: 0,
        }
    }
}

/// Where the focused window's top-left corner should end up.
///
/// Only the coordinate on the direction's axis differs from the window's
/// current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub x: i32,
    pub y: i32,
}

/// The center position for a window of `span`: half the workarea's span
/// minus half the window's.
///
/// Measured from zero, not from the workarea origin, so it centers exactly
/// on workareas anchored at the origin.
pub fn center_candidate(desktop: &Rect, axis: Axis, span: i32) -> i32 {
    (axis.span(desktop) / 2).saturating_sub(span / 2)
}

/// Picks the next snap position for a window.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    options: SnapOptions,
}

impl Selector {
    pub fn new(options: SnapOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SnapOptions {
        &self.options
    }

    /// All positions the window's leading edge could take on `axis`,
    /// before any direction filtering.
    ///
    /// Every collected edge appears twice: once as-is (leading edge flush
    /// with it) and once shifted by the span (trailing edge flush with it).
    pub fn raw_candidates(&self, active: &Window, axis: Axis, desktop: &Desktop, edges: &EdgeSet) -> EdgeSet {
        let span = axis.span(&active.rect);
        let mut candidates = edges.clone();
        candidates.extend(edges.iter().map(|e| e.saturating_sub(span)));
        if self.options.center {
            candidates.insert(center_candidate(&desktop.rect, axis, span));
        }
        candidates
    }

    /// Select the nearest valid position in `direction`, or `None` when the
    /// window cannot move that way.
    ///
    /// A candidate is valid when it moves the leading edge strictly in the
    /// direction of travel and keeps the whole window inside the workarea on
    /// that axis.
    pub fn select_target(
        &self,
        active: &Window,
        direction: Direction,
        desktop: &Desktop,
        x_edges: &EdgeSet,
        y_edges: &EdgeSet,
    ) -> Option<Target> {
        let axis = direction.axis();
        let edges = match axis {
            Axis::X => x_edges,
            Axis::Y => y_edges,
        };
        let edge1 = axis.leading(&active.rect);
        let span = axis.span(&active.rect);
        let d_lead = axis.leading(&desktop.rect);
        let d_trail = axis.trailing(&desktop.rect);
        let min_distance = i64::from(self.options.min_distance);
        let last_fit = d_trail.saturating_sub(span);

        let candidates = self.raw_candidates(active, axis, desktop, edges);
        debug!("{} candidates on {:?}: {:?}", direction, axis, candidates.to_vec());

        let valid = |v: &i32| {
            let v = *v;
            let in_direction = if direction.is_forward() {
                v > edge1 && v <= last_fit
            } else {
                v < edge1 && v >= d_lead
            };
            in_direction && (i64::from(v) - i64::from(edge1)).abs() >= min_distance
        };

        let mut survivors = candidates.iter().filter(valid);
        let chosen = if direction.is_forward() {
            survivors.next()
        } else {
            survivors.last()
        }?;

        let r = &active.rect;
        Some(match axis {
            Axis::X => Target { x: chosen, y: r.top },
            Axis::Y => Target { x: r.left, y: chosen },
        })
    }
}
