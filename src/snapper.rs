//! The orchestrator that ties the backends, edge collection and candidate
//! selection together.
//!
//! [`Snapper`] takes one snapshot of window-manager state per request,
//! plans a [`MoveCommand`] without side effects and executes it exactly
//! once.

use crate::command::{Axis, Direction, MoveCommand};
use crate::edges::collect_edges;
use crate::geometry::{Desktop, DesktopId, Window, WindowId};
use crate::selector::{Selector, SnapOptions};
use crate::traits::{DesktopInfo, WindowInfo};
use log::{debug, info, warn};

/// Possible errors from a snap request.
#[derive(Debug, thiserror::Error)]
pub enum SnapError {
    /// The direction token is not one of left, right, up, down.
    #[error("{0}")]
    InvalidDirection(#[from] crate::command::ParseDirectionError),

    /// The focused window is not among the windows on the active desktop.
    #[error("active window {0} not found on the active desktop")]
    ActiveWindowNotFound(WindowId),

    /// The window manager reported an active desktop it has no workarea for.
    #[error("no workarea for desktop {0}")]
    NoDesktopMatch(DesktopId),

    /// A backend query or the move itself failed.
    #[error("window manager error: {0}")]
    EnvironmentQueryFailed(String),
}

/// What a snap request ended up doing.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The command was issued to the window manager.
    Moved(MoveCommand),
    /// Nothing lies in the requested direction; no command was issued.
    NoValidTarget,
}

/// Everything a plan is computed from, captured once per request.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub desktop: Desktop,
    pub active: Window,
    /// Resolvable windows on the desktop, the active one excluded.
    pub others: Vec<Window>,
}

/// Moves the focused window to the next edge in a direction.
///
/// Generic over the two backend traits so it is independent of any
/// concrete window manager.
///
/// # Typical usage
///
/// ```ignore
/// let backend = SnapshotBackend::from_reader(std::io::stdin(), mover)?;
/// let snapper = Snapper::new(&backend, &backend, SnapOptions::default());
/// snapper.move_active_window("right")?;
/// ```
pub struct Snapper<W: WindowInfo, D: DesktopInfo> {
    windows: W,
    desktops: D,
    selector: Selector,
}

impl<W: WindowInfo, D: DesktopInfo> Snapper<W, D> {
    pub fn new(windows: W, desktops: D, options: SnapOptions) -> Self {
        Self {
            windows,
            desktops,
            selector: Selector::new(options),
        }
    }

    pub fn options(&self) -> &SnapOptions {
        self.selector.options()
    }

    /// Parse `direction` and snap the focused window that way.
    ///
    /// An unknown direction is rejected before the backend is queried.
    pub fn move_active_window(&self, direction: &str) -> Result<Outcome, SnapError> {
        let direction: Direction = direction.parse()?;
        self.snap(direction)
    }

    /// Plan and, if there is somewhere to go, execute a move.
    pub fn snap(&self, direction: Direction) -> Result<Outcome, SnapError> {
        match self.plan(direction)? {
            Some(cmd) => {
                let issued = self.execute(cmd)?;
                Ok(Outcome::Moved(issued))
            }
            None => {
                info!("nowhere to move {}", direction);
                Ok(Outcome::NoValidTarget)
            }
        }
    }

    /// Compute the move for `direction` without issuing it.
    pub fn plan(&self, direction: Direction) -> Result<Option<MoveCommand>, SnapError> {
        let snapshot = self.snapshot()?;
        Ok(self.plan_from(&snapshot, direction))
    }

    /// Compute the move for `direction` from an existing snapshot.
    pub fn plan_from(&self, snapshot: &Snapshot, direction: Direction) -> Option<MoveCommand> {
        let opts = self.selector.options();
        let (xs, ys) = collect_edges(
            &snapshot.desktop,
            &snapshot.others,
            opts.desktop_extremes,
            opts.collector_midpoint,
        );
        debug!("x edges: {:?}", xs.to_vec());
        debug!("y edges: {:?}", ys.to_vec());

        let target = self
            .selector
            .select_target(&snapshot.active, direction, &snapshot.desktop, &xs, &ys)?;
        let axis = direction.axis();
        let coordinate = match axis {
            Axis::X => target.x,
            Axis::Y => target.y,
        };
        Some(MoveCommand::along(snapshot.active.id.clone(), axis, coordinate))
    }

    /// Issue `cmd` to the window manager and hand it back once it has been
    /// accepted.
    pub fn execute(&self, cmd: MoveCommand) -> Result<MoveCommand, SnapError> {
        info!("{}", cmd);
        self.desktops
            .move_window(&cmd.window, cmd.x, cmd.y)
            .map_err(|e| SnapError::EnvironmentQueryFailed(e.to_string()))?;
        Ok(cmd)
    }

    /// Query the backends for the active desktop, the focused window and
    /// everything else on that desktop.
    pub fn snapshot(&self) -> Result<Snapshot, SnapError> {
        let desktop_id = self
            .desktops
            .active_desktop_id()
            .map_err(|e| SnapError::EnvironmentQueryFailed(e.to_string()))?;
        let desktop = self
            .desktops
            .desktop_borders(&desktop_id)
            .map_err(|e| SnapError::EnvironmentQueryFailed(e.to_string()))?
            .ok_or_else(|| SnapError::NoDesktopMatch(desktop_id.clone()))?;

        let active_id = self
            .windows
            .active_window_id()
            .map_err(|e| SnapError::EnvironmentQueryFailed(e.to_string()))?;
        let ids = self
            .windows
            .list_window_ids(&desktop_id)
            .map_err(|e| SnapError::EnvironmentQueryFailed(e.to_string()))?;

        let mut active = None;
        let mut others = Vec::with_capacity(ids.len());
        for id in ids {
            let geometry = self
                .windows
                .window_geometry(&id)
                .map_err(|e| SnapError::EnvironmentQueryFailed(e.to_string()))?;
            match geometry {
                Some(w) if w.id == active_id => active = Some(w),
                Some(w) => others.push(w),
                None => warn!("skipping window {}: geometry unavailable", id),
            }
        }

        let active = active.ok_or(SnapError::ActiveWindowNotFound(active_id))?;
        debug!(
            "desktop {} workarea {:?}, active {} at {:?}, {} other window(s)",
            desktop.id,
            desktop.rect,
            active.id,
            active.rect,
            others.len()
        );
        Ok(Snapshot {
            desktop,
            active,
            others,
        })
    }
}

//  Tests
