//! **edgesnap**: move the focused window to the next edge.
//!
//! Given where the other windows on the current desktop sit, edgesnap
//! collects every x and y coordinate where some window border or the
//! workarea border lies, then moves the focused window in a cardinal
//! direction until one of its own edges lines up with the nearest of those
//! coordinates.  It never pushes the window off the workarea.
//!
//! # Architecture
//!
//! The snapping logic is pure and lives in [`edges`] (collecting the
//! candidate coordinates) and [`selector`] (picking one).  The
//! [`snapper::Snapper`] ties it to the window manager through two traits:
//!
//! * [`traits::WindowInfo`]: enumerate windows and read their geometry.
//! * [`traits::DesktopInfo`]: read the active desktop's workarea and move
//!   a window.
//!
//! The concrete implementation lives in [`backend`]: a JSON snapshot of
//! window-manager state plus an external move command.

pub mod backend;
pub mod command;
pub mod config;
pub mod edges;
pub mod geometry;
pub mod selector;
pub mod snapper;
pub mod traits;
