//! Environment adapters.
//!
//! This module provides the concrete backend for the
//! [`WindowInfo`](crate::traits::WindowInfo) and
//! [`DesktopInfo`](crate::traits::DesktopInfo) traits: a JSON snapshot of
//! window-manager state, plus an external command that performs the move.
//!
//! Nothing outside this module touches raw window-manager identifiers or
//! spawns processes.

pub mod exec;
pub mod snapshot;
