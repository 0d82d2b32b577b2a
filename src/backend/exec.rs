//! External process helpers: running the snapshot command and issuing the
//! move command.
//!
//! No shell is involved.  Commands are argv vectors taken verbatim from the
//! configuration, with `{id}`, `{x}` and `{y}` substituted for moves.

use super::snapshot::SnapshotError;
use crate::geometry::WindowId;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::process::Command;

/// Placeholder value telling the window manager to keep an axis as is.
pub const KEEP_AXIS: i32 = -1;

/// How moves are carried out.
///
/// # Example
///
/// ```json
/// { "command": ["wmctrl", "-i", "-r", "{id}", "-e", "1,{x},{y},-1,-1"], "dry_run": false }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoverConfig {
    /// Argv template run for every move.
    pub command: Vec<String>,
    /// Log the rendered command instead of running it.
    pub dry_run: bool,
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            command: ["wmctrl", "-i", "-r", "{id}", "-e", "1,{x},{y},-1,-1"]
                .into_iter()
                .map(String::from)
                .collect(),
            dry_run: false,
        }
    }
}

/// Executes [`MoveCommand`](crate::command::MoveCommand)s on behalf of a
/// backend.
#[derive(Debug)]
pub struct Mover {
    template: Vec<String>,
    dry_run: bool,
    /// Rendered argv of every move issued, run or not.
    issued: RefCell<Vec<Vec<String>>>,
}

impl Mover {
    pub fn new(template: Vec<String>, dry_run: bool) -> Self {
        Self {
            template,
            dry_run,
            issued: RefCell::new(Vec::new()),
        }
    }

    pub fn from_config(config: &MoverConfig) -> Self {
        Self::new(config.command.clone(), config.dry_run)
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Commands issued so far.
    pub fn issued(&self) -> Vec<Vec<String>> {
        self.issued.borrow().clone()
    }

    pub fn move_window(&self, window: &WindowId, x: Option<i32>, y: Option<i32>) -> Result<(), SnapshotError> {
        let argv = render(&self.template, window, x, y);
        self.issued.borrow_mut().push(argv.clone());
        if self.dry_run {
            info!("dry run: {}", argv.join(" "));
            return Ok(());
        }
        run(&argv).map(|_| ())
    }
}

/// Substitute `{id}`, `{x}` and `{y}` in every argument of `template`.
///
/// An axis without a coordinate is rendered as [`KEEP_AXIS`].
pub fn render(template: &[String], window: &WindowId, x: Option<i32>, y: Option<i32>) -> Vec<String> {
    let x = x.unwrap_or(KEEP_AXIS).to_string();
    let y = y.unwrap_or(KEEP_AXIS).to_string();
    template
        .iter()
        .map(|arg| {
            arg.replace("{id}", &window.0)
                .replace("{x}", &x)
                .replace("{y}", &y)
        })
        .collect()
}

/// Run `argv` to completion and return its stdout.
///
/// A spawn failure or a non-zero exit status is an error carrying stderr.
pub fn run(argv: &[String]) -> Result<String, SnapshotError> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| SnapshotError::Command("empty command".into()))?;
    debug!("running {}", argv.join(" "));

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| SnapshotError::Command(format!("spawn {}: {}", program, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SnapshotError::Command(format!(
            "{} exited with {}: {}",
            program,
            output.status,
            stderr.trim()
        )));
    }

    String::from_utf8(output.stdout)
        .map_err(|e| SnapshotError::Command(format!("{}: utf-8: {}", program, e)))
}
