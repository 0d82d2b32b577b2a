//! Entry point for the **edgesnap** command.
//!
//! ```text
//! edgesnap [--config PATH] [--snapshot PATH|-] [--dry-run] <left|right|up|down>
//! ```
//!
//! Exit status: `0` the window was moved, `1` there was nowhere to move,
//! `2` invalid input, `3` the window manager state could not be used.

use clap::Parser;
use edgesnap::backend::exec::Mover;
use edgesnap::backend::snapshot::{SnapshotBackend, SnapshotSource};
use edgesnap::command::Direction;
use edgesnap::config::{default_config_path, Config};
use edgesnap::snapper::{Outcome, SnapError, Snapper};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_NO_TARGET: u8 = 1;
const EXIT_INVALID_INPUT: u8 = 2;
const EXIT_ENVIRONMENT: u8 = 3;

/// Snap the focused window to the next window or desktop edge
#[derive(Debug, Parser)]
#[command(name = "edgesnap")]
#[command(version)]
#[command(about = "Snap the focused window to the next window or desktop edge", long_about = None)]
struct Cli {
    /// Direction to move in: left, right, up or down
    direction: String,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read the window manager snapshot from this file (`-` for stdin)
    #[arg(long, value_name = "PATH", value_parser = parse_snapshot_source)]
    snapshot: Option<SnapshotSource>,

    /// Print the move instead of running it
    #[arg(long)]
    dry_run: bool,
}

fn parse_snapshot_source(arg: &str) -> Result<SnapshotSource, String> {
    match arg {
        "" => Err("snapshot path is empty".to_string()),
        "-" => Ok(SnapshotSource::Stdin),
        path => Ok(SnapshotSource::File(PathBuf::from(path))),
    }
}

/// Load the config named on the command line, else the default file,
/// falling back to compiled-in defaults when the default file is absent.
fn load_config(explicit: Option<&PathBuf>) -> Result<Config, String> {
    if let Some(path) = explicit {
        let cfg = Config::load(path).map_err(|e| e.to_string())?;
        info!("loaded config from {}", path.display());
        return Ok(cfg);
    }
    let path = default_config_path();
    if !path.exists() {
        info!("no config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let cfg = Config::load(&path).map_err(|e| e.to_string())?;
    info!("loaded config from {}", path.display());
    Ok(cfg)
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too and are not failures.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_INVALID_INPUT)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Reject a bad direction before touching the config or the window manager.
    let direction: Direction = match cli.direction.parse() {
        Ok(d) => d,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    };

    let mut config = match load_config(cli.config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    };
    if let Some(source) = cli.snapshot {
        config.snapshot = source;
    }
    if cli.dry_run {
        config.mover.dry_run = true;
    }

    let backend = match SnapshotBackend::load(&config.snapshot, Mover::from_config(&config.mover)) {
        Ok(b) => b,
        Err(e) => {
            error!("failed to load window manager snapshot: {}", e);
            return ExitCode::from(EXIT_ENVIRONMENT);
        }
    };

    let snapper = Snapper::new(&backend, &backend, config.snap.clone());
    match snapper.snap(direction) {
        Ok(Outcome::Moved(cmd)) => {
            if backend.mover().is_dry_run() {
                println!("{}", cmd);
            }
            ExitCode::SUCCESS
        }
        Ok(Outcome::NoValidTarget) => {
            info!("no valid target {}", direction);
            ExitCode::from(EXIT_NO_TARGET)
        }
        Err(e @ SnapError::InvalidDirection(_)) => {
            error!("{}", e);
            ExitCode::from(EXIT_INVALID_INPUT)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(EXIT_ENVIRONMENT)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    fn parse(items: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("edgesnap").chain(items.iter().copied()))
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_direction_and_flags() {
        let cli = parse(&["--dry-run", "--config", "/tmp/c.json", "right"]).unwrap();
        assert_eq!(cli.direction, "right");
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.json")));
        assert!(cli.dry_run);
        assert!(cli.snapshot.is_none());

        let cli = parse(&["left", "-c", "/tmp/c.json"]).unwrap();
        assert_eq!(cli.direction, "left");
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.json")));
    }

    #[test]
    fn snapshot_dash_means_stdin() {
        let cli = parse(&["--snapshot", "-", "up"]).unwrap();
        assert_eq!(cli.snapshot, Some(SnapshotSource::Stdin));
        let cli = parse(&["--snapshot", "/tmp/s.json", "up"]).unwrap();
        assert_eq!(cli.snapshot, Some(SnapshotSource::File("/tmp/s.json".into())));
        let cli = parse(&["--snapshot=/tmp/s.json", "up"]).unwrap();
        assert_eq!(cli.snapshot, Some(SnapshotSource::File("/tmp/s.json".into())));
    }

    #[test]
    fn direction_is_validated_after_parsing() {
        let cli = parse(&["diagonal"]).unwrap();
        assert_eq!(cli.direction, "diagonal");
        assert!(cli.direction.parse::<Direction>().is_err());
    }

    #[test]
    fn help_and_version_are_not_usage_errors() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(!err.use_stderr());
        let err = parse(&["-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        let err = parse(&["--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        assert!(!err.use_stderr());
    }

    #[test]
    fn rejects_bad_usage() {
        let cases: [&[&str]; 5] = [
            &["--config"],
            &["--frobnicate", "left"],
            &["left", "right"],
            &[],
            &["--snapshot", "", "up"],
        ];
        for argv in cases {
            let err = parse(argv).unwrap_err();
            assert!(err.use_stderr(), "{:?} should be a usage error", argv);
        }
    }
}
