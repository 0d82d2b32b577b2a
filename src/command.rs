//! Directions and move commands.
//!
//! This module defines the vocabulary shared by the selector, the snapper
//! and the backends: [`Direction`] is the closed set of requested moves,
//! [`Axis`] says which coordinate a direction acts on, and [`MoveCommand`]
//! is the single side effect a snap produces.

use crate::geometry::{Rect, WindowId};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cardinal direction to move the focused window in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// The coordinate axis a [`Direction`] operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The rectangle's leading coordinate on this axis (`left` or `top`).
    pub fn leading(self, rect: &Rect) -> i32 {
        match self {
            Axis::X => rect.left,
            Axis::Y => rect.top,
        }
    }

    /// The rectangle's trailing coordinate on this axis (`right` or `bottom`).
    pub fn trailing(self, rect: &Rect) -> i32 {
        match self {
            Axis::X => rect.right,
            Axis::Y => rect.bottom,
        }
    }

    /// The rectangle's extent on this axis (`width` or `height`).
    pub fn span(self, rect: &Rect) -> i32 {
        match self {
            Axis::X => rect.width(),
            Axis::Y => rect.height(),
        }
    }
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::X,
            Direction::Up | Direction::Down => Axis::Y,
        }
    }

    /// `true` when travel is towards larger coordinates (right, down).
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// An unrecognised direction token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction: {0:?} (expected left, right, up or down)")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}

/// A single window move, produced by the snapper and executed once by the
/// caller.
///
/// An axis set to `None` is left untouched by the window manager.  Not
/// `Clone`: executing consumes the command and hands it back as the record
/// of what was issued, so it cannot be replayed.
#[derive(Debug, PartialEq, Eq)]
pub struct MoveCommand {
    pub window: WindowId,
    pub x: Option<i32>,
    pub y: Option<i32>,
}

impl MoveCommand {
    /// Build a command that only moves `window` along `axis` to `coordinate`.
    pub fn along(window: WindowId, axis: Axis, coordinate: i32) -> Self {
        match axis {
            Axis::X => Self {
                window,
                x: Some(coordinate),
                y: None,
            },
            Axis::Y => Self {
                window,
                x: None,
                y: Some(coordinate),
            },
        }
    }
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coord = |v: Option<i32>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
        write!(f, "move {} to ({}, {})", self.window, coord(self.x), coord(self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Left.to_string(), "left");
        assert_eq!(Direction::Right.to_string(), "right");
        assert_eq!(Direction::Up.to_string(), "up");
        assert_eq!(Direction::Down.to_string(), "down");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Right".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!(" UP ".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("down".parse::<Direction>(), Ok(Direction::Down));
    }

    #[test]
    fn parse_rejects_unknown_tokens() {
        let err = "diagonal".parse::<Direction>().unwrap_err();
        assert_eq!(err, ParseDirectionError("diagonal".into()));
        assert!("up-left".parse::<Direction>().is_err());
        assert!("".parse::<Direction>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for d in Direction::ALL {
            assert_eq!(d.to_string().parse::<Direction>(), Ok(d));
        }
    }

    #[test]
    fn deserialize_direction() {
        let d: Direction = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(d, Direction::Left);
        assert!(serde_json::from_str::<Direction>("\"sideways\"").is_err());
    }

    #[test]
    fn direction_axis_table() {
        assert_eq!(Direction::Left.axis(), Axis::X);
        assert_eq!(Direction::Right.axis(), Axis::X);
        assert_eq!(Direction::Up.axis(), Axis::Y);
        assert_eq!(Direction::Down.axis(), Axis::Y);
        assert!(Direction::Right.is_forward());
        assert!(Direction::Down.is_forward());
        assert!(!Direction::Left.is_forward());
        assert!(!Direction::Up.is_forward());
    }

    #[test]
    fn axis_accessors() {
        let r = Rect::new(10, 20, 110, 70);
        assert_eq!(Axis::X.leading(&r), 10);
        assert_eq!(Axis::X.trailing(&r), 110);
        assert_eq!(Axis::X.span(&r), 100);
        assert_eq!(Axis::Y.leading(&r), 20);
        assert_eq!(Axis::Y.trailing(&r), 70);
        assert_eq!(Axis::Y.span(&r), 50);
    }

    #[test]
    fn move_command_leaves_other_axis_alone() {
        let cmd = MoveCommand::along("0x1".into(), Axis::X, 960);
        assert_eq!(cmd.x, Some(960));
        assert_eq!(cmd.y, None);
        assert_eq!(cmd.to_string(), "move 0x1 to (960, -)");

        let cmd = MoveCommand::along("0x1".into(), Axis::Y, 40);
        assert_eq!(cmd.x, None);
        assert_eq!(cmd.y, Some(40));
    }
}
