//! Window and desktop rectangles.
//!
//! Everything here is plain data rebuilt from a fresh window-manager
//! snapshot on every invocation.  Nothing is cached and nothing is mutated
//! after construction: moving a window never updates its [`Window`], the
//! caller has to query the window manager again.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque window handle as understood by the backend.
///
/// The core never inspects the contents; backends are responsible for
/// normalising whatever representation the window manager uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub String);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque desktop (workspace) identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesktopId(pub String);

impl fmt::Display for DesktopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DesktopId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An axis-aligned rectangle in integer pixel coordinates.
///
/// `right = left + width` and `bottom = top + height`.  Callers guarantee
/// `left <= right` and `top <= bottom`; no validation is done here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Build from the four borders.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build from an origin and a size, the way window managers report
    /// geometry.
    pub fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Like [`Rect::from_origin_size`], but `None` when the far border
    /// does not fit in an `i32`.
    pub fn checked_from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        Some(Self::new(x, y, x.checked_add(width)?, y.checked_add(height)?))
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// A top-level window on some desktop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub id: WindowId,
    pub desktop: DesktopId,
    pub rect: Rect,
}

impl Window {
    pub fn new(id: impl Into<WindowId>, desktop: impl Into<DesktopId>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            desktop: desktop.into(),
            rect,
        }
    }
}

/// A desktop's usable area (the *workarea*, i.e. without panels and docks).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Desktop {
    pub id: DesktopId,
    /// Whether this is the desktop currently shown.
    pub active: bool,
    pub rect: Rect,
}

impl Desktop {
    pub fn new(id: impl Into<DesktopId>, active: bool, rect: Rect) -> Self {
        Self {
            id: id.into(),
            active,
            rect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_origin_size_rejects_overflow() {
        assert_eq!(
            Rect::checked_from_origin_size(10, 20, 100, 50),
            Some(Rect::new(10, 20, 110, 70))
        );
        assert_eq!(Rect::checked_from_origin_size(2_147_483_000, 0, 1000, 10), None);
        assert_eq!(Rect::checked_from_origin_size(0, i32::MAX, 10, 1), None);
    }

    #[test]
    fn rect_from_origin_size() {
        let r = Rect::from_origin_size(100, 50, 400, 300);
        assert_eq!(r, Rect::new(100, 50, 500, 350));
        assert_eq!(r.width(), 400);
        assert_eq!(r.height(), 300);
    }

    #[test]
    fn degenerate_rect_has_zero_span() {
        let r = Rect::new(10, 10, 10, 10);
        assert_eq!(r.width(), 0);
        assert_eq!(r.height(), 0);
    }

    #[test]
    fn ids_display_verbatim() {
        assert_eq!(WindowId::from("0x02c00177").to_string(), "0x02c00177");
        assert_eq!(DesktopId::from("1").to_string(), "1");
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&WindowId::from("0xbeef")).unwrap();
        assert_eq!(json, "\"0xbeef\"");
    }
}
