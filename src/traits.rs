//! Backend traits that decouple edgesnap from any specific window manager.
//!
//! The [`Snapper`](crate::snapper::Snapper) only depends on these two
//! abstractions.  Every concrete backend (a JSON snapshot, a test harness,
//! …) implements both; which one is used is decided once at start-up from
//! the configuration.

use crate::geometry::{Desktop, DesktopId, Window, WindowId};

/// Read access to the windows the window manager knows about.
pub trait WindowInfo {
    /// The error type produced by this backend.
    type Error: std::error::Error + Send + 'static;

    /// Ids of the windows on `desktop`.
    fn list_window_ids(&self, desktop: &DesktopId) -> Result<Vec<WindowId>, Self::Error>;

    /// Current geometry of `id`.
    ///
    /// `Ok(None)` means the window exists but cannot be resolved (hidden or
    /// special windows); such windows are skipped rather than treated as
    /// failures.
    fn window_geometry(&self, id: &WindowId) -> Result<Option<Window>, Self::Error>;

    /// The currently focused window.
    fn active_window_id(&self) -> Result<WindowId, Self::Error>;
}

/// Desktop queries plus the one mutating operation.
pub trait DesktopInfo {
    /// The error type produced by this backend.
    type Error: std::error::Error + Send + 'static;

    /// The desktop currently shown.
    fn active_desktop_id(&self) -> Result<DesktopId, Self::Error>;

    /// Workarea of `desktop`, or `None` if the window manager reports no
    /// such desktop.
    fn desktop_borders(&self, desktop: &DesktopId) -> Result<Option<Desktop>, Self::Error>;

    /// Move `window` so its top-left corner lands at `(x, y)`.
    ///
    /// An axis set to `None` keeps its current coordinate.
    fn move_window(&self, window: &WindowId, x: Option<i32>, y: Option<i32>) -> Result<(), Self::Error>;
}

impl<T: WindowInfo + ?Sized> WindowInfo for &T {
    type Error = T::Error;

    fn list_window_ids(&self, desktop: &DesktopId) -> Result<Vec<WindowId>, Self::Error> {
        (**self).list_window_ids(desktop)
    }

    fn window_geometry(&self, id: &WindowId) -> Result<Option<Window>, Self::Error> {
        (**self).window_geometry(id)
    }

    fn active_window_id(&self) -> Result<WindowId, Self::Error> {
        (**self).active_window_id()
    }
}

impl<T: DesktopInfo + ?Sized> DesktopInfo for &T {
    type Error = T::Error;

    fn active_desktop_id(&self) -> Result<DesktopId, Self::Error> {
        (**self).active_desktop_id()
    }

    fn desktop_borders(&self, desktop: &DesktopId) -> Result<Option<Desktop>, Self::Error> {
        (**self).desktop_borders(desktop)
    }

    fn move_window(&self, window: &WindowId, x: Option<i32>, y: Option<i32>) -> Result<(), Self::Error> {
        (**self).move_window(window, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use std::cell::RefCell;

    //  Mock backend

    /// A test double that records every move made through it.
    #[derive(Debug, Default)]
    struct MockBackend {
        moves: RefCell<Vec<(WindowId, Option<i32>, Option<i32>)>>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock error")]
    struct MockError;

    impl WindowInfo for MockBackend {
        type Error = MockError;

        fn list_window_ids(&self, _: &DesktopId) -> Result<Vec<WindowId>, MockError> {
            Ok(vec!["0x1".into()])
        }

        fn window_geometry(&self, id: &WindowId) -> Result<Option<Window>, MockError> {
            Ok(Some(Window::new(id.clone(), "0", Rect::new(0, 0, 10, 10))))
        }

        fn active_window_id(&self) -> Result<WindowId, MockError> {
            Ok("0x1".into())
        }
    }

    impl DesktopInfo for MockBackend {
        type Error = MockError;

        fn active_desktop_id(&self) -> Result<DesktopId, MockError> {
            Ok("0".into())
        }

        fn desktop_borders(&self, id: &DesktopId) -> Result<Option<Desktop>, MockError> {
            Ok(Some(Desktop::new(id.clone(), true, Rect::new(0, 0, 100, 100))))
        }

        fn move_window(&self, window: &WindowId, x: Option<i32>, y: Option<i32>) -> Result<(), MockError> {
            self.moves.borrow_mut().push((window.clone(), x, y));
            Ok(())
        }
    }

    fn move_through<D: DesktopInfo>(d: D) {
        d.move_window(&"0x1".into(), Some(5), None).unwrap();
    }

    #[test]
    fn references_forward_to_backend() {
        let backend = MockBackend::default();
        move_through(&backend);
        move_through(&&backend);
        assert_eq!(backend.moves.borrow().len(), 2);
        assert_eq!(backend.moves.borrow()[0], (WindowId::from("0x1"), Some(5), None));
    }

    #[test]
    fn one_backend_serves_both_traits() {
        let backend = MockBackend::default();
        let desktop = backend.active_desktop_id().unwrap();
        let ids = backend.list_window_ids(&desktop).unwrap();
        assert_eq!(ids, vec![WindowId::from("0x1")]);
        assert_eq!(backend.active_window_id().unwrap(), ids[0]);
    }
}
