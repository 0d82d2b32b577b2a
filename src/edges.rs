//! Edge collection.
//!
//! Turns the windows on a desktop into per-axis lists of coordinates the
//! focused window can snap to.

use crate::geometry::{Desktop, Window};
use std::collections::BTreeSet;

/// Ascending, deduplicated coordinates along one axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeSet(BTreeSet<i32>);

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, edge: i32) {
        self.0.insert(edge);
    }

    pub fn contains(&self, edge: i32) -> bool {
        self.0.contains(&edge)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Edges in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = i32> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<i32> {
        self.iter().collect()
    }
}

impl FromIterator<i32> for EdgeSet {
    fn from_iter<T: IntoIterator<Item = i32>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<i32> for EdgeSet {
    fn extend<T: IntoIterator<Item = i32>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

/// Collect the x and y edges of `other_windows` that lie on `desktop`.
///
/// An edge is kept only when it falls inside the desktop's workarea
/// (bounds inclusive) on its own axis, so windows hanging off the desktop
/// contribute only their visible borders.
///
/// With `include_desktop_extremes` the workarea borders themselves are
/// added.  With both flags set, `include_center` also adds the workarea's
/// half-span on each axis.  That value is an offset from zero, not from the
/// workarea origin, so it only lines up with the real center on desktops
/// anchored at the origin.
///
/// The caller must leave the focused window out of `other_windows`.
pub fn collect_edges(
    desktop: &Desktop,
    other_windows: &[Window],
    include_desktop_extremes: bool,
    include_center: bool,
) -> (EdgeSet, EdgeSet) {
    let d = &desktop.rect;
    let mut xs = EdgeSet::new();
    let mut ys = EdgeSet::new();

    let in_x = |x: i32| d.left <= x && x <= d.right;
    let in_y = |y: i32| d.top <= y && y <= d.bottom;

    for w in other_windows {
        let r = &w.rect;
        xs.extend([r.left, r.right].into_iter().filter(|&x| in_x(x)));
        ys.extend([r.top, r.bottom].into_iter().filter(|&y| in_y(y)));
    }

    if include_desktop_extremes {
        xs.extend([d.left, d.right]);
        ys.extend([d.top, d.bottom]);

        if include_center {
            xs.insert(d.width() / 2);
            ys.insert(d.height() / 2);
        }
    }

    (xs, ys)
}
