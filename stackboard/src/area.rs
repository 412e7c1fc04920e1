// Copyright 2025 the Stackboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Query rectangles and the containment filter used by area listings.

use serde::{Deserialize, Serialize};
use stackboard_store::Widget;

/// Axis-aligned query rectangle on the board. `y` grows upwards.
///
/// Edges are part of the area.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Area {
    /// Minimum x.
    pub left: i32,
    /// Minimum y.
    pub bottom: i32,
    /// Maximum x.
    pub right: i32,
    /// Maximum y.
    pub top: i32,
}

impl Area {
    /// Create an area from its four edges.
    #[inline(always)]
    pub const fn new(left: i32, bottom: i32, right: i32, top: i32) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Create an area from its lower-left and upper-right corners, as `(x, y)`.
    #[inline]
    pub const fn from_corners(lower_left: (i32, i32), upper_right: (i32, i32)) -> Self {
        Self::new(lower_left.0, lower_left.1, upper_right.0, upper_right.1)
    }

    /// Whether `bounds` lies entirely inside this area.
    #[inline]
    pub fn contains(&self, bounds: &Bounds) -> bool {
        i64::from(self.left) <= bounds.left
            && i64::from(self.right) >= bounds.right
            && i64::from(self.top) >= bounds.top
            && i64::from(self.bottom) <= bounds.bottom
    }

    /// Return true if the area is inverted. Nothing fits an inverted area.
    ///
    /// Zero-width and zero-height areas are not empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.right < self.left || self.top < self.bottom
    }
}

/// The rectangle a widget covers.
///
/// Half extents are `width / 2` and `height / 2`, truncated. Edges are widened
/// to `i64` so that widgets near the `i32` limits do not overflow.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bounds {
    /// Minimum x.
    pub left: i64,
    /// Minimum y.
    pub bottom: i64,
    /// Maximum x.
    pub right: i64,
    /// Maximum y.
    pub top: i64,
}

impl Bounds {
    /// Bounds of a widget centred at `(x, y)` with the given size.
    #[inline]
    pub fn centred(x: i32, y: i32, width: i32, height: i32) -> Self {
        let (x, y) = (i64::from(x), i64::from(y));
        let half_w = i64::from(width / 2);
        let half_h = i64::from(height / 2);
        Self {
            left: x - half_w,
            bottom: y - half_h,
            right: x + half_w,
            top: y + half_h,
        }
    }

    /// Bounds of a stored widget.
    #[inline]
    pub fn of(widget: &Widget) -> Self {
        Self::centred(widget.x, widget.y, widget.width, widget.height)
    }
}

/// Whether `widget` lies entirely inside `area`.
pub fn fits(area: &Area, widget: &Widget) -> bool {
    area.contains(&Bounds::of(widget))
}
