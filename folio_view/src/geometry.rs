// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle helpers that `kurbo::Rect` does not provide directly.

use kurbo::{Rect, Vec2};

/// Tolerance used when comparing document-space edges.
///
/// Animated destinations are computed as `edge - extent`, and rebuilding the
/// viewport as `origin + extent` may land one ulp outside the target edge.
pub const EDGE_EPSILON: f64 = 1e-6;

/// Extra geometry operations over [`Rect`].
///
/// All methods assume normalized rectangles (`x0 <= x1`, `y0 <= y1`).
pub trait RectExt {
    /// Returns `true` if `other` lies entirely inside `self` (edges may touch).
    fn contains_rect(&self, other: Rect) -> bool;

    /// Like [`RectExt::contains_rect`], allowing each edge of `other` to
    /// stick out by at most `tolerance`.
    fn contains_rect_within(&self, other: Rect, tolerance: f64) -> bool;

    /// Returns `true` if the two rectangles share a region of positive area.
    fn intersects(&self, other: Rect) -> bool;

    /// Mirrors `self` horizontally about the vertical center line of `frame`.
    fn mirror_x(&self, frame: Rect) -> Rect;

    /// Shifts `self` so that it lies inside `bounds`, one axis at a time.
    ///
    /// Where `self` is larger than `bounds` on an axis, its near edge is
    /// aligned with the near edge of `bounds`.
    fn clamp_inside(&self, bounds: Rect) -> Rect;
}

impl RectExt for Rect {
    fn contains_rect(&self, other: Rect) -> bool {
        self.contains_rect_within(other, 0.0)
    }

    fn contains_rect_within(&self, other: Rect, tolerance: f64) -> bool {
        other.x0 >= self.x0 - tolerance
            && other.y0 >= self.y0 - tolerance
            && other.x1 <= self.x1 + tolerance
            && other.y1 <= self.y1 + tolerance
    }

    fn intersects(&self, other: Rect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }

    fn mirror_x(&self, frame: Rect) -> Rect {
        let axis = frame.x0 + frame.x1;
        Rect::new(axis - self.x1, self.y0, axis - self.x0, self.y1)
    }

    fn clamp_inside(&self, bounds: Rect) -> Rect {
        let dx = if self.x0 < bounds.x0 || self.width() > bounds.width() {
            bounds.x0 - self.x0
        } else if self.x1 > bounds.x1 {
            bounds.x1 - self.x1
        } else {
            0.0
        };
        let dy = if self.y0 < bounds.y0 || self.height() > bounds.height() {
            bounds.y0 - self.y0
        } else if self.y1 > bounds.y1 {
            bounds.y1 - self.y1
        } else {
            0.0
        };
        *self + Vec2::new(dx, dy)
    }
}
