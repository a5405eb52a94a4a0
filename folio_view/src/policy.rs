// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Per-axis clamping behavior for panning relative to a bounds rectangle.
///
/// [`crate::ViewContext`] holds one policy for each axis. Layout managers pick
/// the pair that fits their reading direction: the reading axis is usually
/// [`ScrollPolicy::Unlimited`] so that overscroll can drive page turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollPolicy {
    /// Never clamp on this axis.
    ///
    /// Used for the reading axis, where overscrolling past the first or last
    /// slot signals a page turn or "read complete".
    Unlimited,
    /// Clamp to the bounds, inflated by the view's overscroll margin.
    Limited,
    /// Keep the viewport inside the bounds on this axis.
    #[default]
    StrictScrollArea,
}

impl ScrollPolicy {
    /// Clamps a viewport span `[start, start + extent]` against `[min, max]`.
    ///
    /// `margin` is only consulted for [`ScrollPolicy::Limited`]. When the span
    /// is wider than the bounds it is centered on them.
    #[must_use]
    pub fn clamp(self, start: f64, extent: f64, min: f64, max: f64, margin: f64) -> f64 {
        let (min, max) = match self {
            Self::Unlimited => return start,
            Self::Limited => (min - margin, max + margin),
            Self::StrictScrollArea => (min, max),
        };
        let available = max - min;
        if extent >= available {
            return min + (available - extent) / 2.0;
        }
        if start < min {
            min
        } else if start + extent > max {
            max - extent
        } else {
            start
        }
    }
}
