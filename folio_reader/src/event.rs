// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// Scrolling phase, for observers only.
///
/// `Idle → Dragging → Settling → Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollState {
    /// Nothing moves.
    #[default]
    Idle,
    /// The user is dragging.
    Dragging,
    /// An animation or fling is running.
    Settling,
}

/// Pinch phase, for observers only.
///
/// `Finish → Begin → Scaling → End → Finish`, once per pinch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScalingState {
    /// No pinch in progress.
    #[default]
    Finish,
    /// A pinch started.
    Begin,
    /// The pinch changed the scale.
    Scaling,
    /// The pinch ended; the view is about to settle.
    End,
}

/// Notification queued by a [`crate::Reader`].
///
/// Drain them with [`crate::Reader::drain_events`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReaderEvent {
    /// The scroll state changed.
    ScrollStateChanged(ScrollState),
    /// The pinch state changed.
    ScalingStateChanged(ScalingState),
    /// A different slot became current.
    ///
    /// Sent when the view comes to rest or a touch begins, never in the
    /// middle of a drag.
    PageLayoutSelected {
        /// Index of the slot.
        slot: usize,
        /// Current page, inside that slot.
        page: usize,
    },
    /// The user pulled past the end of the document.
    ReadCompleted,
    /// Single tap.
    Tapped {
        /// Page under the tap, if any.
        page: Option<usize>,
        /// Tap position in document space.
        position: Point,
    },
    /// Double tap.
    DoubleTapped {
        /// Page under the tap, if any.
        page: Option<usize>,
        /// Tap position in document space.
        position: Point,
    },
}
