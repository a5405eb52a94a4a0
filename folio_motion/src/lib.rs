// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Motion: time-based pan/zoom for [`folio_view::ViewContext`].
//!
//! - [`Operation`]: an optional translate arc and an optional scale arc over a
//!   shared duration, with a priority and an optional completion token.
//! - [`Animator`]: owns the single live operation, applies the preemption rule
//!   and advances it once per frame.
//! - [`Fling`]: bounded kinetic scrolling after a fast release.
//! - [`Easing`]: interpolation curves.
//!
//! Time is always passed in by the caller as milliseconds from an arbitrary
//! epoch; nothing in this crate reads a clock.
//!
//! ## Example
//!
//! ```rust
//! use folio_motion::{Animator, Operation, Tick, USER_PRIORITY};
//! use folio_view::ViewContext;
//! use kurbo::{Point, Size};
//!
//! #[derive(Debug, PartialEq)]
//! enum FollowUp {
//!     Settle,
//! }
//!
//! let mut view = ViewContext::new(Size::new(800.0, 600.0));
//! let mut animator = Animator::new();
//!
//! // Zoom to 2x around the top-left corner, then ask for a settle.
//! animator.set(
//!     Operation::scale(1.0, 2.0, Some(Point::ZERO), 0, 250)
//!         .with_priority(USER_PRIORITY)
//!         .with_completion(FollowUp::Settle),
//! );
//!
//! assert_eq!(animator.tick(&mut view, None, 100), Tick::Running);
//! assert_eq!(
//!     animator.tick(&mut view, None, 250),
//!     Tick::Finished(Some(FollowUp::Settle))
//! );
//! assert_eq!(view.scale(), 2.0);
//! ```

mod animator;
mod easing;
mod fling;
mod operation;

pub use animator::{Animator, Tick};
pub use easing::Easing;
pub use fling::Fling;
pub use operation::{Operation, SETTLE_PRIORITY, ScaleArc, TranslateArc, USER_PRIORITY};
