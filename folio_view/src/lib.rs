// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio View: pan/zoom state for paginated readers.
//!
//! This crate provides the coordinate transform at the bottom of the Folio
//! stack:
//! - [`ViewContext`]: device view size, document-space pan origin, uniform
//!   scale with limits, and the visible document rectangle ("viewport").
//! - [`ScrollPolicy`]: per-axis clamping of the viewport against a bounds
//!   rectangle (usually the scroll area of the current page slot).
//! - [`RectExt`]: the few rectangle helpers `kurbo::Rect` does not provide.
//!
//! It does **not** know about pages, slots or animations. Higher Folio crates
//! decide which bounds apply and drive the view over time.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use folio_view::{ScrollPolicy, ViewContext};
//!
//! let mut view = ViewContext::new(Size::new(1000.0, 1600.0));
//! view.set_scroll_policy(ScrollPolicy::Unlimited, ScrollPolicy::StrictScrollArea);
//!
//! // Pinch at the view center: the document point there stays put.
//! let focus = Point::new(500.0, 800.0);
//! let before = view.project_to_global(focus);
//! view.scale_to(2.5, focus, None);
//! let after = view.project_to_global(focus);
//! assert!((before - after).hypot() < 1e-9);
//!
//! // Pan within a page's scroll area.
//! let area = Rect::new(0.0, 0.0, 1000.0, 1600.0);
//! view.scroll(0.0, -5000.0, Some(area));
//! assert_eq!(view.viewport().y0, 0.0);
//! ```

mod geometry;
mod policy;
mod view_context;

pub use geometry::{EDGE_EPSILON, RectExt};
pub use policy::ScrollPolicy;
pub use view_context::ViewContext;
