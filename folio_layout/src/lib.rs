// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Layout: page slots for paginated readers.
//!
//! A document is a linear sequence of pages. This crate groups them into
//! slots, positions the slots in document space and decides where the view
//! settles after a gesture:
//!
//! - [`Page`] and [`PageProvider`]: what the engine needs from the host.
//! - [`PageArrangement`]: one or two pages per slot, and the index math.
//! - [`PageLayout`]: the pages placed inside one slot, with its scroll area.
//! - [`LayoutManager`]: slot rectangles per [`Orientation`], neighbors,
//!   visible ranges and a lazily filled layout cache.
//! - [`PopulateHelper`]: snap back or turn the page when a gesture ends.
//!
//! Slots are exactly as big as the view. Left-to-right slots sit at
//! `[i * w, (i + 1) * w]`, right-to-left slots at `[-(i + 1) * w, -i * w]`,
//! and vertical slots at `[i * h, (i + 1) * h]`.
//!
//! ## Example
//!
//! ```rust
//! use folio_layout::{
//!     FixedPages, LayoutManager, Orientation, PageArrangement, PopulateConfig, PopulateHelper,
//!     SizedPage,
//! };
//! use folio_motion::Operation;
//! use folio_view::ViewContext;
//! use kurbo::{Point, Size};
//!
//! let view = Size::new(1000.0, 1600.0);
//! let mut doc = FixedPages::new(10, view);
//! let mut manager: LayoutManager<SizedPage> =
//!     LayoutManager::new(Orientation::HorizontalLtr, PageArrangement::Single);
//! manager.set_view_size(view);
//! manager.set_page_count(10);
//!
//! let mut ctx = ViewContext::new(view);
//! manager.init_view_context(&mut ctx);
//! assert_eq!(manager.obtain_visible(&ctx, &mut doc).len(), 2);
//!
//! // Dragged 50 units before the first page: there is nothing to turn to,
//! // so the view snaps back.
//! ctx.offset_to(-50.0, 0.0, None);
//! let helper = PopulateHelper::for_orientation(manager.orientation());
//! let op: Operation = helper
//!     .populate(&ctx, &mut manager, &PopulateConfig::default(), 0)
//!     .unwrap();
//! assert_eq!(op.translate_arc().unwrap().dest, Point::ZERO);
//! ```

mod arrangement;
mod layout_manager;
mod page;
mod page_layout;
mod populate;

pub use arrangement::PageArrangement;
pub use layout_manager::{DEFAULT_PREFETCH, Direction, LayoutManager, Orientation};
pub use page::{FixedPages, Page, PageProvider, SizedPage};
pub use page_layout::{HorizontalAlign, NON_SPREAD_OUTER_SHARE, PageLayout, Placement};
pub use populate::{
    DEFAULT_PAGE_TURN_DURATION, DEFAULT_REVERSE_DURATION, DEFAULT_TOUCH_SLOP, PopulateConfig,
    PopulateHelper, Settle,
};
