// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Reader: a headless engine for paginated documents.
//!
//! [`Reader`] ties the Folio crates together. It owns the pan/zoom state
//! (`folio_view`), the slot layout (`folio_layout`) and the live animation
//! (`folio_motion`), and exposes them through a gesture-level API:
//!
//! - input: [`Reader::pan`], [`Reader::release`], [`Reader::fling`], the zoom
//!   calls, taps, [`Reader::show_page`] and [`Reader::focus_rect`];
//! - frames: [`Reader::tick`] advances animations and reports whether another
//!   frame is needed;
//! - output: [`Reader::visible_slots`] lists page rectangles to draw, and
//!   [`Reader::drain_events`] reports state changes, page selection, taps and
//!   the end of the document.
//!
//! The engine never reads a clock, decodes content or draws. Pages come from a
//! [`folio_layout::PageProvider`] and time is passed in by the host.
//!
//! Logging goes through the [`log`] facade; install any logger to see state
//! transitions (`debug`) and per-frame details (`trace`).
//!
//! ## Example
//!
//! ```rust
//! use folio_layout::FixedPages;
//! use folio_reader::{Reader, ReaderConfig, ReaderEvent};
//! use kurbo::Size;
//!
//! let pages = FixedPages::new(3, Size::new(1000.0, 1600.0));
//! let mut reader = Reader::new(pages, ReaderConfig::default()).unwrap();
//! reader.set_view_size(1000.0, 1600.0);
//!
//! // Drag 300 pixels to the left and let go: the next page slides in.
//! reader.touch_down();
//! reader.pan(-300.0, 0.0);
//! reader.release(0);
//! let mut now = 0;
//! while reader.tick(now) {
//!     now += 16;
//! }
//! assert_eq!(reader.current_page(), 1);
//! assert!(reader
//!     .drain_events()
//!     .any(|e| e == ReaderEvent::PageLayoutSelected { slot: 1, page: 1 }));
//! ```

mod config;
mod event;
mod reader;

pub use config::{
    ConfigError, DEFAULT_DOUBLE_TAP_SCALE, DEFAULT_FLING_DECELERATION, DEFAULT_SCALE_DURATION,
    ReaderConfig,
};
pub use event::{ReaderEvent, ScalingState, ScrollState};
pub use reader::{Reader, VisiblePage, VisibleSlot};
