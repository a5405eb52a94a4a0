// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settling the view after a gesture.
//!
//! When a drag, pinch or fling ends, the viewport may hang over the edge of
//! the current slot. [`PopulateHelper::decide`] chooses between staying put,
//! snapping back into the current slot, and turning to the neighbor the user
//! pulled in; [`PopulateHelper::populate`] turns that decision into a
//! translate [`Operation`].

use folio_motion::Operation;
use folio_view::{EDGE_EPSILON, RectExt, ViewContext};
use kurbo::{Point, Rect};

use crate::layout_manager::{Direction, LayoutManager, Orientation};
use crate::page::Page;

/// Default distance, in screen pixels, the user must overscroll to turn a page.
pub const DEFAULT_TOUCH_SLOP: f64 = 16.0;

/// Default duration of a page-turn animation, in milliseconds.
pub const DEFAULT_PAGE_TURN_DURATION: u64 = 280;

/// Default duration of a snap-back animation, in milliseconds.
pub const DEFAULT_REVERSE_DURATION: u64 = 400;

/// Thresholds and timings used when settling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopulateConfig {
    /// Overscroll, in screen pixels, that turns the page.
    pub touch_slop: f64,
    /// Duration of a page turn, in milliseconds.
    pub page_turn_duration: u64,
    /// Duration of a snap back, in milliseconds.
    pub reverse_duration: u64,
}

impl Default for PopulateConfig {
    fn default() -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP,
            page_turn_duration: DEFAULT_PAGE_TURN_DURATION,
            reverse_duration: DEFAULT_REVERSE_DURATION,
        }
    }
}

/// Outcome of settling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Settle {
    /// The viewport already lies inside the current slot.
    Stay,
    /// Pan back into the current slot, to origin `dest`.
    SnapBack {
        /// Destination pan origin.
        dest: Point,
    },
    /// Pan to neighboring slot `slot`, to origin `dest`.
    PageTurn {
        /// Index of the slot being turned to.
        slot: usize,
        /// Destination pan origin.
        dest: Point,
    },
}

impl Settle {
    /// Builds the translate operation for this outcome, starting at `origin`.
    #[must_use]
    pub fn into_operation<T>(
        self,
        origin: Point,
        config: &PopulateConfig,
        now: u64,
    ) -> Option<Operation<T>> {
        match self {
            Self::Stay => None,
            Self::SnapBack { dest } => Some(Operation::translate(
                origin,
                dest,
                now,
                config.reverse_duration,
            )),
            Self::PageTurn { dest, .. } => Some(Operation::translate(
                origin,
                dest,
                now,
                config.page_turn_duration,
            )),
        }
    }
}

/// Settling strategy along one reading axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopulateHelper {
    /// Slots advance horizontally.
    Horizontal,
    /// Slots advance vertically.
    Vertical,
}

impl PopulateHelper {
    /// Returns the helper for `orientation`.
    #[must_use]
    pub const fn for_orientation(orientation: Orientation) -> Self {
        if orientation.is_horizontal() {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    /// Decides how the view settles, measured against the slot under the
    /// viewport center.
    ///
    /// Gesture handlers should use [`PopulateHelper::decide_from`] with the
    /// slot that was current when the gesture began: once a drag passes the
    /// middle of a slot, the slot under the center is already the neighbor.
    pub fn decide<P: Page>(
        self,
        ctx: &ViewContext,
        manager: &mut LayoutManager<P>,
        touch_slop: f64,
    ) -> Settle {
        match manager.current_index(ctx) {
            Some(current) => self.decide_from(ctx, manager, current, touch_slop),
            None => Settle::Stay,
        }
    }

    /// Decides how the view settles relative to slot `current`.
    ///
    /// `touch_slop` is in screen pixels and is divided by the view scale.
    pub fn decide_from<P: Page>(
        self,
        ctx: &ViewContext,
        manager: &mut LayoutManager<P>,
        current: usize,
        touch_slop: f64,
    ) -> Settle {
        let scale = ctx.scale();
        let viewport = ctx.viewport();
        let Some(area) = manager
            .page_layout(current)
            .map(|layout| layout.scaled_scroll_area(scale))
        else {
            return Settle::Stay;
        };
        if area.contains_rect_within(viewport, EDGE_EPSILON) {
            return Settle::Stay;
        }

        let direction = self.pull_direction(viewport, area);
        if self.overscroll(viewport, area) > touch_slop / scale {
            if let Some(turn) = self.turn_from(ctx, manager, current, direction) {
                log::debug!("populate: page turn {direction:?} to {turn:?}");
                return turn;
            }
        }
        let dest = viewport.clamp_inside(area).origin();
        log::debug!("populate: snap back to {dest:?}");
        Settle::SnapBack { dest }
    }

    /// Page turn from the slot under the viewport center toward `direction`.
    pub fn turn_to<P: Page>(
        self,
        ctx: &ViewContext,
        manager: &mut LayoutManager<P>,
        direction: Direction,
    ) -> Option<Settle> {
        let current = manager.current_index(ctx)?;
        self.turn_from(ctx, manager, current, direction)
    }

    /// Page turn from slot `current` toward the neighbor in `direction`, or
    /// `None` if there is none.
    ///
    /// The destination aligns the viewport's leading edge with the
    /// neighbor's scaled scroll area on the reading axis and keeps the cross
    /// axis inside it.
    pub fn turn_from<P: Page>(
        self,
        ctx: &ViewContext,
        manager: &mut LayoutManager<P>,
        current: usize,
        direction: Direction,
    ) -> Option<Settle> {
        let scale = ctx.scale();
        let viewport = ctx.viewport();
        let slot = manager.neighbor_index(current, direction)?;
        let area = manager.page_layout(slot)?.scaled_scroll_area(scale);
        let clamped = viewport.clamp_inside(area);
        let dest = match direction {
            Direction::Left => Point::new(area.x1 - viewport.width(), clamped.y0),
            Direction::Right => Point::new(area.x0, clamped.y0),
            Direction::Top => Point::new(clamped.x0, area.y1 - viewport.height()),
            Direction::Bottom => Point::new(clamped.x0, area.y0),
        };
        Some(Settle::PageTurn { slot, dest })
    }

    /// Settle operation for the current position, or `None` if nothing moves.
    pub fn populate<P: Page, T>(
        self,
        ctx: &ViewContext,
        manager: &mut LayoutManager<P>,
        config: &PopulateConfig,
        now: u64,
    ) -> Option<Operation<T>> {
        self.decide(ctx, manager, config.touch_slop)
            .into_operation(ctx.origin(), config, now)
    }

    /// Settle operation relative to slot `current`, or `None` if nothing moves.
    pub fn populate_from<P: Page, T>(
        self,
        ctx: &ViewContext,
        manager: &mut LayoutManager<P>,
        current: usize,
        config: &PopulateConfig,
        now: u64,
    ) -> Option<Operation<T>> {
        self.decide_from(ctx, manager, current, config.touch_slop)
            .into_operation(ctx.origin(), config, now)
    }

    /// Page-turn operation toward `direction`, or `None` at the document edge.
    pub fn populate_to<P: Page, T>(
        self,
        ctx: &ViewContext,
        manager: &mut LayoutManager<P>,
        direction: Direction,
        config: &PopulateConfig,
        now: u64,
    ) -> Option<Operation<T>> {
        self.turn_to(ctx, manager, direction)?
            .into_operation(ctx.origin(), config, now)
    }

    /// Page-turn operation from slot `current` toward `direction`.
    pub fn populate_to_from<P: Page, T>(
        self,
        ctx: &ViewContext,
        manager: &mut LayoutManager<P>,
        current: usize,
        direction: Direction,
        config: &PopulateConfig,
        now: u64,
    ) -> Option<Operation<T>> {
        self.turn_from(ctx, manager, current, direction)?
            .into_operation(ctx.origin(), config, now)
    }

    /// Screen direction the viewport is pulled toward, relative to `area`.
    #[must_use]
    pub fn pull_direction(self, viewport: Rect, area: Rect) -> Direction {
        match self {
            Self::Horizontal if viewport.center().x < area.center().x => Direction::Left,
            Self::Horizontal => Direction::Right,
            Self::Vertical if viewport.center().y < area.center().y => Direction::Top,
            Self::Vertical => Direction::Bottom,
        }
    }

    /// Extent of `viewport` outside `area` on the reading axis.
    #[must_use]
    pub fn overscroll(self, viewport: Rect, area: Rect) -> f64 {
        let inside = viewport.intersect(area);
        match self {
            Self::Horizontal => viewport.width() - inside.width(),
            Self::Vertical => viewport.height() - inside.height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_motion::Operation;
    use folio_view::ViewContext;
    use kurbo::{Point, Size};

    use super::{PopulateConfig, PopulateHelper, Settle};
    use crate::arrangement::PageArrangement;
    use crate::layout_manager::{Direction, LayoutManager, Orientation};
    use crate::page::{FixedPages, SizedPage};

    const VIEW: Size = Size::new(1000.0, 1600.0);

    fn setup(orientation: Orientation, pages: usize) -> (ViewContext, LayoutManager<SizedPage>) {
        let mut manager = LayoutManager::new(orientation, PageArrangement::Single);
        manager.set_view_size(VIEW);
        manager.set_page_count(pages);
        let mut ctx = ViewContext::new(VIEW);
        manager.init_view_context(&mut ctx);
        let origin = manager.initial_origin();
        ctx.offset_to(origin.x, origin.y, None);
        let mut doc = FixedPages::new(pages, VIEW);
        manager.obtain_visible(&ctx, &mut doc);
        (ctx, manager)
    }

    #[test]
    fn inside_the_slot_stays() {
        let (ctx, mut manager) = setup(Orientation::HorizontalLtr, 3);
        let helper = PopulateHelper::Horizontal;
        assert_eq!(helper.decide(&ctx, &mut manager, 16.0), Settle::Stay);
        let op: Option<Operation> = helper.populate(&ctx, &mut manager, &PopulateConfig::default(), 0);
        assert!(op.is_none());
    }

    #[test]
    fn overscroll_before_first_page_snaps_back() {
        let (mut ctx, mut manager) = setup(Orientation::HorizontalLtr, 3);
        ctx.offset_to(-50.0, 0.0, None);
        let config = PopulateConfig::default();

        let op: Operation = PopulateHelper::Horizontal
            .populate(&ctx, &mut manager, &config, 1000)
            .unwrap();
        let arc = op.translate_arc().unwrap();
        assert_eq!(arc.start, Point::new(-50.0, 0.0));
        assert_eq!(arc.dest, Point::ZERO);
        assert_eq!(op.duration(), config.reverse_duration);
        assert_eq!(op.start_time(), 1000);
    }

    #[test]
    fn overscroll_past_slop_turns_the_page() {
        let (mut ctx, mut manager) = setup(Orientation::HorizontalLtr, 3);
        ctx.offset_to(300.0, 0.0, None);
        assert_eq!(
            PopulateHelper::Horizontal.decide(&ctx, &mut manager, 16.0),
            Settle::PageTurn {
                slot: 1,
                dest: Point::new(1000.0, 0.0),
            }
        );
    }

    #[test]
    fn drag_past_middle_turns_from_starting_slot() {
        let (mut ctx, mut manager) = setup(Orientation::HorizontalLtr, 3);
        ctx.offset_to(600.0, 0.0, None);
        let helper = PopulateHelper::Horizontal;
        assert_eq!(
            helper.decide_from(&ctx, &mut manager, 0, 16.0),
            Settle::PageTurn {
                slot: 1,
                dest: Point::new(1000.0, 0.0),
            }
        );
        assert_eq!(
            helper.turn_from(&ctx, &mut manager, 0, Direction::Right),
            Some(Settle::PageTurn {
                slot: 1,
                dest: Point::new(1000.0, 0.0),
            })
        );
        // Measured from the slot under the center, the same drag reads as a
        // pull back toward slot 0.
        assert_eq!(
            helper.decide(&ctx, &mut manager, 16.0),
            Settle::PageTurn {
                slot: 0,
                dest: Point::ZERO,
            }
        );
    }

    #[test]
    fn overscroll_within_slop_snaps_back() {
        let (mut ctx, mut manager) = setup(Orientation::HorizontalLtr, 3);
        ctx.offset_to(10.0, 0.0, None);
        assert_eq!(
            PopulateHelper::Horizontal.decide(&ctx, &mut manager, 16.0),
            Settle::SnapBack { dest: Point::ZERO }
        );
        // Zoomed in, the same slop covers less document space.
        ctx.scale_to(2.0, Point::ZERO, None);
        ctx.offset_to(510.0, 0.0, None);
        assert!(matches!(
            PopulateHelper::Horizontal.decide(&ctx, &mut manager, 16.0),
            Settle::PageTurn { slot: 1, .. }
        ));
    }

    #[test]
    fn right_to_left_turns_toward_negative_x() {
        let (mut ctx, mut manager) = setup(Orientation::HorizontalRtl, 3);
        ctx.scroll(-200.0, 0.0, None);
        assert_eq!(
            PopulateHelper::Horizontal.decide(&ctx, &mut manager, 16.0),
            Settle::PageTurn {
                slot: 1,
                dest: Point::new(-2000.0, 0.0),
            }
        );
    }

    #[test]
    fn vertical_page_turn_and_direct_turn() {
        let (mut ctx, mut manager) = setup(Orientation::Vertical, 3);
        ctx.offset_to(0.0, 400.0, None);
        let helper = PopulateHelper::for_orientation(Orientation::Vertical);
        assert_eq!(
            helper.decide(&ctx, &mut manager, 16.0),
            Settle::PageTurn {
                slot: 1,
                dest: Point::new(0.0, 1600.0),
            }
        );

        ctx.offset_to(0.0, 0.0, None);
        let config = PopulateConfig::default();
        let op: Operation = helper
            .populate_to(&ctx, &mut manager, Direction::Bottom, &config, 0)
            .unwrap();
        assert_eq!(op.duration(), config.page_turn_duration);
        assert!(
            helper
                .populate_to::<_, ()>(&ctx, &mut manager, Direction::Top, &config, 0)
                .is_none()
        );
    }

    #[test]
    fn zoomed_turn_lands_on_neighbor_edge() {
        let (mut ctx, mut manager) = setup(Orientation::HorizontalLtr, 3);
        ctx.offset_to(1000.0, 0.0, None);
        ctx.scale_to(2.0, Point::ZERO, None);
        ctx.offset_to(900.0, 300.0, None);
        let Settle::PageTurn { slot, dest } =
            PopulateHelper::Horizontal.decide(&ctx, &mut manager, 16.0)
        else {
            panic!("expected a page turn");
        };
        assert_eq!(slot, 0);
        // Viewport is 500 wide; its right edge lands on the page's right edge.
        assert_eq!(dest, Point::new(500.0, 300.0));
    }
}
