// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::VecDeque;
use std::fmt;

use folio_layout::{
    Direction, LayoutManager, Page, PageLayout, PageProvider, PopulateConfig, PopulateHelper,
};
use folio_motion::{Animator, Fling, Operation, ScaleArc, Tick, USER_PRIORITY};
use folio_view::{EDGE_EPSILON, RectExt, ViewContext};
use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;

use crate::config::{ConfigError, ReaderConfig};
use crate::event::{ReaderEvent, ScalingState, ScrollState};

/// Work chained after an operation finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FollowUp {
    Settle,
}

/// A page of a visible slot, ready to draw.
#[derive(Debug)]
pub struct VisiblePage<'a, P> {
    /// The page handle.
    pub page: &'a P,
    /// Document-space rectangle of the page.
    pub global: Rect,
    /// Device-pixel rectangle of the page.
    pub screen: Rect,
    /// Scale that fits the intrinsic page size into its slot position.
    pub base_scale: f64,
    /// `true` if the page overlaps the viewport.
    pub on_screen: bool,
}

/// A slot in the visible window.
#[derive(Debug)]
pub struct VisibleSlot<'a, P> {
    /// Slot index.
    pub index: usize,
    /// Document-space slot rectangle.
    pub global_position: Rect,
    /// `true` once every page of the slot is placed.
    pub is_filled: bool,
    /// Placed pages in reading order.
    pub pages: SmallVec<[VisiblePage<'a, P>; 2]>,
}

/// Headless paginated reader.
///
/// A `Reader` owns the view state, the slot layout and the live animation,
/// and turns gesture calls into view changes. The host:
///
/// - forwards gestures ([`Reader::touch_down`], [`Reader::pan`],
///   [`Reader::release`], [`Reader::fling`], the zoom calls, taps);
/// - calls [`Reader::tick`] once per frame while it returns `true`;
/// - draws [`Reader::visible_slots`];
/// - reacts to [`Reader::drain_events`].
///
/// Times are milliseconds from any epoch the host likes, as long as it is
/// monotonic. Nothing is laid out until [`Reader::set_view_size`] receives a
/// real size.
pub struct Reader<S: PageProvider> {
    config: ReaderConfig,
    view: ViewContext,
    layout: LayoutManager<S::Page>,
    populate: PopulateHelper,
    animator: Animator<FollowUp>,
    fling: Option<Fling>,
    provider: S,
    scroll_state: ScrollState,
    scaling_state: ScalingState,
    current_slot: Option<usize>,
    current_page: usize,
    events: VecDeque<ReaderEvent>,
}

impl<S: PageProvider> fmt::Debug for Reader<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("config", &self.config)
            .field("view", &self.view)
            .field("scroll_state", &self.scroll_state)
            .field("scaling_state", &self.scaling_state)
            .field("current_slot", &self.current_slot)
            .field("current_page", &self.current_page)
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl<S: PageProvider> Reader<S> {
    /// Creates a reader over `provider`.
    pub fn new(provider: S, config: ReaderConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut view = ViewContext::default();
        view.set_scale_limits(config.min_scale, config.max_scale);
        view.set_overscroll_margin(config.overscroll_margin);

        let mut layout = LayoutManager::new(config.orientation, config.arrangement);
        layout.set_page_count(provider.page_count());
        layout.set_prefetch(config.prefetch);
        layout.set_cache_limit(config.cache_limit);
        layout.init_view_context(&mut view);

        Ok(Self {
            populate: PopulateHelper::for_orientation(config.orientation),
            config,
            view,
            layout,
            animator: Animator::new(),
            fling: None,
            provider,
            scroll_state: ScrollState::Idle,
            scaling_state: ScalingState::Finish,
            current_slot: None,
            current_page: 0,
            events: VecDeque::new(),
        })
    }

    /// Configuration the reader was built with.
    #[must_use]
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// View state.
    #[must_use]
    pub fn view(&self) -> &ViewContext {
        &self.view
    }

    /// Slot layout.
    #[must_use]
    pub fn layout_manager(&self) -> &LayoutManager<S::Page> {
        &self.layout
    }

    /// Page provider.
    #[must_use]
    pub fn provider(&self) -> &S {
        &self.provider
    }

    /// Page provider, mutably.
    ///
    /// Call [`Reader::reload`] after changing the number of pages.
    pub fn provider_mut(&mut self) -> &mut S {
        &mut self.provider
    }

    /// Current scroll state.
    #[must_use]
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll_state
    }

    /// Current pinch state.
    #[must_use]
    pub fn scaling_state(&self) -> ScalingState {
        self.scaling_state
    }

    /// Current page index.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Current slot index, once something is laid out.
    #[must_use]
    pub fn current_slot(&self) -> Option<usize> {
        self.current_slot
    }

    /// Returns `true` while an animation or fling is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_active() || self.fling.is_some()
    }

    /// Removes and returns every queued event, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = ReaderEvent> + '_ {
        self.events.drain(..)
    }

    /// Resizes the view.
    ///
    /// Slots are as big as the view, so every layout is rebuilt and the
    /// current page is shown again. Empty or non-finite sizes are ignored.
    pub fn set_view_size(&mut self, width: f64, height: f64) {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            log::debug!("ignoring view size {width}x{height}");
            return;
        }
        let size = Size::new(width, height);
        self.view.set_view_size(size);
        self.layout.set_view_size(size);
        self.current_slot = None;
        self.show_page(self.current_page, false, 0);
    }

    /// Re-reads the page count from the provider and shows the current page.
    pub fn reload(&mut self) {
        let count = self.provider.page_count();
        self.layout.set_page_count(count);
        self.layout.clear();
        self.current_page = self.current_page.min(count.saturating_sub(1));
        self.current_slot = None;
        self.show_page(self.current_page, false, 0);
    }

    /// Shows the slot holding page `index`.
    ///
    /// Returns `false` if the page does not exist or the move was rejected.
    pub fn show_page(&mut self, index: usize, animate: bool, now: u64) -> bool {
        let Some(slot) = self.layout.slot_of_page(index) else {
            return false;
        };
        self.current_page = index;
        self.show_slot(slot, animate, now)
    }

    /// Shows slot `index` at the minimum scale.
    ///
    /// With `animate`, pans and zooms there over the page-turn duration;
    /// otherwise jumps. Returns `false` if the slot does not exist or the
    /// animation was rejected.
    pub fn show_slot(&mut self, index: usize, animate: bool, now: u64) -> bool {
        let Some(rect) = self.layout.slot_rect(index) else {
            return false;
        };
        self.fling = None;
        if !animate {
            self.animator.abort();
            let center = Point::new(
                self.view.view_size().width / 2.0,
                self.view.view_size().height / 2.0,
            );
            self.view.scale_to(self.view.min_scale(), center, None);
            self.view.offset_to(rect.x0, rect.y0, None);
            self.set_scroll_state(ScrollState::Idle);
            self.latch_current();
            return true;
        }
        let op = Operation::translate(
            self.view.origin(),
            rect.origin(),
            now,
            self.config.page_turn_duration,
        )
        .with_scale(ScaleArc {
            from: self.view.scale(),
            to: self.view.min_scale(),
            focus: None,
        })
        .with_priority(USER_PRIORITY);
        self.start(op)
    }

    /// Starts a touch: stops any animation or fling.
    ///
    /// The slot under the viewport center becomes the current slot. Settling
    /// and flings after the gesture are measured against it, however far the
    /// drag goes.
    pub fn touch_down(&mut self) {
        self.animator.abort();
        self.fling = None;
        self.set_scroll_state(ScrollState::Idle);
        self.latch_current();
    }

    /// Drags by `(dx, dy)` screen pixels; the content follows the finger.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let scale = self.view.scale();
        let bounds = self.current_scroll_area();
        self.view.scroll(-dx / scale, -dy / scale, bounds);
        self.set_scroll_state(ScrollState::Dragging);
    }

    /// Ends a touch without velocity: settles and checks for read complete.
    pub fn release(&mut self, now: u64) {
        self.check_read_complete();
        self.settle(now);
    }

    /// Ends a touch with velocity `(vx, vy)` in screen pixels per second.
    ///
    /// Flinging toward a neighbor while already at the edge of the current
    /// page turns the page. Otherwise a kinetic fling runs inside the current
    /// scroll area. When neither applies the view settles as on
    /// [`Reader::release`] and `false` is returned.
    pub fn fling(&mut self, vx: f64, vy: f64, now: u64) -> bool {
        self.check_read_complete();
        if self.try_fling(vx, vy, now) {
            true
        } else {
            self.settle(now);
            false
        }
    }

    /// Starts a pinch.
    pub fn begin_zoom(&mut self) {
        self.set_scaling_state(ScalingState::Begin);
    }

    /// Scales by `factor` around `focus` (device pixels).
    pub fn zoom(&mut self, factor: f64, focus: Point) {
        if matches!(self.scaling_state, ScalingState::Finish | ScalingState::End) {
            self.begin_zoom();
        }
        self.set_scaling_state(ScalingState::Scaling);
        let bounds = self.current_scroll_area();
        self.view.scale_by(factor, focus, bounds);
    }

    /// Ends a pinch and settles.
    pub fn end_zoom(&mut self, now: u64) {
        if matches!(
            self.scaling_state,
            ScalingState::Begin | ScalingState::Scaling
        ) {
            self.set_scaling_state(ScalingState::End);
        }
        self.settle(now);
    }

    /// Single tap at `point` (device pixels). Returns the page under it.
    pub fn tap(&mut self, point: Point) -> Option<usize> {
        let position = self.view.project_to_global(point);
        let page = self.page_at(position);
        self.events.push_back(ReaderEvent::Tapped { page, position });
        page
    }

    /// Double tap at `point` (device pixels).
    ///
    /// Zooms to the double-tap scale around the tap, or back to the minimum
    /// scale when already zoomed in, then settles. Returns the page under the
    /// tap.
    pub fn double_tap(&mut self, point: Point, now: u64) -> Option<usize> {
        let position = self.view.project_to_global(point);
        let page = self.page_at(position);
        self.events
            .push_back(ReaderEvent::DoubleTapped { page, position });

        let scale = self.view.scale();
        let target = if scale > self.view.min_scale() + EDGE_EPSILON {
            self.view.min_scale()
        } else {
            self.config.double_tap_scale
        };
        let op = Operation::scale(scale, target, Some(point), now, self.config.scale_duration)
            .with_priority(USER_PRIORITY)
            .with_completion(FollowUp::Settle);
        self.start(op);
        page
    }

    /// Animates the view to fit the document-space region `region`.
    ///
    /// The scale is limited to the scale limits and the destination is kept
    /// inside the scroll area of the slot holding the region's center.
    /// Returns `false` for an empty region or one outside the document.
    pub fn focus_rect(&mut self, region: Rect, now: u64) -> bool {
        let region = region.abs();
        if region.width() <= 0.0 || region.height() <= 0.0 {
            return false;
        }
        let Some(slot) = self.layout.slot_at(region.center()) else {
            return false;
        };
        let view_size = self.view.view_size();
        let target = (view_size.width / region.width())
            .min(view_size.height / region.height())
            .clamp(self.view.min_scale(), self.view.max_scale());
        let extent = Size::new(view_size.width / target, view_size.height / target);
        let mut dest = Rect::from_center_size(region.center(), extent);
        if let Some(area) = self
            .layout
            .obtain(slot, &mut self.provider)
            .map(|layout| layout.scaled_scroll_area(target))
        {
            dest = dest.clamp_inside(area);
        }
        let op = Operation::translate(
            self.view.origin(),
            dest.origin(),
            now,
            self.config.scale_duration,
        )
        .with_scale(ScaleArc {
            from: self.view.scale(),
            to: target,
            focus: Some(Point::ZERO),
        })
        .with_priority(USER_PRIORITY);
        self.start(op)
    }

    /// Advances the fling and the live animation to time `now`.
    ///
    /// Returns `true` while another frame is needed.
    pub fn tick(&mut self, now: u64) -> bool {
        let mut running = false;

        if let Some(fling) = self.fling {
            let p = fling.position(now);
            let bounds = self.current_scroll_area();
            self.view.offset_to(p.x, p.y, bounds);
            if fling.is_finished(now) {
                self.fling = None;
            } else {
                running = true;
            }
        }

        let bounds = self.current_scroll_area();
        match self.animator.tick(&mut self.view, bounds, now) {
            Tick::Idle | Tick::Finished(None) => {}
            Tick::Running => running = true,
            Tick::Finished(Some(FollowUp::Settle)) => running |= self.settle(now),
        }
        log::trace!("tick {now}: viewport {:?}", self.view.viewport());

        if !running && self.scroll_state == ScrollState::Settling {
            self.set_scroll_state(ScrollState::Idle);
        }
        running
    }

    /// Slots in the visible window with their pages, in slot order.
    ///
    /// Pages not delivered by the provider yet are missing and asked for
    /// again on the next call.
    pub fn visible_slots(&mut self) -> Vec<VisibleSlot<'_, S::Page>> {
        let view = &self.view;
        let viewport = view.viewport();
        self.layout
            .obtain_visible(view, &mut self.provider)
            .into_iter()
            .map(|layout| visible_slot(layout, view, viewport))
            .collect()
    }

    /// Starts `op`, replacing any fling. Returns `false` if it was rejected.
    fn start(&mut self, op: Operation<FollowUp>) -> bool {
        if !self.animator.set(op) {
            return false;
        }
        self.fling = None;
        self.set_scroll_state(ScrollState::Settling);
        true
    }

    /// Settles onto the current slot or turns the page. Returns `true` if an
    /// animation started.
    fn settle(&mut self, now: u64) -> bool {
        self.prepare_layouts();
        let config: PopulateConfig = self.config.populate_config();
        let op = self.current_index().and_then(|current| {
            self.populate
                .populate_from(&self.view, &mut self.layout, current, &config, now)
        });
        let started = match op {
            Some(op) => self.start(op),
            None => false,
        };
        if !started && !self.is_animating() {
            self.set_scroll_state(ScrollState::Idle);
        }
        if self.scaling_state == ScalingState::End {
            self.set_scaling_state(ScalingState::Finish);
        }
        started
    }

    fn try_fling(&mut self, vx: f64, vy: f64, now: u64) -> bool {
        self.prepare_layouts();
        let (Some(current), Some(area)) = (self.current_index(), self.current_scroll_area()) else {
            return false;
        };
        let scale = self.view.scale();
        let velocity = Vec2::new(vx / scale, vy / scale);
        let direction = if velocity.x.abs() > velocity.y.abs() {
            if velocity.x > 0.0 {
                Some(Direction::Left)
            } else if velocity.x < 0.0 {
                Some(Direction::Right)
            } else {
                None
            }
        } else if velocity.y > 0.0 {
            Some(Direction::Top)
        } else if velocity.y < 0.0 {
            Some(Direction::Bottom)
        } else {
            None
        };

        if let Some(direction) = direction {
            if !self.has_room(area, direction) {
                let config = self.config.populate_config();
                if let Some(op) = self.populate.populate_to_from(
                    &self.view,
                    &mut self.layout,
                    current,
                    direction,
                    &config,
                    now,
                ) {
                    log::debug!("fling turns the page {direction:?}");
                    return self.start(op);
                }
            }
        }

        let viewport = self.view.viewport();
        if !area.contains_rect_within(viewport, EDGE_EPSILON) {
            return false;
        }
        let limits = Rect::new(
            area.x0,
            area.y0,
            (area.x1 - viewport.width()).max(area.x0),
            (area.y1 - viewport.height()).max(area.y0),
        );
        let Some(fling) = Fling::new(
            self.view.origin(),
            -velocity,
            self.config.fling_deceleration,
            limits,
            now,
        ) else {
            return false;
        };
        if fling.is_finished(now) {
            // Already pinned against the limits it heads for.
            return false;
        }
        self.animator.abort();
        self.fling = Some(fling);
        self.set_scroll_state(ScrollState::Settling);
        true
    }

    /// `true` if the viewport can still move toward `direction` inside `area`.
    fn has_room(&self, area: Rect, direction: Direction) -> bool {
        // Edges within EDGE_EPSILON count as flush.
        match direction {
            Direction::Left => self.view.can_scroll_left(area, -EDGE_EPSILON),
            Direction::Right => self.view.can_scroll_right(area, -EDGE_EPSILON),
            Direction::Top => self.view.can_scroll_top(area, -EDGE_EPSILON),
            Direction::Bottom => self.view.can_scroll_bottom(area, -EDGE_EPSILON),
        }
    }

    /// Emits [`ReaderEvent::ReadCompleted`] when the viewport is pulled past
    /// the end of the last slot.
    ///
    /// The pull must reach the touch slop on a reading-axis side with no
    /// neighbor. It must also be strictly positive, so that with a zero slop
    /// a release that merely rests on the last page's edge does not count.
    fn check_read_complete(&mut self) -> bool {
        let (Some(current), Some(last)) = (self.current_index(), self.layout.last_index()) else {
            return false;
        };
        if current != last {
            return false;
        }
        let Some(area) = self.current_scroll_area() else {
            return false;
        };
        let viewport = self.view.viewport();
        let directions: [(Direction, f64); 4] = [
            (Direction::Left, area.x0 - viewport.x0),
            (Direction::Right, viewport.x1 - area.x1),
            (Direction::Top, area.y0 - viewport.y0),
            (Direction::Bottom, viewport.y1 - area.y1),
        ];
        let slop = self.config.touch_slop / self.view.scale();
        let reading_axis = |d: Direction| match self.populate {
            PopulateHelper::Horizontal => matches!(d, Direction::Left | Direction::Right),
            PopulateHelper::Vertical => matches!(d, Direction::Top | Direction::Bottom),
        };
        let completed = directions.into_iter().any(|(direction, overscroll)| {
            reading_axis(direction)
                && overscroll >= slop
                && overscroll > 0.0
                && self.layout.neighbor_index(current, direction).is_none()
        });
        if completed {
            log::debug!("read completed at slot {current}");
            self.events.push_back(ReaderEvent::ReadCompleted);
        }
        completed
    }

    /// The latched current slot, or the one under the viewport center before
    /// anything was latched.
    fn current_index(&self) -> Option<usize> {
        self.current_slot
            .or_else(|| self.layout.current_index(&self.view))
    }

    /// Scaled scroll area of the current slot, filling its layout first.
    fn current_scroll_area(&mut self) -> Option<Rect> {
        let slot = self.current_index()?;
        let scale = self.view.scale();
        self.layout
            .obtain(slot, &mut self.provider)
            .map(|layout| layout.scaled_scroll_area(scale))
    }

    /// Fills the visible window so settling sees real page bounds.
    fn prepare_layouts(&mut self) {
        let filled = self
            .layout
            .obtain_visible(&self.view, &mut self.provider)
            .len();
        log::trace!("{filled} layouts ready");
    }

    fn page_at(&mut self, position: Point) -> Option<usize> {
        let slot = self.layout.slot_at(position)?;
        self.layout
            .obtain(slot, &mut self.provider)?
            .page_at(position)
            .map(Page::index)
    }

    /// Makes the slot under the viewport center current.
    fn latch_current(&mut self) {
        let Some(slot) = self.layout.current_index(&self.view) else {
            return;
        };
        if self.current_slot == Some(slot) {
            return;
        }
        self.current_slot = Some(slot);
        let pages = self
            .layout
            .arrangement()
            .page_range(slot, self.layout.page_count());
        if !pages.contains(&self.current_page) {
            self.current_page = pages.start;
        }
        log::debug!("slot {slot} selected, page {}", self.current_page);
        self.events.push_back(ReaderEvent::PageLayoutSelected {
            slot,
            page: self.current_page,
        });
    }

    fn set_scroll_state(&mut self, state: ScrollState) {
        if self.scroll_state == state {
            return;
        }
        log::debug!("scroll state {:?} -> {state:?}", self.scroll_state);
        self.scroll_state = state;
        self.events
            .push_back(ReaderEvent::ScrollStateChanged(state));
        if state == ScrollState::Idle {
            self.latch_current();
        }
    }

    fn set_scaling_state(&mut self, state: ScalingState) {
        if self.scaling_state == state {
            return;
        }
        log::debug!("scaling state {:?} -> {state:?}", self.scaling_state);
        self.scaling_state = state;
        self.events
            .push_back(ReaderEvent::ScalingStateChanged(state));
    }
}

fn visible_slot<'a, P: Page>(
    layout: &'a PageLayout<P>,
    view: &ViewContext,
    viewport: Rect,
) -> VisibleSlot<'a, P> {
    VisibleSlot {
        index: layout.index(),
        global_position: layout.global_position(),
        is_filled: layout.is_filled(),
        pages: layout
            .placements()
            .map(|p| VisiblePage {
                page: p.page,
                global: p.rect,
                screen: view.project_rect_to_screen(p.rect),
                base_scale: p.base_scale,
                on_screen: p.rect.intersects(viewport),
            })
            .collect(),
    }
}
