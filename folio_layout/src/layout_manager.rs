// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::RangeInclusive;

use folio_view::{ScrollPolicy, ViewContext};
use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};

use crate::arrangement::PageArrangement;
use crate::page::{Page, PageProvider};
use crate::page_layout::PageLayout;

/// Number of slots laid out beyond each end of the visible range.
pub const DEFAULT_PREFETCH: usize = 1;

/// Reading direction: how slot indices map onto document space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Slots advance to the right.
    #[default]
    HorizontalLtr,
    /// Slots advance to the left, at negative x.
    HorizontalRtl,
    /// Slots advance downward.
    Vertical,
}

impl Orientation {
    /// Returns `true` for the two horizontal orientations.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::HorizontalLtr | Self::HorizontalRtl)
    }

    /// `(horizontal, vertical)` scroll policies for a view in this orientation.
    ///
    /// The reading axis is unlimited so that overscroll can turn the page.
    #[must_use]
    pub const fn scroll_policy(self) -> (ScrollPolicy, ScrollPolicy) {
        match self {
            Self::HorizontalLtr | Self::HorizontalRtl => {
                (ScrollPolicy::Unlimited, ScrollPolicy::StrictScrollArea)
            }
            Self::Vertical => (ScrollPolicy::Limited, ScrollPolicy::Unlimited),
        }
    }
}

/// Screen direction of a neighboring slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Toward smaller x.
    Left,
    /// Toward larger x.
    Right,
    /// Toward smaller y.
    Top,
    /// Toward larger y.
    Bottom,
}

/// Maps the linear slot index space onto document space.
///
/// Slots are as big as the view and laid out contiguously along the reading
/// axis. [`PageLayout`]s are created lazily on first access and cached by
/// slot index until the view size or page count changes.
#[derive(Clone, Debug)]
pub struct LayoutManager<P> {
    orientation: Orientation,
    arrangement: PageArrangement,
    view_size: Size,
    page_count: usize,
    prefetch: usize,
    cache_limit: Option<usize>,
    cache: HashMap<usize, PageLayout<P>>,
}

impl<P: Page> LayoutManager<P> {
    /// Creates a manager for an empty document and a zero-sized view.
    #[must_use]
    pub fn new(orientation: Orientation, arrangement: PageArrangement) -> Self {
        Self {
            orientation,
            arrangement,
            view_size: Size::ZERO,
            page_count: 0,
            prefetch: DEFAULT_PREFETCH,
            cache_limit: None,
            cache: HashMap::new(),
        }
    }

    /// Reading direction.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Page arrangement inside each slot.
    #[must_use]
    pub fn arrangement(&self) -> PageArrangement {
        self.arrangement
    }

    /// Slot size.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Sets the slot size; a change drops every cached layout.
    pub fn set_view_size(&mut self, size: Size) {
        if self.view_size != size {
            self.view_size = size;
            self.clear();
        }
    }

    /// Number of pages in the document.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Sets the number of pages; a change drops every cached layout.
    pub fn set_page_count(&mut self, count: usize) {
        if self.page_count != count {
            self.page_count = count;
            self.clear();
        }
    }

    /// Number of slots laid out beyond each end of the visible range.
    #[must_use]
    pub fn prefetch(&self) -> usize {
        self.prefetch
    }

    /// Sets the prefetch margin.
    pub fn set_prefetch(&mut self, prefetch: usize) {
        self.prefetch = prefetch;
    }

    /// Maximum number of cached layouts, if bounded.
    #[must_use]
    pub fn cache_limit(&self) -> Option<usize> {
        self.cache_limit
    }

    /// Bounds the layout cache.
    ///
    /// When more layouts than `limit` are cached after
    /// [`LayoutManager::obtain_visible`], the ones outside the prefetch window
    /// are dropped. The window itself is never evicted.
    pub fn set_cache_limit(&mut self, limit: Option<usize>) {
        self.cache_limit = limit;
    }

    /// Number of cached layouts.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Drops every cached layout.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Number of slots.
    #[must_use]
    pub fn count(&self) -> usize {
        self.arrangement.slot_count(self.page_count)
    }

    /// Index of the last slot, or `None` for an empty document.
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.count().checked_sub(1)
    }

    /// Slot holding page `page`, or `None` if the page does not exist.
    #[must_use]
    pub fn slot_of_page(&self, page: usize) -> Option<usize> {
        (page < self.page_count).then(|| self.arrangement.slot_of_page(page))
    }

    /// Applies this orientation's scroll policies to `ctx`.
    pub fn init_view_context(&self, ctx: &mut ViewContext) {
        let (horizontal, vertical) = self.orientation.scroll_policy();
        ctx.set_scroll_policy(horizontal, vertical);
    }

    /// Pan origin that shows slot 0.
    #[must_use]
    pub fn initial_origin(&self) -> Point {
        self.slot_rect(0).map_or(Point::ZERO, |r| r.origin())
    }

    /// Document-space rectangle of slot `index`.
    #[must_use]
    pub fn slot_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.count() {
            return None;
        }
        let Size { width, height } = self.view_size;
        let i = index as f64;
        Some(match self.orientation {
            Orientation::HorizontalLtr => Rect::new(i * width, 0.0, (i + 1.0) * width, height),
            Orientation::HorizontalRtl => Rect::new(-(i + 1.0) * width, 0.0, -i * width, height),
            Orientation::Vertical => Rect::new(0.0, i * height, width, (i + 1.0) * height),
        })
    }

    /// Slot under the viewport center, clamped to the document.
    #[must_use]
    pub fn current_index(&self, ctx: &ViewContext) -> Option<usize> {
        let last = self.last_index()?;
        Some(clamp_index(self.raw_slot_at(ctx.viewport().center()), last))
    }

    /// Slot containing the document-space point `point` on the reading axis.
    ///
    /// Unlike [`LayoutManager::current_index`], points before the first or
    /// after the last slot give `None`.
    #[must_use]
    pub fn slot_at(&self, point: Point) -> Option<usize> {
        usize::try_from(self.raw_slot_at(point))
            .ok()
            .filter(|&i| i < self.count())
    }

    fn raw_slot_at(&self, point: Point) -> isize {
        let (position, extent) = match self.orientation {
            Orientation::HorizontalLtr => (point.x, self.view_size.width),
            Orientation::HorizontalRtl => (-point.x, self.view_size.width),
            Orientation::Vertical => (point.y, self.view_size.height),
        };
        if extent <= 0.0 {
            return 0;
        }
        floor_index(position / extent)
    }

    /// Layout of slot `index`, created and cached on first access.
    ///
    /// Right-to-left layouts are flipped once, at creation.
    pub fn page_layout(&mut self, index: usize) -> Option<&PageLayout<P>> {
        if !self.cache.contains_key(&index) {
            let layout = self.create(index)?;
            self.cache.insert(index, layout);
        }
        self.cache.get(&index)
    }

    /// Cached layout of slot `index`, without creating it.
    #[must_use]
    pub fn cached_layout(&self, index: usize) -> Option<&PageLayout<P>> {
        self.cache.get(&index)
    }

    /// Layout of the current slot.
    pub fn current_page_layout(&mut self, ctx: &ViewContext) -> Option<&PageLayout<P>> {
        let index = self.current_index(ctx)?;
        self.page_layout(index)
    }

    /// Slot next to `index` in screen direction `direction`.
    ///
    /// `None` at the ends of the document and for directions orthogonal to
    /// the reading axis.
    #[must_use]
    pub fn neighbor_index(&self, index: usize, direction: Direction) -> Option<usize> {
        let forward = match (self.orientation, direction) {
            (Orientation::HorizontalLtr, Direction::Right)
            | (Orientation::HorizontalRtl, Direction::Left)
            | (Orientation::Vertical, Direction::Bottom) => true,
            (Orientation::HorizontalLtr, Direction::Left)
            | (Orientation::HorizontalRtl, Direction::Right)
            | (Orientation::Vertical, Direction::Top) => false,
            _ => return None,
        };
        if forward {
            index.checked_add(1).filter(|&i| i < self.count())
        } else {
            index.checked_sub(1)
        }
    }

    /// Layout next to the current slot in `direction`.
    pub fn neighbor_page_layout(
        &mut self,
        ctx: &ViewContext,
        direction: Direction,
    ) -> Option<&PageLayout<P>> {
        let index = self.neighbor_index(self.current_index(ctx)?, direction)?;
        self.page_layout(index)
    }

    /// Layout left of the current slot.
    pub fn left_page_layout(&mut self, ctx: &ViewContext) -> Option<&PageLayout<P>> {
        self.neighbor_page_layout(ctx, Direction::Left)
    }

    /// Layout right of the current slot.
    pub fn right_page_layout(&mut self, ctx: &ViewContext) -> Option<&PageLayout<P>> {
        self.neighbor_page_layout(ctx, Direction::Right)
    }

    /// Layout above the current slot.
    pub fn top_page_layout(&mut self, ctx: &ViewContext) -> Option<&PageLayout<P>> {
        self.neighbor_page_layout(ctx, Direction::Top)
    }

    /// Layout below the current slot.
    pub fn bottom_page_layout(&mut self, ctx: &ViewContext) -> Option<&PageLayout<P>> {
        self.neighbor_page_layout(ctx, Direction::Bottom)
    }

    /// First slot touched by the viewport; may lie outside the document.
    #[must_use]
    pub fn first_visible_index(&self, ctx: &ViewContext) -> isize {
        let (near, _, extent) = self.reading_span(ctx.viewport());
        if extent <= 0.0 {
            return 0;
        }
        floor_index(near / extent)
    }

    /// Last slot touched by the viewport; may lie outside the document.
    #[must_use]
    pub fn last_visible_index(&self, ctx: &ViewContext) -> isize {
        let (_, far, extent) = self.reading_span(ctx.viewport());
        if extent <= 0.0 {
            return 0;
        }
        floor_index((far / extent).ceil()) - 1
    }

    /// Visible slots plus the prefetch margin, clamped to the document.
    ///
    /// `None` for an empty document or an empty view.
    #[must_use]
    pub fn visible_window(&self, ctx: &ViewContext) -> Option<RangeInclusive<usize>> {
        let last = self.last_index()?;
        if self.view_size.width <= 0.0 || self.view_size.height <= 0.0 {
            return None;
        }
        let first_visible = self.first_visible_index(ctx);
        let last_visible = self.last_visible_index(ctx).max(first_visible);
        let prefetch = isize::try_from(self.prefetch).unwrap_or(isize::MAX);
        let first = first_visible.saturating_sub(prefetch);
        let end = last_visible.saturating_add(prefetch);
        if end < 0 || usize::try_from(first).is_ok_and(|f| f > last) {
            return None;
        }
        Some(clamp_index(first, last)..=clamp_index(end, last))
    }

    /// Lays out and fills every slot in the visible window.
    ///
    /// Pages the provider cannot deliver yet leave their slot unfilled; the
    /// next call asks again. Layouts are returned in index order.
    pub fn obtain_visible<S>(&mut self, ctx: &ViewContext, provider: &mut S) -> Vec<&PageLayout<P>>
    where
        S: PageProvider<Page = P>,
    {
        let Some(window) = self.visible_window(ctx) else {
            return Vec::new();
        };
        for index in window.clone() {
            self.fill(index, provider);
        }
        self.evict_outside(&window);
        let cache = &self.cache;
        window.filter_map(|i| cache.get(&i)).collect()
    }

    /// Layout of slot `index`, created if needed and filled through `provider`.
    pub fn obtain<S>(&mut self, index: usize, provider: &mut S) -> Option<&PageLayout<P>>
    where
        S: PageProvider<Page = P>,
    {
        self.fill(index, provider);
        self.cache.get(&index)
    }

    fn fill<S>(&mut self, index: usize, provider: &mut S)
    where
        S: PageProvider<Page = P>,
    {
        if !self.cache.contains_key(&index) {
            let Some(layout) = self.create(index) else {
                return;
            };
            self.cache.insert(index, layout);
        }
        let pages = self.arrangement.page_range(index, self.page_count);
        let Some(layout) = self.cache.get_mut(&index) else {
            return;
        };
        if layout.is_filled() {
            return;
        }
        for page_index in pages {
            if layout.contains_page(page_index) {
                continue;
            }
            match provider.page(page_index) {
                Some(page) => layout.add(page),
                None => log::trace!("page {page_index} not ready for slot {index}"),
            }
        }
    }

    fn evict_outside(&mut self, window: &RangeInclusive<usize>) {
        let Some(limit) = self.cache_limit else {
            return;
        };
        if self.cache.len() > limit {
            let before = self.cache.len();
            self.cache.retain(|index, _| window.contains(index));
            log::trace!("evicted {} layouts", before - self.cache.len());
        }
    }

    fn create(&self, index: usize) -> Option<PageLayout<P>> {
        let rect = self.slot_rect(index)?;
        let expected = self.arrangement.page_range(index, self.page_count).len();
        let mut layout = PageLayout::new(index, self.arrangement, rect, expected);
        if self.orientation == Orientation::HorizontalRtl {
            layout.flip();
        }
        Some(layout)
    }

    /// `(near, far, slot_extent)` of `viewport` along the reading axis, with
    /// the sign normalized so that slot `i` spans `[i, i + 1) * slot_extent`.
    fn reading_span(&self, viewport: Rect) -> (f64, f64, f64) {
        match self.orientation {
            Orientation::HorizontalLtr => (viewport.x0, viewport.x1, self.view_size.width),
            Orientation::HorizontalRtl => (-viewport.x1, -viewport.x0, self.view_size.width),
            Orientation::Vertical => (viewport.y0, viewport.y1, self.view_size.height),
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "slot positions are far inside isize range; saturation is fine otherwise"
)]
fn floor_index(value: f64) -> isize {
    value.floor() as isize
}

fn clamp_index(index: isize, last: usize) -> usize {
    usize::try_from(index).map_or(0, |i| i.min(last))
}

#[cfg(test)]
mod tests {
    use folio_view::{RectExt, ScrollPolicy, ViewContext};
    use kurbo::{Point, Rect, Size};

    use super::{Direction, LayoutManager, Orientation};
    use crate::arrangement::PageArrangement;
    use crate::page::{FixedPages, PageProvider, SizedPage};

    const VIEW: Size = Size::new(1000.0, 1600.0);

    fn manager(orientation: Orientation, pages: usize) -> LayoutManager<SizedPage> {
        let mut m = LayoutManager::new(orientation, PageArrangement::Single);
        m.set_view_size(VIEW);
        m.set_page_count(pages);
        m
    }

    fn view_at(x: f64, y: f64) -> ViewContext {
        let mut ctx = ViewContext::new(VIEW);
        ctx.offset_to(x, y, None);
        ctx
    }

    #[test]
    fn slots_are_contiguous_and_disjoint() {
        for orientation in [
            Orientation::HorizontalLtr,
            Orientation::HorizontalRtl,
            Orientation::Vertical,
        ] {
            let m = manager(orientation, 5);
            for i in 0..4 {
                let a = m.slot_rect(i).unwrap();
                let b = m.slot_rect(i + 1).unwrap();
                assert_eq!(a.size(), VIEW);
                let touching = a.x1 == b.x0 || a.x0 == b.x1 || a.y1 == b.y0;
                assert!(touching, "{orientation:?} slots {i} and {}", i + 1);
                assert!(a.intersect(b).area() == 0.0);
            }
            assert!(m.slot_rect(5).is_none());
        }
    }

    #[test]
    fn slot_rects_follow_reading_direction() {
        let ltr = manager(Orientation::HorizontalLtr, 3);
        assert_eq!(ltr.slot_rect(2), Some(Rect::new(2000.0, 0.0, 3000.0, 1600.0)));
        let rtl = manager(Orientation::HorizontalRtl, 3);
        assert_eq!(rtl.slot_rect(0), Some(Rect::new(-1000.0, 0.0, 0.0, 1600.0)));
        assert_eq!(rtl.initial_origin(), Point::new(-1000.0, 0.0));
        let vertical = manager(Orientation::Vertical, 3);
        assert_eq!(vertical.slot_rect(1), Some(Rect::new(0.0, 1600.0, 1000.0, 3200.0)));
    }

    #[test]
    fn rtl_slots_mirror_ltr_slots() {
        let ltr = manager(Orientation::HorizontalLtr, 7);
        let rtl = manager(Orientation::HorizontalRtl, 7);
        let frame = Rect::new(-VIEW.width, 0.0, VIEW.width, VIEW.height);
        for i in 0..8 {
            let mirrored = ltr.slot_rect(i).map(|r| r.mirror_x(frame));
            assert_eq!(rtl.slot_rect(i), mirrored, "slot {i}");
        }
    }

    #[test]
    fn current_index_is_clamped() {
        let m = manager(Orientation::HorizontalLtr, 3);
        assert_eq!(m.current_index(&view_at(1400.0, 0.0)), Some(1));
        assert_eq!(m.current_index(&view_at(-900.0, 0.0)), Some(0));
        assert_eq!(m.current_index(&view_at(9000.0, 0.0)), Some(2));

        let rtl = manager(Orientation::HorizontalRtl, 3);
        assert_eq!(rtl.current_index(&view_at(-2000.0, 0.0)), Some(1));

        let empty = manager(Orientation::Vertical, 0);
        assert_eq!(empty.current_index(&view_at(0.0, 0.0)), None);
    }

    #[test]
    fn slot_at_rejects_points_outside_the_document() {
        let rtl = manager(Orientation::HorizontalRtl, 3);
        assert_eq!(rtl.slot_at(Point::new(-10.0, 5.0)), Some(0));
        assert_eq!(rtl.slot_at(Point::new(-2999.0, 5.0)), Some(2));
        assert_eq!(rtl.slot_at(Point::new(10.0, 5.0)), None);
        assert_eq!(rtl.slot_at(Point::new(-3001.0, 5.0)), None);
    }

    #[test]
    fn neighbors_follow_orientation() {
        let mut ltr = manager(Orientation::HorizontalLtr, 3);
        let ctx = view_at(0.0, 0.0);
        assert!(ltr.left_page_layout(&ctx).is_none());
        assert_eq!(ltr.right_page_layout(&ctx).map(|l| l.index()), Some(1));
        assert!(ltr.top_page_layout(&ctx).is_none());

        let mut rtl = manager(Orientation::HorizontalRtl, 3);
        let ctx = view_at(-1000.0, 0.0);
        assert_eq!(rtl.left_page_layout(&ctx).map(|l| l.index()), Some(1));
        assert!(rtl.right_page_layout(&ctx).is_none());

        let mut vertical = manager(Orientation::Vertical, 3);
        let ctx = view_at(0.0, 3200.0);
        assert_eq!(vertical.top_page_layout(&ctx).map(|l| l.index()), Some(1));
        assert!(vertical.bottom_page_layout(&ctx).is_none());
        assert!(vertical.right_page_layout(&ctx).is_none());
        assert_eq!(vertical.neighbor_index(2, Direction::Bottom), None);
    }

    #[test]
    fn visible_range_spans_partial_slots() {
        let m = manager(Orientation::HorizontalLtr, 10);
        let ctx = view_at(1500.0, 0.0);
        assert_eq!(m.first_visible_index(&ctx), 1);
        assert_eq!(m.last_visible_index(&ctx), 2);
        assert_eq!(m.visible_window(&ctx), Some(0..=3));

        let aligned = view_at(1000.0, 0.0);
        assert_eq!(m.first_visible_index(&aligned), 1);
        assert_eq!(m.last_visible_index(&aligned), 1);

        let before_start = view_at(-1500.0, 0.0);
        assert_eq!(m.first_visible_index(&before_start), -2);
        assert_eq!(m.visible_window(&before_start), Some(0..=0));
        assert_eq!(m.visible_window(&view_at(-5000.0, 0.0)), None);
    }

    #[test]
    fn obtain_visible_fills_window_in_order() {
        let mut m = manager(Orientation::HorizontalRtl, 6);
        let mut doc = FixedPages::new(6, Size::new(500.0, 800.0));
        let ctx = view_at(-2500.0, 0.0);
        let layouts = m.obtain_visible(&ctx, &mut doc);
        let indices: Vec<_> = layouts.iter().map(|l| l.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert!(layouts.iter().all(|l| l.is_filled() && l.is_flipped()));
        for layout in layouts {
            assert!(layout.global_position().contains(layout.scroll_area().center()));
        }
    }

    #[test]
    fn unready_pages_are_retried() {
        struct Slow {
            ready: bool,
        }
        impl PageProvider for Slow {
            type Page = SizedPage;
            fn page_count(&self) -> usize {
                2
            }
            fn page(&mut self, index: usize) -> Option<SizedPage> {
                (self.ready || index == 0).then_some(SizedPage::new(index, VIEW))
            }
        }

        let mut m = manager(Orientation::HorizontalLtr, 2);
        let mut slow = Slow { ready: false };
        let ctx = view_at(0.0, 0.0);
        let filled: Vec<_> = m
            .obtain_visible(&ctx, &mut slow)
            .iter()
            .map(|l| l.is_filled())
            .collect();
        assert_eq!(filled, vec![true, false]);

        slow.ready = true;
        assert!(m.obtain(1, &mut slow).is_some_and(|l| l.is_filled()));
        assert!(m.obtain(2, &mut slow).is_none());
    }

    #[test]
    fn empty_view_lays_out_nothing() {
        let mut m: LayoutManager<SizedPage> =
            LayoutManager::new(Orientation::HorizontalLtr, PageArrangement::Single);
        m.set_page_count(3);
        let mut doc = FixedPages::new(3, VIEW);
        assert!(m.obtain_visible(&ViewContext::default(), &mut doc).is_empty());
        assert_eq!(m.cached_len(), 0);
    }

    #[test]
    fn cache_limit_evicts_outside_window() {
        let mut m = manager(Orientation::Vertical, 20);
        m.set_cache_limit(Some(4));
        let mut doc = FixedPages::new(20, VIEW);
        m.obtain_visible(&view_at(0.0, 0.0), &mut doc);
        m.obtain_visible(&view_at(0.0, 16_000.0), &mut doc);
        assert_eq!(m.cached_len(), 3);
        assert!(m.cached_layout(0).is_none());
        assert!(m.cached_layout(10).is_some());
    }

    #[test]
    fn double_pages_pair_by_slot() {
        let mut m = LayoutManager::new(
            Orientation::HorizontalLtr,
            PageArrangement::Double { spread: true },
        );
        m.set_view_size(VIEW);
        m.set_page_count(5);
        assert_eq!(m.count(), 3);
        assert_eq!(m.slot_of_page(3), Some(1));
        assert_eq!(m.slot_of_page(5), None);

        let mut doc = FixedPages::new(5, Size::new(500.0, 800.0));
        let layouts = m.obtain_visible(&view_at(2000.0, 0.0), &mut doc);
        let last = layouts.last().unwrap();
        assert_eq!(last.index(), 2);
        assert_eq!(last.pages().len(), 1);
        assert!(last.is_filled());
    }

    #[test]
    fn view_context_policies_by_orientation() {
        let mut ctx = ViewContext::new(VIEW);
        manager(Orientation::Vertical, 1).init_view_context(&mut ctx);
        assert_eq!(
            ctx.scroll_policy(),
            (ScrollPolicy::Limited, ScrollPolicy::Unlimited)
        );
        manager(Orientation::HorizontalRtl, 1).init_view_context(&mut ctx);
        assert_eq!(
            ctx.scroll_policy(),
            (ScrollPolicy::Unlimited, ScrollPolicy::StrictScrollArea)
        );
    }
}
