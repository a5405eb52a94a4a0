// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement of up to two pages inside one slot.
//!
//! A [`PageLayout`] is created empty for a slot rectangle and filled page by
//! page. Page rectangles are stored in canonical left-to-right form; a
//! flipped layout mirrors them about the slot's vertical center line when
//! they are read back, so flipping twice is exact.

use core::cell::Cell;

use folio_view::RectExt;
use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::arrangement::PageArrangement;
use crate::page::Page;

/// Share of a half slot's unused horizontal padding that goes to the outer
/// edge in a non-spread double layout.
pub const NON_SPREAD_OUTER_SHARE: f64 = 2.0 / 3.0;

/// Horizontal alignment of a page inside its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalAlign {
    /// Flush with the left edge.
    Left,
    /// Centered.
    Center,
    /// Flush with the right edge.
    Right,
}

impl HorizontalAlign {
    /// Returns the alignment seen in a mirror.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Center => Self::Center,
            Self::Right => Self::Left,
        }
    }
}

#[derive(Clone, Debug)]
struct PlacedPage<P> {
    page: P,
    rect: Rect,
    base_scale: f64,
    align: HorizontalAlign,
}

/// A page together with its effective geometry inside a layout.
#[derive(Debug)]
pub struct Placement<'a, P> {
    /// The page handle.
    pub page: &'a P,
    /// Document-space rectangle the page occupies.
    pub rect: Rect,
    /// Scale that fits the intrinsic page size into its position.
    pub base_scale: f64,
    /// Alignment inside the position, after mirroring.
    pub align: HorizontalAlign,
}

/// Pages placed inside one slot.
#[derive(Clone, Debug)]
pub struct PageLayout<P> {
    index: usize,
    arrangement: PageArrangement,
    global_position: Rect,
    expected: usize,
    positions: [Option<PlacedPage<P>>; 2],
    flipped: bool,
    scaled_area: Cell<Option<(f64, Rect)>>,
}

impl<P: Page> PageLayout<P> {
    /// Creates an empty layout for slot `index` occupying `global_position`.
    ///
    /// `expected` is the number of pages the slot holds; it is capped at the
    /// arrangement's pages per slot.
    #[must_use]
    pub fn new(
        index: usize,
        arrangement: PageArrangement,
        global_position: Rect,
        expected: usize,
    ) -> Self {
        Self {
            index,
            arrangement,
            global_position,
            expected: expected.min(arrangement.pages_per_slot()),
            positions: [None, None],
            flipped: false,
            scaled_area: Cell::new(None),
        }
    }

    /// Slot index of this layout.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Arrangement the layout was built for.
    #[must_use]
    pub fn arrangement(&self) -> PageArrangement {
        self.arrangement
    }

    /// Slot rectangle in document space.
    #[must_use]
    pub fn global_position(&self) -> Rect {
        self.global_position
    }

    /// Number of pages this layout waits for before it is filled.
    #[must_use]
    pub fn expected_pages(&self) -> usize {
        self.expected
    }

    /// Returns `true` if the layout is presented mirrored.
    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Places `page` in its position, replacing whatever was there.
    pub fn add(&mut self, page: P) {
        let position = match self.arrangement {
            PageArrangement::Single => 0,
            PageArrangement::Double { .. } => page.index() % 2,
        };
        let placed = self.place(page, position);
        self.positions[position] = Some(placed);
        self.scaled_area.set(None);
    }

    /// Returns `true` once every expected page is placed.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.positions.iter().flatten().count() >= self.expected
    }

    /// Placed pages in reading order.
    #[must_use]
    pub fn pages(&self) -> SmallVec<[&P; 2]> {
        self.positions.iter().flatten().map(|p| &p.page).collect()
    }

    /// Placed pages with their effective rectangles, in reading order.
    pub fn placements(&self) -> impl Iterator<Item = Placement<'_, P>> {
        self.positions.iter().flatten().map(|p| {
            let (rect, align) = if self.flipped {
                (p.rect.mirror_x(self.global_position), p.align.mirrored())
            } else {
                (p.rect, p.align)
            };
            Placement {
                page: &p.page,
                rect,
                base_scale: p.base_scale,
                align,
            }
        })
    }

    /// Toggles mirrored presentation.
    ///
    /// Page handles are untouched; only rectangles and alignments read back
    /// mirrored. A single-page layout is centered, so mirroring it changes
    /// nothing observable.
    pub fn flip(&mut self) -> &mut Self {
        self.flipped = !self.flipped;
        self.scaled_area.set(None);
        self
    }

    /// Bounding box of the placed pages, or the slot rectangle if none is placed.
    #[must_use]
    pub fn scroll_area(&self) -> Rect {
        self.placements()
            .map(|p| p.rect)
            .reduce(|a, b| a.union(b))
            .unwrap_or(self.global_position)
    }

    /// Scroll area widened for a view at `scale`.
    ///
    /// On each axis the area grows by `max(slot_extent / scale - area_extent, 0)`,
    /// split evenly between both sides. At scale 1 this makes the area as big
    /// as the slot; zoomed in, it shrinks toward the page bounds so the
    /// viewport can pan across the page but not into empty padding.
    #[must_use]
    pub fn scaled_scroll_area(&self, scale: f64) -> Rect {
        if let Some((cached_scale, rect)) = self.scaled_area.get() {
            if cached_scale == scale {
                return rect;
            }
        }
        let area = self.scroll_area();
        let slot = self.global_position;
        let (mx, my) = if scale > 0.0 {
            (
                (slot.width() / scale - area.width()).max(0.0) / 2.0,
                (slot.height() / scale - area.height()).max(0.0) / 2.0,
            )
        } else {
            (0.0, 0.0)
        };
        let rect = area.inflate(mx, my);
        self.scaled_area.set(Some((scale, rect)));
        rect
    }

    /// Returns `true` if page `index` is placed here.
    #[must_use]
    pub fn contains_page(&self, index: usize) -> bool {
        self.positions
            .iter()
            .flatten()
            .any(|p| p.page.index() == index)
    }

    /// First placed page in reading order.
    #[must_use]
    pub fn key_page(&self) -> Option<&P> {
        self.positions.iter().flatten().map(|p| &p.page).next()
    }

    /// Page under a document-space point.
    #[must_use]
    pub fn page_at(&self, point: Point) -> Option<&P> {
        self.placements()
            .find(|p| p.rect.contains(point))
            .map(|p| p.page)
    }

    fn place(&self, page: P, position: usize) -> PlacedPage<P> {
        let slot = self.global_position;
        let size = page.size();
        match self.arrangement {
            PageArrangement::Single => {
                let base_scale = fit_scale(slot.size(), size);
                let scaled = size * base_scale;
                let origin = Point::new(
                    slot.x0 + (slot.width() - scaled.width) / 2.0,
                    slot.y0 + (slot.height() - scaled.height) / 2.0,
                );
                PlacedPage {
                    page,
                    rect: Rect::from_origin_size(origin, scaled),
                    base_scale,
                    align: HorizontalAlign::Center,
                }
            }
            PageArrangement::Double { spread } => {
                let half = slot.width() / 2.0;
                let x0 = if position == 0 { slot.x0 } else { slot.x0 + half };
                let base_scale = fit_scale(Size::new(half, slot.height()), size);
                let scaled = size * base_scale;
                let pad = half - scaled.width;
                let (left_pad, align) = match (position, spread) {
                    (0, true) => (pad, HorizontalAlign::Right),
                    (_, true) => (0.0, HorizontalAlign::Left),
                    (0, false) => (pad * NON_SPREAD_OUTER_SHARE, HorizontalAlign::Center),
                    (_, false) => (pad * (1.0 - NON_SPREAD_OUTER_SHARE), HorizontalAlign::Center),
                };
                let origin = Point::new(
                    x0 + left_pad,
                    slot.y0 + (slot.height() - scaled.height) / 2.0,
                );
                PlacedPage {
                    page,
                    rect: Rect::from_origin_size(origin, scaled),
                    base_scale,
                    align,
                }
            }
        }
    }
}

/// Scale that fits `content` inside `available`; `0.0` for an empty page.
fn fit_scale(available: Size, content: Size) -> f64 {
    if content.width <= 0.0 || content.height <= 0.0 {
        return 0.0;
    }
    (available.width / content.width).min(available.height / content.height)
}
