// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::policy::ScrollPolicy;

/// Pan + zoom state of a reader view.
///
/// `ViewContext` maps device pixels onto document space. The pan origin is
/// the document-space point shown at the top-left corner of the view, and the
/// scale is uniform on both axes:
///
/// ```text
/// viewport = Rect(x, y, x + view_width / scale, y + view_height / scale)
/// ```
///
/// The viewport is recomputed after every mutation, so [`ViewContext::viewport`]
/// is always consistent with the origin, scale and view size.
#[derive(Clone, Debug)]
pub struct ViewContext {
    view_size: Size,
    origin: Point,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
    horizontal_policy: ScrollPolicy,
    vertical_policy: ScrollPolicy,
    overscroll_margin: f64,
    viewport: Rect,
}

impl Default for ViewContext {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl ViewContext {
    /// Creates a view of `view_size` device pixels.
    ///
    /// - Initial scale is `1.0`, clamped to `[1.0, 5.0]`.
    /// - Initial origin is the document origin.
    /// - Both axes use [`ScrollPolicy::StrictScrollArea`].
    #[must_use]
    pub fn new(view_size: Size) -> Self {
        let mut ctx = Self {
            view_size,
            origin: Point::ZERO,
            scale: 1.0,
            min_scale: 1.0,
            max_scale: 5.0,
            horizontal_policy: ScrollPolicy::default(),
            vertical_policy: ScrollPolicy::default(),
            overscroll_margin: 0.0,
            viewport: Rect::ZERO,
        };
        ctx.rebuild_viewport();
        ctx
    }

    /// Returns the view size in device pixels.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Sets the view size in device pixels.
    ///
    /// Origin and scale are kept; the viewport is rebuilt.
    pub fn set_view_size(&mut self, size: Size) {
        if self.view_size == size {
            return;
        }
        self.view_size = size;
        self.rebuild_viewport();
    }

    /// Returns the document-space pan origin.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the current uniform scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the minimum scale.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Returns the maximum scale.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Sets the minimum and maximum scale.
    ///
    /// The range is normalized so that `min <= max`, and the current scale is
    /// clamped into it around the view center.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        let center = Point::new(self.view_size.width / 2.0, self.view_size.height / 2.0);
        self.scale_to(self.scale, center, None);
    }

    /// Returns the `(horizontal, vertical)` scroll policies.
    #[must_use]
    pub fn scroll_policy(&self) -> (ScrollPolicy, ScrollPolicy) {
        (self.horizontal_policy, self.vertical_policy)
    }

    /// Sets the scroll policy of each axis.
    pub fn set_scroll_policy(&mut self, horizontal: ScrollPolicy, vertical: ScrollPolicy) {
        self.horizontal_policy = horizontal;
        self.vertical_policy = vertical;
    }

    /// Returns the overscroll margin used by [`ScrollPolicy::Limited`].
    #[must_use]
    pub fn overscroll_margin(&self) -> f64 {
        self.overscroll_margin
    }

    /// Sets the overscroll margin (document units) used by [`ScrollPolicy::Limited`].
    pub fn set_overscroll_margin(&mut self, margin: f64) {
        self.overscroll_margin = margin.max(0.0);
    }

    /// Returns the visible document-space rectangle.
    #[must_use]
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Returns the size of the viewport in document units.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        Size::new(
            self.view_size.width / self.scale,
            self.view_size.height / self.scale,
        )
    }

    /// Moves the pan origin to `(x, y)`.
    ///
    /// With `bounds`, each axis is clamped according to its [`ScrollPolicy`].
    pub fn offset_to(&mut self, x: f64, y: f64, bounds: Option<Rect>) {
        self.origin = self.clamp_origin(Point::new(x, y), bounds);
        self.rebuild_viewport();
    }

    /// Moves the pan origin by `(dx, dy)` document units.
    pub fn scroll(&mut self, dx: f64, dy: f64, bounds: Option<Rect>) {
        self.offset_to(self.origin.x + dx, self.origin.y + dy, bounds);
    }

    /// Sets the scale, keeping the document point under `focus` fixed.
    ///
    /// `focus` is in device pixels. The requested scale is clamped to the
    /// scale limits; if the result equals the current scale nothing changes
    /// and `false` is returned. Otherwise the viewport-size change is shared
    /// between the edges in proportion to the focus position, the same
    /// clamping as [`ViewContext::offset_to`] is applied and `true` is
    /// returned.
    pub fn scale_to(&mut self, scale: f64, focus: Point, bounds: Option<Rect>) -> bool {
        let new_scale = scale.clamp(self.min_scale, self.max_scale);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return false;
        }
        if self.view_size.width <= 0.0 || self.view_size.height <= 0.0 {
            self.scale = new_scale;
            self.rebuild_viewport();
            return true;
        }

        let focus_ratio = Vec2::new(
            focus.x / self.view_size.width,
            focus.y / self.view_size.height,
        );
        let old_extent = self.viewport_size();
        let new_extent = Size::new(
            self.view_size.width / new_scale,
            self.view_size.height / new_scale,
        );
        let shift = Vec2::new(
            (old_extent.width - new_extent.width) * focus_ratio.x,
            (old_extent.height - new_extent.height) * focus_ratio.y,
        );

        self.scale = new_scale;
        self.offset_to(self.origin.x + shift.x, self.origin.y + shift.y, bounds);
        true
    }

    /// Multiplies the scale by `factor` around `focus` (device pixels).
    pub fn scale_by(&mut self, factor: f64, focus: Point, bounds: Option<Rect>) -> bool {
        if factor <= 0.0 {
            return false;
        }
        self.scale_to(self.scale * factor, focus, bounds)
    }

    /// Returns `true` unless the viewport's left edge already lies outside
    /// `rect` by `delta` or more.
    #[must_use]
    pub fn can_scroll_left(&self, rect: Rect, delta: f64) -> bool {
        rect.x0 - delta < self.viewport.x0
    }

    /// Returns `true` unless the viewport's right edge already lies outside
    /// `rect` by `delta` or more.
    #[must_use]
    pub fn can_scroll_right(&self, rect: Rect, delta: f64) -> bool {
        rect.x1 + delta > self.viewport.x1
    }

    /// Returns `true` unless the viewport's top edge already lies outside
    /// `rect` by `delta` or more.
    #[must_use]
    pub fn can_scroll_top(&self, rect: Rect, delta: f64) -> bool {
        rect.y0 - delta < self.viewport.y0
    }

    /// Returns `true` unless the viewport's bottom edge already lies outside
    /// `rect` by `delta` or more.
    #[must_use]
    pub fn can_scroll_bottom(&self, rect: Rect, delta: f64) -> bool {
        rect.y1 + delta > self.viewport.y1
    }

    /// Converts a device-pixel point into document space.
    #[must_use]
    pub fn project_to_global(&self, screen: Point) -> Point {
        self.origin + screen.to_vec2() / self.scale
    }

    /// Converts a document-space point into device pixels.
    #[must_use]
    pub fn project_to_screen(&self, global: Point) -> Point {
        ((global - self.origin) * self.scale).to_point()
    }

    /// Converts a document-space rectangle into device pixels.
    #[must_use]
    pub fn project_rect_to_screen(&self, global: Rect) -> Rect {
        let p0 = self.project_to_screen(Point::new(global.x0, global.y0));
        let p1 = self.project_to_screen(Point::new(global.x1, global.y1));
        Rect::from_points(p0, p1)
    }

    fn clamp_origin(&self, origin: Point, bounds: Option<Rect>) -> Point {
        let Some(bounds) = bounds else {
            return origin;
        };
        let extent = self.viewport_size();
        Point::new(
            self.horizontal_policy.clamp(
                origin.x,
                extent.width,
                bounds.x0,
                bounds.x1,
                self.overscroll_margin,
            ),
            self.vertical_policy.clamp(
                origin.y,
                extent.height,
                bounds.y0,
                bounds.y1,
                self.overscroll_margin,
            ),
        )
    }

    fn rebuild_viewport(&mut self) {
        self.viewport = Rect::from_origin_size(self.origin, self.viewport_size());
    }
}
