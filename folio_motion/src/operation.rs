// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-bounded pan/zoom operations.
//!
//! An [`Operation`] carries an optional translate arc and an optional scale
//! arc that share one start time and duration. Each frame, [`Operation::step`]
//! moves a [`ViewContext`] along both arcs; an arc that reaches its end snaps
//! exactly onto its destination and is cleared. The operation is finished once
//! no arc is left.
//!
//! ```
//! use folio_motion::Operation;
//! use folio_view::ViewContext;
//! use kurbo::{Point, Size};
//!
//! let mut view = ViewContext::new(Size::new(1000.0, 1600.0));
//! let mut op: Operation = Operation::translate(Point::ZERO, Point::new(1000.0, 0.0), 0, 200);
//!
//! assert!(!op.step(&mut view, None, 100));
//! assert!(view.origin().x > 500.0);
//!
//! assert!(op.step(&mut view, None, 200));
//! assert_eq!(view.origin(), Point::new(1000.0, 0.0));
//! ```

use folio_view::ViewContext;
use kurbo::{Point, Rect};

use crate::easing::Easing;

/// Priority of settle operations produced after a gesture ends.
pub const SETTLE_PRIORITY: i32 = 0;

/// Priority of operations started directly by the user (double tap, focus).
pub const USER_PRIORITY: i32 = 1;

/// Pan arc between two document-space origins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TranslateArc {
    /// Origin at the start of the operation.
    pub start: Point,
    /// Origin at the end of the operation.
    pub dest: Point,
}

/// Zoom arc between two scales.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleArc {
    /// Scale at the start of the operation.
    pub from: f64,
    /// Scale at the end of the operation.
    pub to: f64,
    /// Screen-space zoom anchor.
    ///
    /// `None` re-derives the anchor every step from the current viewport
    /// center, so the zoom follows a viewport that is also being panned.
    pub focus: Option<Point>,
}

/// A time-bounded interpolation of the view toward a target state.
///
/// `T` is a completion token handed back by [`crate::Animator::tick`] once
/// the operation finishes; use it to chain follow-up work such as a settle
/// after a zoom.
#[derive(Clone, Debug)]
pub struct Operation<T = ()> {
    translate: Option<TranslateArc>,
    scale: Option<ScaleArc>,
    start_time: u64,
    duration: u64,
    priority: i32,
    easing: Easing,
    completion: Option<T>,
}

impl<T> Operation<T> {
    /// Creates an operation with no arcs starting at `start_time` (milliseconds).
    #[must_use]
    pub fn new(start_time: u64, duration: u64) -> Self {
        Self {
            translate: None,
            scale: None,
            start_time,
            duration,
            priority: SETTLE_PRIORITY,
            easing: Easing::default(),
            completion: None,
        }
    }

    /// Creates a translate-only operation.
    #[must_use]
    pub fn translate(start: Point, dest: Point, start_time: u64, duration: u64) -> Self {
        Self::new(start_time, duration).with_translate(TranslateArc { start, dest })
    }

    /// Creates a scale-only operation.
    #[must_use]
    pub fn scale(from: f64, to: f64, focus: Option<Point>, start_time: u64, duration: u64) -> Self {
        Self::new(start_time, duration).with_scale(ScaleArc { from, to, focus })
    }

    /// Sets the translate arc.
    #[must_use]
    pub fn with_translate(mut self, arc: TranslateArc) -> Self {
        self.translate = Some(arc);
        self
    }

    /// Sets the scale arc.
    #[must_use]
    pub fn with_scale(mut self, arc: ScaleArc) -> Self {
        self.scale = Some(arc);
        self
    }

    /// Sets the preemption priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the interpolation curve used by both arcs.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Attaches a completion token.
    #[must_use]
    pub fn with_completion(mut self, token: T) -> Self {
        self.completion = Some(token);
        self
    }

    /// Returns the live translate arc, if any.
    #[must_use]
    pub fn translate_arc(&self) -> Option<&TranslateArc> {
        self.translate.as_ref()
    }

    /// Returns the live scale arc, if any.
    #[must_use]
    pub fn scale_arc(&self) -> Option<&ScaleArc> {
        self.scale.as_ref()
    }

    /// Returns the priority.
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the start time in milliseconds.
    #[must_use]
    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    /// Returns the duration in milliseconds.
    #[must_use]
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Returns `true` once no arc is left.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.translate.is_none() && self.scale.is_none()
    }

    /// Returns normalized time at `now`; `1.0` or more means the end is reached.
    #[must_use]
    pub fn progress(&self, now: u64) -> f64 {
        if self.duration == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start_time);
        elapsed as f64 / self.duration as f64
    }

    /// Advances `view` to the state at time `now`, returning `true` when finished.
    ///
    /// `bounds` is forwarded to the view's clamping for both arcs.
    pub fn step(&mut self, view: &mut ViewContext, bounds: Option<Rect>, now: u64) -> bool {
        let t = self.progress(now);
        let factor = self.easing.apply(t);

        if let Some(arc) = self.scale {
            let focus = arc
                .focus
                .unwrap_or_else(|| view.project_to_screen(view.viewport().center()));
            if t >= 1.0 {
                view.scale_to(arc.to, focus, bounds);
                self.scale = None;
            } else {
                view.scale_to(arc.from + (arc.to - arc.from) * factor, focus, bounds);
            }
        }

        if let Some(arc) = self.translate {
            if t >= 1.0 {
                view.offset_to(arc.dest.x, arc.dest.y, bounds);
                self.translate = None;
            } else {
                let p = arc.start.lerp(arc.dest, factor);
                view.offset_to(p.x, p.y, bounds);
            }
        }

        self.is_finished()
    }

    /// Takes the completion token, leaving `None` behind.
    pub fn take_completion(&mut self) -> Option<T> {
        self.completion.take()
    }
}

#[cfg(test)]
mod tests {
    use folio_view::ViewContext;
    use kurbo::{Point, Size};

    use super::Operation;
    use crate::Easing;

    fn view() -> ViewContext {
        ViewContext::new(Size::new(1000.0, 1600.0))
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let mut ctx = view();
        let mut op: Operation = Operation::translate(Point::ZERO, Point::new(-50.0, 10.0), 5, 0);
        assert!(op.step(&mut ctx, None, 5));
        assert_eq!(ctx.origin(), Point::new(-50.0, 10.0));
    }

    #[test]
    fn translate_eases_out() {
        let mut ctx = view();
        let mut op: Operation =
            Operation::translate(Point::ZERO, Point::new(100.0, 0.0), 1000, 100);
        assert!(!op.step(&mut ctx, None, 1050));
        assert!((ctx.origin().x - 75.0).abs() < 1e-9);

        let mut linear: Operation =
            Operation::translate(Point::ZERO, Point::new(100.0, 0.0), 1000, 100)
                .with_easing(Easing::Linear);
        assert!(!linear.step(&mut ctx, None, 1050));
        assert!((ctx.origin().x - 50.0).abs() < 1e-9);
    }

    #[test]
    fn scale_arc_without_focus_zooms_around_viewport_center() {
        let mut ctx = view();
        let center = ctx.viewport().center();
        let mut op: Operation = Operation::scale(1.0, 2.0, None, 0, 100);
        op.step(&mut ctx, None, 40);
        op.step(&mut ctx, None, 100);
        assert_eq!(ctx.scale(), 2.0);
        let c = ctx.viewport().center();
        assert!((c.x - center.x).abs() < 1e-9 && (c.y - center.y).abs() < 1e-9);
    }

    #[test]
    fn finished_only_when_both_arcs_clear() {
        let mut ctx = view();
        let mut op: Operation<&str> = Operation::scale(1.0, 2.0, Some(Point::ZERO), 0, 100)
            .with_translate(super::TranslateArc {
                start: Point::ZERO,
                dest: Point::new(10.0, 10.0),
            })
            .with_completion("done");
        assert!(!op.step(&mut ctx, None, 99));
        assert!(op.scale_arc().is_some() && op.translate_arc().is_some());
        assert!(op.step(&mut ctx, None, 150));
        assert_eq!(op.take_completion(), Some("done"));
        assert_eq!(op.take_completion(), None);
    }

    #[test]
    fn time_before_start_counts_as_zero() {
        let op: Operation = Operation::new(100, 50);
        assert_eq!(op.progress(10), 0.0);
        assert_eq!(op.progress(125), 0.5);
    }
}
