// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded kinetic scrolling.
//!
//! A [`Fling`] moves the pan origin along the release velocity under constant
//! deceleration until it stops, clamped to a box of allowed origins.

use kurbo::{Point, Rect, Vec2};

/// Kinetic scroll of the pan origin.
///
/// Velocities are in document units per second; times in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fling {
    start: Point,
    direction: Vec2,
    speed: f64,
    deceleration: f64,
    limits: Rect,
    start_time: u64,
}

impl Fling {
    /// Starts a fling from `start` with `velocity`.
    ///
    /// `limits` is the box of allowed origins (not the scroll area itself).
    /// Returns `None` if the velocity is zero or `deceleration` is not
    /// positive.
    #[must_use]
    pub fn new(
        start: Point,
        velocity: Vec2,
        deceleration: f64,
        limits: Rect,
        start_time: u64,
    ) -> Option<Self> {
        let speed = velocity.hypot();
        if speed <= 0.0 || !speed.is_finite() || deceleration <= 0.0 || !deceleration.is_finite() {
            return None;
        }
        Some(Self {
            start,
            direction: velocity / speed,
            speed,
            deceleration,
            limits: limits.abs(),
            start_time,
        })
    }

    /// Total duration in milliseconds until the fling comes to rest.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.speed / self.deceleration * 1000.0
    }

    /// Distance travelled before clamping once the fling comes to rest.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.speed * self.speed / (2.0 * self.deceleration)
    }

    /// Returns the clamped origin at time `now`.
    #[must_use]
    pub fn position(&self, now: u64) -> Point {
        let t = self.elapsed_secs(now).min(self.speed / self.deceleration);
        let travelled = self.speed * t - 0.5 * self.deceleration * t * t;
        let p = self.start + self.direction * travelled;
        Point::new(
            p.x.clamp(self.limits.x0, self.limits.x1),
            p.y.clamp(self.limits.y0, self.limits.y1),
        )
    }

    /// Returns `true` once the fling has stopped or is pinned on every moving axis.
    #[must_use]
    pub fn is_finished(&self, now: u64) -> bool {
        if self.elapsed_secs(now) >= self.speed / self.deceleration {
            return true;
        }
        let p = self.position(now);
        let pinned_x = self.direction.x == 0.0
            || (self.direction.x < 0.0 && p.x <= self.limits.x0)
            || (self.direction.x > 0.0 && p.x >= self.limits.x1);
        let pinned_y = self.direction.y == 0.0
            || (self.direction.y < 0.0 && p.y <= self.limits.y0)
            || (self.direction.y > 0.0 && p.y >= self.limits.y1);
        pinned_x && pinned_y
    }

    fn elapsed_secs(&self, now: u64) -> f64 {
        now.saturating_sub(self.start_time) as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Vec2};

    use super::Fling;

    const LIMITS: Rect = Rect::new(0.0, 0.0, 10_000.0, 10_000.0);

    #[test]
    fn zero_velocity_does_not_fling() {
        assert!(Fling::new(Point::ZERO, Vec2::ZERO, 1000.0, LIMITS, 0).is_none());
        assert!(Fling::new(Point::ZERO, Vec2::new(1.0, 0.0), 0.0, LIMITS, 0).is_none());
    }

    #[test]
    fn comes_to_rest_after_its_distance() {
        let start = Point::new(100.0, 100.0);
        let fling = Fling::new(start, Vec2::new(1000.0, 0.0), 2000.0, LIMITS, 0).unwrap();
        assert_eq!(fling.duration(), 500.0);
        assert_eq!(fling.distance(), 250.0);

        assert!(!fling.is_finished(250));
        let mid = fling.position(250);
        assert!(mid.x > 100.0 && mid.x < 350.0);

        assert!(fling.is_finished(500));
        assert_eq!(fling.position(10_000), Point::new(350.0, 100.0));
    }

    #[test]
    fn clamps_and_stops_at_limits() {
        let limits = Rect::new(0.0, 0.0, 120.0, 0.0);
        let fling = Fling::new(
            Point::new(100.0, 0.0),
            Vec2::new(1000.0, 0.0),
            1000.0,
            limits,
            0,
        )
        .unwrap();
        assert_eq!(fling.position(400).x, 120.0);
        assert!(fling.is_finished(400));
    }
}
