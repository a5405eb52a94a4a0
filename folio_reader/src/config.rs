// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reader configuration and its validation.

use core::fmt;

use folio_layout::{
    DEFAULT_PAGE_TURN_DURATION, DEFAULT_PREFETCH, DEFAULT_REVERSE_DURATION, DEFAULT_TOUCH_SLOP,
    Orientation, PageArrangement, PopulateConfig,
};

/// Default duration of zoom animations, in milliseconds.
pub const DEFAULT_SCALE_DURATION: u64 = 250;

/// Default scale a double tap zooms to.
pub const DEFAULT_DOUBLE_TAP_SCALE: f64 = 2.5;

/// Default fling deceleration, in document units per second squared.
pub const DEFAULT_FLING_DECELERATION: f64 = 2000.0;

/// Settings for a [`crate::Reader`].
///
/// Build one with [`ReaderConfig::default`] and the `with_*` setters. Values
/// are checked by [`ReaderConfig::validate`] when the reader is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReaderConfig {
    /// Smallest allowed scale.
    pub min_scale: f64,
    /// Largest allowed scale.
    pub max_scale: f64,
    /// Reading direction.
    pub orientation: Orientation,
    /// Pages per slot.
    pub arrangement: PageArrangement,
    /// Duration of a page turn, in milliseconds.
    pub page_turn_duration: u64,
    /// Duration of a snap back, in milliseconds.
    pub reverse_duration: u64,
    /// Duration of zoom animations, in milliseconds.
    pub scale_duration: u64,
    /// Slots laid out beyond each end of the visible range.
    pub prefetch: usize,
    /// Overscroll, in screen pixels, that turns the page or completes reading.
    pub touch_slop: f64,
    /// Scale a double tap zooms to from the minimum scale.
    pub double_tap_scale: f64,
    /// Overscroll margin for axes with a limited scroll policy, in document units.
    pub overscroll_margin: f64,
    /// Deceleration of kinetic flings, in document units per second squared.
    pub fling_deceleration: f64,
    /// Maximum number of cached slot layouts; `None` keeps every layout.
    pub cache_limit: Option<usize>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 5.0,
            orientation: Orientation::default(),
            arrangement: PageArrangement::default(),
            page_turn_duration: DEFAULT_PAGE_TURN_DURATION,
            reverse_duration: DEFAULT_REVERSE_DURATION,
            scale_duration: DEFAULT_SCALE_DURATION,
            prefetch: DEFAULT_PREFETCH,
            touch_slop: DEFAULT_TOUCH_SLOP,
            double_tap_scale: DEFAULT_DOUBLE_TAP_SCALE,
            overscroll_margin: 0.0,
            fling_deceleration: DEFAULT_FLING_DECELERATION,
            cache_limit: None,
        }
    }
}

impl ReaderConfig {
    /// Sets the scale limits.
    #[must_use]
    pub fn with_scale_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    /// Sets the reading direction.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the page arrangement.
    #[must_use]
    pub fn with_arrangement(mut self, arrangement: PageArrangement) -> Self {
        self.arrangement = arrangement;
        self
    }

    /// Sets the page-turn and snap-back durations.
    #[must_use]
    pub fn with_populate_durations(mut self, page_turn: u64, reverse: u64) -> Self {
        self.page_turn_duration = page_turn;
        self.reverse_duration = reverse;
        self
    }

    /// Sets the zoom animation duration.
    #[must_use]
    pub fn with_scale_duration(mut self, duration: u64) -> Self {
        self.scale_duration = duration;
        self
    }

    /// Sets the prefetch margin.
    #[must_use]
    pub fn with_prefetch(mut self, prefetch: usize) -> Self {
        self.prefetch = prefetch;
        self
    }

    /// Sets the touch slop.
    #[must_use]
    pub fn with_touch_slop(mut self, touch_slop: f64) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    /// Sets the double-tap zoom scale.
    #[must_use]
    pub fn with_double_tap_scale(mut self, scale: f64) -> Self {
        self.double_tap_scale = scale;
        self
    }

    /// Sets the overscroll margin.
    #[must_use]
    pub fn with_overscroll_margin(mut self, margin: f64) -> Self {
        self.overscroll_margin = margin;
        self
    }

    /// Sets the fling deceleration.
    #[must_use]
    pub fn with_fling_deceleration(mut self, deceleration: f64) -> Self {
        self.fling_deceleration = deceleration;
        self
    }

    /// Bounds the slot layout cache.
    #[must_use]
    pub fn with_cache_limit(mut self, limit: Option<usize>) -> Self {
        self.cache_limit = limit;
        self
    }

    /// Settle thresholds and timings.
    #[must_use]
    pub fn populate_config(&self) -> PopulateConfig {
        PopulateConfig {
            touch_slop: self.touch_slop,
            page_turn_duration: self.page_turn_duration,
            reverse_duration: self.reverse_duration,
        }
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_scale = |s: f64| s.is_finite() && s > 0.0;
        if !valid_scale(self.min_scale)
            || !valid_scale(self.max_scale)
            || self.min_scale > self.max_scale
        {
            return Err(ConfigError::ScaleLimits {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if !(self.min_scale..=self.max_scale).contains(&self.double_tap_scale) {
            return Err(ConfigError::DoubleTapScale(self.double_tap_scale));
        }
        if !self.touch_slop.is_finite() || self.touch_slop < 0.0 {
            return Err(ConfigError::TouchSlop(self.touch_slop));
        }
        if !self.overscroll_margin.is_finite() || self.overscroll_margin < 0.0 {
            return Err(ConfigError::OverscrollMargin(self.overscroll_margin));
        }
        if !valid_scale(self.fling_deceleration) {
            return Err(ConfigError::FlingDeceleration(self.fling_deceleration));
        }
        Ok(())
    }
}

/// A [`ReaderConfig`] value that cannot be used.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// Scale limits are not positive and finite, or `min > max`.
    ScaleLimits {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// The double-tap scale lies outside the scale limits.
    DoubleTapScale(f64),
    /// The touch slop is negative or not finite.
    TouchSlop(f64),
    /// The overscroll margin is negative or not finite.
    OverscrollMargin(f64),
    /// The fling deceleration is not positive and finite.
    FlingDeceleration(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScaleLimits { min, max } => {
                write!(f, "invalid scale limits [{min}, {max}]")
            }
            Self::DoubleTapScale(scale) => {
                write!(f, "double-tap scale {scale} lies outside the scale limits")
            }
            Self::TouchSlop(slop) => write!(f, "invalid touch slop {slop}"),
            Self::OverscrollMargin(margin) => write!(f, "invalid overscroll margin {margin}"),
            Self::FlingDeceleration(d) => write!(f, "invalid fling deceleration {d}"),
        }
    }
}

impl core::error::Error for ConfigError {}
