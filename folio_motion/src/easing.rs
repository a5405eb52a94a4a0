// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Interpolation curve applied to normalized time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Quadratic ease-out: fast start, decelerating into the destination.
    #[default]
    Decelerate,
}

impl Easing {
    /// Maps `t` in `[0, 1]` to an interpolation factor in `[0, 1]`.
    ///
    /// Inputs outside the unit interval are clamped.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Easing;

    #[test]
    fn endpoints_are_fixed() {
        for easing in [Easing::Linear, Easing::Decelerate] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
            assert_eq!(easing.apply(-1.0), 0.0);
        }
    }

    #[test]
    fn decelerate_leads_linear() {
        assert_eq!(Easing::Decelerate.apply(0.5), 0.75);
        assert!(Easing::Decelerate.apply(0.1) > Easing::Linear.apply(0.1));
    }
}
