//! Per-property tween descriptor.
//!
//! An [`AnimationState`] describes one property moving from a start value to
//! an end value over `duration` milliseconds beginning at `start_time`. It
//! holds no clock: callers ask for the value at any instant with
//! [`AnimationState::interpolate`].

use serde::{Deserialize, Serialize};

use crate::easing::{EasingCurve, EasingFunction, EasingMode, ease};
use crate::interpolate::Interpolator;

/// Time in milliseconds on the caller's clock.
pub type Millis = f64;

/// A single property's tween.
///
/// The fields are only replaced together through [`AnimationState::apply`];
/// there is no way to edit one half of a running tween.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationState<T> {
    start_value: T,
    end_value: T,
    duration: Millis,
    start_time: Millis,
    easing_function: EasingFunction,
    easing_mode: EasingMode,
}

impl<T: Clone> AnimationState<T> {
    pub fn new(
        start_value: T,
        end_value: T,
        start_time: Millis,
        duration: Millis,
        curve: EasingCurve,
    ) -> Self {
        Self {
            start_value,
            end_value,
            duration,
            start_time,
            easing_function: curve.function,
            easing_mode: curve.mode,
        }
    }

    /// Replace the whole tween at once.
    pub fn apply(
        &mut self,
        start_value: T,
        end_value: T,
        start_time: Millis,
        duration: Millis,
        curve: EasingCurve,
    ) {
        *self = Self::new(start_value, end_value, start_time, duration, curve);
    }

    pub fn start_value(&self) -> &T {
        &self.start_value
    }

    pub fn end_value(&self) -> &T {
        &self.end_value
    }

    pub fn duration(&self) -> Millis {
        self.duration
    }

    pub fn start_time(&self) -> Millis {
        self.start_time
    }

    pub fn easing_function(&self) -> EasingFunction {
        self.easing_function
    }

    pub fn easing_mode(&self) -> EasingMode {
        self.easing_mode
    }

    pub fn curve(&self) -> EasingCurve {
        EasingCurve::new(self.easing_function, self.easing_mode)
    }

    /// Normalized progress at `now`, clamped to `[0, 1]`.
    ///
    /// A zero or negative duration counts as already finished.
    pub fn progress(&self, now: Millis) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let t = (now - self.start_time) / self.duration;
        if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
    }

    /// True once the tween has reached its end value.
    pub fn is_settled(&self, now: Millis) -> bool {
        self.progress(now) >= 1.0
    }

    /// Value of the property at `now`.
    ///
    /// Before `start_time` this is the start value; from
    /// `start_time + duration` on it is exactly the end value.
    pub fn interpolate<I: Interpolator<T> + ?Sized>(&self, now: Millis, interpolator: &I) -> T {
        let t = self.progress(now);
        if t <= 0.0 {
            return self.start_value.clone();
        }
        if t >= 1.0 {
            return self.end_value.clone();
        }
        let eased = ease(self.easing_function, self.easing_mode, t);
        interpolator.lerp(&self.start_value, &self.end_value, eased)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolate::{ColorInterpolator, NumberInterpolator};

    fn linear() -> EasingCurve {
        EasingCurve::new(EasingFunction::Linear, EasingMode::InOut)
    }

    #[test]
    fn test_linear_progression() {
        let state = AnimationState::new(0.0, 100.0, 1_000.0, 1_000.0, linear());
        assert_eq!(state.interpolate(1_000.0, &NumberInterpolator), 0.0);
        assert_eq!(state.interpolate(1_500.0, &NumberInterpolator), 50.0);
        assert_eq!(state.interpolate(2_000.0, &NumberInterpolator), 100.0);
    }

    #[test]
    fn test_clamped_before_start_and_after_end() {
        let state = AnimationState::new(10.0, 20.0, 500.0, 100.0, linear());
        assert_eq!(state.interpolate(0.0, &NumberInterpolator), 10.0);
        assert_eq!(state.interpolate(10_000.0, &NumberInterpolator), 20.0);
    }

    #[test]
    fn test_endpoint_law_for_every_curve() {
        for function in EasingFunction::ALL {
            for mode in EasingMode::ALL {
                let curve = EasingCurve::new(function, mode);
                let state = AnimationState::new(-3.5, 42.25, 200.0, 750.0, curve);
                assert_eq!(state.interpolate(200.0, &NumberInterpolator), -3.5);
                assert_eq!(state.interpolate(950.0, &NumberInterpolator), 42.25);

                let color = AnimationState::new(
                    "red".to_string(),
                    "navy".to_string(),
                    200.0,
                    750.0,
                    curve,
                );
                assert_eq!(color.interpolate(200.0, &ColorInterpolator), "red");
                assert_eq!(color.interpolate(950.0, &ColorInterpolator), "navy");
            }
        }
    }

    #[test]
    fn test_settlement_is_idempotent() {
        let curve = EasingCurve::new(EasingFunction::Elastic, EasingMode::Out);
        let state = AnimationState::new(0.0, 1.0, 0.0, 300.0, curve);
        let at_end = state.interpolate(300.0, &NumberInterpolator);
        for now in [300.0, 301.0, 1_000.0, 1e9] {
            assert_eq!(state.interpolate(now, &NumberInterpolator), at_end);
            assert!(state.is_settled(now));
        }
        assert!(!state.is_settled(299.0));
    }

    #[test]
    fn test_zero_duration_is_settled() {
        let state = AnimationState::new(0.0, 5.0, 100.0, 0.0, linear());
        assert_eq!(state.interpolate(0.0, &NumberInterpolator), 5.0);
        assert_eq!(state.interpolate(100.0, &NumberInterpolator), 5.0);

        let negative = AnimationState::new(0.0, 5.0, 100.0, -10.0, linear());
        assert_eq!(negative.interpolate(50.0, &NumberInterpolator), 5.0);
        assert!(negative.is_settled(0.0));
    }

    #[test]
    fn test_apply_replaces_everything() {
        let mut state = AnimationState::new(0.0, 1.0, 0.0, 100.0, linear());
        let curve = EasingCurve::new(EasingFunction::Quadratic, EasingMode::In);
        state.apply(5.0, 15.0, 50.0, 200.0, curve);

        assert_eq!(*state.start_value(), 5.0);
        assert_eq!(*state.end_value(), 15.0);
        assert_eq!(state.start_time(), 50.0);
        assert_eq!(state.duration(), 200.0);
        assert_eq!(state.curve(), curve);
        // Halfway through a quadratic-in tween covers a quarter of the range.
        assert_eq!(state.interpolate(150.0, &NumberInterpolator), 7.5);
    }

    #[test]
    fn test_eased_value_between_endpoints() {
        let curve = EasingCurve::new(EasingFunction::Cubic, EasingMode::Out);
        let state = AnimationState::new(0.0, 100.0, 0.0, 100.0, curve);
        let v = state.interpolate(50.0, &NumberInterpolator);
        assert!(v > 50.0 && v < 100.0);
    }
}
