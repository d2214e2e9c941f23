//! Per-frame timing passed explicitly through the tick.

use std::time::Duration;

use crate::numeric::seconds_to_duration;
use crate::{MAX_FRAME_SECONDS, NOMINAL_FRAME_SECONDS};

/// Elapsed time of the current frame.
///
/// `timer` is the time-weighting factor: the frame delta relative to the
/// nominal frame duration. Contact damage is multiplied by it so that a hazard
/// inflicts the same damage per second regardless of frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    delta_seconds: f32,
    timer: f32,
}

impl FrameTime {
    /// Builds a frame time, clamping `delta_seconds` into
    /// `[0, MAX_FRAME_SECONDS]`.
    ///
    /// # Examples
    /// ```
    /// use snatcher::FrameTime;
    /// let time = FrameTime::new(1.0 / 30.0, 1.0 / 60.0);
    /// assert!((time.timer() - 2.0).abs() < 1e-5);
    /// ```
    #[must_use]
    pub const fn new(delta_seconds: f32, nominal_seconds: f32) -> Self {
        Self::bounded(delta_seconds, nominal_seconds, MAX_FRAME_SECONDS)
    }

    /// Like [`FrameTime::new`] with an explicit upper bound on the delta.
    #[must_use]
    pub const fn bounded(delta_seconds: f32, nominal_seconds: f32, max_seconds: f32) -> Self {
        let delta = if delta_seconds.is_finite() {
            delta_seconds.clamp(0.0, max_seconds.max(0.0))
        } else {
            0.0
        };
        let timer = if nominal_seconds > 0.0 {
            delta / nominal_seconds
        } else {
            0.0
        };
        Self {
            delta_seconds: delta,
            timer,
        }
    }

    /// Frame delta in seconds.
    #[must_use]
    pub const fn delta_seconds(&self) -> f32 {
        self.delta_seconds
    }

    /// Frame delta as a [`Duration`], rounded to whole microseconds.
    #[must_use]
    pub fn delta(&self) -> Duration {
        seconds_to_duration(self.delta_seconds)
    }

    /// Time-weighting factor applied to contact damage.
    #[must_use]
    pub const fn timer(&self) -> f32 {
        self.timer
    }
}

impl Default for FrameTime {
    fn default() -> Self {
        Self::new(NOMINAL_FRAME_SECONDS, NOMINAL_FRAME_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    fn nominal_frame_has_unit_timer() {
        assert_relative_eq!(FrameTime::default().timer(), 1.0);
    }

    #[rstest]
    #[case::negative(-1.0, 0.0)]
    #[case::nan(f32::NAN, 0.0)]
    #[case::hitch(3.0, MAX_FRAME_SECONDS)]
    fn delta_is_bounded(#[case] input: f32, #[case] expected: f32) {
        let time = FrameTime::new(input, NOMINAL_FRAME_SECONDS);
        assert_relative_eq!(time.delta_seconds(), expected);
    }

    #[rstest]
    fn unbounded_hitches_convert_without_panicking() {
        let time = FrameTime::bounded(1.0e25, NOMINAL_FRAME_SECONDS, 1.0e30);
        assert!(time.delta() > Duration::from_secs(1_000_000));
    }
}
