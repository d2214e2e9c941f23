//! Numeric conversion helpers used across the project.
//!
//! Keyframe windows are expressed as integer indices but the animation
//! cursor runs in floating point. These helpers keep the casts in one place.

use std::time::Duration;

/// Convert a keyframe index into the floating-point cursor domain.
#[expect(
    clippy::cast_precision_loss,
    reason = "Keyframe counts are far below f32's exact integer range."
)]
#[must_use]
pub fn frame_to_f32(frame: usize) -> f32 {
    frame as f32
}

/// Clamp a signed keyframe request into `[0, frame_count - 1]`.
///
/// A zero `frame_count` is treated as a single-frame animation.
#[must_use]
pub fn clamp_frame(frame: i64, frame_count: usize) -> usize {
    let last = frame_count.saturating_sub(1);
    match usize::try_from(frame) {
        Ok(index) => index.min(last),
        Err(_) => 0,
    }
}

/// Longest span [`micros_to_duration`] produces: about 31 years, far beyond
/// any timer the simulation runs.
const MAX_WHOLE_MICROS: f64 = 1.0e15;

/// Convert a microsecond count into a [`Duration`], rounded to whole
/// microseconds.
///
/// Rounding makes frame deltas and configured periods that are equal in
/// decimal also equal as durations, so accumulated frame time reaches a
/// period on the exact frame it should. Negative or non-finite inputs
/// collapse to zero; huge inputs saturate.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The value is rounded, non-negative and bounded by MAX_WHOLE_MICROS."
)]
#[must_use]
pub fn micros_to_duration(micros: f64) -> Duration {
    if micros.is_finite() && micros > 0.0 {
        Duration::from_micros(micros.round().min(MAX_WHOLE_MICROS) as u64)
    } else {
        Duration::ZERO
    }
}

/// Convert seconds, such as a frame delta, into a [`Duration`].
///
/// Never panics; see [`micros_to_duration`] for rounding and clamping.
#[must_use]
pub fn seconds_to_duration(seconds: f32) -> Duration {
    micros_to_duration(f64::from(seconds) * 1.0e6)
}

/// Convert milliseconds supplied by configuration into a [`Duration`].
///
/// Negative or non-finite inputs collapse to zero.
#[must_use]
pub fn millis_to_duration(millis: f32) -> Duration {
    micros_to_duration(f64::from(millis) * 1.0e3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::negative(-3, 10, 0)]
    #[case::inside(4, 10, 4)]
    #[case::past_end(42, 10, 9)]
    #[case::empty_animation(3, 0, 0)]
    fn clamps_frames_into_range(#[case] frame: i64, #[case] count: usize, #[case] expected: usize) {
        assert_eq!(clamp_frame(frame, count), expected);
    }

    #[rstest]
    fn negative_millis_become_zero() {
        assert_eq!(millis_to_duration(-5.0), Duration::ZERO);
        assert_eq!(millis_to_duration(f32::NAN), Duration::ZERO);
        assert_eq!(millis_to_duration(250.0), Duration::from_millis(250));
    }

    #[rstest]
    #[case::quarter(0.025, 4, 100.0)]
    #[case::twentieth(0.05, 2, 100.0)]
    #[case::fiftieth(0.02, 5, 100.0)]
    #[case::tenth(0.1, 3, 300.0)]
    fn frames_sum_exactly_to_matching_periods(
        #[case] delta: f32,
        #[case] frames: u32,
        #[case] period_ms: f32,
    ) {
        let elapsed = seconds_to_duration(delta) * frames;
        assert_eq!(elapsed, millis_to_duration(period_ms));
    }

    #[rstest]
    fn out_of_range_seconds_never_panic() {
        assert!(seconds_to_duration(1.0e30) >= Duration::from_secs(1_000_000));
        assert_eq!(seconds_to_duration(f32::INFINITY), Duration::ZERO);
        assert_eq!(seconds_to_duration(-0.5), Duration::ZERO);
    }
}
