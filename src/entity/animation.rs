//! Keyframe windowing handed to the animation collaborator.

use crate::numeric::{clamp_frame, frame_to_f32};

/// Looping window over a keyframe animation.
///
/// The cursor advances by `elapsed × speed` and wraps inside
/// `[min, max)`. A window of zero length holds the cursor on its frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationWindow {
    frame_count: usize,
    min: usize,
    max: usize,
    cursor: f32,
    speed: f32,
}

impl AnimationWindow {
    /// Window over all `frame_count` keyframes, advancing `speed` frames per second.
    #[must_use]
    pub fn new(frame_count: usize, speed: f32) -> Self {
        let mut window = Self {
            frame_count: frame_count.max(1),
            min: 0,
            max: 0,
            cursor: 0.0,
            speed,
        };
        window.play_all();
        window
    }

    /// Restricts playback to `[min, max]`, clamped into the animation.
    ///
    /// Requests with `max < min` are ignored and the previous window stays.
    pub fn set_frames(&mut self, min: i64, max: i64) {
        if max < min {
            return;
        }
        self.min = clamp_frame(min, self.frame_count);
        self.max = clamp_frame(max, self.frame_count);
        self.cursor = frame_to_f32(self.min);
    }

    /// Widens playback back to the whole animation.
    pub fn play_all(&mut self) {
        self.set_frames(0, i64::MAX);
    }

    /// Pins playback to the final keyframe.
    pub fn pin_last(&mut self) {
        self.set_frames(i64::MAX, i64::MAX);
    }

    /// Moves the cursor forward by `dt` seconds, wrapping inside the window.
    pub fn advance(&mut self, dt: f32) {
        let length = self.max.saturating_sub(self.min);
        if length == 0 {
            return;
        }
        let (min, max, span) = (
            frame_to_f32(self.min),
            frame_to_f32(self.max),
            frame_to_f32(length),
        );
        self.cursor += dt * self.speed;
        if !self.cursor.is_finite() || self.cursor < min {
            self.cursor = min;
        } else if self.cursor >= max {
            self.cursor = min + (self.cursor - min) % span;
        }
    }

    /// Current keyframe position.
    #[must_use]
    pub const fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Window bounds as `(min, max)`.
    #[must_use]
    pub const fn frames(&self) -> (usize, usize) {
        (self.min, self.max)
    }

    /// Total keyframes in the animation.
    #[must_use]
    pub const fn frame_count(&self) -> usize {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    fn inverted_window_is_rejected() {
        let mut window = AnimationWindow::new(10, 1.0);
        window.set_frames(2, 5);
        window.set_frames(6, 3);
        assert_eq!(window.frames(), (2, 5));
    }

    #[rstest]
    fn window_is_clamped_into_animation() {
        let mut window = AnimationWindow::new(10, 1.0);
        window.set_frames(-4, 40);
        assert_eq!(window.frames(), (0, 9));
    }

    #[rstest]
    fn cursor_wraps_inside_window() {
        let mut window = AnimationWindow::new(10, 2.0);
        window.set_frames(2, 5);
        window.advance(1.0);
        assert_relative_eq!(window.cursor(), 4.0);
        window.advance(1.0);
        assert_relative_eq!(window.cursor(), 3.0);
    }

    #[rstest]
    fn pinned_window_holds_last_frame() {
        let mut window = AnimationWindow::new(8, 3.0);
        window.pin_last();
        window.advance(10.0);
        assert_eq!(window.frames(), (7, 7));
        assert_relative_eq!(window.cursor(), 7.0);
    }
}
