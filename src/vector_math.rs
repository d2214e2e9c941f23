//! Basic vector math helper functions.
//! Small helpers for orientation handling and segment interpolation.
use glam::{Quat, Vec3};

use crate::{PITCH_LIMIT, YAW_LIMIT};

/// Returns the yaw-only rotation used both for movement and for the render
/// pose. Positive yaw turns clockwise when seen from above.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use snatcher::vector_math::yaw_rotation;
/// let turned = yaw_rotation(90.0) * Vec3::new(0.0, 0.0, -1.0);
/// assert!((turned.x - 1.0).abs() < 1e-5);
/// ```
#[must_use]
pub fn yaw_rotation(yaw_degrees: f32) -> Quat {
    Quat::from_rotation_y(-yaw_degrees.to_radians())
}

/// Returns the point reached after travelling `fraction` along a segment.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use snatcher::vector_math::point_along;
/// let p = point_along(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 0.25);
/// assert_eq!(p, Vec3::new(2.5, 0.0, 0.0));
/// ```
#[must_use]
pub fn point_along(start: Vec3, segment: Vec3, fraction: f32) -> Vec3 {
    start + segment * fraction
}

/// Clamps a pitch angle to the allowed vertical range.
#[must_use]
pub const fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

/// Wraps a yaw angle into `[-360, 360]` degrees.
///
/// Non-finite input is returned as zero so a corrupted angle cannot stall the
/// wrapping loop.
#[must_use]
pub const fn wrap_yaw(yaw: f32) -> f32 {
    if !yaw.is_finite() {
        return 0.0;
    }
    let mut wrapped = yaw % (YAW_LIMIT * 2.0);
    while wrapped > YAW_LIMIT {
        wrapped -= YAW_LIMIT;
    }
    while wrapped < -YAW_LIMIT {
        wrapped += YAW_LIMIT;
    }
    wrapped
}

/// Returns the unit direction for a pitch/yaw pair, forward being `-Z`.
#[must_use]
pub fn aim_direction(pitch_degrees: f32, yaw_degrees: f32) -> Vec3 {
    let pitched = Quat::from_rotation_x(pitch_degrees.to_radians()) * Vec3::NEG_Z;
    (yaw_rotation(yaw_degrees) * pitched).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::inside(45.0, 45.0)]
    #[case::above(120.0, 90.0)]
    #[case::below(-95.0, -90.0)]
    fn pitch_is_clamped(#[case] input: f32, #[case] expected: f32) {
        assert_relative_eq!(clamp_pitch(input), expected);
    }

    #[rstest]
    #[case::inside(270.0, 270.0)]
    #[case::just_over(370.0, 10.0)]
    #[case::just_under(-365.0, -5.0)]
    #[case::many_turns(1090.0, 10.0)]
    fn yaw_is_wrapped(#[case] input: f32, #[case] expected: f32) {
        assert_relative_eq!(wrap_yaw(input), expected, epsilon = 1e-3);
    }

    #[rstest]
    fn level_aim_follows_yaw() {
        let dir = aim_direction(0.0, 0.0);
        assert_relative_eq!(dir.z, -1.0, epsilon = 1e-6);
        let up = aim_direction(90.0, 0.0);
        assert_relative_eq!(up.y, 1.0, epsilon = 1e-6);
    }
}
