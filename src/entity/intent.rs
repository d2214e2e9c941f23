//! Discrete walking intent and its local-space direction.

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Forward walking intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ForwardMove {
    /// Walk towards `-Z`.
    Forward,
    /// Hold position.
    #[default]
    Stop,
    /// Back away towards `+Z`.
    Back,
}

/// Strafing intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SideMove {
    /// Step towards `-X`.
    Left,
    /// No sideways motion.
    #[default]
    Stop,
    /// Step towards `+X`.
    Right,
}

/// Forward and strafe intent of a walking entity.
///
/// Local space looks down `-Z` with `+X` to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MovementIntent {
    /// Forward component.
    pub forward: ForwardMove,
    /// Strafe component.
    pub side: SideMove,
}

impl MovementIntent {
    /// Combines a forward and a strafe intent.
    #[must_use]
    pub const fn new(forward: ForwardMove, side: SideMove) -> Self {
        Self { forward, side }
    }

    /// Unit local direction for the intent, or zero when standing still.
    ///
    /// Diagonals keep unit length.
    #[must_use]
    pub const fn direction(&self) -> Vec3 {
        let z = match self.forward {
            ForwardMove::Forward => -1.0,
            ForwardMove::Stop => 0.0,
            ForwardMove::Back => 1.0,
        };
        let x = match self.side {
            SideMove::Left => -1.0,
            SideMove::Stop => 0.0,
            SideMove::Right => 1.0,
        };
        if x != 0.0 && z != 0.0 {
            Vec3::new(x * FRAC_1_SQRT_2, 0.0, z * FRAC_1_SQRT_2)
        } else {
            Vec3::new(x, 0.0, z)
        }
    }

    /// Whether the intent stands still.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.forward == ForwardMove::Stop && self.side == SideMove::Stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::forward(ForwardMove::Forward, SideMove::Stop, Vec3::NEG_Z)]
    #[case::back(ForwardMove::Back, SideMove::Stop, Vec3::Z)]
    #[case::right(ForwardMove::Stop, SideMove::Right, Vec3::X)]
    #[case::left(ForwardMove::Stop, SideMove::Left, Vec3::NEG_X)]
    #[case::forward_right(
        ForwardMove::Forward,
        SideMove::Right,
        Vec3::new(FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2)
    )]
    #[case::back_left(
        ForwardMove::Back,
        SideMove::Left,
        Vec3::new(-FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2)
    )]
    fn intent_maps_to_local_direction(
        #[case] forward: ForwardMove,
        #[case] side: SideMove,
        #[case] expected: Vec3,
    ) {
        let direction = MovementIntent::new(forward, side).direction();
        assert_relative_eq!(direction.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(direction.z, expected.z, epsilon = 1e-6);
    }

    #[rstest]
    fn every_moving_intent_has_unit_length() {
        let forwards = [ForwardMove::Forward, ForwardMove::Stop, ForwardMove::Back];
        let sides = [SideMove::Left, SideMove::Stop, SideMove::Right];
        for forward in forwards {
            for side in sides {
                let intent = MovementIntent::new(forward, side);
                let length = intent.direction().length();
                if intent.is_idle() {
                    assert_relative_eq!(length, 0.0);
                } else {
                    assert_relative_eq!(length, 1.0, epsilon = 1e-6);
                }
            }
        }
    }
}
