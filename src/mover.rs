//! Velocity-integration policies.
//!
//! An entity swaps its mover wholesale when its life-cycle changes: active
//! characters fall and walk through a [`Mover::Gravity`], dying and dead ones
//! hold a [`Mover::None`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Constant-direction motion biased by gravity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravityMover {
    direction: Vec3,
    speed: f32,
    gravity: Vec3,
    fall: Vec3,
}

impl GravityMover {
    /// Mover heading along `direction` at `speed`, not yet falling.
    #[must_use]
    pub const fn new(direction: Vec3, speed: f32, gravity: Vec3) -> Self {
        Self {
            direction,
            speed,
            gravity,
            fall: Vec3::ZERO,
        }
    }

    /// Velocity without gravity accumulation.
    #[must_use]
    pub fn drive(&self) -> Vec3 {
        self.direction * self.speed
    }
}

/// Velocity-integration policy.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Mover {
    /// Walks or flies along a direction, accumulating gravity.
    Gravity(GravityMover),
    /// Never moves.
    #[default]
    None,
}

impl Mover {
    /// Gravity mover heading along `direction` at `speed`.
    #[must_use]
    pub const fn gravity(direction: Vec3, speed: f32, gravity: Vec3) -> Self {
        Self::Gravity(GravityMover::new(direction, speed, gravity))
    }

    /// Gravity-free mover: a bullet in straight flight.
    #[must_use]
    pub const fn constant(direction: Vec3, speed: f32) -> Self {
        Self::gravity(direction, speed, Vec3::ZERO)
    }

    /// Current velocity in units per second.
    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        match self {
            Self::Gravity(mover) => mover.drive() + mover.fall,
            Self::None => Vec3::ZERO,
        }
    }

    /// Displacement over `dt` seconds.
    #[must_use]
    pub fn displacement(&self, dt: f32) -> Vec3 {
        self.velocity() * dt
    }

    /// Direction the mover heads in (not normalised by the mover).
    #[must_use]
    pub const fn direction(&self) -> Vec3 {
        match self {
            Self::Gravity(mover) => mover.direction,
            Self::None => Vec3::ZERO,
        }
    }

    /// Re-aims the mover. No effect on [`Mover::None`].
    pub const fn set_direction(&mut self, direction: Vec3) {
        if let Self::Gravity(mover) = self {
            mover.direction = direction;
        }
    }

    /// Speed along the direction, zero for [`Mover::None`].
    #[must_use]
    pub const fn speed(&self) -> f32 {
        match self {
            Self::Gravity(mover) => mover.speed,
            Self::None => 0.0,
        }
    }

    /// Changes the speed. No effect on [`Mover::None`].
    pub const fn set_speed(&mut self, speed: f32) {
        if let Self::Gravity(mover) = self {
            mover.speed = speed;
        }
    }

    /// Unit vector opposing gravity, or zero when the mover has none.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        match self {
            Self::Gravity(mover) => -mover.gravity.normalize_or_zero(),
            Self::None => Vec3::ZERO,
        }
    }

    /// Integrates gravity for one tick.
    pub fn update(&mut self, dt: f32) {
        if let Self::Gravity(mover) = self {
            mover.fall += mover.gravity * dt;
        }
    }

    /// Cancels accumulated fall speed after touching the floor.
    pub const fn land(&mut self) {
        if let Self::Gravity(mover) = self {
            mover.fall = Vec3::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    fn gravity_accumulates_until_landing() {
        let mut mover = Mover::gravity(Vec3::ZERO, 0.0, Vec3::new(0.0, -10.0, 0.0));
        mover.update(0.5);
        mover.update(0.5);
        assert_relative_eq!(mover.velocity().y, -10.0);
        mover.land();
        assert_eq!(mover.velocity(), Vec3::ZERO);
        assert_eq!(mover.up(), Vec3::Y);
    }

    #[rstest]
    fn speed_scales_direction() {
        let mut mover = Mover::constant(Vec3::X, 2.0);
        mover.set_speed(5.0);
        assert_relative_eq!(mover.displacement(0.5).x, 2.5);
    }

    #[rstest]
    fn none_mover_ignores_everything() {
        let mut mover = Mover::None;
        mover.set_speed(10.0);
        mover.set_direction(Vec3::X);
        mover.update(1.0);
        assert_eq!(mover.velocity(), Vec3::ZERO);
        assert_relative_eq!(mover.speed(), 0.0);
    }
}
