//! Projectile launchers carried by characters.

use std::time::Duration;

use glam::Vec3;
use log::trace;

use super::Projectile;
use crate::category::{Category, Team};
use crate::commands::WorldCommands;
use crate::vector_math::{aim_direction, yaw_rotation};

/// Fires copies of a prototype projectile with a refire delay.
pub struct Weapon {
    projectile: Projectile,
    muzzle: Vec3,
    refire: Duration,
    cooldown: Duration,
}

impl Weapon {
    /// Launcher of `projectile` copies, at most one per `refire`.
    #[must_use]
    pub const fn new(projectile: Projectile, refire: Duration) -> Self {
        Self {
            projectile,
            muzzle: Vec3::ZERO,
            refire,
            cooldown: Duration::ZERO,
        }
    }

    /// Offset of the muzzle from the owner's position, in the owner's
    /// yaw-rotated frame.
    #[must_use]
    pub const fn with_muzzle(mut self, muzzle: Vec3) -> Self {
        self.muzzle = muzzle;
        self
    }

    /// Counts the refire cooldown down by `elapsed`.
    pub const fn tick(&mut self, elapsed: Duration) {
        self.cooldown = self.cooldown.saturating_sub(elapsed);
    }

    /// Whether the cooldown has run out.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.cooldown.is_zero()
    }

    /// Launches a shot for `team` from `origin` aimed by `angles`
    /// (pitch, yaw, roll in degrees).
    ///
    /// Returns whether a shot was queued.
    pub fn fire(
        &mut self,
        origin: Vec3,
        angles: Vec3,
        team: Team,
        commands: &mut WorldCommands,
    ) -> bool {
        if !self.is_ready() {
            return false;
        }
        let muzzle = origin + yaw_rotation(angles.y) * self.muzzle;
        let shot = self
            .projectile
            .launch(muzzle, aim_direction(angles.x, angles.y), team);
        commands.spawn(Category::Projectile, Box::new(shot));
        self.cooldown = self.refire;
        trace!("weapon fired for team {}", team.0);
        true
    }

    /// An equivalent, cooled-down weapon.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            projectile: self.projectile.launch(Vec3::ZERO, Vec3::NEG_Z, Team::NEUTRAL),
            muzzle: self.muzzle,
            refire: self.refire,
            cooldown: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::WorldCommand;
    use crate::entity::Entity;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn rifle() -> Weapon {
        let bolt = Projectile::new("bolt", 6.0, 50.0, 0.1, None);
        Weapon::new(bolt, Duration::from_millis(200)).with_muzzle(Vec3::new(0.0, 1.0, -1.0))
    }

    #[rstest]
    fn refire_delay_limits_shots() {
        let mut weapon = rifle();
        let mut commands = WorldCommands::default();
        assert!(weapon.fire(Vec3::ZERO, Vec3::ZERO, Team(1), &mut commands));
        assert!(!weapon.fire(Vec3::ZERO, Vec3::ZERO, Team(1), &mut commands));
        weapon.tick(Duration::from_millis(250));
        assert!(weapon.fire(Vec3::ZERO, Vec3::ZERO, Team(1), &mut commands));
        assert_eq!(commands.len(), 2);
    }

    #[rstest]
    fn shots_leave_the_turned_muzzle() {
        let mut weapon = rifle();
        let mut commands = WorldCommands::default();
        weapon.fire(Vec3::ZERO, Vec3::new(0.0, 90.0, 0.0), Team(3), &mut commands);
        let Some(WorldCommand::Spawn { category, entity }) = commands.drain().next() else {
            panic!("expected a spawned shot");
        };
        assert_eq!(category, Category::Projectile);
        assert_eq!(entity.team(), Team(3));
        assert_relative_eq!(entity.position().x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(entity.position().y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(entity.body().mover.direction().x, 1.0, epsilon = 1e-5);
    }
}
