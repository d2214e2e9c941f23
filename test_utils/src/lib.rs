//! Shared fixtures for the simulation integration tests.

pub mod app;
pub mod dummy;
pub mod suite;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use glam::Vec3;
use snatcher::geometry::Triangle;
use snatcher::{
    Character, CharacterParams, CollisionNode, Effect, ScriptTrigger, Team, WorldCommands,
    WorldConfig,
};

pub use app::SharedApp;
pub use dummy::{Dummy, Touch};
pub use suite::run_serial;

/// Square floor of half-width `half` at height `y`, facing up.
///
/// # Examples
/// ```
/// use test_utils::floor;
/// let node = floor("floor", 100.0, 0.0);
/// assert_eq!(node.name(), "floor");
/// ```
pub fn floor(name: &str, half: f32, y: f32) -> CollisionNode {
    let a = Vec3::new(-half, y, half);
    let b = Vec3::new(half, y, half);
    let c = Vec3::new(half, y, -half);
    let d = Vec3::new(-half, y, -half);
    CollisionNode::new(name, vec![Triangle::new(a, b, c), Triangle::new(a, c, d)])
}

/// Vertical wall in the plane `z`, facing `+Z`, spanning `x` in
/// `[-half, half]` and `y` in `[0, height]`.
pub fn wall(name: &str, z: f32, half: f32, height: f32) -> CollisionNode {
    let a = Vec3::new(-half, 0.0, z);
    let b = Vec3::new(half, 0.0, z);
    let c = Vec3::new(half, height, z);
    let d = Vec3::new(-half, height, z);
    CollisionNode::new(name, vec![Triangle::new(a, b, c), Triangle::new(a, c, d)])
}

/// Character parameters with gravity disabled, so a character only moves
/// when told to.
pub fn weightless(id: &str, team: Team, position: Vec3) -> CharacterParams {
    let mut params = WorldConfig::default().character(id, team, position);
    params.gravity = Vec3::ZERO;
    params
}

/// A weightless character with the given life.
pub fn fighter(id: &str, team: Team, position: Vec3, life: f32) -> Character {
    let mut params = weightless(id, team, position);
    params.life = life;
    Character::new(&params)
}

/// Blood decal prototype with a long lifetime.
pub fn blood() -> Effect {
    Effect::new("blood", None, Duration::from_secs(60))
}

/// Script trigger counting how often it fired and was reset.
#[derive(Clone, Default)]
pub struct CountingTrigger {
    pub fired: Arc<AtomicUsize>,
    pub resets: Arc<AtomicUsize>,
}

impl CountingTrigger {
    pub fn fired(&self) -> usize {
        self.fired.load(Ordering::SeqCst)
    }

    pub fn resets(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }
}

impl ScriptTrigger for CountingTrigger {
    fn execute_scripts(&mut self, _commands: &mut WorldCommands) {
        self.fired.fetch_add(1, Ordering::SeqCst);
    }

    fn reset(&mut self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}
