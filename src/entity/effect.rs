//! Short-lived visual effects: blood decals and explosions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use glam::Vec3;
use log::trace;

use super::{Body, Entity, LifeState, ScriptTrigger};
use crate::category::Team;
use crate::commands::Frame;
use crate::query::Querier;
use crate::render::SceneHandle;
use crate::shape::Shape;
use crate::time::FrameTime;
use crate::trace::Trace;

static NEXT_POOL: AtomicU64 = AtomicU64::new(1);

/// Identity of a fixed-size resource pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolId(u64);

impl PoolId {
    /// A pool identity no other pool shares.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_POOL.fetch_add(1, Ordering::Relaxed))
    }
}

/// One slot of a resource pool.
///
/// The world keeps at most one entity per slot: registering an entity whose
/// slot is already present replaces the present one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolSlot {
    /// Pool the slot belongs to.
    pub pool: PoolId,
    /// Index within the pool.
    pub slot: usize,
}

/// A fixed, non-colliding effect that expires after its lifetime.
#[derive(Debug, Clone)]
pub struct Effect {
    id: String,
    scene: Option<SceneHandle>,
    body: Body,
    lifetime: Duration,
    age: Duration,
    state: LifeState,
    pool_slot: Option<PoolSlot>,
}

impl Effect {
    /// Effect at the origin that expires after `lifetime`.
    #[must_use]
    pub fn new(id: impl Into<String>, scene: Option<SceneHandle>, lifetime: Duration) -> Self {
        Self {
            id: id.into(),
            scene,
            body: Body::fixed(Shape::point(Vec3::ZERO)),
            lifetime,
            age: Duration::ZERO,
            state: LifeState::Active,
            pool_slot: None,
        }
    }

    /// Claims `slot`, replacing whichever effect held it.
    #[must_use]
    pub const fn with_pool_slot(mut self, slot: PoolSlot) -> Self {
        self.pool_slot = Some(slot);
        self
    }

    /// A fresh copy of this effect placed at `position`.
    #[must_use]
    pub fn placed(&self, position: Vec3) -> Self {
        let mut effect = self.clone();
        effect.reset();
        effect.body.shape.set_position(position);
        effect
    }

    /// Total time the effect stays in the world.
    #[must_use]
    pub const fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Time the effect has existed so far.
    #[must_use]
    pub const fn age(&self) -> Duration {
        self.age
    }
}

impl Entity for Effect {
    fn id(&self) -> &str {
        &self.id
    }

    fn team(&self) -> Team {
        Team::NEUTRAL
    }

    fn set_team(&mut self, _team: Team) {}

    fn state(&self) -> LifeState {
        self.state
    }

    fn is_collidable(&self) -> bool {
        false
    }

    fn set_collidable(&mut self, _collidable: bool) {}

    fn life(&self) -> f32 {
        0.0
    }

    fn set_life(&mut self, _life: f32) {}

    fn damage(&self, _time: &FrameTime) -> f32 {
        0.0
    }

    fn set_damage(&mut self, _damage: f32) {}

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, frame: &mut Frame) {
        if self.state != LifeState::Active {
            return;
        }
        self.age += frame.time.delta();
        if self.age >= self.lifetime {
            self.set_dead(frame);
        }
    }

    fn touch_react(&mut self, _attacker: &Querier, _trace: &Trace, _frame: &mut Frame) -> bool {
        true
    }

    fn set_dead(&mut self, _frame: &mut Frame) {
        if self.state == LifeState::Dead {
            return;
        }
        trace!("effect `{}` expired", self.id);
        self.state = LifeState::Dead;
    }

    fn reset(&mut self) {
        self.state = LifeState::Active;
        self.age = Duration::ZERO;
    }

    fn scene(&self) -> Option<SceneHandle> {
        self.scene
    }

    fn store_script_trigger(&mut self, _trigger: Box<dyn ScriptTrigger>) {}

    fn pool_slot(&self) -> Option<PoolSlot> {
        self.pool_slot
    }

    fn duplicate(&self) -> Box<dyn Entity> {
        Box::new(self.placed(self.position()))
    }
}

/// Fixed-size round-robin pool of decals owned by one entity.
///
/// Each hit takes the next slot; the index wraps so a long fight never
/// allocates more than the pool size of live decals.
#[derive(Debug, Clone)]
pub struct DecalPool {
    id: PoolId,
    prototype: Option<Effect>,
    size: usize,
    next: usize,
}

impl DecalPool {
    /// Pool of `size` decals cloned from `prototype`. Without a prototype no decals are placed.
    #[must_use]
    pub fn new(prototype: Option<Effect>, size: usize) -> Self {
        Self {
            id: PoolId::fresh(),
            prototype,
            size,
            next: 0,
        }
    }

    /// The decal for the next slot, placed at `position`. Advances the index.
    pub fn next_at(&mut self, position: Vec3) -> Option<Effect> {
        let prototype = self.prototype.as_ref()?;
        if self.size == 0 {
            return None;
        }
        let slot = PoolSlot {
            pool: self.id,
            slot: self.next,
        };
        self.next = (self.next + 1) % self.size;
        Some(prototype.placed(position).with_pool_slot(slot))
    }

    /// Slot the next decal will take.
    #[must_use]
    pub const fn next_index(&self) -> usize {
        self.next
    }

    /// Number of slots.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Rewinds to the first slot.
    pub const fn reset(&mut self) {
        self.next = 0;
    }

    /// An equivalent pool with its own identity.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self::new(self.prototype.clone(), self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn blood() -> Effect {
        Effect::new("blood", Some(SceneHandle(3)), Duration::from_millis(500))
    }

    #[rstest]
    fn pool_index_wraps_round_robin(blood: Effect) {
        let mut pool = DecalPool::new(Some(blood), 3);
        let slots: Vec<usize> = (0..6)
            .filter_map(|_| pool.next_at(Vec3::ZERO))
            .filter_map(|decal| decal.pool_slot())
            .map(|slot| slot.slot)
            .collect();
        assert_eq!(slots, vec![0, 1, 2, 0, 1, 2]);
        pool.reset();
        assert_eq!(pool.next_index(), 0);
    }

    #[rstest]
    fn duplicated_pools_do_not_share_slots(blood: Effect) {
        let mut first = DecalPool::new(Some(blood), 2);
        let mut second = first.duplicate();
        let a = first.next_at(Vec3::ZERO).and_then(|d| d.pool_slot());
        let b = second.next_at(Vec3::ZERO).and_then(|d| d.pool_slot());
        assert_ne!(a, b);
    }

    #[rstest]
    fn empty_pool_yields_nothing(blood: Effect) {
        assert!(DecalPool::new(None, 3).next_at(Vec3::ZERO).is_none());
        assert!(DecalPool::new(Some(blood), 0).next_at(Vec3::ZERO).is_none());
    }

    #[rstest]
    fn effect_expires_after_lifetime(blood: Effect) {
        let mut decal = blood.placed(Vec3::ONE);
        let mut frame = Frame::new(FrameTime::new(0.3, 1.0 / 60.0));
        decal.update(&mut frame);
        assert!(decal.is_active());
        decal.update(&mut frame);
        assert!(decal.is_dead());
        assert!(!decal.is_collidable());
    }
}
