//! Entities: everything the world simulates and renders.
//!
//! All variants share the [`Entity`] capability set so the world can hold
//! four homogeneous collections of boxed trait objects. The character
//! variant carries the full ACTIVE → DYING → DEAD life cycle; the others use
//! a subset of it.

mod animation;
mod character;
mod effect;
mod intent;
mod projectile;
mod prop;
mod script;
mod script_box;
mod weapon;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::category::{SlotRef, Team};
use crate::commands::{Frame, WorldCommands};
use crate::motion::Motion;
use crate::mover::Mover;
use crate::query::{Querier, Tracer};
use crate::render::{Pose, SceneHandle};
use crate::shape::Shape;
use crate::time::FrameTime;
use crate::trace::Trace;
use crate::vector_math::yaw_rotation;

pub use animation::AnimationWindow;
pub use character::{Behaviour, Character, Pilot};
pub use effect::{DecalPool, Effect, PoolId, PoolSlot};
pub use intent::{ForwardMove, MovementIntent, SideMove};
pub use projectile::Projectile;
pub use prop::Prop;
pub use script::{Script, ScriptList};
pub use script_box::ScriptBox;
pub use weapon::Weapon;

/// Life-cycle state. Transitions only move forward; `reset` is the sole way
/// back to [`LifeState::Active`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LifeState {
    /// Simulated normally.
    #[default]
    Active,
    /// Playing out death; no longer collidable.
    Dying,
    /// Awaiting removal at the end of the tick.
    Dead,
}

/// Current life and its cap.
///
/// Every write is clamped to the cap. Life is never floored: a value at or
/// below zero is the death signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitality {
    life: f32,
    cap: f32,
}

impl Vitality {
    /// Full life at `cap`.
    #[must_use]
    pub const fn full(cap: f32) -> Self {
        Self { life: cap, cap }
    }

    /// Current life.
    #[must_use]
    pub const fn life(&self) -> f32 {
        self.life
    }

    /// Maximum life.
    #[must_use]
    pub const fn cap(&self) -> f32 {
        self.cap
    }

    /// Sets life, clamped to the cap.
    pub const fn set(&mut self, life: f32) {
        self.life = life.min(self.cap);
    }

    /// Subtracts `amount`, which may take life below zero.
    pub const fn hurt(&mut self, amount: f32) {
        self.set(self.life - amount);
    }

    /// Refills life to the cap.
    pub const fn restore(&mut self) {
        self.life = self.cap;
    }

    /// Whether life is at or below zero.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.life <= 0.0
    }
}

/// Spatial state shared by every variant: bounding shape, velocity policy,
/// and collision-response policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Collision volume and position.
    pub shape: Shape,
    /// Velocity policy.
    pub mover: Mover,
    /// Collision-response policy.
    pub motion: Motion,
}

impl Body {
    /// Combines a shape with its movement policies.
    #[must_use]
    pub const fn new(shape: Shape, mover: Mover, motion: Motion) -> Self {
        Self {
            shape,
            mover,
            motion,
        }
    }

    /// A body that never moves: decals, trigger volumes, static props.
    #[must_use]
    pub const fn fixed(shape: Shape) -> Self {
        Self::new(shape, Mover::None, Motion::Fixed)
    }

    /// Resolves this tick's displacement against the world.
    ///
    /// Returns whether a blocking collision occurred.
    pub fn process(&mut self, tracer: &mut dyn Tracer, querier: &Querier, dt: f32) -> bool {
        let Self {
            shape,
            mover,
            motion,
        } = self;
        motion.process(shape, mover, tracer, querier, dt)
    }
}

/// Scripts bound to an entity or a trigger volume.
pub trait ScriptTrigger: Send + Sync {
    /// Runs the bound scripts, queueing their world effects.
    fn execute_scripts(&mut self, commands: &mut WorldCommands);
    /// Re-arms the scripts for a respawned owner.
    fn reset(&mut self);
}

/// Capability set of every simulated entity.
pub trait Entity: Send + Sync {
    /// Name, unique within its collection by convention only.
    fn id(&self) -> &str;

    /// Allegiance used for damage filtering.
    fn team(&self) -> Team;
    /// Changes allegiance.
    fn set_team(&mut self, team: Team);

    /// Current life-cycle state.
    fn state(&self) -> LifeState;

    /// Whether the state is [`LifeState::Active`].
    fn is_active(&self) -> bool {
        self.state() == LifeState::Active
    }

    /// Whether the state is [`LifeState::Dying`].
    fn is_dying(&self) -> bool {
        self.state() == LifeState::Dying
    }

    /// Whether the state is [`LifeState::Dead`].
    fn is_dead(&self) -> bool {
        self.state() == LifeState::Dead
    }

    /// Whether traces can hit this entity.
    fn is_collidable(&self) -> bool;
    /// Includes or excludes the entity from traces.
    fn set_collidable(&mut self, collidable: bool);

    /// Current life.
    fn life(&self) -> f32;
    /// Sets life, clamped to the entity's cap.
    fn set_life(&mut self, life: f32);

    /// Contact damage for this frame, weighted by the frame's timer.
    fn damage(&self, time: &FrameTime) -> f32;
    /// Sets the contact damage per nominal frame.
    fn set_damage(&mut self, damage: f32);

    /// Spatial state.
    fn body(&self) -> &Body;
    /// Mutable spatial state.
    fn body_mut(&mut self) -> &mut Body;

    /// Centre of the body.
    fn position(&self) -> Vec3 {
        self.body().shape.position()
    }

    /// Pitch, yaw, and roll in degrees.
    fn orientation(&self) -> Vec3 {
        Vec3::ZERO
    }

    /// Per-tick internal update: behaviour polling, timers, velocity.
    fn update(&mut self, frame: &mut Frame);

    /// Brings renderable state (animation cursor) in line with the tick.
    fn synchronize(&mut self, _time: &FrameTime) {}

    /// Reaction to being the resolved target of a trace. Always reports the
    /// touch as handled.
    fn touch_react(&mut self, attacker: &Querier, trace: &Trace, frame: &mut Frame) -> bool;

    /// Enters DYING. Variants without a dying phase go straight to DEAD.
    fn set_dying(&mut self, frame: &mut Frame) {
        self.set_dead(frame);
    }

    /// Enters DEAD, firing death side effects once.
    fn set_dead(&mut self, frame: &mut Frame);

    /// Returns the entity to ACTIVE for pooling or respawn.
    fn reset(&mut self);

    /// Visual handed to the renderer, if any.
    fn scene(&self) -> Option<SceneHandle>;

    /// Placement handed to the renderer.
    fn pose(&self) -> Pose {
        Pose {
            position: self.position(),
            rotation: yaw_rotation(self.orientation().y),
            animation_time: None,
        }
    }

    /// Binds a script trigger executed on death.
    fn store_script_trigger(&mut self, trigger: Box<dyn ScriptTrigger>);

    /// Pool slot identity for reused resources such as decals.
    fn pool_slot(&self) -> Option<PoolSlot> {
        None
    }

    /// A fresh, independently owned copy for pooling.
    fn duplicate(&self) -> Box<dyn Entity>;

    /// Query identity of this entity sitting in `slot`.
    fn querier(&self, slot: SlotRef, time: &FrameTime) -> Querier {
        Querier {
            category: slot.category,
            team: self.team(),
            damage: self.damage(time),
            active: self.is_active(),
            collidable: self.is_collidable(),
            origin: Some(slot),
        }
    }
}
