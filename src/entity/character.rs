//! Walking, fighting characters and the behaviour contract that drives them.

use std::time::Duration;

use glam::Vec3;
use log::debug;

use super::{
    AnimationWindow, Body, DecalPool, Effect, Entity, ForwardMove, LifeState, MovementIntent,
    PoolId, PoolSlot, ScriptTrigger, SideMove, Vitality, Weapon,
};
use crate::category::{Category, Team};
use crate::commands::{Frame, WorldCommands};
use crate::config::CharacterParams;
use crate::motion::Motion;
use crate::mover::Mover;
use crate::numeric::millis_to_duration;
use crate::query::Querier;
use crate::render::{Pose, SceneHandle};
use crate::shape::Shape;
use crate::time::FrameTime;
use crate::trace::Trace;
use crate::vector_math::{clamp_pitch, point_along, wrap_yaw, yaw_rotation};

/// Decision logic steering a character, polled once per active tick.
pub trait Behaviour: Send + Sync {
    /// Steers the character through `pilot` for one tick.
    fn update(&mut self, pilot: &mut Pilot<'_>);
}

/// The controls a [`Behaviour`] may operate during its tick.
pub struct Pilot<'a> {
    character: &'a mut Character,
    frame: &'a mut Frame,
}

impl Pilot<'_> {
    /// Centre of the character's body.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.character.position()
    }

    /// Pitch, yaw, and roll in degrees.
    #[must_use]
    pub const fn angles(&self) -> Vec3 {
        self.character.angles
    }

    /// Team the character fights for.
    #[must_use]
    pub const fn team(&self) -> Team {
        self.character.team
    }

    /// Remaining life.
    #[must_use]
    pub const fn life(&self) -> f32 {
        self.character.vitality.life()
    }

    /// Timing of the current tick.
    #[must_use]
    pub const fn time(&self) -> &FrameTime {
        &self.frame.time
    }

    /// Sets the forward walking intent.
    pub fn set_forward_move(&mut self, forward: ForwardMove) {
        self.character.set_forward_move(forward);
    }

    /// Sets the strafing intent.
    pub fn set_side_move(&mut self, side: SideMove) {
        self.character.set_side_move(side);
    }

    /// Turns by the given pitch and yaw deltas in degrees.
    pub fn increase_angles(&mut self, pitch: f32, yaw: f32) {
        self.character.increase_angles(pitch, yaw);
    }

    /// Fires the linked weapon, if any and ready.
    pub fn shoot(&mut self) -> bool {
        self.character.shoot(&mut self.frame.commands)
    }
}

/// A character: walks under gravity, bleeds when hit, and goes through the
/// ACTIVE → DYING → DEAD life cycle.
pub struct Character {
    id: String,
    team: Team,
    vitality: Vitality,
    damage: f32,
    state: LifeState,
    collidable: bool,
    body: Body,
    active_mover: Mover,
    angles: Vec3,
    intent: MovementIntent,
    animation: AnimationWindow,
    dying_period: Duration,
    dying_elapsed: Duration,
    decals: DecalPool,
    explosion: Option<Effect>,
    behaviour: Option<Box<dyn Behaviour>>,
    weapon: Option<Weapon>,
    script: Option<Box<dyn ScriptTrigger>>,
    scene: Option<SceneHandle>,
}

impl Character {
    /// Builds an active, collidable character standing at `params.position`.
    #[must_use]
    pub fn new(params: &CharacterParams) -> Self {
        let active_mover = Mover::gravity(Vec3::NEG_Z, params.speed, params.gravity);
        Self {
            id: params.id.clone(),
            team: params.team,
            vitality: Vitality::full(params.life),
            damage: params.damage,
            state: LifeState::Active,
            collidable: true,
            body: Body::new(
                Shape::sphere(params.position, params.radius),
                active_mover,
                Motion::Slide,
            ),
            active_mover,
            angles: Vec3::new(clamp_pitch(params.angles.x), wrap_yaw(params.angles.y), 0.0),
            intent: MovementIntent::default(),
            animation: AnimationWindow::new(params.frame_count, params.animation_speed),
            dying_period: millis_to_duration(params.dying_period_ms),
            dying_elapsed: Duration::ZERO,
            decals: DecalPool::new(None, params.decal_pool_size),
            explosion: None,
            behaviour: None,
            weapon: None,
            script: None,
            scene: None,
        }
    }

    /// Visual handed to the renderer.
    #[must_use]
    pub const fn with_scene(mut self, scene: SceneHandle) -> Self {
        self.scene = Some(scene);
        self
    }

    /// Blood decal prototype placed on every damaging hit.
    #[must_use]
    pub fn with_decal(mut self, decal: Effect) -> Self {
        self.decals = DecalPool::new(Some(decal), self.decals.size());
        self
    }

    /// Explosion spawned on death.
    #[must_use]
    pub fn with_explosion(mut self, explosion: Effect) -> Self {
        self.explosion = Some(single_slot(explosion));
        self
    }

    /// Replaces the default collision sphere.
    #[must_use]
    pub const fn with_shape(mut self, shape: Shape) -> Self {
        self.body.shape = shape;
        self
    }

    /// Replaces the default sliding motion.
    #[must_use]
    pub const fn with_motion(mut self, motion: Motion) -> Self {
        self.body.motion = motion;
        self
    }

    /// Builder form of [`Character::link_behaviour`].
    #[must_use]
    pub fn with_behaviour(mut self, behaviour: Box<dyn Behaviour>) -> Self {
        self.link_behaviour(behaviour);
        self
    }

    /// Builder form of [`Character::link_weapon`].
    #[must_use]
    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.link_weapon(weapon);
        self
    }

    /// Attaches the decision logic polled while active.
    pub fn link_behaviour(&mut self, behaviour: Box<dyn Behaviour>) {
        self.behaviour = Some(behaviour);
    }

    /// Whether a behaviour is linked.
    #[must_use]
    pub const fn has_behaviour(&self) -> bool {
        self.behaviour.is_some()
    }

    /// Attaches the weapon fired by [`Pilot::shoot`].
    pub fn link_weapon(&mut self, weapon: Weapon) {
        self.weapon = Some(weapon);
    }

    /// The linked weapon, if any.
    #[must_use]
    pub const fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    /// Ignored unless the character is active.
    pub fn set_forward_move(&mut self, forward: ForwardMove) {
        if self.state == LifeState::Active {
            self.intent.forward = forward;
        }
    }

    /// Ignored unless the character is active.
    pub fn set_side_move(&mut self, side: SideMove) {
        if self.state == LifeState::Active {
            self.intent.side = side;
        }
    }

    /// Current walking intent.
    #[must_use]
    pub const fn intent(&self) -> MovementIntent {
        self.intent
    }

    /// Turns by the given pitch and yaw deltas in degrees. Pitch is clamped
    /// and yaw wrapped. Ignored unless the character is active.
    pub fn increase_angles(&mut self, pitch: f32, yaw: f32) {
        if self.state != LifeState::Active {
            return;
        }
        self.angles.x = clamp_pitch(self.angles.x + pitch);
        self.angles.y = wrap_yaw(self.angles.y + yaw);
    }

    /// Pitch, yaw, and roll in degrees.
    #[must_use]
    pub const fn angles(&self) -> Vec3 {
        self.angles
    }

    /// Walking speed in units per second.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.active_mover.speed()
    }

    /// Changes the walking speed.
    pub const fn set_speed(&mut self, speed: f32) {
        self.active_mover.set_speed(speed);
        self.body.mover.set_speed(speed);
    }

    /// Restricts the animation to `[min, max]`; see [`AnimationWindow::set_frames`].
    pub fn set_animation_frames(&mut self, min: i64, max: i64) {
        self.animation.set_frames(min, max);
    }

    /// Current animation window.
    #[must_use]
    pub const fn animation(&self) -> &AnimationWindow {
        &self.animation
    }

    /// Time spent in the DYING state so far.
    #[must_use]
    pub const fn dying_elapsed(&self) -> Duration {
        self.dying_elapsed
    }

    /// Slot the next blood decal will take.
    #[must_use]
    pub const fn decal_index(&self) -> usize {
        self.decals.next_index()
    }

    /// Fires the linked weapon along the current aim. Inactive characters
    /// never shoot.
    pub fn shoot(&mut self, commands: &mut WorldCommands) -> bool {
        if self.state != LifeState::Active {
            return false;
        }
        let origin = self.position();
        match self.weapon.as_mut() {
            Some(weapon) => weapon.fire(origin, self.angles, self.team, commands),
            None => false,
        }
    }

    fn poll_behaviour(&mut self, frame: &mut Frame) {
        // Characters without a behaviour are piloted from outside the tick.
        let Some(mut behaviour) = self.behaviour.take() else {
            return;
        };
        behaviour.update(&mut Pilot {
            character: self,
            frame: &mut *frame,
        });
        if self.state == LifeState::Active && self.behaviour.is_none() {
            self.behaviour = Some(behaviour);
        }
    }

    fn steer(&mut self, dt: f32) {
        let direction = yaw_rotation(self.angles.y) * self.intent.direction();
        self.body.mover.set_direction(direction);
        self.body.mover.update(dt);
    }
}

fn single_slot(effect: Effect) -> Effect {
    effect.with_pool_slot(PoolSlot {
        pool: PoolId::fresh(),
        slot: 0,
    })
}

impl Entity for Character {
    fn id(&self) -> &str {
        &self.id
    }

    fn team(&self) -> Team {
        self.team
    }

    fn set_team(&mut self, team: Team) {
        self.team = team;
    }

    fn state(&self) -> LifeState {
        self.state
    }

    fn is_collidable(&self) -> bool {
        self.collidable
    }

    fn set_collidable(&mut self, collidable: bool) {
        self.collidable = collidable;
    }

    fn life(&self) -> f32 {
        self.vitality.life()
    }

    fn set_life(&mut self, life: f32) {
        self.vitality.set(life);
    }

    fn damage(&self, time: &FrameTime) -> f32 {
        self.damage * time.timer()
    }

    fn set_damage(&mut self, damage: f32) {
        self.damage = damage;
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn orientation(&self) -> Vec3 {
        self.angles
    }

    fn update(&mut self, frame: &mut Frame) {
        match self.state {
            LifeState::Active => {
                if let Some(weapon) = self.weapon.as_mut() {
                    weapon.tick(frame.time.delta());
                }
                self.poll_behaviour(frame);
                if self.state == LifeState::Active {
                    self.steer(frame.time.delta_seconds());
                }
            }
            LifeState::Dying => {
                self.dying_elapsed += frame.time.delta();
                if self.dying_elapsed >= self.dying_period {
                    self.set_dead(frame);
                }
            }
            LifeState::Dead => {}
        }
    }

    fn synchronize(&mut self, time: &FrameTime) {
        self.animation.advance(time.delta_seconds());
    }

    fn touch_react(&mut self, attacker: &Querier, trace: &Trace, frame: &mut Frame) -> bool {
        if self.state != LifeState::Active || attacker.damage <= 0.0 || !trace.is_impact() {
            return true;
        }
        self.vitality.hurt(attacker.damage);
        let wound = point_along(trace.start, trace.segment, trace.fraction_impact);
        if let Some(decal) = self.decals.next_at(wound) {
            frame.commands.spawn(Category::Object, Box::new(decal));
        }
        debug!(
            "character `{}` hit for {:.2}, life {:.2}",
            self.id,
            attacker.damage,
            self.vitality.life()
        );
        if self.vitality.is_depleted() {
            self.set_dying(frame);
        }
        true
    }

    fn set_dying(&mut self, _frame: &mut Frame) {
        if self.state != LifeState::Active {
            return;
        }
        self.intent = MovementIntent::default();
        self.collidable = false;
        self.animation.pin_last();
        self.dying_elapsed = Duration::ZERO;
        self.body.mover = Mover::None;
        self.behaviour = None;
        self.state = LifeState::Dying;
        debug!("character `{}` is dying", self.id);
    }

    fn set_dead(&mut self, frame: &mut Frame) {
        if self.state == LifeState::Dead {
            return;
        }
        self.state = LifeState::Dead;
        self.collidable = false;
        self.body.mover = Mover::None;
        self.behaviour = None;
        if let Some(explosion) = &self.explosion {
            frame
                .commands
                .spawn(Category::Object, Box::new(explosion.placed(self.position())));
        }
        if let Some(script) = self.script.as_mut() {
            script.execute_scripts(&mut frame.commands);
        }
        debug!("character `{}` is dead", self.id);
    }

    fn reset(&mut self) {
        self.state = LifeState::Active;
        self.vitality.restore();
        self.decals.reset();
        self.collidable = true;
        self.body.mover = self.active_mover;
        self.intent = MovementIntent::default();
        self.animation.play_all();
        self.dying_elapsed = Duration::ZERO;
        if let Some(script) = self.script.as_mut() {
            script.reset();
        }
    }

    fn scene(&self) -> Option<SceneHandle> {
        self.scene
    }

    fn pose(&self) -> Pose {
        Pose {
            position: self.position(),
            rotation: yaw_rotation(self.angles.y),
            animation_time: Some(self.animation.cursor()),
        }
    }

    fn store_script_trigger(&mut self, trigger: Box<dyn ScriptTrigger>) {
        self.script = Some(trigger);
    }

    fn duplicate(&self) -> Box<dyn Entity> {
        let mut animation = self.animation;
        animation.play_all();
        Box::new(Self {
            id: self.id.clone(),
            team: self.team,
            vitality: Vitality::full(self.vitality.cap()),
            damage: self.damage,
            state: LifeState::Active,
            collidable: true,
            body: Body::new(self.body.shape, self.active_mover, self.body.motion),
            active_mover: self.active_mover,
            angles: self.angles,
            intent: MovementIntent::default(),
            animation,
            dying_period: self.dying_period,
            dying_elapsed: Duration::ZERO,
            decals: self.decals.duplicate(),
            explosion: self.explosion.clone().map(single_slot),
            behaviour: None,
            weapon: self.weapon.as_ref().map(Weapon::duplicate),
            script: None,
            scene: self.scene,
        })
    }
}
