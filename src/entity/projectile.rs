//! Weapon shots.

use std::time::Duration;

use glam::Vec3;
use log::trace;

use super::{Body, Effect, Entity, LifeState, ScriptTrigger, Vitality};
use crate::category::{Category, Team};
use crate::commands::Frame;
use crate::motion::Motion;
use crate::mover::Mover;
use crate::query::Querier;
use crate::render::SceneHandle;
use crate::shape::Shape;
use crate::time::FrameTime;
use crate::trace::Trace;

/// A shot in flight.
///
/// Projectiles stop at their first impact and the world kills them on the
/// same tick. They have no dying phase.
pub struct Projectile {
    id: String,
    team: Team,
    damage: f32,
    vitality: Vitality,
    state: LifeState,
    collidable: bool,
    body: Body,
    scene: Option<SceneHandle>,
    time_to_live: Option<Duration>,
    age: Duration,
    impact: Option<Effect>,
    script: Option<Box<dyn ScriptTrigger>>,
}

impl Projectile {
    /// Unaimed prototype flying at `speed` along `-Z` from the origin.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        damage: f32,
        speed: f32,
        radius: f32,
        scene: Option<SceneHandle>,
    ) -> Self {
        Self {
            id: id.into(),
            team: Team::NEUTRAL,
            damage,
            vitality: Vitality::full(1.0),
            state: LifeState::Active,
            collidable: true,
            body: Body::new(
                Shape::sphere(Vec3::ZERO, radius),
                Mover::constant(Vec3::NEG_Z, speed),
                Motion::Stop,
            ),
            scene,
            time_to_live: None,
            age: Duration::ZERO,
            impact: None,
            script: None,
        }
    }

    /// Kills the shot once it has flown for `time_to_live`.
    #[must_use]
    pub const fn with_time_to_live(mut self, time_to_live: Duration) -> Self {
        self.time_to_live = Some(time_to_live);
        self
    }

    /// Effect spawned where the shot dies.
    #[must_use]
    pub fn with_impact_effect(mut self, effect: Effect) -> Self {
        self.impact = Some(effect);
        self
    }

    /// A fresh shot fired from `origin` along `direction` for `team`.
    #[must_use]
    pub fn launch(&self, origin: Vec3, direction: Vec3, team: Team) -> Self {
        let mut shot = self.fresh_copy();
        shot.team = team;
        shot.body.shape.set_position(origin);
        shot.body.mover.set_direction(direction.normalize_or_zero());
        shot
    }

    /// Time the shot has been in flight.
    #[must_use]
    pub const fn age(&self) -> Duration {
        self.age
    }

    fn fresh_copy(&self) -> Self {
        Self {
            id: self.id.clone(),
            team: self.team,
            damage: self.damage,
            vitality: Vitality::full(self.vitality.cap()),
            state: LifeState::Active,
            collidable: true,
            body: self.body,
            scene: self.scene,
            time_to_live: self.time_to_live,
            age: Duration::ZERO,
            impact: self.impact.clone(),
            script: None,
        }
    }
}

impl Entity for Projectile {
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
        let direction = self.body.mover.direction();
        Vec3::new(0.0, direction.x.atan2(-direction.z).to_degrees(), 0.0)
    }

    fn update(&mut self, frame: &mut Frame) {
        if self.state != LifeState::Active {
            return;
        }
        self.age += frame.time.delta();
        if self.time_to_live.is_some_and(|ttl| self.age >= ttl) {
            trace!("projectile `{}` expired", self.id);
            self.set_dead(frame);
            return;
        }
        self.body.mover.update(frame.time.delta_seconds());
    }

    fn touch_react(&mut self, _attacker: &Querier, _trace: &Trace, _frame: &mut Frame) -> bool {
        true
    }

    fn set_dead(&mut self, frame: &mut Frame) {
        if self.state == LifeState::Dead {
            return;
        }
        self.state = LifeState::Dead;
        self.collidable = false;
        if let Some(effect) = &self.impact {
            frame
                .commands
                .spawn(Category::Object, Box::new(effect.placed(self.position())));
        }
        if let Some(script) = self.script.as_mut() {
            script.execute_scripts(&mut frame.commands);
        }
    }

    fn reset(&mut self) {
        self.state = LifeState::Active;
        self.collidable = true;
        self.vitality.restore();
        self.age = Duration::ZERO;
        if let Some(script) = self.script.as_mut() {
            script.reset();
        }
    }

    fn scene(&self) -> Option<SceneHandle> {
        self.scene
    }

    fn store_script_trigger(&mut self, trigger: Box<dyn ScriptTrigger>) {
        self.script = Some(trigger);
    }

    fn duplicate(&self) -> Box<dyn Entity> {
        Box::new(self.fresh_copy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn bolt() -> Projectile {
        Projectile::new("bolt", 6.0, 100.0, 0.25, Some(SceneHandle(9)))
            .with_time_to_live(Duration::from_millis(100))
    }

    #[rstest]
    fn launch_aims_and_tags_team(bolt: Projectile) {
        let shot = bolt.launch(Vec3::ONE, Vec3::X * 4.0, Team(2));
        assert_eq!(shot.team(), Team(2));
        assert_eq!(shot.position(), Vec3::ONE);
        assert_relative_eq!(shot.body().mover.velocity().x, 100.0);
    }

    #[rstest]
    fn damage_is_time_weighted(bolt: Projectile) {
        let time = FrameTime::new(1.0 / 30.0, 1.0 / 60.0);
        assert_relative_eq!(bolt.damage(&time), 12.0, epsilon = 1e-4);
    }

    #[rstest]
    fn expires_after_time_to_live(bolt: Projectile) {
        let mut shot = bolt.launch(Vec3::ZERO, Vec3::NEG_Z, Team(1));
        let mut frame = Frame::new(FrameTime::new(0.06, 1.0 / 60.0));
        shot.update(&mut frame);
        assert!(shot.is_active());
        shot.update(&mut frame);
        assert!(shot.is_dead());
        assert!(!shot.is_collidable());
    }

    #[rstest]
    fn death_spawns_impact_effect(bolt: Projectile) {
        let spark = Effect::new("spark", None, Duration::from_millis(200));
        let mut shot = bolt.with_impact_effect(spark);
        let mut frame = Frame::default();
        shot.set_dead(&mut frame);
        shot.set_dead(&mut frame);
        assert_eq!(frame.commands.len(), 1);
    }
}
