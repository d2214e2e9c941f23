//! Destructible scenery objects: crates, barrels, breakable panels.

use glam::Vec3;
use log::debug;

use super::{Body, Effect, Entity, LifeState, ScriptTrigger, Vitality};
use crate::category::{Category, Team};
use crate::commands::Frame;
use crate::query::Querier;
use crate::render::SceneHandle;
use crate::shape::Shape;
use crate::time::FrameTime;
use crate::trace::Trace;

/// A collidable object that breaks when its life runs out.
pub struct Prop {
    id: String,
    team: Team,
    vitality: Vitality,
    damage: f32,
    state: LifeState,
    collidable: bool,
    body: Body,
    scene: Option<SceneHandle>,
    explosion: Option<Effect>,
    script: Option<Box<dyn ScriptTrigger>>,
}

impl Prop {
    /// Static, collidable prop with `life` points.
    #[must_use]
    pub fn new(id: impl Into<String>, shape: Shape, life: f32, scene: Option<SceneHandle>) -> Self {
        Self {
            id: id.into(),
            team: Team::NEUTRAL,
            vitality: Vitality::full(life),
            damage: 0.0,
            state: LifeState::Active,
            collidable: true,
            body: Body::fixed(shape),
            scene,
            explosion: None,
            script: None,
        }
    }

    /// Replaces the default fixed body.
    #[must_use]
    pub const fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Effect spawned where the prop dies.
    #[must_use]
    pub fn with_explosion(mut self, explosion: Effect) -> Self {
        self.explosion = Some(explosion);
        self
    }
}

impl Entity for Prop {
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

    fn update(&mut self, frame: &mut Frame) {
        if self.state == LifeState::Active {
            self.body.mover.update(frame.time.delta_seconds());
        }
    }

    fn touch_react(&mut self, attacker: &Querier, trace: &Trace, frame: &mut Frame) -> bool {
        if self.state != LifeState::Active || attacker.damage <= 0.0 || !trace.is_impact() {
            return true;
        }
        self.vitality.hurt(attacker.damage);
        if self.vitality.is_depleted() {
            self.set_dying(frame);
        }
        true
    }

    fn set_dead(&mut self, frame: &mut Frame) {
        if self.state == LifeState::Dead {
            return;
        }
        debug!("prop `{}` destroyed", self.id);
        self.state = LifeState::Dead;
        self.collidable = false;
        if let Some(explosion) = &self.explosion {
            let position: Vec3 = self.position();
            frame
                .commands
                .spawn(Category::Object, Box::new(explosion.placed(position)));
        }
        if let Some(script) = self.script.as_mut() {
            script.execute_scripts(&mut frame.commands);
        }
    }

    fn reset(&mut self) {
        self.state = LifeState::Active;
        self.collidable = true;
        self.vitality.restore();
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
        Box::new(Self {
            id: self.id.clone(),
            team: self.team,
            vitality: Vitality::full(self.vitality.cap()),
            damage: self.damage,
            state: LifeState::Active,
            collidable: true,
            body: self.body,
            scene: self.scene,
            explosion: self.explosion.clone(),
            script: None,
        })
    }
}
