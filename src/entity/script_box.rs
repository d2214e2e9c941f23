//! Trigger volumes that run scripts when an entity passes through them.

use glam::Vec3;
use log::debug;

use super::{Body, Entity, LifeState, ScriptTrigger};
use crate::category::{Category, Team};
use crate::commands::Frame;
use crate::query::Querier;
use crate::render::SceneHandle;
use crate::shape::Shape;
use crate::time::FrameTime;
use crate::trace::Trace;

/// An invisible, non-blocking box that fires its scripts on contact.
///
/// Only queries from the activating category count, optionally restricted
/// to one team. A single-shot box dies after firing.
pub struct ScriptBox {
    id: String,
    body: Body,
    trigger: Box<dyn ScriptTrigger>,
    activated_by: Category,
    team: Team,
    single_shot: bool,
    state: LifeState,
}

impl ScriptBox {
    /// Axis-aligned volume centred on `center`, crossed by characters of any team.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        center: Vec3,
        half_extents: Vec3,
        trigger: Box<dyn ScriptTrigger>,
    ) -> Self {
        Self {
            id: id.into(),
            body: Body::fixed(Shape::cuboid(center, half_extents)),
            trigger,
            activated_by: Category::Character,
            team: Team::NEUTRAL,
            single_shot: false,
            state: LifeState::Active,
        }
    }

    /// Restricts activation to queries from `category`.
    #[must_use]
    pub const fn activated_by(mut self, category: Category) -> Self {
        self.activated_by = category;
        self
    }

    /// Restricts activation to one team; neutral accepts every team.
    #[must_use]
    pub const fn for_team(mut self, team: Team) -> Self {
        self.team = team;
        self
    }

    /// Dies after its first activation.
    #[must_use]
    pub const fn single_shot(mut self) -> Self {
        self.single_shot = true;
        self
    }

    fn accepts(&self, querier: &Querier) -> bool {
        querier.category == self.activated_by
            && (self.team.is_neutral() || self.team == querier.team)
    }
}

impl Entity for ScriptBox {
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

    fn update(&mut self, _frame: &mut Frame) {}

    fn touch_react(&mut self, attacker: &Querier, _trace: &Trace, frame: &mut Frame) -> bool {
        if self.state != LifeState::Active || !self.accepts(attacker) {
            return true;
        }
        debug!("trigger `{}` fired", self.id);
        self.trigger.execute_scripts(&mut frame.commands);
        if self.single_shot {
            self.set_dead(frame);
        }
        true
    }

    fn set_dead(&mut self, _frame: &mut Frame) {
        self.state = LifeState::Dead;
    }

    fn reset(&mut self) {
        self.state = LifeState::Active;
        self.trigger.reset();
    }

    fn scene(&self) -> Option<SceneHandle> {
        None
    }

    fn store_script_trigger(&mut self, trigger: Box<dyn ScriptTrigger>) {
        self.trigger = trigger;
    }

    fn duplicate(&self) -> Box<dyn Entity> {
        Box::new(Self {
            id: self.id.clone(),
            body: self.body,
            trigger: Box::new(super::ScriptList::default()),
            activated_by: self.activated_by,
            team: self.team,
            single_shot: self.single_shot,
            state: LifeState::Active,
        })
    }
}
