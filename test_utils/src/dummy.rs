//! A minimal scriptable entity recording what the world does to it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use snatcher::{
    Body, Entity, Frame, FrameTime, LifeState, Querier, SceneHandle, ScriptTrigger, Shape,
    SlotRef, Team, Trace,
};

/// Trace state observed by a dummy when it was touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub damage: f32,
    pub fraction_impact: f32,
    pub target: Option<SlotRef>,
}

/// Entity that counts its updates, records its touches, and optionally
/// dies on its first update.
#[derive(Clone)]
pub struct Dummy {
    id: String,
    team: Team,
    state: LifeState,
    collidable: bool,
    doomed: bool,
    life: f32,
    body: Body,
    scene: Option<SceneHandle>,
    updates: Arc<AtomicUsize>,
    touches: Arc<Mutex<Vec<Touch>>>,
}

impl Dummy {
    /// A collidable, immobile, neutral dummy.
    pub fn new(id: &str, shape: Shape) -> Self {
        Self {
            id: id.to_owned(),
            team: Team::NEUTRAL,
            state: LifeState::Active,
            collidable: true,
            doomed: false,
            life: 1.0,
            body: Body::fixed(shape),
            scene: None,
            updates: Arc::default(),
            touches: Arc::default(),
        }
    }

    /// Dies during its first update.
    pub fn doomed(mut self) -> Self {
        self.doomed = true;
        self
    }

    pub fn on_team(mut self, team: Team) -> Self {
        self.team = team;
        self
    }

    pub fn intangible(mut self) -> Self {
        self.collidable = false;
        self
    }

    pub fn with_scene(mut self, scene: SceneHandle) -> Self {
        self.scene = Some(scene);
        self
    }

    /// Shared counter of update calls.
    pub fn updates(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.updates)
    }

    /// Shared log of touches.
    pub fn touches(&self) -> Arc<Mutex<Vec<Touch>>> {
        Arc::clone(&self.touches)
    }

    /// Reads a shared touch log.
    pub fn read(touches: &Mutex<Vec<Touch>>) -> Vec<Touch> {
        touches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Entity for Dummy {
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
        self.life
    }

    fn set_life(&mut self, life: f32) {
        self.life = life;
    }

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

    fn update(&mut self, _frame: &mut Frame) {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.doomed {
            self.state = LifeState::Dead;
        }
    }

    fn touch_react(&mut self, attacker: &Querier, trace: &Trace, _frame: &mut Frame) -> bool {
        self.touches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Touch {
                damage: attacker.damage,
                fraction_impact: trace.fraction_impact,
                target: trace.target,
            });
        true
    }

    fn set_dead(&mut self, _frame: &mut Frame) {
        self.state = LifeState::Dead;
    }

    fn reset(&mut self) {
        self.state = LifeState::Active;
    }

    fn scene(&self) -> Option<SceneHandle> {
        self.scene
    }

    fn store_script_trigger(&mut self, _trigger: Box<dyn ScriptTrigger>) {}

    fn duplicate(&self) -> Box<dyn Entity> {
        Box::new(self.clone())
    }
}
