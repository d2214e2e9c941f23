//! The world: entity collections, static scenery, and the per-tick loop.
//!
//! [`World::update`] steps projectiles, characters, objects, and trigger
//! volumes in that order. Each entity is checked out of its slot while it
//! runs, so its motion can trace the rest of the world through
//! [`World::trace`] without aliasing itself. Dead entities are culled in the
//! same pass without skipping or revisiting their neighbours.

mod roster;

use glam::Vec3;
use hashbrown::HashMap;
use log::{debug, warn};

use crate::category::{Category, SlotRef};
use crate::commands::{Frame, WorldCommand};
use crate::config::WorldConfig;
use crate::entity::{Entity, ScriptTrigger};
use crate::query::{Querier, Tracer};
use crate::render::{DisplayNode, Pose, Renderer, SceneHandle};
use crate::scenery::{CollisionNode, Scenery, SceneryError};
use crate::time::FrameTime;
use crate::trace::Trace;

pub use roster::Roster;
use roster::Rosters;

/// Categories in the order [`World::render`] draws them.
const RENDER_ORDER: [Category; 3] = [Category::Object, Category::Character, Category::Projectile];

/// A level in play.
pub struct World {
    config: WorldConfig,
    rosters: Rosters,
    scenery: Scenery,
    display_nodes: Vec<DisplayNode>,
    sky: Option<SceneHandle>,
    checkpoint: Option<Box<dyn ScriptTrigger>>,
    frame: Frame,
    finished: bool,
    ticks: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl World {
    /// Empty world running under `config`, primed with a nominal frame.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        let time = FrameTime::bounded(
            config.nominal_frame_seconds,
            config.nominal_frame_seconds,
            config.max_frame_seconds,
        );
        Self {
            config,
            rosters: Rosters::default(),
            scenery: Scenery::new(),
            display_nodes: Vec::new(),
            sky: None,
            checkpoint: None,
            frame: Frame::new(time),
            finished: false,
            ticks: 0,
        }
    }

    /// Parameters the world runs under.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Registers an entity into a collection.
    ///
    /// A pooled entity whose slot is already registered replaces the
    /// registered one. Returns whether the collection grew.
    pub fn add(&mut self, category: Category, entity: Box<dyn Entity>) -> bool {
        self.rosters.get_mut(category).insert(entity)
    }

    /// Registers a shot; see [`World::add`].
    pub fn add_projectile(&mut self, projectile: impl Entity + 'static) -> bool {
        self.add(Category::Projectile, Box::new(projectile))
    }

    /// Registers a character; see [`World::add`].
    pub fn add_character(&mut self, character: impl Entity + 'static) -> bool {
        self.add(Category::Character, Box::new(character))
    }

    /// Registers a generic object; see [`World::add`].
    pub fn add_object(&mut self, object: impl Entity + 'static) -> bool {
        self.add(Category::Object, Box::new(object))
    }

    /// Registers a trigger volume; see [`World::add`].
    pub fn add_trigger(&mut self, trigger: impl Entity + 'static) -> bool {
        self.add(Category::Trigger, Box::new(trigger))
    }

    /// Entities of one collection, in update order.
    pub fn entities(&self, category: Category) -> impl Iterator<Item = &dyn Entity> {
        self.rosters.get(category).iter().map(|(_, entity)| entity)
    }

    /// Number of entities in one collection.
    #[must_use]
    pub const fn len(&self, category: Category) -> usize {
        self.rosters.get(category).len()
    }

    /// Whether every collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Category::UPDATE_ORDER
            .iter()
            .all(|&category| self.rosters.get(category).is_empty())
    }

    /// First entity of `category` with this id.
    #[must_use]
    pub fn find(&self, category: Category, id: &str) -> Option<&dyn Entity> {
        self.entities(category).find(|entity| entity.id() == id)
    }

    /// Mutable access to the first entity of `category` with this id.
    pub fn find_mut(
        &mut self,
        category: Category,
        id: &str,
    ) -> Option<&mut (dyn Entity + 'static)> {
        let roster = self.rosters.get_mut(category);
        let index = roster
            .iter()
            .find_map(|(index, entity)| (entity.id() == id).then_some(index))?;
        roster.get_mut(index)
    }

    /// Registers and activates a collision node. A node whose name is already
    /// known is re-activated instead of stored twice.
    pub fn add_collision_node(&mut self, node: CollisionNode) -> bool {
        self.scenery.add(node)
    }

    /// Forgets a collision node.
    pub fn remove_collision_node(&mut self, name: &str) -> Option<CollisionNode> {
        self.scenery.remove(name)
    }

    /// Re-activates a known collision node.
    ///
    /// # Errors
    /// Returns [`SceneryError::UnknownNode`] for unknown names.
    pub fn enable_collision_node(&mut self, name: &str) -> Result<(), SceneryError> {
        self.scenery.enable(name)
    }

    /// Withdraws a collision node from queries while keeping it known.
    ///
    /// # Errors
    /// Returns [`SceneryError::UnknownNode`] for unknown names.
    pub fn disable_collision_node(&mut self, name: &str) -> Result<(), SceneryError> {
        self.scenery.disable(name)
    }

    /// Static collision geometry.
    #[must_use]
    pub const fn scenery(&self) -> &Scenery {
        &self.scenery
    }

    /// Sky attachment drawn first every frame; `None` disables it.
    pub const fn set_sky(&mut self, sky: Option<SceneHandle>) {
        self.sky = sky;
    }

    /// Adds a display node unless one with the same name is present.
    pub fn add_display_node(&mut self, node: DisplayNode) -> bool {
        if self.display_node(&node.name).is_some() {
            return false;
        }
        self.display_nodes.push(node);
        true
    }

    /// Removes and returns the display node named `name`.
    pub fn remove_display_node(&mut self, name: &str) -> Option<DisplayNode> {
        let index = self.display_nodes.iter().position(|node| node.name == name)?;
        Some(self.display_nodes.remove(index))
    }

    /// Display node named `name`, if present.
    #[must_use]
    pub fn display_node(&self, name: &str) -> Option<&DisplayNode> {
        self.display_nodes.iter().find(|node| node.name == name)
    }

    /// Stores the scripts that restore the level to its last checkpoint.
    pub fn set_checkpoint(&mut self, checkpoint: Box<dyn ScriptTrigger>) {
        self.checkpoint = Some(checkpoint);
    }

    /// Runs the checkpoint scripts, if any, and applies their effects.
    pub fn apply_checkpoint(&mut self) {
        if let Some(checkpoint) = self.checkpoint.as_mut() {
            checkpoint.execute_scripts(&mut self.frame.commands);
        }
        self.apply_commands();
    }

    /// Marks the level finished.
    pub const fn set_finished(&mut self) {
        self.finished = true;
    }

    /// Whether a script or the host ended the level.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Drops every entity, scenery node, display node, and pending command.
    pub fn clear(&mut self) {
        self.display_nodes.clear();
        self.scenery.clear();
        self.rosters.clear();
        self.frame.commands.drain().for_each(drop);
        debug!("world cleared");
    }

    /// Sets the elapsed time fed to the next [`World::update`].
    pub fn set_frame_delta(&mut self, delta_seconds: f32) {
        self.frame.time = FrameTime::bounded(
            delta_seconds,
            self.config.nominal_frame_seconds,
            self.config.max_frame_seconds,
        );
    }

    /// Timing of the current or last tick.
    #[must_use]
    pub const fn frame_time(&self) -> &FrameTime {
        &self.frame.time
    }

    /// Number of completed [`World::update`] calls.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Sets the frame delta and runs one tick.
    pub fn advance(&mut self, delta_seconds: f32) {
        self.set_frame_delta(delta_seconds);
        self.update();
    }

    /// Runs one tick over every collection in update order.
    pub fn update(&mut self) {
        self.apply_commands();
        for category in Category::UPDATE_ORDER {
            let mut culled = 0_usize;
            let mut index = 0;
            while index < self.rosters.get(category).len() {
                let Some(mut entity) = self.rosters.get_mut(category).check_out(index) else {
                    index += 1;
                    continue;
                };
                self.step(SlotRef::new(category, index), entity.as_mut());
                let roster = self.rosters.get_mut(category);
                if entity.is_dead() {
                    roster.remove(index);
                    culled += 1;
                } else {
                    roster.restore(index, entity);
                    index += 1;
                }
                self.apply_commands();
            }
            if culled > 0 {
                debug!("culled {culled} dead {category:?} entities");
            }
        }
        self.ticks += 1;
    }

    fn step(&mut self, slot: SlotRef, entity: &mut dyn Entity) {
        entity.update(&mut self.frame);
        let querier = entity.querier(slot, &self.frame.time);
        let dt = self.frame.time.delta_seconds();
        let collided = entity.body_mut().process(self, &querier, dt);
        entity.synchronize(&self.frame.time);
        match slot.category {
            Category::Projectile if collided => entity.set_dead(&mut self.frame),
            Category::Character if entity.position().y < self.config.min_height => {
                debug!("character `{}` fell out of the world", entity.id());
                entity.set_dead(&mut self.frame);
            }
            _ => {}
        }
    }

    /// Applies every queued world command.
    pub fn apply_commands(&mut self) {
        let pending: Vec<WorldCommand> = self.frame.commands.drain().collect();
        for command in pending {
            match command {
                WorldCommand::Spawn { category, entity } => {
                    self.add(category, entity);
                }
                WorldCommand::EnableScenery(name) => {
                    if let Err(err) = self.scenery.enable(&name) {
                        warn!("script could not enable scenery: {err}");
                    }
                }
                WorldCommand::DisableScenery(name) => {
                    if let Err(err) = self.scenery.disable(&name) {
                        warn!("script could not disable scenery: {err}");
                    }
                }
                WorldCommand::Finish => self.set_finished(),
            }
        }
    }

    /// Resolves a trace for `querier` against scenery, dynamic entities, and
    /// trigger volumes.
    ///
    /// The nearest dynamic entity hit becomes the trace target and receives
    /// the querier's damage when on another team. Projectile queries ignore
    /// same-team entities. Trigger volumes are then tested against the
    /// segment as clipped by scenery alone, so a dynamic target in front of
    /// a volume does not hide it. The last volume hit fires with the impact
    /// state as it was before they were tested. Returns whether scenery or a
    /// dynamic entity was hit.
    pub fn trace(&mut self, querier: &Querier, trace: &mut Trace) -> bool {
        if querier.is_inert() {
            return false;
        }
        let mut impact = self.scenery.trace(trace);
        let behind_scenery = trace.snapshot();

        let mut target = None;
        for category in [Category::Character, Category::Object] {
            for (index, candidate) in self.rosters.get(category).iter() {
                let slot = SlotRef::new(category, index);
                if querier.is_origin(slot) || !candidate.is_collidable() || !candidate.is_active() {
                    continue;
                }
                if querier.category == Category::Projectile && candidate.team() == querier.team {
                    continue;
                }
                if candidate.body().shape.trace(trace) {
                    target = Some(slot);
                    impact = true;
                }
            }
        }
        if target.is_some() {
            trace.target = target;
        }

        let snapshot = trace.snapshot();
        if let Some(slot) = target {
            let frame = &mut self.frame;
            if let Some(hit) = self.rosters.get_mut(slot.category).get_mut(slot.index) {
                if hit.team() != querier.team {
                    hit.touch_react(querier, trace, frame);
                }
            }
        }

        // Volumes are only shadowed by scenery, never by the dynamic target.
        let mut fired = None;
        for (index, volume) in self.rosters.get(Category::Trigger).iter() {
            trace.restore(behind_scenery);
            if volume.body().shape.trace(trace) {
                fired = Some(index);
            }
        }
        trace.restore(snapshot);
        if let Some(index) = fired {
            let frame = &mut self.frame;
            if let Some(volume) = self.rosters.get_mut(Category::Trigger).get_mut(index) {
                volume.touch_react(querier, trace, frame);
            }
        }
        impact
    }

    /// Static-geometry-only trace.
    pub fn trace_scenery(&self, trace: &mut Trace) -> bool {
        self.scenery.trace(trace)
    }

    /// Line-of-sight test against active scenery.
    #[must_use]
    pub fn intersect(&self, from: Vec3, to: Vec3) -> bool {
        self.scenery.intersect(from, to)
    }

    /// Hands every renderable to `renderer`: sky, display nodes, objects,
    /// characters, then projectiles.
    pub fn render(&self, eye: Vec3, renderer: &mut dyn Renderer) {
        if let Some(sky) = self.sky {
            renderer.draw_sky(sky, eye);
        }
        for node in &self.display_nodes {
            renderer.draw_node(node.scene, eye);
        }
        for category in RENDER_ORDER {
            for entity in self.entities(category) {
                if let Some(scene) = entity.scene() {
                    renderer.draw_entity(scene, entity.pose());
                }
            }
        }
    }

    /// Current pose of every entity attached to a scene.
    #[must_use]
    pub fn scene_poses(&self) -> HashMap<SceneHandle, Pose> {
        RENDER_ORDER
            .iter()
            .flat_map(|&category| self.entities(category))
            .filter_map(|entity| entity.scene().map(|scene| (scene, entity.pose())))
            .collect()
    }
}

impl Tracer for World {
    fn trace(&mut self, querier: &Querier, trace: &mut Trace) -> bool {
        Self::trace(self, querier, trace)
    }
}
