#![cfg_attr(docsrs, feature(doc_cfg))]
//! Real-time simulation core for a first-person action game.
//!
//! A [`World`] owns four entity collections (projectiles, characters,
//! objects, trigger volumes) and a hierarchy of static collision geometry.
//! Each tick it steps every entity, resolves its motion through segment
//! traces, applies hit damage and trigger scripts, and culls the dead.
//! Rendering, AI, and scripting are collaborators reached through traits.
pub mod category;
pub mod commands;
pub mod config;
pub mod constants;
pub mod entity;
pub mod geometry;
pub mod logging;
pub mod motion;
pub mod mover;
pub mod numeric;
pub mod plugin;
pub mod query;
pub mod render;
pub mod scenery;
pub mod shape;
pub mod time;
pub mod trace;
pub mod vector_math;
pub mod world;
pub use constants::*;

// Re-export commonly used items
pub use category::{Category, SlotRef, Team};
pub use commands::{Frame, WorldCommand, WorldCommands};
pub use config::{CharacterParams, ConfigError, WorldConfig};
pub use entity::{
    Behaviour, Body, Character, Effect, Entity, LifeState, Pilot, Projectile, Prop, ScriptBox,
    ScriptTrigger, Weapon,
};
pub use logging::init as init_logging;
pub use motion::Motion;
pub use mover::Mover;
pub use plugin::{SceneLink, SimulationPlugin, SimulationWorld};
pub use query::{Querier, Tracer};
pub use render::{DisplayNode, Pose, Renderer, SceneHandle};
pub use scenery::{CollisionNode, Scenery, SceneryError};
pub use shape::Shape;
pub use time::FrameTime;
pub use trace::Trace;
pub use world::World;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use snatcher::prelude::*;
    //!
    //! let mut world = World::default();
    //! let params = CharacterParams::default();
    //! world.add_character(Character::new(&params));
    //! world.advance(1.0 / 60.0);
    //! ```

    pub use crate::entity::{ForwardMove, SideMove};
    pub use crate::geometry::Triangle;
    pub use crate::{
        Category, Character, CharacterParams, CollisionNode, Entity, Team, Trace, World,
        WorldConfig,
    };
}
