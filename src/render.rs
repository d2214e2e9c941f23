//! The renderer collaborator contract.
//!
//! The core never builds draw commands. It hands each renderable a pose and
//! an opaque scene handle and lets the renderer do the rest.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Opaque reference to a scene attachment owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneHandle(pub u64);

/// Per-frame pose of a renderable entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World-space position.
    pub position: Vec3,
    /// Yaw-only rotation derived from the entity orientation.
    pub rotation: Quat,
    /// Keyframe cursor for the animation collaborator, if animated.
    pub animation_time: Option<f32>,
}

impl Pose {
    /// Unrotated, unanimated pose at `position`.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            animation_time: None,
        }
    }
}

/// Static display geometry drawn around the eye point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNode {
    /// Unique name within the world.
    pub name: String,
    /// Attachment drawn for the node.
    pub scene: SceneHandle,
}

impl DisplayNode {
    /// Named display node drawing `scene`.
    #[must_use]
    pub fn new(name: impl Into<String>, scene: SceneHandle) -> Self {
        Self {
            name: name.into(),
            scene,
        }
    }
}

/// Draw entry points supplied by the host renderer.
pub trait Renderer {
    /// Draws the sky dome centred on the eye.
    fn draw_sky(&mut self, sky: SceneHandle, eye: Vec3);
    /// Draws a static display node as seen from the eye.
    fn draw_node(&mut self, node: SceneHandle, eye: Vec3);
    /// Draws an entity attachment at its pose.
    fn draw_entity(&mut self, scene: SceneHandle, pose: Pose);
}
