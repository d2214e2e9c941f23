//! Bevy plugin hosting the simulation world inside an ECS app.

use bevy::prelude::*;
use log::info;

use crate::render::SceneHandle;
use crate::world::World;

/// The simulated world as a Bevy resource.
#[derive(Resource, Default)]
pub struct SimulationWorld(pub World);

/// Links a Bevy entity's [`Transform`] to the simulation entity attached to
/// the same scene handle.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneLink(pub SceneHandle);

/// Advances the world by Bevy's frame delta.
pub fn step_simulation_system(time: Res<Time>, mut world: ResMut<SimulationWorld>) {
    let was_finished = world.0.is_finished();
    world.0.advance(time.delta_secs());
    if world.0.is_finished() && !was_finished {
        info!("level finished after {} ticks", world.0.tick_count());
    }
}

/// Copies simulation poses onto linked transforms.
pub fn sync_scene_transforms_system(
    world: Res<SimulationWorld>,
    mut links: Query<(&SceneLink, &mut Transform)>,
) {
    let poses = world.0.scene_poses();
    for (link, mut transform) in &mut links {
        if let Some(pose) = poses.get(&link.0) {
            transform.translation = pose.position;
            transform.rotation = pose.rotation;
        }
    }
}

/// Installs the simulation resource and its per-frame systems.
///
/// A [`SimulationWorld`] inserted before the plugin is kept; otherwise an
/// empty world is created.
#[derive(Default)]
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationWorld>();
        app.add_systems(
            Update,
            (step_simulation_system, sync_scene_transforms_system).chain(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::config::CharacterParams;
    use crate::entity::{Character, Entity as _};
    use rstest::rstest;

    #[rstest]
    fn plugin_steps_world_every_frame() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(SimulationPlugin);
        assert!(app.world().contains_resource::<SimulationWorld>());
        app.update();
        app.update();
        let ticks = app.world().resource::<SimulationWorld>().0.tick_count();
        assert_eq!(ticks, 2);
    }

    #[rstest]
    fn linked_transforms_follow_their_entity() {
        let mut world = World::default();
        let params = CharacterParams {
            id: "scout".into(),
            position: Vec3::new(4.0, 50.0, -2.0),
            ..CharacterParams::default()
        };
        world.add_character(Character::new(&params).with_scene(SceneHandle(7)));

        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(SimulationWorld(world));
        app.add_plugins(SimulationPlugin);
        let linked = app
            .world_mut()
            .spawn((SceneLink(SceneHandle(7)), Transform::default()))
            .id();
        app.update();

        let expected = app
            .world()
            .resource::<SimulationWorld>()
            .0
            .find(Category::Character, "scout")
            .map(|character| character.position());
        let actual = app.world().get::<Transform>(linked).map(|t| t.translation);
        assert_eq!(actual, expected);
    }
}
