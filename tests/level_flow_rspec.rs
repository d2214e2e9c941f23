//! Behaviour-driven tests of a level running inside a headless Bevy app.

use bevy::prelude::Transform;
use glam::Vec3;
use snatcher::entity::{ForwardMove, Script, ScriptList};
use snatcher::{
    Behaviour, Category, Character, Entity as _, Pilot, SceneHandle, SceneLink, ScriptBox, Team,
    World,
};
use std::fmt;
use test_utils::{run_serial, wall, weightless, SharedApp};

struct Walker;

impl Behaviour for Walker {
    fn update(&mut self, pilot: &mut Pilot<'_>) {
        pilot.set_forward_move(ForwardMove::Forward);
    }
}

#[derive(Clone)]
struct Level {
    app: SharedApp,
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Level").finish_non_exhaustive()
    }
}

impl Default for Level {
    fn default() -> Self {
        Self {
            app: SharedApp::new(World::default()),
        }
    }
}

impl Level {
    fn setup(&self) {
        let mut world = World::default();
        world.add_collision_node(wall("gate", -200.0, 50.0, 100.0));
        let opener = ScriptList::new(vec![Script::DisableScenery("gate".into()), Script::Finish]);
        world.add_trigger(
            ScriptBox::new(
                "switch",
                Vec3::new(0.0, 20.0, -40.0),
                Vec3::splat(10.0),
                Box::new(opener),
            )
            .single_shot(),
        );
        let walker = Character::new(&weightless("walker", Team(1), Vec3::new(0.0, 20.0, 0.0)))
            .with_scene(SceneHandle(7))
            .with_behaviour(Box::new(Walker));
        world.add_character(walker);

        self.app
            .reload(world)
            .world_mut()
            .spawn((SceneLink(SceneHandle(7)), Transform::default()));
    }

    fn run(&self, frames: usize) {
        let mut app = self.app.lock();
        for _ in 0..frames {
            app.update();
        }
    }

    fn world<R>(&self, read: impl FnOnce(&World) -> R) -> R {
        let app = self.app.lock();
        read(test_utils::app::world(&app))
    }

    fn linked_translation(&self) -> Option<Vec3> {
        let mut app = self.app.lock();
        let mut links = app.world_mut().query::<(&SceneLink, &Transform)>();
        links
            .iter(app.world())
            .find(|(link, _)| link.0 == SceneHandle(7))
            .map(|(_, transform)| transform.translation)
    }
}

#[test]
fn walking_onto_the_switch_finishes_the_level() {
    run_serial(&rspec::given(
        "a level with a gate, a gate switch and a character walking at it",
        Level::default(),
        |ctx| {
            ctx.before_each(|level| level.setup());

            ctx.when("a single frame runs", |ctx| {
                ctx.before_each(|level| level.run(1));

                ctx.then("the level is still in progress", |level| {
                    assert!(!level.world(World::is_finished));
                    assert_eq!(level.world(World::tick_count), 1);
                });
            });

            ctx.when("half a second of frames runs", |ctx| {
                ctx.before_each(|level| level.run(31));

                ctx.then("the switch has fired and been culled", |level| {
                    assert!(level.world(World::is_finished));
                    assert_eq!(level.world(|world| world.len(Category::Trigger)), 0);
                });

                ctx.then("the gate is withdrawn from collision", |level| {
                    let open = level.world(|world| {
                        world
                            .scenery()
                            .node("gate")
                            .is_some_and(|gate| !gate.is_in_game())
                    });
                    assert!(open);
                });

                ctx.then("the linked transform follows the walker", |level| {
                    let walker = level.world(|world| {
                        world
                            .find(Category::Character, "walker")
                            .map(|walker| walker.position())
                    });
                    assert!(walker.is_some_and(|position| position.z < -14.0));
                    assert_eq!(level.linked_translation(), walker);
                });
            });
        },
    ));
}
