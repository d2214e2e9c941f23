//! Behaviour-driven tests of a character taking hits through world traces.

use glam::Vec3;
use snatcher::{Category, Character, Effect, Entity as _, LifeState, Querier, Team, Trace, World};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use test_utils::{blood, run_serial, weightless};

#[derive(Clone)]
struct Arena {
    world: Arc<Mutex<World>>,
    life: f32,
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena").field("life", &self.life).finish()
    }
}

impl Arena {
    fn with_life(life: f32) -> Self {
        Self {
            world: Arc::new(Mutex::new(World::default())),
            life,
        }
    }

    fn lock(&self) -> MutexGuard<'_, World> {
        self.world.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn setup(&self) {
        let mut params = weightless("grunt", Team(1), Vec3::new(0.0, 20.0, 0.0));
        params.life = self.life;
        params.dying_period_ms = 100.0;
        params.decal_pool_size = 3;
        let grunt = Character::new(&params)
            .with_decal(blood())
            .with_explosion(Effect::new("gibs", None, Duration::from_secs(5)));
        let mut world = World::default();
        world.add_character(grunt);
        *self.lock() = world;
    }

    /// Fires an instant shot from the other team straight through the grunt.
    fn shoot(&self, damage: f32) {
        let mut world = self.lock();
        let querier = Querier::new(Category::Projectile, Team(2), damage);
        let mut trace = Trace::ray(Vec3::new(0.0, 20.0, 100.0), Vec3::new(0.0, 0.0, -200.0));
        world.trace(&querier, &mut trace);
        world.apply_commands();
    }

    fn tick(&self, times: usize) {
        let mut world = self.lock();
        for _ in 0..times {
            world.update();
        }
    }

    fn grunt(&self) -> Option<(LifeState, f32, bool)> {
        self.lock()
            .find(Category::Character, "grunt")
            .map(|grunt| (grunt.state(), grunt.life(), grunt.is_collidable()))
    }

    fn objects(&self, id: &str) -> usize {
        self.lock()
            .entities(Category::Object)
            .filter(|object| object.id() == id)
            .count()
    }
}

#[test]
fn character_dies_after_two_heavy_hits() {
    run_serial(&rspec::given(
        "a grunt with 10 life, a 100 ms dying period and three decal slots",
        Arena::with_life(10.0),
        |ctx| {
            ctx.before_each(|arena| arena.setup());

            ctx.when("a 6 damage shot hits", |ctx| {
                ctx.before_each(|arena| arena.shoot(6.0));

                ctx.then("the grunt stays active with 4 life", |arena| {
                    let (state, life, collidable) = arena.grunt().expect("grunt present");
                    assert_eq!(state, LifeState::Active);
                    assert!((life - 4.0).abs() < 1e-4, "life was {life}");
                    assert!(collidable);
                });

                ctx.then("one blood decal is registered", |arena| {
                    assert_eq!(arena.objects("blood"), 1);
                });

                ctx.when("a second 6 damage shot hits", |ctx| {
                    ctx.before_each(|arena| arena.shoot(6.0));

                    ctx.then("the grunt is dying and no longer collidable", |arena| {
                        let (state, _, collidable) = arena.grunt().expect("grunt present");
                        assert_eq!(state, LifeState::Dying);
                        assert!(!collidable);
                    });

                    ctx.when("a third shot is fired", |ctx| {
                        ctx.before_each(|arena| arena.shoot(6.0));

                        ctx.then("it passes through without leaving a decal", |arena| {
                            assert_eq!(arena.objects("blood"), 2);
                        });
                    });

                    ctx.when("the dying period elapses", |ctx| {
                        ctx.before_each(|arena| arena.tick(10));

                        ctx.then("the grunt is culled from the world", |arena| {
                            assert!(arena.grunt().is_none());
                        });

                        ctx.then("its explosion is registered once", |arena| {
                            assert_eq!(arena.objects("gibs"), 1);
                        });
                    });
                });
            });
        },
    ));
}

#[test]
fn blood_decals_reuse_their_slots() {
    run_serial(&rspec::given(
        "a sturdy grunt with three decal slots",
        Arena::with_life(100.0),
        |ctx| {
            ctx.before_each(|arena| arena.setup());

            ctx.when("it is hit twice", |ctx| {
                ctx.before_each(|arena| {
                    arena.shoot(1.0);
                    arena.shoot(1.0);
                });

                ctx.then("two decals are in the world", |arena| {
                    assert_eq!(arena.objects("blood"), 2);
                });
            });

            ctx.when("it is hit six times", |ctx| {
                ctx.before_each(|arena| (0..6).for_each(|_| arena.shoot(1.0)));

                ctx.then("the oldest decals were replaced in place", |arena| {
                    assert_eq!(arena.objects("blood"), 3);
                    let (state, life, _) = arena.grunt().expect("grunt present");
                    assert_eq!(state, LifeState::Active);
                    assert!((life - 94.0).abs() < 1e-4, "life was {life}");
                });
            });
        },
    ));
}
