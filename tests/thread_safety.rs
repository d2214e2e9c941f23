//! Compile-time guarantees that worlds may be shared across threads.

use snatcher::{
    Behaviour, Character, Effect, Entity, Projectile, Prop, Renderer, ScriptBox, ScriptTrigger,
    Tracer, World, WorldCommands,
};
use static_assertions::{assert_impl_all, assert_obj_safe};

assert_impl_all!(World: Send, Sync, Default);
assert_impl_all!(WorldCommands: Send, Sync);
assert_impl_all!(Character: Send, Sync);
assert_impl_all!(Projectile: Send, Sync);
assert_impl_all!(Effect: Send, Sync, Clone);
assert_impl_all!(Prop: Send, Sync);
assert_impl_all!(ScriptBox: Send, Sync);

assert_obj_safe!(Entity, Behaviour, ScriptTrigger, Renderer, Tracer);

#[test]
fn world_moves_to_another_thread() {
    let world = World::default();
    let ticks = std::thread::spawn(move || {
        let mut world = world;
        world.update();
        world.tick_count()
    })
    .join()
    .unwrap_or_default();
    assert_eq!(ticks, 1);
}
