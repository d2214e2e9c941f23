//! Integration tests for world trace resolution.

use glam::Vec3;
use rstest::{fixture, rstest};
use snatcher::{Category, Querier, Shape, SlotRef, Team, Trace, World};
use test_utils::{wall, Dummy};

const EYE: Vec3 = Vec3::new(0.0, 20.0, 100.0);
const AIM: Vec3 = Vec3::new(0.0, 0.0, -200.0);

#[fixture]
fn world() -> World {
    World::default()
}

fn ball(id: &str, z: f32) -> Dummy {
    Dummy::new(id, Shape::sphere(Vec3::new(0.0, 20.0, z), 10.0))
}

fn shot(team: Team, damage: f32) -> Querier {
    Querier::new(Category::Projectile, team, damage)
}

#[rstest]
fn nearest_dynamic_entity_becomes_the_target(mut world: World) {
    let far = ball("far", -50.0).on_team(Team(2));
    let near = ball("near", 20.0).on_team(Team(2));
    let far_touches = far.touches();
    let near_touches = near.touches();
    world.add_character(far);
    world.add_object(near);

    let mut trace = Trace::ray(EYE, AIM);
    assert!(world.trace(&shot(Team(1), 3.0), &mut trace));

    assert_eq!(trace.target, Some(SlotRef::new(Category::Object, 0)));
    assert!((trace.fraction_impact - 0.35).abs() < 1e-4);
    assert!(Dummy::read(&far_touches).is_empty());
    let touches = Dummy::read(&near_touches);
    assert_eq!(touches.len(), 1);
    assert!((touches[0].damage - 3.0).abs() < f32::EPSILON);
}

#[rstest]
fn scenery_in_front_shields_entities(mut world: World) {
    world.add_collision_node(wall("wall", 50.0, 100.0, 100.0));
    let target = ball("target", 0.0).on_team(Team(2));
    let touches = target.touches();
    world.add_character(target);

    let mut trace = Trace::ray(EYE, AIM);
    assert!(world.trace(&shot(Team(1), 3.0), &mut trace));

    assert_eq!(trace.target, None);
    assert!((trace.fraction_impact - 0.25).abs() < 1e-4);
    assert!(Dummy::read(&touches).is_empty());
}

#[rstest]
fn projectiles_pass_through_their_own_team(mut world: World) {
    let ally = ball("ally", 0.0).on_team(Team(1));
    let touches = ally.touches();
    world.add_character(ally);

    let mut trace = Trace::ray(EYE, AIM);
    assert!(!world.trace(&shot(Team(1), 3.0), &mut trace));

    assert_eq!(trace.target, None);
    assert!(!trace.is_impact());
    assert!(Dummy::read(&touches).is_empty());
}

#[rstest]
fn characters_collide_with_allies_without_hurting_them(mut world: World) {
    let ally = ball("ally", 0.0).on_team(Team(1));
    let touches = ally.touches();
    world.add_character(ally);

    let walker = Querier::new(Category::Character, Team(1), 5.0);
    let mut trace = Trace::swept(EYE, AIM, 16.0);
    assert!(world.trace(&walker, &mut trace));

    assert_eq!(trace.target, Some(SlotRef::new(Category::Character, 0)));
    assert!(Dummy::read(&touches).is_empty());
}

#[rstest]
fn querier_never_hits_itself(mut world: World) {
    let own = ball("own", 0.0).on_team(Team(1));
    let touches = own.touches();
    world.add_character(own);

    let querier = shot(Team(2), 1.0).with_origin(SlotRef::new(Category::Character, 0));
    let mut trace = Trace::ray(EYE, AIM);
    assert!(!world.trace(&querier, &mut trace));
    assert!(Dummy::read(&touches).is_empty());
}

#[rstest]
fn intangible_entities_are_ignored(mut world: World) {
    world.add_object(ball("ghost", 0.0).intangible());

    let mut trace = Trace::ray(EYE, AIM);
    assert!(!world.trace(&shot(Team(1), 1.0), &mut trace));
}

#[rstest]
fn inert_querier_reports_no_impact(mut world: World) {
    world.add_collision_node(wall("wall", 0.0, 100.0, 100.0));
    let mut querier = shot(Team(1), 1.0);
    querier.active = false;
    querier.collidable = false;

    let mut trace = Trace::ray(EYE, AIM);
    assert!(!world.trace(&querier, &mut trace));
    assert!(!trace.is_impact());
}

#[rstest]
fn trigger_sees_the_impact_before_it_was_tested(mut world: World) {
    let target = ball("target", 0.0).on_team(Team(2));
    world.add_character(target);
    let volume = Dummy::new(
        "volume",
        Shape::cuboid(Vec3::new(0.0, 20.0, 50.0), Vec3::splat(10.0)),
    );
    let touches = volume.touches();
    world.add_trigger(volume);

    let mut trace = Trace::ray(EYE, AIM);
    assert!(world.trace(&shot(Team(1), 2.0), &mut trace));

    let seen = Dummy::read(&touches);
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].target, Some(SlotRef::new(Category::Character, 0)));
    assert!((seen[0].fraction_impact - 0.45).abs() < 1e-4);
    assert!((trace.fraction_impact - 0.45).abs() < 1e-4);
}

#[rstest]
fn only_the_last_registered_trigger_hit_fires(mut world: World) {
    let first = Dummy::new(
        "first",
        Shape::cuboid(Vec3::new(0.0, 20.0, 50.0), Vec3::splat(10.0)),
    );
    let second = Dummy::new(
        "second",
        Shape::cuboid(Vec3::new(0.0, 20.0, 0.0), Vec3::splat(10.0)),
    );
    let first_touches = first.touches();
    let second_touches = second.touches();
    world.add_trigger(first);
    world.add_trigger(second);

    let mut trace = Trace::ray(EYE, AIM);
    assert!(!world.trace(&shot(Team(1), 1.0), &mut trace));

    assert!(Dummy::read(&first_touches).is_empty());
    assert_eq!(Dummy::read(&second_touches).len(), 1);
    assert!(!trace.is_impact());
}

#[rstest]
fn triggers_behind_the_target_still_fire(mut world: World) {
    let target = ball("target", 0.0).on_team(Team(2));
    let target_touches = target.touches();
    world.add_character(target);
    let volume = Dummy::new(
        "volume",
        Shape::cuboid(Vec3::new(0.0, 20.0, -50.0), Vec3::splat(10.0)),
    );
    let touches = volume.touches();
    world.add_trigger(volume);

    let mut trace = Trace::ray(EYE, AIM);
    assert!(world.trace(&shot(Team(1), 1.0), &mut trace));

    assert_eq!(Dummy::read(&target_touches).len(), 1);
    let seen = Dummy::read(&touches);
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].target, Some(SlotRef::new(Category::Character, 0)));
    assert!((seen[0].fraction_impact - 0.45).abs() < 1e-4);
    assert!((trace.fraction_impact - 0.45).abs() < 1e-4);
}

#[rstest]
fn scenery_hides_triggers_behind_it(mut world: World) {
    world.add_collision_node(wall("wall", 0.0, 100.0, 100.0));
    let volume = Dummy::new(
        "volume",
        Shape::cuboid(Vec3::new(0.0, 20.0, -50.0), Vec3::splat(10.0)),
    );
    let touches = volume.touches();
    world.add_trigger(volume);

    let mut trace = Trace::ray(EYE, AIM);
    assert!(world.trace(&shot(Team(1), 1.0), &mut trace));

    assert!(Dummy::read(&touches).is_empty());
    assert!((trace.fraction_impact - 0.5).abs() < 1e-4);
}

#[rstest]
fn line_of_sight_follows_enabled_scenery(mut world: World) {
    world.add_collision_node(wall("wall", 0.0, 100.0, 100.0));
    let from = Vec3::new(0.0, 20.0, 50.0);
    let to = Vec3::new(0.0, 20.0, -50.0);
    assert!(world.intersect(from, to));

    world
        .disable_collision_node("wall")
        .expect("wall registered");
    assert!(!world.intersect(from, to));
    assert!(world.disable_collision_node("nowhere").is_err());

    assert!(world.remove_collision_node("wall").is_some());
    assert!(world.enable_collision_node("wall").is_err());
}
