//! Headless demo: two squads of sentries trade fire across an arena until
//! one side reaches the exit switch or the tick budget runs out.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use bevy::app::App;
use bevy::prelude::MinimalPlugins;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use glam::Vec3;
use log::info;
use snatcher::entity::{ForwardMove, Script, ScriptList};
use snatcher::geometry::Triangle;
use snatcher::numeric::seconds_to_duration;
use snatcher::{
    init_logging, Behaviour, Category, Character, CollisionNode, Effect, Pilot, Projectile, Prop,
    SceneHandle, ScriptBox, Shape, SimulationPlugin, SimulationWorld, Team, Weapon, World,
    WorldConfig, DECAL_LIFETIME_SECONDS, EXPLOSION_LIFETIME_SECONDS,
};

/// Headless run of the simulation core
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u32,
    /// Fixed frame delta in seconds; defaults to the nominal frame
    #[arg(short, long)]
    delta: Option<f32>,
    /// JSON world configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Walks in a slow circle and fires whenever the weapon is ready.
struct Sentry {
    turn_rate: f32,
}

impl Behaviour for Sentry {
    fn update(&mut self, pilot: &mut Pilot<'_>) {
        let turn = self.turn_rate * pilot.time().delta_seconds();
        pilot.increase_angles(0.0, turn);
        pilot.set_forward_move(ForwardMove::Forward);
        pilot.shoot();
    }
}

fn floor(name: &str, half: f32, y: f32) -> CollisionNode {
    let a = Vec3::new(-half, y, half);
    let b = Vec3::new(half, y, half);
    let c = Vec3::new(half, y, -half);
    let d = Vec3::new(-half, y, -half);
    CollisionNode::new(name, vec![Triangle::new(a, b, c), Triangle::new(a, c, d)])
}

fn gate() -> CollisionNode {
    let a = Vec3::new(-50.0, 0.0, 0.0);
    let b = Vec3::new(50.0, 0.0, 0.0);
    let c = Vec3::new(50.0, 100.0, 0.0);
    let d = Vec3::new(-50.0, 100.0, 0.0);
    CollisionNode::new("gate", vec![Triangle::new(a, b, c), Triangle::new(a, c, d)])
}

fn arena(config: &WorldConfig) -> World {
    let mut world = World::new(config.clone());
    world.add_collision_node(floor("floor", 1_000.0, 0.0));
    world.add_collision_node(gate());
    world.set_sky(Some(SceneHandle(1)));

    let blood = Effect::new(
        "blood",
        Some(SceneHandle(2)),
        Duration::from_secs_f32(DECAL_LIFETIME_SECONDS),
    );
    let gibs = Effect::new(
        "gibs",
        Some(SceneHandle(3)),
        Duration::from_secs_f32(EXPLOSION_LIFETIME_SECONDS),
    );
    let bolt = Projectile::new("bolt", 3.0, 600.0, 2.0, Some(SceneHandle(4)))
        .with_time_to_live(Duration::from_secs(2));

    let squads = [(Team(1), -200.0, 180.0_f32), (Team(2), 200.0, 0.0)];
    let mut scene = 100;
    for (team, z, yaw) in squads {
        for slot in 0..3_u8 {
            let x = (f32::from(slot) - 1.0) * 80.0;
            let id = format!("team{}-{slot}", team.0);
            let mut params = config.character(id, team, Vec3::new(x, 20.0, z));
            params.angles = Vec3::new(0.0, yaw, 0.0);
            params.life = 20.0;
            params.dying_period_ms = 500.0;
            scene += 1;
            let shot = bolt.launch(Vec3::ZERO, Vec3::NEG_Z, team);
            let weapon = Weapon::new(shot, Duration::from_millis(400))
                .with_muzzle(Vec3::new(0.0, 8.0, -20.0));
            let character = Character::new(&params)
                .with_scene(SceneHandle(scene))
                .with_decal(blood.clone())
                .with_explosion(gibs.clone())
                .with_weapon(weapon)
                .with_behaviour(Box::new(Sentry { turn_rate: 30.0 }));
            world.add_character(character);
        }
    }

    let barrel = Prop::new(
        "barrel",
        Shape::sphere(Vec3::new(0.0, 16.0, 80.0), 16.0),
        12.0,
        Some(SceneHandle(50)),
    )
    .with_explosion(gibs);
    world.add_object(barrel);

    let opener =
        ScriptList::new(vec![Script::DisableScenery("gate".into()), Script::Finish]).once();
    world.add_trigger(
        ScriptBox::new(
            "gate-switch",
            Vec3::new(0.0, 20.0, -120.0),
            Vec3::new(40.0, 20.0, 20.0),
            Box::new(opener),
        )
        .single_shot(),
    );
    world
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => WorldConfig::from_path(path)
            .with_context(|| format!("loading world configuration from {}", path.display()))?,
        None => WorldConfig::default(),
    };
    let delta = args.delta.unwrap_or(config.nominal_frame_seconds);
    info!("simulating {} ticks of {delta:.4}s", args.ticks);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(seconds_to_duration(
            delta,
        )))
        .insert_resource(SimulationWorld(arena(&config)))
        .add_plugins(SimulationPlugin);

    for _ in 0..args.ticks {
        app.update();
    }

    let world = &app
        .world()
        .get_resource::<SimulationWorld>()
        .context("simulation world resource missing")?
        .0;
    info!(
        "after {} ticks: {} characters, {} projectiles, {} objects, finished: {}",
        world.tick_count(),
        world.len(Category::Character),
        world.len(Category::Projectile),
        world.len(Category::Object),
        world.is_finished()
    );
    Ok(())
}
