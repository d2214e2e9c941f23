//! Headless Bevy apps hosting a simulation world.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use snatcher::{SimulationPlugin, SimulationWorld, World, NOMINAL_FRAME_SECONDS};

/// Builds an app stepping `world` by exactly one nominal frame per update.
pub fn headless_app(world: World) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            NOMINAL_FRAME_SECONDS,
        )))
        .insert_resource(SimulationWorld(world))
        .add_plugins(SimulationPlugin);
    app
}

/// The simulated world inside `app`.
///
/// # Panics
/// Panics if the app was built without [`SimulationPlugin`].
pub fn world(app: &App) -> &World {
    &app.world().resource::<SimulationWorld>().0
}

/// A headless app behind a mutex, cloneable into rspec fixtures.
#[derive(Clone)]
pub struct SharedApp(Arc<Mutex<App>>);

// SAFETY: rspec requires `Send + Sync` fixtures. Suites driven through
// `run_serial` never touch the app from two threads, and every access
// goes through the mutex.
unsafe impl Send for SharedApp {}
unsafe impl Sync for SharedApp {}

impl SharedApp {
    /// Hosts `world` in a fresh [`headless_app`].
    pub fn new(world: World) -> Self {
        Self(Arc::new(Mutex::new(headless_app(world))))
    }

    /// Locks the app, recovering from a poisoned mutex.
    pub fn lock(&self) -> MutexGuard<'_, App> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Swaps the hosted app for one running `world`.
    pub fn reload(&self, world: World) -> MutexGuard<'_, App> {
        let mut app = self.lock();
        *app = headless_app(world);
        app
    }
}
