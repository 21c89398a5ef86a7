//! # TestWorld: headless integration test harness
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` so tests can spawn buildings
//! and agents, send requests, and step the fixed schedule without a window or
//! renderer.

mod queries;
mod spawning;

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use crate::world_init::SkipWorldInit;
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
pub struct TestWorld {
    app: App,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// An empty world: no buildings, no player, default configuration.
    pub fn new() -> Self {
        Self::with_setup(|_| {})
    }

    /// Like [`TestWorld::new`], but runs `setup` on the app (extra plugins,
    /// resources) before the first update.
    pub fn with_setup(setup: impl FnOnce(&mut App)) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StatesPlugin);
        // Frame updates never advance virtual time, so FixedUpdate only runs
        // through `tick()`.
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));

        // Insert the marker BEFORE SimulationPlugin so init_world skips.
        app.insert_resource(SkipWorldInit);
        app.add_plugins(SimulationPlugin);
        setup(&mut app);

        // Run one update so Startup systems execute (init_world will no-op).
        app.update();

        Self { app }
    }

    /// A world with the demo layout from `init_world`.
    pub fn with_demo_world() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StatesPlugin);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
        app.add_plugins(SimulationPlugin);
        app.update();
        Self { app }
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}
