use bevy::prelude::*;

pub mod autosave;
pub mod buildings;
pub mod collection;
pub mod config;
pub mod ledger;
pub mod navigation;
pub mod notifications;
pub mod save_load_state;
pub mod simulation_sets;
pub mod world_init;

#[cfg(test)]
mod integration_tests;

#[cfg(any(test, feature = "test-harness"))]
pub mod test_harness;

pub use save_load_state::SaveLoadState;
pub use simulation_sets::{SimulationSet, SimulationUpdateSet};

// ---------------------------------------------------------------------------
// Core resources
// ---------------------------------------------------------------------------

/// Global tick counter incremented each FixedUpdate.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

pub fn advance_tick_counter(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(config::TICK_HZ))
            .init_state::<SaveLoadState>()
            .init_resource::<TickCounter>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::PreSim,
                    SimulationSet::Simulation,
                    SimulationSet::PostSim,
                )
                    .chain()
                    .run_if(in_state(SaveLoadState::Idle)),
            )
            .configure_sets(
                Update,
                (SimulationUpdateSet::Input, SimulationUpdateSet::Visual).chain(),
            )
            .add_systems(Startup, world_init::init_world)
            .add_systems(
                FixedUpdate,
                advance_tick_counter
                    .before(collection::handle_collection_requests)
                    .in_set(SimulationSet::PreSim),
            );

        app.add_plugins((
            ledger::LedgerPlugin,
            buildings::BuildingsPlugin,
            navigation::NavigationPlugin,
            collection::CollectionPlugin,
            notifications::NotificationsPlugin,
            autosave::AutosavePlugin,
        ));
    }
}
