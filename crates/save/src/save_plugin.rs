use bevy::prelude::*;
use simulation::SaveLoadState;

use crate::storage::{self, StorageConfig};

// ---------------------------------------------------------------------------
// Buffer resources
// ---------------------------------------------------------------------------

/// Raw save blob read from storage, waiting for the exclusive load system.
#[derive(Resource, Default)]
pub(crate) struct PendingLoadData(pub(crate) Option<String>);

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Event)]
pub struct SaveGameEvent;

#[derive(Event)]
pub struct LoadGameEvent;

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveGameEvent>()
            .add_event::<LoadGameEvent>()
            .init_resource::<StorageConfig>()
            .init_resource::<PendingLoadData>();

        // Restore the previous session before the first fixed tick.
        app.add_systems(
            Startup,
            crate::exclusive_load::load_on_startup.after(simulation::world_init::init_world),
        );

        app.add_systems(Update, (detect_save_event, detect_load_event));

        // Each state's exclusive system does all the work on entry and
        // transitions back to Idle.
        app.add_systems(
            OnEnter(SaveLoadState::Saving),
            crate::exclusive_save::exclusive_save,
        );
        app.add_systems(
            OnEnter(SaveLoadState::Loading),
            crate::exclusive_load::exclusive_load,
        );

        // Forced saves, app exit and suspend bypass the state machine.
        app.add_systems(Last, crate::exclusive_save::save_immediately);

        app.add_plugins(crate::autosave_bridge::AutosaveBridgePlugin);
    }
}

// ---------------------------------------------------------------------------
// Event detection systems (lightweight, run in Update)
// ---------------------------------------------------------------------------

/// Detects `SaveGameEvent` and transitions to `Saving` state.
fn detect_save_event(
    mut events: EventReader<SaveGameEvent>,
    mut next_state: ResMut<NextState<SaveLoadState>>,
) {
    if events.read().next().is_some() {
        // Only one save per frame.
        events.read().for_each(drop);
        next_state.set(SaveLoadState::Saving);
    }
}

/// Detects `LoadGameEvent`, reads the stored blob and transitions to
/// `Loading`. Nothing stored is not an error.
fn detect_load_event(
    mut events: EventReader<LoadGameEvent>,
    config: Res<StorageConfig>,
    mut pending: ResMut<PendingLoadData>,
    mut next_state: ResMut<NextState<SaveLoadState>>,
) {
    if events.read().next().is_none() {
        return;
    }
    events.read().for_each(drop);

    match storage::read_save(&config) {
        Ok(Some((backend, data))) => {
            debug!("Read save data from {backend}");
            pending.0 = Some(data);
            next_state.set(SaveLoadState::Loading);
        }
        Ok(None) => info!("Load requested but no save data exists"),
        Err(e) => error!("Load failed: {e}"),
    }
}
