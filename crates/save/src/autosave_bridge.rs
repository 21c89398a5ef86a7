//! Bridge between the simulation-side autosave timer and the save system.
//!
//! Reads `AutosavePending` (set by `simulation::autosave`) and, when set,
//! sends a `SaveGameEvent`. The dirty flag is cleared by the save itself, so
//! a failed write is retried on the next interval.

use bevy::prelude::*;
use simulation::autosave::AutosavePending;
use simulation::SaveLoadState;

use crate::SaveGameEvent;

/// Only fires when the save system is idle.
fn trigger_autosave(
    mut pending: ResMut<AutosavePending>,
    mut save_events: EventWriter<SaveGameEvent>,
    state: Res<State<SaveLoadState>>,
) {
    if !pending.pending || *state.get() != SaveLoadState::Idle {
        return;
    }
    pending.pending = false;
    save_events.send(SaveGameEvent);
}

pub(crate) struct AutosaveBridgePlugin;

impl Plugin for AutosaveBridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, trigger_autosave);
    }
}
