use std::collections::BTreeMap;

use bevy::app::AppExit;
use bevy::ecs::event::EventCursor;
use bevy::prelude::*;
use bevy::window::AppLifecycle;
use simulation::autosave::{ForceSaveRequest, SaveDirty};
use simulation::buildings::{building_save_id, Building};
use simulation::ledger::ResourceLedger;
use simulation::SaveLoadState;

use crate::save_error::SaveError;
use crate::save_types::SaveRecord;
use crate::storage::{self, StorageBackend, StorageConfig};

/// Snapshot of the ledger and every building's stored amount.
pub fn capture_record(world: &mut World) -> Result<SaveRecord, SaveError> {
    let collected = world
        .get_resource::<ResourceLedger>()
        .ok_or_else(|| SaveError::MissingResource("ResourceLedger".to_string()))?
        .snapshot_all();

    let mut buildings = BTreeMap::new();
    let mut q = world.query::<(Entity, &Building, Option<&Name>)>();
    for (entity, building, name) in q.iter(world) {
        let id = building_save_id(entity, building, name);
        if buildings.insert(id.clone(), building.stored_amount()).is_some() {
            warn!("Duplicate building save id '{id}', keeping the last one");
        }
    }

    Ok(SaveRecord::from_maps(&collected, &buildings))
}

/// Writes the current world state to storage and clears the dirty flag on
/// success. On failure the previous save is untouched and the flag stays set.
pub fn save_world(world: &mut World) -> Result<StorageBackend, SaveError> {
    let record = capture_record(world)?;
    let json = record.to_json()?;
    let config = world
        .get_resource::<StorageConfig>()
        .cloned()
        .unwrap_or_default();

    let backend = storage::write_save(&config, &json)?;

    if let Some(mut dirty) = world.get_resource_mut::<SaveDirty>() {
        dirty.clear();
    }
    Ok(backend)
}

fn save_and_log(world: &mut World, reason: &str) {
    match save_world(world) {
        Ok(backend) => info!("Saved game to {backend} ({reason})"),
        Err(e) => error!("Save failed ({reason}): {e}"),
    }
}

/// Runs on `OnEnter(SaveLoadState::Saving)`, then transitions back to `Idle`.
pub(crate) fn exclusive_save(world: &mut World) {
    save_and_log(world, "requested");

    world
        .resource_mut::<NextState<SaveLoadState>>()
        .set(SaveLoadState::Idle);
}

/// Saves in the same frame on `ForceSaveRequest`, `AppExit` or the app being
/// suspended. At most one write per frame.
pub(crate) fn save_immediately(
    world: &mut World,
    mut forced: Local<EventCursor<ForceSaveRequest>>,
    mut exits: Local<EventCursor<AppExit>>,
    mut lifecycle: Local<EventCursor<AppLifecycle>>,
) {
    let force = world
        .get_resource::<Events<ForceSaveRequest>>()
        .is_some_and(|events| forced.read(events).count() > 0);
    let exiting = world
        .get_resource::<Events<AppExit>>()
        .is_some_and(|events| exits.read(events).count() > 0);
    let suspending = world
        .get_resource::<Events<AppLifecycle>>()
        .is_some_and(|events| {
            lifecycle
                .read(events)
                .any(|e| matches!(e, AppLifecycle::WillSuspend | AppLifecycle::Suspended))
        });

    let reason = if exiting {
        "exit"
    } else if suspending {
        "suspend"
    } else if force {
        "forced"
    } else {
        return;
    };
    save_and_log(world, reason);
}
