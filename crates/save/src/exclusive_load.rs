use bevy::prelude::*;
use simulation::autosave::SaveDirty;
use simulation::buildings::{building_save_id, Building};
use simulation::ledger::ResourceLedger;
use simulation::SaveLoadState;

use crate::save_error::SaveError;
use crate::save_plugin::PendingLoadData;
use crate::save_types::SaveRecord;
use crate::storage::{self, StorageConfig};

/// Applies a decoded record: the ledger is replaced wholesale, buildings get
/// the stored amount saved under their id. Buildings without an entry keep
/// their current amount.
pub fn apply_record(world: &mut World, record: &SaveRecord) -> Result<(), SaveError> {
    world
        .get_resource_mut::<ResourceLedger>()
        .ok_or_else(|| SaveError::MissingResource("ResourceLedger".to_string()))?
        .replace_all(record.collected_map());

    let stored = record.building_map();
    let mut q = world.query::<(Entity, &mut Building, Option<&Name>)>();
    for (entity, mut building, name) in q.iter_mut(world) {
        let id = building_save_id(entity, &building, name);
        if let Some(&amount) = stored.get(&id) {
            building.set_stored_amount(amount);
        }
    }

    if let Some(mut dirty) = world.get_resource_mut::<SaveDirty>() {
        dirty.clear();
    }
    Ok(())
}

/// Reads storage and applies the save. Returns `Ok(false)` when nothing is
/// stored.
pub fn load_world(world: &mut World) -> Result<bool, SaveError> {
    let config = world
        .get_resource::<StorageConfig>()
        .cloned()
        .unwrap_or_default();
    let Some((backend, data)) = storage::read_save(&config)? else {
        return Ok(false);
    };
    apply_json(world, &data)?;
    debug!("Applied save data from {backend}");
    Ok(true)
}

fn apply_json(world: &mut World, data: &str) -> Result<(), SaveError> {
    let record = SaveRecord::from_json(data)?;
    apply_record(world, &record)
}

fn log_load_error(e: &SaveError) {
    match e {
        SaveError::Decode(_) | SaveError::NoData => {
            warn!("Save data unusable, keeping current state: {e}")
        }
        _ => error!("Load failed: {e}"),
    }
}

/// Startup load, after the world is populated and before the first tick.
pub(crate) fn load_on_startup(world: &mut World) {
    match load_world(world) {
        Ok(true) => info!("Restored previous session"),
        Ok(false) => info!("No save data found, starting fresh"),
        Err(e) => log_load_error(&e),
    }
}

/// Runs on `OnEnter(SaveLoadState::Loading)`, then transitions back to
/// `Idle`, even on error.
pub(crate) fn exclusive_load(world: &mut World) {
    let pending = world.resource_mut::<PendingLoadData>().0.take();
    let result = pending
        .ok_or(SaveError::NoData)
        .and_then(|data| apply_json(world, &data));
    match result {
        Ok(()) => info!("Loaded saved game"),
        Err(e) => log_load_error(&e),
    }

    world
        .resource_mut::<NextState<SaveLoadState>>()
        .set(SaveLoadState::Idle);
}
