//! Dirty-flag-gated periodic autosave.
//!
//! The simulation crate owns the timer and configuration. Every
//! `interval_secs` the timer checks [`SaveDirty`] (or the
//! `always_save_intervally` override) and, if a save is warranted, sets
//! [`AutosavePending`]. The save crate's bridge converts that flag into a
//! `SaveGameEvent`; the dirty flag is only cleared once a save succeeds, so a
//! failed write is retried on the next interval.

use bevy::prelude::*;

use crate::config::secs_to_ticks;

// =============================================================================
// Constants
// =============================================================================

pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: f32 = 5.0;

/// Intervals shorter than this are raised to it.
pub const MIN_AUTOSAVE_INTERVAL_SECS: f32 = 0.1;

// =============================================================================
// Resources
// =============================================================================

#[derive(Resource, Debug, Clone)]
pub struct AutosaveConfig {
    pub enabled: bool,
    pub interval_secs: f32,
    /// Save on every interval even when nothing changed.
    pub always_save_intervally: bool,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: DEFAULT_AUTOSAVE_INTERVAL_SECS,
            always_save_intervally: false,
        }
    }
}

impl AutosaveConfig {
    pub fn effective_interval_secs(&self) -> f32 {
        self.interval_secs.max(MIN_AUTOSAVE_INTERVAL_SECS)
    }

    pub fn interval_ticks(&self) -> u32 {
        secs_to_ticks(self.effective_interval_secs())
    }
}

/// Set whenever persistent state changes; cleared after a successful save.
#[derive(Resource, Debug, Default)]
pub struct SaveDirty(bool);

impl SaveDirty {
    pub fn mark(&mut self) {
        self.0 = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.0
    }

    pub fn clear(&mut self) {
        self.0 = false;
    }
}

/// Counts fixed ticks since the last interval boundary.
#[derive(Resource, Default)]
pub struct AutosaveTimer {
    pub counter: u32,
}

/// Set by [`autosave_tick_system`]; consumed by the save crate's bridge.
#[derive(Resource, Default)]
pub struct AutosavePending {
    pub pending: bool,
}

/// Save right now, outside the interval schedule.
#[derive(Event, Debug, Clone, Default)]
pub struct ForceSaveRequest;

// =============================================================================
// Systems
// =============================================================================

/// Runs in `SimulationSet::PostSim` so the interval check sees everything the
/// current tick changed.
pub fn autosave_tick_system(
    config: Res<AutosaveConfig>,
    dirty: Res<SaveDirty>,
    mut timer: ResMut<AutosaveTimer>,
    mut pending: ResMut<AutosavePending>,
) {
    if !config.enabled {
        timer.counter = 0;
        return;
    }

    timer.counter += 1;
    if timer.counter < config.interval_ticks() {
        return;
    }
    timer.counter = 0;

    if config.always_save_intervally || dirty.is_dirty() {
        pending.pending = true;
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct AutosavePlugin;

impl Plugin for AutosavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AutosaveConfig>()
            .init_resource::<AutosaveTimer>()
            .init_resource::<AutosavePending>()
            .init_resource::<SaveDirty>()
            .add_event::<ForceSaveRequest>()
            .add_systems(
                FixedUpdate,
                autosave_tick_system.in_set(crate::SimulationSet::PostSim),
            );
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
