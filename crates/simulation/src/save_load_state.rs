//! Global save/load state machine.
//!
//! Defines [`SaveLoadState`], a Bevy [`States`] enum that isolates save/load
//! operations from gameplay.  Simulation sets only run while the state is
//! [`SaveLoadState::Idle`]; the save crate moves through the other variants
//! while a manual save or load is in progress.
//!
//! The state lives in the `simulation` crate rather than in `save` so that
//! simulation systems can be gated on it without a circular dependency.

use bevy::prelude::*;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SaveLoadState {
    /// Normal gameplay.
    #[default]
    Idle,
    Saving,
    Loading,
}
