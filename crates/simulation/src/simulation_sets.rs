//! Deterministic simulation ordering via `SystemSet` phases.
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – Tick counter, player requests (collect / move / cancel),
//!   nav grid rebuild and path planning.
//! * **Simulation** – Building production, path following and the collection
//!   task state machine.
//! * **PostSim** – Read-mostly bookkeeping: animation flags, world labels,
//!   the collected-summary popup and the autosave timer.
//!
//! All three sets only run while [`crate::SaveLoadState::Idle`] is active.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    PreSim,
    Simulation,
    PostSim,
}

/// Ordered phases for per-frame systems running in `Update`.
///
/// Configured as a chain: `Input` → `Visual`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationUpdateSet {
    /// Mouse and keyboard handling that emits simulation requests.
    Input,
    /// Visual-only updates (transform sync, labels).
    Visual,
}
