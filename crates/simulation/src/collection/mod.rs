//! Player collection flow: walk to a building, turn to face it, run a timed
//! pickup, then move everything it stored into the [`crate::ledger::ResourceLedger`].
//!
//! Each agent carries a [`Collector`] whose optional [`CollectionTask`] is a
//! small state machine advanced once per fixed tick. Requests arrive as
//! events (usually from mouse clicks) and are applied in `PreSim`; the task
//! itself advances in `Simulation` after path following.

pub(crate) mod systems;
pub(crate) mod types;

pub use systems::{
    advance_collection_tasks, facing_rotation, handle_collection_requests, update_agent_animation,
};
pub use types::{
    AgentAnimation, CancelCollectionRequest, CancelReason, CollectRequest, CollectionFinished,
    CollectionOutcome, CollectionPhase, CollectionState, CollectionTask, Collector,
    CollectorConfig, MoveRequest, PickupTriggered, Player,
};

use bevy::prelude::*;

pub struct CollectionPlugin;

impl Plugin for CollectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CollectorConfig>()
            .add_event::<CollectRequest>()
            .add_event::<MoveRequest>()
            .add_event::<CancelCollectionRequest>()
            .add_event::<PickupTriggered>()
            .add_event::<CollectionFinished>()
            .add_systems(
                FixedUpdate,
                handle_collection_requests.in_set(crate::SimulationSet::PreSim),
            )
            .add_systems(
                FixedUpdate,
                advance_collection_tasks
                    .after(crate::navigation::follow_paths)
                    .after(crate::buildings::tick_production)
                    .in_set(crate::SimulationSet::Simulation),
            )
            .add_systems(
                FixedUpdate,
                update_agent_animation.in_set(crate::SimulationSet::PostSim),
            );
    }
}
