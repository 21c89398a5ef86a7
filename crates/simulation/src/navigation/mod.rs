//! Ground navigation for agents: a walkability grid built from building
//! footprints, A* planning for queued destinations, straight-segment path
//! following at a fixed speed, and direct keyboard-style movement.

mod agent;
mod grid;
mod systems;

pub use agent::{path_length, ManualMoveInput, NavAgent, PathStatus};
pub use grid::{NavCell, NavGrid};
pub use systems::{apply_manual_move, follow_paths, plan_pending_paths, rebuild_nav_grid};

use bevy::prelude::*;

pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NavGrid>()
            .add_systems(
                FixedUpdate,
                (rebuild_nav_grid, plan_pending_paths)
                    .chain()
                    .after(crate::collection::handle_collection_requests)
                    .in_set(crate::SimulationSet::PreSim),
            )
            .add_systems(
                FixedUpdate,
                (apply_manual_move, follow_paths)
                    .chain()
                    .in_set(crate::SimulationSet::Simulation),
            );
    }
}
