use bevy::prelude::*;

use super::production::{refresh_building_labels, tick_production};

pub struct BuildingsPlugin;

impl Plugin for BuildingsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            tick_production.in_set(crate::SimulationSet::Simulation),
        )
        .add_systems(
            FixedUpdate,
            refresh_building_labels.in_set(crate::SimulationSet::PostSim),
        );
    }
}
