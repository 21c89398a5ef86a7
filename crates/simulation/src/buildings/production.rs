use bevy::prelude::*;

use crate::config::secs_to_ticks;

use super::types::{Building, BuildingLabel, ProductionTimer};

/// Advances every building's production timer by one tick and produces when it
/// reaches the building's interval.
pub fn tick_production(mut buildings: Query<(&mut Building, &mut ProductionTimer)>) {
    for (mut building, mut timer) in &mut buildings {
        timer.elapsed_ticks += 1;
        if timer.elapsed_ticks >= secs_to_ticks(building.produce_interval_secs) {
            timer.elapsed_ticks = 0;
            // Full buildings keep their timer running but skip the write so
            // change detection stays quiet.
            if building.stored_amount() < building.storage_capacity {
                building.produce();
            }
        }
    }
}

/// Rewrites the world label of every building whose state changed this tick.
pub fn refresh_building_labels(
    mut buildings: Query<(&Building, &mut BuildingLabel), Changed<Building>>,
) {
    for (building, mut label) in &mut buildings {
        let text = building.label_text();
        if label.0 != text {
            label.0 = text;
        }
    }
}
