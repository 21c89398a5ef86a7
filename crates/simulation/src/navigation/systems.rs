use bevy::prelude::*;

use crate::buildings::Building;
use crate::collection::Collector;
use crate::config::TICK_SECS;

use super::agent::{ManualMoveInput, NavAgent};
use super::grid::NavGrid;

/// Re-marks nav obstacles whenever a building is added or removed.
pub fn rebuild_nav_grid(
    mut grid: ResMut<NavGrid>,
    added: Query<(), Added<Building>>,
    mut removed: RemovedComponents<Building>,
    buildings: Query<(&Transform, &Building)>,
) {
    let any_removed = removed.read().count() > 0;
    if added.is_empty() && !any_removed {
        return;
    }
    grid.rebuild(
        buildings
            .iter()
            .map(|(transform, building)| (transform.translation, building.half_extents)),
    );
}

/// Plans every pending path request against the current grid.
pub fn plan_pending_paths(grid: Res<NavGrid>, mut agents: Query<(&Transform, &mut NavAgent)>) {
    for (transform, mut agent) in &mut agents {
        if !agent.path_pending() {
            continue;
        }
        let plan = agent
            .destination()
            .and_then(|dest| grid.find_path(transform.translation, dest));
        if plan.is_none() {
            debug!(
                "No path from {:?} to {:?}",
                transform.translation,
                agent.destination()
            );
        }
        agent.apply_plan(transform.translation, plan);
    }
}

/// Moves agents one tick along their planned paths.
pub fn follow_paths(mut agents: Query<(&mut Transform, &mut NavAgent)>) {
    for (mut transform, mut agent) in &mut agents {
        if !agent.has_path() {
            continue;
        }
        let step = agent.speed * TICK_SECS;
        let mut position = transform.translation;
        agent.advance(&mut position, step);
        if position != transform.translation {
            transform.translation = position;
        }
    }
}

/// Moves agents straight along their held [`ManualMoveInput`] without path
/// planning. Any active path is left in place. Steps that would end in a
/// blocked or out-of-bounds cell are dropped, and busy collectors stay put.
pub fn apply_manual_move(
    grid: Res<NavGrid>,
    mut agents: Query<(
        &ManualMoveInput,
        &NavAgent,
        &mut Transform,
        Option<&Collector>,
    )>,
) {
    for (input, agent, mut transform, collector) in &mut agents {
        let Some(direction) = input.planar_direction() else {
            continue;
        };
        if collector.is_some_and(Collector::is_busy) {
            continue;
        }
        let next = transform.translation + direction * agent.speed * TICK_SECS;
        let walkable = grid
            .world_to_cell(next)
            .is_some_and(|cell| !grid.is_blocked(cell));
        if walkable {
            transform.translation = next;
        }
    }
}
