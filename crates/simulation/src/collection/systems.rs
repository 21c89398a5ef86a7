use bevy::prelude::*;

use crate::autosave::SaveDirty;
use crate::buildings::Building;
use crate::config::{secs_to_ticks, TICK_SECS};
use crate::ledger::ResourceLedger;
use crate::navigation::{NavAgent, PathStatus};
use crate::notifications::ShowCollectedSummary;

use super::types::{
    AgentAnimation, CancelCollectionRequest, CancelReason, CollectRequest, CollectionFinished,
    CollectionOutcome, CollectionPhase, CollectionTask, Collector, CollectorConfig, MoveRequest,
    PickupTriggered, MIN_ARRIVAL_DISTANCE, MIN_FACING_SQ,
};

/// Animation counts as moving only this far beyond the stopping distance.
const MOVING_MARGIN: f32 = 0.05;

/// Rotation that points an agent's forward (-Z) along the horizontal `dir`.
pub fn facing_rotation(dir: Vec3) -> Quat {
    Quat::from_rotation_y(f32::atan2(-dir.x, -dir.z))
}

fn report_cancel(
    finished: &mut EventWriter<CollectionFinished>,
    agent: Entity,
    building: Option<Entity>,
    reason: CancelReason,
) {
    if let Some(building) = building {
        debug!("Collection by {agent:?} at {building:?} cancelled: {reason:?}");
        finished.send(CollectionFinished {
            agent,
            building,
            outcome: CollectionOutcome::Cancelled(reason),
        });
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Applies cancel, move and collect requests, in that order.
///
/// Cancels are always honoured. Move and collect requests are dropped while
/// the agent is busy with a pickup. A collect request for the building that is
/// already targeted only refreshes the destination; any other building
/// replaces the current task.
#[allow(clippy::too_many_arguments)]
pub fn handle_collection_requests(
    config: Res<CollectorConfig>,
    mut cancels: EventReader<CancelCollectionRequest>,
    mut moves: EventReader<MoveRequest>,
    mut collects: EventReader<CollectRequest>,
    mut agents: Query<(&mut Collector, &mut NavAgent)>,
    buildings: Query<(&Building, &Transform)>,
    mut finished: EventWriter<CollectionFinished>,
) {
    for req in cancels.read() {
        let Ok((mut collector, _)) = agents.get_mut(req.agent) else {
            continue;
        };
        let dropped = collector.cancel();
        report_cancel(&mut finished, req.agent, dropped, CancelReason::Requested);
    }

    for req in moves.read() {
        let Ok((mut collector, mut nav)) = agents.get_mut(req.agent) else {
            continue;
        };
        if collector.is_busy() {
            debug!("Ignoring move request for {:?} while collecting", req.agent);
            continue;
        }
        let dropped = collector.cancel();
        report_cancel(&mut finished, req.agent, dropped, CancelReason::Superseded);
        nav.stopping_distance = config.move_stopping_distance;
        nav.set_destination(req.point);
    }

    for req in collects.read() {
        let Ok((mut collector, mut nav)) = agents.get_mut(req.agent) else {
            continue;
        };
        if collector.is_busy() {
            debug!("Ignoring collect request for {:?} while collecting", req.agent);
            continue;
        }
        let Ok((building, building_transform)) = buildings.get(req.building) else {
            debug!("Ignoring collect request for missing building {:?}", req.building);
            continue;
        };
        let destination =
            building.approach_point(building_transform, req.click_point, config.approach_distance);

        if collector.current_target == Some(req.building) {
            if let Some(task) = collector.task.as_mut() {
                if task.phase == CollectionPhase::PathingToTarget {
                    task.destination = destination;
                    nav.set_destination(destination);
                }
            }
            continue;
        }

        let dropped = collector.cancel();
        report_cancel(&mut finished, req.agent, dropped, CancelReason::Superseded);

        collector.current_target = Some(req.building);
        collector.task = Some(CollectionTask {
            target: req.building,
            destination,
            phase: CollectionPhase::PathingToTarget,
        });
        nav.stopping_distance = config.collect_stopping_distance;
        nav.set_destination(destination);
    }
}

// =============================================================================
// Task advancement
// =============================================================================

/// Advances every agent's collection task by one fixed tick.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn advance_collection_tasks(
    config: Res<CollectorConfig>,
    mut agents: Query<(
        Entity,
        &mut Collector,
        &mut NavAgent,
        &mut Transform,
        Option<&mut AgentAnimation>,
    )>,
    mut buildings: Query<(&mut Building, &Transform), Without<Collector>>,
    mut ledger: ResMut<ResourceLedger>,
    mut dirty: ResMut<SaveDirty>,
    mut finished: EventWriter<CollectionFinished>,
    mut pickups: EventWriter<PickupTriggered>,
    mut summaries: EventWriter<ShowCollectedSummary>,
) {
    let pickup_ticks = secs_to_ticks(config.pickup_duration_secs);

    for (agent, mut collector, mut nav, mut transform, mut animation) in &mut agents {
        let Some(task) = collector.task.clone() else {
            continue;
        };

        let Ok((_, building_transform)) = buildings.get(task.target) else {
            let dropped = collector.cancel();
            report_cancel(&mut finished, agent, dropped, CancelReason::TargetLost);
            continue;
        };
        let building_pos = building_transform.translation;

        let mut begin_pickup = false;
        match task.phase {
            CollectionPhase::PathingToTarget => {
                if nav.path_pending() {
                    continue;
                }
                if nav.path_status() == PathStatus::Invalid {
                    let dropped = collector.cancel();
                    report_cancel(&mut finished, agent, dropped, CancelReason::PathInvalid);
                    continue;
                }
                if nav.remaining_distance() > MIN_ARRIVAL_DISTANCE.max(nav.stopping_distance) {
                    continue;
                }

                nav.reset_path();
                let mut look = building_pos - transform.translation;
                look.y = 0.0;
                if look.length_squared() > MIN_FACING_SQ {
                    set_phase(
                        &mut collector,
                        CollectionPhase::TurningToFace {
                            from: transform.rotation,
                            to: facing_rotation(look),
                            progress: 0.0,
                        },
                    );
                } else {
                    begin_pickup = true;
                }
            }
            CollectionPhase::TurningToFace { from, to, progress } => {
                let progress = progress + TICK_SECS * config.rotation_speed;
                if progress >= config.facing_duration_secs {
                    transform.rotation = to;
                    begin_pickup = true;
                } else {
                    transform.rotation = from.slerp(to, progress / config.facing_duration_secs);
                    set_phase(
                        &mut collector,
                        CollectionPhase::TurningToFace { from, to, progress },
                    );
                }
            }
            CollectionPhase::Collecting { elapsed_ticks } => {
                let elapsed_ticks = elapsed_ticks + 1;
                if elapsed_ticks < pickup_ticks {
                    set_phase(&mut collector, CollectionPhase::Collecting { elapsed_ticks });
                    continue;
                }

                let Ok((mut building, _)) = buildings.get_mut(task.target) else {
                    continue;
                };
                let taken = building.collect_all();
                if taken > 0 {
                    ledger.add_collected(&building.resource_name, taken);
                }
                summaries.send(ShowCollectedSummary {
                    total: ledger.total_collected(),
                });
                dirty.mark();

                collector.cancel();
                info!(
                    "Collected {taken} {} (total {})",
                    building.resource_name,
                    ledger.total_collected()
                );
                finished.send(CollectionFinished {
                    agent,
                    building: task.target,
                    outcome: CollectionOutcome::Completed { amount: taken },
                });
            }
        }

        if begin_pickup {
            collector.busy = true;
            set_phase(
                &mut collector,
                CollectionPhase::Collecting { elapsed_ticks: 0 },
            );
            if let Some(animation) = animation.as_mut() {
                animation.moving = false;
                animation.pickup_triggers += 1;
            }
            pickups.send(PickupTriggered {
                agent,
                building: task.target,
            });
        }
    }
}

fn set_phase(collector: &mut Collector, phase: CollectionPhase) {
    if let Some(task) = collector.task.as_mut() {
        task.phase = phase;
    }
}

/// Recomputes the `moving` animation flag from navigation state.
pub fn update_agent_animation(
    mut agents: Query<(&NavAgent, Option<&Collector>, &mut AgentAnimation)>,
) {
    for (nav, collector, mut animation) in &mut agents {
        let busy = collector.is_some_and(Collector::is_busy);
        let moving = !nav.path_pending()
            && nav.remaining_distance() > nav.stopping_distance + MOVING_MARGIN
            && !busy;
        if animation.moving != moving {
            animation.moving = moving;
        }
    }
}
