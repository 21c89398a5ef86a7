use bevy::prelude::*;

use crate::autosave::SaveDirty;
use crate::buildings::Building;
use crate::collection::{
    CollectionFinished, CollectionOutcome, CollectionState, PickupTriggered,
};
use crate::notifications::{CollectedSummaryPopup, ShowCollectedSummary};

use super::{collect_from_agent_side, is_busy, is_idle, player_and_building, run_collection};

// ===========================================================================
// Happy path
// ===========================================================================

#[test]
fn test_collect_moves_stored_amount_into_ledger() {
    let (mut world, player, building) = player_and_building(37);
    collect_from_agent_side(&mut world, player, building);

    world
        .tick_until(200, |w| w.resource::<SaveDirty>().is_dirty())
        .expect("collection should complete");

    assert_eq!(world.ledger().get_collected("Железо"), 37);
    assert_eq!(world.ledger().total_collected(), 37);
    assert_eq!(world.building(building).stored_amount(), 0);

    let collector = world.collector(player);
    assert_eq!(collector.state(), CollectionState::Idle);
    assert!(!collector.is_busy());
    assert_eq!(collector.current_target(), None);

    let finished = world.drain_events::<CollectionFinished>();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].building, building);
    assert_eq!(
        finished[0].outcome,
        CollectionOutcome::Completed { amount: 37 }
    );

    let summaries = world.drain_events::<ShowCollectedSummary>();
    assert_eq!(summaries, vec![ShowCollectedSummary { total: 37 }]);
}

#[test]
fn test_collect_from_empty_building_completes_without_ledger_entry() {
    let (mut world, player, building) = player_and_building(0);
    collect_from_agent_side(&mut world, player, building);

    world
        .tick_until(200, |w| w.resource::<SaveDirty>().is_dirty())
        .expect("collection should complete even when empty");

    assert!(world.ledger().is_empty(), "nothing should be recorded");
    let finished = world.drain_events::<CollectionFinished>();
    assert_eq!(finished[0].outcome, CollectionOutcome::Completed { amount: 0 });
    // The summary popup still opens with the unchanged total.
    assert_eq!(
        world.drain_events::<ShowCollectedSummary>(),
        vec![ShowCollectedSummary { total: 0 }]
    );
}

#[test]
fn test_collecting_twice_accumulates() {
    let (mut world, player, building) = player_and_building(10);
    run_collection(&mut world, player, building);

    world.building_mut(building).set_stored_amount(15);
    run_collection(&mut world, player, building);

    assert_eq!(world.ledger().get_collected("Железо"), 25);
}

#[test]
fn test_pickup_lasts_configured_duration() {
    let (mut world, player, building) = player_and_building(5);
    collect_from_agent_side(&mut world, player, building);

    world
        .tick_until(200, is_busy(player))
        .expect("agent should reach the pickup phase");
    assert_eq!(world.collector(player).state(), CollectionState::Collecting);
    assert_eq!(world.drain_events::<PickupTriggered>().len(), 1);
    assert_eq!(world.animation(player).pickup_triggers, 1);

    // 1.0 s at 20 Hz.
    let ticks = world.tick_until(100, |w| {
        !w.get::<crate::collection::Collector>(player)
            .is_some_and(|c| c.is_busy())
    });
    assert_eq!(ticks, Some(20));
    assert_eq!(world.ledger().get_collected("Железо"), 5);
}

#[test]
fn test_agent_ends_facing_the_building() {
    let (mut world, player, building) = player_and_building(1);
    collect_from_agent_side(&mut world, player, building);
    world.tick_until(200, is_busy(player)).unwrap();

    let agent = *world.transform(player);
    let mut to_building = world.transform(building).translation - agent.translation;
    to_building.y = 0.0;
    let alignment = agent.forward().dot(to_building.normalize());
    assert!(
        alignment > 0.99,
        "agent should face the building, alignment {alignment}"
    );
}

#[test]
fn test_agent_stops_at_approach_point() {
    let (mut world, player, building) = player_and_building(1);
    collect_from_agent_side(&mut world, player, building);
    world.tick_until(200, is_busy(player)).unwrap();

    let b = world.building(building).clone();
    let expected = b.approach_point(world.transform(building), Vec3::ZERO, 1.2);
    let pos = world.transform(player).translation;
    let dist = Vec2::new(pos.x - expected.x, pos.z - expected.z).length();
    assert!(dist <= 0.06, "agent should stop at the approach point, off by {dist}");
}

// ===========================================================================
// Request merging
// ===========================================================================

#[test]
fn test_same_building_request_only_refreshes_destination() {
    let (mut world, player, building) = player_and_building(8);
    collect_from_agent_side(&mut world, player, building);
    world.tick(2);
    let first_dest = world.collector(player).task().unwrap().destination;

    // Click the far side of the same building.
    world.send(crate::collection::CollectRequest {
        agent: player,
        building,
        click_point: Vec3::new(5.0, 0.0, 10.0),
    });
    world.tick(1);

    let task = world.collector(player).task().expect("task should survive");
    assert_eq!(task.target, building);
    assert_ne!(task.destination, first_dest, "destination should be refreshed");
    assert!(
        world.drain_events::<CollectionFinished>().is_empty(),
        "refreshing must not cancel"
    );

    world.tick_until(400, is_idle(player)).expect("should finish");
    assert_eq!(world.ledger().get_collected("Железо"), 8);
}

#[test]
fn test_different_building_replaces_task() {
    let (mut world, player, first) = player_and_building(4);
    let second = world.spawn_building(
        Building::new("sawmill", "Дерево")
            .with_production(3, super::IDLE_PRODUCTION_SECS)
            .with_stored(9),
        Vec3::new(-5.0, 1.0, 0.0),
    );

    collect_from_agent_side(&mut world, player, first);
    world.tick(3);
    collect_from_agent_side(&mut world, player, second);
    world.tick(1);

    let finished = world.drain_events::<CollectionFinished>();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].building, first);
    assert_eq!(
        finished[0].outcome,
        CollectionOutcome::Cancelled(crate::collection::CancelReason::Superseded)
    );
    assert_eq!(world.collector(player).current_target(), Some(second));

    world.tick_until(400, is_idle(player)).expect("should finish");
    assert_eq!(world.ledger().get_collected("Дерево"), 9);
    assert_eq!(world.ledger().get_collected("Железо"), 0);
    assert_eq!(world.building(first).stored_amount(), 4);
}

// ===========================================================================
// Animation and popup
// ===========================================================================

#[test]
fn test_moving_flag_tracks_navigation() {
    let (mut world, player, building) = player_and_building(2);
    collect_from_agent_side(&mut world, player, building);
    world.tick(3);
    assert!(world.animation(player).moving, "should be walking");

    world.tick_until(200, is_busy(player)).unwrap();
    assert!(!world.animation(player).moving, "no walking while collecting");
}

#[test]
fn test_completion_opens_summary_popup() {
    let (mut world, player, building) = player_and_building(6);
    run_collection(&mut world, player, building);

    let popup = world.resource::<CollectedSummaryPopup>();
    assert!(popup.is_visible());
    assert_eq!(popup.total, 6);
    assert!(popup.text.contains("• Железо: 6"), "got {}", popup.text);
    assert!(popup.text.contains("Произведено (в зданиях):"));
}
