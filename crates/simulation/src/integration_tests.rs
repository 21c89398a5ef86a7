//! Integration tests using the `TestWorld` harness.
//!
//! These tests spin up a headless Bevy App with `SimulationPlugin` and drive
//! `FixedUpdate` directly, so every timer is measured in whole ticks.

mod collection_tests;
mod simulation_phases;

use bevy::prelude::*;

use crate::buildings::Building;
use crate::collection::{CollectRequest, Collector};
use crate::test_harness::TestWorld;

/// Production slow enough that it never fires during a test.
const IDLE_PRODUCTION_SECS: f32 = 1000.0;

/// Player at the origin and one iron building centered 5 units along +X.
fn player_and_building(stored: u32) -> (TestWorld, Entity, Entity) {
    let mut world = TestWorld::new();
    let player = world.spawn_player(Vec3::ZERO);
    let building = world.spawn_building(
        Building::new("mine", "Железо")
            .with_production(5, IDLE_PRODUCTION_SECS)
            .with_stored(stored),
        Vec3::new(5.0, 1.0, 0.0),
    );
    (world, player, building)
}

/// Collect request with the click on the side of the building facing `agent`.
fn collect_from_agent_side(world: &mut TestWorld, agent: Entity, building: Entity) {
    let click_point = world.transform(agent).translation;
    world.send(CollectRequest {
        agent,
        building,
        click_point,
    });
}

fn is_busy(agent: Entity) -> impl FnMut(&mut World) -> bool {
    move |w: &mut World| w.get::<Collector>(agent).is_some_and(Collector::is_busy)
}

fn is_idle(agent: Entity) -> impl FnMut(&mut World) -> bool {
    move |w: &mut World| w.get::<Collector>(agent).is_some_and(|c| c.task().is_none())
}

/// Sends a collect request and ticks until the task has ended.
fn run_collection(world: &mut TestWorld, agent: Entity, building: Entity) {
    collect_from_agent_side(world, agent, building);
    world.tick(1);
    world
        .tick_until(400, is_idle(agent))
        .expect("collection task should end");
}
