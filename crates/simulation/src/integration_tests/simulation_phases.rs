use bevy::prelude::*;

use crate::buildings::Building;
use crate::test_harness::TestWorld;
use crate::{SaveLoadState, TickCounter};

#[test]
fn test_tick_counter_advances_once_per_tick() {
    let mut world = TestWorld::new();
    let start = world.resource::<TickCounter>().0;
    world.tick(25);
    assert_eq!(world.resource::<TickCounter>().0, start + 25);
}

#[test]
fn test_simulation_paused_outside_idle_state() {
    let mut world = TestWorld::new();
    let b = world.spawn_building(Building::default().with_production(5, 0.5), Vec3::ZERO);

    world
        .resource_mut::<NextState<SaveLoadState>>()
        .set(SaveLoadState::Saving);
    world.update();
    assert_eq!(
        *world.resource::<State<SaveLoadState>>().get(),
        SaveLoadState::Saving
    );

    let ticks_before = world.resource::<TickCounter>().0;
    world.tick(40);
    assert_eq!(world.building(b).stored_amount(), 0);
    assert_eq!(world.resource::<TickCounter>().0, ticks_before);

    world
        .resource_mut::<NextState<SaveLoadState>>()
        .set(SaveLoadState::Idle);
    world.update();
    world.tick(10);
    assert_eq!(world.building(b).stored_amount(), 5);
}
