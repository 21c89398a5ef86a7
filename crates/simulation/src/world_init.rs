// =============================================================================
// World setup: the demo production buildings and the player agent.
// =============================================================================

use bevy::prelude::*;

use crate::buildings::{Building, BuildingLabel, ProductionTimer};
use crate::collection::{AgentAnimation, Collector, Player};
use crate::navigation::{ManualMoveInput, NavAgent};

/// Marker resource that, when present, causes `init_world` to skip spawning
/// the demo layout. Used by the test harness to start from an empty world.
#[derive(Resource)]
pub struct SkipWorldInit;

/// Components every production building is spawned with.
pub fn building_components(
    building: Building,
    position: Vec3,
) -> (Building, ProductionTimer, BuildingLabel, Transform, Name) {
    let name = Name::new(if building.id.is_empty() {
        format!("{} building", building.resource_name)
    } else {
        building.id.clone()
    });
    let label = BuildingLabel(building.label_text());
    (
        building,
        ProductionTimer::default(),
        label,
        Transform::from_translation(position),
        name,
    )
}

/// Components for the player-controlled agent.
pub fn player_components(
    position: Vec3,
) -> (
    Player,
    Collector,
    NavAgent,
    ManualMoveInput,
    AgentAnimation,
    Transform,
    Name,
) {
    (
        Player,
        Collector::default(),
        NavAgent::default(),
        ManualMoveInput::default(),
        AgentAnimation::default(),
        Transform::from_translation(position),
        Name::new("Player"),
    )
}

pub fn init_world(mut commands: Commands, skip: Option<Res<SkipWorldInit>>) {
    if skip.is_some() {
        return;
    }

    let layout = [
        ("iron_mine", "Железо", Vec3::new(-6.0, 1.0, -5.0), 100, 5, 2.0),
        ("sawmill", "Дерево", Vec3::new(6.0, 1.0, -4.0), 80, 3, 1.5),
        ("quarry", "Камень", Vec3::new(0.0, 1.0, 7.0), 120, 8, 4.0),
    ];
    for (id, resource, position, capacity, amount, interval) in layout {
        let building = Building::new(id, resource)
            .with_capacity(capacity)
            .with_production(amount, interval);
        commands.spawn(building_components(building, position));
    }

    commands.spawn(player_components(Vec3::ZERO));
    info!("World initialised with {} buildings", layout.len());
}
