//! Entity spawning helpers for integration tests.

use bevy::prelude::*;

use crate::buildings::Building;
use crate::world_init::{building_components, player_components};

use super::TestWorld;

impl TestWorld {
    /// Spawn a production building centered at `position`.
    pub fn spawn_building(&mut self, building: Building, position: Vec3) -> Entity {
        self.app
            .world_mut()
            .spawn(building_components(building, position))
            .id()
    }

    /// Spawn a player agent standing at `position`.
    pub fn spawn_player(&mut self, position: Vec3) -> Entity {
        self.app
            .world_mut()
            .spawn(player_components(position))
            .id()
    }

    pub fn despawn(&mut self, entity: Entity) {
        self.app.world_mut().despawn(entity);
    }
}
