//! Query, event and simulation-tick methods for `TestWorld`.

use bevy::prelude::*;

use crate::buildings::Building;
use crate::collection::{AgentAnimation, CollectRequest, Collector, MoveRequest};
use crate::config::secs_to_ticks;
use crate::ledger::ResourceLedger;
use crate::navigation::{ManualMoveInput, NavAgent};

use super::TestWorld;

impl TestWorld {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed-update ticks by directly executing the `FixedUpdate`
    /// schedule, bypassing Bevy's time system.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Run as many ticks as `secs` of simulated time.
    pub fn tick_secs(&mut self, secs: f32) {
        self.tick(secs_to_ticks(secs));
    }

    /// Tick until `done` holds or `max_ticks` have run. Returns the number of
    /// ticks run, or `None` if the condition never held.
    pub fn tick_until(
        &mut self,
        max_ticks: u32,
        mut done: impl FnMut(&mut World) -> bool,
    ) -> Option<u32> {
        for n in 0..max_ticks {
            if done(self.app.world_mut()) {
                return Some(n);
            }
            self.tick(1);
        }
        done(self.app.world_mut()).then_some(max_ticks)
    }

    /// Run one full frame (Main schedule), which applies state transitions.
    pub fn update(&mut self) {
        self.app.update();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn resource_mut<T: Resource>(&mut self) -> Mut<'_, T> {
        self.app.world_mut().resource_mut::<T>()
    }

    pub fn ledger(&self) -> &ResourceLedger {
        self.resource::<ResourceLedger>()
    }

    pub fn building(&self, entity: Entity) -> &Building {
        self.app
            .world()
            .get::<Building>(entity)
            .expect("entity should be a building")
    }

    pub fn building_mut(&mut self, entity: Entity) -> Mut<'_, Building> {
        self.app
            .world_mut()
            .get_mut::<Building>(entity)
            .expect("entity should be a building")
    }

    pub fn collector(&self, agent: Entity) -> &Collector {
        self.app
            .world()
            .get::<Collector>(agent)
            .expect("entity should have a Collector")
    }

    pub fn nav_agent(&self, agent: Entity) -> &NavAgent {
        self.app
            .world()
            .get::<NavAgent>(agent)
            .expect("entity should have a NavAgent")
    }

    pub fn animation(&self, agent: Entity) -> &AgentAnimation {
        self.app
            .world()
            .get::<AgentAnimation>(agent)
            .expect("entity should have an AgentAnimation")
    }

    pub fn transform(&self, entity: Entity) -> &Transform {
        self.app
            .world()
            .get::<Transform>(entity)
            .expect("entity should have a Transform")
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    pub fn send<E: Event>(&mut self, event: E) {
        self.app.world_mut().send_event(event);
    }

    /// Request a collection, clicking on the building's center.
    pub fn request_collect(&mut self, agent: Entity, building: Entity) {
        let click_point = self.transform(building).translation;
        self.send(CollectRequest {
            agent,
            building,
            click_point,
        });
    }

    pub fn request_move(&mut self, agent: Entity, point: Vec3) {
        self.send(MoveRequest { agent, point });
    }

    /// Holds a direct-movement direction until changed; `Vec3::ZERO` releases it.
    pub fn hold_move(&mut self, agent: Entity, direction: Vec3) {
        self.app
            .world_mut()
            .entity_mut(agent)
            .insert(ManualMoveInput { direction });
    }

    /// Removes and returns every queued event of type `E`.
    pub fn drain_events<E: Event>(&mut self) -> Vec<E> {
        self.app
            .world_mut()
            .resource_mut::<Events<E>>()
            .drain()
            .collect()
    }
}
