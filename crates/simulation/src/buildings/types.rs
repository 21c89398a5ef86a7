use std::sync::Once;

use bevy::prelude::*;

use crate::config::{
    DEFAULT_BUILDING_APPROACH_DISTANCE, DEFAULT_PRODUCE_AMOUNT, DEFAULT_PRODUCE_INTERVAL_SECS,
    DEFAULT_RESOURCE_NAME, DEFAULT_STORAGE_CAPACITY,
};

/// Below this squared length a direction is treated as zero.
const DIRECTION_EPSILON_SQ: f32 = 0.0001;

/// A production building: passively produces one resource and stores it until
/// the player collects everything at once.
#[derive(Component, Debug, Clone)]
pub struct Building {
    /// Explicit save id. May be empty, see [`building_save_id`].
    pub id: String,
    pub resource_name: String,
    stored_amount: u32,
    pub storage_capacity: u32,
    pub produce_amount_per_tick: u32,
    /// Seconds between production ticks.
    pub produce_interval_secs: f32,
    /// Nominal stand-off distance for visitors.
    pub approach_distance: f32,
    /// Collider half extents, used for the approach offset and nav obstacles.
    pub half_extents: Vec3,
}

impl Default for Building {
    fn default() -> Self {
        Self {
            id: String::new(),
            resource_name: DEFAULT_RESOURCE_NAME.to_string(),
            stored_amount: 0,
            storage_capacity: DEFAULT_STORAGE_CAPACITY,
            produce_amount_per_tick: DEFAULT_PRODUCE_AMOUNT,
            produce_interval_secs: DEFAULT_PRODUCE_INTERVAL_SECS,
            approach_distance: DEFAULT_BUILDING_APPROACH_DISTANCE,
            half_extents: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Building {
    pub fn new(id: impl Into<String>, resource_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_name: resource_name.into(),
            ..Default::default()
        }
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.storage_capacity = capacity;
        self.stored_amount = self.stored_amount.min(capacity);
        self
    }

    pub fn with_production(mut self, amount_per_tick: u32, interval_secs: f32) -> Self {
        self.produce_amount_per_tick = amount_per_tick;
        self.produce_interval_secs = interval_secs;
        self
    }

    pub fn with_stored(mut self, amount: u32) -> Self {
        self.set_stored_amount(amount);
        self
    }

    pub fn with_half_extents(mut self, half_extents: Vec3) -> Self {
        self.half_extents = half_extents;
        self
    }

    pub fn stored_amount(&self) -> u32 {
        self.stored_amount
    }

    /// Clamps into `[0, storage_capacity]`.
    pub fn set_stored_amount(&mut self, amount: u32) {
        self.stored_amount = amount.min(self.storage_capacity);
    }

    /// One production step: add the per-tick amount, saturating at capacity.
    pub fn produce(&mut self) {
        self.stored_amount = self
            .stored_amount
            .saturating_add(self.produce_amount_per_tick)
            .min(self.storage_capacity);
    }

    /// Takes everything currently stored, leaving the building empty.
    pub fn collect_all(&mut self) -> u32 {
        std::mem::take(&mut self.stored_amount)
    }

    /// Point in front of the building, on the side facing `click_point`, where a
    /// visitor should stop. Falls back to the building's forward direction when
    /// the click is at the center, and to `-Z` when that is vertical.
    pub fn approach_point(&self, transform: &Transform, click_point: Vec3, distance: f32) -> Vec3 {
        let center = transform.translation;
        let mut dir = click_point - center;
        dir.y = 0.0;
        if dir.length_squared() < DIRECTION_EPSILON_SQ {
            dir = *transform.forward();
            dir.y = 0.0;
            if dir.length_squared() < DIRECTION_EPSILON_SQ {
                dir = Vec3::NEG_Z;
            }
        }
        let dir = dir.normalize();

        let offset = distance + self.half_extents.length();
        let mut point = center + dir * offset;
        point.y = center.y;
        point
    }

    /// Text shown above the building in the world.
    pub fn label_text(&self) -> String {
        format!("{}\n{}", self.resource_name, self.stored_amount)
    }
}

/// Counts fixed ticks since the building last produced.
#[derive(Component, Debug, Clone, Default)]
pub struct ProductionTimer {
    pub elapsed_ticks: u32,
}

/// World-space label kept in sync with the building's stored amount.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildingLabel(pub String);

/// Stable identifier used to persist a building's stored amount.
///
/// Explicit id first, then the entity `Name`, then `building_{index}`. The
/// index fallback is not stable across sessions and is warned about once.
pub fn building_save_id(entity: Entity, building: &Building, name: Option<&Name>) -> String {
    if !building.id.is_empty() {
        return building.id.clone();
    }
    match name {
        Some(name) if !name.as_str().is_empty() => name.as_str().to_string(),
        _ => {
            static INDEX_FALLBACK_WARNED: Once = Once::new();
            INDEX_FALLBACK_WARNED.call_once(|| {
                warn!(
                    "Building {entity} has no id or name; its saved amount is keyed by entity index"
                );
            });
            format!("building_{}", entity.index())
        }
    }
}
