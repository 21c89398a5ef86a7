/// Fixed simulation rate. Every timer in the simulation counts whole ticks.
pub const TICK_HZ: f64 = 20.0;
pub const TICK_SECS: f32 = 1.0 / TICK_HZ as f32;

/// Half the side length of the square play area, centered on the origin.
pub const WORLD_HALF_EXTENT: f32 = 20.0;

/// Navigation grid resolution in world units.
pub const NAV_CELL_SIZE: f32 = 0.5;

/// Clearance added around building footprints when marking nav obstacles.
pub const NAV_AGENT_RADIUS: f32 = 0.3;

pub const DEFAULT_RESOURCE_NAME: &str = "Железо";
pub const DEFAULT_BUILDING_APPROACH_DISTANCE: f32 = 1.5;
pub const DEFAULT_STORAGE_CAPACITY: u32 = 100;
pub const DEFAULT_PRODUCE_INTERVAL_SECS: f32 = 2.0;
pub const DEFAULT_PRODUCE_AMOUNT: u32 = 5;

/// Converts a duration in seconds to a whole number of fixed ticks (at least one).
pub fn secs_to_ticks(secs: f32) -> u32 {
    let ticks = (secs.max(0.0) * TICK_HZ as f32).round() as u32;
    ticks.max(1)
}
