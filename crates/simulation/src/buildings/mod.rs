mod plugin;
mod production;
#[cfg(test)]
mod tests;
pub mod types;

pub use plugin::BuildingsPlugin;
pub use production::{refresh_building_labels, tick_production};
pub use types::{building_save_id, Building, BuildingLabel, ProductionTimer};
