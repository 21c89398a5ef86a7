#[cfg(not(target_arch = "wasm32"))]
mod atomic_write;
mod autosave_bridge;
mod exclusive_load;
mod exclusive_save;
mod save_error;
mod save_plugin;
mod save_types;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use exclusive_load::{apply_record, load_world};
pub use exclusive_save::{capture_record, save_world};
pub use save_error::SaveError;
pub use save_plugin::{LoadGameEvent, SaveGameEvent, SavePlugin};
pub use save_types::SaveRecord;
pub use storage::{StorageBackend, StorageConfig};
