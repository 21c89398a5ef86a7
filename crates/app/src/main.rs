use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use save::StorageConfig;
use simulation::autosave::AutosaveConfig;

/// Overrides the directory holding `save.json` and `prefs.json`.
const SAVE_DIR_ENV: &str = "HARVEST_SAVE_DIR";
/// Autosave every interval even when nothing changed.
const ALWAYS_SAVE_ENV: &str = "HARVEST_ALWAYS_SAVE";

fn env_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Harvest".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::Continuous,
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .add_plugins((
        simulation::SimulationPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
        save::SavePlugin,
    ));

    if let Some(dir) = std::env::var_os(SAVE_DIR_ENV).filter(|d| !d.is_empty()) {
        app.insert_resource(StorageConfig::in_dir(dir));
    }
    if std::env::var(ALWAYS_SAVE_ENV).is_ok_and(|v| env_flag(&v)) {
        if let Some(mut config) = app.world_mut().get_resource_mut::<AutosaveConfig>() {
            config.always_save_intervally = true;
        }
    }

    app.run();
}
