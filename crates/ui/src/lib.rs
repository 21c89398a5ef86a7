use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use simulation::SimulationUpdateSet;

pub mod building_labels;
pub mod hud;
pub mod keybinds;
pub mod summary_popup;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Startup, theme::apply_theme)
            .add_systems(
                Update,
                keybinds::game_keybinds.in_set(SimulationUpdateSet::Input),
            )
            .add_systems(
                Update,
                (
                    summary_popup::tick_summary_popup,
                    building_labels::building_labels_ui,
                    hud::hud_ui,
                    summary_popup::summary_popup_ui,
                )
                    .chain()
                    .in_set(SimulationUpdateSet::Visual),
            );
    }
}
