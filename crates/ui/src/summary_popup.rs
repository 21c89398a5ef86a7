use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::notifications::CollectedSummaryPopup;

pub fn tick_summary_popup(time: Res<Time>, mut popup: ResMut<CollectedSummaryPopup>) {
    if popup.is_visible() {
        popup.tick(time.delta_secs());
    }
}

pub fn summary_popup_ui(mut contexts: EguiContexts, popup: Res<CollectedSummaryPopup>) {
    if !popup.is_visible() {
        return;
    }
    egui::Window::new("Сбор завершён")
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 40.0))
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading(format!("Всего собрано: {}", popup.total));
            ui.separator();
            ui.label(&popup.text);
        });
}
