//! Top-left HUD: collected totals, agent activity and controls.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::collection::{AgentAnimation, CollectionState, Collector, Player};
use simulation::ledger::ResourceLedger;

pub fn activity_text(state: CollectionState, moving: bool) -> &'static str {
    match state {
        CollectionState::Idle if moving => "Идёт",
        CollectionState::Idle => "Ожидает",
        CollectionState::PathingToTarget => "Идёт к зданию",
        CollectionState::TurningToFace => "Поворачивается",
        CollectionState::Collecting => "Собирает",
    }
}

pub fn hud_ui(
    mut contexts: EguiContexts,
    ledger: Res<ResourceLedger>,
    players: Query<(&Collector, &AgentAnimation), With<Player>>,
) {
    egui::Window::new("Склад")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .resizable(false)
        .collapsible(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading(format!("Всего: {}", ledger.total_collected()));
            if ledger.is_empty() {
                ui.weak("Пока ничего не собрано");
            }
            for (name, amount) in ledger.sorted_entries() {
                ui.label(format!("{name}: {amount}"));
            }

            if let Ok((collector, animation)) = players.get_single() {
                ui.separator();
                ui.label(activity_text(collector.state(), animation.moving));
            }

            ui.separator();
            ui.small("ЛКМ по зданию: собрать, по земле: идти");
            ui.small("Esc: отмена  F5: сохранить  F9: загрузить");
        });
}
