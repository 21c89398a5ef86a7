//! Floating "{resource}\n{stored}" labels above buildings.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::buildings::{Building, BuildingLabel};

/// Clearance between the roof and the label anchor.
const LABEL_CLEARANCE: f32 = 0.6;

pub fn building_labels_ui(
    mut contexts: EguiContexts,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    buildings: Query<(Entity, &Building, &BuildingLabel, &GlobalTransform)>,
) {
    let Ok((camera, cam_transform)) = camera_q.get_single() else {
        return;
    };
    let ctx = contexts.ctx_mut();

    for (entity, building, label, transform) in &buildings {
        let anchor =
            transform.translation() + Vec3::Y * (building.half_extents.y + LABEL_CLEARANCE);
        let Ok(screen) = camera.world_to_viewport(cam_transform, anchor) else {
            continue;
        };
        egui::Area::new(egui::Id::new(("building_label", entity)))
            .fixed_pos(egui::pos2(screen.x, screen.y))
            .pivot(egui::Align2::CENTER_BOTTOM)
            .interactable(false)
            .order(egui::Order::Background)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        for line in label.0.lines() {
                            ui.label(line);
                        }
                    });
                });
            });
    }
}
