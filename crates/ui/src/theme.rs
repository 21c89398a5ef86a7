use bevy_egui::{egui, EguiContexts};

pub fn apply_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    // Earthy dark panels, amber accents
    let panel = egui::Color32::from_rgba_unmultiplied(30, 28, 24, 235);
    let inactive = egui::Color32::from_rgb(58, 52, 44);
    let hover = egui::Color32::from_rgb(88, 76, 58);
    let accent = egui::Color32::from_rgb(222, 170, 72);

    style.visuals.widgets.noninteractive.bg_fill = panel;
    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.hovered.bg_fill = hover;
    style.visuals.widgets.active.bg_fill = accent;
    style.visuals.widgets.noninteractive.fg_stroke =
        egui::Stroke::new(1.0, egui::Color32::from_rgb(236, 228, 210));

    style.visuals.window_fill = panel;
    style.visuals.panel_fill = panel;
    style.visuals.selection.bg_fill = accent;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, accent);

    style.visuals.window_corner_radius = egui::CornerRadius::same(8);
    style.visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(6);

    style.spacing.item_spacing = egui::vec2(6.0, 4.0);

    ctx.set_style(style);
}
