use bevy_egui::{egui, EguiContexts};

pub const FONT_HEADING: f32 = 18.0;
pub const FONT_BODY: f32 = 12.0;

pub const TEXT_HEADING: egui::Color32 = egui::Color32::from_rgb(235, 235, 240);
pub const TEXT_LABEL: egui::Color32 = egui::Color32::from_rgb(170, 175, 185);
pub const TEXT_VALUE: egui::Color32 = egui::Color32::WHITE;
pub const LINK: egui::Color32 = egui::Color32::from_rgb(32, 156, 238);

pub fn apply_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    let panel = egui::Color32::from_rgb(30, 32, 40);
    let inactive = egui::Color32::from_rgb(50, 55, 65);
    let hover = egui::Color32::from_rgb(70, 80, 100);
    let active = egui::Color32::from_rgb(32, 156, 238);

    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.hovered.bg_fill = hover;
    style.visuals.widgets.active.bg_fill = active;
    style.visuals.widgets.inactive.weak_bg_fill = inactive;
    style.visuals.widgets.hovered.weak_bg_fill = hover;
    style.visuals.widgets.active.weak_bg_fill = active;

    style.visuals.window_fill = panel;
    style.visuals.panel_fill = panel;
    style.visuals.hyperlink_color = LINK;
    style.visuals.selection.bg_fill = active;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, active);

    let rounding = egui::CornerRadius::same(6);
    style.visuals.window_corner_radius = rounding;
    style.visuals.widgets.inactive.corner_radius = rounding;
    style.visuals.widgets.hovered.corner_radius = rounding;
    style.visuals.widgets.active.corner_radius = rounding;

    ctx.set_style(style);
}
