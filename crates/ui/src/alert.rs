//! Modal dialog for [`Alert`] messages (invalid input, failed plot).

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::plot::Alert;

/// Message waiting to be acknowledged. A newer alert replaces an older one.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct ActiveAlert(pub Option<String>);

pub fn collect_alerts(mut alerts: EventReader<Alert>, mut active: ResMut<ActiveAlert>) {
    if let Some(alert) = alerts.read().last() {
        active.0 = Some(alert.0.clone());
    }
}

pub fn alert_dialog_ui(mut contexts: EguiContexts, mut active: ResMut<ActiveAlert>) {
    let Some(message) = active.0.clone() else {
        return;
    };

    let ctx = contexts.ctx_mut();

    let screen_rect = ctx.screen_rect();
    egui::Area::new(egui::Id::new("alert_backdrop"))
        .fixed_pos(screen_rect.min)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.painter().rect_filled(
                screen_rect,
                egui::CornerRadius::ZERO,
                egui::Color32::from_black_alpha(120),
            );
            ui.allocate_rect(screen_rect, egui::Sense::click());
        });

    let mut dismissed = false;
    egui::Window::new("alert_dialog")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .default_width(320.0)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.label(message);
                ui.add_space(12.0);
                if ui
                    .add_sized(egui::vec2(120.0, 32.0), egui::Button::new("OK"))
                    .clicked()
                {
                    dismissed = true;
                }
                ui.add_space(12.0);
            });
        });

    if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        active.0 = None;
    }
}
