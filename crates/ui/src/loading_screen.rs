//! Loading overlay shown while a repository fetch is in flight.
//!
//! The city is hidden during the fetch; an animated dots effect shows the
//! viewer has not frozen.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::plot::PlotStatus;

use crate::theme;

const LOADING_LABEL: &str = "Fetching repository";

/// Animated dots state for the loading message.
#[derive(Resource)]
pub struct LoadingAnimation {
    /// Number of dots currently shown (cycles 1 -> 2 -> 3 -> 1 ...).
    pub dots: usize,
    pub timer: Timer,
}

impl Default for LoadingAnimation {
    fn default() -> Self {
        Self {
            dots: 1,
            timer: Timer::from_seconds(0.4, TimerMode::Repeating),
        }
    }
}

impl LoadingAnimation {
    pub fn reset(&mut self) {
        self.dots = 1;
        self.timer.reset();
    }

    pub fn advance(&mut self, delta: std::time::Duration) {
        self.timer.tick(delta);
        if self.timer.just_finished() {
            self.dots = self.dots % 3 + 1;
        }
    }

    pub fn text(&self) -> String {
        format!("{LOADING_LABEL}{}", ".".repeat(self.dots))
    }
}

pub fn loading_screen_ui(
    mut contexts: EguiContexts,
    status: Res<PlotStatus>,
    time: Res<Time>,
    mut animation: ResMut<LoadingAnimation>,
) {
    if !status.loading {
        animation.reset();
        return;
    }
    animation.advance(time.delta());

    let ctx = contexts.ctx_mut();
    let screen_rect = ctx.screen_rect();

    egui::Area::new(egui::Id::new("loading_overlay"))
        .fixed_pos(screen_rect.min)
        .order(egui::Order::Background)
        .interactable(false)
        .show(ctx, |ui| {
            ui.painter().rect_filled(
                screen_rect,
                egui::CornerRadius::ZERO,
                egui::Color32::from_black_alpha(140),
            );
        });

    egui::Window::new("loading_screen_window")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .default_width(260.0)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.label(
                    egui::RichText::new(animation.text())
                        .size(theme::FONT_HEADING)
                        .color(theme::TEXT_HEADING),
                );
                if let Some(repository) = &status.repository {
                    ui.label(
                        egui::RichText::new(repository.as_str())
                            .size(theme::FONT_BODY)
                            .color(theme::TEXT_LABEL),
                    );
                }
                ui.add_space(16.0);
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn dots_cycle_one_to_three() {
        let mut animation = LoadingAnimation::default();
        assert_eq!(animation.text(), "Fetching repository.");
        let mut seen = Vec::new();
        for _ in 0..4 {
            animation.advance(Duration::from_millis(400));
            seen.push(animation.dots);
        }
        assert_eq!(seen, [2, 3, 1, 2]);
    }

    #[test]
    fn short_ticks_do_not_advance() {
        let mut animation = LoadingAnimation::default();
        animation.advance(Duration::from_millis(100));
        assert_eq!(animation.dots, 1);
    }

    #[test]
    fn reset_starts_over() {
        let mut animation = LoadingAnimation::default();
        animation.advance(Duration::from_millis(400));
        animation.reset();
        assert_eq!(animation.text(), "Fetching repository.");
    }
}
