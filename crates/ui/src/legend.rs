//! Color legend in the bottom-left corner: one row per category with the
//! swatch for the smallest and the largest entity.

use bevy_egui::{egui, EguiContexts};

use metrics::color_mapper::{palette, Rgb};
use metrics::config::MAX_COLOR_LINES;
use metrics::metric_tree::Category;

use crate::theme;

const SWATCH_SIZE: f32 = 14.0;
const MARGIN: f32 = 12.0;

pub struct LegendRow {
    pub label: &'static str,
    pub start: Rgb,
    pub end: Rgb,
}

impl LegendRow {
    /// Categories whose color does not depend on size show one swatch.
    pub fn is_constant(&self) -> bool {
        self.start == self.end
    }
}

pub fn legend_rows() -> Vec<LegendRow> {
    Category::ALL
        .iter()
        .map(|&category| {
            let palette = palette(category);
            LegendRow {
                label: category.label(),
                start: palette.start,
                end: palette.end,
            }
        })
        .collect()
}

pub fn rgb_to_egui(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

fn swatch(ui: &mut egui::Ui, rgb: Rgb) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE), egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, egui::CornerRadius::same(2), rgb_to_egui(rgb));
    ui.painter().rect_stroke(
        rect,
        egui::CornerRadius::same(2),
        egui::Stroke::new(1.0, egui::Color32::from_gray(90)),
        egui::StrokeKind::Inside,
    );
}

pub fn legend_ui(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();

    egui::Area::new(egui::Id::new("category_legend"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(MARGIN, -MARGIN))
        .interactable(false)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                for row in legend_rows() {
                    ui.horizontal(|ui| {
                        swatch(ui, row.start);
                        if !row.is_constant() {
                            ui.label(egui::RichText::new("→").color(theme::TEXT_LABEL));
                            swatch(ui, row.end);
                        }
                        ui.label(
                            egui::RichText::new(row.label)
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_VALUE),
                        );
                    });
                }
                ui.label(
                    egui::RichText::new(format!("Darker = more lines (up to {MAX_COLOR_LINES})"))
                        .size(10.0)
                        .color(theme::TEXT_LABEL),
                );
            });
        });
}
