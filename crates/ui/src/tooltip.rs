//! Floating info box for the hovered block.
//!
//! Drawn next to the pointer position recorded when the block was entered;
//! hidden whenever the interaction layer hides its tooltip slot.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use metrics::layout::BlockInfo;
use rendering::camera::{CameraDrag, CameraOrbitDrag};
use rendering::interaction::Tooltip;

use crate::theme;

/// Pixel offset from the pointer to the tooltip.
const TOOLTIP_OFFSET: f32 = 16.0;

/// Label/value rows shown under the block name.
pub fn tooltip_rows(info: &BlockInfo) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Type", info.category.label().to_string())];
    if !info.url.is_empty() {
        rows.push(("URL", info.url.clone()));
    }
    rows.push(("NOM", info.number_of_methods.to_string()));
    rows.push(("NOL", info.number_of_lines.to_string()));
    rows.push(("NOA", info.number_of_attributes.to_string()));
    rows
}

pub fn block_tooltip_ui(
    mut contexts: EguiContexts,
    tooltip: Res<Tooltip>,
    camera_drag: Res<CameraDrag>,
    orbit_drag: Res<CameraOrbitDrag>,
) {
    if !tooltip.visible || camera_drag.dragging || orbit_drag.dragging {
        return;
    }
    let Some(info) = &tooltip.info else {
        return;
    };

    let ctx = contexts.ctx_mut();
    let pos = egui::pos2(
        tooltip.position.x + TOOLTIP_OFFSET,
        tooltip.position.y + TOOLTIP_OFFSET,
    );

    egui::Area::new(egui::Id::new("block_tooltip"))
        .fixed_pos(pos)
        .interactable(false)
        .order(egui::Order::Tooltip)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(egui::Color32::from_rgba_premultiplied(30, 30, 30, 220))
                .show(ui, |ui| {
                    ui.set_max_width(320.0);
                    ui.label(
                        egui::RichText::new(&info.name)
                            .strong()
                            .size(13.0)
                            .color(theme::TEXT_HEADING),
                    );
                    ui.separator();
                    for (label, value) in tooltip_rows(info) {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(format!("{label}:"))
                                    .size(11.0)
                                    .color(theme::TEXT_LABEL),
                            );
                            ui.label(
                                egui::RichText::new(value)
                                    .size(11.0)
                                    .color(theme::TEXT_VALUE),
                            );
                        });
                    }
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics::metric_tree::Category;

    fn info(url: &str) -> BlockInfo {
        BlockInfo {
            name: "Visitor".into(),
            url: url.into(),
            category: Category::Struct,
            number_of_methods: 2,
            number_of_lines: 60,
            number_of_attributes: 4,
        }
    }

    #[test]
    fn rows_list_type_and_metrics() {
        let rows = tooltip_rows(&info("github.com/acme/x/blob/master/a.go#L3"));
        let labels: Vec<_> = rows.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["Type", "URL", "NOM", "NOL", "NOA"]);
        assert_eq!(rows[0].1, "STRUCT");
        assert_eq!(rows[3].1, "60");
    }

    #[test]
    fn empty_url_is_omitted() {
        let rows = tooltip_rows(&info(""));
        assert!(rows.iter().all(|(l, _)| *l != "URL"));
    }
}
