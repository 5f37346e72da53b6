//! Header with the repository input, the Plot button and example links.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use metrics::repository::RepositoryId;
use metrics::sample_repos::SAMPLE_REPOSITORIES;
use rendering::plot::{PlotRequest, PlotStatus};

use crate::theme;

const INPUT_HINT: &str = "eg: github.com/golang/go";

#[derive(Resource, Debug, Default)]
pub struct SearchBar {
    /// Text currently in the input field.
    pub input: String,
    /// Repository last copied into `input`.
    shown: Option<RepositoryId>,
}

impl SearchBar {
    /// Mirror the repository being plotted into the input field. Runs only
    /// when the plotted repository changes, so typing is never overwritten.
    pub fn sync(&mut self, status: &PlotStatus) {
        if self.shown != status.repository {
            self.shown = status.repository.clone();
            if let Some(repository) = &self.shown {
                self.input = repository.to_string();
            }
        }
    }

    pub fn submit(&self) -> PlotRequest {
        PlotRequest::repository(self.input.trim())
    }
}

pub fn search_bar_ui(
    mut contexts: EguiContexts,
    mut search: ResMut<SearchBar>,
    status: Res<PlotStatus>,
    mut requests: EventWriter<PlotRequest>,
) {
    let search = &mut *search;
    search.sync(&status);

    let ctx = contexts.ctx_mut();
    egui::TopBottomPanel::top("search_bar").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new("CodeCity")
                    .size(theme::FONT_HEADING)
                    .strong()
                    .color(theme::TEXT_HEADING),
            );
            ui.add_space(12.0);

            let response = ui.add(
                egui::TextEdit::singleline(&mut search.input)
                    .hint_text(INPUT_HINT)
                    .desired_width(420.0),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let clicked = ui.button("Plot").clicked();
            if submitted || clicked {
                requests.send(search.submit());
            }
        });

        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new("Examples:")
                    .size(theme::FONT_BODY)
                    .color(theme::TEXT_LABEL),
            );
            for sample in SAMPLE_REPOSITORIES {
                if ui.link(sample.name).clicked() {
                    search.input = sample.link.to_string();
                    requests.send(PlotRequest::sample(sample));
                }
            }
        });
        ui.add_space(6.0);
    });
}
