use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod alert;
pub mod legend;
pub mod loading_screen;
pub mod pointer_guard;
pub mod search_bar;
pub mod theme;
pub mod tooltip;

/// Egui overlay: search bar, examples, tooltip, legend, loading and alerts.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<search_bar::SearchBar>()
            .init_resource::<loading_screen::LoadingAnimation>()
            .init_resource::<alert::ActiveAlert>()
            .add_systems(Startup, theme::apply_theme)
            .add_systems(
                Update,
                pointer_guard::update_pointer_over_ui
                    .before(rendering::camera::camera_orbit_drag)
                    .before(rendering::interaction::pick_hovered_block),
            )
            .add_systems(
                Update,
                (
                    alert::collect_alerts,
                    search_bar::search_bar_ui,
                    legend::legend_ui,
                    tooltip::block_tooltip_ui,
                    loading_screen::loading_screen_ui,
                    alert::alert_dialog_ui,
                )
                    .chain()
                    .after(rendering::plot::apply_fetch_outcomes)
                    .after(rendering::interaction::update_tooltip),
            );
    }
}
