use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::WinitSettings;

mod config;
mod startup;
mod web_route;

use config::InitialRepository;

fn main() {
    let config = config::load();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "CodeCity".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            fit_canvas_to_parent: true,
            ..default()
        }),
        ..default()
    }))
    // Auto-rotation needs a frame every tick, focused or not.
    .insert_resource(WinitSettings::game())
    .insert_resource(config.metrics)
    .insert_resource(InitialRepository(config.repository))
    .add_plugins((
        metrics::MetricsPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ))
    .add_systems(
        Startup,
        (startup::detect_render_backend, startup::request_initial_plot).chain(),
    );

    #[cfg(not(target_arch = "wasm32"))]
    app.add_systems(Update, startup::log_route);
    #[cfg(target_arch = "wasm32")]
    app.add_systems(Update, web_route::push_route);

    app.run();
}
