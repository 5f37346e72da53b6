use bevy::prelude::*;
use bevy::render::renderer::RenderDevice;

use rendering::plot::{PlotRequest, RenderBackend};

use crate::config::InitialRepository;

/// Plotting is only attempted when a GPU device came up.
pub fn detect_render_backend(
    device: Option<Res<RenderDevice>>,
    mut backend: ResMut<RenderBackend>,
) {
    backend.supported = device.is_some();
    if backend.supported {
        info!("Render backend ready");
    } else {
        warn!("No render device available, plot requests will be ignored");
    }
}

pub fn request_initial_plot(
    initial: Res<InitialRepository>,
    mut requests: EventWriter<PlotRequest>,
) {
    requests.send(PlotRequest::repository(initial.0.clone()));
}

/// Native stand-in for browser routing.
#[cfg(not(target_arch = "wasm32"))]
pub fn log_route(route: Res<rendering::plot::RoutePath>) {
    if route.is_changed() && !route.0.is_empty() {
        info!("Route: {}", route.0);
    }
}
