use bevy::prelude::*;

pub mod block_factory;
pub mod camera;
pub mod city_builder;
pub mod interaction;
pub mod plot;
pub mod scene_lifecycle;

use camera::{CameraDrag, CameraOrbitDrag, IdleRotation, OrbitCamera, OrbitControls};
use interaction::{HoverEvent, HoverState, PointerOverUi, PointerPosition, Tooltip};
use plot::{Alert, PlotRequest, PlotStatus, RenderBackend, RoutePath};

/// Scene, city building, camera and hover inspection.
///
/// Expects `metrics::MetricsPlugin` to be added as well.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitCamera>()
            .init_resource::<OrbitControls>()
            .init_resource::<IdleRotation>()
            .init_resource::<CameraDrag>()
            .init_resource::<CameraOrbitDrag>()
            .init_resource::<PointerPosition>()
            .init_resource::<PointerOverUi>()
            .init_resource::<HoverState>()
            .init_resource::<Tooltip>()
            .init_resource::<PlotStatus>()
            .init_resource::<RoutePath>()
            .init_resource::<RenderBackend>()
            .add_event::<PlotRequest>()
            .add_event::<Alert>()
            .add_event::<HoverEvent>()
            .add_systems(Startup, scene_lifecycle::setup_scene)
            .add_systems(
                Update,
                (
                    plot::handle_plot_requests,
                    plot::apply_fetch_outcomes,
                    camera::camera_orbit_drag,
                    camera::camera_pan_drag,
                    camera::camera_zoom,
                    camera::auto_rotate_camera,
                    camera::apply_orbit_camera,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    interaction::track_pointer,
                    interaction::pick_hovered_block,
                    (
                        interaction::update_tooltip,
                        interaction::apply_hover_emphasis,
                    ),
                )
                    .chain()
                    .after(plot::apply_fetch_outcomes),
            )
            .add_systems(Last, scene_lifecycle::teardown_on_exit);
    }
}
