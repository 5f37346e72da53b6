//! Plot pipeline: user request → validated fetch → atomic scene rebuild.
//!
//! A [`PlotRequest`] is validated and turned into a fetch tagged with a fresh
//! request token. Outcomes are polled from the [`MetricsInbox`] each frame.
//! Only the outcome of the newest request is applied:
//! - success: reset the scene, build the city, frame the camera, all inside
//!   one system so the change lands in a single command flush;
//! - failure: alert the user and leave the previous city untouched.

use bevy::prelude::*;

use metrics::config::{MetricsConfig, PLOT_FAILED_MESSAGE};
use metrics::fetch::{FetchDispatcher, FetchRequest, MetricsInbox, MetricsSource};
use metrics::layout::compute_layout;
use metrics::repository::RepositoryId;
use metrics::request_token::RequestTracker;
use metrics::sample_repos::SampleRepository;

use crate::camera::OrbitCamera;
use crate::city_builder::spawn_city;
use crate::scene_lifecycle::{CityRoot, SceneLifecycle};

/// Ask for a repository to be plotted.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct PlotRequest {
    /// Raw user input, validated before any network call.
    pub input: String,
    /// Static JSON resource to load instead of querying the API.
    pub static_json: Option<String>,
}

impl PlotRequest {
    pub fn repository(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            static_json: None,
        }
    }

    pub fn sample(sample: &SampleRepository) -> Self {
        Self {
            input: sample.link.to_string(),
            static_json: sample.json.map(str::to_string),
        }
    }
}

/// User-facing message (invalid input, failed plot).
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct Alert(pub String);

#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct PlotStatus {
    /// A fetch for the newest request is still in flight.
    pub loading: bool,
    /// Repository of the newest request.
    pub repository: Option<RepositoryId>,
    /// Blocks in the currently rendered city.
    pub block_count: usize,
}

/// Client route mirroring the current repository (`/github.com/org/repo`).
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct RoutePath(pub String);

/// Result of the render backend capability check. Plot requests are
/// dropped without feedback when the backend is unsupported.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderBackend {
    pub supported: bool,
}

impl Default for RenderBackend {
    fn default() -> Self {
        Self { supported: true }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn handle_plot_requests(
    mut requests: EventReader<PlotRequest>,
    backend: Res<RenderBackend>,
    config: Res<MetricsConfig>,
    dispatcher: Res<FetchDispatcher>,
    inbox: Res<MetricsInbox>,
    mut tracker: ResMut<RequestTracker>,
    mut status: ResMut<PlotStatus>,
    mut route: ResMut<RoutePath>,
    mut alerts: EventWriter<Alert>,
    mut city_roots: Query<&mut Visibility, With<CityRoot>>,
) {
    if !backend.supported {
        requests.clear();
        return;
    }

    for request in requests.read() {
        let repository = match RepositoryId::parse(&request.input) {
            Ok(repository) => repository,
            Err(e) => {
                warn!("Rejected plot request '{}': {}", e.input, e);
                alerts.send(Alert(e.to_string()));
                continue;
            }
        };

        let route_path = repository.route_path();
        if route.0 != route_path {
            route.0 = route_path;
        }

        let source = match &request.static_json {
            Some(path) => MetricsSource::Static { path: path.clone() },
            None => MetricsSource::Api {
                endpoint: config.api_endpoint.clone(),
            },
        };
        let token = tracker.issue();
        info!("Plotting {} (request {})", repository, token.0);

        status.loading = true;
        status.repository = Some(repository.clone());
        for mut visibility in &mut city_roots {
            *visibility = Visibility::Hidden;
        }

        dispatcher.dispatch(
            FetchRequest {
                token,
                repository,
                source,
            },
            inbox.clone(),
        );
    }
}

#[allow(clippy::too_many_arguments)]
pub fn apply_fetch_outcomes(
    inbox: Res<MetricsInbox>,
    tracker: Res<RequestTracker>,
    mut scene: SceneLifecycle,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut status: ResMut<PlotStatus>,
    mut alerts: EventWriter<Alert>,
    mut city_roots: Query<&mut Visibility, With<CityRoot>>,
) {
    for outcome in inbox.drain() {
        if !tracker.is_latest(outcome.token) {
            debug!(
                "Discarding stale response for {} (request {})",
                outcome.repository, outcome.token.0
            );
            continue;
        }
        status.loading = false;

        match outcome.result {
            Ok(city) => {
                let layout = compute_layout(&city);
                let handles = scene.reset();
                let count = spawn_city(
                    &mut scene.commands,
                    &mut meshes,
                    &mut materials,
                    &layout,
                    handles.city_root,
                );
                *scene.orbit_mut() = OrbitCamera::from_pose(layout.camera_pose());
                status.block_count = count;
                info!(
                    "Plotted {}: {} blocks, footprint {} x {}",
                    outcome.repository, count, layout.width, layout.depth
                );
            }
            Err(e) => {
                error!("Failed to plot {}: {}", outcome.repository, e);
                alerts.send(Alert(PLOT_FAILED_MESSAGE.to_string()));
                for mut visibility in &mut city_roots {
                    *visibility = Visibility::Inherited;
                }
            }
        }
    }
}
