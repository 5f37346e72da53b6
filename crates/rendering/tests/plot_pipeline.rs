//! Headless integration tests for the plot pipeline.
//!
//! The viewer runs with `MinimalPlugins` and a recording transport: fetches
//! are captured instead of sent, and tests feed outcomes straight into the
//! metrics inbox.

use std::sync::{Arc, Mutex};

use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::window::{CursorLeft, CursorMoved};

use metrics::camera_framing::frame_city;
use metrics::color_mapper::palette;
use metrics::config::{HOVER_EMISSIVE_SCALE, INVALID_URL_MESSAGE, PLOT_FAILED_MESSAGE};
use metrics::fetch::{
    FetchDispatcher, FetchOutcome, FetchRequest, MetricsInbox, MetricsSource, MetricsTransport,
};
use metrics::fetch_error::FetchError;
use metrics::metric_tree::{Category, CityData};
use metrics::request_token::RequestToken;
use metrics::sample_repos::SAMPLE_REPOSITORIES;
use rendering::block_factory::Block;
use rendering::camera::OrbitCamera;
use rendering::interaction::{HoverEvent, HoverState, PointerPosition, Tooltip};
use rendering::plot::{Alert, PlotRequest, PlotStatus, RenderBackend, RoutePath};
use rendering::scene_lifecycle::{CityRoot, SceneCamera, SceneLight};

#[derive(Clone, Default)]
struct RecordingTransport {
    requests: Arc<Mutex<Vec<FetchRequest>>>,
}

impl MetricsTransport for RecordingTransport {
    fn dispatch(&self, request: FetchRequest, _inbox: MetricsInbox) {
        self.requests.lock().unwrap().push(request);
    }
}

#[derive(Resource, Default)]
struct ReceivedAlerts(Vec<String>);

fn collect_alerts(mut alerts: EventReader<Alert>, mut received: ResMut<ReceivedAlerts>) {
    received.0.extend(alerts.read().map(|a| a.0.clone()));
}

struct TestViewer {
    app: App,
    transport: RecordingTransport,
}

impl TestViewer {
    fn new() -> Self {
        Self::with_backend(RenderBackend::default())
    }

    fn with_backend(backend: RenderBackend) -> Self {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, InputPlugin));
        app.add_event::<CursorMoved>().add_event::<CursorLeft>();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>();

        let transport = RecordingTransport::default();
        app.insert_resource(FetchDispatcher::new(transport.clone()));
        app.add_plugins((metrics::MetricsPlugin, rendering::RenderingPlugin));
        app.insert_resource(backend);

        app.init_resource::<ReceivedAlerts>()
            .add_systems(PostUpdate, collect_alerts);

        // Startup: initial scene
        app.update();
        Self { app, transport }
    }

    fn plot(&mut self, request: PlotRequest) {
        self.app.world_mut().send_event(request);
        self.app.update();
    }

    fn requests(&self) -> Vec<FetchRequest> {
        self.transport.requests.lock().unwrap().clone()
    }

    fn last_token(&self) -> RequestToken {
        self.requests().last().expect("a request was dispatched").token
    }

    fn respond(&mut self, token: RequestToken, result: Result<CityData, FetchError>) {
        let repository = self
            .requests()
            .into_iter()
            .find(|r| r.token == token)
            .expect("token was issued")
            .repository;
        let inbox = self.app.world().resource::<MetricsInbox>().clone();
        inbox.push(FetchOutcome {
            token,
            repository,
            result,
        });
        self.app.update();
    }

    fn blocks(&mut self) -> Vec<(Entity, Block)> {
        let world = self.app.world_mut();
        world
            .query::<(Entity, &Block)>()
            .iter(world)
            .map(|(e, b)| (e, b.clone()))
            .collect()
    }

    fn count<F: bevy::ecs::query::QueryFilter>(&mut self) -> usize {
        let world = self.app.world_mut();
        world.query_filtered::<Entity, F>().iter(world).count()
    }

    fn alerts(&self) -> Vec<String> {
        self.app.world().resource::<ReceivedAlerts>().0.clone()
    }

    fn send<E: Event>(&mut self, event: E) {
        self.app.world_mut().send_event(event);
        self.app.update();
    }

    fn emissive(&self, entity: Entity) -> LinearRgba {
        let world = self.app.world();
        let material = world
            .get::<MeshMaterial3d<StandardMaterial>>(entity)
            .expect("blocks carry a material");
        world
            .resource::<Assets<StandardMaterial>>()
            .get(material.id())
            .expect("material is alive")
            .emissive
    }

    fn tooltip(&self) -> Tooltip {
        self.app.world().resource::<Tooltip>().clone()
    }

    fn pointer(&self) -> Option<Vec2> {
        self.app.world().resource::<PointerPosition>().0
    }

    fn status(&self) -> PlotStatus {
        self.app.world().resource::<PlotStatus>().clone()
    }

    fn city_visibility(&mut self) -> Visibility {
        let world = self.app.world_mut();
        *world
            .query_filtered::<&Visibility, With<CityRoot>>()
            .single(world)
    }

    /// Number of `Block` ancestors above `entity`.
    fn block_depth(&self, entity: Entity) -> usize {
        let world = self.app.world();
        let mut depth = 0;
        let mut current = entity;
        while let Some(parent) = world.get::<Parent>(current) {
            current = parent.get();
            if world.get::<Block>(current).is_some() {
                depth += 1;
            }
        }
        depth
    }
}

fn city(json: &str) -> CityData {
    CityData::from_json(json).expect("fixture parses")
}

/// Package with one file holding two structs, plus a second lone package.
fn gocity_fixture() -> CityData {
    city(
        r#"{
        "width": 60, "depth": 40,
        "children": [
            {"type": "PACKAGE", "name": "analyzer", "numberOfMethods": 1,
             "position": {"x": -10, "y": 0}, "width": 30, "depth": 30,
             "children": [
                {"type": "FILE", "name": "visitor.go", "numberOfLines": 81, "numberOfMethods": 3,
                 "position": {"x": 2, "y": 2}, "width": 20, "depth": 20,
                 "children": [
                    {"type": "STRUCT", "name": "Visitor", "numberOfLines": 60, "numberOfMethods": 2,
                     "numberOfAttributes": 4, "position": {"x": -3, "y": 0}, "width": 6, "depth": 6},
                    {"type": "STRUCT", "name": "NodeInfo", "numberOfLines": 8, "numberOfMethods": 0,
                     "numberOfAttributes": 5, "position": {"x": 4, "y": 0}, "width": 5, "depth": 5}
                 ]}
             ]},
            {"type": "PACKAGE", "name": "handle", "numberOfMethods": 4,
             "position": {"x": 20, "y": 0}, "width": 15, "depth": 15}
        ]
    }"#,
    )
}

fn single_package_fixture() -> CityData {
    city(
        r#"{"width": 8, "depth": 8, "children": [
            {"type": "PACKAGE", "name": "lib", "numberOfMethods": 2, "width": 8, "depth": 8}
        ]}"#,
    )
}

#[test]
fn test_plot_spawns_one_block_per_node_with_matching_depth() {
    let mut viewer = TestViewer::new();
    viewer.plot(PlotRequest::repository("github.com/rodrigo-brito/gocity"));
    let fixture = gocity_fixture();
    let expected = fixture.node_count();
    viewer.respond(viewer.last_token(), Ok(fixture));

    let blocks = viewer.blocks();
    assert_eq!(blocks.len(), expected);
    for (entity, block) in &blocks {
        assert_eq!(
            viewer.block_depth(*entity),
            block.depth,
            "{} has the wrong parent chain",
            block.info.name
        );
    }
    assert_eq!(viewer.status().block_count, expected);
    assert!(!viewer.status().loading);
}

#[test]
fn test_child_blocks_rest_on_parent_top() {
    let mut viewer = TestViewer::new();
    viewer.plot(PlotRequest::repository("github.com/rodrigo-brito/gocity"));
    viewer.respond(viewer.last_token(), Ok(gocity_fixture()));

    let blocks = viewer.blocks();
    let world = viewer.app.world();
    for (entity, block) in blocks {
        let parent = world.get::<Parent>(entity).expect("every block has a parent").get();
        match world.get::<Block>(parent) {
            Some(parent_block) => {
                assert!((block.bounds.min.y - parent_block.bounds.max.y).abs() < 1e-5);
            }
            None => {
                assert!(world.get::<CityRoot>(parent).is_some());
                assert!(block.bounds.min.y.abs() < 1e-5);
            }
        }
    }
}

#[test]
fn test_file_and_struct_children_scenario() {
    let mut viewer = TestViewer::new();
    viewer.plot(PlotRequest::repository("github.com/acme/tiny"));
    viewer.respond(
        viewer.last_token(),
        Ok(city(
            r#"{"width": 10, "depth": 10, "children": [
                {"type": "PACKAGE", "name": "root", "numberOfMethods": 1, "width": 10, "depth": 10,
                 "children": [
                    {"type": "FILE", "name": "small.go", "numberOfLines": 100, "numberOfMethods": 1,
                     "width": 4, "depth": 4},
                    {"type": "STRUCT", "name": "Huge", "numberOfLines": 3000, "numberOfMethods": 1,
                     "width": 4, "depth": 4}
                 ]}
            ]}"#,
        )),
    );

    let blocks = viewer.blocks();
    assert_eq!(blocks.len(), 3);
    let world = viewer.app.world();
    let root = blocks.iter().find(|(_, b)| b.info.name == "root").unwrap().0;
    let file = blocks.iter().find(|(_, b)| b.info.name == "small.go").unwrap();
    let structure = blocks.iter().find(|(_, b)| b.info.name == "Huge").unwrap();

    assert_eq!(world.get::<Parent>(file.0).unwrap().get(), root);
    assert_eq!(world.get::<Parent>(structure.0).unwrap().get(), root);
    assert_eq!(structure.1.color, palette(Category::Struct).end);

    let start = palette(Category::File).start;
    assert!(file.1.color.r.abs_diff(start.r) <= 16);
    assert!(file.1.color.g.abs_diff(start.g) <= 16);
    assert!(file.1.color.b.abs_diff(start.b) <= 16);
}

#[test]
fn test_failed_fetch_keeps_previous_city() {
    let mut viewer = TestViewer::new();
    viewer.plot(PlotRequest::repository("github.com/rodrigo-brito/gocity"));
    viewer.respond(viewer.last_token(), Ok(gocity_fixture()));
    let rendered = viewer.blocks().len();
    assert_eq!(rendered, 5);

    viewer.plot(PlotRequest::repository("github.com/spf13/cobra"));
    assert!(viewer.status().loading);
    assert_eq!(viewer.city_visibility(), Visibility::Hidden);

    viewer.respond(
        viewer.last_token(),
        Err(FetchError::Http {
            status: 503,
            url: "http://localhost:4000/api".into(),
        }),
    );

    assert_eq!(viewer.blocks().len(), rendered, "no partial clear");
    assert!(!viewer.status().loading);
    assert_eq!(viewer.city_visibility(), Visibility::Inherited);
    assert_eq!(viewer.alerts(), [PLOT_FAILED_MESSAGE]);
}

#[test]
fn test_invalid_identifier_alerts_without_network_call() {
    let mut viewer = TestViewer::new();
    viewer.plot(PlotRequest::repository("not a link"));

    assert!(viewer.requests().is_empty());
    assert_eq!(viewer.alerts(), [INVALID_URL_MESSAGE]);
    let status = viewer.status();
    assert!(!status.loading);
    assert_eq!(status.repository, None);
    assert_eq!(viewer.app.world().resource::<RoutePath>().0, "");
}

#[test]
fn test_stale_response_never_replaces_newer_city() {
    let mut viewer = TestViewer::new();
    viewer.plot(PlotRequest::repository("github.com/rodrigo-brito/gocity"));
    let first = viewer.last_token();
    viewer.plot(PlotRequest::repository("github.com/acme/lib"));
    let second = viewer.last_token();
    assert_ne!(first, second);

    viewer.respond(second, Ok(single_package_fixture()));
    assert_eq!(viewer.blocks().len(), 1);
    assert!(!viewer.status().loading);

    // The slower, older response arrives last and is dropped.
    viewer.respond(first, Ok(gocity_fixture()));
    assert_eq!(viewer.blocks().len(), 1);
    assert_eq!(viewer.blocks()[0].1.info.name, "lib");
    assert!(viewer.alerts().is_empty());
}

#[test]
fn test_stale_failure_does_not_clear_loading() {
    let mut viewer = TestViewer::new();
    viewer.plot(PlotRequest::repository("github.com/a/first"));
    let first = viewer.last_token();
    viewer.plot(PlotRequest::repository("github.com/a/second"));

    viewer.respond(first, Err(FetchError::Network("connection reset".into())));
    assert!(viewer.status().loading, "still waiting for the newest request");
    assert!(viewer.alerts().is_empty());
}

#[test]
fn test_replotting_same_repository_rebuilds_from_scratch() {
    let mut viewer = TestViewer::new();
    for _ in 0..3 {
        viewer.plot(PlotRequest::repository("github.com/rodrigo-brito/gocity"));
        viewer.respond(viewer.last_token(), Ok(gocity_fixture()));
    }
    assert_eq!(viewer.blocks().len(), 5);
    assert_eq!(viewer.count::<With<SceneCamera>>(), 1);
    assert_eq!(viewer.count::<With<SceneLight>>(), 1);
    assert_eq!(viewer.count::<With<CityRoot>>(), 1);
}

#[test]
fn test_camera_framed_after_plot() {
    let mut viewer = TestViewer::new();
    viewer.plot(PlotRequest::repository("github.com/rodrigo-brito/gocity"));
    viewer.respond(viewer.last_token(), Ok(gocity_fixture()));

    let orbit = viewer.app.world().resource::<OrbitCamera>().clone();
    let expected = frame_city(60.0, 40.0);
    assert_eq!(orbit.focus, Vec3::ZERO);
    // Auto-rotation may have nudged the yaw by a hair; distance and height are exact.
    assert!((orbit.distance - expected.position.length()).abs() < 1e-3);
    assert!((orbit.position().y - expected.position.y).abs() < 1e-2);
}

#[test]
fn test_sample_request_uses_static_source_and_route() {
    let mut viewer = TestViewer::new();
    let hugo = SAMPLE_REPOSITORIES
        .iter()
        .find(|s| s.json.is_some())
        .expect("one sample ships static metrics");
    viewer.plot(PlotRequest::sample(hugo));

    let request = viewer.requests().pop().unwrap();
    assert_eq!(
        request.source,
        MetricsSource::Static {
            path: hugo.json.unwrap().to_string()
        }
    );
    assert_eq!(
        viewer.app.world().resource::<RoutePath>().0,
        format!("/{}", hugo.link)
    );
}

#[test]
fn test_api_request_carries_normalized_identifier() {
    let mut viewer = TestViewer::new();
    viewer.plot(PlotRequest::repository("https://GitHub.com/spf13/cobra/tree/main"));

    let request = viewer.requests().pop().unwrap();
    assert_eq!(request.repository.as_str(), "github.com/spf13/cobra");
    assert!(matches!(request.source, MetricsSource::Api { .. }));
    assert_eq!(
        viewer.status().repository.map(|r| r.to_string()),
        Some("github.com/spf13/cobra".to_string())
    );
}

#[test]
fn test_unsupported_backend_drops_requests_silently() {
    let mut viewer = TestViewer::with_backend(RenderBackend { supported: false });
    viewer.plot(PlotRequest::repository("github.com/rodrigo-brito/gocity"));
    viewer.plot(PlotRequest::repository("not a link"));

    assert!(viewer.requests().is_empty());
    assert!(viewer.alerts().is_empty());
    assert!(!viewer.status().loading);
}

#[test]
fn test_hover_tints_block_and_shows_tooltip() {
    let mut viewer = TestViewer::new();
    viewer.plot(PlotRequest::repository("github.com/rodrigo-brito/gocity"));
    viewer.respond(viewer.last_token(), Ok(gocity_fixture()));

    let (entity, block) = viewer
        .blocks()
        .into_iter()
        .find(|(_, b)| b.info.name == "visitor.go")
        .unwrap();
    assert_eq!(viewer.emissive(entity), LinearRgba::BLACK);

    viewer.send(HoverEvent::Entered {
        entity,
        info: block.info.clone(),
        pointer: Vec2::new(5.0, 6.0),
    });
    assert_eq!(
        viewer.emissive(entity),
        block.color.scaled(HOVER_EMISSIVE_SCALE).to_linear()
    );
    let tooltip = viewer.tooltip();
    assert!(tooltip.visible);
    assert_eq!(tooltip.info, Some(block.info.clone()));
    assert_eq!(tooltip.position, Vec2::new(5.0, 6.0));

    viewer.send(HoverEvent::Exited { entity });
    assert_eq!(viewer.emissive(entity), LinearRgba::BLACK);
    assert!(!viewer.tooltip().visible);
}

#[test]
fn test_hover_only_tints_the_hovered_block() {
    let mut viewer = TestViewer::new();
    viewer.plot(PlotRequest::repository("github.com/rodrigo-brito/gocity"));
    viewer.respond(viewer.last_token(), Ok(gocity_fixture()));

    let blocks = viewer.blocks();
    let (entity, block) = blocks[0].clone();
    viewer.send(HoverEvent::Entered {
        entity,
        info: block.info,
        pointer: Vec2::ZERO,
    });
    for (other, _) in &blocks[1..] {
        assert_eq!(viewer.emissive(*other), LinearRgba::BLACK);
    }
}

#[test]
fn test_pointer_tracks_cursor_until_it_leaves() {
    let mut viewer = TestViewer::new();
    assert_eq!(viewer.pointer(), None);

    viewer.send(CursorMoved {
        window: Entity::PLACEHOLDER,
        position: Vec2::new(120.0, 80.0),
        delta: None,
    });
    assert_eq!(viewer.pointer(), Some(Vec2::new(120.0, 80.0)));

    viewer.send(CursorLeft {
        window: Entity::PLACEHOLDER,
    });
    assert_eq!(viewer.pointer(), None);
}

#[test]
fn test_scene_reset_clears_hover_and_tooltip() {
    let mut viewer = TestViewer::new();
    viewer.plot(PlotRequest::repository("github.com/rodrigo-brito/gocity"));
    viewer.respond(viewer.last_token(), Ok(gocity_fixture()));

    let (entity, block) = viewer.blocks().remove(0);
    viewer.send(HoverEvent::Entered {
        entity,
        info: block.info,
        pointer: Vec2::new(1.0, 1.0),
    });
    assert!(viewer.tooltip().visible);

    viewer.plot(PlotRequest::repository("github.com/acme/lib"));
    viewer.app.world_mut().resource_mut::<HoverState>().hovered = Some(entity);
    viewer.respond(viewer.last_token(), Ok(single_package_fixture()));

    assert_eq!(viewer.app.world().resource::<HoverState>().hovered, None);
    let tooltip = viewer.tooltip();
    assert!(!tooltip.visible);
    assert_eq!(tooltip.info, None);
}
