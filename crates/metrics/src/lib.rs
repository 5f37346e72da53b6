//! Engine-independent city model: the metrics tree, its layout, colors,
//! camera framing and the transport that fetches it.

use bevy::prelude::*;

pub mod camera_framing;
pub mod color_mapper;
pub mod config;
pub mod fetch;
pub mod fetch_error;
pub mod layout;
pub mod metric_tree;
pub mod repository;
pub mod request_token;
pub mod sample_repos;

use config::MetricsConfig;
use fetch::{FetchDispatcher, HttpTransport, MetricsInbox};
use request_token::RequestTracker;

/// Registers the metrics resources. Insert a [`MetricsConfig`] and/or a
/// [`FetchDispatcher`] before adding the plugin to override the defaults.
pub struct MetricsPlugin;

impl Plugin for MetricsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MetricsConfig>()
            .init_resource::<MetricsInbox>()
            .init_resource::<RequestTracker>();

        if !app.world().contains_resource::<FetchDispatcher>() {
            let assets_root = app.world().resource::<MetricsConfig>().assets_root.clone();
            app.insert_resource(FetchDispatcher::new(HttpTransport { assets_root }));
        }
    }
}
