//! Metrics transport: turns a [`FetchRequest`] into a [`FetchOutcome`] off
//! the main thread.
//!
//! Outcomes are pushed into a shared [`MetricsInbox`] that the plot pipeline
//! drains once per frame, the same slot-and-poll bridge used for any async
//! work feeding the ECS world.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::fetch_error::FetchError;
use crate::metric_tree::CityData;
use crate::repository::RepositoryId;
use crate::request_token::RequestToken;

/// Where a request's metrics come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsSource {
    /// `GET <endpoint>?q=<repository>`.
    Api { endpoint: String },
    /// Pre-computed metrics stored as a static JSON resource.
    Static { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub token: RequestToken,
    pub repository: RepositoryId,
    pub source: MetricsSource,
}

impl FetchRequest {
    /// URL (or path relative to `assets_root`) this request resolves to.
    pub fn location(&self, assets_root: &str) -> String {
        match &self.source {
            MetricsSource::Api { endpoint } => {
                // Identifiers only contain `[\w.-/]`, nothing that needs escaping.
                let separator = if endpoint.contains('?') { '&' } else { '?' };
                format!("{endpoint}{separator}q={}", self.repository)
            }
            MetricsSource::Static { path } => {
                let root = assets_root.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                if root.is_empty() {
                    path.to_string()
                } else {
                    format!("{root}/{path}")
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub token: RequestToken,
    pub repository: RepositoryId,
    pub result: Result<CityData, FetchError>,
}

/// Shared slot bridging async fetches to the ECS world.
#[derive(Resource, Default, Clone)]
pub struct MetricsInbox(pub Arc<Mutex<Vec<FetchOutcome>>>);

impl MetricsInbox {
    pub fn push(&self, outcome: FetchOutcome) {
        match self.0.lock() {
            Ok(mut guard) => guard.push(outcome),
            Err(_) => error!("Metrics inbox poisoned; dropping outcome for {}", outcome.repository),
        }
    }

    /// Take every outcome that arrived since the last call, in arrival order.
    pub fn drain(&self) -> Vec<FetchOutcome> {
        match self.0.lock() {
            Ok(mut guard) => guard.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Starts fetches. Implementations must not block the caller and must
/// eventually push exactly one outcome per request into the inbox.
pub trait MetricsTransport: Send + Sync + 'static {
    fn dispatch(&self, request: FetchRequest, inbox: MetricsInbox);
}

/// The active transport.
#[derive(Resource)]
pub struct FetchDispatcher(pub Box<dyn MetricsTransport>);

impl FetchDispatcher {
    pub fn new(transport: impl MetricsTransport) -> Self {
        Self(Box::new(transport))
    }

    pub fn dispatch(&self, request: FetchRequest, inbox: MetricsInbox) {
        self.0.dispatch(request, inbox);
    }
}

/// HTTP/file transport used by the application.
pub struct HttpTransport {
    pub assets_root: String,
}

impl MetricsTransport for HttpTransport {
    #[cfg(not(target_arch = "wasm32"))]
    fn dispatch(&self, request: FetchRequest, inbox: MetricsInbox) {
        let location = request.location(&self.assets_root);
        bevy::tasks::IoTaskPool::get()
            .spawn(async move {
                let result = load_blocking(&request.source, &location);
                inbox.push(FetchOutcome {
                    token: request.token,
                    repository: request.repository,
                    result,
                });
            })
            .detach();
    }

    #[cfg(target_arch = "wasm32")]
    fn dispatch(&self, request: FetchRequest, inbox: MetricsInbox) {
        let location = request.location(&self.assets_root);
        wasm_bindgen_futures::spawn_local(async move {
            let result = match web::fetch_text(&location).await {
                Ok(body) => CityData::from_json(&body),
                Err(e) => Err(e),
            };
            inbox.push(FetchOutcome {
                token: request.token,
                repository: request.repository,
                result,
            });
        });
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_blocking(source: &MetricsSource, location: &str) -> Result<CityData, FetchError> {
    let body = match source {
        MetricsSource::Api { .. } => {
            let response = reqwest::blocking::get(location)?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Http {
                    status: status.as_u16(),
                    url: location.to_string(),
                });
            }
            response.text()?
        }
        MetricsSource::Static { .. } => std::fs::read_to_string(location)?,
    };
    CityData::from_json(&body)
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    use crate::fetch_error::FetchError;

    pub(super) async fn fetch_text(url: &str) -> Result<String, FetchError> {
        let window =
            web_sys::window().ok_or_else(|| FetchError::Network("window not available".into()))?;
        let response_value = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|e| FetchError::Network(format!("fetch failed: {e:?}")))?;

        let response: web_sys::Response = response_value
            .dyn_into()
            .map_err(|_| FetchError::Network("failed to cast fetch response".into()))?;

        if !response.ok() {
            return Err(FetchError::Http {
                status: response.status(),
                url: url.to_string(),
            });
        }

        let text_promise = response
            .text()
            .map_err(|e| FetchError::Network(format!("response.text() failed: {e:?}")))?;
        let text_value = JsFuture::from(text_promise)
            .await
            .map_err(|e| FetchError::Network(format!("await response text failed: {e:?}")))?;
        text_value
            .as_string()
            .ok_or_else(|| FetchError::Parse("response text was not a string".into()))
    }
}
