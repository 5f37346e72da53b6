//! Browser routing: the location hash mirrors the plotted repository.
//!
//! `index.html#/github.com/spf13/cobra` opens that repository; plotting
//! another one pushes a new history entry without reloading the page.

#![cfg(target_arch = "wasm32")]

use bevy::prelude::*;
use wasm_bindgen::JsValue;

use metrics::repository::RepositoryId;
use rendering::plot::RoutePath;

/// Repository named by the current location hash, if any.
pub fn initial_repository() -> Option<RepositoryId> {
    let hash = web_sys::window()?.location().hash().ok()?;
    RepositoryId::from_route_path(&hash)
}

/// Push the route into browser history whenever it changes.
pub fn push_route(route: Res<RoutePath>) {
    if !route.is_changed() || route.0.is_empty() {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let target = format!("#{}", route.0);
    if window.location().hash().ok().as_deref() == Some(target.as_str()) {
        return;
    }
    match window.history() {
        Ok(history) => {
            if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(&target)) {
                warn!("Failed to push route {}: {:?}", target, e);
            }
        }
        Err(e) => warn!("Browser history unavailable: {:?}", e),
    }
}
