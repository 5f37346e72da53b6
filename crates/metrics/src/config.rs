use bevy::prelude::*;

/// Line count at which a block reaches its category's end color.
pub const MAX_COLOR_LINES: f32 = 2000.0;

/// Upper bound for each footprint dimension when framing the camera.
/// Very large repositories would otherwise push the camera out of sight.
pub const MAX_CAMERA_EXTENT: f32 = 1000.0;

/// Blocks with fewer methods than this are raised to this height so they
/// stay visible and pickable.
pub const MIN_BLOCK_HEIGHT: f32 = 0.1;

/// Emissive tint applied to a hovered block, as a fraction of its base color.
pub const HOVER_EMISSIVE_SCALE: f32 = 0.2;

/// Intensity of the single sky light created with every scene.
pub const LIGHT_INTENSITY: f32 = 0.7;

/// Background and ambient gray level (sRGB).
pub const BACKGROUND_LEVEL: f32 = 0.1;

/// Camera position used before any city has been framed.
pub const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(500.0, 400.0, -100.0);

/// Idle auto-rotation speed in radians per second.
pub const IDLE_ROTATION_SPEED: f32 = 0.05;
/// Seconds without user input before auto-rotation starts.
pub const IDLE_ROTATION_WAIT: f32 = 2.0;
/// Seconds over which auto-rotation ramps up to full speed.
pub const IDLE_ROTATION_SPINUP: f32 = 2.0;

pub const DEFAULT_REPOSITORY: &str = "github.com/rodrigo-brito/gocity";
pub const DEFAULT_API_ENDPOINT: &str = "http://localhost:4000/api";
pub const DEFAULT_ASSETS_ROOT: &str = "assets";

/// Environment variable that overrides the metrics endpoint.
pub const API_ENDPOINT_ENV: &str = "CODECITY_API_URL";

pub const INVALID_URL_MESSAGE: &str = "Invalid URL! Please inform a valid Github URL.";
pub const PLOT_FAILED_MESSAGE: &str = "Error on plot project, try again later.";

/// Where city metrics come from.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MetricsConfig {
    /// Endpoint queried with `?q=<repository>`.
    pub api_endpoint: String,
    /// Directory (native) or URL prefix (wasm) that static example files live under.
    pub assets_root: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            api_endpoint: std::env::var(API_ENDPOINT_ENV)
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string()),
            assets_root: DEFAULT_ASSETS_ROOT.to_string(),
        }
    }
}
