use bevy::prelude::*;

use crate::config::{INITIAL_CAMERA_POSITION, MAX_CAMERA_EXTENT};

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    /// Pose of a freshly initialized scene, before any city is framed.
    pub const INITIAL: CameraPose = CameraPose {
        position: INITIAL_CAMERA_POSITION,
        target: Vec3::ZERO,
    };
}

/// Camera pose for a city with the given footprint.
///
/// Each dimension is clamped to `MAX_CAMERA_EXTENT`; the camera looks at the
/// origin from `(w, w, w + d / 2)`.
pub fn frame_city(width: f32, depth: f32) -> CameraPose {
    let width = width.min(MAX_CAMERA_EXTENT);
    let depth = depth.min(MAX_CAMERA_EXTENT);
    CameraPose {
        position: Vec3::new(width, width, width + depth / 2.0),
        target: Vec3::ZERO,
    }
}
