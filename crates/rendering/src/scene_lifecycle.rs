//! Creation, teardown and reinitialization of the render scene.
//!
//! A scene is the set of entities tagged [`SceneMember`]: one orbit camera,
//! one sky light and the [`CityRoot`] that every block hangs under. Teardown
//! despawns them recursively, so blocks and their materials go with the
//! root. Every plot starts from a freshly initialized scene.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use metrics::config::{BACKGROUND_LEVEL, LIGHT_INTENSITY};

use crate::camera::{camera_transform, IdleRotation, OrbitCamera, OrbitControls};
use crate::interaction::{clear_interaction, HoverState, Tooltip};

/// Illuminance of the sky light at intensity 1.0.
const FULL_SKY_ILLUMINANCE: f32 = 10000.0;
const AMBIENT_BRIGHTNESS: f32 = 400.0;

/// Top-level entity owned by the current scene.
#[derive(Component)]
pub struct SceneMember;

#[derive(Component)]
pub struct SceneCamera;

#[derive(Component)]
pub struct SceneLight;

/// Parent of all top-level blocks. Hidden while a fetch is in flight.
#[derive(Component)]
pub struct CityRoot;

/// Entities created by [`SceneLifecycle::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneHandles {
    pub camera: Entity,
    pub light: Entity,
    pub city_root: Entity,
}

/// Everything needed to create or dispose of the scene.
#[derive(SystemParam)]
pub struct SceneLifecycle<'w, 's> {
    pub commands: Commands<'w, 's>,
    members: Query<'w, 's, Entity, With<SceneMember>>,
    orbit: ResMut<'w, OrbitCamera>,
    controls: ResMut<'w, OrbitControls>,
    idle: ResMut<'w, IdleRotation>,
    hover: ResMut<'w, HoverState>,
    tooltip: ResMut<'w, Tooltip>,
}

impl SceneLifecycle<'_, '_> {
    /// Background, camera at its initial pose, sky light, empty city root,
    /// camera controls attached.
    pub fn initialize(&mut self) -> SceneHandles {
        let background = Color::srgb(BACKGROUND_LEVEL, BACKGROUND_LEVEL, BACKGROUND_LEVEL);
        self.commands.insert_resource(ClearColor(background));
        self.commands.insert_resource(AmbientLight {
            color: background,
            brightness: AMBIENT_BRIGHTNESS,
        });

        *self.orbit = OrbitCamera::default();
        let camera = self
            .commands
            .spawn((
                SceneMember,
                SceneCamera,
                Camera3d::default(),
                camera_transform(&self.orbit),
            ))
            .id();

        // Sky light, tilted slightly so adjacent block walls shade differently.
        let light = self
            .commands
            .spawn((
                SceneMember,
                SceneLight,
                DirectionalLight {
                    illuminance: FULL_SKY_ILLUMINANCE * LIGHT_INTENSITY,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::from_xyz(0.3, 1.0, 0.5).looking_at(Vec3::ZERO, Vec3::Y),
            ))
            .id();

        let city_root = self
            .commands
            .spawn((
                SceneMember,
                CityRoot,
                Transform::default(),
                Visibility::default(),
            ))
            .id();

        self.controls.attached = true;
        self.idle.interrupt();

        SceneHandles {
            camera,
            light,
            city_root,
        }
    }

    /// Dispose of every scene entity, including all blocks.
    pub fn teardown(&mut self) {
        for entity in &self.members {
            self.commands.entity(entity).despawn_recursive();
        }
        self.controls.attached = false;
        clear_interaction(&mut self.hover, &mut self.tooltip);
    }

    /// Teardown followed by a fresh initialize.
    pub fn reset(&mut self) -> SceneHandles {
        self.teardown();
        let handles = self.initialize();
        debug!("Scene reset: camera {:?}, city root {:?}", handles.camera, handles.city_root);
        handles
    }

    pub fn orbit_mut(&mut self) -> &mut OrbitCamera {
        &mut self.orbit
    }
}

pub fn setup_scene(mut scene: SceneLifecycle) {
    scene.initialize();
}

/// Release the scene when the app is shutting down.
pub fn teardown_on_exit(mut exit: EventReader<AppExit>, mut scene: SceneLifecycle) {
    if exit.is_empty() {
        return;
    }
    exit.clear();
    scene.teardown();
}
