//! Hover inspection.
//!
//! Pointer movement updates a single [`PointerPosition`]. Each frame a ray is
//! cast from the scene camera through the pointer and the nearest block it
//! hits becomes the hovered block. Changes of the hovered block are
//! published as [`HoverEvent`]s, which drive the [`Tooltip`] slot and the
//! block emphasis.

use bevy::math::bounding::{Aabb3d, RayCast3d};
use bevy::prelude::*;
use bevy::window::{CursorLeft, CursorMoved};

use metrics::config::HOVER_EMISSIVE_SCALE;
use metrics::layout::BlockInfo;

use crate::block_factory::Block;
use crate::scene_lifecycle::SceneCamera;

/// Last known pointer position in window coordinates.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerPosition(pub Option<Vec2>);

/// Set by the UI layer while the pointer is over a panel; picking and camera
/// controls ignore the pointer then.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PointerOverUi(pub bool);

/// The block currently under the pointer, if any.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HoverState {
    pub hovered: Option<Entity>,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub enum HoverEvent {
    Entered {
        entity: Entity,
        info: BlockInfo,
        pointer: Vec2,
    },
    Exited {
        entity: Entity,
    },
}

/// Single global tooltip slot. The last hover wins.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct Tooltip {
    pub visible: bool,
    pub info: Option<BlockInfo>,
    pub position: Vec2,
}

impl Tooltip {
    pub fn show(&mut self, info: BlockInfo, position: Vec2) {
        self.visible = true;
        self.info = Some(info);
        self.position = position;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Forget everything tied to the previous scene's blocks.
pub(crate) fn clear_interaction(hover: &mut HoverState, tooltip: &mut Tooltip) {
    hover.hovered = None;
    tooltip.hide();
    tooltip.info = None;
}

pub fn track_pointer(
    mut moved: EventReader<CursorMoved>,
    mut left: EventReader<CursorLeft>,
    mut pointer: ResMut<PointerPosition>,
) {
    let mut latest = None;
    for evt in moved.read() {
        latest = Some(Some(evt.position));
    }
    if !left.is_empty() {
        left.clear();
        latest = Some(None);
    }
    if let Some(position) = latest {
        pointer.0 = position;
    }
}

/// Nearest block hit by `ray`, if any.
pub fn pick_nearest(
    ray: Ray3d,
    candidates: impl IntoIterator<Item = (Entity, Aabb3d)>,
) -> Option<Entity> {
    let cast = RayCast3d::from_ray(ray, f32::MAX);
    candidates
        .into_iter()
        .filter_map(|(entity, bounds)| {
            cast.aabb_intersection_at(&bounds).map(|t| (entity, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}

/// Resolve the hovered block and publish enter/exit events when it changes.
pub fn pick_hovered_block(
    pointer: Res<PointerPosition>,
    over_ui: Res<PointerOverUi>,
    camera_q: Query<(&Camera, &GlobalTransform), With<SceneCamera>>,
    blocks: Query<(Entity, &Block, &InheritedVisibility)>,
    mut hover: ResMut<HoverState>,
    mut events: EventWriter<HoverEvent>,
) {
    let ray = match (pointer.0, over_ui.0, camera_q.get_single()) {
        (Some(screen_pos), false, Ok((camera, cam_transform))) => {
            camera.viewport_to_world(cam_transform, screen_pos).ok()
        }
        _ => None,
    };

    let hit = ray.and_then(|ray| {
        pick_nearest(
            ray,
            blocks
                .iter()
                .filter(|(_, _, visible)| visible.get())
                .map(|(entity, block, _)| (entity, block.bounds)),
        )
    });

    if hit == hover.hovered {
        return;
    }
    if let Some(previous) = hover.hovered {
        events.send(HoverEvent::Exited { entity: previous });
    }
    if let (Some(entity), Some(position)) = (hit, pointer.0) {
        if let Ok((_, block, _)) = blocks.get(entity) {
            events.send(HoverEvent::Entered {
                entity,
                info: block.info.clone(),
                pointer: position,
            });
        }
    }
    hover.hovered = hit;
}

/// Show/hide the tooltip in response to hover events.
pub fn update_tooltip(mut events: EventReader<HoverEvent>, mut tooltip: ResMut<Tooltip>) {
    for evt in events.read() {
        match evt {
            HoverEvent::Entered { info, pointer, .. } => tooltip.show(info.clone(), *pointer),
            HoverEvent::Exited { .. } => tooltip.hide(),
        }
    }
}

/// Tint hovered blocks with an emissive version of their base color.
pub fn apply_hover_emphasis(
    mut events: EventReader<HoverEvent>,
    blocks: Query<(&Block, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for evt in events.read() {
        let (entity, hovered) = match evt {
            HoverEvent::Entered { entity, .. } => (*entity, true),
            HoverEvent::Exited { entity } => (*entity, false),
        };
        // Exited blocks may already be gone after a scene reset.
        let Ok((block, material)) = blocks.get(entity) else {
            continue;
        };
        if let Some(mat) = materials.get_mut(material.id()) {
            mat.emissive = if hovered {
                block.color.scaled(HOVER_EMISSIVE_SCALE).to_linear()
            } else {
                LinearRgba::BLACK
            };
        }
    }
}
