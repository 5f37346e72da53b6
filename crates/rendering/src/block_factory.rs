use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;

use metrics::color_mapper::Rgb;
use metrics::layout::{BlockInfo, LayoutNode};

/// A rendered code entity.
#[derive(Component, Debug, Clone)]
pub struct Block {
    pub info: BlockInfo,
    pub color: Rgb,
    /// World-space bounds, used for picking.
    pub bounds: Aabb3d,
    /// Depth of the source node in the metrics tree (0 = top level).
    pub depth: usize,
}

/// Spawn one block for `node` as a child of `parent`.
///
/// The transform is relative to the parent, so a block placed under another
/// block sits on its top face; top-level blocks are parented to the city
/// root and rest on the ground. Every block gets its own material so hover
/// emphasis only tints that block.
pub fn spawn_block(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    node: &LayoutNode,
    parent: Entity,
) -> Entity {
    let mesh = meshes.add(Cuboid::new(node.size.x, node.size.y, node.size.z));
    let material = materials.add(StandardMaterial {
        base_color: node.color.to_color(),
        emissive: LinearRgba::BLACK,
        ..default()
    });

    commands
        .spawn((
            Block {
                info: node.info.clone(),
                color: node.color,
                bounds: node.bounds(),
                depth: node.depth,
            },
            Name::new(node.info.name.clone()),
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(node.local_translation),
            Visibility::default(),
        ))
        .set_parent(parent)
        .id()
}
