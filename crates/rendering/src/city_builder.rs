use bevy::prelude::*;

use metrics::layout::{CityLayout, LayoutNode};

use crate::block_factory::spawn_block;

/// Spawn every block of `layout` under `city_root`, depth-first in input
/// order. Returns the number of blocks spawned.
pub fn spawn_city(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    layout: &CityLayout,
    city_root: Entity,
) -> usize {
    let mut count = 0;
    spawn_level(commands, meshes, materials, &layout.roots, city_root, &mut count);
    count
}

fn spawn_level(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    nodes: &[LayoutNode],
    parent: Entity,
    count: &mut usize,
) {
    for node in nodes {
        let block = spawn_block(commands, meshes, materials, node, parent);
        *count += 1;
        if !node.children.is_empty() {
            spawn_level(commands, meshes, materials, &node.children, block, count);
        }
    }
}
