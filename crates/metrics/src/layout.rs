//! Pure city layout: metrics tree → positioned, colored block tree.
//!
//! Nothing here touches the ECS. The renderer walks the resulting
//! [`CityLayout`] and spawns one entity per [`LayoutNode`].
//!
//! Stacking rule: a node's base sits flush on its parent's top face. In the
//! parent's local frame (origin at the parent's centre) that is
//! `parent_height / 2 + height / 2`; a root node rests on the ground at
//! `height / 2`. The node's `position` gives the local X/Z offset.

use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;

use crate::camera_framing::{frame_city, CameraPose};
use crate::color_mapper::{block_color, Rgb};
use crate::config::MIN_BLOCK_HEIGHT;
use crate::metric_tree::{Category, CityData, MetricNode};

/// Immutable snapshot shown in the hover tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockInfo {
    pub name: String,
    pub url: String,
    pub category: Category,
    pub number_of_methods: u64,
    pub number_of_lines: u64,
    pub number_of_attributes: u64,
}

impl From<&MetricNode> for BlockInfo {
    fn from(node: &MetricNode) -> Self {
        Self {
            name: node.name.clone(),
            url: node.url.clone(),
            category: node.category,
            number_of_methods: node.number_of_methods,
            number_of_lines: node.number_of_lines,
            number_of_attributes: node.number_of_attributes,
        }
    }
}

/// Layout result for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub info: BlockInfo,
    /// (width, height, depth) of the block's box.
    pub size: Vec3,
    /// Centre relative to the parent block's centre (or the world origin for roots).
    pub local_translation: Vec3,
    /// Centre in world space.
    pub world_translation: Vec3,
    pub color: Rgb,
    /// 0 for top-level nodes.
    pub depth: usize,
    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    pub fn base_y(&self) -> f32 {
        self.world_translation.y - self.size.y / 2.0
    }

    pub fn top_y(&self) -> f32 {
        self.world_translation.y + self.size.y / 2.0
    }

    /// World-space bounding box, used for pointer picking.
    pub fn bounds(&self) -> Aabb3d {
        Aabb3d::new(self.world_translation, self.size / 2.0)
    }
}

/// Layout of a whole city: its footprint and top-level blocks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CityLayout {
    pub width: f32,
    pub depth: f32,
    pub roots: Vec<LayoutNode>,
}

impl CityLayout {
    /// Depth-first, input-order walk over every node.
    pub fn iter(&self) -> LayoutIter<'_> {
        LayoutIter {
            stack: self.roots.iter().rev().collect(),
        }
    }

    pub fn block_count(&self) -> usize {
        self.iter().count()
    }

    /// Camera pose that frames this city's footprint.
    pub fn camera_pose(&self) -> CameraPose {
        frame_city(self.width, self.depth)
    }
}

pub struct LayoutIter<'a> {
    stack: Vec<&'a LayoutNode>,
}

impl<'a> Iterator for LayoutIter<'a> {
    type Item = &'a LayoutNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Height of a block for the given method count.
pub fn block_height(number_of_methods: u64) -> f32 {
    (number_of_methods as f32).max(MIN_BLOCK_HEIGHT)
}

/// Compute the full layout of a metrics tree.
pub fn compute_layout(city: &CityData) -> CityLayout {
    CityLayout {
        width: city.width,
        depth: city.depth,
        roots: layout_level(&city.children, None, 0),
    }
}

fn layout_level(nodes: &[MetricNode], parent: Option<&LayoutNode>, depth: usize) -> Vec<LayoutNode> {
    nodes
        .iter()
        .map(|node| {
            let height = block_height(node.number_of_methods);
            let parent_half_height = parent.map_or(0.0, |p| p.size.y / 2.0);
            let local_translation = Vec3::new(
                node.position.x,
                parent_half_height + height / 2.0,
                node.position.y,
            );
            let world_translation =
                parent.map_or(Vec3::ZERO, |p| p.world_translation) + local_translation;

            let mut laid_out = LayoutNode {
                info: BlockInfo::from(node),
                size: Vec3::new(node.width, height, node.depth),
                local_translation,
                world_translation,
                color: block_color(node.category, node.number_of_lines),
                depth,
                children: Vec::new(),
            };
            if !node.children.is_empty() {
                laid_out.children = layout_level(&node.children, Some(&laid_out), depth + 1);
            }
            laid_out
        })
        .collect()
}
