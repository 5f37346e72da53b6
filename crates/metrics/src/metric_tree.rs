//! Metrics tree as delivered by the analysis service.
//!
//! The JSON schema is `{ width, depth, children: [node, ...] }` where every
//! node carries its category (`type`), size metrics and a footprint already
//! positioned inside its parent's local plane.

use serde::{Deserialize, Deserializer, Serialize};

use crate::fetch_error::FetchError;

/// Kind of code entity a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Package,
    File,
    Struct,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Package, Category::File, Category::Struct];

    pub fn label(self) -> &'static str {
        match self {
            Category::Package => "PACKAGE",
            Category::File => "FILE",
            Category::Struct => "STRUCT",
        }
    }
}

/// Offset of a node's centre inside its parent's local plane.
/// `y` maps onto the world Z axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricNode {
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub number_of_lines: u64,
    #[serde(default)]
    pub number_of_methods: u64,
    #[serde(default)]
    pub number_of_attributes: u64,
    #[serde(default)]
    pub position: Position,
    pub width: f32,
    pub depth: f32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<MetricNode>,
}

impl MetricNode {
    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(MetricNode::node_count).sum::<usize>()
    }

    fn validate(&self, path: &mut Vec<String>) -> Result<(), FetchError> {
        path.push(self.name.clone());
        if !is_positive_extent(self.width) || !is_positive_extent(self.depth) {
            return Err(FetchError::InvalidData(format!(
                "node '{}' has a non-positive footprint ({} x {})",
                path.join("/"),
                self.width,
                self.depth
            )));
        }
        if !self.position.x.is_finite() || !self.position.y.is_finite() {
            return Err(FetchError::InvalidData(format!(
                "node '{}' has a non-finite position",
                path.join("/")
            )));
        }
        for child in &self.children {
            child.validate(path)?;
        }
        path.pop();
        Ok(())
    }
}

/// Root of a metrics response: the overall city footprint plus its top-level nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityData {
    pub width: f32,
    pub depth: f32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<MetricNode>,
}

impl CityData {
    /// Parse and validate a metrics response body.
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        let city: CityData = serde_json::from_str(body)?;
        city.validate()?;
        Ok(city)
    }

    pub fn validate(&self) -> Result<(), FetchError> {
        if !is_positive_extent(self.width) || !is_positive_extent(self.depth) {
            return Err(FetchError::InvalidData(format!(
                "city footprint must be positive, got {} x {}",
                self.width, self.depth
            )));
        }
        let mut path = Vec::new();
        for node in &self.children {
            node.validate(&mut path)?;
        }
        Ok(())
    }

    /// Total number of nodes in the tree (the city footprint itself is not a node).
    pub fn node_count(&self) -> usize {
        self.children.iter().map(MetricNode::node_count).sum()
    }
}

fn is_positive_extent(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// The analysis service emits `null` for leaf nodes.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<MetricNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<MetricNode>>::deserialize(deserializer)?.unwrap_or_default())
}
