//! groupgrid: deterministic grid layout for directed node-link graphs whose
//! nodes may be nested into groups.
//!
//! Public API: [`GraphBuilder`] to build a [`Graph`], [`layout`] to place it,
//! [`CoordinateMap::coordinate_of`] to read positions back.

pub mod config;
pub mod error;
pub mod graph;
pub mod layout;

use serde::Serialize;

pub use crate::config::{Direction, LayoutConfig};
pub use crate::error::{DescriptionError, GraphError};
pub use crate::graph::{
    ContainerId, Graph, GraphBuilder, GraphDescription, GroupId, InputPort, LeafId, LinkId,
    NamedGraph, NodeId, OutputPort,
};
pub use crate::layout::{CoordinateMap, Point, layout, layout_container};

/// A laid-out node of a described graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// Positions of every described node that received a coordinate, sorted by id.
pub fn positions(named: &NamedGraph, coordinates: &CoordinateMap) -> Vec<PositionedNode> {
    named
        .ids()
        .filter_map(|(id, node)| {
            let point = coordinates.get(node)?;
            Some(PositionedNode {
                id: id.to_string(),
                x: point.x,
                y: point.y,
            })
        })
        .collect()
}

/// One `id x y` line per node.
pub fn format_listing(nodes: &[PositionedNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        out.push_str(&format!("{} {} {}\n", node.id, node.x, node.y));
    }
    out
}

/// Parse a JSON description and lay it out.
///
/// `config` wins over the description's own `config` field; the defaults
/// apply when neither is present.
pub fn layout_source(
    src: &str,
    config: Option<&LayoutConfig>,
) -> Result<Vec<PositionedNode>, DescriptionError> {
    let description = GraphDescription::from_json(src)?;
    let named = description.build()?;
    let config = config
        .or(description.config.as_ref())
        .cloned()
        .unwrap_or_default();
    let coordinates = layout(&named.graph, &config);
    Ok(positions(&named, &coordinates))
}
