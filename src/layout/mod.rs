//! Layout engine: the base grid layout, graph compaction and the recursive
//! group layout built on top of them.

pub mod compact;
pub mod grid;
pub mod group;
pub mod types;

pub use compact::{CompactLink, CompactNode, CompactedGraph, GraphCompacter};
pub use grid::GridLayout;
pub use group::{group_order_key, layout, layout_container};
pub use types::{CoordinateMap, Extent, Point};
