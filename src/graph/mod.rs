//! Graph model: leaves, groups, ports and links, plus the builder and the
//! JSON description used to create them.

pub mod description;
pub mod factory;
pub mod model;

pub use description::{GraphDescription, NamedGraph};
pub use factory::GraphBuilder;
pub use model::{
    ContainerId, Graph, Group, GroupId, InputPort, Leaf, LeafId, Link, LinkId, NodeId, OutputPort,
};
