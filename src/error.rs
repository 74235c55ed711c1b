//! Error types for graph construction and graph descriptions.
//!
//! Layout itself never fails; every precondition it relies on is checked
//! while the graph is being built.

use thiserror::Error;

use crate::graph::model::{GroupId, InputPort, LeafId, NodeId, OutputPort};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("while connecting {output} to {input}: I/O are already used")]
    PortAlreadyLinked { output: OutputPort, input: InputPort },

    #[error("port index {index} out of range for {leaf} ({count} available)")]
    PortOutOfRange {
        leaf: LeafId,
        index: usize,
        count: usize,
    },

    #[error("unknown leaf {0}")]
    UnknownLeaf(LeafId),

    #[error("unknown group {0}")]
    UnknownGroup(GroupId),

    #[error("{node} already belongs to {parent}")]
    AlreadyGrouped { node: NodeId, parent: GroupId },

    #[error("nesting {child} into {parent} would make a group contain itself")]
    CyclicGrouping { parent: GroupId, child: GroupId },

    #[error("{0} is not a direct child of the compacted container")]
    NotADirectChild(GroupId),
}

/// Failure while turning a JSON description into a [`crate::Graph`].
#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("invalid graph description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate node id '{0}'")]
    DuplicateId(String),

    #[error("unknown node id '{0}'")]
    UnknownId(String),

    #[error("'{0}' names a group, links must join leaves")]
    LinkOnGroup(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
