//! Graph compaction: collapse every direct child group of a container into a
//! single placeholder leaf.
//!
//! The compacted graph is flat, so the base grid layout can run on it. Each
//! placeholder carries one input port per link entering its group and one
//! output port per link leaving it; links between nodes of the container are
//! rewired onto those ports. The source graph is never touched.

use std::collections::BTreeMap;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::error::GraphError;
use crate::graph::{ContainerId, Graph, GroupId, LeafId, LinkId, NodeId};

// ─── Compacted graph ─────────────────────────────────────────────────────────

/// A node of the compacted graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactNode {
    /// A leaf of the container, kept as is.
    Leaf {
        leaf: LeafId,
        inputs: usize,
        outputs: usize,
    },
    /// Stand-in for a whole child group.
    Placeholder {
        group: GroupId,
        inputs: usize,
        outputs: usize,
    },
}

impl CompactNode {
    /// The node of the source graph this one represents.
    pub fn original(&self) -> NodeId {
        match *self {
            CompactNode::Leaf { leaf, .. } => NodeId::Leaf(leaf),
            CompactNode::Placeholder { group, .. } => NodeId::Group(group),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, CompactNode::Placeholder { .. })
    }

    pub fn input_count(&self) -> usize {
        match *self {
            CompactNode::Leaf { inputs, .. } | CompactNode::Placeholder { inputs, .. } => inputs,
        }
    }

    pub fn output_count(&self) -> usize {
        match *self {
            CompactNode::Leaf { outputs, .. } | CompactNode::Placeholder { outputs, .. } => {
                outputs
            }
        }
    }
}

/// A rewired link: port indices refer to the compacted endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactLink {
    pub output: usize,
    pub input: usize,
    /// The source link this edge was derived from.
    pub link: LinkId,
}

pub type CompactedGraph = DiGraph<CompactNode, CompactLink>;

// ─── GraphCompacter ──────────────────────────────────────────────────────────

pub struct GraphCompacter {
    container: ContainerId,
    compacted: CompactedGraph,
    leaves: BTreeMap<LeafId, NodeIndex>,
    placeholders: BTreeMap<GroupId, NodeIndex>,
}

impl GraphCompacter {
    pub fn new(graph: &Graph, container: ContainerId) -> Self {
        let mut compacted = CompactedGraph::new();
        let mut leaves = BTreeMap::new();
        let mut placeholders = BTreeMap::new();

        for leaf_id in graph.child_leaves(container) {
            let Some(leaf) = graph.leaf(leaf_id) else {
                continue;
            };
            let idx = compacted.add_node(CompactNode::Leaf {
                leaf: leaf_id,
                inputs: leaf.input_count(),
                outputs: leaf.output_count(),
            });
            leaves.insert(leaf_id, idx);
        }
        for group in graph.child_groups(container) {
            let idx = compacted.add_node(CompactNode::Placeholder {
                group,
                inputs: 0,
                outputs: 0,
            });
            placeholders.insert(group, idx);
        }

        for (i, link) in graph.links().iter().enumerate() {
            let src = graph.representative_in(container, link.source().into());
            let tgt = graph.representative_in(container, link.target().into());
            if src == tgt && !matches!(src, Some(NodeId::Leaf(_))) {
                // Internal to one child group, or entirely outside the container.
                continue;
            }

            let output = match src {
                Some(NodeId::Group(g)) => placeholders
                    .get(&g)
                    .map_or(0, |&idx| next_port(&mut compacted, idx, Side::Output)),
                _ => link.output.index,
            };
            let input = match tgt {
                Some(NodeId::Group(g)) => placeholders
                    .get(&g)
                    .map_or(0, |&idx| next_port(&mut compacted, idx, Side::Input)),
                _ => link.input.index,
            };

            let (Some(src), Some(tgt)) = (src, tgt) else {
                // Crosses the container boundary; only the port count is kept.
                continue;
            };
            let (Some(a), Some(b)) = (
                lookup(&leaves, &placeholders, src),
                lookup(&leaves, &placeholders, tgt),
            ) else {
                continue;
            };
            compacted.add_edge(
                a,
                b,
                CompactLink {
                    output,
                    input,
                    link: LinkId(i),
                },
            );
        }

        log::trace!(
            "compacted {:?}: {} nodes ({} placeholders), {} links",
            container,
            compacted.node_count(),
            placeholders.len(),
            compacted.edge_count()
        );

        Self {
            container,
            compacted,
            leaves,
            placeholders,
        }
    }

    pub fn container(&self) -> ContainerId {
        self.container
    }

    /// The flat graph to feed to the base layout.
    pub fn compacted_graph(&self) -> &CompactedGraph {
        &self.compacted
    }

    /// The placeholder standing in for `group`.
    pub fn compacted_group_placeholder(&self, group: GroupId) -> Result<NodeIndex, GraphError> {
        self.placeholders
            .get(&group)
            .copied()
            .ok_or(GraphError::NotADirectChild(group))
    }

    /// The compacted node of a direct child leaf.
    pub fn compacted_leaf(&self, leaf: LeafId) -> Option<NodeIndex> {
        self.leaves.get(&leaf).copied()
    }

    /// Source-graph identity of a compacted node.
    pub fn original_of(&self, node: NodeIndex) -> Option<NodeId> {
        self.compacted.node_weight(node).map(CompactNode::original)
    }

    /// Placeholders introduced by compaction, in group order.
    pub fn compacted_groups(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.placeholders.values().copied()
    }

    pub fn is_placeholder(&self, node: NodeIndex) -> bool {
        self.compacted
            .node_weight(node)
            .is_some_and(CompactNode::is_placeholder)
    }
}

enum Side {
    Input,
    Output,
}

/// Allocate the next port of a placeholder and return its index.
fn next_port(compacted: &mut CompactedGraph, idx: NodeIndex, side: Side) -> usize {
    match (&mut compacted[idx], side) {
        (CompactNode::Placeholder { inputs, .. }, Side::Input) => {
            *inputs += 1;
            *inputs - 1
        }
        (CompactNode::Placeholder { outputs, .. }, Side::Output) => {
            *outputs += 1;
            *outputs - 1
        }
        _ => 0,
    }
}

fn lookup(
    leaves: &BTreeMap<LeafId, NodeIndex>,
    placeholders: &BTreeMap<GroupId, NodeIndex>,
    node: NodeId,
) -> Option<NodeIndex> {
    match node {
        NodeId::Leaf(id) => leaves.get(&id).copied(),
        NodeId::Group(id) => placeholders.get(&id).copied(),
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_compact.rs"]
mod tests;
