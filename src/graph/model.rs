//! Graph model: an arena of leaves and groups joined by port-to-port links.
//!
//! Nodes are addressed by stable handles ([`LeafId`], [`GroupId`]) rather than
//! by reference, so coordinate tables built at different nesting levels can be
//! merged without any notion of object identity. Handles are handed out in
//! creation order and compare in that order.

use std::collections::HashMap;
use std::fmt;

// ─── Handles ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LeafId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkId(pub(crate) usize);

impl LeafId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl GroupId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl LinkId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Any node of the graph: a leaf or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeId {
    Leaf(LeafId),
    Group(GroupId),
}

impl From<LeafId> for NodeId {
    fn from(id: LeafId) -> Self {
        NodeId::Leaf(id)
    }
}

impl From<GroupId> for NodeId {
    fn from(id: GroupId) -> Self {
        NodeId::Group(id)
    }
}

impl fmt::Display for LeafId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "leaf#{}", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Leaf(id) => id.fmt(f),
            NodeId::Group(id) => id.fmt(f),
        }
    }
}

// ─── Ports & links ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutputPort {
    pub leaf: LeafId,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InputPort {
    pub leaf: LeafId,
    pub index: usize,
}

impl OutputPort {
    pub fn new(leaf: LeafId, index: usize) -> Self {
        Self { leaf, index }
    }
}

impl InputPort {
    pub fn new(leaf: LeafId, index: usize) -> Self {
        Self { leaf, index }
    }
}

impl fmt::Display for OutputPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.out[{}]", self.leaf, self.index)
    }
}

impl fmt::Display for InputPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.in[{}]", self.leaf, self.index)
    }
}

/// A directed connection from one output port to one input port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub output: OutputPort,
    pub input: InputPort,
}

impl Link {
    /// Leaf the link leaves from.
    pub fn source(&self) -> LeafId {
        self.output.leaf
    }

    /// Leaf the link arrives at.
    pub fn target(&self) -> LeafId {
        self.input.leaf
    }

    pub fn is_self_loop(&self) -> bool {
        self.output.leaf == self.input.leaf
    }
}

// ─── Nodes ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub(crate) label: String,
    pub(crate) inputs: usize,
    pub(crate) outputs: usize,
}

impl Leaf {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn input_count(&self) -> usize {
        self.inputs
    }

    pub fn output_count(&self) -> usize {
        self.outputs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub(crate) label: String,
    pub(crate) leaves: Vec<LeafId>,
    pub(crate) groups: Vec<GroupId>,
}

impl Group {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Direct child leaves, in insertion order.
    pub fn leaves(&self) -> &[LeafId] {
        &self.leaves
    }

    /// Direct child groups, in insertion order.
    pub fn groups(&self) -> &[GroupId] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty() && self.groups.is_empty()
    }
}

/// One nesting level: the top of the graph or the inside of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerId {
    Root,
    Group(GroupId),
}

impl From<GroupId> for ContainerId {
    fn from(id: GroupId) -> Self {
        ContainerId::Group(id)
    }
}

// ─── Graph ────────────────────────────────────────────────────────────────────

/// A fully built graph. Read-only; produced by [`crate::GraphBuilder`].
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(crate) leaves: Vec<Leaf>,
    pub(crate) groups: Vec<Group>,
    pub(crate) links: Vec<Link>,
    pub(crate) leaf_parent: Vec<Option<GroupId>>,
    pub(crate) group_parent: Vec<Option<GroupId>>,
    pub(crate) output_links: HashMap<OutputPort, LinkId>,
    pub(crate) input_links: HashMap<InputPort, LinkId>,
}

impl Graph {
    pub fn leaf(&self, id: LeafId) -> Option<&Leaf> {
        self.leaves.get(id.0)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.0)
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn leaf_ids(&self) -> impl Iterator<Item = LeafId> + '_ {
        (0..self.leaves.len()).map(LeafId)
    }

    pub fn group_ids(&self) -> impl Iterator<Item = GroupId> + '_ {
        (0..self.groups.len()).map(GroupId)
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.0)
    }

    /// The link currently attached to an output port, if any.
    pub fn link_at_output(&self, port: OutputPort) -> Option<LinkId> {
        self.output_links.get(&port).copied()
    }

    /// The link currently attached to an input port, if any.
    pub fn link_at_input(&self, port: InputPort) -> Option<LinkId> {
        self.input_links.get(&port).copied()
    }

    /// Label of a leaf or group; empty for unknown handles.
    pub fn label_of(&self, node: NodeId) -> &str {
        match node {
            NodeId::Leaf(id) => self.leaf(id).map(Leaf::label).unwrap_or(""),
            NodeId::Group(id) => self.group(id).map(Group::label).unwrap_or(""),
        }
    }

    /// Direct parent group, `None` for top-level and unknown nodes.
    pub fn parent_of(&self, node: NodeId) -> Option<GroupId> {
        match node {
            NodeId::Leaf(id) => self.leaf_parent.get(id.0).copied().flatten(),
            NodeId::Group(id) => self.group_parent.get(id.0).copied().flatten(),
        }
    }

    /// Direct child leaves of a container.
    pub fn child_leaves(&self, container: ContainerId) -> Vec<LeafId> {
        match container {
            ContainerId::Root => self
                .leaf_ids()
                .filter(|id| self.leaf_parent[id.0].is_none())
                .collect(),
            ContainerId::Group(g) => self
                .group(g)
                .map(|group| group.leaves.clone())
                .unwrap_or_default(),
        }
    }

    /// Direct child groups of a container.
    pub fn child_groups(&self, container: ContainerId) -> Vec<GroupId> {
        match container {
            ContainerId::Root => self
                .group_ids()
                .filter(|id| self.group_parent[id.0].is_none())
                .collect(),
            ContainerId::Group(g) => self
                .group(g)
                .map(|group| group.groups.clone())
                .unwrap_or_default(),
        }
    }

    /// Every leaf inside a container, at any depth.
    pub fn all_leaves_in(&self, container: ContainerId) -> Vec<LeafId> {
        let mut leaves = self.child_leaves(container);
        for group in self.child_groups(container) {
            leaves.extend(self.all_leaves_in(ContainerId::Group(group)));
        }
        leaves
    }

    /// Every group inside a container, at any depth.
    pub fn all_groups_in(&self, container: ContainerId) -> Vec<GroupId> {
        let mut groups = Vec::new();
        for group in self.child_groups(container) {
            groups.push(group);
            groups.extend(self.all_groups_in(ContainerId::Group(group)));
        }
        groups
    }

    /// Whether `node` lies inside `container` at any depth.
    pub fn contains(&self, container: ContainerId, node: NodeId) -> bool {
        self.representative_in(container, node).is_some()
    }

    /// The direct child of `container` that holds `node` (possibly `node`
    /// itself), or `None` when `node` lies outside the container.
    pub fn representative_in(&self, container: ContainerId, node: NodeId) -> Option<NodeId> {
        let target = match container {
            ContainerId::Root => None,
            ContainerId::Group(g) => Some(g),
        };
        if !self.is_known(node) || NodeId::from_container(container) == Some(node) {
            return None;
        }
        let mut current = node;
        // Containment is a forest, so the walk reaches the top in at most `groups` steps.
        loop {
            let parent = self.parent_of(current);
            if parent == target {
                return Some(current);
            }
            current = NodeId::Group(parent?);
        }
    }

    fn is_known(&self, node: NodeId) -> bool {
        match node {
            NodeId::Leaf(id) => id.0 < self.leaves.len(),
            NodeId::Group(id) => id.0 < self.groups.len(),
        }
    }
}

impl NodeId {
    fn from_container(container: ContainerId) -> Option<NodeId> {
        match container {
            ContainerId::Root => None,
            ContainerId::Group(g) => Some(NodeId::Group(g)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_graph_model.rs"]
mod tests;
