//! GraphBuilder: the only way to create a [`Graph`].
//!
//! All structural preconditions of the layout engine are enforced here:
//! a port holds at most one link, a node has at most one parent, and a group
//! can never end up containing itself.

use crate::error::GraphError;

use super::model::{
    Graph, Group, GroupId, InputPort, Leaf, LeafId, Link, LinkId, NodeId, OutputPort,
};

#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a top-level leaf with a fixed number of input and output ports.
    pub fn add_leaf(&mut self, label: impl Into<String>, inputs: usize, outputs: usize) -> LeafId {
        let id = LeafId(self.graph.leaves.len());
        self.graph.leaves.push(Leaf {
            label: label.into(),
            inputs,
            outputs,
        });
        self.graph.leaf_parent.push(None);
        id
    }

    /// Create an empty top-level group.
    pub fn add_group(&mut self, label: impl Into<String>) -> GroupId {
        let id = GroupId(self.graph.groups.len());
        self.graph.groups.push(Group {
            label: label.into(),
            ..Group::default()
        });
        self.graph.group_parent.push(None);
        id
    }

    /// Move a top-level leaf into `group`.
    pub fn insert_leaf(&mut self, group: GroupId, leaf: LeafId) -> Result<(), GraphError> {
        self.check_group(group)?;
        self.check_leaf(leaf)?;
        if let Some(parent) = self.graph.leaf_parent[leaf.0] {
            return Err(GraphError::AlreadyGrouped {
                node: leaf.into(),
                parent,
            });
        }
        self.graph.leaf_parent[leaf.0] = Some(group);
        self.graph.groups[group.0].leaves.push(leaf);
        Ok(())
    }

    /// Nest a top-level group `child` into `parent`.
    ///
    /// Fails eagerly when the nesting would close a containment cycle.
    pub fn insert_group(&mut self, parent: GroupId, child: GroupId) -> Result<(), GraphError> {
        self.check_group(parent)?;
        self.check_group(child)?;
        if let Some(current) = self.graph.group_parent[child.0] {
            return Err(GraphError::AlreadyGrouped {
                node: child.into(),
                parent: current,
            });
        }
        let mut ancestor = Some(parent);
        while let Some(group) = ancestor {
            if group == child {
                return Err(GraphError::CyclicGrouping { parent, child });
            }
            ancestor = self.graph.group_parent[group.0];
        }
        self.graph.group_parent[child.0] = Some(parent);
        self.graph.groups[parent.0].groups.push(child);
        Ok(())
    }

    /// Convenience: a group holding `leaves` and `groups`, all currently top-level.
    pub fn add_group_with(
        &mut self,
        label: impl Into<String>,
        leaves: &[LeafId],
        groups: &[GroupId],
    ) -> Result<GroupId, GraphError> {
        let id = self.add_group(label);
        for &leaf in leaves {
            self.insert_leaf(id, leaf)?;
        }
        for &group in groups {
            self.insert_group(id, group)?;
        }
        Ok(id)
    }

    /// Connect an output of a leaf to an input of another one (or itself).
    pub fn connect(&mut self, output: OutputPort, input: InputPort) -> Result<LinkId, GraphError> {
        let source = self.check_leaf(output.leaf)?;
        if output.index >= source.outputs {
            return Err(GraphError::PortOutOfRange {
                leaf: output.leaf,
                index: output.index,
                count: source.outputs,
            });
        }
        let target = self.check_leaf(input.leaf)?;
        if input.index >= target.inputs {
            return Err(GraphError::PortOutOfRange {
                leaf: input.leaf,
                index: input.index,
                count: target.inputs,
            });
        }
        if self.graph.output_links.contains_key(&output)
            || self.graph.input_links.contains_key(&input)
        {
            return Err(GraphError::PortAlreadyLinked { output, input });
        }
        let id = LinkId(self.graph.links.len());
        self.graph.links.push(Link { output, input });
        self.graph.output_links.insert(output, id);
        self.graph.input_links.insert(input, id);
        Ok(id)
    }

    /// Shorthand for `connect` on port indices.
    pub fn link(
        &mut self,
        from: LeafId,
        output: usize,
        to: LeafId,
        input: usize,
    ) -> Result<LinkId, GraphError> {
        self.connect(OutputPort::new(from, output), InputPort::new(to, input))
    }

    pub fn parent_of(&self, node: NodeId) -> Option<GroupId> {
        self.graph.parent_of(node)
    }

    pub fn build(self) -> Graph {
        self.graph
    }

    fn check_leaf(&self, leaf: LeafId) -> Result<&Leaf, GraphError> {
        self.graph.leaf(leaf).ok_or(GraphError::UnknownLeaf(leaf))
    }

    fn check_group(&self, group: GroupId) -> Result<&Group, GraphError> {
        self.graph.group(group).ok_or(GraphError::UnknownGroup(group))
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_graph_factory.rs"]
mod tests;
