//! JSON graph descriptions: the input format of the `groupgrid` binary.
//!
//! ```json
//! {
//!   "leaves": [{ "id": "a", "outputs": 1 }, { "id": "b", "inputs": 1 }],
//!   "groups": [{ "id": "g", "leaves": ["a", "b"] }],
//!   "links":  [{ "from": "a", "output": 0, "to": "b", "input": 0 }]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::error::DescriptionError;

use super::factory::GraphBuilder;
use super::model::{Graph, NodeId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphDescription {
    pub leaves: Vec<LeafDescription>,
    pub groups: Vec<GroupDescription>,
    pub links: Vec<LinkDescription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<LayoutConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafDescription {
    pub id: String,
    #[serde(default)]
    pub inputs: usize,
    #[serde(default)]
    pub outputs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDescription {
    pub id: String,
    #[serde(default)]
    pub leaves: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDescription {
    pub from: String,
    #[serde(default)]
    pub output: usize,
    pub to: String,
    #[serde(default)]
    pub input: usize,
}

/// A built graph together with the textual ids it was described with.
#[derive(Debug, Clone)]
pub struct NamedGraph {
    pub graph: Graph,
    ids: BTreeMap<String, NodeId>,
    names: HashMap<NodeId, String>,
}

impl NamedGraph {
    /// Handle for a textual id.
    pub fn node(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    /// Textual id of a handle.
    pub fn name_of(&self, node: NodeId) -> Option<&str> {
        self.names.get(&node).map(String::as_str)
    }

    /// All `(id, handle)` pairs, sorted by id.
    pub fn ids(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.ids.iter().map(|(name, &node)| (name.as_str(), node))
    }
}

impl GraphDescription {
    pub fn from_json(text: &str) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, DescriptionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the description and build the graph it describes.
    pub fn build(&self) -> Result<NamedGraph, DescriptionError> {
        let mut builder = GraphBuilder::new();
        let mut ids: BTreeMap<String, NodeId> = BTreeMap::new();

        for leaf in &self.leaves {
            let handle = builder.add_leaf(leaf.id.clone(), leaf.inputs, leaf.outputs);
            if ids.insert(leaf.id.clone(), handle.into()).is_some() {
                return Err(DescriptionError::DuplicateId(leaf.id.clone()));
            }
        }
        for group in &self.groups {
            let handle = builder.add_group(group.id.clone());
            if ids.insert(group.id.clone(), handle.into()).is_some() {
                return Err(DescriptionError::DuplicateId(group.id.clone()));
            }
        }

        let lookup = |id: &str| -> Result<NodeId, DescriptionError> {
            ids.get(id)
                .copied()
                .ok_or_else(|| DescriptionError::UnknownId(id.to_string()))
        };

        for group in &self.groups {
            let NodeId::Group(parent) = lookup(&group.id)? else {
                return Err(DescriptionError::UnknownId(group.id.clone()));
            };
            for member in &group.leaves {
                match lookup(member)? {
                    NodeId::Leaf(leaf) => builder.insert_leaf(parent, leaf)?,
                    NodeId::Group(_) => return Err(DescriptionError::UnknownId(member.clone())),
                }
            }
            for member in &group.groups {
                match lookup(member)? {
                    NodeId::Group(child) => builder.insert_group(parent, child)?,
                    NodeId::Leaf(_) => return Err(DescriptionError::UnknownId(member.clone())),
                }
            }
        }

        for link in &self.links {
            let from = match lookup(&link.from)? {
                NodeId::Leaf(leaf) => leaf,
                NodeId::Group(_) => return Err(DescriptionError::LinkOnGroup(link.from.clone())),
            };
            let to = match lookup(&link.to)? {
                NodeId::Leaf(leaf) => leaf,
                NodeId::Group(_) => return Err(DescriptionError::LinkOnGroup(link.to.clone())),
            };
            builder.link(from, link.output, to, link.input)?;
        }

        let names = ids.iter().map(|(name, &node)| (node, name.clone())).collect();
        Ok(NamedGraph {
            graph: builder.build(),
            ids,
            names,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_graph_description.rs"]
mod tests;
