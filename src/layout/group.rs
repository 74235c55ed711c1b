//! Recursive group layout.
//!
//! A container is laid out by compacting its child groups into placeholders,
//! running the grid layout on the result, laying out each child group on its
//! own, then translating the child coordinates onto the placeholder
//! positions (the group anchors). Because a group only ever sees its own
//! sub-container, its internal arrangement does not depend on where it ends
//! up in the parent.

use rayon::prelude::*;

use super::compact::GraphCompacter;
use super::grid::GridLayout;
use super::types::CoordinateMap;
use crate::config::LayoutConfig;
use crate::graph::{ContainerId, Graph, GroupId, NodeId};

/// Lay out the whole graph.
pub fn layout(graph: &Graph, config: &LayoutConfig) -> CoordinateMap {
    layout_container(graph, ContainerId::Root, config)
}

/// Lay out one container, recursing into its groups.
///
/// Every leaf inside `container` (at any depth) gets a coordinate in the
/// container's space; groups with no content get a coordinate of their own.
pub fn layout_container(graph: &Graph, container: ContainerId, config: &LayoutConfig) -> CoordinateMap {
    let mut table = layout_compacted(graph, container, config);

    let groups = graph.child_groups(container);
    if groups.is_empty() {
        return table;
    }
    log::debug!(
        "laying out {:?}: {} entries, {} child groups",
        container,
        table.len(),
        groups.len()
    );

    let children: Vec<(GroupId, CoordinateMap)> = if config.parallel {
        groups
            .par_iter()
            .map(|&g| (g, layout_container(graph, g.into(), config)))
            .collect()
    } else {
        groups
            .iter()
            .map(|&g| (g, layout_container(graph, g.into(), config)))
            .collect()
    };

    // The processing order decides the final picture, so it must be total.
    let mut ordered: Vec<&(GroupId, CoordinateMap)> = children.iter().collect();
    ordered.sort_by_key(|(g, _)| group_order_key(graph, *g));
    for (group, child) in ordered {
        if !table.contains(*group) {
            log::warn!("no anchor for {} in {:?}", group, container);
            continue;
        }
        let extent = child.extent();
        push_left(&mut table, *group, extent.width());
        push_down(&mut table, *group, extent.height());
    }

    for (group, child) in children {
        let Some(anchor) = table.remove(group) else {
            continue;
        };
        if child.is_empty() {
            table.insert(group, anchor);
            continue;
        }
        for (node, local) in child.iter() {
            table.insert(node, anchor + local);
        }
    }

    table
}

/// Grid positions of the compacted container: final coordinates for its
/// leaves, anchors (keyed by group) for its child groups.
fn layout_compacted(graph: &Graph, container: ContainerId, config: &LayoutConfig) -> CoordinateMap {
    let compacter = GraphCompacter::new(graph, container);
    let compacted = compacter.compacted_graph();
    let positions = GridLayout::compute(compacted, config);
    compacted
        .node_indices()
        .filter_map(|idx| {
            let node = compacter.original_of(idx)?;
            Some((node, *positions.get(idx.index())?))
        })
        .collect()
}

/// Total order used to process sibling groups:
/// (leaves at any depth, groups at any depth, creation order).
pub fn group_order_key(graph: &Graph, group: GroupId) -> (usize, usize, GroupId) {
    let container = ContainerId::Group(group);
    (
        graph.all_leaves_in(container).len(),
        graph.all_groups_in(container).len(),
        group,
    )
}

/// Shift right, by `offset`, every other entry whose x is at or beyond the
/// anchor's x.
pub(crate) fn push_left(table: &mut CoordinateMap, anchor: GroupId, offset: f64) {
    let Some(base) = table.get(anchor) else {
        return;
    };
    if offset == 0.0 {
        return;
    }
    let anchor = NodeId::Group(anchor);
    for (node, point) in table.iter_mut() {
        if *node != anchor && point.x >= base.x {
            log::trace!("push {} right by {}", node, offset);
            point.translate(offset, 0.0);
        }
    }
}

/// Shift down, by `offset`, every other entry whose y is at or beyond the
/// anchor's y.
pub(crate) fn push_down(table: &mut CoordinateMap, anchor: GroupId, offset: f64) {
    let Some(base) = table.get(anchor) else {
        return;
    };
    if offset == 0.0 {
        return;
    }
    let anchor = NodeId::Group(anchor);
    for (node, point) in table.iter_mut() {
        if *node != anchor && point.y >= base.y {
            log::trace!("push {} down by {}", node, offset);
            point.translate(0.0, offset);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_group.rs"]
mod tests;
