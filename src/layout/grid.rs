//! Base grid layout for flat graphs.
//!
//! Every node of the input receives a distinct position on an N×N grid
//! (N = node count). The placement is a layered one:
//!
//!   1. Cycle removal (greedy-FAS)
//!   2. Layer assignment (longest path)
//!   3. Dummy node insertion
//!   4. Crossing minimisation (barycenter)
//!   5. Grid assignment: layer on the main axis, rank on the cross axis
//!
//! Ties are always broken by node index, never by hashing, so the same
//! graph yields the same grid every run.

use std::collections::BTreeSet;

use petgraph::Direction as EdgeDirection;
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;

use super::types::Point;
use crate::config::{Direction, LayoutConfig};

// ─── Mini-graph helpers ───────────────────────────────────────────────────────

/// Index-based adjacency used by every phase. Self-loops are not stored.
#[derive(Debug, Clone, Default)]
pub(crate) struct AdjGraph {
    node_count: usize,
    successors: Vec<Vec<usize>>,
    predecessors: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
}

impl AdjGraph {
    fn with_nodes(node_count: usize) -> Self {
        Self {
            node_count,
            successors: vec![Vec::new(); node_count],
            predecessors: vec![Vec::new(); node_count],
            edges: Vec::new(),
        }
    }

    fn add_node(&mut self) -> usize {
        self.successors.push(Vec::new());
        self.predecessors.push(Vec::new());
        self.node_count += 1;
        self.node_count - 1
    }

    fn add_edge(&mut self, src: usize, tgt: usize) {
        if src == tgt {
            return;
        }
        self.successors[src].push(tgt);
        self.predecessors[tgt].push(src);
        self.edges.push((src, tgt));
    }

    fn neighbors(&self, id: usize, dir: EdgeDirection) -> &[usize] {
        let lists = match dir {
            EdgeDirection::Outgoing => &self.successors,
            EdgeDirection::Incoming => &self.predecessors,
        };
        lists.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

/// Build an AdjGraph from a petgraph DiGraph, in edge index order.
pub(crate) fn petgraph_to_adj<N, E>(digraph: &DiGraph<N, E>) -> AdjGraph {
    let mut ag = AdjGraph::with_nodes(digraph.node_count());
    for edge in digraph.edge_references() {
        ag.add_edge(edge.source().index(), edge.target().index());
    }
    ag
}

// ─── Cycle Removal (Greedy-FAS) ─────────────────────────────────────────────

/// Compute a node ordering using the greedy-FAS heuristic.
pub(crate) fn greedy_fas_ordering(ag: &AdjGraph) -> Vec<usize> {
    let mut active: BTreeSet<usize> = (0..ag.node_count).collect();
    let mut out_deg: Vec<i64> = (0..ag.node_count)
        .map(|n| ag.successors[n].len() as i64)
        .collect();
    let mut in_deg: Vec<i64> = (0..ag.node_count)
        .map(|n| ag.predecessors[n].len() as i64)
        .collect();

    let mut s1: Vec<usize> = Vec::new();
    let mut s2: Vec<usize> = Vec::new();

    while !active.is_empty() {
        loop {
            let sinks: Vec<usize> = active.iter().copied().filter(|&n| out_deg[n] == 0).collect();
            if sinks.is_empty() {
                break;
            }
            for sink in sinks {
                active.remove(&sink);
                s2.push(sink);
                for &pred in &ag.predecessors[sink] {
                    if active.contains(&pred) {
                        out_deg[pred] -= 1;
                    }
                }
            }
        }

        loop {
            let sources: Vec<usize> = active.iter().copied().filter(|&n| in_deg[n] == 0).collect();
            if sources.is_empty() {
                break;
            }
            for source in sources {
                active.remove(&source);
                s1.push(source);
                for &succ in &ag.successors[source] {
                    if active.contains(&succ) {
                        in_deg[succ] -= 1;
                    }
                }
            }
        }

        // Highest (out - in) wins; the lowest index wins a tie.
        let mut best: Option<(usize, i64)> = None;
        for &n in &active {
            let delta = out_deg[n] - in_deg[n];
            if best.is_none_or(|(_, d)| delta > d) {
                best = Some((n, delta));
            }
        }
        if let Some((best, _)) = best {
            active.remove(&best);
            s1.push(best);
            for &succ in &ag.successors[best] {
                if active.contains(&succ) {
                    in_deg[succ] -= 1;
                }
            }
            for &pred in &ag.predecessors[best] {
                if active.contains(&pred) {
                    out_deg[pred] -= 1;
                }
            }
        }
    }

    s2.reverse();
    s1.extend(s2);
    s1
}

/// Reverse every edge that points backwards in the greedy-FAS ordering.
pub(crate) fn remove_cycles(ag: &AdjGraph) -> AdjGraph {
    let mut position = vec![0usize; ag.node_count];
    for (i, n) in greedy_fas_ordering(ag).into_iter().enumerate() {
        position[n] = i;
    }

    let mut dag = AdjGraph::with_nodes(ag.node_count);
    for &(src, tgt) in &ag.edges {
        if position[src] > position[tgt] {
            dag.add_edge(tgt, src);
        } else {
            dag.add_edge(src, tgt);
        }
    }
    dag
}

// ─── Layer Assignment ────────────────────────────────────────────────────────

pub(crate) struct LayerAssignment {
    pub layers: Vec<usize>,
    pub layer_count: usize,
}

impl LayerAssignment {
    /// Longest-path layering of an acyclic graph.
    pub fn assign(dag: &AdjGraph) -> Self {
        let mut layers = vec![0usize; dag.node_count];

        let mut changed = true;
        while changed {
            changed = false;
            for &(src, tgt) in &dag.edges {
                if layers[tgt] < layers[src] + 1 {
                    layers[tgt] = layers[src] + 1;
                    changed = true;
                }
            }
        }

        let layer_count = layers.iter().copied().max().map_or(1, |m| m + 1);
        Self {
            layers,
            layer_count,
        }
    }
}

// ─── Dummy Node Insertion ────────────────────────────────────────────────────

pub(crate) struct AugmentedGraph {
    pub ag: AdjGraph,
    /// Nodes below this index are real; the rest are dummies.
    pub real_count: usize,
    pub layers: Vec<usize>,
    pub layer_count: usize,
}

impl AugmentedGraph {
    pub fn is_dummy(&self, id: usize) -> bool {
        id >= self.real_count
    }
}

/// Split every edge spanning several layers into a chain of dummy nodes.
pub(crate) fn insert_dummy_nodes(dag: &AdjGraph, la: &LayerAssignment) -> AugmentedGraph {
    let mut ag = AdjGraph::with_nodes(dag.node_count);
    let mut layers = la.layers.clone();

    for &(src, tgt) in &dag.edges {
        let (src_layer, tgt_layer) = (layers[src], layers[tgt]);
        if tgt_layer <= src_layer + 1 {
            ag.add_edge(src, tgt);
            continue;
        }
        let mut chain_prev = src;
        for dummy_layer in (src_layer + 1)..tgt_layer {
            let dummy = ag.add_node();
            layers.push(dummy_layer);
            ag.add_edge(chain_prev, dummy);
            chain_prev = dummy;
        }
        ag.add_edge(chain_prev, tgt);
    }

    AugmentedGraph {
        ag,
        real_count: dag.node_count,
        layers,
        layer_count: la.layer_count,
    }
}

// ─── Crossing Minimization ───────────────────────────────────────────────────

fn barycenter(node: usize, ag: &AdjGraph, neighbor_pos: &[Option<f64>], dir: EdgeDirection) -> f64 {
    let positions: Vec<f64> = ag
        .neighbors(node, dir)
        .iter()
        .filter_map(|&nb| neighbor_pos.get(nb).copied().flatten())
        .collect();
    if positions.is_empty() {
        f64::INFINITY
    } else {
        positions.iter().sum::<f64>() / positions.len() as f64
    }
}

pub(crate) fn count_crossings(ordering: &[Vec<usize>], ag: &AdjGraph) -> usize {
    let mut total = 0usize;
    for l_idx in 0..ordering.len().saturating_sub(1) {
        let mut tgt_pos: Vec<Option<usize>> = vec![None; ag.node_count];
        for (i, &n) in ordering[l_idx + 1].iter().enumerate() {
            tgt_pos[n] = Some(i);
        }
        let mut edges: Vec<(usize, usize)> = Vec::new();
        for (sp, &src) in ordering[l_idx].iter().enumerate() {
            for &nb in &ag.successors[src] {
                if let Some(tp) = tgt_pos[nb] {
                    edges.push((sp, tp));
                }
            }
        }
        for i in 0..edges.len() {
            for j in (i + 1)..edges.len() {
                let (ei0, ei1) = edges[i];
                let (ej0, ej1) = edges[j];
                if (ei0 < ej0 && ei1 > ej1) || (ei0 > ej0 && ei1 < ej1) {
                    total += 1;
                }
            }
        }
    }
    total
}

fn sort_layer(
    layer: &mut [usize],
    reference: &[usize],
    ag: &AdjGraph,
    dir: EdgeDirection,
) {
    let mut pos: Vec<Option<f64>> = vec![None; ag.node_count];
    for (i, &n) in reference.iter().enumerate() {
        pos[n] = Some(i as f64);
    }
    // Stable sort: equal barycenters keep their previous relative order.
    layer.sort_by(|&a, &b| {
        let ba = barycenter(a, ag, &pos, dir);
        let bb = barycenter(b, ag, &pos, dir);
        ba.partial_cmp(&bb).unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Order the nodes of every layer, keeping the ordering with fewest crossings.
pub(crate) fn minimise_crossings(aug: &AugmentedGraph, max_passes: usize) -> Vec<Vec<usize>> {
    let mut ordering: Vec<Vec<usize>> = vec![Vec::new(); aug.layer_count];
    for (node, &layer) in aug.layers.iter().enumerate() {
        ordering[layer].push(node);
    }

    let mut best = count_crossings(&ordering, &aug.ag);
    let mut best_ordering = ordering.clone();

    for _pass in 0..max_passes {
        if best == 0 {
            break;
        }
        for layer_idx in 1..aug.layer_count {
            let (done, rest) = ordering.split_at_mut(layer_idx);
            sort_layer(&mut rest[0], &done[layer_idx - 1], &aug.ag, EdgeDirection::Incoming);
        }
        for layer_idx in (0..aug.layer_count.saturating_sub(1)).rev() {
            let (head, tail) = ordering.split_at_mut(layer_idx + 1);
            sort_layer(&mut head[layer_idx], &tail[0], &aug.ag, EdgeDirection::Outgoing);
        }

        let crossings = count_crossings(&ordering, &aug.ag);
        if crossings >= best {
            break;
        }
        best = crossings;
        best_ordering = ordering.clone();
    }

    best_ordering
}

// ─── Grid Assignment ─────────────────────────────────────────────────────────

/// Map (layer, rank among real nodes) onto the grid axes.
pub(crate) fn assign_grid(
    ordering: &[Vec<usize>],
    aug: &AugmentedGraph,
    direction: Direction,
) -> Vec<Point> {
    let mut points = vec![Point::ORIGIN; aug.real_count];
    for (layer, nodes) in ordering.iter().enumerate() {
        let real = nodes.iter().copied().filter(|&n| !aug.is_dummy(n));
        for (rank, node) in real.enumerate() {
            let (main, cross) = (layer as f64, rank as f64);
            points[node] = match direction {
                Direction::Lr => Point::new(main, cross),
                Direction::Tb => Point::new(cross, main),
            };
        }
    }
    points
}

// ─── GridLayout Engine ───────────────────────────────────────────────────────

/// Layered grid layout of a flat graph.
pub struct GridLayout;

impl GridLayout {
    /// One point per node of `graph`, indexed by node index.
    pub fn compute<N, E>(graph: &DiGraph<N, E>, config: &LayoutConfig) -> Vec<Point> {
        if graph.node_count() == 0 {
            return Vec::new();
        }
        let ag = petgraph_to_adj(graph);
        let dag = remove_cycles(&ag);
        let la = LayerAssignment::assign(&dag);
        let aug = insert_dummy_nodes(&dag, &la);
        let ordering = minimise_crossings(&aug, config.crossing_passes);
        assign_grid(&ordering, &aug, config.direction)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_grid.rs"]
mod tests;
