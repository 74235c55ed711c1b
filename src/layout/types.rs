//! Layout types: Point, Extent, CoordinateMap.

use std::collections::BTreeMap;
use std::ops::Add;

use serde::Serialize;

use crate::graph::NodeId;

// ─── Point ───────────────────────────────────────────────────────────────────

/// A position on the logical layout grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

// ─── Extent ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounds of a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Extent {
    /// Bounds of `points`; all zero when there are none.
    pub fn of<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Extent::default();
        };
        iter.fold(
            Extent {
                min_x: first.x,
                max_x: first.x,
                min_y: first.y,
                max_y: first.y,
            },
            |e, p| Extent {
                min_x: e.min_x.min(p.x),
                max_x: e.max_x.max(p.x),
                min_y: e.min_y.min(p.y),
                max_y: e.max_y.max(p.y),
            },
        )
    }

    pub fn width(&self) -> f64 {
        (self.max_x - self.min_x).abs()
    }

    pub fn height(&self) -> f64 {
        (self.max_y - self.min_y).abs()
    }
}

// ─── CoordinateMap ───────────────────────────────────────────────────────────

/// Node → coordinate table produced by one layout pass.
///
/// Iteration follows handle order, so two maps built from the same
/// construction sequence iterate identically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateMap {
    entries: BTreeMap<NodeId, Point>,
}

impl CoordinateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: impl Into<NodeId>, point: Point) -> Option<Point> {
        self.entries.insert(node.into(), point)
    }

    pub fn remove(&mut self, node: impl Into<NodeId>) -> Option<Point> {
        self.entries.remove(&node.into())
    }

    pub fn get(&self, node: impl Into<NodeId>) -> Option<Point> {
        self.entries.get(&node.into()).copied()
    }

    /// Coordinate of `node`, or the origin when the node was never laid out.
    pub fn coordinate_of(&self, node: impl Into<NodeId>) -> Point {
        self.get(node).unwrap_or(Point::ORIGIN)
    }

    pub fn contains(&self, node: impl Into<NodeId>) -> bool {
        self.entries.contains_key(&node.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.entries.iter().map(|(&node, &point)| (node, point))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&NodeId, &mut Point)> + '_ {
        self.entries.iter_mut()
    }

    pub fn extent(&self) -> Extent {
        Extent::of(self.entries.values())
    }
}

impl FromIterator<(NodeId, Point)> for CoordinateMap {
    fn from_iter<T: IntoIterator<Item = (NodeId, Point)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_types.rs"]
mod tests;
