use super::*;
use crate::graph::GraphBuilder;

/// root: a, g1{ b, g2{ c } }, g3{}
fn nested() -> (Graph, LeafId, LeafId, LeafId, GroupId, GroupId, GroupId) {
    let mut b = GraphBuilder::new();
    let a = b.add_leaf("a", 1, 1);
    let lb = b.add_leaf("b", 1, 1);
    let c = b.add_leaf("c", 1, 1);
    let g2 = b.add_group_with("g2", &[c], &[]).unwrap();
    let g1 = b.add_group_with("g1", &[lb], &[g2]).unwrap();
    let g3 = b.add_group("g3");
    (b.build(), a, lb, c, g1, g2, g3)
}

#[test]
fn test_handles_follow_creation_order() {
    let (g, a, b, c, g1, g2, g3) = nested();
    assert!(a < b && b < c);
    assert!(g2 < g1 && g1 < g3);
    assert_eq!(a.index(), 0);
    assert_eq!(g.leaf_count(), 3);
    assert_eq!(g.group_count(), 3);
}

#[test]
fn test_root_children() {
    let (g, a, _, _, g1, _, g3) = nested();
    assert_eq!(g.child_leaves(ContainerId::Root), vec![a]);
    assert_eq!(g.child_groups(ContainerId::Root), vec![g1, g3]);
}

#[test]
fn test_group_children() {
    let (g, _, b, c, g1, g2, g3) = nested();
    assert_eq!(g.child_leaves(g1.into()), vec![b]);
    assert_eq!(g.child_groups(g1.into()), vec![g2]);
    assert_eq!(g.child_leaves(g2.into()), vec![c]);
    assert!(g.group(g3).unwrap().is_empty());
}

#[test]
fn test_all_leaves_in_is_transitive() {
    let (g, a, b, c, g1, _, g3) = nested();
    assert_eq!(g.all_leaves_in(g1.into()), vec![b, c]);
    assert_eq!(g.all_leaves_in(ContainerId::Root), vec![a, b, c]);
    assert!(g.all_leaves_in(g3.into()).is_empty());
}

#[test]
fn test_all_groups_in() {
    let (g, _, _, _, g1, g2, g3) = nested();
    assert_eq!(g.all_groups_in(ContainerId::Root), vec![g1, g2, g3]);
    assert_eq!(g.all_groups_in(g1.into()), vec![g2]);
}

#[test]
fn test_parent_of() {
    let (g, a, b, c, g1, g2, _) = nested();
    assert_eq!(g.parent_of(a.into()), None);
    assert_eq!(g.parent_of(b.into()), Some(g1));
    assert_eq!(g.parent_of(c.into()), Some(g2));
    assert_eq!(g.parent_of(g2.into()), Some(g1));
    assert_eq!(g.parent_of(g1.into()), None);
}

#[test]
fn test_representative_in() {
    let (g, a, b, c, g1, g2, g3) = nested();
    assert_eq!(g.representative_in(ContainerId::Root, c.into()), Some(g1.into()));
    assert_eq!(g.representative_in(ContainerId::Root, a.into()), Some(a.into()));
    assert_eq!(g.representative_in(g1.into(), c.into()), Some(g2.into()));
    assert_eq!(g.representative_in(g1.into(), b.into()), Some(b.into()));
    assert_eq!(g.representative_in(g1.into(), a.into()), None);
    assert_eq!(g.representative_in(g3.into(), c.into()), None);
    // A container is not inside itself.
    assert_eq!(g.representative_in(g1.into(), g1.into()), None);
}

#[test]
fn test_contains() {
    let (g, a, _, c, g1, g2, _) = nested();
    assert!(g.contains(ContainerId::Root, c.into()));
    assert!(g.contains(g1.into(), c.into()));
    assert!(g.contains(g1.into(), g2.into()));
    assert!(!g.contains(g2.into(), a.into()));
}

#[test]
fn test_unknown_handles() {
    let (g, ..) = nested();
    assert!(g.leaf(LeafId(42)).is_none());
    assert!(g.group(GroupId(42)).is_none());
    assert_eq!(g.parent_of(NodeId::Leaf(LeafId(42))), None);
    assert!(!g.contains(ContainerId::Root, NodeId::Leaf(LeafId(42))));
    assert_eq!(g.label_of(NodeId::Group(GroupId(42))), "");
}

#[test]
fn test_labels() {
    let (g, a, _, _, g1, ..) = nested();
    assert_eq!(g.label_of(a.into()), "a");
    assert_eq!(g.label_of(g1.into()), "g1");
}

#[test]
fn test_link_endpoints() {
    let mut b = GraphBuilder::new();
    let x = b.add_leaf("x", 1, 1);
    let y = b.add_leaf("y", 2, 1);
    let l = b.link(x, 0, y, 0).unwrap();
    let s = b.link(y, 0, y, 1).unwrap();
    let g = b.build();
    let link = g.link(l).unwrap();
    assert_eq!(link.source(), x);
    assert_eq!(link.target(), y);
    assert!(!link.is_self_loop());
    assert!(g.link(s).unwrap().is_self_loop());
    assert_eq!(g.link_at_output(OutputPort::new(x, 0)), Some(l));
    assert_eq!(g.link_at_input(InputPort::new(y, 0)), Some(l));
    assert_eq!(g.link_at_input(InputPort::new(y, 1)), Some(s));
    assert_eq!(g.link_at_input(InputPort::new(x, 0)), None);
}

#[test]
fn test_display() {
    assert_eq!(LeafId(3).to_string(), "leaf#3");
    assert_eq!(NodeId::Group(GroupId(1)).to_string(), "group#1");
    assert_eq!(OutputPort::new(LeafId(2), 1).to_string(), "leaf#2.out[1]");
    assert_eq!(InputPort::new(LeafId(2), 0).to_string(), "leaf#2.in[0]");
}
