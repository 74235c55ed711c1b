use super::*;
use crate::config::Direction;
use crate::error::GraphError;
use crate::graph::ContainerId;

const SAMPLE: &str = r#"{
    "leaves": [
        { "id": "a", "outputs": 1 },
        { "id": "b", "inputs": 1, "outputs": 1 },
        { "id": "c", "inputs": 1 }
    ],
    "groups": [{ "id": "g", "leaves": ["a", "b"] }],
    "links": [
        { "from": "a", "to": "b" },
        { "from": "b", "output": 0, "to": "c", "input": 0 }
    ]
}"#;

#[test]
fn test_parse_sample() {
    let d = GraphDescription::from_json(SAMPLE).unwrap();
    assert_eq!(d.leaves.len(), 3);
    assert_eq!(d.groups[0].leaves, vec!["a", "b"]);
    assert!(d.groups[0].groups.is_empty());
    assert_eq!(d.links[0].output, 0);
    assert!(d.config.is_none());
}

#[test]
fn test_build_sample() {
    let named = GraphDescription::from_json(SAMPLE).unwrap().build().unwrap();
    let g = named.node("g").unwrap();
    let NodeId::Group(group) = g else {
        panic!("g should be a group");
    };
    let c = named.node("c").unwrap();
    assert_eq!(named.graph.links().len(), 2);
    assert_eq!(named.graph.child_leaves(group.into()).len(), 2);
    assert_eq!(named.graph.child_groups(ContainerId::Root), vec![group]);
    assert_eq!(named.name_of(c), Some("c"));
    assert_eq!(named.graph.label_of(c), "c");
}

#[test]
fn test_ids_sorted() {
    let named = GraphDescription::from_json(SAMPLE).unwrap().build().unwrap();
    let ids: Vec<&str> = named.ids().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["a", "b", "c", "g"]);
}

#[test]
fn test_empty_document() {
    let named = GraphDescription::from_json("{}").unwrap().build().unwrap();
    assert_eq!(named.graph.leaf_count(), 0);
}

#[test]
fn test_embedded_config() {
    let d = GraphDescription::from_json(r#"{ "config": { "direction": "tb" } }"#).unwrap();
    let config = d.config.unwrap();
    assert_eq!(config.direction, Direction::Tb);
    assert_eq!(config.crossing_passes, 24);
}

#[test]
fn test_invalid_json() {
    let err = GraphDescription::from_json("{ leaves: ").unwrap_err();
    assert!(matches!(err, DescriptionError::Json(_)));
}

#[test]
fn test_duplicate_id() {
    let d = GraphDescription::from_json(
        r#"{ "leaves": [{ "id": "x" }], "groups": [{ "id": "x" }] }"#,
    )
    .unwrap();
    assert!(matches!(d.build(), Err(DescriptionError::DuplicateId(id)) if id == "x"));
}

#[test]
fn test_unknown_member() {
    let d = GraphDescription::from_json(r#"{ "groups": [{ "id": "g", "leaves": ["nope"] }] }"#)
        .unwrap();
    assert!(matches!(d.build(), Err(DescriptionError::UnknownId(id)) if id == "nope"));
}

#[test]
fn test_link_on_group_rejected() {
    let d = GraphDescription::from_json(
        r#"{ "leaves": [{ "id": "a", "inputs": 1 }], "groups": [{ "id": "g" }],
             "links": [{ "from": "g", "to": "a" }] }"#,
    )
    .unwrap();
    assert!(matches!(d.build(), Err(DescriptionError::LinkOnGroup(id)) if id == "g"));
}

#[test]
fn test_cyclic_groups_rejected() {
    let d = GraphDescription::from_json(
        r#"{ "groups": [{ "id": "p", "groups": ["q"] }, { "id": "q", "groups": ["p"] }] }"#,
    )
    .unwrap();
    assert!(matches!(
        d.build(),
        Err(DescriptionError::Graph(GraphError::CyclicGrouping { .. }))
    ));
}

#[test]
fn test_double_link_rejected() {
    let d = GraphDescription::from_json(
        r#"{ "leaves": [{ "id": "a", "outputs": 1 }, { "id": "b", "inputs": 1 }, { "id": "c", "inputs": 1 }],
             "links": [{ "from": "a", "to": "b" }, { "from": "a", "to": "c" }] }"#,
    )
    .unwrap();
    assert!(matches!(
        d.build(),
        Err(DescriptionError::Graph(GraphError::PortAlreadyLinked { .. }))
    ));
}

#[test]
fn test_json_roundtrip_keeps_structure() {
    let d = GraphDescription::from_json(SAMPLE).unwrap();
    let again = GraphDescription::from_json(&d.to_json().unwrap()).unwrap();
    assert_eq!(d, again);
}
