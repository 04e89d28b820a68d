use super::*;
use serde_json::json;

fn raw(v: serde_json::Value) -> RawNode {
    serde_json::from_value(v).unwrap()
}

#[test]
fn aggregates_and_sorts_descending() {
    let tree = build_hierarchy(&raw(json!({
        "name": "root",
        "children": [
            { "name": "A", "value": 10 },
            { "name": "B", "value": 30 },
            { "name": "C", "children": [
                { "name": "c1", "value": 5 },
                { "name": "c2", "value": 15 }
            ]}
        ]
    })))
    .unwrap();

    assert_eq!(tree.root().value, 60.0);
    let names: Vec<&str> = tree
        .children(tree.root_id())
        .iter()
        .map(|&c| tree.node(c).name.as_str())
        .collect();
    assert_eq!(names, ["B", "C", "A"]);

    let c = tree.find_path("root/C").unwrap();
    assert_eq!(tree.node(c).value, 20.0);
    assert_eq!(tree.node(c).height, 1);
    assert_eq!(tree.root().height, 2);
}

#[test]
fn ties_keep_input_order() {
    let tree = build_hierarchy(&raw(json!({
        "name": "root",
        "children": [
            { "name": "first", "value": 1 },
            { "name": "big", "value": 2 },
            { "name": "second", "value": 1 },
            { "name": "third", "value": 1 }
        ]
    })))
    .unwrap();
    let names: Vec<&str> = tree
        .children(tree.root_id())
        .iter()
        .map(|&c| tree.node(c).name.as_str())
        .collect();
    assert_eq!(names, ["big", "first", "second", "third"]);
}

#[test]
fn ids_are_breadth_first_with_parent_links() {
    let tree = build_hierarchy(&raw(json!({
        "name": "r",
        "children": [
            { "name": "x", "children": [ { "name": "x1", "value": 1 } ] },
            { "name": "y", "value": 5 }
        ]
    })))
    .unwrap();
    let order: Vec<&str> = tree.descendants().map(|n| n.name.as_str()).collect();
    assert_eq!(order, ["r", "y", "x", "x1"]);
    for node in tree.descendants() {
        for &c in &node.children {
            assert!(c > node.id);
            assert_eq!(tree.node(c).parent, Some(node.id));
            assert_eq!(tree.node(c).depth, node.depth + 1);
        }
    }
}

#[test]
fn missing_value_counts_as_zero_and_internal_value_is_ignored() {
    let tree = build_hierarchy(&raw(json!({
        "name": "root",
        "value": 999,
        "children": [ { "name": "a" }, { "name": "b", "value": 2 } ]
    })))
    .unwrap();
    assert_eq!(tree.root().value, 2.0);
    assert_eq!(tree.node(tree.find_path("root/a").unwrap()).value, 0.0);
}

#[test]
fn missing_name_is_invalid() {
    let err = build_hierarchy(&raw(json!({
        "name": "root",
        "children": [ { "name": "a", "children": [ { "value": 1 } ] } ]
    })))
    .unwrap_err();
    assert!(matches!(err, SunburstError::InvalidTree(_)));
    assert!(err.to_string().contains("root/a"), "{err}");

    let err = build_hierarchy(&raw(json!({ "value": 1 }))).unwrap_err();
    assert!(err.to_string().contains("root"));
}

#[test]
fn negative_or_non_finite_values_are_invalid() {
    let err = build_hierarchy(&raw(json!({
        "name": "root",
        "children": [ { "name": "neg", "value": -1 } ]
    })))
    .unwrap_err();
    assert!(err.to_string().contains("root/neg"));

    let nan = RawNode::branch("root", vec![RawNode::leaf("n", f64::NAN)]);
    assert!(matches!(
        build_hierarchy(&nan),
        Err(SunburstError::InvalidTree(_))
    ));
}

#[test]
fn single_node_tree() {
    let tree = build_hierarchy(&RawNode::leaf("solo", 4.0)).unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.root().value, 4.0);
    assert_eq!(tree.height(), 0);
}

#[test]
fn flat_table_builds_same_tree_as_nested() {
    let rows = vec![
        FlatNode::new("0", None, "root", None),
        FlatNode::new("1", Some("0"), "A", Some(10.0)),
        FlatNode::new("2", Some("0"), "B", Some(30.0)),
    ];
    let flat = build_hierarchy_from_flat(&rows).unwrap();
    let nested = build_hierarchy(&RawNode::branch(
        "root",
        vec![RawNode::leaf("A", 10.0), RawNode::leaf("B", 30.0)],
    ))
    .unwrap();
    assert_eq!(flat, nested);
}

#[test]
fn flat_table_detects_cycles() {
    let rows = vec![
        FlatNode::new("r", None, "root", None),
        FlatNode::new("a", Some("b"), "A", Some(1.0)),
        FlatNode::new("b", Some("a"), "B", Some(1.0)),
    ];
    let err = build_hierarchy_from_flat(&rows).unwrap_err();
    assert!(err.to_string().contains("cycle"), "{err}");

    let rows = vec![
        FlatNode::new("r", None, "root", None),
        FlatNode::new("s", Some("s"), "self", Some(1.0)),
    ];
    let err = build_hierarchy_from_flat(&rows).unwrap_err();
    assert!(err.to_string().contains("own parent"), "{err}");

    let rows = vec![
        FlatNode::new("a", Some("b"), "A", None),
        FlatNode::new("b", Some("a"), "B", None),
    ];
    let err = build_hierarchy_from_flat(&rows).unwrap_err();
    assert!(err.to_string().contains("no root"), "{err}");
}

#[test]
fn flat_table_structural_errors() {
    let dup = vec![
        FlatNode::new("r", None, "root", None),
        FlatNode::new("r", Some("r"), "again", None),
    ];
    assert!(
        build_hierarchy_from_flat(&dup)
            .unwrap_err()
            .to_string()
            .contains("duplicate id")
    );

    let two_roots = vec![
        FlatNode::new("r1", None, "a", None),
        FlatNode::new("r2", None, "b", None),
    ];
    assert!(
        build_hierarchy_from_flat(&two_roots)
            .unwrap_err()
            .to_string()
            .contains("multiple roots")
    );

    let orphan = vec![
        FlatNode::new("r", None, "root", None),
        FlatNode::new("x", Some("missing"), "x", None),
    ];
    assert!(
        build_hierarchy_from_flat(&orphan)
            .unwrap_err()
            .to_string()
            .contains("unknown parent")
    );

    assert!(build_hierarchy_from_flat(&[]).is_err());
}
