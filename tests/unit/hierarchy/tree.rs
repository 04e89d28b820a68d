use crate::hierarchy::builder::build_hierarchy;
use crate::hierarchy::raw::RawNode;

fn sample() -> super::Hierarchy {
    build_hierarchy(&RawNode::branch(
        "flare",
        vec![
            RawNode::branch(
                "analytics",
                vec![
                    RawNode::branch(
                        "cluster",
                        vec![
                            RawNode::leaf("AgglomerativeCluster", 3938.0),
                            RawNode::leaf("CommunityStructure", 3812.0),
                        ],
                    ),
                    RawNode::leaf("graph", 1000.0),
                ],
            ),
            RawNode::leaf("util", 500.0),
        ],
    ))
    .unwrap()
}

#[test]
fn path_names_join_root_to_node() {
    let tree = sample();
    let id = tree.find_path("flare/analytics/cluster/CommunityStructure").unwrap();
    assert_eq!(
        tree.path_names(id),
        "flare/analytics/cluster/CommunityStructure"
    );
    assert_eq!(tree.path_names(tree.root_id()), "flare");
}

#[test]
fn ancestors_walk_to_root() {
    let tree = sample();
    let id = tree.find_path("flare/analytics/cluster").unwrap();
    let names: Vec<&str> = tree
        .ancestors(id)
        .map(|a| tree.node(a).name.as_str())
        .collect();
    assert_eq!(names, ["cluster", "analytics", "flare"]);
}

#[test]
fn top_branch_is_depth_one_ancestor() {
    let tree = sample();
    let leaf = tree
        .find_path("flare/analytics/cluster/AgglomerativeCluster")
        .unwrap();
    let analytics = tree.find_path("flare/analytics").unwrap();
    assert_eq!(tree.top_branch(leaf), Some(analytics));
    assert_eq!(tree.top_branch(analytics), Some(analytics));
    assert_eq!(tree.top_branch(tree.root_id()), None);
}

#[test]
fn find_path_rejects_unknown_segments() {
    let tree = sample();
    assert_eq!(tree.find_path("flare"), Some(tree.root_id()));
    assert_eq!(tree.find_path("other/analytics"), None);
    assert_eq!(tree.find_path("flare/nope"), None);
    assert_eq!(tree.find_path(""), None);
}

#[test]
fn leaves_and_weights() {
    let tree = sample();
    let leaf_sum: f64 = tree.leaves().map(|n| n.value).sum();
    assert_eq!(leaf_sum, tree.root().value);
    assert_eq!(tree.leaves().count(), 4);
    for node in tree.descendants().filter(|n| !n.is_leaf()) {
        let sum: f64 = node.children.iter().map(|&c| tree.node(c).value).sum();
        assert!((sum - node.value).abs() < 1e-9);
    }
}
