use crate::dot::{DotGraph, DotNode, RankDirection};

fn node(id: &str) -> DotNode {
    DotNode {
        id: id.to_string(),
        label: format!("{id}: Dense"),
        fillcolor: "grey".to_string(),
    }
}

#[test]
fn test_add_node_duplicate_is_noop() {
    let mut graph = DotGraph::new_root("g", RankDirection::default(), 96);
    graph.add_node(node("1"));

    // 重复标识的节点插入为 no-op，不报错也不覆盖
    let mut dup = node("1");
    dup.label = "别的标签".to_string();
    graph.add_node(dup);

    assert_eq!(graph.nodes().len(), 1);
    assert_eq!(graph.nodes()[0].label, "1: Dense");
}

#[test]
fn test_edge_insertion_paths() {
    let mut graph = DotGraph::new_root("g", RankDirection::default(), 96);
    graph.add_node(node("1"));
    graph.add_node(node("2"));

    // 1. 直插路径不去重
    graph.add_edge("1", "2");
    graph.add_edge("1", "2");
    assert_eq!(graph.edges().len(), 2);

    // 2. 去重路径：已存在的有序对被跳过
    graph.add_edge_dedup("1", "2");
    assert_eq!(graph.edges().len(), 2);

    // 3. 反向是不同的有序对
    graph.add_edge_dedup("2", "1");
    assert_eq!(graph.edges().len(), 3);
    assert!(graph.has_edge("2", "1"));
}

#[test]
fn test_first_last_node_own_scope_only() {
    let mut graph = DotGraph::new_root("g", RankDirection::default(), 96);
    graph.add_node(node("a"));
    graph.add_node(node("b"));
    graph.add_node(node("c"));

    // 子图的节点不影响本作用域的首 / 末节点
    let mut sub = DotGraph::new_cluster("sub");
    sub.add_node(node("x"));
    graph.add_subgraph(sub);

    assert_eq!(graph.first_node().map(|n| n.id.as_str()), Some("a"));
    assert_eq!(graph.last_node().map(|n| n.id.as_str()), Some("c"));
}

#[test]
fn test_has_node_recursive() {
    let mut graph = DotGraph::new_root("g", RankDirection::default(), 96);
    graph.add_node(node("1"));

    let mut sub = DotGraph::new_cluster("sub");
    sub.add_node(node("9"));
    graph.add_subgraph(sub);

    assert!(graph.has_node("1"));
    assert!(!graph.has_node("9"));
    assert!(graph.has_node_recursive("9"));
    assert!(!graph.has_node_recursive("404"));
}

#[test]
fn test_recursive_counts() {
    let mut graph = DotGraph::new_root("g", RankDirection::default(), 96);
    graph.add_node(node("1"));
    graph.add_node(node("2"));
    graph.add_edge("1", "2");

    let mut sub = DotGraph::new_cluster("sub");
    sub.add_node(node("3"));
    sub.add_node(node("4"));
    sub.add_edge("3", "4");
    graph.add_subgraph(sub);

    assert_eq!(graph.node_count_recursive(), 4);
    assert_eq!(graph.edge_count_recursive(), 2);
}

#[test]
fn test_to_dot_output() {
    let mut graph = DotGraph::new_root("model", RankDirection::LeftRight, 120);
    graph.add_node(node("1"));
    graph.add_node(node("2"));
    graph.add_edge("1", "2");

    let mut sub = DotGraph::new_cluster("block-1");
    sub.add_node(node("3"));
    graph.add_subgraph(sub);

    let dot = graph.to_dot();

    // 图头部
    assert!(dot.contains("digraph \"model\""));
    assert!(dot.contains("rankdir=LR"));
    assert!(dot.contains("concentrate=true"));
    assert!(dot.contains("dpi=120"));

    // cluster：标识只保留安全字符，label 取原名
    assert!(dot.contains("subgraph cluster_block_1"));
    assert!(dot.contains("label=\"block-1\""));
    assert!(dot.contains("style=dashed"));

    // 节点与边
    assert!(dot.contains("\"1\" [label=\"1: Dense\" fillcolor=\"grey\"]"));
    assert!(dot.contains("\"1\" -> \"2\";"));
}

#[test]
fn test_to_dot_escapes_label() {
    let mut graph = DotGraph::new_root("g", RankDirection::default(), 96);
    graph.add_node(DotNode {
        id: "1".to_string(),
        label: "dense: Dense\ninput: (?, 4)".to_string(),
        fillcolor: "#C66AA7".to_string(),
    });

    let dot = graph.to_dot();
    // 换行转义为字面 \n，标签保持单行
    assert!(dot.contains("label=\"dense: Dense\\ninput: (?, 4)\""));
}
