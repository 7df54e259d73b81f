/*
 * @Author       : 老董
 * @Date         : 2026-08-30
 * @Description  : 抽象 DOT 图容器：节点 / 边 / 嵌套 cluster + DOT 文本生成
 */

use super::types::RankDirection;
use std::collections::HashSet;

/// DOT 节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotNode {
    /// 节点标识（层的稳定标识的字符串形式）
    pub id: String,
    /// 显示标签（可含换行）
    pub label: String,
    /// 填充色
    pub fillcolor: String,
}

/// DOT 边（有向：src -> dst）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotEdge {
    pub src: String,
    pub dst: String,
}

/// 抽象 DOT 图：节点、边与嵌套子图（cluster）的可变容器
///
/// 不变式：
/// - 节点标识在单个作用域内唯一，重复 `add_node` 为 no-op（不报错）
/// - `add_edge` 为直插路径，不去重；`add_edge_dedup` 跳过已存在的
///   有序 (src, dst) 对——两条路径的差异是刻意保留的
/// - `first_node` / `last_node` 只看本作用域节点的插入顺序，
///   不进入子图，作为 cluster 的外部接线点
#[derive(Debug, Clone)]
pub struct DotGraph {
    name: String,
    is_cluster: bool,
    rank_direction: RankDirection,
    dpi: u32,
    nodes: Vec<DotNode>,
    node_ids: HashSet<String>,
    edges: Vec<DotEdge>,
    edge_keys: HashSet<(String, String)>,
    subgraphs: Vec<DotGraph>,
}

impl DotGraph {
    /// 根图
    pub fn new_root(name: &str, rank_direction: RankDirection, dpi: u32) -> Self {
        Self {
            name: name.to_string(),
            is_cluster: false,
            rank_direction,
            dpi,
            nodes: Vec::new(),
            node_ids: HashSet::new(),
            edges: Vec::new(),
            edge_keys: HashSet::new(),
            subgraphs: Vec::new(),
        }
    }

    /// 嵌套 cluster（子模型展开时使用；label 取子模型名）
    pub(crate) fn new_cluster(name: &str) -> Self {
        let mut graph = Self::new_root(name, RankDirection::default(), 0);
        graph.is_cluster = true;
        graph
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_cluster(&self) -> bool {
        self.is_cluster
    }

    /// 添加节点；标识已存在时为 no-op
    pub fn add_node(&mut self, node: DotNode) {
        if self.node_ids.insert(node.id.clone()) {
            self.nodes.push(node);
        }
    }

    /// 本作用域是否含有该节点
    pub fn has_node(&self, id: &str) -> bool {
        self.node_ids.contains(id)
    }

    /// 整棵图（含嵌套子图）是否含有该节点
    pub fn has_node_recursive(&self, id: &str) -> bool {
        self.has_node(id) || self.subgraphs.iter().any(|g| g.has_node_recursive(id))
    }

    /// 直插一条边（不去重）
    pub fn add_edge(&mut self, src: &str, dst: &str) {
        self.edge_keys.insert((src.to_string(), dst.to_string()));
        self.edges.push(DotEdge {
            src: src.to_string(),
            dst: dst.to_string(),
        });
    }

    /// 去重插入：有序 (src, dst) 对已存在时跳过
    pub fn add_edge_dedup(&mut self, src: &str, dst: &str) {
        if !self.has_edge(src, dst) {
            self.add_edge(src, dst);
        }
    }

    pub fn has_edge(&self, src: &str, dst: &str) -> bool {
        self.edge_keys
            .contains(&(src.to_string(), dst.to_string()))
    }

    pub fn add_subgraph(&mut self, sub: DotGraph) {
        self.subgraphs.push(sub);
    }

    /// 本作用域的首个节点（cluster 的入边接线点）
    pub fn first_node(&self) -> Option<&DotNode> {
        self.nodes.first()
    }

    /// 本作用域的末个节点（cluster 的出边接线点）
    pub fn last_node(&self) -> Option<&DotNode> {
        self.nodes.last()
    }

    pub fn nodes(&self) -> &[DotNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DotEdge] {
        &self.edges
    }

    pub fn subgraphs(&self) -> &[DotGraph] {
        &self.subgraphs
    }

    /// 整棵图的节点总数（含嵌套子图）
    pub fn node_count_recursive(&self) -> usize {
        self.nodes.len()
            + self
                .subgraphs
                .iter()
                .map(DotGraph::node_count_recursive)
                .sum::<usize>()
    }

    /// 整棵图的边总数（含嵌套子图）
    pub fn edge_count_recursive(&self) -> usize {
        self.edges.len()
            + self
                .subgraphs
                .iter()
                .map(DotGraph::edge_count_recursive)
                .sum::<usize>()
    }

    // ========== DOT 文本生成 ==========

    /// 生成 Graphviz DOT 格式的图描述字符串
    ///
    /// 可用于在线预览：<https://dreampuf.github.io/GraphvizOnline/>
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        dot.push_str(&format!("digraph \"{}\" {{\n", escape(&self.name)));
        dot.push_str(&format!(
            "    rankdir={};\n",
            self.rank_direction.as_dot()
        ));
        dot.push_str("    concentrate=true;\n");
        dot.push_str(&format!("    dpi={};\n", self.dpi));
        dot.push_str(
            "    node [shape=box style=\"rounded,filled\" fontsize=12 fontcolor=white fontname=\"Microsoft YaHei,SimHei,Arial\"];\n",
        );
        dot.push('\n');
        self.write_body(&mut dot, 1);
        dot.push_str("}\n");
        dot
    }

    /// 输出本作用域的子图、节点与边（indent 为缩进层级）
    fn write_body(&self, out: &mut String, indent: usize) {
        let pad = "    ".repeat(indent);

        for sub in &self.subgraphs {
            out.push_str(&format!(
                "{pad}subgraph cluster_{} {{\n",
                sanitize(&sub.name)
            ));
            out.push_str(&format!("{pad}    label=\"{}\";\n", escape(&sub.name)));
            out.push_str(&format!("{pad}    labeljust=l;\n"));
            out.push_str(&format!("{pad}    style=dashed;\n"));
            sub.write_body(out, indent + 1);
            out.push_str(&format!("{pad}}}\n"));
        }

        for node in &self.nodes {
            out.push_str(&format!(
                "{pad}\"{}\" [label=\"{}\" fillcolor=\"{}\"];\n",
                escape(&node.id),
                escape(&node.label),
                escape(&node.fillcolor)
            ));
        }

        for edge in &self.edges {
            out.push_str(&format!(
                "{pad}\"{}\" -> \"{}\";\n",
                escape(&edge.src),
                escape(&edge.dst)
            ));
        }
    }
}

/// DOT 双引号字符串的转义
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// cluster 标识只保留安全字符
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
