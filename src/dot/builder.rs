/*
 * @Author       : 老董
 * @Date         : 2026-08-30
 * @Description  : 构图核心：模型遍历（Walker）与嵌套子模型展开（Expander）
 */

use super::graph::{DotGraph, DotNode};
use super::style;
use super::types::PlotOptions;
use crate::error::PlotError;
use crate::model::{Layer, LayerBody, LayerId, Model};
use std::collections::HashMap;

/// 展开后的子模型 cluster 及其边界接线点
///
/// 递归的每次调用都把边界作为显式返回值带回父帧，
/// 不存在跨层级共享的簿记字典。
struct ExpandedCluster {
    graph: DotGraph,
    /// 入边接线点：cluster 本作用域按声明顺序的首个节点
    first: String,
    /// 出边接线点：cluster 本作用域按声明顺序的末个节点
    last: String,
}

/// 将模型转换为抽象 DOT 图
///
/// - 每层一个节点，以层的稳定标识为键；每条激活连接记录中的
///   每个入站层产生一条 入站 → 下游 的边
/// - `expand_nested` 开启时，子模型（及包装着子模型的包装层的内部模型）
///   递归展开为 cluster，边界边改接 cluster 的首 / 末节点
///
/// 注意：cluster 的首 / 末节点只由子模型自身的声明顺序决定，
/// 与其内部的拓扑源点 / 汇点无关——多输入或非末位输出的子模型
/// 会接错边界，这是沿袭下来的已知简化。
pub fn model_to_dot(model: &Model, options: &PlotOptions) -> Result<DotGraph, PlotError> {
    let mut dot = DotGraph::new_root(model.name(), options.rank_direction, options.dpi);
    populate(model, options, &mut dot)?;
    Ok(dot)
}

/// 递归展开一个子模型为 cluster，返回图与边界接线点
fn expand_cluster(model: &Model, options: &PlotOptions) -> Result<ExpandedCluster, PlotError> {
    let mut cluster = DotGraph::new_cluster(model.name());
    populate(model, options, &mut cluster)?;
    let (first, last) = match (cluster.first_node(), cluster.last_node()) {
        (Some(first), Some(last)) => (first.id.clone(), last.id.clone()),
        _ => {
            return Err(PlotError::InternalAssertion(format!(
                "子模型{}展开后没有任何节点，无法确定边界接线点",
                model.name()
            )));
        }
    };
    Ok(ExpandedCluster {
        graph: cluster,
        first,
        last,
    })
}

/// 向 dot 写入一个模型作用域的全部节点与边
fn populate(model: &Model, options: &PlotOptions, dot: &mut DotGraph) -> Result<(), PlotError> {
    // 已展开子模型的边界接线点（本帧局部簿记，由递归返回值填充）
    // - sub_model_bounds: 普通子模型，按子模型层名记录
    // - wrapped_bounds: 包装层内部的子模型，按内部模型名记录
    let mut sub_model_bounds: HashMap<String, (String, String)> = HashMap::new();
    let mut wrapped_bounds: HashMap<String, (String, String)> = HashMap::new();

    // 第一遍：节点与 cluster
    for layer in model.layers() {
        match layer.body() {
            LayerBody::Wrapper(inner) => {
                if options.expand_nested {
                    if let LayerBody::SubModel(inner_model) = inner.body() {
                        let expanded = expand_cluster(inner_model, options)?;
                        wrapped_bounds.insert(
                            inner_model.name().to_string(),
                            (expanded.first, expanded.last),
                        );
                        dot.add_subgraph(expanded.graph);
                    }
                }
            }
            LayerBody::SubModel(sub) if options.expand_nested => {
                let expanded = expand_cluster(sub, options)?;
                sub_model_bounds
                    .insert(layer.name().to_string(), (expanded.first, expanded.last));
                dot.add_subgraph(expanded.graph);
            }
            _ => {}
        }

        // 展开中的子模型不再占用普通节点；其视觉位置归属 cluster
        if options.expand_nested && layer.is_sub_model() {
            continue;
        }

        dot.add_node(DotNode {
            id: node_key(layer.id()),
            label: style::node_label(layer, options),
            fillcolor: options.colors.color_for(layer.kind()).to_string(),
        });
    }

    // 第二遍：边
    for layer in model.layers() {
        let layer_key = node_key(layer.id());
        for (index, record) in layer.inbound_records().iter().enumerate() {
            // 只考虑属于当前模型图的调用点（层可能被别的图复用）
            if !model.is_active_record(layer, index) {
                continue;
            }
            for inbound_id in &record.inbound {
                let inbound = model.layer_by_id(*inbound_id).ok_or_else(|| {
                    PlotError::InternalAssertion(format!(
                        "层{}的连接记录引用了模型{}之外的层 id {inbound_id}",
                        layer.name(),
                        model.name()
                    ))
                })?;
                let inbound_key = node_key(inbound.id());

                if !options.expand_nested {
                    ensure_node(dot, &inbound_key)?;
                    ensure_node(dot, &layer_key)?;
                    dot.add_edge(&inbound_key, &layer_key);
                    continue;
                }

                wire_expanded(
                    dot,
                    layer,
                    &layer_key,
                    inbound,
                    &inbound_key,
                    &sub_model_bounds,
                    &wrapped_bounds,
                )?;
            }
        }
    }

    Ok(())
}

/// expand_nested 开启时的单条边接线
///
/// 穿过展开边界的插入一律走去重路径：多条原始连接可能折叠到
/// 同一对边界节点上。普通层与层之间的直连走直插路径，
/// 正确的模型描述中每个 (入站, 层) 对至多出现在一条激活记录里。
fn wire_expanded(
    dot: &mut DotGraph,
    layer: &Layer,
    layer_key: &str,
    inbound: &Layer,
    inbound_key: &str,
    sub_model_bounds: &HashMap<String, (String, String)>,
    wrapped_bounds: &HashMap<String, (String, String)>,
) -> Result<(), PlotError> {
    let inbound_plain = !inbound.is_sub_model() && !inbound.is_wrapped_sub_model();

    if inbound_plain {
        if !layer.is_sub_model() && !layer.is_wrapped_sub_model() {
            // 普通层 → 普通层
            ensure_node(dot, inbound_key)?;
            ensure_node(dot, layer_key)?;
            dot.add_edge(inbound_key, layer_key);
        } else if layer.is_sub_model() {
            // 普通层 → 展开的子模型：改接 cluster 首节点
            let (first, _) = lookup_bounds(sub_model_bounds, layer.name(), "子模型")?;
            dot.add_edge_dedup(inbound_key, first);
        } else {
            // 普通层 → 包装着子模型的包装层：
            // 包装层自身节点作为穿透边界，再进入 cluster 首节点
            dot.add_edge(inbound_key, layer_key);
            let inner_name = wrapped_model_name(layer)?;
            let (first, _) = lookup_bounds(wrapped_bounds, inner_name, "被包装子模型")?;
            dot.add_edge(layer_key, first);
        }
    } else if inbound.is_sub_model() {
        // 展开的子模型作为入站：从其 cluster 末节点引出
        let (_, last) = lookup_bounds(sub_model_bounds, inbound.name(), "子模型")?;
        if layer.is_sub_model() {
            let (first, _) = lookup_bounds(sub_model_bounds, layer.name(), "子模型")?;
            dot.add_edge_dedup(last, first);
        } else {
            dot.add_edge_dedup(last, layer_key);
        }
    } else {
        // 包装着子模型的包装层作为入站：从内部 cluster 末节点引出
        let inner_name = wrapped_model_name(inbound)?;
        let (_, last) = lookup_bounds(wrapped_bounds, inner_name, "被包装子模型")?;
        dot.add_edge_dedup(last, layer_key);
    }

    Ok(())
}

fn node_key(id: LayerId) -> String {
    id.to_string()
}

/// 边的端点必须已在当前作用域中（构图顺序被破坏时属内部错误）
fn ensure_node(dot: &DotGraph, key: &str) -> Result<(), PlotError> {
    if dot.has_node(key) {
        Ok(())
    } else {
        Err(PlotError::InternalAssertion(format!(
            "边的端点节点{key}尚未加入图中"
        )))
    }
}

fn lookup_bounds<'a>(
    bounds: &'a HashMap<String, (String, String)>,
    name: &str,
    kind_text: &str,
) -> Result<(&'a str, &'a str), PlotError> {
    bounds
        .get(name)
        .map(|(first, last)| (first.as_str(), last.as_str()))
        .ok_or_else(|| {
            PlotError::InternalAssertion(format!("{kind_text}{name}的边界接线点尚未登记"))
        })
}

fn wrapped_model_name(layer: &Layer) -> Result<&str, PlotError> {
    layer
        .wrapped_model()
        .map(|m| m.name())
        .ok_or_else(|| {
            PlotError::InternalAssertion(format!("层{}不是包装着子模型的包装层", layer.name()))
        })
}
