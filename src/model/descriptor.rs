/*
 * @Author       : 老董
 * @Date         : 2026-08-29
 * @Description  : 模型描述符（Model Descriptor）
 *                 可序列化的中间表示（IR），用于模型描述的保存 / 加载
 */

use super::{InboundRecord, Layer, LayerBody, LayerId, LayerKind, Model, Shape};
use crate::error::PlotError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// 描述符格式版本（用于向后兼容）
pub const DESCRIPTOR_VERSION: &str = "1.0";

/// 模型的可序列化描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// 格式版本
    pub version: String,
    /// 模型名称
    pub name: String,
    /// 所有层描述（声明顺序）
    pub layers: Vec<LayerDescriptor>,
}

/// 层描述
///
/// `id` 仅在描述符内部用于引用（入站列表），加载时会重新分配
/// 进程内的稳定标识，因此加载出的模型可以与新建模型互相嵌套。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerDescriptor {
    /// 描述符作用域内的层 id
    pub id: u64,
    /// 层名称
    pub name: String,
    /// 层类型标签
    pub kind: LayerKind,
    /// 嵌套结构
    #[serde(default, skip_serializing_if = "LayerBodyDescriptor::is_plain")]
    pub body: LayerBodyDescriptor,
    /// 输入形状列表
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_shapes: Vec<Shape>,
    /// 输出形状
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_shape: Option<Shape>,
    /// 连接记录：每条记录为入站层 id 列表（有序）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inbound: Vec<Vec<u64>>,
    /// 未激活记录的下标（层被共享复用时无关的调用点）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inactive_records: Vec<usize>,
}

/// 层嵌套结构的描述
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum LayerBodyDescriptor {
    #[default]
    Plain,
    SubModel(ModelDescriptor),
    Wrapper(Box<LayerDescriptor>),
}

impl LayerBodyDescriptor {
    fn is_plain(&self) -> bool {
        matches!(self, Self::Plain)
    }
}

impl ModelDescriptor {
    /// 从模型生成描述符（层 id 直接取稳定标识的数值）
    pub fn from_model(model: &Model) -> Self {
        Self {
            version: DESCRIPTOR_VERSION.to_string(),
            name: model.name().to_string(),
            layers: model
                .layers()
                .iter()
                .map(|l| describe_layer(model, l))
                .collect(),
        }
    }

    /// 由描述符重建模型
    ///
    /// 所有层重新分配稳定标识并重映射入站引用；版本不匹配、id 重复
    /// 或引用未定义的层时报错。
    pub fn into_model(self) -> Result<Model, PlotError> {
        if self.version != DESCRIPTOR_VERSION {
            return Err(PlotError::InvalidOperation(format!(
                "模型描述版本不匹配：预期{DESCRIPTOR_VERSION}，实际为{}",
                self.version
            )));
        }
        build_model(self)
    }
}

fn describe_layer(model: &Model, layer: &Layer) -> LayerDescriptor {
    let body = match layer.body() {
        LayerBody::Plain => LayerBodyDescriptor::Plain,
        LayerBody::SubModel(sub) => LayerBodyDescriptor::SubModel(ModelDescriptor::from_model(sub)),
        LayerBody::Wrapper(inner) => {
            LayerBodyDescriptor::Wrapper(Box::new(describe_layer(model, inner)))
        }
    };
    LayerDescriptor {
        id: layer.id().0,
        name: layer.name().to_string(),
        kind: layer.kind().clone(),
        body,
        input_shapes: layer.input_shapes().to_vec(),
        output_shape: layer.output_shape().cloned(),
        inbound: layer
            .inbound_records()
            .iter()
            .map(|r| r.inbound.iter().map(|id| id.0).collect())
            .collect(),
        inactive_records: (0..layer.inbound_records().len())
            .filter(|&i| !model.is_active_record(layer, i))
            .collect(),
    }
}

fn build_model(desc: ModelDescriptor) -> Result<Model, PlotError> {
    let model_name = desc.name;
    let mut id_map: HashMap<u64, LayerId> = HashMap::new();
    let mut staged: Vec<(Layer, Vec<Vec<u64>>, Vec<usize>)> = Vec::new();
    let mut seen_names: HashSet<String> = HashSet::new();

    // 第一遍：重建层（递归处理嵌套）并分配新标识
    for ld in desc.layers {
        if !seen_names.insert(ld.name.clone()) {
            return Err(PlotError::DuplicateLayerName(format!(
                "层{}在模型{model_name}中重复",
                ld.name
            )));
        }
        let old_id = ld.id;
        let inbound_raw = ld.inbound.clone();
        let inactive = ld.inactive_records.clone();
        let layer = build_layer(ld)?;
        if id_map.insert(old_id, layer.id()).is_some() {
            return Err(PlotError::InvalidOperation(format!(
                "模型{model_name}的描述中层 id {old_id} 重复"
            )));
        }
        staged.push((layer, inbound_raw, inactive));
    }

    // 第二遍：重映射入站引用并计算激活集合
    let mut network_nodes: HashSet<String> = HashSet::new();
    let mut layers: Vec<Layer> = Vec::new();
    for (mut layer, inbound_raw, inactive) in staged {
        for (index, record) in inbound_raw.iter().enumerate() {
            let mapped = record
                .iter()
                .map(|old| {
                    id_map.get(old).copied().ok_or_else(|| {
                        PlotError::LayerNotFound(format!(
                            "模型{model_name}的描述引用了未定义的层 id {old}"
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            layer.inbound.push(InboundRecord { inbound: mapped });
            if !inactive.contains(&index) {
                network_nodes.insert(layer.record_key(index));
            }
        }
        layers.push(layer);
    }

    Ok(Model {
        name: model_name,
        layers,
        network_nodes,
    })
}

fn build_layer(ld: LayerDescriptor) -> Result<Layer, PlotError> {
    let body = match ld.body {
        LayerBodyDescriptor::Plain => LayerBody::Plain,
        LayerBodyDescriptor::SubModel(model_desc) => LayerBody::SubModel(model_desc.into_model()?),
        LayerBodyDescriptor::Wrapper(inner) => LayerBody::Wrapper(Box::new(build_layer(*inner)?)),
    };
    Ok(Layer {
        id: LayerId::next(),
        name: ld.name,
        kind: ld.kind,
        body,
        input_shapes: ld.input_shapes,
        output_shape: ld.output_shape,
        inbound: Vec::new(),
    })
}
