/*
 * @Author       : 老董
 * @Date         : 2026-08-29
 * @Description  : ModelBuilder：带校验的模型构建 API
 */

use super::{InboundRecord, Layer, LayerId, Model};
use crate::error::PlotError;
use std::collections::HashSet;

/// 模型构建器
///
/// 校验规则：
/// - 同一作用域内层名唯一（嵌套模型内部不受外层约束）
/// - 连接的两端都必须已加入本模型
///
/// connect 产生的记录默认激活；`connect_inactive` 用于为被共享复用的层
/// 补记别处的调用点（绘制时跳过）。
pub struct ModelBuilder {
    name: String,
    layers: Vec<Layer>,
    network_nodes: HashSet<String>,
}

impl ModelBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            layers: Vec::new(),
            network_nodes: HashSet::new(),
        }
    }

    /// 添加一个层，返回其稳定标识
    pub fn add_layer(&mut self, layer: Layer) -> Result<LayerId, PlotError> {
        if self.layers.iter().any(|l| l.name() == layer.name()) {
            return Err(PlotError::DuplicateLayerName(format!(
                "层{}在模型{}中重复",
                layer.name(),
                self.name
            )));
        }
        let id = layer.id();
        self.layers.push(layer);
        Ok(id)
    }

    /// 以整个模型为层添加（层名取模型名）
    pub fn add_sub_model(&mut self, model: Model) -> Result<LayerId, PlotError> {
        self.add_layer(Layer::sub_model(model))
    }

    /// 记录一次调用：`inbound` 中的各层按序馈入 `layer`（记录激活）
    pub fn connect(&mut self, inbound: &[LayerId], layer: LayerId) -> Result<(), PlotError> {
        self.push_record(inbound, layer, true)
    }

    /// 记录一次不属于本模型图的调用（层被别的图复用时的无关调用点）
    pub fn connect_inactive(
        &mut self,
        inbound: &[LayerId],
        layer: LayerId,
    ) -> Result<(), PlotError> {
        self.push_record(inbound, layer, false)
    }

    fn push_record(
        &mut self,
        inbound: &[LayerId],
        layer: LayerId,
        active: bool,
    ) -> Result<(), PlotError> {
        for id in inbound {
            if !self.layers.iter().any(|l| l.id() == *id) {
                return Err(PlotError::LayerNotFound(format!(
                    "入站层 id {id} 不在模型{}中",
                    self.name
                )));
            }
        }
        let Some(target) = self.layers.iter_mut().find(|l| l.id() == layer) else {
            return Err(PlotError::LayerNotFound(format!(
                "目标层 id {layer} 不在模型{}中",
                self.name
            )));
        };
        target.inbound.push(InboundRecord {
            inbound: inbound.to_vec(),
        });
        if active {
            let index = target.inbound.len() - 1;
            self.network_nodes.insert(target.record_key(index));
        }
        Ok(())
    }

    pub fn build(self) -> Model {
        Model {
            name: self.name,
            layers: self.layers,
            network_nodes: self.network_nodes,
        }
    }
}
