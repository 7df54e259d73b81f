/*
 * @Author       : 老董
 * @Date         : 2026-08-29
 * @Description  : Model：有序层列表 + 激活连接记录集合
 */

use super::{Layer, LayerId};
use std::collections::HashSet;

/// 模型：有序的层列表，附带激活连接记录的键集合
///
/// 层被共享复用时会带着别处的连接记录；只有键在激活集合
/// （`network_nodes`）中的记录才属于当前模型的图，绘制时其余记录被跳过。
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub(in crate::model) name: String,
    pub(in crate::model) layers: Vec<Layer>,
    pub(in crate::model) network_nodes: HashSet<String>,
}

impl Model {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 声明顺序的层列表
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layers_count(&self) -> usize {
        self.layers.len()
    }

    /// 按稳定标识查找层（仅当前作用域，不进入嵌套模型）
    pub fn layer_by_id(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// 按名称查找层（仅当前作用域）
    pub fn layer_by_name(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// 层的第 index 条连接记录是否属于当前模型的图
    pub fn is_active_record(&self, layer: &Layer, index: usize) -> bool {
        self.network_nodes.contains(&layer.record_key(index))
    }
}
