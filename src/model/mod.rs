/*
 * @Author       : 老董
 * @Date         : 2026-08-29
 * @Description  : 模型侧数据结构：层、模型、构建器与描述符 I/O
 *
 * 公开 API：
 * - `Layer` / `LayerKind` / `LayerBody` / `LayerId` / `Shape`: 层结构
 * - `Model`: 有序层列表 + 激活连接记录集合
 * - `ModelBuilder`: 带校验的构建 API
 * - `ModelDescriptor` + `save_model` / `load_model`: JSON 描述 I/O
 */

mod builder;
mod descriptor;
mod layer;
mod model;
mod model_io;

pub use builder::ModelBuilder;
pub use descriptor::{
    DESCRIPTOR_VERSION, LayerBodyDescriptor, LayerDescriptor, ModelDescriptor,
};
pub use layer::{InboundRecord, Layer, LayerBody, LayerId, LayerKind, Shape};
pub use model::Model;
pub use model_io::{load_model, save_model};
