/*
 * @Author       : 老董
 * @Date         : 2026-08-29
 * @Description  : 模型描述的 JSON 保存 / 加载
 */

use super::{Model, ModelDescriptor};
use crate::error::PlotError;
use std::path::Path;

/// 将模型描述保存为 JSON 文件
pub fn save_model<P: AsRef<Path>>(model: &Model, path: P) -> Result<(), PlotError> {
    let desc = ModelDescriptor::from_model(model);
    let json = serde_json::to_string_pretty(&desc)
        .map_err(|e| PlotError::IoError(format!("序列化模型描述失败: {e}")))?;
    std::fs::write(path.as_ref(), json)
        .map_err(|e| PlotError::IoError(format!("写入模型描述文件失败: {e}")))
}

/// 从 JSON 文件加载模型描述并重建模型
///
/// 加载出的层会分配全新的稳定标识，可与进程内新建的模型互相嵌套。
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Model, PlotError> {
    let json = std::fs::read_to_string(path.as_ref())
        .map_err(|e| PlotError::IoError(format!("读取模型描述文件失败: {e}")))?;
    let desc: ModelDescriptor = serde_json::from_str(&json)
        .map_err(|e| PlotError::InvalidOperation(format!("解析模型描述失败: {e}")))?;
    desc.into_model()
}
