/*
 * @Author       : 老董
 * @Date         : 2026-08-29
 * @Description  : 可视化流程的错误类型与输出相关类型
 */

use std::path::PathBuf;
use thiserror::Error;

/// 可视化流程错误类型
///
/// 颜色、形状解析失败不在此列：未注册的层类型静默回退默认色，
/// 无法解析的形状以占位文本 `multiple` 显示，两者从不上抛。
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlotError {
    /// Graphviz（外部布局引擎）缺失，带安装提示；在构图前快速失败
    #[error("Graphviz 不可用：{0}")]
    GraphvizMissing(String),
    /// 调用方输入非法（未知后缀、描述符版本不匹配等）
    #[error("无效操作：{0}")]
    InvalidOperation(String),
    /// 同一模型作用域内层名重复
    #[error("{0}")]
    DuplicateLayerName(String),
    /// 连接或引用了不存在的层
    #[error("找不到层：{0}")]
    LayerNotFound(String),
    /// 内部一致性校验失败（构图顺序被破坏等），属于 bug 而非用户错误
    #[error("内部一致性校验失败：{0}")]
    InternalAssertion(String),
    /// Graphviz 进程执行了但渲染失败
    #[error("Graphviz 渲染失败：{0}")]
    RenderFailed(String),
    /// IO 错误（以字符串形式携带，保持 PartialEq）
    #[error("IO 错误：{0}")]
    IoError(String),
}

// ========== 渲染输出相关类型 ==========

/// 图像输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// PNG 格式（默认）
    #[default]
    Png,
    /// SVG 矢量格式
    Svg,
    /// PDF 格式
    Pdf,
    /// JPEG 格式
    Jpg,
}

impl ImageFormat {
    /// 获取文件扩展名（不含点号）
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Jpg => "jpg",
        }
    }

    /// 从扩展名解析格式
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "svg" => Some(Self::Svg),
            "pdf" => Some(Self::Pdf),
            "jpg" | "jpeg" => Some(Self::Jpg),
            _ => None,
        }
    }

    /// 是否为栅格格式（可解码为内存图像句柄）
    pub const fn is_raster(&self) -> bool {
        matches!(self, Self::Png | Self::Jpg)
    }
}

/// 一次渲染调用的输出结果
#[derive(Debug)]
pub struct PlotOutput {
    /// 图像文件实际写入路径（输出路径无后缀时自动补 `.png`）
    pub path: PathBuf,
    /// 实际使用的图像格式
    pub format: ImageFormat,
    /// 渲染得到的原始图像字节
    pub bytes: Vec<u8>,
    /// 内存图像句柄（best-effort：仅栅格格式且解码成功时为 Some）
    pub image: Option<image::DynamicImage>,
}
