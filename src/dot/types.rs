/*
 * @Author       : 老董
 * @Date         : 2026-08-30
 * @Description  : 可视化配置类型：布局方向、颜色表与绘制选项
 */

use super::style;
use crate::model::LayerKind;
use std::collections::HashMap;

/// 布局方向（透传给布局引擎的 rankdir）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankDirection {
    /// 自上而下
    #[default]
    TopBottom,
    /// 自左而右
    LeftRight,
}

impl RankDirection {
    pub const fn as_dot(&self) -> &'static str {
        match self {
            Self::TopBottom => "TB",
            Self::LeftRight => "LR",
        }
    }
}

/// 颜色表：层类型标签 → 填充色
///
/// 查询顺序：调用方覆盖 → 内置调色板 → 默认色。
/// 未注册的类型永远落到默认色，不报错。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    overrides: HashMap<String, String>,
    default_color: String,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
            default_color: style::DEFAULT_COLOR.to_string(),
        }
    }
}

impl ColorTable {
    /// 为某个层类型设置（或覆盖）颜色
    pub fn set_color(&mut self, kind: &LayerKind, color: &str) {
        self.overrides
            .insert(kind.class_name().to_string(), color.to_string());
    }

    /// 替换默认回退色
    pub fn set_default_color(&mut self, color: &str) {
        self.default_color = color.to_string();
    }

    /// 解析层类型对应的颜色
    pub fn color_for(&self, kind: &LayerKind) -> &str {
        if let Some(color) = self.overrides.get(kind.class_name()) {
            return color;
        }
        style::builtin_color(kind).unwrap_or(&self.default_color)
    }
}

/// 绘制选项（在调用边界取默认值，不存在进程级全局配置）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotOptions {
    /// 是否在标签中附加输入 / 输出形状文本
    pub show_shapes: bool,
    /// 标签是否包含层名（false 时只显示类名）
    pub show_layer_names: bool,
    /// 布局方向
    pub rank_direction: RankDirection,
    /// 是否将嵌套子模型展开为 cluster
    pub expand_nested: bool,
    /// 渲染分辨率（透传给布局引擎）
    pub dpi: u32,
    /// 颜色表
    pub colors: ColorTable,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            show_shapes: false,
            show_layer_names: true,
            rank_direction: RankDirection::default(),
            expand_nested: false,
            dpi: 96,
            colors: ColorTable::default(),
        }
    }
}
