/*
 * @Author       : 老董
 * @Date         : 2026-08-30
 * @Description  : 颜色 / 标签解析：内置调色板与节点标签构造（纯函数）
 */

use super::types::PlotOptions;
use crate::model::{Layer, LayerBody, LayerKind};

/// 未注册层类型的默认回退色
pub(crate) const DEFAULT_COLOR: &str = "grey";

/// 内置调色板
///
/// 未覆盖的类型返回 None，由调用方落到默认色。
pub(crate) fn builtin_color(kind: &LayerKind) -> Option<&'static str> {
    match kind {
        LayerKind::InputLayer => Some("grey"),
        LayerKind::Reshape => Some("#F5A286"),
        LayerKind::Conv1D | LayerKind::Conv2D => Some("#F7D7A8"),
        LayerKind::MaxPooling1D | LayerKind::MaxPooling2D => Some("#AADFA2"),
        LayerKind::ZeroPadding2D | LayerKind::ZeroPadding3D => Some("grey"),
        LayerKind::Flatten => Some("#d44ddb"),
        LayerKind::AveragePooling2D | LayerKind::GlobalAveragePooling2D => Some("#A8CFE7"),
        LayerKind::Dropout => Some("#9896C8"),
        LayerKind::Dense | LayerKind::ReLU => Some("#C66AA7"),
        LayerKind::Concatenate => Some("#F5A286"),
        LayerKind::SubModel => Some("#292D30"),
        LayerKind::RepeatVector | LayerKind::Multiply | LayerKind::Add => Some("grey"),
        LayerKind::BatchNormalization => Some("#add8e6"),
        LayerKind::Lstm => Some("#A8CFE7"),
        LayerKind::Gru => Some("#ff6961"),
        LayerKind::Activation => Some("#9896C8"),
        _ => None,
    }
}

/// 层的显示名与显示类名
///
/// 未被展开的包装层采用复合显示："名(内部名)" / "类(内部类)"；
/// 正在展开内部子模型的包装层保持自身的名与类（cluster 另行标注）。
pub(crate) fn display_identity(layer: &Layer, expand_nested: bool) -> (String, String) {
    if let LayerBody::Wrapper(inner) = layer.body() {
        let expanding_inner = expand_nested && inner.is_sub_model();
        if !expanding_inner {
            return (
                format!("{}({})", layer.name(), inner.name()),
                format!(
                    "{}({})",
                    layer.kind().class_name(),
                    inner.kind().class_name()
                ),
            );
        }
    }
    (
        layer.name().to_string(),
        layer.kind().class_name().to_string(),
    )
}

/// 构造节点标签
///
/// 形状无法解析时以占位文本 `multiple` 显示，从不报错。
pub(crate) fn node_label(layer: &Layer, options: &PlotOptions) -> String {
    let (name, class_name) = display_identity(layer, options.expand_nested);
    let mut label = if options.show_layer_names {
        format!("{name}: {class_name}")
    } else {
        class_name
    };

    if options.show_shapes {
        let input_text = if layer.input_shapes().is_empty() {
            "multiple".to_string()
        } else {
            layer
                .input_shapes()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        let output_text = layer
            .output_shape()
            .map_or_else(|| "multiple".to_string(), ToString::to_string);
        label.push_str(&format!("\ninput: {input_text}\noutput: {output_text}"));
    }

    label
}
