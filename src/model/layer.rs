/*
 * @Author       : 老董
 * @Date         : 2026-08-29
 * @Description  : 层（Layer）相关类型：稳定标识、类型标签、形状与嵌套结构
 */

use super::Model;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// 层的稳定唯一标识
///
/// 节点以该标识（而非人类可读的层名）为键：嵌套作用域之间层名可能冲突。
/// 标识由进程级单调计数器分配，独立构建的模型互相嵌套后也不会碰撞。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub u64);

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

impl LayerId {
    pub(crate) fn next() -> Self {
        Self(NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 层类型标签（封闭枚举 + `Custom` 兜底）
///
/// 颜色与显示类名都以该标签为键分发；未注册的类型走默认分支，从不报错。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerKind {
    InputLayer,
    Reshape,
    Conv1D,
    Conv2D,
    MaxPooling1D,
    MaxPooling2D,
    ZeroPadding2D,
    ZeroPadding3D,
    Flatten,
    AveragePooling2D,
    GlobalAveragePooling2D,
    Dropout,
    Dense,
    ReLU,
    Concatenate,
    RepeatVector,
    Multiply,
    Add,
    BatchNormalization,
    Lstm,
    Gru,
    Activation,
    /// 子模型层（显示类名为 "Model"）
    SubModel,
    /// 包装层：时间分布
    TimeDistributed,
    /// 包装层：双向
    Bidirectional,
    /// 宿主框架中未登记的层类型（携带其类名）
    Custom(String),
}

impl LayerKind {
    /// 显示用类名（稳定字符串判别符）
    pub fn class_name(&self) -> &str {
        match self {
            Self::InputLayer => "InputLayer",
            Self::Reshape => "Reshape",
            Self::Conv1D => "Conv1D",
            Self::Conv2D => "Conv2D",
            Self::MaxPooling1D => "MaxPooling1D",
            Self::MaxPooling2D => "MaxPooling2D",
            Self::ZeroPadding2D => "ZeroPadding2D",
            Self::ZeroPadding3D => "ZeroPadding3D",
            Self::Flatten => "Flatten",
            Self::AveragePooling2D => "AveragePooling2D",
            Self::GlobalAveragePooling2D => "GlobalAveragePooling2D",
            Self::Dropout => "Dropout",
            Self::Dense => "Dense",
            Self::ReLU => "ReLU",
            Self::Concatenate => "Concatenate",
            Self::RepeatVector => "RepeatVector",
            Self::Multiply => "Multiply",
            Self::Add => "Add",
            Self::BatchNormalization => "BatchNormalization",
            Self::Lstm => "LSTM",
            Self::Gru => "GRU",
            Self::Activation => "Activation",
            Self::SubModel => "Model",
            Self::TimeDistributed => "TimeDistributed",
            Self::Bidirectional => "Bidirectional",
            Self::Custom(name) => name,
        }
    }
}

/// 形状：`None` 表示动态维度（如 batch 维），显示为 `?`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape(pub Vec<Option<usize>>);

impl Shape {
    /// 全静态维度
    pub fn from_dims(dims: &[usize]) -> Self {
        Self(dims.iter().map(|&d| Some(d)).collect())
    }

    /// 首维动态（batch 维），其余静态
    pub fn dynamic_batch(dims: &[usize]) -> Self {
        let mut v: Vec<Option<usize>> = vec![None];
        v.extend(dims.iter().map(|&d| Some(d)));
        Self(v)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims: Vec<String> = self
            .0
            .iter()
            .map(|d| d.map_or_else(|| "?".to_string(), |v| v.to_string()))
            .collect();
        write!(f, "({})", dims.join(", "))
    }
}

/// 连接记录：层的某一次调用的入站层列表（有序）
///
/// 层被复用时会持有多条记录；记录是否参与当前模型的绘制，
/// 由模型的激活集合（见 [`Model`]）按记录键判定。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InboundRecord {
    pub inbound: Vec<LayerId>,
}

/// 层的嵌套结构
#[derive(Debug, Clone, PartialEq)]
pub enum LayerBody {
    /// 普通层
    Plain,
    /// 层自身是一个子模型
    SubModel(Model),
    /// 包装层：恰好包含一个内部层（内部层可能又是子模型）
    Wrapper(Box<Layer>),
}

/// 模型图中的一个层
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub(in crate::model) id: LayerId,
    pub(in crate::model) name: String,
    pub(in crate::model) kind: LayerKind,
    pub(in crate::model) body: LayerBody,
    pub(in crate::model) input_shapes: Vec<Shape>,
    pub(in crate::model) output_shape: Option<Shape>,
    pub(in crate::model) inbound: Vec<InboundRecord>,
}

impl Layer {
    /// 创建普通层
    pub fn new(name: &str, kind: LayerKind) -> Self {
        Self {
            id: LayerId::next(),
            name: name.to_string(),
            kind,
            body: LayerBody::Plain,
            input_shapes: Vec::new(),
            output_shape: None,
            inbound: Vec::new(),
        }
    }

    /// 由整个模型构成的层（层名取模型名）
    pub fn sub_model(model: Model) -> Self {
        let mut layer = Self::new(model.name(), LayerKind::SubModel);
        layer.body = LayerBody::SubModel(model);
        layer
    }

    /// 包装层（如 TimeDistributed / Bidirectional），恰好包含一个内部层
    pub fn wrapper(name: &str, kind: LayerKind, inner: Layer) -> Self {
        let mut layer = Self::new(name, kind);
        layer.body = LayerBody::Wrapper(Box::new(inner));
        layer
    }

    /// 设置输出形状（链式）
    pub fn with_output_shape(mut self, shape: Shape) -> Self {
        self.output_shape = Some(shape);
        self
    }

    /// 追加一个输入形状（链式，可多次调用）
    pub fn with_input_shape(mut self, shape: Shape) -> Self {
        self.input_shapes.push(shape);
        self
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    pub fn body(&self) -> &LayerBody {
        &self.body
    }

    pub fn input_shapes(&self) -> &[Shape] {
        &self.input_shapes
    }

    pub fn output_shape(&self) -> Option<&Shape> {
        self.output_shape.as_ref()
    }

    pub fn inbound_records(&self) -> &[InboundRecord] {
        &self.inbound
    }

    /// 层自身是否为子模型
    pub fn is_sub_model(&self) -> bool {
        matches!(self.body, LayerBody::SubModel(_))
    }

    /// 层自身的子模型（若有）
    pub fn as_sub_model(&self) -> Option<&Model> {
        match &self.body {
            LayerBody::SubModel(model) => Some(model),
            _ => None,
        }
    }

    /// 包装层内部若是子模型则返回之
    pub fn wrapped_model(&self) -> Option<&Model> {
        match &self.body {
            LayerBody::Wrapper(inner) => inner.as_sub_model(),
            _ => None,
        }
    }

    /// 是否为"包装着子模型"的包装层
    pub fn is_wrapped_sub_model(&self) -> bool {
        self.wrapped_model().is_some()
    }

    /// 第 index 条连接记录的键，与激活集合中的键一一对应
    pub(crate) fn record_key(&self, index: usize) -> String {
        format!("{}_ib-{}", self.name, index)
    }
}
