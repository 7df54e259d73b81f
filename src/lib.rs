//! # Model Plot
//!
//! `model_plot`将神经网络模型的层级结构图渲染为可视化图表：层为节点、
//! 数据流连接为边，按层类型着色，嵌套子模型可展开为带标签的 cluster。
//! 图布局与栅格化交给外部的[Graphviz](https://graphviz.org)完成，
//! 本库只负责把模型结构装配成抽象 DOT 图。
//!
//! ```no_run
//! use model_plot::{Layer, LayerKind, ModelBuilder, PlotOptions, plot_model};
//!
//! let mut builder = ModelBuilder::new("mlp");
//! let x = builder.add_layer(Layer::new("input", LayerKind::InputLayer)).unwrap();
//! let d = builder.add_layer(Layer::new("dense", LayerKind::Dense)).unwrap();
//! builder.connect(&[x], d).unwrap();
//! let model = builder.build();
//!
//! plot_model(&model, "mlp.png", &PlotOptions::default()).unwrap();
//! ```

mod error;

pub mod dot;
pub mod model;
pub mod utils;

pub use dot::{
    ColorTable, DotEdge, DotGraph, DotNode, PlotOptions, RankDirection, is_graphviz_available,
    model_to_dot, plot_model, render_dot,
};
pub use error::{ImageFormat, PlotError, PlotOutput};
pub use model::{
    InboundRecord, Layer, LayerBody, LayerDescriptor, LayerId, LayerKind, Model, ModelBuilder,
    ModelDescriptor, Shape, load_model, save_model,
};

#[cfg(test)]
mod tests;
