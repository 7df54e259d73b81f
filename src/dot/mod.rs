/*
 * @Author       : 老董
 * @Date         : 2026-08-30
 * @Description  : 可视化管线：抽象 DOT 图、构图、样式与渲染
 *
 * 数据流：Model → model_to_dot（Walker + Expander + 颜色/标签解析）
 *        → DotGraph → Graphviz（外部进程）→ 图像字节 / 文件
 */

mod builder;
mod graph;
pub(crate) mod render;
pub(crate) mod style;
mod types;

pub use builder::model_to_dot;
pub use graph::{DotEdge, DotGraph, DotNode};
pub use render::{is_graphviz_available, plot_model, render_dot};
pub use types::{ColorTable, PlotOptions, RankDirection};
