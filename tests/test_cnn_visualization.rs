/*
 * @Author       : 老董
 * @Date         : 2026-08-30
 * @Description  : 端到端可视化测试 - 一个带嵌套卷积块的小型 CNN
 *                 网络结构：Input -> [Conv2D -> MaxPooling2D] 块 -> Flatten -> Dense
 */
use model_plot::{
    Layer, LayerKind, Model, ModelBuilder, PlotOptions, RankDirection, Shape,
    is_graphviz_available, model_to_dot, plot_model,
};
use std::fs;
use std::path::Path;

/// 卷积块子模型：conv -> pool
fn conv_block(name: &str) -> Model {
    let mut builder = ModelBuilder::new(name);
    let conv = builder
        .add_layer(
            Layer::new("conv", LayerKind::Conv2D)
                .with_input_shape(Shape::dynamic_batch(&[28, 28, 1]))
                .with_output_shape(Shape::dynamic_batch(&[26, 26, 8])),
        )
        .unwrap();
    let pool = builder
        .add_layer(
            Layer::new("pool", LayerKind::MaxPooling2D)
                .with_output_shape(Shape::dynamic_batch(&[13, 13, 8])),
        )
        .unwrap();
    builder.connect(&[conv], pool).unwrap();
    builder.build()
}

/// Input -> 卷积块 -> Flatten -> Dense
fn cnn_model() -> Model {
    let mut builder = ModelBuilder::new("mini_cnn");
    let input = builder
        .add_layer(
            Layer::new("input", LayerKind::InputLayer)
                .with_output_shape(Shape::dynamic_batch(&[28, 28, 1])),
        )
        .unwrap();
    let block = builder.add_sub_model(conv_block("conv_block")).unwrap();
    let flatten = builder
        .add_layer(
            Layer::new("flatten", LayerKind::Flatten)
                .with_output_shape(Shape::dynamic_batch(&[1352])),
        )
        .unwrap();
    let dense = builder
        .add_layer(
            Layer::new("dense", LayerKind::Dense)
                .with_output_shape(Shape::dynamic_batch(&[10])),
        )
        .unwrap();
    builder.connect(&[input], block).unwrap();
    builder.connect(&[block], flatten).unwrap();
    builder.connect(&[flatten], dense).unwrap();
    builder.build()
}

#[test]
fn test_cnn_dot_generation() {
    let model = cnn_model();

    // 1. 不展开：卷积块是一个深色节点
    let dot = model_to_dot(&model, &PlotOptions::default()).unwrap();
    assert_eq!(dot.node_count_recursive(), 4);
    assert_eq!(dot.edge_count_recursive(), 3);
    let text = dot.to_dot();
    assert!(text.contains("conv_block: Model"));
    assert!(text.contains("#292D30"));

    // 2. 展开 + 横向布局 + 形状标注
    let options = PlotOptions {
        expand_nested: true,
        show_shapes: true,
        rank_direction: RankDirection::LeftRight,
        ..PlotOptions::default()
    };
    let dot = model_to_dot(&model, &options).unwrap();
    // input / flatten / dense + cluster 内 conv / pool
    assert_eq!(dot.node_count_recursive(), 5);
    let text = dot.to_dot();
    assert!(text.contains("rankdir=LR"));
    assert!(text.contains("subgraph cluster_conv_block"));
    assert!(text.contains("conv: Conv2D"));
    assert!(text.contains("output: (?, 13, 13, 8)"));
}

#[test]
fn test_cnn_plot_to_file() {
    let model = cnn_model();
    let path = "test_cnn_visualization.png";

    let options = PlotOptions {
        expand_nested: true,
        ..PlotOptions::default()
    };
    let result = plot_model(&model, path, &options);

    if is_graphviz_available() {
        let output = result.expect("plot_model 失败");
        assert!(output.path.exists());
        assert!(output.image.is_some());
        fs::remove_file(&output.path).ok();
    } else {
        // Graphviz 缺失：在构图之前快速失败，不写任何文件
        assert!(result.is_err());
        assert!(!Path::new(path).exists());
        println!("Graphviz 未安装，跳过渲染验证");
    }
}
