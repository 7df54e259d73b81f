use crate::assert_err;
use crate::dot::{PlotOptions, model_to_dot};
use crate::error::PlotError;
use crate::model::{
    DESCRIPTOR_VERSION, Layer, LayerKind, Model, ModelBuilder, ModelDescriptor, Shape,
    load_model, save_model,
};
use std::collections::HashSet;
use std::fs;

/// 带子模型、包装层、形状与未激活记录的样例模型
fn sample_model() -> Model {
    let mut sub_builder = ModelBuilder::new("block");
    let a = sub_builder.add_layer(Layer::new("a", LayerKind::Dense)).unwrap();
    let b = sub_builder.add_layer(Layer::new("b", LayerKind::Dense)).unwrap();
    sub_builder.connect(&[a], b).unwrap();
    let sub = sub_builder.build();

    let mut builder = ModelBuilder::new("sample");
    let x = builder
        .add_layer(
            Layer::new("input", LayerKind::InputLayer)
                .with_output_shape(Shape::dynamic_batch(&[784])),
        )
        .unwrap();
    let block = builder.add_sub_model(sub.clone()).unwrap();
    let td = builder
        .add_layer(Layer::wrapper(
            "td",
            LayerKind::TimeDistributed,
            Layer::sub_model(sub),
        ))
        .unwrap();
    let y = builder
        .add_layer(Layer::new("out", LayerKind::Custom("MyHead".to_string())))
        .unwrap();
    builder.connect(&[x], block).unwrap();
    builder.connect(&[block], td).unwrap();
    builder.connect(&[td], y).unwrap();
    builder.connect_inactive(&[x], y).unwrap();
    builder.build()
}

#[test]
fn test_descriptor_round_trip() {
    let model = sample_model();
    let desc = ModelDescriptor::from_model(&model);
    assert_eq!(desc.version, DESCRIPTOR_VERSION);
    assert_eq!(desc.layers.len(), 4);

    let loaded = desc.into_model().unwrap();

    // 结构保持：名称、层数、记录与激活状态
    assert_eq!(loaded.name(), model.name());
    assert_eq!(loaded.layers_count(), model.layers_count());
    for (orig, new) in model.layers().iter().zip(loaded.layers()) {
        assert_eq!(orig.name(), new.name());
        assert_eq!(orig.kind(), new.kind());
        assert_eq!(orig.inbound_records().len(), new.inbound_records().len());
        for i in 0..orig.inbound_records().len() {
            assert_eq!(
                model.is_active_record(orig, i),
                loaded.is_active_record(new, i)
            );
        }
    }

    // 重建后的构图与原模型计数一致（含展开）
    let options = PlotOptions {
        expand_nested: true,
        ..PlotOptions::default()
    };
    let orig_dot = model_to_dot(&model, &options).unwrap();
    let new_dot = model_to_dot(&loaded, &options).unwrap();
    assert_eq!(
        orig_dot.node_count_recursive(),
        new_dot.node_count_recursive()
    );
    assert_eq!(
        orig_dot.edge_count_recursive(),
        new_dot.edge_count_recursive()
    );
}

#[test]
fn test_loaded_model_gets_fresh_ids() {
    let model = sample_model();
    let desc = ModelDescriptor::from_model(&model);
    let loaded = desc.into_model().unwrap();

    // 加载出的层分配全新标识，与原模型互不重叠
    let orig_ids: HashSet<_> = model.layers().iter().map(|l| l.id()).collect();
    for layer in loaded.layers() {
        assert!(!orig_ids.contains(&layer.id()));
    }
}

#[test]
fn test_save_and_load_json_file() {
    let path = "test_model_io_round_trip.json";
    let model = sample_model();

    save_model(&model, path).expect("保存模型描述失败");
    let loaded = load_model(path).expect("加载模型描述失败");

    assert_eq!(loaded.name(), "sample");
    assert_eq!(loaded.layers_count(), 4);
    // 子模型结构完整保留
    let block = loaded.layer_by_name("block").unwrap();
    assert_eq!(block.as_sub_model().map(|m| m.layers_count()), Some(2));

    fs::remove_file(path).ok();
}

#[test]
fn test_version_mismatch_rejected() {
    let model = sample_model();
    let mut desc = ModelDescriptor::from_model(&model);
    desc.version = "0.9".to_string();
    let result = desc.into_model();
    assert_err!(result, PlotError::InvalidOperation(msg) if msg.contains("版本不匹配"));
}

#[test]
fn test_undefined_inbound_reference_rejected() {
    let model = sample_model();
    let mut desc = ModelDescriptor::from_model(&model);
    // 指向一个描述里不存在的层 id
    desc.layers[3].inbound.push(vec![987_654]);
    let result = desc.into_model();
    assert_err!(result, PlotError::LayerNotFound(msg) if msg.contains("987654"));
}

#[test]
fn test_load_rejects_bad_json() {
    let path = "test_model_io_bad.json";
    fs::write(path, "{ 这不是合法的模型描述 }").unwrap();
    let result = load_model(path);
    assert_err!(result, PlotError::InvalidOperation(msg) if msg.contains("解析模型描述失败"));
    fs::remove_file(path).ok();
}
