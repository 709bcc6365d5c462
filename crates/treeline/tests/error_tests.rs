//! Tests for layout error reporting

use treeline::prelude::*;
use treeline::{SizeRegistry, TuningOptions};

fn engine() -> LayoutEngine {
    LayoutEngine::new(GraphConfig::new(Gap::new(20.0, 60.0))).unwrap()
}

#[test]
fn test_sizes_not_ready_names_the_shortfall() {
    let tree: HierarchyNode = HierarchyNode::new("r")
        .with_child(HierarchyNode::new("a"))
        .with_child(HierarchyNode::new("b").with_child(HierarchyNode::new("b1")));
    let mut engine = engine();
    engine.register_size("r", Dimensions::new(10.0, 10.0)).unwrap();

    let error = engine.compute(&tree).unwrap_err();
    assert_eq!(error, LayoutError::SizesNotReady { missing: 3 });
    assert!(error.to_string().contains("3 node(s)"));
}

#[test]
fn test_missing_deep_descendant_aborts_whole_layout() {
    let tree: HierarchyNode = HierarchyNode::new("r").with_child(
        HierarchyNode::new("a").with_child(HierarchyNode::new("a1").with_child(HierarchyNode::new("deep"))),
    );
    let mut engine = engine();
    for id in ["r", "a", "a1"] {
        engine.register_size(id, Dimensions::new(10.0, 10.0)).unwrap();
    }
    assert!(matches!(
        engine.compute(&tree),
        Err(LayoutError::SizesNotReady { missing: 1 })
    ));
}

#[test]
fn test_duplicate_id_is_rejected_before_readiness() {
    let tree: HierarchyNode = HierarchyNode::new("r")
        .with_child(HierarchyNode::new("x"))
        .with_child(HierarchyNode::new("y").with_child(HierarchyNode::new("x")));
    let engine = engine();
    assert_eq!(
        engine.compute(&tree).unwrap_err(),
        LayoutError::DuplicateId { id: "x".into() }
    );
}

#[test]
fn test_invalid_dimensions() {
    let mut engine = engine();
    for size in [
        Dimensions::new(-1.0, 10.0),
        Dimensions::new(10.0, -0.5),
        Dimensions::new(f64::NAN, 10.0),
        Dimensions::new(10.0, f64::INFINITY),
    ] {
        let error = engine.register_size("bad", size).unwrap_err();
        assert_eq!(error, LayoutError::invalid_dimensions("bad"));
    }
    assert!(engine.registry().is_empty());
}

#[test]
fn test_regenerate_edges_with_unplaced_child() {
    let tree: HierarchyNode = HierarchyNode::new("r")
        .with_child(HierarchyNode::new("a"))
        .with_child(HierarchyNode::new("b"));
    let mut engine = engine();
    for id in ["r", "a", "b"] {
        engine.register_size(id, Dimensions::new(10.0, 10.0)).unwrap();
    }
    let layout = engine.compute(&tree).unwrap();

    let without_a: Vec<_> = layout.nodes.iter().filter(|p| p.id() != "a").copied().collect();
    let error = engine.regenerate_edges(&without_a).unwrap_err();
    assert_eq!(error.to_string(), "Unknown node: a");
}

#[test]
fn test_regenerate_edges_with_repeated_node() {
    let tree: HierarchyNode = HierarchyNode::new("r").with_child(HierarchyNode::new("a"));
    let mut engine = engine();
    engine.register_size("r", Dimensions::new(10.0, 10.0)).unwrap();
    engine.register_size("a", Dimensions::new(10.0, 10.0)).unwrap();
    let layout = engine.compute(&tree).unwrap();

    let mut nodes = layout.nodes.clone();
    nodes.push(layout.nodes[1]);
    assert_eq!(
        engine.regenerate_edges(&nodes).unwrap_err(),
        LayoutError::duplicate_id("a")
    );
}

#[test]
fn test_regenerate_edges_with_unregistered_size() {
    let tree: HierarchyNode = HierarchyNode::new("r").with_child(HierarchyNode::new("a"));
    let mut engine = engine();
    engine.register_size("r", Dimensions::new(10.0, 10.0)).unwrap();
    engine.register_size("a", Dimensions::new(10.0, 10.0)).unwrap();
    let layout = engine.compute(&tree).unwrap();

    let nodes = layout.nodes.clone();
    engine.registry_mut().remove("a");
    assert_eq!(
        engine.regenerate_edges(&nodes).unwrap_err(),
        LayoutError::unknown_node("a")
    );
}

#[test]
fn test_config_requires_gap() {
    let error = GraphOptions::default().resolve().unwrap_err();
    assert!(matches!(error, LayoutError::InvalidConfig { .. }));
    assert!(error.to_string().contains("gap is required"));
}

#[test]
fn test_config_rejects_non_finite_tuning() {
    let options = GraphOptions {
        gap: Some(Gap::new(20.0, 60.0)),
        tuning: TuningOptions {
            compression: Some(f64::NAN),
            ..TuningOptions::default()
        },
        ..GraphOptions::default()
    };
    let error = options.resolve().unwrap_err();
    assert!(error.to_string().contains("tuning.compression"));
}

#[test]
fn test_config_rejects_negative_gap() {
    let error = LayoutEngine::new(GraphConfig::new(Gap::new(-1.0, 10.0))).unwrap_err();
    assert!(error.to_string().contains("non-negative"));
}

#[test]
fn test_config_rejects_unknown_fields() {
    let result: Result<GraphOptions, _> =
        serde_json::from_str(r#"{ "gap": { "x": 1, "y": 1 }, "tuning": { "indnet": 4 } }"#);
    assert!(result.is_err());
}

#[test]
fn test_path_errors() {
    let error = compile_path(&[]).unwrap_err();
    assert!(matches!(error, LayoutError::Path { .. }));
    assert_eq!(
        Path::from_commands(vec![]).unwrap_err(),
        LayoutError::path_error("empty instruction list")
    );
    let error = Path::from_commands(vec![PathCommand::QuadTo {
        control: Point::ORIGIN,
        to: Point::new(1.0, 1.0),
    }])
    .unwrap_err();
    assert!(error.to_string().starts_with("Path error:"));
}

#[test]
fn test_registry_require() {
    let registry = SizeRegistry::new();
    assert_eq!(
        registry.require("ghost").unwrap_err(),
        LayoutError::UnknownNode { id: "ghost".into() }
    );
}

#[test]
fn test_errors_are_std_errors() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
    assert_error(&LayoutError::sizes_not_ready(1));
}
