use word_scatter::api::{SCATTER_SNAPSHOT_JSON_SCHEMA_V1, ScatterConfig, ScatterEngine, ScatterSnapshot};
use word_scatter::core::{PointId, RawRecord};
use word_scatter::render::NullRenderer;

fn hovered_engine() -> ScatterEngine<NullRenderer> {
    let mut engine =
        ScatterEngine::new(NullRenderer::default(), ScatterConfig::default()).expect("engine init");
    engine
        .ingest_chunk(vec![
            RawRecord::new("w1", 10.0, 5.0, 1.0),
            RawRecord::new("w2", 100.0, 50.0, 2.0),
            RawRecord::new("w3", 1000.0, 500.0, 3.0),
        ])
        .expect("ingest");
    engine.pointer_move(620.0, 355.0);
    engine
}

#[test]
fn snapshot_captures_domains_bindings_and_hover() {
    let snapshot = hovered_engine().snapshot();

    assert_eq!(snapshot.x_domain, Some((10.0, 1000.0)));
    assert_eq!(snapshot.y_domain, Some((5.0, 500.0)));
    assert_eq!(snapshot.points.len(), 3);
    let bound: Vec<PointId> = snapshot.shapes.iter().map(|bound| bound.point).collect();
    assert_eq!(bound, vec![PointId(0), PointId(1), PointId(2)]);
    assert_eq!(snapshot.hovered, Some(PointId(1)));
    assert!(snapshot.tooltip.visible);
}

#[test]
fn snapshot_json_contract_v1_round_trip() {
    let snapshot = hovered_engine().snapshot();

    let json = snapshot
        .to_json_contract_v1_pretty()
        .expect("snapshot should serialize");
    assert!(json.contains(&format!("\"schema_version\": {SCATTER_SNAPSHOT_JSON_SCHEMA_V1}")));

    let restored = ScatterSnapshot::from_json_compat_str(&json).expect("snapshot should parse");
    let words = |snapshot: &ScatterSnapshot| -> Vec<String> {
        snapshot.points.iter().map(|point| point.word.clone()).collect()
    };
    assert_eq!(words(&restored), words(&snapshot));
    assert_eq!(restored.viewport, snapshot.viewport);
    assert_eq!(restored.tooltip.text, snapshot.tooltip.text);
    assert_eq!(restored.hovered, snapshot.hovered);
    assert_eq!(restored.shapes.len(), snapshot.shapes.len());
}

#[test]
fn unknown_schema_version_is_rejected() {
    let snapshot = hovered_engine().snapshot();
    let json = snapshot.to_json_contract_v1_pretty().expect("serialize");
    let bumped = json.replacen(
        &format!("\"schema_version\": {SCATTER_SNAPSHOT_JSON_SCHEMA_V1}"),
        "\"schema_version\": 99",
        1,
    );
    assert!(ScatterSnapshot::from_json_compat_str(&bumped).is_err());
}

#[test]
fn empty_engine_snapshot_has_no_domains() {
    let engine =
        ScatterEngine::new(NullRenderer::default(), ScatterConfig::default()).expect("engine init");
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.x_domain, None);
    assert!(snapshot.shapes.is_empty());
    assert!(!snapshot.tooltip.visible);
}
