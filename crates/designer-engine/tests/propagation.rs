use std::sync::Arc;

use serde_json::json;

use designer_engine::{FilterEngine, InstanceRegistry, RecordingSink};
use designer_meta::default_registry;
use designer_model::{ComponentInstance, FilterInfo};

/// Three-level linkage: country cascades into province, both filter the
/// table, and the province's readiness depends on the country.
fn cascade_engine() -> (FilterEngine, RecordingSink) {
    let instances = InstanceRegistry::new(vec![
        ComponentInstance::new("country", "SelectFilter")
            .with_prop("targets", json!(["province", "table"]))
            .with_prop("filterReadyTargets", json!(["province"])),
        ComponentInstance::new("province", "SelectFilter").with_prop("targets", json!(["table"])),
        ComponentInstance::new("table", "TableDisplay"),
    ]);
    let sink = RecordingSink::new();
    let engine = FilterEngine::with_sink(
        instances,
        Arc::new(default_registry()),
        Box::new(sink.clone()),
    );
    (engine, sink)
}

#[test]
fn value_change_updates_filter_state() {
    let (mut engine, _sink) = cascade_engine();

    engine.report_value_change("country", json!("中国"));

    let info = engine.filter_info("country").expect("country filter");
    assert_eq!(info.value, json!("中国"));
    assert!(info.ready);
    assert_eq!(info.component_name, "SelectFilter");
}

#[test]
fn upstream_change_invalidates_downstream_readiness() {
    let (mut engine, _sink) = cascade_engine();

    engine.report_value_change("province", json!("广东省"));
    let province = engine.filter_info("province").expect("province filter");
    assert!(province.ready);

    engine.report_value_change("country", json!("中国"));

    let province = engine.filter_info("province").expect("province filter");
    assert_eq!(province.value, json!("广东省"), "value must be untouched");
    assert!(!province.ready, "readiness must be invalidated");
}

#[test]
fn fetch_dispatches_only_when_every_filter_is_ready() {
    let (mut engine, sink) = cascade_engine();

    engine.report_value_change("province", json!("广东省"));
    let requests = sink.take();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].target, "table");
    assert_eq!(requests[0].generation, 1);

    // Country change leaves the province stale; the table must not fetch.
    engine.report_value_change("country", json!("中国"));
    assert!(sink.requests().is_empty(), "fetch must be blocked");

    // Re-selecting the province settles the cascade and releases the fetch.
    engine.report_value_change("province", json!("浙江省"));
    let requests = sink.take();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].target, "table");
    assert_eq!(requests[0].generation, 2, "generations are per-target");
    assert_eq!(requests[0].params["componentId"], "table");
    assert_eq!(requests[0].params["filters"].as_array().map(Vec::len), Some(2));
}

#[test]
fn filters_for_component_follow_edge_order() {
    let (mut engine, _sink) = cascade_engine();

    engine.report_value_change("province", json!("广东省"));
    engine.report_value_change("country", json!("中国"));

    let filters = engine.filters_for_component("table");
    let sources: Vec<&str> = filters.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(sources, ["country", "province"]);
}

#[test]
fn reporting_the_same_value_twice_is_idempotent() {
    let (mut engine, _sink) = cascade_engine();

    engine.report_value_change("country", json!("中国"));
    let first: Vec<FilterInfo> = engine.filter_state().cloned().collect();

    engine.report_value_change("country", json!("中国"));
    let second: Vec<FilterInfo> = engine.filter_state().cloned().collect();

    assert_eq!(first, second);
    assert!(engine.pending_scopes().is_empty());
}

#[test]
fn duplicate_edges_repeat_the_source_filter() {
    let instances = InstanceRegistry::new(vec![
        ComponentInstance::new("search", "InputFilter")
            .with_prop("targets", json!(["table", "table"])),
        ComponentInstance::new("table", "TableDisplay"),
    ]);
    let mut engine = FilterEngine::new(instances, Arc::new(default_registry()));

    engine.report_value_change("search", json!("foo"));

    let filters = engine.filters_for_component("table");
    assert_eq!(filters.len(), 2);
    assert!(filters.iter().all(|f| f.id == "search"));
}

#[test]
fn unknown_source_id_changes_nothing() {
    let (mut engine, sink) = cascade_engine();

    engine.report_value_change("ghost", json!("x"));

    assert!(engine.filter_info("ghost").is_none());
    assert!(engine.pending_scopes().is_empty());
    assert!(sink.requests().is_empty());
}

#[test]
fn fetch_target_without_meta_is_skipped() {
    let instances = InstanceRegistry::new(vec![
        ComponentInstance::new("search", "InputFilter").with_prop("targets", json!(["widget"])),
        ComponentInstance::new("widget", "CustomWidget"),
    ]);
    let sink = RecordingSink::new();
    let mut engine = FilterEngine::with_sink(
        instances,
        Arc::new(default_registry()),
        Box::new(sink.clone()),
    );

    engine.report_value_change("search", json!("foo"));

    // The filter state updates (same scope), but no fetch can be computed.
    assert!(engine.filter_info("search").is_some());
    assert!(sink.requests().is_empty());
}

#[test]
fn replace_config_rebuilds_edges_and_keeps_state() {
    let (mut engine, _sink) = cascade_engine();
    engine.report_value_change("country", json!("中国"));
    assert_eq!(engine.edges_for("country").len(), 3);

    let swapped = InstanceRegistry::new(vec![
        ComponentInstance::new("country", "SelectFilter").with_prop("targets", json!(["table"])),
        ComponentInstance::new("table", "TableDisplay"),
    ]);
    engine.replace_config(swapped, Arc::new(default_registry()));

    assert_eq!(engine.edges_for("country").len(), 1);
    assert!(engine.edges_for("province").is_empty());
    let info = engine.filter_info("country").expect("state survives swap");
    assert_eq!(info.value, json!("中国"));
}
