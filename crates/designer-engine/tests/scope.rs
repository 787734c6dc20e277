use std::sync::Arc;

use serde_json::json;

use designer_engine::{FilterEngine, InstanceRegistry, RecordingSink};
use designer_meta::default_registry;
use designer_model::ComponentInstance;

/// Query-group layout: a scoped input filtering a default-scope table,
/// released by an explicit submit.
fn query_group_engine() -> (FilterEngine, RecordingSink) {
    let instances = InstanceRegistry::new(vec![
        ComponentInstance::new("input", "InputFilter")
            .with_prop("filterScope", json!(["queryGroup"]))
            .with_prop("targets", json!(["table"])),
        ComponentInstance::new("submit", "QueryButton")
            .with_prop("scopeName", json!("queryGroup")),
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
fn cross_scope_change_is_buffered_not_applied() {
    let (mut engine, sink) = query_group_engine();

    engine.report_value_change("input", json!("foo"));

    assert!(engine.filter_info("input").is_none());
    assert!(engine.filters_for_component("table").is_empty());
    assert!(sink.requests().is_empty());
    let pending = engine.pending_scope("queryGroup").expect("buffered scope");
    assert_eq!(pending.get("input"), Some(&json!("foo")));
}

#[test]
fn scope_submission_commits_and_clears_the_buffer() {
    let (mut engine, sink) = query_group_engine();
    engine.report_value_change("input", json!("foo"));

    engine.submit_scope("queryGroup");

    let info = engine.filter_info("input").expect("committed filter");
    assert_eq!(info.value, json!("foo"));
    assert!(info.ready);
    assert!(engine.pending_scope("queryGroup").is_none());

    let filters = engine.filters_for_component("table");
    assert_eq!(filters.len(), 1);
    assert_eq!(filters[0].id, "input");

    let requests = sink.take();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].target, "table");
    assert_eq!(requests[0].params["filters"][0]["value"], "foo");
}

#[test]
fn ignore_scope_bypasses_the_boundary() {
    let instances = InstanceRegistry::new(vec![
        ComponentInstance::new("global", "SelectFilter")
            .with_prop("filterScope", json!(["queryGroup"]))
            .with_prop("ignoreFilterScope", json!(true))
            .with_prop("targets", json!(["table"])),
        ComponentInstance::new("table", "TableDisplay"),
    ]);
    let sink = RecordingSink::new();
    let mut engine = FilterEngine::with_sink(
        instances,
        Arc::new(default_registry()),
        Box::new(sink.clone()),
    );

    engine.report_value_change("global", json!("all"));

    let info = engine.filter_info("global").expect("immediate update");
    assert_eq!(info.value, json!("all"));
    assert!(engine.pending_scopes().is_empty(), "nothing may buffer");
    assert_eq!(sink.requests().len(), 1);
}

#[test]
fn buffered_value_fans_out_to_every_source_scope() {
    let instances = InstanceRegistry::new(vec![
        ComponentInstance::new("input", "InputFilter")
            .with_prop("filterScope", json!(["groupA", "groupB"]))
            .with_prop("targets", json!(["table"])),
        ComponentInstance::new("table", "TableDisplay"),
    ]);
    let mut engine = FilterEngine::new(instances, Arc::new(default_registry()));

    engine.report_value_change("input", json!("foo"));
    assert!(engine.pending_scope("groupA").is_some());
    assert!(engine.pending_scope("groupB").is_some());

    // Submission drains only the named scope.
    engine.submit_scope("groupA");
    assert!(engine.pending_scope("groupA").is_none());
    let remaining = engine.pending_scope("groupB").expect("other scope kept");
    assert_eq!(remaining.get("input"), Some(&json!("foo")));
}

#[test]
fn rebuffering_overwrites_the_pending_entry() {
    let (mut engine, _sink) = query_group_engine();

    engine.report_value_change("input", json!("foo"));
    engine.report_value_change("input", json!("bar"));

    let pending = engine.pending_scope("queryGroup").expect("buffered scope");
    assert_eq!(pending.len(), 1, "overwritten, not appended");
    assert_eq!(pending.get("input"), Some(&json!("bar")));
}

#[test]
fn submitting_an_unknown_scope_is_a_noop() {
    let (mut engine, sink) = query_group_engine();

    engine.submit_scope("nothing");

    assert!(engine.filter_info("input").is_none());
    assert!(sink.requests().is_empty());
}

#[test]
fn submission_fetch_is_gated_on_readiness() {
    let instances = InstanceRegistry::new(vec![
        ComponentInstance::new("country", "SelectFilter")
            .with_prop("targets", json!(["province", "table"]))
            .with_prop("filterReadyTargets", json!(["province"])),
        ComponentInstance::new("province", "SelectFilter").with_prop("targets", json!(["table"])),
        ComponentInstance::new("input", "InputFilter")
            .with_prop("filterScope", json!(["queryGroup"]))
            .with_prop("targets", json!(["table"])),
        ComponentInstance::new("table", "TableDisplay"),
    ]);
    let sink = RecordingSink::new();
    let mut engine = FilterEngine::with_sink(
        instances,
        Arc::new(default_registry()),
        Box::new(sink.clone()),
    );

    engine.report_value_change("province", json!("广东省"));
    engine.report_value_change("country", json!("中国"));
    engine.report_value_change("input", json!("foo"));
    sink.take();

    // The province is stale after the country change, so releasing the
    // scope commits the input but must not trigger the table fetch.
    engine.submit_scope("queryGroup");

    assert!(engine.filter_info("input").is_some());
    assert!(sink.requests().is_empty());
}
