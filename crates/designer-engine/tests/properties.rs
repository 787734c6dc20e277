//! Property tests for the propagation invariants.

use std::sync::Arc;

use proptest::collection::{btree_set, vec};
use proptest::prelude::*;
use serde_json::json;

use designer_engine::{FilterEngine, InstanceRegistry, RecordingSink};
use designer_meta::default_registry;
use designer_model::{ComponentInstance, FilterInfo};

/// One input filtering one table; the input optionally scoped, the table
/// always in the default scope.
fn single_target_engine(scopes: &[String]) -> (FilterEngine, RecordingSink) {
    let mut input = ComponentInstance::new("input", "InputFilter")
        .with_prop("targets", json!(["table"]));
    if !scopes.is_empty() {
        input = input.with_prop("filterScope", json!(scopes));
    }
    let instances = InstanceRegistry::new(vec![
        input,
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

proptest! {
    #[test]
    fn repeating_a_report_is_idempotent(value in "[a-zA-Z0-9]{0,16}") {
        let (mut engine, _sink) = single_target_engine(&[]);

        engine.report_value_change("input", json!(value.clone()));
        let first: Vec<FilterInfo> = engine.filter_state().cloned().collect();

        engine.report_value_change("input", json!(value));
        let second: Vec<FilterInfo> = engine.filter_state().cloned().collect();

        prop_assert_eq!(first, second);
        prop_assert!(engine.pending_scopes().is_empty());
    }

    #[test]
    fn buffered_change_lands_in_every_source_scope(
        names in btree_set("[a-z]{1,8}", 1..4usize),
        value in "[a-z0-9]{1,12}",
    ) {
        // Prefixed so no generated scope collides with the default scope.
        let scopes: Vec<String> = names.into_iter().map(|s| format!("scope-{s}")).collect();
        let (mut engine, sink) = single_target_engine(&scopes);

        engine.report_value_change("input", json!(value.clone()));

        prop_assert!(engine.filter_info("input").is_none());
        prop_assert!(sink.requests().is_empty());
        prop_assert_eq!(engine.pending_scopes().len(), scopes.len());
        let expected = json!(value);
        for scope in &scopes {
            let buffered = engine.pending_scope(scope).and_then(|p| p.get("input"));
            prop_assert_eq!(buffered, Some(&expected));
        }

        for scope in &scopes {
            engine.submit_scope(scope);
        }
        prop_assert!(engine.pending_scopes().is_empty());
        prop_assert!(engine.filter_info("input").is_some_and(|f| f.ready));
    }

    #[test]
    fn fetch_generations_increase_by_one(values in vec("[a-z]{1,8}", 1..8)) {
        let (mut engine, sink) = single_target_engine(&[]);

        for value in &values {
            engine.report_value_change("input", json!(value));
        }

        let generations: Vec<u64> = sink.take().into_iter().map(|r| r.generation).collect();
        let expected: Vec<u64> = (1..=values.len() as u64).collect();
        prop_assert_eq!(generations, expected);
    }
}
