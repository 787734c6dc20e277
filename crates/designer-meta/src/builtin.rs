//! Built-in component metas.
//!
//! These cover the standard dashboard vocabulary: free-text and select
//! filters as sources, table and chart displays as fetch targets (and,
//! via cell/series clicks, as sources too), and the query button that
//! releases a scope. Instance props follow the declarative conventions:
//! `targets`, `filterReadyTargets`, `ignoreFilterScope`, `filterScope`.

use serde_json::{Value, json};

use designer_model::{ComponentInstance, EventConfig, FilterInfo};

use crate::meta::{ComponentMeta, MetaRegistry};

/// Fetch edges from the `targets` prop, one per listed target id.
fn fetch_edges_from_targets(instance: &ComponentInstance, ignore_scope: bool) -> Vec<EventConfig> {
    instance
        .string_list_prop("targets")
        .into_iter()
        .map(|target| EventConfig::fetch(&instance.id, target).ignoring_scope(ignore_scope))
        .collect()
}

/// Fetch parameters shared by the display components: the component id
/// plus one `{field, value}` entry per filter acting on it.
fn display_fetch_params(instance: &ComponentInstance, filters: &[FilterInfo]) -> Value {
    let entries: Vec<Value> = filters
        .iter()
        .map(|filter| {
            json!({
                "field": filter.component_name,
                "value": filter.value,
            })
        })
        .collect();
    json!({
        "componentId": instance.id,
        "filters": entries,
    })
}

/// Free-text input filter. Originates fetch edges only.
pub struct InputFilterMeta;

impl ComponentMeta for InputFilterMeta {
    fn component_name(&self) -> &'static str {
        "InputFilter"
    }

    fn description(&self) -> &'static str {
        "Free-text filter input"
    }

    fn event_configs(&self, instance: &ComponentInstance) -> Vec<EventConfig> {
        fetch_edges_from_targets(instance, false)
    }
}

/// Select filter. Originates fetch edges (optionally scope-ignoring) and
/// readiness edges for cascading dependents.
pub struct SelectFilterMeta;

impl ComponentMeta for SelectFilterMeta {
    fn component_name(&self) -> &'static str {
        "SelectFilter"
    }

    fn description(&self) -> &'static str {
        "Single-choice select filter with cascade support"
    }

    fn event_configs(&self, instance: &ComponentInstance) -> Vec<EventConfig> {
        let ignore_scope = instance.bool_prop("ignoreFilterScope");
        let mut configs = fetch_edges_from_targets(instance, ignore_scope);
        for target in instance.string_list_prop("filterReadyTargets") {
            configs.push(EventConfig::ready(&instance.id, target));
        }
        configs
    }
}

/// Tabular display. A fetch target, and a fetch source via cell clicks.
pub struct TableDisplayMeta;

impl ComponentMeta for TableDisplayMeta {
    fn component_name(&self) -> &'static str {
        "TableDisplay"
    }

    fn description(&self) -> &'static str {
        "Tabular data display, refetches on filter changes"
    }

    fn event_configs(&self, instance: &ComponentInstance) -> Vec<EventConfig> {
        fetch_edges_from_targets(instance, false)
    }

    fn fetch_params(&self, instance: &ComponentInstance, filters: &[FilterInfo]) -> Option<Value> {
        Some(display_fetch_params(instance, filters))
    }
}

/// Chart display. Same contract as the table: target and click-source.
pub struct ChartDisplayMeta;

impl ComponentMeta for ChartDisplayMeta {
    fn component_name(&self) -> &'static str {
        "ChartDisplay"
    }

    fn description(&self) -> &'static str {
        "Chart display, refetches on filter changes"
    }

    fn event_configs(&self, instance: &ComponentInstance) -> Vec<EventConfig> {
        fetch_edges_from_targets(instance, false)
    }

    fn fetch_params(&self, instance: &ComponentInstance, filters: &[FilterInfo]) -> Option<Value> {
        Some(display_fetch_params(instance, filters))
    }
}

/// Stateless submit trigger. Originates no edges and never fetches; the
/// scope it releases lives in its `scopeName` prop.
pub struct QueryButtonMeta;

impl QueryButtonMeta {
    /// The scope a button instance submits, when declared.
    pub fn scope_name(instance: &ComponentInstance) -> Option<String> {
        instance.str_prop("scopeName").map(str::to_string)
    }
}

impl ComponentMeta for QueryButtonMeta {
    fn component_name(&self) -> &'static str {
        "QueryButton"
    }

    fn description(&self) -> &'static str {
        "Submit button releasing a pending filter scope"
    }
}

/// Builds a registry with all built-in metas registered.
pub fn default_registry() -> MetaRegistry {
    let mut registry = MetaRegistry::new();
    registry.register(Box::new(InputFilterMeta));
    registry.register(Box::new(SelectFilterMeta));
    registry.register(Box::new(TableDisplayMeta));
    registry.register(Box::new(ChartDisplayMeta));
    registry.register(Box::new(QueryButtonMeta));
    registry
}
