//! The filter propagation engine.
//!
//! One `FilterEngine` is constructed per rendering session and owns the
//! whole filter state: there is no ambient singleton. All transitions are
//! synchronous; a `report_value_change` or `submit_scope` call runs to
//! completion before the next external event is processed.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use designer_meta::MetaRegistry;
use designer_model::{DEFAULT_SCOPE, EventConfig, EventKind, FilterInfo};

use crate::edges::build_edge_index;
use crate::fetch::{FetchRequest, FetchSink, LoggingSink};
use crate::instances::InstanceRegistry;

pub struct FilterEngine {
    instances: InstanceRegistry,
    metas: Arc<MetaRegistry>,
    edges_by_source: BTreeMap<String, Vec<EventConfig>>,
    /// Filter state store: at most one entry per component id, created on
    /// first successful propagation and overwritten on every later one.
    filters: BTreeMap<String, FilterInfo>,
    /// Pending scope buffer: uncommitted values held back because they
    /// crossed a scope boundary.
    pending_scopes: BTreeMap<String, BTreeMap<String, Value>>,
    generations: BTreeMap<String, u64>,
    sink: Box<dyn FetchSink>,
}

impl FilterEngine {
    pub fn new(instances: InstanceRegistry, metas: Arc<MetaRegistry>) -> Self {
        Self::with_sink(instances, metas, Box::new(LoggingSink))
    }

    pub fn with_sink(
        instances: InstanceRegistry,
        metas: Arc<MetaRegistry>,
        sink: Box<dyn FetchSink>,
    ) -> Self {
        let edges_by_source = build_edge_index(&instances, &metas);
        Self {
            instances,
            metas,
            edges_by_source,
            filters: BTreeMap::new(),
            pending_scopes: BTreeMap::new(),
            generations: BTreeMap::new(),
            sink,
        }
    }

    /// Swaps the declared configuration wholesale and rebuilds the derived
    /// edge index. Accumulated filter state and pending buffers survive:
    /// instances are declaration-time data, filter state is session data.
    pub fn replace_config(&mut self, instances: InstanceRegistry, metas: Arc<MetaRegistry>) {
        self.instances = instances;
        self.metas = metas;
        self.edges_by_source = build_edge_index(&self.instances, &self.metas);
        debug!(
            sources = self.edges_by_source.len(),
            "configuration replaced; edge index rebuilt"
        );
    }

    pub fn instances(&self) -> &InstanceRegistry {
        &self.instances
    }

    pub fn metas(&self) -> &MetaRegistry {
        &self.metas
    }

    /// Outgoing edges for a source id, in derivation order.
    pub fn edges_for(&self, source_id: &str) -> &[EventConfig] {
        self.edges_by_source
            .get(source_id)
            .map(|edges| edges.as_slice())
            .unwrap_or(&[])
    }

    /// A component reported a new raw value.
    ///
    /// Every `filterFetch` edge either fires immediately (shared scope or
    /// `ignore_scope`) or buffers the value into the pending scope buffer
    /// of every scope the source belongs to. Firing writes the source's
    /// filter state and invalidates the readiness of every `filterReady`
    /// dependent, once per firing edge. Fetch-trigger evaluation runs
    /// after all state mutation.
    pub fn report_value_change(&mut self, source_id: &str, value: Value) {
        let source_scopes = self.scopes_of(source_id);
        let edges: Vec<EventConfig> = self
            .edges_by_source
            .get(source_id)
            .cloned()
            .unwrap_or_default();
        if edges.is_empty() {
            debug!(component = source_id, "value change with no outgoing edges");
            return;
        }
        let fetch_edges: Vec<&EventConfig> = edges
            .iter()
            .filter(|edge| edge.kind == EventKind::FilterFetch)
            .collect();
        let ready_edges: Vec<&EventConfig> = edges
            .iter()
            .filter(|edge| edge.kind == EventKind::FilterReady)
            .collect();

        let mut fired_targets: Vec<String> = Vec::new();
        for edge in &fetch_edges {
            let target_scopes = self.scopes_of(&edge.target);
            let same_scope = scopes_intersect(&source_scopes, &target_scopes);
            if same_scope || edge.ignore_scope {
                let component_name = self.component_name_of(source_id);
                self.filters.insert(
                    source_id.to_string(),
                    FilterInfo {
                        id: source_id.to_string(),
                        value: value.clone(),
                        ready: true,
                        component_name,
                    },
                );
                // Any upstream change invalidates downstream readiness;
                // this repeats for every firing fetch edge.
                for ready_edge in &ready_edges {
                    if let Some(info) = self.filters.get_mut(&ready_edge.target) {
                        info.ready = false;
                        debug!(
                            component = %ready_edge.target,
                            source = source_id,
                            "readiness invalidated by upstream change"
                        );
                    }
                }
                fired_targets.push(edge.target.clone());
            } else {
                for scope in &source_scopes {
                    self.pending_scopes
                        .entry(scope.clone())
                        .or_default()
                        .insert(source_id.to_string(), value.clone());
                }
                debug!(
                    component = source_id,
                    target = %edge.target,
                    "change crossed scope boundary; value buffered"
                );
            }
        }

        for target in fired_targets {
            self.evaluate_fetch(&target);
        }
    }

    /// Commits a named scope's buffered values and re-triggers fetch
    /// evaluation for every affected edge. Submitting an unknown or empty
    /// scope is a no-op.
    pub fn submit_scope(&mut self, scope_name: &str) {
        let Some(pending) = self.pending_scopes.remove(scope_name) else {
            debug!(scope = scope_name, "scope submission with nothing pending");
            return;
        };
        debug!(
            scope = scope_name,
            count = pending.len(),
            "committing pending scope filters"
        );
        for (component_id, value) in &pending {
            let component_name = self.component_name_of(component_id);
            self.filters.insert(
                component_id.clone(),
                FilterInfo {
                    id: component_id.clone(),
                    value: value.clone(),
                    ready: true,
                    component_name,
                },
            );
        }
        for component_id in pending.keys() {
            let targets: Vec<String> = self
                .edges_by_source
                .get(component_id)
                .map(|edges| {
                    edges
                        .iter()
                        .filter(|edge| edge.kind == EventKind::FilterFetch)
                        .map(|edge| edge.target.clone())
                        .collect()
                })
                .unwrap_or_default();
            for target in targets {
                self.evaluate_fetch(&target);
            }
        }
    }

    /// Direct state read, no side effects.
    pub fn filter_info(&self, component_id: &str) -> Option<&FilterInfo> {
        self.filters.get(component_id)
    }

    /// Every filter acting on a target, in edge-discovery order (source id
    /// order, then per-source edge order). A source with several edges to
    /// the same target appears once per edge; callers tolerate repeats.
    pub fn filters_for_component(&self, target_id: &str) -> Vec<FilterInfo> {
        let mut filters = Vec::new();
        for (source_id, edges) in &self.edges_by_source {
            for edge in edges {
                if edge.kind == EventKind::FilterFetch && edge.target == target_id {
                    if let Some(info) = self.filters.get(source_id) {
                        filters.push(info.clone());
                    }
                }
            }
        }
        filters
    }

    /// All current filter state, ordered by component id.
    pub fn filter_state(&self) -> impl Iterator<Item = &FilterInfo> {
        self.filters.values()
    }

    /// Uncommitted values for one scope, if any.
    pub fn pending_scope(&self, scope_name: &str) -> Option<&BTreeMap<String, Value>> {
        self.pending_scopes.get(scope_name)
    }

    /// The whole pending buffer, keyed by scope name.
    pub fn pending_scopes(&self) -> &BTreeMap<String, BTreeMap<String, Value>> {
        &self.pending_scopes
    }

    /// Fetch-trigger evaluation for one target: resolve the instance and
    /// its meta, gather the filters acting on it, and dispatch the
    /// computed parameters only when every filter is ready.
    fn evaluate_fetch(&mut self, target: &str) {
        let Some(instance) = self.instances.resolve(target) else {
            debug!(component = target, "fetch target is not a declared instance");
            return;
        };
        let Some(meta) = self.metas.get(&instance.component_name) else {
            debug!(
                component = target,
                component_name = %instance.component_name,
                "no meta registered for fetch target"
            );
            return;
        };
        let filters = self.filters_for_component(target);
        if !filters.iter().all(|filter| filter.ready) {
            debug!(
                component = target,
                "fetch blocked; an upstream filter is not ready"
            );
            return;
        }
        // A meta without fetch params never fetches.
        let Some(params) = meta.fetch_params(instance, &filters) else {
            return;
        };
        let generation = {
            let counter = self.generations.entry(target.to_string()).or_insert(0);
            *counter += 1;
            *counter
        };
        debug!(
            component = target,
            generation, "fetch eligible; dispatching parameters"
        );
        self.sink.dispatch(FetchRequest {
            target: target.to_string(),
            generation,
            params,
        });
    }

    /// Scopes a component belongs to; unknown ids and unregistered types
    /// degrade to the default scope.
    fn scopes_of(&self, component_id: &str) -> Vec<String> {
        let Some(instance) = self.instances.resolve(component_id) else {
            debug!(component = component_id, "scope lookup for unknown id");
            return vec![DEFAULT_SCOPE.to_string()];
        };
        match self.metas.get(&instance.component_name) {
            Some(meta) => meta.filter_scope(instance),
            None => vec![DEFAULT_SCOPE.to_string()],
        }
    }

    fn component_name_of(&self, component_id: &str) -> String {
        self.instances
            .resolve(component_id)
            .map(|instance| instance.component_name.clone())
            .unwrap_or_default()
    }
}

fn scopes_intersect(left: &[String], right: &[String]) -> bool {
    left.iter().any(|scope| right.contains(scope))
}
