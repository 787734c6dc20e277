//! Component meta trait and registry.
//!
//! A meta describes how one component type behaves in the propagation
//! layer: which edges an instance originates, which scopes it belongs to,
//! and how it turns the filters acting on it into fetch parameters. Metas
//! are registered by component name; an unregistered name is not an error,
//! the instance simply originates no edges and keeps the default scope.

use std::collections::HashMap;

use serde_json::Value;

use designer_model::{ComponentInstance, EventConfig, FilterInfo, filter_scope_from_props};

/// Behavior descriptor for one component type.
///
/// All three derivations must be pure: the engine calls them synchronously,
/// possibly several times per propagation cycle, and assumes nothing about
/// call count.
pub trait ComponentMeta: Send + Sync {
    /// Component name this meta handles (e.g. `"SelectFilter"`).
    fn component_name(&self) -> &'static str;

    /// Human-readable description, for listings.
    fn description(&self) -> &'static str {
        "Component meta"
    }

    /// Edges for which the given instance is the source.
    ///
    /// The returned order is preserved by the edge index and affects
    /// readiness-invalidation ordering, so it must be deterministic.
    fn event_configs(&self, instance: &ComponentInstance) -> Vec<EventConfig> {
        let _ = instance;
        Vec::new()
    }

    /// Scopes the instance belongs to. Defaults to the `filterScope` prop
    /// convention (or the default scope when unspecified).
    fn filter_scope(&self, instance: &ComponentInstance) -> Vec<String> {
        filter_scope_from_props(instance)
    }

    /// Fetch parameters for the instance given the filters acting on it.
    ///
    /// `None` means the component never fetches; the engine skips
    /// fetch-trigger evaluation for it silently.
    fn fetch_params(&self, instance: &ComponentInstance, filters: &[FilterInfo]) -> Option<Value> {
        let _ = (instance, filters);
        None
    }
}

/// Registry of component metas indexed by component name.
pub struct MetaRegistry {
    metas: HashMap<&'static str, Box<dyn ComponentMeta>>,
}

impl MetaRegistry {
    pub fn new() -> Self {
        Self {
            metas: HashMap::new(),
        }
    }

    /// Registers a meta under its component name, replacing any previous
    /// registration for that name.
    pub fn register(&mut self, meta: Box<dyn ComponentMeta>) {
        self.metas.insert(meta.component_name(), meta);
    }

    /// Looks up the meta for a component name.
    ///
    /// A miss is expected for purely visual components; callers degrade to
    /// "no edges, default scope".
    pub fn get(&self, component_name: &str) -> Option<&dyn ComponentMeta> {
        self.metas.get(component_name).map(Box::as_ref)
    }

    pub fn len(&self) -> usize {
        self.metas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metas.is_empty()
    }

    /// All registered component names, unordered.
    pub fn component_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.metas.keys().copied()
    }
}

impl Default for MetaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
