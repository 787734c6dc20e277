//! Event configuration builder.
//!
//! Derives the flat propagation-edge index from the declared instances and
//! the meta registry. The index is a memoized value: it is rebuilt from
//! scratch whenever either input is swapped, never patched incrementally.

use std::collections::BTreeMap;

use tracing::debug;

use designer_meta::MetaRegistry;
use designer_model::EventConfig;

use crate::instances::InstanceRegistry;

/// Groups every derived edge by its source component id.
///
/// Per-source edge order equals the order the meta returned them; source
/// ids iterate in lexicographic order, which keeps downstream filter
/// gathering deterministic.
pub fn build_edge_index(
    instances: &InstanceRegistry,
    metas: &MetaRegistry,
) -> BTreeMap<String, Vec<EventConfig>> {
    let mut index: BTreeMap<String, Vec<EventConfig>> = BTreeMap::new();
    for instance in instances.iter() {
        let Some(meta) = metas.get(&instance.component_name) else {
            debug!(
                component = %instance.id,
                component_name = %instance.component_name,
                "no meta registered; instance originates no edges"
            );
            continue;
        };
        for config in meta.event_configs(instance) {
            index.entry(config.source.clone()).or_default().push(config);
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use designer_meta::default_registry;
    use designer_model::{ComponentInstance, EventKind};

    use super::build_edge_index;
    use crate::instances::InstanceRegistry;

    #[test]
    fn index_groups_by_source_and_preserves_meta_order() {
        let instances = InstanceRegistry::new(vec![
            ComponentInstance::new("country", "SelectFilter")
                .with_prop("targets", json!(["province", "table"]))
                .with_prop("filterReadyTargets", json!(["province"])),
            ComponentInstance::new("table", "TableDisplay"),
        ]);
        let index = build_edge_index(&instances, &default_registry());

        let edges = index.get("country").expect("country edges");
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0].kind, EventKind::FilterFetch);
        assert_eq!(edges[0].target, "province");
        assert_eq!(edges[1].target, "table");
        assert_eq!(edges[2].kind, EventKind::FilterReady);
        assert!(index.get("table").is_none());
    }

    #[test]
    fn unknown_component_types_contribute_nothing() {
        let instances = InstanceRegistry::new(vec![
            ComponentInstance::new("widget", "CustomWidget").with_prop("targets", json!(["table"])),
        ]);
        let index = build_edge_index(&instances, &default_registry());
        assert!(index.is_empty());
    }
}
