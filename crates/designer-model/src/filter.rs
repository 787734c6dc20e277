//! Filter state and scope conventions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::instance::ComponentInstance;

/// Scope assigned to components that declare none.
pub const DEFAULT_SCOPE: &str = "default";

/// Current filter state for one component.
///
/// `ready = false` means the value is known but downstream consumers must
/// not fetch with it yet: an upstream selection changed and this one has
/// not settled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterInfo {
    pub id: String,
    pub value: Value,
    pub ready: bool,
    pub component_name: String,
}

/// Scope derivation convention shared by the filter components: the
/// `filterScope` prop when present, otherwise the default scope.
pub fn filter_scope_from_props(instance: &ComponentInstance) -> Vec<String> {
    let scopes = instance.string_list_prop("filterScope");
    if scopes.is_empty() {
        vec![DEFAULT_SCOPE.to_string()]
    } else {
        scopes
    }
}
