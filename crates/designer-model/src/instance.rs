//! Declared component instances.
//!
//! Instances are configuration-time data: they are declared once per session
//! and never mutated in place. Everything behavior-specific lives in the
//! opaque `props` bag, which only the component's meta (and the visual
//! renderer, out of scope here) interprets.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One declared, addressable unit of dashboard behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInstance {
    /// Unique identifier, process-wide.
    pub id: String,
    /// Key into the meta registry (e.g. `SelectFilter`).
    pub component_name: String,
    /// Opaque key-value bag interpreted by the component's meta.
    #[serde(default)]
    pub props: Map<String, Value>,
    /// Nested instances, exclusively owned by this parent. Used for
    /// tree lookup only; propagation never follows the tree.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentInstance>,
}

impl ComponentInstance {
    pub fn new(id: impl Into<String>, component_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_name: component_name.into(),
            props: Map::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style prop assignment, mainly for tests and fixtures.
    #[must_use]
    pub fn with_prop(mut self, key: &str, value: Value) -> Self {
        self.props.insert(key.to_string(), value);
        self
    }

    /// Reads a prop as a list of strings.
    ///
    /// Missing props, non-array values, and non-string elements all degrade
    /// to an empty/partial list rather than failing; a malformed dashboard
    /// renders with fewer linkages, it does not error.
    pub fn string_list_prop(&self, key: &str) -> Vec<String> {
        match self.props.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Reads a prop as a boolean, defaulting to `false`.
    pub fn bool_prop(&self, key: &str) -> bool {
        self.props
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Reads a prop as a string.
    pub fn str_prop(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }
}
