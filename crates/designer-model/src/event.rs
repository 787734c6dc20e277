//! Propagation edges derived from instance props by component metas.

use serde::{Deserialize, Serialize};

/// The two propagation relationships a component can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    /// The target is informed of the source's value and becomes a
    /// re-fetch candidate, subject to scope gating.
    FilterFetch,
    /// The target's readiness is invalidated whenever the source changes,
    /// regardless of scope.
    FilterReady,
}

/// A directed propagation edge from `source` to `target`.
///
/// Edges are derived values: they are recomputed from the instance list and
/// the meta registry whenever either is swapped, never stored as
/// first-class configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventConfig {
    pub kind: EventKind,
    pub source: String,
    pub target: String,
    /// Forces immediate propagation across scope boundaries for a
    /// `FilterFetch` edge.
    #[serde(default)]
    pub ignore_scope: bool,
}

impl EventConfig {
    pub fn fetch(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind: EventKind::FilterFetch,
            source: source.into(),
            target: target.into(),
            ignore_scope: false,
        }
    }

    pub fn ready(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind: EventKind::FilterReady,
            source: source.into(),
            target: target.into(),
            ignore_scope: false,
        }
    }

    #[must_use]
    pub fn ignoring_scope(mut self, ignore: bool) -> Self {
        self.ignore_scope = ignore;
        self
    }
}
