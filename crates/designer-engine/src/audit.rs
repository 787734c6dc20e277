//! Declarative configuration audit.
//!
//! A dashboard with duplicate ids, unknown component types, or edges
//! pointing at undeclared instances still runs (the engine degrades
//! silently at each of those points), but authors want to see the problems
//! before shipping a page. The audit reports them without failing.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use designer_meta::MetaRegistry;

use crate::edges::build_edge_index;
use crate::instances::InstanceRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// One problem found in a dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigIssue {
    /// Stable issue code (e.g. "CFG001").
    pub code: String,
    /// Human-readable message.
    pub message: String,
    pub severity: IssueSeverity,
    /// Component id the issue concerns, if any.
    pub component: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigReport {
    pub issues: Vec<ConfigIssue>,
}

impl ConfigReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Audits a declared configuration against a meta registry.
///
/// Checks:
/// - CFG001 (error): duplicate component id anywhere in the forest.
/// - CFG002 (warning): component type with no registered meta; the
///   instance renders as a placeholder and originates no edges.
/// - CFG003 (warning): derived edge whose target resolves to no declared
///   instance; the edge buffers or fires but the target never fetches.
pub fn audit_config(instances: &InstanceRegistry, metas: &MetaRegistry) -> ConfigReport {
    let mut issues = Vec::new();

    let mut seen_ids: BTreeSet<&str> = BTreeSet::new();
    for instance in instances.iter() {
        if !seen_ids.insert(instance.id.as_str()) {
            issues.push(ConfigIssue {
                code: "CFG001".to_string(),
                message: format!("duplicate component id '{}'", instance.id),
                severity: IssueSeverity::Error,
                component: Some(instance.id.clone()),
            });
        }
        if metas.get(&instance.component_name).is_none() {
            issues.push(ConfigIssue {
                code: "CFG002".to_string(),
                message: format!(
                    "no meta registered for component type '{}'",
                    instance.component_name
                ),
                severity: IssueSeverity::Warning,
                component: Some(instance.id.clone()),
            });
        }
    }

    let index = build_edge_index(instances, metas);
    for edges in index.values() {
        for edge in edges {
            if instances.resolve(&edge.target).is_none() {
                issues.push(ConfigIssue {
                    code: "CFG003".to_string(),
                    message: format!(
                        "edge from '{}' targets undeclared instance '{}'",
                        edge.source, edge.target
                    ),
                    severity: IssueSeverity::Warning,
                    component: Some(edge.source.clone()),
                });
            }
        }
    }

    ConfigReport { issues }
}
