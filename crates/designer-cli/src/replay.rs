//! Dashboard replay: drive the filter engine with a scripted interaction
//! sequence instead of a rendered page.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use designer_engine::{
    ConfigReport, FetchRequest, FilterEngine, InstanceRegistry, RecordingSink, audit_config,
};
use designer_meta::default_registry;
use designer_model::{DashboardDsl, FilterInfo};

/// One scripted user interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScriptEvent {
    /// A component reported a new filter value.
    FilterChange { component: String, value: Value },
    /// A query button released a named scope.
    SubmitScope { scope: String },
}

/// Everything the replay produced: final filter state, what is still
/// buffered, and every fetch the engine dispatched along the way.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayOutcome {
    pub filters: Vec<FilterInfo>,
    pub pending_scopes: BTreeMap<String, BTreeMap<String, Value>>,
    pub fetches: Vec<FetchRequest>,
    pub audit: ConfigReport,
}

/// Loads an event script from a JSON file.
pub fn load_script(path: &Path) -> Result<Vec<ScriptEvent>> {
    let file =
        File::open(path).with_context(|| format!("open event script {}", path.display()))?;
    let events = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse event script {}", path.display()))?;
    Ok(events)
}

/// Replays a script against a dashboard configuration.
///
/// Audit findings are logged as warnings but never block the replay; a
/// degraded dashboard runs the way it would render.
pub fn replay(dashboard_path: &Path, events: &[ScriptEvent]) -> Result<ReplayOutcome> {
    let dsl = DashboardDsl::load(dashboard_path)
        .with_context(|| format!("load dashboard {}", dashboard_path.display()))?;
    let instances = InstanceRegistry::from_dsl(dsl);
    let metas = Arc::new(default_registry());

    let audit = audit_config(&instances, &metas);
    for issue in &audit.issues {
        warn!(
            code = %issue.code,
            component = issue.component.as_deref().unwrap_or("-"),
            "{}",
            issue.message
        );
    }

    let sink = RecordingSink::new();
    let mut engine = FilterEngine::with_sink(instances, metas, Box::new(sink.clone()));
    info!(
        components = engine.instances().len(),
        events = events.len(),
        "replaying event script"
    );

    for event in events {
        match event {
            ScriptEvent::FilterChange { component, value } => {
                debug!(component = %component, "script: filter change");
                engine.report_value_change(component, value.clone());
            }
            ScriptEvent::SubmitScope { scope } => {
                debug!(scope = %scope, "script: scope submission");
                engine.submit_scope(scope);
            }
        }
    }

    Ok(ReplayOutcome {
        filters: engine.filter_state().cloned().collect(),
        pending_scopes: engine.pending_scopes().clone(),
        fetches: sink.take(),
        audit,
    })
}

#[cfg(test)]
mod tests {
    use super::ScriptEvent;

    #[test]
    fn script_events_parse_from_tagged_json() {
        let text = r#"[
            {"filterChange": {"component": "country", "value": "中国"}},
            {"submitScope": {"scope": "queryGroup"}}
        ]"#;
        let events: Vec<ScriptEvent> = serde_json::from_str(text).expect("parse script");
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            ScriptEvent::FilterChange { component, .. } if component == "country"
        ));
        assert!(matches!(
            &events[1],
            ScriptEvent::SubmitScope { scope } if scope == "queryGroup"
        ));
    }
}
