use anyhow::{Context, Result};
use comfy_table::Table;

use designer_cli::replay::{ReplayOutcome, load_script, replay};
use designer_engine::{ConfigReport, InstanceRegistry, audit_config};
use designer_meta::default_registry;
use designer_model::DashboardDsl;

use crate::cli::{CheckArgs, RunArgs};
use crate::summary::apply_table_style;

pub fn run_replay(args: &RunArgs) -> Result<ReplayOutcome> {
    let events = load_script(&args.events)?;
    replay(&args.dashboard, &events)
}

pub fn run_check(args: &CheckArgs) -> Result<ConfigReport> {
    let dsl = DashboardDsl::load(&args.dashboard)
        .with_context(|| format!("load dashboard {}", args.dashboard.display()))?;
    let instances = InstanceRegistry::from_dsl(dsl);
    Ok(audit_config(&instances, &default_registry()))
}

pub fn run_components() -> Result<()> {
    let registry = default_registry();
    let mut names: Vec<&str> = registry.component_names().collect();
    names.sort_unstable();
    let mut table = Table::new();
    table.set_header(vec!["Component", "Description"]);
    apply_table_style(&mut table);
    for name in names {
        let description = registry
            .get(name)
            .map(|meta| meta.description())
            .unwrap_or_default();
        table.add_row(vec![name.to_string(), description.to_string()]);
    }
    println!("{table}");
    Ok(())
}
