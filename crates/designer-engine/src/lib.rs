//! Filter propagation engine.
//!
//! Given a declared list of component instances and a meta registry, this
//! crate derives the propagation-edge index, holds the per-component
//! filter state and the pending scope buffer, and runs the fan-out
//! algorithm: immediate propagation within a shared scope, buffering
//! across scope boundaries, readiness invalidation for cascades, and
//! fetch-trigger evaluation gated on every upstream filter being ready.

pub mod audit;
pub mod edges;
pub mod engine;
pub mod fetch;
pub mod instances;

pub use audit::{ConfigIssue, ConfigReport, IssueSeverity, audit_config};
pub use edges::build_edge_index;
pub use engine::FilterEngine;
pub use fetch::{FetchRequest, FetchSink, LoggingSink, RecordingSink};
pub use instances::InstanceRegistry;
