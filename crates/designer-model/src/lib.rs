//! Core data model for the declarative filter-propagation layer.
//!
//! Components declare filtering relationships through metadata rather than
//! hard-coded references; this crate holds the shared vocabulary: declared
//! instances, derived propagation edges, per-component filter state, and
//! the dashboard DSL document.

pub mod dsl;
pub mod error;
pub mod event;
pub mod filter;
pub mod instance;

pub use dsl::DashboardDsl;
pub use error::{DesignerError, Result};
pub use event::{EventConfig, EventKind};
pub use filter::{DEFAULT_SCOPE, FilterInfo, filter_scope_from_props};
pub use instance::ComponentInstance;
