//! Metadata registry for the filter-propagation layer.
//!
//! Maps a component type name to its behavior descriptor: how to derive
//! propagation edges, scope membership, and fetch parameters from a
//! declared instance.

pub mod builtin;
pub mod meta;

pub use builtin::{
    ChartDisplayMeta, InputFilterMeta, QueryButtonMeta, SelectFilterMeta, TableDisplayMeta,
    default_registry,
};
pub use meta::{ComponentMeta, MetaRegistry};
