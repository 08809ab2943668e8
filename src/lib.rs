//! varmeta - per-variable metadata for scientific datasets
//!
//! A [`MetadataStore`] records attributes such as units, long name, and
//! description for each variable of a dataset. Attribute labels are open
//! ended: assigning a new label back-fills every other variable with a
//! missing value, so the store always reads as a rectangular table.
//! Variables may also carry a nested store of their own (higher-order
//! metadata) for profile or multi-dimensional data.
//!
//! # Architecture
//!
//! - [`core::types`] - Validated names, labels, and attribute values
//! - [`core::config`] - Label scheme configuration
//! - [`core::meta`] - The store, assignment engine, snapshots, and equality
//!
//! # Example
//!
//! ```
//! use varmeta::{Fields, MetadataStore};
//!
//! let mut meta = MetadataStore::new();
//! meta.set("new1", Fields::new().with("units", "hey1").with("long_name", "crew")).unwrap();
//! meta.set(
//!     "new2",
//!     Fields::new()
//!         .with("units", "hey")
//!         .with("long_name", "boo")
//!         .with("description", "boohoo"),
//! )
//! .unwrap();
//!
//! let new1 = meta.read("new1").record().unwrap();
//! assert!(new1.description().is_missing());
//! assert_eq!(meta.read("new2").record().unwrap().description(), "boohoo");
//! ```

pub mod core;

pub use crate::core::config::{Config, ConfigError};
pub use crate::core::meta::{
    AttributeRecord, Column, Comparison, Fields, Lookup, MetaError, MetaLabels, MetadataStore,
    RecordSet, RecordView, Target,
};
pub use crate::core::types::{Label, TypeError, Value, VariableName};
