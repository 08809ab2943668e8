//! core::meta
//!
//! Variable metadata container.
//!
//! # Modules
//!
//! - [`record`] - Attribute records and typed read views
//! - [`fields`] - Typed assignment input
//! - [`store`] - The container, reads, snapshots, and merging
//! - [`equality`] - Structural equality and cross-type comparison
//!
//! # Architecture
//!
//! A [`MetadataStore`] maps variable names to attribute records. All records
//! share the same label set, so the store can always be read as a
//! rectangular label × variable table. Variables may also carry a nested
//! store (higher-order metadata).
//!
//! Every mutation goes through [`MetadataStore::assign`], which validates
//! the whole assignment before writing anything.
//!
//! # Example
//!
//! ```
//! use varmeta::core::meta::{Fields, MetadataStore};
//!
//! let mut profiles = MetadataStore::new();
//! profiles.set("dm", Fields::new().with("units", "hey").with("long_name", "boo")).unwrap();
//!
//! let mut store = MetadataStore::new();
//! store.set("higher", profiles.clone()).unwrap();
//!
//! assert!(store.is_higher_order("higher"));
//! assert_eq!(store.read("higher"), profiles);
//! ```

mod assign;
pub mod equality;
pub mod fields;
pub mod record;
pub mod store;

pub use equality::Comparison;
pub use fields::{Column, Fields, Target};
pub use record::{AttributeRecord, MetaLabels, RecordView};
pub use store::{Lookup, MetadataStore, RecordSet};

use thiserror::Error;

use crate::core::types::TypeError;

/// Errors from metadata operations.
#[derive(Debug, Error)]
pub enum MetaError {
    /// A per-target column does not match the number of targets.
    #[error("field length mismatch for '{label}': expected {expected}, found {found}")]
    LengthMismatch {
        /// Label of the offending column
        label: String,
        /// Number of targets
        expected: usize,
        /// Length of the column
        found: usize,
    },

    /// The same variable appears twice in one assignment.
    #[error("duplicate target in assignment: {0}")]
    DuplicateTarget(String),

    /// A strict merge found a variable present in both stores.
    #[error("variable already present: {0}")]
    DuplicateVariable(String),

    /// Invalid variable name or label.
    #[error(transparent)]
    Type(#[from] TypeError),
}
