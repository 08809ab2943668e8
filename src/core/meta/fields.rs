//! core::meta::fields
//!
//! Typed input for assignments.
//!
//! # Shape
//!
//! An assignment names a [`Target`] (one variable or an ordered list of
//! variables) and supplies [`Fields`]: one [`Column`] per attribute label
//! plus an optional column of nested stores. A column is either a single
//! scalar applied to every target, or one slot per target aligned by
//! position.
//!
//! A missing slot (built from `None`) leaves that target's field untouched.
//! A `None` nested-store slot leaves that target's nested store untouched.
//!
//! # Example
//!
//! ```
//! use varmeta::core::meta::{Fields, MetadataStore};
//!
//! let mut store = MetadataStore::new();
//! store
//!     .assign(
//!         ["dens", "temp"],
//!         Fields::new()
//!             .with_each("units", ["cm^-3", "K"])
//!             .with_each("long_name", [Some("density"), None]),
//!     )
//!     .unwrap();
//!
//! assert_eq!(store.read("dens").record().unwrap().long_name(), "density");
//! assert!(store.read("temp").record().unwrap().long_name().is_missing());
//! ```

use indexmap::IndexMap;

use super::store::MetadataStore;
use crate::core::types::Value;

/// The variable(s) an assignment writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A single variable.
    One(String),
    /// An ordered sequence of distinct variables.
    Many(Vec<String>),
}

impl Target {
    /// Number of variables targeted.
    pub fn len(&self) -> usize {
        match self {
            Target::One(_) => 1,
            Target::Many(names) => names.len(),
        }
    }

    /// Whether no variable is targeted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn into_names(self) -> Vec<String> {
        match self {
            Target::One(name) => vec![name],
            Target::Many(names) => names,
        }
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::One(name.to_string())
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Target::One(name)
    }
}

impl From<&String> for Target {
    fn from(name: &String) -> Self {
        Target::One(name.clone())
    }
}

impl<S: Into<String>> From<Vec<S>> for Target {
    fn from(names: Vec<S>) -> Self {
        Target::Many(names.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Target {
    fn from(names: [S; N]) -> Self {
        Target::Many(names.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String> + Clone> From<&[S]> for Target {
    fn from(names: &[S]) -> Self {
        Target::Many(names.iter().cloned().map(Into::into).collect())
    }
}

/// Values supplied for one label (or for the nested stores).
#[derive(Debug, Clone, PartialEq)]
pub enum Column<T> {
    /// One value applied to every target.
    Scalar(T),
    /// One slot per target, aligned by position.
    PerTarget(Vec<T>),
}

impl<T: Clone> Column<T> {
    /// Check the column against the target count.
    ///
    /// Returns the offending length on mismatch.
    pub(crate) fn check_len(&self, expected: usize) -> Result<(), usize> {
        match self {
            Column::Scalar(_) => Ok(()),
            Column::PerTarget(slots) if slots.len() == expected => Ok(()),
            Column::PerTarget(slots) => Err(slots.len()),
        }
    }

    /// Expand into exactly `n` slots. Must follow a successful `check_len(n)`.
    pub(crate) fn into_slots(self, n: usize) -> Vec<T> {
        match self {
            Column::Scalar(value) => vec![value; n],
            Column::PerTarget(slots) => slots,
        }
    }
}

/// Fields of an assignment.
///
/// Build with [`Fields::new`] and the `with*` methods, from an iterator of
/// `(label, value)` pairs, or from a [`MetadataStore`] to promote a single
/// variable to higher-order metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    columns: IndexMap<String, Column<Value>>,
    meta: Option<Column<Option<MetadataStore>>>,
}

impl Fields {
    /// Create empty fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one value for a label, applied to every target.
    pub fn with(mut self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.columns
            .insert(label.into(), Column::Scalar(value.into()));
        self
    }

    /// Set one value per target for a label.
    pub fn with_each<I, V>(mut self, label: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let slots = values.into_iter().map(Into::into).collect();
        self.columns.insert(label.into(), Column::PerTarget(slots));
        self
    }

    /// Set a raw column for a label.
    pub fn with_column(mut self, label: impl Into<String>, column: Column<Value>) -> Self {
        self.columns.insert(label.into(), column);
        self
    }

    /// Attach a nested store, copied to every target.
    pub fn with_meta(mut self, store: MetadataStore) -> Self {
        self.meta = Some(Column::Scalar(Some(store)));
        self
    }

    /// Attach one optional nested store per target.
    pub fn with_meta_each<I>(mut self, stores: I) -> Self
    where
        I: IntoIterator<Item = Option<MetadataStore>>,
    {
        self.meta = Some(Column::PerTarget(stores.into_iter().collect()));
        self
    }

    /// Labels named by these fields, in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Whether a nested-store column is present.
    pub fn has_meta(&self) -> bool {
        self.meta.is_some()
    }

    /// Whether neither label columns nor nested stores are present.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.meta.is_none()
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        IndexMap<String, Column<Value>>,
        Option<Column<Option<MetadataStore>>>,
    ) {
        (self.columns, self.meta)
    }
}

impl From<MetadataStore> for Fields {
    fn from(store: MetadataStore) -> Self {
        Fields::new().with_meta(store)
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Fields::new(), |fields, (label, value)| fields.with(label, value))
    }
}
