//! core::meta::store
//!
//! The metadata container.
//!
//! # Architecture
//!
//! A [`MetadataStore`] holds three pieces of state that are kept consistent
//! by every assignment:
//!
//! - the known labels, in first-seen order;
//! - the flat records, one per variable, each with an entry for every known
//!   label (the rectangular invariant);
//! - the nested stores of higher-order variables. Every higher-order
//!   variable also has a flat record.
//!
//! Reads never fail: an unknown name yields [`Lookup::NotFound`].
//!
//! # Example
//!
//! ```
//! use varmeta::core::meta::{Fields, Lookup, MetadataStore};
//!
//! let mut store = MetadataStore::new();
//! store.set("new", Fields::new().with("units", "hey").with("long_name", "boo")).unwrap();
//! store.set("new", Fields::new().with("units", "yep")).unwrap();
//!
//! let record = store.read("new").record().unwrap();
//! assert_eq!(record.units(), "yep");
//! assert_eq!(record.long_name(), "boo");
//!
//! assert!(matches!(store.read("absent"), Lookup::NotFound));
//! ```

use std::fmt;

use indexmap::{IndexMap, IndexSet};

use super::fields::{Fields, Target};
use super::record::{AttributeRecord, MetaLabels, RecordView};
use super::MetaError;
use crate::core::config::Config;
use crate::core::types::{Label, VariableName};

/// Metadata for the variables of a dataset.
///
/// Mutated only through [`assign`](MetadataStore::assign) and the operations
/// built on it. Cloning yields an independent deep copy.
#[derive(Debug, Clone, Default)]
pub struct MetadataStore {
    /// Flat records in insertion order
    pub(crate) records: IndexMap<VariableName, AttributeRecord>,
    /// Known labels in first-seen order
    pub(crate) labels: IndexSet<Label>,
    /// Nested stores of higher-order variables
    pub(crate) nested: IndexMap<VariableName, MetadataStore>,
    /// Standard label names for typed accessors
    pub(crate) scheme: MetaLabels,
}

/// Result of reading a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// The name is unknown.
    NotFound,
    /// A plain variable.
    Record(RecordView<'a>),
    /// A variable with nested metadata, plus its own flat record.
    HigherOrder {
        record: RecordView<'a>,
        nested: &'a MetadataStore,
    },
}

impl<'a> Lookup<'a> {
    /// Whether the name exists in the store.
    pub fn is_found(&self) -> bool {
        !matches!(self, Lookup::NotFound)
    }

    /// The flat record, if the name exists.
    pub fn record(&self) -> Option<RecordView<'a>> {
        match *self {
            Lookup::NotFound => None,
            Lookup::Record(record) | Lookup::HigherOrder { record, .. } => Some(record),
        }
    }

    /// The nested store, if the variable is higher-order.
    pub fn nested(&self) -> Option<&'a MetadataStore> {
        match *self {
            Lookup::HigherOrder { nested, .. } => Some(nested),
            _ => None,
        }
    }
}

impl PartialEq<MetadataStore> for Lookup<'_> {
    fn eq(&self, other: &MetadataStore) -> bool {
        self.nested().is_some_and(|nested| nested == other)
    }
}

impl PartialEq<Lookup<'_>> for MetadataStore {
    fn eq(&self, other: &Lookup<'_>) -> bool {
        other == self
    }
}

/// Independent rectangular copy of a store's contents.
///
/// Produced by [`MetadataStore::snapshot`]; rebuild a store from it with
/// [`MetadataStore::from_snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    labels: Vec<Label>,
    rows: Vec<(VariableName, AttributeRecord)>,
    nested: Vec<(VariableName, MetadataStore)>,
    scheme: MetaLabels,
}

impl RecordSet {
    /// Known labels in store order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Flat records in store order.
    pub fn rows(&self) -> &[(VariableName, AttributeRecord)] {
        &self.rows
    }

    /// Nested stores in store order.
    pub fn nested(&self) -> &[(VariableName, MetadataStore)] {
        &self.nested
    }

    /// Turn the snapshot into a single bulk assignment.
    ///
    /// Rows become targets and labels become per-target columns. Nested
    /// stores ride along in the nested-store column.
    pub(crate) fn into_assignment(self) -> (Target, Fields) {
        let RecordSet {
            labels,
            rows,
            nested,
            ..
        } = self;

        // Every nested name also has a row, so the rows alone fix the targets.
        let mut nested: IndexMap<VariableName, MetadataStore> = nested.into_iter().collect();

        let mut fields = Fields::new();
        for label in &labels {
            let slots = rows
                .iter()
                .map(|(_, record)| record.get(label.as_str()).clone());
            fields = fields.with_each(label.as_str(), slots);
        }

        if !nested.is_empty() {
            let slots: Vec<_> = rows
                .iter()
                .map(|(name, _)| nested.shift_remove(name.as_str()))
                .collect();
            fields = fields.with_meta_each(slots);
        }

        let names: Vec<String> = rows.into_iter().map(|(name, _)| name.into()).collect();
        (Target::Many(names), fields)
    }
}

impl From<&MetadataStore> for RecordSet {
    fn from(store: &MetadataStore) -> Self {
        store.snapshot()
    }
}

impl TryFrom<RecordSet> for MetadataStore {
    type Error = MetaError;

    fn try_from(snapshot: RecordSet) -> Result<Self, Self::Error> {
        let mut store = MetadataStore::with_labels(snapshot.scheme.clone());
        let (target, fields) = snapshot.into_assignment();
        store.assign(target, fields)?;
        Ok(store)
    }
}

impl MetadataStore {
    /// Create an empty store with the default label scheme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store whose typed accessors use `scheme`.
    pub fn with_labels(scheme: MetaLabels) -> Self {
        Self {
            scheme,
            ..Self::default()
        }
    }

    /// Create an empty store using the labels from a loaded config.
    pub fn from_config(config: &Config) -> Self {
        Self::with_labels(config.labels().clone())
    }

    /// Rebuild a store from a snapshot.
    ///
    /// The snapshot is replayed through [`assign`](Self::assign) as one bulk
    /// assignment, so the result equals a store built by the equivalent
    /// sequence of assignments.
    ///
    /// # Errors
    ///
    /// Propagates assignment validation errors. A snapshot taken from a
    /// store always replays cleanly.
    pub fn from_snapshot(snapshot: &RecordSet) -> Result<Self, MetaError> {
        Self::try_from(snapshot.clone())
    }

    /// Take an independent copy of the store's contents.
    pub fn snapshot(&self) -> RecordSet {
        RecordSet {
            labels: self.labels.iter().cloned().collect(),
            rows: self
                .records
                .iter()
                .map(|(name, record)| (name.clone(), record.clone()))
                .collect(),
            nested: self
                .nested
                .iter()
                .map(|(name, store)| (name.clone(), store.clone()))
                .collect(),
            scheme: self.scheme.clone(),
        }
    }

    /// Read a variable.
    ///
    /// Unknown names yield [`Lookup::NotFound`] rather than an error.
    pub fn read(&self, name: &str) -> Lookup<'_> {
        let Some(record) = self.records.get(name) else {
            return Lookup::NotFound;
        };
        let record = RecordView::new(record, &self.scheme);
        match self.nested.get(name) {
            Some(nested) => Lookup::HigherOrder { record, nested },
            None => Lookup::Record(record),
        }
    }

    /// Assign fields to a single variable.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        fields: impl Into<Fields>,
    ) -> Result<(), MetaError> {
        self.assign(Target::One(name.into()), fields)
    }

    /// Assign fields to an ordered list of variables.
    pub fn set_many<I, S>(&mut self, names: I, fields: impl Into<Fields>) -> Result<(), MetaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect();
        self.assign(Target::Many(names), fields)
    }

    /// Merge another store into this one.
    ///
    /// With `strict`, any variable name present in both stores fails with
    /// [`MetaError::DuplicateVariable`] and nothing is written. Otherwise
    /// overlapping variables are merged label by label (incoming non-missing
    /// values win) and incoming nested stores replace existing ones.
    pub fn concat(&mut self, other: &MetadataStore, strict: bool) -> Result<(), MetaError> {
        if strict {
            let overlap = other
                .records
                .keys()
                .chain(other.nested.keys())
                .find(|name| self.contains(name.as_str()) || self.is_higher_order(name.as_str()));
            if let Some(name) = overlap {
                return Err(MetaError::DuplicateVariable(name.to_string()));
            }
        }

        let (target, fields) = other.snapshot().into_assignment();
        self.assign(target, fields)
    }

    /// Whether a variable has a flat record.
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Whether a variable carries nested metadata.
    pub fn is_higher_order(&self, name: &str) -> bool {
        self.nested.contains_key(name)
    }

    /// Variable names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &VariableName> {
        self.records.keys()
    }

    /// Names of higher-order variables in insertion order.
    pub fn nested_names(&self) -> impl Iterator<Item = &VariableName> {
        self.nested.keys()
    }

    /// Known labels in first-seen order.
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    /// Whether a label is known to the store.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// The label scheme used by typed accessors.
    pub fn label_scheme(&self) -> &MetaLabels {
        &self.scheme
    }

    /// Iterate `(name, record)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&VariableName, RecordView<'_>)> {
        self.records
            .iter()
            .map(|(name, record)| (name, RecordView::new(record, &self.scheme)))
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store has no variables.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl fmt::Display for MetadataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Metadata for {} standard variables", self.records.len())?;
        write!(f, "Metadata for {} higher-order variables", self.nested.len())?;

        if !self.records.is_empty() {
            let mut rows: Vec<Vec<String>> = Vec::with_capacity(self.records.len() + 1);
            rows.push(
                std::iter::once("name".to_string())
                    .chain(self.labels.iter().map(ToString::to_string))
                    .collect(),
            );
            for (name, record) in &self.records {
                rows.push(
                    std::iter::once(name.to_string())
                        .chain(self.labels.iter().map(|l| record.get(l.as_str()).to_string()))
                        .collect(),
                );
            }

            let mut widths = vec![0; self.labels.len() + 1];
            for row in &rows {
                for (width, cell) in widths.iter_mut().zip(row) {
                    *width = (*width).max(cell.chars().count());
                }
            }

            writeln!(f)?;
            for row in &rows {
                let line = row
                    .iter()
                    .zip(&widths)
                    .map(|(cell, &width)| format!("{cell:<width$}"))
                    .collect::<Vec<_>>()
                    .join("  ");
                write!(f, "\n{}", line.trim_end())?;
            }
        }

        if !self.nested.is_empty() {
            write!(f, "\n\nHigher-order variables:")?;
            for (name, nested) in &self.nested {
                write!(f, "\n\n{name}")?;
                // Nested summaries are indented one level per depth.
                for line in nested.to_string().lines() {
                    if line.is_empty() {
                        writeln!(f)?;
                    } else {
                        write!(f, "\n    {line}")?;
                    }
                }
            }
        }

        Ok(())
    }
}
