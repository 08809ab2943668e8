//! core::meta::record
//!
//! Attribute records and read views.
//!
//! An [`AttributeRecord`] is one row of the rectangular label × variable
//! view: an ordered mapping from [`Label`] to [`Value`]. Records are only
//! mutated by the owning store, which keeps every record's label set equal
//! to the store-wide known labels.

use indexmap::{IndexMap, IndexSet};

use crate::core::types::{Label, Value};

static MISSING: Value = Value::Missing;

/// Label names for the standard attribute roles.
///
/// The typed accessors on [`RecordView`] resolve through this scheme, so a
/// dataset that calls its units label `unit` can still use
/// [`RecordView::units`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaLabels {
    /// Label holding the variable's units
    pub units: Label,
    /// Label holding the variable's long name
    pub long_name: Label,
    /// Label holding the variable's description
    pub description: Label,
}

impl Default for MetaLabels {
    fn default() -> Self {
        Self {
            units: Label::from_static("units"),
            long_name: Label::from_static("long_name"),
            description: Label::from_static("description"),
        }
    }
}

/// Attribute values of one variable.
///
/// Equality compares label sets and values regardless of label order;
/// missing compares equal to missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeRecord {
    values: IndexMap<Label, Value>,
}

impl AttributeRecord {
    /// Create a record with a missing entry for every given label.
    pub(crate) fn placeholder(labels: &IndexSet<Label>) -> Self {
        Self {
            values: labels
                .iter()
                .map(|label| (label.clone(), Value::Missing))
                .collect(),
        }
    }

    /// Get the value for a label.
    ///
    /// Unknown labels read as [`Value::Missing`].
    pub fn get(&self, label: &str) -> &Value {
        self.values.get(label).unwrap_or(&MISSING)
    }

    /// Check whether the record has an entry (possibly missing) for a label.
    pub fn has_label(&self, label: &str) -> bool {
        self.values.contains_key(label)
    }

    /// Iterate labels in store order.
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.values.keys()
    }

    /// Iterate `(label, value)` pairs in store order.
    pub fn iter(&self) -> impl Iterator<Item = (&Label, &Value)> {
        self.values.iter()
    }

    /// Number of labels in the record.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no labels at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether every value in the record is missing.
    pub fn is_all_missing(&self) -> bool {
        self.values.values().all(Value::is_missing)
    }

    /// Add a missing entry for `label` if the record lacks one.
    pub(crate) fn ensure(&mut self, label: &Label) {
        if !self.values.contains_key(label.as_str()) {
            self.values.insert(label.clone(), Value::Missing);
        }
    }

    /// Overwrite one label. An existing label keeps its position.
    pub(crate) fn set(&mut self, label: Label, value: Value) {
        self.values.insert(label, value);
    }
}

/// Read view of a record, with typed accessors for the standard labels.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    record: &'a AttributeRecord,
    scheme: &'a MetaLabels,
}

impl<'a> RecordView<'a> {
    pub(crate) fn new(record: &'a AttributeRecord, scheme: &'a MetaLabels) -> Self {
        Self { record, scheme }
    }

    /// Get the value for any label; unknown labels read as missing.
    pub fn get(&self, label: &str) -> &'a Value {
        self.record.get(label)
    }

    /// Value of the units label.
    pub fn units(&self) -> &'a Value {
        self.record.get(self.scheme.units.as_str())
    }

    /// Value of the long name label.
    pub fn long_name(&self) -> &'a Value {
        self.record.get(self.scheme.long_name.as_str())
    }

    /// Value of the description label.
    pub fn description(&self) -> &'a Value {
        self.record.get(self.scheme.description.as_str())
    }

    /// The underlying record.
    pub fn record(&self) -> &'a AttributeRecord {
        self.record
    }
}

impl PartialEq for RecordView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}

impl PartialEq<AttributeRecord> for RecordView<'_> {
    fn eq(&self, other: &AttributeRecord) -> bool {
        self.record == other
    }
}
