//! core::meta::assign
//!
//! The assignment / merge engine.
//!
//! # Validate, then apply
//!
//! An assignment is first turned into a [`Plan`]: target names and labels
//! are validated, duplicate targets are rejected, and every per-target
//! column is checked against the target count. Only a complete plan touches
//! the store, so a failed assignment leaves it unchanged.
//!
//! # Merge semantics
//!
//! Applying a plan is a per-label upsert:
//!
//! 1. Labels new to the store are registered and back-filled with missing
//!    on every existing record.
//! 2. A target without a record gets one with missing for every known label.
//! 3. Only non-missing values are written; omitted labels keep their value.
//! 4. A nested store supplied for a target replaces that target's nested
//!    store; a `None` slot leaves it alone.

use std::collections::HashSet;

use super::fields::{Fields, Target};
use super::record::AttributeRecord;
use super::store::MetadataStore;
use super::MetaError;
use crate::core::types::{Label, Value, VariableName};

/// Name used for the nested-store column in length errors.
const NESTED_COLUMN: &str = "nested metadata";

/// Writes for one target.
#[derive(Debug)]
struct TargetWrite {
    name: VariableName,
    /// `(index into Plan::labels, value)`, missing values already dropped
    values: Vec<(usize, Value)>,
    nested: Option<MetadataStore>,
}

/// A fully validated assignment.
#[derive(Debug)]
struct Plan {
    labels: Vec<Label>,
    writes: Vec<TargetWrite>,
}

impl Plan {
    fn build(target: Target, fields: Fields) -> Result<Self, MetaError> {
        let mut seen = HashSet::new();
        let names = target
            .into_names()
            .into_iter()
            .map(|raw| {
                let name = VariableName::new(raw)?;
                if !seen.insert(name.clone()) {
                    return Err(MetaError::DuplicateTarget(name.into()));
                }
                Ok(name)
            })
            .collect::<Result<Vec<_>, MetaError>>()?;
        let n = names.len();

        let (columns, meta) = fields.into_parts();

        let mut labels = Vec::with_capacity(columns.len());
        let mut slots = Vec::with_capacity(columns.len());
        for (raw, column) in columns {
            let label = Label::new(raw)?;
            column
                .check_len(n)
                .map_err(|found| MetaError::LengthMismatch {
                    label: label.to_string(),
                    expected: n,
                    found,
                })?;
            labels.push(label);
            slots.push(column.into_slots(n).into_iter());
        }

        let mut nested = match meta {
            Some(column) => {
                column
                    .check_len(n)
                    .map_err(|found| MetaError::LengthMismatch {
                        label: NESTED_COLUMN.to_string(),
                        expected: n,
                        found,
                    })?;
                Some(column.into_slots(n).into_iter())
            }
            None => None,
        };

        let writes = names
            .into_iter()
            .map(|name| {
                // Advance every column for every target to keep them aligned.
                let values = slots
                    .iter_mut()
                    .enumerate()
                    .filter_map(|(i, column)| {
                        column
                            .next()
                            .filter(|value| !value.is_missing())
                            .map(|value| (i, value))
                    })
                    .collect();
                let nested = nested.as_mut().and_then(|column| column.next().flatten());
                TargetWrite {
                    name,
                    values,
                    nested,
                }
            })
            .collect();

        Ok(Plan { labels, writes })
    }
}

impl MetadataStore {
    /// Assign fields to one or more variables.
    ///
    /// Assignment is a per-label upsert: only labels present in `fields`
    /// with a non-missing value are written, everything else keeps its
    /// prior value. New variables start with missing for every known label,
    /// and new labels are back-filled with missing on every other variable.
    ///
    /// A nested store in `fields` promotes the target to higher-order
    /// metadata, alongside any flat fields supplied in the same call.
    ///
    /// # Errors
    ///
    /// - [`MetaError::LengthMismatch`] if a per-target column's length
    ///   differs from the number of targets
    /// - [`MetaError::DuplicateTarget`] if a name appears twice in the target
    /// - [`MetaError::Type`] if a name or label is invalid
    ///
    /// On error the store is unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use varmeta::core::meta::{Fields, MetaError, MetadataStore};
    ///
    /// let mut store = MetadataStore::new();
    /// store
    ///     .assign(
    ///         ["new", "new2"],
    ///         Fields::new()
    ///             .with_each("units", ["hey", "hey2"])
    ///             .with_each("long_name", ["boo", "boo2"]),
    ///     )
    ///     .unwrap();
    /// store
    ///     .assign(["new2", "new"], Fields::new().with_each("units", ["yeppers", "yep"]))
    ///     .unwrap();
    ///
    /// assert_eq!(store.read("new").record().unwrap().units(), "yep");
    /// assert_eq!(store.read("new2").record().unwrap().units(), "yeppers");
    /// assert_eq!(store.read("new2").record().unwrap().long_name(), "boo2");
    ///
    /// let err = store
    ///     .assign(["a", "b"], Fields::new().with_each("units", ["x"]))
    ///     .unwrap_err();
    /// assert!(matches!(err, MetaError::LengthMismatch { expected: 2, found: 1, .. }));
    /// assert!(!store.contains("a"));
    /// ```
    pub fn assign(
        &mut self,
        target: impl Into<Target>,
        fields: impl Into<Fields>,
    ) -> Result<(), MetaError> {
        let plan = Plan::build(target.into(), fields.into())?;
        tracing::debug!(
            targets = plan.writes.len(),
            labels = plan.labels.len(),
            "assigning metadata"
        );
        self.apply(plan);
        Ok(())
    }

    fn apply(&mut self, plan: Plan) {
        for label in &plan.labels {
            self.register_label(label);
        }

        for write in plan.writes {
            let record = self.ensure_record(&write.name);
            for (i, value) in write.values {
                record.set(plan.labels[i].clone(), value);
            }

            if let Some(nested) = write.nested {
                tracing::debug!(
                    name = %write.name,
                    variables = nested.len(),
                    "promoting to higher-order metadata"
                );
                self.nested.insert(write.name, nested);
            }
        }
    }

    /// Add a label to the known set, back-filling missing on every record.
    fn register_label(&mut self, label: &Label) {
        if self.labels.insert(label.clone()) {
            tracing::trace!(%label, records = self.records.len(), "registering new label");
            for record in self.records.values_mut() {
                record.ensure(label);
            }
        }
    }

    /// Get a variable's record, creating a placeholder if needed.
    fn ensure_record(&mut self, name: &VariableName) -> &mut AttributeRecord {
        let labels = &self.labels;
        self.records
            .entry(name.clone())
            .or_insert_with(|| AttributeRecord::placeholder(labels))
    }
}
