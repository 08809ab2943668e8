//! Property-based tests for the metadata store.
//!
//! These tests use proptest to verify that store invariants hold across
//! randomly generated assignment sequences.

use proptest::prelude::*;

use varmeta::core::meta::{Comparison, Fields, MetadataStore};
use varmeta::core::types::Value;

const NAMES: &[&str] = &["mlt", "slt", "dens", "temp", "profile"];
const LABELS: &[&str] = &["units", "long_name", "description", "fill"];

/// One generated assignment.
#[derive(Debug, Clone)]
struct Assignment {
    names: Vec<String>,
    columns: Vec<(String, Vec<Value>)>,
    nested: Option<Vec<Option<MetadataStore>>>,
}

impl Assignment {
    fn fields(&self) -> Fields {
        let mut fields = self
            .columns
            .iter()
            .fold(Fields::new(), |fields, (label, values)| {
                fields.with_each(label.as_str(), values.iter().cloned())
            });
        if let Some(nested) = &self.nested {
            fields = fields.with_meta_each(nested.iter().cloned());
        }
        fields
    }

    fn apply(&self, store: &mut MetadataStore) {
        store.set_many(self.names.clone(), self.fields()).unwrap();
    }
}

/// Strategy for attribute values, including missing.
fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Missing),
        "[a-z ]{0,8}".prop_map(Value::Text),
        any::<i64>().prop_map(Value::Int),
        (-1.0e6..1.0e6f64).prop_map(Value::Float),
    ]
}

/// Strategy for an ordered list of distinct target names.
fn targets() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(NAMES, 1..=NAMES.len())
        .prop_shuffle()
        .prop_map(|names| names.into_iter().map(String::from).collect())
}

/// Strategy for label columns aligned with `n` targets.
fn columns(n: usize) -> impl Strategy<Value = Vec<(String, Vec<Value>)>> {
    prop::sample::subsequence(LABELS, 0..=LABELS.len()).prop_flat_map(move |labels| {
        labels
            .into_iter()
            .map(|label| {
                prop::collection::vec(value(), n).prop_map(move |values| (label.to_string(), values))
            })
            .collect::<Vec<_>>()
    })
}

/// Strategy for assignments without nested stores.
fn flat_assignment() -> impl Strategy<Value = Assignment> {
    targets().prop_flat_map(|names| {
        let n = names.len();
        columns(n).prop_map(move |columns| Assignment {
            names: names.clone(),
            columns,
            nested: None,
        })
    })
}

/// Strategy for a store built only from flat assignments.
fn flat_store() -> impl Strategy<Value = MetadataStore> {
    prop::collection::vec(flat_assignment(), 0..4).prop_map(|assignments| {
        let mut store = MetadataStore::new();
        for assignment in &assignments {
            assignment.apply(&mut store);
        }
        store
    })
}

/// Strategy for assignments that may carry nested stores.
fn assignment() -> impl Strategy<Value = Assignment> {
    (flat_assignment(), any::<bool>()).prop_flat_map(|(assignment, with_nested)| {
        let n = assignment.names.len();
        let nested = if with_nested {
            prop::collection::vec(prop::option::of(flat_store()), n)
                .prop_map(Some)
                .boxed()
        } else {
            Just(None).boxed()
        };
        nested.prop_map(move |nested| Assignment {
            nested,
            ..assignment.clone()
        })
    })
}

fn build(assignments: &[Assignment]) -> MetadataStore {
    let mut store = MetadataStore::new();
    for assignment in assignments {
        assignment.apply(&mut store);
    }
    store
}

proptest! {
    /// Rebuilding from a snapshot yields an equal store.
    #[test]
    fn snapshot_rebuild_equals_source(assignments in prop::collection::vec(assignment(), 0..6)) {
        let store = build(&assignments);
        let rebuilt = MetadataStore::from_snapshot(&store.snapshot()).unwrap();
        prop_assert_eq!(rebuilt, store);
    }

    /// Every record has an entry for every known label.
    #[test]
    fn records_are_rectangular(assignments in prop::collection::vec(assignment(), 0..6)) {
        let store = build(&assignments);
        let known = store.labels().count();
        for (name, view) in store.iter() {
            prop_assert_eq!(view.record().len(), known, "record {} is ragged", name);
            for label in store.labels() {
                prop_assert!(view.record().has_label(label.as_str()));
            }
        }
    }

    /// Applying the same assignment twice changes nothing the second time.
    #[test]
    fn assignment_is_idempotent(
        prior in prop::collection::vec(assignment(), 0..4),
        repeated in assignment(),
    ) {
        let mut store = build(&prior);
        repeated.apply(&mut store);
        let once = store.clone();
        repeated.apply(&mut store);
        prop_assert_eq!(store, once);
    }

    /// Non-missing values are written and missing values keep the prior value.
    #[test]
    fn missing_never_overwrites(
        prior in prop::collection::vec(flat_assignment(), 0..4),
        update in flat_assignment(),
    ) {
        let mut store = build(&prior);
        let before = store.clone();
        update.apply(&mut store);

        for (label, values) in &update.columns {
            for (name, value) in update.names.iter().zip(values) {
                let now = store.read(name).record().unwrap().get(label).clone();
                if value.is_missing() {
                    let was = before
                        .read(name)
                        .record()
                        .map(|r| r.get(label).clone())
                        .unwrap_or_default();
                    prop_assert_eq!(now, was);
                } else {
                    prop_assert_eq!(&now, value);
                }
            }
        }
    }

    /// Variables not named by an assignment keep their values.
    #[test]
    fn untargeted_variables_unchanged(
        prior in prop::collection::vec(flat_assignment(), 1..4),
        update in flat_assignment(),
    ) {
        let mut store = build(&prior);
        let before = store.clone();
        update.apply(&mut store);

        for (name, view) in before.iter() {
            if update.names.iter().any(|n| n == name.as_str()) {
                continue;
            }
            let after = store.read(name.as_str()).record().unwrap();
            for (label, value) in view.record().iter() {
                prop_assert_eq!(after.get(label.as_str()), value);
            }
        }
    }

    /// A length mismatch is rejected and leaves the store unchanged.
    #[test]
    fn mismatch_leaves_store_unchanged(
        prior in prop::collection::vec(assignment(), 0..4),
        names in targets(),
        extra in 1usize..3,
        label in prop::sample::select(LABELS),
    ) {
        let mut store = build(&prior);
        let before = store.clone();
        let labels_before: Vec<_> = store.labels().cloned().collect();

        let values = vec![Value::from("x"); names.len() + extra];
        let result = store.set_many(
            names,
            Fields::new().with("new_label", "y").with_each(label, values),
        );

        prop_assert!(result.is_err());
        prop_assert_eq!(&store, &before);
        let labels_after: Vec<_> = store.labels().cloned().collect();
        prop_assert_eq!(labels_after, labels_before);
    }

    /// Equality does not depend on the order of disjoint assignments.
    #[test]
    fn equality_ignores_insertion_order(
        units in prop::collection::vec(value(), NAMES.len()),
    ) {
        let mut forward = MetadataStore::new();
        let mut backward = MetadataStore::new();
        for (name, value) in NAMES.iter().zip(&units) {
            forward.set(*name, Fields::new().with("units", value.clone())).unwrap();
        }
        for (name, value) in NAMES.iter().zip(&units).rev() {
            backward.set(*name, Fields::new().with("units", value.clone())).unwrap();
        }
        prop_assert_eq!(forward, backward);
    }

    /// Equality and three-way comparison agree in both directions.
    #[test]
    fn equality_is_symmetric(
        left in prop::collection::vec(assignment(), 0..4),
        right in prop::collection::vec(assignment(), 0..4),
    ) {
        let a = build(&left);
        let b = build(&right);
        prop_assert_eq!(a == b, b == a);
        prop_assert_eq!(a.compare(&b), b.compare(&a));
        prop_assert_eq!(a.equals(&b), b.equals(&a));

        let rebuilt = MetadataStore::from_snapshot(&a.snapshot()).unwrap();
        prop_assert_eq!(a.compare(&rebuilt), Comparison::Equal);
        prop_assert_eq!(rebuilt.compare(&a), Comparison::Equal);
    }

    /// A clone compares equal and is independent of later writes.
    #[test]
    fn clone_is_independent(
        assignments in prop::collection::vec(assignment(), 1..5),
        text in "[a-z]{1,8}",
    ) {
        let mut store = build(&assignments);
        let copy = store.clone();
        prop_assert_eq!(&copy, &store);

        let name = store.names().next().unwrap().to_string();
        store.set(name.as_str(), Fields::new().with("units", text.as_str())).unwrap();
        let copied_units = copy.read(&name).record().unwrap().units().clone();
        prop_assert_eq!(store == copy, copied_units == Value::from(text));
    }
}
