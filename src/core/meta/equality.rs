//! core::meta::equality
//!
//! Structural equality between stores.
//!
//! Two stores are equal when they hold the same variable names with equal
//! records and the same higher-order names with recursively equal nested
//! stores. Insertion order, label order, and the label scheme do not take
//! part. Missing equals missing.
//!
//! Comparing against a value that is not a store is not an error: it is
//! reported as [`Comparison::NotComparable`].

use std::any::Any;

use super::store::MetadataStore;

/// Outcome of comparing a store against an arbitrary value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// The other value is a store with the same contents.
    Equal,
    /// The other value is a store with different contents.
    NotEqual,
    /// The other value is not a store.
    NotComparable,
}

impl Comparison {
    /// Whether the comparison found equal stores.
    pub fn is_equal(self) -> bool {
        self == Comparison::Equal
    }
}

/// Records compare by label set as well as by value. Every label a store
/// has registered is present on each of its records, so a label introduced
/// by any assignment (even one with an empty target list) makes a non-empty
/// store differ from one that never saw that label. Two empty stores are
/// always equal.
impl PartialEq for MetadataStore {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality ignores insertion order.
        self.records == other.records && self.nested == other.nested
    }
}

impl MetadataStore {
    /// Compare against a value of any type.
    pub fn compare(&self, other: &dyn Any) -> Comparison {
        match other.downcast_ref::<MetadataStore>() {
            Some(store) if store == self => Comparison::Equal,
            Some(_) => Comparison::NotEqual,
            None => Comparison::NotComparable,
        }
    }

    /// Whether `other` is a store equal to this one.
    pub fn equals(&self, other: &dyn Any) -> bool {
        self.compare(other).is_equal()
    }
}
