//! The [`Aggregate`]: one model instance's field registry.

use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use silt_core::{ConsistencyError, ModelError, StructuralError, Value};

use crate::entry::{Entry, ErasedEntry};
use crate::view::FieldView;

/// A named collection of copy-on-write fields representing one model
/// instance.
///
/// Fields are registered once each (the name set only grows) and then read
/// and mutated through [`FieldView`]s. Forking an aggregate produces a new
/// instance sharing every current payload at O(field count) cost; the
/// first write to a shared field through either side detaches that side
/// onto a private copy.
///
/// The internal mutex is the *structural* lock: it guards the name → entry
/// registry during registration, fork, and view acquisition, and is held
/// only for those brief operations. Payload access never takes it — each
/// field carries its own entry lock, so operations on distinct fields
/// never contend.
pub struct Aggregate {
    entries: Mutex<IndexMap<String, Arc<dyn ErasedEntry>>>,
}

impl Aggregate {
    /// Create an empty aggregate.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(IndexMap::new()),
        }
    }

    /// Register a new field holding `value`, with a share-count of 1.
    ///
    /// Returns `StructuralError::DuplicateField` if the name is taken.
    /// The deep-copy capability the copy-on-write machinery needs is the
    /// `T: Value` bound, enforced here at registration and never probed
    /// again.
    pub fn add_field<T: Value>(
        &self,
        name: impl Into<String>,
        value: T,
    ) -> Result<(), ModelError> {
        let name = name.into();
        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(&name) {
            return Err(StructuralError::DuplicateField { field: name }.into());
        }
        entries.insert(name, Arc::new(Entry::new(value)));
        Ok(())
    }

    /// Duplicate this aggregate, sharing every current payload.
    ///
    /// Each source entry's lock is taken in turn to bump that payload's
    /// share-count; no payload is copied. Cost is proportional to the
    /// number of fields, independent of payload size.
    pub fn fork(&self) -> Aggregate {
        let entries = self.entries.lock().unwrap();
        let forked = entries
            .iter()
            .map(|(name, entry)| (name.clone(), entry.forked()))
            .collect();
        Aggregate {
            entries: Mutex::new(forked),
        }
    }

    /// Acquire a typed view of one field.
    ///
    /// Returns `StructuralError::UnknownField` if the name is absent, or
    /// `ConsistencyError::TypeMismatch` if `T` is not the type the field
    /// was registered with. The view holds its own reference to the entry,
    /// so it remains valid even if the aggregate is dropped first.
    pub fn view<T: Value>(&self, name: &str) -> Result<FieldView<T>, ModelError> {
        let erased = {
            let entries = self.entries.lock().unwrap();
            entries
                .get(name)
                .ok_or_else(|| StructuralError::UnknownField {
                    field: name.to_string(),
                })?
                .clone()
        };
        let stored = erased.value_type();
        let entry = erased
            .as_any_arc()
            .downcast::<Entry<T>>()
            .map_err(|_| ConsistencyError::TypeMismatch {
                field: name.to_string(),
                requested: std::any::type_name::<T>(),
                stored,
            })?;
        Ok(FieldView::new(name.to_string(), entry))
    }

    /// Current share-count of one field's payload.
    ///
    /// Returns `StructuralError::UnknownField` if the name is absent.
    pub fn share_count(&self, name: &str) -> Result<usize, ModelError> {
        let entries = self.entries.lock().unwrap();
        let entry = entries
            .get(name)
            .ok_or_else(|| StructuralError::UnknownField {
                field: name.to_string(),
            })?;
        Ok(entry.share_count())
    }

    /// Whether a field with this name is registered.
    pub fn contains_field(&self, name: &str) -> bool {
        self.entries.lock().unwrap().contains_key(name)
    }

    /// Field names in registration order.
    pub fn field_names(&self) -> Vec<String> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether no fields are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl Default for Aggregate {
    fn default() -> Self {
        Self::new()
    }
}

// Compile-time assertion: aggregates are shared across threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<Aggregate>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use silt_core::{ConsistencyError, StructuralError};

    #[test]
    fn add_field_rejects_duplicates() {
        let agg = Aggregate::new();
        agg.add_field("a", 5i64).unwrap();
        let err = agg.add_field("a", 8i64).unwrap_err();
        assert_eq!(
            err,
            StructuralError::DuplicateField { field: "a".into() }.into()
        );
        // The original payload is untouched.
        assert_eq!(agg.view::<i64>("a").unwrap().get(), 5);
    }

    #[test]
    fn view_of_unknown_field_fails() {
        let agg = Aggregate::new();
        let err = agg.view::<i64>("missing").unwrap_err();
        assert_eq!(
            err,
            StructuralError::UnknownField {
                field: "missing".into()
            }
            .into()
        );
    }

    #[test]
    fn view_with_wrong_type_fails() {
        let agg = Aggregate::new();
        agg.add_field("a", 5i64).unwrap();
        let err = agg.view::<String>("a").unwrap_err();
        match err {
            ModelError::Consistency(ConsistencyError::TypeMismatch {
                field,
                requested,
                stored,
            }) => {
                assert_eq!(field, "a");
                assert!(requested.contains("String"));
                assert!(stored.contains("i64"));
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn fork_shares_every_field() {
        let agg = Aggregate::new();
        agg.add_field("a", 5i64).unwrap();
        agg.add_field("b", 8i64).unwrap();

        let forked = agg.fork();
        assert_eq!(agg.share_count("a").unwrap(), 2);
        assert_eq!(agg.share_count("b").unwrap(), 2);
        assert_eq!(forked.field_names(), vec!["a", "b"]);
    }

    #[test]
    fn fork_isolation_end_to_end() {
        let a = Aggregate::new();
        a.add_field("a", 5i64).unwrap();
        a.add_field("b", 8i64).unwrap();

        let b = a.fork();
        b.view::<i64>("a").unwrap().mutate(|v| *v *= 10);

        assert_eq!(a.view::<i64>("a").unwrap().get(), 5);
        assert_eq!(b.view::<i64>("a").unwrap().get(), 50);

        // The written field split; the untouched field is still shared.
        assert_eq!(a.share_count("a").unwrap(), 1);
        assert_eq!(b.share_count("a").unwrap(), 1);
        assert_eq!(a.share_count("b").unwrap(), 2);
        assert_eq!(b.share_count("b").unwrap(), 2);
    }

    #[test]
    fn drop_of_fork_returns_payloads_to_unique() {
        let a = Aggregate::new();
        a.add_field("a", vec![1.0f64; 100]).unwrap();
        let b = a.fork();
        assert_eq!(a.share_count("a").unwrap(), 2);
        drop(b);
        assert_eq!(a.share_count("a").unwrap(), 1);
    }

    #[test]
    fn view_outlives_aggregate() {
        let view = {
            let agg = Aggregate::new();
            agg.add_field("a", 7u32).unwrap();
            agg.view::<u32>("a").unwrap()
        };
        assert_eq!(view.get(), 7);
    }

    #[test]
    fn field_names_preserve_registration_order() {
        let agg = Aggregate::new();
        for name in ["zeta", "alpha", "mid"] {
            agg.add_field(name, 0u8).unwrap();
        }
        assert_eq!(agg.field_names(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(agg.len(), 3);
        assert!(!agg.is_empty());
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn share_count_equals_live_referents(
                forks in 1usize..8,
                drops in 0usize..8,
            ) {
                let agg = Aggregate::new();
                agg.add_field("f", vec![1u8; 4]).unwrap();
                let mut held: Vec<Aggregate> = (0..forks).map(|_| agg.fork()).collect();
                prop_assert_eq!(agg.share_count("f").unwrap(), forks + 1);

                for _ in 0..drops.min(forks) {
                    held.pop();
                }
                prop_assert_eq!(agg.share_count("f").unwrap(), held.len() + 1);
            }

            #[test]
            fn one_sided_writes_split_exactly_once(
                writes in prop::collection::vec(any::<bool>(), 1..16),
            ) {
                let a = Aggregate::new();
                a.add_field("f", 0u64).unwrap();
                let b = a.fork();

                let vb = b.view::<u64>("f").unwrap();
                for (i, write) in writes.iter().enumerate() {
                    if *write {
                        vb.mutate(|v| *v = i as u64);
                    }
                }

                // The first write detaches; later writes stay in place.
                let expected = if writes.iter().any(|&w| w) { 1 } else { 2 };
                prop_assert_eq!(a.share_count("f").unwrap(), expected);
                prop_assert_eq!(b.share_count("f").unwrap(), expected);
                prop_assert_eq!(a.view::<u64>("f").unwrap().get(), 0);
            }
        }
    }
}
