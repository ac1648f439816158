//! Typed, guarded access to one field of an aggregate.

use std::sync::Arc;

use silt_core::Value;

use crate::entry::Entry;

/// A transient typed handle onto one field.
///
/// A view pairs the field's entry with its name and carries no storage of
/// its own. It holds a reference to the entry, so the payload stays alive
/// for as long as the view does, independent of the owning aggregate.
/// Every access goes through the entry lock; `mutate` and `reassign`
/// trigger the copy-on-write detach when the payload is shared.
pub struct FieldView<T: Value> {
    field: String,
    entry: Arc<Entry<T>>,
}

impl<T: Value> FieldView<T> {
    pub(crate) fn new(field: String, entry: Arc<Entry<T>>) -> Self {
        Self { field, entry }
    }

    /// Name of the field this view wraps.
    pub fn name(&self) -> &str {
        &self.field
    }

    /// Run `reader` with shared access to the value, under the entry lock.
    ///
    /// The lock spans the whole call, so `reader` never observes a
    /// partially-written value. The lock is released when `reader`
    /// returns, on every exit path.
    pub fn scan<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        self.entry.scan(reader)
    }

    /// Run `writer` with exclusive access to the value, copy-on-write
    /// first if the payload is shared.
    ///
    /// If the share-count is 1 the write happens in place; otherwise the
    /// value is deep-copied, this view's aggregate detaches onto the copy
    /// (the old payload's count drops by one), and `writer` runs against
    /// the private copy. All other referents keep the original unchanged.
    pub fn mutate<R>(&self, writer: impl FnOnce(&mut T) -> R) -> R {
        self.entry.mutate(writer)
    }

    /// Replace the whole value. Same detach semantics as [`FieldView::mutate`].
    pub fn reassign(&self, value: T) {
        self.entry.reassign(value);
    }

    /// Clone the current value out.
    pub fn get(&self) -> T {
        self.entry.scan(T::clone)
    }

    /// Number of aggregates currently sharing this field's payload.
    pub fn share_count(&self) -> usize {
        self.entry.share_count()
    }

    /// Whether this view and `other` currently refer to the identical
    /// payload allocation.
    ///
    /// True between an aggregate and its fork until either side's first
    /// write; false afterwards.
    pub fn shares_payload_with(&self, other: &FieldView<T>) -> bool {
        self.entry.shares_payload_with(&other.entry)
    }
}

impl<T: Value> std::fmt::Debug for FieldView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldView")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

impl<T: Value> Clone for FieldView<T> {
    fn clone(&self) -> Self {
        // Clones the entry handle, not the payload: share-count unchanged.
        Self {
            field: self.field.clone(),
            entry: self.entry.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Aggregate;

    #[test]
    fn scan_returns_reader_result() {
        let agg = Aggregate::new();
        agg.add_field("v", vec![1.0f64, 2.0, 3.0]).unwrap();
        let view = agg.view::<Vec<f64>>("v").unwrap();
        let sum: f64 = view.scan(|v| v.iter().sum());
        assert_eq!(sum, 6.0);
    }

    #[test]
    fn mutate_returns_writer_result() {
        let agg = Aggregate::new();
        agg.add_field("v", 10i32).unwrap();
        let view = agg.view::<i32>("v").unwrap();
        let old = view.mutate(|v| {
            let old = *v;
            *v += 1;
            old
        });
        assert_eq!(old, 10);
        assert_eq!(view.get(), 11);
    }

    #[test]
    fn identity_until_write() {
        let a = Aggregate::new();
        a.add_field("v", vec![0u8; 16]).unwrap();
        let b = a.fork();

        let va = a.view::<Vec<u8>>("v").unwrap();
        let vb = b.view::<Vec<u8>>("v").unwrap();
        assert!(va.shares_payload_with(&vb));

        vb.mutate(|v| v[0] = 1);
        assert!(!va.shares_payload_with(&vb));
    }

    #[test]
    fn cloning_a_view_does_not_bump_share_count() {
        let agg = Aggregate::new();
        agg.add_field("v", 0u64).unwrap();
        let view = agg.view::<u64>("v").unwrap();
        let before = view.share_count();
        let cloned = view.clone();
        assert_eq!(cloned.share_count(), before);
    }

    #[test]
    fn reassign_replaces_whole_value() {
        let agg = Aggregate::new();
        agg.add_field("v", vec![1, 2, 3]).unwrap();
        let view = agg.view::<Vec<i32>>("v").unwrap();
        view.reassign(vec![9]);
        assert_eq!(view.get(), vec![9]);
    }
}
