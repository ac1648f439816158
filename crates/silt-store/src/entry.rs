//! Per-field entries and the type-erased slot trait.

use std::any::Any;
use std::sync::{Arc, Mutex};

use silt_core::Value;

/// The per-aggregate handle for one field.
///
/// The mutex is the entry lock; the `Arc` it guards is the current field
/// payload. An entry is never shared between aggregates — only the payload
/// behind the `Arc` is. All reads and writes of the payload happen under
/// the lock, including the deep copy a shared write triggers, so a reader
/// can never observe a partially-written value.
pub(crate) struct Entry<T: Value> {
    cell: Mutex<Arc<T>>,
}

impl<T: Value> Entry<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            cell: Mutex::new(Arc::new(value)),
        }
    }

    /// Run `reader` with shared access to the payload, under the entry lock.
    pub(crate) fn scan<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        let guard = self.cell.lock().unwrap();
        reader(&guard)
    }

    /// Run `writer` with exclusive access to the payload, under the entry
    /// lock, detaching onto a private deep copy first if the payload is
    /// shared.
    ///
    /// `Arc::make_mut` is the copy-on-write trigger: with a strong count
    /// of 1 it hands back the existing allocation; with a count above 1 it
    /// clones the payload, swaps the entry onto the clone, and drops this
    /// entry's reference to the original (other referents are untouched).
    pub(crate) fn mutate<R>(&self, writer: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.cell.lock().unwrap();
        writer(Arc::make_mut(&mut guard))
    }

    /// Replace the whole payload. Same detach semantics as [`Entry::mutate`]:
    /// the old payload's count drops by one and other referents keep it.
    pub(crate) fn reassign(&self, value: T) {
        let mut guard = self.cell.lock().unwrap();
        *guard = Arc::new(value);
    }

    /// Number of aggregates currently sharing this entry's payload.
    pub(crate) fn share_count(&self) -> usize {
        Arc::strong_count(&self.cell.lock().unwrap())
    }

    /// Whether two entries currently point at the identical payload
    /// allocation (no copy has occurred between them yet).
    pub(crate) fn shares_payload_with(&self, other: &Entry<T>) -> bool {
        // Take the pointers one lock at a time; holding both locks at once
        // would risk ordering deadlocks between sibling aggregates.
        let a = Arc::as_ptr(&*self.cell.lock().unwrap());
        let b = Arc::as_ptr(&*other.cell.lock().unwrap());
        std::ptr::eq(a, b)
    }
}

/// Type-erased face of [`Entry`], the slot type aggregates store.
///
/// Concrete payload types are recovered only at view acquisition, via
/// [`ErasedEntry::as_any_arc`] and an `Any` downcast to `Entry<T>` for the
/// `T` the caller requested.
pub(crate) trait ErasedEntry: Any + Send + Sync {
    /// Produce a fresh entry sharing this entry's current payload.
    ///
    /// The share-count increment happens under this entry's lock, so a
    /// concurrent copy-on-write on the source cannot race the bump.
    fn forked(&self) -> Arc<dyn ErasedEntry>;

    /// Current share-count of the payload.
    fn share_count(&self) -> usize;

    /// Name of the stored payload type, for diagnostics.
    fn value_type(&self) -> &'static str;

    /// Upcast for downcasting to the concrete `Entry<T>`.
    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Value> ErasedEntry for Entry<T> {
    fn forked(&self) -> Arc<dyn ErasedEntry> {
        let shared = self.cell.lock().unwrap().clone();
        Arc::new(Entry {
            cell: Mutex::new(shared),
        })
    }

    fn share_count(&self) -> usize {
        Entry::share_count(self)
    }

    fn value_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

// Compile-time assertion: entries must be shareable across threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<Entry<Vec<f64>>>();
};
