//! Copy-on-write field store backing Silt model instances.
//!
//! An [`Aggregate`] is one model instance: a registry of named fields,
//! each a reference-counted payload that may be shared with any number of
//! forked aggregates. Mutation through a [`FieldView`] is copy-on-write:
//! a uniquely-owned payload is written in place; a shared payload is
//! deep-copied first, and the writer detaches onto the private copy while
//! every other referent keeps the original.
//!
//! # Architecture
//!
//! ```text
//! Aggregate (one model instance)
//! ├── structural lock (Mutex around the field registry)
//! └── name → Arc<dyn ErasedEntry>      (type-erased slot per field)
//!               └── Entry<T>
//!                   └── Mutex<Arc<T>>  (entry lock + share-counted payload)
//! ```
//!
//! The `Arc<T>` strong count **is** the field's share-count: `fork` clones
//! the inner `Arc` (one increment per field, no payload copy), dropping an
//! aggregate or view decrements it synchronously, and `Arc::make_mut`
//! performs the clone-on-shared-write under the entry lock. Payload types
//! are recovered from the erased slot only at view acquisition, so the
//! store itself never branches on a runtime type tag.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aggregate;
mod entry;
pub mod view;

pub use aggregate::Aggregate;
pub use view::FieldView;
