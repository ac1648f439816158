//! Core types and traits for the Silt model store.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the error taxonomy, the [`Value`] deep-copy capability trait, and the
//! position types shared by the storage and classification layers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod pos;
pub mod traits;

pub use error::{
    ConsistencyError, ModelError, RangeError, StructuralError, WriteProtectionError,
};
pub use pos::PosVec;
pub use traits::Value;
