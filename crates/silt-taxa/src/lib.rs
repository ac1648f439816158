//! Node classification for Silt: restrictions, indexes, and classes.
//!
//! A [`Restriction`] describes which positions of a parent class belong to
//! a subclass and how positions translate between the two frames of
//! reference. An [`Index`] is the label ↔ position bijection for one
//! class. A [`Class`] ties a name, an index, an optional lineage back to
//! a parent class, and a per-node field store together.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod class;
pub mod index;
pub mod restriction;

pub use class::{Class, Lineage};
pub use index::Index;
pub use restriction::{ParentPositions, Restriction};
