//! Network registry and typed views for the Silt model store.
//!
//! A [`Network`] holds one graph-level field store plus a rooted tree of
//! node classes, each tied to its parent by a restriction. Callers read
//! and mutate field data through three facades: [`GraphView`] for
//! graph-level values, [`NodesView`] for a class's per-node vector in its
//! own position space, and [`ExpandedNodesView`] for the same vector
//! observed from an ancestor class's frame of reference.
//!
//! Views are stateless: membership and bounds are recomputed per call,
//! and write permission is granted explicitly at acquisition via
//! [`Access`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod network;
pub mod view;

pub use network::Network;
pub use view::{Access, ExpandedNodesView, GraphView, NodesView};
