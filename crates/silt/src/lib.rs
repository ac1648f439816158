//! Silt: a concurrent copy-on-write model store with hierarchical node
//! classes and typed views.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Silt sub-crates. For most users, adding `silt` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use silt::prelude::*;
//!
//! // A network over four species; the last two are producers.
//! let mut net = Network::new(
//!     "species",
//!     Index::from_labels(["wolf", "hare", "grass", "moss"]).unwrap(),
//! );
//! net.add_class("species", "producers", Restriction::range(3, 4).unwrap())
//!     .unwrap();
//!
//! // One graph-level field, one per-node field.
//! net.add_graph_field("temperature", 285.0f64).unwrap();
//! net.add_node_field("producers", "biomass", vec![10.0f64, 20.0])
//!     .unwrap();
//!
//! // Forking shares every payload; the first write detaches a copy.
//! let scenario = net.fork();
//! scenario
//!     .nodes_view::<f64>("producers", "biomass", Access::ReadWrite)
//!     .unwrap()
//!     .set(1, 15.0)
//!     .unwrap();
//!
//! let base = net
//!     .nodes_view::<f64>("producers", "biomass", Access::Read)
//!     .unwrap();
//! assert_eq!(base.get(1).unwrap(), 10.0);
//!
//! // The producers' biomass, seen from the species frame of reference.
//! let expanded = net
//!     .expanded_view::<f64>("species", "producers", "biomass", Access::Read)
//!     .unwrap();
//! assert_eq!(expanded.materialize(), vec![0.0, 0.0, 10.0, 20.0]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `silt-core` | Error taxonomy, `Value` trait, position types |
//! | [`store`] | `silt-store` | `Aggregate`, `FieldView`, copy-on-write core |
//! | [`taxa`] | `silt-taxa` | `Restriction`, `Index`, `Class` |
//! | [`net`] | `silt-net` | `Network` and the three view facades |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Error taxonomy, the `Value` trait, and position types (`silt-core`).
pub use silt_core as types;

/// The copy-on-write field store (`silt-store`).
pub use silt_store as store;

/// Restrictions, indexes, and classes (`silt-taxa`).
pub use silt_taxa as taxa;

/// The network registry and view facades (`silt-net`).
pub use silt_net as net;

/// The types most callers need, re-exported flat.
pub mod prelude {
    pub use silt_core::{ModelError, Value};
    pub use silt_net::{Access, ExpandedNodesView, GraphView, Network, NodesView};
    pub use silt_store::{Aggregate, FieldView};
    pub use silt_taxa::{Class, Index, Restriction};
}
