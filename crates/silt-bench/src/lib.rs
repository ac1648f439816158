//! Benchmark fixtures for the Silt model store.
//!
//! Provides pre-built aggregates and networks so the bench targets
//! measure store operations, not fixture assembly:
//!
//! - [`aggregate_with_fields`]: an aggregate holding `n` vector fields
//! - [`web_profile`]: a small food-web network with a sparse subclass

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use silt_net::Network;
use silt_store::Aggregate;
use silt_taxa::{Index, Restriction};

/// Build an aggregate with `fields` vector fields of `len` f64 values each.
pub fn aggregate_with_fields(fields: usize, len: usize) -> Aggregate {
    let agg = Aggregate::new();
    for i in 0..fields {
        agg.add_field(format!("f{i}"), vec![0.0f64; len]).unwrap();
    }
    agg
}

/// Build a network over `n` nodes with an every-other-node subclass and
/// one per-node field on each class.
pub fn web_profile(n: usize) -> Network {
    let mut net = Network::new("nodes", Index::numbered(n));
    let mask: Vec<bool> = (0..n).map(|i| i % 2 == 1).collect();
    net.add_class("nodes", "odd", Restriction::from_mask(&mask))
        .unwrap();

    net.add_node_field("nodes", "value", vec![1.0f64; n]).unwrap();
    let odd_size = net.class("odd").unwrap().size();
    net.add_node_field("odd", "weight", vec![0.5f64; odd_size])
        .unwrap();
    net
}
