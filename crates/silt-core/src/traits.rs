//! The [`Value`] capability trait for stored payloads.

/// Capability required of every payload stored in an aggregate.
///
/// The store mutates shared payloads by detaching a private deep copy
/// first (copy-on-write), so every stored type must be cloneable; views
/// may cross threads, so payloads must also be `Send + Sync`. The bound
/// is checked once, at field registration, by the compiler — a type that
/// cannot be deep-copied cannot be registered at all.
pub trait Value: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Value for T {}
