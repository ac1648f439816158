//! Error types for the Silt model store.
//!
//! One enum per failure family — structural (registration/lookup
//! contract violations), range (position outside a class or excluded by
//! a restriction), consistency (shape or payload-type disagreement), and
//! write protection — plus the [`ModelError`] umbrella that every
//! fallible operation returns.
//!
//! All of these are programming-contract violations raised synchronously
//! at the call that detects them. None are retried internally and none
//! leave the store partially mutated: validation precedes any structural
//! or payload change.

use std::error::Error;
use std::fmt;

/// Contract violations at registration or lookup time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StructuralError {
    /// A field with this name is already registered on the aggregate.
    DuplicateField {
        /// The repeated field name.
        field: String,
    },
    /// No field with this name exists on the aggregate.
    UnknownField {
        /// The missing field name.
        field: String,
    },
    /// A class with this name is already registered on the network.
    DuplicateClass {
        /// The repeated class name.
        class: String,
    },
    /// No class with this name exists on the network.
    UnknownClass {
        /// The missing class name.
        class: String,
    },
    /// `add_class` named a parent that is not registered.
    UnknownParent {
        /// The class being registered.
        class: String,
        /// The absent parent name.
        parent: String,
    },
    /// An expanded view named a class that is registered but not on the
    /// target class's lineage chain.
    NotAnAncestor {
        /// The class whose lineage was walked.
        class: String,
        /// The class that was expected to appear on it.
        ancestor: String,
    },
    /// A label occurs more than once in an index construction.
    DuplicateLabel {
        /// The repeated label.
        label: String,
    },
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateField { field } => {
                write!(f, "field '{field}' is already registered")
            }
            Self::UnknownField { field } => write!(f, "unknown field '{field}'"),
            Self::DuplicateClass { class } => {
                write!(f, "class '{class}' is already registered")
            }
            Self::UnknownClass { class } => write!(f, "unknown class '{class}'"),
            Self::UnknownParent { class, parent } => {
                write!(f, "class '{class}' names unknown parent '{parent}'")
            }
            Self::NotAnAncestor { class, ancestor } => {
                write!(f, "class '{ancestor}' is not an ancestor of class '{class}'")
            }
            Self::DuplicateLabel { label } => write!(f, "duplicate label '{label}'"),
        }
    }
}

impl Error for StructuralError {}

/// Position outside the addressable range, or excluded by a restriction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RangeError {
    /// Position falls outside `1..=size`.
    OutOfRange {
        /// The offending position.
        position: usize,
        /// The size of the position space it was checked against.
        size: usize,
    },
    /// Position is valid in the parent class but not a member of the
    /// subclass's restriction.
    NotInSubclass {
        /// The offending parent-space position.
        position: usize,
        /// The subclass that excludes it.
        class: String,
    },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { position, size } => {
                write!(f, "position {position} out of range 1..={size}")
            }
            Self::NotInSubclass { position, class } => {
                write!(f, "position {position} is not a member of class '{class}'")
            }
        }
    }
}

impl Error for RangeError {}

/// Shape or payload-type disagreement between caller and store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsistencyError {
    /// A per-node vector's length does not equal the class's node count.
    SizeMismatch {
        /// The field being registered.
        field: String,
        /// The class's node count.
        expected: usize,
        /// The vector's actual length.
        actual: usize,
    },
    /// A view was requested with a payload type other than the one the
    /// field was registered with.
    TypeMismatch {
        /// The field being viewed.
        field: String,
        /// The type the caller asked for.
        requested: &'static str,
        /// The type the field actually stores.
        stored: &'static str,
    },
    /// A restriction constructor received input violating its invariants
    /// (inverted range, zero position, non-ascending sparse list).
    MalformedRestriction {
        /// What was wrong with the input.
        reason: String,
    },
}

impl fmt::Display for ConsistencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch {
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "field '{field}' has {actual} values but the class holds {expected} nodes"
                )
            }
            Self::TypeMismatch {
                field,
                requested,
                stored,
            } => {
                write!(f, "field '{field}' stores {stored}, requested {requested}")
            }
            Self::MalformedRestriction { reason } => {
                write!(f, "malformed restriction: {reason}")
            }
        }
    }
}

impl Error for ConsistencyError {}

/// Mutation attempted through a view not granted write permission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteProtectionError {
    /// The view was acquired with read-only access.
    ReadOnly {
        /// The field the view wraps.
        field: String,
    },
}

impl fmt::Display for WriteProtectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOnly { field } => write!(f, "view of field '{field}' is read-only"),
        }
    }
}

impl Error for WriteProtectionError {}

/// Umbrella error for all fallible store, class, and network operations.
///
/// Operations at the network layer can fail across families (resolving a
/// class name is structural, validating a vector length is consistency),
/// so the public API returns this sum; callers that care about the family
/// match on the variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelError {
    /// Registration or lookup contract violation.
    Structural(StructuralError),
    /// Position outside bounds or excluded by a restriction.
    Range(RangeError),
    /// Shape or payload-type disagreement.
    Consistency(ConsistencyError),
    /// Mutation through a read-only view.
    WriteProtection(WriteProtectionError),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structural(e) => e.fmt(f),
            Self::Range(e) => e.fmt(f),
            Self::Consistency(e) => e.fmt(f),
            Self::WriteProtection(e) => e.fmt(f),
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Structural(e) => Some(e),
            Self::Range(e) => Some(e),
            Self::Consistency(e) => Some(e),
            Self::WriteProtection(e) => Some(e),
        }
    }
}

impl From<StructuralError> for ModelError {
    fn from(e: StructuralError) -> Self {
        Self::Structural(e)
    }
}

impl From<RangeError> for ModelError {
    fn from(e: RangeError) -> Self {
        Self::Range(e)
    }
}

impl From<ConsistencyError> for ModelError {
    fn from(e: ConsistencyError) -> Self {
        Self::Consistency(e)
    }
}

impl From<WriteProtectionError> for ModelError {
    fn from(e: WriteProtectionError) -> Self {
        Self::WriteProtection(e)
    }
}
