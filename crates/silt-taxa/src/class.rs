//! A named node population with its own index and per-node fields.

use silt_core::{ConsistencyError, ModelError, Value};
use silt_store::{Aggregate, FieldView};

use crate::index::Index;
use crate::restriction::Restriction;

/// Link from a derived class back to its parent.
#[derive(Clone, Debug)]
pub struct Lineage {
    /// Name of the parent class.
    pub parent: String,
    /// Which parent positions this class includes, and the translation
    /// between the two position spaces.
    pub restriction: Restriction,
}

/// A named node population: an index, an optional lineage back to a
/// parent class, and a per-node field store.
///
/// The node count is fixed at construction; every per-node field is a
/// vector of exactly that length. Fields share the copy-on-write
/// semantics of [`Aggregate`], so forking a class is O(field count).
pub struct Class {
    name: String,
    index: Index,
    lineage: Option<Lineage>,
    fields: Aggregate,
}

impl std::fmt::Debug for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("lineage", &self.lineage)
            .finish_non_exhaustive()
    }
}

impl Class {
    /// Create a root class (no parent) over the given index.
    pub fn root(name: impl Into<String>, index: Index) -> Self {
        Self {
            name: name.into(),
            index,
            lineage: None,
            fields: Aggregate::new(),
        }
    }

    /// Derive a subclass of `parent` through `restriction`.
    ///
    /// Validates the restriction against the parent's node count
    /// (`RangeError::OutOfRange` on violation) and inherits the restricted
    /// subset of the parent's labels in ascending parent order.
    pub fn derive_from(
        parent: &Class,
        name: impl Into<String>,
        restriction: Restriction,
    ) -> Result<Self, ModelError> {
        let index = parent.index.restricted(&restriction)?;
        Ok(Self {
            name: name.into(),
            index,
            lineage: Some(Lineage {
                parent: parent.name.clone(),
                restriction,
            }),
            fields: Aggregate::new(),
        })
    }

    /// Class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The label ↔ position index.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Number of nodes. Immutable for the class's life.
    pub fn size(&self) -> usize {
        self.index.len()
    }

    /// Parent link, or `None` for the root class.
    pub fn lineage(&self) -> Option<&Lineage> {
        self.lineage.as_ref()
    }

    /// The per-node field store.
    pub fn fields(&self) -> &Aggregate {
        &self.fields
    }

    /// Register a per-node field: one value per node, position order.
    ///
    /// Returns `ConsistencyError::SizeMismatch` unless
    /// `values.len() == self.size()`; the length is fixed thereafter.
    pub fn add_field<T: Value>(
        &self,
        name: impl Into<String>,
        values: Vec<T>,
    ) -> Result<(), ModelError> {
        let name = name.into();
        if values.len() != self.size() {
            return Err(ConsistencyError::SizeMismatch {
                field: name,
                expected: self.size(),
                actual: values.len(),
            }
            .into());
        }
        self.fields.add_field(name, values)
    }

    /// Acquire a typed view of one per-node field vector.
    pub fn field_view<T: Value>(&self, name: &str) -> Result<FieldView<Vec<T>>, ModelError> {
        self.fields.view::<Vec<T>>(name)
    }

    /// Duplicate this class, sharing every field payload (copy-on-write).
    pub fn fork(&self) -> Class {
        Class {
            name: self.name.clone(),
            index: self.index.clone(),
            lineage: self.lineage.clone(),
            fields: self.fields.fork(),
        }
    }
}
