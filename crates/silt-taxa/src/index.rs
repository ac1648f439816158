//! Label ↔ position bijection for one node class.

use indexmap::IndexSet;
use silt_core::{ModelError, StructuralError};

use crate::restriction::Restriction;

/// Bidirectional label ↔ dense 1-based position table for one class.
///
/// Positions follow insertion order and are stable for the index's life;
/// label uniqueness is enforced at construction, before anything else is
/// registered against the class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Index {
    labels: IndexSet<String>,
}

impl Index {
    /// Build from an explicit ordered list of labels, assigned positions
    /// `1..=n` in list order.
    ///
    /// Returns `StructuralError::DuplicateLabel` on the first repeat.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = IndexSet::new();
        for label in labels {
            let label = label.into();
            if !set.insert(label.clone()) {
                return Err(StructuralError::DuplicateLabel { label }.into());
            }
        }
        Ok(Self { labels: set })
    }

    /// Build with `n` synthesized default labels `n1`, `n2`, …, `n{n}`.
    pub fn numbered(n: usize) -> Self {
        Self {
            labels: (1..=n).map(|i| format!("n{i}")).collect(),
        }
    }

    /// Derive the index of a subclass: the restricted subset of this
    /// index's labels, in ascending parent-position order.
    ///
    /// Returns `RangeError::OutOfRange` if the restriction references a
    /// position this index does not have.
    pub fn restricted(&self, restriction: &Restriction) -> Result<Index, ModelError> {
        restriction.check_within(self.len())?;
        let labels = restriction
            .parent_positions()
            .map(|p| self.labels[p - 1].clone())
            .collect();
        Ok(Index { labels })
    }

    /// Number of labelled positions.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the index holds no positions.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label at a 1-based position, if in range.
    pub fn label(&self, position: usize) -> Option<&str> {
        if position == 0 {
            return None;
        }
        self.labels.get_index(position - 1).map(String::as_str)
    }

    /// 1-based position of a label, if present.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.get_index_of(label).map(|i| i + 1)
    }

    /// Labels in position order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}
