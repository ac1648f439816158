//! Typed read/write facades over graph-level and per-node fields.

use silt_core::{ModelError, RangeError, Value, WriteProtectionError};
use silt_store::FieldView;
use silt_taxa::Restriction;

/// Write permission for a view, granted explicitly at acquisition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Reads only; every mutating call fails with `ReadOnly`.
    Read,
    /// Reads and writes.
    ReadWrite,
}

impl Access {
    fn check_writable(self, field: &str) -> Result<(), ModelError> {
        match self {
            Self::ReadWrite => Ok(()),
            Self::Read => Err(WriteProtectionError::ReadOnly {
                field: field.to_string(),
            }
            .into()),
        }
    }
}

/// View of one graph-level field: a single value attached to the whole
/// network, with no positional indexing.
pub struct GraphView<T: Value> {
    view: FieldView<T>,
    access: Access,
}

impl<T: Value> GraphView<T> {
    pub(crate) fn new(view: FieldView<T>, access: Access) -> Self {
        Self { view, access }
    }

    /// Name of the wrapped field.
    pub fn name(&self) -> &str {
        self.view.name()
    }

    /// Clone the current value out.
    pub fn get(&self) -> T {
        self.view.get()
    }

    /// Run `reader` with shared access to the value, under the field lock.
    pub fn scan<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        self.view.scan(reader)
    }

    /// Run `writer` with exclusive access, copy-on-write first if the
    /// payload is shared. Fails with `ReadOnly` on a read-only view.
    pub fn mutate<R>(&self, writer: impl FnOnce(&mut T) -> R) -> Result<R, ModelError> {
        self.access.check_writable(self.view.name())?;
        Ok(self.view.mutate(writer))
    }

    /// Replace the whole value. Same access and copy-on-write rules as
    /// [`GraphView::mutate`].
    pub fn reassign(&self, value: T) -> Result<(), ModelError> {
        self.access.check_writable(self.view.name())?;
        self.view.reassign(value);
        Ok(())
    }
}

/// View of one class's per-node vector field, addressed by the class's
/// own 1-based positions.
pub struct NodesView<T: Value> {
    view: FieldView<Vec<T>>,
    class: String,
    size: usize,
    access: Access,
}

impl<T: Value> std::fmt::Debug for NodesView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodesView")
            .field("name", &self.view.name())
            .field("class", &self.class)
            .field("size", &self.size)
            .field("access", &self.access)
            .finish()
    }
}

impl<T: Value> NodesView<T> {
    pub(crate) fn new(view: FieldView<Vec<T>>, class: String, size: usize, access: Access) -> Self {
        Self {
            view,
            class,
            size,
            access,
        }
    }

    /// Name of the wrapped field.
    pub fn name(&self) -> &str {
        self.view.name()
    }

    /// Name of the class whose position space this view uses.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Node count of the class.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the class has no nodes.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn check_bounds(&self, position: usize) -> Result<(), ModelError> {
        if position == 0 || position > self.size {
            return Err(RangeError::OutOfRange {
                position,
                size: self.size,
            }
            .into());
        }
        Ok(())
    }

    /// Value at a 1-based position.
    ///
    /// Fails with `OutOfRange` unless `1 <= position <= len()`.
    pub fn get(&self, position: usize) -> Result<T, ModelError> {
        self.check_bounds(position)?;
        Ok(self.view.scan(|v| v[position - 1].clone()))
    }

    /// Overwrite the value at a 1-based position, copy-on-write first if
    /// the vector is shared.
    ///
    /// Fails with `ReadOnly` on a read-only view and `OutOfRange` on a
    /// bad position; validation precedes any payload change.
    pub fn set(&self, position: usize, value: T) -> Result<(), ModelError> {
        self.access.check_writable(self.view.name())?;
        self.check_bounds(position)?;
        self.view.mutate(|v| v[position - 1] = value);
        Ok(())
    }

    /// Snapshot the whole vector in position order.
    pub fn to_vec(&self) -> Vec<T> {
        self.view.scan(Vec::clone)
    }

    /// Iterate values in ascending position order.
    ///
    /// Each call snapshots the vector fresh under the field lock, so the
    /// iteration is restartable and never observes a partial write.
    pub fn iter(&self) -> std::vec::IntoIter<T> {
        self.to_vec().into_iter()
    }
}

/// View of a subclass's per-node field observed through an ancestor
/// class's position space.
///
/// Positions are the *ancestor's*; membership is decided by the composed
/// restriction, and member positions are translated to the subclass's
/// local space before delegating to the wrapped [`NodesView`].
pub struct ExpandedNodesView<T: Value> {
    nodes: NodesView<T>,
    ancestor: String,
    ancestor_size: usize,
    restriction: Restriction,
}

impl<T: Value> std::fmt::Debug for ExpandedNodesView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpandedNodesView")
            .field("nodes", &self.nodes)
            .field("ancestor", &self.ancestor)
            .field("ancestor_size", &self.ancestor_size)
            .field("restriction", &self.restriction)
            .finish()
    }
}

impl<T: Value> ExpandedNodesView<T> {
    pub(crate) fn new(
        nodes: NodesView<T>,
        ancestor: String,
        ancestor_size: usize,
        restriction: Restriction,
    ) -> Self {
        Self {
            nodes,
            ancestor,
            ancestor_size,
            restriction,
        }
    }

    /// Name of the wrapped field.
    pub fn name(&self) -> &str {
        self.nodes.name()
    }

    /// Name of the ancestor class whose position space this view uses.
    pub fn ancestor(&self) -> &str {
        &self.ancestor
    }

    /// Node count of the ancestor class (the expanded position range).
    pub fn len(&self) -> usize {
        self.ancestor_size
    }

    /// Whether the ancestor class has no nodes.
    pub fn is_empty(&self) -> bool {
        self.ancestor_size == 0
    }

    /// The composed restriction mapping subclass positions into the
    /// ancestor's space.
    pub fn restriction(&self) -> &Restriction {
        &self.restriction
    }

    fn to_local(&self, position: usize) -> Result<usize, ModelError> {
        if position == 0 || position > self.ancestor_size {
            return Err(RangeError::OutOfRange {
                position,
                size: self.ancestor_size,
            }
            .into());
        }
        self.restriction
            .to_local(position)
            .ok_or_else(|| {
                RangeError::NotInSubclass {
                    position,
                    class: self.nodes.class().to_string(),
                }
                .into()
            })
    }

    /// Value at a 1-based ancestor position.
    ///
    /// Fails with `OutOfRange` if the position exceeds the ancestor's
    /// node count and `NotInSubclass` if it is valid there but excluded
    /// by the restriction.
    pub fn get(&self, position: usize) -> Result<T, ModelError> {
        let local = self.to_local(position)?;
        self.nodes.get(local)
    }

    /// Overwrite the value at a 1-based ancestor position.
    ///
    /// Same membership rules as [`ExpandedNodesView::get`], plus the
    /// wrapped view's write-permission check.
    pub fn set(&self, position: usize, value: T) -> Result<(), ModelError> {
        let local = self.to_local(position)?;
        self.nodes.set(local, value)
    }

    /// Iterate member `(ancestor_position, value)` pairs in ascending
    /// position order. Restartable; each call snapshots the vector fresh.
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> {
        let positions: Vec<usize> = self.restriction.parent_positions().collect();
        positions.into_iter().zip(self.nodes.iter())
    }
}

impl<T: Value + Default> ExpandedNodesView<T> {
    /// Materialize the sparse view as a dense vector over the ancestor's
    /// full position range.
    ///
    /// Non-member positions are filled with `T::default()` (the neutral
    /// value for the element type) rather than raising, so display-style
    /// callers can extract in one call.
    pub fn materialize(&self) -> Vec<T> {
        let mut dense: Vec<T> = std::iter::repeat_with(T::default)
            .take(self.ancestor_size)
            .collect();
        let values = self.nodes.to_vec();
        for (local, parent) in self.restriction.parent_positions().enumerate() {
            dense[parent - 1] = values[local].clone();
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Network;
    use silt_core::{ConsistencyError, PosVec, StructuralError};
    use silt_taxa::Index;

    fn web() -> Network {
        let mut net = Network::new("species", Index::numbered(4));
        net.add_class(
            "species",
            "producers",
            Restriction::sparse(PosVec::from_slice(&[2, 4])).unwrap(),
        )
        .unwrap();
        net.add_node_field("producers", "biomass", vec![10.0f64, 20.0])
            .unwrap();
        net
    }

    #[test]
    fn nodes_view_bounds_are_one_based() {
        let net = web();
        let view = net
            .nodes_view::<f64>("producers", "biomass", Access::Read)
            .unwrap();
        assert_eq!(view.get(1).unwrap(), 10.0);
        assert_eq!(view.get(2).unwrap(), 20.0);
        for bad in [0, 3] {
            assert_eq!(
                view.get(bad).unwrap_err(),
                RangeError::OutOfRange {
                    position: bad,
                    size: 2
                }
                .into()
            );
        }
    }

    #[test]
    fn read_only_views_refuse_writes() {
        let net = web();
        let view = net
            .nodes_view::<f64>("producers", "biomass", Access::Read)
            .unwrap();
        assert_eq!(
            view.set(1, 0.0).unwrap_err(),
            WriteProtectionError::ReadOnly {
                field: "biomass".into()
            }
            .into()
        );
        // The payload is untouched.
        assert_eq!(view.get(1).unwrap(), 10.0);
    }

    #[test]
    fn writable_views_mutate_in_position_order() {
        let net = web();
        let view = net
            .nodes_view::<f64>("producers", "biomass", Access::ReadWrite)
            .unwrap();
        view.set(2, 25.0).unwrap();
        assert_eq!(view.to_vec(), vec![10.0, 25.0]);
        assert_eq!(view.iter().collect::<Vec<_>>(), vec![10.0, 25.0]);
    }

    #[test]
    fn graph_view_checks_access_on_both_mutators() {
        let net = web();
        net.add_graph_field("temperature", 285.0f64).unwrap();

        let ro = net.graph_view::<f64>("temperature", Access::Read).unwrap();
        assert!(ro.mutate(|t| *t += 1.0).is_err());
        assert!(ro.reassign(0.0).is_err());
        assert_eq!(ro.get(), 285.0);

        let rw = net
            .graph_view::<f64>("temperature", Access::ReadWrite)
            .unwrap();
        rw.mutate(|t| *t += 1.0).unwrap();
        rw.reassign(290.0).unwrap();
        assert_eq!(ro.get(), 290.0);
        assert_eq!(ro.scan(|t| *t * 2.0), 580.0);
    }

    #[test]
    fn expanded_view_translates_membership_and_positions() {
        let net = web();
        let view = net
            .expanded_view::<f64>("species", "producers", "biomass", Access::Read)
            .unwrap();
        assert_eq!(view.len(), 4);
        assert_eq!(view.get(2).unwrap(), 10.0);
        assert_eq!(view.get(4).unwrap(), 20.0);
        assert_eq!(
            view.get(1).unwrap_err(),
            RangeError::NotInSubclass {
                position: 1,
                class: "producers".into()
            }
            .into()
        );
        assert_eq!(
            view.get(5).unwrap_err(),
            RangeError::OutOfRange {
                position: 5,
                size: 4
            }
            .into()
        );
    }

    #[test]
    fn expanded_materialization_fills_neutral_values() {
        let net = web();
        let view = net
            .expanded_view::<f64>("species", "producers", "biomass", Access::Read)
            .unwrap();
        assert_eq!(view.materialize(), vec![0.0, 10.0, 0.0, 20.0]);
    }

    #[test]
    fn expanded_iter_yields_members_ascending() {
        let net = web();
        let view = net
            .expanded_view::<f64>("species", "producers", "biomass", Access::Read)
            .unwrap();
        let pairs: Vec<(usize, f64)> = view.iter().collect();
        assert_eq!(pairs, vec![(2, 10.0), (4, 20.0)]);
        // Restartable: a second pass sees the same members afresh.
        assert_eq!(view.iter().count(), 2);
    }

    #[test]
    fn expanded_writes_land_on_the_local_vector() {
        let net = web();
        let view = net
            .expanded_view::<f64>("species", "producers", "biomass", Access::ReadWrite)
            .unwrap();
        view.set(4, 99.0).unwrap();

        let local = net
            .nodes_view::<f64>("producers", "biomass", Access::Read)
            .unwrap();
        assert_eq!(local.to_vec(), vec![10.0, 99.0]);
        assert!(view.set(3, 0.0).is_err());
    }

    #[test]
    fn expanded_view_through_a_grandparent() {
        let mut net = web();
        net.add_class(
            "producers",
            "mosses",
            Restriction::sparse(PosVec::from_slice(&[2])).unwrap(),
        )
        .unwrap();
        net.add_node_field("mosses", "cover", vec![0.7f64]).unwrap();

        let view = net
            .expanded_view::<f64>("species", "mosses", "cover", Access::Read)
            .unwrap();
        assert_eq!(view.len(), 4);
        assert_eq!(view.get(4).unwrap(), 0.7);
        assert!(matches!(
            view.get(2).unwrap_err(),
            silt_core::ModelError::Range(RangeError::NotInSubclass { .. })
        ));
        assert_eq!(view.materialize(), vec![0.0, 0.0, 0.0, 0.7]);
    }

    #[test]
    fn wrong_element_type_is_reported_at_acquisition() {
        let net = web();
        let err = net
            .nodes_view::<i64>("producers", "biomass", Access::Read)
            .unwrap_err();
        assert!(matches!(
            err,
            silt_core::ModelError::Consistency(ConsistencyError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn unknown_names_surface_structural_errors() {
        let net = web();
        assert!(matches!(
            net.expanded_view::<f64>("species", "fungi", "biomass", Access::Read)
                .unwrap_err(),
            silt_core::ModelError::Structural(StructuralError::UnknownClass { .. })
        ));
        assert!(matches!(
            net.expanded_view::<f64>("species", "producers", "height", Access::Read)
                .unwrap_err(),
            silt_core::ModelError::Structural(StructuralError::UnknownField { .. })
        ));
    }
}
