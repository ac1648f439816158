//! The [`Network`]: graph-level fields plus a rooted tree of node classes.

use indexmap::IndexMap;

use silt_core::{ModelError, StructuralError, Value};
use silt_store::{Aggregate, FieldView};
use silt_taxa::{Class, Index, Restriction};

use crate::view::{Access, ExpandedNodesView, GraphView, NodesView};

/// A graph-level field store plus a registry of node classes forming a
/// rooted tree.
///
/// Classes are registered during a build phase (`&mut self`), each tied
/// to an already-registered parent by a restriction; the tree-by-
/// construction rules out cycles. Field reads and mutations then run
/// concurrently through views, guarded by the per-field entry locks of
/// the underlying aggregates.
///
/// Forking a network duplicates the graph aggregate and every class at
/// O(total field count), sharing all payloads copy-on-write.
pub struct Network {
    graph: Aggregate,
    classes: IndexMap<String, Class>,
    root: String,
}

impl Network {
    /// Create a network whose root class covers `index`.
    pub fn new(root_name: impl Into<String>, index: Index) -> Self {
        let root_name = root_name.into();
        let mut classes = IndexMap::new();
        classes.insert(root_name.clone(), Class::root(root_name.clone(), index));
        Self {
            graph: Aggregate::new(),
            classes,
            root: root_name,
        }
    }

    /// Name of the root class.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Register a subclass of `parent` through `restriction`.
    ///
    /// Fails with `DuplicateClass` if `name` is taken, `UnknownParent` if
    /// `parent` is not registered, and `OutOfRange` if the restriction
    /// references positions beyond the parent's node count. Nothing is
    /// registered on failure.
    pub fn add_class(
        &mut self,
        parent: &str,
        name: impl Into<String>,
        restriction: Restriction,
    ) -> Result<(), ModelError> {
        let name = name.into();
        if self.classes.contains_key(&name) {
            return Err(StructuralError::DuplicateClass { class: name }.into());
        }
        let parent_class = self
            .classes
            .get(parent)
            .ok_or_else(|| StructuralError::UnknownParent {
                class: name.clone(),
                parent: parent.to_string(),
            })?;
        let class = Class::derive_from(parent_class, name.clone(), restriction)?;
        self.classes.insert(name, class);
        Ok(())
    }

    /// Look up a class by name.
    pub fn class(&self, name: &str) -> Result<&Class, ModelError> {
        self.classes
            .get(name)
            .ok_or_else(|| StructuralError::UnknownClass {
                class: name.to_string(),
            }.into())
    }

    /// Classes in registration order (root first).
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.classes.values()
    }

    /// The graph-level field store.
    pub fn graph_fields(&self) -> &Aggregate {
        &self.graph
    }

    /// Register a graph-level field.
    pub fn add_graph_field<T: Value>(
        &self,
        name: impl Into<String>,
        value: T,
    ) -> Result<(), ModelError> {
        self.graph.add_field(name, value)
    }

    /// Register a per-node field on `class` (one value per node).
    pub fn add_node_field<T: Value>(
        &self,
        class: &str,
        name: impl Into<String>,
        values: Vec<T>,
    ) -> Result<(), ModelError> {
        self.class(class)?.add_field(name, values)
    }

    /// Acquire a view of a graph-level field.
    pub fn graph_view<T: Value>(
        &self,
        field: &str,
        access: Access,
    ) -> Result<GraphView<T>, ModelError> {
        let view: FieldView<T> = self.graph.view(field)?;
        Ok(GraphView::new(view, access))
    }

    /// Acquire a view of one class's per-node field, in the class's own
    /// position space.
    pub fn nodes_view<T: Value>(
        &self,
        class: &str,
        field: &str,
        access: Access,
    ) -> Result<NodesView<T>, ModelError> {
        let c = self.class(class)?;
        let view = c.field_view::<T>(field)?;
        Ok(NodesView::new(view, c.name().to_string(), c.size(), access))
    }

    /// Acquire a view of `class`'s per-node field observed through
    /// `ancestor`'s position space.
    ///
    /// `ancestor` may be any class on `class`'s lineage chain (or `class`
    /// itself, degenerating to the identity restriction); the per-hop
    /// restrictions are composed into one.
    pub fn expanded_view<T: Value>(
        &self,
        ancestor: &str,
        class: &str,
        field: &str,
        access: Access,
    ) -> Result<ExpandedNodesView<T>, ModelError> {
        let ancestor_class = self.class(ancestor)?;
        let restriction = self.restriction_between(ancestor, class)?;
        let nodes = self.nodes_view::<T>(class, field, access)?;
        Ok(ExpandedNodesView::new(
            nodes,
            ancestor_class.name().to_string(),
            ancestor_class.size(),
            restriction,
        ))
    }

    /// The composed restriction mapping `class`'s positions into
    /// `ancestor`'s position space.
    ///
    /// Returns `NotAnAncestor` if walking `class`'s lineage never reaches
    /// `ancestor`.
    pub fn restriction_between(
        &self,
        ancestor: &str,
        class: &str,
    ) -> Result<Restriction, ModelError> {
        let target = self.class(class)?;
        self.class(ancestor)?;
        if ancestor == class {
            return Ok(Restriction::full(target.size()));
        }

        // Collect the per-hop restrictions walking up from the class;
        // they come out child-first, so compose from the ancestor end.
        let mut hops = Vec::new();
        let mut current = target;
        loop {
            let lineage = match current.lineage() {
                Some(lineage) => lineage,
                None => {
                    return Err(StructuralError::NotAnAncestor {
                        class: class.to_string(),
                        ancestor: ancestor.to_string(),
                    }
                    .into())
                }
            };
            hops.push(lineage.restriction.clone());
            if lineage.parent == ancestor {
                break;
            }
            current = self.class(&lineage.parent)?;
        }

        let mut composed = hops.pop().expect("loop pushes at least one hop");
        while let Some(inner) = hops.pop() {
            composed = composed.compose(&inner)?;
        }
        Ok(composed)
    }

    /// Duplicate the whole network, sharing every field payload.
    ///
    /// Cost is proportional to the total number of fields across the
    /// graph and all classes; no payload is copied until mutation.
    pub fn fork(&self) -> Network {
        Network {
            graph: self.graph.fork(),
            classes: self
                .classes
                .iter()
                .map(|(name, class)| (name.clone(), class.fork()))
                .collect(),
            root: self.root.clone(),
        }
    }
}
