//! In-memory product graph with key-based indexing.
//!
//! Uses `petgraph` for the graph structure and a side index for O(1) lookups
//! by [`NodeKey`]. The graph is built once per dataset load by the builder
//! and is read-only afterwards; recommendation never mutates it.

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::error::GraphError;

use super::{EdgeKind, NodeKey, Product};

/// Result type for graph operations.
pub type GraphResult<T> = std::result::Result<T, GraphError>;

/// In-memory product knowledge graph backed by petgraph.
///
/// Nodes are [`NodeKey`]s; edges carry an [`EdgeKind`]. Product attributes
/// live in a side table keyed by product id.
#[derive(Default)]
pub struct ProductGraph {
    /// The directed graph: IS_A and HAS_TAG relations out of product nodes.
    graph: DiGraph<NodeKey, EdgeKind>,
    /// NodeKey → NodeIndex mapping for O(1) node lookups.
    node_index: HashMap<NodeKey, NodeIndex>,
    /// Product id → attributes.
    products: HashMap<String, Product>,
}

impl ProductGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a node exists for the given key, returning its index.
    fn ensure_node(&mut self, key: NodeKey) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(key.clone());
        self.node_index.insert(key, idx);
        idx
    }

    /// Add or overwrite a product node.
    ///
    /// Re-adding an existing id overwrites its attributes and drops the
    /// node's previous relations, so a rebuilt product keeps exactly one
    /// IS_A edge after re-linking. Never creates a duplicate node.
    pub fn add_product(&mut self, product: Product) {
        let idx = self.ensure_node(NodeKey::product(&product.id));
        if self.products.contains_key(&product.id) {
            // Overwrite-by-id: stale IS_A/HAS_TAG links must not survive.
            let mut stale: Vec<_> = self.graph.edges(idx).map(|e| e.id()).collect();
            stale.sort_unstable();
            for edge in stale.into_iter().rev() {
                self.graph.remove_edge(edge);
            }
        }
        self.products.insert(product.id.clone(), product);
    }

    /// Add a category node. Re-adding an existing name is a no-op.
    pub fn add_category(&mut self, name: impl Into<String>) {
        self.ensure_node(NodeKey::Category(name.into()));
    }

    /// Add a tag node. Re-adding an existing name is a no-op.
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.ensure_node(NodeKey::Tag(name.into()));
    }

    /// Connect a product to its category with an IS_A edge.
    ///
    /// Creates the endpoints if absent; adding the same link twice is a no-op.
    pub fn link_category(&mut self, product_id: &str, category: &str) {
        let prod = self.ensure_node(NodeKey::product(product_id));
        let cat = self.ensure_node(NodeKey::category(category));
        if self.graph.find_edge(prod, cat).is_none() {
            self.graph.add_edge(prod, cat, EdgeKind::IsA);
        }
    }

    /// Connect a product to a tag with a HAS_TAG edge.
    ///
    /// Creates the endpoints if absent; adding the same link twice is a no-op.
    pub fn link_tag(&mut self, product_id: &str, tag: &str) {
        let prod = self.ensure_node(NodeKey::product(product_id));
        let tag = self.ensure_node(NodeKey::tag(tag));
        if self.graph.find_edge(prod, tag).is_none() {
            self.graph.add_edge(prod, tag, EdgeKind::HasTag);
        }
    }

    /// Look up a product's attributes by id.
    pub fn get_product(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    /// Check whether a node exists.
    pub fn contains(&self, key: &NodeKey) -> bool {
        self.node_index.contains_key(key)
    }

    /// All nodes directly connected to `key` by any edge, in either direction.
    ///
    /// Fails with [`GraphError::NodeNotFound`] if the key has no node.
    pub fn neighbors(&self, key: &NodeKey) -> GraphResult<BTreeSet<NodeKey>> {
        let &idx = self
            .node_index
            .get(key)
            .ok_or_else(|| GraphError::NodeNotFound {
                key: key.to_string(),
            })?;
        Ok(self
            .graph
            .neighbors_undirected(idx)
            .map(|n| self.graph[n].clone())
            .collect())
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of products with stored attributes.
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// All product ids, sorted.
    pub fn product_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.products.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Node index for a key, if present.
    pub(crate) fn index_of(&self, key: &NodeKey) -> Option<NodeIndex> {
        self.node_index.get(key).copied()
    }

    /// The key stored at a node index.
    pub(crate) fn key_at(&self, idx: NodeIndex) -> &NodeKey {
        &self.graph[idx]
    }

    /// Direction-agnostic adjacency in petgraph iteration order.
    ///
    /// Order is a deterministic function of edge insertion order, which is
    /// what makes traversal tie-breaking reproducible across runs.
    pub(crate) fn adjacent_indices(
        &self,
        idx: NodeIndex,
    ) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_undirected(idx)
    }
}

impl std::fmt::Debug for ProductGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductGraph")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .field("products", &self.product_count())
            .finish()
    }
}
