//! Product knowledge graph: typed nodes and relations.
//!
//! The graph has three node variants — products, categories, tags — and two
//! directed relation kinds:
//!
//! - **IS_A** (product → category): every product carries exactly one
//! - **HAS_TAG** (product → tag): zero or more per product
//!
//! Relations are stored directed but traversed direction-agnostically, which
//! is what lets a search move product → category → other-product and
//! product → tag → other-product.

pub mod build;
pub mod store;
pub mod traverse;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::record::ProductRecord;

pub use build::{build, BuildReport, RejectedRecord};
pub use store::ProductGraph;
pub use traverse::{discover, Candidate};

/// Namespaced key identifying a node in the product graph.
///
/// Each variant has its own key namespace, so a product and a tag may share
/// the same raw name without colliding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKey {
    /// A product, keyed by its unique id.
    Product(String),
    /// A category, keyed by name.
    Category(String),
    /// A tag, keyed by name.
    Tag(String),
}

impl NodeKey {
    /// Key for a product node.
    pub fn product(id: impl Into<String>) -> Self {
        NodeKey::Product(id.into())
    }

    /// Key for a category node.
    pub fn category(name: impl Into<String>) -> Self {
        NodeKey::Category(name.into())
    }

    /// Key for a tag node.
    pub fn tag(name: impl Into<String>) -> Self {
        NodeKey::Tag(name.into())
    }

    /// The raw name within the variant's namespace.
    pub fn name(&self) -> &str {
        match self {
            NodeKey::Product(id) => id,
            NodeKey::Category(name) => name,
            NodeKey::Tag(name) => name,
        }
    }
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKey::Product(id) => write!(f, "product:{id}"),
            NodeKey::Category(name) => write!(f, "category:{name}"),
            NodeKey::Tag(name) => write!(f, "tag:{name}"),
        }
    }
}

/// Typed relation stored on graph edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Product → category membership.
    IsA,
    /// Product → tag annotation.
    HasTag,
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeKind::IsA => write!(f, "IS_A"),
            EdgeKind::HasTag => write!(f, "HAS_TAG"),
        }
    }
}

/// Attributes carried by a product node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: String,
    /// The single category this product belongs to.
    pub category: String,
    /// Brand name.
    pub brand: String,
    /// Price, non-negative.
    pub price: f64,
    /// Whether the product is currently in stock.
    pub in_stock: bool,
    /// Tag names, possibly empty.
    pub tags: BTreeSet<String>,
}

impl From<ProductRecord> for Product {
    fn from(rec: ProductRecord) -> Self {
        Self {
            id: rec.id,
            category: rec.category,
            brand: rec.brand,
            price: rec.price,
            in_stock: rec.in_stock,
            tags: rec.tags,
        }
    }
}
