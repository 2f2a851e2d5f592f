//! Graph builder: turns product records into a [`ProductGraph`].
//!
//! Building is all-or-nothing per record, not per batch: a malformed record
//! is rejected and collected, the rest of the batch still builds. Building
//! twice from the same record sequence yields identical node and edge sets.

use crate::error::RecordError;
use crate::record::ProductRecord;

use super::{Product, ProductGraph};

/// A record the builder refused, with the reason.
#[derive(Debug, Clone)]
pub struct RejectedRecord {
    /// The offending record, returned to the caller untouched.
    pub record: ProductRecord,
    /// Why it was rejected.
    pub reason: RecordError,
}

/// Outcome of a build: the graph plus whatever was rejected.
#[derive(Debug)]
pub struct BuildReport {
    /// The built graph.
    pub graph: ProductGraph,
    /// Records that failed validation, in input order.
    pub rejected: Vec<RejectedRecord>,
}

/// Build a product graph from a sequence of records.
///
/// For each valid record: create or reuse the product node, its category
/// node (linked via IS_A), and one tag node per token (linked via HAS_TAG).
pub fn build<I>(records: I) -> BuildReport
where
    I: IntoIterator<Item = ProductRecord>,
{
    let mut graph = ProductGraph::new();
    let mut rejected = Vec::new();

    for record in records {
        if let Err(reason) = record.validate() {
            tracing::warn!(%reason, "rejecting product record");
            rejected.push(RejectedRecord { record, reason });
            continue;
        }

        let product = Product::from(record);
        let id = product.id.clone();
        let category = product.category.clone();
        let tags: Vec<String> = product.tags.iter().cloned().collect();

        graph.add_product(product);
        graph.add_category(category.clone());
        graph.link_category(&id, &category);
        for tag in &tags {
            graph.add_tag(tag.clone());
            graph.link_tag(&id, tag);
        }
    }

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        products = graph.product_count(),
        rejected = rejected.len(),
        "built product graph"
    );

    BuildReport { graph, rejected }
}
