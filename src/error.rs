//! Rich diagnostic error types for the ersatz recommender.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so callers know exactly what went wrong
//! and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the ersatz crate.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum ErsatzError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Recommend(#[from] RecommendError),
}

// ---------------------------------------------------------------------------
// Graph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("node not found: {key}")]
    #[diagnostic(
        code(ersatz::graph::node_not_found),
        help(
            "The key has no corresponding node in the product graph. \
             Node keys are namespaced (`product:<id>`, `category:<name>`, \
             `tag:<name>`) — check the namespace and spelling, and make sure \
             the dataset containing this node was loaded."
        )
    )]
    NodeNotFound { key: String },
}

// ---------------------------------------------------------------------------
// Record errors
// ---------------------------------------------------------------------------

/// Reasons the graph builder rejects a product record.
///
/// Rejection is per-record: the builder collects these alongside the built
/// graph instead of failing the whole batch.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum RecordError {
    #[error("record has an empty product id")]
    #[diagnostic(
        code(ersatz::record::empty_id),
        help("Every product record needs a unique, non-empty `id` field.")
    )]
    EmptyId,

    #[error("record {id:?} has an empty category")]
    #[diagnostic(
        code(ersatz::record::empty_category),
        help(
            "Every product belongs to exactly one category. \
             Fill in the `category` field for this record."
        )
    )]
    EmptyCategory { id: String },

    #[error("record {id:?} has an empty brand")]
    #[diagnostic(
        code(ersatz::record::empty_brand),
        help("Fill in the `brand` field for this record.")
    )]
    EmptyBrand { id: String },

    #[error("record {id:?} has an invalid price: {price}")]
    #[diagnostic(
        code(ersatz::record::invalid_price),
        help("Prices must be finite and non-negative.")
    )]
    InvalidPrice { id: String, price: f64 },
}

// ---------------------------------------------------------------------------
// Recommendation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum RecommendError {
    #[error("requested product not found: {id}")]
    #[diagnostic(
        code(ersatz::recommend::product_not_found),
        help(
            "The requested product id is not in the graph, so there is nothing \
             to find substitutes for. Check the id against the loaded dataset \
             (`ersatz info` lists product counts, `ersatz show` inspects one)."
        )
    )]
    ProductNotFound { id: String },
}

/// Convenience alias for functions returning ersatz results.
pub type ErsatzResult<T> = std::result::Result<T, ErsatzError>;
