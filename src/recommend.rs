//! Recommender: orchestrates discovery, filtering, scoring, and ranking.
//!
//! The pipeline runs strictly forward: look up the requested product,
//! discover candidates by BFS, drop the ineligible ones, score the rest,
//! rank, truncate. The only hard error is an unknown requested product;
//! an empty result list is a normal outcome at every later stage.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::RecommendError;
use crate::filter::{self, Constraints};
use crate::graph::{discover, Product, ProductGraph};
use crate::score::{score, Explanation};

/// A recommendation request.
#[derive(Debug, Clone)]
pub struct Request {
    /// Id of the product the shopper asked for.
    pub product_id: String,
    /// Price ceiling for substitutes, inclusive.
    pub max_price: f64,
    /// Tags every substitute must carry.
    pub required_tags: BTreeSet<String>,
    /// Advisory brand preference; reported, never enforced.
    pub preferred_brand: Option<String>,
    /// BFS depth bound.
    pub max_hops: usize,
    /// Maximum number of substitutes to return.
    pub top_n: usize,
}

impl Request {
    /// Defaults: two hops reaches everything sharing a category or tag, and
    /// three substitutes is plenty to choose from.
    pub const DEFAULT_MAX_HOPS: usize = 2;
    pub const DEFAULT_TOP_N: usize = 3;

    /// A request with default depth and result count.
    pub fn new(product_id: impl Into<String>, max_price: f64) -> Self {
        Self {
            product_id: product_id.into(),
            max_price,
            required_tags: BTreeSet::new(),
            preferred_brand: None,
            max_hops: Self::DEFAULT_MAX_HOPS,
            top_n: Self::DEFAULT_TOP_N,
        }
    }

    /// Require every substitute to carry these tags.
    pub fn with_required_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Record an advisory brand preference.
    pub fn with_preferred_brand(mut self, brand: impl Into<String>) -> Self {
        self.preferred_brand = Some(brand.into());
        self
    }

    /// Override the BFS depth bound.
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Override the result count.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    fn constraints(&self) -> Constraints {
        Constraints {
            max_price: self.max_price,
            required_tags: self.required_tags.clone(),
            preferred_brand: self.preferred_brand.clone(),
        }
    }
}

/// A scored substitute.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// The substitute product.
    pub product: Product,
    /// Additive rule score, non-negative.
    pub score: u32,
    /// Which scoring rules fired.
    pub explanations: BTreeSet<Explanation>,
    /// BFS distance from the requested product.
    pub hops: usize,
}

/// Outcome of [`fulfill`]: either the requested product itself or substitutes.
#[derive(Debug, Clone, Serialize)]
pub enum Fulfillment {
    /// The requested product is in stock; no substitution needed.
    InStock(Product),
    /// Ranked substitutes for an unavailable product. May be empty.
    Substitutes(Vec<Recommendation>),
}

/// Recommend up to `top_n` substitutes for the requested product.
///
/// Results are sorted by score descending, ties by ascending hop distance,
/// then by discovery order (stable). Fails with
/// [`RecommendError::ProductNotFound`] when the requested id is not in the
/// graph; everything else empty is a normal outcome.
pub fn recommend(
    graph: &ProductGraph,
    request: &Request,
) -> Result<Vec<Recommendation>, RecommendError> {
    let requested = graph
        .get_product(&request.product_id)
        .ok_or_else(|| RecommendError::ProductNotFound {
            id: request.product_id.clone(),
        })?;

    tracing::debug!(product = request.product_id, "stage: traversing");
    let candidates = discover(graph, &request.product_id, request.max_hops);

    tracing::debug!(candidates = candidates.len(), "stage: filtering");
    let constraints = request.constraints();
    let surviving: Vec<(&Product, usize)> = candidates
        .iter()
        .filter_map(|c| graph.get_product(&c.product_id).map(|p| (p, c.hops)))
        .filter(|(product, _)| filter::eligible(product, &constraints))
        .collect();

    tracing::debug!(surviving = surviving.len(), "stage: scoring");
    let mut results: Vec<Recommendation> = surviving
        .into_iter()
        .map(|(product, hops)| {
            let (points, explanations) = score(
                product,
                requested,
                hops,
                request.preferred_brand.as_deref(),
            );
            Recommendation {
                product: product.clone(),
                score: points,
                explanations,
                hops,
            }
        })
        .collect();

    tracing::debug!(scored = results.len(), "stage: ranked");
    results.sort_by(|a, b| b.score.cmp(&a.score).then(a.hops.cmp(&b.hops)));
    results.truncate(request.top_n);
    Ok(results)
}

/// Serve a request end to end: hand back the requested product when it is
/// in stock, otherwise search for substitutes.
pub fn fulfill(graph: &ProductGraph, request: &Request) -> Result<Fulfillment, RecommendError> {
    let requested = graph
        .get_product(&request.product_id)
        .ok_or_else(|| RecommendError::ProductNotFound {
            id: request.product_id.clone(),
        })?;

    if requested.in_stock {
        tracing::debug!(product = request.product_id, "requested product in stock");
        return Ok(Fulfillment::InStock(requested.clone()));
    }

    recommend(graph, request).map(Fulfillment::Substitutes)
}
