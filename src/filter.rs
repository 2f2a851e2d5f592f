//! Hard eligibility rules for substitute candidates.
//!
//! A candidate must be in stock, within the price ceiling, and carry every
//! required tag. Brand preference is deliberately NOT a hard rule here: it
//! only informs scoring, so a shopper with a preference still sees
//! alternatives from other brands.

use std::collections::BTreeSet;

use crate::graph::Product;

/// Caller-supplied constraints for a recommendation request.
#[derive(Debug, Clone)]
pub struct Constraints {
    /// Price ceiling, inclusive.
    pub max_price: f64,
    /// Tags every candidate must carry. Empty means no tag requirement.
    pub required_tags: BTreeSet<String>,
    /// Advisory brand preference; never filters a candidate out.
    pub preferred_brand: Option<String>,
}

impl Constraints {
    /// Constraints with only a price ceiling.
    pub fn new(max_price: f64) -> Self {
        Self {
            max_price,
            required_tags: BTreeSet::new(),
            preferred_brand: None,
        }
    }

    /// Require every candidate to carry these tags.
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
}

/// Check a single candidate against the hard rules.
pub fn eligible(candidate: &Product, constraints: &Constraints) -> bool {
    candidate.in_stock
        && candidate.price <= constraints.max_price
        && constraints
            .required_tags
            .iter()
            .all(|tag| candidate.tags.contains(tag))
}

/// Keep the candidates that pass every hard rule, preserving input order.
///
/// An empty result is a normal outcome.
pub fn apply<'a, I>(candidates: I, constraints: &Constraints) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    candidates
        .into_iter()
        .filter(|candidate| eligible(candidate, constraints))
        .collect()
}
