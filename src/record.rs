//! Product record input type.
//!
//! A [`ProductRecord`] is the already-parsed tabular row handed to the graph
//! builder. Tag tokens arrive pre-split: delimiter handling belongs to the
//! caller (e.g. the CLI splits a raw `"veg;lactose"` field), not to the core.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// One product row from the source dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
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
    /// Already-split tag tokens, possibly empty.
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl ProductRecord {
    /// Create a record with no tags.
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        brand: impl Into<String>,
        price: f64,
        in_stock: bool,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            brand: brand.into(),
            price,
            in_stock,
            tags: BTreeSet::new(),
        }
    }

    /// Attach tag tokens.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Check the record against the builder's admission rules.
    ///
    /// Required string fields must be non-empty and the price must be a
    /// finite, non-negative number.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.id.is_empty() {
            return Err(RecordError::EmptyId);
        }
        if self.category.is_empty() {
            return Err(RecordError::EmptyCategory {
                id: self.id.clone(),
            });
        }
        if self.brand.is_empty() {
            return Err(RecordError::EmptyBrand {
                id: self.id.clone(),
            });
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(RecordError::InvalidPrice {
                id: self.id.clone(),
                price: self.price,
            });
        }
        Ok(())
    }
}
