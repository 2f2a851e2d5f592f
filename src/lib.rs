//! # ersatz
//!
//! Rule-based substitute product recommender over a small typed knowledge
//! graph. When a requested product is out of stock, ersatz finds in-stock
//! alternatives by graph proximity instead of a learned model, so every
//! result comes with a human-readable explanation of why it was suggested.
//!
//! ## Architecture
//!
//! - **Graph** (`graph`): products, categories, and tags as typed nodes with
//!   IS_A / HAS_TAG relations, built once per dataset load and read-only after
//! - **Traversal** (`graph::traverse`): bounded BFS over direction-agnostic
//!   adjacency, yielding hop-distance-ordered candidates
//! - **Filter** (`filter`): hard eligibility rules (stock, price ceiling,
//!   required tags)
//! - **Scoring** (`score`): additive rule scores with a closed set of
//!   explanation tags
//! - **Recommender** (`recommend`): orchestration and ranking
//!
//! ## Library usage
//!
//! ```
//! use ersatz::graph::build;
//! use ersatz::record::ProductRecord;
//! use ersatz::recommend::{recommend, Request};
//!
//! let report = build(vec![
//!     ProductRecord::new("amul_milk_1l", "milk", "Amul", 60.0, false)
//!         .with_tags(["veg", "lactose"]),
//!     ProductRecord::new("mother_dairy_milk_1l", "milk", "MotherDairy", 55.0, true)
//!         .with_tags(["veg", "lactose"]),
//! ]);
//! let request = Request::new("amul_milk_1l", 100.0).with_required_tags(["veg"]);
//! let results = recommend(&report.graph, &request).unwrap();
//! assert_eq!(results[0].product.id, "mother_dairy_milk_1l");
//! ```

pub mod error;
pub mod filter;
pub mod graph;
pub mod record;
pub mod recommend;
pub mod score;
