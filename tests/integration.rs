//! End-to-end tests for the ersatz recommender.
//!
//! These exercise the full pipeline — records through graph build, BFS
//! discovery, filtering, scoring, and ranking — including the reference
//! dairy scenario and the determinism guarantees.

use ersatz::error::RecommendError;
use ersatz::filter::{self, Constraints};
use ersatz::graph::{build, discover, NodeKey, ProductGraph};
use ersatz::record::ProductRecord;
use ersatz::recommend::{fulfill, recommend, Fulfillment, Request};
use ersatz::score::Explanation;

fn dairy_records() -> Vec<ProductRecord> {
    vec![
        ProductRecord::new("amul_milk_1l", "milk", "Amul", 60.0, false)
            .with_tags(["veg", "lactose"]),
        ProductRecord::new("mother_dairy_milk_1l", "milk", "MotherDairy", 55.0, true)
            .with_tags(["veg", "lactose"]),
        ProductRecord::new("sofit_soy_milk", "plant_milk", "Sofit", 90.0, true)
            .with_tags(["veg", "lactose_free", "vegan"]),
        ProductRecord::new("amul_butter_500g", "butter", "Amul", 275.0, true)
            .with_tags(["veg", "lactose"]),
    ]
}

fn dairy_graph() -> ProductGraph {
    build(dairy_records()).graph
}

#[test]
fn dairy_scenario_ranks_the_dairy_substitute_first() {
    let graph = dairy_graph();
    let request = Request::new("amul_milk_1l", 100.0)
        .with_required_tags(["veg"])
        .with_max_hops(2);

    let results = recommend(&graph, &request).unwrap();

    let top = &results[0];
    assert_eq!(top.product.id, "mother_dairy_milk_1l");
    assert!(top.score >= 4); // same_category +3, cheaper_option +1
    for tag in [
        Explanation::SameCategory,
        Explanation::CheaperOption,
        Explanation::DifferentBrand,
        Explanation::AllRequiredTagsMatched,
    ] {
        assert!(top.explanations.contains(&tag), "missing {tag}");
    }
}

#[test]
fn required_tag_hard_filters_substitutes() {
    let graph = dairy_graph();
    let request = Request::new("amul_milk_1l", 100.0).with_required_tags(["lactose"]);
    let results = recommend(&graph, &request).unwrap();

    // The soy milk carries no `lactose` tag and must not appear.
    assert!(results.iter().all(|r| r.product.id != "sofit_soy_milk"));
    assert!(results.iter().any(|r| r.product.id == "mother_dairy_milk_1l"));
}

#[test]
fn unknown_requested_product_fails() {
    let graph = dairy_graph();
    let err = recommend(&graph, &Request::new("no_such_product", 100.0)).unwrap_err();
    assert!(matches!(err, RecommendError::ProductNotFound { .. }));
}

#[test]
fn zero_hops_means_no_candidates() {
    let graph = dairy_graph();
    assert!(discover(&graph, "amul_milk_1l", 0).is_empty());

    let request = Request::new("amul_milk_1l", 100.0).with_max_hops(0);
    assert!(recommend(&graph, &request).unwrap().is_empty());
}

#[test]
fn every_product_node_has_exactly_one_category_link() {
    let graph = dairy_graph();
    for id in graph.product_ids() {
        let around = graph.neighbors(&NodeKey::product(id)).unwrap();
        let categories = around
            .iter()
            .filter(|k| matches!(k, NodeKey::Category(_)))
            .count();
        assert_eq!(categories, 1, "product {id}");
    }
}

#[test]
fn discovery_output_is_distance_ordered_and_idempotent() {
    let graph = dairy_graph();
    let first = discover(&graph, "amul_milk_1l", 4);
    let second = discover(&graph, "amul_milk_1l", 4);

    assert_eq!(first, second);
    assert!(first.windows(2).all(|w| w[0].hops <= w[1].hops));
    assert!(first.iter().all(|c| c.product_id != "amul_milk_1l"));
}

#[test]
fn filter_output_satisfies_every_hard_rule() {
    let graph = dairy_graph();
    let candidates = discover(&graph, "amul_milk_1l", 2);
    let products: Vec<_> = candidates
        .iter()
        .filter_map(|c| graph.get_product(&c.product_id))
        .collect();

    let constraints = Constraints::new(100.0).with_required_tags(["veg"]);
    for survivor in filter::apply(products.into_iter(), &constraints) {
        assert!(survivor.in_stock);
        assert!(survivor.price <= constraints.max_price);
        assert!(constraints
            .required_tags
            .iter()
            .all(|t| survivor.tags.contains(t)));
    }
}

#[test]
fn scores_are_non_negative_and_category_tags_exclusive() {
    let graph = dairy_graph();
    let request = Request::new("amul_milk_1l", 1000.0).with_max_hops(4).with_top_n(10);
    for rec in recommend(&graph, &request).unwrap() {
        // u32 score is non-negative by construction; the exclusivity
        // invariant is the interesting part.
        assert!(
            !(rec.explanations.contains(&Explanation::SameCategory)
                && rec.explanations.contains(&Explanation::SimilarCategory)),
            "{} carries both category tags",
            rec.product.id
        );
        let brand_tags = rec
            .explanations
            .iter()
            .filter(|t| matches!(t, Explanation::SameBrand | Explanation::DifferentBrand))
            .count();
        assert_eq!(brand_tags, 1);
    }
}

#[test]
fn recommend_is_deterministic_across_rebuilds() {
    let request = Request::new("amul_milk_1l", 100.0)
        .with_required_tags(["veg"])
        .with_max_hops(2);

    let first = recommend(&build(dairy_records()).graph, &request).unwrap();
    let second = recommend(&build(dairy_records()).graph, &request).unwrap();

    // Byte-identical ordered output.
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn fulfill_returns_the_product_itself_when_stocked() {
    let graph = dairy_graph();
    match fulfill(&graph, &Request::new("mother_dairy_milk_1l", 100.0)).unwrap() {
        Fulfillment::InStock(product) => assert_eq!(product.id, "mother_dairy_milk_1l"),
        Fulfillment::Substitutes(_) => panic!("product is in stock"),
    }
}

#[test]
fn rejected_records_do_not_poison_the_build() {
    let mut records = dairy_records();
    records.push(ProductRecord::new("broken", "", "X", 10.0, true));
    let report = build(records);

    assert_eq!(report.rejected.len(), 1);
    // The rest of the catalog still answers queries.
    let results = recommend(&report.graph, &Request::new("amul_milk_1l", 100.0)).unwrap();
    assert!(!results.is_empty());
}
