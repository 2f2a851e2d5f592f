//! Deterministic candidate scoring with explanation tags.
//!
//! Scoring is additive over independent rules; every rule that fires also
//! leaves a named explanation tag, so a result can always say *why* a
//! substitute was ranked where it was.
//!
//! | Condition                                   | Points | Tag                         |
//! |---------------------------------------------|--------|-----------------------------|
//! | same category as the requested product      | +3     | `same_category`             |
//! | different category, one shared intermediate | +1     | `similar_category`          |
//! | same brand                                  | +1     | `same_brand`                |
//! | different brand                             | +0     | `different_brand`           |
//! | cheaper than the requested product          | +1     | `cheaper_option`            |
//! | passed the required-tags filter             | +0     | `all_required_tags_matched` |

use std::collections::BTreeSet;

use serde::Serialize;

use crate::graph::Product;

/// Named reason code attached to a scored candidate.
///
/// A closed enumeration rather than free-form strings: `same_category` /
/// `similar_category` are mutually exclusive, and exactly one of
/// `same_brand` / `different_brand` always fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Explanation {
    /// Candidate belongs to the requested product's category.
    SameCategory,
    /// Different category, but discovered through one shared intermediate
    /// node (hop distance 2).
    SimilarCategory,
    /// Candidate shares the requested product's brand.
    SameBrand,
    /// Candidate is from another brand. Informational, no points.
    DifferentBrand,
    /// Candidate is cheaper than the requested product.
    CheaperOption,
    /// Confirmation that the candidate carries every required tag.
    AllRequiredTagsMatched,
}

impl std::fmt::Display for Explanation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Explanation::SameCategory => "same_category",
            Explanation::SimilarCategory => "similar_category",
            Explanation::SameBrand => "same_brand",
            Explanation::DifferentBrand => "different_brand",
            Explanation::CheaperOption => "cheaper_option",
            Explanation::AllRequiredTagsMatched => "all_required_tags_matched",
        };
        write!(f, "{name}")
    }
}

/// Score a filtered candidate against the requested product.
///
/// `hops` is the breadth-first distance at which the candidate was
/// discovered. Callers must only pass candidates that already cleared the
/// filter stage; the `all_required_tags_matched` tag is the confirmation of
/// that contract. The brand preference is advisory and contributes neither
/// points nor a tag.
pub fn score(
    candidate: &Product,
    requested: &Product,
    hops: usize,
    preferred_brand: Option<&str>,
) -> (u32, BTreeSet<Explanation>) {
    let mut points = 0u32;
    let mut why = BTreeSet::new();

    if candidate.category == requested.category {
        points += 3;
        why.insert(Explanation::SameCategory);
    } else if hops == 2 {
        // One shared intermediate node between the two products. With a
        // single category per product a shared *category* intermediate would
        // force equal categories, so in practice this is tag-mediated.
        points += 1;
        why.insert(Explanation::SimilarCategory);
    }

    if candidate.brand == requested.brand {
        points += 1;
        why.insert(Explanation::SameBrand);
    } else {
        why.insert(Explanation::DifferentBrand);
    }

    if candidate.price < requested.price {
        points += 1;
        why.insert(Explanation::CheaperOption);
    }

    why.insert(Explanation::AllRequiredTagsMatched);

    if let Some(brand) = preferred_brand {
        tracing::trace!(
            candidate = candidate.id,
            preferred = brand,
            matches = candidate.brand == brand,
            "brand preference is advisory only"
        );
    }

    (points, why)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, category: &str, brand: &str, price: f64) -> Product {
        Product {
            id: id.into(),
            category: category.into(),
            brand: brand.into(),
            price,
            in_stock: true,
            tags: BTreeSet::new(),
        }
    }

    #[test]
    fn same_category_same_brand_cheaper() {
        let requested = product("req", "milk", "Amul", 60.0);
        let candidate = product("cand", "milk", "Amul", 55.0);
        let (points, why) = score(&candidate, &requested, 2, None);
        assert_eq!(points, 5);
        assert!(why.contains(&Explanation::SameCategory));
        assert!(why.contains(&Explanation::SameBrand));
        assert!(why.contains(&Explanation::CheaperOption));
        assert!(why.contains(&Explanation::AllRequiredTagsMatched));
    }

    #[test]
    fn similar_category_at_two_hops() {
        let requested = product("req", "milk", "Amul", 60.0);
        let candidate = product("cand", "plant_milk", "Sofit", 90.0);
        let (points, why) = score(&candidate, &requested, 2, None);
        assert_eq!(points, 1);
        assert!(why.contains(&Explanation::SimilarCategory));
        assert!(why.contains(&Explanation::DifferentBrand));
        assert!(!why.contains(&Explanation::CheaperOption));
    }

    #[test]
    fn distant_different_category_gets_no_category_points() {
        let requested = product("req", "milk", "Amul", 60.0);
        let candidate = product("cand", "snacks", "Lays", 20.0);
        let (points, why) = score(&candidate, &requested, 4, None);
        assert_eq!(points, 1); // cheaper only
        assert!(!why.contains(&Explanation::SameCategory));
        assert!(!why.contains(&Explanation::SimilarCategory));
    }

    #[test]
    fn category_tags_are_mutually_exclusive() {
        let requested = product("req", "milk", "Amul", 60.0);
        for (category, hops) in [("milk", 2), ("milk", 4), ("plant_milk", 2), ("plant_milk", 4)] {
            let candidate = product("cand", category, "X", 100.0);
            let (_, why) = score(&candidate, &requested, hops, None);
            assert!(
                !(why.contains(&Explanation::SameCategory)
                    && why.contains(&Explanation::SimilarCategory))
            );
        }
    }

    #[test]
    fn exactly_one_brand_tag_always_fires() {
        let requested = product("req", "milk", "Amul", 60.0);
        for brand in ["Amul", "MotherDairy"] {
            let candidate = product("cand", "milk", brand, 60.0);
            let (_, why) = score(&candidate, &requested, 2, None);
            let brand_tags = why
                .iter()
                .filter(|t| {
                    matches!(t, Explanation::SameBrand | Explanation::DifferentBrand)
                })
                .count();
            assert_eq!(brand_tags, 1);
        }
    }

    #[test]
    fn equal_price_is_not_cheaper() {
        let requested = product("req", "milk", "Amul", 60.0);
        let candidate = product("cand", "milk", "X", 60.0);
        let (_, why) = score(&candidate, &requested, 2, None);
        assert!(!why.contains(&Explanation::CheaperOption));
    }

    #[test]
    fn preferred_brand_adds_no_points() {
        let requested = product("req", "milk", "Amul", 60.0);
        let candidate = product("cand", "milk", "MotherDairy", 70.0);
        let (without, _) = score(&candidate, &requested, 2, None);
        let (with, _) = score(&candidate, &requested, 2, Some("MotherDairy"));
        assert_eq!(without, with);
    }

    #[test]
    fn explanation_display_is_snake_case() {
        assert_eq!(Explanation::SameCategory.to_string(), "same_category");
        assert_eq!(
            Explanation::AllRequiredTagsMatched.to_string(),
            "all_required_tags_matched"
        );
    }
}
