//! Breadth-first candidate discovery from a requested product.
//!
//! BFS runs over the direction-agnostic adjacency, so it moves
//! product → category → other-product and product → tag → other-product.
//! Two hops therefore means "shares a category or tag with the start".

use std::collections::{HashSet, VecDeque};

use petgraph::graph::NodeIndex;

use super::{NodeKey, ProductGraph};

/// A product discovered by traversal, with its hop distance from the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Discovered product id.
    pub product_id: String,
    /// Shortest breadth-first path length from the requested product.
    pub hops: usize,
}

/// Discover candidate products reachable from `start_product_id`.
///
/// Returns products (never the start itself) ordered by ascending hop
/// distance; ties keep first-discovered-first order. Nodes beyond
/// `max_hops` are not expanded. An absent start product is a normal
/// "no candidates" outcome, not an error.
pub fn discover(graph: &ProductGraph, start_product_id: &str, max_hops: usize) -> Vec<Candidate> {
    let Some(start) = graph.index_of(&NodeKey::product(start_product_id)) else {
        return Vec::new();
    };

    let mut visited: HashSet<NodeIndex> = HashSet::from([start]);
    let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::from([(start, 0)]);
    let mut found = Vec::new();

    while let Some((node, depth)) = queue.pop_front() {
        if depth >= max_hops {
            continue;
        }
        for next in graph.adjacent_indices(node) {
            if visited.insert(next) {
                if let NodeKey::Product(id) = graph.key_at(next) {
                    found.push(Candidate {
                        product_id: id.clone(),
                        hops: depth + 1,
                    });
                }
                queue.push_back((next, depth + 1));
            }
        }
    }

    tracing::debug!(
        start = start_product_id,
        max_hops,
        candidates = found.len(),
        "bfs discovery finished"
    );
    found
}
