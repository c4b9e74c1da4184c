//! Best conversion rate search
//!
//! Dijkstra's algorithm with multiplicative costs: the frontier entry with the
//! largest accumulated rate is expanded first, and a path's cost grows by
//! multiplying in each edge rate. All rates are strictly positive, so once a
//! node has been reached from the best frontier entry no later expansion can
//! reach it more cheaply.
//!
//! The search returns as soon as the target shows up as a neighbour of the
//! node being expanded; the target itself is never popped.

use crate::currency::{CurrencyGraph, CurrencyId};
use crate::fraction::Fraction;
use num_traits::One;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Frontier entry ordered by evaluated rate, then by push order
#[derive(Debug, Clone, Copy)]
struct Candidate {
    rate: Fraction,
    node: CurrencyId,
    seq: u64,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Higher rate first; among equal rates the earlier push wins.
        self.rate
            .evaluate()
            .total_cmp(&other.rate.evaluate())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Best achievable rate for converting one unit of `start` into `end`.
///
/// `start` and `end` must be distinct ids issued by `graph`; callers handle
/// the identity and unknown-name cases themselves. Returns `None` when `end`
/// cannot be reached.
pub fn best_rate(graph: &CurrencyGraph, start: CurrencyId, end: CurrencyId) -> Option<Fraction> {
    debug_assert_ne!(start, end, "identity queries are short-circuited by the caller");

    let mut frontier = BinaryHeap::new();
    let mut visited = HashSet::new();
    let mut seq = 0u64;

    frontier.push(Candidate {
        rate: Fraction::one(),
        node: start,
        seq,
    });
    visited.insert(start);

    while let Some(Candidate { rate, node, .. }) = frontier.pop() {
        let current = graph.currency(node);
        log::trace!("Expanding {} at rate {}", current.name(), rate);

        for conversion in current.conversions() {
            if conversion.target == end {
                let result = rate * conversion.rate;
                log::debug!(
                    "Reached {} via {} with rate {}",
                    graph.currency(end).name(),
                    current.name(),
                    result
                );
                return Some(result);
            }

            if visited.insert(conversion.target) {
                seq += 1;
                frontier.push(Candidate {
                    rate: rate * conversion.rate,
                    node: conversion.target,
                    seq,
                });
            }
        }
    }

    log::debug!(
        "No path from {} to {}",
        graph.currency(start).name(),
        graph.currency(end).name()
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(records: &[(&str, &str, u64)]) -> CurrencyGraph {
        let mut graph = CurrencyGraph::new();
        for (from, to, rate) in records {
            graph.add_conversion(from, to, *rate).unwrap();
        }
        graph
    }

    fn search(graph: &CurrencyGraph, from: &str, to: &str) -> Option<Fraction> {
        best_rate(graph, graph.id_of(from).unwrap(), graph.id_of(to).unwrap())
    }

    #[test]
    fn test_direct_rate_and_inverse() {
        let g = graph(&[("USD", "EUR", 2)]);
        assert_eq!(search(&g, "USD", "EUR"), Some(Fraction::new(2, 1)));
        assert_eq!(search(&g, "EUR", "USD"), Some(Fraction::new(1, 2)));
    }

    #[test]
    fn test_chain_multiplies() {
        let g = graph(&[("USD", "EUR", 2), ("EUR", "GBP", 3)]);
        assert_eq!(search(&g, "USD", "GBP"), Some(Fraction::new(6, 1)));
        assert_eq!(search(&g, "GBP", "USD"), Some(Fraction::new(1, 6)));
    }

    #[test]
    fn test_mixed_direction_chain_is_unreduced() {
        // AUD -> USD is the inverse of USD -> AUD, so the halves never cancel.
        let g = graph(&[("USD", "AUD", 4), ("USD", "CAD", 6)]);
        assert_eq!(search(&g, "AUD", "CAD"), Some(Fraction::new(6, 4)));
    }

    #[test]
    fn test_prefers_larger_product() {
        // USD -> EUR -> GBP = 6, USD -> CHF -> GBP = 2.
        let g = graph(&[
            ("USD", "EUR", 2),
            ("USD", "CHF", 1),
            ("CHF", "GBP", 2),
            ("EUR", "GBP", 3),
        ]);
        assert_eq!(search(&g, "USD", "GBP"), Some(Fraction::new(6, 1)));
    }

    #[test]
    fn test_prefers_larger_product_when_worse_branch_registered_first() {
        // The weaker branch is seen first in edge order but expanded second.
        let g = graph(&[
            ("USD", "CHF", 1),
            ("USD", "EUR", 5),
            ("CHF", "GBP", 3),
            ("EUR", "GBP", 2),
        ]);
        assert_eq!(search(&g, "USD", "GBP"), Some(Fraction::new(10, 1)));
    }

    #[test]
    fn test_returns_when_target_first_seen_as_neighbour() {
        // X is expanded first and already reaches T; the 100x route via Y is never tried.
        let g = graph(&[("S", "X", 2), ("X", "T", 1), ("S", "Y", 1), ("Y", "T", 100)]);
        assert_eq!(search(&g, "S", "T"), Some(Fraction::new(2, 1)));
    }

    #[test]
    fn test_direct_neighbour_of_start_returns_immediately() {
        let g = graph(&[("S", "T", 1), ("S", "Z", 5), ("Z", "T", 5)]);
        assert_eq!(search(&g, "S", "T"), Some(Fraction::new(1, 1)));
    }

    #[test]
    fn test_unreachable() {
        let g = graph(&[("USD", "EUR", 2), ("JPY", "KRW", 9)]);
        assert_eq!(search(&g, "USD", "KRW"), None);
        assert_eq!(search(&g, "KRW", "EUR"), None);
    }

    #[test]
    fn test_long_chain() {
        let g = graph(&[("A", "B", 2), ("B", "C", 3), ("C", "D", 5), ("D", "E", 7)]);
        assert_eq!(search(&g, "A", "E"), Some(Fraction::new(210, 1)));
        assert_eq!(search(&g, "E", "A"), Some(Fraction::new(1, 210)));
    }

    #[test]
    fn test_candidate_ordering() {
        let a = Candidate {
            rate: Fraction::from(3),
            node: CurrencyId(0),
            seq: 5,
        };
        let b = Candidate {
            rate: Fraction::new(6, 2),
            node: CurrencyId(1),
            seq: 2,
        };
        let c = Candidate {
            rate: Fraction::from(4),
            node: CurrencyId(2),
            seq: 9,
        };

        let mut heap: BinaryHeap<Candidate> = vec![a, b, c].into_iter().collect();
        assert_eq!(heap.pop().map(|x| x.node), Some(CurrencyId(2)));
        assert_eq!(heap.pop().map(|x| x.node), Some(CurrencyId(1)));
        assert_eq!(heap.pop().map(|x| x.node), Some(CurrencyId(0)));
    }
}
