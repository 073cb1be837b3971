//! Test-only helpers shared by unit, behaviour and property tests.
//!
//! Gated behind the `test-support` feature (and `cfg(test)`).

use crate::{Candidate, Category, Constraint};

/// Construct an uncategorised rider on a placeholder team.
///
/// # Examples
/// ```rust
/// use velogames_core::test_support::rider;
///
/// let r = rider("A", 100, 10);
/// assert_eq!(r.score, 100);
/// assert!(r.category.is_none());
/// ```
#[must_use]
pub fn rider(name: &str, score: u32, cost: u32) -> Candidate {
    Candidate::new(name, "Test Team", score, cost)
}

/// Construct a categorised rider on a placeholder team.
#[must_use]
pub fn classed_rider(name: &str, category: Category, score: u32, cost: u32) -> Candidate {
    rider(name, score, cost).with_category(category)
}

/// Exhaustively find the best feasible selection.
///
/// Returns the optimal score and the chosen indices, preferring the
/// lexicographically smallest ascending index list among equal scores.
/// Enumerates every subset, so keep pools below about 20 candidates.
#[must_use]
pub fn brute_force(pool: &[Candidate], constraints: &[Constraint]) -> Option<(u64, Vec<usize>)> {
    let mut best: Option<(u64, Vec<usize>)> = None;
    let count = pool.len();
    for mask in 0_u64..(1_u64 << count) {
        let chosen: Vec<usize> = (0..count).filter(|&i| mask & (1_u64 << i) != 0).collect();
        if !constraints.iter().all(|c| c.is_satisfied_by(pool, &chosen)) {
            continue;
        }
        let score: u64 = chosen
            .iter()
            .filter_map(|&i| pool.get(i))
            .map(|c| u64::from(c.score))
            .sum();
        let improves = best.as_ref().is_none_or(|(best_score, best_chosen)| {
            score > *best_score || (score == *best_score && chosen < *best_chosen)
        });
        if improves {
            best = Some((score, chosen));
        }
    }
    best
}
