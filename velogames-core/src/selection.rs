//! Optimizer output.

use std::time::Duration;

use crate::Candidate;

/// The chosen subset of a pool with its totals.
///
/// # Examples
/// ```
/// use velogames_core::{Candidate, Selection};
///
/// let pool = vec![
///     Candidate::new("A", "T", 10, 4),
///     Candidate::new("B", "T", 7, 3),
///     Candidate::new("C", "T", 2, 1),
/// ];
/// let selection = Selection::from_indices(&pool, &[2, 0]);
/// assert_eq!(selection.chosen, vec!["A".to_owned(), "C".to_owned()]);
/// assert_eq!(selection.total_score, 12);
/// assert_eq!(selection.total_cost, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    /// Names of the chosen candidates in pool order.
    pub chosen: Vec<String>,
    /// Sum of the chosen scores.
    pub total_score: u64,
    /// Sum of the chosen costs.
    pub total_cost: u64,
}

impl Selection {
    /// Build a selection from chosen pool indices.
    ///
    /// Indices are reported in pool order regardless of input order;
    /// duplicates and out-of-range indices are ignored.
    #[must_use]
    pub fn from_indices(pool: &[Candidate], indices: &[usize]) -> Self {
        let mut ordered = indices.to_vec();
        ordered.sort_unstable();
        ordered.dedup();
        let picked: Vec<&Candidate> = ordered.iter().filter_map(|&i| pool.get(i)).collect();
        Self {
            chosen: picked.iter().map(|c| c.name.clone()).collect(),
            total_score: picked.iter().map(|c| u64::from(c.score)).sum(),
            total_cost: picked.iter().map(|c| u64::from(c.cost)).sum(),
        }
    }

    /// Number of chosen candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chosen.len()
    }

    /// Whether nothing was chosen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    /// Whether the named candidate was chosen.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.chosen.iter().any(|chosen| chosen == name)
    }
}

/// Search statistics reported alongside a selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent optimising.
    pub solve_time: Duration,
    /// Search nodes visited before optimality was proven.
    pub nodes_explored: u64,
}

/// Response from a successful optimisation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizeResponse {
    /// The optimal selection.
    pub selection: Selection,
    /// Search statistics.
    pub diagnostics: Diagnostics,
}
