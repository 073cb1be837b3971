//! Candidate riders and pool validation.

use std::collections::HashSet;

use thiserror::Error;

use crate::Category;

/// A rider that may be chosen for the roster.
///
/// Scores and costs are unsigned, so the non-negativity invariant holds by
/// construction.
///
/// # Examples
/// ```
/// use velogames_core::{Candidate, Category};
///
/// let rider = Candidate::new("Tadej Pogačar", "UAE", 2400, 28)
///     .with_category(Category::Leader);
/// assert_eq!(rider.category, Some(Category::Leader));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Rider name; the identity of the candidate within its pool.
    pub name: String,
    /// Team affiliation. Informational only.
    pub team: String,
    /// Predicted points.
    pub score: u32,
    /// Budget consumed when the rider is chosen.
    pub cost: u32,
    /// Category for category-aware game types.
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Option<Category>,
}

impl Candidate {
    /// Construct an uncategorised candidate.
    pub fn new(name: impl Into<String>, team: impl Into<String>, score: u32, cost: u32) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
            score,
            cost,
            category: None,
        }
    }

    /// Attach a category while returning `self` for chaining.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

/// Errors returned by [`validate_pool`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// Two candidates share a name, so results could not be attributed.
    #[error("candidate name '{name}' appears more than once in the pool")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },
}

/// Check that every candidate name is unique.
///
/// # Errors
/// Returns [`PoolError::DuplicateName`] for the first repeated name in pool
/// order.
///
/// # Examples
/// ```
/// use velogames_core::{validate_pool, Candidate};
///
/// let pool = vec![Candidate::new("A", "T1", 10, 5), Candidate::new("A", "T2", 8, 4)];
/// assert!(validate_pool(&pool).is_err());
/// ```
pub fn validate_pool(pool: &[Candidate]) -> Result<(), PoolError> {
    let mut seen = HashSet::with_capacity(pool.len());
    for candidate in pool {
        if !seen.insert(candidate.name.as_str()) {
            return Err(PoolError::DuplicateName {
                name: candidate.name.clone(),
            });
        }
    }
    Ok(())
}
