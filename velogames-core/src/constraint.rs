//! Linear constraints over the per-candidate "chosen" indicator.
//!
//! [`build_constraints`] turns a [`GameRules`] value into the constraint set
//! an [`Optimizer`](crate::Optimizer) must satisfy.

use thiserror::Error;

use crate::{Candidate, Category, GameRules};

/// A single linear constraint over the chosen candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Constraint {
    /// Exactly this many candidates are chosen.
    CardinalityEquals(u32),
    /// Total cost of the chosen candidates is at most this value.
    BudgetAtMost(u32),
    /// At least `min_count` chosen candidates belong to `category`.
    CategoryAtLeast {
        /// Category being counted.
        category: Category,
        /// Minimum chosen count.
        min_count: u32,
    },
}

impl Constraint {
    /// Evaluate the constraint against concrete chosen pool indices.
    ///
    /// Indices outside the pool contribute nothing to cost or category
    /// counts but still count towards cardinality.
    ///
    /// # Examples
    /// ```
    /// use velogames_core::{Candidate, Constraint};
    ///
    /// let pool = vec![Candidate::new("A", "T", 10, 60), Candidate::new("B", "T", 5, 50)];
    /// assert!(Constraint::BudgetAtMost(100).is_satisfied_by(&pool, &[0]));
    /// assert!(!Constraint::BudgetAtMost(100).is_satisfied_by(&pool, &[0, 1]));
    /// ```
    #[must_use]
    pub fn is_satisfied_by(&self, pool: &[Candidate], chosen: &[usize]) -> bool {
        let picked = || chosen.iter().filter_map(|&index| pool.get(index));
        match *self {
            Self::CardinalityEquals(size) => {
                u64::try_from(chosen.len()).is_ok_and(|len| len == u64::from(size))
            }
            Self::BudgetAtMost(budget) => {
                picked().map(|c| u64::from(c.cost)).sum::<u64>() <= u64::from(budget)
            }
            Self::CategoryAtLeast {
                category,
                min_count,
            } => {
                let count = picked()
                    .filter(|c| c.category == Some(category))
                    .count();
                u64::try_from(count).is_ok_and(|found| found >= u64::from(min_count))
            }
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CardinalityEquals(size) => write!(f, "choose exactly {size}"),
            Self::BudgetAtMost(budget) => write!(f, "total cost at most {budget}"),
            Self::CategoryAtLeast {
                category,
                min_count,
            } => write!(f, "at least {min_count} {category}"),
        }
    }
}

/// Errors returned by [`build_constraints`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The pool is smaller than the roster.
    #[error("pool holds {available} candidates but the roster needs {required}")]
    InsufficientCandidates {
        /// Candidates in the pool.
        available: usize,
        /// Configured roster size.
        required: u32,
    },
}

/// Translate game rules into the ordered constraint list.
///
/// The list starts with the cardinality and budget constraints, followed by
/// one quota constraint per category in slot order. A quota that no
/// candidate can meet is not detected here; the optimizer reports it as
/// infeasible.
///
/// # Errors
/// Returns [`BuildError::InsufficientCandidates`] when the pool holds fewer
/// candidates than the roster size.
///
/// # Examples
/// ```
/// use velogames_core::{build_constraints, Candidate, Constraint, GameRules};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pool: Vec<_> = (0..6).map(|i| Candidate::new(format!("R{i}"), "T", 10, 10)).collect();
/// let rules = GameRules::without_quotas(6, 100)?;
/// let constraints = build_constraints(&pool, &rules)?;
/// assert_eq!(
///     constraints,
///     vec![Constraint::CardinalityEquals(6), Constraint::BudgetAtMost(100)]
/// );
/// # Ok(())
/// # }
/// ```
pub fn build_constraints(
    pool: &[Candidate],
    rules: &GameRules,
) -> Result<Vec<Constraint>, BuildError> {
    let required = rules.roster_size();
    if u64::try_from(pool.len()).is_ok_and(|available| available < u64::from(required)) {
        return Err(BuildError::InsufficientCandidates {
            available: pool.len(),
            required,
        });
    }

    let mut constraints = Vec::with_capacity(2 + rules.category_quotas().len());
    constraints.push(Constraint::CardinalityEquals(required));
    constraints.push(Constraint::BudgetAtMost(rules.budget()));
    constraints.extend(
        rules
            .category_quotas()
            .iter()
            .map(|(&category, &min_count)| Constraint::CategoryAtLeast {
                category,
                min_count,
            }),
    );
    log::debug!(
        "built {} constraints for {} candidates",
        constraints.len(),
        pool.len()
    );
    Ok(constraints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::BTreeMap;

    fn pool(size: usize) -> Vec<Candidate> {
        (0..size)
            .map(|i| Candidate::new(format!("R{i}"), "Team", 10, 10))
            .collect()
    }

    #[rstest]
    fn small_pool_is_rejected() {
        let rules = GameRules::without_quotas(9, 100).expect("rules should validate");
        let err = build_constraints(&pool(8), &rules).expect_err("expected failure");
        assert_eq!(
            err,
            BuildError::InsufficientCandidates {
                available: 8,
                required: 9,
            }
        );
    }

    #[rstest]
    fn quota_constraints_follow_slot_order() {
        let quotas = BTreeMap::from([
            (Category::Unclassed, 3),
            (Category::Leader, 2),
            (Category::Sprinter, 1),
            (Category::Climber, 2),
        ]);
        let rules = GameRules::new(9, 100, quotas).expect("rules should validate");
        let constraints = build_constraints(&pool(9), &rules).expect("constraints should build");
        assert_eq!(
            constraints,
            vec![
                Constraint::CardinalityEquals(9),
                Constraint::BudgetAtMost(100),
                Constraint::CategoryAtLeast {
                    category: Category::Leader,
                    min_count: 2,
                },
                Constraint::CategoryAtLeast {
                    category: Category::Climber,
                    min_count: 2,
                },
                Constraint::CategoryAtLeast {
                    category: Category::Sprinter,
                    min_count: 1,
                },
                Constraint::CategoryAtLeast {
                    category: Category::Unclassed,
                    min_count: 3,
                },
            ]
        );
    }

    #[rstest]
    #[case(&[0, 1], true)]
    #[case(&[0], false)]
    #[case(&[0, 1, 2], false)]
    fn cardinality_counts_chosen(#[case] chosen: &[usize], #[case] expected: bool) {
        let constraint = Constraint::CardinalityEquals(2);
        assert_eq!(constraint.is_satisfied_by(&pool(3), chosen), expected);
    }

    #[rstest]
    fn category_quota_counts_matching_riders() {
        let riders = vec![
            Candidate::new("A", "T", 1, 1).with_category(Category::Climber),
            Candidate::new("B", "T", 1, 1).with_category(Category::Sprinter),
            Candidate::new("C", "T", 1, 1).with_category(Category::Climber),
        ];
        let constraint = Constraint::CategoryAtLeast {
            category: Category::Climber,
            min_count: 2,
        };
        assert!(constraint.is_satisfied_by(&riders, &[0, 2]));
        assert!(!constraint.is_satisfied_by(&riders, &[0, 1]));
    }

    #[rstest]
    fn display_describes_constraint() {
        let constraint = Constraint::CategoryAtLeast {
            category: Category::Sprinter,
            min_count: 1,
        };
        assert_eq!(constraint.to_string(), "at least 1 sprinter");
    }
}
