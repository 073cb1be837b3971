//! Declarative description of a game variant.
//!
//! A [`GameRules`] value is built once from configuration and validated
//! before any optimisation runs, so solvers never see quotas that could not
//! fit inside the roster.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::Category;

/// Roster size, budget and category quotas for one game variant.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use velogames_core::{Category, GameRules};
///
/// # fn main() -> Result<(), velogames_core::GameRulesError> {
/// let quotas = BTreeMap::from([(Category::Leader, 2), (Category::Sprinter, 1)]);
/// let rules = GameRules::new(9, 100, quotas)?;
/// assert_eq!(rules.quota_total(), 3);
/// assert_eq!(rules.surplus(), 6);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameRules {
    roster_size: u32,
    budget: u32,
    category_quotas: BTreeMap<Category, u32>,
}

/// Errors returned by [`GameRules::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameRulesError {
    /// A roster must contain at least one rider.
    #[error("roster size must be positive")]
    EmptyRoster,
    /// The quota minimums cannot all fit in the roster.
    #[error("category quotas require {quota_total} riders but the roster holds {roster_size}")]
    QuotasExceedRosterSize {
        /// Sum of all quota minimums.
        quota_total: u64,
        /// Configured roster size.
        roster_size: u32,
    },
}

impl GameRules {
    /// Validate and construct a rule set.
    ///
    /// Quota entries with a zero minimum carry no constraint and are dropped.
    ///
    /// # Errors
    /// Returns [`GameRulesError::EmptyRoster`] for a zero roster size and
    /// [`GameRulesError::QuotasExceedRosterSize`] when the quota minimums sum
    /// to more than the roster size.
    pub fn new(
        roster_size: u32,
        budget: u32,
        category_quotas: BTreeMap<Category, u32>,
    ) -> Result<Self, GameRulesError> {
        if roster_size == 0 {
            return Err(GameRulesError::EmptyRoster);
        }
        let quotas: BTreeMap<Category, u32> = category_quotas
            .into_iter()
            .filter(|&(_, min_count)| min_count > 0)
            .collect();
        let quota_total: u64 = quotas.values().copied().map(u64::from).sum();
        if quota_total > u64::from(roster_size) {
            return Err(GameRulesError::QuotasExceedRosterSize {
                quota_total,
                roster_size,
            });
        }
        Ok(Self {
            roster_size,
            budget,
            category_quotas: quotas,
        })
    }

    /// Construct rules without category quotas.
    ///
    /// # Errors
    /// Returns [`GameRulesError::EmptyRoster`] for a zero roster size.
    pub fn without_quotas(roster_size: u32, budget: u32) -> Result<Self, GameRulesError> {
        Self::new(roster_size, budget, BTreeMap::new())
    }

    /// Exact number of riders to choose.
    #[must_use]
    pub const fn roster_size(&self) -> u32 {
        self.roster_size
    }

    /// Maximum total cost of the roster.
    #[must_use]
    pub const fn budget(&self) -> u32 {
        self.budget
    }

    /// Minimum chosen count per category, in slot order.
    #[must_use]
    pub const fn category_quotas(&self) -> &BTreeMap<Category, u32> {
        &self.category_quotas
    }

    /// Whether the game classifies riders into categories.
    #[must_use]
    pub fn uses_categories(&self) -> bool {
        !self.category_quotas.is_empty()
    }

    /// Sum of all quota minimums.
    #[must_use]
    pub fn quota_total(&self) -> u32 {
        // Bounded by `roster_size` at construction.
        self.category_quotas.values().sum()
    }

    /// Number of roster places not claimed by any quota minimum.
    #[must_use]
    pub fn surplus(&self) -> u32 {
        self.roster_size.saturating_sub(self.quota_total())
    }
}
