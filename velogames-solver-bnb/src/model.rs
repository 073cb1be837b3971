//! Compile a constraint list into the integer model searched by
//! [`crate::search`].
//!
//! Candidates are re-ordered by reduced profit `q·score − p·cost` for a
//! Lagrangian multiplier `p/q` on the budget. With that order the best `r`
//! remaining reduced profits are a contiguous run, so the search bound is a
//! prefix-sum lookup.

use std::cmp::Ordering;

use velogames_core::{Candidate, Category, Constraint, OptimizeError};

const CATEGORY_COUNT: usize = Category::ALL.len();

/// Per-category counters indexed by [`Category::index`].
pub(crate) type CategoryCounts = [u32; CATEGORY_COUNT];

/// One candidate in search order.
#[derive(Debug, Clone)]
pub(crate) struct Item {
    /// Position in the caller's pool.
    pub(crate) index: usize,
    pub(crate) score: u64,
    pub(crate) cost: u64,
    pub(crate) category: Option<usize>,
}

/// Budget multiplier `numerator / denominator`, always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Multiplier {
    pub(crate) numerator: u64,
    pub(crate) denominator: u64,
}

impl Multiplier {
    const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    /// `denominator·score − numerator·cost`.
    fn reduced_profit(self, score: u64, cost: u64) -> i128 {
        i128::from(self.denominator) * i128::from(score)
            - i128::from(self.numerator) * i128::from(cost)
    }
}

/// The compiled optimisation problem.
#[derive(Debug, Clone)]
pub(crate) struct Model {
    /// Candidates in descending reduced profit, ties by pool index.
    pub(crate) items: Vec<Item>,
    /// Exact number of candidates to choose, if constrained.
    pub(crate) picks: Option<u32>,
    /// Tightest budget, if constrained.
    pub(crate) budget: Option<u64>,
    /// Largest minimum per category.
    pub(crate) quotas: CategoryCounts,
    pub(crate) multiplier: Multiplier,
    /// `prefix_profit[j]` sums the positive reduced profits of `items[..j]`.
    pub(crate) prefix_profit: Vec<i128>,
    /// `suffix_counts[j]` counts each category in `items[j..]`.
    pub(crate) suffix_counts: Vec<CategoryCounts>,
    /// `suffix_min_cost[j]` is the cheapest cost in `items[j..]`.
    pub(crate) suffix_min_cost: Vec<u64>,
    /// `suffix_max_score[j]` is the highest score in `items[j..]`.
    pub(crate) suffix_max_score: Vec<u64>,
}

impl Model {
    /// Compile constraints over `pool`.
    ///
    /// Returns [`OptimizeError::Infeasible`] for constraint sets that no
    /// selection can meet regardless of the candidates' scores: differing
    /// cardinalities, more picks than candidates, or quotas that exceed the
    /// pick count.
    pub(crate) fn compile(
        pool: &[Candidate],
        constraints: &[Constraint],
    ) -> Result<Self, OptimizeError> {
        let mut picks: Option<u32> = None;
        let mut budget: Option<u64> = None;
        let mut quotas: CategoryCounts = [0; CATEGORY_COUNT];

        for constraint in constraints {
            match *constraint {
                Constraint::CardinalityEquals(size) => match picks {
                    Some(existing) if existing != size => {
                        log::debug!("contradictory cardinalities {existing} and {size}");
                        return Err(OptimizeError::Infeasible);
                    }
                    _ => picks = Some(size),
                },
                Constraint::BudgetAtMost(limit) => {
                    let limit = u64::from(limit);
                    budget = Some(budget.map_or(limit, |current| current.min(limit)));
                }
                Constraint::CategoryAtLeast {
                    category,
                    min_count,
                } => {
                    if let Some(slot) = quotas.get_mut(category.index()) {
                        *slot = (*slot).max(min_count);
                    }
                }
            }
        }

        if let Some(size) = picks {
            let fits = usize::try_from(size).is_ok_and(|count| count <= pool.len());
            let quota_total: u64 = quotas.iter().copied().map(u64::from).sum();
            if !fits || quota_total > u64::from(size) {
                log::debug!("cardinality {size} cannot be met by the pool or quotas");
                return Err(OptimizeError::Infeasible);
            }
        }

        let items: Vec<Item> = pool
            .iter()
            .enumerate()
            .map(|(index, candidate)| Item {
                index,
                score: u64::from(candidate.score),
                cost: u64::from(candidate.cost),
                category: candidate.category.map(Category::index),
            })
            .collect();

        let multiplier = budget.map_or(Multiplier::ZERO, |limit| {
            choose_multiplier(&items, limit, pick_limit(picks, items.len()))
        });
        log::debug!(
            "compiled {} candidates: picks {picks:?}, budget {budget:?}, quotas {quotas:?}, multiplier {}/{}",
            items.len(),
            multiplier.numerator,
            multiplier.denominator
        );
        Ok(Self::with_multiplier(items, picks, budget, quotas, multiplier))
    }

    fn with_multiplier(
        mut items: Vec<Item>,
        picks: Option<u32>,
        budget: Option<u64>,
        quotas: CategoryCounts,
        multiplier: Multiplier,
    ) -> Self {
        items.sort_by(|lhs, rhs| {
            multiplier
                .reduced_profit(rhs.score, rhs.cost)
                .cmp(&multiplier.reduced_profit(lhs.score, lhs.cost))
                .then_with(|| lhs.index.cmp(&rhs.index))
        });

        let mut prefix_profit = Vec::with_capacity(items.len() + 1);
        let mut running = 0_i128;
        prefix_profit.push(running);
        for item in &items {
            running += multiplier.reduced_profit(item.score, item.cost).max(0);
            prefix_profit.push(running);
        }

        let mut suffix_counts = vec![[0; CATEGORY_COUNT]; items.len() + 1];
        let mut suffix_min_cost = vec![u64::MAX; items.len() + 1];
        let mut suffix_max_score = vec![0; items.len() + 1];
        for (position, item) in items.iter().enumerate().rev() {
            let mut counts = suffix_counts.get(position + 1).copied().unwrap_or_default();
            if let Some(count) = item.category.and_then(|k| counts.get_mut(k)) {
                *count += 1;
            }
            let tail_min = suffix_min_cost.get(position + 1).copied().unwrap_or(u64::MAX);
            if let Some(slot) = suffix_counts.get_mut(position) {
                *slot = counts;
            }
            if let Some(slot) = suffix_min_cost.get_mut(position) {
                *slot = tail_min.min(item.cost);
            }
            let tail_max = suffix_max_score.get(position + 1).copied().unwrap_or_default();
            if let Some(slot) = suffix_max_score.get_mut(position) {
                *slot = tail_max.max(item.score);
            }
        }

        Self {
            items,
            picks,
            budget,
            quotas,
            multiplier,
            prefix_profit,
            suffix_counts,
            suffix_min_cost,
            suffix_max_score,
        }
    }

    /// Model for completing `forced` with candidates from `rest` only.
    ///
    /// Pick count, budget and quotas are reduced by what `forced` already
    /// uses, and the multiplier is kept so no ratio scan is repeated. Returns
    /// `None` with the forced score when `forced` alone breaks a constraint.
    pub(crate) fn restricted(&self, forced: &[&Item], rest: &[&Item]) -> Option<(Self, u64)> {
        let forced_score: u64 = forced.iter().map(|item| item.score).sum();
        let forced_cost: u64 = forced.iter().map(|item| item.cost).sum();
        let picks = match self.picks {
            Some(size) => Some(
                u32::try_from(forced.len())
                    .ok()
                    .and_then(|taken| size.checked_sub(taken))?,
            ),
            None => None,
        };
        if picks.is_some_and(|left| usize::try_from(left).is_ok_and(|left| left > rest.len())) {
            return None;
        }
        let budget = match self.budget {
            Some(limit) => Some(limit.checked_sub(forced_cost)?),
            None => None,
        };
        let mut quotas = self.quotas;
        for item in forced {
            if let Some(quota) = item.category.and_then(|k| quotas.get_mut(k)) {
                *quota = quota.saturating_sub(1);
            }
        }
        let items = rest.iter().map(|&item| item.clone()).collect();
        let model = Self::with_multiplier(items, picks, budget, quotas, self.multiplier);
        Some((model, forced_score))
    }

    /// Whether exactly `chosen` is a feasible selection scoring `score`.
    pub(crate) fn completes(&self, chosen: &[&Item], score: u64) -> bool {
        let total: u64 = chosen.iter().map(|item| item.score).sum();
        let cost: u64 = chosen.iter().map(|item| item.cost).sum();
        let mut counts = CategoryCounts::default();
        for item in chosen {
            if let Some(count) = item.category.and_then(|k| counts.get_mut(k)) {
                *count += 1;
            }
        }
        let size_fits = self
            .picks
            .is_none_or(|size| u32::try_from(chosen.len()).is_ok_and(|len| len == size));
        total == score
            && size_fits
            && self.budget.is_none_or(|limit| cost <= limit)
            && counts.iter().zip(self.quotas.iter()).all(|(have, need)| have >= need)
    }

    /// Upper bound on the score obtainable from `items[position..]`.
    ///
    /// The smaller of the Lagrangian budget bound and `remaining_picks` times
    /// the best remaining score. The second term stays tight when every
    /// reduced profit is zero. `remaining_budget` is ignored when the model
    /// has no budget.
    pub(crate) fn completion_bound(
        &self,
        position: usize,
        remaining_picks: usize,
        remaining_budget: u64,
    ) -> u64 {
        let end = position.saturating_add(remaining_picks).min(self.items.len());
        let top = self.prefix_profit.get(end).copied().unwrap_or_default()
            - self.prefix_profit.get(position).copied().unwrap_or_default();
        let budget_term = if self.budget.is_some() {
            i128::from(self.multiplier.numerator) * i128::from(remaining_budget)
        } else {
            0
        };
        let scaled = budget_term + top;
        let denominator = i128::from(self.multiplier.denominator);
        let relaxed = u64::try_from(scaled.div_euclid(denominator)).unwrap_or(u64::MAX);
        let best_score = self
            .suffix_max_score
            .get(position)
            .copied()
            .unwrap_or_default();
        let capped = u64::try_from(end.saturating_sub(position))
            .unwrap_or(u64::MAX)
            .saturating_mul(best_score);
        relaxed.min(capped)
    }
}

fn pick_limit(picks: Option<u32>, available: usize) -> usize {
    picks
        .and_then(|size| usize::try_from(size).ok())
        .map_or(available, |size| size.min(available))
}

/// Root relaxation value `p·B + Σ top-r positive reduced profits`, scaled by
/// the multiplier denominator.
fn scaled_root_bound(items: &[Item], budget: u64, picks: usize, multiplier: Multiplier) -> i128 {
    let mut profits: Vec<i128> = items
        .iter()
        .map(|item| multiplier.reduced_profit(item.score, item.cost))
        .filter(|&profit| profit > 0)
        .collect();
    profits.sort_unstable_by(|lhs, rhs| rhs.cmp(lhs));
    let top: i128 = profits.into_iter().take(picks).sum();
    i128::from(multiplier.numerator) * i128::from(budget) + top
}

/// Pick the multiplier giving the tightest root bound.
///
/// Candidates are zero and every score-to-cost ratio in the pool; the bound
/// is valid for any of them, so the choice only affects pruning strength.
fn choose_multiplier(items: &[Item], budget: u64, picks: usize) -> Multiplier {
    let candidates = std::iter::once(Multiplier::ZERO).chain(
        items
            .iter()
            .filter(|item| item.cost > 0)
            .map(|item| Multiplier {
                numerator: item.score,
                denominator: item.cost,
            }),
    );

    let mut best = Multiplier::ZERO;
    let mut best_bound = scaled_root_bound(items, budget, picks, best);
    for candidate in candidates.skip(1) {
        let bound = scaled_root_bound(items, budget, picks, candidate);
        // Compare bound/denominator values exactly by cross-multiplying.
        let ordering = (bound * i128::from(best.denominator))
            .cmp(&(best_bound * i128::from(candidate.denominator)));
        if ordering == Ordering::Less {
            best = candidate;
            best_bound = bound;
        }
    }
    best
}
