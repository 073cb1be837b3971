//! Depth-first branch and bound over a compiled [`Model`].
//!
//! A first pass proves the optimal score, pruning every node whose bound
//! cannot beat the incumbent. A second pass walks the pool in index order
//! and keeps each candidate that still admits a completion at that score,
//! which yields the lexicographically smallest optimal index list without
//! re-enumerating tied selections.

use std::time::{Duration, Instant};

use velogames_core::OptimizeError;

use crate::model::{CategoryCounts, Item, Model};

/// Nodes between wall-clock checks.
const CLOCK_INTERVAL_MASK: u64 = 1023;

/// Search limits applied while exploring the tree.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Limits {
    pub(crate) time: Option<Duration>,
    pub(crate) nodes: Option<u64>,
}

/// The optimal selection as pool indices, plus search statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub(crate) indices: Vec<usize>,
    pub(crate) score: u64,
    pub(crate) nodes: u64,
}

/// Node and clock accounting shared by every pass.
#[derive(Debug)]
struct Meter {
    limits: Limits,
    started_at: Instant,
    nodes: u64,
}

impl Meter {
    fn start(limits: Limits) -> Self {
        Self {
            limits,
            started_at: Instant::now(),
            nodes: 0,
        }
    }

    fn tick(&mut self) -> Result<(), OptimizeError> {
        self.nodes += 1;
        if let Some(limit) = self.limits.nodes
            && self.nodes > limit
        {
            return Err(OptimizeError::NodeLimitExceeded { limit });
        }
        if let Some(limit) = self.limits.time
            && self.nodes & CLOCK_INTERVAL_MASK == 0
            && self.started_at.elapsed() > limit
        {
            return Err(OptimizeError::TimeLimitExceeded { limit });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Goal {
    /// Find the highest score.
    Optimise,
    /// Stop at the first selection scoring at least this much.
    Reach(u64),
}

#[derive(Debug, Clone)]
struct Incumbent {
    score: u64,
    /// Ascending pool indices.
    indices: Vec<usize>,
}

/// Partial assignment for one tree node.
#[derive(Debug, Clone, Copy)]
struct Node {
    position: usize,
    score: u64,
    cost: u64,
    counts: CategoryCounts,
}

struct Search<'a> {
    model: &'a Model,
    meter: &'a mut Meter,
    goal: Goal,
    /// Positions in `model.items` currently included.
    chosen: Vec<usize>,
    best: Option<Incumbent>,
}

/// Find the optimal selection for `model`.
///
/// Among selections with equal score the one with the lexicographically
/// smallest ascending index list wins, independent of the search order.
pub(crate) fn run(model: &Model, limits: Limits) -> Result<Outcome, OptimizeError> {
    let mut meter = Meter::start(limits);
    let optimum = Search::new(model, &mut meter, Goal::Optimise)
        .solve()?
        .ok_or(OptimizeError::Infeasible)?;
    log::trace!(
        "optimal score {} proven after {} nodes",
        optimum.score,
        meter.nodes
    );
    let score = optimum.score;
    let indices = lowest_indices(model, optimum, &mut meter)?;
    Ok(Outcome {
        indices,
        score,
        nodes: meter.nodes,
    })
}

/// Rebuild an optimum of `optimum.score` as the smallest ascending index
/// list.
///
/// `witness` is always an optimal selection agreeing with every decision
/// taken so far, so candidates it contains are kept without a search.
fn lowest_indices(
    model: &Model,
    optimum: Incumbent,
    meter: &mut Meter,
) -> Result<Vec<usize>, OptimizeError> {
    let mut ordered: Vec<&Item> = model.items.iter().collect();
    ordered.sort_by_key(|item| item.index);

    let mut witness = optimum.indices;
    let mut kept: Vec<&Item> = Vec::new();
    for (rank, &item) in ordered.iter().enumerate() {
        // A prefix of any longer list sorts first.
        if model.completes(&kept, optimum.score) {
            break;
        }
        if witness.binary_search(&item.index).is_ok() {
            kept.push(item);
            continue;
        }
        let mut forced = kept.clone();
        forced.push(item);
        let rest = ordered.get(rank + 1..).unwrap_or_default();
        if let Some(found) = complete_at(model, &forced, rest, optimum.score, meter)? {
            witness = found;
            kept = forced;
        }
    }
    Ok(kept.iter().map(|item| item.index).collect())
}

/// Find a selection containing `forced`, drawing the rest from `rest`, that
/// scores `target`.
fn complete_at(
    model: &Model,
    forced: &[&Item],
    rest: &[&Item],
    target: u64,
    meter: &mut Meter,
) -> Result<Option<Vec<usize>>, OptimizeError> {
    let Some((restricted, forced_score)) = model.restricted(forced, rest) else {
        return Ok(None);
    };
    let Some(remaining) = target.checked_sub(forced_score) else {
        return Ok(None);
    };
    let found = Search::new(&restricted, meter, Goal::Reach(remaining)).solve()?;
    Ok(found.map(|completion| {
        let mut indices: Vec<usize> = forced
            .iter()
            .map(|item| item.index)
            .chain(completion.indices)
            .collect();
        indices.sort_unstable();
        indices
    }))
}

impl<'a> Search<'a> {
    const fn new(model: &'a Model, meter: &'a mut Meter, goal: Goal) -> Self {
        Self {
            model,
            meter,
            goal,
            chosen: Vec::new(),
            best: None,
        }
    }

    fn solve(mut self) -> Result<Option<Incumbent>, OptimizeError> {
        self.explore(Node {
            position: 0,
            score: 0,
            cost: 0,
            counts: CategoryCounts::default(),
        })?;
        Ok(self.best)
    }

    fn explore(&mut self, node: Node) -> Result<(), OptimizeError> {
        if self.reached() {
            return Ok(());
        }
        self.meter.tick()?;
        let model = self.model;
        let available = model.items.len().saturating_sub(node.position);
        let remaining_picks = match model.picks {
            Some(size) => usize::try_from(size)
                .unwrap_or(usize::MAX)
                .saturating_sub(self.chosen.len()),
            None => available,
        };
        let (needs, need_total) = self.outstanding_quotas(&node);

        if need_total == 0 && (model.picks.is_none() || remaining_picks == 0) {
            self.offer(node.score);
            if self.reached() {
                return Ok(());
            }
        }
        if remaining_picks == 0 || node.position >= model.items.len() {
            return Ok(());
        }
        if !self.can_complete(&node, &needs, need_total, remaining_picks, available) {
            return Ok(());
        }

        let remaining_budget = model
            .budget
            .map_or(u64::MAX, |budget| budget.saturating_sub(node.cost));
        let bound = node.score.saturating_add(model.completion_bound(
            node.position,
            remaining_picks,
            remaining_budget,
        ));
        if self.dominated(bound) {
            return Ok(());
        }

        let Some(item) = model.items.get(node.position) else {
            return Ok(());
        };
        if item.cost <= remaining_budget {
            let mut counts = node.counts;
            if let Some(count) = item.category.and_then(|k| counts.get_mut(k)) {
                *count += 1;
            }
            self.chosen.push(node.position);
            let included = self.explore(Node {
                position: node.position + 1,
                score: node.score + item.score,
                cost: node.cost + item.cost,
                counts,
            });
            self.chosen.pop();
            included?;
        }

        self.explore(Node {
            position: node.position + 1,
            ..node
        })
    }

    /// Whether no completion under `bound` can serve the goal.
    fn dominated(&self, bound: u64) -> bool {
        match self.goal {
            Goal::Optimise => self.best.as_ref().is_some_and(|best| bound <= best.score),
            Goal::Reach(target) => bound < target,
        }
    }

    const fn reached(&self) -> bool {
        matches!(self.goal, Goal::Reach(_)) && self.best.is_some()
    }

    fn outstanding_quotas(&self, node: &Node) -> (CategoryCounts, u64) {
        let mut needs = CategoryCounts::default();
        for ((need, quota), count) in needs
            .iter_mut()
            .zip(self.model.quotas.iter())
            .zip(node.counts.iter())
        {
            *need = quota.saturating_sub(*count);
        }
        let total = needs.iter().copied().map(u64::from).sum();
        (needs, total)
    }

    /// Whether `items[node.position..]` can still complete a feasible
    /// selection from this node.
    fn can_complete(
        &self,
        node: &Node,
        needs: &CategoryCounts,
        need_total: u64,
        remaining_picks: usize,
        available: usize,
    ) -> bool {
        let model = self.model;
        let exact = model.picks.is_some();
        if exact && available < remaining_picks {
            return false;
        }
        let picks = u64::try_from(remaining_picks).unwrap_or(u64::MAX);
        if need_total > picks {
            return false;
        }
        let supply = model
            .suffix_counts
            .get(node.position)
            .copied()
            .unwrap_or_default();
        if needs.iter().zip(supply.iter()).any(|(need, have)| need > have) {
            return false;
        }
        let Some(budget) = model.budget else {
            return true;
        };
        let cheapest = model
            .suffix_min_cost
            .get(node.position)
            .copied()
            .unwrap_or(u64::MAX);
        let minimum_picks = if exact { picks } else { need_total };
        let remaining_budget = budget.saturating_sub(node.cost);
        minimum_picks == 0 || minimum_picks.saturating_mul(cheapest) <= remaining_budget
    }

    /// Record the current assignment if it serves the goal better than the
    /// incumbent.
    fn offer(&mut self, score: u64) {
        let accepted = match self.goal {
            Goal::Optimise => self.best.as_ref().is_none_or(|best| score > best.score),
            Goal::Reach(target) => score >= target,
        };
        if !accepted {
            return;
        }
        let mut indices: Vec<usize> = self
            .chosen
            .iter()
            .filter_map(|&position| self.model.items.get(position))
            .map(|item| item.index)
            .collect();
        indices.sort_unstable();
        log::trace!("new incumbent scoring {score} after {} nodes", self.meter.nodes);
        self.best = Some(Incumbent { score, indices });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use velogames_core::test_support::{brute_force, classed_rider, rider};
    use velogames_core::{Category, Constraint};

    const UNLIMITED: Limits = Limits {
        time: None,
        nodes: None,
    };

    fn solve(
        pool: &[velogames_core::Candidate],
        constraints: &[Constraint],
    ) -> Result<Outcome, OptimizeError> {
        let model = Model::compile(pool, constraints)?;
        run(&model, UNLIMITED)
    }

    #[rstest]
    fn matches_exhaustive_search_on_a_small_pool() {
        let pool = vec![
            rider("A", 120, 30),
            rider("B", 95, 22),
            rider("C", 80, 18),
            rider("D", 70, 20),
            rider("E", 60, 12),
            rider("F", 40, 8),
            rider("G", 35, 9),
        ];
        let constraints = [Constraint::CardinalityEquals(3), Constraint::BudgetAtMost(60)];
        let outcome = solve(&pool, &constraints).expect("solvable");
        let (score, indices) = brute_force(&pool, &constraints).expect("brute force solvable");
        assert_eq!(outcome.score, score);
        assert_eq!(outcome.indices, indices);
    }

    #[rstest]
    fn quotas_force_a_lower_scoring_rider() {
        let pool = vec![
            classed_rider("L1", Category::Leader, 100, 10),
            classed_rider("L2", Category::Leader, 90, 10),
            classed_rider("S1", Category::Sprinter, 10, 10),
        ];
        let constraints = [
            Constraint::CardinalityEquals(2),
            Constraint::BudgetAtMost(100),
            Constraint::CategoryAtLeast {
                category: Category::Sprinter,
                min_count: 1,
            },
        ];
        let outcome = solve(&pool, &constraints).expect("solvable");
        assert_eq!(outcome.indices, vec![0, 2]);
        assert_eq!(outcome.score, 110);
    }

    #[rstest]
    fn ties_resolve_to_the_lowest_indices() {
        let pool = vec![
            rider("A", 10, 5),
            rider("B", 20, 5),
            rider("C", 10, 5),
            rider("D", 20, 5),
        ];
        let outcome = solve(&pool, &[Constraint::CardinalityEquals(2)]).expect("solvable");
        assert_eq!(outcome.indices, vec![1, 3]);

        let tied = vec![rider("A", 10, 5), rider("B", 10, 5), rider("C", 10, 5)];
        let outcome = solve(&tied, &[Constraint::CardinalityEquals(2)]).expect("solvable");
        assert_eq!(outcome.indices, vec![0, 1]);
    }

    #[rstest]
    fn budget_without_cardinality_picks_any_count() {
        let pool = vec![rider("A", 10, 6), rider("B", 7, 4), rider("C", 6, 3)];
        let outcome = solve(&pool, &[Constraint::BudgetAtMost(7)]).expect("solvable");
        assert_eq!(outcome.indices, vec![1, 2]);
        assert_eq!(outcome.score, 13);
    }

    #[rstest]
    fn empty_constraint_list_selects_everything() {
        let pool = vec![rider("A", 1, 1), rider("B", 2, 2)];
        let outcome = solve(&pool, &[]).expect("solvable");
        assert_eq!(outcome.indices, vec![0, 1]);
    }

    #[rstest]
    fn unaffordable_cardinality_is_infeasible() {
        let pool = vec![rider("A", 1, 60), rider("B", 1, 60)];
        let constraints = [Constraint::CardinalityEquals(2), Constraint::BudgetAtMost(100)];
        assert_eq!(solve(&pool, &constraints), Err(OptimizeError::Infeasible));
    }

    #[rstest]
    fn node_limit_stops_the_search() {
        let pool: Vec<_> = (0..12_u32)
            .map(|i| rider(&format!("R{i}"), 10 + i, 5 + i))
            .collect();
        let model = Model::compile(&pool, &[Constraint::CardinalityEquals(6)])
            .expect("constraints compile");
        let limits = Limits {
            time: None,
            nodes: Some(3),
        };
        assert_eq!(
            run(&model, limits),
            Err(OptimizeError::NodeLimitExceeded { limit: 3 })
        );
    }

    #[rstest]
    fn elapsed_time_limit_stops_the_search() {
        // Even costs under an odd budget keep the budget bound above every
        // reachable score, so nothing is pruned by bound.
        let pool: Vec<_> = (0..40_u32)
            .map(|i| {
                let cost = 2 + 2 * (i & 7);
                rider(&format!("R{i}"), 50 * cost, cost)
            })
            .collect();
        let constraints = [
            Constraint::CardinalityEquals(10),
            Constraint::BudgetAtMost(101),
        ];
        let model = Model::compile(&pool, &constraints).expect("constraints compile");
        let limits = Limits {
            time: Some(Duration::ZERO),
            nodes: None,
        };
        assert_eq!(
            run(&model, limits),
            Err(OptimizeError::TimeLimitExceeded {
                limit: Duration::ZERO
            })
        );
    }

    #[rstest]
    fn zero_scores_resolve_to_the_first_affordable_riders() {
        let pool: Vec<_> = (0..200_u32)
            .map(|i| rider(&format!("R{i}"), 0, 4 + (i & 7)))
            .collect();
        let constraints = [Constraint::CardinalityEquals(9), Constraint::BudgetAtMost(100)];
        let outcome = solve(&pool, &constraints).expect("solvable");
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.indices, (0..9_usize).collect::<Vec<_>>());
    }

    #[rstest]
    fn ties_prefer_a_shorter_prefix_without_cardinality() {
        let pool = vec![rider("A", 5, 3), rider("B", 0, 1), rider("C", 5, 3)];
        let outcome = solve(&pool, &[Constraint::BudgetAtMost(4)]).expect("solvable");
        assert_eq!(outcome.indices, vec![0]);
        assert_eq!(
            brute_force(&pool, &[Constraint::BudgetAtMost(4)]).map(|(_, indices)| indices),
            Some(vec![0])
        );
    }
}
