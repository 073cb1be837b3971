//! `BranchAndBoundOptimizer` implementation.

use std::time::{Duration, Instant};

use velogames_core::{
    Candidate, Constraint, Diagnostics, OptimizeError, OptimizeResponse, Optimizer, Selection,
};

use crate::model::Model;
use crate::search::{self, Limits};

/// Default wall-clock bound for one optimisation.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(10);

/// Configuration for [`BranchAndBoundOptimizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchAndBoundConfig {
    /// Wall-clock bound; `None` searches until optimality is proven.
    pub time_limit: Option<Duration>,
    /// Upper bound on explored tree nodes.
    pub node_limit: Option<u64>,
}

impl Default for BranchAndBoundConfig {
    fn default() -> Self {
        Self {
            time_limit: Some(DEFAULT_TIME_LIMIT),
            node_limit: None,
        }
    }
}

/// Exact optimizer using depth-first branch and bound.
///
/// Nodes are pruned with a Lagrangian relaxation of the budget constraint
/// and with counting arguments over the remaining candidates, so the search
/// stays fast on pools of a few hundred riders. All arithmetic is integral.
#[derive(Debug, Clone, Default)]
pub struct BranchAndBoundOptimizer {
    config: BranchAndBoundConfig,
}

impl BranchAndBoundOptimizer {
    /// Construct an optimizer using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an optimizer with explicit configuration.
    #[must_use]
    pub const fn with_config(config: BranchAndBoundConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &BranchAndBoundConfig {
        &self.config
    }
}

impl Optimizer for BranchAndBoundOptimizer {
    fn optimize(
        &self,
        pool: &[Candidate],
        constraints: &[Constraint],
    ) -> Result<OptimizeResponse, OptimizeError> {
        let started_at = Instant::now();
        let model = Model::compile(pool, constraints)?;
        let limits = Limits {
            time: self.config.time_limit,
            nodes: self.config.node_limit,
        };
        let outcome = search::run(&model, limits).inspect_err(|err| {
            log::warn!("branch and bound stopped after {:?}: {err}", started_at.elapsed());
        })?;

        let diagnostics = Diagnostics {
            solve_time: started_at.elapsed(),
            nodes_explored: outcome.nodes,
        };
        log::debug!(
            "optimal score {} proven after {} nodes in {:?}",
            outcome.score,
            diagnostics.nodes_explored,
            diagnostics.solve_time
        );
        Ok(OptimizeResponse {
            selection: Selection::from_indices(pool, &outcome.indices),
            diagnostics,
        })
    }
}
