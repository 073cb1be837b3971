//! End-to-end roster selection: validate, constrain, optimise, classify.

use thiserror::Error;

use crate::{
    BuildError, Candidate, ClassificationError, GameRules, OptimizeError, OptimizeResponse,
    Optimizer, PoolError, Roster, build_constraints, classify, validate_pool,
};

/// The optimal roster for a pool together with its display slots.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamPlan {
    /// Optimizer output.
    pub response: OptimizeResponse,
    /// The selection arranged into slots.
    pub roster: Roster,
}

/// Errors returned by [`pick_team`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickTeamError {
    /// The pool failed validation.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// The constraint set could not be built.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// The optimizer found no roster or was cut short.
    #[error(transparent)]
    Optimize(#[from] OptimizeError),
    /// The optimizer output contradicts the rules.
    #[error(transparent)]
    Classify(#[from] ClassificationError),
}

/// Select the best roster for `rules` from `pool`.
///
/// # Errors
/// Propagates the first failure from pool validation, constraint
/// construction, optimisation or classification.
pub fn pick_team<O>(
    optimizer: &O,
    pool: &[Candidate],
    rules: &GameRules,
) -> Result<TeamPlan, PickTeamError>
where
    O: Optimizer + ?Sized,
{
    validate_pool(pool)?;
    let constraints = build_constraints(pool, rules)?;
    let response = optimizer.optimize(pool, &constraints)?;
    let roster = classify(&response.selection, pool, rules)?;
    log::info!(
        "selected {} riders scoring {} for {}",
        response.selection.len(),
        response.selection.total_score,
        response.selection.total_cost
    );
    Ok(TeamPlan { response, roster })
}
