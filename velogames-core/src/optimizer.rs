//! The optimizer boundary.
//!
//! Solvers implement [`Optimizer`] and report failures through
//! [`OptimizeError`]; limit errors mean the search stopped before proving
//! optimality, so no selection is returned.

use std::time::Duration;

use thiserror::Error;

use crate::{Candidate, Constraint, OptimizeResponse};

/// Errors returned by [`Optimizer::optimize`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    /// No assignment satisfies every constraint.
    #[error("no valid team possible: no roster satisfies every constraint")]
    Infeasible,
    /// The search exceeded its time bound before proving optimality.
    #[error("search exceeded its time limit of {limit:?} before proving optimality")]
    TimeLimitExceeded {
        /// Configured bound.
        limit: Duration,
    },
    /// The search exceeded its node budget before proving optimality.
    #[error("search exceeded its limit of {limit} nodes before proving optimality")]
    NodeLimitExceeded {
        /// Configured bound.
        limit: u64,
    },
}

/// Find the score-maximising subset of a pool that satisfies a constraint set.
///
/// Implementations must return a globally optimal selection or an error;
/// a best-effort selection is never acceptable. Ties between equally scoring
/// selections must be broken deterministically for a fixed pool order.
/// Optimizers must be `Send + Sync` to operate safely across threads.
///
/// # Examples
///
/// ```rust
/// use velogames_core::{
///     Candidate, Constraint, Diagnostics, OptimizeError, OptimizeResponse, Optimizer, Selection,
/// };
///
/// /// Chooses everything, which is only optimal without constraints.
/// struct TakeAll;
///
/// impl Optimizer for TakeAll {
///     fn optimize(
///         &self,
///         pool: &[Candidate],
///         constraints: &[Constraint],
///     ) -> Result<OptimizeResponse, OptimizeError> {
///         let all: Vec<usize> = (0..pool.len()).collect();
///         if constraints.iter().all(|c| c.is_satisfied_by(pool, &all)) {
///             Ok(OptimizeResponse {
///                 selection: Selection::from_indices(pool, &all),
///                 diagnostics: Diagnostics::default(),
///             })
///         } else {
///             Err(OptimizeError::Infeasible)
///         }
///     }
/// }
///
/// let pool = vec![Candidate::new("A", "T", 5, 5)];
/// let response = TakeAll.optimize(&pool, &[]).expect("no constraints");
/// assert_eq!(response.selection.total_score, 5);
/// ```
pub trait Optimizer: Send + Sync {
    /// Solve for the optimal selection.
    ///
    /// # Errors
    /// Returns [`OptimizeError::Infeasible`] when no selection satisfies all
    /// constraints, or a limit error when the search was cut short.
    fn optimize(
        &self,
        pool: &[Candidate],
        constraints: &[Constraint],
    ) -> Result<OptimizeResponse, OptimizeError>;
}

impl<T: Optimizer + ?Sized> Optimizer for Box<T> {
    fn optimize(
        &self,
        pool: &[Candidate],
        constraints: &[Constraint],
    ) -> Result<OptimizeResponse, OptimizeError> {
        (**self).optimize(pool, constraints)
    }
}
