//! Facade crate for the Velogames roster optimizer.
//!
//! This crate re-exports the core domain types and exposes the default
//! branch-and-bound optimizer behind the `solver-bnb` feature.

#![forbid(unsafe_code)]

pub use velogames_core::{
    BuildError, Candidate, Category, CategoryParseError, CategorySlots, ClassificationError,
    Constraint, Diagnostics, GameRules, GameRulesError, OptimizeError, OptimizeResponse,
    Optimizer, PickTeamError, PoolError, Roster, Selection, TeamPlan, build_constraints, classify,
    pick_team, validate_pool,
};

#[cfg(feature = "solver-bnb")]
pub use velogames_solver_bnb::{BranchAndBoundConfig, BranchAndBoundOptimizer};
