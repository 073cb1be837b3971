//! Exact branch-and-bound optimizer for Velogames rosters.
//!
//! This crate provides [`BranchAndBoundOptimizer`], the default
//! implementation of the [`Optimizer`](velogames_core::Optimizer) trait. It
//! treats roster selection as a cardinality-constrained knapsack with
//! per-category minimums and proves optimality with a depth-first search.
//!
//! The search is single-threaded and deterministic: for a fixed pool order
//! it always returns the same selection, preferring the lowest pool indices
//! among equally scoring rosters. A wall-clock bound and an optional node
//! bound turn runaway searches into
//! [`OptimizeError::TimeLimitExceeded`](velogames_core::OptimizeError::TimeLimitExceeded)
//! and
//! [`OptimizeError::NodeLimitExceeded`](velogames_core::OptimizeError::NodeLimitExceeded).

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod model;
mod search;
mod solver;

pub use solver::{BranchAndBoundConfig, BranchAndBoundOptimizer, DEFAULT_TIME_LIMIT};
