//! Core domain types for the Velogames roster optimizer.
//!
//! A run takes an immutable pool of [`Candidate`] riders and one validated
//! [`GameRules`] value, turns them into a [`Constraint`] list with
//! [`build_constraints`], hands both to an [`Optimizer`], and arranges the
//! resulting [`Selection`] into display slots with [`classify`].
//! [`pick_team`] runs the whole pipeline.
//!
//! Constructors and builders return `Result` to surface invalid input before
//! any optimisation starts.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod candidate;
mod category;
mod classifier;
mod constraint;
mod optimizer;
mod pipeline;
mod rules;
mod selection;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use candidate::{Candidate, PoolError, validate_pool};
pub use category::{Category, CategoryParseError};
pub use classifier::{CategorySlots, ClassificationError, Roster, classify};
pub use constraint::{BuildError, Constraint, build_constraints};
pub use optimizer::{OptimizeError, Optimizer};
pub use pipeline::{PickTeamError, TeamPlan, pick_team};
pub use rules::{GameRules, GameRulesError};
pub use selection::{Diagnostics, OptimizeResponse, Selection};
