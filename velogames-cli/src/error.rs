//! Error types emitted by the Velogames CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use velogames_core::{GameRulesError, PickTeamError};

use crate::riders::RiderFileError;

/// Errors emitted by the Velogames CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Argument naming the path.
        field: &'static str,
        /// Resolved path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Argument naming the path.
        field: &'static str,
        /// Resolved path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Argument naming the path.
        field: &'static str,
        /// Resolved path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// Reading the game file failed.
    #[error("failed to read game config at {path:?}: {source}")]
    ReadGameConfig {
        /// Game file path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// The game file is not valid TOML or lacks required keys.
    #[error("failed to parse game config at {path:?}: {source}")]
    ParseGameConfig {
        /// Game file path.
        path: Utf8PathBuf,
        /// Decoding failure.
        #[source]
        source: Box<toml::de::Error>,
    },
    /// The game file describes rules that cannot be satisfied.
    #[error("game config at {path:?} is invalid: {source}")]
    InvalidGameRules {
        /// Game file path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: GameRulesError,
    },
    /// Reading the rider file failed.
    #[error("failed to read riders at {path:?}: {source}")]
    ReadRiders {
        /// Rider file path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// The rider file contains a malformed line.
    #[error("failed to parse riders at {path:?}: {source}")]
    ParseRiders {
        /// Rider file path.
        path: Utf8PathBuf,
        /// Decoding failure.
        #[source]
        source: RiderFileError,
    },
    /// Selecting the roster failed.
    #[error("failed to pick a team: {0}")]
    PickTeam(#[from] PickTeamError),
    /// Serialising the JSON report failed.
    #[error("failed to serialise report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    WriteReport(#[source] std::io::Error),
}
