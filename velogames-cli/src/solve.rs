//! Solve command implementation for the Velogames CLI.

use std::io::Write;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use velogames_core::{Optimizer, TeamPlan, pick_team};
use velogames_solver_bnb::{BranchAndBoundConfig, BranchAndBoundOptimizer, DEFAULT_TIME_LIMIT};

use crate::game::load_game_config;
use crate::report::{ReportFormat, write_report};
use crate::riders::load_riders;
use crate::{ARG_GAME_CONFIG, ARG_RIDERS, CliError};

/// Rider file used when none is given.
pub(crate) const DEFAULT_RIDERS: &str = "riders.csv";
/// Game file used when none is given.
pub(crate) const DEFAULT_GAME_CONFIG: &str = "velogame.toml";

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Pick the highest scoring roster from a rider pool. The game \
                 file decides the roster size, budget and category quotas; \
                 paths and limits can come from CLI flags, configuration \
                 files, or environment variables.",
    about = "Pick the best possible team for a game"
)]
#[ortho_config(prefix = "VELOGAMES")]
pub(crate) struct SolveArgs {
    /// Path to the comma-separated rider pool (default `riders.csv`).
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) riders: Option<Utf8PathBuf>,
    /// Path to the TOML game file (default `velogame.toml`).
    #[arg(long = ARG_GAME_CONFIG, value_name = "path")]
    #[serde(default)]
    pub(crate) game_config: Option<Utf8PathBuf>,
    /// Report format.
    #[arg(long = crate::ARG_FORMAT, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<ReportFormat>,
    /// Wall-clock search limit in milliseconds; 0 disables the limit.
    #[arg(long = crate::ARG_TIME_LIMIT_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) time_limit_ms: Option<u64>,
    /// Upper bound on explored search nodes.
    #[arg(long = crate::ARG_NODE_LIMIT, value_name = "nodes")]
    #[serde(default)]
    pub(crate) node_limit: Option<u64>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(SolveConfig::from(merged))
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SolveConfig {
    pub(crate) riders: Utf8PathBuf,
    pub(crate) game_config: Utf8PathBuf,
    pub(crate) format: ReportFormat,
    pub(crate) optimizer: BranchAndBoundConfig,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.riders, ARG_RIDERS)?;
        Self::require_existing(&self.game_config, ARG_GAME_CONFIG)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match crate::fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl From<SolveArgs> for SolveConfig {
    fn from(args: SolveArgs) -> Self {
        let time_limit = match args.time_limit_ms {
            None => Some(DEFAULT_TIME_LIMIT),
            Some(0) => None,
            Some(millis) => Some(Duration::from_millis(millis)),
        };
        Self {
            riders: args
                .riders
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_RIDERS)),
            game_config: args
                .game_config
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_GAME_CONFIG)),
            format: args.format.unwrap_or_default(),
            optimizer: BranchAndBoundConfig {
                time_limit,
                node_limit: args.node_limit,
            },
        }
    }
}

/// Builds an optimizer for the current solve invocation.
pub(super) trait SolveOptimizerBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn Optimizer>, CliError>;
}

pub(super) struct DefaultSolveOptimizerBuilder;

impl SolveOptimizerBuilder for DefaultSolveOptimizerBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn Optimizer>, CliError> {
        Ok(Box::new(BranchAndBoundOptimizer::with_config(
            config.optimizer.clone(),
        )))
    }
}

pub(super) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultSolveOptimizerBuilder;
    run_solve_with(args, &builder, &mut stdout)
}

pub(super) fn run_solve_with(
    args: SolveArgs,
    builder: &dyn SolveOptimizerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_solve_config(args)?;
    let (game, plan) = execute_solve(&config, builder)?;
    write_report(writer, config.format, &game, &plan)
}

fn execute_solve(
    config: &SolveConfig,
    builder: &dyn SolveOptimizerBuilder,
) -> Result<(String, TeamPlan), CliError> {
    let game = load_game_config(&config.game_config)?;
    let rules = game
        .rules()
        .map_err(|source| CliError::InvalidGameRules {
            path: config.game_config.clone(),
            source,
        })?;
    let pool = load_riders(&config.riders, game.game_type.uses_categories())?;
    let optimizer = builder.build(config)?;
    let plan = pick_team(optimizer.as_ref(), &pool, &rules)?;
    Ok((game.name, plan))
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    Ok(SolveConfig::from(merged))
}
