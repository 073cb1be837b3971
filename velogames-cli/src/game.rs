//! Game configuration file loading.
//!
//! A game file is TOML with a single `[game]` table:
//!
//! ```toml
//! [game]
//! name = "Tour de France 2024"
//! type = "GRAND_TOUR"
//! url = "https://www.velogames.com/velogame/2024/riders.php"
//! budget = 100
//! ```
//!
//! Keys the optimizer does not use, such as a scraper's column map, are
//! ignored.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use velogames_core::{Category, GameRules, GameRulesError};

use crate::CliError;
use crate::fs::read_utf8_to_string;

/// Budget applied when the game file does not set one.
pub(crate) const DEFAULT_BUDGET: u32 = 100;

/// Velogames game variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum GameType {
    GrandTour,
    StageRace,
    Classics,
    ClassicsWithUnlimitedChanges,
}

impl GameType {
    pub(crate) const fn roster_size(self) -> u32 {
        match self {
            Self::GrandTour | Self::StageRace | Self::Classics => 9,
            Self::ClassicsWithUnlimitedChanges => 6,
        }
    }

    /// Whether riders carry a category column in this game.
    pub(crate) const fn uses_categories(self) -> bool {
        matches!(self, Self::GrandTour)
    }

    const fn quotas(self) -> &'static [(Category, u32)] {
        match self {
            Self::GrandTour => &[
                (Category::Leader, 2),
                (Category::Climber, 2),
                (Category::Sprinter, 1),
                (Category::Unclassed, 3),
            ],
            Self::StageRace | Self::Classics | Self::ClassicsWithUnlimitedChanges => &[],
        }
    }

    /// Build the validated rule set for this game type.
    pub(crate) fn rules(self, budget: u32) -> Result<GameRules, GameRulesError> {
        GameRules::new(
            self.roster_size(),
            budget,
            self.quotas().iter().copied().collect(),
        )
    }
}

/// The `[game]` table of a game file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct GameConfig {
    pub(crate) name: String,
    #[serde(rename = "type")]
    pub(crate) game_type: GameType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) url: Option<String>,
    #[serde(default = "default_budget")]
    pub(crate) budget: u32,
}

const fn default_budget() -> u32 {
    DEFAULT_BUDGET
}

#[derive(Debug, Deserialize)]
struct GameFile {
    game: GameConfig,
}

impl GameConfig {
    /// Decode a game file.
    pub(crate) fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<GameFile>(contents).map(|file| file.game)
    }

    pub(crate) fn rules(&self) -> Result<GameRules, GameRulesError> {
        self.game_type.rules(self.budget)
    }
}

/// Load and decode the game file at `path`.
pub(crate) fn load_game_config(path: &Utf8Path) -> Result<GameConfig, CliError> {
    let contents = read_utf8_to_string(path).map_err(|source| CliError::ReadGameConfig {
        path: path.to_path_buf(),
        source,
    })?;
    let config = GameConfig::from_toml(&contents).map_err(|source| CliError::ParseGameConfig {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;
    log::debug!(
        "loaded game '{}' of type {:?} with budget {}",
        config.name,
        config.game_type,
        config.budget
    );
    Ok(config)
}
