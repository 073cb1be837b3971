//! Rider categories used by category-aware game types.
//!
//! Grand-tour games classify every rider into exactly one category and
//! require a minimum number of chosen riders per category.
//!
//! # Examples
//! ```
//! use velogames_core::Category;
//!
//! assert_eq!(Category::Leader.as_str(), "leader");
//! assert_eq!("All Rounder".parse::<Category>(), Ok(Category::Leader));
//! ```

use thiserror::Error;

/// Canonical rider category.
///
/// The declaration order is the slot order of a classified roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Category {
    /// All-rounders, the team leaders.
    Leader,
    /// Climbers.
    Climber,
    /// Sprinters.
    Sprinter,
    /// Riders without a specialism.
    Unclassed,
}

/// Error returned when a source label does not name a known category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rider category '{label}'")]
pub struct CategoryParseError {
    /// The rejected label, as supplied.
    pub label: String,
}

impl Category {
    /// Every category in slot order.
    pub const ALL: [Self; 4] = [Self::Leader, Self::Climber, Self::Sprinter, Self::Unclassed];

    /// Return the category as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use velogames_core::Category;
    ///
    /// assert_eq!(Category::Sprinter.as_str(), "sprinter");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Leader => "leader",
            Self::Climber => "climber",
            Self::Sprinter => "sprinter",
            Self::Unclassed => "unclassed",
        }
    }

    /// Position of the category within [`Category::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Leader => 0,
            Self::Climber => 1,
            Self::Sprinter => 2,
            Self::Unclassed => 3,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryParseError;

    /// Normalise a free-form source label.
    ///
    /// Matching ignores case, surrounding whitespace, and the separator
    /// between "all" and "rounder".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalised.as_str() {
            "allrounder" | "leader" => Ok(Self::Leader),
            "climber" => Ok(Self::Climber),
            "sprinter" => Ok(Self::Sprinter),
            "unclassed" => Ok(Self::Unclassed),
            _ => Err(CategoryParseError {
                label: s.to_owned(),
            }),
        }
    }
}
