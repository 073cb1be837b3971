//! Assign chosen riders to named roster slots for reporting.
//!
//! Category-aware games fill each quota category with the first chosen
//! riders of that category in pool order; the single rider chosen beyond
//! every minimum is the wildcard. Games without quotas report the chosen
//! riders unchanged.

use std::collections::HashMap;

use thiserror::Error;

use crate::{Candidate, Category, GameRules, Selection};

/// Chosen riders filling one category's quota slots.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategorySlots {
    /// Category of every rider in `riders`.
    pub category: Category,
    /// Rider names in pool order; exactly the quota minimum long.
    pub riders: Vec<String>,
}

/// A selection arranged into display slots.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Roster {
    /// The game has no category quotas.
    Unclassified {
        /// Chosen rider names in pool order.
        riders: Vec<String>,
    },
    /// The game has category quotas.
    Classified {
        /// Quota slots in category order.
        slots: Vec<CategorySlots>,
        /// The rider chosen beyond every quota minimum, if the rules leave room.
        wildcard: Option<String>,
    },
}

impl Roster {
    /// Rider names in slot order, wildcard last.
    pub fn riders(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Self::Unclassified { riders } => Box::new(riders.iter().map(String::as_str)),
            Self::Classified { slots, wildcard } => Box::new(
                slots
                    .iter()
                    .flat_map(|slot| slot.riders.iter().map(String::as_str))
                    .chain(wildcard.as_deref()),
            ),
        }
    }

    /// Total number of slotted riders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.riders().count()
    }

    /// Whether the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.riders().next().is_none()
    }
}

/// Consistency violations between game rules and an optimizer result.
///
/// Any of these indicates a malformed rule set or an optimizer bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationError {
    /// The selection names a rider absent from the pool.
    #[error("selected rider '{name}' is not in the candidate pool")]
    UnknownCandidate {
        /// Unknown name.
        name: String,
    },
    /// A chosen rider has no category although the game uses quotas.
    #[error("selected rider '{name}' has no category")]
    MissingCategory {
        /// Rider without a category.
        name: String,
    },
    /// Fewer riders of a category were chosen than its quota requires.
    #[error("quota for {category} needs {required} riders but {found} were chosen")]
    QuotaUnderfilled {
        /// Category whose quota is unmet.
        category: Category,
        /// Quota minimum.
        required: u32,
        /// Chosen riders of the category.
        found: usize,
    },
    /// The number of riders beyond all minimums differs from the rules.
    #[error("expected {expected} rider(s) beyond the quotas but found {actual}")]
    SurplusMismatch {
        /// `roster_size` minus the quota total.
        expected: u32,
        /// Riders chosen beyond their category minimum.
        actual: usize,
    },
    /// The rules leave more than one surplus place for the single wildcard slot.
    #[error("rules leave {surplus} places beyond the quotas but only one wildcard slot exists")]
    MultipleWildcards {
        /// `roster_size` minus the quota total.
        surplus: u32,
    },
}

/// Arrange a selection into display slots.
///
/// # Errors
/// Returns a [`ClassificationError`] when the selection is inconsistent with
/// the pool or the rules.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use velogames_core::{classify, Candidate, Category, GameRules, Roster, Selection};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = vec![
///     Candidate::new("A", "T", 9, 1).with_category(Category::Climber),
///     Candidate::new("B", "T", 8, 1).with_category(Category::Climber),
/// ];
/// let rules = GameRules::new(2, 10, BTreeMap::from([(Category::Climber, 1)]))?;
/// let selection = Selection::from_indices(&pool, &[0, 1]);
/// let roster = classify(&selection, &pool, &rules)?;
/// let Roster::Classified { slots, wildcard } = roster else {
///     unreachable!("quotas produce a classified roster");
/// };
/// assert_eq!(slots[0].riders, vec!["A".to_owned()]);
/// assert_eq!(wildcard.as_deref(), Some("B"));
/// # Ok(())
/// # }
/// ```
pub fn classify(
    selection: &Selection,
    pool: &[Candidate],
    rules: &GameRules,
) -> Result<Roster, ClassificationError> {
    let positions: HashMap<&str, usize> = pool
        .iter()
        .enumerate()
        .map(|(index, candidate)| (candidate.name.as_str(), index))
        .collect();
    let mut chosen = selection
        .chosen
        .iter()
        .map(|name| {
            positions
                .get(name.as_str())
                .and_then(|&index| pool.get(index).map(|candidate| (index, candidate)))
                .ok_or_else(|| ClassificationError::UnknownCandidate { name: name.clone() })
        })
        .collect::<Result<Vec<_>, _>>()?;
    chosen.sort_unstable_by_key(|&(index, _)| index);

    if !rules.uses_categories() {
        return Ok(Roster::Unclassified {
            riders: chosen.into_iter().map(|(_, c)| c.name.clone()).collect(),
        });
    }

    let expected = rules.surplus();
    if expected > 1 {
        return Err(ClassificationError::MultipleWildcards { surplus: expected });
    }

    let quotas = rules.category_quotas();
    let mut slots: Vec<CategorySlots> = quotas
        .keys()
        .map(|&category| CategorySlots {
            category,
            riders: Vec::new(),
        })
        .collect();
    let mut surplus = Vec::new();

    for (_, candidate) in chosen {
        let category = candidate
            .category
            .ok_or_else(|| ClassificationError::MissingCategory {
                name: candidate.name.clone(),
            })?;
        let open_slot = slots.iter_mut().find(|slot| {
            slot.category == category
                && quotas
                    .get(&category)
                    .and_then(|&min| usize::try_from(min).ok())
                    .is_some_and(|min| slot.riders.len() < min)
        });
        match open_slot {
            Some(slot) => slot.riders.push(candidate.name.clone()),
            None => surplus.push(candidate.name.clone()),
        }
    }

    for slot in &slots {
        let required = quotas.get(&slot.category).copied().unwrap_or_default();
        if u32::try_from(slot.riders.len()).map_or(true, |found| found < required) {
            return Err(ClassificationError::QuotaUnderfilled {
                category: slot.category,
                required,
                found: slot.riders.len(),
            });
        }
    }

    if u32::try_from(surplus.len()).map_or(true, |actual| actual != expected) {
        return Err(ClassificationError::SurplusMismatch {
            expected,
            actual: surplus.len(),
        });
    }

    Ok(Roster::Classified {
        slots,
        wildcard: surplus.pop(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::collections::BTreeMap;

    fn rider(name: &str, category: Category) -> Candidate {
        Candidate::new(name, "Team", 10, 10).with_category(category)
    }

    #[fixture]
    fn pool() -> Vec<Candidate> {
        vec![
            rider("L1", Category::Leader),
            rider("C1", Category::Climber),
            rider("L2", Category::Leader),
            rider("S1", Category::Sprinter),
            rider("L3", Category::Leader),
            rider("C2", Category::Climber),
        ]
    }

    fn rules(roster_size: u32) -> GameRules {
        let quotas = BTreeMap::from([
            (Category::Leader, 2),
            (Category::Climber, 1),
            (Category::Sprinter, 1),
        ]);
        GameRules::new(roster_size, 100, quotas).expect("rules should validate")
    }

    fn select(pool: &[Candidate], names: &[&str]) -> Selection {
        let indices: Vec<usize> = names
            .iter()
            .filter_map(|name| pool.iter().position(|c| c.name == *name))
            .collect();
        Selection::from_indices(pool, &indices)
    }

    #[rstest]
    fn first_encountered_riders_fill_quota_slots(pool: Vec<Candidate>) {
        let selection = select(&pool, &["L1", "C1", "L2", "S1", "L3"]);
        let roster = classify(&selection, &pool, &rules(5)).expect("roster should classify");
        assert_eq!(
            roster,
            Roster::Classified {
                slots: vec![
                    CategorySlots {
                        category: Category::Leader,
                        riders: vec!["L1".into(), "L2".into()],
                    },
                    CategorySlots {
                        category: Category::Climber,
                        riders: vec!["C1".into()],
                    },
                    CategorySlots {
                        category: Category::Sprinter,
                        riders: vec!["S1".into()],
                    },
                ],
                wildcard: Some("L3".into()),
            }
        );
        assert_eq!(roster.len(), 5);
        assert_eq!(
            roster.riders().collect::<Vec<_>>(),
            vec!["L1", "L2", "C1", "S1", "L3"]
        );
    }

    #[rstest]
    fn exact_quota_fill_has_no_wildcard(pool: Vec<Candidate>) {
        let selection = select(&pool, &["L1", "C1", "L2", "S1"]);
        let roster = classify(&selection, &pool, &rules(4)).expect("roster should classify");
        assert!(matches!(roster, Roster::Classified { wildcard: None, .. }));
    }

    #[rstest]
    fn later_riders_of_a_category_can_fill_its_slots(pool: Vec<Candidate>) {
        let selection = select(&pool, &["L1", "C1", "C2", "S1", "L3"]);
        let roster = classify(&selection, &pool, &rules(5)).expect("roster should classify");
        let Roster::Classified { slots, wildcard } = roster else {
            panic!("expected a classified roster");
        };
        let leaders = slots.first().expect("leader slot");
        assert_eq!(leaders.riders, vec!["L1".to_owned(), "L3".to_owned()]);
        assert_eq!(wildcard.as_deref(), Some("C2"));
    }

    #[rstest]
    fn missing_sprinter_names_the_category(pool: Vec<Candidate>) {
        let selection = select(&pool, &["L1", "C1", "L2", "C2", "L3"]);
        let err = classify(&selection, &pool, &rules(5)).expect_err("expected failure");
        assert_eq!(
            err,
            ClassificationError::QuotaUnderfilled {
                category: Category::Sprinter,
                required: 1,
                found: 0,
            }
        );
    }

    #[rstest]
    fn surplus_count_must_match_rules(pool: Vec<Candidate>) {
        let selection = select(&pool, &["L1", "C1", "L2", "S1", "L3", "C2"]);
        let err = classify(&selection, &pool, &rules(5)).expect_err("expected failure");
        assert_eq!(
            err,
            ClassificationError::SurplusMismatch {
                expected: 1,
                actual: 2,
            }
        );
    }

    #[rstest]
    fn several_surplus_places_are_rejected(pool: Vec<Candidate>) {
        let selection = select(&pool, &["L1", "C1", "L2", "S1", "L3", "C2"]);
        let err = classify(&selection, &pool, &rules(6)).expect_err("expected failure");
        assert_eq!(err, ClassificationError::MultipleWildcards { surplus: 2 });
    }

    #[rstest]
    fn unknown_rider_is_reported(pool: Vec<Candidate>) {
        let selection = Selection {
            chosen: vec!["Ghost".into()],
            total_score: 0,
            total_cost: 0,
        };
        let err = classify(&selection, &pool, &rules(5)).expect_err("expected failure");
        assert_eq!(
            err,
            ClassificationError::UnknownCandidate {
                name: "Ghost".into()
            }
        );
    }

    #[rstest]
    fn uncategorised_rider_is_reported() {
        let pool = vec![Candidate::new("Plain", "Team", 1, 1)];
        let rules = GameRules::new(1, 10, BTreeMap::from([(Category::Leader, 1)])).expect("rules should validate");
        let selection = Selection::from_indices(&pool, &[0]);
        let err = classify(&selection, &pool, &rules).expect_err("expected failure");
        assert_eq!(
            err,
            ClassificationError::MissingCategory {
                name: "Plain".into()
            }
        );
    }

    #[rstest]
    fn games_without_quotas_keep_pool_order(pool: Vec<Candidate>) {
        let rules = GameRules::without_quotas(3, 100).expect("rules should validate");
        let selection = Selection {
            chosen: vec!["S1".into(), "L1".into(), "C2".into()],
            total_score: 30,
            total_cost: 30,
        };
        let roster = classify(&selection, &pool, &rules).expect("roster should classify");
        assert_eq!(
            roster,
            Roster::Unclassified {
                riders: vec!["L1".into(), "S1".into(), "C2".into()],
            }
        );
    }
}
