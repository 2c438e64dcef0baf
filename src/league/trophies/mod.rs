//! Achievement evaluation over a (possibly period-filtered) history.
//!
//! Each trophy is a named predicate in [`CATALOGUE`]. A pass builds one
//! [`EvaluationContext`] and runs every predicate for every player against it.

mod catalogue;
mod context;
mod predicates;

pub use catalogue::{TrophyCheck, TrophyId, TrophyRule, TrophyTier, CATALOGUE};
pub use context::{DailyRecord, EvaluationContext, HandOutcome, PeriodTally};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{AsRefStr, EnumString};
use tracing::{debug, instrument};

use super::models::{GameRecord, PlayerId, PlayerStats};

pub type TrophyFlags = BTreeMap<TrophyId, bool>;

/// Who receives trophies keyed on a whole table's score distribution.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DistributionalAward {
    #[default]
    AllParticipants,
    WinnerOnly,
    Nobody,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrophyOptions {
    #[serde(default)]
    pub distributional_award: DistributionalAward,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrophyEvaluator {
    options: TrophyOptions,
}

impl TrophyEvaluator {
    pub fn new(options: TrophyOptions) -> Self {
        Self { options }
    }

    /// Flags for every player in `stats`. `stats` must come from the same
    /// game list.
    #[instrument(skip_all, fields(games = games.len(), players = stats.len()))]
    pub fn evaluate(
        &self,
        games: &[GameRecord],
        stats: &BTreeMap<PlayerId, PlayerStats>,
    ) -> BTreeMap<PlayerId, TrophyFlags> {
        let context = EvaluationContext::build(games, stats, self.options);

        let flags: BTreeMap<PlayerId, TrophyFlags> = stats
            .keys()
            .map(|player_id| {
                let earned = CATALOGUE
                    .iter()
                    .map(|rule| (rule.id, (rule.check)(&context, player_id)))
                    .collect();
                (player_id.clone(), earned)
            })
            .collect();

        debug!(
            awarded = flags
                .values()
                .map(|f| f.values().filter(|&&earned| earned).count())
                .sum::<usize>(),
            "Evaluated trophies"
        );
        flags
    }
}
