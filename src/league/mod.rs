pub mod aggregator;
pub mod converter;
pub mod errors;
pub mod models;
pub mod period;
pub mod ranking;
pub mod trophies;
pub mod validator;
pub mod yakuman;

pub use aggregator::StatsAggregator;
pub use converter::{HandSettlement, ScoreConverter};
pub use errors::ValidationError;
pub use models::{
    DraftHand, GameRecord, HandRecord, OkaTiePolicy, Penalty, PenaltyCategory, Player, PlayerId,
    PlayerStats, RuleSettings, Streaks, YakumanEvent, SEATS,
};
pub use period::{day_timeline, game_years, point_history, Period};
pub use trophies::{
    DistributionalAward, TrophyEvaluator, TrophyFlags, TrophyId, TrophyOptions, TrophyTier,
};
pub use validator::{GameForm, GameFormValidator, SettledHand, ValidatedForm, ValidationMode};
pub use yakuman::Yakuman;

use std::collections::BTreeMap;

/// Players who have played at least one hand, best total first.
pub fn leaderboard(stats: &BTreeMap<PlayerId, PlayerStats>) -> Vec<&PlayerStats> {
    let mut table: Vec<&PlayerStats> = stats
        .values()
        .filter(|player| player.total_hanchans > 0)
        .collect();
    table.sort_by(|a, b| {
        b.total_points
            .total_cmp(&a.total_points)
            .then_with(|| a.id.cmp(&b.id))
    });
    table
}
