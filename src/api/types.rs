use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::league::{
    DraftHand, GameRecord, Period, Player, PlayerId, PlayerStats, RuleSettings, TrophyFlags,
    TrophyId, TrophyOptions, TrophyTier,
};

/// A history snapshot handed in by the display layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRequest {
    pub players: Vec<Player>,
    pub games: Vec<GameRecord>,
    #[serde(default)]
    pub period: Period,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub stats: BTreeMap<PlayerId, PlayerStats>,
    /// Player ids, best total first.
    pub leaderboard: Vec<PlayerId>,
    /// Every year with games in the unfiltered snapshot, newest first.
    pub years: Vec<i32>,
    pub timeline: Vec<String>,
    pub point_history: BTreeMap<PlayerId, Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrophiesRequest {
    #[serde(flatten)]
    pub history: HistoryRequest,
    /// Overrides the server's configured options.
    #[serde(default)]
    pub options: Option<TrophyOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrophiesResponse {
    pub trophies: BTreeMap<PlayerId, TrophyFlags>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRequest {
    /// Falls back to the server's default rules.
    #[serde(default)]
    pub rules: Option<RuleSettings>,
    pub hands: Vec<DraftHand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrophyDefinition {
    pub id: TrophyId,
    pub tier: TrophyTier,
    pub secret: bool,
}
