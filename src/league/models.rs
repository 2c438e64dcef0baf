use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::period;
use super::yakuman::Yakuman;

pub type PlayerId = String;

/// Number of seats at every table.
pub const SEATS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// How the oka bonus is paid when several players tie for first place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OkaTiePolicy {
    /// The tied group shares one oka.
    #[default]
    Split,
    /// Every tied player receives the full oka.
    FullToEach,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSettings {
    pub base_point: i32,
    pub return_point: i32,
    /// Index 0 is paid to first place.
    pub uma: [f64; SEATS],
    #[serde(default)]
    pub oka_tie_policy: OkaTiePolicy,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            base_point: 25_000,
            return_point: 30_000,
            uma: [30.0, 10.0, -10.0, -30.0],
            oka_tie_policy: OkaTiePolicy::Split,
        }
    }
}

impl RuleSettings {
    pub fn oka(&self) -> f64 {
        f64::from(self.return_point - self.base_point) * SEATS as f64 / 1000.0
    }

    /// Sum every finished hand must reach.
    pub fn expected_total(&self) -> i64 {
        i64::from(self.base_point) * SEATS as i64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YakumanEvent {
    pub player_id: PlayerId,
    pub yakumans: BTreeSet<Yakuman>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyCategory {
    Chombo,
    AgariHouki,
}

impl PenaltyCategory {
    pub fn reasons(self) -> &'static [&'static str] {
        match self {
            PenaltyCategory::Chombo => &["false_win", "noten_riichi", "other"],
            PenaltyCategory::AgariHouki => &["wrong_tile_count", "illegal_swap_call", "other"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Penalty {
    pub player_id: PlayerId,
    pub category: PenaltyCategory,
    pub reason: String,
    pub count: u32,
}

/// A finished hand. Every seat has a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    pub raw_scores: BTreeMap<PlayerId, i32>,
    #[serde(default)]
    pub yakuman_events: Vec<YakumanEvent>,
    #[serde(default)]
    pub penalties: Vec<Penalty>,
}

impl HandRecord {
    pub fn new(raw_scores: BTreeMap<PlayerId, i32>) -> Self {
        Self {
            raw_scores,
            yakuman_events: Vec::new(),
            penalties: Vec::new(),
        }
    }

    pub fn yakuman_count_for(&self, player_id: &str) -> usize {
        self.yakuman_events
            .iter()
            .filter(|event| event.player_id == player_id)
            .map(|event| event.yakumans.len())
            .sum()
    }
}

/// A hand still being entered; scores may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftHand {
    pub raw_scores: BTreeMap<PlayerId, Option<i32>>,
    #[serde(default)]
    pub yakuman_events: Vec<YakumanEvent>,
    #[serde(default)]
    pub penalties: Vec<Penalty>,
}

impl DraftHand {
    /// Scores, if every seat has been filled in.
    pub fn complete_scores(&self) -> Option<BTreeMap<PlayerId, i32>> {
        self.raw_scores
            .iter()
            .map(|(id, score)| score.map(|s| (id.clone(), s)))
            .collect()
    }

    pub fn first_missing(&self) -> Option<&PlayerId> {
        self.raw_scores
            .iter()
            .find_map(|(id, score)| score.is_none().then_some(id))
    }
}

impl From<HandRecord> for DraftHand {
    fn from(hand: HandRecord) -> Self {
        Self {
            raw_scores: hand
                .raw_scores
                .into_iter()
                .map(|(id, score)| (id, Some(score)))
                .collect(),
            yakuman_events: hand.yakuman_events,
            penalties: hand.penalties,
        }
    }
}

/// One recorded session, as delivered by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    /// `yyyy/m/d(weekday)`
    pub date: String,
    pub player_ids: Vec<PlayerId>,
    pub rules: RuleSettings,
    pub hands: Vec<HandRecord>,
    pub total_points: BTreeMap<PlayerId, f64>,
    pub created_at: DateTime<Utc>,
}

impl GameRecord {
    pub fn day_key(&self) -> &str {
        period::day_key(&self.date)
    }

    pub fn year(&self) -> Option<i32> {
        period::year_of(&self.date)
    }

    pub fn month(&self) -> Option<(i32, u32)> {
        period::month_of(&self.date)
    }

    pub fn has_player(&self, player_id: &str) -> bool {
        self.player_ids.iter().any(|id| id == player_id)
    }

    /// Same four players, in any seating order.
    pub fn same_roster(&self, other: &GameRecord) -> bool {
        let mine: BTreeSet<&PlayerId> = self.player_ids.iter().collect();
        let theirs: BTreeSet<&PlayerId> = other.player_ids.iter().collect();
        mine == theirs
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    pub rentai: u32,
    pub no_tobi: u32,
    pub no_last: u32,
    pub top: u32,
    pub same_rank: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub id: PlayerId,
    pub name: String,
    pub total_points: f64,
    pub game_count: u32,
    /// Finishes per position, index 0 = first.
    pub ranks: [u32; SEATS],
    pub busted_count: u32,
    pub total_raw_score: i64,
    pub total_hanchans: u32,
    pub yakuman_count: u32,
    pub penalty_count: u32,
    pub max_streak: Streaks,
    pub avg_rank: f64,
    pub top_rate: f64,
    pub rentai_rate: f64,
    pub last_rate: f64,
    pub busted_rate: f64,
    pub avg_raw_score: i64,
}

impl PlayerStats {
    pub fn new(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            ..Self::default()
        }
    }
}
