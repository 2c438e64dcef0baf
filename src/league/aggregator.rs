use std::collections::BTreeMap;
use tracing::{debug, instrument};

use super::models::{GameRecord, HandRecord, Player, PlayerId, PlayerStats, Streaks, SEATS};
use super::ranking::ranks_of;

/// Running streak state for one player while folding the history.
#[derive(Debug, Default)]
struct StreakTracker {
    current: Streaks,
    last_rank: Option<u8>,
}

impl StreakTracker {
    fn record_raw(&mut self, raw_score: i32, max: &mut Streaks) {
        if raw_score < 0 {
            self.current.no_tobi = 0;
        } else {
            self.current.no_tobi += 1;
        }
        max.no_tobi = max.no_tobi.max(self.current.no_tobi);
    }

    fn record_rank(&mut self, rank: u8, max: &mut Streaks) {
        let current = &mut self.current;
        current.rentai = if rank <= 2 { current.rentai + 1 } else { 0 };
        current.top = if rank == 1 { current.top + 1 } else { 0 };
        current.no_last = if rank as usize != SEATS {
            current.no_last + 1
        } else {
            0
        };
        current.same_rank = if self.last_rank == Some(rank) {
            current.same_rank + 1
        } else {
            1
        };

        max.rentai = max.rentai.max(current.rentai);
        max.top = max.top.max(current.top);
        max.no_last = max.no_last.max(current.no_last);
        max.same_rank = max.same_rank.max(current.same_rank);
        self.last_rank = Some(rank);
    }
}

/// Folds a session history into per-player statistics.
///
/// Every call starts from zeroed state, so the same input always yields the
/// same output.
pub struct StatsAggregator<'a> {
    players: &'a [Player],
}

impl<'a> StatsAggregator<'a> {
    pub fn new(players: &'a [Player]) -> Self {
        Self { players }
    }

    #[instrument(skip_all, fields(players = self.players.len(), games = games.len()))]
    pub fn aggregate(&self, games: &[GameRecord]) -> BTreeMap<PlayerId, PlayerStats> {
        let mut stats: BTreeMap<PlayerId, PlayerStats> = self
            .players
            .iter()
            .map(|player| (player.id.clone(), PlayerStats::new(player)))
            .collect();
        let mut trackers: BTreeMap<PlayerId, StreakTracker> = BTreeMap::new();

        let mut ordered: Vec<&GameRecord> = games.iter().collect();
        ordered.sort_by_key(|game| game.created_at);

        for game in ordered {
            for player_id in &game.player_ids {
                if let Some(entry) = stats.get_mut(player_id) {
                    entry.game_count += 1;
                }
            }
            for (player_id, points) in &game.total_points {
                if let Some(entry) = stats.get_mut(player_id) {
                    entry.total_points += points;
                }
            }
            for hand in &game.hands {
                Self::fold_hand(hand, &mut stats, &mut trackers);
            }
        }

        for entry in stats.values_mut() {
            Self::derive_rates(entry);
        }

        debug!(
            active_players = stats.values().filter(|s| s.total_hanchans > 0).count(),
            "Aggregated player stats"
        );
        stats
    }

    fn fold_hand(
        hand: &HandRecord,
        stats: &mut BTreeMap<PlayerId, PlayerStats>,
        trackers: &mut BTreeMap<PlayerId, StreakTracker>,
    ) {
        let ranks = ranks_of(&hand.raw_scores);

        for (player_id, &raw_score) in &hand.raw_scores {
            let Some(entry) = stats.get_mut(player_id) else {
                continue;
            };
            let tracker = trackers.entry(player_id.clone()).or_default();

            entry.total_raw_score += i64::from(raw_score);
            if raw_score < 0 {
                entry.busted_count += 1;
            }
            tracker.record_raw(raw_score, &mut entry.max_streak);

            if let Some(&rank) = ranks.get(player_id) {
                let index = (rank as usize).saturating_sub(1).min(SEATS - 1);
                entry.ranks[index] += 1;
                tracker.record_rank(rank, &mut entry.max_streak);
            }
            entry.total_hanchans += 1;
        }

        for event in &hand.yakuman_events {
            if let Some(entry) = stats.get_mut(&event.player_id) {
                entry.yakuman_count += event.yakumans.len() as u32;
            }
        }
        for penalty in &hand.penalties {
            if let Some(entry) = stats.get_mut(&penalty.player_id) {
                entry.penalty_count += penalty.count;
            }
        }
    }

    fn derive_rates(entry: &mut PlayerStats) {
        if entry.total_hanchans == 0 {
            return;
        }
        let hands = f64::from(entry.total_hanchans);
        let rank_sum: u32 = entry
            .ranks
            .iter()
            .enumerate()
            .map(|(index, count)| (index as u32 + 1) * count)
            .sum();

        entry.avg_rank = f64::from(rank_sum) / hands;
        entry.top_rate = percentage(entry.ranks[0], hands);
        entry.rentai_rate = percentage(entry.ranks[0] + entry.ranks[1], hands);
        entry.last_rate = percentage(entry.ranks[SEATS - 1], hands);
        entry.busted_rate = percentage(entry.busted_count, hands);
        entry.avg_raw_score = round_to_hundred(entry.total_raw_score as f64 / hands);
    }
}

fn percentage(count: u32, hands: f64) -> f64 {
    f64::from(count) * 100.0 / hands
}

/// Nearest hundred, halves rounded upwards.
fn round_to_hundred(value: f64) -> i64 {
    (value / 100.0 + 0.5).floor() as i64 * 100
}
