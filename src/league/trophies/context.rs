use std::collections::{BTreeMap, BTreeSet};

use super::TrophyOptions;
use crate::league::converter::{HandSettlement, ScoreConverter};
use crate::league::models::{GameRecord, PlayerId, PlayerStats, SEATS};
use crate::league::yakuman::Yakuman;

/// One hand as seen by a single player.
#[derive(Debug, Clone, PartialEq)]
pub struct HandOutcome {
    pub game_index: usize,
    pub hand_index: usize,
    pub raw_score: i32,
    pub rank: u8,
    /// Limit hands this player recorded in the hand.
    pub yakuman: usize,
    /// Raw-score gap between first and second place in the hand.
    pub top_gap: i64,
    /// No two players in the hand shared a rank.
    pub distinct_ranks: bool,
    /// Every other player finished the hand with negative points.
    pub others_negative: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyRecord {
    pub point_gain: f64,
    pub raw_scores: Vec<i32>,
    pub yakuman_events: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodTally {
    pub hands: u32,
    pub rank_sum: u32,
    pub lasts: u32,
}

impl PeriodTally {
    fn record(&mut self, rank: u8) {
        self.hands += 1;
        self.rank_sum += u32::from(rank);
        if rank as usize == SEATS {
            self.lasts += 1;
        }
    }
}

/// Everything the trophy predicates read, built once per evaluation pass.
pub struct EvaluationContext<'a> {
    pub games: Vec<&'a GameRecord>,
    /// Per game, per hand.
    pub settlements: Vec<Vec<HandSettlement>>,
    pub stats: &'a BTreeMap<PlayerId, PlayerStats>,
    pub options: TrophyOptions,
    /// Day keys in chronological order with the indices of their games.
    pub days: Vec<(String, Vec<usize>)>,
    daily: BTreeMap<PlayerId, BTreeMap<String, DailyRecord>>,
    monthly: BTreeMap<PlayerId, BTreeMap<(i32, u32), PeriodTally>>,
    yearly: BTreeMap<PlayerId, BTreeMap<i32, PeriodTally>>,
    timelines: BTreeMap<PlayerId, Vec<HandOutcome>>,
    yakuman_kinds: BTreeMap<PlayerId, BTreeSet<Yakuman>>,
    day_best: BTreeMap<String, i32>,
}

impl<'a> EvaluationContext<'a> {
    pub fn build(
        games: &'a [GameRecord],
        stats: &'a BTreeMap<PlayerId, PlayerStats>,
        options: TrophyOptions,
    ) -> Self {
        let mut ordered: Vec<&'a GameRecord> = games.iter().collect();
        ordered.sort_by_key(|game| game.created_at);

        let settlements: Vec<Vec<HandSettlement>> = ordered
            .iter()
            .map(|game| {
                let converter = ScoreConverter::new(&game.rules);
                game.hands
                    .iter()
                    .map(|hand| converter.convert(&hand.raw_scores))
                    .collect()
            })
            .collect();

        let mut context = Self {
            games: ordered,
            settlements,
            stats,
            options,
            days: Vec::new(),
            daily: BTreeMap::new(),
            monthly: BTreeMap::new(),
            yearly: BTreeMap::new(),
            timelines: BTreeMap::new(),
            yakuman_kinds: BTreeMap::new(),
            day_best: BTreeMap::new(),
        };
        context.index();
        context
    }

    fn index(&mut self) {
        for (game_index, game) in self.games.iter().enumerate() {
            let day = game.day_key().to_string();
            match self.days.last_mut() {
                Some((last, indices)) if *last == day => indices.push(game_index),
                _ => match self.days.iter_mut().find(|(key, _)| *key == day) {
                    Some((_, indices)) => indices.push(game_index),
                    None => self.days.push((day.clone(), vec![game_index])),
                },
            }

            for (player_id, points) in &game.total_points {
                self.daily
                    .entry(player_id.clone())
                    .or_default()
                    .entry(day.clone())
                    .or_default()
                    .point_gain += points;
            }

            for (hand_index, hand) in game.hands.iter().enumerate() {
                let settlement = &self.settlements[game_index][hand_index];
                let top_gap = top_gap(hand.raw_scores.values().copied());
                let distinct_ranks = settlement
                    .raw_ranks
                    .values()
                    .collect::<BTreeSet<_>>()
                    .len()
                    == hand.raw_scores.len();

                for (player_id, &raw_score) in &hand.raw_scores {
                    let rank = settlement.rank_of(player_id).unwrap_or(SEATS as u8);
                    let others_negative = settlement
                        .points
                        .iter()
                        .filter(|(other, _)| *other != player_id)
                        .all(|(_, &p)| p < 0.0);

                    let daily = self
                        .daily
                        .entry(player_id.clone())
                        .or_default()
                        .entry(day.clone())
                        .or_default();
                    daily.raw_scores.push(raw_score);
                    let best = self.day_best.entry(day.clone()).or_insert(raw_score);
                    *best = (*best).max(raw_score);

                    if let Some(month) = game.month() {
                        self.monthly
                            .entry(player_id.clone())
                            .or_default()
                            .entry(month)
                            .or_default()
                            .record(rank);
                    }
                    if let Some(year) = game.year() {
                        self.yearly
                            .entry(player_id.clone())
                            .or_default()
                            .entry(year)
                            .or_default()
                            .record(rank);
                    }

                    self.timelines
                        .entry(player_id.clone())
                        .or_default()
                        .push(HandOutcome {
                            game_index,
                            hand_index,
                            raw_score,
                            rank,
                            yakuman: hand.yakuman_count_for(player_id),
                            top_gap,
                            distinct_ranks,
                            others_negative,
                        });
                }

                for event in &hand.yakuman_events {
                    self.daily
                        .entry(event.player_id.clone())
                        .or_default()
                        .entry(day.clone())
                        .or_default()
                        .yakuman_events += 1;
                    self.yakuman_kinds
                        .entry(event.player_id.clone())
                        .or_default()
                        .extend(event.yakumans.iter().copied());
                }
            }
        }
    }

    pub fn stats(&self, player_id: &str) -> Option<&PlayerStats> {
        self.stats.get(player_id)
    }

    pub fn daily(&self, player_id: &str) -> impl Iterator<Item = (&String, &DailyRecord)> {
        self.daily.get(player_id).into_iter().flatten()
    }

    pub fn monthly(&self, player_id: &str) -> impl Iterator<Item = &PeriodTally> {
        self.monthly.get(player_id).into_iter().flat_map(|m| m.values())
    }

    pub fn yearly(&self, player_id: &str) -> impl Iterator<Item = &PeriodTally> {
        self.yearly.get(player_id).into_iter().flat_map(|m| m.values())
    }

    /// The player's hands, oldest first.
    pub fn timeline(&self, player_id: &str) -> &[HandOutcome] {
        self.timelines
            .get(player_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn yakuman_kinds(&self, player_id: &str) -> Option<&BTreeSet<Yakuman>> {
        self.yakuman_kinds.get(player_id)
    }

    /// Highest raw score anyone recorded on `day`.
    pub fn day_best(&self, day: &str) -> Option<i32> {
        self.day_best.get(day).copied()
    }

    /// Indices of the player's sessions, oldest first.
    pub fn sessions_of<'s>(&'s self, player_id: &'s str) -> impl Iterator<Item = usize> + 's {
        self.games
            .iter()
            .enumerate()
            .filter(move |(_, game)| game.has_player(player_id))
            .map(|(index, _)| index)
    }
}

fn top_gap(scores: impl Iterator<Item = i32>) -> i64 {
    let mut sorted: Vec<i64> = scores.map(i64::from).collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    match sorted.as_slice() {
        [first, second, ..] => first - second,
        _ => 0,
    }
}
