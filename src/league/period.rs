//! Grouping by the textual date label `yyyy/m/d(weekday)`.
//!
//! Days are keyed by the label text before `(`, years and months by its
//! leading digits. Labels in any other shape simply fall out of the groups.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::models::GameRecord;

pub fn day_key(label: &str) -> &str {
    label.split('(').next().unwrap_or(label).trim()
}

pub fn year_of(label: &str) -> Option<i32> {
    label.get(..4)?.parse().ok()
}

pub fn month_of(label: &str) -> Option<(i32, u32)> {
    let mut parts = day_key(label).split('/');
    let year = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Period {
    #[default]
    All,
    Year {
        year: i32,
    },
    Month {
        year: i32,
        month: u32,
    },
}

impl Period {
    pub fn contains(&self, game: &GameRecord) -> bool {
        match *self {
            Period::All => true,
            Period::Year { year } => game.year() == Some(year),
            Period::Month { year, month } => game.month() == Some((year, month)),
        }
    }

    /// Games inside the period, oldest first.
    pub fn filter(&self, games: &[GameRecord]) -> Vec<GameRecord> {
        let mut selected: Vec<GameRecord> = games
            .iter()
            .filter(|game| self.contains(game))
            .cloned()
            .collect();
        selected.sort_by_key(|game| game.created_at);
        selected
    }
}

/// Distinct years with recorded games, newest first.
pub fn game_years(games: &[GameRecord]) -> Vec<i32> {
    let years: BTreeSet<i32> = games
        .iter()
        .map(|game| game.year().unwrap_or_else(|| game.created_at.year()))
        .collect();
    years.into_iter().rev().collect()
}

/// Distinct day keys in chronological order of first appearance.
pub fn day_timeline(games: &[GameRecord]) -> Vec<String> {
    let mut ordered: Vec<&GameRecord> = games.iter().collect();
    ordered.sort_by_key(|game| game.created_at);

    let mut seen = BTreeSet::new();
    ordered
        .into_iter()
        .map(GameRecord::day_key)
        .filter(|day| seen.insert(*day))
        .map(str::to_string)
        .collect()
}

/// Cumulative points of `player_id` at the end of each day in `timeline`.
pub fn point_history(player_id: &str, games: &[GameRecord], timeline: &[String]) -> Vec<f64> {
    let mut by_day: BTreeMap<&str, f64> = BTreeMap::new();
    for game in games.iter().filter(|game| game.has_player(player_id)) {
        let gained = game.total_points.get(player_id).copied().unwrap_or_default();
        *by_day.entry(game.day_key()).or_default() += gained;
    }

    let mut cumulative = 0.0;
    timeline
        .iter()
        .map(|day| {
            cumulative += by_day.get(day.as_str()).copied().unwrap_or_default();
            cumulative
        })
        .collect()
}
