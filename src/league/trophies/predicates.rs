//! Trophy predicates. Each one answers a single question about a single
//! player and reads nothing but the shared evaluation context.

use std::collections::BTreeMap;

use super::context::{EvaluationContext, HandOutcome, PeriodTally};
use super::DistributionalAward;
use crate::league::models::SEATS;
use crate::league::yakuman::Yakuman;

const RECENT_WINDOW: usize = 100;

macro_rules! stat_threshold {
    ($($name:ident: |$stats:ident| $condition:expr;)*) => {
        $(
            pub fn $name(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
                ctx.stats(player_id).is_some_and(|$stats| $condition)
            }
        )*
    };
}

macro_rules! yakuman_kind {
    ($($name:ident => $kind:ident;)*) => {
        $(
            pub fn $name(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
                ctx.yakuman_kinds(player_id)
                    .is_some_and(|kinds| kinds.contains(&Yakuman::$kind))
            }
        )*
    };
}

stat_threshold! {
    first_game: |s| s.game_count >= 1;
    first_top: |s| s.ranks[0] >= 1;
    ten_games: |s| s.total_hanchans >= 10;
    first_busted: |s| s.busted_count >= 1;
    first_last: |s| s.ranks[SEATS - 1] >= 1;
    twenty_five_games: |s| s.total_hanchans >= 25;
    yakuman: |s| s.yakuman_count >= 1;
    five_rentai: |s| s.max_streak.rentai >= 5;
    ten_tops: |s| s.ranks[0] >= 10;
    fifty_tops: |s| s.ranks[0] >= 50;
    ten_no_last: |s| s.max_streak.no_last >= 10;
    three_same_rank: |s| s.max_streak.same_rank >= 3;
    two_hundred_games: |s| s.total_hanchans >= 200;
    four_top_streak: |s| s.max_streak.top >= 4;
    twenty_five_no_last: |s| s.max_streak.no_last >= 25;
    five_top_streak: |s| s.max_streak.top >= 5;
    thirty_no_last: |s| s.max_streak.no_last >= 30;
}

yakuman_kind! {
    kokushi => Kokushi;
    suuankou => Suuankou;
    daisangen => Daisangen;
    tsuuiisou => Tsuuiisou;
    ryuuiisou => Ryuuiisou;
    chinroutou => Chinroutou;
    chuuren => Chuuren;
    shousuushii => Shousuushii;
    tenhou => Tenhou;
    chiihou => Chiihou;
    kokushi13 => Kokushi13;
    suuankou_tanki => SuuankouTanki;
    junsei_chuuren => JunseiChuuren;
    daisuushii => Daisuushii;
}

pub fn three_yakuman_types(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    ctx.yakuman_kinds(player_id)
        .is_some_and(|kinds| kinds.len() >= 3)
}

// Single hands

fn any_hand(
    ctx: &EvaluationContext<'_>,
    player_id: &str,
    condition: impl Fn(&HandOutcome) -> bool,
) -> bool {
    ctx.timeline(player_id).iter().any(condition)
}

pub fn score_under_1000(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    any_hand(ctx, player_id, |hand| (0..1000).contains(&hand.raw_score))
}

pub fn score_over_50k(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    any_hand(ctx, player_id, |hand| hand.raw_score >= 50_000)
}

pub fn score_under_minus_30k(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    any_hand(ctx, player_id, |hand| hand.raw_score < -30_000)
}

pub fn close_win(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    any_hand(ctx, player_id, |hand| {
        hand.rank == 1 && hand.top_gap > 0 && hand.top_gap < 1000
    })
}

pub fn all_negative_win(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    any_hand(ctx, player_id, |hand| hand.rank == 1 && hand.others_negative)
}

pub fn reroll(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    any_hand(ctx, player_id, |hand| {
        hand.raw_score == ctx.games[hand.game_index].rules.base_point
    })
}

pub fn ten_close_games(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    ctx.timeline(player_id)
        .iter()
        .filter(|hand| hand.top_gap <= 1000)
        .count()
        >= 10
}

// Days, months and years

pub fn first_plus_day(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    ctx.daily(player_id).any(|(_, day)| day.point_gain > 0.0)
}

pub fn plus_100_day(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    ctx.daily(player_id).any(|(_, day)| day.point_gain >= 100.0)
}

pub fn daily_high_score(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    ctx.daily(player_id).any(|(key, day)| {
        day.raw_scores
            .iter()
            .max()
            .is_some_and(|best| ctx.day_best(key) == Some(*best))
    })
}

pub fn two_yakuman_day(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    ctx.daily(player_id).any(|(_, day)| day.yakuman_events >= 2)
}

pub fn monthly_player(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    ctx.monthly(player_id).any(|month| month.hands >= 15)
}

pub fn undefeated_month(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    ctx.monthly(player_id)
        .any(|month| month.hands >= 10 && month.lasts == 0)
}

/// Average rank at or below `tenths / 10` over at least 50 hands.
fn strong_year(year: &PeriodTally, tenths: u64) -> bool {
    year.hands >= 50 && u64::from(year.rank_sum) * 10 <= tenths * u64::from(year.hands)
}

pub fn avg_rank_2_3(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    ctx.yearly(player_id).any(|year| strong_year(year, 23))
}

pub fn yearly_avg_rank_2_0(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    ctx.yearly(player_id).any(|year| strong_year(year, 20))
}

pub fn recent_100_avg_rank_1_5(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    let timeline = ctx.timeline(player_id);
    if timeline.len() < RECENT_WINDOW {
        return false;
    }
    let rank_sum: usize = timeline[timeline.len() - RECENT_WINDOW..]
        .iter()
        .map(|hand| hand.rank as usize)
        .sum();
    rank_sum * 10 <= 15 * RECENT_WINDOW
}

// Sessions

fn session_gain(ctx: &EvaluationContext<'_>, game_index: usize, player_id: &str) -> i64 {
    let game = ctx.games[game_index];
    game.hands
        .iter()
        .filter_map(|hand| hand.raw_scores.get(player_id))
        .map(|&raw| i64::from(raw) - i64::from(game.rules.base_point))
        .sum()
}

fn session_gain_at_least(ctx: &EvaluationContext<'_>, player_id: &str, threshold: i64) -> bool {
    ctx.sessions_of(player_id)
        .any(|game_index| session_gain(ctx, game_index, player_id) >= threshold)
}

pub fn finish_over_50k(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    session_gain_at_least(ctx, player_id, 50_000)
}

pub fn finish_over_70k(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    session_gain_at_least(ctx, player_id, 70_000)
}

pub fn finish_over_100k(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    session_gain_at_least(ctx, player_id, 100_000)
}

fn session_totals(ctx: &EvaluationContext<'_>, player_id: &str) -> Vec<f64> {
    ctx.sessions_of(player_id)
        .filter_map(|game_index| ctx.games[game_index].total_points.get(player_id).copied())
        .collect()
}

pub fn zero_point_finish(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    session_totals(ctx, player_id)
        .iter()
        .any(|total| (total * 10.0).round() == 0.0)
}

pub fn self_redemption(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    session_totals(ctx, player_id)
        .windows(2)
        .any(|pair| pair[0] < 0.0 && pair[1] >= -pair[0])
}

pub fn dramatic_finish(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    ctx.days.iter().any(|(_, games)| {
        let Some(&last_game) = games
            .iter()
            .rev()
            .find(|&&index| !ctx.games[index].hands.is_empty())
        else {
            return false;
        };
        let last_hand = ctx.games[last_game].hands.len() - 1;
        let finale = &ctx.settlements[last_game][last_hand];
        if finale.points_of(player_id).is_none() {
            return false;
        }

        let mut standings: BTreeMap<&str, f64> = BTreeMap::new();
        for &game_index in games {
            for (hand_index, settlement) in ctx.settlements[game_index].iter().enumerate() {
                if (game_index, hand_index) == (last_game, last_hand) {
                    continue;
                }
                for (id, points) in &settlement.points {
                    *standings.entry(id.as_str()).or_default() += points;
                }
            }
        }
        let trailing_before = !sole_leader(&standings, player_id);

        for (id, points) in &finale.points {
            *standings.entry(id.as_str()).or_default() += points;
        }
        trailing_before && sole_leader(&standings, player_id)
    })
}

fn sole_leader(standings: &BTreeMap<&str, f64>, player_id: &str) -> bool {
    let mine = standings.get(player_id).copied().unwrap_or_default();
    standings
        .iter()
        .filter(|(id, _)| **id != player_id)
        .all(|(_, &other)| other < mine)
}

// Sequences

pub fn yakuman_then_busted_last(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    ctx.timeline(player_id).windows(2).any(|pair| {
        pair[0].yakuman > 0 && pair[1].raw_score < 0 && pair[1].rank as usize == SEATS
    })
}

pub fn chaos_theory(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    ctx.timeline(player_id)
        .windows(4)
        .any(|run| run.iter().all(|hand| hand.distinct_ranks))
}

pub fn reincarnation(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    (1..ctx.games.len()).any(|current| {
        let previous = current - 1;
        let (before, after) = (ctx.games[previous], ctx.games[current]);
        if !after.has_player(player_id) || !after.same_roster(before) {
            return false;
        }
        let shared_hands = before.hands.len().min(after.hands.len());
        shared_hands > 0
            && (0..shared_hands).all(|hand_index| {
                let (old, new) = (
                    &ctx.settlements[previous][hand_index],
                    &ctx.settlements[current][hand_index],
                );
                after.player_ids.iter().all(|id| {
                    matches!(
                        (old.rank_of(id), new.rank_of(id)),
                        (Some(a), Some(b)) if usize::from(a + b) == SEATS + 1
                    )
                })
            })
    })
}

// Whole-table distributions

fn distribution_awarded(
    ctx: &EvaluationContext<'_>,
    player_id: &str,
    matches: impl Fn(&[i32]) -> bool,
) -> bool {
    let winner_only = match ctx.options.distributional_award {
        DistributionalAward::Nobody => return false,
        DistributionalAward::AllParticipants => false,
        DistributionalAward::WinnerOnly => true,
    };
    any_hand(ctx, player_id, |hand| {
        if winner_only && hand.rank != 1 {
            return false;
        }
        let mut scores: Vec<i32> = ctx.games[hand.game_index].hands[hand.hand_index]
            .raw_scores
            .values()
            .copied()
            .collect();
        scores.sort_unstable_by(|a, b| b.cmp(a));
        matches(&scores)
    })
}

pub fn perfect_world(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    distribution_awarded(ctx, player_id, |scores| {
        scores == [40_000, 30_000, 20_000, 10_000]
    })
}

pub fn peaceful_village(ctx: &EvaluationContext<'_>, player_id: &str) -> bool {
    distribution_awarded(ctx, player_id, |scores| {
        scores.len() == SEATS && scores.windows(2).all(|pair| pair[0] == pair[1])
    })
}
