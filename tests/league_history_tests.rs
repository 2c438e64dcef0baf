mod utils;

use mahjong_league::league::{
    day_timeline, game_years, leaderboard, point_history, DistributionalAward, GameRecord,
    Period, Player, PlayerStats, RuleSettings, StatsAggregator, TrophyEvaluator, TrophyId,
    TrophyOptions, Yakuman,
};
use std::collections::BTreeMap;
use utils::HistoryBuilder;

/// Two sessions on different months:
///
/// | hand | a     | b     | c     | d     |
/// |------|-------|-------|-------|-------|
/// | 1    | 40000 | 30000 | 20000 | 10000 |
/// | 2    | 10000 | 20000 | 30000 | 40000 |
/// | 3    | 51000 | 25000 | 25000 | -1000 |
fn two_month_history() -> (Vec<Player>, Vec<GameRecord>) {
    HistoryBuilder::new()
        .with_four_players()
        .game(
            "2024/5/3(金)",
            &[[40000, 30000, 20000, 10000], [10000, 20000, 30000, 40000]],
        )
        .game("2024/6/7(金)", &[[51000, 25000, 25000, -1000]])
        .yakuman("a", Yakuman::Daisangen)
        .build()
}

fn stats_for(
    players: &[Player],
    games: &[GameRecord],
    period: Period,
) -> (Vec<GameRecord>, BTreeMap<String, PlayerStats>) {
    let games = period.filter(games);
    let stats = StatsAggregator::new(players).aggregate(&games);
    (games, stats)
}

#[test]
fn finalized_sessions_carry_converted_totals() {
    let (_, games) = two_month_history();

    assert_eq!(games[0].total_points["a"], 10.0);
    assert_eq!(games[0].total_points["b"], -10.0);
    assert_eq!(games[1].total_points["a"], 71.0);
    assert_eq!(games[1].total_points["b"], -5.0);
    assert_eq!(games[1].total_points["d"], -61.0);

    for game in &games {
        let sum: f64 = game.total_points.values().sum();
        assert!(sum.abs() < 1e-9, "{} does not balance: {sum}", game.id);
    }
}

#[test]
fn aggregates_whole_history() {
    let (players, games) = two_month_history();
    let (_, stats) = stats_for(&players, &games, Period::All);

    let a = &stats["a"];
    assert_eq!(a.game_count, 2);
    assert_eq!(a.total_hanchans, 3);
    assert_eq!(a.ranks, [2, 0, 0, 1]);
    assert_eq!(a.total_points, 81.0);
    assert_eq!(a.avg_rank, 2.0);
    assert!((a.top_rate - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(a.total_raw_score, 101000);
    assert_eq!(a.avg_raw_score, 33700);
    assert_eq!(a.yakuman_count, 1);

    let b = &stats["b"];
    assert_eq!(b.ranks, [0, 2, 1, 0]);
    assert_eq!(b.total_points, -15.0);

    let c = &stats["c"];
    assert_eq!(c.max_streak.same_rank, 2);

    let d = &stats["d"];
    assert_eq!(d.ranks, [1, 0, 0, 2]);
    assert_eq!(d.busted_count, 1);
    assert_eq!(d.max_streak.no_tobi, 2);
    assert_eq!(d.avg_raw_score, 16300);
    assert_eq!(d.total_points, -51.0);

    let order: Vec<&str> = leaderboard(&stats).iter().map(|p| p.id.as_str()).collect();
    assert_eq!(order, ["a", "b", "c", "d"]);
}

#[test]
fn filters_by_month_and_year() {
    let (players, games) = two_month_history();

    let (june, stats) = stats_for(&players, &games, Period::Month { year: 2024, month: 6 });
    assert_eq!(june.len(), 1);
    assert_eq!(stats["a"].ranks, [1, 0, 0, 0]);
    assert_eq!(stats["a"].total_points, 71.0);
    assert_eq!(stats["a"].game_count, 1);

    let (none, stats) = stats_for(&players, &games, Period::Year { year: 2023 });
    assert!(none.is_empty());
    assert!(leaderboard(&stats).is_empty());
    assert_eq!(stats["a"].total_hanchans, 0);

    assert_eq!(game_years(&games), vec![2024]);
}

#[test]
fn point_history_follows_day_timeline() {
    let (_, games) = two_month_history();
    let timeline = day_timeline(&games);

    assert_eq!(timeline, vec!["2024/5/3", "2024/6/7"]);
    assert_eq!(point_history("a", &games, &timeline), vec![10.0, 81.0]);
    assert_eq!(point_history("d", &games, &timeline), vec![10.0, -51.0]);
}

#[test]
fn trophies_from_history() {
    let (players, games) = two_month_history();
    let (games, stats) = stats_for(&players, &games, Period::All);
    let trophies = TrophyEvaluator::default().evaluate(&games, &stats);

    let a = &trophies["a"];
    for earned in [
        TrophyId::FirstGame,
        TrophyId::FirstTop,
        TrophyId::FirstPlusDay,
        TrophyId::ScoreOver50k,
        TrophyId::DailyHighScore,
        TrophyId::Yakuman,
        TrophyId::Daisangen,
        TrophyId::PerfectWorld,
    ] {
        assert!(a[&earned], "a should have {earned}");
    }
    assert!(!a[&TrophyId::FirstBusted]);
    assert!(!a[&TrophyId::Reroll]);

    assert!(trophies["b"][&TrophyId::Reroll]);
    assert!(!trophies["b"][&TrophyId::FirstTop]);
    assert!(!trophies["b"][&TrophyId::DailyHighScore]);

    let d = &trophies["d"];
    assert!(d[&TrophyId::FirstBusted]);
    assert!(d[&TrophyId::FirstLast]);
    assert!(d[&TrophyId::DailyHighScore]);
    assert!(!d[&TrophyId::Yakuman]);

    assert!(trophies
        .values()
        .all(|flags| !flags[&TrophyId::PeacefulVillage]));
}

#[test]
fn distributional_award_policy_controls_perfect_world() {
    let (players, games) = two_month_history();
    let (games, stats) = stats_for(&players, &games, Period::All);

    let evaluate = |distributional_award: DistributionalAward| {
        TrophyEvaluator::new(TrophyOptions {
            distributional_award,
        })
        .evaluate(&games, &stats)
        .into_iter()
        .filter(|(_, flags)| flags[&TrophyId::PerfectWorld])
        .map(|(id, _)| id)
        .collect::<Vec<_>>()
    };

    assert_eq!(
        evaluate(DistributionalAward::AllParticipants),
        ["a", "b", "c", "d"]
    );
    assert_eq!(evaluate(DistributionalAward::WinnerOnly), ["a", "d"]);
    assert!(evaluate(DistributionalAward::Nobody).is_empty());
}

#[test]
fn sessions_settle_under_custom_uma() {
    let (players, games) = HistoryBuilder::new()
        .with_four_players()
        .with_rules(RuleSettings {
            uma: [20.0, 10.0, -10.0, -20.0],
            ..RuleSettings::default()
        })
        .game("2024/8/2(金)", &[[40000, 30000, 20000, 10000]])
        .build();

    assert_eq!(games[0].rules.uma, [20.0, 10.0, -10.0, -20.0]);
    assert_eq!(games[0].total_points["a"], 50.0);
    assert_eq!(games[0].total_points["d"], -40.0);

    let (_, stats) = stats_for(&players, &games, Period::All);
    assert_eq!(stats["b"].total_points, 10.0);
    assert_eq!(stats["c"].total_points, -20.0);
}
