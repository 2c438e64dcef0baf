use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};

use super::context::EvaluationContext;
use super::predicates as p;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrophyTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Crystal,
    Chaos,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrophyId {
    // bronze
    FirstGame,
    FirstTop,
    FirstPlusDay,
    TenGames,
    FirstBusted,
    FirstLast,
    #[serde(rename = "score_under_1000")]
    #[strum(serialize = "score_under_1000")]
    ScoreUnder1000,
    DailyHighScore,
    // silver
    TwentyFiveGames,
    Yakuman,
    #[serde(rename = "plus_100_day")]
    #[strum(serialize = "plus_100_day")]
    Plus100Day,
    FiveRentai,
    #[serde(rename = "score_over_50k")]
    #[strum(serialize = "score_over_50k")]
    ScoreOver50k,
    DramaticFinish,
    TenTops,
    MonthlyPlayer,
    ZeroPointFinish,
    // gold
    FiftyTops,
    SelfRedemption,
    CloseWin,
    AllNegativeWin,
    TenNoLast,
    ThreeSameRank,
    #[serde(rename = "finish_over_50k")]
    #[strum(serialize = "finish_over_50k")]
    FinishOver50k,
    #[serde(rename = "score_under_minus_30k")]
    #[strum(serialize = "score_under_minus_30k")]
    ScoreUnderMinus30k,
    // platinum
    TwoHundredGames,
    FourTopStreak,
    TwentyFiveNoLast,
    #[serde(rename = "finish_over_70k")]
    #[strum(serialize = "finish_over_70k")]
    FinishOver70k,
    #[serde(rename = "avg_rank_2_3")]
    #[strum(serialize = "avg_rank_2_3")]
    AvgRank23,
    TenCloseGames,
    UndefeatedMonth,
    Kokushi,
    Suuankou,
    Daisangen,
    Tsuuiisou,
    Ryuuiisou,
    Chinroutou,
    Chuuren,
    Shousuushii,
    // crystal
    FiveTopStreak,
    #[serde(rename = "yearly_avg_rank_2_0")]
    #[strum(serialize = "yearly_avg_rank_2_0")]
    YearlyAvgRank20,
    #[serde(rename = "recent_100_avg_rank_1_5")]
    #[strum(serialize = "recent_100_avg_rank_1_5")]
    Recent100AvgRank15,
    ThirtyNoLast,
    #[serde(rename = "finish_over_100k")]
    #[strum(serialize = "finish_over_100k")]
    FinishOver100k,
    TwoYakumanDay,
    ThreeYakumanTypes,
    Tenhou,
    Chiihou,
    #[serde(rename = "kokushi13")]
    #[strum(serialize = "kokushi13")]
    Kokushi13,
    SuuankouTanki,
    JunseiChuuren,
    Daisuushii,
    // chaos
    YakumanThenBustedLast,
    PerfectWorld,
    Reincarnation,
    Reroll,
    ChaosTheory,
    PeacefulVillage,
}

pub type TrophyCheck = fn(&EvaluationContext<'_>, &str) -> bool;

/// One entry of the trophy registry.
#[derive(Clone, Copy)]
pub struct TrophyRule {
    pub id: TrophyId,
    pub tier: TrophyTier,
    /// Hidden from the catalogue display until earned.
    pub secret: bool,
    pub check: TrophyCheck,
}

impl std::fmt::Debug for TrophyRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrophyRule")
            .field("id", &self.id)
            .field("tier", &self.tier)
            .field("secret", &self.secret)
            .finish()
    }
}

const fn rule(id: TrophyId, tier: TrophyTier, check: TrophyCheck) -> TrophyRule {
    TrophyRule {
        id,
        tier,
        secret: false,
        check,
    }
}

const fn secret(id: TrophyId, tier: TrophyTier, check: TrophyCheck) -> TrophyRule {
    TrophyRule {
        id,
        tier,
        secret: true,
        check,
    }
}

use TrophyId as T;
use TrophyTier::*;

pub static CATALOGUE: &[TrophyRule] = &[
    rule(T::FirstGame, Bronze, p::first_game),
    rule(T::FirstTop, Bronze, p::first_top),
    rule(T::FirstPlusDay, Bronze, p::first_plus_day),
    rule(T::TenGames, Bronze, p::ten_games),
    rule(T::FirstBusted, Bronze, p::first_busted),
    rule(T::FirstLast, Bronze, p::first_last),
    rule(T::ScoreUnder1000, Bronze, p::score_under_1000),
    rule(T::DailyHighScore, Bronze, p::daily_high_score),
    rule(T::TwentyFiveGames, Silver, p::twenty_five_games),
    rule(T::Yakuman, Silver, p::yakuman),
    rule(T::Plus100Day, Silver, p::plus_100_day),
    rule(T::FiveRentai, Silver, p::five_rentai),
    rule(T::ScoreOver50k, Silver, p::score_over_50k),
    rule(T::DramaticFinish, Silver, p::dramatic_finish),
    rule(T::TenTops, Silver, p::ten_tops),
    rule(T::MonthlyPlayer, Silver, p::monthly_player),
    rule(T::ZeroPointFinish, Silver, p::zero_point_finish),
    rule(T::FiftyTops, Gold, p::fifty_tops),
    rule(T::SelfRedemption, Gold, p::self_redemption),
    rule(T::CloseWin, Gold, p::close_win),
    rule(T::AllNegativeWin, Gold, p::all_negative_win),
    rule(T::TenNoLast, Gold, p::ten_no_last),
    rule(T::ThreeSameRank, Gold, p::three_same_rank),
    rule(T::FinishOver50k, Gold, p::finish_over_50k),
    rule(T::ScoreUnderMinus30k, Gold, p::score_under_minus_30k),
    rule(T::TwoHundredGames, Platinum, p::two_hundred_games),
    rule(T::FourTopStreak, Platinum, p::four_top_streak),
    rule(T::TwentyFiveNoLast, Platinum, p::twenty_five_no_last),
    rule(T::FinishOver70k, Platinum, p::finish_over_70k),
    rule(T::AvgRank23, Platinum, p::avg_rank_2_3),
    rule(T::TenCloseGames, Platinum, p::ten_close_games),
    rule(T::UndefeatedMonth, Platinum, p::undefeated_month),
    secret(T::Kokushi, Platinum, p::kokushi),
    secret(T::Suuankou, Platinum, p::suuankou),
    secret(T::Daisangen, Platinum, p::daisangen),
    secret(T::Tsuuiisou, Platinum, p::tsuuiisou),
    secret(T::Ryuuiisou, Platinum, p::ryuuiisou),
    secret(T::Chinroutou, Platinum, p::chinroutou),
    secret(T::Chuuren, Platinum, p::chuuren),
    secret(T::Shousuushii, Platinum, p::shousuushii),
    rule(T::FiveTopStreak, Crystal, p::five_top_streak),
    rule(T::YearlyAvgRank20, Crystal, p::yearly_avg_rank_2_0),
    rule(T::Recent100AvgRank15, Crystal, p::recent_100_avg_rank_1_5),
    rule(T::ThirtyNoLast, Crystal, p::thirty_no_last),
    rule(T::FinishOver100k, Crystal, p::finish_over_100k),
    rule(T::TwoYakumanDay, Crystal, p::two_yakuman_day),
    rule(T::ThreeYakumanTypes, Crystal, p::three_yakuman_types),
    secret(T::Tenhou, Crystal, p::tenhou),
    secret(T::Chiihou, Crystal, p::chiihou),
    secret(T::Kokushi13, Crystal, p::kokushi13),
    secret(T::SuuankouTanki, Crystal, p::suuankou_tanki),
    secret(T::JunseiChuuren, Crystal, p::junsei_chuuren),
    secret(T::Daisuushii, Crystal, p::daisuushii),
    rule(T::YakumanThenBustedLast, Chaos, p::yakuman_then_busted_last),
    rule(T::PerfectWorld, Chaos, p::perfect_world),
    rule(T::Reincarnation, Chaos, p::reincarnation),
    rule(T::Reroll, Chaos, p::reroll),
    rule(T::ChaosTheory, Chaos, p::chaos_theory),
    rule(T::PeacefulVillage, Chaos, p::peaceful_village),
];

impl TrophyId {
    pub fn rule(self) -> &'static TrophyRule {
        CATALOGUE
            .iter()
            .find(|rule| rule.id == self)
            .unwrap_or_else(|| unreachable!("{self} is missing from the catalogue"))
    }

    pub fn tier(self) -> TrophyTier {
        self.rule().tier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use strum::IntoEnumIterator;

    #[test]
    fn every_id_is_registered_once() {
        let registered: Vec<TrophyId> = CATALOGUE.iter().map(|rule| rule.id).collect();
        let unique: BTreeSet<TrophyId> = registered.iter().copied().collect();
        assert_eq!(registered.len(), unique.len());
        assert_eq!(unique, TrophyId::iter().collect::<BTreeSet<_>>());
    }

    #[test]
    fn catalogue_is_ordered_by_tier() {
        let tiers: Vec<TrophyTier> = CATALOGUE.iter().map(|rule| rule.tier).collect();
        let mut sorted = tiers.clone();
        sorted.sort();
        assert_eq!(tiers, sorted);
        assert_eq!(
            TrophyTier::iter()
                .map(|tier| CATALOGUE.iter().filter(|r| r.tier == tier).count())
                .collect::<Vec<_>>(),
            vec![8, 9, 8, 15, 13, 6]
        );
    }

    #[test]
    fn ids_keep_their_stored_names() {
        assert_eq!(TrophyId::Recent100AvgRank15.as_ref(), "recent_100_avg_rank_1_5");
        assert_eq!(TrophyId::DailyHighScore.to_string(), "daily_high_score");
        assert_eq!(
            serde_json::to_string(&TrophyId::ScoreUnderMinus30k).unwrap(),
            "\"score_under_minus_30k\""
        );
        assert_eq!(TrophyId::Kokushi13.tier(), TrophyTier::Crystal);
        assert!(TrophyId::Tenhou.rule().secret);
    }
}
