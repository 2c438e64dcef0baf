use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::models::{DraftHand, OkaTiePolicy, PlayerId, RuleSettings};
use super::ranking::{competition_ranks, rank_groups};

/// Ranks and point values for one hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandSettlement {
    pub raw_ranks: BTreeMap<PlayerId, u8>,
    pub points: BTreeMap<PlayerId, f64>,
    pub point_ranks: BTreeMap<PlayerId, u8>,
}

impl HandSettlement {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn rank_of(&self, player_id: &str) -> Option<u8> {
        self.raw_ranks.get(player_id).copied()
    }

    pub fn points_of(&self, player_id: &str) -> Option<f64> {
        self.points.get(player_id).copied()
    }
}

/// Turns raw scores into uma/oka adjusted points under one rule set.
#[derive(Debug, Clone, Copy)]
pub struct ScoreConverter<'a> {
    rules: &'a RuleSettings,
}

impl<'a> ScoreConverter<'a> {
    pub fn new(rules: &'a RuleSettings) -> Self {
        Self { rules }
    }

    pub fn convert(&self, scores: &BTreeMap<PlayerId, i32>) -> HandSettlement {
        let oka = self.rules.oka();
        let return_point = f64::from(self.rules.return_point);
        let groups = rank_groups(scores.iter().map(|(id, score)| (id.as_str(), *score)));

        let mut settlement = HandSettlement::default();
        for group in &groups {
            let size = group.len();
            let end = (group.cursor + size).min(self.rules.uma.len());
            let uma_share: f64 = self.rules.uma[group.cursor.min(end)..end].iter().sum::<f64>()
                / size as f64;
            let oka_share = match (group.cursor, self.rules.oka_tie_policy) {
                (0, OkaTiePolicy::Split) => oka / size as f64,
                (0, OkaTiePolicy::FullToEach) => oka,
                _ => 0.0,
            };
            let base = (f64::from(group.value) - return_point) / 1000.0;

            for &player in &group.members {
                settlement.raw_ranks.insert(player.to_string(), group.rank());
                settlement
                    .points
                    .insert(player.to_string(), base + uma_share + oka_share);
            }
        }

        settlement.point_ranks = competition_ranks(
            settlement
                .points
                .iter()
                .map(|(id, points)| (id.as_str(), *points)),
        );
        settlement
    }

    /// Empty settlement until every seat has a score.
    pub fn convert_draft(&self, hand: &DraftHand) -> HandSettlement {
        hand.complete_scores()
            .map(|scores| self.convert(&scores))
            .unwrap_or_default()
    }
}
