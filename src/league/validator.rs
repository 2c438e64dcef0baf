use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument};

use super::converter::{HandSettlement, ScoreConverter};
use super::errors::ValidationError;
use super::models::{DraftHand, GameRecord, HandRecord, PlayerId, RuleSettings, SEATS};
use super::yakuman::first_conflict;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Every hand must be complete; used before saving.
    #[default]
    Strict,
    /// Incomplete hands are skipped; used for live previews.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettledHand {
    /// 1-based position in the form.
    pub number: usize,
    pub hand: HandRecord,
    pub settlement: HandSettlement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidatedForm {
    pub hands: Vec<SettledHand>,
    /// Running point total per player over the included hands.
    pub totals: BTreeMap<PlayerId, f64>,
    /// 1-based numbers of hands left out in lenient mode.
    pub skipped: Vec<usize>,
}

pub struct GameFormValidator<'a> {
    rules: &'a RuleSettings,
    mode: ValidationMode,
    roster: Option<&'a [PlayerId]>,
}

impl<'a> GameFormValidator<'a> {
    pub fn new(rules: &'a RuleSettings, mode: ValidationMode) -> Self {
        Self {
            rules,
            mode,
            roster: None,
        }
    }

    /// Restricts every score, yakuman and penalty to these players.
    pub fn with_roster(mut self, roster: &'a [PlayerId]) -> Self {
        self.roster = Some(roster);
        self
    }

    #[instrument(skip_all, fields(mode = ?self.mode, hands = hands.len()))]
    pub fn validate(&self, hands: &[DraftHand]) -> Result<ValidatedForm, ValidationError> {
        let result = self.settle_all(hands);
        match &result {
            Ok(form) => debug!(
                settled = form.hands.len(),
                skipped = form.skipped.len(),
                "Validated hands"
            ),
            Err(err) => info!(%err, "Rejected hands"),
        }
        result
    }

    fn settle_all(&self, hands: &[DraftHand]) -> Result<ValidatedForm, ValidationError> {
        if hands.is_empty() && self.mode == ValidationMode::Strict {
            return Err(ValidationError::NoHands);
        }

        let converter = ScoreConverter::new(self.rules);
        let mut form = ValidatedForm::default();

        for (offset, draft) in hands.iter().enumerate() {
            let number = offset + 1;
            let Some(hand) = self.finished_hand(number, draft)? else {
                form.skipped.push(number);
                continue;
            };

            let settlement = converter.convert(&hand.raw_scores);
            for (player_id, points) in &settlement.points {
                *form.totals.entry(player_id.clone()).or_default() += points;
            }
            form.hands.push(SettledHand {
                number,
                hand,
                settlement,
            });
        }
        Ok(form)
    }

    /// `Ok(None)` when a lenient preview should skip the hand.
    fn finished_hand(
        &self,
        number: usize,
        draft: &DraftHand,
    ) -> Result<Option<HandRecord>, ValidationError> {
        let unfinished = draft.raw_scores.len() != SEATS || draft.complete_scores().is_none();
        if unfinished && self.mode == ValidationMode::Lenient {
            return Ok(None);
        }
        self.check_players(number, draft)?;

        if draft.raw_scores.len() != SEATS {
            return Err(ValidationError::WrongPlayerCount {
                hand: number,
                found: draft.raw_scores.len(),
            });
        }

        let Some(raw_scores) = draft.complete_scores() else {
            return match draft.first_missing() {
                Some(player_id) => Err(ValidationError::MissingScore {
                    hand: number,
                    player_id: player_id.clone(),
                }),
                None => Ok(None),
            };
        };

        let actual: i64 = raw_scores.values().map(|&score| i64::from(score)).sum();
        let expected = self.rules.expected_total();
        if actual != expected {
            return Err(ValidationError::UnbalancedSum {
                hand: number,
                expected,
                actual,
            });
        }

        Ok(Some(HandRecord {
            raw_scores,
            yakuman_events: draft.yakuman_events.clone(),
            penalties: draft.penalties.clone(),
        }))
    }

    fn check_players(&self, number: usize, draft: &DraftHand) -> Result<(), ValidationError> {
        let seated = |player_id: &PlayerId| match self.roster {
            Some(roster) => roster.contains(player_id),
            None => draft.raw_scores.contains_key(player_id),
        };
        let unknown = |player_id: &PlayerId| ValidationError::UnknownPlayer {
            hand: number,
            player_id: player_id.clone(),
        };

        if let Some(roster) = self.roster {
            if let Some(stranger) = draft.raw_scores.keys().find(|id| !roster.contains(id)) {
                return Err(unknown(stranger));
            }
        }

        for event in &draft.yakuman_events {
            if !seated(&event.player_id) {
                return Err(unknown(&event.player_id));
            }
            if let Some((first, second)) = first_conflict(&event.yakumans) {
                return Err(ValidationError::IncompatibleYakuman {
                    hand: number,
                    player_id: event.player_id.clone(),
                    first,
                    second,
                });
            }
        }

        for penalty in &draft.penalties {
            if !seated(&penalty.player_id) {
                return Err(unknown(&penalty.player_id));
            }
            if !penalty.category.reasons().contains(&penalty.reason.as_str()) {
                return Err(ValidationError::UnknownPenaltyReason {
                    hand: number,
                    reason: penalty.reason.clone(),
                });
            }
            if penalty.count == 0 {
                return Err(ValidationError::InvalidPenaltyCount { hand: number });
            }
        }
        Ok(())
    }
}

/// A session as entered in the form, before it becomes a [`GameRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameForm {
    pub date: String,
    pub player_ids: Vec<PlayerId>,
    #[serde(default)]
    pub rules: RuleSettings,
    pub hands: Vec<DraftHand>,
}

impl GameForm {
    /// Strictly validates the form and produces the record to persist.
    pub fn finalize(
        &self,
        id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<GameRecord, ValidationError> {
        let distinct: BTreeSet<&PlayerId> = self.player_ids.iter().collect();
        if distinct.len() != SEATS || self.player_ids.len() != SEATS {
            return Err(ValidationError::InvalidRoster(distinct.len()));
        }

        let validated = GameFormValidator::new(&self.rules, ValidationMode::Strict)
            .with_roster(&self.player_ids)
            .validate(&self.hands)?;

        Ok(GameRecord {
            id: id.into(),
            date: self.date.clone(),
            player_ids: self.player_ids.clone(),
            rules: self.rules.clone(),
            hands: validated.hands.into_iter().map(|settled| settled.hand).collect(),
            total_points: validated.totals,
            created_at,
        })
    }
}
