use thiserror::Error;

use super::yakuman::Yakuman;

/// Reasons an in-progress session cannot be handed to persistence.
///
/// Hand numbers are 1-based, matching what the operator sees in the form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("No hands have been entered")]
    NoHands,

    #[error("Hand {hand}: expected 4 scores, found {found}")]
    WrongPlayerCount { hand: usize, found: usize },

    #[error("Hand {hand}: score for {player_id} has not been entered")]
    MissingScore { hand: usize, player_id: String },

    #[error("Hand {hand}: scores add up to {actual}, expected {expected}")]
    UnbalancedSum {
        hand: usize,
        expected: i64,
        actual: i64,
    },

    #[error("Hand {hand}: {player_id} is not part of this session")]
    UnknownPlayer { hand: usize, player_id: String },

    #[error("Hand {hand}: {first} cannot be combined with {second} ({player_id})")]
    IncompatibleYakuman {
        hand: usize,
        player_id: String,
        first: Yakuman,
        second: Yakuman,
    },

    #[error("Hand {hand}: '{reason}' is not a valid reason for this penalty")]
    UnknownPenaltyReason { hand: usize, reason: String },

    #[error("Hand {hand}: penalty count must be at least 1")]
    InvalidPenaltyCount { hand: usize },

    #[error("A session needs 4 different players, got {0}")]
    InvalidRoster(usize),
}
