//! Round records kept in the session history.

use crate::score::{DiffType, Side, Winner, difference_type, winner_of};

/// An immutable record of one decided round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundResult {
    /// Raw player hand total.
    pub player_score: u8,
    /// Raw banker hand total.
    pub banker_score: u8,
    /// The round winner.
    pub winner: Winner,
    /// Parity of the reduced score difference.
    pub diff_type: DiffType,
    /// 1-based sequence number.
    pub round: u32,
}

impl RoundResult {
    /// Scores a round and assigns it the given sequence number.
    #[must_use]
    pub const fn new(player_score: u8, banker_score: u8, round: u32) -> Self {
        Self {
            player_score,
            banker_score,
            winner: winner_of(player_score, banker_score),
            diff_type: difference_type(player_score, banker_score),
            round,
        }
    }

    /// Returns the winning side, or `None` for a tie.
    #[must_use]
    pub const fn winning_side(&self) -> Option<Side> {
        self.winner.side()
    }

    /// Returns whether the round was a tie.
    #[must_use]
    pub const fn is_tie(&self) -> bool {
        self.winner.is_tie()
    }
}

/// One point of the bankroll history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BankrollSample {
    /// Resolution index (0 for the seed entry).
    pub round: u32,
    /// Bankroll after the resolution.
    pub amount: i64,
}

/// Outcome of a resolved wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BetOutcome {
    /// The backed side won.
    Win,
    /// The other side won.
    Lose,
}

/// Result of resolving the outstanding suggestion against a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BetResolution {
    /// The side that was backed.
    pub side: Side,
    /// Win or lose.
    pub outcome: BetOutcome,
    /// The wager that was settled.
    pub amount: i64,
    /// Bankroll after settlement.
    pub bankroll: i64,
}

/// Returns the non-tie rounds of a history, oldest first.
pub fn non_tie_rounds(history: &[RoundResult]) -> impl DoubleEndedIterator<Item = &RoundResult> {
    history.iter().filter(|round| !round.is_tie())
}
